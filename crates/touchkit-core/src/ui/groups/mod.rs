// src/ui/groups/mod.rs
//! Selection controllers
//!
//! A controller owns its member widgets outright and is registered with the
//! dispatcher in their place. It exposes one touch target per member, so
//! every member keeps its own touch state, and routes member touches through
//! its own selection logic before calling the application handler with the
//! chosen member and that member's fixed arguments.

pub mod button_list;
pub mod icon_radio_buttons;
pub mod radio_buttons;

pub use button_list::ButtonList;
pub use icon_radio_buttons::IconRadioButtons;
pub use radio_buttons::RadioButtons;
