// src/ui/components/mod.rs
//! Widget implementations

pub mod button;
pub mod checkbox;
pub mod dial;
pub mod icon;
pub mod icon_button;
pub mod icon_gauge;
pub mod knob;
pub mod label;
pub mod led;
pub mod meter;
pub mod slider;
pub mod widget;

pub use button::{Button, ButtonShape};
pub use checkbox::Checkbox;
pub use dial::Dial;
pub use icon::IconSet;
pub use icon_button::IconButton;
pub use icon_gauge::IconGauge;
pub use knob::Knob;
pub use label::Label;
pub use led::Led;
pub use meter::Meter;
pub use slider::{Orientation, Slider};
pub use widget::WidgetBase;
