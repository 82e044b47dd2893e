// src/ui/mod.rs
//! touchkit UI system - widgets and touch dispatch for TFT touch panels
//!
//! This module provides:
//! - Core touch types and the [`Touchable`] trait shared by interactive widgets
//! - The [`TouchDispatcher`] that fans touch samples out to registered widgets
//! - Interactive widgets (buttons, checkboxes, icon buttons, sliders, knobs)
//! - Composite selection controllers (button lists, radio groups)
//! - Display-only widgets (labels, dials, LEDs, meters, icon gauges)

pub mod callback;
pub mod components;
pub mod core;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod groups;
pub mod styling;
pub mod timer;

// Re-export commonly used items
pub use callback::{Callback, Handler};
pub use components::{
    Button, ButtonShape, Checkbox, Dial, IconButton, IconGauge, IconSet, Knob, Label, Led, Meter,
    Orientation, Slider, WidgetBase,
};
pub use self::core::{Tick, TouchPoint, TouchSample, TouchState, TouchTarget, Touchable, Widget};
pub use dispatch::{ChannelTouchSource, TouchDispatcher, TouchHandle, TouchSource};
pub use display::{DisplayHandle, PixelRegion, Surface};
pub use error::{WidgetError, WidgetResult};
pub use groups::{ButtonList, IconRadioButtons, RadioButtons};
pub use timer::RevertTimer;

extern crate alloc;
use alloc::rc::Rc;
use ::core::cell::RefCell;

/// A widget shared between the dispatcher and application code.
pub type Shared<W> = Rc<RefCell<W>>;

/// Wrap a widget so it can be registered with a [`TouchDispatcher`].
pub fn shared<W>(widget: W) -> Shared<W> {
    Rc::new(RefCell::new(widget))
}
