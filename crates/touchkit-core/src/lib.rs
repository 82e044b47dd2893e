//! Hardware-independent core library for touchkit
//!
//! This crate contains the platform-agnostic part of the touchkit widget
//! toolkit for touch-panel TFT displays: the touch dispatcher that turns raw
//! touch samples into per-widget events, the interactive widgets (buttons,
//! checkboxes, icon buttons, sliders, knobs), the composite selection
//! controllers built on top of them, and a handful of display-only widgets.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod framebuffer;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
