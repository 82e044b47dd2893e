//! Named colors for widgets and demo screens
//!
//! All constants are RGB565, the native format of the supported panels.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Medium gray - disabled controls, track outlines
pub const GREY: Rgb565 = Rgb565::new(100 >> 3, 100 >> 2, 100 >> 3);

/// Light gray - for secondary text
pub const LIGHT_GREY: Rgb565 = Rgb565::new(21, 42, 21);

// ============================================================================
// Accent Colors
// ============================================================================

pub const RED: Rgb565 = Rgb565::new(31, 0, 0);

pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);

pub const BLUE: Rgb565 = Rgb565::new(0, 0, 31);

pub const YELLOW: Rgb565 = Rgb565::new(31, 63, 0);

pub const CYAN: Rgb565 = Rgb565::new(0, 63, 31);

pub const MAGENTA: Rgb565 = Rgb565::new(31, 0, 31);

/// Dark green - unlit LEDs, pressed button backgrounds
pub const DARK_GREEN: Rgb565 = Rgb565::new(0, 100 >> 2, 0);

/// Light green - highlight color for selected radio buttons
pub const LIGHT_GREEN: Rgb565 = Rgb565::new(0, 180 >> 2, 0);

/// Navy - default slider slide color
pub const NAVY: Rgb565 = Rgb565::new(0, 0, 128 >> 3);

/// Teal-green accent used for the knob pointer and meter bar
pub const TEAL: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Warm orange accent
pub const ORANGE: Rgb565 = Rgb565::new(200 >> 3, 145 >> 2, 85 >> 3);
