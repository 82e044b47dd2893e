//! Fonts used when a widget is not given one explicitly.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X10;

/// Font for button captions, legends and labels.
pub const DEFAULT_FONT: &MonoFont<'static> = &FONT_6X10;
