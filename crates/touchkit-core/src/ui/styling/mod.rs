//! Styling for touchkit widgets
//!
//! - [`colors`] - named RGB565 colors
//! - [`fonts`] - the default widget font

pub mod colors;
pub mod fonts;

pub use colors::{
    BLACK, BLUE, CYAN, DARK_GREEN, GREEN, GREY, LIGHT_GREEN, LIGHT_GREY, MAGENTA, NAVY, ORANGE,
    RED, TEAL, WHITE, YELLOW,
};
pub use fonts::DEFAULT_FONT;
