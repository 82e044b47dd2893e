// src/ui/components/widget.rs
//! Geometry and colors shared by every widget

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::ui::display::{DisplayHandle, Surface};
use crate::ui::styling::DEFAULT_FONT;

/// Placement, border and colors of a widget.
///
/// Built once and handed to a widget constructor; the geometry does not change
/// afterwards. Colors default to the display handle's foreground and
/// background.
///
/// ```ignore
/// let base = WidgetBase::new(&display, Rectangle::new(Point::new(10, 10), Size::new(60, 30)))
///     .with_border(2)
///     .with_fill(true)
///     .with_colors(RED, BLACK);
/// let button = Button::new(base, ButtonShape::Rectangle, "Stop");
/// ```
pub struct WidgetBase<D> {
    display: DisplayHandle<D>,
    bounds: Rectangle,
    border: u32,
    fill: bool,
    fg: Rgb565,
    bg: Rgb565,
    font_color: Rgb565,
    font: &'static MonoFont<'static>,
}

impl<D: Surface> WidgetBase<D> {
    pub fn new(display: &DisplayHandle<D>, bounds: Rectangle) -> Self {
        Self {
            display: display.clone(),
            bounds,
            border: 0,
            fill: false,
            fg: display.foreground(),
            bg: display.background(),
            font_color: display.foreground(),
            font: DEFAULT_FONT,
        }
    }

    /// Border width in pixels, 0 for none.
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_colors(mut self, fg: Rgb565, bg: Rgb565) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn with_font_color(mut self, color: Rgb565) -> Self {
        self.font_color = color;
        self
    }

    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Keep the position, change the size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.bounds.size = size;
        self
    }

    pub fn display(&self) -> &DisplayHandle<D> {
        &self.display
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn fg(&self) -> Rgb565 {
        self.fg
    }

    pub fn bg(&self) -> Rgb565 {
        self.bg
    }

    pub fn font_color(&self) -> Rgb565 {
        self.font_color
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    pub(crate) fn set_fg(&mut self, fg: Rgb565) {
        self.fg = fg;
    }

    /// Paint the background if filled and the outline if bordered.
    ///
    /// Returns the border width so callers can inset their content.
    pub fn draw_border(&self) -> u32 {
        if self.fill {
            self.display.fill_rect(self.bounds, self.bg);
        }
        if self.border > 0 {
            self.display.draw_rect(self.bounds, self.fg);
        }
        self.border
    }

    /// Fill the whole box with the background color.
    pub fn erase(&self) {
        self.display.fill_rect(self.bounds, self.bg);
    }

    /// Bounds shrunk by the border on every side.
    pub fn inner(&self) -> Rectangle {
        self.bounds.offset(-(self.border as i32))
    }

    pub fn print_centered(&self, text: &str, center: Point) {
        self.display
            .draw_text(text, center, self.font, self.font_color, Alignment::Center);
    }

    /// Text starting at `position`, vertically centered on it.
    pub fn print_left(&self, text: &str, position: Point) {
        self.display
            .draw_text(text, position, self.font, self.font_color, Alignment::Left);
    }
}
