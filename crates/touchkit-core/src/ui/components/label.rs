// src/ui/components/label.rs
//! Single-line text field

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::components::widget::WidgetBase;
use crate::ui::core::Widget;
use crate::ui::display::Surface;

/// Longest text a label keeps for redraws, in bytes.
pub const MAX_LABEL_LEN: usize = 64;

/// A bordered text field one font line high.
pub struct Label<D> {
    base: WidgetBase<D>,
    text: heapless::String<MAX_LABEL_LEN>,
}

impl<D: Surface> Label<D> {
    /// The height of `base` is replaced by the font height plus the border on
    /// both sides; the width is kept.
    pub fn new(base: WidgetBase<D>) -> Self {
        let height = base.font().character_size.height + 2 * base.border();
        let width = base.bounds().size.width;
        Self {
            base: base.with_size(Size::new(width, height)),
            text: heapless::String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. An empty string leaves the field as it is.
    pub fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.draw_text();
    }

    fn draw_text(&self) {
        let inner = self.base.inner();
        self.base.display().fill_rect(inner, self.base.bg());
        if !self.text.is_empty() {
            let position = Point::new(inner.top_left.x, inner.center().y);
            self.base.print_left(&self.text, position);
        }
    }
}

impl<D: Surface> Widget for Label<D> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        self.base.draw_border();
        self.draw_text();
    }
}
