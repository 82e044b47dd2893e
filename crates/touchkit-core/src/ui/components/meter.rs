// src/ui/components/meter.rs
//! Vertical bar meter

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::warn;

use crate::ui::components::widget::WidgetBase;
use crate::ui::core::Widget;
use crate::ui::display::{PixelRegion, Surface};

pub const MAX_LEGENDS: usize = 8;

/// Length of the tick marks on either side of the scale.
const TICK_LEN: i32 = 5;

/// A scale with a horizontal pointer line showing a value in `[0.0, 1.0]`.
///
/// Like the slider handle, the pointer saves the row of pixels it covers and
/// puts it back when it moves.
pub struct Meter<D> {
    base: WidgetBase<D>,
    divisions: u32,
    legends: heapless::Vec<&'static str, MAX_LEGENDS>,
    pointer_color: Option<Rgb565>,
    value: f32,
    committed: f32,
    saved: Option<PixelRegion>,
}

impl<D: Surface> Meter<D> {
    pub fn new(base: WidgetBase<D>) -> Self {
        Self {
            base,
            divisions: 10,
            legends: heapless::Vec::new(),
            pointer_color: None,
            value: 0.0,
            committed: 0.0,
            saved: None,
        }
    }

    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions;
        self
    }

    /// Legends from the bottom of the scale to the top.
    pub fn with_legends(mut self, legends: &[&'static str]) -> Self {
        self.legends.clear();
        for &legend in legends {
            if self.legends.push(legend).is_err() {
                warn!("Meter supports at most {} legends", MAX_LEGENDS);
                break;
            }
        }
        self
    }

    pub fn with_pointer_color(mut self, color: Rgb565) -> Self {
        self.pointer_color = Some(color);
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        if !value.is_nan() {
            self.value = value.clamp(0.0, 1.0);
            self.committed = self.value;
        }
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped. Moves the pointer only when it changes.
    pub fn set_value(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.value = value.clamp(0.0, 1.0);
        if self.value != self.committed {
            self.committed = self.value;
            self.move_pointer();
        }
    }

    /// Top and bottom of the scale.
    fn scale(&self) -> (i32, i32) {
        let bounds = self.base.bounds();
        let border = self.base.border() as i32;
        (
            bounds.top_left.y + border + 2,
            bounds.top_left.y + bounds.size.height as i32 - border,
        )
    }

    fn move_pointer(&mut self) {
        let display = self.base.display().clone();
        if let Some(saved) = self.saved.take() {
            display.restore_region(&saved);
        }
        let bounds = self.base.bounds();
        let (top, bottom) = self.scale();
        let y = bottom - (self.value * (bottom - top) as f32) as i32;
        let row = Rectangle::new(Point::new(bounds.top_left.x, y), Size::new(bounds.size.width, 1));
        self.saved = Some(display.save_region(row));
        display.fill_rect(row, self.pointer_color.unwrap_or(self.base.fg()));
    }
}

impl<D: Surface> Widget for Meter<D> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.base.display().restore_region(&saved);
        }
        self.base.draw_border();

        let display = self.base.display();
        let bounds = self.base.bounds();
        let fg = self.base.fg();
        let (top, bottom) = self.scale();
        let height = bottom - top;
        let left = bounds.top_left.x;
        let right = left + bounds.size.width as i32 - 1;

        if self.divisions > 0 {
            for tick in 0..=self.divisions {
                let y = top + height * tick as i32 / self.divisions as i32;
                display.draw_line(Point::new(left, y), Point::new(left + TICK_LEN - 1, y), fg);
                display.draw_line(Point::new(right - TICK_LEN + 1, y), Point::new(right, y), fg);
            }
        }

        let step = if self.legends.len() <= 1 {
            0
        } else {
            height / (self.legends.len() as i32 - 1)
        };
        let center_x = bounds.center().x;
        for (i, legend) in self.legends.iter().enumerate() {
            self.base
                .print_centered(legend, Point::new(center_x, bottom - step * i as i32));
        }

        self.move_pointer();
    }
}
