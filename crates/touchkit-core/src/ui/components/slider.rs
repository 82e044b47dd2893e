// src/ui/components/slider.rs
//! Linear potentiometer-style slider

extern crate alloc;

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::warn;

use crate::ui::callback::{Callback, fire};
use crate::ui::components::widget::WidgetBase;
use crate::ui::core::{TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::{PixelRegion, Surface};

/// Handle thickness along the motion axis. The handle covers one more pixel
/// than this so it is centered on its position.
const HANDLE_THICKNESS: i32 = 6;

/// Maximum number of legends along the track.
pub const MAX_LEGENDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Value grows upwards.
    Vertical,
    /// Value grows to the right.
    Horizontal,
}

/// A slider with a value in `[0.0, 1.0]`.
///
/// The track shows `divisions` tick marks and optional legends. Dragging the
/// handle fires `on_move` whenever the value changes; lifting the finger (or
/// dragging off the slider) fires `on_end`. Each callback has its own fixed
/// arguments, set with [`with_move_args`](Self::with_move_args) and
/// [`with_end_args`](Self::with_end_args).
///
/// Moving the handle only redraws the handle: the pixels under it are saved
/// before it is drawn and written back before it moves, so the track and tick
/// marks are never repainted.
pub struct Slider<D, A = (), E = ()> {
    base: WidgetBase<D>,
    target: TouchTarget,
    orientation: Orientation,
    divisions: u32,
    legends: heapless::Vec<&'static str, MAX_LEGENDS>,
    slide_color: Option<Rgb565>,
    value: f32,
    committed: f32,
    saved: Option<PixelRegion>,
    on_move: Callback<Self, A>,
    on_end: Callback<Self, E>,
}

impl<D: Surface> Slider<D> {
    pub fn vertical(base: WidgetBase<D>) -> Self {
        Self::new(base, Orientation::Vertical)
    }

    pub fn horizontal(base: WidgetBase<D>) -> Self {
        Self::new(base, Orientation::Horizontal)
    }

    fn new(base: WidgetBase<D>, orientation: Orientation) -> Self {
        Self {
            target: TouchTarget::new(base.bounds(), true),
            base,
            orientation,
            divisions: 10,
            legends: heapless::Vec::new(),
            slide_color: None,
            value: 0.0,
            committed: 0.0,
            saved: None,
            on_move: Callback::with_args(()),
            on_end: Callback::with_args(()),
        }
    }
}

impl<D: Surface, A, E> Slider<D, A, E> {
    /// Fixed arguments passed to the `on_move` handler.
    ///
    /// The slider changes type, so handlers set before this call are dropped.
    pub fn with_move_args<B>(self, args: B) -> Slider<D, B, E> {
        Slider {
            base: self.base,
            target: self.target,
            orientation: self.orientation,
            divisions: self.divisions,
            legends: self.legends,
            slide_color: self.slide_color,
            value: self.value,
            committed: self.committed,
            saved: self.saved,
            on_move: Callback::with_args(args),
            on_end: Callback::from_shared(self.on_end.shared_args()),
        }
    }

    /// Fixed arguments passed to the `on_end` handler. Handlers set before
    /// this call are dropped.
    pub fn with_end_args<B>(self, args: B) -> Slider<D, A, B> {
        Slider {
            base: self.base,
            target: self.target,
            orientation: self.orientation,
            divisions: self.divisions,
            legends: self.legends,
            slide_color: self.slide_color,
            value: self.value,
            committed: self.committed,
            saved: self.saved,
            on_move: Callback::from_shared(self.on_move.shared_args()),
            on_end: Callback::with_args(args),
        }
    }

    pub fn on_move(mut self, handler: impl FnMut(&mut Self, &A) + 'static) -> Self {
        self.on_move.set_handler(Some(Box::new(handler)));
        self
    }

    pub fn on_end(mut self, handler: impl FnMut(&mut Self, &E) + 'static) -> Self {
        self.on_end.set_handler(Some(Box::new(handler)));
        self
    }

    /// Number of intervals between tick marks, 0 for none.
    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions;
        self
    }

    /// Legends spread evenly from the low end to the high end of the track.
    pub fn with_legends(mut self, legends: &[&'static str]) -> Self {
        self.legends.clear();
        for &legend in legends {
            if self.legends.push(legend).is_err() {
                warn!("Slider supports at most {} legends", MAX_LEGENDS);
                break;
            }
        }
        self
    }

    pub fn with_slide_color(mut self, color: Rgb565) -> Self {
        self.slide_color = Some(color);
        self
    }

    /// Initial value, clamped. Does not fire `on_move`.
    pub fn with_value(mut self, value: f32) -> Self {
        if !value.is_nan() {
            self.value = value.clamp(0.0, 1.0);
            self.committed = self.value;
        }
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped to `[0.0, 1.0]`.
    ///
    /// Only a value different from the last committed one fires `on_move` and
    /// moves the handle. The committed value is updated before the callback
    /// runs, so a callback setting the same value again is a no-op.
    pub fn set_value(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        let value = value.clamp(0.0, 1.0);
        self.value = value;
        if value == self.committed {
            return;
        }
        self.committed = value;
        fire(self, |s| &mut s.on_move);
        self.move_handle();
    }

    /// Change the track color and redraw everything.
    pub fn set_color(&mut self, color: Rgb565) {
        if color != self.base.fg() {
            self.base.set_fg(color);
            self.show();
        }
    }

    pub fn move_args(&self) -> &A {
        self.on_move.args()
    }

    pub fn end_args(&self) -> &E {
        self.on_end.args()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.target.enabled = enabled;
    }

    /// Length of the handle's travel in pixels.
    fn travel(&self) -> i32 {
        let size = self.base.bounds().size;
        let length = match self.orientation {
            Orientation::Vertical => size.height,
            Orientation::Horizontal => size.width,
        };
        length as i32 - 2 * (self.base.border() as i32 + HANDLE_THICKNESS / 2)
    }

    /// Axis coordinate of value 0.0.
    fn origin(&self) -> i32 {
        let bounds = self.base.bounds();
        let inset = self.base.border() as i32 + HANDLE_THICKNESS / 2;
        match self.orientation {
            Orientation::Vertical => bounds.top_left.y + inset + self.travel(),
            Orientation::Horizontal => bounds.top_left.x + inset,
        }
    }

    fn value_at(&self, point: TouchPoint) -> Option<f32> {
        let travel = self.travel();
        if travel <= 0 {
            return None;
        }
        let offset = match self.orientation {
            Orientation::Vertical => self.origin() - point.y as i32,
            Orientation::Horizontal => point.x as i32 - self.origin(),
        };
        Some(offset as f32 / travel as f32)
    }

    fn handle_area(&self) -> Rectangle {
        let bounds = self.base.bounds();
        let border = self.base.border();
        let travel = self.travel().max(0) as f32;
        let offset = (self.value * travel) as i32;
        let center = bounds.center();

        match self.orientation {
            Orientation::Vertical => {
                let breadth = (bounds.size.width.saturating_sub(2 * border) as f32 / 1.3) as u32 & !1;
                let pos = self.origin() - offset;
                Rectangle::new(
                    Point::new(center.x - (breadth / 2) as i32, pos - HANDLE_THICKNESS / 2),
                    Size::new(breadth + 1, HANDLE_THICKNESS as u32 + 1),
                )
            }
            Orientation::Horizontal => {
                let breadth = (bounds.size.height.saturating_sub(2 * border) as f32 / 1.3) as u32 & !1;
                let pos = self.origin() + offset;
                Rectangle::new(
                    Point::new(pos - HANDLE_THICKNESS / 2, center.y - (breadth / 2) as i32),
                    Size::new(HANDLE_THICKNESS as u32 + 1, breadth + 1),
                )
            }
        }
    }

    /// Put back what the handle covered, then draw it at the current value.
    fn move_handle(&mut self) {
        let display = self.base.display().clone();
        if let Some(saved) = self.saved.take() {
            display.restore_region(&saved);
        }
        let area = self.handle_area();
        self.saved = Some(display.save_region(area));
        display.fill_rect(area, self.slide_color.unwrap_or(self.base.fg()));
    }

    fn draw_track(&self) {
        let display = self.base.display();
        let bounds = self.base.bounds();
        let fg = self.base.fg();
        let border = self.base.draw_border() as i32;
        let travel = self.travel();
        let origin = self.origin();

        match self.orientation {
            Orientation::Vertical => {
                let x = bounds.top_left.x + border;
                let third = (bounds.size.width as i32 - 2 * border) / 3;
                let top = origin - travel;
                display.draw_rect(
                    Rectangle::with_corners(Point::new(x + third, top), Point::new(x + 2 * third, origin)),
                    fg,
                );
                if self.divisions > 0 {
                    for tick in 0..=self.divisions {
                        let y = top + travel * tick as i32 / self.divisions as i32;
                        display.draw_line(Point::new(x + 1, y), Point::new(x + third, y), fg);
                        display.draw_line(
                            Point::new(x + 1 + 2 * third, y),
                            Point::new(x + 3 * third, y),
                            fg,
                        );
                    }
                }

                let step = spacing(travel, self.legends.len());
                let legend_x = bounds.top_left.x + bounds.size.width as i32 + border;
                for (i, legend) in self.legends.iter().enumerate() {
                    self.base
                        .print_left(legend, Point::new(legend_x, origin - step * i as i32));
                }
            }
            Orientation::Horizontal => {
                let y = bounds.top_left.y + border;
                let third = (bounds.size.height as i32 - 2 * border) / 3;
                let right = origin + travel;
                display.draw_rect(
                    Rectangle::with_corners(Point::new(origin, y + third), Point::new(right, y + 2 * third)),
                    fg,
                );
                if self.divisions > 0 {
                    for tick in 0..=self.divisions {
                        let x = origin + travel * tick as i32 / self.divisions as i32;
                        display.draw_line(Point::new(x, y + 1), Point::new(x, y + third), fg);
                        display.draw_line(
                            Point::new(x, y + 1 + 2 * third),
                            Point::new(x, y + 3 * third),
                            fg,
                        );
                    }
                }

                let step = spacing(travel, self.legends.len());
                let legend_y = bounds.top_left.y - self.base.font().character_size.height as i32 / 2 - 1;
                for (i, legend) in self.legends.iter().enumerate() {
                    self.base
                        .print_centered(legend, Point::new(origin + step * i as i32, legend_y));
                }
            }
        }
    }
}

/// Distance between `count` legends spread over `travel` pixels.
fn spacing(travel: i32, count: usize) -> i32 {
    if count <= 1 {
        0
    } else {
        travel / (count as i32 - 1)
    }
}

impl<D: Surface, A, E> Widget for Slider<D, A, E> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        // The old handle has to go before the track is repainted, otherwise
        // an unfilled slider keeps a ghost handle.
        if let Some(saved) = self.saved.take() {
            self.base.display().restore_region(&saved);
        }
        self.draw_track();
        self.move_handle();
    }
}

impl<D: Surface, A, E> Touchable for Slider<D, A, E> {
    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        (index == 0).then_some(&mut self.target)
    }

    fn touched(&mut self, _index: usize, point: TouchPoint) {
        if let Some(value) = self.value_at(point) {
            self.set_value(value);
        }
    }

    fn untouched(&mut self, _index: usize) {
        fire(self, |s| &mut s.on_end);
    }
}
