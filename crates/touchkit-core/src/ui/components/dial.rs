// src/ui/components/dial.rs
//! Clock-style dial with up to four pointers

use core::f32::consts::TAU;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use libm::{cosf, sinf};

use crate::ui::components::widget::WidgetBase;
use crate::ui::core::Widget;
use crate::ui::display::Surface;
use crate::ui::error::{WidgetError, WidgetResult, check_index};

pub const MAX_POINTERS: usize = 4;

/// Displays angles. Angle 0 points to twelve o'clock and grows clockwise.
pub struct Dial<D> {
    base: WidgetBase<D>,
    ticks: u32,
    /// Pointer lengths as a fraction of the radius.
    lengths: heapless::Vec<f32, MAX_POINTERS>,
    angles: [Option<f32>; MAX_POINTERS],
}

impl<D: Surface> Dial<D> {
    /// A dial with a single pointer of 0.9 radius and four tick marks.
    pub fn new(base: WidgetBase<D>) -> Self {
        let mut lengths = heapless::Vec::new();
        lengths.push(0.9).ok();
        Self {
            base,
            ticks: 4,
            lengths,
            angles: [None; MAX_POINTERS],
        }
    }

    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    /// Replace the pointers, one length fraction per pointer.
    pub fn with_pointers(mut self, lengths: &[f32]) -> WidgetResult<Self> {
        if lengths.is_empty() || lengths.len() > MAX_POINTERS {
            return Err(WidgetError::Configuration("dial needs one to four pointers"));
        }
        self.lengths.clear();
        for &length in lengths {
            self.lengths.push(length).ok();
        }
        Ok(self)
    }

    pub fn pointer_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn angle(&self, pointer: usize) -> Option<f32> {
        self.angles.get(pointer).copied().flatten()
    }

    /// Move one pointer, erasing it at its previous angle.
    pub fn set_pointer(&mut self, pointer: usize, angle: f32) -> WidgetResult<()> {
        check_index(pointer, self.lengths.len())?;
        if let Some(old) = self.angles[pointer] {
            self.draw_pointer(pointer, old, self.base.bg());
        }
        self.draw_pointer(pointer, angle, self.base.fg());
        self.angles[pointer] = Some(angle);
        Ok(())
    }

    fn radius(&self) -> f32 {
        self.base.bounds().size.height as f32 / 2.0 - self.base.border() as f32
    }

    fn origin(&self) -> (f32, f32) {
        let top_left = self.base.bounds().top_left;
        let inset = self.base.border() as f32 + self.radius();
        (top_left.x as f32 + inset, top_left.y as f32 + inset)
    }

    fn polar(&self, angle: f32, length: f32) -> Point {
        let (ox, oy) = self.origin();
        Point::new(
            (ox + length * sinf(angle)) as i32,
            (oy - length * cosf(angle)) as i32,
        )
    }

    fn draw_pointer(&self, pointer: usize, angle: f32, color: Rgb565) {
        let (ox, oy) = self.origin();
        let end = self.polar(angle, self.lengths[pointer] * self.radius());
        self.base
            .display()
            .draw_line(Point::new(ox as i32, oy as i32), end, color);
    }
}

impl<D: Surface> Widget for Dial<D> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        let display = self.base.display();
        let fg = self.base.fg();
        let radius = self.radius();
        let tick_len = 0.1 * radius;

        self.base.draw_border();
        for tick in 0..self.ticks {
            let theta = TAU * tick as f32 / self.ticks as f32;
            display.draw_line(
                self.polar(theta, radius),
                self.polar(theta, radius - tick_len),
                fg,
            );
        }
        let (ox, oy) = self.origin();
        display.draw_circle(Point::new(ox as i32, oy as i32), radius.max(0.0) as u32, fg);

        for pointer in 0..self.lengths.len() {
            if let Some(angle) = self.angles[pointer] {
                self.draw_pointer(pointer, angle, fg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, display, pixel_at};
    use crate::ui::display::DisplayHandle;
    use crate::ui::styling::{BLACK, WHITE};
    use core::f32::consts::FRAC_PI_2;

    fn dial(display: &DisplayHandle<RecordingSurface>) -> Dial<RecordingSurface> {
        Dial::new(WidgetBase::new(
            display,
            Rectangle::new(Point::new(0, 0), Size::new(100, 100)),
        ))
    }

    #[test]
    fn test_pointer_moves_and_old_one_is_erased() {
        let display = display();
        let mut dial = dial(&display);
        dial.show();

        dial.set_pointer(0, 0.0).unwrap();
        assert_eq!(pixel_at(&display, Point::new(50, 20)), Some(WHITE));

        dial.set_pointer(0, FRAC_PI_2).unwrap();
        assert_eq!(pixel_at(&display, Point::new(50, 20)), Some(BLACK));
        assert_eq!(pixel_at(&display, Point::new(80, 50)), Some(WHITE));
        assert_eq!(dial.angle(0), Some(FRAC_PI_2));
    }

    #[test]
    fn test_pointer_limits() {
        let display = display();
        let mut pair = dial(&display).with_pointers(&[0.9, 0.5]).unwrap();
        assert_eq!(pair.pointer_count(), 2);
        assert_eq!(
            pair.set_pointer(2, 0.0),
            Err(WidgetError::InvalidIndex { index: 2, count: 2 })
        );
        assert!(dial(&display).with_pointers(&[0.1; 5]).is_err());
        assert!(dial(&display).with_pointers(&[]).is_err());
    }
}
