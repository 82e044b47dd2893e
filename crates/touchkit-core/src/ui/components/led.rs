// src/ui/components/led.rs
//! Round indicator lamp

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::components::widget::WidgetBase;
use crate::ui::core::Widget;
use crate::ui::display::Surface;
use crate::ui::styling::{BLACK, RED};

pub struct Led<D> {
    base: WidgetBase<D>,
    color: Rgb565,
    lit: bool,
}

impl<D: Surface> Led<D> {
    pub fn new(base: WidgetBase<D>) -> Self {
        Self {
            base,
            color: RED,
            lit: false,
        }
    }

    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    pub fn is_on(&self) -> bool {
        self.lit
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    /// Light the LED, optionally switching to a new color first.
    pub fn on(&mut self, color: Option<Rgb565>) {
        if let Some(color) = color {
            self.color = color;
        }
        self.lit = true;
        self.show();
    }

    pub fn off(&mut self) {
        self.lit = false;
        self.show();
    }

    fn lamp(&self) -> (Point, u32) {
        let bounds = self.base.bounds();
        let radius = bounds.size.height.saturating_sub(2 * self.base.border()) / 2;
        let offset = (radius + self.base.border()) as i32;
        (bounds.top_left + Point::new(offset, offset), radius)
    }
}

impl<D: Surface> Widget for Led<D> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        let (center, radius) = self.lamp();
        let display = self.base.display();
        let color = if self.lit { self.color } else { BLACK };
        display.fill_circle(center, radius, color);
        display.draw_circle(center, radius, self.base.fg());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{display, pixel_at};
    use crate::ui::styling::GREEN;

    #[test]
    fn test_on_off_and_color_change() {
        let display = display();
        let mut led = Led::new(WidgetBase::new(
            &display,
            Rectangle::new(Point::new(0, 0), Size::new(20, 20)),
        ));
        let center = Point::new(10, 10);

        led.on(None);
        assert!(led.is_on());
        assert_eq!(pixel_at(&display, center), Some(RED));

        led.on(Some(GREEN));
        assert_eq!(pixel_at(&display, center), Some(GREEN));

        led.off();
        assert!(!led.is_on());
        assert_eq!(pixel_at(&display, center), Some(BLACK));

        // Color is remembered for the next `on`.
        led.on(None);
        assert_eq!(pixel_at(&display, center), Some(GREEN));
    }
}
