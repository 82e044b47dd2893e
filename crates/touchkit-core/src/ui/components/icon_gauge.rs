// src/ui/components/icon_gauge.rs
//! Gauge that shows a value by picking one of several icons

use embedded_graphics::primitives::Rectangle;
use log::error;

use crate::ui::components::icon::IconSet;
use crate::ui::components::widget::WidgetBase;
use crate::ui::core::Widget;
use crate::ui::display::Surface;
use crate::ui::error::{WidgetError, WidgetResult, check_index};

/// Battery bars, signal strength and the like. A value in `[0.0, 1.0]` is
/// split evenly over the icons, the last icon covering 1.0 itself.
pub struct IconGauge<D> {
    base: WidgetBase<D>,
    icons: IconSet,
    state: usize,
    value: f32,
}

impl<D: Surface> IconGauge<D> {
    pub fn new(base: WidgetBase<D>, icons: IconSet) -> WidgetResult<Self> {
        if icons.is_empty() {
            return Err(WidgetError::Configuration("icon gauge needs at least one icon"));
        }
        Ok(Self {
            base,
            icons,
            state: 0,
            value: 0.0,
        })
    }

    /// Initial icon, not drawn until [`Widget::show`].
    pub fn with_icon(mut self, index: usize) -> WidgetResult<Self> {
        check_index(index, self.icons.len())?;
        self.state = index;
        Ok(self)
    }

    pub fn icon(&self) -> usize {
        self.state
    }

    pub fn set_icon(&mut self, index: usize) -> WidgetResult<()> {
        check_index(index, self.icons.len())?;
        self.state = index;
        self.show();
        Ok(())
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.value = value.clamp(0.0, 1.0);
        let count = self.icons.len();
        self.state = ((self.value * count as f32) as usize).min(count - 1);
        self.show();
    }
}

impl<D: Surface> Widget for IconGauge<D> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        let top_left = self.base.bounds().top_left;
        if let Err(e) = self.icons.draw(self.base.display(), self.state, top_left) {
            error!("Icon gauge state out of range: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, display, pixel_at};
    use crate::ui::display::DisplayHandle;
    use crate::ui::styling::{BLUE, GREEN, RED, YELLOW};
    use embedded_graphics::prelude::*;

    fn gauge(display: &DisplayHandle<RecordingSurface>) -> IconGauge<RecordingSurface> {
        let icons = IconSet::render(Size::new(6, 6), 4, |frame, _| [RED, YELLOW, GREEN, BLUE][frame]);
        IconGauge::new(
            WidgetBase::new(display, Rectangle::new(Point::new(10, 10), Size::new(6, 6))),
            icons,
        )
        .unwrap()
    }

    #[test]
    fn test_value_maps_to_icon() {
        let display = display();
        let mut gauge = gauge(&display);
        let cases = [(0.0, 0), (0.24, 0), (0.25, 1), (0.6, 2), (0.99, 3), (1.0, 3), (7.0, 3), (-1.0, 0)];
        for (value, icon) in cases {
            gauge.set_value(value);
            assert_eq!(gauge.icon(), icon, "value {}", value);
        }
        assert_eq!(gauge.value(), 0.0);
    }

    #[test]
    fn test_set_icon_draws_and_checks_range() {
        let display = display();
        let mut gauge = gauge(&display);
        gauge.set_icon(2).unwrap();
        assert_eq!(pixel_at(&display, Point::new(12, 12)), Some(GREEN));
        assert_eq!(
            gauge.set_icon(4),
            Err(WidgetError::InvalidIndex { index: 4, count: 4 })
        );
        assert_eq!(gauge.icon(), 2);
    }
}
