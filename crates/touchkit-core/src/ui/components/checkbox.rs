// src/ui/components/checkbox.rs
//! Boolean toggle

extern crate alloc;

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::callback::{Callback, fire};
use crate::ui::components::widget::WidgetBase;
use crate::ui::core::{TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;

/// A square box that toggles on every tap.
///
/// Checked boxes are filled with the fill color when one is given, otherwise
/// a cross is drawn.
pub struct Checkbox<D, A = ()> {
    base: WidgetBase<D>,
    target: TouchTarget,
    fill_color: Option<Rgb565>,
    value: bool,
    callback: Callback<Self, A>,
}

impl<D: Surface> Checkbox<D, ()> {
    pub fn new(base: WidgetBase<D>) -> Self {
        Self {
            target: TouchTarget::new(base.bounds(), false),
            base,
            fill_color: None,
            value: false,
            callback: Callback::with_args(()),
        }
    }
}

impl<D: Surface, A> Checkbox<D, A> {
    pub fn with_args<B>(self, args: B) -> Checkbox<D, B> {
        Checkbox {
            base: self.base,
            target: self.target,
            fill_color: self.fill_color,
            value: self.value,
            callback: Callback::with_args(args),
        }
    }

    pub fn on_change(mut self, handler: impl FnMut(&mut Self, &A) + 'static) -> Self {
        self.callback.set_handler(Some(Box::new(handler)));
        self
    }

    pub fn with_fill_color(mut self, color: Rgb565) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Initial state. Does not fire the callback.
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Change the state. Setting the current value does nothing.
    pub fn set_value(&mut self, value: bool) {
        if value == self.value {
            return;
        }
        self.value = value;
        fire(self, |c| &mut c.callback);
        self.show();
    }

    pub fn args(&self) -> &A {
        self.callback.args()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.target.enabled = enabled;
    }

    fn draw(&self) {
        let display = self.base.display();
        let bounds = self.base.bounds();
        display.draw_rect(bounds, self.base.fg());

        let inner = bounds.offset(-2);
        if !self.value {
            display.fill_rect(inner, self.base.bg());
            return;
        }
        match self.fill_color {
            Some(color) => display.fill_rect(inner, color),
            None => {
                display.fill_rect(inner, self.base.bg());
                if let Some(bottom_right) = inner.bottom_right() {
                    let top_left = inner.top_left;
                    let fg = self.base.fg();
                    display.draw_line(top_left, bottom_right, fg);
                    display.draw_line(
                        Point::new(bottom_right.x, top_left.y),
                        Point::new(top_left.x, bottom_right.y),
                        fg,
                    );
                }
            }
        }
    }
}

impl<D: Surface, A> Widget for Checkbox<D, A> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        self.draw();
    }
}

impl<D: Surface, A> Touchable for Checkbox<D, A> {
    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        (index == 0).then_some(&mut self.target)
    }

    fn touched(&mut self, _index: usize, _point: TouchPoint) {
        let next = !self.value;
        self.set_value(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, display, draw_count, pixel_at};
    use crate::ui::core::TouchSample;
    use crate::ui::dispatch::TouchDispatcher;
    use crate::ui::display::DisplayHandle;
    use crate::ui::shared;
    use crate::ui::styling::{BLACK, GREEN, WHITE};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn base(display: &DisplayHandle<RecordingSurface>) -> WidgetBase<RecordingSurface> {
        WidgetBase::new(display, Rectangle::new(Point::new(0, 0), Size::new(20, 20)))
    }

    #[test]
    fn test_every_tap_toggles_and_notifies() {
        let display = display();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let checkbox = shared(
            Checkbox::new(base(&display)).on_change(move |c, _| sink.borrow_mut().push(c.value())),
        );
        let mut dispatcher = TouchDispatcher::new();
        dispatcher.register(&checkbox);

        for _ in 0..3 {
            dispatcher.dispatch(TouchSample::Contact(TouchPoint::new(5, 5)));
            dispatcher.dispatch(TouchSample::Released);
        }
        assert_eq!(*log.borrow(), alloc::vec![true, false, true]);
    }

    #[test]
    fn test_setting_same_value_is_silent() {
        let display = display();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut checkbox = Checkbox::new(base(&display))
            .with_value(true)
            .on_change(move |_, _| *sink.borrow_mut() += 1);

        let before = draw_count(&display);
        checkbox.set_value(true);
        assert_eq!(draw_count(&display), before);
        assert_eq!(*calls.borrow(), 0);

        checkbox.set_value(false);
        assert_eq!(*calls.borrow(), 1);
        assert!(draw_count(&display) > before);
    }

    #[test]
    fn test_checked_rendering() {
        let display = display();
        let mut filled = Checkbox::new(base(&display)).with_fill_color(GREEN);
        filled.set_value(true);
        assert_eq!(pixel_at(&display, Point::new(10, 10)), Some(GREEN));

        let mut crossed = Checkbox::new(base(&display));
        crossed.set_value(true);
        assert_eq!(pixel_at(&display, Point::new(2, 2)), Some(WHITE));
        assert_eq!(pixel_at(&display, Point::new(10, 4)), Some(BLACK));
    }
}
