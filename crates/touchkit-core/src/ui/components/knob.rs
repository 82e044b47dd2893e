// src/ui/components/knob.rs
//! Rotary control knob

extern crate alloc;

use alloc::boxed::Box;
use core::f32::consts::TAU;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use libm::{atan2f, cosf, sinf};

use crate::config::{DEFAULT_KNOB_DEAD_ZONE, UiConfig};
use crate::ui::callback::{Callback, fire};
use crate::ui::components::widget::WidgetBase;
use crate::ui::core::{TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;

/// A round knob turned by dragging around its center.
///
/// The usable travel is `arc` radians centered on twelve o'clock; the value
/// runs from 0.0 at the counter-clockwise end to 1.0 at the clockwise end.
/// Touches close to the center are ignored because their angle is mostly
/// noise.
pub struct Knob<D, A = (), E = ()> {
    base: WidgetBase<D>,
    target: TouchTarget,
    arc: f32,
    ticks: u32,
    color: Option<Rgb565>,
    dead_zone: f32,
    value: f32,
    committed: f32,
    drawn: Option<f32>,
    on_move: Callback<Self, A>,
    on_end: Callback<Self, E>,
}

impl<D: Surface> Knob<D> {
    /// The knob is a circle fitting the height of `base`.
    pub fn new(base: WidgetBase<D>) -> Self {
        Self {
            target: TouchTarget::new(base.bounds(), true),
            base,
            arc: TAU,
            ticks: 9,
            color: None,
            dead_zone: DEFAULT_KNOB_DEAD_ZONE,
            value: 0.0,
            committed: 0.0,
            drawn: None,
            on_move: Callback::with_args(()),
            on_end: Callback::with_args(()),
        }
    }
}

impl<D: Surface, A, E> Knob<D, A, E> {
    /// Fixed arguments passed to the `on_move` handler. Handlers set before
    /// this call are dropped.
    pub fn with_move_args<B>(self, args: B) -> Knob<D, B, E> {
        Knob {
            base: self.base,
            target: self.target,
            arc: self.arc,
            ticks: self.ticks,
            color: self.color,
            dead_zone: self.dead_zone,
            value: self.value,
            committed: self.committed,
            drawn: self.drawn,
            on_move: Callback::with_args(args),
            on_end: Callback::from_shared(self.on_end.shared_args()),
        }
    }

    pub fn with_end_args<B>(self, args: B) -> Knob<D, A, B> {
        Knob {
            base: self.base,
            target: self.target,
            arc: self.arc,
            ticks: self.ticks,
            color: self.color,
            dead_zone: self.dead_zone,
            value: self.value,
            committed: self.committed,
            drawn: self.drawn,
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

    /// Usable angle in radians, clamped to a full turn.
    pub fn with_arc(mut self, arc: f32) -> Self {
        self.arc = if arc.is_nan() { TAU } else { arc.clamp(0.0, TAU) };
        self
    }

    /// Number of tick marks, at least the two ends of travel.
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks.max(2);
        self
    }

    /// Fill color of the knob face.
    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_config(mut self, config: &UiConfig) -> Self {
        self.dead_zone = config.knob_dead_zone;
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

    pub fn arc(&self) -> f32 {
        self.arc
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped to `[0.0, 1.0]`. Same change gating as
    /// [`Slider::set_value`](crate::ui::Slider::set_value).
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
        fire(self, |k| &mut k.on_move);
        self.draw_pointer();
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

    fn radius(&self) -> f32 {
        self.base.bounds().size.height as f32 / 2.0 - self.base.border() as f32
    }

    fn origin(&self) -> (f32, f32) {
        let top_left = self.base.bounds().top_left;
        let inset = self.base.border() as f32 + self.radius();
        (top_left.x as f32 + inset, top_left.y as f32 + inset)
    }

    fn tick_len(&self) -> f32 {
        0.1 * self.radius()
    }

    /// Point at `length` from the center, `angle` radians clockwise from
    /// twelve o'clock.
    fn polar(&self, angle: f32, length: f32) -> Point {
        let (ox, oy) = self.origin();
        Point::new(
            (ox + length * sinf(angle)) as i32,
            (oy - length * cosf(angle)) as i32,
        )
    }

    fn pointer(&self, value: f32, color: Rgb565) {
        let (ox, oy) = self.origin();
        let length = self.radius() - self.tick_len() - 5.0;
        let end = self.polar(value * self.arc - self.arc / 2.0, length);
        self.base
            .display()
            .draw_line(Point::new(ox as i32, oy as i32), end, color);
    }

    fn draw_pointer(&mut self) {
        if let Some(old) = self.drawn {
            self.pointer(old, self.color.unwrap_or(self.base.bg()));
        }
        self.pointer(self.value, self.base.fg());
        self.drawn = Some(self.value);
    }

    fn value_at(&self, point: TouchPoint) -> Option<f32> {
        let (ox, oy) = self.origin();
        let radius = self.radius();
        if self.arc <= 0.0 || radius <= 0.0 {
            return None;
        }
        let dx = point.x as f32 - ox;
        let dy = oy - point.y as f32;
        if (dx * dx + dy * dy) / (radius * radius) < self.dead_zone {
            return None;
        }
        // Swapped axes measure the angle from vertical.
        let half = self.arc / 2.0;
        let alpha = atan2f(dx, dy).clamp(-half, half) + half;
        Some(alpha / self.arc)
    }
}

impl<D: Surface, A, E> Widget for Knob<D, A, E> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        let display = self.base.display();
        let fg = self.base.fg();
        let radius = self.radius();
        let tick_len = self.tick_len();

        self.base.draw_border();
        for tick in 0..self.ticks {
            let theta = (tick as f32 / (self.ticks - 1) as f32) * self.arc - self.arc / 2.0;
            let start = self.polar(theta, radius);
            let end = self.polar(theta, radius - tick_len);
            display.draw_line(start, end, fg);
        }

        let (ox, oy) = self.origin();
        let center = Point::new(ox as i32, oy as i32);
        let face = (radius - tick_len).max(0.0) as u32;
        if let Some(color) = self.color {
            display.fill_circle(center, face, color);
        }
        display.draw_circle(center, face, fg);
        display.draw_circle(center, face.saturating_sub(3), fg);

        self.drawn = None;
        self.draw_pointer();
    }
}

impl<D: Surface, A, E> Touchable for Knob<D, A, E> {
    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        (index == 0).then_some(&mut self.target)
    }

    fn touched(&mut self, _index: usize, point: TouchPoint) {
        if let Some(value) = self.value_at(point) {
            self.set_value(value);
        }
    }

    fn untouched(&mut self, _index: usize) {
        fire(self, |k| &mut k.on_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, display, draw_count, pixel_at};
    use crate::ui::display::DisplayHandle;
    use crate::ui::styling::{BLACK, WHITE};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use core::f32::consts::PI;

    fn knob(display: &DisplayHandle<RecordingSurface>) -> Knob<RecordingSurface> {
        Knob::new(WidgetBase::new(
            display,
            Rectangle::new(Point::new(0, 0), Size::new(100, 100)),
        ))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_value_is_clamped() {
        let display = display();
        let mut knob = knob(&display);
        for (input, expected) in [(-3.0, 0.0), (0.4, 0.4), (7.5, 1.0)] {
            knob.set_value(input);
            assert_eq!(knob.value(), expected);
        }
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let display = display();
        assert_eq!(knob(&display).with_value(-3.0).value(), 0.0);
        assert_eq!(knob(&display).with_value(7.5).value(), 1.0);
    }

    #[test]
    fn test_angle_maps_to_value_on_full_turn() {
        let display = display();
        let mut knob = knob(&display);

        knob.touched(0, TouchPoint::new(50, 0));
        assert!(close(knob.value(), 0.5));
        knob.touched(0, TouchPoint::new(0, 50));
        assert!(close(knob.value(), 0.25));
        knob.touched(0, TouchPoint::new(100, 50));
        assert!(close(knob.value(), 0.75));
        knob.touched(0, TouchPoint::new(50, 100));
        assert!(close(knob.value(), 1.0));
    }

    #[test]
    fn test_touch_near_center_is_ignored() {
        let display = display();
        let mut knob = knob(&display).with_value(0.3);
        knob.touched(0, TouchPoint::new(55, 45));
        assert_eq!(knob.value(), 0.3);
    }

    #[test]
    fn test_half_arc_clamps_beyond_travel() {
        let display = display();
        let mut knob = knob(&display).with_arc(PI);
        knob.touched(0, TouchPoint::new(0, 50));
        assert!(close(knob.value(), 0.0));
        knob.touched(0, TouchPoint::new(100, 50));
        assert!(close(knob.value(), 1.0));
        knob.touched(0, TouchPoint::new(15, 15));
        assert!(close(knob.value(), 0.25));
    }

    #[test]
    fn test_arc_and_ticks_are_clamped() {
        let display = display();
        let clamped = knob(&display).with_arc(10.0).with_ticks(0);
        assert_eq!(clamped.arc(), TAU);
        assert_eq!(clamped.ticks, 2);
        assert_eq!(knob(&display).with_arc(-1.0).arc(), 0.0);
    }

    #[test]
    fn test_zero_arc_ignores_touches() {
        let display = display();
        let mut knob = knob(&display).with_arc(0.0);
        knob.touched(0, TouchPoint::new(100, 50));
        assert_eq!(knob.value(), 0.0);
    }

    #[test]
    fn test_same_value_neither_fires_nor_draws() {
        let display = display();
        let moves = Rc::new(Cell::new(0));
        let sink = Rc::clone(&moves);
        let mut knob = knob(&display).on_move(move |_, _| sink.set(sink.get() + 1));
        knob.show();

        knob.set_value(-2.0);
        let before = draw_count(&display);
        knob.set_value(0.0);
        assert_eq!(moves.get(), 0);
        assert_eq!(draw_count(&display), before);

        knob.set_value(0.6);
        assert_eq!(moves.get(), 1);
        assert!(draw_count(&display) > before);
    }

    #[test]
    fn test_pointer_is_erased_when_moving() {
        let display = display();
        let mut knob = knob(&display);
        knob.show();
        // Value 0.0 on a full turn points straight down.
        assert_eq!(pixel_at(&display, Point::new(50, 70)), Some(WHITE));

        knob.set_value(0.5);
        assert_eq!(pixel_at(&display, Point::new(50, 70)), Some(BLACK));
        assert_eq!(pixel_at(&display, Point::new(50, 30)), Some(WHITE));
    }

    #[test]
    fn test_end_fires_on_release() {
        let display = display();
        let ends = Rc::new(Cell::new(0));
        let sink = Rc::clone(&ends);
        let mut knob = knob(&display).on_end(move |_, _| sink.set(sink.get() + 1));
        knob.untouched(0);
        assert_eq!(ends.get(), 1);
        assert_eq!(knob.value(), 0.0);
    }

    #[test]
    fn test_move_and_end_receive_their_own_args() {
        let display = display();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (move_sink, end_sink) = (Rc::clone(&seen), Rc::clone(&seen));
        let mut knob = knob(&display)
            .with_end_args('E')
            .with_move_args(3u8)
            .on_move(move |_, channel| move_sink.borrow_mut().push(alloc::format!("move {channel}")))
            .on_end(move |_, tag| end_sink.borrow_mut().push(alloc::format!("end {tag}")));
        assert_eq!(*knob.move_args(), 3);
        assert_eq!(*knob.end_args(), 'E');

        knob.set_value(0.25);
        knob.untouched(0);
        assert_eq!(*seen.borrow(), alloc::vec!["move 3", "end E"]);
    }
}
