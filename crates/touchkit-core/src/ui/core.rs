// src/ui/core.rs
//! Core touch traits and types for the touchkit UI system

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Dispatcher iteration counter. One tick is one pass of the dispatch loop.
pub type Tick = u32;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// One reading of the touch panel, as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchSample {
    /// A stable contact at the given point.
    Contact(TouchPoint),
    /// The panel is touched but the reading is not stable yet.
    Settling,
    /// Nothing is touching the panel.
    Released,
}

/// Per-target touch state.
///
/// Replaces the classic `busy` / `was_touched` flag pair:
///
/// | state       | busy  | was touched |
/// |-------------|-------|-------------|
/// | `Idle`      | no    | no          |
/// | `Touching`  | yes   | yes         |
/// | `Releasing` | yes   | no          |
///
/// A target leaves `Touching` exactly once per contact it received, and that
/// transition is the only place an `untouched` delivery is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Idle,
    /// The current contact is inside the target and it has been notified.
    Touching,
    /// The contact that involved this target is still down elsewhere, or the
    /// target was marked busy. Suppresses further deliveries until release.
    Releasing,
}

/// What the dispatcher must deliver to a target after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    None,
    Touched,
    Untouched,
}

/// The touch-sensitive part of an interactive widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchTarget {
    bounds: Rectangle,
    pub enabled: bool,
    pub can_drag: bool,
    state: TouchState,
}

impl TouchTarget {
    pub fn new(bounds: Rectangle, can_drag: bool) -> Self {
        Self {
            bounds,
            enabled: true,
            can_drag,
            state: TouchState::Idle,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != TouchState::Idle
    }

    pub fn was_touched(&self) -> bool {
        self.state == TouchState::Touching
    }

    /// Suppress touch deliveries until the panel is next released.
    pub fn mark_busy(&mut self) {
        if self.state == TouchState::Idle {
            self.state = TouchState::Releasing;
        }
    }

    /// Hit test. Both edges of the box are inside: a target at `x0` with width
    /// `w` accepts `x0..=x0 + w`.
    pub fn contains(&self, point: TouchPoint) -> bool {
        let x0 = self.bounds.top_left.x;
        let y0 = self.bounds.top_left.y;
        let x1 = x0 + self.bounds.size.width as i32;
        let y1 = y0 + self.bounds.size.height as i32;
        let (x, y) = (point.x as i32, point.y as i32);
        x0 <= x && x <= x1 && y0 <= y && y <= y1
    }

    /// Advance the state machine for a sample with contact at `point`.
    pub fn on_contact(&mut self, point: TouchPoint) -> Delivery {
        let hit = self.enabled && self.contains(point);
        match (self.state, hit) {
            (TouchState::Idle, true) => {
                self.state = TouchState::Touching;
                Delivery::Touched
            }
            (TouchState::Touching, true) if self.can_drag => Delivery::Touched,
            (TouchState::Releasing, true) if self.can_drag => {
                self.state = TouchState::Touching;
                Delivery::Touched
            }
            (TouchState::Touching, false) => {
                self.state = TouchState::Releasing;
                Delivery::Untouched
            }
            _ => Delivery::None,
        }
    }

    /// Advance the state machine for a sample without contact.
    pub fn on_release(&mut self) -> Delivery {
        let previous = core::mem::take(&mut self.state);
        if previous == TouchState::Touching {
            Delivery::Untouched
        } else {
            Delivery::None
        }
    }
}

/// Trait for UI elements that respond to touch events.
///
/// A touchable exposes one or more [`TouchTarget`]s. Primitive widgets have a
/// single target at index 0; composite controllers expose one target per
/// member so that every member keeps its own touch state while the controller
/// keeps exclusive ownership of the members.
pub trait Touchable {
    fn target_count(&self) -> usize {
        1
    }

    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget>;

    /// Contact inside the target. Called once per contact, or on every sample
    /// while the contact stays inside for drag-capable targets.
    fn touched(&mut self, index: usize, point: TouchPoint);

    /// The target lost the contact, by release, by the contact moving away,
    /// or by being disabled while touched.
    fn untouched(&mut self, _index: usize) {}

    /// Called once per dispatcher iteration before touch delivery.
    fn on_tick(&mut self, _now: Tick) {}
}

/// Trait for widgets that can redraw themselves.
pub trait Widget {
    fn bounds(&self) -> Rectangle;

    /// Redraw the whole widget.
    fn show(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(can_drag: bool) -> TouchTarget {
        TouchTarget::new(Rectangle::new(Point::new(10, 10), Size::new(20, 10)), can_drag)
    }

    #[test]
    fn test_hit_test_includes_edges() {
        let t = target(false);
        assert!(t.contains(TouchPoint::new(10, 10)));
        assert!(t.contains(TouchPoint::new(30, 20)));
        assert!(!t.contains(TouchPoint::new(31, 20)));
        assert!(!t.contains(TouchPoint::new(9, 15)));
    }

    #[test]
    fn test_non_drag_fires_once_per_contact() {
        let mut t = target(false);
        let p = TouchPoint::new(15, 15);
        assert_eq!(t.on_contact(p), Delivery::Touched);
        assert_eq!(t.on_contact(p), Delivery::None);
        assert_eq!(t.on_contact(TouchPoint::new(16, 15)), Delivery::None);
        assert_eq!(t.on_release(), Delivery::Untouched);
        assert_eq!(t.on_release(), Delivery::None);
        assert_eq!(t.state(), TouchState::Idle);
    }

    #[test]
    fn test_drag_fires_every_sample() {
        let mut t = target(true);
        for x in 12..18 {
            assert_eq!(t.on_contact(TouchPoint::new(x, 15)), Delivery::Touched);
        }
        assert!(t.was_touched());
    }

    #[test]
    fn test_leaving_the_box_releases_once() {
        let mut t = target(true);
        t.on_contact(TouchPoint::new(15, 15));
        assert_eq!(t.on_contact(TouchPoint::new(100, 100)), Delivery::Untouched);
        assert_eq!(t.on_contact(TouchPoint::new(101, 100)), Delivery::None);
        assert_eq!(t.state(), TouchState::Releasing);
        // Full release after the contact already left delivers nothing more.
        assert_eq!(t.on_release(), Delivery::None);
    }

    #[test]
    fn test_non_drag_reentry_stays_suppressed() {
        let mut t = target(false);
        t.on_contact(TouchPoint::new(15, 15));
        t.on_contact(TouchPoint::new(100, 100));
        assert_eq!(t.on_contact(TouchPoint::new(15, 15)), Delivery::None);
        assert_eq!(t.state(), TouchState::Releasing);
    }

    #[test]
    fn test_disabling_while_touched_releases() {
        let mut t = target(false);
        let p = TouchPoint::new(15, 15);
        t.on_contact(p);
        t.enabled = false;
        assert_eq!(t.on_contact(p), Delivery::Untouched);
        assert_eq!(t.on_release(), Delivery::None);
    }

    #[test]
    fn test_mark_busy_suppresses_until_release() {
        let mut t = target(false);
        t.mark_busy();
        assert_eq!(t.on_contact(TouchPoint::new(15, 15)), Delivery::None);
        assert_eq!(t.on_release(), Delivery::None);
        assert_eq!(t.on_contact(TouchPoint::new(15, 15)), Delivery::Touched);
    }
}
