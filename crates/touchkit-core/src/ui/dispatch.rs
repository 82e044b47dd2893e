// src/ui/dispatch.rs
//! Touch dispatch loop
//!
//! The [`TouchDispatcher`] is the single place where raw touch samples turn
//! into per-widget `touched` / `untouched` events. One dispatcher serves one
//! screen: widgets are registered with it explicitly and it holds them only
//! weakly, so dropping a widget (or the whole screen) is enough to take it out
//! of dispatch.
//!
//! Each iteration:
//! 1. every live widget gets `on_tick` so timers armed earlier can expire,
//! 2. the sample is delivered to every target in registration order,
//! 3. the tick counter advances.
//!
//! All widgets overlapping a contact point receive it; arbitration between
//! overlapping widgets is left to the screen layout.

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::Timer;
use log::{debug, info, trace, warn};

use crate::config::UiConfig;
use crate::ui::core::{Delivery, Tick, TouchPoint, TouchSample, Touchable};

/// Board-specific touch panel access.
#[allow(async_fn_in_trait)]
pub trait TouchSource {
    /// A stable reading is available right now.
    fn is_ready(&mut self) -> bool;

    /// Something is touching the panel, stable or not.
    fn is_touched(&mut self) -> bool;

    /// Coordinates of the current contact. May wait for the reading to settle.
    async fn touch_point(&mut self) -> TouchPoint;
}

/// Identifies one registration with a [`TouchDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchHandle(u32);

struct Entry {
    handle: TouchHandle,
    widget: Weak<RefCell<dyn Touchable>>,
}

/// Fans touch samples out to registered widgets.
pub struct TouchDispatcher {
    entries: Vec<Entry>,
    next_handle: u32,
    now: Tick,
}

impl Default for TouchDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchDispatcher {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
            now: 0,
        }
    }

    /// Add a widget at the end of the dispatch order.
    pub fn register<W: Touchable + 'static>(&mut self, widget: &Rc<RefCell<W>>) -> TouchHandle {
        let widget: Rc<RefCell<dyn Touchable>> = widget.clone();
        let handle = TouchHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.entries.push(Entry {
            handle,
            widget: Rc::downgrade(&widget),
        });
        debug!("Registered touch handle {:?} ({} entries)", handle, self.entries.len());
        handle
    }

    /// Remove a registration. Returns `false` if the handle is unknown.
    pub fn deregister(&mut self, handle: TouchHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        let removed = self.entries.len() != before;
        if removed {
            debug!("Deregistered touch handle {:?}", handle);
        }
        removed
    }

    /// Number of registrations, including ones whose widget was dropped
    /// since the last iteration.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current tick, i.e. the number of completed iterations.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Read one sample from the touch source.
    ///
    /// Waiting for the contact coordinates is the only point where the
    /// dispatcher suspends.
    pub async fn sample<T: TouchSource>(source: &mut T) -> TouchSample {
        if source.is_ready() {
            TouchSample::Contact(source.touch_point().await)
        } else if !source.is_touched() {
            TouchSample::Released
        } else {
            TouchSample::Settling
        }
    }

    /// Run one iteration for an already acquired sample.
    pub fn dispatch(&mut self, sample: TouchSample) {
        let live = self.live_entries();

        for (handle, widget) in &live {
            match widget.try_borrow_mut() {
                Ok(mut widget) => widget.on_tick(self.now),
                Err(_) => warn!("Widget {:?} is busy, skipping tick", handle),
            }
        }

        if sample != TouchSample::Settling {
            for (handle, widget) in &live {
                Self::deliver(*handle, widget, sample);
            }
        }

        self.now = self.now.wrapping_add(1);
    }

    /// Sample the source and dispatch the result.
    pub async fn poll<T: TouchSource>(&mut self, source: &mut T) {
        let sample = Self::sample(source).await;
        self.dispatch(sample);
    }

    /// Dispatch forever, sleeping one configured tick between iterations.
    pub async fn run<T: TouchSource>(&mut self, source: &mut T, config: &UiConfig) {
        info!(
            "Touch dispatcher running: {} widgets, {} ms tick",
            self.entries.len(),
            config.tick_ms
        );
        loop {
            self.poll(source).await;
            Timer::after(config.tick()).await;
        }
    }

    /// Drop entries whose widget is gone and upgrade the rest.
    fn live_entries(&mut self) -> Vec<(TouchHandle, Rc<RefCell<dyn Touchable>>)> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.widget.strong_count() > 0);
        if self.entries.len() != before {
            debug!("Pruned {} dropped widgets", before - self.entries.len());
        }

        self.entries
            .iter()
            .filter_map(|entry| entry.widget.upgrade().map(|w| (entry.handle, w)))
            .collect()
    }

    fn deliver(handle: TouchHandle, widget: &RefCell<dyn Touchable>, sample: TouchSample) {
        let Ok(mut widget) = widget.try_borrow_mut() else {
            warn!("Widget {:?} is busy, dropping touch sample", handle);
            return;
        };

        // Controllers may change their member targets from inside a handler,
        // so the count is re-read on every step.
        let mut index = 0;
        while index < widget.target_count() {
            let delivery = match (widget.target_mut(index), sample) {
                (Some(target), TouchSample::Contact(point)) => target.on_contact(point),
                (Some(target), _) => target.on_release(),
                (None, _) => Delivery::None,
            };

            match (delivery, sample) {
                (Delivery::Touched, TouchSample::Contact(point)) => {
                    trace!("Touched {:?}[{}] at ({}, {})", handle, index, point.x, point.y);
                    widget.touched(index, point);
                }
                (Delivery::Untouched, _) => {
                    trace!("Untouched {:?}[{}]", handle, index);
                    widget.untouched(index);
                }
                _ => {}
            }
            index += 1;
        }
    }
}

/// Touch source fed through an embassy channel.
///
/// Lets an interrupt-driven touch task publish samples while the dispatcher
/// runs on its own schedule. The most recent sample is sticky: a contact stays
/// present until a `Released` sample arrives.
pub struct ChannelTouchSource<'a, M: RawMutex, const N: usize> {
    receiver: Receiver<'a, M, TouchSample, N>,
    latest: TouchSample,
}

impl<'a, M: RawMutex, const N: usize> ChannelTouchSource<'a, M, N> {
    pub fn new(receiver: Receiver<'a, M, TouchSample, N>) -> Self {
        Self {
            receiver,
            latest: TouchSample::Released,
        }
    }

    fn refresh(&mut self) {
        while let Ok(sample) = self.receiver.try_receive() {
            self.latest = sample;
        }
    }
}

impl<M: RawMutex, const N: usize> TouchSource for ChannelTouchSource<'_, M, N> {
    fn is_ready(&mut self) -> bool {
        self.refresh();
        matches!(self.latest, TouchSample::Contact(_))
    }

    fn is_touched(&mut self) -> bool {
        self.refresh();
        self.latest != TouchSample::Released
    }

    async fn touch_point(&mut self) -> TouchPoint {
        loop {
            if let TouchSample::Contact(point) = self.latest {
                return point;
            }
            self.latest = self.receiver.receive().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTouch;
    use crate::ui::core::TouchTarget;
    use crate::ui::shared;
    use alloc::vec;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    struct Probe {
        target: TouchTarget,
        touched: Vec<TouchPoint>,
        untouched: usize,
        ticks: Vec<Tick>,
    }

    impl Probe {
        fn new(x: i32, can_drag: bool) -> Self {
            Self {
                target: TouchTarget::new(
                    Rectangle::new(Point::new(x, 0), Size::new(10, 10)),
                    can_drag,
                ),
                touched: Vec::new(),
                untouched: 0,
                ticks: Vec::new(),
            }
        }
    }

    impl Touchable for Probe {
        fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
            (index == 0).then_some(&mut self.target)
        }

        fn touched(&mut self, _index: usize, point: TouchPoint) {
            self.touched.push(point);
        }

        fn untouched(&mut self, _index: usize) {
            self.untouched += 1;
        }

        fn on_tick(&mut self, now: Tick) {
            self.ticks.push(now);
        }
    }

    fn contact(x: u16, y: u16) -> TouchSample {
        TouchSample::Contact(TouchPoint::new(x, y))
    }

    #[test]
    fn test_non_drag_widget_touched_once_per_contact() {
        let mut dispatcher = TouchDispatcher::new();
        let probe = shared(Probe::new(0, false));
        dispatcher.register(&probe);

        dispatcher.dispatch(contact(5, 5));
        dispatcher.dispatch(contact(6, 5));
        dispatcher.dispatch(contact(7, 5));
        assert_eq!(probe.borrow().touched, vec![TouchPoint::new(5, 5)]);

        dispatcher.dispatch(TouchSample::Released);
        dispatcher.dispatch(TouchSample::Released);
        assert_eq!(probe.borrow().untouched, 1);
    }

    #[test]
    fn test_drag_widget_touched_every_sample() {
        let mut dispatcher = TouchDispatcher::new();
        let probe = shared(Probe::new(0, true));
        dispatcher.register(&probe);

        for x in 1..5 {
            dispatcher.dispatch(contact(x, 5));
        }
        assert_eq!(probe.borrow().touched.len(), 4);
    }

    #[test]
    fn test_contact_dragged_from_one_widget_to_another() {
        let mut dispatcher = TouchDispatcher::new();
        let a = shared(Probe::new(0, false));
        let b = shared(Probe::new(20, false));
        dispatcher.register(&a);
        dispatcher.register(&b);

        dispatcher.dispatch(contact(5, 5));
        dispatcher.dispatch(contact(25, 5));
        dispatcher.dispatch(contact(26, 5));

        assert_eq!(a.borrow().touched.len(), 1);
        assert_eq!(a.borrow().untouched, 1);
        assert_eq!(b.borrow().touched, vec![TouchPoint::new(25, 5)]);

        dispatcher.dispatch(TouchSample::Released);
        assert_eq!(a.borrow().untouched, 1);
        assert_eq!(b.borrow().untouched, 1);
    }

    #[test]
    fn test_disabled_while_held_gets_untouched() {
        let mut dispatcher = TouchDispatcher::new();
        let a = shared(Probe::new(0, false));
        let b = shared(Probe::new(20, false));
        dispatcher.register(&a);
        dispatcher.register(&b);

        dispatcher.dispatch(contact(5, 5));
        a.borrow_mut().target.enabled = false;
        // Slide onto the neighbour without lifting.
        dispatcher.dispatch(contact(25, 5));

        assert_eq!(a.borrow().untouched, 1);
        assert_eq!(b.borrow().touched.len(), 1);
    }

    #[test]
    fn test_overlapping_widgets_all_fire_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        struct Tagged {
            tag: u8,
            target: TouchTarget,
            order: Rc<RefCell<Vec<u8>>>,
        }

        impl Touchable for Tagged {
            fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
                (index == 0).then_some(&mut self.target)
            }
            fn touched(&mut self, _index: usize, _point: TouchPoint) {
                self.order.borrow_mut().push(self.tag);
            }
        }

        let bounds = Rectangle::new(Point::zero(), Size::new(10, 10));
        let mut dispatcher = TouchDispatcher::new();
        let widgets: Vec<_> = [2u8, 1, 3]
            .into_iter()
            .map(|tag| {
                shared(Tagged {
                    tag,
                    target: TouchTarget::new(bounds, false),
                    order: Rc::clone(&order),
                })
            })
            .collect();
        for widget in &widgets {
            dispatcher.register(widget);
        }

        dispatcher.dispatch(contact(3, 3));
        assert_eq!(*order.borrow(), vec![2, 1, 3]);
    }

    #[test]
    fn test_deregistered_and_dropped_widgets_are_skipped() {
        let mut dispatcher = TouchDispatcher::new();
        let kept = shared(Probe::new(0, false));
        let removed = shared(Probe::new(0, false));
        let dropped = shared(Probe::new(0, false));
        dispatcher.register(&kept);
        let handle = dispatcher.register(&removed);
        dispatcher.register(&dropped);
        assert_eq!(dispatcher.len(), 3);

        assert!(dispatcher.deregister(handle));
        assert!(!dispatcher.deregister(handle));
        drop(dropped);

        dispatcher.dispatch(contact(5, 5));
        assert_eq!(dispatcher.len(), 1);
        assert_eq!(kept.borrow().touched.len(), 1);
        assert!(removed.borrow().touched.is_empty());
    }

    #[test]
    fn test_ticks_run_every_iteration_before_delivery() {
        let mut dispatcher = TouchDispatcher::new();
        let probe = shared(Probe::new(0, false));
        dispatcher.register(&probe);

        dispatcher.dispatch(TouchSample::Released);
        dispatcher.dispatch(TouchSample::Settling);
        dispatcher.dispatch(contact(1, 1));

        assert_eq!(probe.borrow().ticks, vec![0, 1, 2]);
        assert_eq!(dispatcher.now(), 3);
        assert_eq!(probe.borrow().touched.len(), 1);
    }

    #[test]
    fn test_settling_sample_delivers_nothing() {
        let mut dispatcher = TouchDispatcher::new();
        let probe = shared(Probe::new(0, false));
        dispatcher.register(&probe);

        dispatcher.dispatch(contact(1, 1));
        dispatcher.dispatch(TouchSample::Settling);
        assert_eq!(probe.borrow().untouched, 0);
        assert!(probe.borrow().target.was_touched());
    }

    #[test]
    fn test_sample_classifies_source_state() {
        let mut source = ScriptedTouch::new();
        assert_eq!(block_on(TouchDispatcher::sample(&mut source)), TouchSample::Released);

        source.set(TouchSample::Settling);
        assert_eq!(block_on(TouchDispatcher::sample(&mut source)), TouchSample::Settling);

        source.set(contact(3, 4));
        assert_eq!(block_on(TouchDispatcher::sample(&mut source)), contact(3, 4));
    }

    #[test]
    fn test_channel_source_feeds_dispatcher() {
        let channel = Channel::<NoopRawMutex, TouchSample, 4>::new();
        let mut source = ChannelTouchSource::new(channel.receiver());
        let mut dispatcher = TouchDispatcher::new();
        let probe = shared(Probe::new(0, true));
        dispatcher.register(&probe);

        channel.try_send(contact(2, 2)).unwrap();
        channel.try_send(contact(4, 2)).unwrap();
        block_on(dispatcher.poll(&mut source));
        // Only the newest queued sample counts.
        assert_eq!(probe.borrow().touched, vec![TouchPoint::new(4, 2)]);

        // A held contact stays present without new samples.
        block_on(dispatcher.poll(&mut source));
        assert_eq!(probe.borrow().touched.len(), 2);

        channel.try_send(TouchSample::Released).unwrap();
        block_on(dispatcher.poll(&mut source));
        assert_eq!(probe.borrow().untouched, 1);
    }
}
