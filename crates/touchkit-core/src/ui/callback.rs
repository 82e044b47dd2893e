//! Typed widget callbacks.
//!
//! A callback is a handler closure plus a fixed argument value chosen when
//! the widget is built. When it fires, the handler receives the widget that
//! produced the event and those arguments. Composite controllers rely on this
//! split: they replace the handler of their members but keep each member's
//! arguments, so the application still receives its own payload alongside
//! the member the controller picked.

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::Rc;

/// Handler closure invoked with the widget and its fixed arguments.
pub type Handler<W, A> = Box<dyn FnMut(&mut W, &A)>;

pub struct Callback<W, A> {
    handler: Option<Handler<W, A>>,
    args: Rc<A>,
}

impl<W, A> Callback<W, A> {
    pub fn new(args: A, handler: impl FnMut(&mut W, &A) + 'static) -> Self {
        Self {
            handler: Some(Box::new(handler)),
            args: Rc::new(args),
        }
    }

    /// Arguments without a handler. Firing is a no-op until one is set.
    pub fn with_args(args: A) -> Self {
        Self {
            handler: None,
            args: Rc::new(args),
        }
    }

    /// Arguments carried over from a callback of the same widget, without its
    /// handler.
    pub(crate) fn from_shared(args: Rc<A>) -> Self {
        Self {
            handler: None,
            args,
        }
    }

    pub fn args(&self) -> &A {
        &self.args
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Replace the handler slot, returning the previous handler.
    pub fn set_handler(&mut self, handler: Option<Handler<W, A>>) -> Option<Handler<W, A>> {
        core::mem::replace(&mut self.handler, handler)
    }

    pub(crate) fn shared_args(&self) -> Rc<A> {
        Rc::clone(&self.args)
    }
}

impl<W, A: Default> Default for Callback<W, A> {
    fn default() -> Self {
        Self::with_args(A::default())
    }
}

/// Fire the callback stored in `slot` of `widget`.
///
/// The handler is taken out of the widget while it runs so it can receive
/// `&mut W`. A handler that sets the same slot again wins over the one that
/// was running; otherwise the running handler is put back.
pub(crate) fn fire<W, A>(widget: &mut W, slot: fn(&mut W) -> &mut Callback<W, A>) {
    let callback = slot(widget);
    let Some(mut handler) = callback.handler.take() else {
        return;
    };
    let args = callback.shared_args();
    handler(widget, &args);

    let callback = slot(widget);
    if callback.handler.is_none() {
        callback.handler = Some(handler);
    }
}

/// Invoke a controller-level handler for one of its members, passing the
/// member's own fixed arguments.
pub(crate) fn fire_with<W, A>(
    handler: &mut Option<Handler<W, A>>,
    member: &mut W,
    args: Rc<A>,
) {
    if let Some(handler) = handler.as_mut() {
        handler(member, &args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Counter {
        hits: u32,
        callback: Callback<Counter, u32>,
    }

    fn slot(c: &mut Counter) -> &mut Callback<Counter, u32> {
        &mut c.callback
    }

    #[test]
    fn test_handler_receives_widget_and_args() {
        let mut counter = Counter {
            hits: 0,
            callback: Callback::new(5, |c: &mut Counter, step: &u32| c.hits += *step),
        };
        fire(&mut counter, slot);
        fire(&mut counter, slot);
        assert_eq!(counter.hits, 10);
    }

    #[test]
    fn test_reentrant_fire_does_not_recurse() {
        let mut counter = Counter {
            hits: 0,
            callback: Callback::new(1, |c: &mut Counter, _: &u32| {
                c.hits += 1;
                // Slot is empty while the handler runs.
                fire(c, slot);
            }),
        };
        fire(&mut counter, slot);
        assert_eq!(counter.hits, 1);
        assert!(counter.callback.has_handler());
    }

    #[test]
    fn test_handler_replaced_from_inside_wins() {
        let marker = Rc::new(Cell::new(0));
        let seen = Rc::clone(&marker);
        let mut counter = Counter {
            hits: 0,
            callback: Callback::new(0, move |c: &mut Counter, _: &u32| {
                let seen = Rc::clone(&seen);
                let next: Handler<Counter, u32> = Box::new(move |_: &mut Counter, _: &u32| seen.set(2));
                c.callback.set_handler(Some(next));
            }),
        };
        fire(&mut counter, slot);
        fire(&mut counter, slot);
        assert_eq!(marker.get(), 2);
    }

    #[test]
    fn test_missing_handler_is_noop() {
        let mut counter = Counter {
            hits: 0,
            callback: Callback::with_args(3),
        };
        fire(&mut counter, slot);
        assert_eq!(counter.hits, 0);
        assert_eq!(*counter.callback.args(), 3);
    }
}
