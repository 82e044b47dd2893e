// src/ui/groups/button_list.rs
//! Cyclic button list

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use log::debug;

use crate::ui::callback::{Handler, fire_with};
use crate::ui::components::Button;
use crate::ui::core::{Tick, TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;
use crate::ui::error::{WidgetResult, check_index};

/// Buttons stacked on top of each other where only the current one is shown.
///
/// Touching the current button hides it and brings up the next one, wrapping
/// around after the last. Exactly one member is visible and enabled at any
/// time once the first button is added.
///
/// # Examples
/// ```ignore
/// let mut power = ButtonList::new().on_change(|button, level| set_power(*level));
/// power.add_button(Button::new(base.clone(), ButtonShape::Rectangle, "Off").with_args(0));
/// power.add_button(Button::new(base, ButtonShape::Rectangle, "On").with_args(1));
/// dispatcher.register(&shared(power));
/// ```
pub struct ButtonList<D, A = ()> {
    members: Vec<Button<D, A>>,
    current: usize,
    handler: Option<Handler<Button<D, A>, A>>,
}

impl<D: Surface, A> Default for ButtonList<D, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Surface, A> ButtonList<D, A> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            current: 0,
            handler: None,
        }
    }

    /// Called with the newly current button and its own arguments.
    pub fn on_change(mut self, handler: impl FnMut(&mut Button<D, A>, &A) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Take ownership of `button`. The first button added becomes current and
    /// is drawn; later ones start hidden and disabled.
    pub fn add_button(&mut self, button: Button<D, A>) -> usize {
        let active = self.members.is_empty();
        let mut button = button.with_visible(active);
        button.set_handler(None);
        button.set_enabled(active);
        if active {
            button.show();
        }
        self.members.push(button);
        self.members.len() - 1
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Index of the current button.
    pub fn value(&self) -> usize {
        self.current
    }

    /// Make `index` current. Fires the handler only if it was not current.
    pub fn set_value(&mut self, index: usize) -> WidgetResult<()> {
        check_index(index, self.members.len())?;
        if index != self.current {
            self.activate(index, false);
        }
        Ok(())
    }

    pub fn button(&self, index: usize) -> Option<&Button<D, A>> {
        self.members.get(index)
    }

    pub fn current(&self) -> Option<&Button<D, A>> {
        self.members.get(self.current)
    }

    fn activate(&mut self, index: usize, hold: bool) {
        debug!("Button list: {} -> {}", self.current, index);
        let old = &mut self.members[self.current];
        old.set_enabled(false);
        old.set_visible(false);

        self.current = index;
        let new = &mut self.members[index];
        new.set_enabled(true);
        if hold {
            // The contact that caused the switch must not also press it.
            new.mark_busy();
        }
        new.set_visible(true);

        let args = new.shared_args();
        fire_with(&mut self.handler, new, args);
    }
}

impl<D: Surface, A> Touchable for ButtonList<D, A> {
    fn target_count(&self) -> usize {
        self.members.len()
    }

    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        self.members.get_mut(index)?.target_mut(0)
    }

    fn touched(&mut self, index: usize, _point: TouchPoint) {
        if index == self.current {
            let next = (index + 1) % self.members.len();
            self.activate(next, true);
        }
    }

    fn on_tick(&mut self, now: Tick) {
        for member in &mut self.members {
            member.tick(now);
        }
    }
}
