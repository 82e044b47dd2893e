// src/ui/groups/icon_radio_buttons.rs
//! Mutually exclusive icon buttons

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use log::error;

use crate::ui::callback::{Handler, fire_with};
use crate::ui::components::IconButton;
use crate::ui::core::{Tick, TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;
use crate::ui::error::{WidgetError, WidgetResult, check_index};

/// Icon buttons where the selected member shows icon 1 and all others icon 0.
///
/// Members stay reachable through [`button_mut`](Self::button_mut), which
/// allows changing their state behind the group's back. [`value`](Self::value)
/// therefore re-checks the selection every time it is asked.
pub struct IconRadioButtons<D, A = ()> {
    members: Vec<IconButton<D, A>>,
    selected: usize,
    handler: Option<Handler<IconButton<D, A>, A>>,
}

impl<D: Surface, A> Default for IconRadioButtons<D, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Surface, A> IconRadioButtons<D, A> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            selected: 0,
            handler: None,
        }
    }

    /// Index of the member that starts out selected. Defaults to the first.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&mut IconButton<D, A>, &A) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Take ownership of `button` and draw it in its initial state.
    pub fn add_button(&mut self, button: IconButton<D, A>) -> WidgetResult<usize> {
        if button.icon_count() < 2 {
            return Err(WidgetError::Configuration("radio icon button needs two icons"));
        }
        let index = self.members.len();
        let state = usize::from(index == self.selected);
        let mut button = button.with_state(state)?;
        button.set_handler(None);
        button.show();
        self.members.push(button);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The single selected member.
    pub fn value(&self) -> WidgetResult<usize> {
        let mut selected = self
            .members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.value() == 1)
            .map(|(index, _)| index);
        match (selected.next(), selected.count()) {
            (Some(index), 0) => Ok(index),
            (first, rest) => Err(WidgetError::InvariantViolation {
                selected: usize::from(first.is_some()) + rest,
            }),
        }
    }

    /// Select `index` as if it was touched, unless it already shows icon 1.
    pub fn set_value(&mut self, index: usize) -> WidgetResult<()> {
        check_index(index, self.members.len())?;
        if self.members[index].value() == 0 {
            self.select(index);
        }
        Ok(())
    }

    pub fn button(&self, index: usize) -> Option<&IconButton<D, A>> {
        self.members.get(index)
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut IconButton<D, A>> {
        self.members.get_mut(index)
    }

    fn select(&mut self, index: usize) {
        for (i, member) in self.members.iter_mut().enumerate() {
            if let Err(e) = member.set_state(usize::from(i == index)) {
                error!("Radio icon button {} rejected its state: {}", i, e);
            }
        }

        let member = &mut self.members[index];
        let args = member.shared_args();
        fire_with(&mut self.handler, member, args);
    }
}

impl<D: Surface, A> Touchable for IconRadioButtons<D, A> {
    fn target_count(&self) -> usize {
        self.members.len()
    }

    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        self.members.get_mut(index)?.target_mut(0)
    }

    fn touched(&mut self, index: usize, _point: TouchPoint) {
        if index < self.members.len() {
            self.select(index);
        }
    }

    fn on_tick(&mut self, now: Tick) {
        for member in &mut self.members {
            member.tick(now);
        }
    }
}
