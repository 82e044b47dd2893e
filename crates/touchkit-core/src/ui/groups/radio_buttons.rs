// src/ui/groups/radio_buttons.rs
//! Mutually exclusive text buttons

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::callback::{Handler, fire_with};
use crate::ui::components::Button;
use crate::ui::core::{Tick, TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;
use crate::ui::error::{WidgetResult, check_index};

/// A set of buttons where the selected one is drawn in the highlight color.
///
/// Touching any member selects it, including the one already selected, and
/// fires the handler once with that member.
pub struct RadioButtons<D, A = ()> {
    members: Vec<Button<D, A>>,
    highlight: Rgb565,
    selected: usize,
    current: Option<usize>,
    handler: Option<Handler<Button<D, A>, A>>,
}

impl<D: Surface, A> RadioButtons<D, A> {
    pub fn new(highlight: Rgb565) -> Self {
        Self {
            members: Vec::new(),
            highlight,
            selected: 0,
            current: None,
            handler: None,
        }
    }

    /// Index of the member that starts out selected. Defaults to the first.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&mut Button<D, A>, &A) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Take ownership of `button` and draw it.
    pub fn add_button(&mut self, mut button: Button<D, A>) -> usize {
        let index = self.members.len();
        let active = index == self.selected;
        button.set_handler(None);
        button.set_fg(if active { self.highlight } else { button.origin_fg() });
        button.show();
        if active {
            self.current = Some(index);
        }
        self.members.push(button);
        index
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected member. `None` until the initially selected index is added.
    pub fn value(&self) -> Option<usize> {
        self.current
    }

    /// Select `index` as if it was touched, unless it already is selected.
    pub fn set_value(&mut self, index: usize) -> WidgetResult<()> {
        check_index(index, self.members.len())?;
        if self.current != Some(index) {
            self.select(index);
        }
        Ok(())
    }

    pub fn button(&self, index: usize) -> Option<&Button<D, A>> {
        self.members.get(index)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.current == Some(index)
    }

    fn select(&mut self, index: usize) {
        for (i, member) in self.members.iter_mut().enumerate() {
            let color = if i == index {
                self.highlight
            } else {
                member.origin_fg()
            };
            member.set_fg(color);
            member.show();
        }
        self.current = Some(index);

        let member = &mut self.members[index];
        let args = member.shared_args();
        fire_with(&mut self.handler, member, args);
    }
}

impl<D: Surface, A> Touchable for RadioButtons<D, A> {
    fn target_count(&self) -> usize {
        self.members.len()
    }

    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        self.members.get_mut(index)?.target_mut(0)
    }

    fn touched(&mut self, index: usize, _point: TouchPoint) {
        if index < self.members.len() {
            // Flashes the member if it has its own highlight.
            self.members[index].press();
            self.select(index);
        }
    }

    fn on_tick(&mut self, now: Tick) {
        for member in &mut self.members {
            member.tick(now);
        }
    }
}
