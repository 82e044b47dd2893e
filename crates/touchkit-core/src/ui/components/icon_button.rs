// src/ui/components/icon_button.rs
//! Button drawn from an icon set

extern crate alloc;

use alloc::boxed::Box;
use embedded_graphics::primitives::Rectangle;
use log::error;

use crate::ui::callback::{Callback, Handler, fire};
use crate::ui::components::icon::IconSet;
use crate::ui::components::widget::WidgetBase;
use crate::ui::core::{Tick, TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;
use crate::ui::error::{WidgetError, WidgetResult, check_index};
use crate::ui::timer::RevertTimer;

/// A button whose state selects one icon of an [`IconSet`].
///
/// Three touch behaviors:
/// - plain: the state is unchanged, only the callback fires,
/// - flash: icon 1 is shown for a number of ticks, then icon 0 again,
/// - toggle: every touch advances to the next icon, wrapping around.
///
/// The callback fires once per touch in every mode. Reverting from a flash
/// does not fire it.
pub struct IconButton<D, A = ()> {
    base: WidgetBase<D>,
    target: TouchTarget,
    icons: IconSet,
    state: usize,
    flash: Option<u32>,
    toggle: bool,
    timer: RevertTimer,
    flashing: Option<u32>,
    callback: Callback<Self, A>,
}

impl<D: Surface> IconButton<D, ()> {
    /// The icons are drawn at the top left corner of `base`; the touch area is
    /// the full bounds of `base`.
    pub fn new(base: WidgetBase<D>, icons: IconSet) -> WidgetResult<Self> {
        if icons.is_empty() {
            return Err(WidgetError::Configuration("icon button needs at least one icon"));
        }
        Ok(Self {
            target: TouchTarget::new(base.bounds(), false),
            base,
            icons,
            state: 0,
            flash: None,
            toggle: false,
            timer: RevertTimer::new(),
            flashing: None,
            callback: Callback::with_args(()),
        })
    }
}

impl<D: Surface, A> IconButton<D, A> {
    pub fn with_args<B>(self, args: B) -> IconButton<D, B> {
        IconButton {
            base: self.base,
            target: self.target,
            icons: self.icons,
            state: self.state,
            flash: self.flash,
            toggle: self.toggle,
            timer: self.timer,
            flashing: self.flashing,
            callback: Callback::with_args(args),
        }
    }

    pub fn on_press(mut self, handler: impl FnMut(&mut Self, &A) + 'static) -> Self {
        self.callback.set_handler(Some(Box::new(handler)));
        self
    }

    /// Initial icon. Does not fire the callback.
    pub fn with_state(mut self, state: usize) -> WidgetResult<Self> {
        check_index(state, self.icons.len())?;
        self.state = state;
        Ok(self)
    }

    /// Show icon 1 for `ticks` dispatcher ticks on every touch.
    pub fn with_flash(mut self, ticks: u32) -> WidgetResult<Self> {
        if self.icons.len() < 2 {
            return Err(WidgetError::Configuration("flash needs at least two icons"));
        }
        self.flash = Some(ticks);
        Ok(self)
    }

    /// Advance to the next icon on every touch.
    pub fn with_toggle(mut self) -> Self {
        self.toggle = true;
        self
    }

    pub fn value(&self) -> usize {
        self.state
    }

    /// Select an icon. Redraws and fires the callback only on change.
    pub fn set_value(&mut self, state: usize) -> WidgetResult<()> {
        if self.set_state(state)? {
            fire(self, |b| &mut b.callback);
        }
        Ok(())
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    pub fn args(&self) -> &A {
        self.callback.args()
    }

    pub fn is_enabled(&self) -> bool {
        self.target.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.target.enabled = enabled;
    }

    pub fn set_handler(&mut self, handler: Option<Handler<Self, A>>) -> Option<Handler<Self, A>> {
        self.callback.set_handler(handler)
    }

    /// Act as if the button was touched.
    pub fn press(&mut self) {
        if let Some(ticks) = self.flash {
            self.state = 1;
            self.flashing = Some(self.timer.arm(ticks));
            self.show();
        } else if self.toggle {
            self.state = (self.state + 1) % self.icons.len();
            self.show();
        }
        fire(self, |b| &mut b.callback);
    }

    pub fn tick(&mut self, now: Tick) {
        let Some(expired) = self.timer.tick(now) else {
            return;
        };
        if self.flashing == Some(expired) {
            self.flashing = None;
            self.state = 0;
            self.show();
        }
    }

    /// Change the state without notifying anyone. Returns whether it changed.
    pub(crate) fn set_state(&mut self, state: usize) -> WidgetResult<bool> {
        check_index(state, self.icons.len())?;
        if state == self.state {
            return Ok(false);
        }
        self.timer.cancel();
        self.flashing = None;
        self.state = state;
        self.show();
        Ok(true)
    }

    pub(crate) fn shared_args(&self) -> alloc::rc::Rc<A> {
        self.callback.shared_args()
    }
}

impl<D: Surface, A> Widget for IconButton<D, A> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        let top_left = self.base.bounds().top_left;
        if let Err(e) = self.icons.draw(self.base.display(), self.state, top_left) {
            error!("Icon button state out of range: {}", e);
        }
    }
}

impl<D: Surface, A> Touchable for IconButton<D, A> {
    fn target_mut(&mut self, index: usize) -> Option<&mut TouchTarget> {
        (index == 0).then_some(&mut self.target)
    }

    fn touched(&mut self, _index: usize, _point: TouchPoint) {
        self.press();
    }

    fn on_tick(&mut self, now: Tick) {
        self.tick(now);
    }
}
