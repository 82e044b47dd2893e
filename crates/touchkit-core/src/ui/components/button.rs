// src/ui/components/button.rs
//! Push button with optional highlight flash

extern crate alloc;

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};

use crate::config::{DEFAULT_FLASH_TICKS, UiConfig};
use crate::ui::callback::{Callback, Handler, fire};
use crate::ui::components::widget::WidgetBase;
use crate::ui::core::{Tick, TouchPoint, TouchTarget, Touchable, Widget};
use crate::ui::display::Surface;
use crate::ui::timer::RevertTimer;

/// Outline drawn for a button. Touch handling is the same for all shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonShape {
    /// Circle inscribed in the bounds
    Circle,
    Rectangle,
    /// Rectangle with rounded corners
    ClippedRectangle,
}

/// Button component with caption and callback
///
/// Fires its callback once per contact. If a highlight color is set, the
/// button switches to it when touched and reverts after the flash duration
/// (one dispatcher tick unless configured otherwise).
///
/// Visibility is purely cosmetic: a hidden button is drawn as an erased box
/// but still receives touches unless it is also disabled.
///
/// # Examples
/// ```ignore
/// let yes = Button::new(base, ButtonShape::Rectangle, "Yes")
///     .with_highlight(RED)
///     .with_args(Answer::Yes)
///     .on_press(|button, answer| info!("{:?} pressed", answer));
/// dispatcher.register(&shared(yes));
/// ```
pub struct Button<D, A = ()> {
    base: WidgetBase<D>,
    target: TouchTarget,
    shape: ButtonShape,
    text: heapless::String<32>,
    origin_fg: Rgb565,
    highlight: Option<Rgb565>,
    lit: Option<u32>,
    visible: bool,
    flash_ticks: u32,
    timer: RevertTimer,
    callback: Callback<Self, A>,
}

impl<D: Surface> Button<D, ()> {
    /// Create a button without callback arguments.
    ///
    /// Captions longer than 32 bytes are truncated.
    pub fn new(base: WidgetBase<D>, shape: ButtonShape, text: &str) -> Self {
        let mut caption = heapless::String::new();
        for c in text.chars() {
            if caption.push(c).is_err() {
                break;
            }
        }

        Self {
            target: TouchTarget::new(base.bounds(), false),
            origin_fg: base.fg(),
            base,
            shape,
            text: caption,
            highlight: None,
            lit: None,
            visible: true,
            flash_ticks: DEFAULT_FLASH_TICKS,
            timer: RevertTimer::new(),
            callback: Callback::with_args(()),
        }
    }
}

impl<D: Surface, A> Button<D, A> {
    /// Attach fixed callback arguments. Any handler set so far is dropped.
    pub fn with_args<B>(self, args: B) -> Button<D, B> {
        Button {
            base: self.base,
            target: self.target,
            shape: self.shape,
            text: self.text,
            origin_fg: self.origin_fg,
            highlight: self.highlight,
            lit: self.lit,
            visible: self.visible,
            flash_ticks: self.flash_ticks,
            timer: self.timer,
            callback: Callback::with_args(args),
        }
    }

    pub fn on_press(mut self, handler: impl FnMut(&mut Self, &A) + 'static) -> Self {
        self.callback.set_handler(Some(Box::new(handler)));
        self
    }

    /// Color shown while the button is flashing after a touch.
    pub fn with_highlight(mut self, color: Rgb565) -> Self {
        self.highlight = Some(color);
        self
    }

    /// Flash duration in dispatcher ticks.
    pub fn with_flash_ticks(mut self, ticks: u32) -> Self {
        self.flash_ticks = ticks;
        self
    }

    /// Take the flash duration from the toolkit configuration.
    pub fn with_config(self, config: &UiConfig) -> Self {
        self.with_flash_ticks(config.flash_ticks)
    }

    /// Initial visibility. Nothing is drawn until [`Widget::show`].
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &A {
        self.callback.args()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the button. Hiding ends a running flash.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.timer.cancel();
            self.lit = None;
        }
        self.show();
    }

    pub fn is_enabled(&self) -> bool {
        self.target.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.target.enabled = enabled;
    }

    /// Current foreground color, ignoring a running highlight flash.
    pub fn fg(&self) -> Rgb565 {
        self.base.fg()
    }

    /// Foreground color the button was built with.
    pub fn origin_fg(&self) -> Rgb565 {
        self.origin_fg
    }

    /// Change the foreground color. Takes effect on the next redraw.
    pub fn set_fg(&mut self, color: Rgb565) {
        self.base.set_fg(color);
    }

    pub fn is_lit(&self) -> bool {
        self.lit.is_some()
    }

    /// Replace the touch handler. Used by group controllers to route member
    /// touches through themselves.
    pub fn set_handler(&mut self, handler: Option<Handler<Self, A>>) -> Option<Handler<Self, A>> {
        self.callback.set_handler(handler)
    }

    /// Ignore the contact currently on the panel, if any.
    pub fn mark_busy(&mut self) {
        self.target.mark_busy();
    }

    /// Act as if the button was touched: flash, then fire the callback.
    pub fn press(&mut self) {
        if self.highlight.is_some() {
            self.lit = Some(self.timer.arm(self.flash_ticks));
            self.show();
        }
        fire(self, |b| &mut b.callback);
    }

    /// Advance the flash timer by one tick.
    pub fn tick(&mut self, now: Tick) {
        let Some(expired) = self.timer.tick(now) else {
            return;
        };
        // Only the most recent arm may end the flash.
        if self.lit == Some(expired) {
            self.lit = None;
            self.show();
        }
    }

    pub(crate) fn shared_args(&self) -> alloc::rc::Rc<A> {
        self.callback.shared_args()
    }

    fn color(&self) -> Rgb565 {
        match (self.lit, self.highlight) {
            (Some(_), Some(highlight)) => highlight,
            _ => self.base.fg(),
        }
    }

    fn draw(&self) {
        let bounds = self.base.bounds();
        let display = self.base.display();
        if !self.visible {
            self.base.erase();
            return;
        }

        let color = self.color();
        let style = if self.base.fill() {
            PrimitiveStyle::with_fill(color)
        } else {
            PrimitiveStyle::with_stroke(color, 1)
        };

        match self.shape {
            ButtonShape::Circle => {
                let radius = bounds.size.width.min(bounds.size.height) / 2;
                if self.base.fill() {
                    display.fill_circle(bounds.center(), radius, color);
                } else {
                    display.draw_circle(bounds.center(), radius, color);
                }
            }
            ButtonShape::Rectangle => {
                display.draw(|d| bounds.into_styled(style).draw(d));
            }
            ButtonShape::ClippedRectangle => {
                let corner = bounds.size.width.min(bounds.size.height) / 4;
                let outline =
                    RoundedRectangle::with_equal_corners(bounds, Size::new(corner, corner));
                display.draw(|d| outline.into_styled(style).draw(d));
            }
        }

        if !self.text.is_empty() {
            self.base.print_centered(&self.text, bounds.center());
        }
    }
}

impl<D: Surface, A> Widget for Button<D, A> {
    fn bounds(&self) -> Rectangle {
        self.base.bounds()
    }

    fn show(&mut self) {
        self.draw();
    }
}

impl<D: Surface, A> Touchable for Button<D, A> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{display, draw_count, pixel_at};
    use crate::ui::dispatch::TouchDispatcher;
    use crate::ui::core::TouchSample;
    use crate::ui::shared;
    use crate::ui::styling::{BLACK, RED, WHITE};
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(10, 10), Size::new(40, 20))
    }

    fn contact() -> TouchSample {
        TouchSample::Contact(TouchPoint::new(20, 15))
    }

    #[test]
    fn test_callback_fires_with_args_once_per_contact() {
        let display = display();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let button = shared(
            Button::new(WidgetBase::new(&display, bounds()), ButtonShape::Rectangle, "Go")
                .with_args(7u32)
                .on_press(move |_, args| sink.set(sink.get() + *args)),
        );
        let mut dispatcher = TouchDispatcher::new();
        dispatcher.register(&button);

        dispatcher.dispatch(contact());
        dispatcher.dispatch(contact());
        dispatcher.dispatch(TouchSample::Released);
        dispatcher.dispatch(contact());

        assert_eq!(seen.get(), 14);
    }

    #[test]
    fn test_highlight_reverts_after_flash() {
        let display = display();
        let base = WidgetBase::new(&display, bounds()).with_fill(true);
        let button = shared(
            Button::new(base, ButtonShape::Rectangle, "")
                .with_highlight(RED)
                .with_flash_ticks(2),
        );
        let mut dispatcher = TouchDispatcher::new();
        dispatcher.register(&button);

        dispatcher.dispatch(contact());
        assert!(button.borrow().is_lit());
        assert_eq!(pixel_at(&display, Point::new(12, 12)), Some(RED));

        dispatcher.dispatch(TouchSample::Released);
        assert!(button.borrow().is_lit());
        dispatcher.dispatch(TouchSample::Released);
        assert!(!button.borrow().is_lit());
        assert_eq!(pixel_at(&display, Point::new(12, 12)), Some(WHITE));
    }

    #[test]
    fn test_repeated_press_extends_flash() {
        let display = display();
        let mut button = Button::new(WidgetBase::new(&display, bounds()), ButtonShape::Circle, "")
            .with_highlight(RED)
            .with_flash_ticks(2);

        button.press();
        button.tick(0);
        button.press();
        button.tick(1);
        assert!(button.is_lit());
        button.tick(2);
        assert!(!button.is_lit());
    }

    #[test]
    fn test_without_highlight_nothing_is_drawn_on_touch() {
        let display = display();
        let mut button =
            Button::new(WidgetBase::new(&display, bounds()), ButtonShape::ClippedRectangle, "x");
        let before = draw_count(&display);
        button.press();
        assert_eq!(draw_count(&display), before);
    }

    #[test]
    fn test_hidden_button_is_erased_but_still_touchable() {
        let display = display();
        let base = WidgetBase::new(&display, bounds()).with_fill(true);
        let pressed = Rc::new(Cell::new(false));
        let sink = Rc::clone(&pressed);
        let button = shared(
            Button::new(base, ButtonShape::Rectangle, "").on_press(move |_, _| sink.set(true)),
        );
        button.borrow_mut().show();
        button.borrow_mut().set_visible(false);
        assert_eq!(pixel_at(&display, Point::new(12, 12)), Some(BLACK));

        let mut dispatcher = TouchDispatcher::new();
        dispatcher.register(&button);
        dispatcher.dispatch(contact());
        assert!(pressed.get());
    }

    #[test]
    fn test_disabled_button_ignores_touch() {
        let display = display();
        let pressed = Rc::new(Cell::new(false));
        let sink = Rc::clone(&pressed);
        let button = shared(
            Button::new(WidgetBase::new(&display, bounds()), ButtonShape::Rectangle, "")
                .on_press(move |_, _| sink.set(true)),
        );
        button.borrow_mut().set_enabled(false);

        let mut dispatcher = TouchDispatcher::new();
        dispatcher.register(&button);
        dispatcher.dispatch(contact());
        assert!(!pressed.get());
    }
}
