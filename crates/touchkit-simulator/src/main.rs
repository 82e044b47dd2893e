//! Desktop simulator for the touchkit widget toolkit.
//!
//! Renders two demo screens in an SDL2 window via `embedded-graphics-simulator`.
//! Widgets draw into a RAM framebuffer which is flushed to the window once per
//! frame, the same way firmware flushes to the panel.
//!
//! # Key bindings
//!
//! | Key | Action                                  |
//! |-----|-----------------------------------------|
//! | 1   | Buttons, checkbox and selection groups  |
//! | 2   | Sliders, knob, meter, dial and gauge    |
//! | Q   | Quit                                    |
//!
//! Mouse presses, drags and releases are forwarded as touch samples.

use std::any::Any;
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use touchkit_core::config::UiConfig;
use touchkit_core::framebuffer::FrameBuffer;
use touchkit_core::ui::styling::{
    BLUE, CYAN, DARK_GREEN, GREEN, GREY, LIGHT_GREY, NAVY, ORANGE, RED, YELLOW,
};
use touchkit_core::ui::{
    Button, ButtonList, ButtonShape, ChannelTouchSource, Checkbox, Dial, DisplayHandle, IconButton,
    IconGauge, IconRadioButtons, IconSet, Knob, Label, Led, Meter, RadioButtons, Slider,
    TouchDispatcher, TouchPoint, TouchSample, Widget, WidgetBase, WidgetResult, shared,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Samples published by the mouse handler, consumed by the dispatcher.
static TOUCH_SAMPLES: Channel<CriticalSectionRawMutex, TouchSample, 8> = Channel::new();

type Display = DisplayHandle<FrameBuffer>;

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenId {
    Buttons,
    Sliders,
}

/// A dispatcher plus the widgets it serves. The dispatcher only holds weak
/// references, so the screen keeps every widget alive.
struct Screen {
    dispatcher: TouchDispatcher,
    widgets: Vec<Rc<dyn Any>>,
}

impl Screen {
    fn new() -> Self {
        Self {
            dispatcher: TouchDispatcher::new(),
            widgets: Vec::new(),
        }
    }

    fn keep<W: 'static>(&mut self, widget: Rc<RefCell<W>>) {
        self.widgets.push(widget);
    }
}

fn rect(x: i32, y: i32, width: u32, height: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height))
}

/// Filled squares with a colored center, one frame per color.
fn square_icons(colors: &[Rgb565]) -> IconSet {
    IconSet::render(Size::new(32, 32), colors.len(), |frame, p| {
        let inside = (6..26).contains(&p.x) && (6..26).contains(&p.y);
        if inside { colors[frame] } else { GREY }
    })
}

fn build_screen(id: ScreenId, display: &Display, config: &UiConfig) -> WidgetResult<Screen> {
    display.fill_rect(
        rect(0, 0, DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
        display.background(),
    );
    match id {
        ScreenId::Buttons => button_screen(display, config),
        ScreenId::Sliders => slider_screen(display, config),
    }
}

fn button_screen(display: &Display, config: &UiConfig) -> WidgetResult<Screen> {
    let mut screen = Screen::new();

    let status = shared(Label::new(
        WidgetBase::new(display, rect(10, 210, 300, 0)).with_border(2),
    ));
    status.borrow_mut().show();

    // Plain buttons
    for (i, (caption, shape)) in [
        ("Yes", ButtonShape::Rectangle),
        ("No", ButtonShape::Circle),
        ("Maybe", ButtonShape::ClippedRectangle),
    ]
    .into_iter()
    .enumerate()
    {
        let base = WidgetBase::new(display, rect(10 + 70 * i as i32, 10, 60, 40))
            .with_fill(true)
            .with_colors(BLUE, display.background());
        let label = Rc::clone(&status);
        let mut button = Button::new(base, shape, caption)
            .with_highlight(RED)
            .with_config(config)
            .with_args(caption)
            .on_press(move |_, caption| label.borrow_mut().set_text(caption));
        button.show();
        let button = shared(button);
        screen.dispatcher.register(&button);
        screen.keep(button);
    }

    // Checkbox driving an LED
    let led = shared(Led::new(WidgetBase::new(display, rect(260, 15, 30, 30))).with_color(GREEN));
    led.borrow_mut().show();
    let lamp = Rc::clone(&led);
    let mut checkbox = Checkbox::new(WidgetBase::new(display, rect(220, 15, 30, 30)))
        .with_fill_color(GREEN)
        .on_change(move |checkbox, _| {
            let mut lamp = lamp.borrow_mut();
            if checkbox.value() { lamp.on(None) } else { lamp.off() }
        });
    checkbox.show();
    let checkbox = shared(checkbox);
    screen.dispatcher.register(&checkbox);
    screen.keep(checkbox);
    screen.keep(led);

    // Start/stop cycle
    let label = Rc::clone(&status);
    let mut cycle = ButtonList::new().on_change(move |button, _| {
        label.borrow_mut().set_text(button.text());
    });
    for (caption, color) in [("Start", DARK_GREEN), ("Pause", ORANGE), ("Stop", RED)] {
        let base = WidgetBase::new(display, rect(10, 70, 80, 40))
            .with_fill(true)
            .with_colors(color, display.background());
        cycle.add_button(Button::new(base, ButtonShape::ClippedRectangle, caption));
    }
    let cycle = shared(cycle);
    screen.dispatcher.register(&cycle);
    screen.keep(cycle);

    // Radio buttons
    let label = Rc::clone(&status);
    let mut radio = RadioButtons::new(YELLOW)
        .with_selected(1)
        .on_change(move |_, speed: &&'static str| label.borrow_mut().set_text(speed));
    for (i, speed) in ["Slow", "Medium", "Fast"].into_iter().enumerate() {
        let base = WidgetBase::new(display, rect(110 + 65 * i as i32, 70, 60, 40))
            .with_colors(LIGHT_GREY, display.background());
        radio.add_button(Button::new(base, ButtonShape::Rectangle, speed).with_args(speed));
    }
    let radio = shared(radio);
    screen.dispatcher.register(&radio);
    screen.keep(radio);

    // Icon buttons
    let label = Rc::clone(&status);
    let mut toggle = IconButton::new(
        WidgetBase::new(display, rect(10, 130, 32, 32)),
        square_icons(&[RED, GREEN, BLUE]),
    )?
    .with_toggle()
    .on_press(move |button, _| {
        let text = ["Red", "Green", "Blue"][button.value()];
        label.borrow_mut().set_text(text);
    });
    toggle.show();
    let toggle = shared(toggle);
    screen.dispatcher.register(&toggle);
    screen.keep(toggle);

    let mut flash = IconButton::new(
        WidgetBase::new(display, rect(60, 130, 32, 32)),
        square_icons(&[NAVY, CYAN]),
    )?
    .with_flash(10)?;
    flash.show();
    let flash = shared(flash);
    screen.dispatcher.register(&flash);
    screen.keep(flash);

    let label = Rc::clone(&status);
    let mut channels = IconRadioButtons::new().on_change(move |_, channel: &usize| {
        label.borrow_mut().set_text(["Channel A", "Channel B", "Channel C"][*channel]);
    });
    for channel in 0..3 {
        let base = WidgetBase::new(display, rect(130 + 45 * channel as i32, 130, 32, 32));
        channels.add_button(
            IconButton::new(base, square_icons(&[GREY, YELLOW]))?.with_args(channel),
        )?;
    }
    let channels = shared(channels);
    screen.dispatcher.register(&channels);
    screen.keep(channels);

    screen.keep(status);
    Ok(screen)
}

fn slider_screen(display: &Display, config: &UiConfig) -> WidgetResult<Screen> {
    let mut screen = Screen::new();

    let mut meter = Meter::new(WidgetBase::new(display, rect(70, 10, 30, 160)).with_border(1))
        .with_divisions(5)
        .with_pointer_color(RED);
    meter.show();
    let meter = shared(meter);

    let readout = shared(Label::new(
        WidgetBase::new(display, rect(130, 210, 120, 0)).with_border(2),
    ));
    readout.borrow_mut().show();

    let mut dial = Dial::new(WidgetBase::new(display, rect(240, 100, 70, 70)))
        .with_ticks(12)
        .with_pointers(&[0.9, 0.6])?;
    dial.show();
    let dial = shared(dial);

    let mut gauge = IconGauge::new(
        WidgetBase::new(display, rect(260, 20, 32, 32)),
        square_icons(&[RED, ORANGE, YELLOW, GREEN]),
    )?;
    gauge.show();
    let gauge = shared(gauge);

    // Vertical slider feeds the meter
    let target = Rc::clone(&meter);
    let mut level = Slider::vertical(
        WidgetBase::new(display, rect(20, 10, 30, 160)).with_border(2),
    )
    .with_legends(&["0", "50", "100"])
    .with_slide_color(CYAN)
    .on_move(move |slider, _| target.borrow_mut().set_value(slider.value()))
    .on_end(|slider, _| info!("Level settled at {:.2}", slider.value()));
    level.show();
    let level = shared(level);
    screen.dispatcher.register(&level);

    // Horizontal slider shows its value as text
    let label = Rc::clone(&readout);
    let mut balance = Slider::horizontal(
        WidgetBase::new(display, rect(110, 20, 130, 30)).with_border(2),
    )
    .with_value(0.5)
    .with_divisions(4)
    .on_move(move |slider, _| {
        let mut text = heapless::String::<16>::new();
        if core::fmt::write(&mut text, format_args!("{:.2}", slider.value())).is_err() {
            warn!("Readout text truncated");
        }
        label.borrow_mut().set_text(&text);
    });
    balance.show();
    let balance = shared(balance);
    screen.dispatcher.register(&balance);

    // Knob drives the dial and the gauge
    let pointer = Rc::clone(&dial);
    let fuel = Rc::clone(&gauge);
    let mut knob = Knob::new(WidgetBase::new(display, rect(120, 70, 100, 100)))
        .with_config(config)
        .with_arc(TAU * 0.75)
        .with_ticks(7)
        .with_color(NAVY)
        .on_move(move |knob, _| {
            let value = knob.value();
            let mut dial = pointer.borrow_mut();
            if let Err(e) = dial
                .set_pointer(0, value * TAU)
                .and_then(|_| dial.set_pointer(1, value * TAU * 12.0))
            {
                error!("Dial update failed: {}", e);
            }
            fuel.borrow_mut().set_value(value);
        });
    knob.show();
    let knob = shared(knob);
    screen.dispatcher.register(&knob);

    screen.keep(level);
    screen.keep(balance);
    screen.keep(knob);
    screen.keep(meter);
    screen.keep(readout);
    screen.keep(dial);
    screen.keep(gauge);
    Ok(screen)
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

fn keycode_to_screen(keycode: Keycode) -> Option<ScreenId> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(ScreenId::Buttons),
        Keycode::Num2 | Keycode::Kp2 => Some(ScreenId::Sliders),
        _ => None,
    }
}

fn publish(sample: TouchSample) {
    if TOUCH_SAMPLES.try_send(sample).is_err() {
        warn!("Touch queue full, dropping {:?}", sample);
    }
}

fn contact(point: Point) -> TouchSample {
    TouchSample::Contact(TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    let config = UiConfig::default();
    let frame = Duration::from_millis(u64::from(config.tick_ms));
    info!("Starting touchkit simulator");
    info!(
        "Display: {}×{} (scale {}×), tick {} ms",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE, config.tick_ms
    );
    info!("Keys: 1=Buttons  2=Sliders  Q=Quit");

    let mut window_display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("touchkit Simulator", &output_settings);

    let framebuffer = Rc::new(RefCell::new(FrameBuffer::new(Size::new(
        DISPLAY_WIDTH_PX,
        DISPLAY_HEIGHT_PX,
    ))));
    let display = DisplayHandle::from_config(Rc::clone(&framebuffer), &config);
    let mut source = ChannelTouchSource::new(TOUCH_SAMPLES.receiver());

    let mut screen = match build_screen(ScreenId::Buttons, &display, &config) {
        Ok(screen) => screen,
        Err(e) => {
            error!("Failed to build screen: {}", e);
            return;
        }
    };

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = framebuffer.borrow_mut().flush(&mut window_display);
    window.update(&window_display);
    let mut pressed = false;

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if let Some(id) = keycode_to_screen(keycode) {
                        info!("Switching to {:?}", id);
                        match build_screen(id, &display, &config) {
                            Ok(next) => screen = next,
                            Err(e) => error!("Failed to build {:?}: {}", id, e),
                        }
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    pressed = true;
                    publish(contact(point));
                }
                SimulatorEvent::MouseMove { point } if pressed => publish(contact(point)),
                SimulatorEvent::MouseButtonUp { .. } => {
                    pressed = false;
                    publish(TouchSample::Released);
                }

                _ => {}
            }
        }

        block_on(screen.dispatcher.poll(&mut source));

        let _ = framebuffer.borrow_mut().flush(&mut window_display);
        window.update(&window_display);

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }

    info!("Simulator exiting");
}
