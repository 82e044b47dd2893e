// src/ui/display.rs
//! Display seam shared by all widgets
//!
//! Widgets never own a display. They hold a [`DisplayHandle`], a cheap clone
//! of a shared [`Surface`] plus the default colors of the screen. Drawing is
//! synchronous; a failing draw is logged and the interaction carries on.

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Debug;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::error;

use crate::config::UiConfig;

/// A draw target that can also hand pixels back.
///
/// Moving parts (slider handles, meter pointers) save the pixels they are
/// about to cover and put them back when they move away, so track graphics
/// and tick marks underneath survive.
pub trait Surface: DrawTarget<Color = Rgb565, Error: Debug> {
    /// Pixels of `area` in row-major order. Points outside the surface read
    /// as black.
    fn read_region(&self, area: &Rectangle) -> Vec<Rgb565>;

    /// Write pixels previously returned by [`Surface::read_region`].
    fn write_region(&mut self, area: &Rectangle, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        self.fill_contiguous(area, pixels.iter().copied())
    }
}

/// Pixels saved from a surface together with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelRegion {
    pub area: Rectangle,
    pub pixels: Vec<Rgb565>,
}

/// Shared drawing handle with the screen's default colors.
pub struct DisplayHandle<D> {
    surface: Rc<RefCell<D>>,
    foreground: Rgb565,
    background: Rgb565,
}

impl<D> Clone for DisplayHandle<D> {
    fn clone(&self) -> Self {
        Self {
            surface: Rc::clone(&self.surface),
            foreground: self.foreground,
            background: self.background,
        }
    }
}

impl<D: Surface> DisplayHandle<D> {
    /// Wrap a surface with white-on-black defaults.
    pub fn new(surface: D) -> Self {
        Self::from_shared(Rc::new(RefCell::new(surface)))
    }

    /// Use a surface that is also held elsewhere, e.g. by the code that
    /// flushes it to hardware.
    pub fn from_shared(surface: Rc<RefCell<D>>) -> Self {
        Self {
            surface,
            foreground: Rgb565::WHITE,
            background: Rgb565::BLACK,
        }
    }

    pub fn from_config(surface: Rc<RefCell<D>>, config: &UiConfig) -> Self {
        Self::from_shared(surface).with_colors(config.foreground(), config.background())
    }

    pub fn with_colors(mut self, foreground: Rgb565, background: Rgb565) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn foreground(&self) -> Rgb565 {
        self.foreground
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    /// Run a drawing closure against the surface, logging failures.
    pub fn draw<F>(&self, f: F)
    where
        F: FnOnce(&mut D) -> Result<(), D::Error>,
    {
        let mut surface = self.surface.borrow_mut();
        if let Err(e) = f(&mut *surface) {
            error!("Draw failed: {:?}", e);
        }
    }

    /// Borrow the surface for anything that is not a plain draw.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut *self.surface.borrow_mut())
    }

    pub fn save_region(&self, area: Rectangle) -> PixelRegion {
        PixelRegion {
            area,
            pixels: self.surface.borrow().read_region(&area),
        }
    }

    pub fn restore_region(&self, region: &PixelRegion) {
        self.draw(|d| d.write_region(&region.area, &region.pixels));
    }

    pub fn fill_rect(&self, area: Rectangle, color: Rgb565) {
        self.draw(|d| d.fill_solid(&area, color));
    }

    /// One pixel wide outline.
    pub fn draw_rect(&self, area: Rectangle, color: Rgb565) {
        self.draw(|d| {
            area.into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(d)
        });
    }

    pub fn fill_circle(&self, center: Point, radius: u32, color: Rgb565) {
        self.draw(|d| {
            Circle::with_center(center, radius * 2 + 1)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(d)
        });
    }

    pub fn draw_circle(&self, center: Point, radius: u32, color: Rgb565) {
        self.draw(|d| {
            Circle::with_center(center, radius * 2 + 1)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(d)
        });
    }

    pub fn draw_line(&self, start: Point, end: Point, color: Rgb565) {
        self.draw(|d| {
            Line::new(start, end)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(d)
                .map(|_| ())
        });
    }

    /// Draw a single line of text vertically centered on `position`.
    pub fn draw_text(
        &self,
        text: &str,
        position: Point,
        font: &MonoFont<'_>,
        color: Rgb565,
        alignment: Alignment,
    ) {
        let character_style = MonoTextStyle::new(font, color);
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();
        self.draw(|d| {
            Text::with_text_style(text, position, character_style, text_style)
                .draw(d)
                .map(|_| ())
        });
    }
}
