//! Host-side test helpers.

extern crate alloc;

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::framebuffer::FrameBuffer;
use crate::ui::{DisplayHandle, Surface, TouchPoint, TouchSample, TouchSource};

/// Framebuffer that counts draw operations. Reads are not counted.
pub(crate) struct RecordingSurface {
    buffer: FrameBuffer,
    pub draws: usize,
}

impl RecordingSurface {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            buffer: FrameBuffer::new(size),
            draws: 0,
        }
    }

    pub(crate) fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.buffer.pixel(point)
    }
}

impl OriginDimensions for RecordingSurface {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl DrawTarget for RecordingSurface {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.draws += 1;
        self.buffer.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.draws += 1;
        self.buffer.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.draws += 1;
        self.buffer.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.draws += 1;
        self.buffer.clear(color)
    }
}

impl Surface for RecordingSurface {
    fn read_region(&self, area: &Rectangle) -> Vec<Rgb565> {
        self.buffer.read_region(area)
    }
}

/// A 320x240 recording display with white-on-black defaults.
pub(crate) fn display() -> DisplayHandle<RecordingSurface> {
    DisplayHandle::new(RecordingSurface::new(Size::new(320, 240)))
}

pub(crate) fn draw_count(display: &DisplayHandle<RecordingSurface>) -> usize {
    display.with_surface(|surface| surface.draws)
}

pub(crate) fn pixel_at(display: &DisplayHandle<RecordingSurface>, point: Point) -> Option<Rgb565> {
    display.with_surface(|surface| surface.pixel(point))
}

/// Touch source whose state is set directly by the test.
pub(crate) struct ScriptedTouch {
    current: TouchSample,
}

impl ScriptedTouch {
    pub(crate) fn new() -> Self {
        Self {
            current: TouchSample::Released,
        }
    }

    pub(crate) fn set(&mut self, sample: TouchSample) {
        self.current = sample;
    }
}

impl TouchSource for ScriptedTouch {
    fn is_ready(&mut self) -> bool {
        matches!(self.current, TouchSample::Contact(_))
    }

    fn is_touched(&mut self) -> bool {
        self.current != TouchSample::Released
    }

    async fn touch_point(&mut self) -> TouchPoint {
        match self.current {
            TouchSample::Contact(point) => point,
            _ => TouchPoint::new(0, 0),
        }
    }
}
