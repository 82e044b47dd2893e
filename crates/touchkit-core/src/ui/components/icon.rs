// src/ui/components/icon.rs
//! Fixed-size icon frames for icon buttons and gauges

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use embedded_graphics::image::{Image, ImageRawBE};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::prelude::*;

use crate::ui::display::{DisplayHandle, Surface};
use crate::ui::error::{WidgetError, WidgetResult, check_index};

/// A sequence of equally sized RGB565 images.
///
/// Frames are stored as big-endian RGB565 bytes, the layout produced by most
/// image converters for SPI panels. Cloning shares the frame data.
#[derive(Debug, Clone)]
pub struct IconSet {
    size: Size,
    frames: Rc<[Vec<u8>]>,
}

impl IconSet {
    /// Wrap raw frames. Every frame must hold exactly `width * height`
    /// pixels.
    pub fn from_raw(size: Size, frames: Vec<Vec<u8>>) -> WidgetResult<Self> {
        let expected = (size.width * size.height * 2) as usize;
        if frames.is_empty() {
            return Err(WidgetError::Configuration("icon set has no frames"));
        }
        if frames.iter().any(|frame| frame.len() != expected) {
            return Err(WidgetError::Configuration("icon frame does not match icon size"));
        }
        Ok(Self {
            size,
            frames: frames.into(),
        })
    }

    /// Build `count` frames by evaluating `paint(frame, pixel)` for every
    /// pixel of every frame.
    pub fn render(size: Size, count: usize, mut paint: impl FnMut(usize, Point) -> Rgb565) -> Self {
        let frames: Vec<Vec<u8>> = (0..count)
            .map(|index| {
                let mut bytes = Vec::with_capacity((size.width * size.height * 2) as usize);
                for y in 0..size.height as i32 {
                    for x in 0..size.width as i32 {
                        let raw = RawU16::from(paint(index, Point::new(x, y))).into_inner();
                        bytes.extend_from_slice(&raw.to_be_bytes());
                    }
                }
                bytes
            })
            .collect();
        Self {
            size,
            frames: frames.into(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Draw frame `index` with its top left corner at `top_left`.
    pub fn draw<D: Surface>(
        &self,
        display: &DisplayHandle<D>,
        index: usize,
        top_left: Point,
    ) -> WidgetResult<()> {
        check_index(index, self.frames.len())?;
        let raw = ImageRawBE::<Rgb565>::new(&self.frames[index], self.size.width);
        display.draw(|d| Image::new(&raw, top_left).draw(d));
        Ok(())
    }
}
