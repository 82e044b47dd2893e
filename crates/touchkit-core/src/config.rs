//! Toolkit configuration.
//!
//! The configuration is a small serde struct so firmware can keep it as a
//! postcard blob in flash and decode it at boot.

extern crate alloc;

use alloc::vec::Vec;
use embassy_time::Duration;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Default dispatcher tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u32 = 20;

/// Default number of ticks a highlighted button stays lit.
pub const DEFAULT_FLASH_TICKS: u32 = 1;

/// Default knob dead zone as a fraction of the squared knob radius.
pub const DEFAULT_KNOB_DEAD_ZONE: f32 = 0.5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to decode configuration: {0}")]
    Decode(postcard::Error),
    #[error("Failed to encode configuration: {0}")]
    Encode(postcard::Error),
}

/// An RGB888 color triple as stored in the configuration blob.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTriple(pub u8, pub u8, pub u8);

impl ColorTriple {
    pub fn to_rgb565(self) -> Rgb565 {
        Rgb565::from(Rgb888::new(self.0, self.1, self.2))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UiConfig {
    /// Delay between two iterations of the dispatch loop.
    pub tick_ms: u32,
    /// Ticks a button stays in its highlight color after a touch.
    pub flash_ticks: u32,
    /// Touches closer to a knob's center than this fraction of the squared
    /// radius are ignored.
    pub knob_dead_zone: f32,
    pub foreground: ColorTriple,
    pub background: ColorTriple,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            flash_ticks: DEFAULT_FLASH_TICKS,
            knob_dead_zone: DEFAULT_KNOB_DEAD_ZONE,
            foreground: ColorTriple(255, 255, 255),
            background: ColorTriple(0, 0, 0),
        }
    }
}

impl UiConfig {
    /// Decode a configuration blob produced by [`UiConfig::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(ConfigError::Decode)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    /// Tick interval as an embassy duration.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }

    pub fn foreground(&self) -> Rgb565 {
        self.foreground.to_rgb565()
    }

    pub fn background(&self) -> Rgb565 {
        self.background.to_rgb565()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_stored_blob_decodes() {
        let config = UiConfig {
            tick_ms: 50,
            flash_ticks: 3,
            ..UiConfig::default()
        };
        let bytes = config.to_bytes().unwrap();

        let decoded = UiConfig::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.tick_ms, 50);
        assert_eq!(decoded.flash_ticks, 3);
        assert_eq!(decoded.tick(), Duration::from_millis(50));
    }

    #[test]
    fn test_truncated_blob_is_rejected() {
        assert!(matches!(
            UiConfig::from_bytes(&[0x32]),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_default_colors() {
        let config = UiConfig::default();
        assert_eq!(config.foreground(), Rgb565::WHITE);
        assert_eq!(config.background(), Rgb565::BLACK);
    }
}
