//! Typed configuration for every supported sensor.
//!
//! Output data rates cross the public API as milli-hertz `u32` values. Each
//! family snaps a requested rate up to the next rate its hardware supports.

pub(crate) mod accel;
pub(crate) mod lps22df;
pub(crate) mod lps22hh;
pub(crate) mod lps33;

pub use accel::{AccelBandwidth, AccelFullScale, AccelMode, AccelOdr, PowerMode};
pub use lps22df::{Averaging, Lps22dfLowPassFilter, Lps22dfMode, Lps22dfOdr};
pub use lps22hh::{Lps22hhLowPassFilter, Lps22hhOdr, NoiseMode};
pub use lps33::{Lps33LowPassFilter, Lps33Odr};

use crate::error::Error;

/// Static description of what a sensor can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Pressure channel present.
    pub pressure: bool,
    /// Temperature channel present.
    pub temperature: bool,
    /// Accelerometer present.
    pub accelerometer: bool,
    /// Dedicated low-power mode available.
    pub low_power: bool,
    /// Highest pressure ODR in milli-hertz (0 when absent).
    pub pressure_max_odr_hz_milli: u32,
    /// Highest temperature ODR in milli-hertz (0 when absent).
    pub temperature_max_odr_hz_milli: u32,
    /// Highest accelerometer ODR in milli-hertz (0 when absent).
    pub accel_max_odr_hz_milli: u32,
    /// Largest accelerometer full scale in g (0 when absent).
    pub accel_max_full_scale_g: u16,
}

impl Capabilities {
    /// Capabilities of a pressure + temperature sensor.
    pub(crate) const fn pressure(max_odr_hz_milli: u32, low_power: bool) -> Self {
        Self {
            pressure: true,
            temperature: true,
            accelerometer: false,
            low_power,
            pressure_max_odr_hz_milli: max_odr_hz_milli,
            temperature_max_odr_hz_milli: max_odr_hz_milli,
            accel_max_odr_hz_milli: 0,
            accel_max_full_scale_g: 0,
        }
    }

    /// Capabilities of an accelerometer without barometer.
    pub(crate) const fn accelerometer(max_odr_hz_milli: u32, max_full_scale_g: u16) -> Self {
        Self {
            pressure: false,
            temperature: false,
            accelerometer: true,
            low_power: true,
            pressure_max_odr_hz_milli: 0,
            temperature_max_odr_hz_milli: 0,
            accel_max_odr_hz_milli: max_odr_hz_milli,
            accel_max_full_scale_g: max_full_scale_g,
        }
    }
}

/// Hardware FIFO operating mode.
///
/// This is the union of the modes found across the supported sensors; a
/// sensor rejects the ones it lacks with [`Error::Unsupported`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO disabled, output registers only.
    Bypass,
    /// Fill until full, then stop.
    Fifo,
    /// Continuous; the oldest sample is overwritten when full.
    Stream,
    /// Stream until a trigger event, then FIFO.
    StreamToFifo,
    /// Bypass until a trigger event, then stream.
    BypassToStream,
    /// Bypass until a trigger event, then FIFO.
    BypassToFifo,
    /// Stream with a dynamically adjusted depth (LPS33HW only).
    DynamicStream,
}

impl FifoMode {
    /// FIFO_CTRL encoding for the LPS22DF and LPS22HH families (F_MODE + TRIG_MODES).
    pub(crate) const fn lps22_bits(self) -> Result<u8, Error> {
        match self {
            Self::Bypass => Ok(0b000),
            Self::Fifo => Ok(0b001),
            Self::Stream => Ok(0b010),
            Self::BypassToFifo => Ok(0b101),
            Self::BypassToStream => Ok(0b110),
            Self::StreamToFifo => Ok(0b111),
            Self::DynamicStream => Err(Error::Unsupported),
        }
    }

    /// FIFO_CTRL.F_MODE encoding for the LPS33HW.
    pub(crate) const fn lps33_bits(self) -> u8 {
        match self {
            Self::Bypass => 0b000,
            Self::Fifo => 0b001,
            Self::Stream => 0b010,
            Self::StreamToFifo => 0b011,
            Self::BypassToStream => 0b100,
            Self::DynamicStream => 0b110,
            Self::BypassToFifo => 0b111,
        }
    }
}

/// Pressure FIFO configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoConfig {
    /// FIFO operating mode.
    pub mode: FifoMode,
    /// Watermark level in samples.
    pub watermark: u8,
    /// Stop filling once the watermark is reached.
    pub stop_on_watermark: bool,
}

impl FifoConfig {
    /// Default FIFO configuration (bypass, no watermark).
    pub const DEFAULT: Self = Self {
        mode: FifoMode::Bypass,
        watermark: 0,
        stop_on_watermark: false,
    };

    /// Creates a FIFO configuration with the given mode and watermark.
    pub const fn new(mode: FifoMode, watermark: u8) -> Self {
        Self {
            mode,
            watermark,
            stop_on_watermark: false,
        }
    }

    /// Sets the FIFO mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: FifoMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the watermark level.
    #[must_use]
    pub const fn with_watermark(mut self, watermark: u8) -> Self {
        self.watermark = watermark;
        self
    }

    /// Stops filling at the watermark when enabled.
    #[must_use]
    pub const fn with_stop_on_watermark(mut self, enable: bool) -> Self {
        self.stop_on_watermark = enable;
        self
    }

    pub(crate) const fn validate(self, max_watermark: u8) -> Result<(), Error> {
        if self.watermark > max_watermark {
            return Err(Error::InvalidData);
        }
        Ok(())
    }
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_mode_encodings_per_family() {
        assert_eq!(FifoMode::StreamToFifo.lps22_bits(), Ok(0b111));
        assert_eq!(FifoMode::BypassToFifo.lps22_bits(), Ok(0b101));
        assert_eq!(FifoMode::DynamicStream.lps22_bits(), Err(Error::Unsupported));
        assert_eq!(FifoMode::StreamToFifo.lps33_bits(), 0b011);
        assert_eq!(FifoMode::DynamicStream.lps33_bits(), 0b110);
        assert_eq!(FifoMode::BypassToFifo.lps33_bits(), 0b111);
    }

    #[test]
    fn fifo_config_rejects_watermark_over_capacity() {
        let config = FifoConfig::new(FifoMode::Fifo, 32).with_stop_on_watermark(true);
        assert_eq!(config.validate(31), Err(Error::InvalidData));
        assert_eq!(config.validate(127), Ok(()));
        assert!(config.stop_on_watermark);
    }
}
