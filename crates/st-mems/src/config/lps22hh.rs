use crate::error::Error;
use crate::register::lps22hh::{ctrl_reg1, ctrl_reg2};
use crate::register::{field, with_field, with_flag};

/// LPS22HH-family data rate (LPS22CH, LPS27HHTW).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lps22hhOdr {
    /// Power-down.
    PowerDown,
    /// 1 Hz.
    Hz1,
    /// 10 Hz.
    Hz10,
    /// 25 Hz.
    Hz25,
    /// 50 Hz.
    Hz50,
    /// 75 Hz.
    Hz75,
    /// 100 Hz.
    Hz100,
    /// 200 Hz.
    Hz200,
    /// Single conversion, then back to power-down.
    OneShot,
}

impl Lps22hhOdr {
    /// Snaps a requested rate up to the next supported continuous rate.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        match hz_milli {
            0..=1_000 => Self::Hz1,
            1_001..=10_000 => Self::Hz10,
            10_001..=25_000 => Self::Hz25,
            25_001..=50_000 => Self::Hz50,
            50_001..=75_000 => Self::Hz75,
            75_001..=100_000 => Self::Hz100,
            _ => Self::Hz200,
        }
    }

    /// Returns the rate in milli-hertz (0 for power-down and one-shot).
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::PowerDown | Self::OneShot => 0,
            Self::Hz1 => 1_000,
            Self::Hz10 => 10_000,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz75 => 75_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
        }
    }

    /// Rate code; bit 3 is the one-shot trigger, bits 0..2 the ODR field.
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::PowerDown => 0,
            Self::Hz1 => 1,
            Self::Hz10 => 2,
            Self::Hz25 => 3,
            Self::Hz50 => 4,
            Self::Hz75 => 5,
            Self::Hz100 => 6,
            Self::Hz200 => 7,
            Self::OneShot => 0b1000,
        }
    }

    pub(crate) const fn from_odr_field(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::PowerDown,
            1 => Self::Hz1,
            2 => Self::Hz10,
            3 => Self::Hz25,
            4 => Self::Hz50,
            5 => Self::Hz75,
            6 => Self::Hz100,
            _ => Self::Hz200,
        }
    }
}

/// Power/noise trade-off of the LPS22HH family (CTRL_REG2.LOW_NOISE_EN).
///
/// Low-noise mode is not available at 100 Hz and 200 Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoiseMode {
    /// Low-current mode.
    LowCurrent,
    /// Low-noise mode.
    LowNoise,
}

/// Data rate as programmed into CTRL_REG1 / CTRL_REG2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct DataRate {
    pub(crate) odr: Lps22hhOdr,
    pub(crate) noise: NoiseMode,
}

impl DataRate {
    /// Builds a rate; 100 Hz and 200 Hz always run in low-current mode.
    pub(crate) const fn new(odr: Lps22hhOdr, noise: NoiseMode) -> Self {
        let noise = match odr {
            Lps22hhOdr::Hz100 | Lps22hhOdr::Hz200 => NoiseMode::LowCurrent,
            _ => noise,
        };
        Self { odr, noise }
    }

    /// Merges the rate into CTRL_REG1 (ODR field).
    pub(crate) const fn apply_ctrl_reg1(self, reg: u8) -> u8 {
        with_field(
            reg,
            ctrl_reg1::ODR_MASK,
            ctrl_reg1::ODR_SHIFT,
            self.odr.bits() & 0b111,
        )
    }

    /// Merges the rate into CTRL_REG2 (LOW_NOISE_EN + ONE_SHOT).
    pub(crate) const fn apply_ctrl_reg2(self, reg: u8) -> u8 {
        let reg = with_flag(
            reg,
            ctrl_reg2::LOW_NOISE_EN,
            matches!(self.noise, NoiseMode::LowNoise),
        );
        with_flag(reg, ctrl_reg2::ONE_SHOT, (self.odr.bits() & 0b1000) != 0)
    }

    /// Decodes the programmed rate; the low-noise flag does not change the rate.
    pub(crate) const fn from_regs(reg1: u8, reg2: u8) -> Self {
        let odr_bits = field(reg1, ctrl_reg1::ODR_MASK, ctrl_reg1::ODR_SHIFT);
        let odr = if odr_bits == 0 && (reg2 & ctrl_reg2::ONE_SHOT) != 0 {
            Lps22hhOdr::OneShot
        } else {
            Lps22hhOdr::from_odr_field(odr_bits)
        };
        let noise = if (reg2 & ctrl_reg2::LOW_NOISE_EN) != 0 {
            NoiseMode::LowNoise
        } else {
            NoiseMode::LowCurrent
        };
        Self { odr, noise }
    }
}

/// LPS22HH / LPS33 low-pass filter on the pressure path (CTRL_REG1 EN_LPFP + LPFP_CFG).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lps22hhLowPassFilter {
    /// Bandwidth ODR/2 (filter off).
    OdrDiv2,
    /// Bandwidth ODR/9.
    OdrDiv9,
    /// Bandwidth ODR/20.
    OdrDiv20,
}

impl Lps22hhLowPassFilter {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::OdrDiv2 => 0,
            Self::OdrDiv9 => 2,
            Self::OdrDiv20 => 3,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            2 => Self::OdrDiv9,
            3 => Self::OdrDiv20,
            _ => Self::OdrDiv2,
        }
    }

    pub(crate) const fn apply(self, reg: u8) -> u8 {
        with_field(reg, ctrl_reg1::LPFP_MASK, ctrl_reg1::LPFP_SHIFT, self.bits())
    }
}

pub(crate) const fn validate_watermark(level: u8) -> Result<u8, Error> {
    if level > crate::register::lps22hh::fifo_wtm::WTM_MASK {
        return Err(Error::InvalidData);
    }
    Ok(level)
}
