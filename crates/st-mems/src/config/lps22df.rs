use crate::error::Error;
use crate::register::lps22df::{ctrl_reg1, ctrl_reg2};
use crate::register::{field, with_field};

/// LPS22DF output data rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lps22dfOdr {
    /// One-shot / power-down.
    OneShot,
    /// 1 Hz.
    Hz1,
    /// 4 Hz.
    Hz4,
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
}

impl Lps22dfOdr {
    /// Snaps a requested rate up to the next supported continuous rate.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        match hz_milli {
            0..=1_000 => Self::Hz1,
            1_001..=4_000 => Self::Hz4,
            4_001..=10_000 => Self::Hz10,
            10_001..=25_000 => Self::Hz25,
            25_001..=50_000 => Self::Hz50,
            50_001..=75_000 => Self::Hz75,
            75_001..=100_000 => Self::Hz100,
            _ => Self::Hz200,
        }
    }

    /// Returns the rate in milli-hertz (0 for one-shot).
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::OneShot => 0,
            Self::Hz1 => 1_000,
            Self::Hz4 => 4_000,
            Self::Hz10 => 10_000,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz75 => 75_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::OneShot => 0,
            Self::Hz1 => 1,
            Self::Hz4 => 2,
            Self::Hz10 => 3,
            Self::Hz25 => 4,
            Self::Hz50 => 5,
            Self::Hz75 => 6,
            Self::Hz100 => 7,
            Self::Hz200 => 8,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Result<Self, Error> {
        match bits {
            0 => Ok(Self::OneShot),
            1 => Ok(Self::Hz1),
            2 => Ok(Self::Hz4),
            3 => Ok(Self::Hz10),
            4 => Ok(Self::Hz25),
            5 => Ok(Self::Hz50),
            6 => Ok(Self::Hz75),
            7 => Ok(Self::Hz100),
            8 => Ok(Self::Hz200),
            _ => Err(Error::InvalidData),
        }
    }
}

/// Number of internal samples averaged per output sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Averaging {
    /// 4 samples.
    Avg4,
    /// 8 samples.
    Avg8,
    /// 16 samples.
    Avg16,
    /// 32 samples.
    Avg32,
    /// 64 samples.
    Avg64,
    /// 128 samples.
    Avg128,
    /// 256 samples.
    Avg256,
    /// 512 samples.
    Avg512,
}

impl Averaging {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Avg4 => 0,
            Self::Avg8 => 1,
            Self::Avg16 => 2,
            Self::Avg32 => 3,
            Self::Avg64 => 4,
            Self::Avg128 => 5,
            Self::Avg256 => 6,
            Self::Avg512 => 7,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Avg4,
            1 => Self::Avg8,
            2 => Self::Avg16,
            3 => Self::Avg32,
            4 => Self::Avg64,
            5 => Self::Avg128,
            6 => Self::Avg256,
            _ => Self::Avg512,
        }
    }
}

/// LPS22DF digital low-pass filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lps22dfLowPassFilter {
    /// Filter off.
    Disabled,
    /// Bandwidth ODR/4.
    OdrDiv4,
    /// Bandwidth ODR/9.
    OdrDiv9,
}

impl Lps22dfLowPassFilter {
    /// CTRL_REG2 EN_LPFP + LFPF_CFG bits.
    pub(crate) const fn ctrl_reg2_bits(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::OdrDiv4 => ctrl_reg2::EN_LPFP,
            Self::OdrDiv9 => ctrl_reg2::EN_LPFP | ctrl_reg2::LFPF_CFG,
        }
    }

    pub(crate) const fn from_ctrl_reg2(value: u8) -> Self {
        if (value & ctrl_reg2::EN_LPFP) == 0 {
            Self::Disabled
        } else if (value & ctrl_reg2::LFPF_CFG) == 0 {
            Self::OdrDiv4
        } else {
            Self::OdrDiv9
        }
    }
}

/// LPS22DF operating mode (ODR, averaging, low-pass filter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lps22dfMode {
    /// Output data rate.
    pub odr: Lps22dfOdr,
    /// Averaging.
    pub averaging: Averaging,
    /// Low-pass filter.
    pub lpf: Lps22dfLowPassFilter,
}

impl Lps22dfMode {
    /// Mode applied at init (one-shot, 4 samples, ODR/4).
    pub const DEFAULT: Self = Self {
        odr: Lps22dfOdr::OneShot,
        averaging: Averaging::Avg4,
        lpf: Lps22dfLowPassFilter::OdrDiv4,
    };

    /// Creates the default mode.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the output data rate.
    #[must_use]
    pub const fn with_odr(mut self, odr: Lps22dfOdr) -> Self {
        self.odr = odr;
        self
    }

    /// Sets the averaging.
    #[must_use]
    pub const fn with_averaging(mut self, averaging: Averaging) -> Self {
        self.averaging = averaging;
        self
    }

    /// Sets the low-pass filter.
    #[must_use]
    pub const fn with_lpf(mut self, lpf: Lps22dfLowPassFilter) -> Self {
        self.lpf = lpf;
        self
    }

    /// Merges the mode into the current CTRL_REG1/CTRL_REG2 pair.
    pub(crate) const fn apply(self, regs: [u8; 2]) -> [u8; 2] {
        let reg1 = with_field(
            regs[0],
            ctrl_reg1::ODR_MASK,
            ctrl_reg1::ODR_SHIFT,
            self.odr.bits(),
        );
        let reg1 = with_field(
            reg1,
            ctrl_reg1::AVG_MASK,
            ctrl_reg1::AVG_SHIFT,
            self.averaging.bits(),
        );
        let lpf_mask = ctrl_reg2::EN_LPFP | ctrl_reg2::LFPF_CFG;
        let reg2 = (regs[1] & !lpf_mask) | self.lpf.ctrl_reg2_bits();
        [reg1, reg2]
    }

    pub(crate) const fn from_regs(regs: [u8; 2]) -> Result<Self, Error> {
        let odr_bits = field(regs[0], ctrl_reg1::ODR_MASK, ctrl_reg1::ODR_SHIFT);
        let odr = match Lps22dfOdr::from_bits(odr_bits) {
            Ok(odr) => odr,
            Err(err) => return Err(err),
        };
        let avg_bits = field(regs[0], ctrl_reg1::AVG_MASK, ctrl_reg1::AVG_SHIFT);
        Ok(Self {
            odr,
            averaging: Averaging::from_bits(avg_bits),
            lpf: Lps22dfLowPassFilter::from_ctrl_reg2(regs[1]),
        })
    }
}

impl Default for Lps22dfMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}
