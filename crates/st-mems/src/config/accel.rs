//! ST1VAFE3BX accelerometer mode: ODR, power mode, full scale, bandwidth.

use crate::error::Error;
use crate::register::st1vafe3bx::{ctrl3, ctrl5};
use crate::register::{field, with_field, with_flag};

/// Accelerometer power mode used when quantizing a requested rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Ultra-low-power (1.6 / 3 / 25 Hz, no anti-aliasing filter).
    UltraLowPower,
    /// Low-power.
    LowPower,
    /// High-performance.
    HighPerformance,
}

/// Accelerometer output data rate, including the power mode it runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOdr {
    /// Power-down.
    Off,
    /// 1.6 Hz ultra-low-power.
    Ulp1Hz6,
    /// 3 Hz ultra-low-power.
    Ulp3Hz,
    /// 25 Hz ultra-low-power.
    Ulp25Hz,
    /// 6 Hz low-power.
    Lp6Hz,
    /// 12.5 Hz low-power.
    Lp12Hz5,
    /// 25 Hz low-power.
    Lp25Hz,
    /// 50 Hz low-power.
    Lp50Hz,
    /// 100 Hz low-power.
    Lp100Hz,
    /// 200 Hz low-power.
    Lp200Hz,
    /// 400 Hz low-power.
    Lp400Hz,
    /// 800 Hz low-power.
    Lp800Hz,
    /// 6 Hz high-performance.
    Hp6Hz,
    /// 12.5 Hz high-performance.
    Hp12Hz5,
    /// 25 Hz high-performance.
    Hp25Hz,
    /// 50 Hz high-performance.
    Hp50Hz,
    /// 100 Hz high-performance.
    Hp100Hz,
    /// 200 Hz high-performance.
    Hp200Hz,
    /// 400 Hz high-performance.
    Hp400Hz,
    /// 800 Hz high-performance.
    Hp800Hz,
    /// Single shot triggered by the INT2 pin.
    TrigPin,
    /// Single shot triggered over the interface (CTRL4.SOC).
    TrigSw,
    /// 3200 Hz, vAFE only, low-power.
    VafeLp3200Hz,
    /// 800 Hz, vAFE only, high-performance.
    VafeHp800Hz,
}

impl AccelOdr {
    /// Mode code: bits 0..3 go to CTRL5.ODR, bit 4 selects high-performance.
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::Off => 0x00,
            Self::Ulp1Hz6 => 0x01,
            Self::Ulp3Hz => 0x02,
            Self::Ulp25Hz => 0x03,
            Self::Lp6Hz => 0x04,
            Self::Lp12Hz5 => 0x05,
            Self::Lp25Hz => 0x06,
            Self::Lp50Hz => 0x07,
            Self::Lp100Hz => 0x08,
            Self::Lp200Hz => 0x09,
            Self::Lp400Hz => 0x0A,
            Self::Lp800Hz => 0x0B,
            Self::Hp6Hz => 0x14,
            Self::Hp12Hz5 => 0x15,
            Self::Hp25Hz => 0x16,
            Self::Hp50Hz => 0x17,
            Self::Hp100Hz => 0x18,
            Self::Hp200Hz => 0x19,
            Self::Hp400Hz => 0x1A,
            Self::Hp800Hz => 0x1B,
            Self::TrigPin => 0x2E,
            Self::TrigSw => 0x2F,
            Self::VafeLp3200Hz => 0x2B,
            Self::VafeHp800Hz => 0x3B,
        }
    }

    pub(crate) const fn high_performance(self) -> bool {
        matches!(self.code() & 0x30, 0x10 | 0x30)
    }

    /// Decodes CTRL5.ODR together with CTRL3.HP_EN and AH_BIO_CFG2.AH_BIO_EN.
    ///
    /// Reserved nibbles decode as `Off`.
    pub(crate) const fn from_regs(odr_bits: u8, hp_en: bool, vafe_en: bool) -> Self {
        match odr_bits & 0x0F {
            0x01 => Self::Ulp1Hz6,
            0x02 => Self::Ulp3Hz,
            0x03 => Self::Ulp25Hz,
            0x04 if hp_en => Self::Hp6Hz,
            0x04 => Self::Lp6Hz,
            0x05 if hp_en => Self::Hp12Hz5,
            0x05 => Self::Lp12Hz5,
            0x06 if hp_en => Self::Hp25Hz,
            0x06 => Self::Lp25Hz,
            0x07 if hp_en => Self::Hp50Hz,
            0x07 => Self::Lp50Hz,
            0x08 if hp_en => Self::Hp100Hz,
            0x08 => Self::Lp100Hz,
            0x09 if hp_en => Self::Hp200Hz,
            0x09 => Self::Lp200Hz,
            0x0A if hp_en => Self::Hp400Hz,
            0x0A => Self::Lp400Hz,
            0x0B => match (vafe_en, hp_en) {
                (true, true) => Self::VafeHp800Hz,
                (true, false) => Self::VafeLp3200Hz,
                (false, true) => Self::Hp800Hz,
                (false, false) => Self::Lp800Hz,
            },
            0x0E => Self::TrigPin,
            0x0F => Self::TrigSw,
            _ => Self::Off,
        }
    }

    /// Returns the rate in milli-hertz (0 for off and triggered modes).
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::Off | Self::TrigPin | Self::TrigSw => 0,
            Self::Ulp1Hz6 => 1_600,
            Self::Ulp3Hz => 3_000,
            Self::Ulp25Hz | Self::Lp25Hz | Self::Hp25Hz => 25_000,
            Self::Lp6Hz | Self::Hp6Hz => 6_000,
            Self::Lp12Hz5 | Self::Hp12Hz5 => 12_500,
            Self::Lp50Hz | Self::Hp50Hz => 50_000,
            Self::Lp100Hz | Self::Hp100Hz => 100_000,
            Self::Lp200Hz | Self::Hp200Hz => 200_000,
            Self::Lp400Hz | Self::Hp400Hz => 400_000,
            Self::Lp800Hz | Self::Hp800Hz | Self::VafeHp800Hz => 800_000,
            Self::VafeLp3200Hz => 3_200_000,
        }
    }

    /// Power mode of a continuous rate; `None` for off and triggered modes.
    pub const fn power_mode(self) -> Option<PowerMode> {
        match self {
            Self::Off | Self::TrigPin | Self::TrigSw => None,
            Self::Ulp1Hz6 | Self::Ulp3Hz | Self::Ulp25Hz => Some(PowerMode::UltraLowPower),
            Self::Lp6Hz
            | Self::Lp12Hz5
            | Self::Lp25Hz
            | Self::Lp50Hz
            | Self::Lp100Hz
            | Self::Lp200Hz
            | Self::Lp400Hz
            | Self::Lp800Hz
            | Self::VafeLp3200Hz => Some(PowerMode::LowPower),
            Self::Hp6Hz
            | Self::Hp12Hz5
            | Self::Hp25Hz
            | Self::Hp50Hz
            | Self::Hp100Hz
            | Self::Hp200Hz
            | Self::Hp400Hz
            | Self::Hp800Hz
            | Self::VafeHp800Hz => Some(PowerMode::HighPerformance),
        }
    }

    /// Snaps a requested rate up to the next rate available in `power`.
    pub const fn quantize(hz_milli: u32, power: PowerMode) -> Self {
        match power {
            PowerMode::UltraLowPower => match hz_milli {
                0..=1_600 => Self::Ulp1Hz6,
                1_601..=3_000 => Self::Ulp3Hz,
                _ => Self::Ulp25Hz,
            },
            PowerMode::LowPower => match hz_milli {
                0..=6_000 => Self::Lp6Hz,
                6_001..=12_500 => Self::Lp12Hz5,
                12_501..=25_000 => Self::Lp25Hz,
                25_001..=50_000 => Self::Lp50Hz,
                50_001..=100_000 => Self::Lp100Hz,
                100_001..=200_000 => Self::Lp200Hz,
                200_001..=400_000 => Self::Lp400Hz,
                _ => Self::Lp800Hz,
            },
            PowerMode::HighPerformance => match hz_milli {
                0..=6_000 => Self::Hp6Hz,
                6_001..=12_500 => Self::Hp12Hz5,
                12_501..=25_000 => Self::Hp25Hz,
                25_001..=50_000 => Self::Hp50Hz,
                50_001..=100_000 => Self::Hp100Hz,
                100_001..=200_000 => Self::Hp200Hz,
                200_001..=400_000 => Self::Hp400Hz,
                _ => Self::Hp800Hz,
            },
        }
    }

    /// Low-power rates below 50 Hz, which carry a dedicated filter selection.
    pub(crate) const fn is_low_rate_lp(self) -> bool {
        matches!(self, Self::Lp6Hz | Self::Lp12Hz5 | Self::Lp25Hz)
    }
}

/// Accelerometer full scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2 g.
    G2,
    /// ±4 g.
    G4,
    /// ±8 g.
    G8,
    /// ±16 g.
    G16,
}

impl AccelFullScale {
    /// Snaps a requested full scale up to the next supported range.
    pub const fn from_g(g: u16) -> Self {
        match g {
            0..=2 => Self::G2,
            3..=4 => Self::G4,
            5..=8 => Self::G8,
            _ => Self::G16,
        }
    }

    /// Returns the range in g.
    pub const fn g(self) -> u16 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::G2 => 0,
            Self::G4 => 1,
            Self::G8 => 2,
            Self::G16 => 3,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }
}

/// CTRL5 anti-aliasing bandwidth selection.
///
/// For the 6 / 12.5 / 25 Hz low-power rates the same codes select the fixed
/// LP filters instead: `OdrDiv4` is 12.5 Hz, `OdrDiv8` 6 Hz and `OdrDiv16`
/// 3 Hz; `OdrDiv2` is not accepted there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelBandwidth {
    /// ODR/2.
    OdrDiv2,
    /// ODR/4 (LP 12.5 Hz on low LP rates).
    OdrDiv4,
    /// ODR/8 (LP 6 Hz on low LP rates).
    OdrDiv8,
    /// ODR/16 (LP 3 Hz on low LP rates).
    OdrDiv16,
}

impl AccelBandwidth {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::OdrDiv2 => 0,
            Self::OdrDiv4 => 1,
            Self::OdrDiv8 => 2,
            Self::OdrDiv16 => 3,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::OdrDiv2,
            1 => Self::OdrDiv4,
            2 => Self::OdrDiv8,
            _ => Self::OdrDiv16,
        }
    }
}

/// Accelerometer operating mode written to CTRL5 / CTRL3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelMode {
    /// Output data rate.
    pub odr: AccelOdr,
    /// Full scale.
    pub full_scale: AccelFullScale,
    /// Anti-aliasing bandwidth.
    pub bandwidth: AccelBandwidth,
}

impl AccelMode {
    /// Default mode (off, ±2 g, ODR/2).
    pub const DEFAULT: Self = Self {
        odr: AccelOdr::Off,
        full_scale: AccelFullScale::G2,
        bandwidth: AccelBandwidth::OdrDiv2,
    };

    /// Creates the default mode.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the output data rate.
    #[must_use]
    pub const fn with_odr(mut self, odr: AccelOdr) -> Self {
        self.odr = odr;
        self
    }

    /// Sets the full scale.
    #[must_use]
    pub const fn with_full_scale(mut self, full_scale: AccelFullScale) -> Self {
        self.full_scale = full_scale;
        self
    }

    /// Sets the bandwidth.
    #[must_use]
    pub const fn with_bandwidth(mut self, bandwidth: AccelBandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Same mode at a new rate; low LP rates get a valid filter selection.
    pub(crate) const fn retuned(self, odr: AccelOdr) -> Self {
        let needs_lp_filter = matches!(self.bandwidth, AccelBandwidth::OdrDiv2);
        let bandwidth = if odr.is_low_rate_lp() && needs_lp_filter {
            AccelBandwidth::OdrDiv4
        } else {
            self.bandwidth
        };
        Self {
            odr,
            full_scale: self.full_scale,
            bandwidth,
        }
    }

    const fn bandwidth_bits(self) -> Result<u8, Error> {
        match self.odr {
            AccelOdr::Off | AccelOdr::Ulp1Hz6 | AccelOdr::Ulp3Hz | AccelOdr::Ulp25Hz => Ok(0),
            AccelOdr::Lp6Hz | AccelOdr::Lp12Hz5 | AccelOdr::Lp25Hz => match self.bandwidth {
                AccelBandwidth::OdrDiv2 => Err(Error::InvalidData),
                bandwidth => Ok(bandwidth.bits()),
            },
            _ => Ok(self.bandwidth.bits()),
        }
    }

    /// Merges the mode into the current CTRL5 / CTRL3 values.
    pub(crate) const fn apply(self, ctrl5_reg: u8, ctrl3_reg: u8) -> Result<(u8, u8), Error> {
        let bw = match self.bandwidth_bits() {
            Ok(bw) => bw,
            Err(err) => return Err(err),
        };
        let odr_bits = self.odr.code() & 0x0F;
        let reg5 = with_field(ctrl5_reg, ctrl5::ODR_MASK, ctrl5::ODR_SHIFT, odr_bits);
        let reg5 = with_field(reg5, ctrl5::FS_MASK, ctrl5::FS_SHIFT, self.full_scale.bits());
        let reg5 = with_field(reg5, ctrl5::BW_MASK, ctrl5::BW_SHIFT, bw);
        let reg3 = with_flag(ctrl3_reg, ctrl3::HP_EN, self.odr.high_performance());
        Ok((reg5, reg3))
    }

    pub(crate) const fn from_regs(ctrl5_reg: u8, ctrl3_reg: u8, vafe_en: bool) -> Self {
        let hp_en = (ctrl3_reg & ctrl3::HP_EN) != 0;
        Self {
            odr: AccelOdr::from_regs(
                field(ctrl5_reg, ctrl5::ODR_MASK, ctrl5::ODR_SHIFT),
                hp_en,
                vafe_en,
            ),
            full_scale: AccelFullScale::from_bits(field(
                ctrl5_reg,
                ctrl5::FS_MASK,
                ctrl5::FS_SHIFT,
            )),
            bandwidth: AccelBandwidth::from_bits(field(
                ctrl5_reg,
                ctrl5::BW_MASK,
                ctrl5::BW_SHIFT,
            )),
        }
    }
}

impl Default for AccelMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_per_power_mode() {
        assert_eq!(AccelOdr::quantize(1_600, PowerMode::UltraLowPower), AccelOdr::Ulp1Hz6);
        assert_eq!(AccelOdr::quantize(1_601, PowerMode::UltraLowPower), AccelOdr::Ulp3Hz);
        assert_eq!(AccelOdr::quantize(4_000, PowerMode::UltraLowPower), AccelOdr::Ulp25Hz);
        assert_eq!(AccelOdr::quantize(12_500, PowerMode::LowPower), AccelOdr::Lp12Hz5);
        assert_eq!(AccelOdr::quantize(400_001, PowerMode::LowPower), AccelOdr::Lp800Hz);
        assert_eq!(AccelOdr::quantize(60_000, PowerMode::HighPerformance), AccelOdr::Hp100Hz);
    }

    #[test]
    fn high_performance_rates_set_hp_en() {
        let mode = AccelMode::new()
            .with_odr(AccelOdr::Hp200Hz)
            .with_full_scale(AccelFullScale::G8)
            .with_bandwidth(AccelBandwidth::OdrDiv8);
        let (reg5, reg3) = mode.apply(0, ctrl3::ST_SIGN_X).expect("apply");
        assert_eq!(reg5, 0b1001_1010);
        assert_eq!(reg3, ctrl3::ST_SIGN_X | ctrl3::HP_EN);
        assert_eq!(AccelMode::from_regs(reg5, reg3, false), mode);

        let (_, reg3) = mode.with_odr(AccelOdr::Lp200Hz).apply(0, reg3).expect("apply");
        assert_eq!(reg3, ctrl3::ST_SIGN_X);
    }

    #[test]
    fn ultra_low_power_forces_zero_bandwidth() {
        let mode = AccelMode::new()
            .with_odr(AccelOdr::Ulp25Hz)
            .with_bandwidth(AccelBandwidth::OdrDiv16);
        let (reg5, _) = mode.apply(0, 0).expect("apply");
        assert_eq!(reg5, 0b0011_0000);
    }

    #[test]
    fn low_rate_lp_rejects_odr_div2() {
        let mode = AccelMode::new().with_odr(AccelOdr::Lp6Hz);
        assert_eq!(mode.apply(0, 0), Err(Error::InvalidData));

        let retuned = mode.retuned(AccelOdr::Lp12Hz5);
        assert_eq!(retuned.bandwidth, AccelBandwidth::OdrDiv4);
        assert!(retuned.apply(0, 0).is_ok());
    }

    #[test]
    fn nibble_0xb_depends_on_vafe_enable() {
        assert_eq!(AccelOdr::from_regs(0x0B, true, true), AccelOdr::VafeHp800Hz);
        assert_eq!(AccelOdr::from_regs(0x0B, false, true), AccelOdr::VafeLp3200Hz);
        assert_eq!(AccelOdr::from_regs(0x0B, false, false), AccelOdr::Lp800Hz);
        assert_eq!(AccelOdr::from_regs(0x0C, false, false), AccelOdr::Off);
        assert_eq!(AccelOdr::from_regs(0x0F, false, false), AccelOdr::TrigSw);
    }

    #[test]
    fn full_scale_snaps_up() {
        assert_eq!(AccelFullScale::from_g(3), AccelFullScale::G4);
        assert_eq!(AccelFullScale::from_g(9), AccelFullScale::G16);
        assert_eq!(AccelFullScale::G8.g(), 8);
    }
}
