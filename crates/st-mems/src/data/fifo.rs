//! FIFO configuration and status helpers.

use crate::error::Error;
use crate::register::lps22hh::fifo_status2;
use crate::register::lps33::fifo_status;
use crate::register::st1vafe3bx::{ctrl4, fifo_batch_dec, fifo_ctrl, fifo_status1, fifo_wtm};
use crate::register::{field, with_field, with_flag};

/// Pressure FIFO status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus {
    /// Number of unread samples.
    pub level: u8,
    /// Watermark reached.
    pub watermark: bool,
    /// FIFO is full.
    pub full: bool,
    /// At least one sample was overwritten.
    pub overrun: bool,
}

impl FifoStatus {
    /// Decodes FIFO_STATUS1 (level) and FIFO_STATUS2 (flags) of the LPS22 parts.
    pub(crate) const fn from_lps22(status1: u8, status2: u8) -> Self {
        Self {
            level: status1,
            watermark: (status2 & fifo_status2::WTM) != 0,
            full: (status2 & fifo_status2::FULL) != 0,
            overrun: (status2 & fifo_status2::OVR) != 0,
        }
    }

    /// Decodes the LPS33HW FIFO_STATUS register.
    ///
    /// The part has no full flag; a level of 32 is reported as full.
    pub(crate) const fn from_lps33(status: u8) -> Self {
        let level = status & fifo_status::FSS_MASK;
        Self {
            level,
            watermark: (status & fifo_status::FTH_FIFO) != 0,
            full: level >= fifo_status::FULL_LEVEL,
            overrun: (status & fifo_status::OVR) != 0,
        }
    }

    /// Returns true if any flag is set.
    pub const fn any(self) -> bool {
        self.watermark || self.full || self.overrun
    }
}

/// ST1VAFE3BX FIFO operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VafeFifoMode {
    /// FIFO enabled, bypass.
    Bypass,
    /// Fill until full, then stop.
    Fifo,
    /// Stream until trigger, then FIFO.
    StreamToFifo,
    /// Bypass until trigger, then stream.
    BypassToStream,
    /// Continuous, oldest overwritten.
    Stream,
    /// Bypass until trigger, then FIFO.
    BypassToFifo,
    /// FIFO disabled (CTRL4.fifo_en = 0).
    Off,
}

impl VafeFifoMode {
    const fn bits(self) -> u8 {
        match self {
            Self::Bypass => 0,
            Self::Fifo => 1,
            Self::StreamToFifo => 3,
            Self::BypassToStream => 4,
            Self::Stream => 6,
            Self::BypassToFifo => 7,
            Self::Off => 0,
        }
    }

    const fn from_bits(bits: u8) -> Result<Self, Error> {
        match bits {
            0 => Ok(Self::Bypass),
            1 => Ok(Self::Fifo),
            3 => Ok(Self::StreamToFifo),
            4 => Ok(Self::BypassToStream),
            6 => Ok(Self::Stream),
            7 => Ok(Self::BypassToFifo),
            _ => Err(Error::InvalidData),
        }
    }
}

/// FIFO depth: one 7-byte record per sample, or two 8-bit samples per record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoStore {
    /// 1X depth.
    Fifo1x,
    /// 2X depth (8-bit accelerometer samples).
    Fifo2x,
}

/// Timestamp batching decimation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimestampDecimation {
    /// No timestamp in FIFO.
    Off,
    /// Every batched sample.
    Every1,
    /// Every 8th batched sample.
    Every8,
    /// Every 32nd batched sample.
    Every32,
}

impl TimestampDecimation {
    const fn bits(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Every1 => 1,
            Self::Every8 => 2,
            Self::Every32 => 3,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Off,
            1 => Self::Every1,
            2 => Self::Every8,
            _ => Self::Every32,
        }
    }
}

/// Accelerometer batch data rate relative to the ODR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatchRate {
    /// Same as ODR.
    Odr,
    /// ODR / 2.
    OdrDiv2,
    /// ODR / 4.
    OdrDiv4,
    /// ODR / 8.
    OdrDiv8,
    /// ODR / 16.
    OdrDiv16,
    /// ODR / 32.
    OdrDiv32,
    /// ODR / 64.
    OdrDiv64,
    /// Accelerometer not batched.
    Off,
}

impl BatchRate {
    const fn bits(self) -> u8 {
        match self {
            Self::Odr => 0,
            Self::OdrDiv2 => 1,
            Self::OdrDiv4 => 2,
            Self::OdrDiv8 => 3,
            Self::OdrDiv16 => 4,
            Self::OdrDiv32 => 5,
            Self::OdrDiv64 => 6,
            Self::Off => 7,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Odr,
            1 => Self::OdrDiv2,
            2 => Self::OdrDiv4,
            3 => Self::OdrDiv8,
            4 => Self::OdrDiv16,
            5 => Self::OdrDiv32,
            6 => Self::OdrDiv64,
            _ => Self::Off,
        }
    }
}

/// ST1VAFE3BX FIFO configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VafeFifoConfig {
    /// FIFO operation.
    pub operation: VafeFifoMode,
    /// FIFO depth.
    pub store: FifoStore,
    /// Store accelerometer data only (16-bit) instead of 12-bit XL + vAFE.
    pub xl_only: bool,
    /// Watermark in records (0 leaves the current watermark untouched).
    pub watermark: u8,
    /// Insert a configuration-change record when ODR/BDR changes.
    pub cfg_change_in_fifo: bool,
    /// Timestamp decimation; `Off` leaves batching untouched.
    pub timestamp_decimation: TimestampDecimation,
    /// Accelerometer batch rate, written together with the decimation.
    pub batch_rate: BatchRate,
}

/// Registers touched by a FIFO configuration, in write order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct VafeFifoRegs {
    pub(crate) batch_dec: u8,
    pub(crate) wtm: u8,
    pub(crate) fifo_ctrl: u8,
    pub(crate) ctrl4: u8,
}

impl VafeFifoConfig {
    /// Largest watermark the FTH field holds.
    pub const MAX_WATERMARK: u8 = 127;

    /// Default FIFO configuration (bypass, 1X, no watermark).
    pub const DEFAULT: Self = Self {
        operation: VafeFifoMode::Bypass,
        store: FifoStore::Fifo1x,
        xl_only: false,
        watermark: 0,
        cfg_change_in_fifo: false,
        timestamp_decimation: TimestampDecimation::Off,
        batch_rate: BatchRate::Odr,
    };

    /// Creates a FIFO configuration with the given operation and watermark.
    pub const fn new(operation: VafeFifoMode, watermark: u8) -> Self {
        Self {
            operation,
            watermark,
            ..Self::DEFAULT
        }
    }

    /// Sets the FIFO operation.
    #[must_use]
    pub const fn with_operation(mut self, operation: VafeFifoMode) -> Self {
        self.operation = operation;
        self
    }

    /// Sets the FIFO depth.
    #[must_use]
    pub const fn with_store(mut self, store: FifoStore) -> Self {
        self.store = store;
        self
    }

    /// Selects accelerometer-only records.
    #[must_use]
    pub const fn with_xl_only(mut self, xl_only: bool) -> Self {
        self.xl_only = xl_only;
        self
    }

    /// Sets the watermark level.
    #[must_use]
    pub const fn with_watermark(mut self, watermark: u8) -> Self {
        self.watermark = watermark;
        self
    }

    /// Records configuration changes in the FIFO.
    #[must_use]
    pub const fn with_cfg_change(mut self, enable: bool) -> Self {
        self.cfg_change_in_fifo = enable;
        self
    }

    /// Sets timestamp decimation and accelerometer batch rate.
    #[must_use]
    pub const fn with_batching(
        mut self,
        timestamp_decimation: TimestampDecimation,
        batch_rate: BatchRate,
    ) -> Self {
        self.timestamp_decimation = timestamp_decimation;
        self.batch_rate = batch_rate;
        self
    }

    /// Merges the configuration into the current register values.
    pub(crate) const fn apply(
        self,
        current: VafeFifoRegs,
        vafe_enabled: bool,
    ) -> Result<VafeFifoRegs, Error> {
        if self.watermark > Self::MAX_WATERMARK {
            return Err(Error::InvalidData);
        }
        let mut regs = current;

        if matches!(self.operation, VafeFifoMode::Off) {
            regs.ctrl4 &= !ctrl4::FIFO_EN;
        } else {
            regs.ctrl4 |= ctrl4::FIFO_EN;
            regs.fifo_ctrl = (regs.fifo_ctrl & !fifo_ctrl::FIFO_MODE_MASK)
                | (self.operation.bits() & fifo_ctrl::FIFO_MODE_MASK);
            regs.fifo_ctrl = with_flag(regs.fifo_ctrl, fifo_ctrl::FIFO_EN_ADV, vafe_enabled);
        }

        regs.fifo_ctrl = with_flag(
            regs.fifo_ctrl,
            fifo_ctrl::FIFO_DEPTH,
            matches!(self.store, FifoStore::Fifo2x),
        );
        regs.wtm = with_flag(regs.wtm, fifo_wtm::XL_ONLY_FIFO, self.xl_only);

        if !matches!(self.timestamp_decimation, TimestampDecimation::Off) {
            regs.batch_dec = with_field(
                regs.batch_dec,
                fifo_batch_dec::DEC_TS_BATCH_MASK,
                fifo_batch_dec::DEC_TS_BATCH_SHIFT,
                self.timestamp_decimation.bits(),
            );
            regs.batch_dec = (regs.batch_dec & !fifo_batch_dec::BDR_XL_MASK)
                | (self.batch_rate.bits() & fifo_batch_dec::BDR_XL_MASK);
        }

        regs.fifo_ctrl = with_flag(regs.fifo_ctrl, fifo_ctrl::CFG_CHG_EN, self.cfg_change_in_fifo);

        if self.watermark > 0 {
            regs.fifo_ctrl |= fifo_ctrl::STOP_ON_FTH;
            regs.wtm = (regs.wtm & !fifo_wtm::FTH_MASK) | (self.watermark & fifo_wtm::FTH_MASK);
        }
        Ok(regs)
    }

    /// Decodes the configuration currently held by the device.
    pub(crate) const fn from_regs(regs: VafeFifoRegs) -> Result<Self, Error> {
        let operation = if (regs.ctrl4 & ctrl4::FIFO_EN) == 0 {
            VafeFifoMode::Off
        } else {
            match VafeFifoMode::from_bits(regs.fifo_ctrl & fifo_ctrl::FIFO_MODE_MASK) {
                Ok(mode) => mode,
                Err(e) => return Err(e),
            }
        };
        Ok(Self {
            operation,
            store: if (regs.fifo_ctrl & fifo_ctrl::FIFO_DEPTH) != 0 {
                FifoStore::Fifo2x
            } else {
                FifoStore::Fifo1x
            },
            xl_only: (regs.wtm & fifo_wtm::XL_ONLY_FIFO) != 0,
            watermark: regs.wtm & fifo_wtm::FTH_MASK,
            cfg_change_in_fifo: (regs.fifo_ctrl & fifo_ctrl::CFG_CHG_EN) != 0,
            timestamp_decimation: TimestampDecimation::from_bits(field(
                regs.batch_dec,
                fifo_batch_dec::DEC_TS_BATCH_MASK,
                fifo_batch_dec::DEC_TS_BATCH_SHIFT,
            )),
            batch_rate: BatchRate::from_bits(regs.batch_dec & fifo_batch_dec::BDR_XL_MASK),
        })
    }
}

impl Default for VafeFifoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// ST1VAFE3BX FIFO status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VafeFifoStatus {
    /// Number of unread records.
    pub level: u8,
    /// Watermark reached.
    pub watermark: bool,
    /// FIFO overrun.
    pub overrun: bool,
}

impl VafeFifoStatus {
    pub(crate) const fn from_regs(status1: u8, status2: u8) -> Self {
        Self {
            level: status2,
            watermark: (status1 & fifo_status1::FIFO_WTM_IA) != 0,
            overrun: (status1 & fifo_status1::FIFO_OVR_IA) != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lps22_status_splits_level_and_flags() {
        let status = FifoStatus::from_lps22(17, fifo_status2::WTM | fifo_status2::OVR);
        assert_eq!(status.level, 17);
        assert!(status.watermark);
        assert!(status.overrun);
        assert!(!status.full);
    }

    #[test]
    fn lps33_reports_full_at_32_samples() {
        let status = FifoStatus::from_lps33(0b1010_0000);
        assert_eq!(status.level, 32);
        assert!(status.full);
        assert!(status.watermark);
        assert!(!FifoStatus::from_lps33(31).full);
        assert!(!FifoStatus::from_lps33(0).any());
    }

    #[test]
    fn stream_config_sets_enable_mode_and_watermark() {
        let config = VafeFifoConfig::new(VafeFifoMode::Stream, 10).with_cfg_change(true);
        let regs = config.apply(VafeFifoRegs::default(), true).expect("apply");
        assert_eq!(regs.ctrl4, ctrl4::FIFO_EN);
        assert_eq!(
            regs.fifo_ctrl,
            6 | fifo_ctrl::FIFO_EN_ADV | fifo_ctrl::CFG_CHG_EN | fifo_ctrl::STOP_ON_FTH
        );
        assert_eq!(regs.wtm, 10);
        assert_eq!(regs.batch_dec, 0);
        assert_eq!(VafeFifoConfig::from_regs(regs), Ok(config));
    }

    #[test]
    fn off_keeps_mode_bits_and_zero_watermark_keeps_threshold() {
        let current = VafeFifoRegs {
            batch_dec: 0,
            wtm: 0x20,
            fifo_ctrl: 0x01,
            ctrl4: ctrl4::FIFO_EN | ctrl4::BDU,
        };
        let regs = VafeFifoConfig::new(VafeFifoMode::Off, 0)
            .apply(current, false)
            .expect("apply");
        assert_eq!(regs.ctrl4, ctrl4::BDU);
        assert_eq!(regs.fifo_ctrl, 0x01);
        assert_eq!(regs.wtm, 0x20);
    }

    #[test]
    fn batching_written_only_with_timestamp_decimation() {
        let current = VafeFifoRegs {
            batch_dec: 0x07,
            ..VafeFifoRegs::default()
        };
        let plain = VafeFifoConfig::DEFAULT.with_batching(TimestampDecimation::Off, BatchRate::Odr);
        assert_eq!(plain.apply(current, false).map(|r| r.batch_dec), Ok(0x07));

        let batched = VafeFifoConfig::DEFAULT
            .with_batching(TimestampDecimation::Every8, BatchRate::OdrDiv4)
            .with_store(FifoStore::Fifo2x)
            .with_xl_only(true);
        let regs = batched.apply(current, false).expect("apply");
        assert_eq!(regs.batch_dec, (2 << 3) | 2);
        assert_eq!(regs.wtm, fifo_wtm::XL_ONLY_FIFO);
        assert_ne!(regs.fifo_ctrl & fifo_ctrl::FIFO_DEPTH, 0);
    }

    #[test]
    fn watermark_over_capacity_is_rejected() {
        let config = VafeFifoConfig::new(VafeFifoMode::Fifo, 128);
        assert_eq!(
            config.apply(VafeFifoRegs::default(), false),
            Err(Error::InvalidData)
        );
    }

    #[test]
    fn vafe_status_reads_level_from_status2() {
        let status = VafeFifoStatus::from_regs(fifo_status1::FIFO_WTM_IA, 42);
        assert_eq!(status.level, 42);
        assert!(status.watermark);
        assert!(!status.overrun);
    }
}
