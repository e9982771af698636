//! Raw samples and their integer conversions.

pub(crate) mod fifo;
#[cfg(feature = "fixed")]
pub(crate) mod fixed;
pub(crate) mod scale;
pub(crate) mod tag;

pub use fifo::{
    BatchRate, FifoStatus, FifoStore, TimestampDecimation, VafeFifoConfig, VafeFifoMode,
    VafeFifoStatus,
};
pub use scale::{
    ScaleFactor, accel_mg_per_lsb, accel_ug_per_lsb, pressure_hpa_milli_per_lsb,
    pressure_lsb_per_hpa, temperature_lsb_per_celsius, temperature_mdegc_per_lsb,
    vafe_lsb_per_mv,
};
pub use tag::{CfgChange, FifoRecord, FifoRecordIterator, FifoTag, FIFO_RECORD_LEN};

use crate::config::AccelFullScale;

/// Raw pressure count, sign-extended from the 24-bit output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureRaw {
    /// Two's complement count, 4096 LSB/hPa.
    pub value: i32,
}

impl PressureRaw {
    /// Decodes PRESS_OUT_XL / L / H.
    pub(crate) const fn from_le_bytes(bytes: [u8; 3]) -> Self {
        let value = i32::from_le_bytes([0, bytes[0], bytes[1], bytes[2]]) >> 8;
        Self { value }
    }

    /// Pressure in milli-hPa (Pa × 100).
    pub const fn hpa_milli(self) -> i32 {
        pressure_hpa_milli_per_lsb().apply(self.value)
    }
}

/// Raw temperature count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureRaw {
    /// Two's complement count, 100 LSB/°C.
    pub value: i16,
}

impl TemperatureRaw {
    pub(crate) const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self {
            value: i16::from_le_bytes(bytes),
        }
    }

    /// Temperature in milli-degrees Celsius.
    pub const fn mdegc(self) -> i32 {
        temperature_mdegc_per_lsb().apply(self.value as i32)
    }
}

/// Pressure and temperature captured together (FIFO entry or one-shot result).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureSample {
    /// Pressure reading.
    pub pressure: PressureRaw,
    /// Temperature reading.
    pub temperature: TemperatureRaw,
}

impl PressureSample {
    /// Decodes a PRESS_OUT + TEMP_OUT burst (5 bytes).
    pub(crate) const fn from_le_bytes(bytes: [u8; 5]) -> Self {
        Self {
            pressure: PressureRaw::from_le_bytes([bytes[0], bytes[1], bytes[2]]),
            temperature: TemperatureRaw::from_le_bytes([bytes[3], bytes[4]]),
        }
    }
}

/// Raw accelerometer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelRaw {
    /// X-axis raw count.
    pub x: i16,
    /// Y-axis raw count.
    pub y: i16,
    /// Z-axis raw count.
    pub z: i16,
}

impl AccelRaw {
    pub(crate) const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Converts to milli-g for the given full scale.
    pub const fn to_mg(self, full_scale: AccelFullScale) -> AccelMg {
        let scale = accel_mg_per_lsb(full_scale);
        AccelMg {
            x: scale.apply(self.x as i32),
            y: scale.apply(self.y as i32),
            z: scale.apply(self.z as i32),
        }
    }
}

/// Acceleration in milli-g.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelMg {
    /// X-axis.
    pub x: i32,
    /// Y-axis.
    pub y: i32,
    /// Z-axis.
    pub z: i32,
}

/// Raw vAFE (bio-potential) sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VafeRaw {
    /// Two's complement count, 1311 LSB/mV.
    pub value: i16,
}

impl VafeRaw {
    /// Potential in microvolts.
    pub const fn uv(self) -> i32 {
        ScaleFactor::new(1_000, vafe_lsb_per_mv()).apply(self.value as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_is_sign_extended_from_24_bits() {
        let raw = PressureRaw::from_le_bytes([0x00, 0x00, 0x80]);
        assert_eq!(raw.value, -8_388_608);
        let raw = PressureRaw::from_le_bytes([0x00, 0x00, 0x3F]);
        assert_eq!(raw.value, 0x3F_0000);
    }

    #[test]
    fn pressure_converts_to_milli_hpa() {
        // 1013.25 hPa = 4_150_272 LSB
        let raw = PressureRaw { value: 4_150_272 };
        assert_eq!(raw.hpa_milli(), 1_013_250);
    }

    #[test]
    fn temperature_converts_to_mdegc() {
        let sample = PressureSample::from_le_bytes([0, 0, 0, 0xC4, 0x09]);
        assert_eq!(sample.temperature.value, 2_500);
        assert_eq!(sample.temperature.mdegc(), 25_000);
        assert_eq!(TemperatureRaw { value: -150 }.mdegc(), -1_500);
    }

    #[test]
    fn accel_scales_with_full_scale() {
        let raw = AccelRaw::from_le_bytes([0x00, 0x40, 0x00, 0xC0, 0x00, 0x00]);
        assert_eq!(raw.x, 16_384);
        assert_eq!(raw.to_mg(AccelFullScale::G2).x, 999);
        assert_eq!(raw.to_mg(AccelFullScale::G16).y, -7_995);
    }

    #[test]
    fn vafe_converts_to_microvolts() {
        assert_eq!(VafeRaw { value: 1_311 }.uv(), 1_000);
    }
}
