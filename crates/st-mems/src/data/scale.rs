//! Integer scaling helpers for raw sensor data.

use crate::config::AccelFullScale;

/// Ratio representing a scale factor without floating-point math.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleFactor {
    /// Scale numerator.
    pub numerator: i32,
    /// Scale denominator.
    pub denominator: i32,
}

impl ScaleFactor {
    /// Creates a new scale ratio.
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Scales `raw`, truncating toward zero. Intermediate math is 64-bit.
    pub const fn apply(self, raw: i32) -> i32 {
        if self.denominator == 0 {
            return 0;
        }
        ((raw as i64 * self.numerator as i64) / self.denominator as i64) as i32
    }
}

/// Returns the pressure sensitivity in LSB/hPa.
pub const fn pressure_lsb_per_hpa() -> i32 {
    4_096
}

/// Returns the temperature sensitivity in LSB per degree Celsius.
pub const fn temperature_lsb_per_celsius() -> i32 {
    100
}

/// Returns the accelerometer sensitivity in µg/LSB.
pub const fn accel_ug_per_lsb(full_scale: AccelFullScale) -> i32 {
    match full_scale {
        AccelFullScale::G2 => 61,
        AccelFullScale::G4 => 122,
        AccelFullScale::G8 => 244,
        AccelFullScale::G16 => 488,
    }
}

/// Returns the vAFE sensitivity in LSB/mV.
pub const fn vafe_lsb_per_mv() -> i32 {
    1_311
}

/// Returns the pressure scale in milli-hPa per LSB as a ratio.
pub const fn pressure_hpa_milli_per_lsb() -> ScaleFactor {
    ScaleFactor::new(1_000, pressure_lsb_per_hpa())
}

/// Returns the temperature scale in milli-deg C per LSB as a ratio.
pub const fn temperature_mdegc_per_lsb() -> ScaleFactor {
    ScaleFactor::new(1_000, temperature_lsb_per_celsius())
}

/// Returns the accelerometer scale in milli-g per LSB as a ratio.
pub const fn accel_mg_per_lsb(full_scale: AccelFullScale) -> ScaleFactor {
    ScaleFactor::new(accel_ug_per_lsb(full_scale), 1_000)
}
