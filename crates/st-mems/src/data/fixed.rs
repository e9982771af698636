//! Fixed-point conversion helpers.

use super::scale::{
    accel_ug_per_lsb, pressure_lsb_per_hpa, temperature_lsb_per_celsius, vafe_lsb_per_mv,
};
use super::{AccelRaw, PressureRaw, TemperatureRaw, VafeRaw};
use crate::config::AccelFullScale;

/// Fixed-point number type used for sensor conversions (I32F32).
pub type Fixed = crate::fixed_crate::types::I32F32;

/// Fixed-point accelerometer sample in g.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccelFixed {
    /// X-axis acceleration in g.
    pub x: Fixed,
    /// Y-axis acceleration in g.
    pub y: Fixed,
    /// Z-axis acceleration in g.
    pub z: Fixed,
}

/// Converts pressure raw counts to hPa.
pub fn pressure_hpa(raw: PressureRaw) -> Fixed {
    Fixed::from_num(raw.value) / Fixed::from_num(pressure_lsb_per_hpa())
}

/// Converts temperature raw counts to degrees Celsius.
pub fn temperature_celsius(raw: TemperatureRaw) -> Fixed {
    Fixed::from_num(raw.value) / Fixed::from_num(temperature_lsb_per_celsius())
}

/// Converts accelerometer raw counts to g.
pub fn accel_to_g(raw: AccelRaw, full_scale: AccelFullScale) -> AccelFixed {
    let ug = Fixed::from_num(accel_ug_per_lsb(full_scale));
    let per_g = Fixed::from_num(1_000_000);
    AccelFixed {
        x: Fixed::from_num(raw.x) * ug / per_g,
        y: Fixed::from_num(raw.y) * ug / per_g,
        z: Fixed::from_num(raw.z) * ug / per_g,
    }
}

/// Converts vAFE raw counts to millivolts.
pub fn vafe_mv(raw: VafeRaw) -> Fixed {
    Fixed::from_num(raw.value) / Fixed::from_num(vafe_lsb_per_mv())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_and_temperature_conversions() {
        assert_eq!(pressure_hpa(PressureRaw { value: 4_096 }), Fixed::from_num(1));
        assert_eq!(
            temperature_celsius(TemperatureRaw { value: -250 }),
            Fixed::from_num(-2.5)
        );
    }

    #[test]
    fn accel_conversion_matches_sensitivity() {
        let raw = AccelRaw {
            x: 1_000,
            y: -1_000,
            z: 0,
        };
        let fixed = accel_to_g(raw, AccelFullScale::G16);
        let tolerance = Fixed::from_num(0.000_001);
        assert!((fixed.x - Fixed::from_num(0.488)).abs() < tolerance);
        assert!((fixed.y + Fixed::from_num(0.488)).abs() < tolerance);
        assert_eq!(fixed.z, Fixed::from_num(0));
    }

    #[test]
    fn vafe_conversion_matches_sensitivity() {
        assert_eq!(vafe_mv(VafeRaw { value: 1_311 }), Fixed::from_num(1));
    }
}
