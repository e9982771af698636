//! Register maps, one module per register-compatible family.
//!
//! Each module lists the register addresses from the datasheet plus the bit
//! masks used by the drivers. Several entries are not wired yet; they stay so
//! raw register access has names to refer to.

#![allow(dead_code)]

pub(crate) mod lps22df;
pub(crate) mod lps22hh;
pub(crate) mod lps33;
pub(crate) mod st1vafe3bx;

/// Typed register address accepted by the device core.
pub(crate) trait RegisterAddress: Copy {
    /// Returns the 8-bit register address.
    fn addr(self) -> u8;
}

macro_rules! impl_register_address {
    ($reg:ty) => {
        impl $crate::register::RegisterAddress for $reg {
            fn addr(self) -> u8 {
                self as u8
            }
        }
    };
}

pub(crate) use impl_register_address;

/// Extracts a field selected by `mask` and shifted down by `shift`.
pub(crate) const fn field(value: u8, mask: u8, shift: u8) -> u8 {
    (value & mask) >> shift
}

/// Replaces the field selected by `mask` with `bits << shift`.
pub(crate) const fn with_field(value: u8, mask: u8, shift: u8, bits: u8) -> u8 {
    (value & !mask) | ((bits << shift) & mask)
}

/// Sets or clears the bits in `mask`.
pub(crate) const fn with_flag(value: u8, mask: u8, enable: bool) -> u8 {
    if enable { value | mask } else { value & !mask }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_helpers_round_trip_masks() {
        let value = with_field(0b1000_0001, 0b0111_1000, 3, 0b1011);
        assert_eq!(value, 0b1101_1001);
        assert_eq!(field(value, 0b0111_1000, 3), 0b1011);
        assert_eq!(with_flag(0b0000_0001, 0b1000_0000, true), 0b1000_0001);
        assert_eq!(with_flag(0b1000_0001, 0b1000_0000, false), 0b0000_0001);
    }
}
