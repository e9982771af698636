//! I2C address definitions.

/// I2C addresses shared by the LPS22CH, LPS22DF, LPS27HHTW, LPS33HW and LPS33K.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureAddress {
    /// Primary address: 0x5C (SA0 = low).
    Primary,
    /// Secondary address: 0x5D (SA0 = high).
    Secondary,
}

impl PressureAddress {
    /// Returns the 7-bit I2C address.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Primary => 0x5C,
            Self::Secondary => 0x5D,
        }
    }
}

/// ST1VAFE3BX I2C addresses (0x41 / 0x43 in 8-bit notation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VafeAddress {
    /// Primary address: 0x20 (SA0 = low).
    Primary,
    /// Secondary address: 0x21 (SA0 = high).
    Secondary,
}

impl VafeAddress {
    /// Returns the 7-bit I2C address.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Primary => 0x20,
            Self::Secondary => 0x21,
        }
    }
}
