use crate::error::Error;
use crate::register::lps33::ctrl_reg1;
use crate::register::{field, with_field};

/// LPS33HW / LPS33K output data rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lps33Odr {
    /// Power-down / one-shot.
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
}

impl Lps33Odr {
    /// Snaps a requested rate up to the next supported continuous rate.
    pub const fn from_hz_milli(hz_milli: u32) -> Self {
        match hz_milli {
            0..=1_000 => Self::Hz1,
            1_001..=10_000 => Self::Hz10,
            10_001..=25_000 => Self::Hz25,
            25_001..=50_000 => Self::Hz50,
            _ => Self::Hz75,
        }
    }

    /// Returns the rate in milli-hertz (0 for power-down).
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::PowerDown => 0,
            Self::Hz1 => 1_000,
            Self::Hz10 => 10_000,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz75 => 75_000,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::PowerDown => 0,
            Self::Hz1 => 1,
            Self::Hz10 => 2,
            Self::Hz25 => 3,
            Self::Hz50 => 4,
            Self::Hz75 => 5,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Result<Self, Error> {
        match bits {
            0 => Ok(Self::PowerDown),
            1 => Ok(Self::Hz1),
            2 => Ok(Self::Hz10),
            3 => Ok(Self::Hz25),
            4 => Ok(Self::Hz50),
            5 => Ok(Self::Hz75),
            _ => Err(Error::InvalidData),
        }
    }

    pub(crate) const fn apply(self, reg: u8) -> u8 {
        with_field(reg, ctrl_reg1::ODR_MASK, ctrl_reg1::ODR_SHIFT, self.bits())
    }

    pub(crate) const fn from_ctrl_reg1(reg: u8) -> Result<Self, Error> {
        Self::from_bits(field(reg, ctrl_reg1::ODR_MASK, ctrl_reg1::ODR_SHIFT))
    }
}

/// LPS33 low-pass filter; same CTRL_REG1 encoding as the LPS22HH family.
pub type Lps33LowPassFilter = super::lps22hh::Lps22hhLowPassFilter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odr_tops_out_at_75_hz() {
        assert_eq!(Lps33Odr::from_hz_milli(0), Lps33Odr::Hz1);
        assert_eq!(Lps33Odr::from_hz_milli(50_001), Lps33Odr::Hz75);
        assert_eq!(Lps33Odr::from_hz_milli(200_000), Lps33Odr::Hz75);
    }

    #[test]
    fn reserved_odr_codes_are_rejected() {
        assert_eq!(Lps33Odr::from_ctrl_reg1(0b0101_0010), Ok(Lps33Odr::Hz75));
        assert_eq!(Lps33Odr::from_ctrl_reg1(0b0110_0000), Err(Error::InvalidData));
        assert_eq!(Lps33Odr::Hz25.apply(0b0111_0011), 0b0011_0011);
    }
}
