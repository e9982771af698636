//! 6D orientation source decoding.

use crate::error::Error;
use crate::register::st1vafe3bx::sixd_src;

/// Largest accepted SIXD.d6d_ths value.
pub(crate) const MAX_6D_THRESHOLD: u8 = 3;

/// Axis-direction flags latched by the 6D detector (SIXD_SRC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// X axis low.
    pub x_low: bool,
    /// X axis high.
    pub x_high: bool,
    /// Y axis low.
    pub y_low: bool,
    /// Y axis high.
    pub y_high: bool,
    /// Z axis low.
    pub z_low: bool,
    /// Z axis high.
    pub z_high: bool,
    /// Orientation change detected.
    pub changed: bool,
}

impl Orientation {
    pub(crate) const fn from_reg(reg: u8) -> Self {
        Self {
            x_low: (reg & sixd_src::XL) != 0,
            x_high: (reg & sixd_src::XH) != 0,
            y_low: (reg & sixd_src::YL) != 0,
            y_high: (reg & sixd_src::YH) != 0,
            z_low: (reg & sixd_src::ZL) != 0,
            z_high: (reg & sixd_src::ZH) != 0,
            changed: (reg & sixd_src::D6D_IA) != 0,
        }
    }
}

pub(crate) const fn validate_6d_threshold(threshold: u8) -> Result<u8, Error> {
    if threshold > MAX_6D_THRESHOLD {
        Err(Error::InvalidData)
    } else {
        Ok(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixd_source_flags() {
        let o = Orientation::from_reg(sixd_src::ZH | sixd_src::D6D_IA);
        assert!(o.z_high && o.changed);
        assert!(!o.x_low && !o.x_high && !o.y_low && !o.y_high && !o.z_low);
    }

    #[test]
    fn threshold_tops_out_at_three() {
        assert_eq!(validate_6d_threshold(3), Ok(3));
        assert_eq!(validate_6d_threshold(4), Err(Error::InvalidData));
    }
}
