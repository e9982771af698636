//! Accelerometer self-test configuration (ST1VAFE3BX).

use crate::register::st1vafe3bx::{ctrl3, wake_up_dur};

/// Direction of the self-test stimulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTestSign {
    /// Positive deflection on X/Y, negative on Z.
    Positive,
    /// Negative deflection on X/Y, positive on Z.
    Negative,
}

impl SelfTestSign {
    /// CTRL3 st_sign_x / st_sign_y bits.
    pub(crate) const fn ctrl3_bits(self) -> u8 {
        match self {
            Self::Positive => ctrl3::ST_SIGN_X | ctrl3::ST_SIGN_Y,
            Self::Negative => 0,
        }
    }

    /// WAKE_UP_DUR st_sign_z bit.
    pub(crate) const fn wake_up_dur_bits(self) -> u8 {
        match self {
            Self::Positive => 0,
            Self::Negative => wake_up_dur::ST_SIGN_Z,
        }
    }
}

/// Self-test phase written to AH_BIO_CFG3.st.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTestStep {
    /// First phase.
    First,
    /// Second phase.
    Second,
}

impl SelfTestStep {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_splits_across_registers() {
        assert_eq!(SelfTestSign::Positive.ctrl3_bits(), 0b11);
        assert_eq!(SelfTestSign::Positive.wake_up_dur_bits(), 0);
        assert_eq!(SelfTestSign::Negative.ctrl3_bits(), 0);
        assert_eq!(SelfTestSign::Negative.wake_up_dur_bits(), wake_up_dur::ST_SIGN_Z);
        assert_eq!(SelfTestStep::Second.bits(), 2);
    }
}
