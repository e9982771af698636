//! Wake-up detection threshold and duration encoding (ST1VAFE3BX).

use crate::config::AccelFullScale;
use crate::error::Error;

/// Encoded wake-up threshold: WAKE_UP_THS.wk_ths plus INTERRUPT_CFG.wake_ths_w.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeUpThreshold {
    /// Fine step selected (FS / 256 instead of FS / 64).
    pub fine: bool,
    /// Threshold in steps (0..=63).
    pub steps: u8,
}

impl WakeUpThreshold {
    /// Largest step count the register holds.
    pub const MAX_STEPS: u8 = 63;

    /// Encodes a threshold in mg for the given full scale.
    ///
    /// The fine step is used while it can represent the value, then the
    /// coarse step; anything above the coarse range saturates at 63 steps.
    pub const fn from_mg(mg: u32, full_scale: AccelFullScale) -> Self {
        // Steps in 1/16 mg: 7.8125 mg fine and 31.25 mg coarse at 2 g.
        let fine_step = 125u64 << full_scale.bits();
        let coarse_step = 500u64 << full_scale.bits();
        let mg = mg as u64;

        if mg < fine_step * Self::MAX_STEPS as u64 / 16 {
            Self {
                fine: true,
                steps: (mg * 16 / fine_step) as u8,
            }
        } else if mg < coarse_step * Self::MAX_STEPS as u64 / 16 {
            Self {
                fine: false,
                steps: (mg * 16 / coarse_step) as u8,
            }
        } else {
            Self {
                fine: false,
                steps: Self::MAX_STEPS,
            }
        }
    }
}

/// Encoded wake-up duration: WAKE_UP_DUR.wake_dur plus WAKE_UP_DUR_EXT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeUpDuration {
    /// Extended duration range.
    pub extended: bool,
    /// wake_dur field (0..=3).
    pub code: u8,
}

impl WakeUpDuration {
    /// Encodes a duration in ODR cycles; accepted values are 0, 1, 2, 3, 7, 11 and 15.
    pub const fn from_samples(samples: u8) -> Result<Self, Error> {
        let (extended, code) = match samples {
            0..=2 => (false, samples),
            3 => (true, 0),
            7 => (true, 1),
            11 => (true, 2),
            15 => (true, 3),
            _ => return Err(Error::InvalidData),
        };
        Ok(Self { extended, code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_switches_from_fine_to_coarse_step() {
        let fs = AccelFullScale::G2;
        assert_eq!(
            WakeUpThreshold::from_mg(63, fs),
            WakeUpThreshold { fine: true, steps: 8 }
        );
        assert_eq!(
            WakeUpThreshold::from_mg(491, fs),
            WakeUpThreshold { fine: true, steps: 62 }
        );
        assert_eq!(
            WakeUpThreshold::from_mg(492, fs),
            WakeUpThreshold { fine: false, steps: 15 }
        );
        assert_eq!(
            WakeUpThreshold::from_mg(1_969, fs),
            WakeUpThreshold { fine: false, steps: 63 }
        );
    }

    #[test]
    fn threshold_steps_scale_with_full_scale() {
        assert_eq!(
            WakeUpThreshold::from_mg(500, AccelFullScale::G16),
            WakeUpThreshold { fine: true, steps: 8 }
        );
        assert_eq!(
            WakeUpThreshold::from_mg(4_000, AccelFullScale::G16),
            WakeUpThreshold { fine: false, steps: 16 }
        );
        assert_eq!(
            WakeUpThreshold::from_mg(0, AccelFullScale::G8),
            WakeUpThreshold { fine: true, steps: 0 }
        );
    }

    #[test]
    fn duration_accepts_only_listed_values() {
        assert_eq!(
            WakeUpDuration::from_samples(2),
            Ok(WakeUpDuration { extended: false, code: 2 })
        );
        assert_eq!(
            WakeUpDuration::from_samples(11),
            Ok(WakeUpDuration { extended: true, code: 2 })
        );
        assert_eq!(WakeUpDuration::from_samples(4), Err(Error::InvalidData));
        assert_eq!(WakeUpDuration::from_samples(16), Err(Error::InvalidData));
    }
}
