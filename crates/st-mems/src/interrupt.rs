//! Interrupt routing, pin electrical configuration and event decoding.

use embedded_hal_async::digital::Wait;

use crate::register::st1vafe3bx::{all_int_src, ctrl2, md1_cfg};

/// Interrupt pin selection (device pins).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// Interrupt pin 1.
    Int1,
    /// Interrupt pin 2.
    Int2,
}

/// FIFO event that can drive the INT pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoInterrupt {
    /// FIFO level reached the watermark.
    Threshold,
    /// FIFO is full.
    Full,
    /// FIFO overrun (oldest sample overwritten).
    Overrun,
}

/// Electrical configuration of the INT pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Drive the pin low when the interrupt is active.
    pub active_low: bool,
    /// Open-drain output instead of push-pull.
    pub open_drain: bool,
}

impl PinConfig {
    /// Default pin configuration (active high, push-pull).
    pub const DEFAULT: Self = Self {
        active_low: false,
        open_drain: false,
    };

    /// Creates the default pin configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Selects active-low polarity.
    #[must_use]
    pub const fn with_active_low(mut self, enable: bool) -> Self {
        self.active_low = enable;
        self
    }

    /// Selects an open-drain output stage.
    #[must_use]
    pub const fn with_open_drain(mut self, enable: bool) -> Self {
        self.open_drain = enable;
        self
    }

    /// Packs the flags into a register value given that chip's bit positions.
    pub(crate) const fn bits(self, active_low_mask: u8, open_drain_mask: u8) -> u8 {
        let mut value = 0;
        if self.active_low {
            value |= active_low_mask;
        }
        if self.open_drain {
            value |= open_drain_mask;
        }
        value
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// ST1VAFE3BX interrupt routing to INT (CTRL2 + MD1_CFG).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptRouting {
    /// Data ready.
    pub data_ready: bool,
    /// FIFO overrun.
    pub fifo_overrun: bool,
    /// FIFO threshold.
    pub fifo_threshold: bool,
    /// FIFO full.
    pub fifo_full: bool,
    /// Boot status.
    pub boot: bool,
    /// Embedded function events.
    pub embedded_functions: bool,
    /// Timestamp overflow.
    pub timestamp: bool,
    /// 6D orientation change.
    pub six_d: bool,
    /// Tap.
    pub tap: bool,
    /// Free-fall.
    pub free_fall: bool,
    /// Wake-up.
    pub wake_up: bool,
    /// Sleep change.
    pub sleep_change: bool,
}

impl InterruptRouting {
    /// Creates a routing with every source disabled.
    pub const fn new() -> Self {
        Self {
            data_ready: false,
            fifo_overrun: false,
            fifo_threshold: false,
            fifo_full: false,
            boot: false,
            embedded_functions: false,
            timestamp: false,
            six_d: false,
            tap: false,
            free_fall: false,
            wake_up: false,
            sleep_change: false,
        }
    }

    /// Routes data-ready.
    #[must_use]
    pub const fn with_data_ready(mut self, enable: bool) -> Self {
        self.data_ready = enable;
        self
    }

    /// Routes the FIFO threshold event.
    #[must_use]
    pub const fn with_fifo_threshold(mut self, enable: bool) -> Self {
        self.fifo_threshold = enable;
        self
    }

    /// Routes the FIFO full event.
    #[must_use]
    pub const fn with_fifo_full(mut self, enable: bool) -> Self {
        self.fifo_full = enable;
        self
    }

    /// Routes the FIFO overrun event.
    #[must_use]
    pub const fn with_fifo_overrun(mut self, enable: bool) -> Self {
        self.fifo_overrun = enable;
        self
    }

    /// Routes wake-up events.
    #[must_use]
    pub const fn with_wake_up(mut self, enable: bool) -> Self {
        self.wake_up = enable;
        self
    }

    /// Routes 6D orientation events.
    #[must_use]
    pub const fn with_six_d(mut self, enable: bool) -> Self {
        self.six_d = enable;
        self
    }

    pub(crate) const fn ctrl2_bits(self) -> u8 {
        let mut value = 0;
        if self.data_ready {
            value |= ctrl2::INT_DRDY;
        }
        if self.fifo_overrun {
            value |= ctrl2::INT_FIFO_OVR;
        }
        if self.fifo_threshold {
            value |= ctrl2::INT_FIFO_TH;
        }
        if self.fifo_full {
            value |= ctrl2::INT_FIFO_FULL;
        }
        if self.boot {
            value |= ctrl2::INT_BOOT;
        }
        value
    }

    pub(crate) const fn md1_bits(self) -> u8 {
        let mut value = 0;
        if self.embedded_functions {
            value |= md1_cfg::INT_EMB_FUNC;
        }
        if self.timestamp {
            value |= md1_cfg::INT_TIMESTAMP;
        }
        if self.six_d {
            value |= md1_cfg::INT_6D;
        }
        if self.tap {
            value |= md1_cfg::INT_TAP;
        }
        if self.free_fall {
            value |= md1_cfg::INT_FF;
        }
        if self.wake_up {
            value |= md1_cfg::INT_WU;
        }
        if self.sleep_change {
            value |= md1_cfg::INT_SLEEP_CHANGE;
        }
        value
    }
}

/// Hardware events reported by the ST1VAFE3BX.
///
/// An event only counts when it is also routed in MD1_CFG.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventStatus {
    /// Wake-up detected.
    pub wake_up: bool,
    /// 6D orientation change detected.
    pub six_d: bool,
}

impl EventStatus {
    pub(crate) const fn from_regs(md1_reg: u8, all_int_src_reg: u8) -> Self {
        Self {
            wake_up: (md1_reg & md1_cfg::INT_WU) != 0
                && (all_int_src_reg & all_int_src::WU_IA_ALL) != 0,
            six_d: (md1_reg & md1_cfg::INT_6D) != 0
                && (all_int_src_reg & all_int_src::D6D_IA_ALL) != 0,
        }
    }

    /// Returns true if any event is set.
    pub const fn any(self) -> bool {
        self.wake_up || self.six_d
    }
}

/// Error returned when waiting on an interrupt pin.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptWaitError<E> {
    /// Interrupt pin was not provided to the driver.
    Missing,
    /// Underlying pin error.
    Pin(E),
}

/// Pin condition a driver can wait for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PinLevel {
    High,
    Low,
    RisingEdge,
    FallingEdge,
    AnyEdge,
}

/// Waits on the optional INT pin held by a driver.
pub(crate) async fn wait_for_pin<P: Wait>(
    pin: Option<&mut P>,
    level: PinLevel,
) -> Result<(), InterruptWaitError<P::Error>> {
    let Some(pin) = pin else {
        return Err(InterruptWaitError::Missing);
    };
    let result = match level {
        PinLevel::High => pin.wait_for_high().await,
        PinLevel::Low => pin.wait_for_low().await,
        PinLevel::RisingEdge => pin.wait_for_rising_edge().await,
        PinLevel::FallingEdge => pin.wait_for_falling_edge().await,
        PinLevel::AnyEdge => pin.wait_for_any_edge().await,
    };
    result.map_err(InterruptWaitError::Pin)
}

/// INT pin accessors and wait helpers shared by every driver.
///
/// The driver type must hold the pin in an `int: Option<INT>` field.
macro_rules! impl_int_pin {
    (impl<$($gen:ident),*> for $ty:ty) => {
        impl<$($gen),*> $ty {
            /// Waits for INT to go high.
            pub async fn wait_int_high(
                &mut self,
            ) -> Result<(), $crate::interrupt::InterruptWaitError<INT::Error>>
            where
                INT: embedded_hal_async::digital::Wait,
            {
                $crate::interrupt::wait_for_pin(
                    self.int.as_mut(),
                    $crate::interrupt::PinLevel::High,
                )
                .await
            }

            /// Waits for INT to go low.
            pub async fn wait_int_low(
                &mut self,
            ) -> Result<(), $crate::interrupt::InterruptWaitError<INT::Error>>
            where
                INT: embedded_hal_async::digital::Wait,
            {
                $crate::interrupt::wait_for_pin(
                    self.int.as_mut(),
                    $crate::interrupt::PinLevel::Low,
                )
                .await
            }

            /// Waits for a rising edge on INT.
            pub async fn wait_int_rising_edge(
                &mut self,
            ) -> Result<(), $crate::interrupt::InterruptWaitError<INT::Error>>
            where
                INT: embedded_hal_async::digital::Wait,
            {
                $crate::interrupt::wait_for_pin(
                    self.int.as_mut(),
                    $crate::interrupt::PinLevel::RisingEdge,
                )
                .await
            }

            /// Waits for a falling edge on INT.
            pub async fn wait_int_falling_edge(
                &mut self,
            ) -> Result<(), $crate::interrupt::InterruptWaitError<INT::Error>>
            where
                INT: embedded_hal_async::digital::Wait,
            {
                $crate::interrupt::wait_for_pin(
                    self.int.as_mut(),
                    $crate::interrupt::PinLevel::FallingEdge,
                )
                .await
            }

            /// Waits for any edge on INT.
            pub async fn wait_int_any_edge(
                &mut self,
            ) -> Result<(), $crate::interrupt::InterruptWaitError<INT::Error>>
            where
                INT: embedded_hal_async::digital::Wait,
            {
                $crate::interrupt::wait_for_pin(
                    self.int.as_mut(),
                    $crate::interrupt::PinLevel::AnyEdge,
                )
                .await
            }

            /// Returns a reference to the INT pin, if provided.
            pub fn int(&self) -> Option<&INT> {
                self.int.as_ref()
            }

            /// Returns a mutable reference to the INT pin, if provided.
            pub fn int_mut(&mut self) -> Option<&mut INT> {
                self.int.as_mut()
            }

            /// Takes the INT pin out of the driver, leaving None.
            pub fn take_int(&mut self) -> Option<INT> {
                self.int.take()
            }
        }
    };
}

pub(crate) use impl_int_pin;
