//! Interface abstraction for register I/O.

pub(crate) mod address;
pub(crate) mod i2c;
pub(crate) mod spi;

pub use address::{PressureAddress, VafeAddress};
pub use i2c::{I2cConfig, I2cInterface};
pub use spi::{SpiConfig, SpiInterface};

use crate::error::Error;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Minimal async register I/O for the device core.
#[allow(async_fn_in_trait)]
pub trait Interface: sealed::Sealed {
    /// Reads a single register.
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error>;
    /// Reads a contiguous block of registers into `buffer`.
    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error>;
    /// Writes a single register.
    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error>;
    /// Writes a contiguous block of registers from `data`.
    async fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error>;
}

/// Physical bus the sensor is wired to.
///
/// Several init sequences depend on it: I3C skips the I3C-disable and
/// anti-spike steps, SPI 3-wire needs the SIM bit before any read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusMode {
    /// I2C.
    I2c,
    /// MIPI I3C, driven through an I2C-compatible transport.
    I3c,
    /// 4-wire SPI (separate SDI/SDO).
    Spi4Wire,
    /// 3-wire SPI (shared SDI/SDO).
    Spi3Wire,
}

impl BusMode {
    /// Returns true for either SPI flavor.
    pub const fn is_spi(self) -> bool {
        matches!(self, Self::Spi4Wire | Self::Spi3Wire)
    }
}
