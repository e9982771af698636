//! SPI interface adapter.
//!
//! ST MEMS parts use bit 7 of the address byte as the read flag. Multi-byte
//! access relies on the register auto-increment bit each driver sets at init.

use embedded_hal_async::spi::{Operation, SpiDevice};

use super::{BusMode, Interface, sealed};
use crate::error::Error;

/// SPI interface configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    pub(crate) three_wire: bool,
}

impl SpiConfig {
    /// Creates a new SPI configuration (4-wire).
    pub const fn new() -> Self {
        Self { three_wire: false }
    }

    /// Enables 3-wire SPI mode (shared SDI/SDO line).
    #[must_use]
    pub const fn with_three_wire(mut self, enable: bool) -> Self {
        self.three_wire = enable;
        self
    }

    pub(crate) const fn bus_mode(self) -> BusMode {
        if self.three_wire {
            BusMode::Spi3Wire
        } else {
            BusMode::Spi4Wire
        }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SPI register interface.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new SPI interface with the given bus.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

const SPI_READ_MASK: u8 = 0x80;

const fn spi_addr_read(reg: u8) -> u8 {
    (reg & 0x7F) | SPI_READ_MASK
}

const fn spi_addr_write(reg: u8) -> u8 {
    reg & 0x7F
}

impl<SPI> Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut buffer = [0u8];
        self.read_regs(reg, &mut buffer).await?;
        Ok(buffer[0])
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        let addr_buf = [spi_addr_read(reg)];
        let mut ops = [Operation::Write(&addr_buf), Operation::Read(buffer)];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let buffer = [spi_addr_write(reg), value];
        self.spi.write(&buffer).await.map_err(|_| Error::Bus)
    }

    async fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        if data.is_empty() {
            return Ok(());
        }
        let addr_buf = [spi_addr_write(reg)];
        let mut ops = [Operation::Write(&addr_buf), Operation::Write(data)];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)
    }
}

impl<SPI> sealed::Sealed for SpiInterface<SPI> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_flag_sets_bit7_only_on_reads() {
        assert_eq!(spi_addr_read(0x0F), 0x8F);
        assert_eq!(spi_addr_write(0x8F), 0x0F);
        assert_eq!(SpiConfig::new().with_three_wire(true).bus_mode(), BusMode::Spi3Wire);
        assert_eq!(SpiConfig::default().bus_mode(), BusMode::Spi4Wire);
    }
}
