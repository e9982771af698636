//! Register-level device core shared by every driver.

use embedded_hal_async::delay::DelayNs;

use crate::error::Error;
use crate::interface::{BusMode, I2cInterface, Interface};
use crate::register::RegisterAddress;

pub(crate) struct DeviceCore<I> {
    interface: I,
    bus: BusMode,
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) const fn new(interface: I, bus: BusMode) -> Self {
        Self { interface, bus }
    }

    pub(crate) const fn bus_mode(&self) -> BusMode {
        self.bus
    }

    /// Reads WHO_AM_I and compares it against `expected`.
    pub(crate) async fn verify_device<R: RegisterAddress>(
        &mut self,
        who_am_i: R,
        expected: u8,
    ) -> Result<(), Error> {
        let id = self.read_reg(who_am_i).await?;
        if id != expected {
            warn!("unexpected WHO_AM_I {:#x}, wanted {:#x}", id, expected);
            return Err(Error::WrongDevice);
        }
        debug!("device identified, WHO_AM_I {:#x}", id);
        Ok(())
    }

    /// Read-modify-write of the bits selected by `mask`.
    ///
    /// The register is always written back, even if the value is unchanged.
    pub(crate) async fn modify_reg<R: RegisterAddress>(
        &mut self,
        reg: R,
        mask: u8,
        value: u8,
    ) -> Result<(), Error> {
        let current = self.read_reg(reg).await?;
        let next = (current & !mask) | (value & mask);
        self.write_reg(reg, next).await
    }

    /// Sets or clears every bit in `mask`.
    pub(crate) async fn set_bits<R: RegisterAddress>(
        &mut self,
        reg: R,
        mask: u8,
        enable: bool,
    ) -> Result<(), Error> {
        self.modify_reg(reg, mask, if enable { mask } else { 0 })
            .await
    }

    /// Returns whether any bit of `mask` is set.
    pub(crate) async fn bits_set<R: RegisterAddress>(
        &mut self,
        reg: R,
        mask: u8,
    ) -> Result<bool, Error> {
        Ok((self.read_reg(reg).await? & mask) != 0)
    }

    /// Sets `mask` in `reg` and polls until the device clears it again.
    ///
    /// Reads are spaced by `poll_ns`; after `tries` reads with the bit still
    /// set the call fails with [`Error::Timeout`].
    pub(crate) async fn set_and_wait_clear<R: RegisterAddress, D: DelayNs>(
        &mut self,
        reg: R,
        mask: u8,
        delay: &mut D,
        poll_ns: u32,
        tries: u8,
    ) -> Result<(), Error> {
        self.set_bits(reg, mask, true).await?;
        for _ in 0..tries {
            delay.delay_ns(poll_ns).await;
            if !self.bits_set(reg, mask).await? {
                return Ok(());
            }
        }
        warn!("self-clearing bit {:#x} stuck in reg {:#x}", mask, reg.addr());
        Err(Error::Timeout)
    }

    /// Raw register read by address.
    pub(crate) async fn read_register(&mut self, reg: u8) -> Result<u8, Error> {
        self.interface.read_reg(reg).await
    }

    /// Raw register write by address.
    pub(crate) async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        trace!("raw write reg {:#x} = {:#x}", reg, value);
        self.interface.write_reg(reg, value).await
    }

    pub(crate) fn release(self) -> I {
        self.interface
    }

    pub(crate) async fn read_reg<R: RegisterAddress>(&mut self, reg: R) -> Result<u8, Error> {
        self.interface.read_reg(reg.addr()).await
    }

    pub(crate) async fn read_regs<R: RegisterAddress>(
        &mut self,
        reg: R,
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        self.interface.read_regs(reg.addr(), buffer).await
    }

    pub(crate) async fn write_reg<R: RegisterAddress>(
        &mut self,
        reg: R,
        value: u8,
    ) -> Result<(), Error> {
        self.interface.write_reg(reg.addr(), value).await
    }

    pub(crate) async fn write_regs<R: RegisterAddress>(
        &mut self,
        reg: R,
        data: &[u8],
    ) -> Result<(), Error> {
        self.interface.write_regs(reg.addr(), data).await
    }
}

impl<I2C> DeviceCore<I2cInterface<I2C>> {
    pub(crate) fn set_i2c_address(&mut self, address: u8) {
        self.interface.set_address(address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::lps22hh::{Register, ctrl_reg2, who_am_i};
    use crate::testing::{MockDelay, MockInterface};
    use futures::executor::block_on;

    #[test]
    fn modify_reg_preserves_unmasked_bits() {
        let interface =
            MockInterface::default().with_reg(Register::CtrlReg2.addr(), 0b1000_0001);
        let mut core = DeviceCore::new(interface, BusMode::I2c);

        block_on(core.modify_reg(Register::CtrlReg2, 0b0000_0011, 0b0000_0010))
            .expect("modify");

        assert_eq!(
            core.interface.writes(),
            [(Register::CtrlReg2.addr(), 0b1000_0010)]
        );
    }

    #[test]
    fn verify_device_rejects_mismatched_id() {
        let interface = MockInterface::default().with_reg(Register::WhoAmI.addr(), 0x33);
        let mut core = DeviceCore::new(interface, BusMode::I2c);

        let result = block_on(core.verify_device(Register::WhoAmI, who_am_i::EXPECTED));
        assert_eq!(result, Err(Error::WrongDevice));

        core.interface.set_reg(Register::WhoAmI.addr(), who_am_i::EXPECTED);
        block_on(core.verify_device(Register::WhoAmI, who_am_i::EXPECTED)).expect("verify");
    }

    #[test]
    fn stuck_self_clearing_bit_times_out() {
        let interface = MockInterface::default();
        let mut core = DeviceCore::new(interface, BusMode::I2c);
        let mut delay = MockDelay::default();

        let result = block_on(core.set_and_wait_clear(
            Register::CtrlReg2,
            ctrl_reg2::SWRESET,
            &mut delay,
            1_000_000,
            5,
        ));

        assert_eq!(result, Err(Error::Timeout));
        assert_eq!(delay.calls, 5);
        assert_eq!(delay.last_ns, Some(1_000_000));
    }

    #[test]
    fn self_clearing_bit_returns_once_cleared() {
        let interface = MockInterface::default()
            .with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::SWRESET);
        let mut core = DeviceCore::new(interface, BusMode::Spi4Wire);
        let mut delay = MockDelay::default();

        block_on(core.set_and_wait_clear(
            Register::CtrlReg2,
            ctrl_reg2::SWRESET,
            &mut delay,
            1_000_000,
            5,
        ))
        .expect("reset");

        assert_eq!(delay.calls, 1);
        assert_eq!(core.bus_mode(), BusMode::Spi4Wire);
    }

    #[test]
    fn raw_register_access_bypasses_typed_map() {
        let interface = MockInterface::default().with_reg(0x42, 0x99);
        let mut core = DeviceCore::new(interface, BusMode::I2c);

        assert_eq!(block_on(core.read_register(0x42)), Ok(0x99));
        block_on(core.write_register(0x43, 0x01)).expect("write");
        assert_eq!(core.interface.writes(), [(0x43, 0x01)]);
    }
}
