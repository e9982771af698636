//! LPS22DF driver.
//!
//! The LPS22DF has no power-down ODR code: "off" is the one-shot mode, and
//! rate, averaging and low-pass filter are always written together as one
//! CTRL_REG1 / CTRL_REG2 pair.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use super::{RESET_POLL_NS, RESET_TRIES};
use crate::config::lps22hh::validate_watermark;
use crate::config::{
    Averaging, Capabilities, FifoConfig, FifoMode, Lps22dfLowPassFilter, Lps22dfMode, Lps22dfOdr,
};
use crate::data::{FifoStatus, PressureRaw, PressureSample, TemperatureRaw};
use crate::device::DeviceCore;
use crate::error::Error;
use crate::interface::{BusMode, I2cConfig, I2cInterface, Interface, SpiConfig, SpiInterface};
use crate::interrupt::{FifoInterrupt, PinConfig, impl_int_pin};
use crate::register::lps22df::{
    Register, ctrl_reg2, ctrl_reg3, ctrl_reg4, fifo_ctrl, fifo_wtm, i3c_if_ctrl, if_ctrl, status,
    who_am_i,
};
use crate::register::with_flag;
use crate::sensor::impl_pressure_sensor;
use crate::state::{Channel, ChannelState, RateControl};

/// Rate restored by the first enable after init.
const INITIAL_LAST_MODE: Lps22dfMode = Lps22dfMode::DEFAULT.with_odr(Lps22dfOdr::Hz25);

/// LPS22DF pressure and temperature sensor driver.
pub struct Lps22df<I, INT = ()> {
    core: DeviceCore<I>,
    int: Option<INT>,
    state: ChannelState<Lps22dfMode>,
}

/// I2C type alias for the LPS22DF driver.
pub type Lps22dfI2c<I2C, INT = ()> = Lps22df<I2cInterface<I2C>, INT>;
/// SPI type alias for the LPS22DF driver.
pub type Lps22dfSpi<SPI, INT = ()> = Lps22df<SpiInterface<SPI>, INT>;

impl<I2C, INT> Lps22df<I2cInterface<I2C>, INT>
where
    I2C: I2c,
{
    /// Creates a new I2C-based driver at the primary address.
    pub fn new_i2c(i2c: I2C, int: Option<INT>) -> Self {
        Self::with_i2c_config(i2c, int, I2cConfig::default())
    }

    /// Creates a new I2C-based driver with a custom bus configuration.
    pub fn with_i2c_config(i2c: I2C, int: Option<INT>, i2c_config: I2cConfig) -> Self {
        let interface = I2cInterface::new(i2c, i2c_config.address);
        Self::from_core(DeviceCore::new(interface, i2c_config.bus_mode()), int)
    }

    /// Updates the I2C address used by the interface.
    pub fn set_i2c_address(&mut self, address: u8) {
        self.core.set_i2c_address(address);
    }

    /// Attempts initialization for one or more I2C addresses.
    ///
    /// Returns the first address that answered with the right WHO_AM_I.
    pub async fn init_with_addresses(&mut self, addresses: &[u8]) -> Result<u8, Error> {
        let mut last_err = None;
        for &address in addresses {
            self.set_i2c_address(address);
            match self.init().await {
                Ok(()) => return Ok(address),
                Err(Error::WrongDevice) => return Err(Error::WrongDevice),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or(Error::NotPresent))
    }

    /// Releases the I2C bus, consuming the driver.
    pub fn release(self) -> I2C {
        self.core.release().release()
    }

    /// Releases the I2C bus and interrupt pin, consuming the driver.
    pub fn release_with_int(self) -> (I2C, Option<INT>) {
        let interface = self.core.release();
        (interface.release(), self.int)
    }
}

impl<SPI, INT> Lps22df<SpiInterface<SPI>, INT>
where
    SPI: SpiDevice,
{
    /// Creates a new 4-wire SPI driver.
    pub fn new_spi(spi: SPI, int: Option<INT>) -> Self {
        Self::with_spi_config(spi, int, SpiConfig::default())
    }

    /// Creates a new SPI driver with a custom bus configuration.
    pub fn with_spi_config(spi: SPI, int: Option<INT>, spi_config: SpiConfig) -> Self {
        let interface = SpiInterface::new(spi);
        Self::from_core(DeviceCore::new(interface, spi_config.bus_mode()), int)
    }

    /// Releases the SPI bus, consuming the driver.
    pub fn release(self) -> SPI {
        self.core.release().release()
    }

    /// Releases the SPI bus and interrupt pin, consuming the driver.
    pub fn release_with_int(self) -> (SPI, Option<INT>) {
        let interface = self.core.release();
        (interface.release(), self.int)
    }
}

impl<I, INT> Lps22df<I, INT>
where
    I: Interface,
{
    pub(crate) const fn from_core(core: DeviceCore<I>, int: Option<INT>) -> Self {
        Self {
            core,
            int,
            state: ChannelState::new(INITIAL_LAST_MODE),
        }
    }

    /// Returns what the LPS22DF can do.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::pressure(Lps22dfOdr::Hz200.hz_milli(), false)
    }

    /// Bus the driver was built for.
    pub const fn bus_mode(&self) -> BusMode {
        self.core.bus_mode()
    }

    /// Returns whether `init` has completed.
    pub const fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Returns whether the pressure channel is enabled.
    pub const fn is_pressure_enabled(&self) -> bool {
        self.state.is_enabled(Channel::Pressure)
    }

    /// Returns whether the temperature channel is enabled.
    pub const fn is_temperature_enabled(&self) -> bool {
        self.state.is_enabled(Channel::Temperature)
    }

    /// Reads the WHO_AM_I register.
    pub async fn read_id(&mut self) -> Result<u8, Error> {
        self.core.read_reg(Register::WhoAmI).await
    }

    /// Verifies the device WHO_AM_I register.
    pub async fn verify_device(&mut self) -> Result<(), Error> {
        self.core
            .verify_device(Register::WhoAmI, who_am_i::EXPECTED)
            .await
    }

    /// Identifies the part and applies the default configuration.
    ///
    /// Does nothing when the driver is already initialized.
    pub async fn init(&mut self) -> Result<(), Error> {
        if self.state.is_initialized() {
            return Ok(());
        }
        if self.core.bus_mode() == BusMode::Spi3Wire {
            self.core.write_reg(Register::IfCtrl, if_ctrl::SIM).await?;
        }
        self.verify_device().await?;
        self.initialize().await?;
        self.state.set_initialized(true);
        Ok(())
    }

    async fn initialize(&mut self) -> Result<(), Error> {
        let mut regs = [0u8; 2];
        self.core.read_regs(Register::CtrlReg2, &mut regs).await?;
        regs[0] |= ctrl_reg2::BDU;
        regs[1] |= ctrl_reg3::IF_ADD_INC;
        self.core.write_regs(Register::CtrlReg2, &regs).await?;

        let bus_bits = match self.core.bus_mode() {
            BusMode::I2c | BusMode::I3c => 0,
            BusMode::Spi4Wire => if_ctrl::I2C_I3C_DIS,
            BusMode::Spi3Wire => if_ctrl::I2C_I3C_DIS | if_ctrl::SIM,
        };
        self.core
            .modify_reg(Register::IfCtrl, if_ctrl::SIM | if_ctrl::I2C_I3C_DIS, bus_bits)
            .await?;
        self.core
            .set_bits(Register::I3cIfCtrl, i3c_if_ctrl::ASF_ON, false)
            .await?;

        self.write_mode(Lps22dfMode::DEFAULT).await?;
        self.state.set_last_rate(INITIAL_LAST_MODE);
        debug!("LPS22DF initialized");
        Ok(())
    }

    /// Disables both channels and clears the init flag.
    pub async fn deinit(&mut self) -> Result<(), Error> {
        self.deinit_channels().await
    }

    /// Resets the register content and waits for the reset to finish.
    ///
    /// The driver returns to the uninitialized state.
    pub async fn software_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.core
            .set_and_wait_clear(
                Register::CtrlReg2,
                ctrl_reg2::SWRESET,
                delay,
                RESET_POLL_NS,
                RESET_TRIES,
            )
            .await?;
        self.state = ChannelState::new(INITIAL_LAST_MODE);
        Ok(())
    }

    /// Enables the pressure channel.
    pub async fn enable_pressure(&mut self) -> Result<(), Error> {
        self.enable_channel(Channel::Pressure).await
    }

    /// Disables the pressure channel.
    pub async fn disable_pressure(&mut self) -> Result<(), Error> {
        self.disable_channel(Channel::Pressure).await
    }

    /// Enables the temperature channel.
    pub async fn enable_temperature(&mut self) -> Result<(), Error> {
        self.enable_channel(Channel::Temperature).await
    }

    /// Disables the temperature channel.
    pub async fn disable_temperature(&mut self) -> Result<(), Error> {
        self.disable_channel(Channel::Temperature).await
    }

    /// Output data rate in milli-hertz; one-shot reads as 0.
    pub async fn output_data_rate(&mut self) -> Result<u32, Error> {
        Ok(self.mode().await?.odr.hz_milli())
    }

    /// Sets the output data rate through the pressure channel.
    pub async fn set_pressure_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.set_channel_rate(Channel::Pressure, hz_milli).await
    }

    /// Sets the output data rate through the temperature channel.
    pub async fn set_temperature_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.set_channel_rate(Channel::Temperature, hz_milli).await
    }

    /// Reads the programmed rate, averaging and filter.
    pub async fn mode(&mut self) -> Result<Lps22dfMode, Error> {
        let mut regs = [0u8; 2];
        self.core.read_regs(Register::CtrlReg1, &mut regs).await?;
        Lps22dfMode::from_regs(regs)
    }

    /// Writes rate, averaging and filter in one transfer.
    pub async fn set_mode(&mut self, mode: Lps22dfMode) -> Result<(), Error> {
        self.write_mode(mode).await
    }

    async fn write_mode(&mut self, mode: Lps22dfMode) -> Result<(), Error> {
        let mut regs = [0u8; 2];
        self.core.read_regs(Register::CtrlReg1, &mut regs).await?;
        let regs = mode.apply(regs);
        self.core.write_regs(Register::CtrlReg1, &regs).await
    }

    /// Selects the number of internal samples averaged per output.
    pub async fn set_averaging(&mut self, averaging: Averaging) -> Result<(), Error> {
        let mode = self.mode().await?;
        self.write_mode(mode.with_averaging(averaging)).await
    }

    /// Selects the pressure low-pass filter.
    pub async fn set_low_pass_filter(&mut self, lpf: Lps22dfLowPassFilter) -> Result<(), Error> {
        let mode = self.mode().await?;
        self.write_mode(mode.with_lpf(lpf)).await
    }

    /// Reads the raw 24-bit pressure output.
    pub async fn read_pressure_raw(&mut self) -> Result<PressureRaw, Error> {
        let mut buf = [0u8; 3];
        self.core.read_regs(Register::PressOutXl, &mut buf).await?;
        Ok(PressureRaw::from_le_bytes(buf))
    }

    /// Reads the raw temperature output.
    pub async fn read_temperature_raw(&mut self) -> Result<TemperatureRaw, Error> {
        let mut buf = [0u8; 2];
        self.core.read_regs(Register::TempOutL, &mut buf).await?;
        Ok(TemperatureRaw::from_le_bytes(buf))
    }

    /// Reads pressure and temperature in one burst.
    pub async fn read_sample(&mut self) -> Result<PressureSample, Error> {
        let mut buf = [0u8; 5];
        self.core.read_regs(Register::PressOutXl, &mut buf).await?;
        Ok(PressureSample::from_le_bytes(buf))
    }

    /// Reads the pressure in milli-hPa.
    pub async fn read_pressure_hpa_milli(&mut self) -> Result<i32, Error> {
        Ok(self.read_pressure_raw().await?.hpa_milli())
    }

    /// Reads the temperature in milli-degrees Celsius.
    pub async fn read_temperature_mdegc(&mut self) -> Result<i32, Error> {
        Ok(self.read_temperature_raw().await?.mdegc())
    }

    /// Returns STATUS.P_DA.
    pub async fn pressure_data_ready(&mut self) -> Result<bool, Error> {
        self.core.bits_set(Register::Status, status::P_DA).await
    }

    /// Returns STATUS.T_DA.
    pub async fn temperature_data_ready(&mut self) -> Result<bool, Error> {
        self.core.bits_set(Register::Status, status::T_DA).await
    }

    /// Triggers a single conversion; only acts while the part is in one-shot mode.
    pub async fn set_one_shot(&mut self) -> Result<(), Error> {
        let mode = self.mode().await?;
        if mode.odr == Lps22dfOdr::OneShot {
            self.core
                .set_bits(Register::CtrlReg2, ctrl_reg2::ONESHOT, true)
                .await?;
        }
        Ok(())
    }

    /// Returns true once both pressure and temperature of a one-shot are available.
    pub async fn one_shot_status(&mut self) -> Result<bool, Error> {
        let value = self.core.read_reg(Register::Status).await?;
        Ok((value & status::P_DA) != 0 && (value & status::T_DA) != 0)
    }

    /// Routes data-ready to the INT pin.
    pub async fn enable_data_ready_interrupt(&mut self) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg4, ctrl_reg4::DRDY, true)
            .await
    }

    /// Configures INT polarity and output stage.
    pub async fn set_pin_config(&mut self, pin: PinConfig) -> Result<(), Error> {
        let mask = ctrl_reg3::INT_H_L | ctrl_reg3::PP_OD;
        self.core
            .modify_reg(
                Register::CtrlReg3,
                mask,
                pin.bits(ctrl_reg3::INT_H_L, ctrl_reg3::PP_OD),
            )
            .await
    }

    /// Applies FIFO mode, watermark and stop-on-watermark in one transfer.
    pub async fn apply_fifo_config(&mut self, config: FifoConfig) -> Result<(), Error> {
        config.validate(fifo_wtm::WTM_MASK)?;
        let mode_bits = config.mode.lps22_bits()?;
        let mut regs = [0u8; 2];
        self.core.read_regs(Register::FifoCtrl, &mut regs).await?;
        regs[0] = (regs[0] & !fifo_ctrl::MODE_MASK) | mode_bits;
        regs[0] = with_flag(regs[0], fifo_ctrl::STOP_ON_WTM, config.stop_on_watermark);
        regs[1] = (regs[1] & !fifo_wtm::WTM_MASK) | config.watermark;
        self.core.write_regs(Register::FifoCtrl, &regs).await?;
        debug!("fifo mode {:#x}, watermark {}", mode_bits, config.watermark);
        Ok(())
    }

    /// Selects the FIFO mode.
    pub async fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error> {
        let bits = mode.lps22_bits()?;
        self.core
            .modify_reg(Register::FifoCtrl, fifo_ctrl::MODE_MASK, bits)
            .await
    }

    /// Sets the FIFO watermark (0..=127).
    pub async fn set_fifo_watermark(&mut self, level: u8) -> Result<(), Error> {
        let level = validate_watermark(level)?;
        self.core
            .modify_reg(Register::FifoWtm, fifo_wtm::WTM_MASK, level)
            .await
    }

    /// Stops filling the FIFO once the watermark is reached.
    pub async fn set_fifo_stop_on_watermark(&mut self, enable: bool) -> Result<(), Error> {
        self.core
            .set_bits(Register::FifoCtrl, fifo_ctrl::STOP_ON_WTM, enable)
            .await
    }

    /// Routes a FIFO event to the INT pin.
    pub async fn set_fifo_interrupt(&mut self, event: FifoInterrupt) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg4, fifo_interrupt_mask(event), true)
            .await
    }

    /// Removes a FIFO event from the INT pin.
    pub async fn reset_fifo_interrupt(&mut self, event: FifoInterrupt) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg4, fifo_interrupt_mask(event), false)
            .await
    }

    /// Reads the FIFO level and flags.
    pub async fn fifo_status(&mut self) -> Result<FifoStatus, Error> {
        let mut buf = [0u8; 2];
        self.core.read_regs(Register::FifoStatus1, &mut buf).await?;
        Ok(FifoStatus::from_lps22(buf[0], buf[1]))
    }

    /// Number of unread FIFO samples.
    pub async fn fifo_level(&mut self) -> Result<u8, Error> {
        self.core.read_reg(Register::FifoStatus1).await
    }

    /// Pops one pressure sample from the FIFO.
    pub async fn read_fifo_pressure(&mut self) -> Result<PressureRaw, Error> {
        let mut buf = [0u8; 3];
        self.core
            .read_regs(Register::FifoDataOutPressXl, &mut buf)
            .await?;
        Ok(PressureRaw::from_le_bytes(buf))
    }

    /// Reads a register by address.
    pub async fn read_register(&mut self, reg: u8) -> Result<u8, Error> {
        self.core.read_register(reg).await
    }

    /// Writes a register by address.
    pub async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.core.write_register(reg, value).await
    }
}

const fn fifo_interrupt_mask(event: FifoInterrupt) -> u8 {
    match event {
        FifoInterrupt::Threshold => ctrl_reg4::INT_F_WTM,
        FifoInterrupt::Full => ctrl_reg4::INT_F_FULL,
        FifoInterrupt::Overrun => ctrl_reg4::INT_F_OVR,
    }
}

impl<I, INT> RateControl for Lps22df<I, INT>
where
    I: Interface,
{
    type Rate = Lps22dfMode;

    fn channels(&self) -> &ChannelState<Lps22dfMode> {
        &self.state
    }

    fn channels_mut(&mut self) -> &mut ChannelState<Lps22dfMode> {
        &mut self.state
    }

    async fn read_rate(&mut self) -> Result<Lps22dfMode, Error> {
        self.mode().await
    }

    async fn write_rate(&mut self, rate: Lps22dfMode) -> Result<(), Error> {
        self.write_mode(rate).await
    }

    async fn power_down(&mut self, current: Lps22dfMode) -> Result<(), Error> {
        self.write_mode(current.with_odr(Lps22dfOdr::OneShot)).await
    }

    fn retune(current: Lps22dfMode, hz_milli: u32) -> Lps22dfMode {
        current.with_odr(Lps22dfOdr::from_hz_milli(hz_milli))
    }
}

impl_int_pin!(impl<I, INT> for Lps22df<I, INT>);

impl_pressure_sensor!(impl<I, INT> for Lps22df<I, INT> where I: Interface);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::register::RegisterAddress;
    use crate::testing::{MockDelay, MockInterface};
    use futures::executor::block_on;

    fn driver(interface: MockInterface, bus: BusMode) -> Lps22df<MockInterface> {
        Lps22df::from_core(DeviceCore::new(interface, bus), None)
    }

    fn identified() -> MockInterface {
        MockInterface::default().with_reg(Register::WhoAmI.addr(), who_am_i::EXPECTED)
    }

    #[test]
    fn init_sets_bdu_auto_increment_and_default_mode() {
        let mut dev = driver(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        assert!(dev.is_initialized());

        let interface = dev.core.release();
        assert_eq!(
            interface.write_bursts()[0],
            (Register::CtrlReg2.addr(), std::vec![ctrl_reg2::BDU, ctrl_reg3::IF_ADD_INC])
        );
        assert_eq!(interface.reg(Register::IfCtrl.addr()), 0);
        assert_eq!(interface.reg(Register::CtrlReg1.addr()), 0);
        assert_eq!(
            interface.reg(Register::CtrlReg2.addr()),
            ctrl_reg2::BDU | ctrl_reg2::EN_LPFP
        );
    }

    #[test]
    fn init_runs_once() {
        let mut dev = driver(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        dev.core = DeviceCore::new(MockInterface::default(), BusMode::I2c);
        block_on(dev.init()).expect("second init is a no-op");
        assert!(dev.core.release().write_bursts().is_empty());
    }

    #[test]
    fn three_wire_spi_binds_before_identification() {
        let mut dev = driver(identified(), BusMode::Spi3Wire);
        block_on(dev.init()).expect("init");
        let interface = dev.core.release();
        assert_eq!(interface.writes()[0], (Register::IfCtrl.addr(), if_ctrl::SIM));
        assert_eq!(
            interface.reg(Register::IfCtrl.addr()),
            if_ctrl::SIM | if_ctrl::I2C_I3C_DIS
        );
    }

    #[test]
    fn wrong_id_leaves_driver_uninitialized() {
        let interface = MockInterface::default().with_reg(Register::WhoAmI.addr(), 0xB3);
        let mut dev = driver(interface, BusMode::I2c);
        assert_eq!(block_on(dev.init()), Err(Error::WrongDevice));
        assert!(!dev.is_initialized());
    }

    #[test]
    fn enable_restores_25_hz_and_disable_falls_back_to_one_shot() {
        let mut dev = driver(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.enable_pressure()).expect("enable");
        assert_eq!(block_on(dev.output_data_rate()), Ok(25_000));

        block_on(dev.set_pressure_output_data_rate(60_000)).expect("odr");
        assert_eq!(block_on(dev.output_data_rate()), Ok(75_000));

        block_on(dev.disable_pressure()).expect("disable");
        assert_eq!(block_on(dev.output_data_rate()), Ok(0));
        assert!(!dev.is_pressure_enabled());

        block_on(dev.enable_temperature()).expect("enable temperature");
        assert_eq!(block_on(dev.output_data_rate()), Ok(75_000));
    }

    #[test]
    fn averaging_keeps_rate() {
        let mut dev = driver(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.enable_pressure()).expect("enable");
        block_on(dev.set_averaging(Averaging::Avg128)).expect("avg");
        let mode = block_on(dev.mode()).expect("mode");
        assert_eq!(mode.odr, Lps22dfOdr::Hz25);
        assert_eq!(mode.averaging, Averaging::Avg128);
    }

    #[test]
    fn one_shot_only_triggers_in_one_shot_mode() {
        let interface = MockInterface::default()
            .with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::ONESHOT);
        let mut dev = driver(interface, BusMode::I2c);

        block_on(dev.set_one_shot()).expect("one shot");
        let mut interface = dev.core.release();
        assert_eq!(
            interface.writes(),
            [(Register::CtrlReg2.addr(), ctrl_reg2::ONESHOT)]
        );

        interface.clear_log();
        interface.set_reg(Register::CtrlReg1.addr(), Lps22dfOdr::Hz10.bits() << 3);
        let mut dev = driver(interface, BusMode::I2c);
        block_on(dev.set_one_shot()).expect("continuous mode");
        assert!(dev.core.release().writes().is_empty());
    }

    #[test]
    fn fifo_config_is_one_burst() {
        let mut dev = driver(MockInterface::default(), BusMode::I2c);
        let config = FifoConfig::new(FifoMode::StreamToFifo, 20).with_stop_on_watermark(true);
        block_on(dev.apply_fifo_config(config)).expect("fifo");
        assert_eq!(
            dev.core.release().write_bursts(),
            [(
                Register::FifoCtrl.addr(),
                std::vec![0b111 | fifo_ctrl::STOP_ON_WTM, 20]
            )]
        );
    }

    #[test]
    fn dynamic_stream_is_unsupported() {
        let mut dev = driver(MockInterface::default(), BusMode::I2c);
        assert_eq!(
            block_on(dev.set_fifo_mode(FifoMode::DynamicStream)),
            Err(Error::Unsupported)
        );
        assert_eq!(block_on(dev.set_fifo_watermark(128)), Err(Error::InvalidData));
    }

    #[test]
    fn fifo_interrupts_toggle_ctrl_reg4() {
        let mut dev = driver(MockInterface::default(), BusMode::I2c);
        block_on(dev.set_fifo_interrupt(FifoInterrupt::Threshold)).expect("set");
        block_on(dev.set_fifo_interrupt(FifoInterrupt::Full)).expect("set");
        block_on(dev.reset_fifo_interrupt(FifoInterrupt::Threshold)).expect("reset");
        assert_eq!(
            dev.core.release().reg(Register::CtrlReg4.addr()),
            ctrl_reg4::INT_F_FULL
        );
    }

    #[test]
    fn reads_convert_to_milli_units() {
        let mut interface = MockInterface::default();
        // 0x3F_F000 / 4096 = 1023 hPa; 2534 / 100 = 25.34 degC
        interface.queue_block(Register::PressOutXl.addr(), &[0x00, 0xF0, 0x3F]);
        interface.queue_block(Register::TempOutL.addr(), &2534i16.to_le_bytes());
        let mut dev = driver(interface, BusMode::I2c);
        assert_eq!(block_on(dev.read_pressure_hpa_milli()), Ok(1_023_000));
        assert_eq!(block_on(dev.read_temperature_mdegc()), Ok(25_340));
    }

    #[test]
    fn software_reset_clears_driver_state() {
        let interface = identified().with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::SWRESET);
        let mut dev = driver(interface, BusMode::I2c);
        let mut delay = MockDelay::default();
        block_on(dev.init()).expect("init");
        block_on(dev.software_reset(&mut delay)).expect("reset");
        assert!(!dev.is_initialized());
        assert_eq!(delay.calls, 1);
    }

    #[test]
    fn pin_config_maps_to_ctrl_reg3() {
        let interface =
            MockInterface::default().with_reg(Register::CtrlReg3.addr(), ctrl_reg3::IF_ADD_INC);
        let mut dev = driver(interface, BusMode::I2c);
        block_on(dev.set_pin_config(PinConfig::new().with_active_low(true).with_open_drain(true)))
            .expect("pin");
        assert_eq!(
            dev.core.release().reg(Register::CtrlReg3.addr()),
            ctrl_reg3::IF_ADD_INC | ctrl_reg3::INT_H_L | ctrl_reg3::PP_OD
        );
    }

    #[test]
    fn missing_pin_reports_missing() {
        let mut dev: Lps22df<MockInterface, crate::testing::MockPin> =
            Lps22df::from_core(DeviceCore::new(MockInterface::default(), BusMode::I2c), None);
        assert!(matches!(
            block_on(dev.wait_int_high()),
            Err(crate::interrupt::InterruptWaitError::Missing)
        ));
    }
}
