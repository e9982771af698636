//! LPS33-family driver (LPS33HW, LPS33K).
//!
//! The LPS33K is the I2C-only, FIFO-less sibling of the LPS33HW. SPI
//! constructors, the FIFO and the INT pin are only available on
//! [`Lps33hw`].

use core::marker::PhantomData;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use super::{RESET_POLL_NS, RESET_TRIES};
use crate::config::{Capabilities, FifoConfig, FifoMode, Lps33LowPassFilter, Lps33Odr};
use crate::data::{FifoStatus, PressureRaw, PressureSample, TemperatureRaw};
use crate::device::DeviceCore;
use crate::error::Error;
use crate::interface::{BusMode, I2cConfig, I2cInterface, Interface, SpiConfig, SpiInterface};
use crate::interrupt::{FifoInterrupt, PinConfig, impl_int_pin};
use crate::register::lps33::{
    Register, ctrl_reg1, ctrl_reg2, ctrl_reg3, fifo_ctrl, fifo_status, res_conf, status, who_am_i,
};
use crate::register::{field, with_field, with_flag};
use crate::sensor::impl_pressure_sensor;
use crate::state::{Channel, ChannelState, RateControl};
use crate::variant::{self, Lps33Variant};

/// LPS33-family pressure and temperature sensor driver.
pub struct Lps33<I, V, INT = ()> {
    core: DeviceCore<I>,
    int: Option<INT>,
    state: ChannelState<Lps33Odr>,
    _variant: PhantomData<V>,
}

/// LPS33HW driver.
pub type Lps33hw<I, INT = ()> = Lps33<I, variant::Lps33hw, INT>;
/// I2C type alias for the LPS33HW driver.
pub type Lps33hwI2c<I2C, INT = ()> = Lps33hw<I2cInterface<I2C>, INT>;
/// SPI type alias for the LPS33HW driver.
pub type Lps33hwSpi<SPI, INT = ()> = Lps33hw<SpiInterface<SPI>, INT>;

/// LPS33K driver.
pub type Lps33k<I> = Lps33<I, variant::Lps33k>;
/// I2C type alias for the LPS33K driver.
pub type Lps33kI2c<I2C> = Lps33k<I2cInterface<I2C>>;

impl<I2C, V, INT> Lps33<I2cInterface<I2C>, V, INT>
where
    I2C: I2c,
    V: Lps33Variant,
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

impl<SPI, INT> Lps33<SpiInterface<SPI>, variant::Lps33hw, INT>
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

impl<I, V, INT> Lps33<I, V, INT>
where
    I: Interface,
    V: Lps33Variant,
{
    pub(crate) const fn from_core(core: DeviceCore<I>, int: Option<INT>) -> Self {
        Self {
            core,
            int,
            state: ChannelState::new(Lps33Odr::Hz25),
            _variant: PhantomData,
        }
    }

    /// Returns what the part can do.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::pressure(Lps33Odr::Hz75.hz_milli(), true)
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
            self.core.write_reg(Register::CtrlReg1, ctrl_reg1::SIM).await?;
        }
        self.verify_device().await?;
        self.initialize().await?;
        self.state.set_initialized(true);
        Ok(())
    }

    async fn initialize(&mut self) -> Result<(), Error> {
        self.write_odr(Lps33Odr::PowerDown).await?;
        self.set_low_current(true).await?;
        self.set_low_pass_filter(Lps33LowPassFilter::OdrDiv2).await?;
        self.core
            .set_bits(Register::CtrlReg1, ctrl_reg1::BDU, true)
            .await?;
        self.core
            .set_bits(Register::CtrlReg2, ctrl_reg2::IF_ADD_INC, true)
            .await?;
        self.state.set_last_rate(Lps33Odr::Hz25);
        debug!("{} initialized", V::NAME);
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
        self.state = ChannelState::new(Lps33Odr::Hz25);
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

    /// Output data rate in milli-hertz; power-down reads as 0.
    pub async fn output_data_rate(&mut self) -> Result<u32, Error> {
        Ok(self.odr().await?.hz_milli())
    }

    /// Sets the output data rate through the pressure channel.
    pub async fn set_pressure_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.set_channel_rate(Channel::Pressure, hz_milli).await
    }

    /// Sets the output data rate through the temperature channel.
    pub async fn set_temperature_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.set_channel_rate(Channel::Temperature, hz_milli).await
    }

    /// Programmed data rate code.
    ///
    /// Reserved codes are reported as [`Error::InvalidData`].
    pub async fn odr(&mut self) -> Result<Lps33Odr, Error> {
        let reg = self.core.read_reg(Register::CtrlReg1).await?;
        Lps33Odr::from_ctrl_reg1(reg)
    }

    async fn write_odr(&mut self, odr: Lps33Odr) -> Result<(), Error> {
        let reg = self.core.read_reg(Register::CtrlReg1).await?;
        self.core.write_reg(Register::CtrlReg1, odr.apply(reg)).await
    }

    /// Switches between low-current and high-resolution conversion (RES_CONF.LC_EN).
    pub async fn set_low_current(&mut self, enable: bool) -> Result<(), Error> {
        self.core
            .set_bits(Register::ResConf, res_conf::LC_EN, enable)
            .await
    }

    /// Reads the pressure low-pass filter setting.
    pub async fn low_pass_filter(&mut self) -> Result<Lps33LowPassFilter, Error> {
        let reg = self.core.read_reg(Register::CtrlReg1).await?;
        Ok(Lps33LowPassFilter::from_bits(field(
            reg,
            ctrl_reg1::LPFP_MASK,
            ctrl_reg1::LPFP_SHIFT,
        )))
    }

    /// Selects the pressure low-pass filter.
    pub async fn set_low_pass_filter(&mut self, lpf: Lps33LowPassFilter) -> Result<(), Error> {
        let reg = self.core.read_reg(Register::CtrlReg1).await?;
        self.core
            .write_reg(
                Register::CtrlReg1,
                with_field(reg, ctrl_reg1::LPFP_MASK, ctrl_reg1::LPFP_SHIFT, lpf.bits()),
            )
            .await
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

    /// Powers down, then triggers a single conversion.
    pub async fn set_one_shot(&mut self) -> Result<(), Error> {
        self.write_odr(Lps33Odr::PowerDown).await?;
        self.core
            .set_bits(Register::CtrlReg2, ctrl_reg2::ONE_SHOT, true)
            .await
    }

    /// Returns true once both pressure and temperature of a one-shot are available.
    pub async fn one_shot_status(&mut self) -> Result<bool, Error> {
        let value = self.core.read_reg(Register::Status).await?;
        Ok((value & status::P_DA) != 0 && (value & status::T_DA) != 0)
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

impl<I, INT> Lps33<I, variant::Lps33hw, INT>
where
    I: Interface,
{
    /// Enables FIFO storage (CTRL_REG2.FIFO_EN).
    pub async fn set_fifo_enabled(&mut self, enable: bool) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg2, ctrl_reg2::FIFO_EN, enable)
            .await
    }

    /// Enables the FIFO and applies mode, watermark and stop-on-threshold.
    pub async fn apply_fifo_config(&mut self, config: FifoConfig) -> Result<(), Error> {
        config.validate(fifo_ctrl::WTM_MASK)?;
        let reg2 = self.core.read_reg(Register::CtrlReg2).await? | ctrl_reg2::FIFO_EN;
        let reg2 = with_flag(reg2, ctrl_reg2::STOP_ON_FTH, config.stop_on_watermark);
        self.core.write_reg(Register::CtrlReg2, reg2).await?;

        let fifo = (config.mode.lps33_bits() << fifo_ctrl::F_MODE_SHIFT) | config.watermark;
        self.core.write_reg(Register::FifoCtrl, fifo).await?;
        debug!("LPS33HW fifo ctrl {:#x}", fifo);
        Ok(())
    }

    /// Selects the FIFO mode.
    pub async fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error> {
        self.core
            .modify_reg(
                Register::FifoCtrl,
                fifo_ctrl::F_MODE_MASK,
                mode.lps33_bits() << fifo_ctrl::F_MODE_SHIFT,
            )
            .await
    }

    /// Sets the FIFO watermark (0..=31).
    pub async fn set_fifo_watermark(&mut self, level: u8) -> Result<(), Error> {
        if level > fifo_ctrl::WTM_MASK {
            return Err(Error::InvalidData);
        }
        self.core
            .modify_reg(Register::FifoCtrl, fifo_ctrl::WTM_MASK, level)
            .await
    }

    /// Stops filling the FIFO once the threshold is reached.
    pub async fn set_fifo_stop_on_watermark(&mut self, enable: bool) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg2, ctrl_reg2::STOP_ON_FTH, enable)
            .await
    }

    /// Routes a FIFO event to the INT pin.
    pub async fn set_fifo_interrupt(&mut self, event: FifoInterrupt) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg3, fifo_interrupt_mask(event), true)
            .await
    }

    /// Removes a FIFO event from the INT pin.
    pub async fn reset_fifo_interrupt(&mut self, event: FifoInterrupt) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg3, fifo_interrupt_mask(event), false)
            .await
    }

    /// Reads the FIFO level and flags.
    pub async fn fifo_status(&mut self) -> Result<FifoStatus, Error> {
        let value = self.core.read_reg(Register::FifoStatus).await?;
        Ok(FifoStatus::from_lps33(value))
    }

    /// Number of unread FIFO samples.
    pub async fn fifo_level(&mut self) -> Result<u8, Error> {
        Ok(self.fifo_status().await?.level)
    }

    /// Returns true with 32 samples stored.
    pub async fn fifo_full(&mut self) -> Result<bool, Error> {
        Ok(self.fifo_status().await?.full)
    }

    /// Returns FIFO_STATUS.OVR.
    pub async fn fifo_overrun(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::FifoStatus, fifo_status::OVR)
            .await
    }

    /// Returns FIFO_STATUS.FTH_FIFO.
    pub async fn fifo_watermark_reached(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::FifoStatus, fifo_status::FTH_FIFO)
            .await
    }

    /// Pops one sample; the FIFO is read through the output registers.
    pub async fn read_fifo_sample(&mut self) -> Result<PressureSample, Error> {
        self.read_sample().await
    }

    /// Routes data-ready to the INT pin.
    pub async fn enable_data_ready_interrupt(&mut self) -> Result<(), Error> {
        self.core
            .set_bits(Register::CtrlReg3, ctrl_reg3::DRDY, true)
            .await
    }

    /// Configures INT polarity and output stage.
    pub async fn set_pin_config(&mut self, pin: PinConfig) -> Result<(), Error> {
        self.core
            .modify_reg(
                Register::CtrlReg3,
                ctrl_reg3::INT_H_L | ctrl_reg3::PP_OD,
                pin.bits(ctrl_reg3::INT_H_L, ctrl_reg3::PP_OD),
            )
            .await
    }
}

const fn fifo_interrupt_mask(event: FifoInterrupt) -> u8 {
    match event {
        FifoInterrupt::Threshold => ctrl_reg3::F_FTH,
        FifoInterrupt::Full => ctrl_reg3::F_FSS5,
        FifoInterrupt::Overrun => ctrl_reg3::F_OVR,
    }
}

impl<I, V, INT> RateControl for Lps33<I, V, INT>
where
    I: Interface,
    V: Lps33Variant,
{
    type Rate = Lps33Odr;

    fn channels(&self) -> &ChannelState<Lps33Odr> {
        &self.state
    }

    fn channels_mut(&mut self) -> &mut ChannelState<Lps33Odr> {
        &mut self.state
    }

    async fn read_rate(&mut self) -> Result<Lps33Odr, Error> {
        self.odr().await
    }

    async fn write_rate(&mut self, rate: Lps33Odr) -> Result<(), Error> {
        self.write_odr(rate).await
    }

    async fn power_down(&mut self, _current: Lps33Odr) -> Result<(), Error> {
        self.write_odr(Lps33Odr::PowerDown).await
    }

    fn retune(_current: Lps33Odr, hz_milli: u32) -> Lps33Odr {
        Lps33Odr::from_hz_milli(hz_milli)
    }
}

impl_int_pin!(impl<I, INT> for Lps33<I, variant::Lps33hw, INT>);

impl_pressure_sensor!(impl<I, V, INT> for Lps33<I, V, INT> where I: Interface, V: Lps33Variant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::RegisterAddress;
    use crate::testing::{MockDelay, MockInterface};
    use futures::executor::block_on;

    fn lps33hw(interface: MockInterface, bus: BusMode) -> Lps33hw<MockInterface> {
        Lps33::from_core(DeviceCore::new(interface, bus), None)
    }

    fn lps33k(interface: MockInterface) -> Lps33k<MockInterface> {
        Lps33::from_core(DeviceCore::new(interface, BusMode::I2c), None)
    }

    fn identified() -> MockInterface {
        MockInterface::default()
            .with_reg(Register::WhoAmI.addr(), who_am_i::EXPECTED)
            .with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::ONE_SHOT)
    }

    #[test]
    fn init_selects_low_current_and_bdu() {
        let interface = identified().with_reg(Register::CtrlReg1.addr(), 0b0100_1000);
        let mut dev = lps33k(interface);
        block_on(dev.init()).expect("init");
        assert!(dev.is_initialized());

        let interface = dev.core.release();
        assert_eq!(interface.reg(Register::CtrlReg1.addr()), ctrl_reg1::BDU);
        assert_eq!(interface.reg(Register::CtrlReg2.addr()), ctrl_reg2::IF_ADD_INC);
        assert_eq!(interface.reg(Register::ResConf.addr()), res_conf::LC_EN);
    }

    #[test]
    fn three_wire_spi_binds_before_identification() {
        let mut dev = lps33hw(identified(), BusMode::Spi3Wire);
        block_on(dev.init()).expect("init");
        let interface = dev.core.release();
        assert_eq!(interface.writes()[0], (Register::CtrlReg1.addr(), ctrl_reg1::SIM));
    }

    #[test]
    fn wrong_id_is_reported() {
        let interface = MockInterface::default().with_reg(Register::WhoAmI.addr(), 0xB3);
        let mut dev = lps33k(interface);
        assert_eq!(block_on(dev.init()), Err(Error::WrongDevice));
    }

    #[test]
    fn rate_tops_out_at_75_hz_and_survives_power_down() {
        let mut dev = lps33hw(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.enable_pressure()).expect("enable");
        assert_eq!(block_on(dev.output_data_rate()), Ok(25_000));

        block_on(dev.set_pressure_output_data_rate(200_000)).expect("odr");
        assert_eq!(block_on(dev.odr()), Ok(Lps33Odr::Hz75));

        block_on(dev.disable_pressure()).expect("disable");
        assert_eq!(block_on(dev.odr()), Ok(Lps33Odr::PowerDown));

        block_on(dev.enable_temperature()).expect("enable temperature");
        assert_eq!(block_on(dev.output_data_rate()), Ok(75_000));
    }

    #[test]
    fn reserved_odr_code_is_invalid_data() {
        let interface = MockInterface::default().with_reg(Register::CtrlReg1.addr(), 0b0111_0000);
        let mut dev = lps33k(interface);
        assert_eq!(block_on(dev.output_data_rate()), Err(Error::InvalidData));
    }

    #[test]
    fn one_shot_powers_down_first() {
        let interface = identified().with_reg(Register::CtrlReg1.addr(), 0b0011_0010);
        let mut dev = lps33k(interface);
        block_on(dev.set_one_shot()).expect("one shot");
        let interface = dev.core.release();
        assert_eq!(
            interface.writes(),
            [
                (Register::CtrlReg1.addr(), ctrl_reg1::BDU),
                (Register::CtrlReg2.addr(), ctrl_reg2::ONE_SHOT),
            ]
        );
    }

    #[test]
    fn low_current_toggles_res_conf() {
        let mut dev = lps33k(MockInterface::default());
        block_on(dev.set_low_current(true)).expect("on");
        block_on(dev.set_low_current(false)).expect("off");
        assert_eq!(dev.core.release().reg(Register::ResConf.addr()), 0);
    }

    #[test]
    fn fifo_config_enables_fifo() {
        let mut dev = lps33hw(MockInterface::default(), BusMode::I2c);
        let config = FifoConfig::new(FifoMode::DynamicStream, 31).with_stop_on_watermark(true);
        block_on(dev.apply_fifo_config(config)).expect("fifo");
        let interface = dev.core.release();
        assert_eq!(
            interface.reg(Register::CtrlReg2.addr()),
            ctrl_reg2::FIFO_EN | ctrl_reg2::STOP_ON_FTH
        );
        assert_eq!(interface.reg(Register::FifoCtrl.addr()), 0b1101_1111);
    }

    #[test]
    fn fifo_watermark_is_five_bits() {
        let mut dev = lps33hw(MockInterface::default(), BusMode::I2c);
        assert_eq!(block_on(dev.set_fifo_watermark(32)), Err(Error::InvalidData));
        assert_eq!(
            block_on(dev.apply_fifo_config(FifoConfig::new(FifoMode::Fifo, 40))),
            Err(Error::InvalidData)
        );
        block_on(dev.set_fifo_mode(FifoMode::StreamToFifo)).expect("mode");
        block_on(dev.set_fifo_watermark(7)).expect("watermark");
        assert_eq!(
            dev.core.release().reg(Register::FifoCtrl.addr()),
            0b0110_0111
        );
    }

    #[test]
    fn full_fifo_is_level_32() {
        let interface = MockInterface::default()
            .with_reg(Register::FifoStatus.addr(), 32 | fifo_status::FTH_FIFO);
        let mut dev = lps33hw(interface, BusMode::I2c);
        assert_eq!(block_on(dev.fifo_level()), Ok(32));
        assert_eq!(block_on(dev.fifo_full()), Ok(true));
        assert_eq!(block_on(dev.fifo_watermark_reached()), Ok(true));
        assert_eq!(block_on(dev.fifo_overrun()), Ok(false));
    }

    #[test]
    fn fifo_interrupts_and_pin_share_ctrl_reg3() {
        let mut dev = lps33hw(MockInterface::default(), BusMode::I2c);
        block_on(dev.set_fifo_interrupt(FifoInterrupt::Full)).expect("full");
        block_on(dev.set_fifo_interrupt(FifoInterrupt::Overrun)).expect("ovr");
        block_on(dev.reset_fifo_interrupt(FifoInterrupt::Overrun)).expect("reset");
        block_on(dev.set_pin_config(PinConfig::new().with_active_low(true))).expect("pin");
        assert_eq!(
            dev.core.release().reg(Register::CtrlReg3.addr()),
            ctrl_reg3::F_FSS5 | ctrl_reg3::INT_H_L
        );
    }

    #[test]
    fn fifo_sample_comes_from_output_registers() {
        let mut interface = MockInterface::default();
        interface.queue_block(Register::PressOutXl.addr(), &[0x00, 0x00, 0x40, 0x00, 0x00]);
        let mut dev = lps33hw(interface, BusMode::I2c);
        let sample = block_on(dev.read_fifo_sample()).expect("sample");
        assert_eq!(sample.pressure.hpa_milli(), 1_024_000);
    }

    #[test]
    fn capabilities_report_low_power() {
        let dev = lps33k(MockInterface::default());
        let caps = dev.capabilities();
        assert!(caps.low_power);
        assert_eq!(caps.pressure_max_odr_hz_milli, 75_000);
    }

    #[test]
    fn software_reset_returns_to_uninitialized() {
        let interface = identified().with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::SWRESET);
        let mut dev = lps33hw(interface, BusMode::Spi4Wire);
        let mut delay = MockDelay::default();
        block_on(dev.init()).expect("init");
        block_on(dev.software_reset(&mut delay)).expect("reset");
        assert!(!dev.is_initialized());
    }
}
