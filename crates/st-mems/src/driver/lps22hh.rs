//! LPS22HH-family driver (LPS22CH, LPS27HHTW).
//!
//! Both parts share the register map; the variant marker only changes the
//! part name in logs and whether I3C stays enabled on an I3C bus.

use core::marker::PhantomData;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use super::{RESET_POLL_NS, RESET_TRIES};
use crate::config::lps22hh::{DataRate, validate_watermark};
use crate::config::{Capabilities, FifoConfig, FifoMode, Lps22hhLowPassFilter, Lps22hhOdr, NoiseMode};
use crate::data::{FifoStatus, PressureRaw, PressureSample, TemperatureRaw};
use crate::device::DeviceCore;
use crate::error::Error;
use crate::interface::{BusMode, I2cConfig, I2cInterface, Interface, SpiConfig, SpiInterface};
use crate::interrupt::{FifoInterrupt, PinConfig, impl_int_pin};
use crate::register::lps22hh::{
    Register, ctrl_reg1, ctrl_reg2, ctrl_reg3, fifo_ctrl, fifo_status2, fifo_wtm, if_ctrl, status,
    who_am_i,
};
use crate::register::{field, with_flag};
use crate::sensor::impl_pressure_sensor;
use crate::state::{Channel, ChannelState, RateControl};
use crate::variant::{self, Lps22hhVariant};

/// Rate restored by the first enable after init.
const INITIAL_LAST_RATE: DataRate = DataRate::new(Lps22hhOdr::Hz25, NoiseMode::LowCurrent);
/// Register state of a powered-down part, at init and after disable.
const POWERED_DOWN: DataRate = DataRate::new(Lps22hhOdr::PowerDown, NoiseMode::LowNoise);

/// LPS22HH-family pressure and temperature sensor driver.
pub struct Lps22hh<I, V, INT = ()> {
    core: DeviceCore<I>,
    int: Option<INT>,
    state: ChannelState<DataRate>,
    _variant: PhantomData<V>,
}

/// LPS22CH driver.
pub type Lps22ch<I, INT = ()> = Lps22hh<I, variant::Lps22ch, INT>;
/// I2C type alias for the LPS22CH driver.
pub type Lps22chI2c<I2C, INT = ()> = Lps22ch<I2cInterface<I2C>, INT>;
/// SPI type alias for the LPS22CH driver.
pub type Lps22chSpi<SPI, INT = ()> = Lps22ch<SpiInterface<SPI>, INT>;

/// LPS27HHTW driver.
pub type Lps27hhtw<I, INT = ()> = Lps22hh<I, variant::Lps27hhtw, INT>;
/// I2C type alias for the LPS27HHTW driver.
pub type Lps27hhtwI2c<I2C, INT = ()> = Lps27hhtw<I2cInterface<I2C>, INT>;
/// SPI type alias for the LPS27HHTW driver.
pub type Lps27hhtwSpi<SPI, INT = ()> = Lps27hhtw<SpiInterface<SPI>, INT>;

impl<I2C, V, INT> Lps22hh<I2cInterface<I2C>, V, INT>
where
    I2C: I2c,
    V: Lps22hhVariant,
{
    /// Creates a new I2C-based driver at the primary address.
    pub fn new_i2c(i2c: I2C, int: Option<INT>) -> Self {
        Self::with_i2c_config(i2c, int, I2cConfig::default())
    }

    /// Creates a new I2C-based driver with a custom bus configuration.
    ///
    /// `I2cConfig::with_i3c(true)` marks the bus as I3C.
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

impl<SPI, V, INT> Lps22hh<SpiInterface<SPI>, V, INT>
where
    SPI: SpiDevice,
    V: Lps22hhVariant,
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

impl<I, V, INT> Lps22hh<I, V, INT>
where
    I: Interface,
    V: Lps22hhVariant,
{
    const fn from_core(core: DeviceCore<I>, int: Option<INT>) -> Self {
        Self {
            core,
            int,
            state: ChannelState::new(INITIAL_LAST_RATE),
            _variant: PhantomData,
        }
    }

    /// Returns what the part can do.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::pressure(Lps22hhOdr::Hz200.hz_milli(), false)
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
        let keep_i3c = V::KEEP_I3C_ON_I3C_BUS && self.core.bus_mode() == BusMode::I3c;
        if !keep_i3c {
            self.core
                .set_bits(Register::IfCtrl, if_ctrl::I3C_DISABLE, true)
                .await?;
        }

        self.write_rate_regs(POWERED_DOWN).await?;
        self.set_low_pass_filter(Lps22hhLowPassFilter::OdrDiv2)
            .await?;
        self.core
            .set_bits(Register::CtrlReg1, ctrl_reg1::BDU, true)
            .await?;
        self.core
            .set_bits(Register::CtrlReg2, ctrl_reg2::IF_ADD_INC, true)
            .await?;

        self.state.set_last_rate(INITIAL_LAST_RATE);
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
        self.state = ChannelState::new(INITIAL_LAST_RATE);
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

    /// Output data rate in milli-hertz; power-down and one-shot read as 0.
    pub async fn output_data_rate(&mut self) -> Result<u32, Error> {
        Ok(self.read_rate_regs().await?.odr.hz_milli())
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
    pub async fn data_rate(&mut self) -> Result<Lps22hhOdr, Error> {
        Ok(self.read_rate_regs().await?.odr)
    }

    /// Programmed noise mode.
    pub async fn noise_mode(&mut self) -> Result<NoiseMode, Error> {
        Ok(self.read_rate_regs().await?.noise)
    }

    /// Selects low-current or low-noise conversion.
    ///
    /// The choice is kept for the rate restored by the next enable. At 100 Hz
    /// and 200 Hz the part stays in low-current mode.
    pub async fn set_noise_mode(&mut self, noise: NoiseMode) -> Result<(), Error> {
        let current = self.read_rate_regs().await?;
        if current.odr != Lps22hhOdr::PowerDown {
            let rate = DataRate::new(current.odr, noise);
            if rate.noise != noise {
                warn!("{}: low-noise not available at {} mHz", V::NAME, current.odr.hz_milli());
            }
            self.write_rate_regs(rate).await?;
        }
        let last = self.state.last_rate();
        self.state.set_last_rate(DataRate::new(last.odr, noise));
        Ok(())
    }

    async fn read_rate_regs(&mut self) -> Result<DataRate, Error> {
        let reg1 = self.core.read_reg(Register::CtrlReg1).await?;
        let reg2 = self.core.read_reg(Register::CtrlReg2).await?;
        Ok(DataRate::from_regs(reg1, reg2))
    }

    // ODR goes first so a one-shot trigger lands with the ODR field already zero.
    async fn write_rate_regs(&mut self, rate: DataRate) -> Result<(), Error> {
        let reg1 = self.core.read_reg(Register::CtrlReg1).await?;
        self.core
            .write_reg(Register::CtrlReg1, rate.apply_ctrl_reg1(reg1))
            .await?;
        let reg2 = self.core.read_reg(Register::CtrlReg2).await?;
        self.core
            .write_reg(Register::CtrlReg2, rate.apply_ctrl_reg2(reg2))
            .await
    }

    /// Reads the pressure low-pass filter setting.
    pub async fn low_pass_filter(&mut self) -> Result<Lps22hhLowPassFilter, Error> {
        let reg = self.core.read_reg(Register::CtrlReg1).await?;
        Ok(Lps22hhLowPassFilter::from_bits(field(
            reg,
            ctrl_reg1::LPFP_MASK,
            ctrl_reg1::LPFP_SHIFT,
        )))
    }

    /// Selects the pressure low-pass filter.
    pub async fn set_low_pass_filter(&mut self, lpf: Lps22hhLowPassFilter) -> Result<(), Error> {
        let reg = self.core.read_reg(Register::CtrlReg1).await?;
        self.core.write_reg(Register::CtrlReg1, lpf.apply(reg)).await
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

    /// Starts a single conversion; the part returns to power-down afterwards.
    pub async fn set_one_shot(&mut self) -> Result<(), Error> {
        let noise = self.read_rate_regs().await?.noise;
        self.write_rate_regs(DataRate::new(Lps22hhOdr::OneShot, noise))
            .await
    }

    /// Returns true once both pressure and temperature of a one-shot are available.
    pub async fn one_shot_status(&mut self) -> Result<bool, Error> {
        let value = self.core.read_reg(Register::Status).await?;
        Ok((value & status::P_DA) != 0 && (value & status::T_DA) != 0)
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
                Register::CtrlReg2,
                ctrl_reg2::INT_H_L | ctrl_reg2::PP_OD,
                pin.bits(ctrl_reg2::INT_H_L, ctrl_reg2::PP_OD),
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
        debug!(
            "{} fifo mode {:#x}, watermark {}",
            V::NAME,
            mode_bits,
            config.watermark
        );
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
        let mut buf = [0u8; 2];
        self.core.read_regs(Register::FifoStatus1, &mut buf).await?;
        Ok(FifoStatus::from_lps22(buf[0], buf[1]))
    }

    /// Number of unread FIFO samples.
    pub async fn fifo_level(&mut self) -> Result<u8, Error> {
        self.core.read_reg(Register::FifoStatus1).await
    }

    /// Returns FIFO_STATUS2.FIFO_WTM_IA.
    pub async fn fifo_watermark_reached(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::FifoStatus2, fifo_status2::WTM)
            .await
    }

    /// Returns FIFO_STATUS2.FIFO_FULL_IA.
    pub async fn fifo_full(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::FifoStatus2, fifo_status2::FULL)
            .await
    }

    /// Returns FIFO_STATUS2.FIFO_OVR_IA.
    pub async fn fifo_overrun(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::FifoStatus2, fifo_status2::OVR)
            .await
    }

    /// Pops one pressure and temperature pair from the FIFO.
    pub async fn read_fifo_sample(&mut self) -> Result<PressureSample, Error> {
        let mut buf = [0u8; 5];
        self.core
            .read_regs(Register::FifoDataOutPressXl, &mut buf)
            .await?;
        Ok(PressureSample::from_le_bytes(buf))
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
        FifoInterrupt::Threshold => ctrl_reg3::INT_F_WTM,
        FifoInterrupt::Full => ctrl_reg3::INT_F_FULL,
        FifoInterrupt::Overrun => ctrl_reg3::INT_F_OVR,
    }
}

impl<I, V, INT> RateControl for Lps22hh<I, V, INT>
where
    I: Interface,
    V: Lps22hhVariant,
{
    type Rate = DataRate;

    fn channels(&self) -> &ChannelState<DataRate> {
        &self.state
    }

    fn channels_mut(&mut self) -> &mut ChannelState<DataRate> {
        &mut self.state
    }

    async fn read_rate(&mut self) -> Result<DataRate, Error> {
        self.read_rate_regs().await
    }

    async fn write_rate(&mut self, rate: DataRate) -> Result<(), Error> {
        self.write_rate_regs(rate).await
    }

    async fn power_down(&mut self, _current: DataRate) -> Result<(), Error> {
        self.write_rate_regs(POWERED_DOWN).await
    }

    fn retune(current: DataRate, hz_milli: u32) -> DataRate {
        DataRate::new(Lps22hhOdr::from_hz_milli(hz_milli), current.noise)
    }
}

impl_int_pin!(impl<I, V, INT> for Lps22hh<I, V, INT>);

impl_pressure_sensor!(impl<I, V, INT> for Lps22hh<I, V, INT> where I: Interface, V: Lps22hhVariant);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::register::RegisterAddress;
    use crate::testing::{MockDelay, MockInterface};
    use futures::executor::block_on;

    fn lps22ch(interface: MockInterface, bus: BusMode) -> Lps22ch<MockInterface> {
        Lps22hh::from_core(DeviceCore::new(interface, bus), None)
    }

    fn lps27hhtw(interface: MockInterface, bus: BusMode) -> Lps27hhtw<MockInterface> {
        Lps22hh::from_core(DeviceCore::new(interface, bus), None)
    }

    fn identified() -> MockInterface {
        MockInterface::default()
            .with_reg(Register::WhoAmI.addr(), who_am_i::EXPECTED)
            .with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::ONE_SHOT)
    }

    #[test]
    fn init_powers_down_in_low_noise_with_bdu() {
        let interface = identified().with_reg(Register::CtrlReg1.addr(), 0b0011_1100);
        let mut dev = lps22ch(interface, BusMode::I2c);
        block_on(dev.init()).expect("init");
        assert!(dev.is_initialized());

        let interface = dev.core.release();
        assert_eq!(interface.reg(Register::IfCtrl.addr()), if_ctrl::I3C_DISABLE);
        assert_eq!(interface.reg(Register::CtrlReg1.addr()), ctrl_reg1::BDU);
        assert_eq!(
            interface.reg(Register::CtrlReg2.addr()),
            ctrl_reg2::LOW_NOISE_EN | ctrl_reg2::IF_ADD_INC
        );
    }

    #[test]
    fn lps27hhtw_keeps_i3c_on_i3c_bus() {
        let mut dev = lps27hhtw(identified(), BusMode::I3c);
        block_on(dev.init()).expect("init");
        assert_eq!(dev.core.release().reg(Register::IfCtrl.addr()), 0);

        let mut dev = lps22ch(identified(), BusMode::I3c);
        block_on(dev.init()).expect("init");
        assert_eq!(
            dev.core.release().reg(Register::IfCtrl.addr()),
            if_ctrl::I3C_DISABLE
        );

        let mut dev = lps27hhtw(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        assert_eq!(
            dev.core.release().reg(Register::IfCtrl.addr()),
            if_ctrl::I3C_DISABLE
        );
    }

    #[test]
    fn three_wire_spi_binds_before_identification() {
        let mut dev = lps22ch(identified(), BusMode::Spi3Wire);
        block_on(dev.init()).expect("init");
        let interface = dev.core.release();
        assert_eq!(interface.writes()[0], (Register::CtrlReg1.addr(), ctrl_reg1::SIM));
        assert_eq!(
            interface.reg(Register::CtrlReg1.addr()),
            ctrl_reg1::SIM | ctrl_reg1::BDU
        );
    }

    #[test]
    fn wrong_id_is_reported() {
        let interface = MockInterface::default().with_reg(Register::WhoAmI.addr(), 0xB4);
        let mut dev = lps22ch(interface, BusMode::I2c);
        assert_eq!(block_on(dev.init()), Err(Error::WrongDevice));
        assert!(!dev.is_initialized());
    }

    #[test]
    fn enable_disable_restores_last_rate() {
        let mut dev = lps22ch(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");

        block_on(dev.enable_pressure()).expect("enable");
        assert_eq!(block_on(dev.output_data_rate()), Ok(25_000));
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowCurrent));

        block_on(dev.set_pressure_output_data_rate(90_000)).expect("odr");
        assert_eq!(block_on(dev.data_rate()), Ok(Lps22hhOdr::Hz100));

        block_on(dev.enable_temperature()).expect("enable temperature");
        block_on(dev.disable_pressure()).expect("disable pressure");
        assert_eq!(block_on(dev.output_data_rate()), Ok(100_000));

        block_on(dev.disable_temperature()).expect("disable temperature");
        assert_eq!(block_on(dev.data_rate()), Ok(Lps22hhOdr::PowerDown));

        block_on(dev.enable_pressure()).expect("re-enable");
        assert_eq!(block_on(dev.output_data_rate()), Ok(100_000));
    }

    #[test]
    fn rate_set_while_disabled_is_deferred() {
        let mut dev = lps22ch(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.set_temperature_output_data_rate(2_000)).expect("odr");
        assert_eq!(block_on(dev.data_rate()), Ok(Lps22hhOdr::PowerDown));

        block_on(dev.enable_temperature()).expect("enable");
        assert_eq!(block_on(dev.output_data_rate()), Ok(10_000));
    }

    #[test]
    fn noise_mode_survives_power_cycle() {
        let mut dev = lps22ch(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.set_noise_mode(NoiseMode::LowNoise)).expect("noise");
        block_on(dev.enable_pressure()).expect("enable");
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowNoise));
        assert_eq!(block_on(dev.data_rate()), Ok(Lps22hhOdr::Hz25));
    }

    #[test]
    fn fast_rates_run_in_low_current() {
        let mut dev = lps22ch(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.set_noise_mode(NoiseMode::LowNoise)).expect("noise");
        block_on(dev.enable_pressure()).expect("enable");

        block_on(dev.set_pressure_output_data_rate(100_000)).expect("odr");
        assert_eq!(block_on(dev.data_rate()), Ok(Lps22hhOdr::Hz100));
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowCurrent));

        block_on(dev.set_noise_mode(NoiseMode::LowNoise)).expect("noise at 100 Hz");
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowCurrent));

        block_on(dev.set_pressure_output_data_rate(200_000)).expect("odr");
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowCurrent));

        block_on(dev.set_pressure_output_data_rate(50_000)).expect("odr");
        block_on(dev.set_noise_mode(NoiseMode::LowNoise)).expect("noise at 50 Hz");
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowNoise));
    }

    #[test]
    fn disable_powers_down_like_init() {
        let mut dev = lps22ch(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        let after_init = block_on(dev.read_register(Register::CtrlReg2.addr())).expect("read");

        block_on(dev.enable_pressure()).expect("enable");
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowCurrent));
        block_on(dev.disable_pressure()).expect("disable");

        assert_eq!(block_on(dev.data_rate()), Ok(Lps22hhOdr::PowerDown));
        assert_eq!(
            block_on(dev.read_register(Register::CtrlReg2.addr())),
            Ok(after_init)
        );

        block_on(dev.enable_pressure()).expect("re-enable");
        assert_eq!(block_on(dev.noise_mode()), Ok(NoiseMode::LowCurrent));
    }

    #[test]
    fn one_shot_writes_trigger_with_odr_cleared() {
        let interface = identified().with_reg(Register::CtrlReg1.addr(), 0b0011_0000);
        let mut dev = lps22ch(interface, BusMode::I2c);
        block_on(dev.set_one_shot()).expect("one shot");
        let interface = dev.core.release();
        assert_eq!(
            interface.writes(),
            [
                (Register::CtrlReg1.addr(), 0),
                (Register::CtrlReg2.addr(), ctrl_reg2::ONE_SHOT),
            ]
        );
    }

    #[test]
    fn one_shot_status_needs_both_flags() {
        let interface = MockInterface::default().with_reg(Register::Status.addr(), status::P_DA);
        let mut dev = lps22ch(interface, BusMode::I2c);
        assert_eq!(block_on(dev.one_shot_status()), Ok(false));

        let interface =
            MockInterface::default().with_reg(Register::Status.addr(), status::P_DA | status::T_DA);
        let mut dev = lps22ch(interface, BusMode::I2c);
        assert_eq!(block_on(dev.one_shot_status()), Ok(true));
    }

    #[test]
    fn fifo_mode_and_watermark() {
        let mut dev = lps22ch(MockInterface::default(), BusMode::I2c);
        block_on(dev.set_fifo_mode(FifoMode::BypassToStream)).expect("mode");
        block_on(dev.set_fifo_watermark(32)).expect("watermark");
        block_on(dev.set_fifo_stop_on_watermark(true)).expect("stop");
        assert_eq!(block_on(dev.set_fifo_watermark(200)), Err(Error::InvalidData));
        assert_eq!(
            block_on(dev.set_fifo_mode(FifoMode::DynamicStream)),
            Err(Error::Unsupported)
        );

        let interface = dev.core.release();
        assert_eq!(
            interface.reg(Register::FifoCtrl.addr()),
            0b110 | fifo_ctrl::STOP_ON_WTM
        );
        assert_eq!(interface.reg(Register::FifoWtm.addr()), 32);
    }

    #[test]
    fn fifo_config_is_one_burst() {
        let mut dev = lps22ch(MockInterface::default(), BusMode::I2c);
        block_on(dev.apply_fifo_config(FifoConfig::new(FifoMode::Stream, 10))).expect("fifo");
        assert_eq!(
            dev.core.release().write_bursts(),
            [(Register::FifoCtrl.addr(), std::vec![0b010, 10])]
        );
    }

    #[test]
    fn fifo_flags_decode_from_status2() {
        let interface = MockInterface::default()
            .with_reg(Register::FifoStatus1.addr(), 128)
            .with_reg(
                Register::FifoStatus2.addr(),
                fifo_status2::FULL | fifo_status2::WTM,
            );
        let mut dev = lps22ch(interface, BusMode::I2c);
        assert_eq!(block_on(dev.fifo_level()), Ok(128));
        assert_eq!(block_on(dev.fifo_full()), Ok(true));
        assert_eq!(block_on(dev.fifo_watermark_reached()), Ok(true));
        assert_eq!(block_on(dev.fifo_overrun()), Ok(false));
        let status = block_on(dev.fifo_status()).expect("status");
        assert_eq!(status.level, 128);
        assert!(status.full && status.watermark && !status.overrun);
    }

    #[test]
    fn fifo_sample_reads_pressure_and_temperature() {
        let mut interface = MockInterface::default();
        interface.queue_block(
            Register::FifoDataOutPressXl.addr(),
            &[0x00, 0xF0, 0x3F, 0xE6, 0x09],
        );
        let mut dev = lps22ch(interface, BusMode::I2c);
        let sample = block_on(dev.read_fifo_sample()).expect("sample");
        assert_eq!(sample.pressure.hpa_milli(), 1_023_000);
        assert_eq!(sample.temperature.mdegc(), 25_340);
    }

    #[test]
    fn fifo_interrupts_live_in_ctrl_reg3() {
        let mut dev = lps22ch(MockInterface::default(), BusMode::I2c);
        block_on(dev.set_fifo_interrupt(FifoInterrupt::Overrun)).expect("set");
        block_on(dev.set_fifo_interrupt(FifoInterrupt::Threshold)).expect("set");
        block_on(dev.reset_fifo_interrupt(FifoInterrupt::Overrun)).expect("reset");
        block_on(dev.enable_data_ready_interrupt()).expect("drdy");
        assert_eq!(
            dev.core.release().reg(Register::CtrlReg3.addr()),
            ctrl_reg3::INT_F_WTM | ctrl_reg3::DRDY
        );
    }

    #[test]
    fn filter_and_pin_config() {
        let mut dev = lps22ch(MockInterface::default(), BusMode::I2c);
        block_on(dev.set_low_pass_filter(Lps22hhLowPassFilter::OdrDiv20)).expect("lpf");
        assert_eq!(
            block_on(dev.low_pass_filter()),
            Ok(Lps22hhLowPassFilter::OdrDiv20)
        );
        block_on(dev.set_pin_config(PinConfig::new().with_open_drain(true))).expect("pin");
        assert_eq!(
            dev.core.release().reg(Register::CtrlReg2.addr()),
            ctrl_reg2::PP_OD
        );
    }

    #[test]
    fn software_reset_clears_driver_state() {
        let interface = identified().with_autoclear(Register::CtrlReg2.addr(), ctrl_reg2::SWRESET);
        let mut dev = lps27hhtw(interface, BusMode::Spi4Wire);
        let mut delay = MockDelay::default();
        block_on(dev.init()).expect("init");
        block_on(dev.enable_pressure()).expect("enable");
        block_on(dev.software_reset(&mut delay)).expect("reset");
        assert!(!dev.is_initialized());
        assert!(!dev.is_pressure_enabled());
    }

    #[test]
    fn deinit_powers_down() {
        let mut dev = lps22ch(identified(), BusMode::I2c);
        block_on(dev.init()).expect("init");
        block_on(dev.enable_pressure()).expect("enable");
        block_on(dev.deinit()).expect("deinit");
        assert!(!dev.is_initialized());
        assert_eq!(block_on(dev.output_data_rate()), Ok(0));
    }
}
