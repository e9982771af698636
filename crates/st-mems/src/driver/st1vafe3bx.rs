//! ST1VAFE3BX accelerometer + vAFE driver.
//!
//! The accelerometer rate is remembered by the driver while the sensor is
//! disabled and only reaches CTRL5 on enable. Wake-up and 6D detection are
//! wired to INT1 only.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use super::{RESET_POLL_NS, RESET_TRIES};
use crate::config::{AccelFullScale, AccelMode, AccelOdr, Capabilities, PowerMode};
use crate::data::fifo::VafeFifoRegs;
use crate::data::{
    AccelMg, AccelRaw, FIFO_RECORD_LEN, FifoRecord, FifoRecordIterator, VafeFifoConfig,
    VafeFifoStatus, VafeRaw, accel_ug_per_lsb,
};
use crate::device::DeviceCore;
use crate::error::Error;
use crate::interface::{
    BusMode, I2cConfig, I2cInterface, Interface, SpiConfig, SpiInterface, VafeAddress,
};
use crate::interrupt::{EventStatus, InterruptPin, InterruptRouting, impl_int_pin};
use crate::orientation::{Orientation, validate_6d_threshold};
use crate::register::st1vafe3bx::{
    Register, ah_bio_cfg2, ah_bio_cfg3, ctrl1, ctrl2, ctrl3, ctrl4, en_device_config, fifo_wtm,
    func_cfg_access, i3c_if_ctrl, interrupt_cfg, md1_cfg, sixd, status, wake_up_dur,
    wake_up_dur_ext, wake_up_ths, who_am_i,
};
use crate::register::with_field;
use crate::self_test::{SelfTestSign, SelfTestStep};
use crate::wake_up::{WakeUpDuration, WakeUpThreshold};

/// Settling time after leaving deep power-down, and BOOT poll period.
const BOOT_TIME_NS: u32 = 25_000_000;
/// Settling time after stepping down from 800 Hz before power-off.
const ODR_STEP_DOWN_NS: u32 = 3_000_000;
/// Rate that needs the step-down, and the rate stepped down to.
const MAX_ODR_HZ_MILLI: u32 = 800_000;
const STEP_DOWN_ODR_HZ_MILLI: u32 = 400_000;

/// Rate stored by `init`, applied on the first enable.
const INITIAL_ODR_HZ_MILLI: u32 = 100_000;
const WAKE_UP_ODR_HZ_MILLI: u32 = 200_000;
const WAKE_UP_THRESHOLD_MG: u32 = 63;
const SIX_D_ODR_HZ_MILLI: u32 = 400_000;
const SIX_D_THRESHOLD: u8 = 2;

/// One-off device operations run through [`St1vafe3bx::init_set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitAction {
    /// Reload trimming parameters (CTRL4.BOOT).
    Boot,
    /// Software reset (CTRL1.SW_RESET).
    Reset,
    /// Embedded functions off, BDU and register auto-increment on.
    SensorOnlyOn,
}

/// Register bank selected through FUNC_CFG_ACCESS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemBank {
    /// User registers.
    Main,
    /// Embedded function registers.
    EmbeddedFunctions,
}

/// Rate requested by the user, kept across disable / enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StoredRate {
    hz_milli: u32,
    power: PowerMode,
}

impl StoredRate {
    const fn odr(self) -> AccelOdr {
        AccelOdr::quantize(self.hz_milli, self.power)
    }
}

/// ST1VAFE3BX driver.
pub struct St1vafe3bx<I, INT = ()> {
    core: DeviceCore<I>,
    int: Option<INT>,
    initialized: bool,
    enabled: bool,
    rate: StoredRate,
}

/// I2C type alias for the ST1VAFE3BX driver.
pub type St1vafe3bxI2c<I2C, INT = ()> = St1vafe3bx<I2cInterface<I2C>, INT>;
/// SPI type alias for the ST1VAFE3BX driver.
pub type St1vafe3bxSpi<SPI, INT = ()> = St1vafe3bx<SpiInterface<SPI>, INT>;

impl<I2C, INT> St1vafe3bx<I2cInterface<I2C>, INT>
where
    I2C: I2c,
{
    /// Creates a new I2C-based driver at the primary address (0x20).
    pub fn new_i2c(i2c: I2C, int: Option<INT>) -> Self {
        Self::with_i2c_config(i2c, int, I2cConfig::new(VafeAddress::Primary.addr()))
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
    pub async fn init_with_addresses<D: DelayNs>(
        &mut self,
        addresses: &[u8],
        delay: &mut D,
    ) -> Result<u8, Error> {
        let mut last_err = None;
        for &address in addresses {
            self.set_i2c_address(address);
            match self.init(delay).await {
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

impl<SPI, INT> St1vafe3bx<SpiInterface<SPI>, INT>
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

impl<I, INT> St1vafe3bx<I, INT>
where
    I: Interface,
{
    const fn from_core(core: DeviceCore<I>, int: Option<INT>) -> Self {
        Self {
            core,
            int,
            initialized: false,
            enabled: false,
            rate: StoredRate {
                hz_milli: 0,
                power: PowerMode::LowPower,
            },
        }
    }

    /// Returns what the ST1VAFE3BX can do.
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::accelerometer(AccelOdr::Lp800Hz.hz_milli(), AccelFullScale::G16.g())
    }

    /// Bus the driver was built for.
    pub const fn bus_mode(&self) -> BusMode {
        self.core.bus_mode()
    }

    /// Returns whether `init` has completed.
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns whether the accelerometer is enabled.
    pub const fn is_accel_enabled(&self) -> bool {
        self.enabled
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

    /// Wakes the part from deep power-down and waits for it to settle.
    ///
    /// Over I2C / I3C any transaction wakes the device; over SPI the
    /// EN_DEVICE_CONFIG bit has to be written.
    pub async fn exit_deep_power_down<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if self.core.bus_mode().is_spi() {
            self.core
                .write_reg(Register::EnDeviceConfig, en_device_config::EN_DEV_CONF)
                .await?;
        } else {
            let _ = self.core.read_reg(Register::WhoAmI).await?;
        }
        delay.delay_ns(BOOT_TIME_NS).await;
        Ok(())
    }

    /// Runs a boot, a software reset, or the sensor-only setup.
    pub async fn init_set<D: DelayNs>(
        &mut self,
        action: InitAction,
        delay: &mut D,
    ) -> Result<(), Error> {
        match action {
            InitAction::Boot => {
                self.core
                    .set_and_wait_clear(
                        Register::Ctrl4,
                        ctrl4::BOOT,
                        delay,
                        BOOT_TIME_NS,
                        RESET_TRIES,
                    )
                    .await
            }
            InitAction::Reset => {
                self.core
                    .set_and_wait_clear(
                        Register::Ctrl1,
                        ctrl1::SW_RESET,
                        delay,
                        RESET_POLL_NS,
                        RESET_TRIES,
                    )
                    .await?;
                self.initialized = false;
                self.enabled = false;
                Ok(())
            }
            InitAction::SensorOnlyOn => self.sensor_only_on().await,
        }
    }

    async fn sensor_only_on(&mut self) -> Result<(), Error> {
        self.core
            .modify_reg(
                Register::Ctrl4,
                ctrl4::EMB_FUNC_EN | ctrl4::BDU,
                ctrl4::BDU,
            )
            .await?;
        self.core
            .set_bits(Register::Ctrl1, ctrl1::IF_ADD_INC, true)
            .await
    }

    /// Wakes the part from deep power-down, identifies it and applies the
    /// default configuration.
    ///
    /// Leaves the accelerometer off with a stored rate of 100 Hz low-power.
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if self.initialized {
            return Ok(());
        }
        self.exit_deep_power_down(delay).await?;
        if self.core.bus_mode() == BusMode::Spi3Wire {
            self.core
                .write_reg(Register::Ctrl1, ctrl1::SPI_3WIRE_BIND)
                .await?;
        }
        self.verify_device().await?;

        if self.core.bus_mode() != BusMode::I3c {
            self.core
                .set_bits(Register::I3cIfCtrl, i3c_if_ctrl::ASF_ON, true)
                .await?;
        }
        self.set_mem_bank(MemBank::Main).await?;
        self.sensor_only_on().await?;
        self.apply_fifo_config(VafeFifoConfig::DEFAULT).await?;
        self.rate = StoredRate {
            hz_milli: INITIAL_ODR_HZ_MILLI,
            power: PowerMode::LowPower,
        };
        self.write_mode(AccelMode::DEFAULT).await?;
        self.initialized = true;
        debug!("ST1VAFE3BX initialized");
        Ok(())
    }

    /// Disables the accelerometer and clears the init flag.
    pub async fn deinit<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.disable_accel(delay).await?;
        self.rate = StoredRate {
            hz_milli: 0,
            power: PowerMode::LowPower,
        };
        self.initialized = false;
        Ok(())
    }

    /// Reads the programmed rate, full scale and bandwidth.
    pub async fn mode(&mut self) -> Result<AccelMode, Error> {
        let ctrl5 = self.core.read_reg(Register::Ctrl5).await?;
        let ctrl3 = self.core.read_reg(Register::Ctrl3).await?;
        let vafe_en = self.vafe_enabled().await?;
        Ok(AccelMode::from_regs(ctrl5, ctrl3, vafe_en))
    }

    /// Writes rate, full scale and bandwidth.
    ///
    /// Fails with [`Error::InvalidData`] for a 6 / 12.5 / 25 Hz low-power rate
    /// combined with the ODR/2 bandwidth.
    pub async fn set_mode(&mut self, mode: AccelMode) -> Result<(), Error> {
        self.write_mode(mode).await
    }

    async fn write_mode(&mut self, mode: AccelMode) -> Result<(), Error> {
        let ctrl5 = self.core.read_reg(Register::Ctrl5).await?;
        let ctrl3 = self.core.read_reg(Register::Ctrl3).await?;
        let (ctrl5, ctrl3) = mode.apply(ctrl5, ctrl3)?;
        self.core.write_reg(Register::Ctrl5, ctrl5).await?;
        self.core.write_reg(Register::Ctrl3, ctrl3).await
    }

    /// Starts the accelerometer at the stored rate.
    pub async fn enable_accel(&mut self) -> Result<(), Error> {
        if self.enabled {
            return Ok(());
        }
        self.write_rate(self.rate).await?;
        self.enabled = true;
        Ok(())
    }

    /// Powers the accelerometer off.
    ///
    /// From 800 Hz the part first steps down to 400 Hz low-power for 3 ms;
    /// that rate becomes the stored rate for the next enable.
    pub async fn disable_accel<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if !self.enabled {
            return Ok(());
        }
        if self.output_data_rate().await? == MAX_ODR_HZ_MILLI {
            self.write_rate(StoredRate {
                hz_milli: STEP_DOWN_ODR_HZ_MILLI,
                power: PowerMode::LowPower,
            })
            .await?;
            delay.delay_ns(ODR_STEP_DOWN_NS).await;
        }
        let mode = self.mode().await?;
        self.write_mode(mode.with_odr(AccelOdr::Off)).await?;
        self.enabled = false;
        Ok(())
    }

    async fn write_rate(&mut self, rate: StoredRate) -> Result<(), Error> {
        let mode = self.mode().await?;
        let odr = rate.odr();
        self.write_mode(mode.retuned(odr)).await?;
        self.rate = StoredRate {
            hz_milli: odr.hz_milli(),
            power: rate.power,
        };
        trace!("accel odr {} mHz", odr.hz_milli());
        Ok(())
    }

    /// Sets the output data rate in low-power mode.
    pub async fn set_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error> {
        self.set_output_data_rate_with_mode(hz_milli, PowerMode::LowPower)
            .await
    }

    /// Sets the output data rate in the given power mode.
    ///
    /// The rate snaps up to the next supported value. While the sensor is
    /// disabled it is only stored.
    pub async fn set_output_data_rate_with_mode(
        &mut self,
        hz_milli: u32,
        power: PowerMode,
    ) -> Result<(), Error> {
        let rate = StoredRate { hz_milli, power };
        if self.enabled {
            self.write_rate(rate).await
        } else {
            self.rate = StoredRate {
                hz_milli: rate.odr().hz_milli(),
                power,
            };
            Ok(())
        }
    }

    /// Output data rate programmed in the device, in milli-hertz.
    ///
    /// Off and the trigger modes report 0.
    pub async fn output_data_rate(&mut self) -> Result<u32, Error> {
        Ok(self.mode().await?.odr.hz_milli())
    }

    /// Programmed full scale.
    pub async fn full_scale(&mut self) -> Result<AccelFullScale, Error> {
        Ok(self.mode().await?.full_scale)
    }

    /// Sets the full scale; `g` snaps up to 2, 4, 8 or 16.
    pub async fn set_full_scale(&mut self, g: u16) -> Result<(), Error> {
        let mode = self.mode().await?;
        self.write_mode(mode.with_full_scale(AccelFullScale::from_g(g)))
            .await
    }

    /// Sensitivity at the programmed full scale, in µg/LSB.
    pub async fn sensitivity_ug_per_lsb(&mut self) -> Result<i32, Error> {
        Ok(accel_ug_per_lsb(self.full_scale().await?))
    }

    /// Reads the raw acceleration.
    pub async fn read_accel_raw(&mut self) -> Result<AccelRaw, Error> {
        let mut buf = [0u8; 6];
        self.core.read_regs(Register::OutXL, &mut buf).await?;
        Ok(AccelRaw::from_le_bytes(buf))
    }

    /// Reads the acceleration in milli-g.
    pub async fn read_accel_mg(&mut self) -> Result<AccelMg, Error> {
        let full_scale = self.full_scale().await?;
        Ok(self.read_accel_raw().await?.to_mg(full_scale))
    }

    /// Reads the raw vAFE output.
    pub async fn read_vafe_raw(&mut self) -> Result<VafeRaw, Error> {
        let mut buf = [0u8; 2];
        self.core.read_regs(Register::OutAhBioL, &mut buf).await?;
        Ok(VafeRaw {
            value: i16::from_le_bytes(buf),
        })
    }

    /// Reads the vAFE potential in microvolts.
    pub async fn read_vafe_uv(&mut self) -> Result<i32, Error> {
        Ok(self.read_vafe_raw().await?.uv())
    }

    /// Returns STATUS.DRDY.
    pub async fn accel_data_ready(&mut self) -> Result<bool, Error> {
        self.core.bits_set(Register::Status, status::DRDY).await
    }

    /// Selects the register bank.
    pub async fn set_mem_bank(&mut self, bank: MemBank) -> Result<(), Error> {
        self.core
            .set_bits(
                Register::FuncCfgAccess,
                func_cfg_access::EMB_FUNC_REG_ACCESS,
                bank == MemBank::EmbeddedFunctions,
            )
            .await
    }

    /// Starts a conversion; only acts in the software-trigger mode.
    pub async fn trigger_sw(&mut self) -> Result<(), Error> {
        if self.mode().await?.odr == AccelOdr::TrigSw {
            self.core.set_bits(Register::Ctrl4, ctrl4::SOC, true).await?;
        }
        Ok(())
    }

    /// Enables the INT pin and replaces the CTRL2 / MD1_CFG routing.
    pub async fn route_interrupts(&mut self, routing: InterruptRouting) -> Result<(), Error> {
        self.core
            .set_bits(Register::Ctrl1, ctrl1::INT_PIN_EN, true)
            .await?;
        let ctrl2_mask = ctrl2::INT_DRDY
            | ctrl2::INT_FIFO_OVR
            | ctrl2::INT_FIFO_TH
            | ctrl2::INT_FIFO_FULL
            | ctrl2::INT_BOOT;
        self.core
            .modify_reg(Register::Ctrl2, ctrl2_mask, routing.ctrl2_bits())
            .await?;
        self.core
            .write_reg(Register::Md1Cfg, routing.md1_bits())
            .await
    }

    /// Reads the routed wake-up and 6D events.
    pub async fn event_status(&mut self) -> Result<EventStatus, Error> {
        let md1 = self.core.read_reg(Register::Md1Cfg).await?;
        let all_int_src = self.core.read_reg(Register::AllIntSrc).await?;
        Ok(EventStatus::from_regs(md1, all_int_src))
    }

    /// Configures wake-up detection on `pin`.
    ///
    /// Sets 200 Hz, ±2 g, a 63 mg threshold and no duration. Only INT1 is
    /// supported.
    pub async fn enable_wake_up_detection(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.set_output_data_rate(WAKE_UP_ODR_HZ_MILLI).await?;
        self.set_full_scale(2).await?;
        self.set_wake_up_threshold(WAKE_UP_THRESHOLD_MG).await?;
        self.set_wake_up_duration(0).await?;
        self.core
            .set_bits(Register::Ctrl1, ctrl1::WU_XYZ_EN, true)
            .await?;
        self.route_event(pin, md1_cfg::INT_WU).await
    }

    /// Stops wake-up detection and clears its threshold and duration.
    pub async fn disable_wake_up_detection(&mut self) -> Result<(), Error> {
        self.core
            .set_bits(Register::Md1Cfg, md1_cfg::INT_WU, false)
            .await?;
        self.core
            .set_bits(Register::Ctrl1, ctrl1::WU_XYZ_EN, false)
            .await?;
        self.set_wake_up_threshold(0).await?;
        self.set_wake_up_duration(0).await
    }

    /// Sets the wake-up threshold in mg at the programmed full scale.
    pub async fn set_wake_up_threshold(&mut self, mg: u32) -> Result<(), Error> {
        let full_scale = self.full_scale().await?;
        let threshold = WakeUpThreshold::from_mg(mg, full_scale);
        self.core
            .set_bits(Register::InterruptCfg, interrupt_cfg::WAKE_THS_W, threshold.fine)
            .await?;
        self.core
            .modify_reg(Register::WakeUpThs, wake_up_ths::WK_THS_MASK, threshold.steps)
            .await
    }

    /// Sets the wake-up duration in ODR cycles (0, 1, 2, 3, 7, 11 or 15).
    pub async fn set_wake_up_duration(&mut self, samples: u8) -> Result<(), Error> {
        let duration = WakeUpDuration::from_samples(samples)?;
        let dur = self.core.read_reg(Register::WakeUpDur).await?;
        let dur = with_field(
            dur,
            wake_up_dur::WAKE_DUR_MASK,
            wake_up_dur::WAKE_DUR_SHIFT,
            duration.code,
        );
        self.core.write_reg(Register::WakeUpDur, dur).await?;
        self.core
            .set_bits(
                Register::WakeUpDurExt,
                wake_up_dur_ext::WU_DUR_EXTENDED,
                duration.extended,
            )
            .await
    }

    /// Configures 6D orientation detection on `pin`.
    ///
    /// Sets 400 Hz, ±2 g and threshold code 2. Only INT1 is supported.
    pub async fn enable_6d_orientation(&mut self, pin: InterruptPin) -> Result<(), Error> {
        self.set_output_data_rate(SIX_D_ODR_HZ_MILLI).await?;
        self.set_full_scale(2).await?;
        self.set_6d_threshold(SIX_D_THRESHOLD).await?;
        self.route_event(pin, md1_cfg::INT_6D).await
    }

    /// Stops 6D orientation detection.
    pub async fn disable_6d_orientation(&mut self) -> Result<(), Error> {
        self.set_6d_threshold(0).await?;
        self.core
            .set_bits(Register::Md1Cfg, md1_cfg::INT_6D, false)
            .await
    }

    /// Sets SIXD.d6d_ths (0..=3).
    pub async fn set_6d_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        let threshold = validate_6d_threshold(threshold)?;
        let reg = self.core.read_reg(Register::Sixd).await?;
        let reg = with_field(reg, sixd::D6D_THS_MASK, sixd::D6D_THS_SHIFT, threshold);
        self.core.write_reg(Register::Sixd, reg).await
    }

    /// Reads the latched 6D orientation.
    pub async fn orientation(&mut self) -> Result<Orientation, Error> {
        Ok(Orientation::from_reg(
            self.core.read_reg(Register::SixdSrc).await?,
        ))
    }

    async fn route_event(&mut self, pin: InterruptPin, md1_mask: u8) -> Result<(), Error> {
        if pin != InterruptPin::Int1 {
            warn!("event routing to INT2 is not available");
            return Err(Error::Unsupported);
        }
        self.core.set_bits(Register::Md1Cfg, md1_mask, true).await?;
        self.core
            .set_bits(
                Register::InterruptCfg,
                interrupt_cfg::INTERRUPTS_ENABLE,
                true,
            )
            .await
    }

    /// Selects the self-test stimulus direction.
    pub async fn set_self_test_sign(&mut self, sign: SelfTestSign) -> Result<(), Error> {
        let reg3 = self.core.read_reg(Register::Ctrl3).await?;
        let dur = self.core.read_reg(Register::WakeUpDur).await?;
        let reg3 = (reg3 & !(ctrl3::ST_SIGN_X | ctrl3::ST_SIGN_Y)) | sign.ctrl3_bits();
        let dur = (dur & !wake_up_dur::ST_SIGN_Z) | sign.wake_up_dur_bits();
        self.core.write_reg(Register::Ctrl3, reg3).await?;
        self.core.write_reg(Register::WakeUpDur, dur).await
    }

    /// Starts a self-test phase.
    pub async fn start_self_test(&mut self, step: SelfTestStep) -> Result<(), Error> {
        self.write_self_test(step.bits()).await
    }

    /// Ends the self test.
    pub async fn stop_self_test(&mut self) -> Result<(), Error> {
        self.write_self_test(0).await
    }

    async fn write_self_test(&mut self, bits: u8) -> Result<(), Error> {
        let reg = self.core.read_reg(Register::AhBioCfg3).await?;
        let reg = with_field(reg, ah_bio_cfg3::ST_MASK, ah_bio_cfg3::ST_SHIFT, bits);
        self.core.write_reg(Register::AhBioCfg3, reg).await
    }

    /// Powers the vAFE channel (AH_BIO_CFG2.ah_bio_en).
    pub async fn set_vafe_enabled(&mut self, enable: bool) -> Result<(), Error> {
        self.core
            .set_bits(Register::AhBioCfg2, ah_bio_cfg2::AH_BIO_EN, enable)
            .await
    }

    /// Connects the vAFE front end (AH_BIO_CFG3.ah_bio_active).
    pub async fn set_vafe_active(&mut self, active: bool) -> Result<(), Error> {
        self.core
            .set_bits(Register::AhBioCfg3, ah_bio_cfg3::AH_BIO_ACTIVE, active)
            .await
    }

    async fn vafe_enabled(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::AhBioCfg2, ah_bio_cfg2::AH_BIO_EN)
            .await
    }

    async fn read_fifo_regs(&mut self) -> Result<VafeFifoRegs, Error> {
        Ok(VafeFifoRegs {
            batch_dec: self.core.read_reg(Register::FifoBatchDec).await?,
            wtm: self.core.read_reg(Register::FifoWtm).await?,
            fifo_ctrl: self.core.read_reg(Register::FifoCtrl).await?,
            ctrl4: self.core.read_reg(Register::Ctrl4).await?,
        })
    }

    /// Applies a FIFO configuration.
    ///
    /// Registers are written in the order FIFO_BATCH_DEC, FIFO_WTM,
    /// FIFO_CTRL, CTRL4.
    pub async fn apply_fifo_config(&mut self, config: VafeFifoConfig) -> Result<(), Error> {
        let current = self.read_fifo_regs().await?;
        let vafe_en = self.vafe_enabled().await?;
        let regs = config.apply(current, vafe_en)?;
        self.core
            .write_reg(Register::FifoBatchDec, regs.batch_dec)
            .await?;
        self.core.write_reg(Register::FifoWtm, regs.wtm).await?;
        self.core.write_reg(Register::FifoCtrl, regs.fifo_ctrl).await?;
        self.core.write_reg(Register::Ctrl4, regs.ctrl4).await?;
        debug!("fifo ctrl {:#x}, watermark {}", regs.fifo_ctrl, config.watermark);
        Ok(())
    }

    /// Reads back the FIFO configuration.
    pub async fn fifo_config(&mut self) -> Result<VafeFifoConfig, Error> {
        let regs = self.read_fifo_regs().await?;
        VafeFifoConfig::from_regs(regs)
    }

    /// Reads the FIFO level and flags.
    pub async fn fifo_status(&mut self) -> Result<VafeFifoStatus, Error> {
        let mut buf = [0u8; 2];
        self.core.read_regs(Register::FifoStatus1, &mut buf).await?;
        Ok(VafeFifoStatus::from_regs(buf[0], buf[1]))
    }

    /// Number of unread FIFO records.
    pub async fn fifo_level(&mut self) -> Result<u8, Error> {
        self.core.read_reg(Register::FifoStatus2).await
    }

    async fn xl_only(&mut self) -> Result<bool, Error> {
        self.core
            .bits_set(Register::FifoWtm, fifo_wtm::XL_ONLY_FIFO)
            .await
    }

    /// Pops one tagged record from the FIFO.
    pub async fn read_fifo_record(&mut self) -> Result<FifoRecord, Error> {
        let xl_only = self.xl_only().await?;
        let mut buf = [0u8; FIFO_RECORD_LEN];
        self.core
            .read_regs(Register::FifoDataOutTag, &mut buf)
            .await?;
        Ok(FifoRecord::from_bytes(buf, xl_only))
    }

    /// Drains up to `buf.len() / 7` records and returns a decoder over them.
    pub async fn read_fifo_records<'a>(
        &mut self,
        buf: &'a mut [u8],
    ) -> Result<FifoRecordIterator<'a>, Error> {
        let xl_only = self.xl_only().await?;
        let level = self.fifo_level().await? as usize;
        let count = level.min(buf.len() / FIFO_RECORD_LEN);
        for chunk in buf.chunks_exact_mut(FIFO_RECORD_LEN).take(count) {
            self.core
                .read_regs(Register::FifoDataOutTag, chunk)
                .await?;
        }
        let filled: &'a [u8] = &buf[..count * FIFO_RECORD_LEN];
        Ok(FifoRecordIterator::new(filled, xl_only))
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

impl_int_pin!(impl<I, INT> for St1vafe3bx<I, INT>);
