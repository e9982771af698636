//! Common pressure / temperature sensor interface.
//!
//! Every pressure driver implements [`PressureSensor`] so application code can
//! drive an LPS22CH, LPS22DF, LPS27HHTW, LPS33HW or LPS33K through one generic
//! bound. Part-specific features (FIFO, filters, noise mode) stay on the
//! concrete driver types.

use crate::config::Capabilities;
use crate::error::Error;

/// Pressure and temperature operations shared by all supported barometers.
///
/// Both channels run from one conversion engine: the output data rate is
/// shared, and the device only powers down once both channels are disabled.
#[allow(async_fn_in_trait)]
pub trait PressureSensor {
    /// Reads the WHO_AM_I register.
    async fn read_id(&mut self) -> Result<u8, Error>;

    /// Returns what the part can do.
    fn capabilities(&self) -> Capabilities;

    /// Starts pressure conversion at the last configured rate.
    async fn enable_pressure(&mut self) -> Result<(), Error>;

    /// Stops pressure conversion.
    async fn disable_pressure(&mut self) -> Result<(), Error>;

    /// Starts temperature conversion at the last configured rate.
    async fn enable_temperature(&mut self) -> Result<(), Error>;

    /// Stops temperature conversion.
    async fn disable_temperature(&mut self) -> Result<(), Error>;

    /// Output data rate programmed in the device, in milli-hertz.
    ///
    /// Power-down and one-shot report 0.
    async fn output_data_rate(&mut self) -> Result<u32, Error>;

    /// Sets the output data rate through the pressure channel.
    async fn set_pressure_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error>;

    /// Sets the output data rate through the temperature channel.
    async fn set_temperature_output_data_rate(&mut self, hz_milli: u32) -> Result<(), Error>;

    /// Reads the pressure in milli-hPa.
    async fn read_pressure_hpa_milli(&mut self) -> Result<i32, Error>;

    /// Reads the temperature in milli-degrees Celsius.
    async fn read_temperature_mdegc(&mut self) -> Result<i32, Error>;

    /// Returns true when a new pressure sample is available.
    async fn pressure_data_ready(&mut self) -> Result<bool, Error>;

    /// Returns true when a new temperature sample is available.
    async fn temperature_data_ready(&mut self) -> Result<bool, Error>;
}

/// Implements [`PressureSensor`] by forwarding to the driver's inherent methods.
macro_rules! impl_pressure_sensor {
    (impl<$($gen:ident),*> for $ty:ty where $($bounds:tt)*) => {
        impl<$($gen),*> $crate::sensor::PressureSensor for $ty
        where
            $($bounds)*
        {
            async fn read_id(&mut self) -> Result<u8, $crate::error::Error> {
                <$ty>::read_id(self).await
            }

            fn capabilities(&self) -> $crate::config::Capabilities {
                <$ty>::capabilities(self)
            }

            async fn enable_pressure(&mut self) -> Result<(), $crate::error::Error> {
                <$ty>::enable_pressure(self).await
            }

            async fn disable_pressure(&mut self) -> Result<(), $crate::error::Error> {
                <$ty>::disable_pressure(self).await
            }

            async fn enable_temperature(&mut self) -> Result<(), $crate::error::Error> {
                <$ty>::enable_temperature(self).await
            }

            async fn disable_temperature(&mut self) -> Result<(), $crate::error::Error> {
                <$ty>::disable_temperature(self).await
            }

            async fn output_data_rate(&mut self) -> Result<u32, $crate::error::Error> {
                <$ty>::output_data_rate(self).await
            }

            async fn set_pressure_output_data_rate(
                &mut self,
                hz_milli: u32,
            ) -> Result<(), $crate::error::Error> {
                <$ty>::set_pressure_output_data_rate(self, hz_milli).await
            }

            async fn set_temperature_output_data_rate(
                &mut self,
                hz_milli: u32,
            ) -> Result<(), $crate::error::Error> {
                <$ty>::set_temperature_output_data_rate(self, hz_milli).await
            }

            async fn read_pressure_hpa_milli(&mut self) -> Result<i32, $crate::error::Error> {
                <$ty>::read_pressure_hpa_milli(self).await
            }

            async fn read_temperature_mdegc(&mut self) -> Result<i32, $crate::error::Error> {
                <$ty>::read_temperature_mdegc(self).await
            }

            async fn pressure_data_ready(&mut self) -> Result<bool, $crate::error::Error> {
                <$ty>::pressure_data_ready(self).await
            }

            async fn temperature_data_ready(&mut self) -> Result<bool, $crate::error::Error> {
                <$ty>::temperature_data_ready(self).await
            }
        }
    };
}

pub(crate) use impl_pressure_sensor;

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::device::DeviceCore;
    use crate::driver::{Lps22df, Lps33};
    use crate::interface::BusMode;
    use crate::register::{RegisterAddress, lps22df, lps33};
    use crate::testing::MockInterface;
    use crate::variant;
    use futures::executor::block_on;

    /// 1013 hPa and 25 degC in the output registers.
    fn with_samples(interface: MockInterface, press_out: u8, temp_out: u8) -> MockInterface {
        interface
            .with_reg(press_out, 0x00)
            .with_reg(press_out + 1, 0x50)
            .with_reg(press_out + 2, 0x3F)
            .with_reg(temp_out, 0xC4)
            .with_reg(temp_out + 1, 0x09)
    }

    async fn sample<S: PressureSensor>(sensor: &mut S) -> Result<(u32, i32, i32), Error> {
        sensor.enable_pressure().await?;
        sensor.enable_temperature().await?;
        sensor.set_pressure_output_data_rate(10_000).await?;
        let odr = sensor.output_data_rate().await?;
        let pressure = sensor.read_pressure_hpa_milli().await?;
        let temperature = sensor.read_temperature_mdegc().await?;
        Ok((odr, pressure, temperature))
    }

    #[test]
    fn lps22df_through_trait() {
        let interface = with_samples(
            MockInterface::default()
                .with_reg(lps22df::Register::WhoAmI.addr(), lps22df::who_am_i::EXPECTED),
            lps22df::Register::PressOutXl.addr(),
            lps22df::Register::TempOutL.addr(),
        );
        let mut dev: Lps22df<MockInterface> =
            Lps22df::from_core(DeviceCore::new(interface, BusMode::I2c), None);
        block_on(dev.init()).expect("init");

        assert_eq!(block_on(sample(&mut dev)), Ok((10_000, 1_013_000, 25_000)));
        assert_eq!(block_on(PressureSensor::read_id(&mut dev)), Ok(0xB4));
        assert!(!PressureSensor::capabilities(&dev).low_power);
    }

    #[test]
    fn lps33k_through_trait() {
        let interface = with_samples(
            MockInterface::default()
                .with_reg(lps33::Register::WhoAmI.addr(), lps33::who_am_i::EXPECTED),
            lps33::Register::PressOutXl.addr(),
            lps33::Register::TempOutL.addr(),
        );
        let mut dev: Lps33<MockInterface, variant::Lps33k> =
            Lps33::from_core(DeviceCore::new(interface, BusMode::I2c), None);
        block_on(dev.init()).expect("init");

        assert_eq!(block_on(sample(&mut dev)), Ok((10_000, 1_013_000, 25_000)));
        assert!(PressureSensor::capabilities(&dev).low_power);
    }
}
