//! Logging shims and convenience macros for common driver sequences.

// Internal log macros. They forward to `defmt` or `log` when one of those
// features is enabled and otherwise only borrow their arguments.

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::trace!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$x,)*);
    }};
}

/// Bring up a pressure sensor with the common configuration sequence.
///
/// This macro runs the typical initialization flow:
/// 1. `init_with_addresses`
/// 2. `set_pressure_output_data_rate` (milli-hertz)
/// 3. `enable_pressure` + `enable_temperature`
/// 4. Optional FIFO configuration
///
/// The macro expands to a `Result<u8, Error>` expression, returning the
/// detected I2C address on success. It must be invoked from an async context
/// and works with every pressure driver in this crate.
///
/// ```rust,no_run
/// # use ph_st_mems::{Lps22chI2c, PressureAddress, pressure_init_sequence};
/// # async fn example(baro: &mut Lps22chI2c<impl embedded_hal_async::i2c::I2c>)
/// # -> Result<(), ph_st_mems::Error> {
/// let address = pressure_init_sequence!(
///     sensor: baro,
///     addresses: &[PressureAddress::Primary.addr(), PressureAddress::Secondary.addr()],
///     odr_hz_milli: 25_000,
/// )?;
/// # Ok(())
/// # }
/// ```
///
/// With FIFO:
/// ```rust,no_run
/// # use ph_st_mems::{FifoConfig, FifoMode, Lps22chI2c, PressureAddress, pressure_init_sequence};
/// # async fn example(baro: &mut Lps22chI2c<impl embedded_hal_async::i2c::I2c>)
/// # -> Result<(), ph_st_mems::Error> {
/// let fifo = FifoConfig::new(FifoMode::Stream, 16);
/// let address = pressure_init_sequence!(
///     sensor: baro,
///     addresses: &[PressureAddress::Primary.addr()],
///     odr_hz_milli: 10_000,
///     fifo: fifo,
/// )?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! pressure_init_sequence {
    (
        sensor: $sensor:expr,
        addresses: $addresses:expr,
        odr_hz_milli: $odr:expr,
        fifo: $fifo:expr $(,)?
    ) => {{
        let address = $sensor.init_with_addresses($addresses).await?;
        $sensor.set_pressure_output_data_rate($odr).await?;
        $sensor.enable_pressure().await?;
        $sensor.enable_temperature().await?;
        $sensor.apply_fifo_config($fifo).await?;
        Ok::<u8, $crate::Error>(address)
    }};
    (
        sensor: $sensor:expr,
        addresses: $addresses:expr,
        odr_hz_milli: $odr:expr $(,)?
    ) => {{
        let address = $sensor.init_with_addresses($addresses).await?;
        $sensor.set_pressure_output_data_rate($odr).await?;
        $sensor.enable_pressure().await?;
        $sensor.enable_temperature().await?;
        Ok::<u8, $crate::Error>(address)
    }};
}
