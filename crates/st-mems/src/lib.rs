//! Async `#![no_std]` drivers for ST MEMS sensors:
//!
//! - pressure / temperature: LPS22CH, LPS22DF, LPS27HHTW, LPS33HW, LPS33K
//! - accelerometer with vertical analog front end (vAFE): ST1VAFE3BX
//!
//! The drivers are built on `embedded-hal-async` and carry no board or
//! executor dependencies, so they can sit directly in BSP layers.
//!
//! # Quick start (I2C)
//!
//! ```rust,no_run
//! use ph_st_mems::{Lps22chI2c, PressureAddress};
//! # use embedded_hal_async::i2c::I2c;
//! #
//! # async fn example<I2C: I2c>(i2c: I2C) -> Result<(), ph_st_mems::Error> {
//! let mut baro: Lps22chI2c<I2C> = Lps22chI2c::new_i2c(i2c, None);
//! baro.init_with_addresses(&[PressureAddress::Primary.addr()]).await?;
//! baro.set_pressure_output_data_rate(25_000).await?;
//! baro.enable_pressure().await?;
//! let hpa_milli = baro.read_pressure_hpa_milli().await?;
//! # let _ = hpa_milli;
//! # Ok(())
//! # }
//! ```
//!
//! # Shared pressure interface
//!
//! Every barometer implements [`PressureSensor`]. Pressure and temperature
//! share one conversion engine: the rate set through either channel applies
//! to both, and the part powers down only once both channels are disabled.
//! The last rate is remembered and restored by the next enable.
//!
//! # Units
//!
//! Output data rates are milli-hertz `u32`. Readouts are integer milli-hPa,
//! milli-degrees Celsius, milli-g and microvolts. Enable the `fixed` feature
//! for `I32F32` conversions to hPa, degrees C, g and mV.
//!
//! # FIFO
//!
//! The LPS22 family and the LPS33HW share [`FifoConfig`]. The ST1VAFE3BX FIFO
//! stores tagged 7-byte records; see [`VafeFifoConfig`] and
//! [`FifoRecordIterator`].
//!
//! # Logging
//!
//! The `defmt` and `log` features forward driver trace output to the
//! respective crate. Without either, logging compiles away.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
// Clippy lint levels live here; thresholds and config are in clippy.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

#[cfg(feature = "fixed")]
extern crate fixed as fixed_crate;

#[macro_use]
mod macros;

mod config;
mod data;
mod device;
mod driver;
mod error;
mod interface;
mod interrupt;
mod orientation;
mod register;
mod self_test;
mod sensor;
mod state;
pub mod variant;
mod wake_up;

#[cfg(test)]
mod testing;

// Interface layer
pub use interface::{BusMode, Interface, PressureAddress, VafeAddress};
pub use interface::{I2cConfig, I2cInterface};
pub use interface::{SpiConfig, SpiInterface};

// Configuration
pub use config::{Averaging, Lps22dfLowPassFilter, Lps22dfMode, Lps22dfOdr};
pub use config::{AccelBandwidth, AccelFullScale, AccelMode, AccelOdr, PowerMode};
pub use config::{Capabilities, FifoConfig, FifoMode};
pub use config::{Lps22hhLowPassFilter, Lps22hhOdr, NoiseMode};
pub use config::{Lps33LowPassFilter, Lps33Odr};

// Drivers
pub use driver::{InitAction, MemBank, St1vafe3bx, St1vafe3bxI2c, St1vafe3bxSpi};
pub use driver::{Lps22ch, Lps22chI2c, Lps22chSpi, Lps22hh, Lps27hhtw, Lps27hhtwI2c, Lps27hhtwSpi};
pub use driver::{Lps22df, Lps22dfI2c, Lps22dfSpi};
pub use driver::{Lps33, Lps33hw, Lps33hwI2c, Lps33hwSpi, Lps33k, Lps33kI2c};
pub use sensor::PressureSensor;

// Data types
pub use data::{AccelMg, AccelRaw, PressureRaw, PressureSample, TemperatureRaw, VafeRaw};
pub use data::{
    BatchRate,
    CfgChange,
    FIFO_RECORD_LEN,
    FifoRecord,
    FifoRecordIterator,
    FifoStatus,
    FifoStore,
    FifoTag,
    ScaleFactor,
    TimestampDecimation,
    VafeFifoConfig,
    VafeFifoMode,
    VafeFifoStatus,
    accel_mg_per_lsb,
    accel_ug_per_lsb,
    pressure_hpa_milli_per_lsb,
    pressure_lsb_per_hpa,
    temperature_lsb_per_celsius,
    temperature_mdegc_per_lsb,
    vafe_lsb_per_mv,
};

// Features
pub use error::Error;
pub use interrupt::{EventStatus, InterruptRouting};
pub use interrupt::{FifoInterrupt, InterruptPin, InterruptWaitError, PinConfig};
pub use orientation::Orientation;
pub use self_test::{SelfTestSign, SelfTestStep};
pub use wake_up::{WakeUpDuration, WakeUpThreshold};

// Fixed-point conversions (feature-gated)
#[cfg(feature = "fixed")]
pub use data::fixed::{AccelFixed, Fixed, accel_to_g, pressure_hpa, temperature_celsius, vafe_mv};
