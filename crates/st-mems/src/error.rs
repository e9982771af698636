//! Error type shared by every driver in the crate.

/// Error type for sensor operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus communication error (I2C, SPI, etc.).
    Bus,
    /// Sensor not responding or not present.
    NotPresent,
    /// Invalid chip ID or wrong device.
    WrongDevice,
    /// Data not ready.
    NotReady,
    /// Argument or register content outside the accepted set.
    InvalidData,
    /// Operation not supported by this device, variant, or pin.
    Unsupported,
    /// A self-clearing control bit did not clear in time.
    Timeout,
}
