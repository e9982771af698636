//! Type-level markers for register-compatible sensor variants.

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Variant of the LPS22HH register family.
pub trait Lps22hhVariant: sealed::Sealed {
    /// Part name used in log output.
    const NAME: &'static str;
    /// Leave the I3C interface enabled when the bus is I3C.
    const KEEP_I3C_ON_I3C_BUS: bool;
}

/// Variant of the LPS33 register family.
pub trait Lps33Variant: sealed::Sealed {
    /// Part name used in log output.
    const NAME: &'static str;
}

/// LPS22CH marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lps22ch;

/// LPS27HHTW marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lps27hhtw;

/// LPS33HW marker (I2C or SPI, FIFO and interrupt pin).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lps33hw;

/// LPS33K marker (I2C only, no FIFO).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lps33k;

impl sealed::Sealed for Lps22ch {}
impl sealed::Sealed for Lps27hhtw {}
impl sealed::Sealed for Lps33hw {}
impl sealed::Sealed for Lps33k {}

impl Lps22hhVariant for Lps22ch {
    const NAME: &'static str = "LPS22CH";
    const KEEP_I3C_ON_I3C_BUS: bool = false;
}

impl Lps22hhVariant for Lps27hhtw {
    const NAME: &'static str = "LPS27HHTW";
    const KEEP_I3C_ON_I3C_BUS: bool = true;
}

impl Lps33Variant for Lps33hw {
    const NAME: &'static str = "LPS33HW";
}

impl Lps33Variant for Lps33k {
    const NAME: &'static str = "LPS33K";
}
