//! Sensor drivers, one module per register-compatible family.

pub(crate) mod lps22df;
pub(crate) mod lps22hh;
pub(crate) mod lps33;
pub(crate) mod st1vafe3bx;

pub use lps22df::{Lps22df, Lps22dfI2c, Lps22dfSpi};
pub use lps22hh::{
    Lps22ch, Lps22chI2c, Lps22chSpi, Lps22hh, Lps27hhtw, Lps27hhtwI2c, Lps27hhtwSpi,
};
pub use lps33::{Lps33, Lps33hw, Lps33hwI2c, Lps33hwSpi, Lps33k, Lps33kI2c};
pub use st1vafe3bx::{InitAction, MemBank, St1vafe3bx, St1vafe3bxI2c, St1vafe3bxSpi};

/// Poll period while waiting for SWRESET to clear.
pub(crate) const RESET_POLL_NS: u32 = 1_000_000;
/// Reads before a stuck SWRESET is reported.
pub(crate) const RESET_TRIES: u8 = 5;
