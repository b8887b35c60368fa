//! Error handling primitives for the MMA8451 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// `WHO_AM_I` returned something other than the MMA8451 device ID.
    DeviceNotFound(u8),
    /// The soft reset bit did not clear within the configured poll limit.
    ResetTimeout,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The device has not completed initialization.
    NotReady,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
