//! Bus interface abstraction for the MMA8451 driver.

pub mod address;
pub mod i2c;

pub use address::DeviceAddress;
pub use i2c::I2cInterface;

/// Abstraction over the low-level bus access required by the driver.
///
/// Each call is one complete bus transaction against the device address the
/// implementation was created for.
pub trait Mma8451Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;
}
