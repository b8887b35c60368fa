//! `#![no_std]` driver for the NXP MMA8451 14-bit 3-axis accelerometer.
//!
//! [`Mma8451::init`] verifies the device, soft-resets it and programs
//! transient (motion) detection on INT1 before switching to active sampling.
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::I2c;
//! use mma8451::interface::DeviceAddress;
//! use mma8451::params::Unit;
//! use mma8451::{Config, Mma8451};
//!
//! fn run<I: I2c>(i2c: I, delay: &mut impl DelayNs) -> mma8451::Result<(), I::Error> {
//!     let mut accel = Mma8451::new_i2c(i2c, DeviceAddress::Primary, Config::default());
//!     accel.init(delay)?;
//!     let reading = accel.acceleration(Unit::MetersPerSecondSquared)?;
//!     let _ = (reading.x, reading.y, reading.z);
//!     Ok(())
//! }
//! ```
#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod data;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;

#[cfg(test)]
mod testing;

pub use crate::config::Config;
pub use crate::data::Acceleration;
pub use crate::device::{DriverState, Mma8451};
pub use crate::error::{Error, Result};
