//! Strongly typed parameter enumerations for the MMA8451 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use mma8451::params::{DataRate, Oversampling, Range};
//!
//! let odr = DataRate::Hz100;
//! let range = Range::G4;
//! let mode = Oversampling::HighResolution;
//! assert_eq!(range.counts_per_g(), 2048);
//! let _ = (odr, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate selections encoded in `CTRL_REG1.DR[2:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum DataRate {
    /// 800 Hz.
    Hz800 = 0b000,
    /// 400 Hz.
    Hz400 = 0b001,
    /// 200 Hz.
    Hz200 = 0b010,
    /// 100 Hz.
    Hz100 = 0b011,
    /// 50 Hz.
    Hz50 = 0b100,
    /// 12.5 Hz.
    Hz12_5 = 0b101,
    /// 6.25 Hz.
    Hz6_25 = 0b110,
    /// 1.56 Hz.
    Hz1_56 = 0b111,
}

/// Auto-wake sample rate used in sleep mode, encoded in `CTRL_REG1.ASLP_RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum SleepRate {
    /// 50 Hz.
    Hz50 = 0b00,
    /// 12.5 Hz.
    Hz12_5 = 0b01,
    /// 6.25 Hz.
    Hz6_25 = 0b10,
    /// 1.56 Hz.
    Hz1_56 = 0b11,
}

/// Oversampling modes encoded in `CTRL_REG2.MODS` (active) and `SMODS` (sleep).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Oversampling {
    /// Normal mode.
    Normal = 0b00,
    /// Low-noise, low-power mode.
    LowNoiseLowPower = 0b01,
    /// High-resolution mode.
    HighResolution = 0b10,
    /// Low-power mode.
    LowPower = 0b11,
}

/// Full-scale ranges encoded in `XYZ_DATA_CFG.FS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g. Required when low-noise mode is in use.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
}

impl Range {
    /// Returns the number of 14-bit counts per 1 g.
    pub const fn counts_per_g(self) -> u16 {
        match self {
            Self::G2 => 4096,
            Self::G4 => 2048,
            Self::G8 => 1024,
        }
    }

    /// Returns `true` when the range can be combined with `CTRL_REG1.LNOISE`.
    pub const fn supports_low_noise(self) -> bool {
        !matches!(self, Self::G8)
    }
}

/// System mode reported in `SYSMOD[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum SysMode {
    /// Standby mode.
    Standby = 0b00,
    /// Wake (active) mode.
    Wake = 0b01,
    /// Sleep (auto-sleep) mode.
    Sleep = 0b10,
    /// Reserved encoding; not produced by a healthy device.
    Reserved = 0b11,
}

/// Units attached to a scaled acceleration reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    /// Multiples of standard gravity.
    G,
    /// Metres per second squared.
    #[default]
    MetersPerSecondSquared,
}

impl Unit {
    /// Standard gravity in m/s².
    pub const STANDARD_GRAVITY: f32 = 9.80655;

    /// Maps the `g_force` selector flag onto a unit.
    pub const fn from_g_force(g_force: bool) -> Self {
        if g_force {
            Self::G
        } else {
            Self::MetersPerSecondSquared
        }
    }

    /// Multiplier applied to a value expressed in g.
    pub const fn per_g(self) -> f32 {
        match self {
            Self::G => 1.0,
            Self::MetersPerSecondSquared => Self::STANDARD_GRAVITY,
        }
    }

    /// Unit symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::G => "g",
            Self::MetersPerSecondSquared => "m/s²",
        }
    }
}
