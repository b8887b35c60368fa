//! Register map definitions for the MMA8451 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{DataRate, Oversampling, Range, SleepRate, SysMode};

/// Register address of `OUT_X_MSB`.
pub const REG_OUT_X_MSB: u8 = 0x01;
/// Register address of `OUT_X_LSB`.
pub const REG_OUT_X_LSB: u8 = 0x02;
/// Register address of `OUT_Y_MSB`.
pub const REG_OUT_Y_MSB: u8 = 0x03;
/// Register address of `OUT_Y_LSB`.
pub const REG_OUT_Y_LSB: u8 = 0x04;
/// Register address of `OUT_Z_MSB`.
pub const REG_OUT_Z_MSB: u8 = 0x05;
/// Register address of `OUT_Z_LSB`.
pub const REG_OUT_Z_LSB: u8 = 0x06;
/// Register address of `F_SETUP`.
pub const REG_F_SETUP: u8 = 0x09;
/// Register address of `SYSMOD`.
pub const REG_SYSMOD: u8 = 0x0B;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x0C;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x0D;
/// Register address of `XYZ_DATA_CFG`.
pub const REG_XYZ_DATA_CFG: u8 = 0x0E;
/// Register address of `HP_FILTER_CUTOFF`.
pub const REG_HP_FILTER_CUTOFF: u8 = 0x0F;
/// Register address of `PL_STATUS`.
pub const REG_PL_STATUS: u8 = 0x10;
/// Register address of `PL_CFG`.
pub const REG_PL_CFG: u8 = 0x11;
/// Register address of `FF_MT_CFG`.
pub const REG_FF_MT_CFG: u8 = 0x15;
/// Register address of `FF_MT_SRC`.
pub const REG_FF_MT_SRC: u8 = 0x16;
/// Register address of `FF_MT_THS`.
pub const REG_FF_MT_THS: u8 = 0x17;
/// Register address of `FF_MT_COUNT`.
pub const REG_FF_MT_COUNT: u8 = 0x18;
/// Register address of `TRANSIENT_CFG`.
pub const REG_TRANSIENT_CFG: u8 = 0x1D;
/// Register address of `TRANSIENT_SRC`.
pub const REG_TRANSIENT_SRC: u8 = 0x1E;
/// Register address of `TRANSIENT_THS`.
pub const REG_TRANSIENT_THS: u8 = 0x1F;
/// Register address of `TRANSIENT_COUNT`.
pub const REG_TRANSIENT_COUNT: u8 = 0x20;
/// Register address of `CTRL_REG1`.
pub const REG_CTRL_REG1: u8 = 0x2A;
/// Register address of `CTRL_REG2`.
pub const REG_CTRL_REG2: u8 = 0x2B;
/// Register address of `CTRL_REG4` (interrupt enable).
pub const REG_CTRL_REG4: u8 = 0x2D;
/// Register address of `CTRL_REG5` (interrupt pin routing).
pub const REG_CTRL_REG5: u8 = 0x2E;

/// Expected `WHO_AM_I` value.
pub const DEVICE_ID: u8 = 0x1A;
/// `CTRL_REG2.RST` soft reset command bit.
pub const RST: u8 = 0x40;
/// `CTRL_REG1.ACTIVE` bit.
pub const ACTIVE: u8 = 0b0000_0001;
/// `CTRL_REG1.LNOISE` bit.
pub const LNOISE: u8 = 0b0000_0100;
/// `XYZ_DATA_CFG.FS` encoding for ±4 g.
pub const RANGE_4G: u8 = 0b01;
/// `XYZ_DATA_CFG.FS` encoding for ±8 g.
pub const RANGE_8G: u8 = 0b10;
/// `XYZ_DATA_CFG.HPF_OUT` bit.
pub const HPF_OUT: u8 = 0b0001_0000;
/// Portrait/landscape status bits exposed by [`PL_STATUS`](REG_PL_STATUS).
pub const ORIENTATION_MASK: u8 = 0x07;

/// Single-byte register payload bound to its datasheet address.
pub trait Register: From<u8> + Into<u8> {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
}

macro_rules! byte_register {
    ($ty:ident, $addr:expr) => {
        impl From<u8> for $ty {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Register for $ty {
            const ADDRESS: u8 = $addr;
        }
    };
}

/// Bitfield representation of `SYSMOD` (address `0x0B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemMode {
    // Current system mode (bits 1:0).
    pub mode: SysMode,
    // FIFO gate time count (bits 6:2).
    pub gate_count: B5,
    // FIFO gate error (bit 7).
    pub gate_error: bool,
}

/// Interrupt source bit layout shared by `INT_SOURCE`, `CTRL_REG4` and `CTRL_REG5`.
///
/// In `CTRL_REG4` a set bit enables the source, in `CTRL_REG5` it routes the
/// source to INT1 (cleared routes to INT2).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptSources {
    // Data ready (bit 0).
    pub data_ready: bool,
    #[skip]
    __: B1,
    // Freefall/motion (bit 2).
    pub freefall_motion: bool,
    // Pulse detection (bit 3).
    pub pulse: bool,
    // Portrait/landscape orientation (bit 4).
    pub orientation: bool,
    // Transient detection (bit 5).
    pub transient: bool,
    // FIFO (bit 6).
    pub fifo: bool,
    // Auto-sleep/wake (bit 7).
    pub auto_sleep: bool,
}

/// Bitfield representation of `XYZ_DATA_CFG` (address `0x0E`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XyzDataCfg {
    // Full-scale range (bits 1:0). Write-only: 0b11 is reserved.
    #[skip(getters)]
    pub range: Range,
    #[skip]
    __: B2,
    // High-pass filtered output (bit 4).
    pub hpf_out: bool,
    #[skip]
    __: B3,
}

/// Bitfield representation of `PL_CFG` (address `0x11`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlConfig {
    #[skip]
    __: B6,
    // Portrait/landscape detection enable (bit 6).
    pub enable: bool,
    // Debounce counter clears instead of decrementing (bit 7).
    pub debounce_clear: bool,
}

/// Bitfield representation of `TRANSIENT_CFG` (address `0x1D`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientCfg {
    // Bypass the high-pass filter (bit 0).
    pub hpf_bypass: bool,
    // X-axis event flag enable (bit 1).
    pub x_enable: bool,
    // Y-axis event flag enable (bit 2).
    pub y_enable: bool,
    // Z-axis event flag enable (bit 3).
    pub z_enable: bool,
    // Latch events into TRANSIENT_SRC (bit 4).
    pub latch: bool,
    #[skip]
    __: B3,
}

/// Bitfield representation of `TRANSIENT_SRC` (address `0x1E`).
///
/// Reading the register clears the latched event.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientSource {
    // X event polarity, set for negative (bit 0).
    pub x_negative: bool,
    // X event (bit 1).
    pub x_event: bool,
    // Y event polarity (bit 2).
    pub y_negative: bool,
    // Y event (bit 3).
    pub y_event: bool,
    // Z event polarity (bit 4).
    pub z_negative: bool,
    // Z event (bit 5).
    pub z_event: bool,
    // Event active (bit 6).
    pub event_active: bool,
    #[skip]
    __: B1,
}

/// Bitfield representation of `TRANSIENT_THS` (address `0x1F`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientThreshold {
    // Threshold in 0.063 g steps (bits 6:0).
    pub threshold: B7,
    // Debounce counter clears instead of decrementing (bit 7).
    pub debounce_clear: bool,
}

/// Bitfield representation of `CTRL_REG1` (address `0x2A`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg1 {
    // Active mode (bit 0).
    pub active: bool,
    // Fast read, 8-bit output (bit 1).
    pub fast_read: bool,
    // Reduced noise mode (bit 2).
    pub low_noise: bool,
    // Output data rate (bits 5:3).
    pub data_rate: DataRate,
    // Auto-wake sample rate (bits 7:6).
    pub sleep_rate: SleepRate,
}

/// Bitfield representation of `CTRL_REG2` (address `0x2B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg2 {
    // Active mode oversampling (bits 1:0).
    pub mods: Oversampling,
    // Auto-sleep enable (bit 2).
    pub auto_sleep: bool,
    // Sleep mode oversampling (bits 4:3).
    pub smods: Oversampling,
    #[skip]
    __: B1,
    // Soft reset (bit 6).
    pub reset: bool,
    // Self-test (bit 7).
    pub self_test: bool,
}

byte_register!(SystemMode, REG_SYSMOD);
byte_register!(InterruptSources, REG_INT_SOURCE);
byte_register!(XyzDataCfg, REG_XYZ_DATA_CFG);
byte_register!(PlConfig, REG_PL_CFG);
byte_register!(TransientCfg, REG_TRANSIENT_CFG);
byte_register!(TransientSource, REG_TRANSIENT_SRC);
byte_register!(TransientThreshold, REG_TRANSIENT_THS);
byte_register!(CtrlReg1, REG_CTRL_REG1);
byte_register!(CtrlReg2, REG_CTRL_REG2);

/// `CTRL_REG1` value written to enter standby before motion configuration.
pub fn standby_ctrl_reg1() -> CtrlReg1 {
    CtrlReg1::new().with_data_rate(DataRate::Hz100)
}
