//! I2C address definitions for the MMA8451.

/// MMA8451 7-bit I2C addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceAddress {
    /// 0x1D (SA0 high).
    #[default]
    Primary,
    /// 0x1C (SA0 strapped to GND).
    Alternate,
}

impl DeviceAddress {
    /// Returns the 7-bit I2C address.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Primary => 0x1D,
            Self::Alternate => 0x1C,
        }
    }
}

impl From<DeviceAddress> for u8 {
    fn from(address: DeviceAddress) -> Self {
        address.addr()
    }
}
