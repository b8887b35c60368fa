//! Sample decoding and scaling.

use crate::params::{Range, Unit};

/// Number of bytes spanning the X, Y, Z output registers.
pub const RAW_SAMPLE_BYTES: usize = 6;

/// Six bytes read in one burst from `OUT_X_MSB` through `OUT_Z_LSB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(pub [u8; RAW_SAMPLE_BYTES]);

impl RawSample {
    /// Returns the signed 14-bit counts for X, Y and Z.
    pub fn counts(&self) -> [i16; 3] {
        let b = &self.0;
        [
            decode_axis(b[0], b[1]),
            decode_axis(b[2], b[3]),
            decode_axis(b[4], b[5]),
        ]
    }

    /// Scales the sample for the given range and unit.
    pub fn scaled(&self, range: Range, unit: Unit) -> Acceleration {
        let [x, y, z] = self.counts();
        Acceleration {
            x: scale(x, range, unit),
            y: scale(y, range, unit),
            z: scale(z, range, unit),
            unit,
        }
    }
}

impl From<[u8; RAW_SAMPLE_BYTES]> for RawSample {
    fn from(bytes: [u8; RAW_SAMPLE_BYTES]) -> Self {
        Self(bytes)
    }
}

/// Acceleration on three axes in the tagged unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    /// X axis.
    pub x: f32,
    /// Y axis.
    pub y: f32,
    /// Z axis.
    pub z: f32,
    /// Unit of `x`, `y` and `z`.
    pub unit: Unit,
}

/// Decodes one axis from its MSB/LSB register pair.
///
/// The sensor outputs 14-bit left-justified two's complement data; the two low
/// bits of `lsb` are reserved.
#[inline]
pub fn decode_axis(msb: u8, lsb: u8) -> i16 {
    i16::from_be_bytes([msb, lsb]) >> 2
}

/// Converts signed counts into `unit` for the given full-scale range.
#[inline]
pub fn scale(counts: i16, range: Range, unit: Unit) -> f32 {
    let g = counts as f32 / range.counts_per_g() as f32;
    g * unit.per_g()
}
