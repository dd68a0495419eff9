//! Scale measurement payload.
//!
//! Layout (20 bytes minimum, big-endian fields):
//! ```text
//! Byte 0..7:   header / status (ignored)
//! Byte 7..10:  mass, 24-bit unsigned, hundredths of a gram
//! Byte 10:     reserved
//! Byte 11..13: flow rate, 16-bit unsigned, hundredths of a gram per second
//! Byte 13:     battery level, percent (not clamped)
//! Byte 14..20: trailer (ignored)
//! ```
//!
//! The scale sends no checksum; any 20-byte buffer decodes.

use crate::config::WEIGHT_MIN_PAYLOAD;
use crate::error::DecodeError;

/// Decoded scale reading.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeightReading {
    /// Mass on the scale (g).
    pub mass: f32,
    /// Flow rate (g/s).
    pub flow_rate: f32,
    /// Battery level as reported; values above 100 are passed through.
    pub battery: u8,
}

impl WeightReading {
    /// Parse from a raw characteristic value.
    pub fn from_ble_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < WEIGHT_MIN_PAYLOAD {
            return Err(DecodeError::TooShort {
                needed: WEIGHT_MIN_PAYLOAD,
                got: data.len(),
            });
        }

        let mass_raw = u32::from_be_bytes([0, data[7], data[8], data[9]]);
        let flow_raw = u16::from_be_bytes([data[11], data[12]]);

        Ok(Self {
            mass: mass_raw as f32 / 100.0,
            flow_rate: flow_raw as f32 / 100.0,
            battery: data[13],
        })
    }
}
