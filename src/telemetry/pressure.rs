//! Pressure sensor payload.
//!
//! Layout (6 bytes minimum):
//! ```text
//! Byte 0..2: header (ignored)
//! Byte 2..4: pressure, 16-bit unsigned big-endian, hundredths of a bar
//! Byte 4..6: trailer (ignored)
//! ```

use crate::config::PRESSURE_MIN_PAYLOAD;
use crate::error::DecodeError;

/// Decoded pressure reading.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureReading {
    /// Pressure (bar).
    pub pressure: f32,
}

impl PressureReading {
    /// Parse from a raw characteristic value.
    pub fn from_ble_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < PRESSURE_MIN_PAYLOAD {
            return Err(DecodeError::TooShort {
                needed: PRESSURE_MIN_PAYLOAD,
                got: data.len(),
            });
        }

        let raw = u16::from_be_bytes([data[2], data[3]]);
        Ok(Self {
            pressure: raw as f32 / 100.0,
        })
    }
}
