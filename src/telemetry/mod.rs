//! Sensor payload decoding and the measurement snapshot shown on screen.

pub mod pressure;
pub mod weight;

#[cfg(test)]
mod tests;

pub use pressure::PressureReading;
pub use weight::WeightReading;

use crate::ble::Role;
use crate::error::DecodeError;

/// A decoded value from either peripheral.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Measurement {
    Weight(WeightReading),
    Pressure(PressureReading),
}

impl Measurement {
    /// Decode a characteristic value read from the peripheral in `role`.
    pub fn decode(role: Role, data: &[u8]) -> Result<Self, DecodeError> {
        match role {
            Role::Weight => WeightReading::from_ble_bytes(data).map(Measurement::Weight),
            Role::Pressure => PressureReading::from_ble_bytes(data).map(Measurement::Pressure),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Measurement::Weight(_) => Role::Weight,
            Measurement::Pressure(_) => Role::Pressure,
        }
    }
}

/// Latest known values of both peripherals.
///
/// `None` until the first successful decode for that role; a failed read
/// never clears a value that was already known.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementSnapshot {
    pub weight: Option<WeightReading>,
    pub pressure: Option<PressureReading>,
}

impl MeasurementSnapshot {
    /// Mass in grams, zero while unknown.
    pub fn mass(&self) -> f32 {
        self.weight.map_or(0.0, |w| w.mass)
    }

    /// Flow rate in grams per second, zero while unknown.
    pub fn flow_rate(&self) -> f32 {
        self.weight.map_or(0.0, |w| w.flow_rate)
    }

    /// Scale battery in percent, zero while unknown.
    pub fn battery(&self) -> u8 {
        self.weight.map_or(0, |w| w.battery)
    }

    /// Pressure in bar, zero while unknown.
    pub fn pressure(&self) -> f32 {
        self.pressure.map_or(0.0, |p| p.pressure)
    }

    /// Fold a measurement into the snapshot.
    pub fn apply(&mut self, measurement: Measurement) {
        match measurement {
            Measurement::Weight(w) => self.weight = Some(w),
            Measurement::Pressure(p) => self.pressure = Some(p),
        }
    }
}
