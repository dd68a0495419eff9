//! Per-role peripheral state.
//!
//! The registry is owned by the monitor and handed by `&mut` to the scanner,
//! the connection manager and the poller in turn; there is only ever one
//! writer at a time, so no locking is involved.

use crate::ble::central::Central;
use crate::ble::{AdvertisementRecord, Role};
use crate::telemetry::{Measurement, MeasurementSnapshot};

/// A connected peripheral with its readable measurement characteristic.
pub struct Link<C, H> {
    pub connection: C,
    pub characteristic: H,
}

/// State tracked for one role.
pub struct PeripheralSlot<C, H> {
    advertisement: Option<AdvertisementRecord>,
    link: Option<Link<C, H>>,
    measurement: Option<Measurement>,
}

impl<C, H> PeripheralSlot<C, H> {
    pub const fn empty() -> Self {
        Self {
            advertisement: None,
            link: None,
            measurement: None,
        }
    }

    /// Advertisement bound during discovery, if any.
    pub fn advertisement(&self) -> Option<&AdvertisementRecord> {
        self.advertisement.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.advertisement.is_some()
    }

    pub fn link(&self) -> Option<&Link<C, H>> {
        self.link.as_ref()
    }

    pub fn is_linked(&self) -> bool {
        self.link.is_some()
    }

    /// Last successfully decoded value.
    pub fn measurement(&self) -> Option<&Measurement> {
        self.measurement.as_ref()
    }

    /// Whether a measurement has ever been decoded for this role.
    pub fn is_valid(&self) -> bool {
        self.measurement.is_some()
    }

    /// Bind `advertisement` unless one is already bound.
    ///
    /// Returns `false` (and drops nothing from the slot) for every bind after
    /// the first.
    pub fn bind(&mut self, advertisement: &AdvertisementRecord) -> bool {
        if self.advertisement.is_some() {
            return false;
        }
        self.advertisement = Some(advertisement.clone());
        true
    }

    pub fn set_link(&mut self, link: Link<C, H>) {
        self.link = Some(link);
    }

    pub fn set_measurement(&mut self, measurement: Measurement) {
        self.measurement = Some(measurement);
    }
}

/// Slots for both roles of a given transport.
pub struct Registry<T: Central> {
    weight: PeripheralSlot<T::Connection, T::Characteristic>,
    pressure: PeripheralSlot<T::Connection, T::Characteristic>,
}

impl<T: Central> Registry<T> {
    pub const fn new() -> Self {
        Self {
            weight: PeripheralSlot::empty(),
            pressure: PeripheralSlot::empty(),
        }
    }

    pub fn slot(&self, role: Role) -> &PeripheralSlot<T::Connection, T::Characteristic> {
        match role {
            Role::Weight => &self.weight,
            Role::Pressure => &self.pressure,
        }
    }

    pub fn slot_mut(&mut self, role: Role) -> &mut PeripheralSlot<T::Connection, T::Characteristic> {
        match role {
            Role::Weight => &mut self.weight,
            Role::Pressure => &mut self.pressure,
        }
    }

    /// First-seen-wins bind of an advertisement to `role`.
    pub fn bind(&mut self, role: Role, advertisement: &AdvertisementRecord) -> bool {
        self.slot_mut(role).bind(advertisement)
    }

    /// Store a decoded value in the slot of the role that produced it.
    pub fn store(&mut self, measurement: Measurement) {
        self.slot_mut(measurement.role()).set_measurement(measurement);
    }

    /// Both roles have an advertisement.
    pub fn all_bound(&self) -> bool {
        Role::ALL.iter().all(|&role| self.slot(role).is_bound())
    }

    /// Current measurement state for presentation.
    pub fn snapshot(&self) -> MeasurementSnapshot {
        let mut snapshot = MeasurementSnapshot::default();
        for role in Role::ALL {
            if let Some(measurement) = self.slot(role).measurement() {
                snapshot.apply(*measurement);
            }
        }
        snapshot
    }
}

impl<T: Central> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
