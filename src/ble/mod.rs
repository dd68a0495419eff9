//! Bluetooth Low Energy subsystem.
//!
//! The firmware runs in **Central** role against two unrelated peripherals:
//!
//! 1. **Scanner** - one bounded active scan that binds the first
//!    advertisement seen for each role (scale, pressure sensor).
//! 2. **Connection Manager** - one-shot link establishment per role plus
//!    GATT service/characteristic resolution.
//! 3. **Registry** - per-role slots holding the bound advertisement, the
//!    link and the last decoded measurement.
//!
//! Everything here is generic over [`central::Central`], so the same logic
//! runs against the SoftDevice on target and a scripted mock on the host.

pub mod adv_parser;
pub mod central;
pub mod connection;
pub mod registry;
pub mod scanner;

#[cfg(feature = "embedded")]
pub mod softdevice;

use crate::config::{
    BLE_ADV_DATA_MAX, BLE_MAX_ADV_SERVICES, PRESSURE_CHAR_UUID, PRESSURE_MIN_PAYLOAD,
    PRESSURE_SERVICE_UUID, WEIGHT_CHAR_UUID, WEIGHT_MIN_PAYLOAD, WEIGHT_SERVICE_UUID,
};
use heapless::{String, Vec};

/// The two peripheral identities tracked by the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Coffee scale (mass, flow rate, battery).
    Weight,
    /// Group-head pressure sensor.
    Pressure,
}

/// Fixed GATT identity of a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleProfile {
    /// 16-bit service UUID, both advertised and exposed over GATT.
    pub service: u16,
    /// 16-bit UUID of the readable measurement characteristic.
    pub characteristic: u16,
    /// Minimum payload length the decoder accepts.
    pub min_payload: usize,
}

impl Role {
    /// Processing order for scan matching, connecting and polling.
    pub const ALL: [Role; 2] = [Role::Weight, Role::Pressure];

    pub const fn profile(self) -> RoleProfile {
        match self {
            Role::Weight => RoleProfile {
                service: WEIGHT_SERVICE_UUID,
                characteristic: WEIGHT_CHAR_UUID,
                min_payload: WEIGHT_MIN_PAYLOAD,
            },
            Role::Pressure => RoleProfile {
                service: PRESSURE_SERVICE_UUID,
                characteristic: PRESSURE_CHAR_UUID,
                min_payload: PRESSURE_MIN_PAYLOAD,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Role::Weight => "weight",
            Role::Pressure => "pressure",
        }
    }
}

/// BLE device address as reported by the radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerAddress {
    /// GAP address type (public, random static, ...).
    pub kind: u8,
    /// Address bytes, least significant first.
    pub bytes: [u8; 6],
}

/// One advertising report, reduced to what discovery needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvertisementRecord {
    pub address: PeerAddress,
    /// Received Signal Strength Indicator (dBm).
    pub rssi: i8,
    /// Human-readable name (truncated to 32 bytes for `heapless::String`).
    pub name: String<32>,
    /// Advertised 16-bit service UUIDs.
    pub services: Vec<u16, BLE_MAX_ADV_SERVICES>,
    /// Raw AD structures (truncated to a legacy PDU).
    pub data: Vec<u8, BLE_ADV_DATA_MAX>,
}

impl AdvertisementRecord {
    /// Build a record from a raw advertising or scan-response payload.
    pub fn from_report(address: PeerAddress, rssi: i8, data: &[u8]) -> Self {
        let mut raw = Vec::new();
        let _ = raw.extend_from_slice(&data[..data.len().min(BLE_ADV_DATA_MAX)]);

        Self {
            address,
            rssi,
            name: adv_parser::extract_device_name(data),
            services: adv_parser::advertised_services(data),
            data: raw,
        }
    }

    /// Whether the report lists `uuid` among its services.
    pub fn advertises(&self, uuid: u16) -> bool {
        adv_parser::contains_service(&self.data, uuid)
    }
}
