//! [`Central`] on the Nordic SoftDevice S140.
//!
//! Scanning uses the SoftDevice Central-role scan API, links are made with a
//! single-address whitelist, and GATT discovery runs through a small
//! `gatt_client::Client` that records every characteristic of the requested
//! service.

use crate::ble::central::{timeout_units, Central, ScanControl, ScanEnd, ScanEvent, ScanParams};
use crate::ble::{AdvertisementRecord, PeerAddress};
use crate::config::{
    self, BLE_ATT_MTU, BLE_CONNECT_TIMEOUT_MS, PRESSURE_SERVICE_UUID, WEIGHT_SERVICE_UUID,
};
use crate::error::BleError;
use embassy_time::Duration;
use heapless::Vec;
use nrf_softdevice::ble::gatt_client::{self, DiscoverError, ReadError};
use nrf_softdevice::ble::{central, Address, AddressType, Connection, HvxType, Uuid};
use nrf_softdevice::{raw, RawError, Softdevice};

/// Characteristics kept per discovered service.
const MAX_CHARACTERISTICS: usize = 8;

/// A characteristic found during service discovery.
#[derive(Clone, Copy)]
pub struct SdCharacteristic {
    uuid: Option<Uuid>,
    handle: u16,
    readable: bool,
}

/// A discovered primary service.
pub struct SdService {
    characteristics: Vec<SdCharacteristic, MAX_CHARACTERISTICS>,
}

/// GATT client that collects the characteristics of service `SERVICE`.
struct ServiceCollector<const SERVICE: u16> {
    characteristics: Vec<SdCharacteristic, MAX_CHARACTERISTICS>,
}

impl<const SERVICE: u16> gatt_client::Client for ServiceCollector<SERVICE> {
    type Event = ();

    fn on_hvx(&self, _conn: &Connection, _type: HvxType, _handle: u16, _data: &[u8]) -> Option<()> {
        None
    }

    fn uuid() -> Uuid {
        Uuid::new_16(SERVICE)
    }

    fn new_undiscovered(_conn: Connection) -> Self {
        Self {
            characteristics: Vec::new(),
        }
    }

    fn discovered_characteristic(
        &mut self,
        characteristic: &gatt_client::Characteristic,
        _descriptors: &[gatt_client::Descriptor],
    ) {
        let entry = SdCharacteristic {
            uuid: characteristic.uuid,
            handle: characteristic.handle_value,
            readable: characteristic.props.read() != 0,
        };
        if self.characteristics.push(entry).is_err() {
            warn!("service {=u16:#x}: too many characteristics", SERVICE);
        }
    }

    fn discovery_complete(&mut self) -> Result<(), DiscoverError> {
        Ok(())
    }
}

async fn discover_service<const SERVICE: u16>(conn: &Connection) -> Option<SdService> {
    match gatt_client::discover::<ServiceCollector<SERVICE>>(conn).await {
        Ok(collector) => Some(SdService {
            characteristics: collector.characteristics,
        }),
        Err(e) => {
            debug!("service {=u16:#x} discovery failed: {:?}", SERVICE, e);
            None
        }
    }
}

/// SoftDevice-backed central.
pub struct SoftdeviceCentral {
    sd: &'static Softdevice,
}

impl SoftdeviceCentral {
    pub fn new(sd: &'static Softdevice) -> Self {
        Self { sd }
    }
}

fn raw_error(e: RawError) -> BleError {
    BleError::Raw(e as u32)
}

fn peer_address(raw: raw::ble_gap_addr_t) -> PeerAddress {
    let address = Address::from_raw(raw);
    PeerAddress {
        kind: address.address_type() as u8,
        bytes: address.bytes(),
    }
}

fn softdevice_address(peer: &PeerAddress) -> Address {
    let kind = match peer.kind {
        0x00 => AddressType::Public,
        0x02 => AddressType::RandomPrivateResolvable,
        0x03 => AddressType::RandomPrivateNonResolvable,
        0x7F => AddressType::Anonymous,
        _ => AddressType::RandomStatic,
    };
    Address::new(kind, peer.bytes)
}

impl Central for SoftdeviceCentral {
    type Connection = Connection;
    type Service = SdService;
    type Characteristic = SdCharacteristic;

    async fn scan<H>(&mut self, params: &ScanParams, mut handler: H) -> Result<(), BleError>
    where
        H: FnMut(ScanEvent<'_>) -> ScanControl,
    {
        let scan_config = central::ScanConfig {
            active: params.active,
            timeout: timeout_units(params.duration),
            ..Default::default()
        };

        let result = central::scan(self.sd, &scan_config, |report| {
            let data =
                unsafe { core::slice::from_raw_parts(report.data.p_data, report.data.len as usize) };
            let record =
                AdvertisementRecord::from_report(peer_address(report.peer_addr), report.rssi, data);

            match handler(ScanEvent::Advertisement(&record)) {
                ScanControl::Stop => Some(()),
                ScanControl::Continue => None,
            }
        })
        .await;

        match result {
            Ok(()) => Ok(()),
            Err(central::ScanError::Timeout) => {
                handler(ScanEvent::Ended(ScanEnd::Timeout));
                Ok(())
            }
            Err(central::ScanError::Raw(e)) => Err(raw_error(e)),
        }
    }

    fn stop_scan(&mut self) {
        // Harmless if the scan already ended or its future was dropped.
        let _ = unsafe { raw::sd_ble_gap_scan_stop() };
    }

    async fn connect(&mut self, advertisement: &AdvertisementRecord) -> Result<Connection, BleError> {
        let address = softdevice_address(&advertisement.address);
        let whitelist = [&address];
        let conn_cfg = central::ConnectConfig {
            scan_config: central::ScanConfig {
                whitelist: Some(&whitelist),
                timeout: timeout_units(Duration::from_millis(BLE_CONNECT_TIMEOUT_MS)),
                ..Default::default()
            },
            conn_params: raw::ble_gap_conn_params_t {
                min_conn_interval: config::BLE_CONN_INTERVAL_MIN,
                max_conn_interval: config::BLE_CONN_INTERVAL_MAX,
                slave_latency: config::BLE_SLAVE_LATENCY,
                conn_sup_timeout: config::BLE_SUP_TIMEOUT,
            },
            att_mtu: Some(BLE_ATT_MTU),
        };

        central::connect(self.sd, &conn_cfg).await.map_err(|e| match e {
            central::ConnectError::Raw(e) => raw_error(e),
            central::ConnectError::Timeout => {
                warn!("Connect timed out after {} ms", BLE_CONNECT_TIMEOUT_MS);
                BleError::ConnectFailed
            }
            _ => BleError::ConnectFailed,
        })
    }

    async fn service(&mut self, connection: &Connection, uuid: u16) -> Option<SdService> {
        match uuid {
            WEIGHT_SERVICE_UUID => discover_service::<WEIGHT_SERVICE_UUID>(connection).await,
            PRESSURE_SERVICE_UUID => discover_service::<PRESSURE_SERVICE_UUID>(connection).await,
            _ => None,
        }
    }

    async fn characteristic(&mut self, service: &SdService, uuid: u16) -> Option<SdCharacteristic> {
        let wanted = Uuid::new_16(uuid);
        service
            .characteristics
            .iter()
            .find(|c| c.uuid == Some(wanted))
            .copied()
    }

    fn can_read(&self, characteristic: &SdCharacteristic) -> bool {
        characteristic.readable
    }

    async fn read(
        &mut self,
        connection: &Connection,
        characteristic: &SdCharacteristic,
        buf: &mut [u8],
    ) -> Result<usize, BleError> {
        gatt_client::read(connection, characteristic.handle, buf)
            .await
            .map_err(|e| match e {
                ReadError::Raw(e) => raw_error(e),
                _ => BleError::ReadFailed,
            })
    }

    fn disconnect(&mut self, connection: Connection) {
        let _ = connection.disconnect();
    }
}
