//! Radio transport trait for abstraction and testability
//!
//! This trait is the central-role surface the monitor needs from a BLE
//! stack, allowing the SoftDevice to be swapped with a mock for testing.

use crate::ble::AdvertisementRecord;
use crate::error::BleError;
use core::future::Future;
use embassy_time::Duration;

/// Scan parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanParams {
    /// Request scan-response data (active scanning).
    pub active: bool,
    /// How long the radio scans before ending on its own.
    pub duration: Duration,
}

/// Convert a duration to the 10 ms units radio stacks use for scan and
/// connect timeouts, saturating at the field's maximum.
pub fn timeout_units(duration: Duration) -> u16 {
    (duration.as_millis() / 10).min(u16::MAX as u64) as u16
}

/// Why the radio ended a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanEnd {
    /// The scan window elapsed.
    Timeout,
    /// The stack stopped scanning for another reason.
    Aborted,
}

/// Events delivered to a scan handler.
#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// An advertising (or scan-response) report was received.
    Advertisement(&'a AdvertisementRecord),
    /// No more reports will follow.
    Ended(ScanEnd),
}

/// Handler verdict after each event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// Abstract BLE central interface.
///
/// Calls are awaited one at a time by a single task; implementations do not
/// need to be re-entrant.
pub trait Central {
    /// An established link.
    type Connection;
    /// A resolved GATT service on a link.
    type Service;
    /// A resolved GATT characteristic.
    type Characteristic;

    /// Scan for advertisements, feeding every report to `handler`.
    ///
    /// Resolves once the handler returns [`ScanControl::Stop`] or the scan
    /// window ends (after delivering [`ScanEvent::Ended`]).
    fn scan<H>(
        &mut self,
        params: &ScanParams,
        handler: H,
    ) -> impl Future<Output = Result<(), BleError>>
    where
        H: FnMut(ScanEvent<'_>) -> ScanControl;

    /// Make sure the radio is no longer scanning.
    fn stop_scan(&mut self);

    /// Establish a link to the advertiser.
    fn connect(
        &mut self,
        advertisement: &AdvertisementRecord,
    ) -> impl Future<Output = Result<Self::Connection, BleError>>;

    /// Look up a primary service by 16-bit UUID.
    fn service(
        &mut self,
        connection: &Self::Connection,
        uuid: u16,
    ) -> impl Future<Output = Option<Self::Service>>;

    /// Look up a characteristic of a resolved service by 16-bit UUID.
    fn characteristic(
        &mut self,
        service: &Self::Service,
        uuid: u16,
    ) -> impl Future<Output = Option<Self::Characteristic>>;

    /// Whether the characteristic supports reads.
    fn can_read(&self, characteristic: &Self::Characteristic) -> bool;

    /// Read the characteristic value into `buf`, returning the length.
    fn read(
        &mut self,
        connection: &Self::Connection,
        characteristic: &Self::Characteristic,
        buf: &mut [u8],
    ) -> impl Future<Output = Result<usize, BleError>>;

    /// Tear the link down.
    fn disconnect(&mut self, connection: Self::Connection);
}
