//! Unified error types for brew-monitor.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (feature `defmt`) for efficient on-target logging.
//!
//! None of these are fatal: every failure degrades to "this role has no
//! (fresh) data" and the poll loop keeps running.

use core::fmt;

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// GAP / GATT raw error code from the SoftDevice.
    Raw(u32),
    /// Scan was cancelled or could not start.
    ScanFailed,
    /// Connection attempt failed.
    ConnectFailed,
    /// GATT discovery failed.
    DiscoveryFailed,
    /// Characteristic read failed.
    ReadFailed,
}

/// Discovery-phase outcome other than "both roles bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscoveryError {
    /// At least one role never advertised within the discovery window.
    Timeout,
    /// The radio could not run the scan.
    Scan(BleError),
}

/// Connection-phase failure for a single role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// Discovery never bound an advertisement to this role.
    NoAdvertisement,
    /// The link could not be established.
    LinkFailed,
    /// The peripheral does not expose the role's service.
    ServiceNotFound,
    /// The characteristic is missing or not readable.
    CharacteristicUnavailable,
}

/// Payload decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Buffer shorter than the role's minimum payload.
    TooShort { needed: usize, got: usize },
}

/// Why a role produced no fresh measurement in a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollError {
    Read(BleError),
    Decode(DecodeError),
}

// Convenience conversions

impl From<BleError> for PollError {
    fn from(e: BleError) -> Self {
        PollError::Read(e)
    }
}

impl From<DecodeError> for PollError {
    fn from(e: DecodeError) -> Self {
        PollError::Decode(e)
    }
}

impl fmt::Display for BleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BleError::Raw(code) => write!(f, "softdevice error {:#x}", code),
            BleError::ScanFailed => f.write_str("scan failed"),
            BleError::ConnectFailed => f.write_str("connection failed"),
            BleError::DiscoveryFailed => f.write_str("GATT discovery failed"),
            BleError::ReadFailed => f.write_str("characteristic read failed"),
        }
    }
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::Timeout => f.write_str("discovery timed out"),
            DiscoveryError::Scan(e) => write!(f, "discovery aborted: {}", e),
        }
    }
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnectError::NoAdvertisement => "no advertisement bound",
            ConnectError::LinkFailed => "connection failed",
            ConnectError::ServiceNotFound => "service not found",
            ConnectError::CharacteristicUnavailable => "characteristic not found or unreadable",
        })
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TooShort { needed, got } => {
                write!(f, "payload too short: need {} bytes, got {}", needed, got)
            }
        }
    }
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::Read(e) => e.fmt(f),
            PollError::Decode(e) => e.fmt(f),
        }
    }
}
