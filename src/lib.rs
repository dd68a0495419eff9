//! brew-monitor: BLE central that reads a coffee scale and a pressure sensor.
//!
//! The library holds everything except the board bring-up: decoding,
//! discovery, connection handling, polling and display formatting. It is
//! generic over [`ble::central::Central`] and [`ui::Presenter`], so it builds
//! and tests on the host.
//!
//! Usage: `cargo test` (host) or `cargo build --release --features embedded`
//! for the nRF52840 firmware in main.rs.

#![cfg_attr(not(test), no_std)]

// Must stay first: the logging macros are textually scoped.
mod fmt;

pub mod ble;
pub mod config;
pub mod error;
pub mod monitor;
pub mod poller;
pub mod telemetry;
pub mod ui;
