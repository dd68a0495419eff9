//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, BLE identifiers and display geometry live here
//! so they can be tuned in one place.

// BLE - peripheral identities

/// Scale: advertised service, readable measurement characteristic.
pub const WEIGHT_SERVICE_UUID: u16 = 0xFFF0;
pub const WEIGHT_CHAR_UUID: u16 = 0xFFF4;

/// Smallest scale payload that carries mass, flow rate and battery.
pub const WEIGHT_MIN_PAYLOAD: usize = 20;

/// Pressure sensor: advertised service, readable measurement characteristic.
pub const PRESSURE_SERVICE_UUID: u16 = 0x0FFF;
pub const PRESSURE_CHAR_UUID: u16 = 0xFF02;

/// Smallest pressure payload.
pub const PRESSURE_MIN_PAYLOAD: usize = 6;

// BLE - discovery timing

/// Duration of the BLE scan window (milliseconds).
pub const BLE_SCAN_DURATION_MS: u64 = 13_000;

/// Overall deadline for discovering both peripherals (milliseconds).
///
/// Looser than the scan window; only fires if the radio does not end the
/// scan on its own.
pub const BLE_DISCOVERY_TIMEOUT_MS: u64 = 15_000;

/// Maximum number of 16-bit service UUIDs kept per advertisement.
///
/// 31 bytes of advertising data hold at most 14 of them.
pub const BLE_MAX_ADV_SERVICES: usize = 14;

/// Maximum raw advertising payload (legacy advertising PDU).
pub const BLE_ADV_DATA_MAX: usize = 31;

// BLE - link parameters (SoftDevice)

/// Two central links: scale + pressure sensor.
pub const BLE_MAX_CONNECTIONS: u8 = 2;

/// BLE connection interval range (in 1.25 ms units).
/// Sensor values are polled once per second, so a relaxed interval is fine.
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Give up on a connection attempt after this long (milliseconds).
///
/// The peripheral may have gone quiet since discovery; a bounded attempt
/// lets setup move on to the other role.
pub const BLE_CONNECT_TIMEOUT_MS: u64 = 30_000;

/// ATT MTU requested per link.
pub const BLE_ATT_MTU: u16 = 64;

// Telemetry

/// Interval between two poll cycles (milliseconds).
pub const POLL_PERIOD_MS: u64 = 1_000;

/// Buffer size for a single characteristic read.
pub const READ_BUFFER_LEN: usize = 32;

// Display (SSD1306 OLED)
//
//   I²C SDA → P0.26
//   I²C SCL → P0.27

/// Panel size (pixels).
pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 64;

/// Advance of one FONT_6X10 glyph (pixels).
pub const DISPLAY_GLYPH_WIDTH: i32 = 6;

/// Baseline of the first text line (pixels from the top).
pub const DISPLAY_FIRST_BASELINE: i32 = 10;

/// Vertical distance between two text lines (pixels).
pub const DISPLAY_LINE_HEIGHT: i32 = 12;

/// Capacity of one formatted display line.
pub const DISPLAY_LINE_LEN: usize = 24;
