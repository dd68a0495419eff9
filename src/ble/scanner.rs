//! BLE GAP scanner - discovers the scale and the pressure sensor.
//!
//! One active scan is run at startup. Advertisements are matched against
//! each role's service UUID and the first match per role is bound into the
//! registry. The scan stops as soon as both roles are bound, when the radio
//! ends the scan window, or when the overall discovery deadline fires,
//! whichever comes first.

use crate::ble::central::{Central, ScanControl, ScanEvent, ScanParams};
use crate::ble::registry::Registry;
use crate::ble::Role;
use crate::config::{BLE_DISCOVERY_TIMEOUT_MS, BLE_SCAN_DURATION_MS};
use crate::error::DiscoveryError;
use embassy_time::{with_timeout, Duration};

/// Timing of the discovery phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Active scan: request scan-response data.
    pub active: bool,
    /// Scan window handed to the radio.
    pub scan_duration: Duration,
    /// Overall deadline around the whole scan.
    pub timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            active: true,
            scan_duration: Duration::from_millis(BLE_SCAN_DURATION_MS),
            timeout: Duration::from_millis(BLE_DISCOVERY_TIMEOUT_MS),
        }
    }
}

/// Run discovery, binding at most one advertisement per role.
///
/// Returns `Err(DiscoveryError::Timeout)` if a role is still unbound when the
/// scan is over. Whatever was bound stays bound either way.
pub async fn discover<C: Central>(
    central: &mut C,
    registry: &mut Registry<C>,
    config: &DiscoveryConfig,
) -> Result<(), DiscoveryError> {
    info!(
        "BLE scan starting ({} ms window, {} ms deadline)",
        config.scan_duration.as_millis(),
        config.timeout.as_millis()
    );

    let params = ScanParams {
        active: config.active,
        duration: config.scan_duration,
    };

    let scan = central.scan(&params, |event| match event {
        ScanEvent::Advertisement(advert) => {
            for role in Role::ALL {
                if advert.advertises(role.profile().service) && registry.bind(role, advert) {
                    info!(
                        "Found {} device: {} (RSSI {})",
                        role.name(),
                        advert.name.as_str(),
                        advert.rssi
                    );
                }
            }

            if registry.all_bound() {
                ScanControl::Stop
            } else {
                ScanControl::Continue
            }
        }
        ScanEvent::Ended(reason) => {
            debug!("BLE scan ended by radio: {}", reason);
            ScanControl::Stop
        }
    });

    let outcome = with_timeout(config.timeout, scan).await;
    central.stop_scan();

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!("BLE scan failed: {}", e);
            return Err(DiscoveryError::Scan(e));
        }
        Err(_) => debug!("BLE discovery deadline reached"),
    }

    let mut missing = false;
    for role in Role::ALL {
        if !registry.slot(role).is_bound() {
            warn!("No {} device found", role.name());
            missing = true;
        }
    }

    if missing {
        Err(DiscoveryError::Timeout)
    } else {
        info!("BLE scan complete - both devices found");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
