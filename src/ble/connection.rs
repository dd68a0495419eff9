//! Connection manager - links a bound role to its peripheral.
//!
//! For a role with a bound advertisement this module:
//! 1. Establishes the link (single attempt).
//! 2. Resolves the role's service.
//! 3. Resolves the measurement characteristic and checks it is readable.
//! 4. Stores the link in the role's slot.
//!
//! Any failure after step 1 disconnects before returning. Nothing here
//! retries; calling [`connect`] again is the only way to get a new attempt.

use crate::ble::central::Central;
use crate::ble::registry::{Link, Registry};
use crate::ble::Role;
use crate::error::ConnectError;

/// `Ok` once the role's slot holds a readable link.
pub type ConnectResult = Result<(), ConnectError>;

/// Connect `role` to the advertisement discovery bound for it.
pub async fn connect<C: Central>(
    central: &mut C,
    registry: &mut Registry<C>,
    role: Role,
) -> ConnectResult {
    let profile = role.profile();
    let slot = registry.slot_mut(role);

    if slot.is_linked() {
        debug!("{} already connected", role.name());
        return Ok(());
    }

    let Some(advertisement) = slot.advertisement() else {
        return Err(ConnectError::NoAdvertisement);
    };

    info!("Connecting to {} device {}", role.name(), advertisement.name.as_str());

    let connection = match central.connect(advertisement).await {
        Ok(connection) => connection,
        Err(e) => {
            warn!("{}: connection failed ({})", role.name(), e);
            return Err(ConnectError::LinkFailed);
        }
    };

    let Some(service) = central.service(&connection, profile.service).await else {
        warn!("{}: service {=u16:#x} not found", role.name(), profile.service);
        central.disconnect(connection);
        return Err(ConnectError::ServiceNotFound);
    };

    let characteristic = match central.characteristic(&service, profile.characteristic).await {
        Some(characteristic) if central.can_read(&characteristic) => characteristic,
        _ => {
            warn!(
                "{}: characteristic {=u16:#x} not found or unreadable",
                role.name(),
                profile.characteristic
            );
            central.disconnect(connection);
            return Err(ConnectError::CharacteristicUnavailable);
        }
    };

    slot.set_link(Link {
        connection,
        characteristic,
    });
    info!("{} device connected", role.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::central::mock::{MockCentral, MockPeripheral};
    use crate::config::{WEIGHT_CHAR_UUID, WEIGHT_SERVICE_UUID};
    use embassy_futures::block_on;

    fn bound(peripheral: MockPeripheral) -> (MockCentral, Registry<MockCentral>) {
        let mut central = MockCentral::new();
        central.advertise(peripheral, &[WEIGHT_SERVICE_UUID]);
        let mut registry = Registry::new();
        let advert = central.adverts[0].clone();
        registry.bind(Role::Weight, &advert);
        (central, registry)
    }

    #[test]
    fn connects_and_stores_link() {
        let (mut central, mut registry) =
            bound(MockPeripheral::new(1).with_gatt(WEIGHT_SERVICE_UUID, WEIGHT_CHAR_UUID, true));

        assert_eq!(block_on(connect(&mut central, &mut registry, Role::Weight)), Ok(()));

        let link = registry.slot(Role::Weight).link().unwrap();
        assert_eq!(link.connection.peripheral, 0);
        assert_eq!(link.characteristic.uuid, WEIGHT_CHAR_UUID);
        assert!(central.disconnected.is_empty());
    }

    #[test]
    fn unbound_role_is_a_no_op() {
        let mut central = MockCentral::new();
        let mut registry = Registry::new();

        assert_eq!(
            block_on(connect(&mut central, &mut registry, Role::Pressure)),
            Err(ConnectError::NoAdvertisement)
        );
        assert!(central.connect_attempts.is_empty());
    }

    #[test]
    fn link_failure_leaves_slot_empty() {
        let (mut central, mut registry) = bound(
            MockPeripheral::new(1)
                .with_gatt(WEIGHT_SERVICE_UUID, WEIGHT_CHAR_UUID, true)
                .unconnectable(),
        );

        assert_eq!(
            block_on(connect(&mut central, &mut registry, Role::Weight)),
            Err(ConnectError::LinkFailed)
        );
        assert!(!registry.slot(Role::Weight).is_linked());
        assert!(central.disconnected.is_empty());
    }

    #[test]
    fn missing_service_disconnects() {
        let (mut central, mut registry) =
            bound(MockPeripheral::new(1).with_gatt(0x180F, WEIGHT_CHAR_UUID, true));

        assert_eq!(
            block_on(connect(&mut central, &mut registry, Role::Weight)),
            Err(ConnectError::ServiceNotFound)
        );
        assert!(!registry.slot(Role::Weight).is_linked());
        assert_eq!(central.disconnected.as_slice(), &[0]);
    }

    #[test]
    fn missing_characteristic_disconnects() {
        let (mut central, mut registry) =
            bound(MockPeripheral::new(1).with_gatt(WEIGHT_SERVICE_UUID, 0x2A19, true));

        assert_eq!(
            block_on(connect(&mut central, &mut registry, Role::Weight)),
            Err(ConnectError::CharacteristicUnavailable)
        );
        assert!(!registry.slot(Role::Weight).is_linked());
        assert_eq!(central.disconnected.as_slice(), &[0]);
    }

    #[test]
    fn unreadable_characteristic_disconnects() {
        let (mut central, mut registry) =
            bound(MockPeripheral::new(1).with_gatt(WEIGHT_SERVICE_UUID, WEIGHT_CHAR_UUID, false));

        assert_eq!(
            block_on(connect(&mut central, &mut registry, Role::Weight)),
            Err(ConnectError::CharacteristicUnavailable)
        );
        assert!(!registry.slot(Role::Weight).is_linked());
        assert_eq!(central.disconnected.as_slice(), &[0]);
    }

    #[test]
    fn failed_attempt_can_be_retried_explicitly() {
        let (mut central, mut registry) = bound(
            MockPeripheral::new(1)
                .with_gatt(WEIGHT_SERVICE_UUID, WEIGHT_CHAR_UUID, true)
                .unconnectable(),
        );

        assert_eq!(
            block_on(connect(&mut central, &mut registry, Role::Weight)),
            Err(ConnectError::LinkFailed)
        );
        assert_eq!(central.connect_attempts.len(), 1);

        central.peripherals[0].connectable = true;
        assert_eq!(block_on(connect(&mut central, &mut registry, Role::Weight)), Ok(()));
        assert_eq!(central.connect_attempts.len(), 2);
    }

    #[test]
    fn connected_role_is_not_reconnected() {
        let (mut central, mut registry) =
            bound(MockPeripheral::new(1).with_gatt(WEIGHT_SERVICE_UUID, WEIGHT_CHAR_UUID, true));

        block_on(connect(&mut central, &mut registry, Role::Weight)).unwrap();
        block_on(connect(&mut central, &mut registry, Role::Weight)).unwrap();
        assert_eq!(central.connect_attempts.len(), 1);
    }
}
