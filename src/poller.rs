//! Telemetry poller - one characteristic read per connected role per cycle.

use crate::ble::central::Central;
use crate::ble::registry::Registry;
use crate::ble::Role;
use crate::config::READ_BUFFER_LEN;
use crate::error::PollError;
use crate::telemetry::Measurement;

/// Read, decode and store the latest value of every connected role.
///
/// Weight is polled before pressure. A role without a link is skipped, and a
/// failed read or a short payload leaves that role's previous value in place.
pub async fn poll_once<C: Central>(central: &mut C, registry: &mut Registry<C>) {
    for role in Role::ALL {
        match poll_role(central, registry, role).await {
            Ok(Some(measurement)) => debug!("{}: {}", role.name(), measurement),
            Ok(None) => {}
            Err(PollError::Decode(e)) => debug!("{}: skipping cycle, {}", role.name(), e),
            Err(PollError::Read(e)) => warn!("{}: read failed, {}", role.name(), e),
        }
    }
}

async fn poll_role<C: Central>(
    central: &mut C,
    registry: &mut Registry<C>,
    role: Role,
) -> Result<Option<Measurement>, PollError> {
    let Some(link) = registry.slot(role).link() else {
        return Ok(None);
    };

    let mut buf = [0u8; READ_BUFFER_LEN];
    let len = central
        .read(&link.connection, &link.characteristic, &mut buf)
        .await?;
    let measurement = Measurement::decode(role, &buf[..len])?;

    registry.store(measurement);
    Ok(Some(measurement))
}
