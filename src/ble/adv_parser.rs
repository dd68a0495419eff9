//! Advertising data (AD structure) parsing.

use crate::config::BLE_MAX_ADV_SERVICES;
use heapless::{String, Vec};

const AD_INCOMPLETE_UUID16: u8 = 0x02;
const AD_COMPLETE_UUID16: u8 = 0x03;
const AD_INCOMPLETE_UUID128: u8 = 0x06;
const AD_COMPLETE_UUID128: u8 = 0x07;
const AD_SHORTENED_NAME: u8 = 0x08;
const AD_COMPLETE_NAME: u8 = 0x09;

/// Bluetooth base UUID 0000xxxx-0000-1000-8000-00805f9b34fb, little-endian,
/// with the 16-bit alias bytes (12 and 13) zeroed.
const BASE_UUID_LE: [u8; 16] = [
    0xfb, 0x34, 0x9b, 0x5f, 0x80, 0x00, 0x00, 0x80, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Iterate the AD structures of `data` as `(ad_type, payload)` pairs.
///
/// Stops at a zero length or a structure that runs past the buffer.
fn ad_structures(data: &[u8]) -> impl Iterator<Item = (u8, &[u8])> {
    let mut i = 0;
    core::iter::from_fn(move || {
        if i >= data.len() {
            return None;
        }
        let len = data[i] as usize;
        if len == 0 || i + len >= data.len() {
            return None;
        }
        let item = (data[i + 1], &data[i + 2..i + 1 + len]);
        i += len + 1;
        Some(item)
    })
}

/// 16-bit alias of a little-endian 128-bit UUID, if it sits on the base UUID.
fn uuid16_from_uuid128(bytes: &[u8]) -> Option<u16> {
    let matches_base = bytes
        .iter()
        .zip(BASE_UUID_LE.iter())
        .enumerate()
        .all(|(idx, (b, base))| idx == 12 || idx == 13 || b == base);
    let top_clear = bytes[14] == 0 && bytes[15] == 0;
    (matches_base && top_clear).then(|| u16::from_le_bytes([bytes[12], bytes[13]]))
}

/// Every 16-bit service UUID in `data`, in advertised order, duplicates kept.
fn service_uuids(data: &[u8]) -> impl Iterator<Item = u16> + '_ {
    ad_structures(data).flat_map(|(ad_type, payload)| {
        let uuid16: &[u8] = match ad_type {
            AD_INCOMPLETE_UUID16 | AD_COMPLETE_UUID16 => payload,
            _ => &[],
        };
        let uuid128: &[u8] = match ad_type {
            AD_INCOMPLETE_UUID128 | AD_COMPLETE_UUID128 => payload,
            _ => &[],
        };
        uuid16
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .chain(uuid128.chunks_exact(16).filter_map(uuid16_from_uuid128))
    })
}

/// Collect every advertised service UUID that has a 16-bit form.
///
/// A legacy advertisement holds at most 14 of them, so nothing is dropped.
pub fn advertised_services(data: &[u8]) -> Vec<u16, BLE_MAX_ADV_SERVICES> {
    let mut services = Vec::new();
    for uuid in service_uuids(data) {
        if !services.contains(&uuid) && services.push(uuid).is_err() {
            break;
        }
    }
    services
}

/// Check if raw advertisement data lists the given 16-bit service UUID.
///
/// Scans the raw bytes directly, so the answer never depends on how many
/// other services precede it.
pub fn contains_service(data: &[u8], uuid: u16) -> bool {
    service_uuids(data).any(|u| u == uuid)
}

/// Extract complete/shortened local name from advertisement data.
pub fn extract_device_name(data: &[u8]) -> String<32> {
    for (ad_type, payload) in ad_structures(data) {
        if ad_type == AD_SHORTENED_NAME || ad_type == AD_COMPLETE_NAME {
            let mut name = String::new();
            for &b in payload {
                if name.push(b as char).is_err() {
                    break;
                }
            }
            return name;
        }
    }

    let mut s = String::new();
    let _ = s.push_str("Unknown");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_uuid16_in_advertisement() {
        // AD structure: len=3, type=0x03 (Complete 16-bit UUIDs), UUID=0xFFF0
        let ad_data = [0x03, 0x03, 0xF0, 0xFF];
        assert!(contains_service(&ad_data, 0xFFF0));
        assert!(!contains_service(&ad_data, 0x0FFF));
    }

    #[test]
    fn byte_order_distinguishes_the_two_sensors() {
        // 0x0FFF little-endian is FF 0F; must not be read as 0xFFF0
        let ad_data = [0x03, 0x03, 0xFF, 0x0F];
        assert!(contains_service(&ad_data, 0x0FFF));
        assert!(!contains_service(&ad_data, 0xFFF0));
    }

    #[test]
    fn uuid_among_multiple_uuids() {
        let ad_data = [
            0x02, 0x01, 0x06, // Flags
            0x07, 0x02, // len=7, type=0x02 (Incomplete 16-bit UUIDs)
            0x0F, 0x18, // Battery
            0xF0, 0xFF, // Scale
            0x01, 0x18, // GATT
        ];
        let services = advertised_services(&ad_data);
        assert_eq!(services.as_slice(), &[0x180F, 0xFFF0, 0x1801]);
    }

    #[test]
    fn uuid128_on_base_uuid_reduces_to_16_bit() {
        let mut ad_data = [0u8; 18];
        ad_data[0] = 17;
        ad_data[1] = AD_COMPLETE_UUID128;
        ad_data[2..18].copy_from_slice(&BASE_UUID_LE);
        ad_data[2 + 12] = 0xFF;
        ad_data[2 + 13] = 0x0F;
        assert_eq!(advertised_services(&ad_data).as_slice(), &[0x0FFF]);
    }

    #[test]
    fn vendor_uuid128_is_ignored() {
        let mut ad_data = [0u8; 18];
        ad_data[0] = 17;
        ad_data[1] = AD_COMPLETE_UUID128;
        for (i, b) in ad_data[2..].iter_mut().enumerate() {
            *b = 0x40 + i as u8;
        }
        assert!(advertised_services(&ad_data).is_empty());
    }

    #[test]
    fn target_after_many_standard_services_is_found() {
        // Ten 16-bit UUIDs in one structure, scale service last.
        let mut ad_data = [0u8; 22];
        ad_data[0] = 21;
        ad_data[1] = AD_COMPLETE_UUID16;
        for (i, chunk) in ad_data[2..20].chunks_exact_mut(2).enumerate() {
            chunk.copy_from_slice(&(0x1800 + i as u16).to_le_bytes());
        }
        ad_data[20..22].copy_from_slice(&0xFFF0u16.to_le_bytes());

        assert!(contains_service(&ad_data, 0xFFF0));
        let services = advertised_services(&ad_data);
        assert_eq!(services.len(), 10);
        assert_eq!(services.last(), Some(&0xFFF0));
    }

    #[test]
    fn fourteen_uuids_fill_a_legacy_advertisement() {
        let mut ad_data = [0u8; 30];
        ad_data[0] = 29;
        ad_data[1] = AD_INCOMPLETE_UUID16;
        for (i, chunk) in ad_data[2..].chunks_exact_mut(2).enumerate() {
            chunk.copy_from_slice(&(0x2A00 + i as u16).to_le_bytes());
        }

        assert_eq!(advertised_services(&ad_data).len(), 14);
        assert!(contains_service(&ad_data, 0x2A0D));
    }

    #[test]
    fn duplicate_uuids_listed_once() {
        let ad_data = [0x03, 0x02, 0xF0, 0xFF, 0x03, 0x03, 0xF0, 0xFF];
        assert_eq!(advertised_services(&ad_data).len(), 1);
    }

    #[test]
    fn empty_advertisement_data() {
        assert!(advertised_services(&[]).is_empty());
    }

    #[test]
    fn malformed_lengths_keep_what_was_parsed() {
        assert!(!contains_service(&[0x00], 0xFFF0));
        assert!(!contains_service(&[0x05, 0x03, 0xF0], 0xFFF0));

        // First structure is fine, second one overruns the buffer.
        let ad_data = [0x03, 0x03, 0xF0, 0xFF, 0x09, 0x03, 0xFF];
        assert_eq!(advertised_services(&ad_data).as_slice(), &[0xFFF0]);
    }

    #[test]
    fn extract_complete_local_name() {
        let ad_data = [0x07, 0x09, b'B', b'O', b'O', b'K', b'O', b'O'];
        assert_eq!(extract_device_name(&ad_data).as_str(), "BOOKOO");
    }

    #[test]
    fn extract_shortened_local_name() {
        let ad_data = [0x05, 0x08, b'P', b'R', b'S', b'1'];
        assert_eq!(extract_device_name(&ad_data).as_str(), "PRS1");
    }

    #[test]
    fn no_name_in_advertisement() {
        let ad_data = [0x02, 0x01, 0x06];
        assert_eq!(extract_device_name(&ad_data).as_str(), "Unknown");
    }

    #[test]
    fn name_truncated_to_32_chars() {
        let mut ad_data = [0u8; 40];
        ad_data[0] = 35; // len
        ad_data[1] = AD_COMPLETE_NAME;
        for b in ad_data[2..37].iter_mut() {
            *b = b'X';
        }
        assert_eq!(extract_device_name(&ad_data).len(), 32);
    }
}
