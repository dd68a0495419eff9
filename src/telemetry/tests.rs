use super::*;
use crate::config::{PRESSURE_MIN_PAYLOAD, WEIGHT_MIN_PAYLOAD};

// ════════════════════════════════════════════════════════════════════════
// Weight payload
// ════════════════════════════════════════════════════════════════════════

#[test]
fn weight_reference_payload() {
    let mut data = [0xAAu8; 20];
    data[7..10].copy_from_slice(&[0x00, 0x4E, 0x20]); // 20000
    data[10] = 0x55;
    data[11..13].copy_from_slice(&[0x03, 0xE8]); // 1000
    data[13] = 50;

    let reading = WeightReading::from_ble_bytes(&data).unwrap();
    assert_eq!(reading.mass, 200.0);
    assert_eq!(reading.flow_rate, 10.0);
    assert_eq!(reading.battery, 50);
}

#[test]
fn weight_uses_all_24_bits_of_mass() {
    let mut data = [0u8; 20];
    data[7..10].copy_from_slice(&[0xFF, 0xFF, 0xFF]);
    let reading = WeightReading::from_ble_bytes(&data).unwrap();
    assert_eq!(reading.mass, 16_777_215.0 / 100.0);

    data[7..10].copy_from_slice(&[0x01, 0x00, 0x00]);
    let reading = WeightReading::from_ble_bytes(&data).unwrap();
    assert_eq!(reading.mass, 655.36);
}

#[test]
fn weight_fractional_values() {
    let mut data = [0u8; 20];
    data[9] = 5; // 0.05 g
    data[12] = 25; // 0.25 g/s
    let reading = WeightReading::from_ble_bytes(&data).unwrap();
    assert!((reading.mass - 0.05).abs() < 1e-6);
    assert!((reading.flow_rate - 0.25).abs() < 1e-6);
}

#[test]
fn weight_battery_is_not_clamped() {
    let mut data = [0u8; 20];
    data[13] = 0xFF;
    assert_eq!(WeightReading::from_ble_bytes(&data).unwrap().battery, 255);
    data[13] = 101;
    assert_eq!(WeightReading::from_ble_bytes(&data).unwrap().battery, 101);
}

#[test]
fn weight_too_short() {
    for len in [0, 1, 13, 14, WEIGHT_MIN_PAYLOAD - 1] {
        let data = [0u8; 32];
        assert_eq!(
            WeightReading::from_ble_bytes(&data[..len]),
            Err(DecodeError::TooShort {
                needed: WEIGHT_MIN_PAYLOAD,
                got: len
            })
        );
    }
}

#[test]
fn weight_longer_payload_ok() {
    // Extra bytes are ignored
    let mut data = [0xFFu8; 32];
    data[7..10].copy_from_slice(&[0x00, 0x00, 0x64]);
    data[11..13].copy_from_slice(&[0x00, 0x00]);
    let reading = WeightReading::from_ble_bytes(&data).unwrap();
    assert_eq!(reading.mass, 1.0);
    assert_eq!(reading.flow_rate, 0.0);
    assert_eq!(reading.battery, 0xFF);
}

#[test]
fn weight_decode_is_deterministic() {
    let mut data = [0u8; 20];
    for (i, b) in data.iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    let first = WeightReading::from_ble_bytes(&data).unwrap();
    let second = WeightReading::from_ble_bytes(&data).unwrap();
    assert_eq!(first, second);
}

// ════════════════════════════════════════════════════════════════════════
// Pressure payload
// ════════════════════════════════════════════════════════════════════════

#[test]
fn pressure_reference_payload() {
    let data = [0x11, 0x22, 0x0F, 0xA0, 0x33, 0x44];
    let reading = PressureReading::from_ble_bytes(&data).unwrap();
    assert_eq!(reading.pressure, 40.0);
}

#[test]
fn pressure_full_scale() {
    let data = [0, 0, 0xFF, 0xFF, 0, 0];
    assert_eq!(
        PressureReading::from_ble_bytes(&data).unwrap().pressure,
        655.35
    );
}

#[test]
fn pressure_too_short() {
    for len in 0..PRESSURE_MIN_PAYLOAD {
        let data = [0x0Fu8; 8];
        assert_eq!(
            PressureReading::from_ble_bytes(&data[..len]),
            Err(DecodeError::TooShort {
                needed: PRESSURE_MIN_PAYLOAD,
                got: len
            })
        );
    }
}

#[test]
fn pressure_longer_payload_ok() {
    let data = [0, 0, 0x02, 0x58, 0, 0, 0xDE, 0xAD];
    assert_eq!(PressureReading::from_ble_bytes(&data).unwrap().pressure, 6.0);
}

// ════════════════════════════════════════════════════════════════════════
// Measurement / snapshot
// ════════════════════════════════════════════════════════════════════════

#[test]
fn measurement_decode_dispatches_by_role() {
    let data = [0, 0, 0x03, 0x84, 0, 0]; // 900
    assert_eq!(
        Measurement::decode(Role::Pressure, &data),
        Ok(Measurement::Pressure(PressureReading { pressure: 9.0 }))
    );
    // The same 6 bytes are far too short for the scale.
    assert_eq!(
        Measurement::decode(Role::Weight, &data),
        Err(DecodeError::TooShort {
            needed: WEIGHT_MIN_PAYLOAD,
            got: 6
        })
    );
}

#[test]
fn measurement_reports_its_role() {
    let w = Measurement::Weight(WeightReading::default());
    let p = Measurement::Pressure(PressureReading::default());
    assert_eq!(w.role(), Role::Weight);
    assert_eq!(p.role(), Role::Pressure);
}

#[test]
fn snapshot_defaults_to_zero() {
    let snapshot = MeasurementSnapshot::default();
    assert_eq!(snapshot.weight, None);
    assert_eq!(snapshot.pressure, None);
    assert_eq!(snapshot.mass(), 0.0);
    assert_eq!(snapshot.flow_rate(), 0.0);
    assert_eq!(snapshot.battery(), 0);
    assert_eq!(snapshot.pressure(), 0.0);
}

#[test]
fn snapshot_apply_overwrites_only_its_role() {
    let mut snapshot = MeasurementSnapshot::default();
    snapshot.apply(Measurement::Pressure(PressureReading { pressure: 8.5 }));
    snapshot.apply(Measurement::Weight(WeightReading {
        mass: 36.0,
        flow_rate: 1.5,
        battery: 64,
    }));
    snapshot.apply(Measurement::Weight(WeightReading {
        mass: 37.0,
        flow_rate: 1.0,
        battery: 64,
    }));

    assert_eq!(snapshot.mass(), 37.0);
    assert_eq!(snapshot.flow_rate(), 1.0);
    assert_eq!(snapshot.pressure(), 8.5);
}
