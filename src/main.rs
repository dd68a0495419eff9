//! brew-monitor firmware for the nRF52840.
//!
//! Task layout:
//! - `softdevice_task`: runs the SoftDevice event loop.
//! - `render_task`: redraws the SSD1306 whenever a new snapshot arrives.
//! - main: the monitor itself (scan, connect, poll once per second).

#![no_std]
#![no_main]

use brew_monitor::ble::softdevice::SoftdeviceCentral;
use brew_monitor::config::{BLE_ATT_MTU, BLE_MAX_CONNECTIONS};
use brew_monitor::monitor::{Monitor, MonitorConfig};
use brew_monitor::ui::display::{self, Display, SignalPresenter, SnapshotSignal};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::interrupt::Priority;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::signal::Signal;
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type DisplayI2c = Twim<'static, peripherals::TWISPI0>;

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn render_task(display: Display<DisplayI2c>, snapshot: &'static SnapshotSignal) -> ! {
    display::display_task(display, snapshot).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: BLE_MAX_CONNECTIONS,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t {
            att_mtu: BLE_ATT_MTU,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 0,
            periph_role_count: 0,
            central_role_count: BLE_MAX_CONNECTIONS,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("brew-monitor starting");

    // The SoftDevice reserves interrupt priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    let sd: &'static Softdevice = Softdevice::enable(&softdevice_config());
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // OLED on P0.26 (SDA) / P0.27 (SCL)
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);

    static SNAPSHOT: StaticCell<SnapshotSignal> = StaticCell::new();
    let snapshot: &'static SnapshotSignal = SNAPSHOT.init(Signal::new());
    unwrap!(spawner.spawn(render_task(display::init(i2c), snapshot)));

    let mut monitor = Monitor::new(
        SoftdeviceCentral::new(sd),
        SignalPresenter::new(snapshot),
        MonitorConfig::default(),
    );
    monitor.run().await
}
