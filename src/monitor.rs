//! Top-level sequence: discover, connect, then poll and render forever.

use crate::ble::central::Central;
use crate::ble::connection::connect;
use crate::ble::registry::Registry;
use crate::ble::scanner::{discover, DiscoveryConfig};
use crate::ble::Role;
use crate::config::POLL_PERIOD_MS;
use crate::poller::poll_once;
use crate::telemetry::MeasurementSnapshot;
use crate::ui::Presenter;
use embassy_time::{Duration, Ticker};

/// Runtime tunables of the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorConfig {
    pub discovery: DiscoveryConfig,
    /// Time between two poll cycles.
    pub poll_period: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            poll_period: Duration::from_millis(POLL_PERIOD_MS),
        }
    }
}

/// Owns the radio, the registry and the presenter.
pub struct Monitor<C: Central, P: Presenter> {
    central: C,
    presenter: P,
    registry: Registry<C>,
    config: MonitorConfig,
}

impl<C: Central, P: Presenter> Monitor<C, P> {
    pub fn new(central: C, presenter: P, config: MonitorConfig) -> Self {
        Self {
            central,
            presenter,
            registry: Registry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    pub fn snapshot(&self) -> MeasurementSnapshot {
        self.registry.snapshot()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Discover both peripherals and connect to whichever were found.
    ///
    /// Nothing here is fatal: a role that could not be found or linked is
    /// simply never polled.
    pub async fn setup(&mut self) {
        if let Err(e) = discover(&mut self.central, &mut self.registry, &self.config.discovery).await
        {
            warn!("Discovery incomplete: {}", e);
        }

        for role in Role::ALL {
            if !self.registry.slot(role).is_bound() {
                continue;
            }
            if let Err(e) = connect(&mut self.central, &mut self.registry, role).await {
                warn!("{} not connected: {}", role.name(), e);
            }
        }
    }

    /// One poll of every linked role followed by a render.
    pub async fn cycle(&mut self) {
        poll_once(&mut self.central, &mut self.registry).await;
        let snapshot = self.registry.snapshot();
        self.presenter.render(&snapshot);
    }

    pub async fn run(&mut self) -> ! {
        self.setup().await;

        info!("Polling every {} ms", self.config.poll_period.as_millis());
        let mut ticker = Ticker::every(self.config.poll_period);
        loop {
            self.cycle().await;
            ticker.next().await;
        }
    }
}
