//! User interface - renders the latest readings.
//!
//! The core only knows the [`Presenter`] trait; the firmware implements it
//! on top of an SSD1306 128×64 OLED (see `display`).

#[cfg(feature = "embedded")]
pub mod display;

use crate::config::{DISPLAY_FIRST_BASELINE, DISPLAY_LINE_HEIGHT, DISPLAY_LINE_LEN};
use crate::telemetry::MeasurementSnapshot;
use core::fmt::Write;
use heapless::String;

/// Number of text lines in the readings view.
pub const LINE_COUNT: usize = 4;

/// One formatted display line.
pub type Line = String<DISPLAY_LINE_LEN>;

/// Startup screen shown until the first snapshot arrives, as `(row, text)`.
pub const SEARCHING_LINES: [(usize, &str); 2] = [(0, "brew-monitor"), (2, "Searching sensors...")];

/// Baseline of text row `row` (pixels from the top).
pub const fn baseline(row: usize) -> i32 {
    DISPLAY_FIRST_BASELINE + row as i32 * DISPLAY_LINE_HEIGHT
}

/// Sink for measurement snapshots. Called once per poll cycle.
pub trait Presenter {
    fn render(&mut self, snapshot: &MeasurementSnapshot);
}

/// Format the readings view.
///
/// Values that were never received are shown as `--`.
pub fn format_lines(snapshot: &MeasurementSnapshot) -> [Line; LINE_COUNT] {
    let mut lines: [Line; LINE_COUNT] = Default::default();

    match snapshot.weight {
        Some(w) => {
            let _ = write!(lines[0], "Weight: {:.2} g", w.mass);
            let _ = write!(lines[1], "Flow:   {:.2} g/s", w.flow_rate);
            let _ = write!(lines[3], "Battery: {}%", w.battery);
        }
        None => {
            let _ = lines[0].push_str("Weight: -- g");
            let _ = lines[1].push_str("Flow:   -- g/s");
            let _ = lines[3].push_str("Battery: --%");
        }
    }

    match snapshot.pressure {
        Some(p) => {
            let _ = write!(lines[2], "Press:  {:.2} bar", p.pressure);
        }
        None => {
            let _ = lines[2].push_str("Press:  -- bar");
        }
    }

    lines
}
