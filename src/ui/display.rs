//! SSD1306 OLED display wrapper.

use crate::telemetry::MeasurementSnapshot;
use crate::ui::{baseline, format_lines, Presenter, LINE_COUNT, SEARCHING_LINES};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// 128×64 SSD1306 on I²C, drawn through an in-RAM frame buffer.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Latest snapshot handed from the monitor task to the display task.
pub type SnapshotSignal = Signal<CriticalSectionRawMutex, MeasurementSnapshot>;

const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

/// Bring the panel up blank.
///
/// A panel that does not answer is logged and left alone; the monitor keeps
/// running without a screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let mut display = Ssd1306::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();

    if display.init().is_err() {
        warn!("SSD1306 did not respond to init");
        return display;
    }
    show(&mut display, &[]);
    display
}

/// Replace the frame with `rows` and push it to the panel.
fn show<I2C>(display: &mut Display<I2C>, rows: &[(usize, &str)])
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = DrawTarget::clear(display, BinaryColor::Off);
    for &(row, text) in rows {
        let _ = Text::new(text, Point::new(0, baseline(row)), TEXT_STYLE).draw(display);
    }
    if display.flush().is_err() {
        debug!("SSD1306 flush failed");
    }
}

/// Render the readings view.
pub fn draw_readings<I2C>(display: &mut Display<I2C>, snapshot: &MeasurementSnapshot)
where
    I2C: embedded_hal::i2c::I2c,
{
    let lines = format_lines(snapshot);
    let mut rows = [(0, ""); LINE_COUNT];
    for (row, (slot, line)) in rows.iter_mut().zip(lines.iter()).enumerate() {
        *slot = (row, line.as_str());
    }
    show(display, &rows);
}

/// Render the startup screen shown while scanning.
pub fn draw_searching<I2C>(display: &mut Display<I2C>)
where
    I2C: embedded_hal::i2c::I2c,
{
    show(display, &SEARCHING_LINES);
}

/// Presenter that forwards snapshots to the display task.
///
/// Only the newest snapshot is kept; a slow I²C flush never holds up the
/// poll loop.
pub struct SignalPresenter {
    signal: &'static SnapshotSignal,
}

impl SignalPresenter {
    pub const fn new(signal: &'static SnapshotSignal) -> Self {
        Self { signal }
    }
}

impl Presenter for SignalPresenter {
    fn render(&mut self, snapshot: &MeasurementSnapshot) {
        self.signal.signal(*snapshot);
    }
}

/// Redraw the display whenever a new snapshot is signalled.
pub async fn display_task<I2C>(mut display: Display<I2C>, signal: &'static SnapshotSignal) -> !
where
    I2C: embedded_hal::i2c::I2c,
{
    draw_searching(&mut display);

    loop {
        let snapshot = signal.wait().await;
        draw_readings(&mut display, &snapshot);
    }
}
