//! Glucose trend display simulator for desktop.
//!
//! Runs the chart / summary card cycle in an SDL window through
//! `embedded-graphics-simulator`, fed by the random demo source or by a
//! replayed glucose export (`[source] replay = "export.csv"`).
//!
//! ```text
//! simulator [settings.toml]
//! ```
//!
//! Close the window or press Escape to stop. `RUST_LOG=debug` prints every
//! acquired sample.

mod replay;
mod settings;
mod source;
mod timing;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use glucose_trend_common::colors::BLACK;
use glucose_trend_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use glucose_trend_common::{CycleError, CycleScheduler, DisplayCanvas, SampleSource, Step, StopSignal};
use log::{info, warn};

use crate::replay::ReplaySource;
use crate::settings::SourceSettings;
use crate::source::RandomSource;
use crate::timing::FRAME_TIME;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = settings::load(settings_path.as_deref())?;
    let mut scheduler = CycleScheduler::new(settings.display).context("invalid display settings")?;
    let mut source = open_source(&settings.source)?;

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    display.clear(BLACK).ok();
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Glucose Trend Sim", &output_settings);
    window.update(&display);

    let mut canvas = DisplayCanvas::new(display);
    let stop = StopSignal::new();

    info!(
        "Display cycle started: {} samples, threshold {} +/- {}",
        scheduler.cycle_config().num_points,
        settings.display.thresholds.threshold,
        settings.display.thresholds.band
    );

    loop {
        let pause = match scheduler.step(source.as_mut(), &mut canvas, &stop) {
            Ok(Step::Pause(pause)) => pause,
            Ok(Step::Stopped) => break,
            Err(CycleError::AcquisitionUnavailable) => {
                warn!("Sample source unavailable; retrying");
                scheduler.cycle_config().retry_pause()
            }
            Err(err) => return Err(err.into()),
        };

        window.update(canvas.display());
        wait(&mut window, pause, &stop);
    }

    info!("Stopped after {} cycles", scheduler.cycles_completed());
    Ok(())
}

/// Replay the configured export, or fall back to random demo readings.
fn open_source(settings: &SourceSettings) -> Result<Box<dyn SampleSource>> {
    match &settings.replay {
        Some(path) => Ok(Box::new(ReplaySource::from_path(path, settings.replay_span())?)),
        None => Ok(Box::new(RandomSource::from_settings(settings))),
    }
}

/// Sleep for `pause` in frame-sized slices while pumping window events.
///
/// Quit or Escape raises `stop`, which ends the wait early.
fn wait(
    window: &mut Window,
    pause: Duration,
    stop: &StopSignal,
) {
    let deadline = Instant::now() + pause;
    loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit
                | SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape,
                    ..
                } => stop.stop(),
                _ => {}
            }
        }

        if stop.is_stopped() {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::sleep(FRAME_TIME.min(deadline - now));
    }
}
