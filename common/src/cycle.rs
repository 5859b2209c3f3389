//! Acquire / chart / summary / clear cycle.
//!
//! The scheduler is a state machine advanced one phase per [`CycleScheduler::step`]
//! call. It never sleeps: each step returns how long the caller should pause
//! before the next one, so the same logic drives a blocking desktop loop and
//! an async embedded executor.
//!
//! ```text
//! Chart ──pause(chart)──▶ Summary ──pause(summary)──▶ Clear ──▶ Chart ...
//! ```
//!
//! The [`StopSignal`] is checked before every phase. A failed acquisition
//! leaves the canvas untouched and keeps the scheduler in the `Chart` phase.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use log::{info, warn};

use crate::acquisition::{AcquisitionError, SampleSource};
use crate::canvas::Canvas;
use crate::config::{ConfigError, CycleConfig, DisplayConfig};
use crate::sample_window::{SampleWindow, WindowError};
use crate::widgets::{ChartRenderer, SummaryCardRenderer};

/// Cooperative cancellation flag shared between the run loop and whoever
/// requests shutdown (window close, button, signal handler).
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
        }
    }

    /// Request the loop to stop before its next phase.
    pub fn stop(&self) { self.stopped.store(true, Ordering::Release); }

    #[inline]
    pub fn is_stopped(&self) -> bool { self.stopped.load(Ordering::Acquire) }
}

/// Phase that the next [`CycleScheduler::step`] will run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    #[default]
    Chart,
    Summary,
    Clear,
}

/// What the caller should do after a step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    /// Wait this long, then call `step` again.
    Pause(Duration),
    /// Stop was requested; nothing was drawn.
    Stopped,
}

/// A cycle that could not complete.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum CycleError {
    #[error("sample source unavailable, cycle skipped")]
    AcquisitionUnavailable,
    #[error(transparent)]
    Window(#[from] WindowError),
}

impl From<AcquisitionError> for CycleError {
    fn from(err: AcquisitionError) -> Self {
        match err {
            AcquisitionError::Unavailable => Self::AcquisitionUnavailable,
        }
    }
}

/// Drives the rendering cycle for one display session.
pub struct CycleScheduler {
    chart: ChartRenderer,
    card: SummaryCardRenderer,
    config: DisplayConfig,
    phase: Phase,
    window: Option<SampleWindow>,
    cycles_completed: u32,
}

impl CycleScheduler {
    /// Build a scheduler from validated configuration.
    pub fn new(config: DisplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            chart: ChartRenderer::new(config.layout, config.axis, config.thresholds),
            card: SummaryCardRenderer::new(config.thresholds, config.card),
            config,
            phase: Phase::Chart,
            window: None,
            cycles_completed: 0,
        })
    }

    #[inline]
    pub const fn phase(&self) -> Phase { self.phase }

    #[inline]
    pub const fn cycles_completed(&self) -> u32 { self.cycles_completed }

    #[inline]
    pub const fn cycle_config(&self) -> &CycleConfig { &self.config.cycle }

    /// Window acquired for the current cycle, if the chart phase has run.
    #[inline]
    pub const fn window(&self) -> Option<&SampleWindow> { self.window.as_ref() }

    /// Run the next phase.
    pub fn step<S, C>(
        &mut self,
        source: &mut S,
        canvas: &mut C,
        stop: &StopSignal,
    ) -> Result<Step, CycleError>
    where
        S: SampleSource + ?Sized,
        C: Canvas + ?Sized,
    {
        if stop.is_stopped() {
            return Ok(Step::Stopped);
        }

        match self.phase {
            Phase::Chart => {
                let window = self.acquire(source)?;
                canvas.clear();
                self.chart.render(&window, canvas);
                self.window = Some(window);
                self.phase = Phase::Summary;
                Ok(Step::Pause(self.config.cycle.chart_pause()))
            }
            Phase::Summary => {
                canvas.clear();
                if let Some(latest) = self.window.as_ref().and_then(SampleWindow::latest) {
                    self.card.render(latest, self.config.card.rect(), canvas);
                }
                self.phase = Phase::Clear;
                Ok(Step::Pause(self.config.cycle.summary_pause()))
            }
            Phase::Clear => {
                canvas.clear();
                self.window = None;
                self.cycles_completed = self.cycles_completed.wrapping_add(1);
                self.phase = Phase::Chart;
                info!("Cycle {} complete", self.cycles_completed);
                Ok(Step::Pause(Duration::ZERO))
            }
        }
    }

    /// Fill a fresh window. Nothing is drawn if any read fails.
    fn acquire<S>(
        &self,
        source: &mut S,
    ) -> Result<SampleWindow, CycleError>
    where
        S: SampleSource + ?Sized,
    {
        let mut window = SampleWindow::with_capacity(self.config.cycle.num_points)?;
        if let Err(err) = source.fill_window(&mut window) {
            warn!("Acquisition failed after {} samples: {}", window.len(), err);
            return Err(err.into());
        }
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use embedded_graphics::prelude::Point;

    use super::*;
    use crate::canvas::recording::{Command, RecordingCanvas};
    use crate::colors::{RED, YELLOW};
    use crate::sample_window::Sample;

    /// Replays a fixed script, then reports the source as unavailable.
    struct Scripted {
        samples: Vec<Sample>,
        pos: usize,
    }

    impl Scripted {
        fn new(samples: &[Sample]) -> Self {
            Self {
                samples: samples.to_vec(),
                pos: 0,
            }
        }
    }

    impl SampleSource for Scripted {
        fn next_sample(&mut self) -> Result<Sample, AcquisitionError> {
            let sample = self.samples.get(self.pos).copied().ok_or(AcquisitionError::Unavailable)?;
            self.pos += 1;
            Ok(sample)
        }
    }

    fn scheduler(num_points: usize) -> CycleScheduler {
        CycleScheduler::new(DisplayConfig {
            cycle: CycleConfig {
                num_points,
                ..CycleConfig::DEFAULT
            },
            ..DisplayConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_full_cycle_phases_and_pauses() {
        let mut scheduler = scheduler(2);
        let mut source = Scripted::new(&[200, 200]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();

        assert_eq!(scheduler.phase(), Phase::Chart);
        let step = scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        assert_eq!(step, Step::Pause(Duration::from_secs(5)));
        assert_eq!(canvas.commands[0], Command::Clear);
        assert_eq!(canvas.colored_lines().last().map(|l| l.0), Some(RED));
        assert_eq!(scheduler.window().map(SampleWindow::len), Some(2));

        assert_eq!(scheduler.phase(), Phase::Summary);
        canvas.commands.clear();
        let step = scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        assert_eq!(step, Step::Pause(Duration::from_secs(5)));
        assert_eq!(canvas.commands[0], Command::Clear);
        assert!(canvas.commands.contains(&Command::Text("High".into(), Point::new(140, 120))));

        assert_eq!(scheduler.phase(), Phase::Clear);
        canvas.commands.clear();
        let step = scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        assert_eq!(step, Step::Pause(Duration::ZERO));
        assert_eq!(canvas.commands, [Command::Clear]);
        assert_eq!(scheduler.cycles_completed(), 1);
        assert_eq!(scheduler.phase(), Phase::Chart);
        assert!(scheduler.window().is_none(), "window is discarded after the cycle");
    }

    #[test]
    fn test_each_cycle_acquires_a_fresh_window() {
        let mut scheduler = scheduler(3);
        let mut source = Scripted::new(&[80, 150, 80, 120, 121, 122]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();

        for _ in 0..3 {
            scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        }
        scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        assert_eq!(scheduler.window().map(SampleWindow::as_slice), Some(&[120, 121, 122][..]));
    }

    #[test]
    fn test_acquisition_failure_draws_nothing() {
        let mut scheduler = scheduler(10);
        let mut source = Scripted::new(&[100, 110, 120]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();

        let result = scheduler.step(&mut source, &mut canvas, &stop);
        assert_eq!(result, Err(CycleError::AcquisitionUnavailable));
        assert!(canvas.commands.is_empty(), "no partial frame");
        assert_eq!(scheduler.phase(), Phase::Chart);
        assert!(scheduler.window().is_none());
    }

    #[test]
    fn test_stop_signal_checked_between_phases() {
        let mut scheduler = scheduler(2);
        let mut source = Scripted::new(&[100, 100]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();

        scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        stop.stop();
        canvas.commands.clear();

        assert_eq!(scheduler.step(&mut source, &mut canvas, &stop), Ok(Step::Stopped));
        assert!(canvas.commands.is_empty());
        assert_eq!(scheduler.phase(), Phase::Summary, "stopping does not advance the cycle");
    }

    #[test]
    fn test_stop_before_first_phase_reads_nothing() {
        let mut scheduler = scheduler(2);
        let mut source = Scripted::new(&[100, 100]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();
        stop.stop();

        assert_eq!(scheduler.step(&mut source, &mut canvas, &stop), Ok(Step::Stopped));
        assert_eq!(source.pos, 0);
    }

    #[test]
    fn test_empty_window_skips_card() {
        let mut scheduler = scheduler(0);
        let mut source = Scripted::new(&[]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();

        scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        canvas.commands.clear();
        scheduler.step(&mut source, &mut canvas, &stop).unwrap();
        assert_eq!(canvas.commands, [Command::Clear]);
    }

    #[test]
    fn test_borderline_chart_scenario() {
        let mut scheduler = scheduler(10);
        let mut source = Scripted::new(&[80, 150, 80, 150, 80, 150, 80, 150, 80, 150]);
        let mut canvas = RecordingCanvas::new();

        scheduler.step(&mut source, &mut canvas, &StopSignal::new()).unwrap();
        let segments: Vec<_> = canvas.colored_lines().into_iter().skip(22).collect();
        assert_eq!(segments.len(), 9);
        assert!(segments.iter().all(|(color, _, _)| *color == YELLOW));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DisplayConfig {
            cycle: CycleConfig {
                num_points: 1000,
                ..CycleConfig::DEFAULT
            },
            ..DisplayConfig::default()
        };
        assert!(matches!(
            CycleScheduler::new(config),
            Err(ConfigError::WindowTooLarge { requested: 1000, .. })
        ));
    }

    #[test]
    fn test_configured_pauses() {
        let mut scheduler = CycleScheduler::new(DisplayConfig {
            cycle: CycleConfig {
                num_points: 1,
                chart_pause_ms: 250,
                summary_pause_ms: 750,
                retry_pause_ms: 10,
            },
            ..DisplayConfig::default()
        })
        .unwrap();
        let mut source = Scripted::new(&[100]);
        let mut canvas = RecordingCanvas::new();
        let stop = StopSignal::new();

        assert_eq!(
            scheduler.step(&mut source, &mut canvas, &stop),
            Ok(Step::Pause(Duration::from_millis(250)))
        );
        assert_eq!(
            scheduler.step(&mut source, &mut canvas, &stop),
            Ok(Step::Pause(Duration::from_millis(750)))
        );
    }
}
