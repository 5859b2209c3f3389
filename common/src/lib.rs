//! Platform-agnostic core of the glucose trend display.
//!
//! This crate holds everything that does not depend on a particular display
//! driver or sample feed, shared by the desktop simulator and firmware:
//!
//! - [`thresholds`]: Band and qualifier classification against `T ± B`
//! - [`config`]: Layout, axis, card and cycle configuration with defaults
//! - [`sample_window`]: Fixed-capacity window of readings for one cycle
//! - [`acquisition`]: `SampleSource` capability for the sample feed
//! - [`canvas`]: `Canvas` capability and the embedded-graphics adapter
//! - [`widgets`]: Trend chart and summary card renderers
//! - [`cycle`]: Chart / summary / clear state machine with stop signal
//! - [`colors`], [`styles`]: Palette and fonts
//!
//! # Testing
//!
//! Run tests on the host with:
//! ```bash
//! cargo test -p glucose-trend-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`); the library itself is
//! `no_std` and allocation-free.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod acquisition;
pub mod canvas;
pub mod colors;
pub mod config;
pub mod cycle;
pub mod sample_window;
pub mod styles;
pub mod thresholds;
pub mod widgets;

// Re-export commonly used items
pub use acquisition::{AcquisitionError, SampleSource};
pub use canvas::{Canvas, DisplayCanvas, Font};
pub use config::{AxisConfig, CardLayout, ConfigError, CycleConfig, DisplayConfig, LayoutConfig};
pub use cycle::{CycleError, CycleScheduler, Phase, Step, StopSignal};
pub use sample_window::{Sample, SampleWindow, WindowError};
pub use thresholds::{Band, Qualifier, ThresholdConfig};
pub use widgets::{ChartRenderer, Segment, SummaryCardRenderer};
