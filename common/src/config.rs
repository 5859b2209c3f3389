//! Display, layout and cycle configuration.
//!
//! Every setting has a `const` default matching the 320x240 reference display
//! so the firmware can run without any configuration source. The simulator
//! overrides individual fields from a TOML file when the `serde` feature is
//! enabled; all structs use `#[serde(default)]` so partial files work.

use core::time::Duration;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::sample_window::Sample;
use crate::thresholds::ThresholdConfig;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (landscape 320x240 TFT).
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Upper bound for `CycleConfig::num_points`. Windows are stack-allocated.
pub const MAX_WINDOW_CAPACITY: usize = 64;

/// Unit printed after the value on the summary card.
pub const UNIT_LABEL: &str = "mg/dl";

const _: () = assert!(CycleConfig::DEFAULT.num_points <= MAX_WINDOW_CAPACITY);
const _: () = assert!(LayoutConfig::DEFAULT.x_scale != 0);
const _: () = assert!(LayoutConfig::DEFAULT.y_scale != 0);
const _: () = assert!(AxisConfig::DEFAULT.top < AxisConfig::DEFAULT.bottom);

/// Invalid configuration values.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("layout x_scale must be non-zero")]
    ZeroXScale,
    #[error("layout y_scale must be non-zero")]
    ZeroYScale,
    #[error("num_points {requested} exceeds the maximum window capacity {max}")]
    WindowTooLarge { requested: usize, max: usize },
}

// =============================================================================
// Chart Layout
// =============================================================================

/// Affine mapping from `(index, value)` to chart pixels.
///
/// ```text
/// x = origin_x + index * x_scale
/// y = baseline_y - (value - baseline_value) * y_scale
/// ```
///
/// Results are not clamped to the screen; out-of-range values draw off-canvas.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default, deny_unknown_fields))]
pub struct LayoutConfig {
    pub origin_x: i32,
    /// Horizontal pixels between consecutive samples.
    pub x_scale: i32,
    /// Vertical pixels per unit of value.
    pub y_scale: i32,
    /// Pixel row where `baseline_value` is drawn.
    pub baseline_y: i32,
    pub baseline_value: Sample,
}

impl LayoutConfig {
    pub const DEFAULT: Self = Self {
        origin_x: 26,
        x_scale: 35,
        y_scale: 1,
        baseline_y: 120,
        baseline_value: 100,
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.x_scale == 0 {
            return Err(ConfigError::ZeroXScale);
        }
        if self.y_scale == 0 {
            return Err(ConfigError::ZeroYScale);
        }
        Ok(())
    }

    /// Map a sample at `index` with `value` to screen coordinates.
    ///
    /// Saturates instead of overflowing for extreme values.
    pub fn point_for(
        &self,
        index: usize,
        value: Sample,
    ) -> Point {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        let x = self.origin_x.saturating_add(index.saturating_mul(self.x_scale));
        let y = self
            .baseline_y
            .saturating_sub(value.saturating_sub(self.baseline_value).saturating_mul(self.y_scale));
        Point::new(x, y)
    }

    /// Inverse of the vertical mapping.
    ///
    /// Returns `None` for rows the forward mapping never produces (not a
    /// multiple of `y_scale` away from the baseline, or out of `i32` range)
    /// instead of rounding.
    pub fn value_at(
        &self,
        y: i32,
    ) -> Option<Sample> {
        let offset = self.baseline_y.checked_sub(y)?;
        if offset.checked_rem(self.y_scale)? != 0 {
            return None;
        }
        self.baseline_value.checked_add(offset.checked_div(self.y_scale)?)
    }

    /// Inverse of the horizontal mapping.
    pub fn index_at(
        &self,
        x: i32,
    ) -> Option<usize> {
        let offset = x.checked_sub(self.origin_x)?;
        if offset.checked_rem(self.x_scale)? != 0 {
            return None;
        }
        usize::try_from(offset.checked_div(self.x_scale)?).ok()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Axis Scale
// =============================================================================

/// Fixed, data-independent vertical scale drawn left of the chart.
///
/// Default: a vertical line at x=27 from y=220 up to y=20, with 21 ticks
/// labelled 0, 10, ..., 200 every 10 pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default, deny_unknown_fields))]
pub struct AxisConfig {
    pub line_x: i32,
    pub top: i32,
    pub bottom: i32,
    pub tick_start_x: i32,
    pub tick_end_x: i32,
    pub label_x: i32,
    /// Vertical offset of a label relative to its tick (centers the small font).
    pub label_dy: i32,
    /// Pixels and label units between ticks.
    pub step: i32,
    pub ticks: u32,
}

impl AxisConfig {
    pub const DEFAULT: Self = Self {
        line_x: 27,
        top: 20,
        bottom: 220,
        tick_start_x: 20,
        tick_end_x: 25,
        label_x: 5,
        label_dy: -4,
        step: 10,
        ticks: 21,
    };

    /// Pixel row and label value of tick `k`.
    #[inline]
    pub fn tick(
        &self,
        k: u32,
    ) -> (i32, i32) {
        let k = i32::try_from(k).unwrap_or(i32::MAX);
        let label = k.saturating_mul(self.step);
        (self.bottom.saturating_sub(label), label)
    }
}

impl Default for AxisConfig {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Summary Card Layout
// =============================================================================

/// Placement of the summary card and of the text inside it.
///
/// Offsets are relative to the card's top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default, deny_unknown_fields))]
pub struct CardLayout {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub value_dx: i32,
    pub value_dy: i32,
    pub unit_dx: i32,
    pub unit_dy: i32,
    pub qualifier_dx: i32,
    pub qualifier_dy: i32,
}

impl CardLayout {
    pub const DEFAULT: Self = Self {
        x: 40,
        y: 40,
        width: 240,
        height: 160,
        value_dx: 60,
        value_dy: 40,
        unit_dx: 110,
        unit_dy: 40,
        qualifier_dx: 100,
        qualifier_dy: 80,
    };

    /// Card bounds on screen.
    pub const fn rect(&self) -> Rectangle {
        Rectangle::new(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

impl Default for CardLayout {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Cycle Timing
// =============================================================================

/// Window size and pauses of the acquire/chart/summary cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default, deny_unknown_fields))]
pub struct CycleConfig {
    /// Samples acquired per cycle.
    pub num_points: usize,
    /// Pause after drawing the chart.
    pub chart_pause_ms: u32,
    /// Pause after drawing the summary card.
    pub summary_pause_ms: u32,
    /// Pause before retrying after the sample source was unavailable.
    pub retry_pause_ms: u32,
}

impl CycleConfig {
    pub const DEFAULT: Self = Self {
        num_points: 10,
        chart_pause_ms: 5_000,
        summary_pause_ms: 5_000,
        retry_pause_ms: 1_000,
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.num_points > MAX_WINDOW_CAPACITY {
            return Err(ConfigError::WindowTooLarge {
                requested: self.num_points,
                max: MAX_WINDOW_CAPACITY,
            });
        }
        Ok(())
    }

    #[inline]
    pub const fn chart_pause(&self) -> Duration { Duration::from_millis(self.chart_pause_ms as u64) }

    #[inline]
    pub const fn summary_pause(&self) -> Duration { Duration::from_millis(self.summary_pause_ms as u64) }

    #[inline]
    pub const fn retry_pause(&self) -> Duration { Duration::from_millis(self.retry_pause_ms as u64) }
}

impl Default for CycleConfig {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Complete Configuration
// =============================================================================

/// Everything a display session needs, grouped as in the settings file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct DisplayConfig {
    pub layout: LayoutConfig,
    pub axis: AxisConfig,
    pub thresholds: ThresholdConfig,
    pub card: CardLayout,
    pub cycle: CycleConfig,
}

impl DisplayConfig {
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.layout.validate() {
            return Err(e);
        }
        self.cycle.validate()
    }
}
