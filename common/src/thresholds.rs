//! Threshold classification for glucose readings.
//!
//! A single alarm threshold `T` and a symmetric half-width `B` split the
//! integers into three bands:
//!
//! | Band | Condition | Color |
//! |------|-----------|-------|
//! | [`Band::Normal`] | `m < T - B` | GREEN |
//! | [`Band::Borderline`] | `T - B <= m <= T + B` | YELLOW |
//! | [`Band::Alarm`] | `m > T + B` | RED |
//!
//! The chart classifies the truncated midpoint of each adjacent pair of
//! samples. The summary card uses the two-valued [`Qualifier`] instead, which
//! is `High` from `T + B` upwards (inclusive), so a reading of exactly `T + B`
//! is a borderline chart point but a `High` card.
//!
//! Band limits use saturating arithmetic, so the partition holds for every
//! threshold including values near `i32::MIN`/`i32::MAX`.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{GREEN, RED, YELLOW};
use crate::sample_window::Sample;

// =============================================================================
// Default Thresholds
// =============================================================================

/// Default alarm threshold in mg/dL.
pub const DEFAULT_THRESHOLD: Sample = 120;

/// Default half-width of the borderline band in mg/dL.
pub const DEFAULT_BAND: u16 = 5;

const _: () = assert!(ThresholdConfig::DEFAULT.lower() <= ThresholdConfig::DEFAULT.upper());

// =============================================================================
// Classification Types
// =============================================================================

/// Three-way classification of a reading or a pair midpoint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Band {
    /// Below `T - B`.
    Normal,
    /// Within `[T - B, T + B]`, both ends inclusive.
    Borderline,
    /// Above `T + B`.
    Alarm,
}

impl Band {
    /// Segment color for this band.
    #[inline]
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Normal => GREEN,
            Self::Borderline => YELLOW,
            Self::Alarm => RED,
        }
    }
}

/// Two-valued label for the latest reading shown on the summary card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Qualifier {
    Normal,
    High,
}

impl Qualifier {
    /// Text printed under the value on the summary card.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }

    /// Card color: RED for `High`, GREEN otherwise.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Normal => GREEN,
            Self::High => RED,
        }
    }
}

// =============================================================================
// Threshold Configuration
// =============================================================================

/// Alarm threshold and borderline half-width.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default, deny_unknown_fields))]
pub struct ThresholdConfig {
    /// Alarm threshold `T`.
    pub threshold: Sample,
    /// Borderline half-width `B`. Unsigned, so `B >= 0` always holds.
    pub band: u16,
}

impl ThresholdConfig {
    pub const DEFAULT: Self = Self::new(DEFAULT_THRESHOLD, DEFAULT_BAND);

    pub const fn new(
        threshold: Sample,
        band: u16,
    ) -> Self {
        Self { threshold, band }
    }

    /// Lowest borderline value, `T - B`.
    #[inline]
    pub const fn lower(&self) -> Sample { self.threshold.saturating_sub(self.band as Sample) }

    /// Highest borderline value, `T + B`.
    #[inline]
    pub const fn upper(&self) -> Sample { self.threshold.saturating_add(self.band as Sample) }

    /// Classify a single value into one of the three bands.
    pub const fn classify(
        &self,
        value: Sample,
    ) -> Band {
        if value < self.lower() {
            Band::Normal
        } else if value <= self.upper() {
            Band::Borderline
        } else {
            Band::Alarm
        }
    }

    /// Classify an adjacent pair by its truncated midpoint (see [`midpoint`]).
    #[inline]
    pub const fn classify_pair(
        &self,
        a: Sample,
        b: Sample,
    ) -> Band {
        self.classify(midpoint(a, b))
    }

    /// Qualifier for the summary card. `High` is inclusive at `T + B`.
    pub const fn qualify(
        &self,
        value: Sample,
    ) -> Qualifier {
        if value >= self.upper() { Qualifier::High } else { Qualifier::Normal }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// Midpoint of two samples, truncated toward zero.
///
/// `(a + b) / 2` with Rust's integer division, so `midpoint(-3, 0) == -1`
/// and `midpoint(3, 0) == 1`. The sum is taken in 64 bits, so it never
/// overflows. Changing the rounding rule moves the band boundaries.
#[inline]
pub const fn midpoint(
    a: Sample,
    b: Sample,
) -> Sample {
    ((a as i64 + b as i64) / 2) as Sample
}

// =============================================================================
// Unit Tests
// =============================================================================
