//! Color constants for the glucose trend display.
//!
//! All colors come from the `RgbColor` trait constants so the values are the
//! exact channel maxima of the Rgb565 format the display driver consumes.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Screen background after a clear.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Axis line, ticks and scale labels.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Alarm band segments and the `High` summary card.
pub const RED: Rgb565 = Rgb565::RED;

/// Normal band segments and the `Normal` summary card.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Borderline band segments (within the threshold half-width).
pub const YELLOW: Rgb565 = Rgb565::YELLOW;
