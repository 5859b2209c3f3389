//! Pre-computed fonts and text styles for the display canvas.
//!
//! Text is anchored at its top-left corner, matching the coordinates the
//! layout constants are expressed in.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_24_POINT;

/// Axis labels and the summary card qualifier.
pub const SMALL_FONT: &MonoFont = &FONT_8X13;

/// Summary card value and unit.
pub const BIG_FONT: &MonoFont = &PROFONT_24_POINT;

/// Left-aligned text whose position is its top-left corner.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();
