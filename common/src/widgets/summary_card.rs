//! Summary card for the newest reading.
//!
//! Shows the value and unit in the large font with the qualifier ("Normal" or
//! "High") below it in the small font. All text uses the qualifier color:
//! RED for `High`, GREEN otherwise. The qualifier is computed once from the
//! numeric thresholds and never re-derived from the label text.

use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::{Canvas, Font};
use crate::config::{CardLayout, UNIT_LABEL};
use crate::sample_window::Sample;
use crate::thresholds::{Qualifier, ThresholdConfig};

#[derive(Clone, Copy, Debug)]
pub struct SummaryCardRenderer {
    thresholds: ThresholdConfig,
    card: CardLayout,
}

impl SummaryCardRenderer {
    pub const fn new(
        thresholds: ThresholdConfig,
        card: CardLayout,
    ) -> Self {
        Self { thresholds, card }
    }

    /// Qualifier shown for `value`. `High` from `T + B` upwards.
    #[inline]
    pub const fn qualifier(
        &self,
        value: Sample,
    ) -> Qualifier {
        self.thresholds.qualify(value)
    }

    /// Draw the card for `value` inside `position`.
    pub fn render<C>(
        &self,
        value: Sample,
        position: Rectangle,
        canvas: &mut C,
    ) where
        C: Canvas + ?Sized,
    {
        let qualifier = self.qualifier(value);
        let origin = position.top_left;
        let card = &self.card;

        canvas.set_color(qualifier.color());

        canvas.set_font(Font::Big);
        canvas.print_number(value, offset(origin, card.value_dx, card.value_dy));
        canvas.print_text(UNIT_LABEL, offset(origin, card.unit_dx, card.unit_dy));

        canvas.set_font(Font::Small);
        canvas.print_text(qualifier.label(), offset(origin, card.qualifier_dx, card.qualifier_dy));
    }
}

/// `origin` moved by `(dx, dy)`, saturating at the `i32` limits.
#[inline]
fn offset(
    origin: Point,
    dx: i32,
    dy: i32,
) -> Point {
    Point::new(origin.x.saturating_add(dx), origin.y.saturating_add(dy))
}

impl Default for SummaryCardRenderer {
    fn default() -> Self { Self::new(ThresholdConfig::DEFAULT, CardLayout::DEFAULT) }
}
