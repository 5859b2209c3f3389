//! Trend chart: fixed scale plus a threshold-colored polyline.
//!
//! # Drawing order
//!
//! 1. Axis in WHITE: one vertical line spanning the chart height, then
//!    `AxisConfig::ticks` short horizontal ticks, each with its numeric label
//!    to the left. The scale does not depend on the data.
//! 2. One line per adjacent pair of samples, colored by the [`Band`] of the
//!    pair's truncated midpoint (GREEN / YELLOW / RED).
//!
//! Windows with fewer than two samples draw only the axis.

use embedded_graphics::prelude::Point;

use crate::canvas::{Canvas, Font};
use crate::colors::WHITE;
use crate::config::{AxisConfig, LayoutConfig};
use crate::sample_window::{Sample, SampleWindow};
use crate::thresholds::{Band, ThresholdConfig, midpoint};

/// A classified line between two adjacent samples.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub midpoint: Sample,
    pub band: Band,
}

/// Draws the scale and the classified polyline for a [`SampleWindow`].
#[derive(Clone, Copy, Debug)]
pub struct ChartRenderer {
    layout: LayoutConfig,
    axis: AxisConfig,
    thresholds: ThresholdConfig,
}

impl ChartRenderer {
    pub const fn new(
        layout: LayoutConfig,
        axis: AxisConfig,
        thresholds: ThresholdConfig,
    ) -> Self {
        Self {
            layout,
            axis,
            thresholds,
        }
    }

    /// Classified segments for `window`, oldest first (`len - 1` of them).
    pub fn segments<'a>(
        &'a self,
        window: &'a SampleWindow,
    ) -> impl Iterator<Item = Segment> + 'a {
        window.pairs().map(move |(i, a, b)| {
            let mid = midpoint(a, b);
            Segment {
                start: self.layout.point_for(i, a),
                end: self.layout.point_for(i + 1, b),
                midpoint: mid,
                band: self.thresholds.classify(mid),
            }
        })
    }

    /// Draw the axis and the polyline.
    pub fn render<C>(
        &self,
        window: &SampleWindow,
        canvas: &mut C,
    ) where
        C: Canvas + ?Sized,
    {
        self.draw_axis(canvas);
        for segment in self.segments(window) {
            canvas.set_color(segment.band.color());
            canvas.draw_line(segment.start, segment.end);
        }
    }

    /// Draw the fixed scale (0 to 200 with the default axis).
    pub fn draw_axis<C>(
        &self,
        canvas: &mut C,
    ) where
        C: Canvas + ?Sized,
    {
        let axis = &self.axis;
        canvas.set_color(WHITE);
        canvas.set_font(Font::Small);
        canvas.draw_line(Point::new(axis.line_x, axis.bottom), Point::new(axis.line_x, axis.top));

        for k in 0..axis.ticks {
            let (y, label) = axis.tick(k);
            canvas.draw_line(Point::new(axis.tick_start_x, y), Point::new(axis.tick_end_x, y));
            canvas.print_number(label, Point::new(axis.label_x, y.saturating_add(axis.label_dy)));
        }
    }
}

impl Default for ChartRenderer {
    fn default() -> Self { Self::new(LayoutConfig::DEFAULT, AxisConfig::DEFAULT, ThresholdConfig::DEFAULT) }
}
