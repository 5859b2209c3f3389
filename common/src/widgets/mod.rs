//! Widgets that turn samples into canvas draw calls.
//!
//! Both renderers hold only immutable per-session configuration, so a single
//! instance can be reused for every cycle.

mod chart;
mod summary_card;

pub use chart::{ChartRenderer, Segment};
pub use summary_card::SummaryCardRenderer;
