//! Timing constants for the simulator.
//!
//! These use `std::time::Duration` and only apply to the desktop loop; cycle
//! pauses themselves come from `CycleConfig`.

use std::time::Duration;

/// Granularity of pauses. Window events are polled at least this often, so
/// closing the window stops the loop within one frame.
pub const FRAME_TIME: Duration = Duration::from_millis(20);
