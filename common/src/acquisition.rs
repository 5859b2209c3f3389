//! Sample acquisition capability.
//!
//! The renderers never talk to a sensor directly; the cycle scheduler pulls
//! readings through [`SampleSource`] so the demo random generator can be
//! swapped for a real glucose feed without touching any drawing code.

use log::debug;

use crate::sample_window::{Sample, SampleWindow};

/// The sample source could not deliver a reading.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("sample source unavailable")]
    Unavailable,
}

/// Producer of glucose readings, one per call.
pub trait SampleSource {
    /// Read the next sample.
    fn next_sample(&mut self) -> Result<Sample, AcquisitionError>;

    /// Fill `window` up to its capacity, oldest reading first.
    ///
    /// Stops at the first error; the window then holds a partial series and
    /// must not be drawn.
    fn fill_window(
        &mut self,
        window: &mut SampleWindow,
    ) -> Result<(), AcquisitionError> {
        while !window.is_full() {
            let sample = self.next_sample()?;
            debug!("data {}", sample);
            if window.push(sample).is_err() {
                break;
            }
        }
        Ok(())
    }
}
