//! Demo sample source producing uniform random readings.
//!
//! Stands in for a real glucose sensor. Anything implementing
//! [`SampleSource`] can replace it without changes to the renderers.

use std::ops::Range;

use glucose_trend_common::{AcquisitionError, Sample, SampleSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::settings::SourceSettings;

/// Uniform random readings in a half-open range.
pub struct RandomSource {
    rng: StdRng,
    range: Range<Sample>,
}

impl RandomSource {
    pub fn new(
        rng: StdRng,
        range: Range<Sample>,
    ) -> Self {
        Self { rng, range }
    }

    /// Seeded when the settings carry a seed, otherwise from OS entropy.
    pub fn from_settings(settings: &SourceSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, settings.min..settings.max)
    }
}

impl SampleSource for RandomSource {
    fn next_sample(&mut self) -> Result<Sample, AcquisitionError> {
        if self.range.is_empty() {
            return Err(AcquisitionError::Unavailable);
        }
        Ok(self.rng.gen_range(self.range.clone()))
    }
}
