//! Fixed-capacity window of glucose samples for one rendering cycle.
//!
//! Samples are stored oldest first: index 0 is the oldest reading and
//! `len() - 1` the newest. A window is created at the start of a cycle,
//! filled from a [`SampleSource`](crate::acquisition::SampleSource) and
//! dropped when the cycle completes.

use heapless::Vec;

use crate::config::MAX_WINDOW_CAPACITY;

/// One reading in domain units (mg/dL).
pub type Sample = i32;

/// Errors from building or appending to a window.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum WindowError {
    #[error("sample window is full")]
    Full,
    #[error("window capacity {requested} exceeds the maximum {max}")]
    CapacityTooLarge { requested: usize, max: usize },
}

/// Ordered, fixed-capacity sequence of samples. `len() <= capacity()` always.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SampleWindow {
    samples: Vec<Sample, MAX_WINDOW_CAPACITY>,
    capacity: usize,
}

impl SampleWindow {
    /// Create an empty window holding at most `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Result<Self, WindowError> {
        if capacity > MAX_WINDOW_CAPACITY {
            return Err(WindowError::CapacityTooLarge {
                requested: capacity,
                max: MAX_WINDOW_CAPACITY,
            });
        }
        Ok(Self {
            samples: Vec::new(),
            capacity,
        })
    }

    /// Create a full window from existing samples (oldest first).
    pub fn from_slice(samples: &[Sample]) -> Result<Self, WindowError> {
        let mut window = Self::with_capacity(samples.len())?;
        for &sample in samples {
            window.push(sample)?;
        }
        Ok(window)
    }

    /// Append the newest sample.
    pub fn push(
        &mut self,
        sample: Sample,
    ) -> Result<(), WindowError> {
        if self.is_full() {
            return Err(WindowError::Full);
        }
        self.samples.push(sample).map_err(|_| WindowError::Full)
    }

    /// The newest sample, if any.
    #[inline]
    pub fn latest(&self) -> Option<Sample> { self.samples.last().copied() }

    /// Adjacent pairs `(i, window[i], window[i + 1])`, oldest first.
    ///
    /// Empty for windows with fewer than two samples.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, Sample, Sample)> + '_ {
        self.samples.windows(2).enumerate().map(|(i, pair)| (i, pair[0], pair[1]))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Sample] { &self.samples }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ { self.samples.iter().copied() }

    #[inline]
    pub fn len(&self) -> usize { self.samples.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    #[inline]
    pub fn is_full(&self) -> bool { self.samples.len() >= self.capacity }

    #[inline]
    pub const fn capacity(&self) -> usize { self.capacity }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut window = SampleWindow::with_capacity(3).unwrap();
        assert!(window.is_empty());
        window.push(80).unwrap();
        window.push(90).unwrap();
        window.push(100).unwrap();
        assert!(window.is_full());
        assert_eq!(window.push(110), Err(WindowError::Full));
        assert_eq!(window.as_slice(), &[80, 90, 100]);
    }

    #[test]
    fn test_capacity_limit() {
        assert!(SampleWindow::with_capacity(MAX_WINDOW_CAPACITY).is_ok());
        assert_eq!(
            SampleWindow::with_capacity(MAX_WINDOW_CAPACITY + 1),
            Err(WindowError::CapacityTooLarge {
                requested: MAX_WINDOW_CAPACITY + 1,
                max: MAX_WINDOW_CAPACITY
            })
        );
    }

    #[test]
    fn test_latest_is_newest() {
        let window = SampleWindow::from_slice(&[80, 150, 97]).unwrap();
        assert_eq!(window.latest(), Some(97));
        assert_eq!(SampleWindow::with_capacity(4).unwrap().latest(), None);
    }

    #[test]
    fn test_pairs_oldest_first() {
        let window = SampleWindow::from_slice(&[1, 2, 3, 4]).unwrap();
        let pairs: std::vec::Vec<_> = window.pairs().collect();
        assert_eq!(pairs, [(0, 1, 2), (1, 2, 3), (2, 3, 4)]);
    }

    #[test]
    fn test_pairs_empty_for_short_windows() {
        assert_eq!(SampleWindow::from_slice(&[]).unwrap().pairs().count(), 0);
        assert_eq!(SampleWindow::from_slice(&[120]).unwrap().pairs().count(), 0);
    }

    #[test]
    fn test_zero_capacity_window_is_full_and_empty() {
        let mut window = SampleWindow::with_capacity(0).unwrap();
        assert!(window.is_empty());
        assert!(window.is_full());
        assert_eq!(window.push(100), Err(WindowError::Full));
    }
}
