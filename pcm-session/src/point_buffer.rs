use pcm_core::SamplePoint;
use std::collections::VecDeque;

/// The number of samples kept by [`PointBuffer::with_default_capacity`].
pub const DEFAULT_POINT_CAPACITY: usize = 68;

/// A sliding window over the most recent samples.
///
/// Each feature is held once: a sample whose [`PointId`](pcm_core::PointId) is already in the
/// window replaces the older sample and becomes the most recent. Adding a new feature to a full
/// buffer evicts the oldest one. The window is small enough that the triangulation of a snapshot
/// stays cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    samples: VecDeque<SamplePoint>,
    capacity: usize,
}

impl PointBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_POINT_CAPACITY)
    }

    /// Appends a sample, evicting the oldest samples while over capacity.
    ///
    /// An older sample of the same feature is dropped first.
    pub fn add(&mut self, sample: SamplePoint) {
        if let Some(ix) = self.samples.iter().position(|s| s.id() == sample.id()) {
            self.samples.remove(ix);
        }
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// The samples currently held, oldest first.
    pub fn snapshot(&self) -> Vec<SamplePoint> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl Extend<SamplePoint> for PointBuffer {
    fn extend<I: IntoIterator<Item = SamplePoint>>(&mut self, iter: I) {
        for sample in iter {
            self.add(sample);
        }
    }
}
