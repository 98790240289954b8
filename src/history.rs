//! Bounded rolling history of three-axis samples
//!
//! Feeds the IMU charts. Capacity is fixed per buffer; pushing past it evicts
//! the oldest sample, so the buffer always holds the most recent window in
//! arrival order.

use std::collections::VecDeque;

/// Default number of samples kept per motion channel
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// A single three-axis reading tagged with its position in the stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    /// Monotonic counter, starting at 0 for each streaming session
    pub sequence: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SensorSample {
    pub fn axes(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Fixed-capacity FIFO of [`SensorSample`]s
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<SensorSample>,
    capacity: usize,
    next_sequence: u64,
}

impl HistoryBuffer {
    /// Create an empty buffer. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            next_sequence: 0,
        }
    }

    /// Append a reading tagged with the next sequence number
    pub fn push(&mut self, axes: [f64; 3]) -> SensorSample {
        let sample = SensorSample {
            sequence: self.next_sequence,
            x: axes[0],
            y: axes[1],
            z: axes[2],
        };
        self.next_sequence += 1;

        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        sample
    }

    /// Copy of the current window, oldest first
    pub fn snapshot(&self) -> Vec<SensorSample> {
        self.samples.iter().copied().collect()
    }

    /// Iterate the current window, oldest first, without allocating
    pub fn iter(&self) -> impl Iterator<Item = &SensorSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&SensorSample> {
        self.samples.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empty the buffer and restart sequence numbering at zero
    pub fn reset(&mut self) {
        self.samples.clear();
        self.next_sequence = 0;
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
