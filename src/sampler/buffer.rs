//! Reads the sampler's raw buffer and tracks the previously fetched one.

use super::Address;
use crate::utils::config::SENTINEL;
use crate::utils::error::SamplerError;
use log::debug;

/// Capability exposed by a statistical sampler
///
/// Buffer lifecycle (allocation, interval, start/stop) is the sampler's
/// business; this crate only reads what has been recorded.
pub trait Sampler {
    /// Number of addresses currently recorded
    fn current_len(&self) -> Result<usize, SamplerError>;

    /// Number of addresses the buffer can hold
    fn capacity(&self) -> Result<usize, SamplerError>;

    /// Fill `dst` with exactly `current_len()` addresses
    fn copy_into(&self, dst: &mut [Address]) -> Result<(), SamplerError>;
}

/// Result of one buffer read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetch {
    /// Owned copy of the recorded addresses
    pub buffer: Vec<Address>,

    /// Buffer reached capacity; samples may have been dropped.
    /// An empty buffer is never full, even with zero capacity.
    pub is_full: bool,

    /// Buffer differs from the one returned by the previous fetch
    pub is_new: bool,
}

/// Reads a [`Sampler`] and remembers the last buffer it returned
///
/// Every `fetch` overwrites the remembered buffer, whether or not anybody
/// goes on to symbolicate it.
#[derive(Debug)]
pub struct BufferReader<S> {
    sampler: S,
    last: Option<Vec<Address>>,
}

impl<S: Sampler> BufferReader<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler, last: None }
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }

    /// Buffer returned by the most recent fetch, if any
    pub fn last_fetched(&self) -> Option<&[Address]> {
        self.last.as_deref()
    }

    /// Copy the current buffer out of the sampler
    ///
    /// # Errors
    /// * `SamplerError::Unavailable` - the sampler cannot be read
    /// * `SamplerError::LengthMismatch` - the sampler changed while copying
    pub fn fetch(&mut self) -> Result<Fetch, SamplerError> {
        let len = self.sampler.current_len()?;
        let capacity = self.sampler.capacity()?;

        let mut buffer = vec![SENTINEL; len];
        self.sampler.copy_into(&mut buffer)?;

        let is_full = len > 0 && len == capacity;
        let is_new = self.last.as_deref() != Some(buffer.as_slice());

        debug!(
            "Fetched {} addresses (capacity {}, full: {}, new: {})",
            len, capacity, is_full, is_new
        );

        self.last = Some(buffer.clone());

        Ok(Fetch {
            buffer,
            is_full,
            is_new,
        })
    }
}

/// In-memory sampler with a fixed capacity
///
/// Backtraces are appended together with their sentinel. Once the buffer
/// is full further addresses are dropped, the same way a real sampler
/// stops recording, so the tail may be an unterminated backtrace.
#[derive(Debug, Clone, Default)]
pub struct MemorySampler {
    data: Vec<Address>,
    capacity: usize,
}

impl MemorySampler {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
        }
    }

    /// Sampler pre-filled with a raw buffer; capacity equals its length
    pub fn from_buffer(data: Vec<Address>) -> Self {
        let capacity = data.len();
        Self { data, capacity }
    }

    /// Append one backtrace followed by the sentinel
    ///
    /// Returns the number of addresses actually stored.
    pub fn record(&mut self, backtrace: &[Address]) -> usize {
        let room = self.capacity.saturating_sub(self.data.len());
        let stored = room.min(backtrace.len() + 1);

        self.data.extend(
            backtrace
                .iter()
                .copied()
                .chain(std::iter::once(SENTINEL))
                .take(stored),
        );

        stored
    }

    /// Replace the whole buffer, keeping the capacity unless it is exceeded
    pub fn replace(&mut self, data: Vec<Address>) {
        self.capacity = self.capacity.max(data.len());
        self.data = data;
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Sampler for MemorySampler {
    fn current_len(&self) -> Result<usize, SamplerError> {
        Ok(self.data.len())
    }

    fn capacity(&self) -> Result<usize, SamplerError> {
        Ok(self.capacity)
    }

    fn copy_into(&self, dst: &mut [Address]) -> Result<(), SamplerError> {
        if dst.len() != self.data.len() {
            return Err(SamplerError::LengthMismatch {
                expected: dst.len(),
                actual: self.data.len(),
            });
        }
        dst.copy_from_slice(&self.data);
        Ok(())
    }
}
