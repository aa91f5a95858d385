//! Memo of the last symbolicated buffer.
//!
//! The raw buffer and the stack traces derived from it live in one entry,
//! so they are always stored and dropped together.

use crate::sampler::Address;
use crate::symbols::StackTrace;
use log::debug;

/// A raw buffer together with its symbolication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub buffer: Vec<Address>,
    pub stacktraces: Vec<StackTrace>,
}

/// Caller-owned result cache
///
/// Not synchronised: callers sharing one cache across threads must
/// serialise access themselves.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    entry: Option<CacheEntry>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached stack traces, if they were derived from exactly `buffer`
    pub fn get(&self, buffer: &[Address]) -> Option<&[StackTrace]> {
        self.entry
            .as_ref()
            .filter(|entry| entry.buffer == buffer)
            .map(|entry| entry.stacktraces.as_slice())
    }

    /// Store a fresh result, replacing any previous one
    pub fn store(&mut self, buffer: Vec<Address>, stacktraces: Vec<StackTrace>) -> &[StackTrace] {
        debug!(
            "Caching {} stack traces for a {}-address buffer",
            stacktraces.len(),
            buffer.len()
        );
        let entry = self.entry.insert(CacheEntry {
            buffer,
            stacktraces,
        });
        &entry.stacktraces
    }

    /// Drop the entry unless it was derived from `buffer`
    ///
    /// Returns true when the entry was dropped.
    pub fn invalidate(&mut self, buffer: &[Address]) -> bool {
        let stale = self
            .entry
            .as_ref()
            .is_some_and(|entry| entry.buffer != buffer);
        if stale {
            self.entry = None;
        }
        stale
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
