//! Profiling session: the public face of the pipeline.
//!
//! A [`Profiler`] owns the buffer reader, the symbol resolver and the
//! result cache, and chains them:
//! 1. Fetch the raw buffer
//! 2. Split it into backtraces
//! 3. Resolve unique addresses into stack traces (cached)
//! 4. Aggregate own time or total time
//!
//! A session is single-threaded; share one across threads only behind
//! external synchronisation.

use crate::aggregator::{self, FrameCounts, FrameFilter};
use crate::cache::ResultCache;
use crate::sampler::backtrace::backtraces_from;
use crate::sampler::{Backtrace, BufferReader, Fetch, Sampler};
use crate::symbols::{resolve_backtraces, StackTrace, SymbolResolver};
use crate::utils::error::ProfileError;
use log::debug;

pub struct Profiler<S, R> {
    reader: BufferReader<S>,
    resolver: R,
    cache: ResultCache,
}

impl<S: Sampler, R: SymbolResolver> Profiler<S, R> {
    pub fn new(sampler: S, resolver: R) -> Self {
        Self::with_cache(sampler, resolver, ResultCache::new())
    }

    /// Session reusing a cache from an earlier one
    pub fn with_cache(sampler: S, resolver: R, cache: ResultCache) -> Self {
        Self {
            reader: BufferReader::new(sampler),
            resolver,
            cache,
        }
    }

    pub fn sampler(&self) -> &S {
        self.reader.sampler()
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        self.reader.sampler_mut()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Hand the cache back, e.g. to seed another session
    pub fn into_cache(self) -> ResultCache {
        self.cache
    }

    /// Drop the cached stack traces; the next request re-resolves
    pub fn clear(&mut self) {
        debug!("Clearing result cache");
        self.cache.clear();
    }

    /// Read the sampler's buffer
    ///
    /// This also replaces the reader's notion of the previous buffer.
    pub fn fetch(&mut self) -> Result<Fetch, ProfileError> {
        Ok(self.reader.fetch()?)
    }

    /// Fetch and split the current buffer
    pub fn backtraces(&mut self, warn_on_full: bool) -> Result<Vec<Backtrace>, ProfileError> {
        let fetch = self.reader.fetch()?;
        Ok(backtraces_from(&fetch, warn_on_full))
    }

    /// Resolved stack traces of the current buffer
    ///
    /// Served from the cache when the buffer is unchanged and the cached
    /// entry was derived from it; otherwise the buffer is split and
    /// resolved again and the cache refreshed. A failed resolution leaves
    /// the cache as it was.
    pub fn stacktraces(&mut self, warn_on_full: bool) -> Result<&[StackTrace], ProfileError> {
        let fetch = self.reader.fetch()?;

        if !fetch.is_new && self.cache.get(&fetch.buffer).is_some() {
            debug!("Buffer unchanged; using cached stack traces");
            return Ok(self.cache.get(&fetch.buffer).unwrap_or_default());
        }

        debug!("Resolving stack traces for a fresh buffer");
        let backtraces = backtraces_from(&fetch, warn_on_full);
        let stacktraces = resolve_backtraces(&mut self.resolver, &backtraces)?;

        Ok(self.cache.store(fetch.buffer, stacktraces))
    }

    /// Own time over the current buffer's stack traces
    pub fn own_time<F>(&mut self, filter: &F, warn_on_full: bool) -> Result<FrameCounts, ProfileError>
    where
        F: FrameFilter + ?Sized,
    {
        let stacktraces = self.stacktraces(warn_on_full)?;
        Ok(aggregator::own_time(stacktraces, filter))
    }

    /// Total time over the current buffer's stack traces
    pub fn total_time<F>(&mut self, filter: &F, warn_on_full: bool) -> Result<FrameCounts, ProfileError>
    where
        F: FrameFilter + ?Sized,
    {
        let stacktraces = self.stacktraces(warn_on_full)?;
        Ok(aggregator::total_time(stacktraces, filter))
    }
}
