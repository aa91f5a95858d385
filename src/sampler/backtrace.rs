//! Split a raw buffer into individual backtraces.
//!
//! Raw format: addresses of one sample followed by the sentinel `0`.
//!
//! Example: `[1, 2, 0, 3, 0]` holds two samples, `[1, 2]` and `[3]`.

use super::buffer::Fetch;
use super::{Address, Backtrace};
use crate::utils::config::SENTINEL;
use log::{debug, warn};

/// Split a raw buffer on the sentinel
///
/// Only sentinel-terminated spans become backtraces; an unterminated tail
/// was cut off mid-sample and is discarded. Empty spans (consecutive
/// sentinels) are dropped.
pub fn split_backtraces(buffer: &[Address]) -> Vec<Backtrace> {
    let mut backtraces = Vec::new();
    let mut start = 0;

    for (j, &address) in buffer.iter().enumerate() {
        if address == SENTINEL {
            if j > start {
                backtraces.push(buffer[start..j].to_vec());
            }
            start = j + 1;
        }
    }

    if start < buffer.len() {
        debug!(
            "Discarding {} trailing addresses without a sentinel",
            buffer.len() - start
        );
    }

    backtraces
}

/// Split an already fetched buffer, warning when it was full
///
/// A full buffer is only an advisory: the samples are still processed.
pub fn backtraces_from(fetch: &Fetch, warn_on_full: bool) -> Vec<Backtrace> {
    if warn_on_full && fetch.is_full {
        warn!(
            "The sample buffer is full ({} addresses); samples may have been dropped",
            fetch.buffer.len()
        );
    }

    let backtraces = split_backtraces(&fetch.buffer);
    debug!("Split buffer into {} backtraces", backtraces.len());
    backtraces
}
