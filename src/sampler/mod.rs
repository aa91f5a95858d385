//! Raw sample buffer access.
//!
//! This module handles:
//! - Reading the sampler's flat address buffer
//! - Detecting full (possibly truncated) and unchanged buffers
//! - Splitting the buffer into per-sample backtraces
//! - Loading address dumps from disk

pub mod backtrace;
pub mod buffer;
pub mod dump;

/// Opaque code location recorded by the sampler
pub type Address = u64;

/// One sample's unresolved call stack, without its terminating sentinel
pub type Backtrace = Vec<Address>;

// Re-export main types
pub use backtrace::split_backtraces;
pub use buffer::{BufferReader, Fetch, MemorySampler, Sampler};
pub use dump::{load_addresses, parse_addresses};
