//! Samplestat
//!
//! Own-time and total-time breakdowns from raw sampling-profiler
//! buffers.
//!
//! The pipeline reads the sampler's flat address buffer, splits it into
//! backtraces on the `0` sentinel, resolves every distinct address once,
//! drops native frames and aggregates the resulting stack traces.
//!
//! ## Getting Started
//!
//! ```
//! use samplestat::{file_contains, AcceptAll, MemorySampler, Profiler, StackFrame, SymbolTable};
//!
//! let mut sampler = MemorySampler::with_capacity(64);
//! sampler.record(&[0x10, 0x20]);
//! sampler.record(&[0x20]);
//!
//! let symbols = SymbolTable::new()
//!     .with(0x10, StackFrame::new("parse", "src/parse.rs", 12))
//!     .with(0x20, StackFrame::new("main", "src/main.rs", 3));
//!
//! let mut profiler = Profiler::new(sampler, symbols);
//! let own = profiler.own_time(&AcceptAll, true)?;
//! assert_eq!(own.total(), 2);
//!
//! let parse_only = profiler.total_time(&file_contains("parse"), true)?;
//! assert_eq!(parse_only[0].1, 1);
//! # Ok::<(), samplestat::ProfileError>(())
//! ```

pub mod aggregator;
pub mod cache;
pub mod commands;
pub mod profile;
pub mod sampler;
pub mod symbols;
pub mod utils;

pub use aggregator::{file_contains, own_time, total_time, AcceptAll, FrameCounts, FrameFilter};
pub use cache::ResultCache;
pub use profile::Profiler;
pub use sampler::{Address, Backtrace, MemorySampler, Sampler};
pub use symbols::{DwarfResolver, StackFrame, StackTrace, SymbolResolver, SymbolTable};
pub use utils::error::{ProfileError, ResolveError, SamplerError};
