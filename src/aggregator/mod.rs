//! Aggregation of stack traces into frame counts.
//!
//! This module transforms resolved stack traces into:
//! - Own-time counts (leaf frame attribution)
//! - Total-time counts (inclusive attribution, once per sample)
//! - A sorted, indexable view with percentage rendering

pub mod counts;
pub mod filter;
pub mod view;

// Re-export main types and functions
pub use counts::{own_time, own_time_with_order, total_time};
pub use filter::{file_contains, AcceptAll, FileContains, FrameFilter};
pub use view::{FrameCounts, FrameShare};
