//! Symbolication of raw backtraces.
//!
//! This module handles:
//! - Resolved frame and stack trace types
//! - Resolving each distinct address once per batch
//! - Dropping frames of opaque native code
//! - DWARF lookups for real binaries

pub mod dwarf;
pub mod frame;
pub mod resolver;

// Re-export main types
pub use dwarf::DwarfResolver;
pub use frame::{StackFrame, StackTrace};
pub use resolver::{resolve_backtraces, SymbolResolver, SymbolTable};
