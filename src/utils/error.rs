//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::sampler::Address;
use thiserror::Error;

/// Errors raised while reading the sampler's buffer
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Sampler unavailable: {0}")]
    Unavailable(String),

    #[error("Sampler reported {expected} addresses but copied {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Failed to read address dump: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid address {token:?} on line {line}")]
    InvalidAddress { token: String, line: usize },
}

/// Errors raised while symbolicating an address
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No symbol information for address {0:#x}")]
    Unresolved(Address),

    #[error("Failed to read binary: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse binary: {0}")]
    Object(#[from] object::read::Error),

    #[error("DWARF lookup failed: {0}")]
    Dwarf(#[from] addr2line::gimli::Error),
}

/// Errors surfaced by [`crate::Profiler`] operations
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Sampler(#[from] SamplerError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
