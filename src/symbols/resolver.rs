//! Batch symbolication of backtraces.
//!
//! Symbol lookups dominate the cost of the pipeline, so every distinct
//! address is resolved exactly once per call, no matter how many samples
//! it appears in.

use super::frame::{StackFrame, StackTrace};
use crate::sampler::{Address, Backtrace};
use crate::utils::error::ResolveError;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Capability that turns an address into source frames
///
/// Inlined code may yield several frames for one address; they are
/// returned innermost first.
pub trait SymbolResolver {
    fn resolve(&mut self, address: Address) -> Result<Vec<StackFrame>, ResolveError>;
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for &mut R {
    fn resolve(&mut self, address: Address) -> Result<Vec<StackFrame>, ResolveError> {
        (**self).resolve(address)
    }
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for Box<R> {
    fn resolve(&mut self, address: Address) -> Result<Vec<StackFrame>, ResolveError> {
        (**self).resolve(address)
    }
}

/// Resolve a batch of backtraces into stack traces
///
/// Addresses are looked up in first-seen order. Multi-frame expansions are
/// spliced into place and native frames are dropped afterwards.
///
/// # Errors
/// The first resolver failure aborts the whole batch.
pub fn resolve_backtraces<R>(
    resolver: &mut R,
    backtraces: &[Backtrace],
) -> Result<Vec<StackTrace>, ResolveError>
where
    R: SymbolResolver + ?Sized,
{
    let mut symbols: HashMap<Address, Vec<StackFrame>> = HashMap::new();

    for &address in backtraces.iter().flatten() {
        if let Entry::Vacant(slot) = symbols.entry(address) {
            slot.insert(resolver.resolve(address)?);
        }
    }

    debug!(
        "Resolved {} unique addresses across {} backtraces",
        symbols.len(),
        backtraces.len()
    );

    let traces = backtraces
        .iter()
        .map(|backtrace| {
            let frames = backtrace
                .iter()
                .flat_map(|address| symbols.get(address).into_iter().flatten())
                .cloned()
                .collect();
            StackTrace::new(frames)
        })
        .collect();

    Ok(traces)
}

/// Fixed address → frames table
///
/// Addresses missing from the table fail with
/// [`ResolveError::Unresolved`].
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<Address, Vec<StackFrame>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an address to a single frame
    pub fn insert(&mut self, address: Address, frame: StackFrame) {
        self.entries.insert(address, vec![frame]);
    }

    /// Map an address to an inlined frame chain, innermost first
    pub fn insert_inlined(&mut self, address: Address, frames: Vec<StackFrame>) {
        self.entries.insert(address, frames);
    }

    pub fn with(mut self, address: Address, frame: StackFrame) -> Self {
        self.insert(address, frame);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&mut self, address: Address) -> Result<Vec<StackFrame>, ResolveError> {
        self.entries
            .get(&address)
            .cloned()
            .ok_or(ResolveError::Unresolved(address))
    }
}
