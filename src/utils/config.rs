//! Configuration and constants for the pipeline.

use crate::sampler::Address;

/// Address value that terminates one backtrace in the raw buffer
pub const SENTINEL: Address = 0;

/// Order in which a sampler records the frames of one backtrace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrder {
    /// Innermost (executing) frame first, callers after it
    LeafFirst,
    /// Outermost caller first, executing frame last
    RootFirst,
}

impl FrameOrder {
    /// Executing frame among `frames`, given in sampler order
    pub fn leaf_of<I: Iterator>(self, mut frames: I) -> Option<I::Item> {
        match self {
            FrameOrder::LeafFirst => frames.next(),
            FrameOrder::RootFirst => frames.last(),
        }
    }
}

/// Frame order of the samplers this crate consumes.
///
/// Own-time attribution picks the leaf according to this value.
pub const SAMPLE_ORDER: FrameOrder = FrameOrder::LeafFirst;

/// Rows whose rounded share of the total is below this percentage are not rendered
pub const MIN_DISPLAY_PERCENT: f64 = 1.0;

// Placeholders for addresses the DWARF resolver has no symbols for
pub const UNKNOWN_FUNCTION: &str = "??";
pub const UNKNOWN_FILE: &str = "??";

/// Default number of rows printed by the CLI report
pub const DEFAULT_TOP_FRAMES: usize = 20;
