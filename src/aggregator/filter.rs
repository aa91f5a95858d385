//! Per-frame predicates applied before aggregation.

use crate::symbols::StackFrame;

/// Decides whether a frame takes part in aggregation
///
/// Any `Fn(&StackFrame) -> bool` closure is a filter.
pub trait FrameFilter {
    fn accept(&self, frame: &StackFrame) -> bool;
}

impl<F> FrameFilter for F
where
    F: Fn(&StackFrame) -> bool,
{
    fn accept(&self, frame: &StackFrame) -> bool {
        self(frame)
    }
}

/// Default filter: every frame is kept
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FrameFilter for AcceptAll {
    fn accept(&self, _frame: &StackFrame) -> bool {
        true
    }
}

/// Keeps frames whose file path contains a substring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContains {
    needle: String,
}

impl FileContains {
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

impl FrameFilter for FileContains {
    fn accept(&self, frame: &StackFrame) -> bool {
        frame.file.contains(self.needle.as_str())
    }
}

/// Filter keeping frames from files whose path contains `needle`
pub fn file_contains(needle: impl Into<String>) -> FileContains {
    FileContains {
        needle: needle.into(),
    }
}
