//! Resolved frame and stack trace types.

use crate::utils::config::{FrameOrder, SAMPLE_ORDER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic information for one code location
///
/// Frames are compared by value: the same location reached from many
/// samples is the same aggregation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrame {
    /// Function name (demangled when available)
    pub function: String,

    /// Source file path
    pub file: String,

    /// Source line, 0 when unknown
    pub line: u32,

    /// Frame belongs to opaque native code
    pub is_native: bool,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
            is_native: false,
        }
    }

    /// Frame for native code without source information
    pub fn native(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: String::new(),
            line: 0,
            is_native: true,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native {
            write!(f, "{} [native]", self.function)
        } else {
            write!(f, "{} ({}:{})", self.function, self.file, self.line)
        }
    }
}

/// Resolved call stack of one sample, native frames removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<StackFrame>", into = "Vec<StackFrame>")]
pub struct StackTrace {
    frames: Vec<StackFrame>,
}

impl StackTrace {
    /// Build a trace, dropping every native frame
    pub fn new(frames: Vec<StackFrame>) -> Self {
        let frames = frames.into_iter().filter(|f| !f.is_native).collect();
        Self { frames }
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StackFrame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Executing frame at sample time, following [`SAMPLE_ORDER`]
    pub fn leaf(&self) -> Option<&StackFrame> {
        self.leaf_with(SAMPLE_ORDER)
    }

    pub fn leaf_with(&self, order: FrameOrder) -> Option<&StackFrame> {
        order.leaf_of(self.frames.iter())
    }
}

impl From<Vec<StackFrame>> for StackTrace {
    fn from(frames: Vec<StackFrame>) -> Self {
        Self::new(frames)
    }
}

impl From<StackTrace> for Vec<StackFrame> {
    fn from(trace: StackTrace) -> Self {
        trace.frames
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a StackFrame;
    type IntoIter = std::slice::Iter<'a, StackFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
