//! Sorted frame counts and their percentage view.

use crate::symbols::StackFrame;
use crate::utils::config::MIN_DISPLAY_PERCENT;
use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// Frame counts sorted by count, descending
///
/// `total` is the number of stack traces aggregated, which can exceed the
/// sum of the counts when filtering removed frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameCounts {
    entries: Vec<(StackFrame, usize)>,
    total: usize,
}

/// One rendered row: a frame and its rounded share of the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameShare<'a> {
    pub frame: &'a StackFrame,
    pub count: usize,
    pub percent: u32,
}

impl FrameCounts {
    /// Sort `entries` by count (stable, so equal counts keep their order)
    pub fn from_counts(mut entries: Vec<(StackFrame, usize)>, total: usize) -> Self {
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries, total }
    }

    /// Number of stack traces the counts were taken over
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&(StackFrame, usize)> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (StackFrame, usize)> {
        self.entries.iter()
    }

    pub fn frames(&self) -> impl Iterator<Item = &StackFrame> + '_ {
        self.entries.iter().map(|(frame, _)| frame)
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, count)| *count)
    }

    /// Share of entry `index` in percent of `total`
    pub fn percent(&self, index: usize) -> Option<f64> {
        let (_, count) = self.entries.get(index)?;
        Some(percent_of(*count, self.total))
    }

    /// Rows rounded to whole percent, keeping those whose rounded value
    /// reaches [`MIN_DISPLAY_PERCENT`]
    ///
    /// A 0.5% row renders as 1% and is kept; 0.49% rounds to 0% and is not.
    pub fn shares(&self) -> Vec<FrameShare<'_>> {
        self.entries
            .iter()
            .filter_map(|(frame, count)| {
                let percent = percent_of(*count, self.total).round();
                (percent >= MIN_DISPLAY_PERCENT).then(|| FrameShare {
                    frame,
                    count: *count,
                    percent: percent as u32,
                })
            })
            .collect()
    }

    /// First `n` entries, keeping `total`
    pub fn top(&self, n: usize) -> FrameCounts {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
            total: self.total,
        }
    }
}

/// **Private** - shared by `percent` and `shares`
fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

impl Index<usize> for FrameCounts {
    type Output = (StackFrame, usize);

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a FrameCounts {
    type Item = &'a (StackFrame, usize);
    type IntoIter = std::slice::Iter<'a, (StackFrame, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for FrameCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for share in self.shares() {
            writeln!(f, "{:>4}%  {}", share.percent, share.frame)?;
        }
        Ok(())
    }
}
