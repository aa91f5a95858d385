//! Own-time and total-time attribution of samples to frames.
//!
//! Own time credits a sample to the frame that was executing when it was
//! taken. Total time credits it to every distinct frame on the stack.
//! Both use the number of input traces as the denominator, so filtered
//! frames lower the shares instead of inflating the remaining ones.

use super::filter::FrameFilter;
use super::view::FrameCounts;
use crate::symbols::{StackFrame, StackTrace};
use crate::utils::config::{FrameOrder, SAMPLE_ORDER};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Count frames in first-seen order
///
/// Keys live in a Vec so that ties keep a reproducible order through the
/// stable sort in [`FrameCounts::from_counts`].
#[derive(Default)]
struct Tally<'a> {
    index: HashMap<&'a StackFrame, usize>,
    counts: Vec<(&'a StackFrame, usize)>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, frame: &'a StackFrame) {
        match self.index.get(frame) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(frame, self.counts.len());
                self.counts.push((frame, 1));
            }
        }
    }

    fn into_counts(self, total: usize) -> FrameCounts {
        let counts = self
            .counts
            .into_iter()
            .map(|(frame, count)| (frame.clone(), count))
            .collect();
        FrameCounts::from_counts(counts, total)
    }
}

/// Own time of each frame, leaf taken per [`SAMPLE_ORDER`]
///
/// # Algorithm
/// 1. Keep only the frames the filter accepts
/// 2. Skip traces left empty
/// 3. Credit the leaf of every remaining trace
pub fn own_time<F>(stacktraces: &[StackTrace], filter: &F) -> FrameCounts
where
    F: FrameFilter + ?Sized,
{
    own_time_with_order(stacktraces, filter, SAMPLE_ORDER)
}

pub fn own_time_with_order<F>(stacktraces: &[StackTrace], filter: &F, order: FrameOrder) -> FrameCounts
where
    F: FrameFilter + ?Sized,
{
    let mut tally = Tally::default();

    for trace in stacktraces {
        let kept = trace.iter().filter(|frame| filter.accept(frame));
        if let Some(frame) = order.leaf_of(kept) {
            tally.add(frame);
        }
    }

    debug!(
        "Own time: {} distinct leaf frames over {} traces",
        tally.counts.len(),
        stacktraces.len()
    );

    tally.into_counts(stacktraces.len())
}

/// Total time of each frame
///
/// A frame is credited at most once per trace, so recursion does not
/// count a sample twice.
pub fn total_time<F>(stacktraces: &[StackTrace], filter: &F) -> FrameCounts
where
    F: FrameFilter + ?Sized,
{
    let mut tally = Tally::default();
    let mut seen: HashSet<&StackFrame> = HashSet::new();

    for trace in stacktraces {
        seen.clear();
        for frame in trace.iter().filter(|frame| filter.accept(frame)) {
            if seen.insert(frame) {
                tally.add(frame);
            }
        }
    }

    debug!(
        "Total time: {} distinct frames over {} traces",
        tally.counts.len(),
        stacktraces.len()
    );

    tally.into_counts(stacktraces.len())
}
