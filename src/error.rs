use thiserror::Error;

use crate::bound::Bound;

/// Errors that can occur while classifying events for a sweep.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeaveError<B> {
    /// An event's begin lies after its end, or an unbounded marker sits on
    /// the wrong side of the span.
    ///
    /// `index` is the zero-based position of the offending event among all
    /// events fed to the timeline.
    #[error("invalid interval for event #{index}: begin {begin:?} is after end {end:?}")]
    InvalidInterval {
        index: usize,
        begin: Bound<B>,
        end: Bound<B>,
    },
}
