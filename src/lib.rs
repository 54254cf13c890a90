//! eventweave - chronological interweaving of time-tagged events
//!
//! Given events that each carry a begin and an end bound, [`interweave`]
//! yields, in temporal order, every set of events that are simultaneously in
//! effect. A new set is produced exactly when membership changes.
//!
//! - An event is active at `T` if `begin <= T <= end`.
//! - An event ending at `T` and another beginning at `T` are **not**
//!   simultaneous: the earlier one is treated as ending an infinitesimal
//!   moment before the later one starts. Sequential events stay distinct.
//! - An instantaneous event (`begin == end`) is active at its instant and
//!   co-occurs with every event in effect there, including events ending or
//!   beginning at exactly that instant.
//! - A missing begin means "active before anything else", a missing end means
//!   "active until the end"; with both missing an event is in every set.
//!
//! Classification takes O(n log n) time and O(n) space.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//! use eventweave::interweave;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Event {
//!     begin: Option<&'static str>,
//!     end: Option<&'static str>,
//! }
//!
//! let always = Event { begin: None, end: None };
//! let long = Event { begin: Some("2022-01-01"), end: Some("2025-01-01") };
//! let a = Event { begin: Some("2023-01-01"), end: Some("2023-01-03") };
//! let b = Event { begin: Some("2023-01-02"), end: Some("2023-01-04") };
//! let events = [always.clone(), long.clone(), a.clone(), b.clone()];
//!
//! let result: Vec<HashSet<Event>> = interweave(events, |e| (e.begin, e.end))
//!     .unwrap()
//!     .map(|set| set.into_inner())
//!     .collect();
//!
//! let expected: Vec<HashSet<Event>> = vec![
//!     HashSet::from([always.clone()]),
//!     HashSet::from([always.clone(), long.clone()]),
//!     HashSet::from([always.clone(), long.clone(), a.clone()]),
//!     HashSet::from([always.clone(), long.clone(), a.clone(), b.clone()]),
//!     HashSet::from([always.clone(), long.clone(), b.clone()]),
//!     HashSet::from([always.clone(), long.clone()]),
//!     HashSet::from([always.clone()]),
//! ];
//! assert_eq!(result, expected);
//! ```

pub mod active;
pub mod bound;
pub mod cursor;
pub mod error;
pub mod span;
pub mod sweep;
pub mod timeline;

use std::hash::Hash;

use tracing::instrument;

pub use active::ActiveSet;
pub use bound::Bound;
pub use error::WeaveError;
pub use span::{Span, SpanKind};
pub use sweep::Interweave;
pub use timeline::Timeline;

/// Interweaves `events` into a chronological iterator of active sets.
///
/// `key` maps an event to its `(begin, end)` bounds, `None` meaning unbounded
/// on that side. It is called exactly once per event, before the first set is
/// produced.
///
/// # Errors
///
/// Returns [`WeaveError::InvalidInterval`] if any event's begin lies after its
/// end. No set is produced in that case.
///
/// # Examples
///
/// ```
/// use eventweave::interweave;
///
/// // A closed interval with two instantaneous events inside it.
/// let events = [("span", 0, 3), ("tick", 1, 1), ("tock", 2, 2)];
/// let names: Vec<Vec<&str>> = interweave(events, |&(_, b, e)| (Some(b), Some(e)))
///     .unwrap()
///     .map(|set| {
///         let mut names: Vec<&str> = set.iter().map(|e| e.0).collect();
///         names.sort();
///         names
///     })
///     .collect();
///
/// assert_eq!(
///     names,
///     vec![
///         vec!["span"],
///         vec!["span", "tick"],
///         vec!["span"],
///         vec!["span", "tock"],
///         vec!["span"],
///     ]
/// );
/// ```
#[instrument(level = "debug", skip_all)]
pub fn interweave<E, B, I, F>(events: I, key: F) -> Result<Interweave<E, B>, WeaveError<B>>
where
    I: IntoIterator<Item = E>,
    F: FnMut(&E) -> (Option<B>, Option<B>),
    E: Hash + Eq + Clone,
    B: Ord + Clone,
{
    Ok(Timeline::from_events(events, key)?.sweep())
}

/// Method-call form of [`interweave`] for any collection of events.
///
/// ```
/// use eventweave::InterweaveExt;
///
/// let spans = vec![(1, 2), (2, 3)];
/// let sets: Vec<_> = spans
///     .iter()
///     .interweave_by(|&&(b, e)| (Some(b), Some(e)))
///     .unwrap()
///     .collect();
/// assert_eq!(sets.len(), 2);
/// ```
pub trait InterweaveExt: IntoIterator + Sized {
    fn interweave_by<B, F>(self, key: F) -> Result<Interweave<Self::Item, B>, WeaveError<B>>
    where
        Self::Item: Hash + Eq + Clone,
        B: Ord + Clone,
        F: FnMut(&Self::Item) -> (Option<B>, Option<B>),
    {
        interweave(self, key)
    }
}

impl<I: IntoIterator> InterweaveExt for I {}
