//! Classification of events into boundary buckets.
//!
//! A [`Timeline`] files every event under the bounds where it enters or
//! leaves the active set:
//!
//! | Kind             | Filed under                         |
//! |------------------|-------------------------------------|
//! | `Closed`         | `begins[begin]`, `ends[end]`        |
//! | `Atomic`         | `atomics[at]`                       |
//! | `UnboundedLeft`  | no-begin set, `ends[end]`           |
//! | `UnboundedRight` | `begins[begin]`                     |
//! | `Unbounded`      | no-begin set                        |
//!
//! Buckets are ordered maps, so the sweep reads bounds in ascending order
//! without a separate sort.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::hash::Hash;

use tracing::{debug, instrument};

use crate::bound::Bound;
use crate::error::WeaveError;
use crate::span::{Span, SpanKind};
use crate::sweep::Interweave;

/// Boundary-indexed buckets of events, ready to be swept.
#[derive(Debug, Clone)]
pub struct Timeline<E, B> {
    begins: BTreeMap<B, HashSet<E>>,
    ends: BTreeMap<B, HashSet<E>>,
    atomics: BTreeMap<B, HashSet<E>>,
    without_begin: HashSet<E>,
    len: usize,
}

/// Buckets handed over to the sweep.
pub(crate) struct TimelineParts<E, B> {
    pub(crate) begins: BTreeMap<B, HashSet<E>>,
    pub(crate) ends: BTreeMap<B, HashSet<E>>,
    pub(crate) atomics: BTreeMap<B, HashSet<E>>,
    pub(crate) without_begin: HashSet<E>,
}

impl<E, B> Default for Timeline<E, B> {
    fn default() -> Self {
        Self {
            begins: BTreeMap::new(),
            ends: BTreeMap::new(),
            atomics: BTreeMap::new(),
            without_begin: HashSet::new(),
            len: 0,
        }
    }
}

impl<E, B> Timeline<E, B>
where
    E: Hash + Eq + Clone,
    B: Ord + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies every event, applying `key` exactly once per event.
    ///
    /// Stops at the first invalid span and reports its input position.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventweave::{Timeline, WeaveError, Bound};
    ///
    /// let events = [(1, 3), (5, 2), (4, 6)];
    /// let err = Timeline::from_events(events, |&(b, e)| (Some(b), Some(e))).unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     WeaveError::InvalidInterval { index: 1, begin: Bound::Finite(5), end: Bound::Finite(2) }
    /// );
    /// ```
    #[instrument(level = "debug", skip_all)]
    pub fn from_events<I, F>(events: I, key: F) -> Result<Self, WeaveError<B>>
    where
        I: IntoIterator<Item = E>,
        F: FnMut(&E) -> (Option<B>, Option<B>),
    {
        let mut timeline = Self::new();
        timeline.try_extend(events, key)?;
        debug!(
            events = timeline.len,
            begins = timeline.begins.len(),
            ends = timeline.ends.len(),
            atomics = timeline.atomics.len(),
            without_begin = timeline.without_begin.len(),
            "classified events"
        );
        Ok(timeline)
    }

    /// Classifies further events into this timeline.
    ///
    /// Events accepted before an invalid one stay filed.
    pub fn try_extend<I, F>(&mut self, events: I, mut key: F) -> Result<(), WeaveError<B>>
    where
        I: IntoIterator<Item = E>,
        F: FnMut(&E) -> (Option<B>, Option<B>),
    {
        for event in events {
            let (begin, end) = key(&event);
            self.insert(event, Span::from_options(begin, end))?;
        }
        Ok(())
    }

    /// Files a single event under the buckets its span calls for.
    ///
    /// On error the timeline is unchanged; the reported `index` is the number
    /// of events accepted so far.
    pub fn insert(&mut self, event: E, span: Span<B>) -> Result<SpanKind, WeaveError<B>> {
        let kind = span.kind();
        let filed = match (kind, span.into_bounds()) {
            (Some(SpanKind::Atomic), (Bound::Finite(at), _)) => {
                self.atomics.entry(at).or_default().insert(event);
                SpanKind::Atomic
            }
            (Some(SpanKind::Closed), (Bound::Finite(begin), Bound::Finite(end))) => {
                self.begins.entry(begin).or_default().insert(event.clone());
                self.ends.entry(end).or_default().insert(event);
                SpanKind::Closed
            }
            (Some(SpanKind::UnboundedLeft), (_, Bound::Finite(end))) => {
                self.ends.entry(end).or_default().insert(event.clone());
                self.without_begin.insert(event);
                SpanKind::UnboundedLeft
            }
            (Some(SpanKind::UnboundedRight), (Bound::Finite(begin), _)) => {
                self.begins.entry(begin).or_default().insert(event);
                SpanKind::UnboundedRight
            }
            (Some(SpanKind::Unbounded), _) => {
                self.without_begin.insert(event);
                SpanKind::Unbounded
            }
            (_, (begin, end)) => {
                debug!(index = self.len, "rejecting event with begin after end");
                return Err(WeaveError::InvalidInterval {
                    index: self.len,
                    begin,
                    end,
                });
            }
        };
        self.len += 1;
        Ok(filed)
    }

    /// Distinct finite bounds in ascending order.
    pub fn bounds(&self) -> impl Iterator<Item = &B> {
        self.begins
            .keys()
            .chain(self.ends.keys())
            .chain(self.atomics.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
    }

    /// Consumes the timeline and starts a sweep over it.
    pub fn sweep(self) -> Interweave<E, B> {
        Interweave::new(self.into_parts())
    }

    pub(crate) fn into_parts(self) -> TimelineParts<E, B> {
        TimelineParts {
            begins: self.begins,
            ends: self.ends,
            atomics: self.atomics,
            without_begin: self.without_begin,
        }
    }
}

impl<E, B> Timeline<E, B> {
    /// Number of events accepted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ev = (&'static str, Option<i32>, Option<i32>);

    fn key(event: &Ev) -> (Option<i32>, Option<i32>) {
        (event.1, event.2)
    }

    fn build(events: Vec<Ev>) -> Timeline<Ev, i32> {
        Timeline::from_events(events, key).unwrap()
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = build(vec![]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.bounds().count(), 0);
    }

    #[test]
    fn test_closed_is_filed_at_both_bounds() {
        let timeline = build(vec![("a", Some(1), Some(3))]);
        let parts = timeline.into_parts();
        assert_eq!(parts.begins.len(), 1);
        assert_eq!(parts.ends.len(), 1);
        assert!(parts.begins[&1].contains(&("a", Some(1), Some(3))));
        assert!(parts.ends[&3].contains(&("a", Some(1), Some(3))));
        assert!(parts.atomics.is_empty());
        assert!(parts.without_begin.is_empty());
    }

    #[test]
    fn test_each_kind_lands_in_its_buckets() {
        let timeline = build(vec![
            ("closed", Some(1), Some(3)),
            ("atomic", Some(2), Some(2)),
            ("left", None, Some(4)),
            ("right", Some(5), None),
            ("all", None, None),
        ]);
        assert_eq!(timeline.len(), 5);
        assert_eq!(timeline.bounds().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

        let parts = timeline.into_parts();
        assert_eq!(parts.begins.keys().copied().collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(parts.ends.keys().copied().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(parts.atomics.keys().copied().collect::<Vec<_>>(), vec![2]);
        let names: BTreeSet<_> = parts.without_begin.iter().map(|e| e.0).collect();
        assert_eq!(names, BTreeSet::from(["left", "all"]));
    }

    #[test]
    fn test_insert_reports_kind() {
        let mut timeline = Timeline::new();
        assert_eq!(
            timeline.insert("p", Span::at(3)).unwrap(),
            SpanKind::Atomic
        );
        assert_eq!(
            timeline.insert("q", Span::from_options(Some(1), None)).unwrap(),
            SpanKind::UnboundedRight
        );
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn test_invalid_interval_reports_position() {
        let err = Timeline::from_events(
            vec![
                ("a", Some(0), Some(1)),
                ("b", Some(1), Some(2)),
                ("bad", Some(5), Some(2)),
                ("c", Some(3), Some(4)),
            ],
            key,
        )
        .unwrap_err();
        assert_eq!(
            err,
            WeaveError::InvalidInterval {
                index: 2,
                begin: Bound::Finite(5),
                end: Bound::Finite(2),
            }
        );
    }

    #[test]
    fn test_invalid_insert_leaves_timeline_unchanged() {
        let mut timeline = Timeline::new();
        timeline.insert("a", Span::closed(1, 2)).unwrap();
        let err = timeline
            .insert("b", Span::new(Bound::After, Bound::Finite(3)))
            .unwrap_err();
        assert!(matches!(err, WeaveError::InvalidInterval { index: 1, .. }));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.bounds().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_try_extend_appends() {
        let mut timeline = build(vec![("a", Some(0), Some(2))]);
        timeline
            .try_extend(vec![("b", Some(2), Some(4))], key)
            .unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.bounds().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn test_key_applied_once_per_event() {
        let mut calls = 0;
        let events = vec![("a", Some(0), Some(2)), ("b", None, None)];
        Timeline::from_events(events, |e| {
            calls += 1;
            key(e)
        })
        .unwrap();
        assert_eq!(calls, 2);
    }
}
