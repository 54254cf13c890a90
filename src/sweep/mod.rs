//! The interweave sweep.
//!
//! [`Interweave`] walks the bounds of a [`Timeline`](crate::Timeline) from
//! left to right while maintaining `combination`, the set of events currently
//! in effect. Candidate emissions are *staged*: a staged set is dropped when
//! it is empty or equal to the previously staged one, otherwise it is queued
//! for the caller.
//!
//! At every boundary `T` carrying begin bucket `beginning`, end bucket
//! `ending` and atomic bucket `atoms`:
//!
//! - if events both end and begin at `T`, the instant is seen twice: once
//!   with the ending events and once with the beginning ones, `atoms` joining
//!   both views. The two groups never share an emission;
//! - otherwise `beginning` joins first, the instant `T` (plus `atoms`) is
//!   staged, and `ending` leaves afterwards;
//! - finally the combination in effect after `T` is staged.
//!
//! Atomic buckets strictly between two boundaries are staged as a transient
//! `combination ∪ atoms` followed by the unchanged `combination`.
//!
//! # Complexity
//!
//! Classification is O(n log n); each boundary costs O(k) set work where k is
//! the size of the staged sets, plus the copy-on-write clone when a snapshot
//! of the running set is still held by the caller.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::hash::Hash;
use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::trace;

use crate::active::ActiveSet;
use crate::cursor::AtomicCursor;
use crate::timeline::TimelineParts;


/// Lazy iterator over the chronologically ordered active sets of a timeline.
///
/// Each call to [`Iterator::next`] advances the sweep only as far as needed to
/// produce one more [`ActiveSet`]. Dropping the iterator early is fine; it
/// holds no external resources.
#[derive(Debug, Clone)]
pub struct Interweave<E, B> {
    begins: BTreeMap<B, HashSet<E>>,
    ends: BTreeMap<B, HashSet<E>>,
    atomics: AtomicCursor<E, B>,
    combination: Arc<HashSet<E>>,
    last: Option<ActiveSet<E>>,
    pending: VecDeque<ActiveSet<E>>,
    finished: bool,
}

impl<E, B> Interweave<E, B>
where
    E: Hash + Eq + Clone,
    B: Ord + Clone,
{
    pub(crate) fn new(parts: TimelineParts<E, B>) -> Self {
        let mut sweep = Self {
            begins: parts.begins,
            ends: parts.ends,
            atomics: AtomicCursor::new(parts.atomics),
            combination: Arc::new(parts.without_begin),
            last: None,
            pending: VecDeque::new(),
            finished: false,
        };
        sweep.stage_combination();
        sweep
    }

    /// Smallest bound still carried by a begin or end bucket.
    fn next_boundary(&self) -> Option<B> {
        let begin = self.begins.first_key_value().map(|(bound, _)| bound);
        let end = self.ends.first_key_value().map(|(bound, _)| bound);
        match (begin, end) {
            (Some(begin), Some(end)) => Some(begin.min(end).clone()),
            (Some(bound), None) | (None, Some(bound)) => Some(bound.clone()),
            (None, None) => None,
        }
    }

    /// Advances the sweep by one atomic bucket or one boundary.
    ///
    /// Returns `false` once every bucket has been consumed.
    fn step(&mut self) -> bool {
        let boundary = self.next_boundary();

        if let Some((_, atoms)) = self.atomics.next_before(boundary.as_ref()) {
            trace!(atoms = atoms.len(), "interleaving atomic events");
            let transient = self.with_atoms(&atoms);
            self.stage(transient);
            self.stage_combination();
            return true;
        }

        let Some(at) = boundary else {
            return false;
        };
        let beginning = self.begins.remove(&at).unwrap_or_default();
        let ending = self.ends.remove(&at).unwrap_or_default();
        let atoms = self.atomics.take_at(&at);
        trace!(
            beginning = beginning.len(),
            ending = ending.len(),
            atoms = atoms.len(),
            active = self.combination.len(),
            "handling boundary"
        );

        if !beginning.is_empty() && !ending.is_empty() {
            let closing = self.with_atoms(&atoms);
            self.stage(closing);
            self.retire(&ending);
            self.admit(beginning);
            let opening = self.with_atoms(&atoms);
            self.stage(opening);
        } else {
            self.admit(beginning);
            let instant = self.with_atoms(&atoms);
            self.stage(instant);
            self.retire(&ending);
        }
        self.stage_combination();
        true
    }

    /// The running combination joined with `atoms`, sharing storage when
    /// there is nothing to add.
    fn with_atoms(&self, atoms: &HashSet<E>) -> Arc<HashSet<E>> {
        if atoms.is_empty() {
            return Arc::clone(&self.combination);
        }
        let mut joined = HashSet::with_capacity(self.combination.len() + atoms.len());
        joined.extend(self.combination.iter().cloned());
        joined.extend(atoms.iter().cloned());
        Arc::new(joined)
    }

    fn admit(&mut self, events: HashSet<E>) {
        if !events.is_empty() {
            Arc::make_mut(&mut self.combination).extend(events);
        }
    }

    fn retire(&mut self, events: &HashSet<E>) {
        if events.is_empty() {
            return;
        }
        let combination = Arc::make_mut(&mut self.combination);
        for event in events {
            combination.remove(event);
        }
    }

    fn stage_combination(&mut self) {
        let current = Arc::clone(&self.combination);
        self.stage(current);
    }

    fn stage(&mut self, candidate: Arc<HashSet<E>>) {
        if candidate.is_empty() {
            return;
        }
        if let Some(last) = &self.last {
            if **last == *candidate {
                return;
            }
        }
        let snapshot = ActiveSet::from_shared(candidate);
        self.last = Some(snapshot.clone());
        self.pending.push_back(snapshot);
    }
}

impl<E, B> Iterator for Interweave<E, B>
where
    E: Hash + Eq + Clone,
    B: Ord + Clone,
{
    type Item = ActiveSet<E>;

    fn next(&mut self) -> Option<ActiveSet<E>> {
        loop {
            if let Some(snapshot) = self.pending.pop_front() {
                return Some(snapshot);
            }
            if self.finished {
                return None;
            }
            if !self.step() {
                debug_assert!(self.atomics.is_exhausted());
                trace!("sweep finished");
                self.finished = true;
                self.last = None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (self.pending.len(), Some(self.pending.len()))
        } else {
            (self.pending.len(), None)
        }
    }
}

impl<E, B> FusedIterator for Interweave<E, B>
where
    E: Hash + Eq + Clone,
    B: Ord + Clone,
{
}
