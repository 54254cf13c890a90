//! Cursor over the atomic-event buckets of a timeline.

use std::collections::{BTreeMap, HashSet};

/// Sorted atomic buckets plus the index of the next unconsumed one.
///
/// The sweep advances the cursor from two places: while it is between
/// boundaries ([`AtomicCursor::next_before`]) and when it reaches a boundary
/// that also carries atomic events ([`AtomicCursor::take_at`]). Both only
/// ever move the index forward.
#[derive(Debug, Clone)]
pub struct AtomicCursor<E, B> {
    buckets: Vec<(B, HashSet<E>)>,
    next: usize,
}

impl<E, B: Ord + Clone> AtomicCursor<E, B> {
    pub fn new(buckets: BTreeMap<B, HashSet<E>>) -> Self {
        Self {
            buckets: buckets.into_iter().collect(),
            next: 0,
        }
    }

    /// Bound of the next unconsumed bucket.
    pub fn peek(&self) -> Option<&B> {
        self.buckets.get(self.next).map(|(bound, _)| bound)
    }

    /// Consumes the next bucket if its bound lies strictly below `limit`.
    ///
    /// With `limit = None` every remaining bucket qualifies.
    pub fn next_before(&mut self, limit: Option<&B>) -> Option<(B, HashSet<E>)> {
        let qualifies = match (self.peek(), limit) {
            (Some(bound), Some(limit)) => bound < limit,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if qualifies {
            self.consume()
        } else {
            None
        }
    }

    /// Consumes the bucket at exactly `bound`, or returns an empty set.
    ///
    /// Buckets below `bound` must already have been consumed.
    pub fn take_at(&mut self, bound: &B) -> HashSet<E> {
        debug_assert!(
            self.peek().map_or(true, |next| next >= bound),
            "AtomicCursor::take_at skipped unconsumed buckets"
        );
        if self.peek() == Some(bound) {
            self.consume().map(|(_, members)| members).unwrap_or_default()
        } else {
            HashSet::new()
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.buckets.len()
    }

    /// Number of buckets not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buckets.len() - self.next
    }

    fn consume(&mut self) -> Option<(B, HashSet<E>)> {
        let (bound, members) = self.buckets.get_mut(self.next)?;
        self.next += 1;
        Some((bound.clone(), std::mem::take(members)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(entries: Vec<(i32, Vec<&'static str>)>) -> AtomicCursor<&'static str, i32> {
        let buckets = entries
            .into_iter()
            .map(|(bound, members)| (bound, members.into_iter().collect()))
            .collect();
        AtomicCursor::new(buckets)
    }

    #[test]
    fn test_empty_cursor_is_exhausted() {
        let mut c = cursor(vec![]);
        assert!(c.is_exhausted());
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.peek(), None);
        assert!(c.next_before(None).is_none());
        assert!(c.take_at(&3).is_empty());
    }

    #[test]
    fn test_next_before_is_strict() {
        let mut c = cursor(vec![(1, vec!["a"]), (3, vec!["b"])]);
        let (bound, members) = c.next_before(Some(&3)).unwrap();
        assert_eq!(bound, 1);
        assert!(members.contains(&"a"));
        assert!(c.next_before(Some(&3)).is_none());
        assert_eq!(c.peek(), Some(&3));
        assert_eq!(c.remaining(), 1);
    }

    #[test]
    fn test_take_at_matches_exact_bound_only() {
        let mut c = cursor(vec![(2, vec!["a", "b"]), (5, vec!["c"])]);
        assert!(c.take_at(&1).is_empty());
        assert_eq!(c.take_at(&2).len(), 2);
        assert!(c.take_at(&4).is_empty());
        assert_eq!(c.peek(), Some(&5));
    }

    #[test]
    fn test_unlimited_drains_in_order() {
        let mut c = cursor(vec![(7, vec!["c"]), (1, vec!["a"]), (4, vec!["b"])]);
        let order: Vec<i32> = std::iter::from_fn(|| c.next_before(None))
            .map(|(bound, _)| bound)
            .collect();
        assert_eq!(order, vec![1, 4, 7]);
        assert!(c.is_exhausted());
    }
}
