//! Event spans and their classification.
//!
//! A [`Span`] is the `(begin, end)` pair extracted from an event. Its
//! [`SpanKind`] decides which boundary buckets the event lands in during a
//! sweep. Overlap follows the adjacency rule: two spans of positive length
//! that only touch (one ends where the other begins) do not overlap, while an
//! atomic span overlaps anything that contains its instant, endpoints
//! included.

use std::fmt::Display;

use crate::bound::Bound;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a valid span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpanKind {
    /// Finite `begin < end`.
    Closed,
    /// Finite `begin == end`: a single instant.
    Atomic,
    /// No begin, finite end.
    UnboundedLeft,
    /// Finite begin, no end.
    UnboundedRight,
    /// Neither begin nor end.
    Unbounded,
}

/// The `(begin, end)` pair of an event.
///
/// Construction never fails; validity is checked by [`Span::kind`], which
/// returns `None` for spans whose begin lies after their end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Span<B> {
    begin: Bound<B>,
    end: Bound<B>,
}

impl<B> Span<B> {
    pub const fn new(begin: Bound<B>, end: Bound<B>) -> Self {
        Self { begin, end }
    }

    /// Builds a span from optional values, `None` meaning unbounded on that side.
    pub fn from_options(begin: Option<B>, end: Option<B>) -> Self {
        Self::new(Bound::begin(begin), Bound::end(end))
    }

    /// Span `[begin, end]` with both bounds finite.
    pub const fn closed(begin: B, end: B) -> Self {
        Self::new(Bound::Finite(begin), Bound::Finite(end))
    }

    /// Span active over the whole timeline.
    pub const fn unbounded() -> Self {
        Self::new(Bound::Before, Bound::After)
    }

    pub const fn begin(&self) -> &Bound<B> {
        &self.begin
    }

    pub const fn end(&self) -> &Bound<B> {
        &self.end
    }

    pub fn into_bounds(self) -> (Bound<B>, Bound<B>) {
        (self.begin, self.end)
    }
}

impl<B: Clone> Span<B> {
    /// Atomic span occupying the single instant `at`.
    pub fn at(at: B) -> Self {
        Self::closed(at.clone(), at)
    }
}

impl<B: Ord> Span<B> {
    /// Classifies the span, or returns `None` if it is invalid.
    ///
    /// A span is invalid when a finite begin exceeds a finite end, when its
    /// begin is [`Bound::After`], or when its end is [`Bound::Before`].
    pub fn kind(&self) -> Option<SpanKind> {
        match (&self.begin, &self.end) {
            (Bound::Finite(begin), Bound::Finite(end)) => match begin.cmp(end) {
                std::cmp::Ordering::Less => Some(SpanKind::Closed),
                std::cmp::Ordering::Equal => Some(SpanKind::Atomic),
                std::cmp::Ordering::Greater => None,
            },
            (Bound::Before, Bound::Finite(_)) => Some(SpanKind::UnboundedLeft),
            (Bound::Finite(_), Bound::After) => Some(SpanKind::UnboundedRight),
            (Bound::Before, Bound::After) => Some(SpanKind::Unbounded),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.kind().is_some()
    }

    pub fn is_atomic(&self) -> bool {
        self.kind() == Some(SpanKind::Atomic)
    }

    /// Returns true if `instant` ∈ `[begin, end]`.
    ///
    /// Endpoints are included: an interval is still in effect at the instant
    /// it ends, which is what lets an atomic event at that instant co-occur
    /// with it.
    pub fn contains(&self, instant: &B) -> bool {
        self.contains_bound(Bound::Finite(instant))
    }

    fn contains_bound(&self, bound: Bound<&B>) -> bool {
        self.begin.as_ref() <= bound && bound <= self.end.as_ref()
    }

    /// Checks whether two spans are ever simultaneously active.
    ///
    /// Spans of positive length overlap only if they share more than a single
    /// boundary instant, so `[1, 2]` and `[2, 3]` do not overlap. An atomic
    /// span overlaps every span containing its instant. Invalid spans overlap
    /// nothing.
    pub fn overlaps(&self, other: &Span<B>) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        if self.is_atomic() {
            return other.contains_bound(self.begin.as_ref());
        }
        if other.is_atomic() {
            return self.contains_bound(other.begin.as_ref());
        }
        self.begin < other.end && other.begin < self.end
    }
}

impl<B> From<(Option<B>, Option<B>)> for Span<B> {
    fn from((begin, end): (Option<B>, Option<B>)) -> Self {
        Self::from_options(begin, end)
    }
}

impl<B: Display> Display for Span<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.begin, self.end)
    }
}

// =============================================================================
// Span Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<'de, B> serde::Deserialize<'de> for Span<B>
where
    B: Ord + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw<T> {
            begin: Bound<T>,
            end: Bound<T>,
        }

        let raw = Raw::<B>::deserialize(deserializer)?;
        let span = Self::new(raw.begin, raw.end);
        if !span.is_valid() {
            return Err(serde::de::Error::custom("span begin is after its end"));
        }
        Ok(span)
    }
}
