//! Totally ordered interval bounds with explicit unbounded markers.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One end of an event's span.
///
/// Variant order defines the total order: [`Bound::Before`] sorts below every
/// finite value and [`Bound::After`] sorts above every finite value. Using a
/// dedicated enum keeps "no bound" from colliding with a real value of `B`.
///
/// # Examples
///
/// ```
/// use eventweave::Bound;
///
/// assert!(Bound::Before < Bound::Finite(i64::MIN));
/// assert!(Bound::Finite(i64::MAX) < Bound::After);
/// assert_eq!(Bound::begin(None::<i64>), Bound::Before);
/// assert_eq!(Bound::end(None::<i64>), Bound::After);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bound<B> {
    /// No begin: active since before any recorded bound.
    Before,
    /// A concrete, comparable value.
    Finite(B),
    /// No end: active until after every recorded bound.
    After,
}

impl<B> Bound<B> {
    /// Interprets an optional begin value; `None` means [`Bound::Before`].
    pub fn begin(value: Option<B>) -> Self {
        value.map_or(Bound::Before, Bound::Finite)
    }

    /// Interprets an optional end value; `None` means [`Bound::After`].
    pub fn end(value: Option<B>) -> Self {
        value.map_or(Bound::After, Bound::Finite)
    }

    pub const fn is_finite(&self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    /// Returns the finite value, if any.
    pub fn finite(&self) -> Option<&B> {
        match self {
            Bound::Finite(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_finite(self) -> Option<B> {
        match self {
            Bound::Finite(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Bound<&B> {
        match self {
            Bound::Before => Bound::Before,
            Bound::Finite(value) => Bound::Finite(value),
            Bound::After => Bound::After,
        }
    }
}

impl<B> From<B> for Bound<B> {
    fn from(value: B) -> Self {
        Bound::Finite(value)
    }
}

impl<B: Display> Display for Bound<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Before => write!(f, "-inf"),
            Bound::Finite(value) => write!(f, "{}", value),
            Bound::After => write!(f, "+inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        let mut bounds = vec![
            Bound::After,
            Bound::Finite(3),
            Bound::Before,
            Bound::Finite(-7),
            Bound::Finite(0),
        ];
        bounds.sort();
        assert_eq!(
            bounds,
            vec![
                Bound::Before,
                Bound::Finite(-7),
                Bound::Finite(0),
                Bound::Finite(3),
                Bound::After,
            ]
        );
    }

    #[test]
    fn test_begin_and_end_markers() {
        assert_eq!(Bound::begin(Some(4)), Bound::Finite(4));
        assert_eq!(Bound::begin(None::<i32>), Bound::Before);
        assert_eq!(Bound::end(Some(4)), Bound::Finite(4));
        assert_eq!(Bound::end(None::<i32>), Bound::After);
    }

    #[test]
    fn test_finite_accessors() {
        let bound = Bound::Finite("2023-01-01");
        assert!(bound.is_finite());
        assert_eq!(bound.finite(), Some(&"2023-01-01"));
        assert_eq!(bound.into_finite(), Some("2023-01-01"));
        assert!(!Bound::<u8>::Before.is_finite());
        assert_eq!(Bound::<u8>::After.finite(), None);
    }

    #[test]
    fn test_as_ref_preserves_order() {
        let a = Bound::Finite(String::from("a"));
        let b = Bound::Finite(String::from("b"));
        assert!(a.as_ref() < b.as_ref());
        assert!(Bound::<String>::Before.as_ref() < a.as_ref());
    }

    #[test]
    fn test_display() {
        assert_eq!(Bound::<i32>::Before.to_string(), "-inf");
        assert_eq!(Bound::Finite(12).to_string(), "12");
        assert_eq!(Bound::<i32>::After.to_string(), "+inf");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&Bound::<i32>::Before).unwrap(), "\"before\"");
        assert_eq!(serde_json::to_string(&Bound::Finite(5)).unwrap(), "{\"finite\":5}");
        let restored: Bound<i32> = serde_json::from_str("\"after\"").unwrap();
        assert_eq!(restored, Bound::After);
    }
}
