//! Immutable snapshots of the active set.
//!
//! [`ActiveSet`] shares its storage through an [`Arc`], so handing out a
//! snapshot costs a reference-count bump. The sweep mutates its running set
//! with [`Arc::make_mut`], which copies only while a snapshot of the current
//! state is still alive; an emitted set therefore never changes afterwards.

use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;

/// A set of events that are simultaneously in effect.
///
/// Read access is transparent via `Deref<Target = HashSet<E>>`. There is no
/// mutable access.
#[derive(Debug, Clone)]
pub struct ActiveSet<E>(Arc<HashSet<E>>);

impl<E> ActiveSet<E> {
    pub(crate) fn from_shared(members: Arc<HashSet<E>>) -> Self {
        Self(members)
    }

    /// Returns true if both snapshots share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<E: Clone> ActiveSet<E> {
    /// Returns the members as an owned set, cloning only if the storage is shared.
    pub fn into_inner(self) -> HashSet<E> {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<E> Deref for ActiveSet<E> {
    type Target = HashSet<E>;

    fn deref(&self) -> &HashSet<E> {
        &self.0
    }
}

impl<E> AsRef<HashSet<E>> for ActiveSet<E> {
    fn as_ref(&self) -> &HashSet<E> {
        &self.0
    }
}

impl<E: Hash + Eq> PartialEq for ActiveSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl<E: Hash + Eq> Eq for ActiveSet<E> {}

/// Enables `assert_eq!(active_set, hash_set)` in tests.
impl<E: Hash + Eq> PartialEq<HashSet<E>> for ActiveSet<E> {
    fn eq(&self, other: &HashSet<E>) -> bool {
        *self.0 == *other
    }
}

/// Enables `assert_eq!(hash_set, active_set)` in tests.
impl<E: Hash + Eq> PartialEq<ActiveSet<E>> for HashSet<E> {
    fn eq(&self, other: &ActiveSet<E>) -> bool {
        *self == *other.0
    }
}

impl<E> From<HashSet<E>> for ActiveSet<E> {
    fn from(members: HashSet<E>) -> Self {
        Self(Arc::new(members))
    }
}

impl<E: Hash + Eq> FromIterator<E> for ActiveSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashSet<E>>())
    }
}

impl<'a, E> IntoIterator for &'a ActiveSet<E> {
    type Item = &'a E;
    type IntoIter = std::collections::hash_set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<E: serde::Serialize> serde::Serialize for ActiveSet<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, E> serde::Deserialize<'de> for ActiveSet<E>
where
    E: serde::Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let members = HashSet::<E>::deserialize(deserializer)?;
        Ok(Self::from(members))
    }
}
