//! # Specifier Resolution
//!
//! Turns a [`Specifier`] into concrete items of one named collection. This is
//! the read path: it only queries the collection and never mutates it.
//!
//! | Specifier | Outcome |
//! |-----------|---------|
//! | `Absent` | `Nothing`: no specifier means nothing requested, not everything |
//! | `ByIndex` / `ByName` | `One(item)`, or `Nothing` when the lookup misses |
//! | `Many` | `Many(found)`: misses are dropped silently, input order kept |
//! | `Predicate` | `Many(matches)` in host order, possibly empty |
//! | `Instance` | `One(instance)`: already resolved, the collection is not consulted |
//! | `Malformed` | `Nothing` |
//!
//! A miss is a normal outcome here, never an error. The write and attach
//! paths in [`crate::dispatch`] reuse [`resolve_target`] for their per-element
//! work so all three agree on addressing.

use crate::collection::NamedCollection;
use crate::specifier::{Key, Specifier, Target};
use std::slice;

/// What a specifier resolved to.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resolution<T> {
    #[default]
    Nothing,
    One(T),
    Many(Vec<T>),
}

impl<T> Resolution<T> {
    /// Every resolved item, in resolution order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Resolution::Nothing => Vec::new(),
            Resolution::One(item) => vec![item],
            Resolution::Many(items) => items,
        }
    }

    /// The item of a single-target resolution. `Many` yields `None` even when
    /// it holds exactly one item, since the caller asked for a set.
    pub fn into_one(self) -> Option<T> {
        match self {
            Resolution::One(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Resolution::Nothing => &[],
            Resolution::One(item) => slice::from_ref(item),
            Resolution::Many(items) => items,
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Resolution::Nothing)
    }

    pub fn map<U, F>(self, mut f: F) -> Resolution<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Resolution::Nothing => Resolution::Nothing,
            Resolution::One(item) => Resolution::One(f(item)),
            Resolution::Many(items) => Resolution::Many(items.into_iter().map(f).collect()),
        }
    }
}

/// Looks up a single key.
pub fn resolve_key<T, C>(key: &Key, collection: &C) -> Option<T>
where
    C: NamedCollection<T> + ?Sized,
{
    collection.lookup_one(key)
}

/// Resolves one element of a `Many` specifier.
pub fn resolve_target<T, C>(target: &Target<T>, collection: &C) -> Option<T>
where
    T: Clone,
    C: NamedCollection<T> + ?Sized,
{
    match target {
        Target::Key(key) => resolve_key(key, collection),
        Target::Instance(item) => Some(item.clone()),
        Target::Malformed(_) => None,
    }
}

/// Resolves `specifier` against `collection`.
pub fn resolve<T, C>(specifier: &Specifier<T>, collection: &C) -> Resolution<T>
where
    T: Clone,
    C: NamedCollection<T> + ?Sized,
{
    match specifier {
        Specifier::Absent | Specifier::Malformed(_) => Resolution::Nothing,
        Specifier::ByIndex(i) => single(resolve_key(&Key::Index(*i), collection)),
        Specifier::ByName(name) => single(resolve_key(&Key::Name(name.clone()), collection)),
        Specifier::Many(targets) => Resolution::Many(
            targets
                .iter()
                .filter_map(|target| resolve_target(target, collection))
                .collect(),
        ),
        Specifier::Predicate(predicate) => Resolution::Many(collection.lookup_many(&**predicate)),
        Specifier::Instance(item) => Resolution::One(item.clone()),
    }
}

fn single<T>(found: Option<T>) -> Resolution<T> {
    match found {
        Some(item) => Resolution::One(item),
        None => Resolution::Nothing,
    }
}
