//! # Named Collections
//!
//! The host exposes its attributes, controls, tabs and sections as addressable
//! collections. The engines only ever need two queries from them:
//!
//! - `lookup_one(key)`: the item at a 0-based index or with a given name.
//! - `lookup_many(predicate)`: every item the predicate accepts, in host order.
//!
//! [`ItemCollection`] is a ready-made implementation over a `Vec`, and
//! [`Accessors`] adapts a pair of closures for hosts that already have their
//! own lookup functions.

use crate::specifier::Key;

/// Items addressable by name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Host-provided addressable set of items.
///
/// Items are returned as owned handles; for host items these are cheap
/// reference-counted clones into the live form model.
pub trait NamedCollection<T> {
    fn lookup_one(&self, key: &Key) -> Option<T>;

    /// Never fails: no match is an empty `Vec`.
    fn lookup_many(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T>;
}

#[derive(Debug, Clone)]
pub struct ItemCollection<T> {
    items: Vec<T>,
}

impl<T> Default for ItemCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Named + Clone> ItemCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item; a later item with a duplicate name is shadowed by the
    /// earlier one for name lookups but still reachable by index.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(Named::name).collect()
    }
}

impl<T: Named + Clone> FromIterator<T> for ItemCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Named + Clone> NamedCollection<T> for ItemCollection<T> {
    fn lookup_one(&self, key: &Key) -> Option<T> {
        match key {
            Key::Index(i) => self.items.get(*i).cloned(),
            Key::Name(name) => self.items.iter().find(|item| item.name() == name).cloned(),
        }
    }

    fn lookup_many(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

/// A [`NamedCollection`] built from a single-lookup and a predicate-lookup
/// closure.
pub struct Accessors<G, M> {
    one: G,
    many: M,
}

impl<G, M> Accessors<G, M> {
    pub fn new(one: G, many: M) -> Self {
        Self { one, many }
    }
}

impl<T, G, M> NamedCollection<T> for Accessors<G, M>
where
    G: Fn(&Key) -> Option<T>,
    M: Fn(&dyn Fn(&T) -> bool) -> Vec<T>,
{
    fn lookup_one(&self, key: &Key) -> Option<T> {
        (self.one)(key)
    }

    fn lookup_many(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        (self.many)(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str);

    impl Named for Item {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn sample() -> ItemCollection<Item> {
        [Item("a"), Item("b"), Item("c")].into_iter().collect()
    }

    #[test]
    fn lookup_by_index_is_zero_based() {
        let items = sample();
        assert_eq!(items.lookup_one(&Key::Index(0)), Some(Item("a")));
        assert_eq!(items.lookup_one(&Key::Index(3)), None);
    }

    #[test]
    fn lookup_by_name() {
        let items = sample();
        assert_eq!(items.lookup_one(&Key::from("b")), Some(Item("b")));
        assert_eq!(items.lookup_one(&Key::from("z")), None);
    }

    #[test]
    fn lookup_many_keeps_host_order_and_never_fails() {
        let items = sample();
        let found = items.lookup_many(&|i: &Item| i.0 != "b");
        assert_eq!(found, vec![Item("a"), Item("c")]);
        assert!(items.lookup_many(&|_: &Item| false).is_empty());
    }

    #[test]
    fn accessors_forward_to_closures() {
        let items = sample();
        let accessors = Accessors::new(
            |key: &Key| items.lookup_one(key),
            |p: &dyn Fn(&Item) -> bool| items.lookup_many(p),
        );
        assert_eq!(accessors.lookup_one(&Key::from("c")), Some(Item("c")));
        assert_eq!(accessors.lookup_many(&|_: &Item| true).len(), 3);
    }
}
