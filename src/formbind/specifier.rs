//! # Specifiers
//!
//! A [`Specifier`] describes which item(s) of a named collection an operation
//! targets. Every public accessor takes one, so callers can write any of:
//!
//! | Form | Example | Meaning |
//! |------|---------|---------|
//! | `ByName` | `"firstname"` | the item with that name |
//! | `ByIndex` | `0usize` | the item at that 0-based ordinal |
//! | `Many` | `["firstname", "lastname"]` | each element, in order |
//! | `Predicate` | `Specifier::predicate(\|c\| ...)` | every item the host returns for it |
//! | `Instance` | a handle already in hand | that handle, no lookup |
//! | `Absent` | `Specifier::Absent` | nothing requested |
//!
//! `Many` mixes names, indexes and instances freely but does not nest.
//!
//! ## Dynamic Input
//!
//! Specifiers built from JSON ([`Specifier::from_json`]) can carry shapes that
//! fit no variant (objects, booleans, negative or fractional numbers, arrays
//! inside arrays). Those become `Malformed` so the dispatch engines can report
//! them instead of guessing.

use serde_json::Value;
use std::fmt;

/// A boxed item predicate.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// A scalar address into a named collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(n) => write!(f, "\"{}\"", n),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// One element of a `Many` specifier.
pub enum Target<T> {
    Key(Key),
    Instance(T),
    Malformed(String),
}

impl<T> Target<T> {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Target::Key(Key::Name(s.clone())),
            Value::Number(_) => match json_index(value) {
                Some(i) => Target::Key(Key::Index(i)),
                None => Target::Malformed(describe(value)),
            },
            Value::Array(_) => Target::Malformed(format!("nested array {}", value)),
            other => Target::Malformed(describe(other)),
        }
    }
}

impl<T> fmt::Display for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Key(key) => write!(f, "{}", key),
            Target::Instance(_) => write!(f, "<instance>"),
            Target::Malformed(desc) => write!(f, "{}", desc),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Target::Instance(item) => f.debug_tuple("Instance").field(item).finish(),
            Target::Malformed(desc) => f.debug_tuple("Malformed").field(desc).finish(),
        }
    }
}

impl<T> From<Key> for Target<T> {
    fn from(key: Key) -> Self {
        Target::Key(key)
    }
}

impl<T> From<&str> for Target<T> {
    fn from(name: &str) -> Self {
        Target::Key(Key::from(name))
    }
}

impl<T> From<String> for Target<T> {
    fn from(name: String) -> Self {
        Target::Key(Key::Name(name))
    }
}

impl<T> From<usize> for Target<T> {
    fn from(index: usize) -> Self {
        Target::Key(Key::Index(index))
    }
}

/// How a caller addresses one or more items of type `T`.
pub enum Specifier<T> {
    ByIndex(usize),
    ByName(String),
    Many(Vec<Target<T>>),
    Predicate(Predicate<T>),
    Instance(T),
    Absent,
    Malformed(String),
}

impl<T> Specifier<T> {
    pub fn name(name: impl Into<String>) -> Self {
        Specifier::ByName(name.into())
    }

    pub fn index(index: usize) -> Self {
        Specifier::ByIndex(index)
    }

    pub fn many<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Target<T>>,
    {
        Specifier::Many(items.into_iter().map(Into::into).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Specifier::Predicate(Box::new(f))
    }

    pub fn instance(item: T) -> Self {
        Specifier::Instance(item)
    }

    /// Builds a specifier from loosely typed input.
    ///
    /// `null` is `Absent`, strings are names, non-negative integral numbers
    /// are indexes and arrays are `Many`. Anything else is `Malformed`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Specifier::Absent,
            Value::String(s) => Specifier::ByName(s.clone()),
            Value::Number(_) => match json_index(value) {
                Some(i) => Specifier::ByIndex(i),
                None => Specifier::Malformed(describe(value)),
            },
            Value::Array(items) => Specifier::Many(items.iter().map(Target::from_json).collect()),
            other => Specifier::Malformed(describe(other)),
        }
    }

    /// The scalar key, for `ByIndex`/`ByName` only.
    pub fn key(&self) -> Option<Key> {
        match self {
            Specifier::ByIndex(i) => Some(Key::Index(*i)),
            Specifier::ByName(n) => Some(Key::Name(n.clone())),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Specifier::Absent)
    }
}

/// Non-negative integers, including integral floats such as `1.0`.
fn json_index(value: &Value) -> Option<usize> {
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && *f < u64::MAX as f64 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .and_then(|i| usize::try_from(i).ok())
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(_) => format!("array {}", value),
        Value::Object(_) => format!("object {}", value),
    }
}

impl<T> fmt::Display for Specifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::ByIndex(i) => write!(f, "{}", i),
            Specifier::ByName(n) => write!(f, "\"{}\"", n),
            Specifier::Many(items) => {
                let s: Vec<String> = items.iter().map(|t| t.to_string()).collect();
                write!(f, "[{}]", s.join(", "))
            }
            Specifier::Predicate(_) => write!(f, "<predicate>"),
            Specifier::Instance(_) => write!(f, "<instance>"),
            Specifier::Absent => write!(f, "<absent>"),
            Specifier::Malformed(desc) => write!(f, "{}", desc),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Specifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specifier::ByIndex(i) => f.debug_tuple("ByIndex").field(i).finish(),
            Specifier::ByName(n) => f.debug_tuple("ByName").field(n).finish(),
            Specifier::Many(items) => f.debug_tuple("Many").field(items).finish(),
            Specifier::Predicate(_) => f.write_str("Predicate(..)"),
            Specifier::Instance(item) => f.debug_tuple("Instance").field(item).finish(),
            Specifier::Absent => f.write_str("Absent"),
            Specifier::Malformed(desc) => f.debug_tuple("Malformed").field(desc).finish(),
        }
    }
}

impl<T> From<&str> for Specifier<T> {
    fn from(name: &str) -> Self {
        Specifier::ByName(name.to_string())
    }
}

impl<T> From<String> for Specifier<T> {
    fn from(name: String) -> Self {
        Specifier::ByName(name)
    }
}

impl<T> From<usize> for Specifier<T> {
    fn from(index: usize) -> Self {
        Specifier::ByIndex(index)
    }
}

impl<T> From<Key> for Specifier<T> {
    fn from(key: Key) -> Self {
        match key {
            Key::Index(i) => Specifier::ByIndex(i),
            Key::Name(n) => Specifier::ByName(n),
        }
    }
}

impl<T> From<Vec<Target<T>>> for Specifier<T> {
    fn from(items: Vec<Target<T>>) -> Self {
        Specifier::Many(items)
    }
}

impl<T> From<Vec<&str>> for Specifier<T> {
    fn from(names: Vec<&str>) -> Self {
        Specifier::many(names)
    }
}

impl<T, const N: usize> From<[&str; N]> for Specifier<T> {
    fn from(names: [&str; N]) -> Self {
        Specifier::many(names)
    }
}
