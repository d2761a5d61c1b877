//! # Bulk Dispatch
//!
//! Two engines apply an operation to everything a [`Specifier`] resolves to:
//!
//! - [`apply_value`]: the write path (values, requirement levels, visibility,
//!   disabled state).
//! - [`attach_handler`]: the event path (registering and removing handlers).
//!
//! Both resolve elements exactly like [`crate::resolve`], then narrow each item
//! through a capability guard before touching it. Items that fail the guard
//! are skipped without comment: a heterogeneous `Many` may legitimately name
//! items the current operation does not apply to.
//!
//! ## Reporting Policy
//!
//! | Situation | `apply_value` | `attach_handler` |
//! |-----------|---------------|------------------|
//! | name/index not found | skip | report, continue |
//! | malformed specifier | skip | report, continue |
//! | `Absent` | no-op | report |
//! | predicate matches nothing | no-op | no-op |
//! | capability mismatch | skip | skip |
//!
//! Neither engine returns an error: a single failed binding must not abort
//! the wiring of a whole form. Both return how many items were touched.

use crate::collection::NamedCollection;
use crate::report::Reporter;
use crate::resolve::{resolve_key, resolve_target};
use crate::specifier::{Key, Specifier, Target};
use serde_json::{json, Value};

/// Applies `value` to every capable item `specifier` resolves to.
///
/// A scalar specifier that misses applies nothing. `Instance` inputs are
/// narrowed and applied directly, without consulting `collection`.
pub fn apply_value<T, N, V, C, A, G>(
    specifier: &Specifier<T>,
    value: &V,
    collection: &C,
    apply: A,
    narrow: G,
) -> usize
where
    T: Clone,
    C: NamedCollection<T> + ?Sized,
    A: Fn(&N, &V),
    G: Fn(&T) -> Option<N>,
{
    let apply_item = |item: &T| match narrow(item) {
        Some(capable) => {
            apply(&capable, value);
            1
        }
        None => 0,
    };

    match specifier {
        Specifier::Absent => 0,
        Specifier::Malformed(desc) => {
            tracing::debug!(target: "formbind", specifier = %desc, "skipping malformed specifier");
            0
        }
        Specifier::ByIndex(i) => resolve_key(&Key::Index(*i), collection)
            .map(|item| apply_item(&item))
            .unwrap_or(0),
        Specifier::ByName(name) => resolve_key(&Key::Name(name.clone()), collection)
            .map(|item| apply_item(&item))
            .unwrap_or(0),
        Specifier::Many(targets) => targets
            .iter()
            .map(|target| {
                if let Target::Malformed(desc) = target {
                    tracing::debug!(
                        target: "formbind",
                        element = %desc,
                        "skipping malformed element"
                    );
                }
                resolve_target(target, collection)
                    .map(|item| apply_item(&item))
                    .unwrap_or(0)
            })
            .sum(),
        Specifier::Predicate(predicate) => collection
            .lookup_many(&**predicate)
            .iter()
            .map(&apply_item)
            .sum(),
        Specifier::Instance(item) => apply_item(item),
    }
}

/// Attaches (or, with a removing `attach`, detaches) a handler on every
/// capable item `specifier` resolves to.
///
/// `attach` returns whether it changed the item's registry; only those
/// items are counted. Every name or index that resolves to nothing, every
/// malformed input and an `Absent` specifier are reported to `reporter` with
/// `operation` in the message. An empty predicate match is not a failure.
pub fn attach_handler<T, N, C, A, G>(
    specifier: &Specifier<T>,
    collection: &C,
    attach: A,
    narrow: G,
    operation: &str,
    reporter: &dyn Reporter,
) -> usize
where
    T: Clone,
    C: NamedCollection<T> + ?Sized,
    A: Fn(&N) -> bool,
    G: Fn(&T) -> Option<N>,
{
    let attach_item = |item: &T| match narrow(item) {
        Some(capable) => usize::from(attach(&capable)),
        None => 0,
    };

    let attach_key = |key: &Key| match resolve_key(key, collection) {
        Some(item) => attach_item(&item),
        None => {
            report_missing(reporter, operation, key);
            0
        }
    };

    match specifier {
        Specifier::Absent => {
            reporter.report(
                &format!("{}: no target specified", operation),
                Some(&json!({ "operation": operation, "specifier": Value::Null })),
            );
            0
        }
        Specifier::Malformed(desc) => {
            report_malformed(reporter, operation, desc);
            0
        }
        Specifier::ByIndex(i) => attach_key(&Key::Index(*i)),
        Specifier::ByName(name) => attach_key(&Key::Name(name.clone())),
        Specifier::Many(targets) => targets
            .iter()
            .map(|target| match target {
                Target::Key(key) => attach_key(key),
                Target::Instance(item) => attach_item(item),
                Target::Malformed(desc) => {
                    report_malformed(reporter, operation, desc);
                    0
                }
            })
            .sum(),
        Specifier::Predicate(predicate) => collection
            .lookup_many(&**predicate)
            .iter()
            .map(&attach_item)
            .sum(),
        Specifier::Instance(item) => attach_item(item),
    }
}

fn key_json(key: &Key) -> Value {
    match key {
        Key::Index(i) => json!(i),
        Key::Name(n) => json!(n),
    }
}

fn report_missing(reporter: &dyn Reporter, operation: &str, key: &Key) {
    reporter.report(
        &format!("{}: no item found for {}", operation, key),
        Some(&json!({ "operation": operation, "specifier": key_json(key) })),
    );
}

fn report_malformed(reporter: &dyn Reporter, operation: &str, desc: &str) {
    reporter.report(
        &format!("{}: unrecognized specifier {}", operation, desc),
        Some(&json!({ "operation": operation, "specifier": desc })),
    );
}
