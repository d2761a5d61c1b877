//! # Host Abstraction
//!
//! The binding layer never owns form state. It reaches the host's live model
//! through the [`FormHost`] trait, which hands out one [`NamedCollection`] per
//! item kind plus the form-level event registry.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryForm`]: an in-process form assembled with builder
//!   methods. Used by tests and by hosts that mirror their model into Rust.
//!
//! Any other host (an FFI bridge, a recorded form snapshot) only needs to
//! provide the four collections; [`crate::collection::Accessors`] adapts a
//! pair of lookup closures when the host has no collection type of its own.

use crate::collection::NamedCollection;
use crate::events::{EventContext, EventKind, Handlers};
use crate::model::{Attribute, Control, Section, Tab};

pub mod memory;

/// A live form model.
pub trait FormHost {
    fn attributes(&self) -> &dyn NamedCollection<Attribute>;

    fn controls(&self) -> &dyn NamedCollection<Control>;

    fn tabs(&self) -> &dyn NamedCollection<Tab>;

    /// Every section of every tab, in tab order.
    fn sections(&self) -> &dyn NamedCollection<Section>;

    /// Registry for `Load`, `Save` and `DataLoad`.
    fn form_events(&self) -> &Handlers;

    /// Raises a form-level event. Item-level kinds are ignored.
    fn fire_form_event(&self, kind: EventKind) -> usize {
        if !kind.is_form_level() {
            return 0;
        }
        self.form_events().fire(&EventContext::new(kind, None))
    }
}
