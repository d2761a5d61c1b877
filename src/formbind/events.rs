//! # Events
//!
//! Host items expose subscription points. Handlers are reference-counted
//! closures so that removal can be by identity: pass the same [`Handler`] to a
//! `remove_*` call that was passed to the matching `on_*` call.
//!
//! Firing is the host's job ([`Evented::fire`]); this crate only registers and
//! removes.

use crate::capability::{Capabilities, Capability, Narrowed};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// A registered event callback.
pub type Handler = Rc<dyn Fn(&EventContext)>;

/// Wraps a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&EventContext) + 'static,
{
    Rc::new(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    LookupTagClick,
    PreSearch,
    PostSearch,
    ResultOpened,
    Selection,
    OutputChange,
    ReadyStateComplete,
    GridLoad,
    TabStateChange,
    Load,
    Save,
    DataLoad,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::Change,
        EventKind::LookupTagClick,
        EventKind::PreSearch,
        EventKind::PostSearch,
        EventKind::ResultOpened,
        EventKind::Selection,
        EventKind::OutputChange,
        EventKind::ReadyStateComplete,
        EventKind::GridLoad,
        EventKind::TabStateChange,
        EventKind::Load,
        EventKind::Save,
        EventKind::DataLoad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Change => "change",
            EventKind::LookupTagClick => "lookup_tag_click",
            EventKind::PreSearch => "pre_search",
            EventKind::PostSearch => "post_search",
            EventKind::ResultOpened => "result_opened",
            EventKind::Selection => "selection",
            EventKind::OutputChange => "output_change",
            EventKind::ReadyStateComplete => "ready_state_complete",
            EventKind::GridLoad => "grid_load",
            EventKind::TabStateChange => "tab_state_change",
            EventKind::Load => "load",
            EventKind::Save => "save",
            EventKind::DataLoad => "data_load",
        }
    }

    /// The item capability a subscription of this kind requires.
    ///
    /// Form-level kinds (`Load`, `Save`, `DataLoad`) are not item events and
    /// require nothing an item could offer.
    pub fn capability(&self) -> Capabilities {
        match self {
            EventKind::Change => Capabilities::ON_CHANGE,
            EventKind::LookupTagClick => Capabilities::LOOKUP_TAG_CLICK,
            EventKind::PreSearch => Capabilities::PRE_SEARCH,
            EventKind::PostSearch => Capabilities::POST_SEARCH,
            EventKind::ResultOpened => Capabilities::RESULT_OPENED,
            EventKind::Selection => Capabilities::SELECTION,
            EventKind::OutputChange => Capabilities::OUTPUT_CHANGE,
            EventKind::ReadyStateComplete => Capabilities::READY_STATE_COMPLETE,
            EventKind::GridLoad => Capabilities::GRID_LOAD,
            EventKind::TabStateChange => Capabilities::TAB_STATE_CHANGE,
            EventKind::Load | EventKind::Save | EventKind::DataLoad => Capabilities::empty(),
        }
    }

    pub fn is_form_level(&self) -> bool {
        self.capability().is_empty()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown event kind: {}", s))
    }
}

/// What a handler receives when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub kind: EventKind,
    /// Name of the item that raised the event; `None` for form-level events.
    pub source: Option<String>,
}

impl EventContext {
    pub fn new(kind: EventKind, source: Option<String>) -> Self {
        Self { kind, source }
    }
}

/// Per-item handler registry.
#[derive(Default)]
pub struct Handlers {
    entries: RefCell<Vec<(EventKind, Handler)>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, kind: EventKind, handler: Handler) {
        self.entries.borrow_mut().push((kind, handler));
    }

    /// Removes every registration of `handler` for `kind`. Returns whether
    /// anything was removed.
    pub fn remove(&self, kind: EventKind, handler: &Handler) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(k, h)| !(*k == kind && Rc::ptr_eq(h, handler)));
        entries.len() != before
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// Calls every handler registered for `ctx.kind`, in registration order.
    ///
    /// The registry is snapshotted first, so a handler may register or remove
    /// handlers without deadlocking the borrow.
    pub fn fire(&self, ctx: &EventContext) -> usize {
        let snapshot: Vec<Handler> = self
            .entries
            .borrow()
            .iter()
            .filter(|(k, _)| *k == ctx.kind)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for h in &snapshot {
            h(ctx);
        }
        snapshot.len()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<EventKind> = self.entries.borrow().iter().map(|(k, _)| *k).collect();
        f.debug_struct("Handlers").field("registered", &kinds).finish()
    }
}

/// Host items that own a handler registry.
pub trait Evented {
    fn handlers(&self) -> &Handlers;

    fn source_name(&self) -> &str;

    /// Raises `kind` on this item. Hosts call this; the binding layer never does
    /// except for an explicit `fire_on_change`.
    fn fire(&self, kind: EventKind) -> usize {
        let ctx = EventContext::new(kind, Some(self.source_name().to_string()));
        self.handlers().fire(&ctx)
    }
}

impl<T: Evented, C: Capability> Narrowed<T, C> {
    /// Registers `handler` when `kind` falls inside capability `C`; other
    /// kinds are refused and `false` is returned.
    pub fn add_handler(&self, kind: EventKind, handler: Handler) -> bool {
        if !within::<C>(kind) {
            return false;
        }
        self.handlers().add(kind, handler);
        true
    }

    pub fn remove_handler(&self, kind: EventKind, handler: &Handler) -> bool {
        within::<C>(kind) && self.handlers().remove(kind, handler)
    }
}

fn within<C: Capability>(kind: EventKind) -> bool {
    !kind.is_form_level() && C::REQUIRES.contains(kind.capability())
}
