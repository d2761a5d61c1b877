//! # Capabilities
//!
//! Host items do not share one interface: a lookup control takes pre-search
//! handlers, a subgrid does not; a tab has a display state, a section does not.
//! Each handle therefore carries a [`Capabilities`] set, fixed when the handle
//! is constructed from its host type, and every operation states the
//! capability it needs.
//!
//! ## Guards and Narrowing
//!
//! A guard answers "does this item support X?". Narrowing goes one step
//! further: [`narrow`] turns a general handle into a [`Narrowed<T, C>`], and
//! capability-specific mutators (`set_visible`, `set_required_level`, ...)
//! are only defined on the narrowed type. Code that holds a
//! `Narrowed<Control, CanSetVisible>` cannot call `set_visible` on something
//! that does not support it.
//!
//! Guards are independent: `is_field` says nothing about `can_set_value`, and
//! absent items (`None`) fail every guard.

use bitflags::bitflags;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

bitflags! {
    /// Operations a host item supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        const SET_VALUE = 1 << 0;
        const SET_REQUIRED_LEVEL = 1 << 1;
        const ON_CHANGE = 1 << 2;
        const SET_VISIBLE = 1 << 3;
        const SET_DISABLED = 1 << 4;
        const LOOKUP_TAG_CLICK = 1 << 5;
        const PRE_SEARCH = 1 << 6;
        const POST_SEARCH = 1 << 7;
        const RESULT_OPENED = 1 << 8;
        const SELECTION = 1 << 9;
        const OUTPUT_CHANGE = 1 << 10;
        const READY_STATE_COMPLETE = 1 << 11;
        const GRID_LOAD = 1 << 12;
        const TAB_STATE_CHANGE = 1 << 13;
        const SET_DISPLAY_STATE = 1 << 14;
    }
}

/// Anything that can report its capability set.
pub trait Capable {
    fn capabilities(&self) -> Capabilities;

    /// True when every flag in `required` is present. An empty requirement
    /// is never satisfied.
    fn supports(&self, required: Capabilities) -> bool {
        !required.is_empty() && self.capabilities().contains(required)
    }
}

impl<T: Capable + ?Sized> Capable for &T {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }
}

impl<T: Capable> Capable for Option<T> {
    fn capabilities(&self) -> Capabilities {
        self.as_ref()
            .map(Capable::capabilities)
            .unwrap_or(Capabilities::empty())
    }
}

/// A named capability requirement, used as a type-level tag.
pub trait Capability {
    const REQUIRES: Capabilities;
    const NAME: &'static str;
}

macro_rules! capability {
    ($(#[$meta:meta])* $marker:ident, $name:literal, $flags:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub enum $marker {}

        impl Capability for $marker {
            const REQUIRES: Capabilities = $flags;
            const NAME: &'static str = $name;
        }
    };
}

capability!(
    /// Can take a new value.
    CanSetValue, "set_value", Capabilities::SET_VALUE
);
capability!(
    /// A form field: has a requirement level.
    IsField, "field", Capabilities::SET_REQUIRED_LEVEL
);
capability!(HasOnChange, "on_change", Capabilities::ON_CHANGE);
capability!(CanSetVisible, "set_visible", Capabilities::SET_VISIBLE);
capability!(CanSetDisabled, "set_disabled", Capabilities::SET_DISABLED);
capability!(
    /// A lookup control: tag clicks and pre-search filtering.
    IsLookup,
    "lookup",
    Capabilities::LOOKUP_TAG_CLICK.union(Capabilities::PRE_SEARCH)
);
capability!(
    /// A knowledge-base search control.
    IsKbSearch,
    "kb_search",
    Capabilities::POST_SEARCH
        .union(Capabilities::RESULT_OPENED)
        .union(Capabilities::SELECTION)
);
capability!(HasOutputChange, "output_change", Capabilities::OUTPUT_CHANGE);
capability!(IsIframe, "iframe", Capabilities::READY_STATE_COMPLETE);
capability!(IsGrid, "grid", Capabilities::GRID_LOAD);
capability!(
    IsTab,
    "tab",
    Capabilities::TAB_STATE_CHANGE.union(Capabilities::SET_DISPLAY_STATE)
);

/// Generic guard: does `item` satisfy capability `C`?
pub fn guard<C: Capability, T: Capable + ?Sized>(item: &T) -> bool {
    item.supports(C::REQUIRES)
}

pub fn can_set_value<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<CanSetValue, T>(item)
}

pub fn is_field<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<IsField, T>(item)
}

pub fn has_on_change<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<HasOnChange, T>(item)
}

pub fn can_set_visible<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<CanSetVisible, T>(item)
}

pub fn can_set_disabled<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<CanSetDisabled, T>(item)
}

pub fn is_lookup<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<IsLookup, T>(item)
}

pub fn is_kb_search<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<IsKbSearch, T>(item)
}

pub fn has_output_change<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<HasOutputChange, T>(item)
}

pub fn is_iframe<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<IsIframe, T>(item)
}

pub fn is_grid<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<IsGrid, T>(item)
}

pub fn is_tab<T: Capable + ?Sized>(item: &T) -> bool {
    guard::<IsTab, T>(item)
}

/// A handle proven to support capability `C`.
pub struct Narrowed<T, C> {
    item: T,
    _capability: PhantomData<fn() -> C>,
}

impl<T, C> Narrowed<T, C> {
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T, C> Deref for Narrowed<T, C> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Clone, C> Clone for Narrowed<T, C> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            _capability: PhantomData,
        }
    }
}

impl<T: fmt::Debug, C: Capability> fmt::Debug for Narrowed<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrowed")
            .field("capability", &C::NAME)
            .field("item", &self.item)
            .finish()
    }
}

/// Narrows `item` to `C`, or `None` when it lacks the capability.
pub fn narrow<T, C>(item: &T) -> Option<Narrowed<T, C>>
where
    T: Capable + Clone,
    C: Capability,
{
    guard::<C, T>(item).then(|| Narrowed {
        item: item.clone(),
        _capability: PhantomData,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Fake(Capabilities);

    impl Capable for Fake {
        fn capabilities(&self) -> Capabilities {
            self.0
        }
    }

    #[test]
    fn guards_test_flags_independently() {
        let field = Fake(Capabilities::SET_REQUIRED_LEVEL);
        assert!(is_field(&field));
        assert!(!can_set_value(&field));

        let writable = Fake(Capabilities::SET_VALUE);
        assert!(can_set_value(&writable));
        assert!(!is_field(&writable));
    }

    #[test]
    fn grouped_capabilities_need_every_flag() {
        let half_lookup = Fake(Capabilities::PRE_SEARCH);
        assert!(!is_lookup(&half_lookup));

        let lookup = Fake(Capabilities::PRE_SEARCH | Capabilities::LOOKUP_TAG_CLICK);
        assert!(is_lookup(&lookup));
    }

    #[test]
    fn absent_items_fail_every_guard() {
        let missing: Option<Fake> = None;
        assert!(!can_set_visible(&missing));
        assert!(!is_tab(&missing));

        let present = Some(Fake(Capabilities::all()));
        assert!(can_set_visible(&present));
        assert!(is_tab(&present));
    }

    #[test]
    fn empty_requirement_is_not_satisfied() {
        let fake = Fake(Capabilities::all());
        assert!(!fake.supports(Capabilities::empty()));
    }

    #[test]
    fn narrow_keeps_the_item() {
        let fake = Fake(Capabilities::SET_VISIBLE);
        let narrowed = narrow::<_, CanSetVisible>(&fake).unwrap();
        assert_eq!(narrowed.0, Capabilities::SET_VISIBLE);
        assert_eq!(narrowed.into_inner().0, Capabilities::SET_VISIBLE);
        assert!(narrow::<_, CanSetDisabled>(&fake).is_none());
    }
}
