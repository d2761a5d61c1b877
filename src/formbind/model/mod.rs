//! # Form Model Handles
//!
//! Typed handles onto the host's live form model:
//!
//! | Handle | Addressed through | Capabilities |
//! |--------|-------------------|--------------|
//! | [`Attribute`] | attributes | value, requirement level, change events |
//! | [`Control`] | controls | visibility, disabled state, per-[`ControlType`] events |
//! | [`Tab`] | tabs | visibility, display state, state-change events |
//! | [`Section`] | sections | visibility |
//!
//! Handles are reference-counted views: cloning one never copies host state,
//! and every clone observes every write. Capability-specific mutators are
//! defined on [`Narrowed`](crate::capability::Narrowed) handles, not here.

mod attribute;
mod control;
mod layout;
mod value;

pub use attribute::Attribute;
pub use control::{Control, ControlType};
pub use layout::{DisplayState, Section, Tab};
pub use value::{AttributeType, AttributeValue, LookupValue, RequiredLevel};
