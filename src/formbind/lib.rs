//! # Formbind Architecture
//!
//! Formbind is a **typed binding layer over a host form model**. The host
//! owns every field, control, tab and section; formbind addresses them,
//! checks what each one can do, and applies one operation uniformly to
//! however many items a caller named.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - FormApi: get_* / set_* / on_* / remove_*                 │
//! │  - Binds one engine to one collection and one mutator       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine Layer (resolve.rs, dispatch.rs)                     │
//! │  - Specifier → items (read path)                            │
//! │  - Apply a value / attach a handler to every capable item   │
//! │  - Never errors: misses are skipped or reported             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Layer (host/, model/)                                 │
//! │  - FormHost trait: four named collections + form events     │
//! │  - InMemoryForm (in-process hosts and testing)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Specifiers
//!
//! Every addressing method accepts a [`specifier::Specifier`]: a name, a
//! 0-based index, a list of names/indexes/handles, a predicate, or a handle
//! already in hand. `From` conversions cover the common shapes, so
//! `api.set_required("firstname")` and
//! `api.set_required(vec!["firstname", "lastname"])` both read naturally.
//!
//! ## Capabilities
//!
//! Each handle carries a capability set fixed when it was built. Mutators
//! that need a capability live on [`capability::Narrowed`], which can only
//! be obtained through [`capability::narrow`]. Writing a value to a
//! read-only field or disabling a subgrid is therefore not a runtime check
//! scattered through the code, it is a narrowing that fails once.
//!
//! ## Failure Model
//!
//! | Situation | Read | Write | Attach |
//! |-----------|------|-------|--------|
//! | not found | `Nothing` | skipped | reported |
//! | unrecognized input | `Nothing` | skipped | reported |
//! | capability mismatch | returned | skipped | skipped |
//!
//! Only [`context::detect`] and [`config::BindConfig`] I/O return errors.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`specifier`]: Addressing inputs and their dynamic (`serde_json`) form
//! - [`resolve`]: Specifier resolution
//! - [`dispatch`]: Bulk value application and handler attachment
//! - [`capability`]: Capability flags, guards and narrowing
//! - [`collection`]: Named collection abstraction
//! - [`events`]: Event kinds and handler registries
//! - [`host`]: Host abstraction and the in-memory form
//! - [`model`]: Attribute, control, tab and section handles
//! - [`report`]: Sinks for non-fatal binding problems
//! - [`context`]: Host entry-point detection
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod capability;
pub mod collection;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod host;
pub mod model;
pub mod report;
pub mod resolve;
pub mod specifier;
