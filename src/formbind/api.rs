//! # API Facade
//!
//! [`FormApi`] is the single entry point for binding code. Every method is a
//! thin pairing of one engine with one host collection and one mutator:
//!
//! | Family | Engine | Misses |
//! |--------|--------|--------|
//! | `get_*` | [`resolve`] | `Resolution::Nothing` |
//! | `set_*`, `fire_on_change` | [`apply_value`] | skipped silently |
//! | `on_*`, `remove_*` | [`attach_handler`] | reported, then skipped |
//!
//! Every addressing method takes `impl Into<Specifier<_>>`, so a name, an
//! index, a `Vec<&str>`, a predicate or a handle all work:
//!
//! ```
//! use formbind::api::FormApi;
//! use formbind::host::memory::InMemoryForm;
//! use formbind::model::{AttributeType, ControlType, RequiredLevel};
//! use formbind::specifier::Specifier;
//!
//! let form = InMemoryForm::new()
//!     .with_field("firstname", AttributeType::String, ControlType::Standard)
//!     .with_field("lastname", AttributeType::String, ControlType::Standard);
//! let api = FormApi::new(form);
//!
//! api.set_attribute_value("firstname", "John");
//! api.set_required(vec!["firstname", "lastname"]);
//! api.set_disabled(Specifier::predicate(|c: &formbind::model::Control| c.is_visible()), true);
//!
//! let first = api.get_attribute("firstname").into_one().unwrap();
//! assert_eq!(first.required_level(), RequiredLevel::Required);
//! ```
//!
//! ## What the Facade Does NOT Do
//!
//! - **Validation** of business data: only the attribute type is checked,
//!   and only when `strict_value_types` is on.
//! - **Caching**: every call resolves against the live host.
//! - **Firing** host events, except the explicit [`FormApi::fire_on_change`].
//!
//! ## Generic Over FormHost
//!
//! `FormApi<H: FormHost>` works against any host; tests use
//! [`InMemoryForm`](crate::host::memory::InMemoryForm).

use crate::capability::{
    narrow, CanSetDisabled, CanSetValue, CanSetVisible, Capability, Capable, HasOnChange,
    HasOutputChange, IsField, IsGrid, IsIframe, IsKbSearch, IsLookup, IsTab, Narrowed,
};
use crate::collection::{Named, NamedCollection};
use crate::config::BindConfig;
use crate::context::{detect, HostInput};
use crate::dispatch::{apply_value, attach_handler};
use crate::error::Result;
use crate::events::{EventContext, EventKind, Evented, Handler};
use crate::host::FormHost;
use crate::model::{Attribute, AttributeValue, Control, DisplayState, RequiredLevel, Section, Tab};
use crate::report::{NullReporter, Reporter, TracingReporter};
use crate::resolve::{resolve, Resolution};
use crate::specifier::Specifier;
use std::rc::Rc;

/// Generates an `on_*`/`remove_*` pair per item event. Both resolve the
/// specifier the same way, so a removal addresses exactly what the
/// registration did. Each returns the number of items whose handler
/// registry actually changed.
macro_rules! item_events {
    ($($(#[$doc:meta])* $on:ident, $remove:ident: $item:ty, $collection:ident, $cap:ty, $kind:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $on(&self, specifier: impl Into<Specifier<$item>>, handler: &Handler) -> usize {
                self.bind::<$item, $cap>(
                    &specifier.into(),
                    self.host.$collection(),
                    $kind,
                    handler,
                    stringify!($on),
                    Binding::Add,
                )
            }

            pub fn $remove(&self, specifier: impl Into<Specifier<$item>>, handler: &Handler) -> usize {
                self.bind::<$item, $cap>(
                    &specifier.into(),
                    self.host.$collection(),
                    $kind,
                    handler,
                    stringify!($remove),
                    Binding::Remove,
                )
            }
        )*
    };
}

/// The binding facade over one form.
pub struct FormApi<H: FormHost> {
    host: H,
    reporter: Rc<dyn Reporter>,
    config: BindConfig,
    context: Option<EventContext>,
}

impl<H: FormHost> FormApi<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, BindConfig::default())
    }

    pub fn with_config(host: H, config: BindConfig) -> Self {
        Self {
            host,
            reporter: Rc::new(TracingReporter),
            config,
            context: None,
        }
    }

    /// Replaces the sink for unresolved handler targets.
    pub fn with_reporter(mut self, reporter: Rc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Builds a facade from whatever the host passed in. Fails when there is
    /// no form to bind to.
    pub fn from_input(input: Option<HostInput<H>>) -> Result<Self> {
        let (host, context) = detect(input)?;
        let mut api = Self::new(host);
        api.context = context;
        Ok(api)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// The event this facade was entered from, if any.
    pub fn event_context(&self) -> Option<&EventContext> {
        self.context.as_ref()
    }

    // --- Reads ---

    pub fn get_attribute(
        &self,
        specifier: impl Into<Specifier<Attribute>>,
    ) -> Resolution<Attribute> {
        resolve(&specifier.into(), self.host.attributes())
    }

    pub fn get_control(&self, specifier: impl Into<Specifier<Control>>) -> Resolution<Control> {
        resolve(&specifier.into(), self.host.controls())
    }

    pub fn get_tab(&self, specifier: impl Into<Specifier<Tab>>) -> Resolution<Tab> {
        resolve(&specifier.into(), self.host.tabs())
    }

    pub fn get_section(&self, specifier: impl Into<Specifier<Section>>) -> Resolution<Section> {
        resolve(&specifier.into(), self.host.sections())
    }

    /// Current values of the addressed attributes, shaped like the
    /// resolution.
    pub fn get_attribute_value(
        &self,
        specifier: impl Into<Specifier<Attribute>>,
    ) -> Resolution<AttributeValue> {
        self.get_attribute(specifier).map(|a| a.value())
    }

    // --- Writes ---

    /// Writes `value` to every addressed, writable attribute. With
    /// `strict_value_types`, attributes whose type rejects the value are
    /// skipped.
    pub fn set_attribute_value(
        &self,
        specifier: impl Into<Specifier<Attribute>>,
        value: impl Into<AttributeValue>,
    ) -> usize {
        let value = value.into();
        let strict = self.config.strict_value_types;
        let count = apply_value(
            &specifier.into(),
            &value,
            self.host.attributes(),
            |attribute: &Narrowed<Attribute, CanSetValue>, value: &AttributeValue| {
                attribute.set_value(value.clone())
            },
            |attribute: &Attribute| {
                narrow::<Attribute, CanSetValue>(attribute).filter(|writable| {
                    let fits = !strict || writable.attribute_type().accepts(&value);
                    if !fits {
                        tracing::debug!(
                            target: "formbind",
                            attribute = writable.name(),
                            expected = %writable.attribute_type(),
                            "value does not fit attribute type"
                        );
                    }
                    fits
                })
            },
        );
        self.trace("set_attribute_value", count);
        count
    }

    pub fn set_required_level(
        &self,
        specifier: impl Into<Specifier<Attribute>>,
        level: RequiredLevel,
    ) -> usize {
        let count = apply_value(
            &specifier.into(),
            &level,
            self.host.attributes(),
            |field, level| field.set_required_level(*level),
            narrow::<Attribute, IsField>,
        );
        self.trace("set_required_level", count);
        count
    }

    pub fn set_required(&self, specifier: impl Into<Specifier<Attribute>>) -> usize {
        self.set_required_level(specifier, RequiredLevel::Required)
    }

    pub fn set_recommended(&self, specifier: impl Into<Specifier<Attribute>>) -> usize {
        self.set_required_level(specifier, RequiredLevel::Recommended)
    }

    pub fn set_optional(&self, specifier: impl Into<Specifier<Attribute>>) -> usize {
        self.set_required_level(specifier, RequiredLevel::None)
    }

    /// Shows or hides controls.
    pub fn set_visible(&self, specifier: impl Into<Specifier<Control>>, visible: bool) -> usize {
        let count = apply_value(
            &specifier.into(),
            &visible,
            self.host.controls(),
            |control, visible| control.set_visible(*visible),
            narrow::<Control, CanSetVisible>,
        );
        self.trace("set_visible", count);
        count
    }

    pub fn set_tab_visible(&self, specifier: impl Into<Specifier<Tab>>, visible: bool) -> usize {
        let count = apply_value(
            &specifier.into(),
            &visible,
            self.host.tabs(),
            |tab, visible| tab.set_visible(*visible),
            narrow::<Tab, CanSetVisible>,
        );
        self.trace("set_tab_visible", count);
        count
    }

    pub fn set_section_visible(
        &self,
        specifier: impl Into<Specifier<Section>>,
        visible: bool,
    ) -> usize {
        let count = apply_value(
            &specifier.into(),
            &visible,
            self.host.sections(),
            |section, visible| section.set_visible(*visible),
            narrow::<Section, CanSetVisible>,
        );
        self.trace("set_section_visible", count);
        count
    }

    pub fn set_disabled(&self, specifier: impl Into<Specifier<Control>>, disabled: bool) -> usize {
        let count = apply_value(
            &specifier.into(),
            &disabled,
            self.host.controls(),
            |control, disabled| control.set_disabled(*disabled),
            narrow::<Control, CanSetDisabled>,
        );
        self.trace("set_disabled", count);
        count
    }

    /// Expands or collapses tabs. Tabs already in `state` are untouched and
    /// raise no `TabStateChange`.
    pub fn set_tab_display_state(
        &self,
        specifier: impl Into<Specifier<Tab>>,
        state: DisplayState,
    ) -> usize {
        let count = apply_value(
            &specifier.into(),
            &state,
            self.host.tabs(),
            |tab, state| tab.set_display_state(*state),
            narrow::<Tab, IsTab>,
        );
        self.trace("set_tab_display_state", count);
        count
    }

    /// Raises `Change` on the addressed attributes, running their handlers
    /// as if the user had edited them.
    pub fn fire_on_change(&self, specifier: impl Into<Specifier<Attribute>>) -> usize {
        let count = apply_value(
            &specifier.into(),
            &(),
            self.host.attributes(),
            |attribute: &Narrowed<Attribute, HasOnChange>, _| {
                attribute.fire(EventKind::Change);
            },
            narrow::<Attribute, HasOnChange>,
        );
        self.trace("fire_on_change", count);
        count
    }

    // --- Item handlers ---

    item_events! {
        on_change, remove_on_change: Attribute, attributes, HasOnChange, EventKind::Change;
        on_lookup_tag_click, remove_on_lookup_tag_click: Control, controls, IsLookup, EventKind::LookupTagClick;
        /// Runs before a lookup searches; the usual place to add filters.
        on_pre_search, remove_on_pre_search: Control, controls, IsLookup, EventKind::PreSearch;
        on_post_search, remove_on_post_search: Control, controls, IsKbSearch, EventKind::PostSearch;
        on_result_opened, remove_on_result_opened: Control, controls, IsKbSearch, EventKind::ResultOpened;
        on_selection, remove_on_selection: Control, controls, IsKbSearch, EventKind::Selection;
        on_output_change, remove_on_output_change: Control, controls, HasOutputChange, EventKind::OutputChange;
        on_ready_state_complete, remove_on_ready_state_complete: Control, controls, IsIframe, EventKind::ReadyStateComplete;
        on_grid_load, remove_on_grid_load: Control, controls, IsGrid, EventKind::GridLoad;
        on_tab_state_change, remove_on_tab_state_change: Tab, tabs, IsTab, EventKind::TabStateChange;
    }

    // --- Form handlers ---

    pub fn on_load(&self, handler: &Handler) {
        self.host.form_events().add(EventKind::Load, Rc::clone(handler));
    }

    pub fn remove_on_load(&self, handler: &Handler) -> bool {
        self.host.form_events().remove(EventKind::Load, handler)
    }

    pub fn on_save(&self, handler: &Handler) {
        self.host.form_events().add(EventKind::Save, Rc::clone(handler));
    }

    pub fn remove_on_save(&self, handler: &Handler) -> bool {
        self.host.form_events().remove(EventKind::Save, handler)
    }

    pub fn on_data_load(&self, handler: &Handler) {
        self.host.form_events().add(EventKind::DataLoad, Rc::clone(handler));
    }

    pub fn remove_on_data_load(&self, handler: &Handler) -> bool {
        self.host.form_events().remove(EventKind::DataLoad, handler)
    }

    fn bind<T, C>(
        &self,
        specifier: &Specifier<T>,
        collection: &dyn NamedCollection<T>,
        kind: EventKind,
        handler: &Handler,
        operation: &str,
        binding: Binding,
    ) -> usize
    where
        T: Capable + Evented + Clone,
        C: Capability,
    {
        let count = attach_handler(
            specifier,
            collection,
            |item: &Narrowed<T, C>| match binding {
                Binding::Add => item.add_handler(kind, Rc::clone(handler)),
                Binding::Remove => item.remove_handler(kind, handler),
            },
            narrow::<T, C>,
            operation,
            self.sink(),
        );
        self.trace(operation, count);
        count
    }

    fn sink(&self) -> &dyn Reporter {
        if self.config.report_unresolved {
            &*self.reporter
        } else {
            &NullReporter
        }
    }

    fn trace(&self, operation: &str, count: usize) {
        if self.config.trace_dispatch {
            tracing::debug!(target: "formbind", operation, count, "dispatched");
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Binding {
    Add,
    Remove,
}
