use super::FormHost;
use crate::collection::{ItemCollection, NamedCollection};
use crate::events::Handlers;
use crate::model::{Attribute, AttributeType, Control, ControlType, Section, Tab};
use std::rc::Rc;

/// A form held entirely in memory.
///
/// Clones share every handle and the form-level registry, so a clone passed
/// to a facade sees the same model the test inspects.
#[derive(Debug, Clone, Default)]
pub struct InMemoryForm {
    attributes: ItemCollection<Attribute>,
    controls: ItemCollection<Control>,
    tabs: ItemCollection<Tab>,
    sections: ItemCollection<Section>,
    form_events: Rc<Handlers>,
}

impl InMemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Adds a writable attribute together with a control of the same name
    /// bound to it, the way the host lays out a plain field.
    pub fn with_field(
        self,
        name: &str,
        attribute_type: AttributeType,
        control_type: ControlType,
    ) -> Self {
        self.with_attribute(Attribute::new(name, attribute_type))
            .with_control(Control::new(name, control_type).bound_to(name))
    }

    /// Adds a tab. Its sections become addressable through
    /// [`FormHost::sections`], so add sections to the tab first.
    pub fn with_tab(mut self, tab: Tab) -> Self {
        for section in tab.sections().iter() {
            self.sections.push(section.clone());
        }
        self.tabs.push(tab);
        self
    }
}

impl FormHost for InMemoryForm {
    fn attributes(&self) -> &dyn NamedCollection<Attribute> {
        &self.attributes
    }

    fn controls(&self) -> &dyn NamedCollection<Control> {
        &self.controls
    }

    fn tabs(&self) -> &dyn NamedCollection<Tab> {
        &self.tabs
    }

    fn sections(&self) -> &dyn NamedCollection<Section> {
        &self.sections
    }

    fn form_events(&self) -> &Handlers {
        &self.form_events
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{AttributeValue, LookupValue, RequiredLevel};
    use uuid::Uuid;

    pub struct FormFixture {
        pub form: InMemoryForm,
    }

    impl Default for FormFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FormFixture {
        pub fn new() -> Self {
            Self {
                form: InMemoryForm::new(),
            }
        }

        /// A contact form: name fields, a read-only full name, an account
        /// lookup, an address section and one control of each special kind.
        pub fn contact() -> Self {
            let account = LookupValue::new(Uuid::new_v4(), "account").with_name("Contoso");
            let form = InMemoryForm::new()
                .with_field("firstname", AttributeType::String, ControlType::Standard)
                .with_field("lastname", AttributeType::String, ControlType::Standard)
                .with_attribute(
                    Attribute::read_only("fullname", AttributeType::String)
                        .with_value("Jane Doe"),
                )
                .with_attribute(
                    Attribute::new("parentcustomerid", AttributeType::Lookup)
                        .with_value(AttributeValue::Lookup(vec![account]))
                        .with_required_level(RequiredLevel::Recommended),
                )
                .with_attribute(Attribute::new("birthdate", AttributeType::DateTime))
                .with_attribute(Attribute::new("line1", AttributeType::String))
                .with_attribute(Attribute::new("city", AttributeType::String))
                .with_control(
                    Control::new("parentcustomerid", ControlType::Lookup)
                        .bound_to("parentcustomerid"),
                )
                .with_control(
                    Control::new("line1", ControlType::Standard)
                        .bound_to("line1")
                        .in_section("address"),
                )
                .with_control(
                    Control::new("city", ControlType::Standard)
                        .bound_to("city")
                        .in_section("address"),
                )
                .with_control(Control::new("contacts", ControlType::Subgrid).in_section("related"))
                .with_control(Control::new("kbsearch", ControlType::KbSearch))
                .with_control(Control::new("map", ControlType::IFrame))
                .with_control(Control::new("rating", ControlType::Custom).bound_to("rating"))
                .with_tab(
                    Tab::new("general")
                        .with_section(Section::new("name"))
                        .with_section(Section::new("address")),
                )
                .with_tab(Tab::new("details").with_section(Section::new("related")));
            Self { form }
        }

        /// Adds `count` plain text fields named `field1..fieldN`.
        pub fn with_fields(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("field{}", i + 1);
                self.form = self
                    .form
                    .with_field(&name, AttributeType::String, ControlType::Standard);
            }
            self
        }

        pub fn with_attribute(mut self, attribute: Attribute) -> Self {
            self.form = self.form.with_attribute(attribute);
            self
        }

        pub fn with_control(mut self, control: Control) -> Self {
            self.form = self.form.with_control(control);
            self
        }

        pub fn with_tab(mut self, tab: Tab) -> Self {
            self.form = self.form.with_tab(tab);
            self
        }
    }
}
