use super::value::{AttributeType, AttributeValue, RequiredLevel};
use crate::capability::{Capabilities, Capable, CanSetValue, IsField, Narrowed};
use crate::collection::Named;
use crate::events::{Evented, Handlers};
use crate::specifier::{Specifier, Target};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
struct AttributeState {
    value: AttributeValue,
    required_level: RequiredLevel,
    is_dirty: bool,
    writes: usize,
}

struct AttributeInner {
    name: String,
    attribute_type: AttributeType,
    capabilities: Capabilities,
    state: RefCell<AttributeState>,
    handlers: Handlers,
}

/// A handle to a form field.
///
/// Clones share state: a clone handed to a closure sees every write made
/// through any other clone.
#[derive(Clone)]
pub struct Attribute(Rc<AttributeInner>);

impl Attribute {
    /// A writable field with the full attribute capability set.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self::with_capabilities(
            name,
            attribute_type,
            Capabilities::SET_VALUE | Capabilities::SET_REQUIRED_LEVEL | Capabilities::ON_CHANGE,
        )
    }

    /// A calculated or locked field: observable, never written.
    pub fn read_only(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self::with_capabilities(name, attribute_type, Capabilities::ON_CHANGE)
    }

    pub fn with_capabilities(
        name: impl Into<String>,
        attribute_type: AttributeType,
        capabilities: Capabilities,
    ) -> Self {
        Self(Rc::new(AttributeInner {
            name: name.into(),
            attribute_type,
            capabilities,
            state: RefCell::new(AttributeState {
                value: AttributeValue::Null,
                required_level: RequiredLevel::None,
                is_dirty: false,
                writes: 0,
            }),
            handlers: Handlers::new(),
        }))
    }

    /// Seeds the loaded value. Does not count as a write or mark the field
    /// dirty.
    pub fn with_value(self, value: impl Into<AttributeValue>) -> Self {
        self.0.state.borrow_mut().value = value.into();
        self
    }

    pub fn with_required_level(self, level: RequiredLevel) -> Self {
        self.0.state.borrow_mut().required_level = level;
        self
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.0.attribute_type
    }

    pub fn value(&self) -> AttributeValue {
        self.0.state.borrow().value.clone()
    }

    pub fn required_level(&self) -> RequiredLevel {
        self.0.state.borrow().required_level
    }

    pub fn is_dirty(&self) -> bool {
        self.0.state.borrow().is_dirty
    }

    /// Number of value writes the host has accepted.
    pub fn write_count(&self) -> usize {
        self.0.state.borrow().writes
    }

    pub fn same(&self, other: &Attribute) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Named for Attribute {
    fn name(&self) -> &str {
        &self.0.name
    }
}

impl Capable for Attribute {
    fn capabilities(&self) -> Capabilities {
        self.0.capabilities
    }
}

impl Evented for Attribute {
    fn handlers(&self) -> &Handlers {
        &self.0.handlers
    }

    fn source_name(&self) -> &str {
        &self.0.name
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Attribute")
            .field("name", &self.0.name)
            .field("type", &self.0.attribute_type)
            .field("value", &state.value)
            .field("required_level", &state.required_level)
            .finish()
    }
}

impl Narrowed<Attribute, CanSetValue> {
    pub fn set_value(&self, value: AttributeValue) {
        let mut state = self.0.state.borrow_mut();
        state.value = value;
        state.is_dirty = true;
        state.writes += 1;
    }
}

impl Narrowed<Attribute, IsField> {
    pub fn set_required_level(&self, level: RequiredLevel) {
        self.0.state.borrow_mut().required_level = level;
    }
}

impl From<Attribute> for Specifier<Attribute> {
    fn from(attribute: Attribute) -> Self {
        Specifier::Instance(attribute)
    }
}

impl From<Attribute> for Target<Attribute> {
    fn from(attribute: Attribute) -> Self {
        Target::Instance(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{can_set_value, is_field, narrow};

    #[test]
    fn clones_share_state() {
        let a = Attribute::new("firstname", AttributeType::String);
        let b = a.clone();
        narrow::<_, CanSetValue>(&a)
            .unwrap()
            .set_value("John".into());

        assert_eq!(b.value(), AttributeValue::Text("John".into()));
        assert_eq!(b.write_count(), 1);
        assert!(b.is_dirty());
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_value_is_not_a_write() {
        let a = Attribute::new("age", AttributeType::Integer).with_value(42i64);
        assert_eq!(a.value(), AttributeValue::Integer(42));
        assert_eq!(a.write_count(), 0);
        assert!(!a.is_dirty());
    }

    #[test]
    fn read_only_fields_cannot_be_narrowed_for_writes() {
        let a = Attribute::read_only("fullname", AttributeType::String);
        assert!(!can_set_value(&a));
        assert!(!is_field(&a));
        assert!(narrow::<_, CanSetValue>(&a).is_none());
    }

    #[test]
    fn distinct_handles_with_same_name_are_not_equal() {
        let a = Attribute::new("x", AttributeType::String);
        let b = Attribute::new("x", AttributeType::String);
        assert_ne!(a, b);
    }
}
