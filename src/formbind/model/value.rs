//! Attribute value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A reference to a record, as held by lookup attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupValue {
    pub id: Uuid,
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LookupValue {
    pub fn new(id: Uuid, entity_type: impl Into<String>) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    #[default]
    Null,
    Boolean(bool),
    Text(String),
    Integer(i64),
    Number(f64),
    DateTime(DateTime<Utc>),
    OptionSet(i32),
    MultiOptionSet(Vec<i32>),
    Lookup(Vec<LookupValue>),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of integer and floating values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i64::from(i))
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(dt: DateTime<Utc>) -> Self {
        AttributeValue::DateTime(dt)
    }
}

impl From<LookupValue> for AttributeValue {
    fn from(lookup: LookupValue) -> Self {
        AttributeValue::Lookup(vec![lookup])
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}

/// The host's declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Boolean,
    DateTime,
    Decimal,
    Double,
    Integer,
    Lookup,
    Memo,
    Money,
    MultiSelectOptionSet,
    OptionSet,
    String,
}

impl AttributeType {
    /// Whether a value of this kind may be written to an attribute of this
    /// type. `Null` clears any attribute.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        use AttributeType as Ty;
        use AttributeValue as V;

        match (self, value) {
            (_, V::Null) => true,
            (Ty::Boolean, V::Boolean(_)) => true,
            (Ty::DateTime, V::DateTime(_)) => true,
            (Ty::Decimal | Ty::Double | Ty::Money, V::Number(_) | V::Integer(_)) => true,
            (Ty::Integer, V::Integer(_)) => true,
            (Ty::Lookup, V::Lookup(_)) => true,
            (Ty::Memo | Ty::String, V::Text(_)) => true,
            (Ty::MultiSelectOptionSet, V::MultiOptionSet(_)) => true,
            (Ty::OptionSet, V::OptionSet(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttributeType::Boolean => "boolean",
            AttributeType::DateTime => "datetime",
            AttributeType::Decimal => "decimal",
            AttributeType::Double => "double",
            AttributeType::Integer => "integer",
            AttributeType::Lookup => "lookup",
            AttributeType::Memo => "memo",
            AttributeType::Money => "money",
            AttributeType::MultiSelectOptionSet => "multiselectoptionset",
            AttributeType::OptionSet => "optionset",
            AttributeType::String => "string",
        };
        f.write_str(s)
    }
}

/// How strongly the form asks for a field to be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredLevel {
    #[default]
    None,
    Recommended,
    Required,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fits_every_type() {
        assert!(AttributeType::Lookup.accepts(&AttributeValue::Null));
        assert!(AttributeType::Boolean.accepts(&AttributeValue::Null));
    }

    #[test]
    fn numeric_types_take_integers_and_floats() {
        assert!(AttributeType::Money.accepts(&AttributeValue::Number(9.5)));
        assert!(AttributeType::Decimal.accepts(&AttributeValue::Integer(3)));
        assert!(!AttributeType::Integer.accepts(&AttributeValue::Number(3.5)));
    }

    #[test]
    fn text_does_not_fit_option_sets() {
        assert!(AttributeType::Memo.accepts(&"notes".into()));
        assert!(!AttributeType::OptionSet.accepts(&"1".into()));
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        let none: Option<&str> = None;
        assert_eq!(AttributeValue::from(none), AttributeValue::Null);
        assert_eq!(
            AttributeValue::from(Some("John")),
            AttributeValue::Text("John".into())
        );
    }

    #[test]
    fn bare_integer_literals_become_integers() {
        assert_eq!(AttributeValue::from(42), AttributeValue::Integer(42));
        assert_eq!(AttributeValue::from(-7i64), AttributeValue::Integer(-7));
        assert!(AttributeType::Integer.accepts(&42.into()));
    }

    #[test]
    fn typed_views_match_only_their_variant() {
        let text = AttributeValue::from("John");
        assert_eq!(text.as_text(), Some("John"));
        assert_eq!(text.as_bool(), None);
        assert_eq!(AttributeValue::from(true).as_bool(), Some(true));
        assert_eq!(AttributeValue::from(3).as_f64(), Some(3.0));
        assert_eq!(AttributeValue::from(2.5).as_f64(), Some(2.5));
        assert_eq!(AttributeValue::Null.as_f64(), None);
    }

    #[test]
    fn lookup_values_serialize_with_tag() {
        let id = Uuid::nil();
        let value: AttributeValue = LookupValue::new(id, "account").with_name("Contoso").into();
        let encoded = serde_json::to_value(&value).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "lookup",
                "value": [{
                    "id": "00000000-0000-0000-0000-000000000000",
                    "entity_type": "account",
                    "name": "Contoso"
                }]
            })
        );
    }

    #[test]
    fn null_serializes_as_bare_tag() {
        let encoded = serde_json::to_value(AttributeValue::Null).unwrap();
        assert_eq!(encoded, json!({"type": "null"}));
    }
}
