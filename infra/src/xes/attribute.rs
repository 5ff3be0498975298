// XES attribute kinds. Every kind embeds an AttributeBase (key + nested meta-attributes)
// and adds its own payload.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBase {
    pub key: String,
    /// meta-attributes nested under this attribute
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl AttributeBase {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: Vec::new(),
        }
    }
}

macro_rules! attribute_common {
    ($name:ident) => {
        impl $name {
            pub fn key(&self) -> &str {
                &self.base.key
            }
            pub fn set_key(&mut self, key: impl Into<String>) {
                self.base.key = key.into();
            }
            pub fn attributes(&self) -> &[Attribute] {
                &self.base.attributes
            }
            pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
                &mut self.base.attributes
            }
        }
    };
}

macro_rules! scalar_attribute {
    ($(#[$meta:meta])* $name:ident, $value_ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            base: AttributeBase,
            value: $value_ty,
        }

        impl $name {
            pub fn new(key: impl Into<String>, value: $value_ty) -> Self {
                Self {
                    base: AttributeBase::new(key),
                    value,
                }
            }
            pub fn set_value(&mut self, value: $value_ty) {
                self.value = value;
            }
        }

        attribute_common!($name);
    };
}

scalar_attribute!(StringAttribute, String);
scalar_attribute!(
    /// timestamp with the offset it was recorded in
    DateAttribute,
    DateTime<FixedOffset>
);
scalar_attribute!(IntAttribute, i64);
scalar_attribute!(
    /// Float-typed attribute. Holds any IEEE-754 double (negative zero, NaN and
    /// infinities included) and returns it unchanged.
    ///
    /// JSON has no NaN or infinity: serde_json writes those values as `null`,
    /// which does not decode back into a float. Use YAML (`.nan`, `.inf`) to
    /// persist logs carrying them.
    FloatAttribute,
    f64
);
scalar_attribute!(BooleanAttribute, bool);
scalar_attribute!(IdAttribute, String);

impl StringAttribute {
    pub fn value(&self) -> &str {
        &self.value
    }
}
impl DateAttribute {
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.value
    }
}
impl IntAttribute {
    pub fn value(&self) -> i64 {
        self.value
    }
}
impl FloatAttribute {
    pub fn value(&self) -> f64 {
        self.value
    }
}
impl BooleanAttribute {
    pub fn value(&self) -> bool {
        self.value
    }
}
impl IdAttribute {
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// ordered collection of values sharing one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAttribute {
    #[serde(flatten)]
    base: AttributeBase,
    #[serde(default)]
    values: Vec<Attribute>,
}

impl ListAttribute {
    pub fn new(key: impl Into<String>, values: Vec<Attribute>) -> Self {
        Self {
            base: AttributeBase::new(key),
            values,
        }
    }
    pub fn values(&self) -> &[Attribute] {
        &self.values
    }
    pub fn set_values(&mut self, values: Vec<Attribute>) {
        self.values = values;
    }
}
attribute_common!(ListAttribute);

/// groups child attributes (kept in `attributes`) without a payload of its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerAttribute {
    #[serde(flatten)]
    base: AttributeBase,
}

impl ContainerAttribute {
    pub fn new(key: impl Into<String>, children: Vec<Attribute>) -> Self {
        Self {
            base: AttributeBase {
                key: key.into(),
                attributes: children,
            },
        }
    }
}
attribute_common!(ContainerAttribute);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum AttributeKind {
    String,
    Date,
    Int,
    Float,
    Boolean,
    Id,
    List,
    Container,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attribute {
    String(StringAttribute),
    Date(DateAttribute),
    Int(IntAttribute),
    Float(FloatAttribute),
    Boolean(BooleanAttribute),
    Id(IdAttribute),
    List(ListAttribute),
    Container(ContainerAttribute),
}

impl Attribute {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute::String(StringAttribute::new(key, value.into()))
    }
    pub fn date(key: impl Into<String>, value: DateTime<FixedOffset>) -> Self {
        Attribute::Date(DateAttribute::new(key, value))
    }
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Attribute::Int(IntAttribute::new(key, value))
    }
    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Attribute::Float(FloatAttribute::new(key, value))
    }
    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Attribute::Boolean(BooleanAttribute::new(key, value))
    }
    pub fn id(key: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute::Id(IdAttribute::new(key, value.into()))
    }

    fn base(&self) -> &AttributeBase {
        match self {
            Attribute::String(a) => &a.base,
            Attribute::Date(a) => &a.base,
            Attribute::Int(a) => &a.base,
            Attribute::Float(a) => &a.base,
            Attribute::Boolean(a) => &a.base,
            Attribute::Id(a) => &a.base,
            Attribute::List(a) => &a.base,
            Attribute::Container(a) => &a.base,
        }
    }

    pub fn key(&self) -> &str {
        &self.base().key
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.base().attributes
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::String(_) => AttributeKind::String,
            Attribute::Date(_) => AttributeKind::Date,
            Attribute::Int(_) => AttributeKind::Int,
            Attribute::Float(_) => AttributeKind::Float,
            Attribute::Boolean(_) => AttributeKind::Boolean,
            Attribute::Id(_) => AttributeKind::Id,
            Attribute::List(_) => AttributeKind::List,
            Attribute::Container(_) => AttributeKind::Container,
        }
    }

    /// string payload of string and id attributes
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::String(a) => Some(a.value()),
            Attribute::Id(a) => Some(a.value()),
            _ => None,
        }
    }
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Attribute::Float(a) => Some(a.value()),
            _ => None,
        }
    }
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Attribute::Int(a) => Some(a.value()),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Attribute::Boolean(a) => Some(a.value()),
            _ => None,
        }
    }
    pub fn as_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Attribute::Date(a) => Some(a.value()),
            _ => None,
        }
    }
}

/// first attribute with the given key
pub fn find_attribute<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|a| a.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_float_value() {
        let mut attr = FloatAttribute::new("cost:total", 0.0);
        attr.set_value(3.14);
        assert_eq!(attr.value(), 3.14);
        assert_eq!(attr.key(), "cost:total");
    }

    #[test]
    fn test_float_value_is_bit_exact() {
        let mut attr = FloatAttribute::new("x", 1.0);
        for v in [
            0.0,
            -0.0,
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::MIN_POSITIVE,
        ] {
            attr.set_value(v);
            assert_eq!(attr.value().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_non_finite_float_json_is_null() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let json = serde_json::to_string(&Attribute::float("x", v)).unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["value"], serde_json::Value::Null);
            assert!(serde_json::from_str::<Attribute>(&json).is_err());
        }
    }

    #[test]
    fn test_non_finite_float_yaml_keeps_value() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let yaml = serde_yaml::to_string(&Attribute::float("x", v)).unwrap();
            let restored: Attribute = serde_yaml::from_str(&yaml).unwrap();
            let restored = restored.as_float().unwrap();
            if v.is_nan() {
                assert!(restored.is_nan());
            } else {
                assert_eq!(restored, v);
            }
        }
    }

    #[test]
    fn test_shared_base_fields() {
        let mut attr = IntAttribute::new("count", 1);
        attr.set_key("amount");
        attr.attributes_mut()
            .push(Attribute::string("unit", "pieces"));
        assert_eq!(attr.key(), "amount");
        assert_eq!(attr.attributes().len(), 1);

        let attr = Attribute::Int(attr);
        assert_eq!(attr.key(), "amount");
        assert_eq!(attr.kind(), AttributeKind::Int);
        assert_eq!(
            find_attribute(attr.attributes(), "unit").and_then(Attribute::as_str),
            Some("pieces")
        );
    }

    #[test]
    fn test_typed_views() {
        let date = DateTime::parse_from_rfc3339("2024-01-02T03:04:05+09:00").unwrap();
        assert_eq!(Attribute::float("f", 1.5).as_float(), Some(1.5));
        assert_eq!(Attribute::int("i", -3).as_int(), Some(-3));
        assert_eq!(Attribute::boolean("b", true).as_bool(), Some(true));
        assert_eq!(Attribute::date("d", date).as_date(), Some(date));
        assert_eq!(Attribute::id("id", "42").as_str(), Some("42"));
        assert_eq!(Attribute::string("s", "x").as_float(), None);
        assert_eq!(Attribute::float("f", 1.5).as_str(), None);
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(AttributeKind::Boolean.to_string(), "boolean");
        assert_eq!(
            AttributeKind::from_str("container").unwrap(),
            AttributeKind::Container
        );
    }

    #[test]
    fn test_json_shape() {
        let mut float = FloatAttribute::new("cost", 2.5);
        float
            .attributes_mut()
            .push(Attribute::string("currency", "EUR"));
        let json = serde_json::to_value(Attribute::Float(float.clone())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "float",
                "key": "cost",
                "value": 2.5,
                "attributes": [{"type": "string", "key": "currency", "value": "EUR"}]
            })
        );
        let restored: Attribute = serde_json::from_value(json).unwrap();
        assert_eq!(restored, Attribute::Float(float));
    }

    #[test]
    fn test_decode_nested_list_and_container() {
        let yaml = r#"
type: container
key: address
attributes:
  - type: string
    key: city
    value: Eindhoven
  - type: list
    key: phones
    values:
      - type: string
        key: phone
        value: "123"
      - type: int
        key: ext
        value: 7
"#;
        let attr: Attribute = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(attr.kind(), AttributeKind::Container);
        assert_eq!(attr.attributes().len(), 2);
        let Some(Attribute::List(list)) = find_attribute(attr.attributes(), "phones") else {
            panic!("list attribute expected");
        };
        assert_eq!(list.values().len(), 2);
        assert_eq!(list.values()[1].as_int(), Some(7));
    }

    #[test]
    fn test_decode_integer_literal_as_float() {
        let attr: Attribute =
            serde_json::from_str(r#"{"type":"float","key":"k","value":3}"#).unwrap();
        assert_eq!(attr.as_float(), Some(3.0));
    }
}
