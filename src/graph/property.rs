//! Property value types for graph nodes and relationships

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar property value
///
/// Serializes to the bare JSON scalar (`"Alice"`, `30`, `1.5`, `true`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Self::Integer(i) = *self {
            Some(i)
        } else {
            None
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        if let Self::Float(x) = *self {
            Some(x)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Self::Boolean(b) = *self {
            Some(b)
        } else {
            None
        }
    }

    /// Integer or float, widened to f64
    pub fn as_number(&self) -> Option<f64> {
        self.as_float().or_else(|| self.as_integer().map(|i| i as f64))
    }

    /// Lower-case JSON-ish kind name, used in logs and error text
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }
}

/// Renders the value the way it would appear in a property literal
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Integer(i) => fmt::Display::fmt(i, f),
            Self::Float(x) => fmt::Display::fmt(x, f),
            Self::Boolean(b) => fmt::Display::fmt(b, f),
            Self::Null => f.write_str("null"),
        }
    }
}

macro_rules! property_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )*
    };
}

property_from! {
    String => |v| Self::String(v),
    &str => |v| Self::String(v.to_owned()),
    i64 => |v| Self::Integer(v),
    i32 => |v| Self::Integer(i64::from(v)),
    f64 => |v| Self::Float(v),
    bool => |v| Self::Boolean(v),
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Property map for storing node and relationship properties.
///
/// Keeps insertion order for readable output; equality ignores order.
pub type PropertyMap = IndexMap<String, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_display() {
        let cases = [
            (PropertyValue::from("a \"b\""), "string", r#""a \"b\"""#),
            (PropertyValue::from(42), "integer", "42"),
            (PropertyValue::from(1.5), "float", "1.5"),
            (PropertyValue::from(false), "boolean", "false"),
            (PropertyValue::Null, "null", "null"),
        ];
        for (value, kind, shown) in cases {
            assert_eq!(value.kind(), kind);
            assert_eq!(value.to_string(), shown);
        }
    }

    #[test]
    fn test_accessors() {
        let text = PropertyValue::from(String::from("hello"));
        assert_eq!(text.as_string(), Some("hello"));
        assert_eq!(text.as_integer(), None);

        let whole = PropertyValue::from(7i32);
        assert_eq!(whole.as_integer(), Some(7));
        assert_eq!(whole.as_number(), Some(7.0));
        assert_eq!(whole.as_float(), None);

        let frac = PropertyValue::from(0.25);
        assert_eq!(frac.as_number(), Some(0.25));

        let flag = PropertyValue::from(true);
        assert_eq!(flag.as_boolean(), Some(true));
        assert_eq!(flag.as_number(), None);

        assert!(PropertyValue::from(Option::<i64>::None).is_null());
        assert_eq!(PropertyValue::from(Some("x")), PropertyValue::from("x"));
    }

    #[test]
    fn test_json_shape() {
        let mut props = PropertyMap::new();
        props.insert("name".to_string(), "Alice".into());
        props.insert("age".to_string(), 30i64.into());
        props.insert("score".to_string(), 9.5.into());
        props.insert("active".to_string(), true.into());
        props.insert("nickname".to_string(), PropertyValue::Null);

        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Alice","age":30,"score":9.5,"active":true,"nickname":null}"#
        );

        let back: PropertyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("age"), Some(&PropertyValue::Integer(30)));
        assert_eq!(back.get("score"), Some(&PropertyValue::Float(9.5)));
        assert_eq!(back.get("nickname"), Some(&PropertyValue::Null));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let mut a = PropertyMap::new();
        a.insert("x".to_string(), 1i64.into());
        a.insert("y".to_string(), 2i64.into());

        let mut b = PropertyMap::new();
        b.insert("y".to_string(), 2i64.into());
        b.insert("x".to_string(), 1i64.into());

        assert_eq!(a, b);
    }
}
