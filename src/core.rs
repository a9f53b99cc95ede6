//! # Core
//!
//! Serde helpers for the flexible value shapes DID documents allow.

use serde::{Deserialize, Serialize};

/// `Kind` allows serde to serialize/deserialize a string or an object.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Kind<T> {
    /// Simple string value
    String(String),

    /// Complex object value
    Object(T),
}

impl<T> Default for Kind<T> {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl<T> Kind<T> {
    /// Returns `true` if the `Kind` is a string.
    pub const fn is_string(&self) -> bool {
        match self {
            Self::String(_) => true,
            Self::Object(_) => false,
        }
    }

    /// Returns `true` if the `Kind` is an object.
    pub const fn is_object(&self) -> bool {
        match self {
            Self::String(_) => false,
            Self::Object(_) => true,
        }
    }
}

impl<T> From<String> for Kind<T> {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T> From<&str> for Kind<T> {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// `OneMany` allows serde to serialize/deserialize a single object or a set of
/// objects.
///
/// Arrays are always read as `Many`, even when `T` could hold an array itself.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneMany<T> {
    /// Set of objects
    Many(Vec<T>),

    /// Single object
    One(T),
}

impl<T: Default> Default for OneMany<T> {
    fn default() -> Self {
        Self::One(T::default())
    }
}

impl<T> OneMany<T> {
    /// Returns `true` if the `OneMany` is a single object.
    pub const fn is_one(&self) -> bool {
        match self {
            Self::One(_) => true,
            Self::Many(_) => false,
        }
    }

    /// Returns `true` if the `OneMany` contains an array of objects.
    pub const fn is_many(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(_) => true,
        }
    }

    /// Returns the length of the `OneMany`.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(many) => many.len(),
        }
    }

    /// Returns `true` if the `OneMany` is an empty `Many`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(many) => many.is_empty(),
        }
    }

    /// Iterate over the contained object(s).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(one) => std::slice::from_ref(one).iter(),
            Self::Many(many) => many.iter(),
        }
    }
}

impl<T: Clone> OneMany<T> {
    /// Adds an object to the `OneMany`. If the `OneMany` is a single object, it is
    /// converted to a set of objects.
    pub fn add(&mut self, item: T) {
        match self {
            Self::One(one) => {
                *self = Self::Many(vec![one.clone(), item]);
            }
            Self::Many(many) => {
                many.push(item);
            }
        }
    }
}

impl<T> From<Vec<T>> for OneMany<T> {
    fn from(value: Vec<T>) -> Self {
        Self::Many(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::*;

    #[test]
    fn one_becomes_many() {
        let mut controller = OneMany::One("did:example:a".to_string());
        assert!(controller.is_one());

        controller.add("did:example:b".to_string());
        assert!(controller.is_many());
        assert_eq!(controller.len(), 2);
        assert_eq!(
            controller.iter().cloned().collect::<Vec<_>>(),
            vec!["did:example:a", "did:example:b"]
        );
    }

    #[test]
    fn empty_many() {
        let many: OneMany<String> = Vec::<String>::new().into();
        assert!(many.is_empty());
        assert_eq!(many.len(), 0);
        assert_eq!(many.iter().count(), 0);
    }

    #[test]
    fn untagged_serde() {
        let one: OneMany<String> = serde_json::from_value(json!("a")).expect("should deserialize");
        assert_eq!(one, OneMany::One("a".to_string()));

        let many: OneMany<String> =
            serde_json::from_value(json!(["a", "b"])).expect("should deserialize");
        assert_eq!(many.len(), 2);
        assert_eq!(serde_json::to_value(&many).expect("should serialize"), json!(["a", "b"]));
    }

    #[test]
    fn arrays_prefer_many() {
        let many: OneMany<Kind<Value>> =
            serde_json::from_value(json!([42, "a"])).expect("should deserialize");
        assert_eq!(many, OneMany::Many(vec![Kind::Object(json!(42)), Kind::String("a".into())]));

        let one: OneMany<Kind<Value>> =
            serde_json::from_value(json!(null)).expect("should deserialize");
        assert_eq!(one, OneMany::One(Kind::Object(Value::Null)));
    }

    #[test]
    fn kind_string_or_object() {
        let kinds: Vec<Kind<Map<String, Value>>> =
            serde_json::from_value(json!(["https://e", {"uri": "https://f"}]))
                .expect("should deserialize");
        assert!(kinds[0].is_string());
        assert!(kinds[1].is_object());
        assert!(Kind::<Value>::default().is_string());
    }
}
