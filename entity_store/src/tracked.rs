//! Records paired with the set of fields the server actually sent
//!
//! A model struct is always fully initialized, so "this attribute holds its
//! default" and "this attribute came back from the server" are indistinguishable
//! on the struct alone. [`Tracked`] carries that provenance next to the value.
//!
//! Serialization is provenance-aware in both directions: a `Tracked<T>` is written
//! as only its received fields, and read from a JSON object whose keys become the
//! received set. Nested `Tracked` relations therefore keep their own received sets
//! through deserialization and merging.

use crate::traits::Entity;
use serde::de::{DeserializeOwned, Error as DeError};
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::ops::Deref;

/// Attribute names known to be populated from a server reply
pub type FieldSet = BTreeSet<String>;

/// Records with this many received fields or fewer are treated as stubs:
/// identity, maybe a name, and the two audit timestamps.
pub const STUB_FIELD_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracked<T> {
    value: T,
    received: FieldSet,
}

impl<T> Tracked<T> {
    pub fn new<I, S>(value: T, received: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value,
            received: received.into_iter().map(Into::into).collect(),
        }
    }

    /// A record whose only known field is its identity
    pub fn stub(value: T) -> Self {
        Self::new(value, ["id"])
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the value; the received set is left untouched
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn received(&self) -> &FieldSet {
        &self.received
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.received.contains(name)
    }

    /// True only if every name was received
    pub fn has_fields(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.received.contains(*name))
    }

    /// The subset of `names` not yet received
    pub fn missing_fields(&self, names: &[&str]) -> FieldSet {
        names
            .iter()
            .filter(|name| !self.received.contains(**name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Whether a fetch is needed before the record can serve `fields`
    ///
    /// Without a field list the record counts as incomplete while it is no more
    /// than a stub (see [`STUB_FIELD_LIMIT`]).
    pub fn needs_population(&self, fields: Option<&FieldSet>) -> bool {
        match fields {
            Some(fields) => !fields.is_subset(&self.received),
            None => self.received.len() <= STUB_FIELD_LIMIT,
        }
    }
}

impl<T: Entity> Tracked<T> {
    pub fn id(&self) -> &str {
        self.value.id()
    }
}

impl<T: Serialize + DeserializeOwned> Tracked<T> {
    /// Build a record from one object of a server reply
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    pub fn from_map(raw: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let received = raw.keys().cloned().collect();
        let value = serde_json::from_value(Value::Object(raw))?;
        Ok(Self { value, received })
    }

    /// Combine with a newer copy of the same record
    ///
    /// Fields received by `newer` take its values, every other received field
    /// keeps the value from `self`. The result's received set is the union.
    pub fn merged_with(&self, newer: &Self) -> Result<Self, serde_json::Error> {
        let mut combined = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Value::Object(fresh) = serde_json::to_value(newer)? {
            combined.extend(fresh);
        }
        Self::from_map(combined)
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Serialize> Serialize for Tracked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match serde_json::to_value(&self.value).map_err(S::Error::custom)? {
            Value::Object(mut map) => {
                map.retain(|key, _| self.received.contains(key));
                map.serialize(serializer)
            }
            other => other.serialize(serializer),
        }
    }
}

impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for Tracked<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(raw).map_err(D::Error::custom)
    }
}
