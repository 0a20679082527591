//! Named-field records
//!
//! [`Record`] is the record kind of keyed container: a set of named
//! fields whose values are mutable. A *sealed* record fixes its field set
//! at construction; an *open* record additionally permits dynamic field
//! creation, like the open objects of the host language. Declared fields
//! start out holding [`Value::Null`], which is distinct from the field
//! not existing at all.

use crate::value::Value;
use indexmap::IndexMap;

/// A named-field record with a sealed or open field set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
    open: bool,
}

impl Record {
    /// Create a sealed record declaring the given fields, all null.
    ///
    /// Assignments to undeclared fields are refused.
    pub fn sealed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names
                .into_iter()
                .map(|name| (name.into(), Value::Null))
                .collect(),
            open: false,
        }
    }

    /// Create an empty open record that permits dynamic field creation
    pub fn open() -> Self {
        Self {
            fields: IndexMap::new(),
            open: true,
        }
    }

    /// Check whether this record permits dynamic field creation
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Get the number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Check whether a field is declared, even if its value is null
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get the value of a field, if declared
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a mutable reference to a declared field's value
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Assign a field.
    ///
    /// Declared fields are always assignable; undeclared fields are
    /// created only on open records. Returns whether the assignment took
    /// effect.
    pub fn set_field(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value;
            true
        } else if self.open {
            self.fields.insert(name.to_string(), value);
            true
        } else {
            false
        }
    }

    /// Get a mutable handle to a field's slot, inserting `default` first
    /// if the field is undeclared and the record is open.
    ///
    /// Returns `None` when a sealed record refuses the insertion.
    pub fn get_field_or_insert(&mut self, name: &str, default: Value) -> Option<&mut Value> {
        if self.fields.contains_key(name) {
            return self.fields.get_mut(name);
        }
        if !self.open {
            return None;
        }
        Some(self.fields.entry(name.to_string()).or_insert(default))
    }

    /// Remove a field from an open record.
    ///
    /// Sealed records keep their field set; removal returns `None`.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        if self.open {
            self.fields.shift_remove(name)
        } else {
            None
        }
    }

    /// Iterate over fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
