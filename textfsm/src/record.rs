// TextFSM: Template-driven parsing of network device CLI output
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Records
//!
//! A [`Record`] is one row of the parser output: a map from value name to the text captured for
//! this value. While the state machine runs, the record in progress is kept in a
//! [`RecordBuilder`], which knows about the options of each value:
//!
//! - *scalar* values are overwritten by every new match (last match wins),
//! - `List` values append every match, in input order,
//! - `Filldown` values are carried over into the next record,
//! - `Required` values must be non-empty for the record to be emitted.

use crate::template::{ValueDefinition, ValueOption};
use crate::Error;

#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::iter::FromIterator;

/// Type of a value, as stored in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single string
    Scalar,
    /// An ordered sequence of strings (values with the `List` option)
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Scalar => write!(f, "string"),
            ValueKind::List => write!(f, "list of strings"),
        }
    }
}

/// Content of a single value in a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum Value {
    /// Scalar value
    Scalar(String),
    /// List value
    List(Vec<String>),
}

impl Value {
    /// Create an empty value of the given kind.
    pub fn empty(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Scalar => Value::Scalar(String::new()),
            ValueKind::List => Value::List(Vec::new()),
        }
    }

    /// Returns the kind of the value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Returns `true` if nothing was captured for this value.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Scalar(s) => s.is_empty(),
            Value::List(l) => l.is_empty(),
        }
    }

    /// Returns the string, if this is a scalar value.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// Returns the sequence, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Scalar(_) => None,
            Value::List(l) => Some(l),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Value::List(l)
    }
}

impl From<Vec<&str>> for Value {
    fn from(l: Vec<&str>) -> Self {
        Value::List(l.into_iter().map(String::from).collect())
    }
}

/// A finalized record, mapping each value name to its content. Iteration is ordered by value
/// name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct Record {
    values: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous content if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Get the content of a value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get the mutable content of a value
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Get a scalar value. Fails with [`Error::MarshalType`] if the value is missing or is a list.
    pub fn scalar(&self, name: &str) -> Result<&str, Error> {
        match self.values.get(name) {
            Some(Value::Scalar(s)) => Ok(s),
            other => Err(Error::MarshalType {
                value: name.to_string(),
                expected: ValueKind::Scalar,
                found: other.map(Value::kind),
            }),
        }
    }

    /// Get a list value. Fails with [`Error::MarshalType`] if the value is missing or is a scalar.
    pub fn list(&self, name: &str) -> Result<&[String], Error> {
        match self.values.get(name) {
            Some(Value::List(l)) => Ok(l),
            other => Err(Error::MarshalType {
                value: name.to_string(),
                expected: ValueKind::List,
                found: other.map(Value::kind),
            }),
        }
    }

    /// Number of values stored in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record contains no values at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all values, ordered by name
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Record in progress.
///
/// The builder holds one slot per declared value, in declaration order. It borrows the value
/// definitions of the template, so it never outlives the template it was created for.
#[derive(Debug, Clone)]
pub struct RecordBuilder<'t> {
    defs: &'t [ValueDefinition],
    values: Vec<Value>,
}

impl<'t> RecordBuilder<'t> {
    /// Create a new, empty record. Values with the `Filldown` option are initialized from
    /// `carry` (usually the second element returned by [`RecordBuilder::finalize`]).
    pub fn new(defs: &'t [ValueDefinition], carry: Option<&Record>) -> Self {
        let values = defs
            .iter()
            .map(|def| match carry.and_then(|c| c.get(def.name())) {
                Some(v) if def.has(ValueOption::Filldown) && v.kind() == def.kind() => v.clone(),
                _ => Value::empty(def.kind()),
            })
            .collect();
        Self { defs, values }
    }

    /// Assign captured text to the value called `name`. List values append, all other values are
    /// overwritten. Returns `false` if no value with this name is declared.
    pub fn set(&mut self, name: &str, text: &str) -> bool {
        match self.defs.iter().position(|d| d.name() == name) {
            Some(idx) => {
                self.set_index(idx, text);
                true
            }
            None => false,
        }
    }

    /// Assign captured text to the value at position `idx` (declaration order).
    pub(crate) fn set_index(&mut self, idx: usize, text: &str) {
        match &mut self.values[idx] {
            Value::List(l) => l.push(text.to_string()),
            Value::Scalar(s) => {
                s.clear();
                s.push_str(text);
            }
        }
    }

    /// Get the current content of a value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.defs.iter().position(|d| d.name() == name).map(|idx| &self.values[idx])
    }

    /// Returns the name of the first `Required` value which is still empty, if any.
    pub fn missing_required(&self) -> Option<&'t str> {
        self.defs
            .iter()
            .zip(self.values.iter())
            .find(|(d, v)| d.has(ValueOption::Required) && v.is_empty())
            .map(|(d, _)| d.name())
    }

    /// Reset all values except the ones with the `Filldown` option.
    pub fn clear(&mut self) {
        for (def, value) in self.defs.iter().zip(self.values.iter_mut()) {
            if !def.has(ValueOption::Filldown) {
                *value = Value::empty(def.kind());
            }
        }
    }

    /// Reset all values, including `Filldown` values.
    pub fn clear_all(&mut self) {
        for (def, value) in self.defs.iter().zip(self.values.iter_mut()) {
            *value = Value::empty(def.kind());
        }
    }

    /// Finalize the record. Returns the record itself, and the subset of `Filldown` values, which
    /// must be carried into the next record.
    pub fn finalize(self) -> (Record, Record) {
        let mut carry = Record::new();
        let mut record = Record::new();
        for (def, value) in self.defs.iter().zip(self.values.into_iter()) {
            if def.has(ValueOption::Filldown) {
                carry.insert(def.name(), value.clone());
            }
            record.insert(def.name(), value);
        }
        (record, carry)
    }
}
