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

//! Rust identifiers for template, type and value names

use crate::CodegenError;

use textfsm::{Template, ValueKind};

use check_keyword::CheckKeyword;
use convert_case::{Boundary, Case, Casing};
use itertools::Itertools;
use std::collections::HashMap;

/// Word boundaries of template and value names. Digits never start a new word, such that
/// `ipv4_address` stays `ipv4_address`.
const BOUNDARIES: [Boundary; 5] = [
    Boundary::Underscore,
    Boundary::Hyphen,
    Boundary::Space,
    Boundary::LowerUpper,
    Boundary::Acronym,
];

/// Keywords which cannot be used as raw identifiers
const NON_RAW_KEYWORDS: [&str; 4] = ["crate", "self", "super", "Self"];

fn convert(name: &str, case: Case) -> String {
    name.with_boundaries(&BOUNDARIES).to_case(case)
}

/// Pascal case type name for a template, usually derived from its file stem:
/// `show_interface` becomes `ShowInterface`.
pub fn type_name(stem: &str) -> Result<String, CodegenError> {
    let name = convert(stem, Case::Pascal);
    check_type_name(&name)?;
    Ok(name)
}

/// Snake case field name for a value: `RoundTripAvg` becomes `round_trip_avg`. Keywords are not
/// escaped; use the result for method names like `get_<field>`.
pub fn field_name(value: &str) -> String {
    convert(value, Case::Snake)
}

/// Name of the constants generated for a type: `ShowInterface` becomes `SHOW_INTERFACE`.
pub(crate) fn const_name(type_name: &str) -> String {
    convert(type_name, Case::UpperSnake)
}

pub(crate) fn check_type_name(name: &str) -> Result<(), CodegenError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
        && !name.to_string().is_keyword();
    if valid {
        Ok(())
    } else {
        Err(CodegenError::InvalidTypeName(name.to_string()))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some('_') => name.len() > 1 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// A value of the template, as a field of the generated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    /// Name of the value in the template
    pub value: String,
    /// Snake case name, used in method names
    pub name: String,
    /// Identifier of the struct field, escaped if `name` is a keyword
    pub ident: String,
    pub kind: ValueKind,
}

/// All fields of the row type, sorted by value name.
pub(crate) fn fields(template: &Template) -> Result<Vec<Field>, CodegenError> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut fields = Vec::with_capacity(template.values().len());

    for value in template.values().iter().sorted_by(|a, b| a.name().cmp(b.name())) {
        let name = field_name(value.name());
        if !is_identifier(&name) {
            return Err(CodegenError::InvalidFieldName {
                template: template.name().to_string(),
                value: value.name().to_string(),
            });
        }
        if let Some(first) = seen.insert(name.clone(), value.name().to_string()) {
            return Err(CodegenError::DuplicateField {
                template: template.name().to_string(),
                field: name,
                first,
                second: value.name().to_string(),
            });
        }

        let ident = if NON_RAW_KEYWORDS.contains(&name.as_str()) {
            format!("{}_", name)
        } else if name.is_keyword() {
            name.clone().into_safe()
        } else {
            name.clone()
        };

        fields.push(Field { value: value.name().to_string(), name, ident, kind: value.kind() });
    }

    Ok(fields)
}
