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

//! Value declarations (`Value [Options] NAME (regex)`)

use crate::record::ValueKind;

use itertools::Itertools;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Option of a value declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueOption {
    /// Keep the value for the following records, until it is overwritten.
    Filldown,
    /// Write the value backwards into the previous records in which it is empty.
    Fillup,
    /// Informational only: the value is part of the record key.
    Key,
    /// Append every match instead of overwriting.
    List,
    /// Only emit records in which this value is non-empty.
    Required,
}

impl FromStr for ValueOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Filldown" => Ok(ValueOption::Filldown),
            "Fillup" => Ok(ValueOption::Fillup),
            "Key" => Ok(ValueOption::Key),
            "List" => Ok(ValueOption::List),
            "Required" => Ok(ValueOption::Required),
            _ => Err(format!("Unknown value option: {:?}", s)),
        }
    }
}

impl fmt::Display for ValueOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A declared value.
#[derive(Debug, Clone)]
pub struct ValueDefinition {
    name: String,
    pattern: String,
    options: BTreeSet<ValueOption>,
}

impl ValueDefinition {
    /// Parse a `Value` line of the template. On error, a message describing the problem is
    /// returned, which is turned into a syntax error by the caller.
    pub(crate) fn parse(line: &str) -> Result<Self, String> {
        let rest = line
            .trim()
            .strip_prefix("Value")
            .filter(|r| r.starts_with(char::is_whitespace))
            .ok_or_else(|| String::from("Value declaration must start with \"Value \""))?;

        let regex_start =
            rest.find('(').ok_or_else(|| String::from("Value declaration without a regex"))?;
        let pattern = rest[regex_start..].trim_end();
        let mut tokens: Vec<&str> = rest[..regex_start].split_whitespace().collect();

        let name = tokens.pop().ok_or_else(|| String::from("Value declaration without a name"))?;
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("Invalid value name: {:?}", name));
        }

        let mut options = BTreeSet::new();
        for option in tokens.iter().flat_map(|t| t.split(',')).filter(|o| !o.is_empty()) {
            if !options.insert(option.parse::<ValueOption>()?) {
                return Err(format!("Duplicate value option: {}", option));
            }
        }

        check_parentheses(pattern)?;
        Regex::new(pattern).map_err(|e| format!("Invalid regex for value {}: {}", name, e))?;

        Ok(Self { name: name.to_string(), pattern: pattern.to_string(), options })
    }

    /// Name of the value
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regular expression of the value, including the outer parentheses
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Set of options
    pub fn options(&self) -> &BTreeSet<ValueOption> {
        &self.options
    }

    /// Returns `true` if the value was declared with `option`.
    pub fn has(&self, option: ValueOption) -> bool {
        self.options.contains(&option)
    }

    /// Type under which the value is stored in the records.
    pub fn kind(&self) -> ValueKind {
        if self.has(ValueOption::List) {
            ValueKind::List
        } else {
            ValueKind::Scalar
        }
    }

    /// Regex fragment which replaces `${name}` in the rules: the pattern, turned into a named
    /// capture group.
    pub(crate) fn capture_group(&self) -> String {
        format!("(?P<{}>{})", self.name, &self.pattern[1..self.pattern.len() - 1])
    }
}

impl fmt::Display for ValueDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.is_empty() {
            write!(f, "Value {} {}", self.name, self.pattern)
        } else {
            write!(f, "Value {} {} {}", self.options.iter().join(","), self.name, self.pattern)
        }
    }
}

/// Check that the pattern is enclosed in one pair of parentheses, and that all parentheses are
/// balanced. Escaped characters and character classes are skipped.
fn check_parentheses(pattern: &str) -> Result<(), String> {
    if !pattern.starts_with('(') || !pattern.ends_with(')') {
        return Err(format!("Value regex must be enclosed in parentheses: {}", pattern));
    }

    let mut depth: usize = 0;
    let mut in_class = false;
    let mut chars = pattern.char_indices();
    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("Unbalanced parentheses in value regex: {}", pattern))?;
                if depth == 0 && pos + 1 != pattern.len() {
                    return Err(format!("Value regex must be a single group: {}", pattern));
                }
            }
            _ => {}
        }
    }

    if depth != 0 || in_class {
        return Err(format!("Unbalanced parentheses in value regex: {}", pattern));
    }
    Ok(())
}
