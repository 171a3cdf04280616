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

//! Module containing all error types

use crate::record::ValueKind;
use thiserror::Error;

/// Main error type
///
/// Template errors (`TemplateSyntax`, `UndefinedValue` and `UndefinedState`) are raised while
/// building a [`Template`](crate::Template), before any input is processed. The remaining errors
/// are raised by a single run of the state machine, or while converting its records into typed
/// rows, and never affect other runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The template text is malformed.
    #[error("{template}:{line}: Template syntax error: {message}")]
    TemplateSyntax {
        /// Name of the template
        template: String,
        /// Line in the template (starting at 1)
        line: usize,
        /// Description of the problem
        message: String,
    },
    /// A rule references a value which was never declared.
    #[error("{template}:{line}: Undefined value: ${{{name}}}")]
    UndefinedValue {
        /// Name of the template
        template: String,
        /// Line in the template (starting at 1)
        line: usize,
        /// Name of the undeclared value
        name: String,
    },
    /// A rule transitions into a state which was never declared.
    #[error("{template}:{line}: Undefined state: {name}")]
    UndefinedState {
        /// Name of the template
        template: String,
        /// Line in the template (starting at 1)
        line: usize,
        /// Name of the undeclared state
        name: String,
    },
    /// A chain of `Continue` actions did not make any progress on a single input line.
    #[error("{template}: Infinite loop in state {state} on input line {line_no}: {line:?}")]
    InfiniteLoop {
        /// Name of the template
        template: String,
        /// State in which the guard was hit
        state: String,
        /// Input line number (starting at 1)
        line_no: usize,
        /// Content of the input line
        line: String,
    },
    /// A rule with the `Error` action matched an input line.
    #[error(
        "{template}: Error action in state {state} on input line {line_no}: {line:?}{}",
        fmt_message(.message)
    )]
    RuleError {
        /// Name of the template
        template: String,
        /// State of the matching rule
        state: String,
        /// Input line number (starting at 1)
        line_no: usize,
        /// Content of the input line
        line: String,
        /// Optional message attached to the action
        message: Option<String>,
    },
    /// A record entry cannot be converted into the requested type.
    #[error("Cannot marshal value {value}: expected {expected}, found {}", fmt_kind(.found))]
    MarshalType {
        /// Name of the value
        value: String,
        /// Type that was requested
        expected: ValueKind,
        /// Type that is stored in the record, or `None` if the value is missing
        found: Option<ValueKind>,
    },
}

fn fmt_message(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({})", m),
        None => String::new(),
    }
}

fn fmt_kind(kind: &Option<ValueKind>) -> String {
    match kind {
        Some(k) => k.to_string(),
        None => String::from("nothing"),
    }
}
