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

use std::path::PathBuf;
use thiserror::Error;

/// Error of the code generator
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The template is invalid.
    #[error("{0}")]
    Template(#[from] textfsm::Error),
    /// A file or directory cannot be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path of the file or directory
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
    /// The type name is not a valid Rust identifier in Pascal case.
    #[error("Invalid type name: {0:?}")]
    InvalidTypeName(String),
    /// Two templates of a directory map to the same module name.
    #[error("Module {module} is already generated from {}", .first.display())]
    DuplicateModule {
        /// Name of the module
        module: String,
        /// Template from which the module was generated
        first: PathBuf,
    },
    /// A value name cannot be turned into a Rust identifier.
    #[error("{template}: Value {value} cannot be used as a field name")]
    InvalidFieldName {
        /// Name of the template
        template: String,
        /// Name of the value
        value: String,
    },
    /// Two values map to the same field name.
    #[error("{template}: Values {first} and {second} are both named {field}")]
    DuplicateField {
        /// Name of the template
        template: String,
        /// Name of the field
        field: String,
        /// First value
        first: String,
        /// Second value
        second: String,
    },
    /// Formatting the generated code failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}
