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

#![deny(missing_docs)]

//! # Code generation for TextFSM templates
//!
//! Turns a TextFSM template into a strongly typed Rust module. For a template `show_interface`
//! with type name `ShowInterface`, the generated items are:
//!
//! - `SHOW_INTERFACE_TEMPLATE`: the template text,
//! - `SHOW_INTERFACE`: a static [`TemplateCell`](textfsm::TemplateCell), compiling the template
//!   once per process,
//! - `ShowInterfaceRow`: one field per value (`String`, or `Vec<String>` for `List` values),
//!   ordered by value name, with `get_<field>`, `verify_<field>` and `compare`,
//! - `ShowInterface`: the parser, holding the parsed `rows`, with `parse` (using the `OPTIONS`
//!   of the source), `parse_with_options` and `get_all_<field>`.
//!
//! The generated code only refers to `::textfsm` and `::std`, so it can be written into a
//! source file ([`generate_file`], [`generate_dir`]) or expanded by the `textfsm_template!`
//! macro of the `textfsm_macros` crate.

mod batch;
mod emit;
mod error;
mod names;

// test modules
mod test;

pub use batch::{generate_dir, BatchReport, TEMPLATE_EXTENSION};
pub use error::CodegenError;
pub use names::{field_name, type_name};

use textfsm::{Options, Template};

use log::*;

/// Template to generate code for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name of the generated parser type, in Pascal case, like `ShowInterface`.
    pub type_name: String,
    /// Name of the template, used in error messages and as `TEMPLATE_NAME`.
    pub template_name: String,
    /// Template text
    pub text: String,
    /// Options used by the generated `parse`
    pub options: Options,
}

impl TemplateSource {
    /// Create a new source. The type name is derived from the template name.
    pub fn new(
        template_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, CodegenError> {
        let template_name = template_name.into();
        Ok(Self {
            type_name: type_name(&template_name)?,
            template_name,
            text: text.into(),
            options: Options::default(),
        })
    }

    /// Use `options` in the generated `parse` instead of the default options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

/// Generate the Rust items for a single template. The template is parsed first, such that
/// invalid templates are reported before any code is produced.
pub fn generate_items(source: &TemplateSource) -> Result<String, CodegenError> {
    names::check_type_name(&source.type_name)?;
    let template = Template::named(source.template_name.as_str(), &source.text)?;
    let fields = names::fields(&template)?;
    debug!("Generating {} with {} fields", source.type_name, fields.len());
    Ok(emit::items(source, &fields)?)
}

/// Generate a complete source file for a single template.
pub fn generate_file(source: &TemplateSource) -> Result<String, CodegenError> {
    let items = generate_items(source)?;
    Ok(format!(
        "// Code generated by textfsm_gen from the {} template. DO NOT EDIT.\n\n{}",
        source.template_name, items
    ))
}
