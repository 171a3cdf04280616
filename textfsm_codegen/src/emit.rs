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

//! Emission of the generated items

use crate::names::{const_name, Field};
use crate::TemplateSource;

use textfsm::ValueKind;

use std::fmt::{self, Write};

/// Raw string literal containing `text`, with enough `#` to never terminate early.
pub(crate) fn raw_string(text: &str) -> String {
    let mut hashes = 0;
    let mut run: Option<usize> = None;
    for c in text.chars() {
        run = match (c, run) {
            ('"', _) => Some(0),
            ('#', Some(n)) => Some(n + 1),
            _ => None,
        };
        if let Some(n) = run {
            hashes = hashes.max(n + 1);
        }
    }
    let hashes = "#".repeat(hashes);
    format!("r{}\"{}\"{}", hashes, text, hashes)
}

pub(crate) fn items(source: &TemplateSource, fields: &[Field]) -> Result<String, fmt::Error> {
    let name = &source.type_name;
    let row = format!("{}Row", name);
    let cell = const_name(name);
    let mut s = String::new();

    // template
    writeln!(s, "/// Source of the `{}` template", source.template_name)?;
    writeln!(s, "pub const {}_TEMPLATE: &str = {};", cell, raw_string(&source.text))?;
    writeln!(s)?;
    writeln!(s, "/// The `{}` template, compiled on first use", source.template_name)?;
    writeln!(
        s,
        "pub static {}: ::textfsm::TemplateCell = ::textfsm::TemplateCell::new({:?}, {}_TEMPLATE);",
        cell, source.template_name, cell
    )?;
    writeln!(s)?;

    // row
    writeln!(s, "/// One record of the `{}` template", source.template_name)?;
    writeln!(s, "#[derive(Debug, Clone, Default, PartialEq, Eq)]")?;
    writeln!(s, "pub struct {} {{", row)?;
    for field in fields {
        writeln!(s, "    /// Value `{}`", field.value)?;
        writeln!(s, "    pub {}: {},", field.ident, field_type(field))?;
    }
    writeln!(s, "}}")?;
    writeln!(s)?;

    let record = if fields.is_empty() { "_record" } else { "record" };
    writeln!(s, "impl ::std::convert::TryFrom<&::textfsm::Record> for {} {{", row)?;
    writeln!(s, "    type Error = ::textfsm::Error;")?;
    writeln!(s)?;
    writeln!(
        s,
        "    fn try_from({}: &::textfsm::Record) -> ::std::result::Result<Self, Self::Error> {{",
        record
    )?;
    writeln!(s, "        Ok(Self {{")?;
    for field in fields {
        match field.kind {
            ValueKind::Scalar => writeln!(
                s,
                "            {}: record.scalar({:?})?.to_string(),",
                field.ident, field.value
            )?,
            ValueKind::List => {
                writeln!(s, "            {}: record.list({:?})?.to_vec(),", field.ident, field.value)?
            }
        }
    }
    writeln!(s, "        }})")?;
    writeln!(s, "    }}")?;
    writeln!(s, "}}")?;
    writeln!(s)?;

    writeln!(s, "impl {} {{", row)?;
    for field in fields {
        let (arg, cmp) = match field.kind {
            ValueKind::Scalar => ("&str", format!("self.{} == value", field.ident)),
            ValueKind::List => ("&[String]", format!("self.{}.as_slice() == value", field.ident)),
        };
        writeln!(s, "    /// Returns the value `{}`.", field.value)?;
        writeln!(s, "    pub fn get_{}(&self) -> {} {{", field.name, arg)?;
        writeln!(s, "        &self.{}", field.ident)?;
        writeln!(s, "    }}")?;
        writeln!(s)?;
        writeln!(s, "    /// Returns `true` if the value `{}` equals `value`.", field.value)?;
        writeln!(s, "    pub fn verify_{}(&self, value: {}) -> bool {{", field.name, arg)?;
        writeln!(s, "        {}", cmp)?;
        writeln!(s, "    }}")?;
        writeln!(s)?;
    }
    writeln!(s, "    /// Returns `true` if all values of both rows are equal.")?;
    writeln!(s, "    pub fn compare(&self, other: &{}) -> bool {{", row)?;
    writeln!(s, "        self == other")?;
    writeln!(s, "    }}")?;
    writeln!(s, "}}")?;
    writeln!(s)?;

    // parser
    writeln!(s, "/// Parser for the `{}` template", source.template_name)?;
    writeln!(s, "#[derive(Debug, Clone, Default, PartialEq, Eq)]")?;
    writeln!(s, "pub struct {} {{", name)?;
    writeln!(s, "    /// All rows parsed so far, in input order")?;
    writeln!(s, "    pub rows: ::std::vec::Vec<{}>,", row)?;
    writeln!(s, "}}")?;
    writeln!(s)?;

    writeln!(s, "impl {} {{", name)?;
    writeln!(s, "    /// Name of the template")?;
    writeln!(s, "    pub const TEMPLATE_NAME: &'static str = {:?};", source.template_name)?;
    writeln!(s)?;
    writeln!(s, "    /// Options used by [`{}::parse`]", name)?;
    writeln!(
        s,
        "    pub const OPTIONS: ::textfsm::Options = ::textfsm::Options {{ record_at_eof: {} }};",
        source.options.record_at_eof
    )?;
    writeln!(s)?;
    writeln!(s, "    /// The compiled template, shared by all parsers of this type.")?;
    writeln!(
        s,
        "    pub fn template() -> ::std::result::Result<&'static ::textfsm::Template, ::textfsm::Error> {{"
    )?;
    writeln!(s, "        {}.get()", cell)?;
    writeln!(s, "    }}")?;
    writeln!(s)?;
    writeln!(s, "    /// Parse `input` with [`{}::OPTIONS`] and append the rows.", name)?;
    writeln!(s, "    /// On error, `rows` is left untouched.")?;
    writeln!(
        s,
        "    pub fn parse(&mut self, input: &str) -> ::std::result::Result<(), ::textfsm::Error> {{"
    )?;
    writeln!(s, "        self.parse_with_options(input, &Self::OPTIONS)")?;
    writeln!(s, "    }}")?;
    writeln!(s)?;
    writeln!(s, "    /// Parse `input` with the given options and append the rows. On error, `rows` is")?;
    writeln!(s, "    /// left untouched.")?;
    writeln!(s, "    pub fn parse_with_options(")?;
    writeln!(s, "        &mut self,")?;
    writeln!(s, "        input: &str,")?;
    writeln!(s, "        options: &::textfsm::Options,")?;
    writeln!(s, "    ) -> ::std::result::Result<(), ::textfsm::Error> {{")?;
    writeln!(s, "        use ::std::convert::TryFrom;")?;
    writeln!(s, "        let records = Self::template()?.run_with_options(input, options)?;")?;
    writeln!(s, "        let rows = records")?;
    writeln!(s, "            .iter()")?;
    writeln!(s, "            .map({}::try_from)", row)?;
    writeln!(s, "            .collect::<::std::result::Result<::std::vec::Vec<_>, _>>()?;")?;
    writeln!(s, "        self.rows.extend(rows);")?;
    writeln!(s, "        Ok(())")?;
    writeln!(s, "    }}")?;
    for field in fields {
        let (item, map) = match field.kind {
            ValueKind::Scalar => ("&str", "as_str"),
            ValueKind::List => ("&[String]", "as_slice"),
        };
        writeln!(s)?;
        writeln!(s, "    /// Returns the value `{}` of every row.", field.value)?;
        writeln!(s, "    pub fn get_all_{}(&self) -> ::std::vec::Vec<{}> {{", field.name, item)?;
        writeln!(s, "        self.rows.iter().map(|r| r.{}.{}()).collect()", field.ident, map)?;
        writeln!(s, "    }}")?;
    }
    writeln!(s, "}}")?;

    Ok(s)
}

fn field_type(field: &Field) -> &'static str {
    match field.kind {
        ValueKind::Scalar => "String",
        ValueKind::List => "::std::vec::Vec<String>",
    }
}
