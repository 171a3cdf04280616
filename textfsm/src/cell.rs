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

//! Lazily compiled templates, shared by the whole process

use crate::{Error, Template};

use once_cell::sync::OnceCell;
use std::fmt;

/// A template which is compiled on first use, and then shared for the lifetime of the process.
///
/// Generated parsers keep their template in a `static TemplateCell`, such that the template text
/// is parsed and all regular expressions are compiled at most once, no matter how many parser
/// instances are created or how many threads use them.
///
/// ```
/// use textfsm::TemplateCell;
///
/// static GREETING: TemplateCell = TemplateCell::new(
///     "greeting",
///     "Value NAME (\\w+)\n\nStart\n  ^Hello ${NAME} -> Record\n",
/// );
///
/// let records = GREETING.get()?.run("Hello world\n")?;
/// assert_eq!(records[0].scalar("NAME")?, "world");
/// # Ok::<(), textfsm::Error>(())
/// ```
pub struct TemplateCell {
    name: &'static str,
    text: &'static str,
    cell: OnceCell<Template>,
}

impl TemplateCell {
    /// Create a new, uninitialized cell.
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text, cell: OnceCell::new() }
    }

    /// Name of the template
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Source text of the template
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Get the compiled template, compiling it if this is the first call. If the template is
    /// invalid, the error is returned, and the next call will try again.
    pub fn get(&self) -> Result<&Template, Error> {
        self.cell.get_or_try_init(|| Template::named(self.name, self.text))
    }
}

impl fmt::Debug for TemplateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCell")
            .field("name", &self.name)
            .field("initialized", &self.cell.get().is_some())
            .finish()
    }
}
