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

//! # TextFSM: Template-driven parsing of network device CLI output
//!
//! This library turns the unstructured output of router `show` commands into structured records.
//! The parsing is described by a [`Template`]: a set of named values, each with a regular
//! expression, and a small finite state machine, whose rules match input lines, capture values
//! and emit records.
//!
//! ## Structure
//!
//! - **[`Template`](template)**: parses and validates the template text. All template errors are
//!   reported here, before any input is processed.
//!
//! - **State machine**: [`Template::run`] interprets the template over some CLI output, and
//!   returns the emitted [`Record`]s in input order. Every run has its own state, so a template
//!   can be shared between threads.
//!
//! - **[`Records`](record)**: the value model, implementing the semantics of the value options
//!   `List`, `Filldown`, `Fillup` and `Required`.
//!
//! - **[`Nested views`](nested)**: regroups parallel `List` values into child objects.
//!
//! - **[`TemplateCell`]**: a template compiled once and shared for the lifetime of the process,
//!   used by the generated parsers (see the `textfsm_codegen` and `textfsm_macros` crates).
//!
//! ## Usage
//!
//! ```
//! use textfsm::{Error, Template};
//!
//! fn main() -> Result<(), Error> {
//!     let template = Template::named(
//!         "show_version",
//!         r"Value Filldown CHASSIS (\S+)
//! Value Required SLOT (\d+)
//! Value List VERSION (\S+)
//!
//! Start
//!   ^Chassis: ${CHASSIS}
//!   ^Slot ${SLOT}: ${VERSION} -> Record
//! ",
//!     )?;
//!
//!     let records = template.run("Chassis: 8808\nSlot 0: 7.3.2\nSlot 1: 7.3.1\n")?;
//!
//!     assert_eq!(records.len(), 2);
//!     assert_eq!(records[1].scalar("CHASSIS")?, "8808");
//!     assert_eq!(records[1].list("VERSION")?, ["7.3.1"]);
//!     Ok(())
//! }
//! ```

mod cell;
mod engine;
mod error;
pub mod nested;
pub mod record;
pub mod template;

// test modules
mod test;

pub use cell::TemplateCell;
pub use engine::Options;
pub use error::Error;
pub use record::{Record, Value, ValueKind};
pub use template::Template;
