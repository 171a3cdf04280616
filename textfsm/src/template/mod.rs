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

//! # Templates
//!
//! A template consists of a list of [value declarations](ValueDefinition), followed by a list of
//! [states](State), each containing an ordered list of [rules](Rule):
//!
//! ```text
//! Value Required INTERFACE (\S+)
//! Value List ADDRESS (\d+\.\d+\.\d+\.\d+)
//!
//! Start
//!   ^Interface ${INTERFACE} -> Continue.Record
//!   ^\s+address ${ADDRESS}
//! ```
//!
//! The template is parsed and validated completely when it is constructed: all regular
//! expressions are compiled, and every referenced value and state must exist. A [`Template`] is
//! never modified afterwards, so it can be shared between threads and reused for any number of
//! runs.

mod rule;
mod value;

pub use rule::{Action, LineOp, RecordOp, Rule, Transition};
pub use value::{ValueDefinition, ValueOption};

use rule::{is_identifier, RuleParseError};

use crate::Error;

use log::*;
use std::collections::HashMap;
use std::str::FromStr;

/// Name of the entry state
pub const START_STATE: &str = "Start";

/// Keywords which cannot be used as state names
const RESERVED_STATES: [&str; 9] =
    ["EOF", "End", "Next", "Continue", "Error", "NoRecord", "Record", "Clear", "Clearall"];

/// A state of the template
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    rules: Vec<Rule>,
    line: usize,
}

impl State {
    /// Name of the state
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules of the state, in the order in which they are evaluated
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Line of the state declaration in the template (starting at 1)
    pub fn line(&self) -> usize {
        self.line
    }
}

/// A parsed and validated template
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    values: Vec<ValueDefinition>,
    states: Vec<State>,
    state_lookup: HashMap<String, usize>,
    transitions: Vec<Vec<Option<usize>>>,
}

impl Template {
    /// Parse a template without a name. Errors will refer to it as `template`.
    pub fn new(text: &str) -> Result<Self, Error> {
        Self::named("template", text)
    }

    /// Parse a template. The name is only used in error messages.
    pub fn named(name: impl Into<String>, text: &str) -> Result<Self, Error> {
        TemplateParser::new(name.into()).parse(text)
    }

    /// Name of the template
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared values, in declaration order
    pub fn values(&self) -> &[ValueDefinition] {
        &self.values
    }

    /// Get a value declaration by name
    pub fn value(&self, name: &str) -> Option<&ValueDefinition> {
        self.values.iter().find(|v| v.name() == name)
    }

    /// All states, in declaration order
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Get a state by name
    pub fn state(&self, name: &str) -> Option<&State> {
        self.state_lookup.get(name).map(|idx| &self.states[*idx])
    }

    /// Total number of rules in all states
    pub fn num_rules(&self) -> usize {
        self.states.iter().map(|s| s.rules.len()).sum()
    }

    /// Index of the `Start` state
    pub(crate) fn start_index(&self) -> usize {
        self.state_lookup[START_STATE]
    }

    /// Index of the target state of a rule, or `None` if the rule does not switch to a declared
    /// state.
    pub(crate) fn target_index(&self, state: usize, rule: usize) -> Option<usize> {
        self.transitions[state][rule]
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Line based parser for the template text
struct TemplateParser {
    name: String,
    values: Vec<ValueDefinition>,
    states: Vec<State>,
    state_lookup: HashMap<String, usize>,
    in_state: bool,
}

impl TemplateParser {
    fn new(name: String) -> Self {
        Self {
            name,
            values: Vec::new(),
            states: Vec::new(),
            state_lookup: HashMap::new(),
            in_state: false,
        }
    }

    fn syntax_error(&self, line: usize, message: impl Into<String>) -> Error {
        Error::TemplateSyntax { template: self.name.clone(), line, message: message.into() }
    }

    fn parse(mut self, text: &str) -> Result<Template, Error> {
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                // a blank line terminates the current state block
                self.in_state = false;
            } else if trimmed.starts_with('#') {
                // comment
            } else if raw.starts_with("Value") && raw[5..].starts_with(char::is_whitespace) {
                self.parse_value(raw, line_no)?;
            } else if trimmed.starts_with('^') {
                self.parse_rule(trimmed, line_no)?;
            } else if !raw.starts_with(char::is_whitespace) && is_identifier(trimmed) {
                self.parse_state(trimmed, line_no)?;
            } else {
                return Err(self.syntax_error(line_no, format!("Unexpected line: {:?}", raw)));
            }
        }

        self.finish()
    }

    fn parse_value(&mut self, raw: &str, line: usize) -> Result<(), Error> {
        if !self.states.is_empty() {
            return Err(self.syntax_error(line, "Value declaration after the first state"));
        }
        let value = ValueDefinition::parse(raw).map_err(|e| self.syntax_error(line, e))?;
        if self.values.iter().any(|v| v.name() == value.name()) {
            return Err(self.syntax_error(line, format!("Duplicate value: {}", value.name())));
        }
        trace!("{}:{}: {}", self.name, line, value);
        self.values.push(value);
        Ok(())
    }

    fn parse_state(&mut self, name: &str, line: usize) -> Result<(), Error> {
        if RESERVED_STATES.contains(&name) {
            return Err(self.syntax_error(line, format!("Reserved state name: {}", name)));
        }
        if self.state_lookup.contains_key(name) {
            return Err(self.syntax_error(line, format!("Duplicate state: {}", name)));
        }
        self.state_lookup.insert(name.to_string(), self.states.len());
        self.states.push(State { name: name.to_string(), rules: Vec::new(), line });
        self.in_state = true;
        Ok(())
    }

    fn parse_rule(&mut self, text: &str, line: usize) -> Result<(), Error> {
        if !self.in_state {
            return Err(self.syntax_error(line, "Rule outside of a state"));
        }
        let rule = Rule::parse(text, line, &self.values).map_err(|e| match e {
            RuleParseError::UndefinedValue(name) => {
                Error::UndefinedValue { template: self.name.clone(), line, name }
            }
            RuleParseError::Syntax(message) => self.syntax_error(line, message),
        })?;
        // `in_state` guarantees that there is a current state
        if let Some(state) = self.states.last_mut() {
            state.rules.push(rule);
        }
        Ok(())
    }

    fn finish(self) -> Result<Template, Error> {
        if !self.state_lookup.contains_key(START_STATE) {
            return Err(self.syntax_error(
                self.states.first().map(|s| s.line).unwrap_or(1),
                "Missing Start state",
            ));
        }

        let mut transitions = Vec::with_capacity(self.states.len());
        for state in self.states.iter() {
            let mut targets = Vec::with_capacity(state.rules.len());
            for rule in state.rules.iter() {
                targets.push(match &rule.action().transition {
                    Transition::To(target) => match self.state_lookup.get(target) {
                        Some(idx) => Some(*idx),
                        None => {
                            return Err(Error::UndefinedState {
                                template: self.name.clone(),
                                line: rule.line(),
                                name: target.clone(),
                            })
                        }
                    },
                    _ => None,
                });
            }
            transitions.push(targets);
        }

        debug!(
            "Parsed template {} with {} values and {} states",
            self.name,
            self.values.len(),
            self.states.len()
        );

        Ok(Template {
            name: self.name,
            values: self.values,
            states: self.states,
            state_lookup: self.state_lookup,
            transitions,
        })
    }
}
