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

//! # State machine
//!
//! Runs a [`Template`] over the lines of some CLI output. The machine starts in the `Start` state
//! with an empty record. For every input line, the rules of the current state are tried in order,
//! and the first matching rule is applied:
//!
//! 1. all captured values are assigned to the record in progress,
//! 2. the record operation is executed (`Record`, `Clear`, `Clearall`),
//! 3. the state transition is executed,
//! 4. the line operation decides whether the same line is matched again (`Continue`) or whether
//!    the machine continues with the next line (`Next`).
//!
//! Lines that match no rule are skipped. A record that was not emitted when the input ends is
//! dropped, unless [`Options::record_at_eof`] is set.

use crate::record::{Record, RecordBuilder, Value};
use crate::template::{LineOp, RecordOp, Template, Transition, ValueOption};
use crate::Error;

use log::*;
use std::mem;

/// Options of a single run of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Emit the record in progress when the input is exhausted (or when a rule switches to
    /// `EOF`), like the classic TextFSM implementation does. By default, it is dropped.
    pub record_at_eof: bool,
}

impl Template {
    /// Run the template over `input`, with the default [`Options`]. Returns the emitted records in
    /// the order in which they were emitted.
    pub fn run(&self, input: &str) -> Result<Vec<Record>, Error> {
        self.run_with_options(input, &Options::default())
    }

    /// Run the template over `input`.
    pub fn run_with_options(&self, input: &str, options: &Options) -> Result<Vec<Record>, Error> {
        let mut machine = StateMachine::new(self);
        let mut ended = false;
        for (idx, line) in input.lines().enumerate() {
            match machine.process_line(idx + 1, line)? {
                Flow::Next => {}
                Flow::Eof => break,
                Flow::End => {
                    ended = true;
                    break;
                }
            }
        }

        if options.record_at_eof && !ended {
            machine.emit_record();
        }

        debug!("{}: {} records emitted", self.name(), machine.output.len());
        Ok(machine.output)
    }
}

/// What to do after processing one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Eof,
    End,
}

/// State of one run
struct StateMachine<'t> {
    template: &'t Template,
    state: usize,
    record: RecordBuilder<'t>,
    output: Vec<Record>,
    max_restarts: usize,
}

impl<'t> StateMachine<'t> {
    fn new(template: &'t Template) -> Self {
        Self {
            template,
            state: template.start_index(),
            record: RecordBuilder::new(template.values(), None),
            output: Vec::new(),
            max_restarts: template.num_rules(),
        }
    }

    fn state_name(&self) -> &'t str {
        self.template.states()[self.state].name()
    }

    /// Match a single line against the rules of the current state.
    fn process_line(&mut self, line_no: usize, line: &str) -> Result<Flow, Error> {
        let template = self.template;
        let mut restarts = 0;

        'state: loop {
            let state = self.state;
            let rules = template.states()[state].rules();

            for (rule_idx, rule) in rules.iter().enumerate() {
                let captures = match rule.regex().captures(line) {
                    Some(c) => c,
                    None => continue,
                };
                trace!(
                    "{}: line {} matches rule {:?} in state {}",
                    template.name(),
                    line_no,
                    rule.pattern(),
                    self.state_name()
                );

                for (value_idx, def) in template.values().iter().enumerate() {
                    if let Some(m) = captures.name(def.name()) {
                        self.record.set_index(value_idx, m.as_str());
                        if def.has(ValueOption::Fillup) {
                            self.fill_up(def.name(), m.as_str());
                        }
                    }
                }

                let action = rule.action();
                if let LineOp::Error(message) = &action.line_op {
                    return Err(Error::RuleError {
                        template: template.name().to_string(),
                        state: self.state_name().to_string(),
                        line_no,
                        line: line.to_string(),
                        message: message.clone(),
                    });
                }

                match action.record_op {
                    RecordOp::NoRecord => {}
                    RecordOp::Record => self.emit_record(),
                    RecordOp::Clear => self.record.clear(),
                    RecordOp::Clearall => self.record.clear_all(),
                }

                match &action.transition {
                    Transition::Stay => {}
                    Transition::To(_) => {
                        if let Some(target) = template.target_index(state, rule_idx) {
                            if target != state {
                                debug!(
                                    "{}: line {}: {} -> {}",
                                    template.name(),
                                    line_no,
                                    self.state_name(),
                                    template.states()[target].name()
                                );
                            }
                            self.state = target;
                        }
                    }
                    Transition::Eof => return Ok(Flow::Eof),
                    Transition::End => return Ok(Flow::End),
                }

                if action.line_op != LineOp::Continue {
                    return Ok(Flow::Next);
                }

                if self.state != state {
                    // matching continues at the top of the new state
                    restarts += 1;
                    if restarts > self.max_restarts {
                        return Err(Error::InfiniteLoop {
                            template: template.name().to_string(),
                            state: self.state_name().to_string(),
                            line_no,
                            line: line.to_string(),
                        });
                    }
                    continue 'state;
                }
            }

            // no (further) rule matched
            return Ok(Flow::Next);
        }
    }

    /// Finalize the record in progress, and start a new one. The record is only added to the
    /// output if all required values are present.
    fn emit_record(&mut self) {
        let values = self.template.values();
        let missing = self.record.missing_required();
        let builder = mem::replace(&mut self.record, RecordBuilder::new(values, None));
        let (record, carry) = builder.finalize();
        self.record = RecordBuilder::new(values, Some(&carry));

        match missing {
            Some(name) => {
                debug!("{}: record dropped, required value {} is empty", self.template.name(), name)
            }
            None => {
                debug!("{}: record {} emitted", self.template.name(), self.output.len());
                self.output.push(record);
            }
        }
    }

    /// Write `text` into all previous records, in reverse order, until one record is found that
    /// already has a value.
    fn fill_up(&mut self, name: &str, text: &str) {
        for record in self.output.iter_mut().rev() {
            match record.get_mut(name) {
                Some(Value::Scalar(s)) if s.is_empty() => s.push_str(text),
                Some(Value::List(l)) if l.is_empty() => l.push(text.to_string()),
                _ => break,
            }
        }
    }
}
