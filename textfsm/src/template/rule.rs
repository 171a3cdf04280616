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

//! State rules (`^regex -> Action`)

use super::ValueDefinition;

use regex::Regex;
use std::fmt;

/// What to do with the input line after a rule matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOp {
    /// Continue with the next input line (default).
    Next,
    /// Keep the current line and keep on matching it against the following rules.
    Continue,
    /// Abort parsing, with an optional message.
    Error(Option<String>),
}

impl Default for LineOp {
    fn default() -> Self {
        LineOp::Next
    }
}

/// What to do with the record in progress after a rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOp {
    /// Leave the record untouched (default).
    NoRecord,
    /// Emit the record and start a new one.
    Record,
    /// Reset all values except `Filldown` values.
    Clear,
    /// Reset all values.
    Clearall,
}

impl Default for RecordOp {
    fn default() -> Self {
        RecordOp::NoRecord
    }
}

/// State transition of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Stay in the current state.
    Stay,
    /// Switch to the named state.
    To(String),
    /// Stop processing the input, as if it was exhausted.
    Eof,
    /// Stop processing the input, without committing the record in progress.
    End,
}

impl Default for Transition {
    fn default() -> Self {
        Transition::Stay
    }
}

/// Action of a rule: everything after the `->`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    /// Operation on the input line
    pub line_op: LineOp,
    /// Operation on the record
    pub record_op: RecordOp,
    /// Transition into a new state
    pub transition: Transition,
}

impl Action {
    /// Parse the action string of a rule.
    ///
    /// Accepts the classic form `LineOp.RecordOp NewState`, as well as any `.`-separated sequence
    /// of line operation, record operation and new state, like `Continue.Record`,
    /// `Record.NewState` or simply `NewState`. `Error` may be followed by a quoted message.
    pub(crate) fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err(String::from("Empty action after \"->\""));
        }

        let (ops, message) = match s.find('"') {
            Some(pos) => {
                let message = s[pos..].trim();
                if message.len() < 2 || !message.ends_with('"') {
                    return Err(format!("Unterminated error message: {}", message));
                }
                (s[..pos].trim(), Some(message[1..message.len() - 1].to_string()))
            }
            None => (s, None),
        };

        let mut line_op: Option<LineOp> = None;
        let mut record_op: Option<RecordOp> = None;
        let mut transition: Option<Transition> = None;

        for token in ops.split(|c: char| c == '.' || c.is_whitespace()).filter(|t| !t.is_empty()) {
            match token {
                "Next" | "Continue" | "Error" => {
                    if line_op.is_some() {
                        return Err(format!("Multiple line operations in action: {}", s));
                    }
                    line_op = Some(match token {
                        "Next" => LineOp::Next,
                        "Continue" => LineOp::Continue,
                        _ => LineOp::Error(message.clone()),
                    });
                }
                "NoRecord" | "Record" | "Clear" | "Clearall" => {
                    if record_op.is_some() {
                        return Err(format!("Multiple record operations in action: {}", s));
                    }
                    record_op = Some(match token {
                        "NoRecord" => RecordOp::NoRecord,
                        "Record" => RecordOp::Record,
                        "Clear" => RecordOp::Clear,
                        _ => RecordOp::Clearall,
                    });
                }
                state => {
                    if transition.is_some() {
                        return Err(format!("Multiple state transitions in action: {}", s));
                    }
                    if !is_identifier(state) {
                        return Err(format!("Invalid state name in action: {:?}", state));
                    }
                    transition = Some(match state {
                        "EOF" => Transition::Eof,
                        "End" => Transition::End,
                        _ => Transition::To(state.to_string()),
                    });
                }
            }
        }

        if message.is_some() && !matches!(line_op, Some(LineOp::Error(_))) {
            return Err(format!("Only the Error action can carry a message: {}", s));
        }
        if matches!(line_op, Some(LineOp::Error(_))) && transition.is_some() {
            return Err(format!("The Error action cannot change the state: {}", s));
        }

        Ok(Self {
            line_op: line_op.unwrap_or_default(),
            record_op: record_op.unwrap_or_default(),
            transition: transition.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line_op = match &self.line_op {
            LineOp::Next => "Next",
            LineOp::Continue => "Continue",
            LineOp::Error(_) => "Error",
        };
        write!(f, "{}.{:?}", line_op, self.record_op)?;
        match &self.transition {
            Transition::Stay => {}
            Transition::To(s) => write!(f, " {}", s)?,
            Transition::Eof => write!(f, " EOF")?,
            Transition::End => write!(f, " End")?,
        }
        if let LineOp::Error(Some(message)) = &self.line_op {
            write!(f, " \"{}\"", message)?;
        }
        Ok(())
    }
}

/// Problem found while parsing a rule line
#[derive(Debug)]
pub(crate) enum RuleParseError {
    /// The rule references a value which is not declared.
    UndefinedValue(String),
    /// Any other syntax error
    Syntax(String),
}

impl From<String> for RuleParseError {
    fn from(message: String) -> Self {
        RuleParseError::Syntax(message)
    }
}

/// A rule of a state
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    regex: Regex,
    action: Action,
    line: usize,
}

impl Rule {
    /// Parse a rule line. `line` is the line number inside the template.
    pub(crate) fn parse(
        text: &str,
        line: usize,
        values: &[ValueDefinition],
    ) -> Result<Self, RuleParseError> {
        let text = text.trim();
        let (pattern, action) = match action_separator(text) {
            Some(pos) => (text[..pos].trim_end(), Action::parse(&text[pos + 2..])?),
            None => (text, Action::default()),
        };

        let expanded = expand_values(pattern, values)?;
        let regex = Regex::new(&expanded)
            .map_err(|e| format!("Invalid regex in rule {:?}: {}", pattern, e))?;

        Ok(Self { pattern: pattern.to_string(), regex, action, line })
    }

    /// The match pattern, as written in the template
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled regex, with all values substituted
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Action of the rule
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Line of the rule in the template (starting at 1)
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Position of the `->` that separates the match pattern from the action. The arrow must follow
/// whitespace, and it must not be part of a quoted error message.
fn action_separator(text: &str) -> Option<usize> {
    text.match_indices("->")
        .map(|(pos, _)| pos)
        .filter(|&pos| text[..pos].chars().next_back().map_or(false, char::is_whitespace))
        .filter(|&pos| text[pos + 2..].matches('"').count() % 2 == 0)
        .last()
}

/// Replace all `${name}` placeholders by the capture group of the value. `$$` is replaced by a
/// single `$`. Every other `$` (like the end anchor) is kept.
fn expand_values(pattern: &str, values: &[ValueDefinition]) -> Result<String, RuleParseError> {
    let mut result = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if rest.starts_with("$$") {
            result.push('$');
            rest = &rest[2..];
        } else if rest.starts_with("${") {
            let end = rest
                .find('}')
                .ok_or_else(|| format!("Unterminated value reference in rule: {}", pattern))?;
            let name = &rest[2..end];
            let value = values
                .iter()
                .find(|v| v.name() == name)
                .ok_or_else(|| RuleParseError::UndefinedValue(name.to_string()))?;
            result.push_str(&value.capture_group());
            rest = &rest[end + 1..];
        } else {
            result.push('$');
            rest = &rest[1..];
        }
    }
    result.push_str(rest);
    Ok(result)
}

/// Returns `true` if `s` is a valid state name.
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
