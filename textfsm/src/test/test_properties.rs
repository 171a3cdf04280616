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

use crate::{Options, Template};

use proptest::prelude::*;

const COUNTER: &str = r"Value X (\d+)
Value List Y (\d+)

Start
  ^x ${X}
  ^y ${Y}
  ^rec -> Record
";

fn counter() -> Template {
    Template::named("counter", COUNTER).unwrap()
}

/// A line of input: either one that matches a rule, or noise that matches no rule.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| format!("x {}", n)),
        (0u32..1000).prop_map(|n| format!("y {}", n)),
        Just(String::from("rec")),
        "[A-Z#! ]{0,12}",
    ]
}

/// Random template text, built from lines that look like template lines.
const TEMPLATE_LINES: &str =
    "(Value [A-Za-z ,]{0,20} \\(.{0,5}\\)\n|Start\n|  \\^.{0,10}\n|\n|[A-Za-z]{1,6}\n){0,8}";

fn input_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_record_per_record_action(lines in input_strategy()) {
        let input = lines.join("\n");
        let records = counter().run(&input).unwrap();
        let expected = lines.iter().filter(|l| l.as_str() == "rec").count();
        prop_assert_eq!(records.len(), expected);
    }

    #[test]
    fn trailing_record_only_with_record_at_eof(lines in input_strategy()) {
        let input = lines.join("\n");
        let t = counter();
        let dropped = t.run(&input).unwrap();
        let committed = t.run_with_options(&input, &Options { record_at_eof: true }).unwrap();
        prop_assert_eq!(committed.len(), dropped.len() + 1);
        prop_assert_eq!(&committed[..dropped.len()], &dropped[..]);
    }

    #[test]
    fn noise_lines_are_skipped(lines in input_strategy(), noise in "[A-Z#! ]{0,12}") {
        let t = counter();
        let clean = lines.join("\n");
        let noisy = lines
            .iter()
            .flat_map(|l| vec![l.clone(), noise.clone()])
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(t.run(&clean).unwrap(), t.run(&noisy).unwrap());
    }

    #[test]
    fn list_keeps_input_order(ys in prop::collection::vec(0u32..1000, 0..20)) {
        let mut input: Vec<String> = ys.iter().map(|y| format!("y {}", y)).collect();
        input.push(String::from("rec"));
        let records = counter().run(&input.join("\n")).unwrap();
        let expected: Vec<String> = ys.iter().map(|y| y.to_string()).collect();
        prop_assert_eq!(records[0].list("Y").unwrap(), expected.as_slice());
    }

    #[test]
    fn runs_are_deterministic(lines in input_strategy()) {
        let input = lines.join("\n");
        let t = counter();
        prop_assert_eq!(t.run(&input).unwrap(), t.run(&input).unwrap());
    }

    #[test]
    fn template_parser_never_panics(text in TEMPLATE_LINES) {
        let _ = Template::new(&text);
    }
}
