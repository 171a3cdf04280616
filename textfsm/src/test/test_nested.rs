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

use crate::nested::regroup;
use crate::Template;

#[derive(Debug, Default, PartialEq)]
struct Sensor {
    path: String,
    interval: String,
    state: String,
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn shorter_column_is_truncated() {
    let paths = strings(&["a", "b", "c"]);
    let intervals = strings(&["10", "20", "30"]);
    let states = strings(&["up", "down"]);

    let sensors = regroup::<Sensor>(&[
        (paths.as_slice(), &|s: &mut Sensor, v: &str| s.path = v.to_string()),
        (intervals.as_slice(), &|s: &mut Sensor, v: &str| s.interval = v.to_string()),
        (states.as_slice(), &|s: &mut Sensor, v: &str| s.state = v.to_string()),
    ]);

    assert_eq!(sensors.len(), 3);
    assert_eq!(
        sensors[1],
        Sensor { path: String::from("b"), interval: String::from("20"), state: String::from("down") }
    );
    assert_eq!(
        sensors[2],
        Sensor { path: String::from("c"), interval: String::from("30"), state: String::new() }
    );
}

#[test]
fn first_column_defines_length() {
    let paths = strings(&["a"]);
    let intervals = strings(&["10", "20"]);
    let sensors = regroup::<Sensor>(&[
        (paths.as_slice(), &|s: &mut Sensor, v: &str| s.path = v.to_string()),
        (intervals.as_slice(), &|s: &mut Sensor, v: &str| s.interval = v.to_string()),
    ]);
    assert_eq!(sensors.len(), 1);
    assert_eq!(sensors[0].interval, "10");

    let empty: Vec<String> = Vec::new();
    let sensors =
        regroup::<Sensor>(&[(empty.as_slice(), &|s: &mut Sensor, v: &str| s.path = v.to_string())]);
    assert!(sensors.is_empty());

    let sensors = regroup::<Sensor>(&[]);
    assert!(sensors.is_empty());
}

#[test]
fn regroup_parsed_lists() {
    let template = Template::new(
        r"Value List PATH (\S+)
Value List INTERVAL (\d+)

Start
  ^\s+path ${PATH}
  ^\s+interval ${INTERVAL}
",
    )
    .unwrap();
    let input = "sensor-group\n  path a\n  interval 10\n  path b\n  interval 20\n  path c\n";
    let records = template.run_with_options(input, &crate::Options { record_at_eof: true }).unwrap();
    assert_eq!(records.len(), 1);

    let paths = records[0].list("PATH").unwrap();
    let intervals = records[0].list("INTERVAL").unwrap();
    let sensors = regroup::<Sensor>(&[
        (paths, &|s: &mut Sensor, v: &str| s.path = v.to_string()),
        (intervals, &|s: &mut Sensor, v: &str| s.interval = v.to_string()),
    ]);
    let summary: Vec<(&str, &str)> =
        sensors.iter().map(|s| (s.path.as_str(), s.interval.as_str())).collect();
    assert_eq!(summary, vec![("a", "10"), ("b", "20"), ("c", "")]);
}
