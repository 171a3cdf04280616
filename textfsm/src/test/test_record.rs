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

use crate::record::RecordBuilder;
use crate::{Error, Record, Template, Value, ValueKind};

fn template() -> Template {
    Template::new(
        r"Value Filldown HOST (\S+)
Value Required PEER (\S+)
Value List ROUTES (\S+)

Start
  ^${PEER}
",
    )
    .unwrap()
}

#[test]
fn builder_set_and_finalize() {
    let t = template();
    let mut builder = RecordBuilder::new(t.values(), None);
    assert_eq!(builder.missing_required(), Some("PEER"));

    assert!(builder.set("HOST", "r1"));
    assert!(builder.set("PEER", "10.0.0.1"));
    assert!(builder.set("PEER", "10.0.0.2"));
    assert!(builder.set("ROUTES", "a"));
    assert!(builder.set("ROUTES", "b"));
    assert!(!builder.set("UNKNOWN", "x"));
    assert_eq!(builder.missing_required(), None);
    assert_eq!(builder.get("PEER"), Some(&Value::from("10.0.0.2")));

    let (record, carry) = builder.finalize();
    assert_eq!(record.len(), 3);
    assert_eq!(record.scalar("HOST").unwrap(), "r1");
    assert_eq!(record.scalar("PEER").unwrap(), "10.0.0.2");
    assert_eq!(record.list("ROUTES").unwrap(), &["a", "b"]);

    assert_eq!(carry.len(), 1);
    let next = RecordBuilder::new(t.values(), Some(&carry));
    assert_eq!(next.get("HOST"), Some(&Value::from("r1")));
    assert_eq!(next.get("PEER"), Some(&Value::from("")));
    assert_eq!(next.get("ROUTES"), Some(&Value::List(Vec::new())));
}

#[test]
fn builder_ignores_carry_of_wrong_kind() {
    let t = template();
    let carry: Record = vec![("HOST", Value::from(vec!["r1"]))].into_iter().collect();
    let builder = RecordBuilder::new(t.values(), Some(&carry));
    assert_eq!(builder.get("HOST"), Some(&Value::from("")));
}

#[test]
fn builder_clear() {
    let t = template();
    let mut builder = RecordBuilder::new(t.values(), None);
    builder.set("HOST", "r1");
    builder.set("PEER", "p");
    builder.set("ROUTES", "a");

    builder.clear();
    assert_eq!(builder.get("HOST"), Some(&Value::from("r1")));
    assert!(builder.get("PEER").unwrap().is_empty());
    assert!(builder.get("ROUTES").unwrap().is_empty());

    builder.clear_all();
    assert!(builder.get("HOST").unwrap().is_empty());
}

#[test]
fn typed_access() {
    let record: Record = vec![("NAME", Value::from("eth0")), ("ADDR", Value::from(vec!["a", "b"]))]
        .into_iter()
        .collect();

    assert_eq!(record.scalar("NAME"), Ok("eth0"));
    assert_eq!(record.list("ADDR").unwrap().len(), 2);
    assert_eq!(
        record.scalar("ADDR"),
        Err(Error::MarshalType {
            value: String::from("ADDR"),
            expected: ValueKind::Scalar,
            found: Some(ValueKind::List),
        })
    );
    assert_eq!(
        record.list("NAME"),
        Err(Error::MarshalType {
            value: String::from("NAME"),
            expected: ValueKind::List,
            found: Some(ValueKind::Scalar),
        })
    );
    let err = record.scalar("MISSING").unwrap_err();
    assert_eq!(err.to_string(), "Cannot marshal value MISSING: expected string, found nothing");
}

#[test]
fn record_iterates_by_name() {
    let mut record = Record::new();
    assert!(record.is_empty());
    record.insert("b", "2");
    record.insert("a", "1");
    assert_eq!(record.insert("b", "3"), Some(Value::from("2")));

    let names: Vec<&String> = record.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["a", "b"]);
    let names: Vec<&String> = (&record).into_iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn value_accessors() {
    let scalar = Value::from(String::from("x"));
    assert_eq!(scalar.kind(), ValueKind::Scalar);
    assert_eq!(scalar.as_scalar(), Some("x"));
    assert_eq!(scalar.as_list(), None);

    let list = Value::from(vec![String::from("x")]);
    assert_eq!(list.kind(), ValueKind::List);
    assert_eq!(list.as_scalar(), None);
    assert_eq!(list.as_list().map(|l| l.len()), Some(1));

    assert!(Value::empty(ValueKind::List).is_empty());
    assert!(Value::empty(ValueKind::Scalar).is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn record_serializes_as_map() {
    let record: Record = vec![("NAME", Value::from("eth0")), ("ADDR", Value::from(vec!["a"]))]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"ADDR":["a"],"NAME":"eth0"}"#);
}
