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

//! # Nested views
//!
//! Hierarchical CLI output (for instance a subscription containing several sensor groups) is
//! usually parsed with a number of `List` values, where the i-th entry of every list describes
//! the i-th child object. [`regroup`] turns such parallel columns back into a list of objects.

/// A column of a parallel group: the captured strings, and the function storing one string into
/// the target object.
pub type Column<'a, T> = (&'a [String], &'a dyn Fn(&mut T, &str));

/// Regroup parallel columns into one object per index.
///
/// The number of objects is the length of the *first* column. Every other column is copied only
/// for the indices it actually has: if a column is shorter than the first one, the corresponding
/// field of the remaining objects keeps its default value. Entries of columns longer than the
/// first one are ignored.
///
/// ```
/// use textfsm::nested::regroup;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Group {
///     id: String,
///     interval: String,
/// }
///
/// let ids = vec![String::from("a"), String::from("b")];
/// let intervals = vec![String::from("10")];
/// let groups = regroup::<Group>(&[
///     (ids.as_slice(), &|g: &mut Group, s: &str| g.id = s.to_string()),
///     (intervals.as_slice(), &|g: &mut Group, s: &str| g.interval = s.to_string()),
/// ]);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[1], Group { id: String::from("b"), interval: String::new() });
/// ```
pub fn regroup<T: Default>(columns: &[Column<'_, T>]) -> Vec<T> {
    let len = match columns.first() {
        Some((column, _)) => column.len(),
        None => return Vec::new(),
    };

    (0..len)
        .map(|i| {
            let mut item = T::default();
            for (column, set) in columns {
                if let Some(text) = column.get(i) {
                    set(&mut item, text);
                }
            }
            item
        })
        .collect()
}
