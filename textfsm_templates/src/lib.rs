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

//! # TextFSM templates for router CLI output
//!
//! This crate ships TextFSM templates for a number of `show` commands, together with a typed
//! parser for each of them, generated at compile time by
//! [`textfsm_template!`](textfsm_macros::textfsm_template).
//!
//! | Command                                   | Parser                                   |
//! |-------------------------------------------|------------------------------------------|
//! | `ping ethernet cfm ...`                   | [`PingEthernet`]                         |
//! | `show interface`                          | [`ShowInterface`]                        |
//! | `show telemetry model-driven subscription`| [`ShowTelemetryModelDrivenSubscription`] |
//!
//! ```
//! use textfsm_templates::PingEthernet;
//!
//! let mut ping = PingEthernet::default();
//! ping.parse("Success rate is 100.0 percent (5/5), round-trip min/avg/max = 1/2/4 ms\n")?;
//! assert_eq!(ping.rows[0].get_round_trip_max(), "4");
//! # Ok::<(), textfsm::Error>(())
//! ```

pub mod ping_ethernet;
pub mod show_interface;
pub mod show_telemetry_model_driven_subscription;

// test modules
mod test;

pub use ping_ethernet::{PingEthernet, PingEthernetRow};
pub use show_interface::{ShowInterface, ShowInterfaceRow};
pub use show_telemetry_model_driven_subscription::{
    ShowTelemetryModelDrivenSubscription, ShowTelemetryModelDrivenSubscriptionRow, Subscription,
};
