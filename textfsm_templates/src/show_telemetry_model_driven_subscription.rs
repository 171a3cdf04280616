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

//! Parser for `show telemetry model-driven subscription`
//!
//! Every row describes one subscription. Sensor paths and collection groups are parsed as
//! parallel `List` values; [`ShowTelemetryModelDrivenSubscriptionRow::to_nested`] regroups them
//! into a [`Subscription`].
//!
//! The last subscription of the output is not followed by a `Record` action, so `parse` uses
//! [`Options::record_at_eof`](textfsm::Options::record_at_eof) to keep it:
//!
//! ```
//! use textfsm_templates::ShowTelemetryModelDrivenSubscription;
//!
//! let output = "Subscription:  Sub1\n-------------\n  State:       ACTIVE\n";
//! let mut parser = ShowTelemetryModelDrivenSubscription::default();
//! parser.parse(output)?;
//! assert_eq!(parser.get_all_subscription_name(), vec!["Sub1"]);
//! # Ok::<(), textfsm::Error>(())
//! ```

use textfsm::nested::regroup;
use textfsm_macros::textfsm_template;

use log::*;

textfsm_template!(
    ShowTelemetryModelDrivenSubscription,
    "templates/show_telemetry_model_driven_subscription.textfsm",
    record_at_eof
);

/// A telemetry subscription, with its sensor, destination and collection groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscription {
    /// Name of the subscription
    pub subscription_name: String,
    /// Numeric ID
    pub subscription_id: String,
    /// State, like `ACTIVE`
    pub state: String,
    /// Sensor paths of all sensor groups, one entry per path
    pub sensor_paths: Vec<SensorPath>,
    /// The destination of the subscription
    pub destination_group: DestinationGroup,
    /// Collection groups, one entry per group
    pub collection_groups: Vec<CollectionGroup>,
}

/// A sensor path, with the sensor group settings listed next to it.
///
/// A sensor group lists its ID once, followed by any number of paths. The group columns are
/// therefore shorter than the path column, and the group fields of later paths stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorPath {
    /// Sensor group ID
    pub group_id: String,
    /// Sample interval in milliseconds
    pub sample_interval: String,
    /// Heartbeat interval
    pub heartbeat_interval: String,
    /// The sensor path
    pub path: String,
    /// Resolution state of the sensor path
    pub state: String,
}

/// Destination group of a subscription
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationGroup {
    /// Group ID
    pub id: String,
    /// Destination address
    pub ip: String,
    /// Destination port
    pub port: String,
    /// DSCP/QoS setting
    pub dscp_qos: String,
    /// Compression
    pub compression: String,
    /// Encoding, like `self-describing-gpb`
    pub encoding: String,
    /// Transport, like `grpc`
    pub transport: String,
    /// State, like `Active`
    pub state: String,
    /// TLS mutual authentication
    pub tls_mutual: String,
    /// Total number of bytes sent
    pub total_bytes_sent: String,
    /// Total number of packets sent
    pub total_packets_sent: String,
    /// Time of the last message
    pub last_sent_time: String,
    /// Destination endpoint
    pub endpoint: String,
    /// Initial updates
    pub initial_updates: String,
}

/// A collection group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionGroup {
    /// Collection group ID
    pub id: String,
    /// Sample interval in milliseconds
    pub sample_interval: String,
    /// Heartbeat interval
    pub heartbeat: String,
    /// Number of collections
    pub num_collection: String,
    /// The collected sensor path
    pub path: String,
}

impl ShowTelemetryModelDrivenSubscriptionRow {
    /// Regroup the parallel `List` values of this row.
    ///
    /// There is one entry per sensor path, and one collection group entry per collection ID.
    /// Shorter columns leave the remaining entries at their default value.
    pub fn to_nested(&self) -> Subscription {
        if self.sensor_group_id.len() != self.sensor_path.len()
            || self.collection_id.len() != self.collection_path.len()
        {
            debug!(
                "Subscription {}: sensor or collection columns have different lengths",
                self.subscription_name
            );
        }

        let sensor_paths = regroup::<SensorPath>(&[
            (self.sensor_path.as_slice(), &|p: &mut SensorPath, s: &str| p.path = s.to_string()),
            (self.sensor_group_id.as_slice(), &|p: &mut SensorPath, s: &str| {
                p.group_id = s.to_string()
            }),
            (self.sample_interval.as_slice(), &|p: &mut SensorPath, s: &str| {
                p.sample_interval = s.to_string()
            }),
            (self.heartbeat_interval.as_slice(), &|p: &mut SensorPath, s: &str| {
                p.heartbeat_interval = s.to_string()
            }),
            (self.sensor_path_state.as_slice(), &|p: &mut SensorPath, s: &str| {
                p.state = s.to_string()
            }),
        ]);

        let collection_groups = regroup::<CollectionGroup>(&[
            (self.collection_id.as_slice(), &|g: &mut CollectionGroup, s: &str| {
                g.id = s.to_string()
            }),
            (self.collection_sample_interval.as_slice(), &|g: &mut CollectionGroup, s: &str| {
                g.sample_interval = s.to_string()
            }),
            (self.collection_heartbeat.as_slice(), &|g: &mut CollectionGroup, s: &str| {
                g.heartbeat = s.to_string()
            }),
            (self.num_collection.as_slice(), &|g: &mut CollectionGroup, s: &str| {
                g.num_collection = s.to_string()
            }),
            (self.collection_path.as_slice(), &|g: &mut CollectionGroup, s: &str| {
                g.path = s.to_string()
            }),
        ]);

        Subscription {
            subscription_name: self.subscription_name.clone(),
            subscription_id: self.subscription_id.clone(),
            state: self.state.clone(),
            sensor_paths,
            destination_group: DestinationGroup {
                id: self.dest_group_id.clone(),
                ip: self.dest_ip.clone(),
                port: self.dest_port.clone(),
                dscp_qos: self.dscp_qos.clone(),
                compression: self.compression.clone(),
                encoding: self.encoding.clone(),
                transport: self.transport.clone(),
                state: self.dest_state.clone(),
                tls_mutual: self.tls_mutual.clone(),
                total_bytes_sent: self.total_bytes_sent.clone(),
                total_packets_sent: self.total_packets_sent.clone(),
                last_sent_time: self.last_sent_time.clone(),
                endpoint: self.dest_endpoint.clone(),
                initial_updates: self.initial_updates.clone(),
            },
            collection_groups,
        }
    }
}
