//! Folds placement records into one entry per host.

use std::collections::HashMap;

use crate::domain::models::{HostReport, PlacementRecord};

/// Host-keyed accumulator for placement records.
///
/// Repeated (host, application) observations are kept: an application with
/// two instances on one host is listed twice for that host.
#[derive(Debug, Default)]
pub struct HostAggregator {
    hosts: HashMap<String, HostReport>,
}

impl HostAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, record: PlacementRecord) {
        self.hosts
            .entry(record.host)
            .or_insert_with_key(|host| HostReport::new(host.clone()))
            .apps
            .push(record.app_name);
    }

    pub fn fold_all(&mut self, records: impl IntoIterator<Item = PlacementRecord>) {
        for record in records {
            self.fold(record);
        }
    }

    /// Consume the aggregator. Each host's application names come back sorted
    /// ascending; the hosts themselves are in no particular order.
    pub fn finish(self) -> Vec<HostReport> {
        self.hosts
            .into_values()
            .map(|mut host| {
                host.apps.sort_unstable();
                host
            })
            .collect()
    }
}
