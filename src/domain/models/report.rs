//! The host-keyed placement report.

use serde::Serialize;

/// Applications observed on one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReport {
    /// Host identifier as reported by the platform
    pub host: String,

    /// Application names, ascending once the report is built
    pub apps: Vec<String>,
}

impl HostReport {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            apps: Vec::new(),
        }
    }
}

/// Ordered sequence of [`HostReport`]s, one per distinct host.
///
/// Only the report service builds non-empty reports, so a `Report` is always
/// either complete and ordered or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    hosts: Vec<HostReport>,
}

impl Report {
    pub(crate) fn from_sorted(hosts: Vec<HostReport>) -> Self {
        Self { hosts }
    }

    pub fn hosts(&self) -> &[HostReport] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Total number of placements across all hosts.
    pub fn placement_count(&self) -> usize {
        self.hosts.iter().map(|h| h.apps.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a HostReport;
    type IntoIter = std::slice::Iter<'a, HostReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}
