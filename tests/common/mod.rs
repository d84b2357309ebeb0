//! Common test utilities for integration tests
//!
//! Provides a scripted in-memory platform that implements `PlatformClient`
//! and records how it was called.

#![allow(dead_code)]

use async_trait::async_trait;
use placement_report::domain::models::ReportConfig;
use placement_report::{
    Application, ApplicationPage, PageCursor, PlatformClient, PlatformError, ProcessInstance,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the scripted platform answers for one application's stats
#[derive(Clone)]
pub enum StatsScript {
    Instances(Vec<ProcessInstance>),
    DelayedInstances(Duration, Vec<ProcessInstance>),
    Fail(PlatformError),
    DelayedFail(Duration, PlatformError),
    Hang,
}

/// In-memory platform with scripted pages and per-application stats
#[derive(Default)]
pub struct ScriptedPlatform {
    pages: Vec<Result<Vec<Application>, PlatformError>>,
    stats: HashMap<String, StatsScript>,
    page_requests: AtomicUsize,
    stats_requests: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: AtomicUsize,
    cursors: Mutex<Vec<Option<String>>>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a catalog page
    pub fn page(mut self, apps: Vec<Application>) -> Self {
        self.pages.push(Ok(apps));
        self
    }

    /// Append a page whose request fails
    pub fn failing_page(mut self, err: PlatformError) -> Self {
        self.pages.push(Err(err));
        self
    }

    /// Running instances of `guid`, one per host
    pub fn instances(mut self, guid: &str, hosts: &[&str]) -> Self {
        self.stats.insert(guid.to_string(), StatsScript::Instances(instances(hosts)));
        self
    }

    pub fn stats(mut self, guid: &str, script: StatsScript) -> Self {
        self.stats.insert(guid.to_string(), script);
        self
    }

    pub fn into_client(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn page_requests(&self) -> usize {
        self.page_requests.load(Ordering::SeqCst)
    }

    pub fn stats_requests(&self) -> usize {
        self.stats_requests.load(Ordering::SeqCst)
    }

    /// Stats calls started but neither finished nor dropped
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Cursors received by `list_applications`, in call order
    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

/// Decrements the in-flight counter however the call ends, including when
/// its future is dropped.
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlatformClient for ScriptedPlatform {
    async fn list_applications(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ApplicationPage, PlatformError> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        self.cursors
            .lock()
            .unwrap()
            .push(cursor.map(|c| c.as_str().to_string()));

        let index = match cursor {
            None => 0,
            Some(c) => c
                .as_str()
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| PlatformError::MalformedResponse(format!("unknown cursor {c}")))?,
        };

        let Some(page) = self.pages.get(index) else {
            // An empty catalog still answers the first request
            return Ok(ApplicationPage::last(Vec::new()));
        };
        let apps = page.clone()?;

        if index + 1 < self.pages.len() {
            Ok(ApplicationPage::with_next(apps, PageCursor::new(format!("page-{}", index + 1))))
        } else {
            Ok(ApplicationPage::last(apps))
        }
    }

    async fn process_stats(
        &self,
        app: &Application,
        _process_type: &str,
    ) -> Result<Vec<ProcessInstance>, PlatformError> {
        self.stats_requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(Arc::clone(&self.in_flight));

        match self.stats.get(&app.guid).cloned() {
            None => Ok(Vec::new()),
            Some(StatsScript::Instances(instances)) => Ok(instances),
            Some(StatsScript::DelayedInstances(delay, instances)) => {
                tokio::time::sleep(delay).await;
                Ok(instances)
            }
            Some(StatsScript::Fail(err)) => Err(err),
            Some(StatsScript::DelayedFail(delay, err)) => {
                tokio::time::sleep(delay).await;
                Err(err)
            }
            Some(StatsScript::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn app(guid: &str, name: &str) -> Application {
    Application::new(guid, name)
}

pub fn instances(hosts: &[&str]) -> Vec<ProcessInstance> {
    hosts
        .iter()
        .enumerate()
        .map(|(i, host)| ProcessInstance::running(u32::try_from(i).unwrap(), *host))
        .collect()
}

pub fn report_config(max_concurrency: usize, timeout_secs: u64) -> ReportConfig {
    ReportConfig {
        process_type: "web".to_string(),
        max_concurrency,
        timeout_secs,
    }
}

/// Flatten a report into `(host, apps)` pairs for assertions
pub fn entries(report: &placement_report::Report) -> Vec<(String, Vec<String>)> {
    report
        .hosts()
        .iter()
        .map(|h| (h.host.clone(), h.apps.clone()))
        .collect()
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
