//! Datadog sink
//!
//! Forwards events and metrics to the local collector agent and renders
//! reapable-discovery notifications. The collector client is constructed
//! lazily on first use: a failed construction is logged and re-attempted
//! on the next call, a successful one is cached for the process lifetime
//! and survives later send failures.

use crate::config::Config;
use crate::reporter::{EventPayload, EventReporter};
use crate::resource::{AutoScalingGroup, Instance};
use crate::statsd::StatsdClient;
use crate::template::{AsgEventContext, InstanceEventContext};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Sink that posts events and statistics to the Datadog agent
pub struct DatadogReporter {
    addr: SocketAddr,
    config: Config,
    client: Mutex<Option<StatsdClient>>,
    connect_attempts: AtomicU64,
}

impl DatadogReporter {
    pub fn new(config: Config) -> Self {
        Self {
            addr: config.statsd_addr,
            config,
            client: Mutex::new(None),
            connect_attempts: AtomicU64::new(0),
        }
    }

    /// Collector connection attempts made so far
    pub fn connect_attempts(&self) -> u64 {
        self.connect_attempts.load(Ordering::Relaxed)
    }

    /// Whether a collector client is currently cached
    pub async fn connected(&self) -> bool {
        self.client.lock().await.is_some()
    }

    /// Lock the client slot, constructing the client if none exists
    ///
    /// Construction failures are not cached: the next call re-attempts.
    /// A constructed client is never replaced.
    async fn acquire(&self) -> MutexGuard<'_, Option<StatsdClient>> {
        let mut guard = self.client.lock().await;
        if guard.is_none() {
            self.connect_attempts.fetch_add(1, Ordering::Relaxed);
            match StatsdClient::connect(self.addr).await {
                Ok(client) => *guard = Some(client),
                Err(e) => {
                    debug!(addr = %self.addr, error = %e, "Error creating collector client")
                }
            }
        }
        guard
    }
}

#[async_trait]
impl EventReporter for DatadogReporter {
    fn name(&self) -> &'static str {
        "datadog"
    }

    async fn event(&self, event: &EventPayload) {
        let guard = self.acquire().await;
        let Some(client) = guard.as_ref() else { return };
        match client.event(event).await {
            Ok(()) => debug!(title = %event.title, "Event posted to Datadog"),
            Err(e) => debug!(title = %event.title, error = %e, "Error reporting event"),
        }
    }

    async fn gauge(&self, name: &str, value: f64, tags: &[String]) {
        let guard = self.acquire().await;
        let Some(client) = guard.as_ref() else { return };
        match client.gauge(name, value, tags).await {
            Ok(()) => debug!(statistic = %name, "Statistic posted to Datadog"),
            Err(e) => debug!(statistic = %name, error = %e, "Error reporting statistic"),
        }
    }

    async fn count(&self, name: &str, tags: &[String]) {
        let guard = self.acquire().await;
        let Some(client) = guard.as_ref() else { return };
        match client.incr(name, tags).await {
            Ok(()) => debug!(statistic = %name, "Statistic posted to Datadog"),
            Err(e) => debug!(statistic = %name, error = %e, "Error reporting statistic"),
        }
    }

    async fn reapable_instance(&self, instance: &mut Instance) {
        let body = InstanceEventContext {
            instance,
            config: &self.config,
        }
        .render();
        let event = EventPayload::new(
            format!("Reapable Instance {} Discovered", instance.id),
            body,
        );
        self.event(&event).await;
        debug!(id = %instance.id, "Reapable instance event posted to Datadog");
    }

    async fn reapable_asg(&self, asg: &mut AutoScalingGroup) {
        let body = AsgEventContext {
            asg,
            config: &self.config,
        }
        .render();
        let event = EventPayload::new("Reapable ASG Discovered", body);
        self.event(&event).await;
        debug!(id = %asg.id, "Reapable ASG event posted to Datadog");
    }

    async fn health(&self) -> bool {
        self.acquire().await.is_some()
    }
}
