//! Reporter registry - the dispatch point
//!
//! Holds the active sink set. Populated once at startup from
//! configuration and read-only during operation; every operation fans out
//! to all registered sinks uniformly, with no sink-type special cases.

use crate::config::Config;
use crate::reporter::{DatadogReporter, EventPayload, EventReporter, NullReporter, TagReporter};
use crate::resource::{AutoScalingGroup, Instance, StateTagger};
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of active event reporters
pub struct ReporterRegistry {
    reporters: Vec<Arc<dyn EventReporter>>,
}

impl ReporterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            reporters: Vec::new(),
        }
    }

    /// Build the active sink set from configuration
    ///
    /// Falls back to the null sink when nothing is enabled so dispatch
    /// always has a uniform backend set to talk to.
    pub fn from_config(config: &Config, tagger: Arc<dyn StateTagger>) -> Self {
        let mut registry = Self::new();
        if config.datadog {
            registry.register(Arc::new(DatadogReporter::new(config.clone())));
        }
        if config.tagging {
            registry.register(Arc::new(TagReporter::new(tagger)));
        }
        if registry.is_empty() {
            registry.register(Arc::new(NullReporter));
        }
        registry
    }

    /// Register a sink
    ///
    /// All notifications will be sent to all registered sinks.
    pub fn register(&mut self, reporter: Arc<dyn EventReporter>) {
        info!(reporter = reporter.name(), "Registered event reporter");
        self.reporters.push(reporter);
    }

    /// Number of registered sinks
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    /// Names of the registered sinks
    pub fn names(&self) -> Vec<&'static str> {
        self.reporters.iter().map(|r| r.name()).collect()
    }

    /// Fan a free-form event out to every sink
    pub async fn event(&self, event: &EventPayload) {
        for reporter in &self.reporters {
            reporter.event(event).await;
        }
    }

    /// Fan a gauge sample out to every sink
    pub async fn gauge(&self, name: &str, value: f64, tags: &[String]) {
        for reporter in &self.reporters {
            reporter.gauge(name, value, tags).await;
        }
    }

    /// Fan a counter increment out to every sink
    pub async fn count(&self, name: &str, tags: &[String]) {
        for reporter in &self.reporters {
            reporter.count(name, tags).await;
        }
    }

    /// Announce a reapable instance to every sink
    ///
    /// Sinks run sequentially: a state-escalating sink finishes before
    /// the next sink observes the instance.
    pub async fn reapable_instance(&self, instance: &mut Instance) {
        for reporter in &self.reporters {
            reporter.reapable_instance(instance).await;
        }
    }

    /// Announce a reapable auto-scaling group to every sink
    pub async fn reapable_asg(&self, asg: &mut AutoScalingGroup) {
        for reporter in &self.reporters {
            reporter.reapable_asg(asg).await;
        }
    }

    /// True when every sink's destination is healthy
    pub async fn healthy(&self) -> bool {
        for reporter in &self.reporters {
            if !reporter.health().await {
                debug!(reporter = reporter.name(), "Reporter unhealthy");
                return false;
            }
        }
        true
    }
}

impl Default for ReporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
