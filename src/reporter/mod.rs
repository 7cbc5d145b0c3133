//! Event reporter sinks
//!
//! Sinks receive every notification the reaper emits in a fan-out
//! pattern. All operations are fire-and-forget: a sink that cannot
//! deliver logs the failure at debug level and drops it, so notification
//! never disturbs resource management.

pub mod datadog;
pub mod null;
pub mod tagger;

use crate::resource::{AutoScalingGroup, Instance};
use async_trait::async_trait;
use std::collections::HashMap;

pub use datadog::DatadogReporter;
pub use null::NullReporter;
pub use tagger::TagReporter;

/// A free-form notification payload
///
/// Built ad hoc at each call site and handed to every active sink; never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct EventPayload {
    /// Short headline
    pub title: String,
    /// Markdown body
    pub body: String,
    /// Collector-specific fields (priority, alert type, ...)
    pub fields: HashMap<String, String>,
    /// Tags attached to the event
    pub tags: Vec<String>,
}

impl EventPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            fields: HashMap::new(),
            tags: Vec::new(),
        }
    }
}

/// EventReporter trait - the capability set every sink implements
///
/// A sink targets one notification backend. Every sink implements all
/// five operations, even if only as no-ops, so the dispatch point never
/// special-cases sink types.
///
/// # Example
///
/// ```ignore
/// struct SlackReporter {
///     webhook_url: String,
/// }
///
/// #[async_trait]
/// impl EventReporter for SlackReporter {
///     fn name(&self) -> &'static str {
///         "slack"
///     }
///
///     async fn event(&self, event: &EventPayload) {
///         if let Err(e) = self.post(&event.title, &event.body).await {
///             tracing::debug!(error = %e, "Failed to post to Slack");
///         }
///     }
///
///     // remaining operations elided
/// }
/// ```
#[async_trait]
pub trait EventReporter: Send + Sync {
    /// Sink name for identification and logging
    fn name(&self) -> &'static str;

    /// Emit a free-form notification
    async fn event(&self, event: &EventPayload);

    /// Emit a point-in-time numeric measurement
    async fn gauge(&self, name: &str, value: f64, tags: &[String]);

    /// Emit a unit increment
    async fn count(&self, name: &str, tags: &[String]);

    /// A reapable instance was discovered
    ///
    /// Sinks may render a notification, advance the instance's reaper
    /// state, or ignore the discovery entirely.
    async fn reapable_instance(&self, instance: &mut Instance);

    /// A reapable auto-scaling group was discovered
    async fn reapable_asg(&self, asg: &mut AutoScalingGroup);

    /// Health check for the backing destination
    async fn health(&self) -> bool {
        true
    }
}
