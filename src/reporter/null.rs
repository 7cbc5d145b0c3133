//! No-op sink
//!
//! Wired when event reporting is disabled so the dispatch point never has
//! to special-case an empty backend set.

use crate::reporter::{EventPayload, EventReporter};
use crate::resource::{AutoScalingGroup, Instance};
use async_trait::async_trait;

/// Sink that discards every operation
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

#[async_trait]
impl EventReporter for NullReporter {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn event(&self, _event: &EventPayload) {}

    async fn gauge(&self, _name: &str, _value: f64, _tags: &[String]) {}

    async fn count(&self, _name: &str, _tags: &[String]) {}

    async fn reapable_instance(&self, _instance: &mut Instance) {}

    async fn reapable_asg(&self, _asg: &mut AutoScalingGroup) {}
}
