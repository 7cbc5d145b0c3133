//! Tag-updating sink
//!
//! Advances a discovered resource's reaper state one step and writes it
//! back through the injected [`StateTagger`]. The write happens after
//! every discovery, whether or not the state moved, so a lost tag is
//! repaired on the next scan. Metric operations are ignored.

use crate::reporter::{EventPayload, EventReporter};
use crate::resource::{AutoScalingGroup, Instance, StateTagger};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Sink that escalates reaper state via resource tags
pub struct TagReporter {
    tagger: Arc<dyn StateTagger>,
}

impl TagReporter {
    pub fn new(tagger: Arc<dyn StateTagger>) -> Self {
        Self { tagger }
    }
}

#[async_trait]
impl EventReporter for TagReporter {
    fn name(&self) -> &'static str {
        "tagger"
    }

    async fn event(&self, _event: &EventPayload) {}

    async fn gauge(&self, _name: &str, _value: f64, _tags: &[String]) {}

    async fn count(&self, _name: &str, _tags: &[String]) {}

    async fn reapable_instance(&self, instance: &mut Instance) {
        let updated = instance.increment_state();
        if updated {
            info!(
                id = %instance.id,
                region = %instance.region,
                state = %instance.reaper_state,
                "Updating reaper tag on instance"
            );
        }
        if let Err(e) = self.tagger.tag_instance(instance).await {
            debug!(id = %instance.id, error = %e, "Failed to persist reaper state");
        }
    }

    async fn reapable_asg(&self, asg: &mut AutoScalingGroup) {
        let updated = asg.increment_state();
        if updated {
            info!(
                id = %asg.id,
                region = %asg.region,
                state = %asg.reaper_state,
                "Updating reaper tag on ASG"
            );
        }
        if let Err(e) = self.tagger.tag_asg(asg).await {
            debug!(id = %asg.id, error = %e, "Failed to persist reaper state");
        }
    }
}
