//! Boundary view of the reaper's domain objects
//!
//! The lifecycle state machine and the cloud-backed resource objects live
//! upstream; this module carries only the attributes and operations the
//! notification layer consumes.

use crate::error::SinkError;
use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;

/// Reaper lifecycle state, advanced one notification at a time
///
/// `Whitelist` and `Ignore` are parked states set by operator action;
/// `increment` never moves a resource out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaperState {
    #[default]
    Start,
    FirstNotification,
    SecondNotification,
    Reapable,
    Whitelist,
    Ignore,
}

impl ReaperState {
    /// Advance one step
    ///
    /// Returns false when nothing moved: the state is terminal or parked.
    pub fn increment(&mut self) -> bool {
        let next = match self {
            ReaperState::Start => ReaperState::FirstNotification,
            ReaperState::FirstNotification => ReaperState::SecondNotification,
            ReaperState::SecondNotification => ReaperState::Reapable,
            ReaperState::Reapable | ReaperState::Whitelist | ReaperState::Ignore => return false,
        };
        *self = next;
        true
    }
}

impl fmt::Display for ReaperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReaperState::Start => "start",
            ReaperState::FirstNotification => "notify1",
            ReaperState::SecondNotification => "notify2",
            ReaperState::Reapable => "reapable",
            ReaperState::Whitelist => "whitelist",
            ReaperState::Ignore => "ignore",
        };
        f.write_str(s)
    }
}

/// EC2 instance lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Terminated,
    Stopping,
    Stopped,
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceState::Pending => "pending",
            InstanceState::Running => "running",
            InstanceState::ShuttingDown => "shutting-down",
            InstanceState::Terminated => "terminated",
            InstanceState::Stopping => "stopping",
            InstanceState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// An EC2 instance as seen by the notification layer
#[derive(Debug, Clone)]
pub struct Instance {
    /// Instance ID (e.g. "i-0abc123")
    pub id: String,
    /// Region the instance runs in
    pub region: String,
    /// Name tag, if one is set
    pub name: Option<String>,
    /// Owner tag; `None` means unowned
    pub owner: Option<String>,
    /// EC2 lifecycle state
    pub state: InstanceState,
    /// Instance type (e.g. "m3.large")
    pub instance_type: String,
    /// Public IP, if one is assigned
    pub public_ip: Option<IpAddr>,
    /// Current reaper state
    pub reaper_state: ReaperState,
}

impl Instance {
    pub fn owned(&self) -> bool {
        self.owner.is_some()
    }

    /// AWS console deep link for this instance
    pub fn console_url(&self) -> String {
        format!(
            "https://{region}.console.aws.amazon.com/ec2/v2/home?region={region}#Instances:instanceId={id}",
            region = self.region,
            id = self.id,
        )
    }

    /// Advance the reaper state one step; true if it moved
    pub fn increment_state(&mut self) -> bool {
        self.reaper_state.increment()
    }
}

/// An auto-scaling group as seen by the notification layer
#[derive(Debug, Clone)]
pub struct AutoScalingGroup {
    /// ASG name
    pub id: String,
    /// Region the group runs in
    pub region: String,
    /// Owner tag; `None` means unowned
    pub owner: Option<String>,
    /// Current reaper state
    pub reaper_state: ReaperState,
}

impl AutoScalingGroup {
    pub fn owned(&self) -> bool {
        self.owner.is_some()
    }

    /// AWS console deep link for this group
    pub fn console_url(&self) -> String {
        format!(
            "https://{region}.console.aws.amazon.com/ec2/autoscaling/home?region={region}#AutoScalingGroups:id={id}",
            region = self.region,
            id = self.id,
        )
    }

    /// Advance the reaper state one step; true if it moved
    pub fn increment_state(&mut self) -> bool {
        self.reaper_state.increment()
    }
}

/// Persists reaper state back onto a resource
///
/// Implemented by the surrounding reaper against the cloud tagging API.
/// The write must be idempotent: the tag sink persists after every
/// discovery, whether or not the state moved.
#[async_trait]
pub trait StateTagger: Send + Sync {
    /// Write the instance's current reaper state to its tags
    async fn tag_instance(&self, instance: &Instance) -> Result<(), SinkError>;

    /// Write the group's current reaper state to its tags
    async fn tag_asg(&self, asg: &AutoScalingGroup) -> Result<(), SinkError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reaper_state_increments_to_terminal() {
        let mut state = ReaperState::Start;
        assert!(state.increment());
        assert_eq!(state, ReaperState::FirstNotification);
        assert!(state.increment());
        assert_eq!(state, ReaperState::SecondNotification);
        assert!(state.increment());
        assert_eq!(state, ReaperState::Reapable);
        assert!(!state.increment());
        assert_eq!(state, ReaperState::Reapable);
    }

    #[test]
    fn test_parked_states_never_move() {
        for parked in [ReaperState::Whitelist, ReaperState::Ignore] {
            let mut state = parked;
            assert!(!state.increment());
            assert_eq!(state, parked);
        }
    }

    #[test]
    fn test_reaper_state_tag_values() {
        assert_eq!(ReaperState::FirstNotification.to_string(), "notify1");
        assert_eq!(ReaperState::Reapable.to_string(), "reapable");
    }

    #[test]
    fn test_instance_console_url() {
        let instance = Instance {
            id: "i-123".to_string(),
            region: "us-east-1".to_string(),
            name: None,
            owner: None,
            state: InstanceState::Running,
            instance_type: "m3.large".to_string(),
            public_ip: None,
            reaper_state: ReaperState::Start,
        };
        assert!(!instance.owned());
        let url = instance.console_url();
        assert!(url.contains("us-east-1"));
        assert!(url.ends_with("instanceId=i-123"));
    }
}
