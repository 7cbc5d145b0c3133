//! Reaper notification layer - multi-backend event dispatch
//!
//! The reaper's policy engine decides *whether* a resource is reapable;
//! this crate decides *who hears about it*. Sinks implementing the
//! [`EventReporter`] capability set are registered once at startup and
//! every operation fans out to all of them.
//!
//! # Architecture
//!
//! ```text
//! reaper loop ──► ReporterRegistry ──► [Datadog | Tagger | Null]
//! ```
//!
//! Notification is best-effort: a sink that cannot deliver logs the
//! failure and drops it. No error from this layer ever reaches the
//! resource-lifecycle caller.

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

pub mod config;
pub mod error;
pub mod links;
pub mod registry;
pub mod reporter;
pub mod resource;
pub mod statsd;
pub mod template;

pub use config::{Config, LogFormat};
pub use error::{NotifyError, Result, SinkError};
pub use registry::ReporterRegistry;
pub use reporter::{DatadogReporter, EventPayload, EventReporter, NullReporter, TagReporter};
pub use resource::{AutoScalingGroup, Instance, InstanceState, ReaperState, StateTagger};
pub use statsd::StatsdClient;
pub use template::{AsgEventContext, InstanceEventContext};
