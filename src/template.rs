//! Reapable-discovery message rendering
//!
//! Pure renderers that turn a resource plus configuration into the
//! Markdown body posted with discovery events. The `%%%` delimiters and
//! literal `\n` sequences are part of the collector's Markdown framing.
//! Conditional lines (owner, public IP, instance name) are omitted
//! entirely when the data is absent.

use crate::config::Config;
use crate::links;
use crate::resource::{AutoScalingGroup, Instance};
use std::fmt::Write;

/// Render context for a reapable instance discovery
///
/// Composed per call and never retained.
#[derive(Debug, Clone, Copy)]
pub struct InstanceEventContext<'a> {
    pub instance: &'a Instance,
    pub config: &'a Config,
}

impl InstanceEventContext<'_> {
    /// Render the notification body
    ///
    /// Deterministic for a given context.
    pub fn render(&self) -> String {
        let i = self.instance;
        let c = self.config;
        let console = i.console_url();

        let mut out = String::new();
        out.push_str("%%%\n");
        out.push_str("Reaper has discovered an instance qualified as reapable: ");
        if let Some(name) = &i.name {
            write!(out, "\"{name}\" ").ok();
        }
        writeln!(
            out,
            "[{id}]({console}) in region: [{region}](https://{region}.console.aws.amazon.com/ec2/v2/home?region={region}).\\n",
            id = i.id,
            region = i.region,
        )
        .ok();
        if let Some(owner) = &i.owner {
            writeln!(out, "Owned by {owner}.\\n").ok();
        }
        writeln!(out, "State: {}.\\n", i.state).ok();
        writeln!(out, "Instance Type: {}.\\n", i.instance_type).ok();
        if let Some(ip) = i.public_ip {
            writeln!(out, "This instance's public IP: {ip}\\n").ok();
        }
        writeln!(out, "{console}\\n").ok();
        writeln!(out, "[AWS Console URL]({console})\\n").ok();
        writeln!(
            out,
            "[Whitelist]({}) this instance.",
            links::make_whitelist_link(&c.token_secret, &c.http_api_url, &i.region, &i.id)
        )
        .ok();
        writeln!(
            out,
            "[Stop]({}) this instance.",
            links::make_stop_link(&c.token_secret, &c.http_api_url, &i.region, &i.id)
        )
        .ok();
        writeln!(
            out,
            "[Terminate]({}) this instance.",
            links::make_terminate_link(&c.token_secret, &c.http_api_url, &i.region, &i.id)
        )
        .ok();
        out.push_str("%%%");
        out
    }
}

/// Render context for a reapable auto-scaling group discovery
#[derive(Debug, Clone, Copy)]
pub struct AsgEventContext<'a> {
    pub asg: &'a AutoScalingGroup,
    pub config: &'a Config,
}

impl AsgEventContext<'_> {
    /// Render the notification body
    pub fn render(&self) -> String {
        let a = self.asg;
        let c = self.config;
        let console = a.console_url();

        let mut out = String::new();
        out.push_str("%%%\n");
        writeln!(
            out,
            "Reaper has discovered an ASG qualified as reapable: [{id}]({console}) in region: [{region}](https://{region}.console.aws.amazon.com/ec2/v2/home?region={region}).\\n",
            id = a.id,
            region = a.region,
        )
        .ok();
        if let Some(owner) = &a.owner {
            writeln!(out, "Owned by {owner}.\\n").ok();
        }
        writeln!(out, "{console}\\n").ok();
        writeln!(out, "[AWS Console URL]({console})\\n").ok();
        writeln!(
            out,
            "[Whitelist]({}) this ASG.",
            links::make_whitelist_link(&c.token_secret, &c.http_api_url, &a.region, &a.id)
        )
        .ok();
        writeln!(
            out,
            "[Terminate]({}) this ASG.\\n",
            links::make_terminate_link(&c.token_secret, &c.http_api_url, &a.region, &a.id)
        )
        .ok();
        writeln!(
            out,
            "[Scale]({}) this ASG to 0 instances",
            links::make_stop_link(&c.token_secret, &c.http_api_url, &a.region, &a.id)
        )
        .ok();
        writeln!(
            out,
            "[Force Scale]({}) this ASG to 0 instances (changes minimum)",
            links::make_force_stop_link(&c.token_secret, &c.http_api_url, &a.region, &a.id)
        )
        .ok();
        out.push_str("%%%");
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::{InstanceState, ReaperState};

    fn make_config() -> Config {
        Config {
            token_secret: "secret".to_string(),
            http_api_url: "http://localhost:9000".to_string(),
            ..Config::default()
        }
    }

    fn make_instance() -> Instance {
        Instance {
            id: "i-123".to_string(),
            region: "us-east-1".to_string(),
            name: None,
            owner: None,
            state: InstanceState::Running,
            instance_type: "m3.large".to_string(),
            public_ip: None,
            reaper_state: ReaperState::Start,
        }
    }

    #[test]
    fn test_instance_body_core_fields() {
        let config = make_config();
        let instance = make_instance();
        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();

        assert!(body.starts_with("%%%\n"));
        assert!(body.ends_with("%%%"));
        assert!(body.contains("us-east-1"));
        assert!(body.contains("State: running."));
        assert!(body.contains("Instance Type: m3.large."));
        // The id appears as exactly one bracketed Markdown link
        assert_eq!(body.matches("[i-123]").count(), 1);
    }

    #[test]
    fn test_unowned_instance_omits_owner_line() {
        let config = make_config();
        let instance = make_instance();
        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();
        assert!(!body.contains("Owned by"));
    }

    #[test]
    fn test_owned_instance_renders_owner_line() {
        let config = make_config();
        let mut instance = make_instance();
        instance.owner = Some("team-infra".to_string());
        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();
        assert!(body.contains("Owned by team-infra."));
    }

    #[test]
    fn test_named_instance_renders_quoted_name() {
        let config = make_config();
        let mut instance = make_instance();
        instance.name = Some("batch-worker".to_string());
        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();
        assert!(body.contains("\"batch-worker\" [i-123]"));
    }

    #[test]
    fn test_public_ip_line_is_conditional() {
        let config = make_config();
        let mut instance = make_instance();

        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();
        assert!(!body.contains("public IP"));

        instance.public_ip = Some("203.0.113.7".parse().unwrap());
        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();
        assert!(body.contains("This instance's public IP: 203.0.113.7"));
    }

    #[test]
    fn test_instance_action_links() {
        let config = make_config();
        let instance = make_instance();
        let body = InstanceEventContext {
            instance: &instance,
            config: &config,
        }
        .render();
        for action in ["whitelist", "stop", "terminate"] {
            assert!(
                body.contains(&format!(
                    "http://localhost:9000/{action}?token=secret&region=us-east-1&id=i-123"
                )),
                "missing {action} link"
            );
        }
    }

    #[test]
    fn test_asg_body() {
        let config = make_config();
        let asg = AutoScalingGroup {
            id: "web-asg".to_string(),
            region: "eu-west-1".to_string(),
            owner: None,
            reaper_state: ReaperState::Start,
        };
        let body = AsgEventContext {
            asg: &asg,
            config: &config,
        }
        .render();

        assert!(body.starts_with("%%%\n"));
        assert!(body.ends_with("%%%"));
        assert_eq!(body.matches("[web-asg]").count(), 1);
        assert!(body.contains("[Scale]"));
        assert!(body.contains("[Force Scale]"));
        assert!(body.contains("(changes minimum)"));
        assert!(!body.contains("Owned by"));
        assert!(body.contains("http://localhost:9000/forcestop?token=secret&region=eu-west-1&id=web-asg"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = make_config();
        let instance = make_instance();
        let ctx = InstanceEventContext {
            instance: &instance,
            config: &config,
        };
        assert_eq!(ctx.render(), ctx.render());
    }
}
