//! Action links embedded in notifications
//!
//! Each link targets the reaper HTTP API and authorizes exactly one action
//! on one resource. Builders are pure functions of their arguments; the
//! query shape is part of the API contract.

/// Link that terminates the resource
pub fn make_terminate_link(token_secret: &str, api_url: &str, region: &str, id: &str) -> String {
    action_link(api_url, "terminate", token_secret, region, id)
}

/// Link that ignores the resource until the next scan
pub fn make_ignore_link(token_secret: &str, api_url: &str, region: &str, id: &str) -> String {
    action_link(api_url, "ignore", token_secret, region, id)
}

/// Link that whitelists the resource permanently
pub fn make_whitelist_link(token_secret: &str, api_url: &str, region: &str, id: &str) -> String {
    action_link(api_url, "whitelist", token_secret, region, id)
}

/// Link that stops the resource (scales an ASG to zero)
pub fn make_stop_link(token_secret: &str, api_url: &str, region: &str, id: &str) -> String {
    action_link(api_url, "stop", token_secret, region, id)
}

/// Link that force-stops the resource (also lowers an ASG's minimum)
pub fn make_force_stop_link(token_secret: &str, api_url: &str, region: &str, id: &str) -> String {
    action_link(api_url, "forcestop", token_secret, region, id)
}

fn action_link(api_url: &str, action: &str, token: &str, region: &str, id: &str) -> String {
    format!("{api_url}/{action}?token={token}&region={region}&id={id}")
}
