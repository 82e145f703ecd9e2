//! Navigation policy: decides where a URL leaving the primary site goes.
//!
//! Navigations inside the configured origin stay on the primary surface.
//! Recognized chat services are handed to the system browser; anything else
//! goes through the confirmation prompt before it may open in a tab.

use tracing::debug;
use url::{Origin, Url};

/// Hosts (and their subdomains) that are always opened in the system browser.
pub const HANDOFF_HOSTS: &[&str] = &["discord.com", "discordapp.com", "discord.gg"];

/// Where a URL should end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRoute {
    /// Proceed on the surface that asked.
    Allow,
    /// Load on the primary surface instead of opening a window.
    NavigatePrimary(String),
    /// Open in the system default browser.
    Handoff(String),
    /// Ask the user before opening it.
    Prompt(String),
    /// Open in a new tab surface.
    OpenTab(String),
    /// Not a web URL; drop it.
    Reject,
}

pub struct NavigationPolicy {
    origin: Option<Origin>,
}

impl NavigationPolicy {
    pub fn new(game_url: &str) -> Self {
        let mut policy = Self { origin: None };
        policy.set_game_url(game_url);
        policy
    }

    /// Re-targets the allowed origin. An unparseable URL allows nothing.
    pub fn set_game_url(&mut self, game_url: &str) {
        self.origin = Url::parse(game_url).ok().map(|u| u.origin());
    }

    pub fn is_in_origin(&self, url: &Url) -> bool {
        match &self.origin {
            Some(origin) => origin.is_tuple() && url.origin() == *origin,
            None => false,
        }
    }

    pub fn is_handoff(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        HANDOFF_HOSTS.iter().any(|allowed| {
            host.eq_ignore_ascii_case(allowed)
                || host
                    .to_ascii_lowercase()
                    .ends_with(&format!(".{}", allowed))
        })
    }

    /// Top-level navigation requested by the primary surface.
    pub fn route_navigation(&self, raw: &str) -> NavigationRoute {
        let Some(url) = parse_web_url(raw) else {
            debug!(url = raw, "rejecting non-web navigation");
            return NavigationRoute::Reject;
        };
        if self.is_in_origin(&url) {
            NavigationRoute::Allow
        } else if self.is_handoff(&url) {
            NavigationRoute::Handoff(url.into())
        } else {
            NavigationRoute::Prompt(url.into())
        }
    }

    /// A page asked for a new window; windows are never created directly.
    pub fn route_popup(&self, raw: &str) -> NavigationRoute {
        match self.route_navigation(raw) {
            NavigationRoute::Allow => NavigationRoute::NavigatePrimary(raw.to_string()),
            other => other,
        }
    }

    /// The user confirmed an external link.
    pub fn route_external_link(&self, raw: &str) -> NavigationRoute {
        let Some(url) = parse_web_url(raw) else {
            return NavigationRoute::Reject;
        };
        if self.is_handoff(&url) {
            NavigationRoute::Handoff(url.into())
        } else {
            NavigationRoute::OpenTab(url.into())
        }
    }
}

fn parse_web_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}
