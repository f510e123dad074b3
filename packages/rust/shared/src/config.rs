//! Runtime configuration for siteprofiler.
//!
//! The bypass rule table arrives as one JSON-encoded environment value
//! (operator-configured, per tenant deployment). It is loaded once at
//! startup into an immutable [`BypassRules`] object and passed explicitly
//! into the discovery engine — never read from ambient global state
//! mid-request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Environment variable holding the bypass rule table as JSON:
/// `{ "<hostPattern>": { "cookie"?: "...", "token"?: "..." } }`.
///
/// Patterns are exact hosts (`app.example.com`), wildcard domains
/// (`*.example.com`), or the global `*`.
pub const BYPASS_RULES_ENV: &str = "SITEPROFILER_BYPASS_RULES";

// ---------------------------------------------------------------------------
// Bypass rules
// ---------------------------------------------------------------------------

/// One operator-configured protection-bypass override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassRule {
    /// Literal Cookie header value, used verbatim (trimmed) when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,

    /// Protection-bypass token; a cookie pair is synthesized from it when
    /// no literal cookie is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Read-only table of host patterns to bypass rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BypassRules(pub HashMap<String, BypassRule>);

impl BypassRules {
    /// Load the rule table from [`BYPASS_RULES_ENV`].
    ///
    /// An absent or malformed value yields an empty table, never an error:
    /// a misconfigured deployment should degrade to "no bypass available",
    /// not fail every profiling request.
    pub fn from_env() -> Self {
        match std::env::var(BYPASS_RULES_ENV) {
            Ok(raw) => Self::from_json(&raw),
            Err(_) => Self::default(),
        }
    }

    /// Parse a rule table from a JSON blob, tolerating malformed input.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<HashMap<String, BypassRule>>(raw) {
            Ok(map) => Self(map),
            Err(e) => {
                warn!(error = %e, "malformed bypass rule table, using empty table");
                Self::default()
            }
        }
    }

    /// Look up a pattern verbatim (no wildcard widening here — the
    /// resolver in the discovery crate drives the match order).
    pub fn get(&self, pattern: &str) -> Option<&BypassRule> {
        self.0.get(pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Fetch / app config
// ---------------------------------------------------------------------------

/// Limits applied to each discovery fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Wall-clock deadline for the sitemap fetch, milliseconds.
    #[serde(default = "default_sitemap_timeout_ms")]
    pub sitemap_timeout_ms: u64,

    /// Wall-clock deadline for the homepage fetch, milliseconds.
    #[serde(default = "default_homepage_timeout_ms")]
    pub homepage_timeout_ms: u64,

    /// Soft cap on accumulated body bytes per fetch.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            sitemap_timeout_ms: default_sitemap_timeout_ms(),
            homepage_timeout_ms: default_homepage_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_sitemap_timeout_ms() -> u64 {
    7_000
}
fn default_homepage_timeout_ms() -> u64 {
    5_000
}
fn default_max_body_bytes() -> usize {
    300_000
}

/// Top-level application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Per-fetch limits.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Maximum crawl plan length.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Protection-bypass rule table.
    #[serde(default)]
    pub bypass: BypassRules,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            top_k: default_top_k(),
            bypass: BypassRules::default(),
        }
    }
}

fn default_top_k() -> usize {
    20
}

impl AppConfig {
    /// Build the runtime config: defaults plus the env-provided rule table.
    pub fn load() -> Result<Self> {
        Ok(Self {
            bypass: BypassRules::from_env(),
            ..Self::default()
        })
    }
}
