//! Protection-bypass rule resolution and cookie construction.
//!
//! Operators configure per-host overrides for sites sitting behind a
//! hosting-platform protection wall (password protection / deployment
//! protection on Vercel-hosted marketing sites is the common case). A rule
//! either carries a literal Cookie header value or a bypass token from
//! which the platform's cookie pair is synthesized.

use siteprofiler_shared::{BypassRule, BypassRules};

/// Cookie name understood by Vercel's deployment-protection bypass.
const BYPASS_COOKIE_NAME: &str = "vercel-protection-bypass";

/// Resolve the rule governing `host`, if any.
///
/// Match order, first hit wins:
/// 1. exact host (`a.b.example.com`)
/// 2. wildcard suffixes, narrowest first (`*.b.example.com`, then
///    `*.example.com`); widening stops before a single-label suffix, so
///    `*.com` is never consulted
/// 3. the global `*` rule
pub fn resolve_rule<'a>(rules: &'a BypassRules, host: &str) -> Option<&'a BypassRule> {
    if let Some(rule) = rules.get(host) {
        return Some(rule);
    }

    let labels: Vec<&str> = host.split('.').collect();
    // Suffixes keep at least two labels: i runs from the second label to
    // labels.len() - 2 inclusive.
    for i in 1..labels.len().saturating_sub(1) {
        let pattern = format!("*.{}", labels[i..].join("."));
        if let Some(rule) = rules.get(&pattern) {
            return Some(rule);
        }
    }

    rules.get("*")
}

/// Build the Cookie header value for `host`, if a usable rule exists.
///
/// A literal cookie wins over a token. A token is expanded into the
/// two-part pair the platform checks: the bypass value itself plus its
/// signed flag.
pub fn bypass_cookie(rules: &BypassRules, host: &str) -> Option<String> {
    let rule = resolve_rule(rules, host)?;

    if let Some(cookie) = rule.cookie.as_deref() {
        let cookie = cookie.trim();
        if !cookie.is_empty() {
            return Some(cookie.to_string());
        }
    }

    rule.token.as_deref().map(|token| {
        format!(
            "{name}={token}; {name}-signed=1",
            name = BYPASS_COOKIE_NAME,
            token = token.trim()
        )
    })
}
