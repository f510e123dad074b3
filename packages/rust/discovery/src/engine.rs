//! Two-stage discovery engine: sitemap first, homepage links second, with
//! protection-bypass retries at each stage.
//!
//! The engine is infallible by construction. Fetch errors, timeouts, and
//! unparseable bodies are all treated as "no result from this stage" and
//! the machine moves on; the worst case is an empty outcome, which the
//! caller backfills with a synthetic page list. Blocking by a protection
//! wall is recorded as diagnostics, never raised.

use tracing::{debug, info, instrument};

use siteprofiler_shared::{BypassRules, DiscoveryOutcome, DiscoverySource, FetchConfig, NormalizedOrigin, Result};

use crate::bypass::bypass_cookie;
use crate::fetch::Fetcher;
use crate::links::extract_links;
use crate::sitemap::extract_locs;

// ---------------------------------------------------------------------------
// Protection signatures
// ---------------------------------------------------------------------------

/// Predicate recognizing a hosting platform's protection interstitial.
///
/// Matching a wall by its page wording is inherently brittle, so the check
/// sits behind this trait: new platform signatures slot in without touching
/// the state machine.
pub trait ProtectionSignature: Send + Sync {
    /// Does `body` look like a protection page rather than real content?
    fn matches(&self, body: &str) -> bool;
}

/// Signature of Vercel's deployment-protection page.
#[derive(Debug, Default)]
pub struct VercelSignature;

impl ProtectionSignature for VercelSignature {
    fn matches(&self, body: &str) -> bool {
        let lower = body.to_lowercase();
        lower.contains("authentication required") && lower.contains("vercel")
    }
}

// ---------------------------------------------------------------------------
// DiscoveryEngine
// ---------------------------------------------------------------------------

/// Orchestrates candidate-URL discovery for one origin.
pub struct DiscoveryEngine {
    fetcher: Fetcher,
    config: FetchConfig,
    rules: BypassRules,
    signature: Box<dyn ProtectionSignature>,
}

impl DiscoveryEngine {
    /// Build an engine with the default (Vercel) protection signature.
    pub fn new(config: FetchConfig, rules: BypassRules) -> Result<Self> {
        let fetcher = Fetcher::new(config.max_body_bytes)?;
        Ok(Self {
            fetcher,
            config,
            rules,
            signature: Box::new(VercelSignature),
        })
    }

    /// Swap in an alternate protection signature.
    pub fn with_signature(mut self, signature: Box<dyn ProtectionSignature>) -> Self {
        self.signature = signature;
        self
    }

    /// Run discovery for `origin`.
    ///
    /// Stages run strictly in order: sitemap, then (only when the sitemap
    /// stage produced nothing) homepage link extraction. Each stage may
    /// retry once with a bypass cookie when it hits a protection wall.
    #[instrument(skip_all, fields(origin = %origin.absolute))]
    pub async fn discover(&self, origin: &NormalizedOrigin) -> DiscoveryOutcome {
        let mut outcome = DiscoveryOutcome::empty();

        self.sitemap_stage(origin, &mut outcome).await;
        if outcome.discovered.is_empty() {
            self.homepage_stage(origin, &mut outcome).await;
        }

        info!(
            source = %outcome.source,
            candidates = outcome.discovered.len(),
            blocked = outcome.blocked,
            "discovery finished"
        );
        outcome
    }

    // -- sitemap stage ------------------------------------------------------

    async fn sitemap_stage(&self, origin: &NormalizedOrigin, outcome: &mut DiscoveryOutcome) {
        let url = format!("{}/sitemap.xml", origin.absolute);

        let result = match self
            .fetcher
            .fetch(&url, None, self.config.sitemap_timeout_ms)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "sitemap fetch failed, moving on");
                return;
            }
        };

        match result.status {
            401 | 403 => {
                debug!(status = result.status, "sitemap behind protection wall");
                self.sitemap_bypass(origin, &url, result.status, outcome)
                    .await;
            }
            status if status >= 400 => {
                debug!(status, "no sitemap at origin");
            }
            _ => self.accept_sitemap(&result.text, origin, outcome),
        }
    }

    async fn sitemap_bypass(
        &self,
        origin: &NormalizedOrigin,
        url: &str,
        original_status: u16,
        outcome: &mut DiscoveryOutcome,
    ) {
        let Some(cookie) = bypass_cookie(&self.rules, &origin.host) else {
            outcome.blocked = true;
            outcome.blocked_reason = Some(format!("sitemap_{original_status}"));
            info!(status = original_status, "sitemap blocked, no bypass rule for host");
            return;
        };

        outcome.used_bypass = true;
        match self
            .fetcher
            .fetch(url, Some(&cookie), self.config.sitemap_timeout_ms)
            .await
        {
            Ok(result) if result.status < 400 => {
                info!("sitemap bypass retry succeeded");
                self.accept_sitemap(&result.text, origin, outcome);
            }
            Ok(result) => {
                outcome.blocked = true;
                outcome.blocked_reason = Some(format!("sitemap_{}", result.status));
                info!(status = result.status, "sitemap bypass retry still blocked");
            }
            Err(e) => {
                outcome.blocked = true;
                outcome.blocked_reason = Some(format!("sitemap_{original_status}"));
                debug!(error = %e, "sitemap bypass retry failed");
            }
        }
    }

    /// Keep locs inside the origin; adopt them when any survive.
    fn accept_sitemap(&self, xml: &str, origin: &NormalizedOrigin, outcome: &mut DiscoveryOutcome) {
        let locs: Vec<String> = extract_locs(xml)
            .into_iter()
            .filter(|loc| loc.starts_with(&origin.absolute))
            .collect();

        if locs.is_empty() {
            debug!("sitemap had no usable locs, falling through to homepage");
        } else {
            debug!(count = locs.len(), "sitemap locs accepted");
            outcome.discovered = locs;
            outcome.source = DiscoverySource::Sitemap;
        }
    }

    // -- homepage stage -----------------------------------------------------

    async fn homepage_stage(&self, origin: &NormalizedOrigin, outcome: &mut DiscoveryOutcome) {
        let url = format!("{}/", origin.absolute);

        let result = match self
            .fetcher
            .fetch(&url, None, self.config.homepage_timeout_ms)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "homepage fetch failed, moving on");
                return;
            }
        };

        let walled = result.status == 401
            || result.status == 403
            || self.signature.matches(&result.text);

        if walled {
            debug!(status = result.status, "homepage behind protection wall");
            self.homepage_bypass(origin, &url, result.status, outcome)
                .await;
        } else if result.status < 400 {
            self.accept_homepage(&result.text, origin, outcome);
        } else {
            debug!(status = result.status, "homepage unavailable");
        }
    }

    async fn homepage_bypass(
        &self,
        origin: &NormalizedOrigin,
        url: &str,
        original_status: u16,
        outcome: &mut DiscoveryOutcome,
    ) {
        let Some(cookie) = bypass_cookie(&self.rules, &origin.host) else {
            outcome.blocked = true;
            // First blocker wins: a sitemap reason already recorded stays.
            outcome
                .blocked_reason
                .get_or_insert_with(|| format!("homepage_{original_status}"));
            info!(status = original_status, "homepage blocked, no bypass rule for host");
            return;
        };

        outcome.used_bypass = true;
        match self
            .fetcher
            .fetch(url, Some(&cookie), self.config.homepage_timeout_ms)
            .await
        {
            Ok(result) if result.status < 400 => {
                info!("homepage bypass retry succeeded");
                self.accept_homepage(&result.text, origin, outcome);
            }
            Ok(result) => {
                outcome.blocked = true;
                outcome
                    .blocked_reason
                    .get_or_insert_with(|| format!("homepage_{}", result.status));
                info!(status = result.status, "homepage bypass retry still blocked");
            }
            Err(e) => {
                outcome.blocked = true;
                outcome
                    .blocked_reason
                    .get_or_insert_with(|| format!("homepage_{original_status}"));
                debug!(error = %e, "homepage bypass retry failed");
            }
        }
    }

    fn accept_homepage(&self, html: &str, origin: &NormalizedOrigin, outcome: &mut DiscoveryOutcome) {
        let links = extract_links(html, origin);
        if links.is_empty() {
            debug!("homepage yielded no same-host links");
        } else {
            debug!(count = links.len(), "homepage links accepted");
            outcome.discovered = links;
            outcome.source = DiscoverySource::Homepage;
        }
    }
}
