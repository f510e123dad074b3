//! End-to-end profiling pipeline: URL text → discovery → ranking → profile.
//!
//! Only normalization can fail; everything past it degrades. When both
//! discovery stages come up empty the pipeline substitutes a fixed
//! synthetic page list so the ranking engine always has input and the
//! caller always receives a complete profile.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use siteprofiler_discovery::{DiscoveryEngine, normalize_origin};
use siteprofiler_shared::{
    AppConfig, Diagnostics, DiscoverySource, NormalizedOrigin, Profile, ProtectionDiagnostics,
    Result, TenantId,
};

use crate::assembler::assemble_profile;
use crate::ranking::rank;

/// Canonical paths assumed crawlable on any company site; used when both
/// discovery stages yield nothing.
pub const DEFAULT_PAGES: [&str; 9] = [
    "/", "/about", "/products", "/solutions", "/pricing", "/blog", "/docs", "/contact", "/careers",
];

// ---------------------------------------------------------------------------
// Options / response
// ---------------------------------------------------------------------------

/// Caller-supplied knobs for one profiling request.
#[derive(Debug, Clone, Default)]
pub struct ProfileOptions {
    /// Pre-existing tenant identifier; minted when absent.
    pub tenant_id: Option<TenantId>,
    /// Human-readable company name; defaults to the normalized host.
    pub company_name: Option<String>,
}

/// Everything the calling orchestrator gets back for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Tenant this profile belongs to.
    pub tenant_id: TenantId,
    /// Display name for the company.
    pub company_name: String,
    /// Canonical origin the plan was built for.
    pub origin: NormalizedOrigin,
    /// Which discovery stage produced the candidates.
    pub source: DiscoverySource,
    /// Whether a protection wall was hit anywhere.
    pub blocked: bool,
    /// The assembled profile document.
    pub profile: Profile,
    /// Present only when `blocked`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Profile a company site from raw URL text.
///
/// Fails only on unusable input; see [`profile_origin`] for the infallible
/// remainder of the pipeline.
#[instrument(skip_all, fields(input = %input))]
pub async fn build_profile(
    input: &str,
    options: ProfileOptions,
    config: &AppConfig,
) -> Result<ProfileResponse> {
    let origin = normalize_origin(input)?;
    profile_origin(&origin, options, config).await
}

/// Run discovery, ranking, and assembly for an already-normalized origin.
#[instrument(skip_all, fields(origin = %origin.absolute))]
pub async fn profile_origin(
    origin: &NormalizedOrigin,
    options: ProfileOptions,
    config: &AppConfig,
) -> Result<ProfileResponse> {
    let engine = DiscoveryEngine::new(config.fetch.clone(), config.bypass.clone())?;
    let outcome = engine.discover(origin).await;

    let candidates = if outcome.discovered.is_empty() {
        warn!("discovery found nothing, using synthetic default pages");
        default_candidates(origin)
    } else {
        outcome.discovered.clone()
    };

    let crawl_plan = rank(&candidates, config.top_k);
    info!(
        source = %outcome.source,
        plan_len = crawl_plan.len(),
        blocked = outcome.blocked,
        "crawl plan assembled"
    );

    let diagnostics = outcome.blocked.then(|| Diagnostics {
        protection: ProtectionDiagnostics {
            blocked: true,
            blocked_reason: outcome.blocked_reason.clone(),
            used_bypass_cookie: outcome.used_bypass,
        },
    });

    Ok(ProfileResponse {
        tenant_id: options.tenant_id.unwrap_or_else(TenantId::generate),
        company_name: options.company_name.unwrap_or_else(|| origin.host.clone()),
        origin: origin.clone(),
        source: outcome.source,
        blocked: outcome.blocked,
        profile: assemble_profile(crawl_plan),
        diagnostics,
    })
}

/// The nine synthetic fallback URLs rooted at `origin`.
fn default_candidates(origin: &NormalizedOrigin) -> Vec<String> {
    DEFAULT_PAGES
        .iter()
        .map(|page| {
            if *page == "/" {
                format!("{}/", origin.absolute)
            } else {
                format!("{}{page}", origin.absolute)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteprofiler_shared::{BypassRules, PageReason, SiteProfilerError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> AppConfig {
        AppConfig::default()
    }

    fn origin_for(server: &MockServer) -> NormalizedOrigin {
        NormalizedOrigin {
            absolute: server.uri(),
            host: "127.0.0.1".into(),
        }
    }

    #[tokio::test]
    async fn invalid_input_is_the_only_hard_failure() {
        let err = build_profile("   ", ProfileOptions::default(), &config())
            .await
            .unwrap_err();
        assert!(matches!(err, SiteProfilerError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn unreachable_site_falls_back_to_synthetic_plan() {
        let response = build_profile("site.invalid", ProfileOptions::default(), &config())
            .await
            .unwrap();

        assert_eq!(response.source, DiscoverySource::None);
        assert!(!response.blocked);
        assert!(response.diagnostics.is_none());

        let plan = &response.profile.crawl_plan;
        assert_eq!(plan.len(), DEFAULT_PAGES.len());
        // Trailing-slash homepage carries the top weight.
        assert_eq!(plan[0].url, "https://site.invalid/");
        assert_eq!(plan[0].reason, PageReason::Homepage);
        // Lowest-weight synthetic page ranks last.
        assert_eq!(plan[plan.len() - 1].url, "https://site.invalid/careers");
    }

    #[tokio::test]
    async fn sitemap_discovery_produces_ranked_plan() {
        let server = MockServer::start().await;
        let xml = format!(
            "<urlset><url><loc>{0}/careers</loc></url><url><loc>{0}/pricing</loc></url></urlset>",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(xml))
            .mount(&server)
            .await;

        let response = profile_origin(
            &origin_for(&server),
            ProfileOptions {
                tenant_id: Some(TenantId::from("tenant_7".to_string())),
                company_name: Some("Acme".into()),
            },
            &config(),
        )
        .await
        .unwrap();

        assert_eq!(response.source, DiscoverySource::Sitemap);
        assert_eq!(response.tenant_id.0, "tenant_7");
        assert_eq!(response.company_name, "Acme");

        let plan = &response.profile.crawl_plan;
        // /pricing (7) outranks /careers (2) despite discovery order.
        assert_eq!(plan[0].url, format!("{}/pricing", server.uri()));
        assert_eq!(plan[1].url, format!("{}/careers", server.uri()));
    }

    #[tokio::test]
    async fn blocked_site_reports_protection_diagnostics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let mut config = config();
        config.bypass = BypassRules::from_json("{}");
        let response = profile_origin(&origin_for(&server), ProfileOptions::default(), &config)
            .await
            .unwrap();

        assert!(response.blocked);
        assert_eq!(response.source, DiscoverySource::None);
        let protection = &response.diagnostics.as_ref().unwrap().protection;
        assert!(protection.blocked);
        assert_eq!(protection.blocked_reason.as_deref(), Some("sitemap_403"));
        assert!(!protection.used_bypass_cookie);
        // Blocked or not, a full synthetic plan still comes back.
        assert_eq!(response.profile.crawl_plan.len(), DEFAULT_PAGES.len());
    }

    #[tokio::test]
    async fn tenant_is_minted_and_name_defaults_to_host() {
        // .invalid never resolves, so this exercises normalization plus the
        // fallback path without touching the network.
        let response = build_profile("www.Acme.invalid", ProfileOptions::default(), &config())
            .await
            .unwrap();

        assert!(!response.tenant_id.0.is_empty());
        assert_eq!(response.company_name, "acme.invalid");
        assert_eq!(response.origin.absolute, "https://acme.invalid");
    }
}
