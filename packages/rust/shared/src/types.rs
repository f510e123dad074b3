//! Core domain types for siteprofiler.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// TenantId
// ---------------------------------------------------------------------------

/// Tenant identifier echoed back to the calling orchestrator.
///
/// Callers may supply a pre-existing identifier in whatever format their
/// system uses; when absent we mint a time-sortable UUID v7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    /// Mint a new time-sortable tenant identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// NormalizedOrigin
// ---------------------------------------------------------------------------

/// Canonical form of a user-supplied company URL.
///
/// Created once per request by the normalizer; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedOrigin {
    /// `scheme://host` (port kept when explicit), no path, no trailing slash.
    pub absolute: String,
    /// Hostname lowercased with a single leading `www.` removed.
    pub host: String,
}

// ---------------------------------------------------------------------------
// FetchResult
// ---------------------------------------------------------------------------

/// Status and body text from one bounded fetch.
///
/// `text` may be truncated mid-document (the byte budget is a soft cap and
/// the cut point is not UTF-8 boundary-safe); downstream scanners tolerate
/// arbitrary malformed input.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code, including 4xx/5xx — classification is the caller's job.
    pub status: u16,
    /// Accumulated (possibly truncated) body text.
    pub text: String,
}

// ---------------------------------------------------------------------------
// DiscoveryOutcome
// ---------------------------------------------------------------------------

/// Which discovery stage produced the candidate URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverySource {
    /// Candidates came from `<origin>/sitemap.xml`.
    Sitemap,
    /// Candidates came from same-host links on the homepage.
    Homepage,
    /// Both stages came up empty; the synthetic default list was used.
    None,
}

impl std::fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sitemap => "sitemap",
            Self::Homepage => "homepage",
            Self::None => "none",
        };
        write!(f, "{s}")
    }
}

/// Terminal output of the discovery engine, one per request.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// Deduplicated candidate URLs in discovery order.
    pub discovered: Vec<String>,
    /// Stage that produced `discovered`.
    pub source: DiscoverySource,
    /// Whether any stage hit a protection wall.
    pub blocked: bool,
    /// First blocker wins, e.g. `sitemap_403`.
    pub blocked_reason: Option<String>,
    /// Whether a bypass cookie was sent on any retry.
    pub used_bypass: bool,
}

impl DiscoveryOutcome {
    /// An outcome with no candidates and no block recorded.
    pub fn empty() -> Self {
        Self {
            discovered: Vec::new(),
            source: DiscoverySource::None,
            blocked: false,
            blocked_reason: None,
            used_bypass: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Crawl plan
// ---------------------------------------------------------------------------

/// Category tag explaining why a URL made the crawl plan.
///
/// Tag assignment has its own priority order, independent of the score
/// weights used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageReason {
    About,
    Pricing,
    Products,
    Blog,
    Docs,
    Careers,
    Contact,
    Homepage,
    Page,
}

/// One ranked entry in the crawl plan. Index 0 is highest priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlPlanItem {
    /// Absolute URL to crawl.
    pub url: String,
    /// Why this URL was kept.
    pub reason: PageReason,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// `company` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `offerings` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferingsSection {
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

/// `go_to_market` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoToMarketSection {
    #[serde(default)]
    pub motions: Vec<String>,
    #[serde(default)]
    pub target_segments: Vec<String>,
}

/// `pricing` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub tiers: Vec<String>,
}

/// `voice` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default)]
    pub key_phrases: Vec<String>,
}

/// `proof_points` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofPointsSection {
    #[serde(default)]
    pub customers: Vec<String>,
    #[serde(default)]
    pub testimonials: Vec<String>,
}

/// `industry_context` section of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryContextSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
}

/// The output document consumed by the calling orchestrator.
///
/// Downstream consumers depend on every section being present even when
/// empty; only `crawl_plan` carries computed data in this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub company: CompanySection,
    #[serde(default)]
    pub offerings: OfferingsSection,
    #[serde(default)]
    pub go_to_market: GoToMarketSection,
    #[serde(default)]
    pub pricing: PricingSection,
    #[serde(default)]
    pub voice: VoiceSection,
    #[serde(default)]
    pub proof_points: ProofPointsSection,
    #[serde(default)]
    pub industry_context: IndustryContextSection,
    /// The ranked crawl plan — the only computed section.
    pub crawl_plan: Vec<CrawlPlanItem>,
    /// When this profile was assembled.
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Protection-wall diagnostics attached to the response when blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionDiagnostics {
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
    pub used_bypass_cookie: bool,
}

/// Container for per-request diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    pub protection: ProtectionDiagnostics,
}
