//! Shared types, error model, and configuration for siteprofiler.
//!
//! This crate is the foundation depended on by all other siteprofiler crates.
//! It provides:
//! - [`SiteProfilerError`] — the unified error type
//! - Domain types ([`NormalizedOrigin`], [`DiscoveryOutcome`], [`Profile`], ...)
//! - Configuration ([`AppConfig`], [`BypassRules`], env loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{AppConfig, BYPASS_RULES_ENV, BypassRule, BypassRules, FetchConfig};
pub use error::{Result, SiteProfilerError};
pub use types::{
    CompanySection, CrawlPlanItem, Diagnostics, DiscoveryOutcome, DiscoverySource, FetchResult,
    GoToMarketSection, IndustryContextSection, NormalizedOrigin, OfferingsSection, PageReason,
    PricingSection, Profile, ProofPointsSection, ProtectionDiagnostics, TenantId, VoiceSection,
};
