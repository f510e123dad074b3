//! Profile assembly.
//!
//! Pure structural wrap: the ranked crawl plan goes into the fixed-shape
//! [`Profile`] document with every informational section present but empty.
//! Downstream consumers rely on the sections existing even before any
//! enrichment has filled them in, so the scaffold is always emitted whole.

use chrono::Utc;

use siteprofiler_shared::{CrawlPlanItem, Profile};

/// Wrap a crawl plan into the output profile document.
pub fn assemble_profile(crawl_plan: Vec<CrawlPlanItem>) -> Profile {
    Profile {
        company: Default::default(),
        offerings: Default::default(),
        go_to_market: Default::default(),
        pricing: Default::default(),
        voice: Default::default(),
        proof_points: Default::default(),
        industry_context: Default::default(),
        crawl_plan,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteprofiler_shared::PageReason;

    #[test]
    fn all_sections_are_present_when_empty() {
        let profile = assemble_profile(vec![CrawlPlanItem {
            url: "https://acme.io/about".into(),
            reason: PageReason::About,
        }]);

        let json = serde_json::to_value(&profile).unwrap();
        for section in [
            "company",
            "offerings",
            "go_to_market",
            "pricing",
            "voice",
            "proof_points",
            "industry_context",
            "crawl_plan",
            "generated_at",
        ] {
            assert!(json.get(section).is_some(), "missing section {section}");
        }
        assert_eq!(json["crawl_plan"][0]["reason"], "about");
    }
}
