//! Deterministic candidate ranking.
//!
//! Candidates are deduplicated (first occurrence wins), scored by additive
//! keyword heuristics over the full URL string, stable-sorted descending,
//! and capped at top-k. Ties keep their discovery order — determinism here
//! is a contract, not a nicety, since the plan feeds a downstream crawler
//! that must behave reproducibly.
//!
//! Reason tags use their own priority order, separate from the score
//! weights. The two tables overlap but are intentionally independent: the
//! score says how badly we want a page, the tag says what bucket the
//! downstream consumer should file it under.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use siteprofiler_shared::{CrawlPlanItem, PageReason};

/// Matches homepage-style document names at the end of a URL.
static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)index\.html?$").expect("index regex"));

/// Additive relevance score for one URL (case-insensitive substring
/// matching, every row evaluated).
fn score_url(url: &str) -> u32 {
    let lower = url.to_lowercase();
    let mut score = 0;

    if lower.ends_with('/') || INDEX_RE.is_match(&lower) {
        score += 10;
    }
    if lower.contains("about") {
        score += 8;
    }
    if lower.contains("product") || lower.contains("solutions") {
        score += 8;
    }
    if lower.contains("pricing") {
        score += 7;
    }
    if ["blog", "news", "stories"].iter().any(|p| lower.contains(p)) {
        score += 5;
    }
    if ["docs", "help", "support"].iter().any(|p| lower.contains(p)) {
        score += 5;
    }
    if lower.contains("contact") {
        score += 4;
    }
    if lower.contains("careers") || lower.contains("jobs") {
        score += 2;
    }

    score
}

/// Assign the single category tag for a URL: first matching bucket wins.
fn reason_for(url: &str) -> PageReason {
    let lower = url.to_lowercase();

    if lower.contains("about") {
        PageReason::About
    } else if lower.contains("pricing") {
        PageReason::Pricing
    } else if lower.contains("product") || lower.contains("solutions") {
        PageReason::Products
    } else if lower.contains("blog") || lower.contains("news") {
        PageReason::Blog
    } else if lower.contains("docs") || lower.contains("help") {
        PageReason::Docs
    } else if lower.contains("careers") {
        PageReason::Careers
    } else if lower.contains("contact") {
        PageReason::Contact
    } else if lower.ends_with('/') {
        PageReason::Homepage
    } else {
        PageReason::Page
    }
}

/// Rank `candidates` into a crawl plan of at most `k` items.
pub fn rank(candidates: &[String], k: usize) -> Vec<CrawlPlanItem> {
    let mut seen = HashSet::new();
    let mut scored: Vec<(&String, u32)> = candidates
        .iter()
        .filter(|url| seen.insert(url.as_str()))
        .map(|url| (url, score_url(url)))
        .collect();

    // sort_by is stable: equal scores keep discovery order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(k);

    scored
        .into_iter()
        .map(|(url, _)| CrawlPlanItem {
            reason: reason_for(url),
            url: url.clone(),
        })
        .collect()
}
