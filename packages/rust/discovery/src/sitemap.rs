//! Tolerant sitemap scanning.
//!
//! Sitemap bodies arrive possibly truncated mid-element by the fetcher's
//! byte budget, and real-world sitemaps are frequently malformed anyway,
//! so `<loc>` extraction is a regex scan rather than a strict XML parse.
//! The scan is total: any byte salad in, URL list (possibly empty) out.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Matches `<loc>…</loc>` content, case-insensitively, across newlines.
static LOC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<loc>\s*(.*?)\s*</loc>").expect("loc regex"));

/// Extract every `<loc>` URL from sitemap text, deduplicated in document
/// order.
pub fn extract_locs(xml: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut locs = Vec::new();

    for caps in LOC_RE.captures_iter(xml) {
        let loc = caps[1].trim().to_string();
        if !loc.is_empty() && seen.insert(loc.clone()) {
            locs.push(loc);
        }
    }

    locs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_locs_in_document_order() {
        let xml = r#"<?xml version="1.0"?>
            <urlset>
              <url><loc>https://acme.io/pricing</loc></url>
              <url><loc>https://acme.io/careers</loc></url>
            </urlset>"#;
        assert_eq!(
            extract_locs(xml),
            vec!["https://acme.io/pricing", "https://acme.io/careers"]
        );
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let xml = "<loc>https://a.io/x</loc><loc>https://a.io/y</loc><loc>https://a.io/x</loc>";
        assert_eq!(extract_locs(xml), vec!["https://a.io/x", "https://a.io/y"]);
    }

    #[test]
    fn tolerates_truncated_and_malformed_markup() {
        assert!(extract_locs("").is_empty());
        assert!(extract_locs("<urlset><url><loc>https://a.io/cut").is_empty());
        assert_eq!(
            extract_locs("garbage <LOC> https://a.io/p </LOC> <unclosed"),
            vec!["https://a.io/p"]
        );
    }

    #[test]
    fn whitespace_around_loc_content_is_trimmed() {
        let xml = "<loc>\n  https://a.io/about\n</loc>";
        assert_eq!(extract_locs(xml), vec!["https://a.io/about"]);
    }
}
