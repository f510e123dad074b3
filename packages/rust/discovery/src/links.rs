//! Tolerant same-host link harvesting from homepage HTML.
//!
//! Like the sitemap scanner this is a regex pass, not a DOM parse: homepage
//! bodies may be truncated at the fetcher's byte budget and must never make
//! extraction fail. Only links resolving to the origin's exact hostname are
//! kept (no subdomain crawling), fragments are stripped, and the first
//! occurrence of each URL wins.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use siteprofiler_shared::NormalizedOrigin;

/// Matches `href="…"` or `href='…'` attribute values.
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("href regex")
});

/// Extract same-host links from `html`, resolved against the origin.
pub fn extract_links(html: &str, origin: &NormalizedOrigin) -> Vec<String> {
    let Ok(root) = Url::parse(&origin.absolute) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for caps in HREF_RE.captures_iter(html) {
        let Some(raw) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let raw = raw.as_str().trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("mailto:") || lower.starts_with("tel:") {
            continue;
        }

        // Unresolvable hrefs are skipped silently.
        let Ok(mut resolved) = root.join(raw) else {
            continue;
        };
        if resolved.host_str() != root.host_str() {
            continue;
        }

        resolved.set_fragment(None);
        let resolved = resolved.to_string();
        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> NormalizedOrigin {
        NormalizedOrigin {
            absolute: "https://acme.io".into(),
            host: "acme.io".into(),
        }
    }

    #[test]
    fn relative_links_resolve_against_origin() {
        let html = r#"<a href="/about">About</a> <a href='pricing'>Pricing</a>"#;
        assert_eq!(
            extract_links(html, &origin()),
            vec!["https://acme.io/about", "https://acme.io/pricing"]
        );
    }

    #[test]
    fn offsite_and_subdomain_links_are_dropped() {
        let html = r#"
            <a href="https://acme.io/docs">docs</a>
            <a href="https://other.com/about">offsite</a>
            <a href="https://blog.acme.io/post">subdomain</a>
        "#;
        assert_eq!(extract_links(html, &origin()), vec!["https://acme.io/docs"]);
    }

    #[test]
    fn fragment_mailto_and_tel_links_are_skipped() {
        let html = r##"
            <a href="#section">jump</a>
            <a href="mailto:hi@acme.io">mail</a>
            <a href="tel:+15551234567">call</a>
            <a href="/contact#form">contact</a>
        "##;
        // Fragment is stripped from the kept link.
        assert_eq!(
            extract_links(html, &origin()),
            vec!["https://acme.io/contact"]
        );
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let html = r#"<a href="/a">1</a><a href="/b">2</a><a href="/a#x">3</a>"#;
        assert_eq!(
            extract_links(html, &origin()),
            vec!["https://acme.io/a", "https://acme.io/b"]
        );
    }

    #[test]
    fn truncated_html_never_fails() {
        let html = r#"<div><a href="/about">About</a><a href="/pri"#;
        assert_eq!(extract_links(html, &origin()), vec!["https://acme.io/about"]);
        assert!(extract_links("", &origin()).is_empty());
    }
}
