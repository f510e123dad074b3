//! URL normalization: arbitrary user-supplied text → canonical origin.
//!
//! Callers paste all kinds of things into the company-URL field: quoted
//! strings, protocol-relative `//host` forms, bare domains, full URLs with
//! paths. Everything is coerced to a canonical `https://host[:port]` origin
//! plus a lowercased host with any leading `www.` removed.

use url::Url;

use siteprofiler_shared::{NormalizedOrigin, Result, SiteProfilerError};

/// Normalize user-supplied URL text into a [`NormalizedOrigin`].
///
/// Deterministic and idempotent: normalizing its own `absolute` output
/// yields the same origin. The canonical form always drops any path, query,
/// or fragment the caller supplied; an explicit port is preserved.
///
/// This is the only fallible stage of the profiling pipeline — a URL that
/// cannot be parsed aborts the request with
/// [`SiteProfilerError::InvalidInput`].
pub fn normalize_origin(input: &str) -> Result<NormalizedOrigin> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SiteProfilerError::invalid_input("company URL is empty"));
    }

    // Strip surrounding quotes, then re-trim anything they enclosed.
    let unquoted = trimmed.trim_matches(['"', '\'']).trim();

    let coerced = if unquoted.starts_with("//") {
        format!("https:{unquoted}")
    } else if has_http_scheme(unquoted) {
        unquoted.to_string()
    } else {
        format!("https://{unquoted}")
    };

    let url = Url::parse(&coerced)
        .map_err(|e| SiteProfilerError::invalid_input(format!("unparseable URL {coerced:?}: {e}")))?;

    let hostname = url
        .host_str()
        .ok_or_else(|| SiteProfilerError::invalid_input(format!("URL has no host: {coerced:?}")))?
        .to_ascii_lowercase();

    let host = hostname
        .strip_prefix("www.")
        .unwrap_or(&hostname)
        .to_string();
    if host.is_empty() {
        return Err(SiteProfilerError::invalid_input(format!(
            "URL has no usable host: {coerced:?}"
        )));
    }

    // Canonical origin is always https on the stripped host. Explicit ports
    // survive (needed for staging hosts); default ports are dropped by the
    // URL parser.
    let absolute = match url.port() {
        Some(port) => format!("https://{host}:{port}"),
        None => format!("https://{host}"),
    };

    Ok(NormalizedOrigin { absolute, host })
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        let origin = normalize_origin("example.com").unwrap();
        assert_eq!(origin.absolute, "https://example.com");
        assert_eq!(origin.host, "example.com");
    }

    #[test]
    fn www_and_case_are_stripped() {
        let origin = normalize_origin("www.Example.com").unwrap();
        assert_eq!(origin.host, "example.com");
        assert_eq!(origin.absolute, "https://example.com");
    }

    #[test]
    fn explicit_http_with_path_is_canonicalized() {
        let origin = normalize_origin("http://WWW.Acme.IO/").unwrap();
        assert_eq!(origin.host, "acme.io");
        assert_eq!(origin.absolute, "https://acme.io");
    }

    #[test]
    fn quoted_and_protocol_relative_inputs() {
        let origin = normalize_origin("\"//cdn.example.com/assets\"").unwrap();
        assert_eq!(origin.absolute, "https://cdn.example.com");

        let origin = normalize_origin("'example.org'").unwrap();
        assert_eq!(origin.host, "example.org");
    }

    #[test]
    fn path_and_query_are_dropped() {
        let origin = normalize_origin("https://example.com/pricing?utm=x#top").unwrap();
        assert_eq!(origin.absolute, "https://example.com");
    }

    #[test]
    fn explicit_port_is_preserved() {
        let origin = normalize_origin("http://localhost:3000/docs").unwrap();
        assert_eq!(origin.absolute, "https://localhost:3000");
        assert_eq!(origin.host, "localhost");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["example.com", "http://WWW.Acme.IO/", "//x.test/a"] {
            let first = normalize_origin(input).unwrap();
            let second = normalize_origin(&first.absolute).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_and_garbage_inputs_fail() {
        assert!(normalize_origin("").is_err());
        assert!(normalize_origin("   ").is_err());
        assert!(normalize_origin("\"\"").is_err());
        assert!(normalize_origin("http://").is_err());
    }
}
