//! CDN image URL rewriting.
//!
//! Steeple never resizes or re-encodes images itself. Every image URL that
//! ends up in generated HTML is routed through [`resolve`], which rewrites it
//! into a request for a resized/optimized variant from whichever CDN hosts
//! the asset. The CDN does the pixel work; the generated site only ever
//! carries URLs.
//!
//! ## Host rules
//!
//! Recognition is an ordered list of `(substring, transform)` pairs evaluated
//! top to bottom — the first matching rule wins. Matching is a plain
//! case-sensitive substring check on the source string, not a URL parse:
//!
//! | Host substring          | Transform                                  |
//! |-------------------------|--------------------------------------------|
//! | `imagedelivery.net`     | append `/w=<width>,q=<quality>`            |
//! | `cdn.sanity.io`         | append `?w=<width>&q=<quality>&auto=format`|
//! | `cloudflarestream.com`  | none (Stream thumbnails take no params)    |
//! | anything else           | none (pass through unoptimized)            |
//!
//! ## Contract
//!
//! [`resolve`] is a total function: every input produces a string, with no
//! I/O, no validation, and no error path. Malformed sources and out-of-range
//! widths are concatenated as-is. It is deliberately *not* idempotent on the
//! first two branches — resolving an already-resolved URL appends a second
//! transform suffix — so callers must resolve each source exactly once.

use serde::{Deserialize, Serialize};

/// Quality used when the caller gives no hint.
pub const DEFAULT_QUALITY: u32 = 75;

/// How a recognized host accepts resize parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    /// Trailing path segment: `<source>/w=<width>,q=<quality>`.
    PathSegment,
    /// Query string: `<source>?w=<width>&q=<quality>&auto=format`.
    QueryParams,
    /// Host serves one rendition only; return the source untouched.
    PassThrough,
}

/// Ordered rule table. Order is part of the contract: a source containing
/// several recognized substrings resolves via the first row that matches.
const HOST_RULES: &[(&str, Transform)] = &[
    ("imagedelivery.net", Transform::PathSegment),
    ("cdn.sanity.io", Transform::QueryParams),
    ("cloudflarestream.com", Transform::PassThrough),
];

/// One requested image variant: a source locator, a target display width,
/// and an optional quality hint.
///
/// Constructed per image element, consumed once, discarded. Quality bounds
/// are the caller's responsibility ([`crate::config::SiteConfig::validate`]
/// bounds the configured value); the rewriter itself never inspects the
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub source: String,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
}

impl ImageRef {
    pub fn new(source: impl Into<String>, width: u32) -> Self {
        Self {
            source: source.into(),
            width,
            quality: None,
        }
    }

    /// The CDN URL for this variant. See [`resolve`].
    pub fn url(&self) -> String {
        resolve(&self.source, self.width, self.quality)
    }
}

/// Rewrite `source` into a CDN request for a `width`-pixel variant.
///
/// `quality` defaults to [`DEFAULT_QUALITY`] when absent. Unrecognized hosts
/// (and local paths) pass through unchanged — those assets are served as-is.
pub fn resolve(source: &str, width: u32, quality: Option<u32>) -> String {
    let quality = quality.unwrap_or(DEFAULT_QUALITY);

    for (host, transform) in HOST_RULES {
        if source.contains(host) {
            return match transform {
                Transform::PathSegment => format!("{source}/w={width},q={quality}"),
                Transform::QueryParams => {
                    format!("{source}?w={width}&q={quality}&auto=format")
                }
                Transform::PassThrough => source.to_string(),
            };
        }
    }

    source.to_string()
}

/// Build an HTML `srcset` value offering `source` at each width in `widths`.
///
/// One [`resolve`] call per candidate width, in the order given:
/// `"<url> <w>w, <url> <w>w, ..."`.
pub fn srcset(source: &str, widths: &[u32], quality: Option<u32>) -> String {
    widths
        .iter()
        .map(|&w| format!("{} {}w", resolve(source, w, quality), w))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imagedelivery_appends_path_segment() {
        assert_eq!(
            resolve("https://imagedelivery.net/abc", 400, None),
            "https://imagedelivery.net/abc/w=400,q=75"
        );
    }

    #[test]
    fn imagedelivery_uses_explicit_quality() {
        assert_eq!(
            resolve("https://imagedelivery.net/abc/hero", 1200, Some(90)),
            "https://imagedelivery.net/abc/hero/w=1200,q=90"
        );
    }

    #[test]
    fn sanity_appends_query_params() {
        assert_eq!(
            resolve("https://cdn.sanity.io/img.jpg", 800, Some(90)),
            "https://cdn.sanity.io/img.jpg?w=800&q=90&auto=format"
        );
    }

    #[test]
    fn sanity_defaults_quality_to_75() {
        assert_eq!(
            resolve("https://cdn.sanity.io/img.jpg", 800, None),
            "https://cdn.sanity.io/img.jpg?w=800&q=75&auto=format"
        );
    }

    #[test]
    fn cloudflare_stream_passes_through() {
        let src = "https://videos.cloudflarestream.com/thumb.jpg";
        assert_eq!(resolve(src, 200, None), src);
    }

    #[test]
    fn unknown_host_passes_through() {
        assert_eq!(
            resolve("/local/placeholder.png", 100, None),
            "/local/placeholder.png"
        );
        assert_eq!(
            resolve("https://example.com/a.png", 640, Some(50)),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn empty_source_passes_through() {
        assert_eq!(resolve("", 400, None), "");
    }

    #[test]
    fn match_is_substring_not_domain() {
        // Not really an imagedelivery.net URL, but the substring is present.
        assert_eq!(
            resolve("https://evil.example/imagedelivery.net/x", 100, None),
            "https://evil.example/imagedelivery.net/x/w=100,q=75"
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        // Contains both recognized substrings; imagedelivery.net is checked first.
        let src = "https://imagedelivery.net/via/cdn.sanity.io/x";
        assert_eq!(resolve(src, 300, None), format!("{src}/w=300,q=75"));

        // Stream substring alongside sanity: sanity outranks it.
        let src = "https://cdn.sanity.io/cloudflarestream.com/x";
        assert_eq!(
            resolve(src, 300, None),
            format!("{src}?w=300&q=75&auto=format")
        );
    }

    #[test]
    fn resolve_is_not_idempotent() {
        // Documented behavior: re-resolving appends a second suffix, so each
        // source must go through the rewriter exactly once.
        let once = resolve("https://imagedelivery.net/abc", 400, None);
        let twice = resolve(&once, 400, None);
        assert_eq!(twice, "https://imagedelivery.net/abc/w=400,q=75/w=400,q=75");
    }

    #[test]
    fn resolve_never_validates() {
        // Garbage in, concatenated garbage out — no panic, no error.
        assert_eq!(
            resolve("imagedelivery.net", 0, Some(9000)),
            "imagedelivery.net/w=0,q=9000"
        );
    }

    #[test]
    fn image_ref_url_matches_resolve() {
        let mut r = ImageRef::new("https://cdn.sanity.io/img.jpg", 800);
        assert_eq!(r.url(), resolve("https://cdn.sanity.io/img.jpg", 800, None));
        r.quality = Some(60);
        assert_eq!(r.url(), "https://cdn.sanity.io/img.jpg?w=800&q=60&auto=format");
    }

    #[test]
    fn srcset_resolves_each_width() {
        let s = srcset("https://cdn.sanity.io/img.jpg", &[400, 800], Some(80));
        assert_eq!(
            s,
            "https://cdn.sanity.io/img.jpg?w=400&q=80&auto=format 400w, \
             https://cdn.sanity.io/img.jpg?w=800&q=80&auto=format 800w"
        );
    }

    #[test]
    fn srcset_passthrough_repeats_source() {
        let s = srcset("/local/a.png", &[400, 800], None);
        assert_eq!(s, "/local/a.png 400w, /local/a.png 800w");
    }
}
