//! # Steeple
//!
//! A single-binary website tool for churches: your filesystem is the data
//! source, the output is plain static HTML, and image heavy-lifting is
//! delegated to whichever CDN already hosts the asset.
//!
//! # Architecture: Scan, Render, Serve
//!
//! ```text
//! 1. Scan     content/  →  Site       (filesystem → structured data)
//! 2. Render   Site      →  dist/      (Maud templates → static HTML)
//! 3. Serve    dist/     →  HTTP       (static files + /api/health)
//! ```
//!
//! Scan and render are pure stages — scan reads the filesystem into a
//! [`content::Site`], render maps that value to HTML files — so unit tests
//! exercise both without a server or network. Serving is optional: the
//! rendered `dist/` works on any static file host, and the built-in server
//! exists for local preview and for platforms that want a health probe.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Scans the content directory: markdown pages, `sermons.toml`, assets |
//! | [`cdn`] | Image URL rewriter — maps (source, width, quality) to CDN variant URLs |
//! | [`render`] | Renders the HTML site with Maud; wires markdown images through [`cdn`] |
//! | [`config`] | `config.toml` loading, validation, stock config, palette CSS |
//! | [`serve`] | Axum static server with the `/api/health` probe |
//! | [`output`] | CLI output formatting for check/build reports |
//!
//! # Design Decisions
//!
//! ## CDN-Side Images
//!
//! Steeple never opens an image file. Sermon thumbnails and markdown images
//! are referenced by URL, and [`cdn::resolve`] rewrites each reference into
//! a resized/optimized variant request against the hosting CDN (Cloudflare
//! Images, Sanity, Cloudflare Stream). The build stays fast and the binary
//! stays free of codec dependencies; the CDN renders pixels on demand.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system: malformed markup is a build error, template variables
//! are Rust expressions, and all interpolation is auto-escaped.
//!
//! ## NNN-Prefix Ordering
//!
//! Markdown pages use a numeric prefix (`020-about.md`) for explicit nav
//! ordering. Unprefixed files are built but hidden from navigation — useful
//! for drafts that should stay reachable by direct URL. A page whose whole
//! body is a URL becomes an external nav link (an off-site giving portal,
//! say) instead of a generated page.
//!
//! ## A Health Probe That Cannot Fail
//!
//! `/api/health` reads two environment variables with literal fallbacks and
//! stamps the time. There is deliberately no I/O and no error path in it;
//! a liveness probe that can error defeats its purpose.

pub mod cdn;
pub mod config;
pub mod content;
pub mod output;
pub mod render;
pub mod serve;
