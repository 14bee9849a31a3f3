//! Site configuration.
//!
//! Loads and validates `config.toml` from the content root. Configuration is
//! sparse: stock defaults cover every field, user files override only the
//! values they care about, and unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Maranatha Bible Church"
//! tagline = "Proclaiming God's Unchanging Word in an Increasingly Unstable World"
//! base_url = "https://maranathabiblechurch.net"
//!
//! [location]
//! address = "4701 N. Canfield Avenue, Norridge, IL 60706"
//! directions_url = "https://maps.google.com/?q=4701+N+Canfield+Ave+Norridge+IL"
//!
//! [[services]]
//! name = "Sunday Service"
//! time = "1:00 PM"
//! detail = "New Testament Teaching"
//!
//! [[social]]
//! label = "YouTube"
//! url = "https://www.youtube.com/@mbc.chicago"
//!
//! [images]
//! widths = [400, 800, 1200]  # srcset candidate widths, ascending
//! quality = 75               # CDN quality hint (1-100)
//!
//! [colors]
//! background = "#ffffff"
//! text = "#111827"
//! text_muted = "#4b5563"
//! primary = "#1e3a5f"
//! primary_dark = "#16293f"
//! border = "#e5e7eb"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults, so a missing config file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in headers, titles, and page metadata.
    pub site: SiteIdentity,
    /// Street address and directions link shown on the home page.
    pub location: LocationConfig,
    /// Weekly service times shown on the home page, in listed order.
    pub services: Vec<ServiceTime>,
    /// External links for the footer (YouTube channel, etc.).
    pub social: Vec<SocialLink>,
    /// CDN image rewriting settings (srcset widths, quality hint).
    pub images: ImagesConfig,
    /// Color palette injected into the stylesheet as CSS custom properties.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteIdentity::default(),
            location: LocationConfig::default(),
            services: default_services(),
            social: default_social(),
            images: ImagesConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// This is where the quality hint gets bounded — the CDN rewriter itself
    /// accepts whatever it is handed ([`crate::cdn::resolve`] is total), so
    /// bad values must be caught here, at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.widths.is_empty() {
            return Err(ConfigError::Validation(
                "images.widths must not be empty".into(),
            ));
        }
        if self.images.widths.contains(&0) {
            return Err(ConfigError::Validation(
                "images.widths values must be positive".into(),
            ));
        }
        if !self.images.widths.windows(2).all(|w| w[0] < w[1]) {
            return Err(ConfigError::Validation(
                "images.widths must be strictly ascending".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load and validate `config.toml` from `dir`, falling back to stock
/// defaults when the file does not exist.
pub fn load(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let raw = fs::read_to_string(&path)?;
    let config: SiteConfig = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// Site identity strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Church name, used as the site title and header wordmark.
    pub name: String,
    /// One-line tagline shown in the hero and used as the meta description.
    pub tagline: String,
    /// Canonical site URL for Open Graph metadata.
    pub base_url: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: "Maranatha Bible Church".to_string(),
            tagline: "Proclaiming God's Unchanging Word in an Increasingly Unstable World"
                .to_string(),
            base_url: "https://maranathabiblechurch.net".to_string(),
        }
    }
}

/// Street address and directions link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    pub address: String,
    /// External maps link for the "Get Directions" call to action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            address: "4701 N. Canfield Avenue, Norridge, IL 60706".to_string(),
            directions_url: None,
        }
    }
}

/// One recurring service shown in the "Join Us This Week" grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceTime {
    /// e.g. "Sunday Service"
    pub name: String,
    /// Display time, e.g. "1:00 PM". Free text — no timezone math here.
    pub time: String,
    /// One-line description, e.g. "New Testament Teaching".
    #[serde(default)]
    pub detail: String,
}

fn default_services() -> Vec<ServiceTime> {
    vec![
        ServiceTime {
            name: "Sunday Service".to_string(),
            time: "1:00 PM".to_string(),
            detail: "New Testament Teaching".to_string(),
        },
        ServiceTime {
            name: "Wednesday Prayer".to_string(),
            time: "7:00 PM".to_string(),
            detail: "Prayer Night".to_string(),
        },
        ServiceTime {
            name: "Friday Bible Study".to_string(),
            time: "7:00 PM".to_string(),
            detail: "Old Testament Studies".to_string(),
        },
    ]
}

/// A labeled external link for the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

fn default_social() -> Vec<SocialLink> {
    vec![SocialLink {
        label: "YouTube".to_string(),
        url: "https://www.youtube.com/@mbc.chicago".to_string(),
    }]
}

/// CDN image rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Candidate widths for generated `srcset` attributes, ascending.
    pub widths: Vec<u32>,
    /// Quality hint passed to the CDN (1-100).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            widths: vec![400, 800, 1200],
            quality: crate::cdn::DEFAULT_QUALITY,
        }
    }
}

impl ImagesConfig {
    /// Width used for the plain `src` fallback: the middle candidate.
    pub fn default_width(&self) -> u32 {
        self.widths[self.widths.len() / 2]
    }
}

/// Color palette for the generated stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    /// Brand color: hero background, links, accents.
    pub primary: String,
    /// Darker brand shade for gradients and hover states.
    pub primary_dark: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111827".to_string(),
            text_muted: "#4b5563".to_string(),
            primary: "#1e3a5f".to_string(),
            primary_dark: "#16293f".to_string(),
            border: "#e5e7eb".to_string(),
        }
    }
}

/// Generate the `:root` CSS custom property block from the palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n  --color-bg: {};\n  --color-text: {};\n  --color-text-muted: {};\n  --color-primary: {};\n  --color-primary-dark: {};\n  --color-border: {};\n}}",
        colors.background,
        colors.text,
        colors.text_muted,
        colors.primary,
        colors.primary_dark,
        colors.border
    )
}

/// A fully documented stock `config.toml`, printed by `steeple gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = SiteConfig::default();
    let services = defaults
        .services
        .iter()
        .map(|s| {
            format!(
                "[[services]]\nname = {:?}\ntime = {:?}\ndetail = {:?}\n",
                s.name, s.time, s.detail
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let social = defaults
        .social
        .iter()
        .map(|s| format!("[[social]]\nlabel = {:?}\nurl = {:?}\n", s.label, s.url))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\
# steeple site configuration. Every key is optional; values shown are the
# stock defaults. Unknown keys are rejected.

[site]
# Church name: site title, header wordmark, Open Graph site name.
name = {name:?}
# One-line tagline: hero subtitle and meta description.
tagline = {tagline:?}
# Canonical URL for Open Graph metadata.
base_url = {base_url:?}

[location]
address = {address:?}
# Optional external maps link for \"Get Directions\".
# directions_url = \"https://maps.google.com/?q=...\"

# Weekly services, shown on the home page in listed order.
{services}
# Footer links.
{social}
[images]
# Candidate widths for generated srcset attributes, ascending. The middle
# width is used as the plain src fallback.
widths = {widths:?}
# Quality hint passed to the image CDN (1-100).
quality = {quality}

[colors]
background = {background:?}
text = {text:?}
text_muted = {text_muted:?}
primary = {primary:?}
primary_dark = {primary_dark:?}
border = {border:?}
",
        name = defaults.site.name,
        tagline = defaults.site.tagline,
        base_url = defaults.site.base_url,
        address = defaults.location.address,
        services = services,
        social = social,
        widths = defaults.images.widths,
        quality = defaults.images.quality,
        background = defaults.colors.background,
        text = defaults.colors.text,
        text_muted = defaults.colors.text_muted,
        primary = defaults.colors.primary,
        primary_dark = defaults.colors.primary_dark,
        border = defaults.colors.border,
    )
}
