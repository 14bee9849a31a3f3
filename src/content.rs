//! Content scanning.
//!
//! First stage of the build: reads the content directory into a [`Site`]
//! value that rendering consumes. The filesystem is the data source — no
//! database, no front-matter beyond markdown itself.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml          # Site config (optional, stock defaults otherwise)
//! ├── sermons.toml         # Sermon archive (optional)
//! ├── assets/              # Static files, copied verbatim to the output root
//! ├── 020-about.md         # Page (numbered = shown in nav, sorted by number)
//! ├── 030-connect.md
//! ├── 040-give.md
//! └── draft-vbs.md         # Unnumbered = built but hidden from nav
//! ```
//!
//! ## Naming Conventions
//!
//! Markdown pages follow the `NNN-name` convention: an optional numeric
//! prefix controls navigation order, the rest of the stem becomes the slug.
//! A page whose entire body is a single URL becomes an external navigation
//! link instead of a generated page (used for e.g. an off-site giving portal).
//!
//! ## Validation
//!
//! The scanner rejects duplicate navigation numbers and sermons with empty
//! titles, so `steeple check` catches content mistakes before a deploy.

use crate::config::{self, SiteConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("sermons.toml parse error: {0}")]
    Sermons(#[from] toml::de::Error),
    #[error("Duplicate page number {0} ({1} and {2})")]
    DuplicateNumber(u32, String, String),
    #[error("Sermon {0} has an empty title")]
    UntitledSermon(usize),
}

/// Everything the renderer needs, in one value.
#[derive(Debug, Serialize)]
pub struct Site {
    pub config: SiteConfig,
    /// Markdown pages, nav pages first, sorted by number.
    pub pages: Vec<Page>,
    /// Sermon archive, newest first.
    pub sermons: Vec<Sermon>,
    /// Whether `assets/` exists and should be copied to the output root.
    pub has_assets: bool,
}

impl Site {
    /// Pages that appear in the navigation bar, in order.
    pub fn nav_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|p| p.in_nav)
    }
}

/// A page read from a markdown file in the content root.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Title from the first `# heading`, or the display name as fallback.
    pub title: String,
    /// Nav label: stem with the number stripped and dashes turned to spaces.
    pub link_title: String,
    /// URL slug (stem with the number prefix stripped).
    pub slug: String,
    /// Raw markdown body (or the target URL for link pages).
    pub body: String,
    /// Whether this page appears in navigation (has a number prefix).
    pub in_nav: bool,
    /// Sort key from the number prefix.
    pub sort_key: u32,
    /// True when the body is a bare URL: rendered as an external nav link,
    /// no HTML page is generated.
    pub is_link: bool,
}

/// One sermon entry from `sermons.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sermon {
    pub title: String,
    pub speaker: String,
    /// ISO date (`YYYY-MM-DD`) as a string; lexicographic order is
    /// chronological, which is all the sermon list needs.
    pub date: String,
    /// Scripture passage, e.g. "Romans 8:1-11".
    #[serde(default)]
    pub passage: Option<String>,
    /// Link to the recording (YouTube, Cloudflare Stream player, ...).
    #[serde(default)]
    pub video_url: Option<String>,
    /// Thumbnail source, resolved through the CDN rewriter at render time.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SermonsFile {
    #[serde(default, rename = "sermon")]
    sermons: Vec<Sermon>,
}

/// Scan `source` into a [`Site`].
pub fn scan(source: &Path) -> Result<Site, ContentError> {
    let config = config::load(source)?;
    let pages = scan_pages(source)?;
    let sermons = scan_sermons(source)?;
    let has_assets = source.join("assets").is_dir();

    Ok(Site {
        config,
        pages,
        sermons,
        has_assets,
    })
}

fn scan_pages(source: &Path) -> Result<Vec<Page>, ContentError> {
    let mut pages = Vec::new();

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") || !path.is_file() {
            continue;
        }
        pages.push(read_page(&path)?);
    }

    // Nav pages first, by number; hidden pages after, by slug.
    pages.sort_by(|a, b| {
        (!a.in_nav, a.sort_key, a.slug.clone()).cmp(&(!b.in_nav, b.sort_key, b.slug.clone()))
    });

    for pair in pages.iter().filter(|p| p.in_nav).collect::<Vec<_>>().windows(2) {
        if pair[0].sort_key == pair[1].sort_key {
            return Err(ContentError::DuplicateNumber(
                pair[0].sort_key,
                pair[0].slug.clone(),
                pair[1].slug.clone(),
            ));
        }
    }

    Ok(pages)
}

fn read_page(path: &Path) -> Result<Page, ContentError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (number, name) = split_number_prefix(&stem);
    let body = fs::read_to_string(path)?;

    let link_title = name.replace('-', " ");
    let slug = if name.is_empty() { stem.clone() } else { name };
    let is_link = body_is_url(&body);
    let title = first_heading(&body).unwrap_or_else(|| link_title.clone());

    Ok(Page {
        title,
        link_title,
        slug,
        body: if is_link { body.trim().to_string() } else { body },
        in_nav: number.is_some(),
        sort_key: number.unwrap_or(u32::MAX),
        is_link,
    })
}

/// Split an `NNN-name` stem into its optional number and the remaining name.
///
/// `"020-about"` → `(Some(20), "about")`; `"draft-vbs"` → `(None, "draft-vbs")`;
/// `"015"` → `(Some(15), "")`.
fn split_number_prefix(stem: &str) -> (Option<u32>, String) {
    if let Some((prefix, rest)) = stem.split_once('-') {
        if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = prefix.parse() {
                return (Some(n), rest.to_string());
            }
        }
    }
    match stem.parse() {
        Ok(n) => (Some(n), String::new()),
        Err(_) => (None, stem.to_string()),
    }
}

/// True when the whole body is one bare URL.
fn body_is_url(body: &str) -> bool {
    let trimmed = body.trim();
    !trimmed.is_empty()
        && !trimmed.contains(char::is_whitespace)
        && (trimmed.starts_with("https://") || trimmed.starts_with("http://"))
}

/// First `# heading` of a markdown body, if any.
fn first_heading(body: &str) -> Option<String> {
    body.lines().find_map(|line| {
        line.strip_prefix("# ")
            .map(|rest| rest.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn scan_sermons(source: &Path) -> Result<Vec<Sermon>, ContentError> {
    let path = source.join("sermons.toml");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(&path)?;
    let file: SermonsFile = toml::from_str(&raw)?;

    for (idx, sermon) in file.sermons.iter().enumerate() {
        if sermon.title.trim().is_empty() {
            return Err(ContentError::UntitledSermon(idx + 1));
        }
    }

    let mut sermons = file.sermons;
    // Newest first; ISO dates sort lexicographically.
    sermons.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(sermons)
}

/// Resolve the content source directory, for error messages and asset copies.
pub fn assets_dir(source: &Path) -> PathBuf {
    source.join("assets")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "020-about.md",
            "# About Us\n\nWe have gathered since 1985.\n",
        );
        write(
            tmp.path(),
            "030-connect.md",
            "# Connect\n\nSmall groups meet weekly.\n",
        );
        write(tmp.path(), "040-give.md", "https://give.example.org/mbc\n");
        write(tmp.path(), "draft-vbs.md", "Coming summer 2027.\n");
        write(
            tmp.path(),
            "sermons.toml",
            r#"
[[sermon]]
title = "The Cost of Discipleship"
speaker = "Pastor John Reyes"
date = "2026-08-16"
passage = "Luke 14:25-33"
thumbnail = "https://videos.cloudflarestream.com/abc/thumbnails/thumb.jpg"

[[sermon]]
title = "A Living Hope"
speaker = "Pastor John Reyes"
date = "2026-08-23"
video_url = "https://www.youtube.com/watch?v=xyz"
thumbnail = "https://imagedelivery.net/acct/sermon-hope/public"
"#,
        );
        fs::create_dir(tmp.path().join("assets")).unwrap();
        write(tmp.path(), "assets/robots.txt", "User-agent: *\n");
        tmp
    }

    #[test]
    fn scan_finds_pages_in_nav_order() {
        let tmp = fixture();
        let site = scan(tmp.path()).unwrap();
        let nav: Vec<_> = site.nav_pages().map(|p| p.slug.as_str()).collect();
        assert_eq!(nav, ["about", "connect", "give"]);
    }

    #[test]
    fn unnumbered_page_is_hidden_but_present() {
        let tmp = fixture();
        let site = scan(tmp.path()).unwrap();
        let draft = site.pages.iter().find(|p| p.slug == "draft-vbs").unwrap();
        assert!(!draft.in_nav);
        assert!(!draft.is_link);
    }

    #[test]
    fn url_only_page_becomes_external_link() {
        let tmp = fixture();
        let site = scan(tmp.path()).unwrap();
        let give = site.pages.iter().find(|p| p.slug == "give").unwrap();
        assert!(give.is_link);
        assert_eq!(give.body, "https://give.example.org/mbc");
        assert_eq!(give.link_title, "give");
    }

    #[test]
    fn page_title_comes_from_first_heading() {
        let tmp = fixture();
        let site = scan(tmp.path()).unwrap();
        let about = site.pages.iter().find(|p| p.slug == "about").unwrap();
        assert_eq!(about.title, "About Us");
    }

    #[test]
    fn sermons_sorted_newest_first() {
        let tmp = fixture();
        let site = scan(tmp.path()).unwrap();
        assert_eq!(site.sermons.len(), 2);
        assert_eq!(site.sermons[0].title, "A Living Hope");
        assert_eq!(site.sermons[1].date, "2026-08-16");
    }

    #[test]
    fn assets_directory_is_detected() {
        let tmp = fixture();
        let site = scan(tmp.path()).unwrap();
        assert!(site.has_assets);

        let empty = TempDir::new().unwrap();
        assert!(!scan(empty.path()).unwrap().has_assets);
    }

    #[test]
    fn missing_sermons_file_is_empty_archive() {
        let tmp = TempDir::new().unwrap();
        let site = scan(tmp.path()).unwrap();
        assert!(site.sermons.is_empty());
    }

    #[test]
    fn duplicate_nav_numbers_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "020-about.md", "# A\n");
        write(tmp.path(), "020-history.md", "# B\n");
        assert!(matches!(
            scan(tmp.path()),
            Err(ContentError::DuplicateNumber(20, _, _))
        ));
    }

    #[test]
    fn untitled_sermon_rejected() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "sermons.toml",
            "[[sermon]]\ntitle = \"  \"\nspeaker = \"x\"\ndate = \"2026-01-01\"\n",
        );
        assert!(matches!(
            scan(tmp.path()),
            Err(ContentError::UntitledSermon(1))
        ));
    }

    #[test]
    fn split_number_prefix_patterns() {
        assert_eq!(split_number_prefix("020-about"), (Some(20), "about".into()));
        assert_eq!(
            split_number_prefix("030-plan-your-visit"),
            (Some(30), "plan-your-visit".into())
        );
        assert_eq!(split_number_prefix("015"), (Some(15), String::new()));
        assert_eq!(split_number_prefix("015-"), (Some(15), String::new()));
        assert_eq!(
            split_number_prefix("draft-vbs"),
            (None, "draft-vbs".into())
        );
        assert_eq!(split_number_prefix("about"), (None, "about".into()));
    }

    #[test]
    fn body_is_url_requires_bare_url() {
        assert!(body_is_url("https://give.example.org\n"));
        assert!(body_is_url("http://example.org"));
        assert!(!body_is_url("see https://example.org"));
        assert!(!body_is_url("# Give\n\nhttps://example.org\n"));
        assert!(!body_is_url(""));
    }
}
