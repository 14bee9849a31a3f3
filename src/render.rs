//! HTML site rendering.
//!
//! Second stage of the build: takes a scanned [`Site`] and writes the final
//! static HTML tree.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, service-times grid, location block
//! - **Sermons** (`/sermons/index.html`): sermon archive, newest first
//! - **Markdown pages** (`/{slug}.html`): about, connect, ... converted from
//!   markdown; URL-only pages become external nav links and produce no file
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── sermons/
//! │   └── index.html
//! ├── about.html
//! ├── connect.html
//! └── robots.txt            # copied from content/assets/
//! ```
//!
//! ## Images
//!
//! No image file is ever written here. Every image source — sermon
//! thumbnails and markdown `![alt](url)` elements alike — is passed through
//! [`crate::cdn`] once per candidate width to build `src`/`srcset`
//! attributes, and the CDN serves the actual pixels.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! type-safe templates with automatic XSS escaping. The stylesheet is
//! embedded at compile time; the configured palette is injected ahead of it
//! as CSS custom properties.

use crate::cdn;
use crate::config::{self, ImagesConfig, SiteConfig};
use crate::content::{self, Page, Sermon, Site};
use chrono::{Datelike, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use pulldown_cmark::{html as md_html, Event, Parser, Tag, TagEnd};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Render `site` into `output_dir`. `source` is only needed to locate
/// `assets/` for the verbatim copy.
pub fn render(site: &Site, source: &Path, output_dir: &Path) -> Result<(), RenderError> {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&site.config.colors),
        CSS_STATIC
    );

    fs::create_dir_all(output_dir)?;

    let home = render_home(site, &css);
    fs::write(output_dir.join("index.html"), home.into_string())?;

    let sermons_dir = output_dir.join("sermons");
    fs::create_dir_all(&sermons_dir)?;
    let sermons = render_sermons(site, &css);
    fs::write(sermons_dir.join("index.html"), sermons.into_string())?;

    for page in site.pages.iter().filter(|p| !p.is_link) {
        let markup = render_markdown_page(page, site, &css);
        fs::write(
            output_dir.join(format!("{}.html", page.slug)),
            markup.into_string(),
        )?;
    }

    if site.has_assets {
        copy_assets(&content::assets_dir(source), output_dir)?;
    }

    Ok(())
}

/// Copy `assets/` verbatim into the output root, preserving subdirectories.
fn copy_assets(assets: &Path, output_dir: &Path) -> Result<(), RenderError> {
    for entry in WalkDir::new(assets) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(assets)
            .expect("walkdir yields children of its root");
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            fs::copy(entry.path(), &dst)?;
        }
    }
    Ok(())
}

// ============================================================================
// Document chrome
// ============================================================================

/// Base HTML document: metadata head (title template, description, Open
/// Graph, Twitter card) plus header and footer around `content`.
fn base_document(
    page_title: Option<&str>,
    site: &Site,
    current: &str,
    css: &str,
    content: Markup,
) -> Markup {
    let identity = &site.config.site;
    let full_title = match page_title {
        Some(t) => format!("{} | {}", t, identity.name),
        None => identity.name.clone(),
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta name="description" content=(identity.tagline);
                meta name="robots" content="index, follow";
                meta property="og:type" content="website";
                meta property="og:locale" content="en_US";
                meta property="og:url" content=(identity.base_url);
                meta property="og:site_name" content=(identity.name);
                meta property="og:title" content=(full_title);
                meta property="og:description" content=(identity.tagline);
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(full_title);
                meta name="twitter:description" content=(identity.tagline);
                style { (PreEscaped(css)) }
            }
            body {
                (site_header(site, current))
                (content)
                (site_footer(&site.config))
            }
        }
    }
}

/// Header with wordmark and top navigation.
///
/// Sermons is always first; markdown pages follow in number order. Link
/// pages open off-site in a new tab.
fn site_header(site: &Site, current: &str) -> Markup {
    html! {
        header.site-header {
            a.wordmark href="/" { (site.config.site.name) }
            nav.site-nav {
                a class=[(current == "sermons").then_some("current")] href="/sermons/" { "Sermons" }
                @for page in site.nav_pages() {
                    @if page.is_link {
                        a href=(page.body) target="_blank" rel="noopener noreferrer" {
                            (page.link_title)
                        }
                    } @else {
                        a class=[(current == page.slug).then_some("current")]
                            href={ "/" (page.slug) ".html" } {
                            (page.link_title)
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    let year = Utc::now().year();
    html! {
        footer.site-footer {
            p.copyright {
                "© " (year) " " (config.site.name) ". All rights reserved."
            }
            @if !config.social.is_empty() {
                div.social {
                    @for link in &config.social {
                        a href=(link.url) target="_blank" rel="noopener noreferrer" {
                            (link.label)
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Home page: hero, service times, location.
fn render_home(site: &Site, css: &str) -> Markup {
    let config = &site.config;
    let visit_href = config
        .location
        .directions_url
        .as_deref()
        .unwrap_or("/connect.html");

    let content = html! {
        section.hero {
            p.eyebrow { "Welcome to" }
            h1 { (config.site.name) }
            p.tagline { (config.site.tagline) }
            div.hero-actions {
                a.button.button-solid href="/sermons/" { "Watch Sermons" }
                a.button.button-outline href=(visit_href) { "Plan Your Visit" }
            }
        }
        @if !config.services.is_empty() {
            section.services {
                h2 { "Join Us This Week" }
                div.service-grid {
                    @for service in &config.services {
                        div.service-card {
                            h3 { (service.name) }
                            p.service-time { (service.time) }
                            @if !service.detail.is_empty() {
                                p.service-detail { (service.detail) }
                            }
                        }
                    }
                }
            }
        }
        section.location {
            h2 { "Our Location" }
            p.address { (config.location.address) }
            @if let Some(url) = &config.location.directions_url {
                a.directions href=(url) target="_blank" rel="noopener noreferrer" {
                    "Get Directions →"
                }
            }
        }
    };

    base_document(None, site, "", css, content)
}

/// Sermon archive page, newest first.
fn render_sermons(site: &Site, css: &str) -> Markup {
    let content = html! {
        main.sermons-page {
            h1 { "Sermons" }
            @if site.sermons.is_empty() {
                p.empty { "Recordings are coming soon. Join us in person this Sunday." }
            }
            div.sermon-list {
                @for sermon in &site.sermons {
                    (sermon_card(sermon, &site.config.images))
                }
            }
        }
    };

    base_document(Some("Sermons"), site, "sermons", css, content)
}

fn sermon_card(sermon: &Sermon, images: &ImagesConfig) -> Markup {
    html! {
        article.sermon-card {
            @if let Some(thumb) = &sermon.thumbnail {
                (cdn_image(thumb, &sermon.title, None, images, "(max-width: 640px) 100vw, 400px"))
            }
            div.sermon-body {
                h2 { (sermon.title) }
                p.sermon-meta {
                    (sermon.date) " · " (sermon.speaker)
                    @if let Some(passage) = &sermon.passage {
                        " · " (passage)
                    }
                }
                @if let Some(url) = &sermon.video_url {
                    a.watch href=(url) target="_blank" rel="noopener noreferrer" { "Watch →" }
                }
            }
        }
    }
}

/// A markdown page (about, connect, ...), body converted with CDN-rewritten
/// images.
fn render_markdown_page(page: &Page, site: &Site, css: &str) -> Markup {
    let body = markdown_to_html(&page.body, &site.config.images);
    let content = html! {
        main.content-page {
            article { (PreEscaped(body)) }
        }
    };
    base_document(Some(&page.title), site, &page.slug, css, content)
}

// ============================================================================
// Markdown
// ============================================================================

/// Convert markdown to HTML, replacing every image element with a CDN
/// `<img>` carrying a generated `srcset`.
///
/// This is the render-side hookup of [`cdn::resolve`]: each image element is
/// resolved once per candidate width, the way the surrounding framework
/// would call a pluggable image loader.
fn markdown_to_html(body: &str, images: &ImagesConfig) -> String {
    let mut events = Vec::new();
    let mut parser = Parser::new(body);

    while let Some(event) = parser.next() {
        match event {
            Event::Start(Tag::Image { dest_url, title, .. }) => {
                // Alt text is the inline content up to the closing tag.
                let mut alt = String::new();
                for inner in parser.by_ref() {
                    match inner {
                        Event::End(TagEnd::Image) => break,
                        Event::Text(t) | Event::Code(t) => alt.push_str(&t),
                        _ => {}
                    }
                }
                let title_attr = (!title.is_empty()).then(|| title.to_string());
                let markup = cdn_image(
                    &dest_url,
                    &alt,
                    title_attr.as_deref(),
                    images,
                    "(max-width: 800px) 100vw, 800px",
                );
                events.push(Event::Html(markup.into_string().into()));
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    md_html::push_html(&mut out, events.into_iter());
    out
}

/// An `<img>` whose `src` and `srcset` are resolved through the CDN rewriter.
fn cdn_image(
    source: &str,
    alt: &str,
    title: Option<&str>,
    images: &ImagesConfig,
    sizes: &str,
) -> Markup {
    let quality = Some(images.quality);
    html! {
        img src=(cdn::resolve(source, images.default_width(), quality))
            srcset=(cdn::srcset(source, &images.widths, quality))
            sizes=(sizes)
            alt=(alt)
            title=[title]
            loading="lazy";
    }
}
