//! CLI output formatting.
//!
//! Information-first display: entities are shown by what they are (page
//! titles, sermon titles) with filesystem detail as secondary context.
//! Each report has a pure `format_*` function returning lines, plus a
//! `print_*` wrapper that writes stdout — tests exercise the format
//! functions without capturing output.
//!
//! ```text
//! Pages
//! 001 about → about.html
//! 002 connect → connect.html
//! 003 give → https://give.example.org (external link)
//!
//! Sermons
//! 001 A Living Hope (2026-08-23)
//! 002 The Cost of Discipleship (2026-08-16)
//!
//! Home → index.html
//! Sermon archive (2) → sermons/index.html
//! ```

use crate::content::Site;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

/// Content inventory, printed by `steeple check` and before a build.
pub fn format_scan_output(site: &Site) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (idx, page) in site.pages.iter().enumerate() {
        let line = if page.is_link {
            format!(
                "{} {} → {} (external link)",
                format_index(idx + 1),
                page.link_title,
                page.body
            )
        } else {
            let hidden = if page.in_nav { "" } else { " (hidden)" };
            format!(
                "{} {} → {}.html{}",
                format_index(idx + 1),
                page.link_title,
                page.slug,
                hidden
            )
        };
        lines.push(line);
    }
    if site.pages.is_empty() {
        lines.push("    (none)".to_string());
    }

    lines.push(String::new());
    lines.push("Sermons".to_string());
    for (idx, sermon) in site.sermons.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(idx + 1),
            sermon.title,
            sermon.date
        ));
    }
    if site.sermons.is_empty() {
        lines.push("    (none)".to_string());
    }

    if site.has_assets {
        lines.push(String::new());
        lines.push("Assets".to_string());
        lines.push("    assets/ → copied to output root".to_string());
    }

    lines
}

pub fn print_scan_output(site: &Site) {
    for line in format_scan_output(site) {
        println!("{line}");
    }
}

/// Build summary: what was written where.
pub fn format_build_output(site: &Site) -> Vec<String> {
    let mut lines = vec![
        "Home → index.html".to_string(),
        format!("Sermon archive ({}) → sermons/index.html", site.sermons.len()),
    ];
    for page in site.pages.iter().filter(|p| !p.is_link) {
        lines.push(format!("{} → {}.html", page.link_title, page.slug));
    }
    let generated = 2 + site.pages.iter().filter(|p| !p.is_link).count();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} sermons listed",
        generated,
        site.sermons.len()
    ));
    lines
}

pub fn print_build_output(site: &Site) {
    for line in format_build_output(site) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{Page, Sermon};

    fn site() -> Site {
        Site {
            config: SiteConfig::default(),
            pages: vec![
                Page {
                    title: "About Us".to_string(),
                    link_title: "about".to_string(),
                    slug: "about".to_string(),
                    body: "# About Us\n".to_string(),
                    in_nav: true,
                    sort_key: 20,
                    is_link: false,
                },
                Page {
                    title: "give".to_string(),
                    link_title: "give".to_string(),
                    slug: "give".to_string(),
                    body: "https://give.example.org".to_string(),
                    in_nav: true,
                    sort_key: 40,
                    is_link: true,
                },
                Page {
                    title: "drafts".to_string(),
                    link_title: "draft vbs".to_string(),
                    slug: "draft-vbs".to_string(),
                    body: "wip".to_string(),
                    in_nav: false,
                    sort_key: u32::MAX,
                    is_link: false,
                },
            ],
            sermons: vec![Sermon {
                title: "A Living Hope".to_string(),
                speaker: "Pastor John Reyes".to_string(),
                date: "2026-08-23".to_string(),
                passage: None,
                video_url: None,
                thumbnail: None,
            }],
            has_assets: true,
        }
    }

    #[test]
    fn scan_output_lists_pages_and_sermons() {
        let lines = format_scan_output(&site());
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 about → about.html");
        assert_eq!(lines[2], "002 give → https://give.example.org (external link)");
        assert_eq!(lines[3], "003 draft vbs → draft-vbs.html (hidden)");
        assert!(lines.contains(&"001 A Living Hope (2026-08-23)".to_string()));
        assert!(lines.iter().any(|l| l.contains("assets/")));
    }

    #[test]
    fn scan_output_marks_empty_sections() {
        let mut s = site();
        s.pages.clear();
        s.sermons.clear();
        s.has_assets = false;
        let lines = format_scan_output(&s);
        assert_eq!(lines.iter().filter(|l| l.contains("(none)")).count(), 2);
        assert!(!lines.iter().any(|l| l.contains("assets/")));
    }

    #[test]
    fn build_output_counts_generated_pages() {
        let lines = format_build_output(&site());
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "Sermon archive (1) → sermons/index.html");
        // about + draft-vbs are generated, give is external.
        assert!(lines.contains(&"about → about.html".to_string()));
        assert!(lines.contains(&"Generated 4 pages, 1 sermons listed".to_string()));
    }
}
