//! HTML gallery generation.
//!
//! Final stage of the pipeline. Takes the assembled [`Catalog`] and the
//! [`RedundancyReport`] and renders one self-contained page.
//!
//! ## Page Layout
//!
//! - **Header**: title, icon totals and the generation date
//! - **Gallery tab**: per-application stats, legend, filter bar (search,
//!   application, category, visible count) and two card grids
//! - **Redundant tab**: exact and near duplicate groups
//!
//! The gallery cards are not rendered here. Every [`DisplayEntry`] is
//! serialized into an embedded `application/json` block and the grids are
//! populated client-side, which keeps search and filtering in one place.
//! The redundant tab is static and rendered server-side.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/gallery.css`: page styles
//! - `static/gallery.js`: grid population, filters, tabs and click-to-copy
//!
//! The icon-font stylesheet is linked from its CDN URL.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Names and application ids are escaped; SVG markup is inserted verbatim.

use crate::catalog::{Catalog, Category, DisplayEntry, IconEntry, IconKey};
use crate::config::GalleryConfig;
use crate::redundancy::RedundancyReport;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS: &str = include_str!("../static/gallery.css");
const JS: &str = include_str!("../static/gallery.js");

/// Data block consumed by `gallery.js`.
#[derive(Serialize)]
struct GalleryData<'a> {
    apps: Vec<AppData<'a>>,
    entries: &'a [DisplayEntry],
}

#[derive(Serialize)]
struct AppData<'a> {
    id: &'a str,
    color: &'a str,
}

/// Render the complete gallery document.
///
/// `generated_on` is shown verbatim in the header; rendering is otherwise a
/// pure function of its inputs.
pub fn render_gallery(
    catalog: &Catalog,
    redundancy: &RedundancyReport,
    config: &GalleryConfig,
    generated_on: &str,
) -> Result<Markup, GenerateError> {
    let entries = catalog.display_entries(&config.scan.class_prefix);
    let data = GalleryData {
        apps: config
            .repos
            .iter()
            .map(|r| AppData {
                id: &r.id,
                color: &r.color,
            })
            .collect(),
        entries: &entries,
    };
    let json = embed_json(&data)?;

    let svg_count = catalog.core.len() + catalog.custom.len();
    let prime_count = catalog.prime.len();
    let total = catalog.len();

    let content = html! {
        h1 { (config.title) }
        p.subtitle {
            (total) " total icons (" (svg_count) " SVG components + " (prime_count)
            " icon font classes) · Updated " (generated_on)
        }
        (tab_nav(redundancy.group_count()))
        div.tab-content.active id="tab-gallery" {
            (render_stats(catalog, config, total))
            (render_legend(config))
            (render_filters(config, total))
            h2 { "SVG Icon Components (" (svg_count) ")" }
            div.grid id="svg-grid" {}
            h2 { "Icon Font Classes (" (prime_count) ")" }
            div.grid id="prime-grid" {}
        }
        div.tab-content id="tab-redundant" {
            (render_redundant(catalog, redundancy, config))
        }
        script type="application/json" id="gallery-data" { (PreEscaped(json)) }
        script { (PreEscaped(JS)) }
    };

    Ok(base_document(&config.title, &config.primeicons_css_url, content))
}

/// Write a rendered document, creating the parent directory if needed.
pub fn write_gallery(path: &Path, document: Markup) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.into_string())?;
    Ok(())
}

/// Serialize a value for an inline `<script>` block.
///
/// Every `<` becomes `\u003c`, so markup inside the data can neither close
/// the element nor open an HTML comment. `<` only occurs inside JSON
/// strings, where the escape decodes back to the same character.
fn embed_json<T: Serialize>(value: &T) -> Result<String, GenerateError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, font_css_url: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(font_css_url);
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn tab_nav(redundant_groups: usize) -> Markup {
    html! {
        nav.tab-nav {
            button.tab-btn.active type="button" data-tab="gallery" { "Gallery" }
            button.tab-btn type="button" data-tab="redundant" {
                "Redundant Icons"
                @if redundant_groups > 0 {
                    span.tab-badge { (redundant_groups) }
                }
            }
        }
    }
}

fn render_stats(catalog: &Catalog, config: &GalleryConfig, total: usize) -> Markup {
    let ids: Vec<String> = config.repos.iter().map(|r| r.id.clone()).collect();
    html! {
        div.stats {
            (stat(total, "Total Icons"))
            @for (app, count) in catalog.app_counts(&ids) {
                (stat(count, &app))
            }
        }
    }
}

fn stat(value: usize, label: &str) -> Markup {
    html! {
        div.stat {
            div.stat-num { (value) }
            div.stat-label { (label) }
        }
    }
}

fn render_legend(config: &GalleryConfig) -> Markup {
    html! {
        div.legend {
            @for repo in &config.repos {
                div.legend-item {
                    span.legend-dot style={ "background:" (repo.color) } {}
                    (repo.id)
                }
            }
            div.legend-divider {}
            @for category in Category::ALL {
                div.legend-item {
                    (category_badge(category))
                    " " (category_description(category))
                }
            }
        }
    }
}

fn category_badge(category: Category) -> Markup {
    html! {
        span class={ "source-badge source-" (category.label()) } { (category.label()) }
    }
}

fn category_description(category: Category) -> &'static str {
    match category {
        Category::Core => "shared design-system package",
        Category::Custom => "app-specific SVG",
        Category::Prime => "icon font CSS",
    }
}

fn render_filters(config: &GalleryConfig, total: usize) -> Markup {
    html! {
        div.filters {
            input.search id="search" type="search" placeholder="Search icons..." autocomplete="off";
            div.filter-group {
                button.filter-btn.active type="button" data-app="all" { "All apps" }
                @for repo in &config.repos {
                    button.filter-btn type="button" data-app=(repo.id) { (repo.id) }
                }
            }
            div.filter-group {
                button.filter-btn.active type="button" data-category="all" { "All sources" }
                @for category in Category::ALL {
                    button.filter-btn type="button" data-category=(category.label()) { (category.label()) }
                }
            }
            span.count id="visible-count" { (total) " icons" }
        }
    }
}

// ============================================================================
// Redundant Tab
// ============================================================================

fn render_redundant(catalog: &Catalog, report: &RedundancyReport, config: &GalleryConfig) -> Markup {
    let threshold = (config.redundancy.near_duplicate_threshold * 100.0).round() as u32;

    html! {
        h2 { "Redundant Icon Analysis" }
        p.dup-desc {
            "Icons detected as visually identical or very similar. Exact duplicates share identical SVG path data. Near duplicates have at least "
            (threshold) "% path similarity."
        }
        div.redundant-stats {
            (stat(report.exact_groups.len(), "Exact Duplicate Groups"))
            (stat(report.exact_icon_count(), "Icons in Exact Groups"))
            (stat(report.near_pairs.len(), "Near Duplicate Pairs"))
        }
        @if !report.exact_groups.is_empty() {
            h3 { "Exact Duplicates" }
            p.dup-desc { "These icons have identical SVG path data despite having different names." }
            @for group in &report.exact_groups {
                (dup_group(
                    catalog,
                    group,
                    html! { span.dup-type.exact { "exact" } },
                    &format!("{} identical icons", group.len()),
                ))
            }
        }
        @if !report.near_pairs.is_empty() {
            h3 { "Near Duplicates (≥" (threshold) "% similar)" }
            p.dup-desc { "These icons have very similar SVG paths and may be visual duplicates or minor variants." }
            @for pair in &report.near_pairs {
                @let percent = (pair.similarity * 100.0) as u32;
                (dup_group(
                    catalog,
                    &[pair.a.clone(), pair.b.clone()],
                    html! { span.dup-type.near { "~" (percent) "%" } },
                    "Near duplicate",
                ))
            }
        }
        @if report.is_empty() {
            p.no-redundant { "No redundant icons detected." }
        }
    }
}

fn dup_group(catalog: &Catalog, keys: &[IconKey], kind: Markup, label: &str) -> Markup {
    html! {
        div.dup-group {
            div.dup-group-header {
                (kind)
                span.dup-group-label { (label) }
            }
            div.dup-group-icons {
                @for entry in keys.iter().filter_map(|k| catalog.get(k)) {
                    (dup_card(catalog, entry))
                }
            }
        }
    }
}

fn dup_card(catalog: &Catalog, entry: &IconEntry) -> Markup {
    let apps: Vec<String> = catalog.apps_for(entry).into_iter().collect();
    html! {
        div.dup-card {
            div.dup-preview {
                @if let Some(markup) = &entry.markup {
                    (PreEscaped(markup))
                }
            }
            div.dup-name { (entry.name) }
            (category_badge(entry.category))
            div.dup-apps {
                @if apps.is_empty() {
                    "unused"
                } @else {
                    (apps.join(", "))
                }
            }
        }
    }
}
