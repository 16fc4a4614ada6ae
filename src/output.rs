//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Every stage reports per source location: the owning repository or
//! application first, the directory it read as indented context, then what
//! was found. Locations that do not exist are reported as skipped rather
//! than silently dropped, so a missing `node_modules` install is visible.
//!
//! # Output Format
//!
//! ## Collection
//!
//! ```text
//! empire
//!     Source: ../empire/node_modules/@anatomy-financial/anatomy-ui-core/dist/icons
//!     142 icons from 143 files (1 skipped)
//! hil-ui
//!     Source: ../hil-ui/node_modules/@anatomy-financial/anatomy-ui-core/dist/icons
//!     skipped (directory not found)
//! ```
//!
//! ## Usage
//!
//! ```text
//! empire: 37 icons, 12 classes in 410 files
//! hil-ui: skipped (../hil-ui/src not found)
//! ```
//!
//! ## Redundancy
//!
//! ```text
//! 2 exact duplicate groups (5 icons)
//!     Back (core), ChevronLeft (core)
//! 1 near duplicate pair
//!     98.9% Circle (core) ~ Ring (custom)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::catalog::{Catalog, IconKey};
use crate::collect::{SourceOutcome, SourceReport};
use crate::publish::PublishOutcome;
use crate::redundancy::RedundancyReport;
use crate::usage::{AppOutcome, AppReport};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 icon`, `2 icons`, `2 classes`.
fn plural(count: usize, noun: &str) -> String {
    match count {
        1 => format!("{count} {noun}"),
        _ if noun.ends_with('s') => format!("{count} {noun}es"),
        _ => format!("{count} {noun}s"),
    }
}

fn key_label(key: &IconKey) -> String {
    format!("{} ({})", key.name, key.category)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Stages 1-2: Collection
// ============================================================================

/// Format per-location results of a collector.
pub fn format_sources(reports: &[SourceReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        lines.push(report.owner.clone());
        lines.push(format!("{}Source: {}", indent(1), report.path.display()));
        let detail = match &report.outcome {
            SourceOutcome::Missing => "skipped (directory not found)".to_string(),
            SourceOutcome::Scanned {
                files,
                icons,
                skipped: 0,
            } => format!("{} from {}", plural(*icons, "icon"), plural(*files, "file")),
            SourceOutcome::Scanned {
                files,
                icons,
                skipped,
            } => format!(
                "{} from {} ({} skipped)",
                plural(*icons, "icon"),
                plural(*files, "file"),
                skipped
            ),
        };
        lines.push(format!("{}{}", indent(1), detail));
    }
    lines
}

/// Print collector output to stdout.
pub fn print_sources(reports: &[SourceReport]) {
    print_lines(format_sources(reports));
}

// ============================================================================
// Stage 3: Usage
// ============================================================================

pub fn format_usage(apps: &[AppReport]) -> Vec<String> {
    apps.iter()
        .map(|report| match &report.outcome {
            AppOutcome::Missing => format!(
                "{}: skipped ({} not found)",
                report.app,
                report.path.display()
            ),
            AppOutcome::Scanned {
                files,
                icons,
                classes,
            } => format!(
                "{}: {}, {} in {}",
                report.app,
                plural(*icons, "icon"),
                plural(*classes, "class"),
                plural(*files, "file")
            ),
        })
        .collect()
}

/// Print usage scan output to stdout.
pub fn print_usage(apps: &[AppReport]) {
    print_lines(format_usage(apps));
}

// ============================================================================
// Stage 4: Redundancy
// ============================================================================

pub fn format_redundancy(report: &RedundancyReport) -> Vec<String> {
    if report.is_empty() {
        return vec!["No redundant icons detected".to_string()];
    }

    let mut lines = Vec::new();
    if !report.exact_groups.is_empty() {
        lines.push(format!(
            "{} ({})",
            plural(report.exact_groups.len(), "exact duplicate group"),
            plural(report.exact_icon_count(), "icon")
        ));
        for group in &report.exact_groups {
            let names: Vec<String> = group.iter().map(key_label).collect();
            lines.push(format!("{}{}", indent(1), names.join(", ")));
        }
    }
    if !report.near_pairs.is_empty() {
        lines.push(plural(report.near_pairs.len(), "near duplicate pair"));
        for pair in &report.near_pairs {
            lines.push(format!(
                "{}{:.1}% {} ~ {}",
                indent(1),
                pair.similarity * 100.0,
                key_label(&pair.a),
                key_label(&pair.b)
            ));
        }
    }
    lines
}

/// Print redundancy output to stdout.
pub fn print_redundancy(report: &RedundancyReport) {
    print_lines(format_redundancy(report));
}

// ============================================================================
// Summary and publish
// ============================================================================

/// Final line after the page is written.
///
/// ```text
/// Generated index.html: 230 icons (178 core, 12 custom, 40 icon font classes)
/// ```
pub fn format_summary(catalog: &Catalog, output: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {}: {} ({} core, {} custom, {})",
        output.display(),
        plural(catalog.len(), "icon"),
        catalog.core.len(),
        catalog.custom.len(),
        plural(catalog.prime.len(), "icon font class")
    )];
    if catalog.core.is_empty() && catalog.custom.is_empty() {
        lines.push(format!("{}warning: no SVG icons collected", indent(1)));
    }
    lines
}

pub fn print_summary(catalog: &Catalog, output: &Path) {
    print_lines(format_summary(catalog, output));
}

pub fn format_publish(outcome: &PublishOutcome, site_url: Option<&str>) -> Vec<String> {
    match outcome {
        PublishOutcome::NoChanges => vec!["No changes to publish".to_string()],
        PublishOutcome::Pushed { message } => {
            let mut lines = vec![format!("Pushed: {message}")];
            if let Some(url) = site_url {
                lines.push(format!("{}Live at {url}", indent(1)));
            }
            lines
        }
    }
}

pub fn print_publish(outcome: &PublishOutcome, site_url: Option<&str>) {
    print_lines(format_publish(outcome, site_url));
}

// ============================================================================
// Tests
// ============================================================================
