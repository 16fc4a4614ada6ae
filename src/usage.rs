//! Application usage scanning.
//!
//! Walks each application's source tree and records which collected icons
//! and which CSS icon classes it references. Matching is purely textual:
//!
//! - A component counts as used when its name occurs anywhere in a script
//!   file. `Bank` is therefore also "used" by a file importing `BankIcon`.
//!   Aliases and re-exports are not resolved. A custom component defined
//!   inside an application's `src/` also counts as used by that application,
//!   since its own definition mentions the name.
//! - A class counts as used when the prefix (`pi-`) starts a token, so
//!   `class="pi pi-check pi-times"` yields both `pi-check` and `pi-times`.
//!
//! Both imprecisions are accepted: the gallery is an inventory, not a linter.

use crate::config::{Repository, ScanConfig};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name → applications referencing it.
pub type UsageMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Usage {
    /// Component names found in application sources.
    pub icons: UsageMap,
    /// CSS icon classes, full class name (`pi-check`).
    pub classes: UsageMap,
}

impl Usage {
    pub fn add_icon(&mut self, name: &str, app: &str) {
        self.icons
            .entry(name.to_string())
            .or_default()
            .insert(app.to_string());
    }

    pub fn add_class(&mut self, class: &str, app: &str) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .insert(app.to_string());
    }
}

/// Matcher for icon classes with a fixed prefix.
#[derive(Debug, Clone)]
pub struct ClassPattern {
    prefix: String,
    regex: Regex,
}

impl ClassPattern {
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        if prefix.is_empty() {
            return Err(regex::Error::Syntax("class prefix is empty".to_string()));
        }
        let regex = Regex::new(&format!(
            r"(?:^|[^A-Za-z0-9_-]){}([a-z0-9]+(?:-[a-z0-9]+)*)",
            regex::escape(prefix)
        ))?;
        Ok(Self {
            prefix: prefix.to_string(),
            regex,
        })
    }

    /// Every class referenced in `text`, prefix included.
    pub fn find_classes(&self, text: &str) -> BTreeSet<String> {
        self.regex
            .captures_iter(text)
            .map(|caps| {
                // `pi-pi-check` is the hyphenated spelling of `pi pi-check`
                let ident = &caps[1];
                let ident = ident.strip_prefix(self.prefix.as_str()).unwrap_or(ident);
                format!("{}{}", self.prefix, ident)
            })
            .collect()
    }
}

/// Outcome of scanning one application.
#[derive(Debug, Clone, PartialEq)]
pub enum AppOutcome {
    /// The source directory does not exist; nothing was scanned.
    Missing,
    Scanned {
        files: usize,
        icons: usize,
        classes: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppReport {
    pub app: String,
    pub path: PathBuf,
    pub outcome: AppOutcome,
}

#[derive(Debug, Default)]
pub struct UsageScan {
    pub usage: Usage,
    pub apps: Vec<AppReport>,
}

/// Scan every application's `source_dir` for references to `known` icon
/// names and to icon classes.
pub fn scan_usage(
    apps: &[Repository],
    source_dir: &Path,
    known: &BTreeSet<String>,
    scan: &ScanConfig,
    classes: &ClassPattern,
) -> UsageScan {
    let mut result = UsageScan::default();

    for app in apps {
        let root = app.root.join(source_dir);
        if !root.is_dir() {
            result.apps.push(AppReport {
                app: app.id.clone(),
                path: root,
                outcome: AppOutcome::Missing,
            });
            continue;
        }

        let mut files = 0;
        let mut icons_found = BTreeSet::new();
        let mut classes_found = BTreeSet::new();

        for path in source_files(&root) {
            let ext = extension(&path);
            let wants_icons = scan.icon_extensions.iter().any(|e| *e == ext);
            let wants_classes = scan.class_extensions.iter().any(|e| *e == ext);
            if !wants_icons && !wants_classes {
                continue;
            }
            let Ok(bytes) = fs::read(&path) else {
                continue;
            };
            let content = String::from_utf8_lossy(&bytes);
            files += 1;

            if wants_icons {
                icons_found.extend(known.iter().filter(|name| content.contains(name.as_str())));
            }
            if wants_classes {
                classes_found.extend(classes.find_classes(&content));
            }
        }

        for name in &icons_found {
            result.usage.add_icon(name, &app.id);
        }
        for class in &classes_found {
            result.usage.add_class(class, &app.id);
        }
        result.apps.push(AppReport {
            app: app.id.clone(),
            path: root,
            outcome: AppOutcome::Scanned {
                files,
                icons: icons_found.len(),
                classes: classes_found.len(),
            },
        });
    }

    result
}

/// Files under `root` in sorted order, skipping dependency and hidden
/// directories. Unreadable entries are dropped.
fn source_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && (name == "node_modules" || name.starts_with('.'))
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
