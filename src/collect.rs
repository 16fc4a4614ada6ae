//! Icon collection from the shared package and from custom components.
//!
//! Both collectors are best-effort inventories: a missing directory or a file
//! without recoverable SVG markup is skipped and counted, never an error.
//!
//! ## Shared package layout
//!
//! Each repository has its own installed copy of the package, possibly at a
//! different version. Both the compiled layout and a flat layout are read:
//!
//! ```text
//! dist/icons/
//! ├── ArrowLeft/
//! │   ├── ArrowLeft.js        # compiled component (read)
//! │   ├── ArrowLeft.js.map    # ignored
//! │   └── index.d.ts          # ignored
//! ├── arrow-right.tsx         # flat component file (read)
//! └── index.js                # barrel file (ignored)
//! ```
//!
//! The same icon found in several repositories keeps the markup of the first
//! copy that parses (repositories are visited in configured order, files in
//! name order) and records every repository whose package has the name,
//! whether or not that repository's copy parsed.

use crate::catalog::{Category, IconEntry, IconSet};
use crate::config::Repository;
use crate::extract;
use crate::naming;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const COMPONENT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs"];
const CUSTOM_EXTENSIONS: &[&str] = &["tsx", "jsx"];

/// Outcome of reading one source location.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    /// The directory does not exist; skipped.
    Missing,
    Scanned {
        /// Component files read.
        files: usize,
        /// Files that yielded markup.
        icons: usize,
        /// Files that were unreadable or had no recoverable SVG.
        skipped: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    /// Repository or application the location belongs to.
    pub owner: String,
    pub path: PathBuf,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Default)]
pub struct Collected {
    pub icons: IconSet,
    pub sources: Vec<SourceReport>,
}

#[derive(Default)]
struct Tally {
    files: usize,
    icons: usize,
    skipped: usize,
}

impl Tally {
    fn into_outcome(self) -> SourceOutcome {
        SourceOutcome::Scanned {
            files: self.files,
            icons: self.icons,
            skipped: self.skipped,
        }
    }
}

/// Collect core icons from `<repo>/<package_dir>` of every repository.
pub fn collect_core_icons(repos: &[Repository], package_dir: &Path) -> Collected {
    let mut collected = Collected::default();
    let mut found_in: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for repo in repos {
        let icons_dir = repo.root.join(package_dir);
        if !icons_dir.is_dir() {
            collected.sources.push(SourceReport {
                owner: repo.id.clone(),
                path: icons_dir,
                outcome: SourceOutcome::Missing,
            });
            continue;
        }

        let mut tally = Tally::default();
        for (base, file) in package_icon_files(&icons_dir) {
            tally.files += 1;
            let name = naming::canonical_name(&base);
            if name.is_empty() {
                tally.skipped += 1;
                continue;
            }

            found_in
                .entry(name.clone())
                .or_default()
                .insert(repo.id.clone());

            match read_lossy(&file).and_then(|content| extract::extract_svg(&content)) {
                Some(svg) => {
                    tally.icons += 1;
                    // Markup from the first repository that yields any wins.
                    collected
                        .icons
                        .entry(name.clone())
                        .or_insert_with(|| IconEntry::new(name, Some(svg), Category::Core));
                }
                None => tally.skipped += 1,
            }
        }

        collected.sources.push(SourceReport {
            owner: repo.id.clone(),
            path: icons_dir,
            outcome: tally.into_outcome(),
        });
    }

    for (name, repos) in found_in {
        if let Some(entry) = collected.icons.get_mut(&name) {
            entry.used_by = repos;
        }
    }

    collected
}

/// `(base name, component file)` for every icon in a package directory.
///
/// A subdirectory is one icon named after the directory; its component is
/// the file whose stem matches the directory name, else the first
/// component file that is not a barrel.
fn package_icon_files(icons_dir: &Path) -> Vec<(String, PathBuf)> {
    let Ok(read_dir) = fs::read_dir(icons_dir) else {
        return Vec::new();
    };
    let mut entries: Vec<PathBuf> = read_dir.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    entries.sort();

    entries
        .into_iter()
        .filter_map(|path| {
            if path.is_dir() {
                let base = path.file_name()?.to_string_lossy().to_string();
                let file = icon_dir_component(&path, &base)?;
                Some((base, file))
            } else if is_component_file(&path) {
                Some((naming::file_stem(&path), path))
            } else {
                None
            }
        })
        .collect()
}

fn icon_dir_component(dir: &Path, base: &str) -> Option<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_component_file(p))
        .collect();
    files.sort();

    files
        .iter()
        .find(|p| naming::file_stem(p) == base)
        .or_else(|| files.first())
        .cloned()
}

/// Component modules only: no source maps, declaration files, or barrels.
fn is_component_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if name.starts_with('.') || name.ends_with(".map") || name.ends_with(".d.ts") {
        return false;
    }
    if naming::file_stem(path) == "index" {
        return false;
    }
    has_extension(path, COMPONENT_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| extensions.contains(&e.as_str()))
}

fn read_lossy(path: &Path) -> Option<String> {
    fs::read(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Collect custom icons from every `(application, directory)` pair.
///
/// Directories are walked recursively. Within the custom set the first
/// component with a given name wins; the owning application is attached
/// directly.
pub fn collect_custom_icons(dirs: &[(String, PathBuf)]) -> Collected {
    let mut collected = Collected::default();

    for (app, dir) in dirs {
        if !dir.is_dir() {
            collected.sources.push(SourceReport {
                owner: app.clone(),
                path: dir.clone(),
                outcome: SourceOutcome::Missing,
            });
            continue;
        }

        let mut tally = Tally::default();
        let files = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && has_extension(e.path(), CUSTOM_EXTENSIONS));

        for file in files {
            tally.files += 1;
            let Some(content) = read_lossy(file.path()) else {
                tally.skipped += 1;
                continue;
            };
            let Some(svg) = extract::extract_svg_from_source(&content) else {
                tally.skipped += 1;
                continue;
            };
            tally.icons += 1;

            let name = naming::component_name(&content, file.path());
            collected.icons.entry(name.clone()).or_insert_with(|| {
                let mut entry = IconEntry::new(name, Some(svg), Category::Custom);
                entry.used_by.insert(app.clone());
                entry
            });
        }

        collected.sources.push(SourceReport {
            owner: app.clone(),
            path: dir.clone(),
            outcome: tally.into_outcome(),
        });
    }

    collected
}
