//! Gallery configuration.
//!
//! The repository list, application colours and custom-icon directories are
//! stock values compiled into [`GalleryConfig::default`]. A sparse
//! `gallery.toml` next to the generated page may override any of them; the
//! overlay is merged on top of the stock defaults and validated.
//!
//! ## Layout
//!
//! ```text
//! workspace/                       # workspace_root (default: "..")
//! ├── icon-gallery/                # gallery directory (cwd)
//! │   ├── gallery.toml             # optional overlay
//! │   └── index.html               # output_file
//! ├── empire/
//! │   ├── node_modules/@anatomy-financial/anatomy-ui-core/dist/icons/
//! │   └── src/                     # scanned for usage
//! └── anatomy-financials-ui/
//!     └── src/components/svgs/     # custom icons
//! ```
//!
//! ## Overlay example
//!
//! ```toml
//! workspace_root = "../.."
//!
//! [redundancy]
//! near_duplicate_threshold = 0.9
//!
//! [[repos]]
//! id = "empire"
//! color = "#D94A4A"
//! ```
//!
//! Tables merge key-by-key; arrays (like `repos`) replace the stock value
//! entirely. Unknown keys are rejected to catch typos early.

use crate::usage::ClassPattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the optional overlay, looked up in the gallery directory.
pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// A source repository, resolved against the workspace root.
///
/// The same identifier names the repository in its role as an application
/// that consumes icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Page title.
    pub title: String,
    /// Directory holding the sibling repositories, relative to the gallery directory.
    pub workspace_root: String,
    /// Generated page, relative to the gallery directory.
    pub output_file: String,
    /// Repositories scanned for package icons and usage, in display order.
    pub repos: Vec<RepoConfig>,
    /// Shared icon package location inside each repository.
    pub package_icons_dir: String,
    /// Application source directory inside each repository.
    pub source_dir: String,
    /// Custom icon directories per application, relative to the workspace root.
    pub custom_svg_dirs: BTreeMap<String, Vec<String>>,
    /// Stylesheet that renders the CSS-class icons.
    pub primeicons_css_url: String,
    pub scan: ScanConfig,
    pub redundancy: RedundancyConfig,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoConfig {
    pub id: String,
    /// Legend and tag colour for the application.
    pub color: String,
}

/// Which files the usage scanner reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Extensions searched for icon component names.
    pub icon_extensions: Vec<String>,
    /// Extensions searched for CSS icon classes.
    pub class_extensions: Vec<String>,
    /// Class prefix identifying an icon class (`pi-check`).
    pub class_prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            icon_extensions: strings(&["ts", "tsx", "js", "jsx"]),
            class_extensions: strings(&["ts", "tsx", "js", "jsx", "scss", "css"]),
            class_prefix: "pi-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedundancyConfig {
    /// Minimum similarity (0.0 - 1.0) for a near-duplicate pair.
    pub near_duplicate_threshold: f64,
    /// Fingerprint pairs whose length ratio falls below this are never compared.
    pub min_length_ratio: f64,
}

impl Default for RedundancyConfig {
    fn default() -> Self {
        Self {
            near_duplicate_threshold: 0.80,
            min_length_ratio: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Commit subject; the generation date is appended.
    pub commit_message: String,
    /// Where the pushed page is served, printed after a push.
    pub site_url: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            commit_message: "Update icon gallery".to_string(),
            site_url: Some("https://jvu-anatomy.github.io/anatomy-icon-gallery/".to_string()),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn repo(id: &str, color: &str) -> RepoConfig {
    RepoConfig {
        id: id.to_string(),
        color: color.to_string(),
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let mut custom_svg_dirs = BTreeMap::new();
        custom_svg_dirs.insert(
            "anatomy-financials-ui".to_string(),
            vec!["anatomy-financials-ui/src/components/svgs".to_string()],
        );

        Self {
            title: "Anatomy Frontend Icon Gallery".to_string(),
            workspace_root: "..".to_string(),
            output_file: "index.html".to_string(),
            repos: vec![
                repo("review-eob-mf", "#9B4AD9"),
                repo("empire", "#D94A4A"),
                repo("hil-ui", "#4A90D9"),
                repo("document-center-mf", "#D9A04A"),
                repo("anatomy-financials-ui", "#4AD97A"),
            ],
            package_icons_dir: "node_modules/@anatomy-financial/anatomy-ui-core/dist/icons"
                .to_string(),
            source_dir: "src".to_string(),
            custom_svg_dirs,
            primeicons_css_url: "https://unpkg.com/primeicons@6.0.1/primeicons.css".to_string(),
            scan: ScanConfig::default(),
            redundancy: RedundancyConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repos.is_empty() {
            return Err(ConfigError::Validation("repos must not be empty".into()));
        }
        let mut seen = BTreeSet::new();
        for repo in &self.repos {
            if repo.id.is_empty() {
                return Err(ConfigError::Validation("repos.id must not be empty".into()));
            }
            if !seen.insert(repo.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate repository id: {}",
                    repo.id
                )));
            }
            if !repo.color.starts_with('#') {
                return Err(ConfigError::Validation(format!(
                    "color for {} must be a hex color, got {:?}",
                    repo.id, repo.color
                )));
            }
        }
        let threshold = self.redundancy.near_duplicate_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "redundancy.near_duplicate_threshold must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.redundancy.min_length_ratio) {
            return Err(ConfigError::Validation(
                "redundancy.min_length_ratio must be in [0, 1]".into(),
            ));
        }
        if self.scan.icon_extensions.is_empty() || self.scan.class_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan extension lists must not be empty".into(),
            ));
        }
        ClassPattern::new(&self.scan.class_prefix)
            .map_err(|e| ConfigError::Validation(format!("scan.class_prefix: {e}")))?;
        if self.output_file.is_empty() {
            return Err(ConfigError::Validation("output_file must not be empty".into()));
        }
        Ok(())
    }

    /// Resolve the workspace root for a gallery directory.
    pub fn workspace_root(&self, gallery_dir: &Path) -> PathBuf {
        gallery_dir.join(&self.workspace_root)
    }

    pub fn output_path(&self, gallery_dir: &Path) -> PathBuf {
        gallery_dir.join(&self.output_file)
    }

    /// All configured repositories, in configured order.
    pub fn repositories(&self, workspace_root: &Path) -> Vec<Repository> {
        self.repos
            .iter()
            .map(|r| Repository {
                id: r.id.clone(),
                root: workspace_root.join(&r.id),
            })
            .collect()
    }

    /// `(application, directory)` pairs for the custom icon collector.
    pub fn custom_dirs(&self, workspace_root: &Path) -> Vec<(String, PathBuf)> {
        self.custom_svg_dirs
            .iter()
            .flat_map(|(app, dirs)| {
                dirs.iter()
                    .map(move |dir| (app.clone(), workspace_root.join(dir)))
            })
            .collect()
    }
}

// =============================================================================
// Loading and merging
// =============================================================================

/// The stock defaults as a TOML table, the base layer for overlays.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `gallery.toml` from `dir` as a raw value, `None` when absent.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Load the effective config for a gallery directory.
pub fn load_config(gallery_dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let merged = match load_raw_config(gallery_dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}
