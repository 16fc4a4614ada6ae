//! Stage orchestration.
//!
//! [`build`] runs the collectors, the usage scanner and the redundancy
//! analyzer in order and returns everything the renderer and the CLI output
//! need. Nothing is written; rendering and publishing are left to the caller.

use crate::catalog::Catalog;
use crate::collect::{self, SourceReport};
use crate::config::GalleryConfig;
use crate::redundancy::{self, RedundancyReport};
use crate::usage::{self, AppReport, ClassPattern};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid icon class pattern: {0}")]
    ClassPattern(#[from] regex::Error),
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct Gallery {
    pub core_sources: Vec<SourceReport>,
    pub custom_sources: Vec<SourceReport>,
    pub usage_apps: Vec<AppReport>,
    pub catalog: Catalog,
    pub redundancy: RedundancyReport,
}

/// Collect, scan and analyze every configured repository under
/// `workspace_root`.
pub fn build(config: &GalleryConfig, workspace_root: &Path) -> Result<Gallery, BuildError> {
    let classes = ClassPattern::new(&config.scan.class_prefix)?;
    let repos = config.repositories(workspace_root);

    let core = collect::collect_core_icons(&repos, Path::new(&config.package_icons_dir));
    let custom = collect::collect_custom_icons(&config.custom_dirs(workspace_root));

    let known: BTreeSet<String> = core
        .icons
        .keys()
        .chain(custom.icons.keys())
        .cloned()
        .collect();
    let scan = usage::scan_usage(
        &repos,
        Path::new(&config.source_dir),
        &known,
        &config.scan,
        &classes,
    );

    let catalog = Catalog::new(core.icons, custom.icons, scan.usage);
    let redundancy = redundancy::find_redundant(&catalog, &config.redundancy);

    Ok(Gallery {
        core_sources: core.sources,
        custom_sources: custom.sources,
        usage_apps: scan.apps,
        catalog,
        redundancy,
    })
}
