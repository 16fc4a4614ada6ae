//! # Icon Gallery
//!
//! Builds a single-page inventory of every icon the frontend applications
//! ship or reference. The source repositories are the data source: installed
//! copies of the shared icon package, application-specific SVG components,
//! and icon-font class names found in application code.
//!
//! # Architecture: Sequential Pipeline
//!
//! ```text
//! 1. Collect   <repo>/node_modules/.../icons  →  core icons
//! 2. Collect   custom svg directories         →  custom icons
//! 3. Scan      <repo>/src                     →  usage (icons, classes)
//! 4. Analyze   catalog                        →  redundancy report
//! 5. Render    catalog + report               →  index.html
//! ```
//!
//! Every stage is best-effort about its inputs: a repository without the
//! package installed, a missing source directory or an unparsable component
//! file is reported and skipped. The only fatal errors are an invalid
//! configuration overlay and failing to write the page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Stages 1-2: shared package and custom component collectors |
//! | [`usage`] | Stage 3: textual usage scan of application sources |
//! | [`redundancy`] | Stage 4: exact and near duplicate detection |
//! | [`generate`] | Stage 5: renders the gallery page using Maud |
//! | [`pipeline`] | Runs stages 1-4 for a configuration |
//! | [`catalog`] | Icon entries, categories and display flattening |
//! | [`config`] | Stock configuration and `gallery.toml` overlay loading |
//! | [`extract`] | SVG markup recovery from compiled and source components |
//! | [`naming`] | Canonical PascalCase icon names |
//! | [`similarity`] | Sequence similarity ratio used for near duplicates |
//! | [`publish`] | Optional git publish and open-in-viewer steps |
//! | [`output`] | CLI output formatting for every stage |
//!
//! # Design Decisions
//!
//! ## Two Usage Dimensions
//!
//! An icon's card shows where it was *found* (which repositories have the
//! package copy, or which application owns a custom component) separately
//! from which applications *reference* it. Conflating the two would mark
//! every core icon as used by every repository that installs the package.
//!
//! ## Client-Side Grids
//!
//! The gallery cards are built in the browser from an embedded JSON block,
//! so search and the application and category filters operate on data
//! rather than on scraped DOM attributes. The page stays a single file that
//! works from disk or any static host.
//!
//! ## Deterministic Output
//!
//! Directory walks are sorted and every map is a `BTreeMap`. Given the same
//! repositories and the same generation date, the page is byte-identical, so
//! `--push` only commits when something actually changed.

pub mod catalog;
pub mod collect;
pub mod config;
pub mod extract;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod publish;
pub mod redundancy;
pub mod similarity;
pub mod usage;

#[cfg(test)]
pub(crate) mod test_helpers;
