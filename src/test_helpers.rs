//! Shared test utilities for the icon-gallery test suite.
//!
//! Fixture builders write small workspaces into a temp directory; lookup
//! helpers panic with the available names when something is missing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "empire/src/a.tsx", "<ArrowLeft />");
//! let repos = repositories(tmp.path(), &["empire"]);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::catalog::{IconEntry, IconSet};
use crate::config::Repository;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
}

/// Repositories named `ids`, each rooted directly under `root`.
pub fn repositories(root: &Path, ids: &[&str]) -> Vec<Repository> {
    ids.iter()
        .map(|id| Repository {
            id: id.to_string(),
            root: root.join(id),
        })
        .collect()
}

// =========================================================================
// Icon sources
// =========================================================================

/// Minimal inline SVG drawing a single path.
pub fn svg(d: &str) -> String {
    svg_with_fill(d, "#333")
}

pub fn svg_with_fill(d: &str, fill: &str) -> String {
    format!(
        r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="{d}" fill="{fill}"/></svg>"#
    )
}

/// A React component source file exporting `name`.
pub fn tsx_icon(name: &str, d: &str) -> String {
    format!(
        r#"import React from "react";

export default function {name}(props) {{
  return (
    <svg width="24" height="24" viewBox="0 0 24 24" fill="none" {{...props}}>
      <path d="{d}" fill="currentColor" />
    </svg>
  );
}}
"#
    )
}

/// A compiled component as shipped in the package's `dist` folder.
pub fn compiled_icon(d: &str) -> String {
    format!(
        r##""use strict";
Object.defineProperty(exports, "__esModule", {{ value: true }});
var jsx_runtime_1 = require("react/jsx-runtime");
var Icon = function (props) {{
    return (0, jsx_runtime_1.jsx)("svg", __assign({{ width: "24", height: "24", viewBox: "0 0 24 24", fill: "none" }}, props, {{ children: (0, jsx_runtime_1.jsx)("path", {{ d: "{d}", fill: "#333" }}) }}));
}};
exports.default = Icon;
"##
    )
}

// =========================================================================
// Lookups and builders
// =========================================================================

/// Find an icon by name. Panics if not found.
pub fn find_icon<'a>(icons: &'a IconSet, name: &str) -> &'a IconEntry {
    icons.get(name).unwrap_or_else(|| {
        let names: Vec<&str> = icons.keys().map(String::as_str).collect();
        panic!("icon '{name}' not found. Available: {names:?}")
    })
}

pub fn set_of(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
