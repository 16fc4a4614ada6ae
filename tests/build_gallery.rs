//! End-to-end pipeline tests against a throwaway workspace.
//!
//! Each test lays out a gallery directory next to a couple of repositories,
//! loads the configuration the way the CLI does and runs the full pipeline.

use icon_gallery::catalog::Category;
use icon_gallery::config::{self, GalleryConfig};
use icon_gallery::generate;
use icon_gallery::pipeline::{self, Gallery};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PACKAGE: &str = "node_modules/@anatomy-financial/anatomy-ui-core/dist/icons";

const OVERLAY: &str = r##"
[[repos]]
id = "empire"
color = "#D94A4A"

[[repos]]
id = "hil-ui"
color = "#4A90D9"

[custom_svg_dirs]
hil-ui = ["hil-ui/src/svgs"]
"##;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            tmp: TempDir::new().unwrap(),
        };
        ws.write("gallery/gallery.toml", OVERLAY);
        ws
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn gallery_dir(&self) -> PathBuf {
        self.root().join("gallery")
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(&self) -> GalleryConfig {
        config::load_config(&self.gallery_dir()).unwrap()
    }

    fn build(&self) -> Gallery {
        let config = self.config();
        pipeline::build(&config, &config.workspace_root(&self.gallery_dir())).unwrap()
    }

    fn render(&self, date: &str) -> String {
        let config = self.config();
        let gallery = self.build();
        generate::render_gallery(&gallery.catalog, &gallery.redundancy, &config, date)
            .unwrap()
            .into_string()
    }
}

fn source_icon(name: &str, d: &str) -> String {
    format!(
        "export default function {name}(props) {{\n  return <svg width=\"24\" height=\"24\" {{...props}}><path d=\"{d}\" /></svg>;\n}}\n"
    )
}

fn compiled_icon(d: &str) -> String {
    format!(
        r#"import {{ jsx }} from "react/jsx-runtime";
const Icon = (props) => jsx("svg", {{ viewBox: "0 0 24 24", ...props, children: jsx("path", {{ d: "{d}" }}) }});
export {{ Icon as default }};
"#
    )
}

fn set_of(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn same_package_icons_in_two_repos_merge() {
    let ws = Workspace::new();
    for repo in ["empire", "hil-ui"] {
        ws.write(
            &format!("{repo}/{PACKAGE}/arrow-left.tsx"),
            &source_icon("ArrowLeftIcon", "M15 18L9 12L15 6"),
        );
        ws.write(
            &format!("{repo}/{PACKAGE}/arrow-right.tsx"),
            &source_icon("ArrowRightIcon", "M9 18L15 12L9 6"),
        );
    }

    let gallery = ws.build();
    let core = &gallery.catalog.core;
    assert_eq!(core.len(), 2);
    assert_eq!(core["ArrowLeft"].used_by, set_of(&["empire", "hil-ui"]));
    assert_eq!(core["ArrowRight"].used_by, set_of(&["empire", "hil-ui"]));
}

#[test]
fn class_list_in_stylesheet_yields_each_class() {
    let ws = Workspace::new();
    ws.write(
        "empire/src/styles/buttons.scss",
        "// <i class=\"pi pi-check pi-times\"></i>\n.confirm { color: green; }\n",
    );

    let gallery = ws.build();
    let prime = &gallery.catalog.prime;
    assert!(prime["pi-check"].used_by.contains("empire"));
    assert!(prime["pi-times"].used_by.contains("empire"));
    assert_eq!(prime["pi-check"].category, Category::Prime);
}

#[test]
fn missing_or_empty_custom_dir_is_not_an_error() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.root().join("hil-ui/src/svgs")).unwrap();

    let gallery = ws.build();
    assert!(gallery.catalog.custom.is_empty());
    // The stock anatomy-financials-ui directory is absent in this workspace.
    assert_eq!(gallery.custom_sources.len(), 2);
}

#[test]
fn unreferenced_icon_has_no_apps() {
    let ws = Workspace::new();
    ws.write(&format!("empire/{PACKAGE}/Bank/Bank.js"), &compiled_icon("M3 21H21V10H3Z"));
    ws.write("empire/src/index.ts", "export const nothing = 0;");

    let gallery = ws.build();
    let bank = &gallery.catalog.core["Bank"];
    assert!(gallery.catalog.apps_for(bank).is_empty());
    assert_eq!(bank.used_by, set_of(&["empire"]));
}

#[test]
fn usage_links_apps_to_core_and_custom_icons() {
    let ws = Workspace::new();
    ws.write(&format!("empire/{PACKAGE}/Bank/Bank.js"), &compiled_icon("M3 21H21V10H3Z"));
    ws.write("hil-ui/src/svgs/Piggy.tsx", &source_icon("PiggyBank", "M4 4H20V20H4Z"));
    ws.write("hil-ui/src/pages/Home.tsx", "import { Bank } from 'ui-core';\n<PiggyBank />");

    let gallery = ws.build();
    let catalog = &gallery.catalog;
    assert_eq!(catalog.apps_for(&catalog.core["Bank"]), set_of(&["hil-ui"]));
    assert_eq!(catalog.apps_for(&catalog.custom["PiggyBank"]), set_of(&["hil-ui"]));
    assert_eq!(catalog.custom["PiggyBank"].used_by, set_of(&["hil-ui"]));
}

#[test]
fn identical_paths_under_different_names_form_one_group() {
    let ws = Workspace::new();
    ws.write(&format!("empire/{PACKAGE}/Back/Back.js"), &compiled_icon("M15 18L9 12L15 6"));
    ws.write(&format!("empire/{PACKAGE}/ChevronLeft/ChevronLeft.js"), &compiled_icon("M15 18L9 12L15 6"));
    ws.write(&format!("empire/{PACKAGE}/Plus/Plus.js"), &compiled_icon("M12 5V19M5 12H19"));

    let gallery = ws.build();
    let groups = &gallery.redundancy.exact_groups;
    assert_eq!(groups.len(), 1);
    let names: Vec<&str> = groups[0].iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, vec!["Back", "ChevronLeft"]);
}

#[test]
fn output_is_byte_identical_for_same_snapshot_and_date() {
    let ws = Workspace::new();
    ws.write(&format!("empire/{PACKAGE}/Bank/Bank.js"), &compiled_icon("M3 21H21V10H3Z"));
    ws.write(&format!("hil-ui/{PACKAGE}/arrow-left.tsx"), &source_icon("ArrowLeft", "M15 18L9 12"));
    ws.write("hil-ui/src/svgs/Piggy.tsx", &source_icon("PiggyBank", "M4 4H20V20H4Z"));
    ws.write("empire/src/a.tsx", "<Bank /> <i className=\"pi pi-bars\" />");

    let first = ws.render("2026-01-15");
    let second = ws.render("2026-01-15");
    assert_eq!(first, second);
    assert!(first.contains("Updated 2026-01-15"));
}

#[test]
fn written_page_matches_rendered_document() {
    let ws = Workspace::new();
    ws.write(&format!("empire/{PACKAGE}/Bank/Bank.js"), &compiled_icon("M3 21H21V10H3Z"));

    let config = ws.config();
    let gallery = ws.build();
    let document =
        generate::render_gallery(&gallery.catalog, &gallery.redundancy, &config, "2026-01-15").unwrap();
    let expected = document.clone().into_string();

    let path = config.output_path(&ws.gallery_dir());
    generate::write_gallery(&path, document).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), expected);
}

#[test]
fn invalid_overlay_is_rejected() {
    let ws = Workspace::new();
    ws.write("gallery/gallery.toml", "[redundancy]\nnear_duplicate_threshold = 1.5\n");
    assert!(config::load_config(&ws.gallery_dir()).is_err());

    ws.write("gallery/gallery.toml", "unknown_key = true\n");
    assert!(config::load_config(&ws.gallery_dir()).is_err());
}
