//! Canonical icon names.
//!
//! Every icon ends up keyed by a PascalCase component name, whatever shape the
//! source file had:
//! - `arrow-left.tsx` → `ArrowLeft`
//! - `ArrowLeft/ArrowLeft.js` → `ArrowLeft`
//! - `icon_check2.js` → `IconCheck2`
//!
//! Custom components prefer the identifier they export over the file name,
//! since app code imports them by that identifier.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static EXPORT_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+(?:default\s+)?function\s+(\w+)").unwrap());
static EXPORT_CONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+const\s+(\w+)").unwrap());
static EXPORT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s*\{\s*(\w+)").unwrap());

/// Normalize a file or directory base name to PascalCase.
///
/// Separators (`-`, `_`, `.`, space) split words; the first character of
/// each word is upper-cased and the rest is kept as written, so names that
/// are already PascalCase pass through unchanged.
pub fn canonical_name(base: &str) -> String {
    base.split(['-', '_', '.', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// File name without its final extension, as a lossy string.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Name a source component exports: `export [default] function X`, then
/// `export const X`, then the first entry of an `export { X }` list.
pub fn exported_name(content: &str) -> Option<String> {
    [&EXPORT_FUNCTION, &EXPORT_CONST, &EXPORT_LIST]
        .iter()
        .find_map(|re| re.captures(content))
        .map(|caps| caps[1].to_string())
}

/// Name for a custom component: its exported identifier, else the file stem.
pub fn component_name(content: &str, path: &Path) -> String {
    exported_name(content).unwrap_or_else(|| file_stem(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_becomes_pascal() {
        assert_eq!(canonical_name("arrow-left"), "ArrowLeft");
    }

    #[test]
    fn pascal_case_unchanged() {
        assert_eq!(canonical_name("ArrowLeft"), "ArrowLeft");
    }

    #[test]
    fn snake_case_and_digits() {
        assert_eq!(canonical_name("icon_check2"), "IconCheck2");
    }

    #[test]
    fn repeated_separators_ignored() {
        assert_eq!(canonical_name("--chevron--down-"), "ChevronDown");
    }

    #[test]
    fn inner_capitals_preserved() {
        assert_eq!(canonical_name("pdf-fileIcon"), "PdfFileIcon");
    }

    #[test]
    fn empty_name() {
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn exported_function_wins() {
        let src = "export const helper = 1;\nexport default function BankIcon() {}";
        assert_eq!(exported_name(src).as_deref(), Some("BankIcon"));
    }

    #[test]
    fn exported_const() {
        let src = "export const WalletIcon = (props) => <svg/>;";
        assert_eq!(exported_name(src).as_deref(), Some("WalletIcon"));
    }

    #[test]
    fn export_list_from_compiled_module() {
        let src = "const a = 1;\nexport { ArrowLeft as default };";
        assert_eq!(exported_name(src).as_deref(), Some("ArrowLeft"));
    }

    #[test]
    fn component_name_falls_back_to_stem() {
        let name = component_name("const X = 1;", Path::new("svgs/PiggyBank.tsx"));
        assert_eq!(name, "PiggyBank");
    }
}
