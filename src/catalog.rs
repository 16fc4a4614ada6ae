//! The icon catalog shared by every pipeline stage.
//!
//! Collectors fill one [`IconSet`] per [`Category`]; the usage scanner adds a
//! [`Usage`] mapping; the renderer flattens everything into name-sorted
//! [`DisplayEntry`] values. Names are unique within a category only, so the
//! same name may legitimately appear once as `core` and once as `custom`.

use crate::usage::Usage;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where an icon comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shared design-system package, installed in each repository.
    Core,
    /// Application-specific SVG component.
    Custom,
    /// CSS class from the icon font, rendered from the CDN stylesheet.
    Prime,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Core, Category::Custom, Category::Prime];

    pub fn label(self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Custom => "custom",
            Category::Prime => "prime",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconEntry {
    pub name: String,
    /// Inline SVG; `None` for icons rendered from an external stylesheet.
    pub markup: Option<String>,
    pub category: Category,
    /// Repositories the icon was collected from (core, custom) or that
    /// reference the class (prime).
    pub used_by: BTreeSet<String>,
}

impl IconEntry {
    pub fn new(name: impl Into<String>, markup: Option<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            markup,
            category,
            used_by: BTreeSet::new(),
        }
    }
}

/// Icons of a single category keyed by name.
pub type IconSet = BTreeMap<String, IconEntry>;

/// Identifies an entry across categories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IconKey {
    pub category: Category,
    pub name: String,
}

impl IconKey {
    pub fn of(entry: &IconEntry) -> Self {
        Self {
            category: entry.category,
            name: entry.name.clone(),
        }
    }
}

/// Everything collected in one run.
#[derive(Debug, Default)]
pub struct Catalog {
    pub core: IconSet,
    pub custom: IconSet,
    pub prime: IconSet,
    pub usage: Usage,
}

/// One card in the rendered gallery, and one object in its embedded data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEntry {
    pub name: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    /// Class list for CDN-rendered icons (`pi pi-check`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Repositories the icon was collected from.
    pub found_in: Vec<String>,
    /// Applications whose sources reference the icon.
    pub apps: Vec<String>,
}

impl Catalog {
    /// Build the catalog, deriving the prime set from the usage classes.
    pub fn new(core: IconSet, custom: IconSet, usage: Usage) -> Self {
        let prime = usage
            .classes
            .iter()
            .map(|(class, apps)| {
                let mut entry = IconEntry::new(class.clone(), None, Category::Prime);
                entry.used_by = apps.clone();
                (class.clone(), entry)
            })
            .collect();
        Self {
            core,
            custom,
            prime,
            usage,
        }
    }

    pub fn set(&self, category: Category) -> &IconSet {
        match category {
            Category::Core => &self.core,
            Category::Custom => &self.custom,
            Category::Prime => &self.prime,
        }
    }

    pub fn get(&self, key: &IconKey) -> Option<&IconEntry> {
        self.set(key.category).get(&key.name)
    }

    pub fn len(&self) -> usize {
        self.core.len() + self.custom.len() + self.prime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries with inline markup (core and custom), in catalog order.
    pub fn svg_entries(&self) -> impl Iterator<Item = &IconEntry> {
        self.core.values().chain(self.custom.values())
    }

    /// Applications that reference an entry.
    ///
    /// Components are matched by name in application sources; prime classes
    /// carry their referencing applications directly.
    pub fn apps_for(&self, entry: &IconEntry) -> BTreeSet<String> {
        match entry.category {
            Category::Prime => entry.used_by.clone(),
            Category::Core | Category::Custom => {
                self.usage.icons.get(&entry.name).cloned().unwrap_or_default()
            }
        }
    }

    /// All entries flattened for display, sorted case-insensitively by name.
    pub fn display_entries(&self, class_prefix: &str) -> Vec<DisplayEntry> {
        let bare_prefix = class_prefix.trim_end_matches('-');
        let mut entries: Vec<DisplayEntry> = Category::ALL
            .iter()
            .flat_map(|&category| self.set(category).values())
            .map(|entry| {
                let apps = self.apps_for(entry).into_iter().collect();
                let (found_in, token) = match entry.category {
                    Category::Prime => (Vec::new(), Some(format!("{bare_prefix} {}", entry.name))),
                    _ => (entry.used_by.iter().cloned().collect(), None),
                };
                DisplayEntry {
                    name: entry.name.clone(),
                    category: entry.category,
                    markup: entry.markup.clone(),
                    token,
                    found_in,
                    apps,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.category.cmp(&b.category))
        });
        entries
    }

    /// Number of displayed entries each application references.
    pub fn app_counts(&self, apps: &[String]) -> Vec<(String, usize)> {
        apps.iter()
            .map(|app| {
                let count = Category::ALL
                    .iter()
                    .flat_map(|&c| self.set(c).values())
                    .filter(|e| self.apps_for(e).contains(app))
                    .count();
                (app.clone(), count)
            })
            .collect()
    }
}
