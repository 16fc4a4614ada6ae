//! Detection of visually redundant icons.
//!
//! Icons are compared by the geometry they draw, not by name or colour. The
//! fingerprint of an icon is its path data: every `d="…"` value, whitespace
//! normalized and sorted so element order does not matter. Clip-path ids
//! (`clip0_14621_994`) and trivially short paths are dropped.
//!
//! - **Exact duplicates** share an identical fingerprint.
//! - **Near duplicates** are pairs whose fingerprints have a
//!   [`similarity::ratio`] at or above the configured threshold.

use crate::catalog::{Catalog, IconEntry, IconKey};
use crate::config::RedundancyConfig;
use crate::similarity;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static D_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bd="([^"]+)""#).unwrap());
static CLIP_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^clip\d").unwrap());

const MIN_PATH_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct NearPair {
    pub a: IconKey,
    pub b: IconKey,
    /// Rounded to three decimals.
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedundancyReport {
    /// Groups of two or more icons with identical path data, names sorted.
    pub exact_groups: Vec<Vec<IconKey>>,
    /// Most similar first.
    pub near_pairs: Vec<NearPair>,
}

impl RedundancyReport {
    pub fn exact_icon_count(&self) -> usize {
        self.exact_groups.iter().map(Vec::len).sum()
    }

    pub fn group_count(&self) -> usize {
        self.exact_groups.len() + self.near_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_count() == 0
    }
}

/// Normalized path data of an SVG, sorted. Empty when nothing is drawable.
pub fn normalize_paths(svg: &str) -> Vec<String> {
    let mut paths: Vec<String> = D_ATTR
        .captures_iter(svg)
        .map(|caps| caps[1].to_string())
        .filter(|d| !CLIP_ID.is_match(d))
        .filter(|d| d.len() > MIN_PATH_LEN)
        .map(|d| d.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    paths.sort();
    paths
}

pub fn fingerprint(paths: &[String]) -> String {
    paths.join("|")
}

/// Find exact and near duplicates among every icon carrying markup.
pub fn find_redundant(catalog: &Catalog, config: &RedundancyConfig) -> RedundancyReport {
    let fingerprints: BTreeMap<IconKey, String> = catalog
        .svg_entries()
        .filter_map(|entry: &IconEntry| {
            let paths = normalize_paths(entry.markup.as_deref()?);
            if paths.is_empty() {
                return None;
            }
            Some((IconKey::of(entry), fingerprint(&paths)))
        })
        .collect();

    // Exact: bucket by fingerprint; groups are reordered by member name below.
    let mut buckets: BTreeMap<&str, Vec<IconKey>> = BTreeMap::new();
    for (key, fp) in &fingerprints {
        buckets.entry(fp.as_str()).or_default().push(key.clone());
    }
    let mut exact_groups: Vec<Vec<IconKey>> = buckets
        .into_values()
        .filter(|keys| keys.len() > 1)
        .map(|mut keys| {
            keys.sort_by(|x, y| x.name.cmp(&y.name).then(x.category.cmp(&y.category)));
            keys
        })
        .collect();
    exact_groups.sort_by(|x, y| x[0].name.cmp(&y[0].name));

    let group_of: HashMap<&IconKey, usize> = exact_groups
        .iter()
        .enumerate()
        .flat_map(|(idx, keys)| keys.iter().map(move |k| (k, idx)))
        .collect();

    // Near: compare every remaining pair in name order.
    let mut ordered: Vec<(&IconKey, &String)> = fingerprints.iter().collect();
    ordered.sort_by(|(x, _), (y, _)| x.name.cmp(&y.name).then(x.category.cmp(&y.category)));

    let mut near_pairs = Vec::new();
    for (idx, (key_a, fp_a)) in ordered.iter().enumerate() {
        for (key_b, fp_b) in &ordered[idx + 1..] {
            let same_group = matches!(
                (group_of.get(key_a), group_of.get(key_b)),
                (Some(x), Some(y)) if x == y
            );
            if same_group {
                continue;
            }

            let (len_a, len_b) = (fp_a.len(), fp_b.len());
            let length_ratio = len_a.min(len_b) as f64 / len_a.max(len_b) as f64;
            if length_ratio < config.min_length_ratio {
                continue;
            }

            let score = similarity::ratio(fp_a, fp_b);
            if score >= config.near_duplicate_threshold {
                near_pairs.push(NearPair {
                    a: (*key_a).clone(),
                    b: (*key_b).clone(),
                    similarity: (score * 1000.0).round() / 1000.0,
                });
            }
        }
    }
    near_pairs.sort_by(|x, y| y.similarity.total_cmp(&x.similarity));

    RedundancyReport {
        exact_groups,
        near_pairs,
    }
}
