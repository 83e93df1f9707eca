//! Frequency statistics over a resolved file list.
//!
//! Everything here is pure string analysis: no I/O, no failure cases.

use crate::constants::KNOWN_PROVIDERS;
use std::collections::BTreeMap;

/// Naming-convention category of a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Name contains `@cn`.
    China,
    /// Name contains `@!cn`.
    NonChina,
    /// Name contains `@ads`.
    Ads,
    /// Name starts with `category-`.
    Category,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; 4] = [
        Category::China,
        Category::NonChina,
        Category::Ads,
        Category::Category,
    ];

    /// Stable lowercase label.
    pub fn name(self) -> &'static str {
        match self {
            Category::China => "china",
            Category::NonChina => "non_china",
            Category::Ads => "ads",
            Category::Category => "category",
        }
    }
}

/// Per-category tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    /// Files containing `@cn`.
    pub china: usize,
    /// Files containing `@!cn`.
    pub non_china: usize,
    /// Files containing `@ads`.
    pub ads: usize,
    /// Files starting with `category-`.
    pub category: usize,
}

impl CategoryCounts {
    /// The tally for `category`.
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::China => self.china,
            Category::NonChina => self.non_china,
            Category::Ads => self.ads,
            Category::Category => self.category,
        }
    }

    fn bump(&mut self, category: Category) {
        match category {
            Category::China => self.china += 1,
            Category::NonChina => self.non_china += 1,
            Category::Ads => self.ads += 1,
            Category::Category => self.category += 1,
        }
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.china + self.non_china + self.ads + self.category
    }
}

/// Statistics derived from a file list. Recomputed every run, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Number of files analysed.
    pub total: usize,
    /// Extension (text after the last `.`) → count.
    pub by_extension: BTreeMap<String, usize>,
    /// Naming-convention categories.
    pub categories: CategoryCounts,
    /// Known provider → number of files whose base name contains it.
    pub providers: BTreeMap<String, usize>,
}

impl AnalysisReport {
    /// `count` as a percentage of `total`; `0.0` when the report is empty.
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }

    /// Extensions, most frequent first; ties broken by name.
    pub fn extensions_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.by_extension)
    }

    /// The `n` most frequent providers with a non-zero count.
    pub fn top_providers(&self, n: usize) -> Vec<(&str, usize)> {
        sorted_by_count(&self.providers)
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .take(n)
            .collect()
    }
}

fn sorted_by_count(map: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // BTreeMap iteration is already name-ordered; a stable sort keeps that for ties.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// The extension of `path`: everything after its last `.`.
///
/// ```
/// use geosite_files::classify::extension_of;
/// assert_eq!(extension_of("google@cn.list"), Some("list"));
/// assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
/// assert_eq!(extension_of("noext"), None);
/// ```
pub fn extension_of(path: &str) -> Option<&str> {
    path.rsplit_once('.').map(|(_, ext)| ext)
}

/// First matching category, checked in the fixed order `@cn`, `@!cn`, `@ads`,
/// `category-` prefix.
pub fn categorize(path: &str) -> Option<Category> {
    if path.contains("@cn") {
        Some(Category::China)
    } else if path.contains("@!cn") {
        Some(Category::NonChina)
    } else if path.contains("@ads") {
        Some(Category::Ads)
    } else if path.starts_with("category-") {
        Some(Category::Category)
    } else {
        None
    }
}

/// Text before the first `.`, then before the first `@`, lowercased.
///
/// ```
/// use geosite_files::classify::base_name;
/// assert_eq!(base_name("Google@cn.list"), "google");
/// assert_eq!(base_name("category-ads-all.yaml"), "category-ads-all");
/// ```
pub fn base_name(path: &str) -> String {
    let before_dot = path.split('.').next().unwrap_or(path);
    let before_at = before_dot.split('@').next().unwrap_or(before_dot);
    before_at.to_lowercase()
}

/// Known providers that occur in `base`. A name can match several providers.
pub fn providers_in(base: &str) -> impl Iterator<Item = &'static str> + '_ {
    KNOWN_PROVIDERS
        .iter()
        .copied()
        .filter(move |provider| base.contains(provider))
}

/// Computes extension, category and provider tallies for `files`.
///
/// # Examples
///
/// ```
/// use geosite_files::classify::analyze;
///
/// let report = analyze(&["category-ads.yaml", "google@cn.list", "misc.mrs", "noext"]);
/// assert_eq!(report.total, 4);
/// assert_eq!(report.by_extension["yaml"], 1);
/// assert_eq!(report.categories.china, 1);
/// assert_eq!(report.categories.category, 1);
/// assert_eq!(report.providers["google"], 1);
/// ```
pub fn analyze<S: AsRef<str>>(files: &[S]) -> AnalysisReport {
    let mut report = AnalysisReport {
        total: files.len(),
        ..Default::default()
    };

    for file in files {
        let path = file.as_ref();

        if let Some(ext) = extension_of(path) {
            *report.by_extension.entry(ext.to_string()).or_insert(0) += 1;
        }

        if let Some(category) = categorize(path) {
            report.categories.bump(category);
        }

        let base = base_name(path);
        for provider in providers_in(&base) {
            *report.providers.entry(provider.to_string()).or_insert(0) += 1;
        }
    }

    log::debug!(
        "Analysed {} files: {} extensions, {} categorised, {} providers",
        report.total,
        report.by_extension.len(),
        report.categories.total(),
        report.providers.len()
    );
    report
}
