//! Classification outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every category a station can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ItemExchange,
    HighValue,
    HighCount,
    Courier,
    #[serde(rename = "logistics_result")]
    LogisticsReferral,
    #[serde(rename = "generic_result")]
    Generic,
    IslandHighCount,
    #[serde(rename = "island_generic_result")]
    IslandGeneric,
    #[serde(rename = "problem_result")]
    Problem,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; 9] = [
        Category::ItemExchange,
        Category::HighValue,
        Category::HighCount,
        Category::Courier,
        Category::LogisticsReferral,
        Category::Generic,
        Category::IslandHighCount,
        Category::IslandGeneric,
        Category::Problem,
    ];

    /// Stable key used in storage and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ItemExchange => "item_exchange",
            Self::HighValue => "high_value",
            Self::HighCount => "high_count",
            Self::Courier => "courier",
            Self::LogisticsReferral => "logistics_result",
            Self::Generic => "generic_result",
            Self::IslandHighCount => "island_high_count",
            Self::IslandGeneric => "island_generic_result",
            Self::Problem => "problem_result",
        }
    }

    /// Parse a storage key back into a category.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Station facts shared by the bundle-sized categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSummary {
    pub from_region: String,
    pub from_station: String,
    pub item_count: usize,
    pub collateral: f64,
    pub volume: f64,
}

/// The actionable outcome for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClassificationResult {
    /// Assembled ships that must be repackaged through a manual exchange.
    ItemExchange {
        reason: String,
        recipient: String,
        from_region: String,
        from_station: String,
    },
    /// Too valuable for courier collateral limits.
    HighValue {
        collateral: f64,
        from_region: String,
        from_station: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        jumps_to_jita: Option<i64>,
    },
    /// Too many items for manual contract creation.
    HighCount {
        #[serde(flatten)]
        summary: BundleSummary,
        #[serde(skip_serializing_if = "Option::is_none")]
        jumps_to_jita: Option<i64>,
    },
    /// A courier contract with concrete guidance.
    Courier {
        provider: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_reason: Option<String>,
        /// Advisory reward; `-1` means unset.
        reward: f64,
        collateral: f64,
        from_region: String,
        from_station: String,
        to_station: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        jumps_to_jita: Option<i64>,
    },
    /// Large haulable bundle handed to volunteer logistics.
    #[serde(rename = "logistics_result")]
    LogisticsReferral {
        #[serde(flatten)]
        summary: BundleSummary,
    },
    /// Financial facts only, no hauling guidance.
    #[serde(rename = "generic_result")]
    Generic {
        #[serde(flatten)]
        summary: BundleSummary,
    },
    IslandHighCount {
        #[serde(flatten)]
        summary: BundleSummary,
    },
    #[serde(rename = "island_generic_result")]
    IslandGeneric {
        #[serde(flatten)]
        summary: BundleSummary,
    },
    #[serde(rename = "problem_result")]
    Problem { message: String },
}

impl ClassificationResult {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::ItemExchange { .. } => Category::ItemExchange,
            Self::HighValue { .. } => Category::HighValue,
            Self::HighCount { .. } => Category::HighCount,
            Self::Courier { .. } => Category::Courier,
            Self::LogisticsReferral { .. } => Category::LogisticsReferral,
            Self::Generic { .. } => Category::Generic,
            Self::IslandHighCount { .. } => Category::IslandHighCount,
            Self::IslandGeneric { .. } => Category::IslandGeneric,
            Self::Problem { .. } => Category::Problem,
        }
    }

    /// Collateral used for ranking, when the category carries one.
    #[must_use]
    pub fn collateral(&self) -> Option<f64> {
        match self {
            Self::HighValue { collateral, .. } | Self::Courier { collateral, .. } => {
                Some(*collateral)
            }
            Self::HighCount { summary, .. }
            | Self::LogisticsReferral { summary }
            | Self::Generic { summary }
            | Self::IslandHighCount { summary }
            | Self::IslandGeneric { summary } => Some(summary.collateral),
            Self::ItemExchange { .. } | Self::Problem { .. } => None,
        }
    }

    /// Item count used for ranking, when the category carries one.
    #[must_use]
    pub fn item_count(&self) -> Option<usize> {
        match self {
            Self::HighCount { summary, .. }
            | Self::LogisticsReferral { summary }
            | Self::Generic { summary }
            | Self::IslandHighCount { summary }
            | Self::IslandGeneric { summary } => Some(summary.item_count),
            _ => None,
        }
    }
}

/// Per-category result counts for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts(BTreeMap<Category, usize>);

impl CategoryCounts {
    /// Count results, listing every category even when empty.
    pub fn tally<'a>(results: impl IntoIterator<Item = &'a ClassificationResult>) -> Self {
        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();
        for result in results {
            *counts.entry(result.category()).or_default() += 1;
        }
        Self(counts)
    }

    #[must_use]
    pub fn get(&self, category: Category) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}

impl fmt::Display for CategoryCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.iter().map(|(c, n)| format!("{c}: {n}")).collect();
        f.write_str(&lines.join("\n"))
    }
}
