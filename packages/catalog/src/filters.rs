//! Filter and sort state for the product list, and its URL query-string form.
//!
//! The query string is the canonical representation of [`ListFilters`]: it is
//! parsed once when the list mounts and re-serialized on every change. Values
//! at their default (empty category, empty bounds, `sort=newest`) are omitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order of the product list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::NameAsc => "name_asc",
        }
    }

    /// Label shown in the sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A to Z",
        }
    }

    /// Parse a sort key, falling back to [`SortKey::Newest`] for unknown values.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "name_asc" => Ok(SortKey::NameAsc),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Category, price, and sort state of the product list.
///
/// Price bounds are kept as the raw text the user typed; [`ListFilters::min_bound`]
/// and [`ListFilters::max_bound`] interpret them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListFilters {
    pub category_id: String,
    pub min_price: String,
    pub max_price: String,
    pub sort: SortKey,
}

/// Query-string shape of [`ListFilters`].
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
}

/// Query parameter names owned by [`ListFilters`].
pub const FILTER_PARAMS: [&str; 4] = ["categoryId", "minPrice", "maxPrice", "sort"];

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parse a price bound. Empty or non-numeric text is no bound.
fn parse_bound(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl ListFilters {
    /// Seed filters from a URL query string (with or without a leading `?`).
    ///
    /// Unknown parameters are ignored; a malformed query yields the defaults.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: FilterParams = serde_urlencoded::from_str(query).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed filter query {query:?}: {e}");
            FilterParams::default()
        });
        Self {
            category_id: params.category_id.unwrap_or_default(),
            min_price: params.min_price.unwrap_or_default(),
            max_price: params.max_price.unwrap_or_default(),
            sort: params
                .sort
                .as_deref()
                .map(SortKey::parse_lossy)
                .unwrap_or_default(),
        }
    }

    /// Serialize to a query string, omitting values at their default.
    pub fn to_query(&self) -> String {
        let params = FilterParams {
            category_id: non_empty(&self.category_id),
            min_price: non_empty(&self.min_price),
            max_price: non_empty(&self.max_price),
            sort: (self.sort != SortKey::Newest).then(|| self.sort.as_str().to_string()),
        };
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }

    /// Rewrite `existing` so its filter parameters match `self`, keeping any
    /// other parameters in their original order.
    pub fn merge_into_query(&self, existing: &str) -> String {
        let existing = existing.strip_prefix('?').unwrap_or(existing);
        let others: Vec<(String, String)> = serde_urlencoded::from_str(existing)
            .unwrap_or_default();
        let kept: Vec<(String, String)> = others
            .into_iter()
            .filter(|(k, _)| !FILTER_PARAMS.contains(&k.as_str()))
            .collect();
        let mut query = serde_urlencoded::to_string(&kept).unwrap_or_default();
        let ours = self.to_query();
        if !ours.is_empty() {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&ours);
        }
        query
    }

    pub fn min_bound(&self) -> Option<f64> {
        parse_bound(&self.min_price)
    }

    pub fn max_bound(&self) -> Option<f64> {
        parse_bound(&self.max_price)
    }

    /// Whether `price` lies within the inclusive bounds.
    pub fn price_in_bounds(&self, price: f64) -> bool {
        if let Some(min) = self.min_bound() {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max_bound() {
            if price > max {
                return false;
            }
        }
        true
    }

    /// Whether any filter differs from its default.
    pub fn is_active(&self) -> bool {
        *self != ListFilters::default()
    }
}
