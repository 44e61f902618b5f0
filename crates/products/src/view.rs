//! Derived inventory views.
//!
//! Every function here is a pure fold over a snapshot of product records.
//! Nothing is cached: callers recompute on each change to either the
//! collection or the [`FilterState`].

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use stockflow_core::DomainError;

use crate::product::{Category, Product};
use crate::stock::{StockStatus, classify_stock};

/// Number of alerts surfaced when the caller does not ask otherwise.
pub const DEFAULT_ALERT_LIMIT: usize = 5;

/// Category selection of the filter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryFilter::All => serializer.serialize_str("all"),
            CategoryFilter::Only(c) => serializer.serialize_str(c.as_str()),
        }
    }
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Stock bucket selection of the filter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockFilter {
    #[default]
    All,
    In,
    Low,
    Out,
}

impl StockFilter {
    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::In => status == StockStatus::In,
            StockFilter::Low => status == StockStatus::Low,
            StockFilter::Out => status == StockStatus::Out,
        }
    }
}

impl FromStr for StockFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StockFilter::All),
            "in" => Ok(StockFilter::In),
            "low" => Ok(StockFilter::Low),
            "out" => Ok(StockFilter::Out),
            other => Err(DomainError::validation(format!(
                "unknown stock filter: {other} (expected all, in, low or out)"
            ))),
        }
    }
}

/// User-controlled filter state. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
    pub stock: StockFilter,
}

impl FilterState {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_stock(mut self, stock: StockFilter) -> Self {
        self.stock = stock;
        self
    }

    /// Whether a single product passes all three criteria.
    pub fn matches(&self, product: &Product) -> bool {
        matches_search(product, &self.search_term)
            && self.category.matches(product.category)
            && self.stock.matches(classify_stock(product))
    }
}

fn matches_search(product: &Product, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let hit = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(&needle))
    };
    hit(&product.name) || hit(&product.sku)
}

/// Products passing `filter`, in input order.
pub fn filter_products<'a>(products: &'a [Product], filter: &FilterState) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Summary statistics over the whole (unfiltered) collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_products: usize,
    pub total_value: Decimal,
    /// Status `low` only; out-of-stock items are counted separately.
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
}

pub fn compute_stats(products: &[Product]) -> InventoryStats {
    products
        .iter()
        .fold(InventoryStats::default(), |mut stats, p| {
            stats.total_products += 1;
            stats.total_value = stats.total_value.saturating_add(p.line_value());
            match classify_stock(p) {
                StockStatus::Low => stats.low_stock_count += 1,
                StockStatus::Out => stats.out_of_stock_count += 1,
                StockStatus::In => {}
            }
            stats
        })
}

/// Value and item count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub value: Decimal,
    pub count: usize,
}

/// Per-category totals in first-seen order.
pub fn aggregate_by_category(products: &[Product]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for p in products {
        let value = p.line_value();
        match totals.iter_mut().find(|t| t.category == p.category) {
            Some(existing) => {
                existing.value = existing.value.saturating_add(value);
                existing.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: p.category,
                value,
                count: 1,
            }),
        }
    }
    totals
}

/// Products at or below their threshold, lowest quantity first.
///
/// Unlike [`compute_stats`], out-of-stock products are part of this bucket.
/// Ties keep input order.
pub fn rank_alerts(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut alerts: Vec<&Product> = products
        .iter()
        .filter(|p| classify_stock(p).needs_attention())
        .collect();
    alerts.sort_by_key(|p| p.quantity);
    alerts.truncate(limit);
    alerts
}

/// All four derived views for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryView<'a> {
    pub filter: FilterState,
    pub products: Vec<&'a Product>,
    pub stats: InventoryStats,
    pub categories: Vec<CategoryTotal>,
    pub alerts: Vec<&'a Product>,
}

impl<'a> InventoryView<'a> {
    pub fn compute(products: &'a [Product], filter: FilterState, alert_limit: usize) -> Self {
        Self {
            products: filter_products(products, &filter),
            stats: compute_stats(products),
            categories: aggregate_by_category(products),
            alerts: rank_alerts(products, alert_limit),
            filter,
        }
    }
}
