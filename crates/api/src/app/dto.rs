use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockflow_core::ProductId;
use stockflow_infra::ListOrder;
use stockflow_products::{
    Category, CategoryFilter, CategoryTotal, FilterState, InventoryStats, InventoryView, Product,
    ProductMetrics, StockFilter,
};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

impl BulkDeleteRequest {
    pub fn parse_ids(&self) -> Result<Vec<ProductId>, axum::response::Response> {
        self.ids
            .iter()
            .map(|raw| raw.parse::<ProductId>().map_err(|_| errors::invalid_id()))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub order: Option<String>,
}

impl ListQuery {
    pub fn parse_order(&self) -> Result<Option<ListOrder>, axum::response::Response> {
        match self.order.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<ListOrder>().map(Some).map_err(|_| {
                errors::json_error(
                    axum::http::StatusCode::BAD_REQUEST,
                    "invalid_order",
                    format!("unsupported sort order: {raw}"),
                )
            }),
        }
    }
}

/// Query string of the inventory overview.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
}

impl InventoryQuery {
    pub fn to_filter(&self) -> Result<FilterState, axum::response::Response> {
        let mut filter = FilterState::default();
        if let Some(term) = &self.search {
            filter = filter.with_search(term.clone());
        }
        if let Some(raw) = self.category.as_deref().filter(|s| !s.trim().is_empty()) {
            let category: CategoryFilter = raw.parse().map_err(|_| invalid_filter("category", raw))?;
            filter = filter.with_category(category);
        }
        if let Some(raw) = self.stock.as_deref().filter(|s| !s.trim().is_empty()) {
            let stock: StockFilter = raw.parse().map_err(|_| invalid_filter("stock", raw))?;
            filter = filter.with_stock(stock);
        }
        Ok(filter)
    }
}

fn invalid_filter(field: &str, value: &str) -> axum::response::Response {
    errors::json_error(
        axum::http::StatusCode::BAD_REQUEST,
        "invalid_filter",
        format!("unsupported {field} filter: {value}"),
    )
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    pub limit: Option<usize>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductDetail<'a> {
    pub product: &'a Product,
    pub category_label: &'static str,
    pub status_label: &'static str,
    pub metrics: ProductMetrics,
}

impl<'a> From<&'a Product> for ProductDetail<'a> {
    fn from(product: &'a Product) -> Self {
        let metrics = ProductMetrics::of(product);
        Self {
            product,
            category_label: product.category.label(),
            status_label: metrics.status.label(),
            metrics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTotalDto {
    pub category: Category,
    pub label: &'static str,
    pub value: Decimal,
    pub count: usize,
}

impl From<CategoryTotal> for CategoryTotalDto {
    fn from(t: CategoryTotal) -> Self {
        Self {
            category: t.category,
            label: t.category.label(),
            value: t.value,
            count: t.count,
        }
    }
}

pub fn category_totals(totals: Vec<CategoryTotal>) -> Vec<CategoryTotalDto> {
    totals.into_iter().map(CategoryTotalDto::from).collect()
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse<'a> {
    pub filter: FilterState,
    pub products: Vec<&'a Product>,
    pub stats: InventoryStats,
    pub categories: Vec<CategoryTotalDto>,
    pub alerts: Vec<&'a Product>,
}

impl<'a> From<InventoryView<'a>> for InventoryResponse<'a> {
    fn from(view: InventoryView<'a>) -> Self {
        Self {
            filter: view.filter,
            products: view.products,
            stats: view.stats,
            categories: category_totals(view.categories),
            alerts: view.alerts,
        }
    }
}
