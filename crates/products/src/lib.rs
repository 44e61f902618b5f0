//! Product catalog domain module.
//!
//! This crate contains the product record and the derived inventory view
//! model, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod detail;
pub mod product;
pub mod stock;
pub mod view;

pub use detail::ProductMetrics;
pub use product::{Category, NewProduct, Product, ProductPatch};
pub use stock::{DEFAULT_LOW_STOCK_THRESHOLD, StockStatus, adjusted_quantity, classify_stock};
pub use view::{
    CategoryFilter, CategoryTotal, DEFAULT_ALERT_LIMIT, FilterState, InventoryStats, InventoryView,
    StockFilter, aggregate_by_category, compute_stats, filter_products, rank_alerts,
};
