//! Stock-level classification.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Threshold applied when a product has none (or stores 0).
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock status of a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// quantity > threshold
    In,
    /// 0 < quantity <= threshold
    Low,
    /// quantity == 0
    Out,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::In => "In Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Out => "Out of Stock",
        }
    }

    /// Low or out of stock; the alert bucket.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, StockStatus::In)
    }
}

/// Classify a product's stock level.
pub fn classify_stock(product: &Product) -> StockStatus {
    classify_quantity(product.quantity, product.effective_threshold())
}

pub(crate) fn classify_quantity(quantity: u32, threshold: u32) -> StockStatus {
    if quantity == 0 {
        StockStatus::Out
    } else if quantity <= threshold {
        StockStatus::Low
    } else {
        StockStatus::In
    }
}

/// Quantity after a quick +/- adjustment, clamped at zero.
pub fn adjusted_quantity(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta).max(0);
    u32::try_from(next).unwrap_or(u32::MAX)
}
