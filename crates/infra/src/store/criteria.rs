//! Equality lookup criteria.

use stockflow_core::ProductId;
use stockflow_products::{Category, Product};

/// Field-equality filter; unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCriteria {
    pub id: Option<ProductId>,
    pub sku: Option<String>,
    pub category: Option<Category>,
}

impl ProductCriteria {
    pub fn by_id(id: ProductId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_sku(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.id.is_none_or(|id| id == product.id)
            && self
                .sku
                .as_deref()
                .is_none_or(|sku| product.sku.as_deref() == Some(sku))
            && self.category.is_none_or(|c| c == product.category)
    }
}
