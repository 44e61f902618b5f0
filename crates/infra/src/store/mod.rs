//! Persistence/query collaborator contract.
//!
//! The rest of the system only sees [`ProductStore`]; the in-memory
//! implementation backs dev runs and tests.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockflow_core::{DomainError, ProductId};
use stockflow_products::{NewProduct, Product, ProductPatch};

pub mod criteria;
pub mod in_memory;
pub mod order;

pub use criteria::ProductCriteria;
pub use in_memory::InMemoryProductStore;
pub use order::{ListOrder, SortDirection, SortField};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// Opaque backend failure (connection lost, poisoned lock, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Product persistence and query operations.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Whole collection in the requested order.
    async fn list(&self, order: &ListOrder) -> StoreResult<Vec<Product>>;

    /// Insert a record; the store assigns `id` and `updated_date`.
    async fn create(&self, input: NewProduct) -> StoreResult<Product>;

    /// Merge `patch` into an existing record and restamp it.
    async fn update(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product>;

    /// Remove a record. Unknown ids yield [`StoreError::NotFound`].
    async fn delete(&self, id: ProductId) -> StoreResult<()>;

    /// Field-equality lookup.
    async fn filter(&self, criteria: &ProductCriteria) -> StoreResult<Vec<Product>>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn list(&self, order: &ListOrder) -> StoreResult<Vec<Product>> {
        (**self).list(order).await
    }

    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        (**self).create(input).await
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete(id).await
    }

    async fn filter(&self, criteria: &ProductCriteria) -> StoreResult<Vec<Product>> {
        (**self).filter(criteria).await
    }
}
