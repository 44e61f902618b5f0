//! Service layer between the HTTP handlers and the product store.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::instrument;

use stockflow_core::ProductId;
use stockflow_infra::{
    ApiConfig, InMemoryProductStore, ListOrder, ProductCriteria, ProductStore, StoreError,
    StoreResult,
};
use stockflow_products::{NewProduct, Product, ProductPatch, adjusted_quantity};

/// Shared state handed to every handler.
pub struct AppServices {
    store: Arc<dyn ProductStore>,
    config: ApiConfig,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }

    /// Services backed by an empty in-memory store.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()), config)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, order: Option<ListOrder>) -> StoreResult<Vec<Product>> {
        let order = order.unwrap_or(self.config.default_order);
        self.store.list(&order).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        self.store
            .filter(&ProductCriteria::by_id(id))
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        self.store.create(input).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        self.store.update(id, patch).await
    }

    /// Delete one product. Returns `false` when it was already gone.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> StoreResult<bool> {
        match self.store.delete(id).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(product_id = %id, "delete of unknown product ignored");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a +/- stock adjustment, never going below zero.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> StoreResult<Product> {
        let current = self.get_product(id).await?;
        let quantity = adjusted_quantity(current.quantity, delta);
        self.store.update(id, ProductPatch::quantity(quantity)).await
    }

    /// Delete every listed product concurrently; returns how many existed.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn bulk_delete(&self, ids: Vec<ProductId>) -> StoreResult<usize> {
        let removed = try_join_all(ids.into_iter().map(|id| self.delete_product(id))).await?;
        let deleted = removed.into_iter().filter(|r| *r).count();
        tracing::info!(deleted, "bulk delete finished");
        Ok(deleted)
    }

    /// Full catalog in the configured default order, for the inventory views.
    pub async fn snapshot(&self) -> StoreResult<Vec<Product>> {
        self.list_products(None).await
    }
}
