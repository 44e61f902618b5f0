use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use stockflow_core::ProductId;
use stockflow_products::{NewProduct, Product, ProductPatch};

use super::{ListOrder, ProductCriteria, ProductStore, StoreError, StoreResult};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// In-memory product store for tests/dev.
///
/// Records are kept in insertion order so that listings with equal sort keys
/// come back deterministically.
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
    clock: Clock,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            clock: Arc::new(Utc::now),
        }
    }

    /// Use a fixed or scripted time source for `updated_date` stamps.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Preload records as-is (no validation, no restamping).
    pub fn with_products(self, products: impl IntoIterator<Item = Product>) -> Self {
        if let Ok(mut records) = self.inner.write() {
            records.extend(products);
        }
        self
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Product>>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("product store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Product>>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("product store lock poisoned".to_string()))
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InMemoryProductStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let len = self.inner.read().map(|r| r.len()).unwrap_or_default();
        f.debug_struct("InMemoryProductStore")
            .field("records", &len)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self, order: &ListOrder) -> StoreResult<Vec<Product>> {
        let mut products = self.read()?.clone();
        order.sort(&mut products);
        tracing::debug!(count = products.len(), order = %order, "listed products");
        Ok(products)
    }

    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        input.validate()?;
        let product = input.into_product(ProductId::new(), (self.clock)());
        self.write()?.push(product.clone());
        tracing::info!(product_id = %product.id, sku = ?product.sku, "product created");
        Ok(product)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        patch.validate()?;
        let now = (self.clock)();
        let mut records = self.write()?;
        let record = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.apply_patch(patch, now);
        tracing::info!(product_id = %id, quantity = record.quantity, "product updated");
        Ok(record.clone())
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        let mut records = self.write()?;
        let before = records.len();
        records.retain(|p| p.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn filter(&self, criteria: &ProductCriteria) -> StoreResult<Vec<Product>> {
        Ok(self
            .read()?
            .iter()
            .filter(|p| criteria.matches(p))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicI64, Ordering};
    use stockflow_core::DomainError;
    use stockflow_products::Category;

    /// Clock that advances one minute per call.
    fn ticking_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ticks = AtomicI64::new(0);
        move || start + chrono::Duration::minutes(ticks.fetch_add(1, Ordering::SeqCst))
    }

    fn store() -> InMemoryProductStore {
        InMemoryProductStore::new().with_clock(ticking_clock())
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let store = store();
        let created = store.create(NewProduct::new("Widget", "WID-001")).await.unwrap();

        let found = store.filter(&ProductCriteria::by_id(created.id)).await.unwrap();
        assert_eq!(found, vec![created.clone()]);
        assert_eq!(
            created.updated_date,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let err = store().create(NewProduct::new("", "WID-001")).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::Invalid(DomainError::validation("name cannot be empty"))
        );
    }

    #[tokio::test]
    async fn list_defaults_to_most_recently_updated_first() {
        let store = store();
        let a = store.create(NewProduct::new("A", "A")).await.unwrap();
        let b = store.create(NewProduct::new("B", "B")).await.unwrap();
        store.update(a.id, ProductPatch::quantity(3)).await.unwrap();

        let ids: Vec<_> = store
            .list(&ListOrder::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn update_merges_and_restamps() {
        let store = store();
        let created = store
            .create(NewProduct {
                price: Decimal::from(4),
                ..NewProduct::new("Widget", "WID-001")
            })
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                ProductPatch {
                    category: Some(Category::Tools),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category, Category::Tools);
        assert_eq!(updated.price, Decimal::from(4));
        assert!(updated.updated_date > created.updated_date);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let id = ProductId::new();
        let err = store().update(id, ProductPatch::quantity(1)).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(id));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_the_second_time() {
        let store = store();
        let created = store.create(NewProduct::new("Widget", "WID-001")).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert_eq!(
            store.delete(created.id).await.unwrap_err(),
            StoreError::NotFound(created.id)
        );
        assert!(store.list(&ListOrder::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filter_matches_on_every_set_field() {
        let store = store();
        store
            .create(NewProduct {
                category: Category::Food,
                ..NewProduct::new("Rice", "FD-1")
            })
            .await
            .unwrap();
        store.create(NewProduct::new("Bolt", "FD-2")).await.unwrap();

        let by_sku = store.filter(&ProductCriteria::by_sku("FD-2")).await.unwrap();
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].name.as_deref(), Some("Bolt"));

        let food_with_wrong_sku = ProductCriteria {
            sku: Some("FD-2".to_string()),
            category: Some(Category::Food),
            ..ProductCriteria::default()
        };
        assert!(store.filter(&food_with_wrong_sku).await.unwrap().is_empty());
        assert_eq!(store.filter(&ProductCriteria::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn preloaded_records_keep_missing_fields() {
        let stamp = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let legacy: Product = serde_json::from_value(serde_json::json!({
            "id": ProductId::new(),
            "category": "toys",
            "quantity": 4,
            "updated_date": stamp,
        }))
        .unwrap();
        let store = store().with_products([legacy.clone()]);

        let listed = store.list(&ListOrder::ascending(crate::SortField::Name)).await.unwrap();
        assert_eq!(listed, vec![legacy.clone()]);
        assert_eq!(listed[0].name, None);
        assert_eq!(listed[0].sku, None);
        assert_eq!(listed[0].category, Category::Other);
        assert_eq!(listed[0].updated_date, stamp);

        let found = store.filter(&ProductCriteria::by_sku("anything")).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn works_behind_a_shared_trait_object() {
        let store: Arc<dyn ProductStore> = Arc::new(store());
        store.create(NewProduct::new("Widget", "WID-001")).await.unwrap();
        assert_eq!(store.list(&ListOrder::default()).await.unwrap().len(), 1);
    }
}
