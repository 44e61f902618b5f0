//! Benchmarks for the derived inventory views.
//!
//! Run with: `cargo bench -p stockflow-products`

use chrono::Utc;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use stockflow_core::ProductId;
use stockflow_products::{
    Category, CategoryFilter, DEFAULT_ALERT_LIMIT, FilterState, InventoryView, Product, StockFilter,
};

fn catalog(size: usize) -> Vec<Product> {
    let now = Utc::now();
    (0..size)
        .map(|i| Product {
            id: ProductId::new(),
            name: Some(format!("Product {i}")),
            sku: Some(format!("SKU-{i:06}")),
            category: Category::ALL[i % Category::ALL.len()],
            quantity: (i % 40) as u32,
            price: Decimal::new((i % 5_000) as i64 + 99, 2),
            cost: Decimal::new((i % 3_000) as i64, 2),
            low_stock_threshold: if i % 7 == 0 { None } else { Some(10) },
            description: None,
            image_url: None,
            updated_date: now,
        })
        .collect()
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory_view");
    for size in [100usize, 1_000, 10_000] {
        let products = catalog(size);

        group.bench_with_input(BenchmarkId::new("unfiltered", size), &products, |b, products| {
            b.iter(|| InventoryView::compute(black_box(products), FilterState::default(), DEFAULT_ALERT_LIMIT))
        });

        let filter = FilterState::default()
            .with_search("sku-00")
            .with_category(CategoryFilter::Only(Category::Tools))
            .with_stock(StockFilter::Low);
        group.bench_with_input(BenchmarkId::new("filtered", size), &products, |b, products| {
            b.iter(|| InventoryView::compute(black_box(products), filter.clone(), DEFAULT_ALERT_LIMIT))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_view);
criterion_main!(benches);
