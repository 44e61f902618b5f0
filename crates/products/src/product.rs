use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use stockflow_core::{DomainError, DomainResult, ProductId};

use crate::stock::DEFAULT_LOW_STOCK_THRESHOLD;

/// Product category.
///
/// Records coming from persistence may carry no category or one this build
/// does not know; both are read as [`Category::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Furniture,
    Tools,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Furniture,
        Category::Tools,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Food => "food",
            Category::Furniture => "furniture",
            Category::Tools => "tools",
            Category::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Food => "Food & Beverages",
            Category::Furniture => "Furniture",
            Category::Tools => "Tools & Equipment",
            Category::Other => "Other",
        }
    }

    /// Lenient parse: anything unrecognised becomes `Other`.
    pub fn from_label(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::validation(format!("unknown category: {needle}")))
    }
}

fn category_or_other<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Category::from_label).unwrap_or_default())
}

/// A product record as owned by the persistence layer.
///
/// Fields other than `id` and `updated_date` may be missing on records read
/// back from storage, so reads are lenient and every consumer defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "category_or_other")]
    pub category: Category,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    /// Raw threshold; `None` and `Some(0)` both mean "use the default".
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub updated_date: DateTime<Utc>,
}

impl Product {
    /// Threshold used for stock classification.
    ///
    /// Zero is treated like an unset value, so a product cannot opt out of
    /// low-stock alerts by storing 0.
    pub fn effective_threshold(&self) -> u32 {
        match self.low_stock_threshold {
            Some(t) if t > 0 => t,
            _ => DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// quantity x price, saturating at the `Decimal` bounds.
    pub fn line_value(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.price)
    }

    /// Merge a partial update into this record and restamp it.
    pub fn apply_patch(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(sku) = patch.sku {
            self.sku = Some(sku);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(threshold) = patch.low_stock_threshold {
            self.low_stock_threshold = Some(threshold);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_date = now;
    }
}

/// Fields for a new product; `id` and `updated_date` are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default = "default_threshold")]
    pub low_stock_threshold: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl NewProduct {
    /// Minimal constructor; everything else takes the form defaults.
    pub fn new(name: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            category: Category::Other,
            quantity: 0,
            price: Decimal::ZERO,
            cost: Decimal::ZERO,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            description: None,
            image_url: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("sku", &self.sku)?;
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("cost", self.cost)?;
        Ok(())
    }

    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: Some(self.name),
            sku: Some(self.sku),
            category: self.category,
            quantity: self.quantity,
            price: self.price,
            cost: self.cost,
            low_stock_threshold: Some(self.low_stock_threshold),
            description: self.description,
            image_url: self.image_url,
            updated_date: now,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductPatch {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            ensure_not_blank("name", name)?;
        }
        if let Some(sku) = &self.sku {
            ensure_not_blank("sku", sku)?;
        }
        if let Some(price) = self.price {
            ensure_non_negative("price", price)?;
        }
        if let Some(cost) = self.cost {
            ensure_non_negative("cost", cost)?;
        }
        Ok(())
    }
}

fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: Decimal) -> DomainResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn widget() -> Product {
        NewProduct {
            quantity: 4,
            price: Decimal::new(250, 2),
            ..NewProduct::new("Widget", "WID-001")
        }
        .into_product(ProductId::new(), test_time())
    }

    #[test]
    fn new_product_takes_form_defaults() {
        let p = NewProduct::new("Widget", "WID-001").into_product(ProductId::new(), test_time());
        assert_eq!(p.category, Category::Other);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.price, Decimal::ZERO);
        assert_eq!(p.low_stock_threshold, Some(10));
        assert_eq!(p.updated_date, test_time());
    }

    #[test]
    fn new_product_rejects_blank_name_and_sku() {
        let err = NewProduct::new("   ", "SKU").validate().unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));

        let err = NewProduct::new("Widget", "").validate().unwrap_err();
        assert_eq!(err, DomainError::validation("sku cannot be empty"));
    }

    #[test]
    fn new_product_rejects_negative_money() {
        let input = NewProduct {
            cost: Decimal::new(-1, 0),
            ..NewProduct::new("Widget", "WID-001")
        };
        match input.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("cost")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn effective_threshold_defaults_when_missing_or_zero() {
        let mut p = widget();
        p.low_stock_threshold = None;
        assert_eq!(p.effective_threshold(), 10);
        p.low_stock_threshold = Some(0);
        assert_eq!(p.effective_threshold(), 10);
        p.low_stock_threshold = Some(3);
        assert_eq!(p.effective_threshold(), 3);
    }

    #[test]
    fn line_value_is_quantity_times_price() {
        assert_eq!(widget().line_value(), Decimal::new(1000, 2));
    }

    #[test]
    fn apply_patch_merges_only_present_fields() {
        let mut p = widget();
        let later = test_time() + chrono::Duration::minutes(5);
        p.apply_patch(
            ProductPatch {
                quantity: Some(9),
                category: Some(Category::Tools),
                ..ProductPatch::default()
            },
            later,
        );

        assert_eq!(p.quantity, 9);
        assert_eq!(p.category, Category::Tools);
        assert_eq!(p.name.as_deref(), Some("Widget"));
        assert_eq!(p.price, Decimal::new(250, 2));
        assert_eq!(p.updated_date, later);
    }

    #[test]
    fn patch_validation_only_checks_present_fields() {
        assert!(ProductPatch::default().validate().is_ok());
        let blank = ProductPatch {
            sku: Some(" ".to_string()),
            ..ProductPatch::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn lenient_read_defaults_missing_and_unknown_fields() {
        let id = ProductId::new();
        let raw = serde_json::json!({
            "id": id,
            "category": "gardening",
            "quantity": 3,
            "price": 1.5,
            "updated_date": "2024-03-01T12:00:00Z",
        });
        let p: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(p.id, id);
        assert_eq!(p.name, None);
        assert_eq!(p.sku, None);
        assert_eq!(p.category, Category::Other);
        assert_eq!(p.cost, Decimal::ZERO);
        assert_eq!(p.effective_threshold(), 10);

        let raw = serde_json::json!({
            "id": id,
            "category": null,
            "updated_date": "2024-03-01T12:00:00Z",
        });
        let p: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(p.category, Category::Other);
    }

    #[test]
    fn category_parse_is_case_insensitive_and_strict() {
        assert_eq!("Food".parse::<Category>().unwrap(), Category::Food);
        assert!("gardening".parse::<Category>().is_err());
        assert_eq!(Category::from_label("gardening"), Category::Other);
    }
}
