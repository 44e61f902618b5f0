//! List ordering (`[-]field`, e.g. `-updated_date`).

use core::cmp::Ordering;
use core::str::FromStr;

use stockflow_core::DomainError;
use stockflow_products::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    UpdatedDate,
    Name,
    Sku,
    Quantity,
    Price,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::UpdatedDate => "updated_date",
            SortField::Name => "name",
            SortField::Sku => "sku",
            SortField::Quantity => "quantity",
            SortField::Price => "price",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::UpdatedDate => a.updated_date.cmp(&b.updated_date),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Sku => a.sku.cmp(&b.sku),
            SortField::Quantity => a.quantity.cmp(&b.quantity),
            SortField::Price => a.price.cmp(&b.price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Requested ordering of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ListOrder {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Stable in-place sort; equal keys keep their current order.
    pub fn sort(&self, products: &mut [Product]) {
        products.sort_by(|a, b| {
            let ord = self.field.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
}

/// Most recently updated first.
impl Default for ListOrder {
    fn default() -> Self {
        Self::descending(SortField::UpdatedDate)
    }
}

impl core::fmt::Display for ListOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.direction == SortDirection::Descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.as_str())
    }
}

impl FromStr for ListOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (direction, name) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, s.strip_prefix('+').unwrap_or(s)),
        };
        let field = match name {
            "updated_date" => SortField::UpdatedDate,
            "name" => SortField::Name,
            "sku" => SortField::Sku,
            "quantity" => SortField::Quantity,
            "price" => SortField::Price,
            other => {
                return Err(DomainError::validation(format!(
                    "unknown sort field: {other:?}"
                )));
            }
        };
        Ok(Self { field, direction })
    }
}
