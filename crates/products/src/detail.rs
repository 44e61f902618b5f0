//! Per-product figures shown on the detail page.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::product::Product;
use crate::stock::{StockStatus, classify_stock};

/// Derived figures for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductMetrics {
    pub status: StockStatus,
    pub low_stock_threshold: u32,
    pub line_value: Decimal,
    /// price - cost; negative when sold below cost.
    pub unit_profit: Decimal,
    /// Percent of price, one decimal place. Zero when the price is zero.
    pub profit_margin: Decimal,
}

impl ProductMetrics {
    pub fn of(product: &Product) -> Self {
        let unit_profit = product.price.saturating_sub(product.cost);
        let profit_margin = if product.price > Decimal::ZERO {
            margin_percent(unit_profit, product.price)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        Self {
            status: classify_stock(product),
            low_stock_threshold: product.effective_threshold(),
            line_value: product.line_value(),
            unit_profit,
            profit_margin,
        }
    }
}

/// `profit / price * 100` for a positive price, saturating on overflow.
fn margin_percent(profit: Decimal, price: Decimal) -> Decimal {
    let bound = if profit.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    profit
        .checked_div(price)
        .map_or(bound, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::NewProduct;
    use chrono::Utc;
    use stockflow_core::ProductId;

    fn priced(quantity: u32, price: Decimal, cost: Decimal) -> Product {
        NewProduct {
            quantity,
            price,
            cost,
            ..NewProduct::new("Widget", "WID-001")
        }
        .into_product(ProductId::new(), Utc::now())
    }

    #[test]
    fn margin_is_rounded_to_one_decimal() {
        let m = ProductMetrics::of(&priced(3, Decimal::new(3000, 2), Decimal::new(2000, 2)));
        assert_eq!(m.unit_profit, Decimal::from(10));
        assert_eq!(m.profit_margin, Decimal::new(333, 1));
        assert_eq!(m.line_value, Decimal::from(90));
        assert_eq!(m.status, StockStatus::Low);
    }

    #[test]
    fn zero_price_has_zero_margin() {
        let m = ProductMetrics::of(&priced(20, Decimal::ZERO, Decimal::from(5)));
        assert_eq!(m.profit_margin, Decimal::ZERO);
        assert_eq!(m.unit_profit, Decimal::from(-5));
        assert_eq!(m.status, StockStatus::In);
    }

    #[test]
    fn selling_below_cost_gives_negative_margin() {
        let m = ProductMetrics::of(&priced(0, Decimal::from(8), Decimal::from(10)));
        assert_eq!(m.profit_margin, Decimal::from(-25));
        assert_eq!(m.status, StockStatus::Out);
    }

    #[test]
    fn tiny_price_with_huge_cost_saturates_instead_of_panicking() {
        let m = ProductMetrics::of(&priced(1, Decimal::new(1, 20), Decimal::from(1_000_000_000_000_i64)));
        assert_eq!(m.profit_margin, Decimal::MIN);
        assert!(m.unit_profit.is_sign_negative());
    }

    #[test]
    fn huge_line_value_saturates() {
        let m = ProductMetrics::of(&priced(2, Decimal::from_scientific("5e28").unwrap(), Decimal::ZERO));
        assert_eq!(m.line_value, Decimal::MAX);
        assert_eq!(m.profit_margin, Decimal::ONE_HUNDRED);
    }
}
