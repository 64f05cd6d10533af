//! Read-only views derived from the ledger.

use std::collections::BTreeMap;

use stockbook_core::Discount;

use crate::product::Product;
use crate::sale::Destination;

/// One row of the inventory display.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLine {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub discount: Discount,
    pub sold: i64,
}

impl From<&Product> for InventoryLine {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name().to_string(),
            quantity: p.quantity(),
            price: p.price(),
            discount: p.discount(),
            sold: p.sold(),
        }
    }
}

/// Quantities sold, grouped by product, then by (city, location).
///
/// Only products with at least one sale appear. Keys are ordered, so iteration
/// does not depend on the order sales were recorded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionSummary {
    by_product: BTreeMap<String, BTreeMap<Destination, i64>>,
}

impl DistributionSummary {
    pub(crate) fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut by_product: BTreeMap<String, BTreeMap<Destination, i64>> = BTreeMap::new();
        for product in products {
            for sale in product.sales() {
                *by_product
                    .entry(product.name().to_string())
                    .or_default()
                    .entry(sale.destination())
                    .or_insert(0) += sale.quantity();
            }
        }
        Self { by_product }
    }

    /// Total sold of `product` to `(city, location)`, `None` if nothing was.
    pub fn get(&self, product: &str, city: &str, location: &str) -> Option<i64> {
        self.by_product
            .get(product)?
            .get(&Destination::new(city, location))
            .copied()
    }

    /// Breakdown for one product.
    pub fn destinations(&self, product: &str) -> Option<&BTreeMap<Destination, i64>> {
        self.by_product.get(product)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<Destination, i64>)> {
        self.by_product.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.by_product.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_product.len()
    }
}
