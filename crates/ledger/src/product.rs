use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{checked_total, discounted_total, DomainError, DomainResult, Discount, Entity};

use crate::sale::{Destination, Sale};

/// A named, priced, discountable inventory item.
///
/// Serialized field-for-field into the persisted inventory state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    price: f64,
    quantity: i64,
    discount: Discount,
    acquired_on: NaiveDate,
    total: f64,
    #[serde(default)]
    sold: i64,
    #[serde(default)]
    sales: Vec<Sale>,
}

impl Product {
    pub(crate) fn new(
        name: String,
        price: f64,
        quantity: i64,
        discount: Discount,
        acquired_on: NaiveDate,
    ) -> DomainResult<Self> {
        Ok(Self {
            total: checked_total(price, quantity, discount)?,
            name,
            price,
            quantity,
            discount,
            acquired_on,
            sold: 0,
            sales: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    pub fn acquired_on(&self) -> NaiveDate {
        self.acquired_on
    }

    /// Discounted value of the stock on hand as of the last receipt or price change.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Cumulative quantity sold over the product's lifetime.
    pub fn sold(&self) -> i64 {
        self.sold
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// What `quantity` units would cost right now.
    pub fn quote(&self, quantity: i64) -> f64 {
        discounted_total(self.price, quantity, self.discount)
    }

    /// Add `quantity` units. Nothing changes if the new stock or its value overflows.
    pub(crate) fn receive(&mut self, quantity: i64) -> DomainResult<()> {
        let on_hand = self.quantity.checked_add(quantity).ok_or_else(|| {
            DomainError::invalid(format!(
                "product {}: receiving {quantity} units overflows the stock count",
                self.name
            ))
        })?;
        self.total = checked_total(self.price, on_hand, self.discount)?;
        self.quantity = on_hand;
        Ok(())
    }

    pub(crate) fn reprice(&mut self, price: f64) -> DomainResult<()> {
        self.total = checked_total(price, self.quantity, self.discount)?;
        self.price = price;
        Ok(())
    }

    /// Check a sale against stock without touching state.
    pub(crate) fn ensure_can_sell(&self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::invalid(format!(
                "sale quantity must be positive, got {quantity}"
            )));
        }
        if self.sold.checked_add(quantity).is_none() {
            return Err(DomainError::invalid(format!(
                "product {}: sold count overflows",
                self.name
            )));
        }
        if quantity > self.quantity {
            return Err(DomainError::insufficient_stock(
                self.name.clone(),
                quantity,
                self.quantity,
            ));
        }
        Ok(())
    }

    pub(crate) fn sell(
        &mut self,
        quantity: i64,
        destination: Destination,
        at: DateTime<Utc>,
    ) -> DomainResult<Sale> {
        self.ensure_can_sell(quantity)?;

        let total = checked_total(self.price, quantity, self.discount)?;
        let sale = Sale::new(quantity, destination, at, total);
        self.quantity -= quantity;
        self.sold += quantity;
        self.sales.push(sale.clone());
        Ok(sale)
    }

    /// Validate state loaded from storage.
    pub(crate) fn check_invariants(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid("product name cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::invalid(format!(
                "product {}: price cannot be negative",
                self.name
            )));
        }
        if self.quantity < 0 {
            return Err(DomainError::invalid(format!(
                "product {}: quantity on hand cannot be negative",
                self.name
            )));
        }
        if !self.total.is_finite() {
            return Err(DomainError::invalid(format!(
                "product {}: stock value must be a finite number",
                self.name
            )));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = str;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
