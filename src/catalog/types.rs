use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fields needed to create a product, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
}

/// A shoe in the catalog.
///
/// Fields are private so that `price > 0` and `stock >= 0` hold for every
/// value of this type, including after stock changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: Option<i64>,
    name: String,
    brand: String,
    category: String,
    size: String,
    color: String,
    price: f64,
    stock: i64,
    description: String,
}

impl Product {
    pub fn new(new: NewProduct) -> Result<Self> {
        if new.name.trim().is_empty() {
            return Err(Error::validation("product name must not be empty"));
        }
        if new.price.is_nan() || new.price <= 0.0 {
            return Err(Error::validation("product price must be greater than 0"));
        }
        if new.stock < 0 {
            return Err(Error::validation("product stock must not be negative"));
        }

        Ok(Self {
            id: None,
            name: new.name,
            brand: new.brand,
            category: new.category,
            size: new.size,
            color: new.color,
            price: new.price,
            stock: new.stock,
            description: new.description,
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn reduce_stock(&mut self, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(Error::validation("quantity to reduce must be positive"));
        }
        if quantity > self.stock {
            return Err(Error::validation(format!(
                "not enough stock for '{}': requested {}, available {}",
                self.name, quantity, self.stock
            )));
        }
        self.stock -= quantity;
        Ok(())
    }

    pub fn increase_stock(&mut self, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(Error::validation("quantity to increase must be positive"));
        }
        self.stock = self
            .stock
            .checked_add(quantity)
            .ok_or_else(|| Error::validation("stock overflow"))?;
        Ok(())
    }
}
