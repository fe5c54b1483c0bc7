use super::{Product, ProductRepository};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Read access to the catalog for the API layer.
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.products.get_all().await
    }

    pub async fn get_product(&self, product_id: i64) -> Result<Product> {
        match self.products.get_by_id(product_id).await? {
            Some(product) => Ok(product),
            None => {
                debug!("Product {} not found", product_id);
                Err(Error::ProductNotFound { product_id })
            }
        }
    }
}
