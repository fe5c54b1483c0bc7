use super::{NewProduct, Product};
use crate::{Error, Result};
use async_trait::async_trait;
use libsql::{Connection, Row, params};
use tracing::debug;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id.
    async fn get_all(&self) -> Result<Vec<Product>>;

    async fn get_by_id(&self, product_id: i64) -> Result<Option<Product>>;

    /// Stores a new product and returns it with its assigned id.
    async fn insert(&self, product: Product) -> Result<Product>;

    async fn count(&self) -> Result<u64>;
}

pub struct LibsqlProductRepository {
    conn: Connection,
}

impl LibsqlProductRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, brand, category, size, color, price, stock, description FROM products";

fn product_from_row(row: &Row) -> Result<Product> {
    let id: i64 = row.get(0)?;
    let product = Product::new(NewProduct {
        name: row.get(1)?,
        brand: row.get(2)?,
        category: row.get(3)?,
        size: row.get(4)?,
        color: row.get(5)?,
        price: row.get(6)?,
        stock: row.get(7)?,
        description: row.get(8)?,
    })
    .map_err(|e| Error::internal(format!("Invalid product row {id}: {e}")))?;

    Ok(product.with_id(id))
}

#[async_trait]
impl ProductRepository for LibsqlProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} ORDER BY id ASC"), ())
            .await?;

        let mut products = Vec::new();
        while let Some(row) = rows.next().await? {
            products.push(product_from_row(&row)?);
        }

        debug!("Retrieved {} products from database", products.len());
        Ok(products)
    }

    async fn get_by_id(&self, product_id: i64) -> Result<Option<Product>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?"), params![product_id])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(product_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        self.conn
            .execute(
                "INSERT INTO products (name, brand, category, size, color, price, stock, description) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    product.name(),
                    product.brand(),
                    product.category(),
                    product.size(),
                    product.color(),
                    product.price(),
                    product.stock(),
                    product.description()
                ],
            )
            .await?;

        let id = self.conn.last_insert_rowid();
        debug!("Product '{}' stored with id {}", product.name(), id);
        Ok(product.with_id(id))
    }

    async fn count(&self) -> Result<u64> {
        let mut rows = self.conn.query("SELECT COUNT(*) FROM products", ()).await?;
        let count: i64 = match rows.next().await? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        u64::try_from(count).map_err(|e| Error::internal(format!("Invalid product count: {e}")))
    }
}
