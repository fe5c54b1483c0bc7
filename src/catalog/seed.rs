use super::{NewProduct, Product, ProductRepository};
use crate::Result;
use tracing::{debug, info};

pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Nike Air Zoom Pegasus".to_string(),
            brand: "Nike".to_string(),
            category: "Running".to_string(),
            size: "42".to_string(),
            color: "Negro".to_string(),
            price: 120.0,
            stock: 5,
            description: "Zapatilla de running versátil para entrenamientos diarios".to_string(),
        },
        NewProduct {
            name: "Adidas Ultraboost 21".to_string(),
            brand: "Adidas".to_string(),
            category: "Running".to_string(),
            size: "41".to_string(),
            color: "Blanco".to_string(),
            price: 150.0,
            stock: 3,
            description: "Alta amortiguación y comodidad para corredores exigentes".to_string(),
        },
        NewProduct {
            name: "Puma Suede Classic".to_string(),
            brand: "Puma".to_string(),
            category: "Casual".to_string(),
            size: "40".to_string(),
            color: "Azul".to_string(),
            price: 80.0,
            stock: 10,
            description: "Clásico modelo casual para uso diario".to_string(),
        },
    ]
}

/// Inserts the sample catalog when the store is empty. Returns how many
/// products were inserted.
pub async fn seed_catalog(products: &dyn ProductRepository) -> Result<usize> {
    if products.count().await? > 0 {
        debug!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let samples = sample_products();
    let inserted = samples.len();
    for sample in samples {
        products.insert(Product::new(sample)?).await?;
    }

    info!("Seeded catalog with {} sample products", inserted);
    Ok(inserted)
}
