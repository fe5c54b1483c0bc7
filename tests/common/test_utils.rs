use ecommerce_chat::{
    catalog::{NewProduct, Product, ProductRepository, sample_products},
    config::{Config, DatabaseConfig, LlmConfig},
};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        database: DatabaseConfig {
            path: ":memory:".to_string(),
            seed_catalog: true,
        },
        llm: create_test_llm_config(),
        ..Config::default()
    }
}

pub fn create_test_llm_config() -> LlmConfig {
    LlmConfig {
        api_key: "test-api-key".to_string(),
        ..LlmConfig::default()
    }
}

/// The three seed products, validated, without ids
pub fn sample_catalog() -> Vec<Product> {
    sample_products()
        .into_iter()
        .map(|p| Product::new(p).unwrap())
        .collect()
}

pub fn create_product(name: &str) -> Product {
    Product::new(NewProduct {
        name: name.to_string(),
        brand: "Brand".to_string(),
        category: "Casual".to_string(),
        size: "40".to_string(),
        color: "Verde".to_string(),
        price: 60.0,
        stock: 2,
        description: "Producto de prueba".to_string(),
    })
    .unwrap()
}

pub async fn insert_all(repo: &dyn ProductRepository, products: Vec<Product>) -> Vec<Product> {
    let mut stored = Vec::new();
    for product in products {
        stored.push(repo.insert(product).await.unwrap());
    }
    stored
}

/// Generate unique session ID for tests
pub fn generate_test_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
