mod repository;
mod seed;
mod service;
mod types;

pub use repository::{LibsqlProductRepository, ProductRepository};
pub use seed::{sample_products, seed_catalog};
pub use service::ProductService;
pub use types::*;
