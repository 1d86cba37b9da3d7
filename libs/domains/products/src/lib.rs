//! Products Domain
//!
//! Catalog CRUD over a single `products` table in PostgreSQL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (public reads, admin writes)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, NotFound, error shaping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Filter      │  ← Pure predicate composition over ProductColumn
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, PgProductRepository, ProductService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://localhost/catalog").await?;
//!
//! let service = ProductService::new(PgProductRepository::new(db));
//! let routers = handlers::routers(service);
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use columns::ProductColumn;
pub use error::{ProductError, ProductResult};
pub use handlers::{ApiDoc, ProductRouters};
pub use models::{PLACEHOLDER_IMAGE_URL, Product, ProductFilter, ProductInput, StockAdjustment};
pub use postgres::PgProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
