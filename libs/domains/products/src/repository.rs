use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, ProductInput};

/// Data access for the catalog.
///
/// Absence is reported as `None` (or silently, for writes). Deciding that a
/// missing product is an error is left to the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Products matching every present filter
    async fn search(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;

    /// Insert and return the product with its generated id
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Replace every writable field. A missing id is not an error.
    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<()>;

    /// A missing id is not an error.
    async fn delete(&self, id: i32) -> ProductResult<()>;

    async fn get_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>>;

    /// Add `delta` to the stored stock in a single statement
    async fn update_stock(&self, id: i32, delta: i32) -> ProductResult<()>;
}
