//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{GENERIC_FAILURE, ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductInput};
use crate::repository::ProductRepository;

const CREATE_FAILED: &str = "Failed to add product.";
const UPDATE_FAILED: &str = "Failed to update product.";
const DELETE_FAILED: &str = "Failed to delete product.";
const STOCK_FAILED: &str = "Failed to update product stock.";

/// Log a storage fault and replace it with a client-safe message.
///
/// Validation and not-found errors pass through untouched.
fn storage_failure(
    operation: &'static str,
    id: Option<i32>,
    message: &'static str,
) -> impl FnOnce(ProductError) -> ProductError {
    move |err| match err {
        ProductError::InvalidInput(_) | ProductError::NotFound(_) => err,
        other => {
            tracing::error!(operation, product_id = ?id, error = %other, "Product storage failure");
            ProductError::Internal(message.to_string())
        }
    }
}

fn validate(input: &ProductInput) -> ProductResult<()> {
    match input.first_violation() {
        Some(message) => Err(ProductError::InvalidInput(message)),
        None => Ok(()),
    }
}

/// Catalog operations: validation, existence checks and error shaping on top
/// of a [`ProductRepository`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Search when any filter is present, otherwise list everything
    #[instrument(skip(self))]
    pub async fn search_or_list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let result = if filter.has_filters() {
            self.repository.search(&filter).await
        } else {
            self.repository.list_all().await
        };

        result.map_err(storage_failure("search_or_list", None, GENERIC_FAILURE))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> ProductResult<Product> {
        self.find(id, "get", GENERIC_FAILURE).await
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        validate(&input)?;

        self.repository
            .create(input)
            .await
            .map_err(storage_failure("create", None, CREATE_FAILED))
    }

    /// Replace every writable field of an existing product
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: ProductInput) -> ProductResult<()> {
        self.ensure_exists(id, "update", UPDATE_FAILED).await?;
        validate(&input)?;

        self.repository
            .update(id, input)
            .await
            .map_err(storage_failure("update", Some(id), UPDATE_FAILED))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ProductResult<()> {
        self.ensure_exists(id, "delete", DELETE_FAILED).await?;

        self.repository
            .delete(id)
            .await
            .map_err(storage_failure("delete", Some(id), DELETE_FAILED))
    }

    #[instrument(skip(self))]
    pub async fn get_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>> {
        self.repository
            .get_by_category(category_id)
            .await
            .map_err(storage_failure("get_by_category", None, GENERIC_FAILURE))
    }

    /// Apply a signed stock delta and return the re-read product
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: i32, delta: i32) -> ProductResult<Product> {
        self.ensure_exists(id, "adjust_stock", STOCK_FAILED).await?;

        self.repository
            .update_stock(id, delta)
            .await
            .map_err(storage_failure("adjust_stock", Some(id), STOCK_FAILED))?;

        self.find(id, "adjust_stock", STOCK_FAILED).await
    }

    async fn find(
        &self,
        id: i32,
        operation: &'static str,
        message: &'static str,
    ) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(storage_failure(operation, Some(id), message))?
            .ok_or(ProductError::NotFound(id))
    }

    async fn ensure_exists(
        &self,
        id: i32,
        operation: &'static str,
        message: &'static str,
    ) -> ProductResult<()> {
        self.find(id, operation, message).await.map(|_| ())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
