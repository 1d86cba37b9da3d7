use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, QueryResult,
    Statement, Value,
};
use strum::IntoEnumIterator;

use crate::{
    columns::{ProductColumn, TABLE},
    error::ProductResult,
    filter,
    models::{Product, ProductFilter, ProductInput},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository using SeaORM raw statements
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl FromQueryResult for Product {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        use ProductColumn::*;

        Ok(Product {
            id: res.try_get(pre, Id.name())?,
            name: res.try_get(pre, Name.name())?,
            price: res.try_get(pre, Price.name())?,
            category_id: res.try_get(pre, CategoryId.name())?,
            description: res.try_get(pre, Description.name())?,
            color: res.try_get(pre, Color.name())?,
            stock: res.try_get(pre, Stock.name())?,
            featured: res.try_get(pre, Featured.name())?,
            image_url: Product::image_or_placeholder(res.try_get(pre, ImageUrl.name())?),
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedId {
    product_id: i32,
}

fn input_value(input: &ProductInput, column: ProductColumn) -> Option<Value> {
    let value = match column {
        ProductColumn::Id => return None,
        ProductColumn::Name => input.name.clone().into(),
        ProductColumn::Price => input.price.into(),
        ProductColumn::CategoryId => input.category_id.into(),
        ProductColumn::Description => input.description.clone().into(),
        ProductColumn::Color => input.color.clone().into(),
        ProductColumn::Stock => input.stock.into(),
        ProductColumn::Featured => input.featured.into(),
        ProductColumn::ImageUrl => input.image_url.clone().into(),
    };
    Some(value)
}

/// Writable columns paired with their values, in column order.
fn bound_values(input: &ProductInput) -> Vec<(ProductColumn, Value)> {
    ProductColumn::iter()
        .filter(|column| column.writable())
        .filter_map(|column| input_value(input, column).map(|value| (column, value)))
        .collect()
}

fn select_sql(predicate: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {}",
        ProductColumn::select_list(),
        TABLE,
        predicate,
        ProductColumn::Id.name()
    )
}

fn insert_sql(columns: &[ProductColumn]) -> String {
    let names: Vec<_> = columns.iter().map(|c| c.name()).collect();
    let placeholders: Vec<_> = (1..=columns.len()).map(|i| format!("${}", i)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        TABLE,
        names.join(", "),
        placeholders.join(", "),
        ProductColumn::Id.name()
    )
}

fn update_sql(columns: &[ProductColumn]) -> String {
    let assignments: Vec<_> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c.name(), i + 1))
        .collect();

    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        TABLE,
        assignments.join(", "),
        ProductColumn::Id.name(),
        columns.len() + 1
    )
}

fn delete_sql() -> String {
    format!("DELETE FROM {} WHERE {} = $1", TABLE, ProductColumn::Id.name())
}

fn stock_sql() -> String {
    let stock = ProductColumn::Stock.name();
    format!(
        "UPDATE {} SET {} = {} + $1 WHERE {} = $2",
        TABLE,
        stock,
        stock,
        ProductColumn::Id.name()
    )
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, select_sql("1=1"), []);
        let products = Product::find_by_statement(stmt).all(&self.db).await?;
        Ok(products)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let sql = select_sql(&format!("{} = $1", ProductColumn::Id.name()));
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let product = Product::find_by_statement(stmt).one(&self.db).await?;
        Ok(product)
    }

    async fn search(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let predicate = filter::render(&filter::conjuncts(filter));
        tracing::debug!(predicate = %predicate.sql, "Searching products");

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            select_sql(&predicate.sql),
            predicate.values,
        );

        let products = Product::find_by_statement(stmt).all(&self.db).await?;
        Ok(products)
    }

    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let (columns, values): (Vec<_>, Vec<_>) = bound_values(&input).into_iter().unzip();
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, insert_sql(&columns), values);

        let inserted = InsertedId::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotInserted)?;

        tracing::info!(product_id = inserted.product_id, "Created product");

        Ok(Product {
            id: inserted.product_id,
            name: input.name,
            price: input.price,
            category_id: input.category_id,
            description: input.description,
            color: input.color,
            stock: input.stock,
            featured: input.featured,
            image_url: Product::image_or_placeholder(input.image_url),
        })
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<()> {
        let (columns, mut values): (Vec<_>, Vec<_>) = bound_values(&input).into_iter().unzip();
        values.push(id.into());

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, update_sql(&columns), values);
        let result = self.db.execute_raw(stmt).await?;

        tracing::debug!(product_id = id, rows = result.rows_affected(), "Updated product");
        Ok(())
    }

    async fn delete(&self, id: i32) -> ProductResult<()> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, delete_sql(), [id.into()]);
        let result = self.db.execute_raw(stmt).await?;

        tracing::debug!(product_id = id, rows = result.rows_affected(), "Deleted product");
        Ok(())
    }

    async fn get_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>> {
        self.search(&ProductFilter::by_category(category_id)).await
    }

    async fn update_stock(&self, id: i32, delta: i32) -> ProductResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            stock_sql(),
            [delta.into(), id.into()],
        );
        self.db.execute_raw(stmt).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::models::PLACEHOLDER_IMAGE_URL;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};
    use std::collections::BTreeMap;

    const SELECT_ALL: &str = "SELECT product_id, name, price, category_id, description, subcategory, stock, featured, image_url FROM products";

    fn row(id: i32, color: Option<&str>, image_url: Option<&str>) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("product_id", id.into()),
            ("name", "Shirt".into()),
            ("price", Decimal::new(1999, 2).into()),
            ("category_id", 2i32.into()),
            ("description", Option::<String>::None.into()),
            ("subcategory", color.map(str::to_string).into()),
            ("stock", 10i32.into()),
            ("featured", false.into()),
            ("image_url", image_url.map(str::to_string).into()),
        ])
    }

    fn shirt() -> ProductInput {
        ProductInput {
            name: "Shirt".into(),
            price: Decimal::new(1999, 2),
            category_id: 2,
            color: Some("blue".into()),
            stock: 10,
            ..Default::default()
        }
    }

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_row_mapping_renames_color_and_substitutes_image() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(1, Some("blue"), None),
                row(2, None, Some("")),
                row(3, None, Some("https://cdn.example.com/3.png")),
            ]])
            .into_connection();

        let products = PgProductRepository::new(db).list_all().await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].color.as_deref(), Some("blue"));
        assert_eq!(products[0].price, Decimal::new(1999, 2));
        assert_eq!(products[0].image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(products[1].image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(products[2].image_url, "https://cdn.example.com/3.png");
    }

    #[tokio::test]
    async fn test_list_all_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(
            repo.db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DbBackend::Postgres,
                format!("{} WHERE 1=1 ORDER BY product_id", SELECT_ALL),
                []
            )]
        );
    }

    #[tokio::test]
    async fn test_get_by_id_absent_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let product = PgProductRepository::new(db).get_by_id(99).await.unwrap();
        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_search_binds_values_positionally() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, Some("dark red wine"), None)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let filter = ProductFilter {
            category_id: Some(2),
            min_price: Some(Decimal::new(500, 2)),
            color: Some("red".into()),
            ..Default::default()
        };
        let products = repo.search(&filter).await.unwrap();
        assert_eq!(products.len(), 1);

        assert_eq!(
            repo.db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DbBackend::Postgres,
                format!(
                    "{} WHERE 1=1 AND category_id = $1 AND price >= $2 AND subcategory LIKE $3 ORDER BY product_id",
                    SELECT_ALL
                ),
                [2i32.into(), Decimal::new(500, 2).into(), "%red%".into()]
            )]
        );
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("product_id", Value::from(42))])]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.create(shirt()).await.unwrap();
        assert_eq!(product.id, 42);
        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.image_url, PLACEHOLDER_IMAGE_URL);

        assert_eq!(
            repo.db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DbBackend::Postgres,
                "INSERT INTO products (name, price, category_id, description, subcategory, stock, featured, image_url) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING product_id",
                [
                    "Shirt".into(),
                    Decimal::new(1999, 2).into(),
                    2i32.into(),
                    Option::<String>::None.into(),
                    Some("blue".to_string()).into(),
                    10i32.into(),
                    false.into(),
                    Option::<String>::None.into(),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn test_update_replaces_all_writable_columns() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(0)])
            .into_connection();
        let repo = PgProductRepository::new(db);

        // Zero rows affected is not an error
        repo.update(7, shirt()).await.unwrap();

        let log = repo.db.into_transaction_log();
        assert_eq!(
            log,
            vec![Transaction::from_sql_and_values(
                DbBackend::Postgres,
                "UPDATE products SET name = $1, price = $2, category_id = $3, description = $4, subcategory = $5, stock = $6, featured = $7, image_url = $8 WHERE product_id = $9",
                [
                    "Shirt".into(),
                    Decimal::new(1999, 2).into(),
                    2i32.into(),
                    Option::<String>::None.into(),
                    Some("blue".to_string()).into(),
                    10i32.into(),
                    false.into(),
                    Option::<String>::None.into(),
                    7i32.into(),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(0), exec_ok(0)])
            .into_connection();
        let repo = PgProductRepository::new(db);

        repo.delete(5).await.unwrap();
        repo.delete(5).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_stock_is_single_relative_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(1)])
            .into_connection();
        let repo = PgProductRepository::new(db);

        repo.update_stock(3, -2).await.unwrap();

        assert_eq!(
            repo.db.into_transaction_log(),
            vec![Transaction::from_sql_and_values(
                DbBackend::Postgres,
                "UPDATE products SET stock = stock + $1 WHERE product_id = $2",
                [(-2i32).into(), 3i32.into()]
            )]
        );
    }

    #[tokio::test]
    async fn test_storage_fault_becomes_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();

        let err = PgProductRepository::new(db).list_all().await.unwrap_err();
        assert!(matches!(err, ProductError::Database(ref m) if m.contains("connection reset")));
    }
}
