use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::ProductId))
                    .col(string_len(Products::Name, 200))
                    .col(decimal_len(Products::Price, 10, 2).default(0))
                    .col(integer(Products::CategoryId))
                    .col(text_null(Products::Description))
                    // Exposed to clients as `color`
                    .col(string_len_null(Products::Subcategory, 100))
                    .col(integer(Products::Stock).default(0))
                    .col(boolean(Products::Featured).default(false))
                    .col(string_len_null(Products::ImageUrl, 500))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    ProductId,
    Name,
    Price,
    CategoryId,
    Description,
    Subcategory,
    Stock,
    Featured,
    ImageUrl,
}
