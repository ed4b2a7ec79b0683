use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_product::Product;
use crate::m20240101_000002_create_cat_toy::CatToy;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: lookups by maker
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_maker")
                    .table(Product::Table)
                    .col(Product::Maker)
                    .to_owned(),
            )
            .await?;

        // CatToy: lookups by maker
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cat_toy_maker")
                    .table(CatToy::Table)
                    .col(CatToy::Maker)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cat_toy_maker").table(CatToy::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_maker").table(Product::Table).to_owned())
            .await
    }
}
