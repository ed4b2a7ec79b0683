//! Create `cat_toy` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatToy::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatToy::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(CatToy::Name, 255).not_null())
                    .col(string_len(CatToy::Maker, 255).not_null())
                    .col(integer(CatToy::Price).not_null())
                    .col(string_len(CatToy::Image, 1024).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CatToy::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum CatToy { Table, Id, Name, Maker, Price, Image }
