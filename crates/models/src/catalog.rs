//! Row contract shared by the catalog tables.
//!
//! `product` and `cat_toy` have the same shape but are separate tables (and
//! name their picture column differently), so each entity implements
//! [`CatalogTable`] and the repository layer stays generic over it.

use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

/// A catalog row with the column differences between tables flattened away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: i64,
    pub name: String,
    pub maker: String,
    pub price: i32,
    pub image: String,
}

/// Writable columns of a catalog row.
#[derive(Clone, Copy, Debug)]
pub struct CatalogColumns<'a> {
    pub name: &'a str,
    pub maker: &'a str,
    pub price: i32,
    pub image: &'a str,
}

pub trait CatalogTable: EntityTrait {
    /// Primary key column, used for stable ordering.
    fn id_column() -> Self::Column;

    fn to_row(model: Self::Model) -> CatalogRow;

    /// Fresh active model with the id left for the database to assign.
    fn new_active(cols: CatalogColumns<'_>) -> Self::ActiveModel;

    /// Overwrite every writable column; the id is left untouched.
    fn assign(active: &mut Self::ActiveModel, cols: CatalogColumns<'_>);
}
