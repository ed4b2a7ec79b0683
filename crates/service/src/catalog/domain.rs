use std::fmt;

use models::catalog::{CatalogColumns, CatalogRow};
use serde::{Deserialize, Serialize};

use crate::catalog::validation;
use crate::errors::ServiceError;

/// Which catalog a service, repository or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Product,
    CatToy,
}

impl CatalogKind {
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Product => "product",
            CatalogKind::CatToy => "cat toy",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog entry. `id` is `None` until storage assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub maker: String,
    pub price: i32,
    #[serde(alias = "imageUrl")]
    pub image: String,
}

impl Item {
    /// Unsaved item, not validated. `save` and `update` check it.
    pub fn of(name: impl Into<String>, maker: impl Into<String>, price: i32, image: impl Into<String>) -> Self {
        Self { id: None, name: name.into(), maker: maker.into(), price, image: image.into() }
    }

    /// Unsaved item that is rejected up front if any field is invalid.
    pub fn try_new(
        kind: CatalogKind,
        name: impl Into<String>,
        maker: impl Into<String>,
        price: i32,
        image: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        let item = Self::of(name, maker, price, image);
        validation::validate(kind, &item)?;
        Ok(item)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn columns(&self) -> CatalogColumns<'_> {
        CatalogColumns { name: &self.name, maker: &self.maker, price: self.price, image: &self.image }
    }

    /// Copy every mutable field from `changes`; `id` stays as it is.
    pub(crate) fn replace_fields(&mut self, changes: &Item) {
        self.name.clone_from(&changes.name);
        self.maker.clone_from(&changes.maker);
        self.price = changes.price;
        self.image.clone_from(&changes.image);
    }
}

impl From<CatalogRow> for Item {
    fn from(row: CatalogRow) -> Self {
        Self { id: Some(row.id), name: row.name, maker: row.maker, price: row.price, image: row.image }
    }
}
