use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogColumns, CatalogRow, CatalogTable};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub maker: String,
    pub price: i32,
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation { fn def(&self) -> RelationDef { panic!("no relations") } }

impl ActiveModelBehavior for ActiveModel {}

impl CatalogTable for Entity {
    fn id_column() -> Column { Column::Id }

    fn to_row(model: Model) -> CatalogRow {
        CatalogRow { id: model.id, name: model.name, maker: model.maker, price: model.price, image: model.image_url }
    }

    fn new_active(cols: CatalogColumns<'_>) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(cols.name.to_string()),
            maker: Set(cols.maker.to_string()),
            price: Set(cols.price),
            image_url: Set(cols.image.to_string()),
        }
    }

    fn assign(active: &mut ActiveModel, cols: CatalogColumns<'_>) {
        active.name = Set(cols.name.to_string());
        active.maker = Set(cols.maker.to_string());
        active.price = Set(cols.price);
        active.image_url = Set(cols.image.to_string());
    }
}
