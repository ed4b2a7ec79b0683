//! Handlers shared by every catalog. The router is nested once per catalog,
//! each copy carrying its own service as state.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use service::{
    catalog::{DynCatalogService, Item},
    pagination::Pagination,
};
use tracing::info;

use crate::errors::JsonApiError;

type CatalogState = Arc<DynCatalogService>;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    /// `None` when neither parameter was given, meaning "list everything".
    fn pagination(&self) -> Option<Pagination> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let defaults = Pagination::default();
        Some(Pagination {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        })
    }
}

/// Create/update payload. `image` also accepts `imageUrl`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ItemInput {
    pub name: String,
    pub maker: String,
    pub price: i32,
    #[serde(alias = "imageUrl")]
    pub image: String,
}

impl From<ItemInput> for Item {
    fn from(input: ItemInput) -> Self {
        Item::of(input.name, input.maker, input.price, input.image)
    }
}

pub fn router(svc: CatalogState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).patch(update).delete(delete))
        .with_state(svc)
}

#[utoipa::path(
    get, path = "/{catalog}",
    params(("catalog" = String, Path, description = "Catalog mount point"), ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ItemDoc]),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn list(State(svc): State<CatalogState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Item>>, JsonApiError> {
    let items = match q.pagination() {
        Some(page) => svc.find_page(page).await?,
        None => svc.find_all().await?,
    };
    info!(kind = %svc.kind(), count = items.len(), "list catalog items");
    Ok(Json(items))
}

#[utoipa::path(
    get, path = "/{catalog}/{id}",
    params(("catalog" = String, Path, description = "Catalog mount point"), ("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(svc): State<CatalogState>, Path(id): Path<i64>) -> Result<Json<Item>, JsonApiError> {
    Ok(Json(svc.find_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/{catalog}",
    params(("catalog" = String, Path, description = "Catalog mount point")),
    request_body = ItemInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(svc): State<CatalogState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    let Json(input) = payload?;
    info!(kind = %svc.kind(), name = %input.name, maker = %input.maker, price = input.price, "catalog_create_request");
    let saved = svc.save(input.into()).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Serves both PUT and PATCH; either way every field is replaced.
#[utoipa::path(
    put, path = "/{catalog}/{id}",
    params(("catalog" = String, Path, description = "Catalog mount point"), ("id" = i64, Path, description = "Item ID")),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(svc): State<CatalogState>,
    Path(id): Path<i64>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<Item>, JsonApiError> {
    let Json(input) = payload?;
    Ok(Json(svc.update(id, input.into()).await?))
}

#[utoipa::path(
    delete, path = "/{catalog}/{id}",
    params(("catalog" = String, Path, description = "Catalog mount point"), ("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Deleted, or already absent"),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn delete(State(svc): State<CatalogState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    svc.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
