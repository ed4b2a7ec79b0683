use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::{Modify, OpenApi, ToSchema};

use crate::routes::{CAT_TOYS_PATH, PRODUCTS_PATH};

const CATALOG_TEMPLATE: &str = "/{catalog}";

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Response shape of a catalog item.
#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: i64,
    pub name: String,
    pub maker: String,
    pub price: i32,
    pub image: String,
}

#[derive(ToSchema)]
pub struct FieldViolationDoc { pub field: String, pub reason: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
    pub code: Option<u16>,
    pub violations: Vec<FieldViolationDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::catalog::list,
        crate::routes::catalog::get_one,
        crate::routes::catalog::create,
        crate::routes::catalog::update,
        crate::routes::catalog::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            FieldViolationDoc,
            ErrorDoc,
            crate::routes::catalog::ItemInput,
        )
    ),
    modifiers(&CatalogMounts),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "cat_toys")
    )
)]
pub struct ApiDoc;

/// Replaces the `/{catalog}` handler templates with one copy per mounted
/// catalog, so generated clients only see routes the router serves.
struct CatalogMounts;

impl Modify for CatalogMounts {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        let paths = &mut openapi.paths.paths;
        let templates: Vec<String> = paths.keys().filter(|p| p.starts_with(CATALOG_TEMPLATE)).cloned().collect();
        for template in templates {
            let Some(item) = paths.remove(&template) else { continue };
            for (prefix, tag) in [(PRODUCTS_PATH, "products"), (CAT_TOYS_PATH, "cat_toys")] {
                let mut mounted = item.clone();
                for op in mounted.operations.values_mut() {
                    if let Some(params) = op.parameters.as_mut() {
                        params.retain(|p| p.name != "catalog");
                    }
                    op.operation_id = op.operation_id.take().map(|id| format!("{tag}_{id}"));
                    op.tags = Some(vec![tag.to_string()]);
                }
                paths.insert(template.replacen(CATALOG_TEMPLATE, prefix, 1), mounted);
            }
        }
    }
}
