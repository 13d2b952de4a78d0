use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Form fields for creating or replacing a business.
#[derive(ToSchema)]
pub struct BusinessFormDoc {
    pub name: String,
    pub town: String,
    /// Integer or decimal.
    pub rating: String,
}

/// Form fields for adding or replacing a review.
#[derive(ToSchema)]
pub struct ReviewFormDoc {
    pub username: String,
    pub comment: String,
    /// Integer or decimal.
    pub stars: String,
}

#[derive(ToSchema)]
pub struct ReviewDoc {
    pub id: u64,
    pub username: String,
    pub comment: String,
    pub stars: f64,
}

#[derive(ToSchema)]
pub struct BusinessDoc {
    pub id: u64,
    pub name: String,
    pub town: String,
    pub rating: f64,
    pub reviews: Vec<ReviewDoc>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::businesses::list,
        crate::routes::businesses::get,
        crate::routes::businesses::create,
        crate::routes::businesses::update,
        crate::routes::businesses::delete,
        crate::routes::reviews::list,
        crate::routes::reviews::get,
        crate::routes::reviews::create,
        crate::routes::reviews::update,
        crate::routes::reviews::delete,
    ),
    components(
        schemas(
            HealthResponse,
            BusinessFormDoc,
            ReviewFormDoc,
            BusinessDoc,
            ReviewDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "businesses"),
        (name = "reviews")
    )
)]
pub struct ApiDoc;

/// The document with resource paths mounted under `api_prefix`, matching
/// where the router nests them.
pub fn document(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !api_prefix.is_empty() {
        doc.paths.paths = std::mem::take(&mut doc.paths.paths)
            .into_iter()
            .map(|(path, item)| {
                if path.starts_with("/businesses") {
                    (format!("{api_prefix}{path}"), item)
                } else {
                    (path, item)
                }
            })
            .collect();
    }
    doc
}
