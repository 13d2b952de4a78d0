use axum::{
    extract::rejection::FormRejection,
    middleware,
    routing::get,
    Form, Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

use common::types::Health;

use crate::state::ServerState;
use crate::{metrics, openapi};

pub mod businesses;
mod ids;
pub mod reviews;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// A body that is not a form decodes as an empty form, so absent fields are
/// reported by validation after the id lookup has run.
pub(crate) fn form_or_empty<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(inner)) => inner,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "request body is not a form; treating as empty");
            T::default()
        }
    }
}

/// Resource routes, relative to the API prefix.
fn resource_routes() -> Router<ServerState> {
    Router::new()
        .route("/businesses", get(businesses::list).post(businesses::create))
        .route(
            "/businesses/:id",
            get(businesses::get).put(businesses::update).delete(businesses::delete),
        )
        .route("/businesses/:id/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/businesses/:id/reviews/:review_id",
            get(reviews::get).put(reviews::update).delete(reviews::delete),
        )
}

/// Build the full application router: health, metrics, OpenAPI document and
/// the directory resources nested under `api_prefix` (root when empty).
pub fn build_router(state: ServerState, cors: CorsLayer, api_prefix: &str) -> Router {
    let resources = if api_prefix.is_empty() {
        resource_routes()
    } else {
        Router::new().nest(api_prefix, resource_routes())
    };

    let doc = openapi::document(api_prefix);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .merge(resources)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
