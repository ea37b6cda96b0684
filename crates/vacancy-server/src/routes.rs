use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vacancy_client::SelectorExtractor;
use vacancy_core::ExtractService;

use crate::auth::require_api_key;
use crate::dto::{ExtractJobRequest, ExtractJobResponse, HealthResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/extract-job", post(extract_job))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/v1/extract-job",
    request_body = ExtractJobRequest,
    responses(
        (status = 200, description = "Extracted job posting", body = ExtractJobResponse),
        (status = 400, description = "Invalid or unextractable URL", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Unexpected failure", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "extract"
)]
pub async fn extract_job(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ExtractJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(url = %body.url, "Processing job extraction request");

    let extractor = SelectorExtractor::with_limits(state.limits.clone());
    let service = ExtractService::new(state.fetcher.clone(), extractor);
    let posting = service.extract(&body.url).await?;

    Ok(axum::Json(ExtractJobResponse::from(posting)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}
