use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::agent::input_types::AnalyzeRequest;
use crate::handlers;
use crate::state::AppState;

pub const LIVENESS_MESSAGE: &str = "TheCatcher backend is running!";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/analyze/", post(analyze))
        .route("/analyze", post(analyze))
}

/// Full application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

/// JSON body extractor that also accepts a request with no `Content-Type`.
/// A content type other than JSON is still rejected with 415.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(header::CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(IntoResponse::into_response)?;
        Ok(Self(value))
    }
}

async fn analyze(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AnalyzeRequest>,
) -> Result<Json<Value>, StatusCode> {
    handlers::analyze_message(&state, request)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Upstream LLM call failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
