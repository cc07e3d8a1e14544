//! HTTP handlers for the web shell

use crate::agent::TokenUsage;
use crate::service::{GenerateError, GenerateRequest};
use crate::web::{render, AppState};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(crate::web::page::index_page(state.service.settings()))
}

pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub default: String,
    pub credential_configured: bool,
}

pub async fn models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let settings = state.service.settings();
    Json(ModelsResponse {
        models: settings.models.clone(),
        default: settings.default_model().to_string(),
        credential_configured: settings.has_credential(),
    })
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub markdown: String,
    pub html: String,
    pub model: String,
    pub execution_id: Uuid,
    pub elapsed_ms: u64,
    pub usage: TokenUsage,
}

pub async fn generate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let result = state.service.generate(&request).await?;
    let markdown = render::strip_markdown_fence(&result.content).to_string();
    let html = render::markdown_to_html(&markdown);

    Ok(Json(GenerateResponse {
        markdown,
        html,
        model: result.model,
        execution_id: result.execution_id,
        elapsed_ms: result.elapsed_ms,
        usage: result.usage,
    }))
}

/// `Json` whose rejections are reported like every other API error
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// An error rendered as `{kind, error}` JSON
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        let (status, kind) = match &err {
            GenerateError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            GenerateError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream"),
            GenerateError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        };

        let message = match &err {
            GenerateError::Upstream(e) => format!("Article generation failed: {}", e),
            other => other.to_string(),
        };

        ApiError { status, kind, message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: rejection.status(),
            kind: "request",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "kind": self.kind, "error": self.message }))).into_response()
    }
}
