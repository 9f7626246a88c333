// handlers.rs

use crate::{
    docs::ApiDoc,
    error::AppError,
    models::{AppState, ErrorBody, Lamp},
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::Redirect,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/docs/") }))
        .route("/health", get(health))
        .route("/lamps", get(list_lamps).post(create_lamp))
        .route(
            "/lamp/{id}",
            get(get_lamp).put(update_lamp).delete(delete_lamp),
        )
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[utoipa::path(
    get,
    path = "/lamps",
    responses(
        (status = 200, description = "All lamps", body = [Lamp]),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn list_lamps(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Lamp>>, AppError> {
    Ok(Json(state.lamps.list().await?))
}

#[utoipa::path(
    get,
    path = "/lamp/{id}",
    params(("id" = String, Path, description = "Lamp id")),
    responses(
        (status = 200, description = "The lamp", body = Lamp),
        (status = 400, description = "Lamp not found", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn get_lamp(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Lamp>, AppError> {
    Ok(Json(state.lamps.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/lamps",
    request_body = Lamp,
    responses(
        (status = 200, description = "Lamp created", body = Lamp),
        (status = 400, description = "Malformed or invalid record", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn create_lamp(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Lamp>, JsonRejection>,
) -> Result<Json<Lamp>, AppError> {
    let Json(lamp) = payload?;
    Ok(Json(state.lamps.create(lamp).await?))
}

#[utoipa::path(
    put,
    path = "/lamp/{id}",
    params(("id" = String, Path, description = "Lamp id, overrides any id in the body")),
    request_body = Lamp,
    responses(
        (status = 200, description = "Persisted lamp", body = Lamp),
        (status = 400, description = "Malformed record or lamp not found", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn update_lamp(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Lamp>, JsonRejection>,
) -> Result<Json<Lamp>, AppError> {
    let Json(lamp) = payload?;
    Ok(Json(state.lamps.update(&id, lamp).await?))
}

#[utoipa::path(
    delete,
    path = "/lamp/{id}",
    params(("id" = String, Path, description = "Lamp id")),
    responses(
        (status = 200, description = "Lamp removed, or was already absent"),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn delete_lamp(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    state.lamps.delete(&id).await?;
    Ok(Json(json!({})))
}
