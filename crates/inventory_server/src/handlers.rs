//! Item endpoint handlers.
//!
//! Each handler decodes its request, runs exactly one service call on a
//! request-scoped connection, and maps the outcome to a response.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use inventory_core::{Item, ItemId, ItemInput};
use serde::Deserialize;
use serde_json::json;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Query parameters for `GET /items/`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for `GET /search/`; `name` is required.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> ApiResult<Item> {
    let Json(input) = payload.map_err(body_rejection)?;
    let item = state
        .with_service(move |service| service.create_item(input))
        .await?;
    Ok(Json(item))
}

pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Item>> {
    let Query(params) = params.map_err(query_rejection)?;
    let items = state
        .with_service(move |service| service.list_items(params.skip, params.limit))
        .await?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Item> {
    let Path(id) = id.map_err(path_rejection)?;
    let item = state
        .with_service(move |service| service.get_item(id))
        .await?;
    Ok(Json(item))
}

pub async fn search_items(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<Item>> {
    let Query(params) = params.map_err(query_rejection)?;
    let items = state
        .with_service(move |service| service.search_items(&params.name))
        .await?;
    Ok(Json(items))
}

pub async fn update_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> ApiResult<Item> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(input) = payload.map_err(body_rejection)?;
    let item = state
        .with_service(move |service| service.update_item(id, input))
        .await?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Item> {
    let Path(id) = id.map_err(path_rejection)?;
    let item = state
        .with_service(move |service| service.delete_item(id))
        .await?;
    Ok(Json(item))
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(format!("invalid item body: {}", rejection.body_text()))
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::Validation(format!("invalid query: {}", rejection.body_text()))
}

fn path_rejection(rejection: PathRejection) -> ApiError {
    ApiError::Validation(format!("invalid item id: {}", rejection.body_text()))
}
