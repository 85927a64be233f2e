//! Lamp API handlers.
//!
//! # Purpose
//! Implements lamp CRUD and the paginated listing with consistent error
//! mapping for missing records and malformed payloads.
//!
//! # Notes
//! Path ids arrive as strings. An id that is not a UUID can never name a
//! stored lamp, so it maps to the same 404 as an absent one rather than a
//! validation error.
use crate::api::error::{api_internal, api_invalid_argument, api_not_found, ApiError};
use crate::api::pagination::{decode_cursor, finish_page, normalize_page_size};
use crate::api::types::{LampCreateRequest, LampListResponse, LampUpdateRequest};
use crate::app::AppState;
use crate::model::Lamp;
use crate::store::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::collections::HashMap;
use uuid::Uuid;

fn parse_lamp_id(lamp_id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(lamp_id).map_err(|_| api_not_found())
}

#[utoipa::path(
    get,
    path = "/lamps",
    tag = "lamps",
    params(
        ("cursor" = Option<String>, Query, description = "Opaque pagination cursor"),
        ("pageSize" = Option<i64>, Query, description = "Page size, 1 to 100, default 25")
    ),
    responses(
        (status = 200, description = "One page of lamps", body = LampListResponse)
    )
)]
pub(crate) async fn list_lamps(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<LampListResponse>, ApiError> {
    let offset = decode_cursor(params.get("cursor").map(String::as_str));
    let page_size =
        normalize_page_size(params.get("pageSize").and_then(|value| value.parse::<i64>().ok()));

    // One extra row tells us whether a next page exists without a count query.
    let rows = state
        .store
        .list_paginated(offset, page_size + 1)
        .await
        .map_err(|err| api_internal("failed to list lamps", &err))?;
    let (data, next_cursor, has_more) = finish_page(rows, offset, page_size);
    Ok(Json(LampListResponse {
        data,
        next_cursor,
        has_more,
    }))
}

#[utoipa::path(
    post,
    path = "/lamps",
    tag = "lamps",
    request_body = LampCreateRequest,
    responses(
        (status = 201, description = "Lamp created", body = Lamp),
        (status = 400, description = "Malformed request body", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_lamp(
    State(state): State<AppState>,
    body: Result<Json<LampCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|_| api_invalid_argument())?;
    let lamp = state
        .store
        .create(body.status)
        .await
        .map_err(|err| api_internal("failed to create lamp", &err))?;
    Ok((StatusCode::CREATED, Json(lamp)))
}

#[utoipa::path(
    get,
    path = "/lamps/{lamp_id}",
    tag = "lamps",
    params(
        ("lamp_id" = String, Path, description = "Lamp identifier")
    ),
    responses(
        (status = 200, description = "Fetch lamp", body = Lamp),
        (status = 404, description = "Lamp not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_lamp(
    Path(lamp_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Lamp>, ApiError> {
    let id = parse_lamp_id(&lamp_id)?;
    match state.store.get(id).await {
        Ok(lamp) => Ok(Json(lamp)),
        Err(StoreError::NotFound(_)) => Err(api_not_found()),
        Err(err) => Err(api_internal("failed to fetch lamp", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/lamps/{lamp_id}",
    tag = "lamps",
    params(
        ("lamp_id" = String, Path, description = "Lamp identifier")
    ),
    request_body = LampUpdateRequest,
    responses(
        (status = 200, description = "Lamp updated", body = Lamp),
        (status = 400, description = "Malformed request body", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Lamp not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_lamp(
    Path(lamp_id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<LampUpdateRequest>, JsonRejection>,
) -> Result<Json<Lamp>, ApiError> {
    let Json(body) = body.map_err(|_| api_invalid_argument())?;
    let id = parse_lamp_id(&lamp_id)?;
    match state.store.update(id, body.status).await {
        Ok(lamp) => Ok(Json(lamp)),
        Err(StoreError::NotFound(_)) => Err(api_not_found()),
        Err(err) => Err(api_internal("failed to update lamp", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/lamps/{lamp_id}",
    tag = "lamps",
    params(
        ("lamp_id" = String, Path, description = "Lamp identifier")
    ),
    responses(
        (status = 204, description = "Lamp deleted"),
        (status = 404, description = "Lamp not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_lamp(
    Path(lamp_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = parse_lamp_id(&lamp_id)?;
    match state.store.delete(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found()),
        Err(err) => Err(api_internal("failed to delete lamp", &err)),
    }
}
