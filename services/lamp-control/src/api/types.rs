//! HTTP API request/response types.
//!
//! # Purpose
//! Defines shared payload shapes for the lamp REST API and OpenAPI schema
//! generation.
use crate::model::Lamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform error body: a single SCREAMING_SNAKE_CASE code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct LampCreateRequest {
    pub status: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct LampUpdateRequest {
    pub status: bool,
}

/// One page of lamps.
///
/// `next_cursor` is an opaque token for the next page; `null` means the listing
/// is exhausted and `has_more` is `false`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LampListResponse {
    pub data: Vec<Lamp>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub api_version: String,
    pub backend: String,
    pub durable_storage: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}
