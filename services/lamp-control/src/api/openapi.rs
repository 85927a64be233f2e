//! OpenAPI schema aggregation for the lamp control API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for
//! docs and client generation.
use crate::api::{
    lamps, system,
    types::{
        ErrorResponse, HealthStatus, LampCreateRequest, LampListResponse, LampUpdateRequest,
        SystemInfo,
    },
};
use crate::model::Lamp;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "lamp-control",
        version = "v1",
        description = "Lamp control HTTP API"
    ),
    paths(
        system::system_info,
        system::health,
        lamps::list_lamps,
        lamps::create_lamp,
        lamps::get_lamp,
        lamps::update_lamp,
        lamps::delete_lamp
    ),
    components(schemas(
        ErrorResponse,
        HealthStatus,
        SystemInfo,
        Lamp,
        LampCreateRequest,
        LampUpdateRequest,
        LampListResponse
    )),
    tags(
        (name = "system", description = "Health and service metadata"),
        (name = "lamps", description = "Lamp management")
    )
)]
pub struct ApiDoc;
