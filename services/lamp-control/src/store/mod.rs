use crate::model::Lamp;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(err.into())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unexpected(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage abstraction for lamps.
///
/// Both backends expose the same contract:
/// - `NotFound` is the only business error; anything else is `Unexpected`.
/// - Reads never observe soft-deleted rows (Postgres) or removed entries
///   (memory).
/// - Listings are ordered by `(created_at, id)` ascending, a total order even
///   when timestamps collide.
/// - `list_paginated` is a pure window over that order: a non-positive `limit`
///   or an `offset` past the end yields an empty page, never an error.
#[async_trait]
pub trait LampStore: Send + Sync {
    async fn create(&self, status: bool) -> StoreResult<Lamp>;
    async fn get(&self, id: Uuid) -> StoreResult<Lamp>;
    async fn update(&self, id: Uuid, status: bool) -> StoreResult<Lamp>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
    async fn list_all(&self) -> StoreResult<Vec<Lamp>>;
    async fn list_paginated(&self, offset: u64, limit: i64) -> StoreResult<Vec<Lamp>>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
