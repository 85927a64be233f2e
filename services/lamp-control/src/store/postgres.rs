//! Postgres-backed implementation of the lamp store.
//!
//! # What this module is
//! Implements the `LampStore` trait using Postgres (via `sqlx`) as a durable
//! backing store. One `lamps` table holds the authoritative state; there is no
//! secondary bookkeeping.
//!
//! # Soft deletes
//! Rows are never physically removed. `deleted_at IS NULL` marks the active
//! set, and every read and mutation carries that predicate. A soft-deleted row
//! is therefore invisible to `get`/`list*` and a second delete reports
//! not-found, matching the in-memory backend's observable behavior even though
//! the mechanism differs.
//!
//! # Concurrency
//! - The store is shared across async handlers; `sqlx::PgPool` manages
//!   connection concurrency.
//! - Mutations are single conditional statements keyed on
//!   `id = $1 AND deleted_at IS NULL` (`RETURNING` for updates, rows-affected
//!   for deletes). There is no separate existence check, so there is no window
//!   in which a concurrent delete can turn an update into a lost write.
//!
//! # Ordering
//! Listings order by `(created_at, id)` ascending. The migration creates a
//! partial index on exactly that key over active rows, so paginated scans stay
//! cheap as the table grows.
//!
//! # Operational notes
//! - Migrations run at startup via `sqlx::migrate!("./migrations")`; if they
//!   fail the service does not start.
//! - Pool sizing and acquire timeouts are explicit because hanging on a dead
//!   database is worse than failing fast.
//! - Database URLs may contain credentials; they are never logged.
use super::{LampStore, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::Lamp;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Durable lamp store backed by Postgres.
pub struct PostgresLampStore {
    pool: PgPool,
}

/// Row shape for the `lamps` table.
///
/// Kept separate from the domain [`Lamp`] so column names and storage formats
/// stay localized here. The wire/domain field is `status`; the column is
/// `is_on`.
#[derive(Debug, Clone, FromRow)]
struct DbLamp {
    id: Uuid,
    is_on: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DbLamp> for Lamp {
    fn from(row: DbLamp) -> Self {
        Lamp {
            id: row.id,
            status: row.is_on,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ACTIVE_COLUMNS: &str = "id, is_on, created_at, updated_at";

impl PostgresLampStore {
    /// Connect to Postgres and run migrations.
    ///
    /// Fails on connection, pool setup, or migration errors; the caller should
    /// treat any of those as fatal at startup.
    pub async fn connect(pg: &PostgresConfig) -> StoreResult<Self> {
        let connect_options = PgConnectOptions::from_str(&pg.url)?;
        let pool = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options)
            .await?;

        // Migrations run before serving requests so every query below can
        // assume the schema exists.
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    async fn refresh_active_gauge(&self) -> StoreResult<()> {
        let active: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lamps WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;
        metrics::gauge!("lamp_control_lamps_active").set(active as f64);
        Ok(())
    }
}

#[async_trait]
impl LampStore for PostgresLampStore {
    async fn create(&self, status: bool) -> StoreResult<Lamp> {
        let lamp = Lamp::new(status);
        sqlx::query(
            "INSERT INTO lamps (id, is_on, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(lamp.id)
        .bind(lamp.status)
        .bind(lamp.created_at)
        .bind(lamp.updated_at)
        .execute(&self.pool)
        .await?;
        metrics::counter!("lamp_control_lamp_changes_total", "op" => "created").increment(1);
        self.refresh_active_gauge().await?;
        Ok(lamp)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Lamp> {
        let row = sqlx::query_as::<_, DbLamp>(&format!(
            "SELECT {ACTIVE_COLUMNS} FROM lamps WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(row.into()),
            None => Err(StoreError::NotFound("lamp".into())),
        }
    }

    async fn update(&self, id: Uuid, status: bool) -> StoreResult<Lamp> {
        // Single conditional update keyed on the active-row predicate; a lamp
        // deleted between request arrival and execution yields zero rows
        // instead of resurrecting the record.
        let row = sqlx::query_as::<_, DbLamp>(&format!(
            "UPDATE lamps SET is_on = $2, updated_at = $3 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {ACTIVE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => {
                metrics::counter!("lamp_control_lamp_changes_total", "op" => "updated")
                    .increment(1);
                Ok(row.into())
            }
            None => Err(StoreError::NotFound("lamp".into())),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE lamps SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("lamp".into()));
        }
        metrics::counter!("lamp_control_lamp_changes_total", "op" => "deleted").increment(1);
        self.refresh_active_gauge().await?;
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Lamp>> {
        let rows = sqlx::query_as::<_, DbLamp>(&format!(
            "SELECT {ACTIVE_COLUMNS} FROM lamps WHERE deleted_at IS NULL \
             ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Lamp::from).collect())
    }

    async fn list_paginated(&self, offset: u64, limit: i64) -> StoreResult<Vec<Lamp>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, DbLamp>(&format!(
            "SELECT {ACTIVE_COLUMNS} FROM lamps WHERE deleted_at IS NULL \
             ORDER BY created_at, id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Lamp::from).collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
