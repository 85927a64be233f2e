//! In-memory implementation of the lamp store.
//!
//! # Purpose
//! This store implements the `LampStore` trait entirely in memory using a
//! `HashMap` guarded by `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//! - as a fallback when Postgres is not configured
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: mutations take the write lock, reads take
//!   the read lock, so a reader never observes a partially-applied create or a
//!   deleted lamp that still looks alive.
//! - **Hard deletes**: unlike the Postgres backend there is no `deleted_at`
//!   marker; delete removes the entry outright. The observable contract is the
//!   same (a deleted lamp is gone from every read and a second delete fails).
//!
//! # Ordering
//! The map itself is unordered; listings sort on read by `(created_at, id)`.
//! Sorting per read is acceptable at the collection sizes this backend serves.
use super::{LampStore, StoreError, StoreResult};
use crate::model::Lamp;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory lamp store.
///
/// The map is wrapped in `Arc<RwLock<...>>` so the store can be cloned and
/// shared across async request handlers while writes stay serialized.
#[derive(Clone, Default)]
pub struct InMemoryLampStore {
    lamps: Arc<RwLock<HashMap<Uuid, Lamp>>>,
}

impl InMemoryLampStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted_active(&self) -> Vec<Lamp> {
        let mut items: Vec<Lamp> = self.lamps.read().await.values().cloned().collect();
        items.sort_by_key(Lamp::sort_key);
        items
    }
}

#[async_trait]
impl LampStore for InMemoryLampStore {
    async fn create(&self, status: bool) -> StoreResult<Lamp> {
        let lamp = Lamp::new(status);
        let mut lamps = self.lamps.write().await;
        lamps.insert(lamp.id, lamp.clone());
        metrics::counter!("lamp_control_lamp_changes_total", "op" => "created").increment(1);
        metrics::gauge!("lamp_control_lamps_active").set(lamps.len() as f64);
        Ok(lamp)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Lamp> {
        self.lamps
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("lamp".into()))
    }

    async fn update(&self, id: Uuid, status: bool) -> StoreResult<Lamp> {
        let mut lamps = self.lamps.write().await;
        let lamp = lamps
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("lamp".into()))?;
        // created_at is preserved; only status and updated_at move.
        lamp.status = status;
        lamp.updated_at = Utc::now();
        metrics::counter!("lamp_control_lamp_changes_total", "op" => "updated").increment(1);
        Ok(lamp.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut lamps = self.lamps.write().await;
        if lamps.remove(&id).is_none() {
            return Err(StoreError::NotFound("lamp".into()));
        }
        metrics::counter!("lamp_control_lamp_changes_total", "op" => "deleted").increment(1);
        metrics::gauge!("lamp_control_lamps_active").set(lamps.len() as f64);
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Lamp>> {
        Ok(self.sorted_active().await)
    }

    async fn list_paginated(&self, offset: u64, limit: i64) -> StoreResult<Vec<Lamp>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let items = self.sorted_active().await;
        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
