//! Lamp entity definition.
//!
//! # Purpose
//! Defines the lamp record stored by both backends and returned by the HTTP API.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single lamp.
///
/// `id` is assigned at creation and immutable. `status` is the only mutable
/// business field. `created_at` never changes after creation; `updated_at` is
/// refreshed on every successful status mutation, so `created_at <= updated_at`
/// holds for every stored lamp.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lamp {
    pub id: Uuid,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lamp {
    /// Build a fresh lamp with a random id and both timestamps set to now.
    pub fn new(status: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ordering key for deterministic listings.
    ///
    /// `created_at` alone is not a total order (same-instant creation is
    /// possible); the unique id breaks ties.
    pub fn sort_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.created_at, self.id)
    }
}
