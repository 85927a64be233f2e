//! Lamp data model module.
//!
//! # Purpose
//! Re-exports the lamp entity shared by the API and store layers.
mod lamp;

pub use lamp::Lamp;
