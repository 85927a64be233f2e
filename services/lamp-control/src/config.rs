use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

/// Page size applied when the client sends none (or a non-positive value).
pub const DEFAULT_PAGE_SIZE: i64 = 25;
/// Upper bound enforced at the HTTP boundary; the store itself does not clamp.
pub const MAX_PAGE_SIZE: i64 = 100;

// Service configuration sourced from environment variables, with an optional
// YAML override file for deployments that prefer files over env.
#[derive(Debug, Clone)]
pub struct LampControlConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    pub postgres: Option<PostgresConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
struct LampControlConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<String>,
    postgres: Option<PostgresConfigOverride>,
}

#[derive(Debug, Deserialize)]
struct PostgresConfigOverride {
    url: Option<String>,
    max_connections: Option<u32>,
    acquire_timeout_ms: Option<u64>,
}

pub(crate) fn parse_storage(value: &str) -> Result<StorageBackend> {
    match value {
        "memory" => Ok(StorageBackend::Memory),
        "postgres" => Ok(StorageBackend::Postgres),
        other => bail!("unknown storage backend: {other}"),
    }
}

impl LampControlConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("LAMP_CONTROL_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse LAMP_CONTROL_BIND")?;
        let metrics_bind = std::env::var("LAMP_CONTROL_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9090".to_string())
            .parse()
            .with_context(|| "parse LAMP_CONTROL_METRICS_BIND")?;

        let postgres_url = std::env::var("LAMP_CONTROL_POSTGRES_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok();

        // Explicit selection wins; otherwise the presence of a database URL
        // implies the durable backend, matching how deployments usually flip
        // between local dev and production.
        let storage = match std::env::var("LAMP_CONTROL_STORAGE") {
            Ok(value) => parse_storage(&value)?,
            Err(_) if postgres_url.is_some() => StorageBackend::Postgres,
            Err(_) => StorageBackend::Memory,
        };

        let max_connections = std::env::var("LAMP_CONTROL_PG_MAX_CONNECTIONS")
            .ok()
            .map(|value| value.parse().with_context(|| "parse LAMP_CONTROL_PG_MAX_CONNECTIONS"))
            .transpose()?
            .unwrap_or(5);
        let acquire_timeout_ms = std::env::var("LAMP_CONTROL_PG_ACQUIRE_TIMEOUT_MS")
            .ok()
            .map(|value| {
                value
                    .parse()
                    .with_context(|| "parse LAMP_CONTROL_PG_ACQUIRE_TIMEOUT_MS")
            })
            .transpose()?
            .unwrap_or(5_000);

        let postgres = postgres_url.map(|url| PostgresConfig {
            url,
            max_connections,
            acquire_timeout_ms,
        });

        Ok(Self {
            bind_addr,
            metrics_bind,
            storage,
            postgres,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("LAMP_CONTROL_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read LAMP_CONTROL_CONFIG: {path}"))?;
            let override_cfg: LampControlConfigOverride = serde_yaml::from_str(&contents)
                .with_context(|| "parse lamp control config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.storage {
                config.storage = parse_storage(&value)?;
            }
            if let Some(pg) = override_cfg.postgres {
                let mut current = config.postgres.take().unwrap_or(PostgresConfig {
                    url: String::new(),
                    max_connections: 5,
                    acquire_timeout_ms: 5_000,
                });
                if let Some(url) = pg.url {
                    current.url = url;
                }
                if let Some(value) = pg.max_connections {
                    current.max_connections = value;
                }
                if let Some(value) = pg.acquire_timeout_ms {
                    current.acquire_timeout_ms = value;
                }
                if current.url.is_empty() {
                    bail!("postgres override requires a url");
                }
                config.postgres = Some(current);
            }
        }
        Ok(config)
    }
}
