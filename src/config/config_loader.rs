use anyhow::{Context, Result};
use std::str::FromStr;

use crate::config::stage::Stage;

use super::config_model::{Auth, Database, DotEnvyConfig, PlanCache, Server};

const DEFAULT_PLAN_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_PLAN_CACHE_MAX_CAPACITY: u64 = 10_000;
const DEFAULT_PLAN_POLL_INTERVAL_SECONDS: u64 = 60;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: required("SERVER_PORT")?
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
    };

    let auth = Auth {
        jwt_secret: required("JWT_SECRET")?,
    };

    let plan_cache = PlanCache {
        ttl_seconds: optional("PLAN_CACHE_TTL_SECONDS", DEFAULT_PLAN_CACHE_TTL_SECONDS)?,
        max_capacity: optional("PLAN_CACHE_MAX_CAPACITY", DEFAULT_PLAN_CACHE_MAX_CAPACITY)?,
        poll_interval_seconds: optional(
            "PLAN_POLL_INTERVAL_SECONDS",
            DEFAULT_PLAN_POLL_INTERVAL_SECONDS,
        )?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        auth,
        plan_cache,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{} is invalid", key))
}

fn optional<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is invalid", key)),
        _ => Ok(default),
    }
}
