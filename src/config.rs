use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "todos.sqlite";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5900";
const DEFAULT_API_URL: &str = "localhost:5900";
const DEFAULT_WORKERS: usize = 1;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Settings for running the api server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_address: String,
    pub workers: usize,
    pub pool_size: u32,
}

impl ServerConfig {
    /// Read the config from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, missing keys get defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| String::from(DEFAULT_DATABASE_URL)),
            bind_address: lookup("API_URL").unwrap_or_else(|| String::from(DEFAULT_BIND_ADDRESS)),
            workers: parse_or(&lookup, "WORKERS", DEFAULT_WORKERS),
            pool_size: parse_or(&lookup, "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE),
        }
    }
}

/// Settings for talking to a running api server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port` of the api server
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup("API_URL").unwrap_or_else(|| String::from(DEFAULT_API_URL)),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid value {:?} for {}, using {}", raw, key, default);
            default
        }),
        None => default,
    }
}
