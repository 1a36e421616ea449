//! Server configuration loaded from the environment.

use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UI_ORIGINS: &str = "http://127.0.0.1:4200,http://localhost:4200";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// Whether to start with the sample fleet.
    pub seed: bool,
}

impl ServerConfig {
    /// Build the configuration from process environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("SHIPYARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SHIPYARD_PORT") {
            Some(raw) => u16::from_str(raw.trim())
                .map_err(|_| format!("SHIPYARD_PORT must be a u16 number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };
        let origins = lookup("SHIPYARD_UI_ORIGINS").unwrap_or_else(|| DEFAULT_UI_ORIGINS.to_string());
        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let seed = match lookup("SHIPYARD_SEED") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| format!("SHIPYARD_SEED must be true or false, got '{raw}'"))?,
            None => true,
        };
        Ok(Self {
            host,
            port,
            allowed_origins,
            seed,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
