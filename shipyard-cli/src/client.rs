//! HTTP client for the Shipyard server.

use crate::CliResult;
use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;
use serde_json::Value;
use shipyard_core::{SearchParams, Ship};
use uuid::Uuid;

/// Default base URL of the Shipyard server.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
/// API version requested on every call.
pub const API_VERSION: &str = "1.0.0";
const X_VERSION: &str = "x-version";

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Thin wrapper around the ship endpoints.
#[derive(Debug, Clone)]
pub struct ShipClient {
    http: Client,
    api_url: String,
}

impl ShipClient {
    /// Client for the server at `server_url`.
    pub fn new(server_url: &str) -> CliResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::HeaderName::from_static(X_VERSION),
            header::HeaderValue::from_static(API_VERSION),
        );
        let http = Client::builder()
            .user_agent(concat!("shipyard-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            api_url: format!("{}/api", normalize_server_url(server_url)?),
        })
    }

    /// Ships matching `params`; an empty result surfaces as a not-found error.
    pub async fn search(&self, params: &SearchParams) -> CliResult<Vec<Ship>> {
        let query: Vec<(&str, &str)> = params
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value.as_str())))
            .collect();
        let response = self.http.get(&self.api_url).query(&query).send().await?;
        Ok(check_status(response).await?.json::<Vec<Ship>>().await?)
    }

    /// Ship stored under `id`.
    pub async fn get(&self, id: Uuid) -> CliResult<Ship> {
        let response = self
            .http
            .get(format!("{}/{id}", self.api_url))
            .send()
            .await?;
        Ok(check_status(response).await?.json::<Ship>().await?)
    }

    /// Create a ship from a JSON payload and return its Location.
    pub async fn create(&self, payload: &Value) -> CliResult<String> {
        let response = self.http.post(&self.api_url).json(payload).send().await?;
        let response = check_status(response).await?;
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or("server did not return a Location header")?;
        Ok(location.to_string())
    }

    /// Replace the ship stored under `id`.
    pub async fn update(&self, id: Uuid, payload: &Value) -> CliResult<()> {
        let response = self
            .http
            .put(format!("{}/{id}", self.api_url))
            .json(payload)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Delete the ship stored under `id`.
    pub async fn delete(&self, id: Uuid) -> CliResult<()> {
        let response = self
            .http
            .delete(format!("{}/{id}", self.api_url))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Server URL without surrounding whitespace or trailing slashes.
///
/// Only `http` and `https` URLs with a host are accepted.
fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let url = server_url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err("server url is required".into());
    }
    match url.split_once("://") {
        Some((scheme, host))
            if !host.is_empty()
                && (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")) =>
        {
            Ok(url.to_string())
        }
        _ => Err(format!("server url must be an http(s) URL, got '{}'", server_url.trim()).into()),
    }
}

/// Turn error statuses into readable messages, keeping the server's explanation.
async fn check_status(response: Response) -> CliResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    Err(status_message(status, &detail).into())
}

fn status_message(status: StatusCode, detail: &str) -> String {
    let summary = match status {
        StatusCode::NOT_FOUND => "not found",
        StatusCode::CONFLICT => "conflict",
        StatusCode::UNPROCESSABLE_ENTITY => "invalid ship",
        StatusCode::BAD_REQUEST => "bad request",
        _ => return format!("server returned {status}: {detail}"),
    };
    if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}: {detail}")
    }
}
