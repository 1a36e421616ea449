//! Request URI helpers: query-string decoding and Location base URIs.

use actix_web::HttpRequest;
use shipyard_core::SearchParams;

/// Base path of the ship API.
pub const API_PATH: &str = "/api";
/// Prefix assumed behind a reverse proxy that sends no `X-Forwarded-Prefix`.
pub const DEFAULT_FORWARDED_PREFIX: &str = "/ships";

const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";

/// Decode a raw query string into search parameters, keeping repeated keys.
pub fn parse_search_params(query: &str) -> SearchParams {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Base URI of the ship API as seen by the client, honoring proxy headers.
pub fn base_uri(req: &HttpRequest) -> String {
    let info = req.connection_info();
    let prefix = if header(req, X_FORWARDED_HOST).is_some() {
        header(req, X_FORWARDED_PREFIX)
            .unwrap_or(DEFAULT_FORWARDED_PREFIX)
            .trim_end_matches('/')
    } else {
        ""
    };
    let base = format!("{}://{}{prefix}{API_PATH}", info.scheme(), info.host());
    log::debug!("base_uri: {base}");
    base
}
