//! API versioning through the `X-Version` request header.

use std::fmt;

use actix_web::guard::GuardContext;
use actix_web::http::header::HeaderMap;

/// Request header selecting the API version.
pub const X_VERSION: &str = "X-Version";

/// Semantic version of an API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl ApiVersion {
    /// Build a version from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major[.minor[.patch]]`; omitted components are zero.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |part| part.parse().ok())?;
        let patch = parts.next().map_or(Some(0), |part| part.parse().ok())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version served when a request names none.
pub const CURRENT_VERSION: ApiVersion = ApiVersion::new(1, 0, 0);
/// Retired version kept for the deprecation notice.
pub const DEPRECATED_VERSION: ApiVersion = ApiVersion::new(0, 0, 1);
/// Versions a request may ask for.
pub const SUPPORTED_VERSIONS: [ApiVersion; 2] = [DEPRECATED_VERSION, CURRENT_VERSION];

/// Version requested through the headers.
///
/// A missing header selects [`CURRENT_VERSION`]; an unparseable or unsupported
/// value yields the raw header text as the error.
pub fn requested_version(headers: &HeaderMap) -> Result<ApiVersion, String> {
    let Some(value) = headers.get(X_VERSION) else {
        return Ok(CURRENT_VERSION);
    };
    let raw = value.to_str().map_err(|_| String::from("<binary>"))?;
    ApiVersion::parse(raw)
        .filter(|version| SUPPORTED_VERSIONS.contains(version))
        .ok_or_else(|| raw.trim().to_string())
}

/// Guard admitting requests for the current API, baseline `1.0.0` and up.
pub fn current_api(ctx: &GuardContext<'_>) -> bool {
    requested_version(ctx.head().headers()).is_ok_and(|version| version >= CURRENT_VERSION)
}

/// Guard admitting requests pinned to the retired API.
pub fn deprecated_api(ctx: &GuardContext<'_>) -> bool {
    requested_version(ctx.head().headers()) == Ok(DEPRECATED_VERSION)
}
