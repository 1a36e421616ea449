//! Request payloads and their validation.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shipyard_core::{Crew, Port, Ship, ShipType};
use utoipa::ToSchema;

/// Allowed ship names: capitalized word, optionally hyphenated with a second one.
pub const NAME_PATTERN: &str = "^[A-ZÄÖÜ][a-zäöüß]+(-[A-ZÄÖÜ][a-zäöüß]+)?$";
/// Maximum ship name length in characters.
pub const NAME_MAX_LENGTH: usize = 40;
/// Smallest accepted capacity.
pub const MIN_CAPACITY: u32 = 1;
/// Largest accepted capacity.
pub const MAX_CAPACITY: u32 = 10_000;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("ship name pattern compiles"));

/// Home port payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PortDto {
    /// Port name.
    pub name: String,
    /// Country of the port.
    pub country: String,
}

/// Crew member payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrewDto {
    /// First name.
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Role on board.
    pub role: String,
}

/// Payload for creating or replacing a ship.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDto {
    /// Ship name.
    pub name: String,
    /// Build date, must lie in the past.
    pub build_year: NaiveDate,
    /// Capacity between 1 and 10000.
    pub capacity: i64,
    /// Ship type code; unknown or missing codes are reported as violations.
    #[schema(value_type = Option<ShipType>)]
    pub typ: Option<String>,
    /// Home port.
    pub home_port: Option<PortDto>,
    /// Crew members.
    #[serde(default)]
    pub crew: Option<Vec<CrewDto>>,
}

impl ShipDto {
    /// Validate the payload and convert it into an unsaved ship.
    ///
    /// Any identifier in the payload is ignored; the registry assigns or pins it.
    pub fn into_ship(self, today: NaiveDate) -> Result<Ship, Vec<String>> {
        let mut violations = Vec::new();

        if !NAME_REGEX.is_match(&self.name) {
            violations.push(format!("name '{}' does not match {NAME_PATTERN}", self.name));
        }
        if self.name.chars().count() > NAME_MAX_LENGTH {
            violations.push(format!(
                "name must be at most {NAME_MAX_LENGTH} characters"
            ));
        }
        if self.build_year >= today {
            violations.push("buildYear must be in the past".to_string());
        }
        let capacity = match u32::try_from(self.capacity) {
            Ok(capacity) if (MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) => Some(capacity),
            _ => {
                violations.push(format!(
                    "capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"
                ));
                None
            }
        };
        let typ = match self.typ.as_deref() {
            Some(code) => {
                let typ = ShipType::from_code(code);
                if typ.is_none() {
                    violations.push(format!("typ '{code}' is not one of X, C, M, F, S"));
                }
                typ
            }
            None => {
                violations.push("typ is required".to_string());
                None
            }
        };
        if self.home_port.is_none() {
            violations.push("homePort is required".to_string());
        }

        match (capacity, typ, self.home_port) {
            (Some(capacity), Some(typ), Some(port)) if violations.is_empty() => {
                let crew = self
                    .crew
                    .unwrap_or_default()
                    .into_iter()
                    .map(|member| Crew::new(member.first_name, member.last_name, member.role))
                    .collect();
                Ok(Ship::new(
                    self.name,
                    self.build_year,
                    capacity,
                    typ,
                    Port::new(port.name, port.country),
                )
                .with_crew(crew))
            }
            _ => Err(violations),
        }
    }
}
