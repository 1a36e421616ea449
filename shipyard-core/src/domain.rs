//! Domain entities for Shipyard.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category of a ship, serialized as a single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ShipType {
    /// Cruise ship (`X`).
    #[serde(rename = "X", alias = "x")]
    Cruise,
    /// Container ship (`C`).
    #[serde(rename = "C", alias = "c")]
    Container,
    /// Military vessel (`M`).
    #[serde(rename = "M", alias = "m")]
    Military,
    /// Ferry (`F`).
    #[serde(rename = "F", alias = "f")]
    Ferry,
    /// Sailboat (`S`).
    #[serde(rename = "S", alias = "s")]
    Sailboat,
}

impl ShipType {
    /// Every ship type in declaration order.
    pub const ALL: [ShipType; 5] = [
        ShipType::Cruise,
        ShipType::Container,
        ShipType::Military,
        ShipType::Ferry,
        ShipType::Sailboat,
    ];

    /// Wire code of the type.
    pub fn code(self) -> &'static str {
        match self {
            Self::Cruise => "X",
            Self::Container => "C",
            Self::Military => "M",
            Self::Ferry => "F",
            Self::Sailboat => "S",
        }
    }

    /// Parse a wire code, ignoring ASCII case. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|typ| typ.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Home port of a ship.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Port {
    /// Port identifier, unused by the registry itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Port name.
    pub name: String,
    /// Country the port is located in.
    pub country: String,
}

impl Port {
    /// Create a port without an identifier.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: country.into(),
        }
    }
}

impl PartialEq for Port {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Member of a ship's crew.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    /// Crew member identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// First name.
    pub first_name: String,
    /// Last name, possibly blank.
    pub last_name: String,
    /// Role on board, e.g. captain or navigator.
    pub role: String,
}

impl Crew {
    /// Create a crew member without an identifier.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: role.into(),
        }
    }
}

impl PartialEq for Crew {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Ship record, the aggregate root of the registry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Identifier assigned by the store on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Ship name, unique within the store.
    pub name: String,
    /// Date the ship was built.
    pub build_year: NaiveDate,
    /// Passenger or cargo capacity.
    pub capacity: u32,
    /// Ship type code.
    pub typ: ShipType,
    /// Home port.
    pub home_port: Port,
    /// Crew members in roster order.
    #[serde(default)]
    pub crew: Vec<Crew>,
}

impl Ship {
    /// Create an unsaved ship without crew.
    pub fn new(
        name: impl Into<String>,
        build_year: NaiveDate,
        capacity: u32,
        typ: ShipType,
        home_port: Port,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            build_year,
            capacity,
            typ,
            home_port,
            crew: Vec::new(),
        }
    }

    /// Attach an identifier.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the crew roster.
    pub fn with_crew(mut self, crew: Vec<Crew>) -> Self {
        self.crew = crew;
        self
    }
}

impl PartialEq for Ship {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
