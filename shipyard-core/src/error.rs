//! Error types for Shipyard core.

use std::{error::Error, fmt};

use uuid::Uuid;

use crate::query::SearchParams;

/// Error type for Shipyard registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipyardError {
    /// No ship is stored under the identifier.
    ShipNotFound(Uuid),
    /// A search produced no ships.
    NoMatches(SearchParams),
    /// Another ship already carries a matching name.
    NameConflict {
        /// The rejected name.
        name: String,
    },
    /// The record store cannot be accessed.
    StoreUnavailable(String),
}

impl ShipyardError {
    /// Whether the error signals a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ShipNotFound(_) | Self::NoMatches(_))
    }
}

impl fmt::Display for ShipyardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShipNotFound(id) => write!(f, "no ship found with id {id}"),
            Self::NoMatches(params) if params.is_empty() => write!(f, "no ships found"),
            Self::NoMatches(params) => write!(f, "no ships found for {params:?}"),
            Self::NameConflict { name } => {
                write!(f, "a ship named '{name}' already exists")
            }
            Self::StoreUnavailable(message) => write!(f, "ship store unavailable: {message}"),
        }
    }
}

impl Error for ShipyardError {}

/// Convenience result type for Shipyard core.
pub type Result<T> = std::result::Result<T, ShipyardError>;
