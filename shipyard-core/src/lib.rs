#![deny(missing_docs)]
//! Shipyard core library.
//!
//! This crate contains the ship domain model, the in-memory record store,
//! search filtering, and the write-path invariants behind the Shipyard service.

pub mod domain;
pub mod error;
pub mod guard;
pub mod query;
pub mod repository;
pub mod service;
pub mod store;

pub use domain::{Crew, Port, Ship, ShipType};
pub use error::{Result, ShipyardError};
pub use query::{NAME_PARAM, SearchFilter, SearchParams, TYPE_PARAM};
pub use repository::{InMemoryShipRepository, ShipRepository};
pub use service::ShipService;
pub use store::{RecordStore, sample_fleet};
