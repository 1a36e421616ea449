//! Application logic for reading and writing ships.

use log::debug;
use uuid::Uuid;

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};
use crate::query::SearchParams;
use crate::repository::ShipRepository;

/// Ship use cases on top of a repository.
#[derive(Debug, Clone)]
pub struct ShipService<R> {
    repo: R,
}

impl<R: ShipRepository> ShipService<R> {
    /// Create a service over `repo`.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ship stored under `id`, or [`ShipyardError::ShipNotFound`].
    pub fn find_by_id(&self, id: Uuid) -> Result<Ship> {
        self.repo
            .find_by_id(id)?
            .ok_or(ShipyardError::ShipNotFound(id))
    }

    /// Ships matching `params`, or [`ShipyardError::NoMatches`] when none do.
    pub fn find(&self, params: &SearchParams) -> Result<Vec<Ship>> {
        let ships = self.repo.find(params)?;
        if ships.is_empty() {
            debug!("find: no ships for {params:?}");
            return Err(ShipyardError::NoMatches(params.clone()));
        }
        Ok(ships)
    }

    /// Store a new ship.
    pub fn create(&self, ship: Ship) -> Result<Ship> {
        self.repo.create(ship)
    }

    /// Replace the ship stored under `id`.
    pub fn update(&self, ship: Ship, id: Uuid) -> Result<()> {
        self.repo.update(ship, id)
    }

    /// Remove the ship stored under `id`.
    pub fn delete_by_id(&self, id: Uuid) -> Result<()> {
        self.repo.delete_by_id(id)
    }
}
