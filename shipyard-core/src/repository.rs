//! Repository facade over the ship record store.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use uuid::Uuid;

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};
use crate::guard;
use crate::query::{self, SearchParams};
use crate::store::RecordStore;

/// Data access for ship records.
#[cfg_attr(test, mockall::automock)]
pub trait ShipRepository: Send + Sync {
    /// Ship stored under `id`, if any.
    fn find_by_id(&self, id: Uuid) -> Result<Option<Ship>>;
    /// Ships matching the search parameters, possibly none.
    fn find(&self, params: &SearchParams) -> Result<Vec<Ship>>;
    /// Store a new ship and return it with its assigned identifier.
    fn create(&self, ship: Ship) -> Result<Ship>;
    /// Replace the ship stored under `id`.
    fn update(&self, ship: Ship, id: Uuid) -> Result<()>;
    /// Remove the ship stored under `id`; absent ids are ignored.
    fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

/// Thread-safe in-memory repository. Clones share the same store.
///
/// Writes hold the exclusive lock across the whole check-then-act sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShipRepository {
    store: Arc<RwLock<RecordStore>>,
}

impl InMemoryShipRepository {
    /// Wrap an existing record store.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Repository backed by the sample fleet.
    pub fn seeded() -> Self {
        Self::new(RecordStore::seeded())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RecordStore>> {
        self.store
            .read()
            .map_err(|_| ShipyardError::StoreUnavailable("failed to acquire read lock".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RecordStore>> {
        self.store
            .write()
            .map_err(|_| ShipyardError::StoreUnavailable("failed to acquire write lock".into()))
    }
}

impl ShipRepository for InMemoryShipRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Ship>> {
        debug!("find_by_id: id={id}");
        let result = query::find_by_id(self.read()?.all_records(), id);
        debug!("find_by_id: found={}", result.is_some());
        Ok(result)
    }

    fn find(&self, params: &SearchParams) -> Result<Vec<Ship>> {
        debug!("find: params={params:?}");
        let ships = query::find(self.read()?.all_records(), params);
        debug!("find: {} ship(s)", ships.len());
        Ok(ships)
    }

    fn create(&self, ship: Ship) -> Result<Ship> {
        debug!("create: name={}", ship.name);
        let mut store = self.write()?;
        let created = guard::create(&mut store, ship)?;
        debug!("create: id={:?}", created.id);
        Ok(created)
    }

    fn update(&self, ship: Ship, id: Uuid) -> Result<()> {
        debug!("update: id={id}, name={}", ship.name);
        let mut store = self.write()?;
        guard::update(&mut store, ship, id)
    }

    fn delete_by_id(&self, id: Uuid) -> Result<()> {
        debug!("delete_by_id: id={id}");
        let mut store = self.write()?;
        guard::delete(&mut store, id);
        debug!("delete_by_id: {} ship(s) left", store.len());
        Ok(())
    }
}
