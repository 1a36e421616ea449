//! Write-path invariants: name uniqueness and existence before mutation.
//!
//! Each function runs its checks to completion before touching the store.
//! Callers hold exclusive access to the store for the whole call.

use log::debug;
use uuid::Uuid;

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};
use crate::query::{SearchParams, find};
use crate::store::RecordStore;

/// Ships whose name contains `name`, found through the search name path.
fn name_matches(store: &RecordStore, name: &str) -> Vec<Ship> {
    find(store.all_records(), &SearchParams::name_only(name))
}

/// Store `ship` under a fresh identifier unless its name collides.
pub fn create(store: &mut RecordStore, mut ship: Ship) -> Result<Ship> {
    if !name_matches(store, &ship.name).is_empty() {
        debug!("create: name conflict for {}", ship.name);
        return Err(ShipyardError::NameConflict { name: ship.name });
    }
    ship.id = Some(Uuid::new_v4());
    store.append_record(ship.clone());
    Ok(ship)
}

/// Replace the ship stored under `id`, pinning the replacement to `id`.
pub fn update(store: &mut RecordStore, mut ship: Ship, id: Uuid) -> Result<()> {
    let Some(index) = store.position_of(id) else {
        return Err(ShipyardError::ShipNotFound(id));
    };
    let conflict = name_matches(store, &ship.name)
        .into_iter()
        .any(|existing| existing.id != Some(id));
    if conflict {
        debug!("update: name conflict for {} (id={id})", ship.name);
        return Err(ShipyardError::NameConflict { name: ship.name });
    }
    ship.id = Some(id);
    store.replace_at(index, ship);
    Ok(())
}

/// Remove the ship stored under `id`. Absent ids are ignored.
pub fn delete(store: &mut RecordStore, id: Uuid) {
    if let Some(index) = store.position_of(id) {
        store.remove_at(index);
    }
}
