//! Volatile record store holding ship records in insertion order.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Crew, Port, Ship, ShipType};

/// Ordered in-memory collection of ships.
///
/// The store performs no synchronization; the repository serializes access.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    ships: Vec<Ship>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given ships in order.
    pub fn with_records(ships: Vec<Ship>) -> Self {
        Self { ships }
    }

    /// Create a store populated with the sample fleet.
    pub fn seeded() -> Self {
        Self::with_records(sample_fleet())
    }

    /// All stored ships in insertion order.
    pub fn all_records(&self) -> &[Ship] {
        &self.ships
    }

    /// Append a ship at the end of the store.
    pub fn append_record(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    /// Replace the ship at `index`, returning the previous record.
    ///
    /// Returns `None` and leaves the store untouched when `index` is out of range.
    pub fn replace_at(&mut self, index: usize, ship: Ship) -> Option<Ship> {
        let slot = self.ships.get_mut(index)?;
        Some(std::mem::replace(slot, ship))
    }

    /// Remove the ship at `index`, shifting later records down.
    pub fn remove_at(&mut self, index: usize) -> Option<Ship> {
        (index < self.ships.len()).then(|| self.ships.remove(index))
    }

    /// Position of the first ship stored under `id`.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.ships.iter().position(|ship| ship.id == Some(id))
    }

    /// Number of stored ships.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether the store holds no ships.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

fn seed_id(suffix: u128) -> Uuid {
    Uuid::from_u128(suffix)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Sample ships loaded at startup, one or more per ship type.
pub fn sample_fleet() -> Vec<Ship> {
    vec![
        Ship::new(
            "Titanic",
            date(1912, 4, 2),
            3300,
            ShipType::Cruise,
            Port::new("Southampton", "England"),
        )
        .with_id(seed_id(0x10))
        .with_crew(vec![
            Crew::new("Edward John", "Smith", "Captain"),
            Crew::new("Thomas", "Andrews Jr.", "Engineer"),
        ]),
        Ship::new(
            "Test-Ship",
            date(2010, 8, 15),
            1200,
            ShipType::Ferry,
            Port::new("Istanbul", "Turkey"),
        )
        .with_id(seed_id(0x01))
        .with_crew(vec![
            Crew::new("Mustafa", "", "Machinist"),
            Crew::new("Kemal", "", "Navigator"),
        ]),
        Ship::new(
            "Queen-Mary",
            date(1936, 5, 27),
            2800,
            ShipType::Cruise,
            Port::new("Liverpool", "England"),
        )
        .with_id(seed_id(0x02))
        .with_crew(vec![
            Crew::new("Anne", "Smith", "Captain"),
            Crew::new("James", "Brown", "First Officer"),
        ]),
        Ship::new(
            "Ever-Given",
            date(2018, 5, 25),
            20_000,
            ShipType::Container,
            Port::new("Shanghai", "China"),
        )
        .with_id(seed_id(0x03))
        .with_crew(vec![
            Crew::new("Li", "Wei", "Captain"),
            Crew::new("Zhang", "Wei", "Navigator"),
        ]),
        Ship::new(
            "Bismarck",
            date(1939, 2, 14),
            2200,
            ShipType::Military,
            Port::new("Hamburg", "Germany"),
        )
        .with_id(seed_id(0x04))
        .with_crew(vec![
            Crew::new("Hannah", "Lindemann", "Captain"),
            Crew::new("Hans", "Oels", "First Officer"),
        ]),
        Ship::new(
            "Black-Pearl",
            date(1700, 1, 1),
            100,
            ShipType::Sailboat,
            Port::new("Tortuga", "Caribbean"),
        )
        .with_id(seed_id(0x05))
        .with_crew(vec![
            Crew::new("Jack", "Sparrow", "Captain"),
            Crew::new("Hector", "Barbossa", "First Officer"),
        ]),
    ]
}
