//! Search parameter resolution and filtering over stored ships.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use uuid::Uuid;

use crate::domain::{Ship, ShipType};

/// Query key selecting ships by name substring.
pub const NAME_PARAM: &str = "name";
/// Query key selecting ships by type code.
pub const TYPE_PARAM: &str = "typ";

/// Multi-valued search parameters keyed by parameter name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SearchParams(BTreeMap<String, Vec<String>>);

impl SearchParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters holding a single `name` value.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self::new().with(NAME_PARAM, name)
    }

    /// Append `value` under `key`, keeping earlier values.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Builder form of [`SearchParams::push`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Values stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameter names and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl fmt::Debug for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Resolved shape of a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// Every stored ship.
    All,
    /// Ships whose name contains the value, case-sensitive.
    NameContains(String),
    /// Ships whose type is one of the listed types.
    Types(Vec<ShipType>),
    /// Unsupported or unparseable parameters; matches nothing.
    Rejected,
}

impl SearchFilter {
    /// Classify parameters. The first matching rule wins:
    /// no parameters, a lone single-valued `name`, any `typ`, otherwise rejected.
    pub fn resolve(params: &SearchParams) -> Self {
        if params.is_empty() {
            return Self::All;
        }

        if params.len() == 1 {
            if let Some([name]) = params.get(NAME_PARAM) {
                return Self::NameContains(name.clone());
            }
        }

        if let Some(codes) = params.get(TYPE_PARAM) {
            let types: Option<Vec<ShipType>> =
                codes.iter().map(|code| ShipType::from_code(code)).collect();
            return match types {
                Some(types) => Self::Types(types),
                None => {
                    debug!("resolve: unknown ship type in {codes:?}");
                    Self::Rejected
                }
            };
        }

        debug!("resolve: unsupported search parameters {params:?}");
        Self::Rejected
    }

    /// Whether `ship` satisfies the filter.
    pub fn matches(&self, ship: &Ship) -> bool {
        match self {
            Self::All => true,
            Self::NameContains(name) => ship.name.contains(name.as_str()),
            Self::Types(types) => types.contains(&ship.typ),
            Self::Rejected => false,
        }
    }

    /// Matching ships in store order.
    pub fn apply(&self, ships: &[Ship]) -> Vec<Ship> {
        if *self == Self::Rejected {
            return Vec::new();
        }
        ships
            .iter()
            .filter(|ship| self.matches(ship))
            .cloned()
            .collect()
    }
}

/// Search `ships` with raw parameters.
pub fn find(ships: &[Ship], params: &SearchParams) -> Vec<Ship> {
    SearchFilter::resolve(params).apply(ships)
}

/// First ship stored under `id`.
pub fn find_by_id(ships: &[Ship], id: Uuid) -> Option<Ship> {
    ships.iter().find(|ship| ship.id == Some(id)).cloned()
}
