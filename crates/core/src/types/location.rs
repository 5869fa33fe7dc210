//! Physical location value object.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::MAX_LOCATION_LENGTH;

/// Kind of physical placement within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// An entrance area.
    Entrance,
    /// A table or seating area.
    Table,
    /// A counter or service area.
    Counter,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entrance => write!(f, "entrance"),
            Self::Table => write!(f, "table"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

impl std::str::FromStr for LocationType {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrance" => Ok(Self::Entrance),
            "table" => Ok(Self::Table),
            "counter" => Ok(Self::Counter),
            _ => Err(LocationError::InvalidType { got: s.to_owned() }),
        }
    }
}

/// Errors that can occur when constructing a [`Location`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The location name is empty.
    #[error("name is required")]
    EmptyName,
    /// The location name is too long.
    #[error("name exceeds maximum length of {MAX_LOCATION_LENGTH} characters, got {got}")]
    NameTooLong {
        /// Actual length of the input.
        got: usize,
    },
    /// The type string is not a known location type.
    #[error("invalid location type: {got}, must be one of entrance, table, counter")]
    InvalidType {
        /// Offending value.
        got: String,
    },
}

/// A physical location within a store.
///
/// Immutable value object describing where a customer was identified,
/// independent of the beacon device record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    name: String,
    #[serde(rename = "type")]
    location_type: LocationType,
}

impl Location {
    /// Construct a location, enforcing the name-length invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`LocationError`] if the name is empty or too long.
    pub fn new(name: impl Into<String>, location_type: LocationType) -> Result<Self, LocationError> {
        let location = Self {
            name: name.into(),
            location_type,
        };
        location.validate()?;
        Ok(location)
    }

    /// Re-run the structural invariants on an existing location.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), LocationError> {
        if self.name.is_empty() {
            return Err(LocationError::EmptyName);
        }
        if self.name.len() > MAX_LOCATION_LENGTH {
            return Err(LocationError::NameTooLong {
                got: self.name.len(),
            });
        }
        Ok(())
    }

    /// The location's name (e.g. "Table 3").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location's type.
    #[must_use]
    pub const fn location_type(&self) -> LocationType {
        self.location_type
    }
}
