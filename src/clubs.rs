//! Club specifications and lookup with an explicit fallback club.

use crate::constants::DEFAULT_CLUB;
use crate::error::FlightError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Loft and nominal carry for one club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSpec {
    pub name: String,
    pub loft_deg: f64,
    pub max_distance_m: f64,
}

impl ClubSpec {
    pub fn new(name: &str, loft_deg: f64, max_distance_m: f64) -> Self {
        Self {
            name: name.to_string(),
            loft_deg,
            max_distance_m,
        }
    }
}

/// Result of looking up a club by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedClub {
    pub requested: String,
    pub used: ClubSpec,
    pub fell_back: bool,
}

/// Read-only club table.
///
/// Entries keep their insertion order so listings are stable. Lookups that
/// miss resolve to the table's default club instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubTable {
    clubs: Vec<ClubSpec>,
    default_club: String,
}

/// On-disk form, checked by `ClubTable::new` before use
#[derive(Deserialize)]
struct ClubTableFile {
    clubs: Vec<ClubSpec>,
    default_club: String,
}

static STANDARD_CLUBS: Lazy<ClubTable> = Lazy::new(|| ClubTable {
    clubs: vec![
        ClubSpec::new("Driver", 10.5, 250.0),
        ClubSpec::new("3-Iron", 21.0, 180.0),
        ClubSpec::new("5-Iron", 27.0, 160.0),
        ClubSpec::new("7-Iron", 34.0, 140.0),
        ClubSpec::new("9-Iron", 42.0, 120.0),
        ClubSpec::new("P-Wedge", 46.0, 100.0),
        ClubSpec::new("S-Wedge", 56.0, 80.0),
        ClubSpec::new("Putter", 4.0, 30.0),
    ],
    default_club: DEFAULT_CLUB.to_string(),
});

impl ClubTable {
    /// Build a table. The default club must be one of `clubs`.
    pub fn new(clubs: Vec<ClubSpec>, default_club: &str) -> Result<Self, FlightError> {
        if !clubs.iter().any(|c| c.name == default_club) {
            return Err(FlightError::InvalidConfig(format!(
                "default club '{}' is not in the club table",
                default_club
            )));
        }
        for club in &clubs {
            if !club.loft_deg.is_finite() || club.loft_deg < 0.0 || club.loft_deg >= 90.0 {
                return Err(FlightError::InvalidConfig(format!(
                    "club '{}' has loft {} outside [0, 90)",
                    club.name, club.loft_deg
                )));
            }
        }
        Ok(Self {
            clubs,
            default_club: default_club.to_string(),
        })
    }

    /// The eight standard clubs, falling back to the 7-Iron
    pub fn standard() -> &'static ClubTable {
        &STANDARD_CLUBS
    }

    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, FlightError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, FlightError> {
        let table: ClubTableFile = serde_json::from_str(json)?;
        Self::new(table.clubs, &table.default_club)
    }

    pub fn get(&self, name: &str) -> Option<&ClubSpec> {
        self.clubs.iter().find(|c| c.name == name)
    }

    pub fn default_club(&self) -> &ClubSpec {
        // Constructors guarantee the default is present
        self.get(&self.default_club).unwrap_or(&self.clubs[0])
    }

    pub fn resolve(&self, name: &str) -> ResolvedClub {
        match self.get(name) {
            Some(spec) => ResolvedClub {
                requested: name.to_string(),
                used: spec.clone(),
                fell_back: false,
            },
            None => {
                let fallback = self.default_club();
                tracing::warn!(
                    requested = name,
                    fallback = %fallback.name,
                    "unknown club, using default"
                );
                ResolvedClub {
                    requested: name.to_string(),
                    used: fallback.clone(),
                    fell_back: true,
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClubSpec> {
        self.clubs.iter()
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }
}

impl Default for ClubTable {
    fn default() -> Self {
        STANDARD_CLUBS.clone()
    }
}
