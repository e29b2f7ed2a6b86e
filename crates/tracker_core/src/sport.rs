//! Internal sport taxonomy and the vendor sport-code mapping contract.
//!
//! Vendors report activities under their own code sets ("RUN", "9", ...).
//! A [`SportMapper`] translates between those codes and the internal
//! [`Sport`] enumeration. Each vendor crate supplies its own mapping table;
//! this module owns only the contract and the table-driven lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The internal sport taxonomy.
///
/// Vendor codes with no counterpart map to [`Sport::Other`]; the set is
/// deliberately coarse so every vendor can cover it.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Running,
    Walking,
    CyclingSport,
    CyclingTransport,
    CyclingIndoor,
    CyclingMountain,
    Swimming,
    Hiking,
    Kayaking,
    Golf,
    Other,
}

/// Bidirectional lookup between internal sports and one vendor's codes.
pub trait SportMapper: Send + Sync {
    /// Translate a vendor code into the internal taxonomy.
    /// Unknown codes map to [`Sport::Other`].
    fn sport_from_code(&self, code: &str) -> Sport;

    /// Translate an internal sport into the vendor's code, if the vendor
    /// has one for it.
    fn code_from_sport(&self, sport: Sport) -> Option<&str>;
}

/// Table-driven [`SportMapper`] built from `(code, sport)` pairs.
///
/// Code lookup is case-insensitive. When several codes map to the same
/// sport, the first pair listed wins the reverse direction.
#[derive(Clone, Debug, Default)]
pub struct CodeSportMapper {
    by_code: HashMap<String, Sport>,
    by_sport: HashMap<Sport, String>,
}

impl CodeSportMapper {
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Sport)>,
        S: Into<String>,
    {
        let mut by_code = HashMap::new();
        let mut by_sport = HashMap::new();
        for (code, sport) in pairs {
            let code = code.into();
            by_sport.entry(sport).or_insert_with(|| code.clone());
            by_code.insert(code.to_lowercase(), sport);
        }
        Self { by_code, by_sport }
    }
}

impl SportMapper for CodeSportMapper {
    fn sport_from_code(&self, code: &str) -> Sport {
        self.by_code
            .get(&code.to_lowercase())
            .copied()
            .unwrap_or(Sport::Other)
    }

    fn code_from_sport(&self, sport: Sport) -> Option<&str> {
        self.by_sport.get(&sport).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CodeSportMapper {
        CodeSportMapper::new([
            ("RUN", Sport::Running),
            ("JOG", Sport::Running),
            ("CYCLING", Sport::CyclingSport),
            ("OPEN_WATER", Sport::Swimming),
        ])
    }

    #[test]
    fn code_lookup_is_case_insensitive() {
        let m = mapper();
        assert_eq!(m.sport_from_code("run"), Sport::Running);
        assert_eq!(m.sport_from_code("Run"), Sport::Running);
        assert_eq!(m.sport_from_code("OPEN_WATER"), Sport::Swimming);
    }

    #[test]
    fn unknown_code_maps_to_other() {
        assert_eq!(mapper().sport_from_code("underwater_hockey"), Sport::Other);
    }

    #[test]
    fn first_listed_code_wins_reverse_lookup() {
        let m = mapper();
        assert_eq!(m.code_from_sport(Sport::Running), Some("RUN"));
        assert_eq!(m.code_from_sport(Sport::CyclingSport), Some("CYCLING"));
    }

    #[test]
    fn unmapped_sport_has_no_code() {
        assert_eq!(mapper().code_from_sport(Sport::Golf), None);
    }

    #[test]
    fn sport_serializes_snake_case() {
        let rendered = serde_json::to_string(&Sport::CyclingMountain).expect("serialize");
        assert_eq!(rendered, "\"cycling_mountain\"");
    }
}
