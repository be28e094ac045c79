use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

/// One of the two bookable venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hall {
    Small,
    Big,
}

impl Hall {
    pub const ALL: [Hall; 2] = [Hall::Small, Hall::Big];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hall::Small => "small",
            Hall::Big => "big",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Hall::Small => "Intimate Hall",
            Hall::Big => "Grand Ballroom",
        }
    }
}

impl fmt::Display for Hall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hall {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Hall::Small),
            "big" => Ok(Hall::Big),
            _ => Err(ParseEnumError::new("hall", s)),
        }
    }
}

impl TryFrom<String> for Hall {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A value per hall. Replaces string-keyed lookups with an exhaustive
/// two-field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallMap<T> {
    pub small: T,
    pub big: T,
}

impl<T> HallMap<T> {
    pub fn from_fn(mut f: impl FnMut(Hall) -> T) -> Self {
        Self {
            small: f(Hall::Small),
            big: f(Hall::Big),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> HallMap<U> {
        HallMap {
            small: f(&self.small),
            big: f(&self.big),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Hall, &T)> {
        [(Hall::Small, &self.small), (Hall::Big, &self.big)].into_iter()
    }
}

impl<T> Index<Hall> for HallMap<T> {
    type Output = T;

    fn index(&self, hall: Hall) -> &T {
        match hall {
            Hall::Small => &self.small,
            Hall::Big => &self.big,
        }
    }
}

impl<T> IndexMut<Hall> for HallMap<T> {
    fn index_mut(&mut self, hall: Hall) -> &mut T {
        match hall {
            Hall::Small => &mut self.small,
            Hall::Big => &mut self.big,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hall_parsing() {
        assert_eq!("small".parse::<Hall>().unwrap(), Hall::Small);
        assert_eq!(" BIG ".parse::<Hall>().unwrap(), Hall::Big);
        let err = "medium".parse::<Hall>().unwrap_err();
        assert_eq!(err.to_string(), "unknown hall: medium");
    }

    #[test]
    fn test_hall_map_indexing() {
        let mut map = HallMap::from_fn(|h| h.as_str().len());
        assert_eq!(map[Hall::Small], 5);
        assert_eq!(map[Hall::Big], 3);
        map[Hall::Big] = 10;
        assert_eq!(map.big, 10);

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"small": 5, "big": 10}));
    }
}
