//! Sign rulership tables.

use crate::error::ChartError;
use crate::zodiac::{Body, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rulers indexed by [`Sign::index`], with modern rulers for the three
/// outer signs.
const MODERN: [Body; 12] = [
    Body::Mars,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Pluto,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
];

/// Classical rulers only: Mars, Saturn and Jupiter keep Scorpio, Aquarius
/// and Pisces.
const TRADITIONAL: [Body; 12] = [
    Body::Mars,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Saturn,
    Body::Jupiter,
];

/// Which rulership table to consult.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulershipScheme {
    #[default]
    Modern,
    Traditional,
}

impl RulershipScheme {
    /// Ruling body of `sign` under this scheme.
    pub fn ruler(self, sign: Sign) -> Body {
        match self {
            RulershipScheme::Modern => MODERN[sign.index()],
            RulershipScheme::Traditional => TRADITIONAL[sign.index()],
        }
    }

    /// Signs ruled by `body`, in zodiacal order.
    pub fn domiciles(self, body: Body) -> Vec<Sign> {
        Sign::ALL
            .iter()
            .copied()
            .filter(|&s| self.ruler(s) == body)
            .collect()
    }

    pub fn rules(self, body: Body, sign: Sign) -> bool {
        self.ruler(sign) == body
    }
}

impl fmt::Display for RulershipScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulershipScheme::Modern => f.write_str("modern"),
            RulershipScheme::Traditional => f.write_str("traditional"),
        }
    }
}

impl FromStr for RulershipScheme {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(RulershipScheme::Modern),
            "traditional" | "classical" => Ok(RulershipScheme::Traditional),
            _ => Err(ChartError::UnknownScheme(s.to_string())),
        }
    }
}
