//! Celestial bodies and zodiac signs.
//!
//! Both enums carry a stable index used as an arena key elsewhere; the
//! declaration order of [`Body`] is the canonical (traditional planetary)
//! order every report is sorted by.

use crate::error::ChartError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A celestial body that can occupy a sign and dispose of other bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Number of bodies in scope.
    pub const COUNT: usize = 10;

    /// All bodies in canonical order.
    pub const ALL: [Body; Body::COUNT] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Position in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Body::Sun => '☉',
            Body::Moon => '☽',
            Body::Mercury => '☿',
            Body::Venus => '♀',
            Body::Mars => '♂',
            Body::Jupiter => '♃',
            Body::Saturn => '♄',
            Body::Uranus => '♅',
            Body::Neptune => '♆',
            Body::Pluto => '♇',
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    /// Accepts English names and the Spanish names used by the chart service.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = match s.trim().to_lowercase().as_str() {
            "sun" | "sol" => Body::Sun,
            "moon" | "luna" => Body::Moon,
            "mercury" | "mercurio" => Body::Mercury,
            "venus" => Body::Venus,
            "mars" | "marte" => Body::Mars,
            "jupiter" | "júpiter" => Body::Jupiter,
            "saturn" | "saturno" => Body::Saturn,
            "uranus" | "urano" => Body::Uranus,
            "neptune" | "neptuno" => Body::Neptune,
            "pluto" | "pluton" | "plutón" => Body::Pluto,
            _ => return Err(ChartError::UnknownBody(s.to_string())),
        };
        Ok(body)
    }
}

/// One of the twelve tropical signs, in zodiacal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign containing an ecliptic longitude in degrees (any range).
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let idx = (normalized / 30.0).floor() as usize;
        Sign::ALL[idx.min(11)]
    }

    /// Longitude of the first degree of this sign.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = ChartError;

    /// Accepts English and Spanish names plus the three-letter abbreviations
    /// emitted by the ephemeris wrapper (`Ari`, `Tau`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sign = match s.trim().to_lowercase().as_str() {
            "aries" | "ari" => Sign::Aries,
            "taurus" | "tauro" | "tau" => Sign::Taurus,
            "gemini" | "geminis" | "géminis" | "gem" => Sign::Gemini,
            "cancer" | "cáncer" | "can" => Sign::Cancer,
            "leo" => Sign::Leo,
            "virgo" | "vir" => Sign::Virgo,
            "libra" | "lib" => Sign::Libra,
            "scorpio" | "escorpio" | "sco" => Sign::Scorpio,
            "sagittarius" | "sagitario" | "sag" => Sign::Sagittarius,
            "capricorn" | "capricornio" | "cap" => Sign::Capricorn,
            "aquarius" | "acuario" | "aqu" => Sign::Aquarius,
            "pisces" | "piscis" | "pis" => Sign::Pisces,
            _ => return Err(ChartError::UnknownSign(s.to_string())),
        };
        Ok(sign)
    }
}

// Deserialization goes through `FromStr` so chart files may use any of the
// accepted aliases.
impl<'de> Deserialize<'de> for Body {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Sign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_indices_match_all() {
        for (i, body) in Body::ALL.iter().enumerate() {
            assert_eq!(body.index(), i);
        }
        for (i, sign) in Sign::ALL.iter().enumerate() {
            assert_eq!(sign.index(), i);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Sol".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("pluton".parse::<Body>().unwrap(), Body::Pluto);
        assert_eq!("Ari".parse::<Sign>().unwrap(), Sign::Aries);
        assert_eq!("Escorpio".parse::<Sign>().unwrap(), Sign::Scorpio);
        assert_eq!("  pisces ".parse::<Sign>().unwrap(), Sign::Pisces);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "Chiron".parse::<Body>(),
            Err(ChartError::UnknownBody(name)) if name == "Chiron"
        ));
        assert!("Ophiuchus".parse::<Sign>().is_err());
    }

    #[test]
    fn test_serde_accepts_aliases() {
        let signs: Vec<Sign> = serde_json::from_str(r#"["Leo", "Sco", "piscis"]"#).unwrap();
        assert_eq!(signs, vec![Sign::Leo, Sign::Scorpio, Sign::Pisces]);
        assert_eq!(serde_json::to_string(&Body::Mercury).unwrap(), "\"mercury\"");
        let back: Body = serde_json::from_str("\"mercury\"").unwrap();
        assert_eq!(back, Body::Mercury);
    }

    #[test]
    fn test_from_longitude_wraps() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(359.9), Sign::Pisces);
        assert_eq!(Sign::from_longitude(-15.0), Sign::Pisces);
        assert_eq!(Sign::from_longitude(725.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(135.0), Sign::Leo);
    }
}
