//! Major aspects between bodies.

use crate::chart::Placement;
use crate::config::AspectConfig;
use crate::dignity::round2;
use crate::error::ChartError;
use crate::zodiac::Body;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The five Ptolemaic aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Checked in this order; the first kind within orb wins.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Squares and oppositions are the tense aspects.
    pub fn is_hard(self) -> bool {
        matches!(self, AspectKind::Square | AspectKind::Opposition)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        };
        f.write_str(s)
    }
}

impl FromStr for AspectKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_lowercase().as_str() {
            "conjunction" | "conjuncion" | "conjunción" => AspectKind::Conjunction,
            "sextile" | "sextil" => AspectKind::Sextile,
            "square" | "cuadratura" => AspectKind::Square,
            "trine" | "trigono" | "trígono" => AspectKind::Trine,
            "opposition" | "oposicion" | "oposición" => AspectKind::Opposition,
            _ => return Err(ChartError::UnknownAspect(s.to_string())),
        };
        Ok(kind)
    }
}

/// An aspect between two bodies. The pair is unordered; `a` and `b` keep
/// whatever order the producer supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub a: Body,
    pub b: Body,
    pub kind: AspectKind,
    /// Distance from the exact angle, in degrees.
    pub orb: f64,
}

impl Aspect {
    /// The pair in canonical order.
    pub fn pair(&self) -> (Body, Body) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    pub fn involves(&self, body: Body) -> bool {
        self.a == body || self.b == body
    }

    pub fn other(&self, body: Body) -> Option<Body> {
        if self.a == body {
            Some(self.b)
        } else if self.b == body {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn is_exact(&self, config: &AspectConfig) -> bool {
        self.orb <= config.exact_orb
    }
}

/// Shorter arc between two longitudes, in `0..=180`.
pub fn angular_distance(lon1: f64, lon2: f64) -> f64 {
    let d = (lon1 - lon2).abs().rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Aspect kind and orb for an angular distance, if any kind is within orb.
pub fn classify_distance(distance: f64, config: &AspectConfig) -> Option<(AspectKind, f64)> {
    AspectKind::ALL.iter().find_map(|&kind| {
        let orb = (distance - kind.angle()).abs();
        (orb <= config.orb(kind)).then_some((kind, orb))
    })
}

/// Detect aspects between every pair of placed bodies, visiting pairs in
/// canonical order.
pub fn detect_aspects(
    placements: &BTreeMap<Body, Placement>,
    config: &AspectConfig,
) -> Vec<Aspect> {
    let placed: Vec<(Body, f64)> = placements
        .iter()
        .map(|(&body, p)| (body, p.longitude()))
        .collect();

    let mut aspects = Vec::new();
    for (i, &(a, lon_a)) in placed.iter().enumerate() {
        for &(b, lon_b) in &placed[i + 1..] {
            if let Some((kind, orb)) = classify_distance(angular_distance(lon_a, lon_b), config) {
                aspects.push(Aspect {
                    a,
                    b,
                    kind,
                    orb: round2(orb),
                });
            }
        }
    }
    aspects
}

/// Count of exact aspects per body.
pub fn exact_counts(aspects: &[Aspect], config: &AspectConfig) -> BTreeMap<Body, usize> {
    let mut counts = BTreeMap::new();
    for aspect in aspects.iter().filter(|a| a.is_exact(config)) {
        *counts.entry(aspect.a).or_insert(0) += 1;
        *counts.entry(aspect.b).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::Sign;

    fn at(sign: Sign, degree: f64) -> Placement {
        Placement {
            sign,
            degree,
            house: None,
            retrograde: false,
        }
    }

    #[test]
    fn test_angular_distance_takes_short_arc() {
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(90.0, 30.0), 60.0);
    }

    #[test]
    fn test_classify_distance_first_match_wins() {
        let cfg = AspectConfig::default();
        assert_eq!(classify_distance(3.0, &cfg), Some((AspectKind::Conjunction, 3.0)));
        assert_eq!(classify_distance(95.0, &cfg), Some((AspectKind::Square, 5.0)));
        assert_eq!(classify_distance(45.0, &cfg), None);
        assert_eq!(classify_distance(67.0, &cfg), None);
    }

    #[test]
    fn test_detect_aspects_pairs_once_in_canonical_order() {
        let cfg = AspectConfig::default();
        let mut placements = BTreeMap::new();
        placements.insert(Body::Mars, at(Sign::Cancer, 12.0));
        placements.insert(Body::Sun, at(Sign::Aries, 10.0));
        placements.insert(Body::Moon, at(Sign::Libra, 11.0));

        let aspects = detect_aspects(&placements, &cfg);
        assert_eq!(aspects.len(), 3);
        assert_eq!((aspects[0].a, aspects[0].b), (Body::Sun, Body::Moon));
        assert_eq!(aspects[0].kind, AspectKind::Opposition);
        assert_eq!(aspects[0].orb, 1.0);
        assert_eq!((aspects[1].a, aspects[1].b), (Body::Sun, Body::Mars));
        assert_eq!(aspects[1].kind, AspectKind::Square);
        assert_eq!((aspects[2].a, aspects[2].b), (Body::Moon, Body::Mars));
        assert_eq!(aspects[2].kind, AspectKind::Square);
    }

    #[test]
    fn test_exact_counts() {
        let cfg = AspectConfig::default();
        let aspects = vec![
            Aspect {
                a: Body::Sun,
                b: Body::Moon,
                kind: AspectKind::Trine,
                orb: 1.5,
            },
            Aspect {
                a: Body::Sun,
                b: Body::Venus,
                kind: AspectKind::Square,
                orb: 6.0,
            },
        ];
        let counts = exact_counts(&aspects, &cfg);
        assert_eq!(counts.get(&Body::Sun), Some(&1));
        assert_eq!(counts.get(&Body::Moon), Some(&1));
        assert_eq!(counts.get(&Body::Venus), None);
    }

    #[test]
    fn test_pair_and_other() {
        let asp = Aspect {
            a: Body::Saturn,
            b: Body::Sun,
            kind: AspectKind::Square,
            orb: 2.0,
        };
        assert_eq!(asp.pair(), (Body::Sun, Body::Saturn));
        assert_eq!(asp.other(Body::Sun), Some(Body::Saturn));
        assert_eq!(asp.other(Body::Moon), None);
        assert!(asp.involves(Body::Saturn));
        assert!(!asp.involves(Body::Moon));
        assert!(asp.kind.is_hard());
    }
}
