//! Essential dignities and the two-layer body weighting.
//!
//! Layer one is the essential dignity of a body in its sign. Layer two
//! scales it by house angularity, retrograde motion and the number of exact
//! aspects the body makes.

use crate::chart::Placement;
use crate::config::WeightingConfig;
use crate::zodiac::{Body, Sign};
use serde::{Deserialize, Serialize};

use Sign::*;

/// Essential dignity of a body in a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dignity {
    Domicile,
    Exaltation,
    Peregrine,
    Detriment,
    Fall,
}

impl Dignity {
    /// Essential weight of this dignity.
    pub fn weight(self) -> f64 {
        match self {
            Dignity::Domicile => 3.0,
            Dignity::Exaltation => 2.0,
            Dignity::Peregrine => 1.0,
            Dignity::Detriment => 0.5,
            Dignity::Fall => 0.25,
        }
    }
}

struct DignityRow {
    domicile: &'static [Sign],
    exaltation: &'static [Sign],
    detriment: &'static [Sign],
    fall: &'static [Sign],
}

/// Indexed by [`Body::index`].
const TABLE: [DignityRow; Body::COUNT] = [
    // Sun
    DignityRow {
        domicile: &[Leo],
        exaltation: &[Aries],
        detriment: &[Aquarius],
        fall: &[Libra],
    },
    // Moon
    DignityRow {
        domicile: &[Cancer],
        exaltation: &[Taurus],
        detriment: &[Capricorn],
        fall: &[Scorpio],
    },
    // Mercury
    DignityRow {
        domicile: &[Gemini, Virgo],
        exaltation: &[Virgo],
        detriment: &[Sagittarius, Pisces],
        fall: &[Pisces],
    },
    // Venus
    DignityRow {
        domicile: &[Taurus, Libra],
        exaltation: &[Pisces],
        detriment: &[Aries, Scorpio],
        fall: &[Virgo],
    },
    // Mars
    DignityRow {
        domicile: &[Aries, Scorpio],
        exaltation: &[Capricorn],
        detriment: &[Libra, Taurus],
        fall: &[Cancer],
    },
    // Jupiter
    DignityRow {
        domicile: &[Sagittarius, Pisces],
        exaltation: &[Cancer],
        detriment: &[Gemini, Virgo],
        fall: &[Capricorn],
    },
    // Saturn
    DignityRow {
        domicile: &[Capricorn, Aquarius],
        exaltation: &[Libra],
        detriment: &[Cancer, Leo],
        fall: &[Aries],
    },
    // Uranus
    DignityRow {
        domicile: &[Aquarius],
        exaltation: &[Scorpio],
        detriment: &[Leo],
        fall: &[Taurus],
    },
    // Neptune
    DignityRow {
        domicile: &[Pisces],
        exaltation: &[Cancer],
        detriment: &[Virgo],
        fall: &[Capricorn],
    },
    // Pluto
    DignityRow {
        domicile: &[Scorpio],
        exaltation: &[Leo],
        detriment: &[Taurus],
        fall: &[Aquarius],
    },
];

/// Essential dignity of `body` in `sign`. Domicile wins over exaltation,
/// so Mercury in Virgo is a domicile.
pub fn essential_dignity(body: Body, sign: Sign) -> Dignity {
    let row = &TABLE[body.index()];
    if row.domicile.contains(&sign) {
        Dignity::Domicile
    } else if row.exaltation.contains(&sign) {
        Dignity::Exaltation
    } else if row.detriment.contains(&sign) {
        Dignity::Detriment
    } else if row.fall.contains(&sign) {
        Dignity::Fall
    } else {
        Dignity::Peregrine
    }
}

/// Full weighting breakdown for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighting {
    pub dignity: Dignity,
    pub essential: f64,
    pub house_factor: f64,
    pub retrograde_factor: f64,
    pub aspect_factor: f64,
    pub weight: f64,
}

/// House multiplier: angular, succedent, cadent. Unknown houses are neutral.
pub fn house_factor(house: Option<u8>, config: &WeightingConfig) -> f64 {
    match house {
        Some(1 | 4 | 7 | 10) => config.angular,
        Some(2 | 5 | 8 | 11) => config.succedent,
        Some(_) => config.cadent,
        None => 1.0,
    }
}

/// Weigh a placed body given how many exact aspects it makes.
pub fn weigh(
    body: Body,
    placement: &Placement,
    exact_aspects: usize,
    config: &WeightingConfig,
) -> Weighting {
    let dignity = essential_dignity(body, placement.sign);
    let essential = dignity.weight();
    let house_factor = house_factor(placement.house, config);
    let retrograde_factor = if placement.retrograde {
        config.retrograde
    } else {
        1.0
    };
    let aspect_factor = 1.0 + (exact_aspects as f64 * config.aspect_step).min(config.aspect_cap);

    Weighting {
        dignity,
        essential,
        house_factor,
        retrograde_factor,
        aspect_factor,
        weight: round2(essential * house_factor * retrograde_factor * aspect_factor),
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(sign: Sign, house: Option<u8>, retrograde: bool) -> Placement {
        Placement {
            sign,
            degree: 10.0,
            house,
            retrograde,
        }
    }

    #[test]
    fn test_dignity_precedence() {
        assert_eq!(essential_dignity(Body::Sun, Leo), Dignity::Domicile);
        assert_eq!(essential_dignity(Body::Mercury, Virgo), Dignity::Domicile);
        assert_eq!(essential_dignity(Body::Mercury, Pisces), Dignity::Detriment);
        assert_eq!(essential_dignity(Body::Saturn, Aries), Dignity::Fall);
        assert_eq!(essential_dignity(Body::Moon, Taurus), Dignity::Exaltation);
        assert_eq!(essential_dignity(Body::Mars, Gemini), Dignity::Peregrine);
    }

    #[test]
    fn test_weigh_angular_domicile() {
        let cfg = WeightingConfig::default();
        let w = weigh(Body::Sun, &placement(Leo, Some(10), false), 0, &cfg);
        assert_eq!(w.dignity, Dignity::Domicile);
        assert_eq!(w.house_factor, 1.20);
        assert_eq!(w.weight, 3.6);
    }

    #[test]
    fn test_weigh_retrograde_cadent() {
        let cfg = WeightingConfig::default();
        let w = weigh(Body::Saturn, &placement(Aries, Some(12), true), 0, &cfg);
        // 0.25 * 0.85 * 0.90 = 0.19125
        assert_eq!(w.weight, 0.19);
    }

    #[test]
    fn test_aspect_factor_is_capped() {
        let cfg = WeightingConfig::default();
        let two = weigh(Body::Mars, &placement(Gemini, None, false), 2, &cfg);
        assert!((two.aspect_factor - 1.14).abs() < 1e-9);
        let many = weigh(Body::Mars, &placement(Gemini, None, false), 9, &cfg);
        assert!((many.aspect_factor - 1.35).abs() < 1e-9);
        assert_eq!(many.weight, 1.35);
    }
}
