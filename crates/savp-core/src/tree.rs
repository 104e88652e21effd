//! Tree of Life projection: bodies onto sephiroth, sephiroth onto pillars,
//! and the 22 paths joining them.

use crate::zodiac::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sephirah {
    Kether,
    Chokmah,
    Binah,
    Daath,
    Chesed,
    Geburah,
    Tiphareth,
    Netzach,
    Hod,
    Yesod,
    Malkuth,
}

impl Sephirah {
    /// Sephirah a body projects onto.
    pub fn of(body: Body) -> Self {
        match body {
            Body::Sun => Sephirah::Tiphareth,
            Body::Moon => Sephirah::Yesod,
            Body::Mercury => Sephirah::Hod,
            Body::Venus => Sephirah::Netzach,
            Body::Mars => Sephirah::Geburah,
            Body::Jupiter => Sephirah::Chesed,
            Body::Saturn => Sephirah::Binah,
            Body::Uranus => Sephirah::Chokmah,
            Body::Neptune => Sephirah::Kether,
            Body::Pluto => Sephirah::Daath,
        }
    }

    pub fn pillar(self) -> Pillar {
        match self {
            Sephirah::Chokmah | Sephirah::Chesed | Sephirah::Netzach => Pillar::Right,
            Sephirah::Binah | Sephirah::Geburah | Sephirah::Hod => Pillar::Left,
            _ => Pillar::Middle,
        }
    }
}

impl fmt::Display for Sephirah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The three vertical pillars of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Left,
    Middle,
    Right,
}

impl Pillar {
    pub const ALL: [Pillar; 3] = [Pillar::Left, Pillar::Middle, Pillar::Right];
}

/// One of the 22 paths between sephiroth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreePath {
    pub number: u8,
    pub name: &'static str,
    pub arcanum: u8,
    pub ends: (Sephirah, Sephirah),
}

impl TreePath {
    pub fn touches(&self, sephirah: Sephirah) -> bool {
        self.ends.0 == sephirah || self.ends.1 == sephirah
    }

    pub fn joins(&self, a: Sephirah, b: Sephirah) -> bool {
        (self.ends.0 == a && self.ends.1 == b) || (self.ends.0 == b && self.ends.1 == a)
    }
}

const fn path(number: u8, name: &'static str, arcanum: u8, a: Sephirah, b: Sephirah) -> TreePath {
    TreePath {
        number,
        name,
        arcanum,
        ends: (a, b),
    }
}

use Sephirah::*;

pub const TREE_PATHS: [TreePath; 22] = [
    path(11, "The Fool", 0, Kether, Chokmah),
    path(12, "The Magician", 1, Kether, Binah),
    path(13, "The High Priestess", 2, Kether, Tiphareth),
    path(14, "The Empress", 3, Chokmah, Binah),
    path(15, "The Emperor", 4, Chokmah, Tiphareth),
    path(16, "The Hierophant", 5, Chokmah, Chesed),
    path(17, "The Lovers", 6, Binah, Tiphareth),
    path(18, "The Chariot", 7, Binah, Geburah),
    path(19, "Strength", 8, Chesed, Geburah),
    path(20, "The Hermit", 9, Chesed, Tiphareth),
    path(21, "Wheel of Fortune", 10, Chesed, Netzach),
    path(22, "Justice", 11, Geburah, Tiphareth),
    path(23, "The Hanged Man", 12, Geburah, Hod),
    path(24, "Death", 13, Tiphareth, Netzach),
    path(25, "Temperance", 14, Tiphareth, Yesod),
    path(26, "The Devil", 15, Tiphareth, Hod),
    path(27, "The Tower", 16, Netzach, Hod),
    path(28, "The Star", 17, Netzach, Yesod),
    path(29, "The Moon", 18, Netzach, Malkuth),
    path(30, "The Sun", 19, Hod, Yesod),
    path(31, "Judgement", 20, Hod, Malkuth),
    path(32, "The World", 21, Yesod, Malkuth),
];

/// Paths touching a sephirah, in path-number order. Daath has none.
pub fn paths_touching(sephirah: Sephirah) -> Vec<&'static TreePath> {
    TREE_PATHS.iter().filter(|p| p.touches(sephirah)).collect()
}

/// The path joining two sephiroth, if they are adjacent on the tree.
pub fn path_between(a: Sephirah, b: Sephirah) -> Option<&'static TreePath> {
    TREE_PATHS.iter().find(|p| p.joins(a, b))
}
