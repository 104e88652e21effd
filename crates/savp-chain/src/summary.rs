//! Weighted summary: how much chart weight drains into each terminus, and
//! how weight spreads across the three pillars.

use crate::graph::DispositorGraph;
use crate::paths::{CriticalPath, Terminus};
use savp_core::tree::{Pillar, Sephirah};
use savp_core::zodiac::Body;
use serde::Serialize;

/// Share of weight at or above which one pillar is called dominant.
const DOMINANT_PILLAR_PERCENT: f64 = 40.0;

/// All bodies draining into one terminus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Basin {
    pub terminus: Terminus,
    /// Terminus bodies first (the sink, or the loop members), then the
    /// bodies feeding them, each group in canonical order.
    pub bodies: Vec<Body>,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarShare {
    pub pillar: Pillar,
    pub weight: f64,
    pub percent: f64,
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarBalance {
    Balanced,
    Dominant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainSummary {
    pub total_weight: f64,
    /// Sinks in canonical order, then loops in index order.
    pub basins: Vec<Basin>,
    /// Heaviest basin; ties go to the earlier one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant: Option<Terminus>,
    pub pillars: Vec<PillarShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_pillar: Option<Pillar>,
    pub pillar_balance: PillarBalance,
}

pub(crate) fn round(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}

pub(crate) fn summarize(
    graph: &DispositorGraph,
    critical_paths: &[CriticalPath],
    loop_count: usize,
) -> ChainSummary {
    let weight_of = |b: Body| graph.index_of(b).map_or(0.0, |i| graph.node(i).weight);

    let mut basins: Vec<Basin> = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|&(i, _)| graph.is_final(i))
        .map(|(_, node)| Basin {
            terminus: Terminus::Sink { body: node.body },
            bodies: vec![node.body],
            weight: 0.0,
        })
        .collect();
    basins.extend((0..loop_count).map(|index| Basin {
        terminus: Terminus::Loop { index },
        bodies: Vec::new(),
        weight: 0.0,
    }));

    // Loop members have single-element walks; list them ahead of feeders.
    let (members, feeders): (Vec<&CriticalPath>, Vec<&CriticalPath>) =
        critical_paths.iter().partition(|p| p.walk.len() == 1);
    for path in members.into_iter().chain(feeders) {
        if let Some(basin) = basins.iter_mut().find(|b| b.terminus == path.terminus) {
            basin.bodies.push(path.body);
        }
    }

    for basin in &mut basins {
        basin.weight = round(basin.bodies.iter().map(|&b| weight_of(b)).sum(), 2);
    }

    let mut dominant: Option<(Terminus, f64)> = None;
    for basin in &basins {
        if dominant.is_none_or(|(_, w)| basin.weight > w) {
            dominant = Some((basin.terminus, basin.weight));
        }
    }

    let total: f64 = graph.nodes().iter().map(|n| n.weight).sum();
    let pillars: Vec<PillarShare> = Pillar::ALL
        .iter()
        .map(|&pillar| {
            let bodies: Vec<Body> = graph
                .nodes()
                .iter()
                .filter(|n| Sephirah::of(n.body).pillar() == pillar)
                .map(|n| n.body)
                .collect();
            let weight: f64 = bodies.iter().map(|&b| weight_of(b)).sum();
            PillarShare {
                pillar,
                weight: round(weight, 2),
                percent: if total > 0.0 {
                    round(weight / total * 100.0, 1)
                } else {
                    0.0
                },
                bodies,
            }
        })
        .collect();

    let mut dominant_pillar: Option<&PillarShare> = None;
    for share in pillars.iter().filter(|s| s.percent > 0.0) {
        if dominant_pillar.is_none_or(|d| share.percent > d.percent) {
            dominant_pillar = Some(share);
        }
    }
    let pillar_balance = match dominant_pillar {
        Some(share) if share.percent >= DOMINANT_PILLAR_PERCENT => PillarBalance::Dominant,
        _ => PillarBalance::Balanced,
    };
    let dominant_pillar = dominant_pillar.map(|s| s.pillar);

    ChainSummary {
        total_weight: round(total, 2),
        basins,
        dominant: dominant.map(|(t, _)| t),
        pillars,
        dominant_pillar,
        pillar_balance,
    }
}
