//! Dispositor graph construction.
//!
//! Each body points at the ruler of the sign it occupies, so every node has
//! exactly one outgoing edge. Nodes live in an arena ordered canonically by
//! [`Body`]; an edge is just the arena index of the target.

use crate::error::ChainError;
use savp_core::chart::ChartSnapshot;
use savp_core::config::SavpConfig;
use savp_core::rulership::RulershipScheme;
use savp_core::zodiac::{Body, Sign};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A body in the dispositor graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispositorNode {
    pub body: Body,
    pub sign: Sign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    pub retrograde: bool,
    pub weight: f64,
    /// Arena index of the ruler of `sign`.
    #[serde(skip)]
    pub dispositor: usize,
}

/// A directed dispositor edge between two distinct bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: Body,
    pub to: Body,
}

/// Functional graph over bodies: out-degree is exactly one everywhere.
#[derive(Debug, Clone)]
pub struct DispositorGraph {
    scheme: RulershipScheme,
    nodes: Vec<DispositorNode>,
    /// Body index → arena index.
    slots: [Option<usize>; Body::COUNT],
}

/// Build a graph over every body in `sign_by_body`.
pub fn build_dispositor_graph(
    sign_by_body: &BTreeMap<Body, Sign>,
    scheme: RulershipScheme,
) -> Result<DispositorGraph, ChainError> {
    let scope: Vec<Body> = sign_by_body.keys().copied().collect();
    build_scoped(sign_by_body, &scope, scheme)
}

/// Build a graph over `scope` plus every ruler reached from it.
///
/// Fails with [`ChainError::DataIncomplete`] naming the first body (scope in
/// canonical order, then rulers in discovery order) that has no sign.
pub fn build_scoped(
    sign_by_body: &BTreeMap<Body, Sign>,
    scope: &[Body],
    scheme: RulershipScheme,
) -> Result<DispositorGraph, ChainError> {
    let mut included: [Option<Sign>; Body::COUNT] = [None; Body::COUNT];
    let mut pending: Vec<Body> = scope.to_vec();
    pending.sort();
    pending.dedup();
    // Pop from the front so scope bodies are checked before rulers.
    pending.reverse();

    while let Some(body) = pending.pop() {
        if included[body.index()].is_some() {
            continue;
        }
        let sign = *sign_by_body
            .get(&body)
            .ok_or(ChainError::DataIncomplete { body })?;
        included[body.index()] = Some(sign);

        let ruler = scheme.ruler(sign);
        if included[ruler.index()].is_none() && !pending.contains(&ruler) {
            pending.insert(0, ruler);
        }
    }

    for body in sign_by_body.keys() {
        if included[body.index()].is_none() {
            debug!(%body, "placement outside chain scope, ignored");
        }
    }

    let mut slots = [None; Body::COUNT];
    let mut nodes = Vec::new();
    for body in Body::ALL {
        let Some(sign) = included[body.index()] else {
            continue;
        };
        slots[body.index()] = Some(nodes.len());
        nodes.push(DispositorNode {
            body,
            sign,
            house: None,
            retrograde: false,
            weight: 1.0,
            dispositor: 0,
        });
    }

    // Every ruler was pulled into the node set above.
    for node in &mut nodes {
        let ruler = scheme.ruler(node.sign);
        if let Some(idx) = slots[ruler.index()] {
            node.dispositor = idx;
        }
    }

    Ok(DispositorGraph {
        scheme,
        nodes,
        slots,
    })
}

impl DispositorGraph {
    /// Build from a chart snapshot, carrying houses, retrograde flags and
    /// dignity weights onto the nodes.
    pub fn from_chart(chart: &ChartSnapshot, config: &SavpConfig) -> Result<Self, ChainError> {
        let mut graph = build_scoped(
            &chart.sign_by_body(),
            &config.chain.bodies,
            config.chain.rulership,
        )?;
        let weightings = chart.weightings(config);
        for node in &mut graph.nodes {
            if let Some(p) = chart.placements.get(&node.body) {
                node.house = p.house;
                node.retrograde = p.retrograde;
            }
            if let Some(w) = weightings.get(&node.body) {
                node.weight = w.weight;
            }
        }
        Ok(graph)
    }

    pub fn scheme(&self) -> RulershipScheme {
        self.scheme
    }

    pub fn nodes(&self) -> &[DispositorNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &DispositorNode {
        &self.nodes[idx]
    }

    /// Arena index of a body, if it is in the graph.
    pub fn index_of(&self, body: Body) -> Option<usize> {
        self.slots[body.index()]
    }

    pub fn contains(&self, body: Body) -> bool {
        self.index_of(body).is_some()
    }

    /// Arena index of the dispositor of node `idx`.
    pub fn target(&self, idx: usize) -> usize {
        self.nodes[idx].dispositor
    }

    pub fn dispositor_of(&self, body: Body) -> Option<Body> {
        self.index_of(body)
            .map(|idx| self.nodes[self.target(idx)].body)
    }

    /// True when node `idx` rules its own sign.
    pub fn is_final(&self, idx: usize) -> bool {
        self.target(idx) == idx
    }

    /// Incoming edges from other nodes; a self-loop is not counted.
    pub fn in_degree(&self, idx: usize) -> usize {
        self.contributors(idx).len()
    }

    /// Nodes whose edge targets `idx`, excluding `idx` itself, in canonical
    /// order.
    pub fn contributors(&self, idx: usize) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| i != idx && self.target(i) == idx)
            .collect()
    }

    /// All edges between distinct bodies, in canonical source order.
    pub fn edges(&self) -> Vec<Edge> {
        (0..self.nodes.len())
            .filter(|&i| !self.is_final(i))
            .map(|i| Edge {
                from: self.nodes[i].body,
                to: self.nodes[self.target(i)].body,
            })
            .collect()
    }

    /// True when `from` disposes directly into `to` (distinct bodies).
    pub fn has_edge(&self, from: Body, to: Body) -> bool {
        from != to && self.dispositor_of(from) == Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signs(pairs: &[(Body, Sign)]) -> BTreeMap<Body, Sign> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_self_ruled_body_is_final() {
        let graph = build_dispositor_graph(
            &signs(&[(Body::Sun, Sign::Leo)]),
            RulershipScheme::Modern,
        )
        .unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.is_final(0));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_missing_ruler_is_reported() {
        // Moon in Aries points at Mars, which has no placement.
        let err = build_dispositor_graph(
            &signs(&[(Body::Moon, Sign::Aries)]),
            RulershipScheme::Modern,
        )
        .unwrap_err();
        assert_eq!(err, ChainError::DataIncomplete { body: Body::Mars });
    }

    #[test]
    fn test_missing_scope_body_reported_first() {
        let err = build_scoped(
            &signs(&[(Body::Moon, Sign::Aries)]),
            &[Body::Moon, Body::Sun],
            RulershipScheme::Modern,
        )
        .unwrap_err();
        assert_eq!(err, ChainError::DataIncomplete { body: Body::Sun });
    }

    #[test]
    fn test_scope_pulls_in_rulers() {
        let graph = build_scoped(
            &signs(&[
                (Body::Moon, Sign::Aries),
                (Body::Mars, Sign::Leo),
                (Body::Sun, Sign::Leo),
                (Body::Pluto, Sign::Libra),
            ]),
            &[Body::Moon],
            RulershipScheme::Modern,
        )
        .unwrap();
        let bodies: Vec<Body> = graph.nodes().iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec![Body::Sun, Body::Moon, Body::Mars]);
        assert!(!graph.contains(Body::Pluto));
        assert_eq!(graph.dispositor_of(Body::Moon), Some(Body::Mars));
        assert_eq!(graph.dispositor_of(Body::Mars), Some(Body::Sun));
    }

    #[test]
    fn test_contributors_exclude_self_loop() {
        let graph = build_dispositor_graph(
            &signs(&[(Body::Mercury, Sign::Gemini), (Body::Venus, Sign::Gemini)]),
            RulershipScheme::Modern,
        )
        .unwrap();
        let mercury = graph.index_of(Body::Mercury).unwrap();
        assert_eq!(graph.in_degree(mercury), 1);
        assert!(graph.has_edge(Body::Venus, Body::Mercury));
        assert!(!graph.has_edge(Body::Mercury, Body::Mercury));
    }

    #[test]
    fn test_traditional_scheme_changes_targets() {
        let map = signs(&[
            (Body::Mars, Sign::Scorpio),
            (Body::Sun, Sign::Aquarius),
            (Body::Saturn, Sign::Capricorn),
        ]);
        let graph = build_dispositor_graph(&map, RulershipScheme::Traditional).unwrap();
        assert!(graph.is_final(graph.index_of(Body::Mars).unwrap()));
        assert_eq!(graph.dispositor_of(Body::Sun), Some(Body::Saturn));
    }
}
