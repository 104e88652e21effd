//! The three path families over a dispositor graph: occupation, aspect and
//! critical paths.

use crate::classify::Topology;
use crate::graph::{DispositorGraph, Edge};
use crate::summary::round;
use savp_core::aspects::{Aspect, AspectKind};
use savp_core::tree::{self, Sephirah};
use savp_core::zodiac::{Body, Sign};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// A node's single outgoing edge, labelled by what it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupationPath {
    pub body: Body,
    pub sign: Sign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    pub dispositor: Body,
    pub self_ruled: bool,
    pub sephirah: Sephirah,
    /// Numbers of the tree paths touching `sephirah`.
    pub tree_paths: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Medium,
    High,
}

/// An aspect between two graph bodies, cross-referenced against the
/// dispositor edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectPath {
    /// The pair in canonical order.
    pub bodies: (Body, Body),
    pub kind: AspectKind,
    pub orb: f64,
    /// True when a dispositor edge also joins the pair.
    pub reinforced: bool,
    /// Sum of both bodies' weights.
    pub combined_weight: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dispositor_edges: Vec<Edge>,
    /// Tree path joining the two sephiroth, if they are adjacent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_path: Option<u8>,
    pub urgency: Urgency,
}

/// Where a chain ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Terminus {
    Sink { body: Body },
    /// Index into the classification's loop list.
    Loop { index: usize },
}

/// The walk from a non-sink body to the sink or loop it drains into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    pub body: Body,
    /// Starts at `body`; ends at the sink, or at the first loop member reached.
    pub walk: Vec<Body>,
    pub terminus: Terminus,
}

/// One occupation path per node, in canonical order.
pub fn occupation_paths(graph: &DispositorGraph) -> Vec<OccupationPath> {
    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let sephirah = Sephirah::of(node.body);
            OccupationPath {
                body: node.body,
                sign: node.sign,
                house: node.house,
                dispositor: graph.node(graph.target(i)).body,
                self_ruled: graph.scheme().rules(node.body, node.sign),
                sephirah,
                tree_paths: tree::paths_touching(sephirah)
                    .iter()
                    .map(|p| p.number)
                    .collect(),
            }
        })
        .collect()
}

/// One aspect path per unordered body pair, sorted by pair.
///
/// The first aspect supplied for a pair wins. Aspects touching a body outside
/// the graph, or joining a body to itself, are skipped.
pub fn aspect_paths(graph: &DispositorGraph, aspects: &[Aspect]) -> Vec<AspectPath> {
    let mut seen: BTreeSet<(Body, Body)> = BTreeSet::new();
    let mut paths = Vec::new();

    for aspect in aspects {
        let (a, b) = aspect.pair();
        let (Some(ia), Some(ib)) = (graph.index_of(a), graph.index_of(b)) else {
            debug!(a = %aspect.a, b = %aspect.b, "aspect outside dispositor graph, skipped");
            continue;
        };
        if ia == ib {
            continue;
        }
        if !seen.insert((a, b)) {
            continue;
        }

        let dispositor_edges: Vec<Edge> = [(a, b), (b, a)]
            .into_iter()
            .filter(|&(from, to)| graph.has_edge(from, to))
            .map(|(from, to)| Edge { from, to })
            .collect();

        paths.push(AspectPath {
            bodies: (a, b),
            kind: aspect.kind,
            orb: aspect.orb,
            reinforced: !dispositor_edges.is_empty(),
            combined_weight: round(graph.node(ia).weight + graph.node(ib).weight, 2),
            dispositor_edges,
            tree_path: tree::path_between(Sephirah::of(a), Sephirah::of(b)).map(|p| p.number),
            urgency: if aspect.kind.is_hard() {
                Urgency::High
            } else {
                Urgency::Medium
            },
        });
    }

    paths.sort_by_key(|p| p.bodies);
    paths
}

/// Walk every non-sink node forward until it reaches a sink or a loop.
pub(crate) fn critical_paths(graph: &DispositorGraph, topo: &Topology) -> Vec<CriticalPath> {
    let n = graph.len();
    let mut paths = Vec::new();

    for start in 0..n {
        if graph.is_final(start) {
            continue;
        }
        let mut walk = vec![graph.node(start).body];
        let mut cur = start;
        // A functional graph reaches its cycle within n steps.
        for _ in 0..n {
            if graph.is_final(cur) {
                paths.push(CriticalPath {
                    body: graph.node(start).body,
                    walk,
                    terminus: Terminus::Sink {
                        body: graph.node(cur).body,
                    },
                });
                break;
            }
            if let Some(index) = topo.loop_of[cur] {
                paths.push(CriticalPath {
                    body: graph.node(start).body,
                    walk,
                    terminus: Terminus::Loop { index },
                });
                break;
            }
            cur = graph.target(cur);
            walk.push(graph.node(cur).body);
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_dispositor_graph;
    use savp_core::rulership::RulershipScheme;
    use std::collections::BTreeMap;

    fn graph_of(pairs: &[(Body, Sign)]) -> DispositorGraph {
        let map: BTreeMap<Body, Sign> = pairs.iter().copied().collect();
        build_dispositor_graph(&map, RulershipScheme::Modern).unwrap()
    }

    fn aspect(a: Body, b: Body, kind: AspectKind) -> Aspect {
        Aspect { a, b, kind, orb: 2.0 }
    }

    #[test]
    fn test_occupation_labels() {
        let graph = graph_of(&[(Body::Sun, Sign::Leo), (Body::Pluto, Sign::Leo)]);
        let paths = occupation_paths(&graph);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].self_ruled);
        assert_eq!(paths[0].sephirah, Sephirah::Tiphareth);
        assert_eq!(paths[0].tree_paths.len(), 8);
        assert_eq!(paths[1].body, Body::Pluto);
        assert_eq!(paths[1].dispositor, Body::Sun);
        assert!(paths[1].tree_paths.is_empty());
    }

    #[test]
    fn test_aspect_paths_dedup_and_reinforce() {
        // Venus in Gemini disposes into Mercury.
        let graph = graph_of(&[(Body::Mercury, Sign::Gemini), (Body::Venus, Sign::Gemini)]);
        let aspects = vec![
            aspect(Body::Venus, Body::Mercury, AspectKind::Conjunction),
            aspect(Body::Mercury, Body::Venus, AspectKind::Sextile),
            aspect(Body::Venus, Body::Jupiter, AspectKind::Square),
        ];
        let paths = aspect_paths(&graph, &aspects);
        assert_eq!(paths.len(), 1);
        let p = &paths[0];
        assert_eq!(p.bodies, (Body::Mercury, Body::Venus));
        assert_eq!(p.kind, AspectKind::Conjunction);
        assert!(p.reinforced);
        // Graphs built from signs alone weigh every body 1.0.
        assert_eq!(p.combined_weight, 2.0);
        assert_eq!(
            p.dispositor_edges,
            vec![Edge {
                from: Body::Venus,
                to: Body::Mercury
            }]
        );
        // Hod–Netzach
        assert_eq!(p.tree_path, Some(27));
        assert_eq!(p.urgency, Urgency::Medium);
    }

    #[test]
    fn test_unreinforced_hard_aspect() {
        let graph = graph_of(&[(Body::Sun, Sign::Leo), (Body::Moon, Sign::Cancer)]);
        let paths = aspect_paths(&graph, &[aspect(Body::Sun, Body::Moon, AspectKind::Square)]);
        assert_eq!(paths.len(), 1);
        assert!(!paths[0].reinforced);
        assert_eq!(paths[0].urgency, Urgency::High);
        // Tiphareth–Yesod
        assert_eq!(paths[0].tree_path, Some(25));
    }

    #[test]
    fn test_critical_path_to_loop_entry() {
        // Sun (Aries) → Mars, inside Mars → Venus → Mercury → Mars.
        let graph = graph_of(&[
            (Body::Sun, Sign::Aries),
            (Body::Mars, Sign::Taurus),
            (Body::Venus, Sign::Gemini),
            (Body::Mercury, Sign::Aries),
        ]);
        let topo = Topology::of(&graph);
        let paths = critical_paths(&graph, &topo);
        assert_eq!(paths.len(), 4);
        let sun = paths.iter().find(|p| p.body == Body::Sun).unwrap();
        assert_eq!(sun.walk, vec![Body::Sun, Body::Mars]);
        assert_eq!(sun.terminus, Terminus::Loop { index: 0 });
        let venus = paths.iter().find(|p| p.body == Body::Venus).unwrap();
        assert_eq!(venus.walk, vec![Body::Venus]);
    }
}
