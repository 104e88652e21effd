//! Structural classification of a dispositor graph.
//!
//! Because out-degree is always one, every weakly-connected component holds
//! exactly one cycle. A cycle of length one is a final dispositor (sink);
//! longer cycles are loops. Everything else is a tree branch draining into
//! one of them.

use crate::graph::DispositorGraph;
use crate::paths::{self, AspectPath, CriticalPath, OccupationPath};
use crate::summary::{self, ChainSummary};
use savp_core::aspects::Aspect;
use savp_core::zodiac::{Body, Sign};
use serde::Serialize;
use std::fmt;

/// A body disposing of two or more others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Convergence {
    pub body: Body,
    pub in_degree: usize,
    /// Bodies disposed of by `body`, in canonical order.
    pub contributors: Vec<Body>,
}

/// A cycle of two or more bodies disposing of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loop {
    /// Members in edge order, starting at the canonically smallest.
    pub members: Vec<Body>,
    pub length: usize,
    /// Human-readable form: A → B → C → A
    pub representation: String,
}

/// A single-channel node gating flow into a denser structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Valve {
    pub body: Body,
    /// The dispositor the valve drains into.
    pub into: Body,
    pub into_convergence: bool,
    pub into_loop: bool,
}

/// A loop member fed from outside its loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Engine {
    pub body: Body,
    /// Index into [`Classification::loops`].
    pub loop_index: usize,
    /// Non-loop bodies disposing into `body`, in canonical order.
    pub feeders: Vec<Body>,
}

/// Labels a node can carry. Labels are not exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Sink,
    Convergence,
    Valve,
    LoopMember,
    Engine,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Sink => "sink",
            Role::Convergence => "convergence",
            Role::Valve => "valve",
            Role::LoopMember => "loop member",
            Role::Engine => "engine",
        };
        f.write_str(s)
    }
}

/// Per-node view of the classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRoles {
    pub body: Body,
    pub sign: Sign,
    pub dispositor: Body,
    pub in_degree: usize,
    pub weight: f64,
    pub roles: Vec<Role>,
}

/// Everything derived from one graph. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub sinks: Vec<Body>,
    pub convergences: Vec<Convergence>,
    pub loops: Vec<Loop>,
    pub valves: Vec<Valve>,
    pub engines: Vec<Engine>,
    pub nodes: Vec<NodeRoles>,
    pub occupation_paths: Vec<OccupationPath>,
    pub aspect_paths: Vec<AspectPath>,
    pub critical_paths: Vec<CriticalPath>,
    pub summary: ChainSummary,
}

/// Cycle structure of a graph, in arena indices.
#[derive(Debug, Clone)]
pub(crate) struct Topology {
    pub in_degree: Vec<usize>,
    /// Arena indices of each loop, rotated to start at the smallest index.
    pub loops: Vec<Vec<usize>>,
    /// Loop index of each node, if it sits on a loop.
    pub loop_of: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

impl Topology {
    /// Find every cycle by walking successor edges with a three-state colour
    /// array. Each node is coloured at most once per state, so the whole pass
    /// is linear and never recurses.
    pub fn of(graph: &DispositorGraph) -> Self {
        let n = graph.len();
        let mut color = vec![Color::Unvisited; n];
        let mut walk: Vec<usize> = Vec::with_capacity(n);
        let mut loops: Vec<Vec<usize>> = Vec::new();

        for start in 0..n {
            if color[start] != Color::Unvisited {
                continue;
            }
            walk.clear();
            let mut cur = start;
            while color[cur] == Color::Unvisited {
                color[cur] = Color::InProgress;
                walk.push(cur);
                cur = graph.target(cur);
            }
            // Closing on an in-progress node means this walk found a new
            // cycle; closing on a done node means it drained into an old one.
            if color[cur] == Color::InProgress
                && let Some(pos) = walk.iter().position(|&i| i == cur)
            {
                let mut cycle = walk[pos..].to_vec();
                if cycle.len() >= 2 {
                    if let Some(min_pos) = cycle
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, v)| **v)
                        .map(|(i, _)| i)
                    {
                        cycle.rotate_left(min_pos);
                    }
                    loops.push(cycle);
                }
            }
            for &i in &walk {
                color[i] = Color::Done;
            }
        }

        loops.sort_by_key(|l| l[0]);

        let mut loop_of = vec![None; n];
        for (li, members) in loops.iter().enumerate() {
            for &m in members {
                loop_of[m] = Some(li);
            }
        }

        Self {
            in_degree: (0..n).map(|i| graph.in_degree(i)).collect(),
            loops,
            loop_of,
        }
    }

    pub fn is_convergence(&self, idx: usize) -> bool {
        self.in_degree[idx] >= 2
    }

    pub fn on_loop(&self, idx: usize) -> bool {
        self.loop_of[idx].is_some()
    }
}

/// Format a loop as "A → B → C → A".
fn format_loop(members: &[Body]) -> String {
    let Some(first) = members.first() else {
        return String::new();
    };
    let mut result = members
        .iter()
        .map(|b| b.name())
        .collect::<Vec<_>>()
        .join(" → ");
    result.push_str(" → ");
    result.push_str(first.name());
    result
}

/// Classify every node of `graph` and derive the three path families.
///
/// `aspects` is the chart's aspect relation; it only feeds the aspect paths.
pub fn classify(graph: &DispositorGraph, aspects: &[Aspect]) -> Classification {
    let topo = Topology::of(graph);
    let n = graph.len();
    let body = |i: usize| graph.node(i).body;

    let sinks: Vec<Body> = (0..n).filter(|&i| graph.is_final(i)).map(body).collect();

    let convergences: Vec<Convergence> = (0..n)
        .filter(|&i| topo.is_convergence(i))
        .map(|i| Convergence {
            body: body(i),
            in_degree: topo.in_degree[i],
            contributors: graph.contributors(i).into_iter().map(body).collect(),
        })
        .collect();

    let loops: Vec<Loop> = topo
        .loops
        .iter()
        .map(|members| {
            let members: Vec<Body> = members.iter().map(|&i| body(i)).collect();
            Loop {
                length: members.len(),
                representation: format_loop(&members),
                members,
            }
        })
        .collect();

    let valves: Vec<Valve> = (0..n)
        .filter(|&i| topo.in_degree[i] == 1)
        .filter_map(|i| {
            let t = graph.target(i);
            let into_convergence = topo.is_convergence(t);
            let into_loop = topo.on_loop(t);
            (into_convergence || into_loop).then_some(Valve {
                body: body(i),
                into: body(t),
                into_convergence,
                into_loop,
            })
        })
        .collect();

    let engines: Vec<Engine> = (0..n)
        .filter_map(|i| {
            let li = topo.loop_of[i]?;
            let feeders: Vec<Body> = graph
                .contributors(i)
                .into_iter()
                .filter(|&c| topo.loop_of[c] != Some(li))
                .map(body)
                .collect();
            (!feeders.is_empty()).then(|| Engine {
                body: body(i),
                loop_index: li,
                feeders,
            })
        })
        .collect();

    let nodes: Vec<NodeRoles> = (0..n)
        .map(|i| {
            let b = body(i);
            let mut roles = Vec::new();
            if graph.is_final(i) {
                roles.push(Role::Sink);
            }
            if topo.is_convergence(i) {
                roles.push(Role::Convergence);
            }
            if valves.iter().any(|v| v.body == b) {
                roles.push(Role::Valve);
            }
            if topo.on_loop(i) {
                roles.push(Role::LoopMember);
            }
            if engines.iter().any(|e| e.body == b) {
                roles.push(Role::Engine);
            }
            let node = graph.node(i);
            NodeRoles {
                body: b,
                sign: node.sign,
                dispositor: body(graph.target(i)),
                in_degree: topo.in_degree[i],
                weight: node.weight,
                roles,
            }
        })
        .collect();

    let occupation_paths = paths::occupation_paths(graph);
    let aspect_paths = paths::aspect_paths(graph, aspects);
    let critical_paths = paths::critical_paths(graph, &topo);
    let summary = summary::summarize(graph, &critical_paths, loops.len());

    Classification {
        sinks,
        convergences,
        loops,
        valves,
        engines,
        nodes,
        occupation_paths,
        aspect_paths,
        critical_paths,
        summary,
    }
}

impl Classification {
    /// Roles held by `body`; empty if the body is not in the graph.
    pub fn roles_of(&self, body: Body) -> &[Role] {
        self.nodes
            .iter()
            .find(|n| n.body == body)
            .map(|n| n.roles.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_sink(&self, body: Body) -> bool {
        self.sinks.contains(&body)
    }

    pub fn convergence(&self, body: Body) -> Option<&Convergence> {
        self.convergences.iter().find(|c| c.body == body)
    }

    pub fn critical_path(&self, body: Body) -> Option<&CriticalPath> {
        self.critical_paths.iter().find(|p| p.body == body)
    }
}
