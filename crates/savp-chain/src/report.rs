//! End-to-end analysis of a chart snapshot, and a plain-text rendering of
//! the result.

use crate::classify::{Classification, classify};
use crate::error::ChainError;
use crate::graph::DispositorGraph;
use crate::paths::Terminus;
use savp_core::aspects::Aspect;
use savp_core::chart::ChartSnapshot;
use savp_core::config::SavpConfig;
use savp_core::rulership::RulershipScheme;
use serde::Serialize;
use std::fmt::Write;
use tracing::info;

/// Full dispositor chain analysis for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub rulership: RulershipScheme,
    /// The aspect relation the aspect paths were derived from.
    pub aspects: Vec<Aspect>,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Build the dispositor graph for `chart` and classify it.
pub fn analyze(chart: &ChartSnapshot, config: &SavpConfig) -> Result<ChainReport, ChainError> {
    let graph = DispositorGraph::from_chart(chart, config)?;
    let aspects = chart.effective_aspects(&config.aspects);
    let classification = classify(&graph, &aspects);

    info!(
        bodies = graph.len(),
        sinks = classification.sinks.len(),
        loops = classification.loops.len(),
        convergences = classification.convergences.len(),
        "dispositor chain analyzed"
    );

    Ok(ChainReport {
        subject: chart.subject.clone(),
        rulership: graph.scheme(),
        aspects,
        classification,
    })
}

fn describe_terminus(report: &ChainReport, terminus: Terminus) -> String {
    match terminus {
        Terminus::Sink { body } => body.to_string(),
        Terminus::Loop { index } => report
            .classification
            .loops
            .get(index)
            .map_or_else(
                || format!("loop #{}", index),
                |l| format!("loop {}", l.representation),
            ),
    }
}

/// Render a report as indented plain text.
pub fn render_text(report: &ChainReport) -> String {
    let c = &report.classification;
    let mut out = String::new();

    if let Some(subject) = &report.subject {
        writeln!(out, "Chart: {}", subject).unwrap();
    }
    writeln!(out, "Rulership: {}", report.rulership).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "Chain:").unwrap();
    for node in &c.nodes {
        let roles = node
            .roles
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            out,
            "  {} {} in {} → {}",
            node.body.symbol(),
            node.body,
            node.sign,
            node.dispositor
        )
        .unwrap();
        if !roles.is_empty() {
            write!(out, " [{}]", roles).unwrap();
        }
        writeln!(out, " (weight {:.2})", node.weight).unwrap();
    }

    if !c.sinks.is_empty() {
        let names: Vec<String> = c.sinks.iter().map(|b| b.to_string()).collect();
        writeln!(out, "\nFinal dispositors: {}", names.join(", ")).unwrap();
    }

    if !c.convergences.is_empty() {
        writeln!(out, "\nConvergences:").unwrap();
        for conv in &c.convergences {
            let from: Vec<String> = conv.contributors.iter().map(|b| b.to_string()).collect();
            writeln!(
                out,
                "  {} ← {} ({} inputs)",
                conv.body,
                from.join(", "),
                conv.in_degree
            )
            .unwrap();
        }
    }

    if !c.loops.is_empty() {
        writeln!(out, "\nLoops:").unwrap();
        for l in &c.loops {
            writeln!(out, "  {}", l.representation).unwrap();
        }
    }

    if !c.valves.is_empty() {
        writeln!(out, "\nValves:").unwrap();
        for v in &c.valves {
            writeln!(out, "  {} → {}", v.body, v.into).unwrap();
        }
    }

    if !c.engines.is_empty() {
        writeln!(out, "\nEngines:").unwrap();
        for e in &c.engines {
            let from: Vec<String> = e.feeders.iter().map(|b| b.to_string()).collect();
            writeln!(out, "  {} fed by {}", e.body, from.join(", ")).unwrap();
        }
    }

    if !c.aspect_paths.is_empty() {
        writeln!(out, "\nAspect paths:").unwrap();
        for p in &c.aspect_paths {
            write!(
                out,
                "  {} {} {} (orb {:.2}, weight {:.2})",
                p.bodies.0, p.kind, p.bodies.1, p.orb, p.combined_weight
            )
            .unwrap();
            if p.reinforced {
                write!(out, " reinforced").unwrap();
            }
            if let Some(n) = p.tree_path {
                write!(out, " path {}", n).unwrap();
            }
            writeln!(out).unwrap();
        }
    }

    writeln!(out, "\nCritical paths:").unwrap();
    for p in &c.critical_paths {
        let walk: Vec<String> = p.walk.iter().map(|b| b.to_string()).collect();
        writeln!(
            out,
            "  {} ⇒ {}",
            walk.join(" → "),
            describe_terminus(report, p.terminus)
        )
        .unwrap();
    }

    let s = &c.summary;
    if let Some(dominant) = s.dominant {
        writeln!(
            out,
            "\nDominant terminus: {}",
            describe_terminus(report, dominant)
        )
        .unwrap();
    }
    writeln!(out, "Pillars:").unwrap();
    for share in &s.pillars {
        writeln!(
            out,
            "  {:?}: {:.1}% (weight {:.2})",
            share.pillar, share.percent, share.weight
        )
        .unwrap();
    }

    out
}
