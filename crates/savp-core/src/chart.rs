//! Chart snapshots: the already-computed positions the analysis consumes,
//! and their JSON persistence.

use crate::aspects::{self, Aspect};
use crate::config::{AspectConfig, SavpConfig};
use crate::dignity::{self, Weighting};
use crate::error::ChartError;
use crate::zodiac::{Body, Sign};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Where a body sits in the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub sign: Sign,
    /// Degree within the sign, `0 <= degree < 30`.
    pub degree: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    #[serde(default)]
    pub retrograde: bool,
}

impl Placement {
    pub fn new(sign: Sign) -> Self {
        Self {
            sign,
            degree: 0.0,
            house: None,
            retrograde: false,
        }
    }

    /// Absolute ecliptic longitude, `0..360`.
    pub fn longitude(&self) -> f64 {
        self.sign.start_longitude() + self.degree
    }
}

/// A complete chart as produced by the ephemeris wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment: Option<DateTime<Utc>>,
    pub placements: BTreeMap<Body, Placement>,
    /// Aspects supplied by the producer. When empty, aspects are detected
    /// from the placements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<Aspect>,
}

impl ChartSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style placement insertion.
    pub fn with(mut self, body: Body, placement: Placement) -> Self {
        self.placements.insert(body, placement);
        self
    }

    /// Occupied sign for every placed body.
    pub fn sign_by_body(&self) -> BTreeMap<Body, Sign> {
        self.placements
            .iter()
            .map(|(&body, p)| (body, p.sign))
            .collect()
    }

    /// Check degrees and houses are in range.
    pub fn validate(&self) -> Result<(), ChartError> {
        for (body, p) in &self.placements {
            if !(0.0..30.0).contains(&p.degree) {
                return Err(ChartError::DegreeOutOfRange {
                    body: body.to_string(),
                    degree: p.degree,
                });
            }
            if let Some(house) = p.house
                && !(1..=12).contains(&house)
            {
                return Err(ChartError::HouseOutOfRange {
                    body: body.to_string(),
                    house,
                });
            }
        }
        Ok(())
    }

    /// Supplied aspects, or aspects detected from positions if none were
    /// supplied.
    pub fn effective_aspects(&self, config: &AspectConfig) -> Vec<Aspect> {
        if self.aspects.is_empty() {
            aspects::detect_aspects(&self.placements, config)
        } else {
            self.aspects.clone()
        }
    }

    /// Weighting breakdown for every placed body.
    pub fn weightings(&self, config: &SavpConfig) -> BTreeMap<Body, Weighting> {
        let aspects = self.effective_aspects(&config.aspects);
        let exact = aspects::exact_counts(&aspects, &config.aspects);
        self.placements
            .iter()
            .map(|(&body, p)| {
                let n = exact.get(&body).copied().unwrap_or(0);
                (body, dignity::weigh(body, p, n, &config.weighting))
            })
            .collect()
    }
}

/// Serialize a chart to a pretty-printed JSON string.
pub fn to_json(chart: &ChartSnapshot) -> Result<String> {
    serde_json::to_string_pretty(chart).context("failed to serialize chart to JSON")
}

/// Deserialize and validate a chart from a JSON string.
pub fn from_json(json: &str) -> Result<ChartSnapshot> {
    let chart: ChartSnapshot =
        serde_json::from_str(json).context("failed to deserialize chart from JSON")?;
    chart.validate()?;
    Ok(chart)
}

/// Load a chart from disk.
pub fn load(path: &Path) -> Result<ChartSnapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read chart from {}", path.display()))?;
    from_json(&json)
}

/// Save a chart to disk, creating parent directories if needed.
pub fn save(path: &Path, chart: &ChartSnapshot) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let json = to_json(chart)?;
    fs::write(path, json).with_context(|| format!("failed to write chart to {}", path.display()))?;
    Ok(())
}
