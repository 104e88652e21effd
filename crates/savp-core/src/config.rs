//! Configuration for chart weighting, aspect orbs and chain analysis.
//!
//! Load order: `.savp/config.toml` → environment variables → defaults.

use crate::aspects::AspectKind;
use crate::rulership::RulershipScheme;
use crate::zodiac::Body;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".savp";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SavpConfig {
    pub chain: ChainConfig,
    pub aspects: AspectConfig,
    pub weighting: WeightingConfig,
}

/// Dispositor chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Rulership table used to find each body's dispositor.
    pub rulership: RulershipScheme,
    /// Bodies the chain is built over. Rulers reached from these are pulled
    /// in automatically.
    pub bodies: Vec<Body>,
}

/// Orbs, in degrees, for each aspect kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectConfig {
    pub conjunction_orb: f64,
    pub sextile_orb: f64,
    pub square_orb: f64,
    pub trine_orb: f64,
    pub opposition_orb: f64,
    /// Aspects within this orb count as exact for weighting.
    pub exact_orb: f64,
}

/// Multipliers for the second weighting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingConfig {
    /// Houses 1, 4, 7, 10.
    pub angular: f64,
    /// Houses 2, 5, 8, 11.
    pub succedent: f64,
    /// Houses 3, 6, 9, 12.
    pub cadent: f64,
    pub retrograde: f64,
    /// Added per exact aspect.
    pub aspect_step: f64,
    /// Ceiling on the total aspect bonus.
    pub aspect_cap: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rulership: RulershipScheme::Modern,
            bodies: Body::ALL.to_vec(),
        }
    }
}

impl Default for AspectConfig {
    fn default() -> Self {
        Self {
            conjunction_orb: 8.0,
            sextile_orb: 6.0,
            square_orb: 8.0,
            trine_orb: 8.0,
            opposition_orb: 8.0,
            exact_orb: 3.0,
        }
    }
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            angular: 1.20,
            succedent: 1.00,
            cadent: 0.85,
            retrograde: 0.90,
            aspect_step: 0.07,
            aspect_cap: 0.35,
        }
    }
}

impl AspectConfig {
    pub fn orb(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction_orb,
            AspectKind::Sextile => self.sextile_orb,
            AspectKind::Square => self.square_orb,
            AspectKind::Trine => self.trine_orb,
            AspectKind::Opposition => self.opposition_orb,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

/// Path of the config file for a given project root.
pub fn config_file(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

impl SavpConfig {
    /// Load config from `.savp/config.toml` in the project root, with env var
    /// overrides. Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = config_file(project_root);

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        env_override("SAVP_RULERSHIP", &mut config.chain.rulership);
        env_override("SAVP_EXACT_ORB", &mut config.aspects.exact_orb);
        env_override("SAVP_ASPECT_CAP", &mut config.weighting.aspect_cap);

        config.validate()?;
        Ok(config)
    }

    /// Reject orbs and caps that would make weighting meaningless.
    pub fn validate(&self) -> Result<()> {
        for kind in AspectKind::ALL {
            let orb = self.aspects.orb(kind);
            if orb < 0.0 {
                anyhow::bail!("{} orb must be non-negative, got {}", kind, orb);
            }
        }
        if self.aspects.exact_orb < 0.0 {
            anyhow::bail!(
                "exact_orb must be non-negative, got {}",
                self.aspects.exact_orb
            );
        }
        if self.weighting.aspect_cap < 0.0 {
            anyhow::bail!(
                "aspect_cap must be non-negative, got {}",
                self.weighting.aspect_cap
            );
        }
        Ok(())
    }
}
