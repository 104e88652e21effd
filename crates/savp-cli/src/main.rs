//! CLI binary for SAVP: analyze the dispositor chain of a chart snapshot.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use savp_core::config::SavpConfig;
use savp_core::rulership::RulershipScheme;
use savp_core::zodiac::Body;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "savp", about = "SAVP dispositor chain analyzer")]
struct Cli {
    /// Project root holding .savp/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and classify the dispositor chain of a chart
    Analyze {
        /// Chart snapshot (JSON)
        chart: PathBuf,

        /// Output format: json, text
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Override the configured rulership scheme: modern, traditional
        #[arg(short, long)]
        rulership: Option<String>,
    },

    /// List the aspects detected from a chart's positions
    Aspects {
        /// Chart snapshot (JSON)
        chart: PathBuf,

        /// Only list aspects involving this body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    match cli.command {
        Commands::Analyze {
            chart,
            format,
            rulership,
        } => cmd_analyze(&project_root, &chart, &format, rulership.as_deref()),
        Commands::Aspects { chart, body } => cmd_aspects(&project_root, &chart, body.as_deref()),
        Commands::Config => cmd_config(&project_root),
    }
}

fn cmd_analyze(
    project_root: &Path,
    chart_path: &Path,
    format: &str,
    rulership: Option<&str>,
) -> Result<()> {
    let mut config = SavpConfig::load(project_root)?;
    if let Some(name) = rulership {
        config.chain.rulership = name.parse::<RulershipScheme>()?;
    }

    let chart = savp_core::chart::load(chart_path)?;
    tracing::debug!(
        path = %chart_path.display(),
        bodies = chart.placements.len(),
        rulership = %config.chain.rulership,
        "chart loaded"
    );
    let report = savp_chain::analyze(&chart, &config)
        .with_context(|| format!("failed to analyze {}", chart_path.display()))?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize chain report")?;
            println!("{}", json);
        }
        "text" | "txt" => print!("{}", savp_chain::report::render_text(&report)),
        _ => anyhow::bail!("Unknown output format: {}. Use 'json' or 'text'.", format),
    }

    Ok(())
}

fn cmd_aspects(project_root: &Path, chart_path: &Path, body: Option<&str>) -> Result<()> {
    let config = SavpConfig::load(project_root)?;
    let chart = savp_core::chart::load(chart_path)?;
    let body = body.map(str::parse::<Body>).transpose()?;

    let mut aspects = savp_core::aspects::detect_aspects(&chart.placements, &config.aspects);
    if let Some(body) = body {
        aspects.retain(|a| a.involves(body));
    }
    if aspects.is_empty() {
        eprintln!("No aspects within configured orbs.");
        return Ok(());
    }

    for aspect in &aspects {
        let exact = if aspect.is_exact(&config.aspects) {
            " (exact)"
        } else {
            ""
        };
        println!(
            "{} {} {}  orb {:.2}{}",
            aspect.a, aspect.kind, aspect.b, aspect.orb, exact
        );
    }

    Ok(())
}

fn cmd_config(project_root: &Path) -> Result<()> {
    let config = SavpConfig::load(project_root)?;
    let toml = toml::to_string_pretty(&config).context("failed to serialize config")?;
    print!("{}", toml);
    Ok(())
}
