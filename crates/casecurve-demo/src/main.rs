// File: crates/casecurve-demo/src/main.rs
// Summary: Demo CLI; renders a comparison view to JSON or exports growth CSV from saved API replies.

use anyhow::{Context, Result};
use casecurve_core::{
    growth_rows, write_growth_csv, ChangeKind, Config, Dashboard, JsonDirSource, LocationRegistry,
    RenderRequest, TransformKind,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "casecurve", about = "Clean and compare daily case-count series")]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline for one or two locations and print the view as JSON.
    Render {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        compare: Option<String>,
        /// First day to show (YYYY-MM-DD); ignored with --threshold.
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Start each location at the day its confirmed count reached this.
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long, value_enum, default_value_t = TransformArg::Linear)]
        transform: TransformArg,
        #[arg(long, value_enum, default_value_t = ChangeArg::Diff)]
        change: ChangeArg,
        /// Write JSON here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fail on an unknown or empty location instead of falling back.
        #[arg(long)]
        strict: bool,
    },
    /// Write Confirmed/Recovered/Deaths with daily growth for every registered location.
    Export {
        #[arg(long, default_value = "target/out/covid.csv")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TransformArg {
    Linear,
    Log,
    Percent,
}

impl From<TransformArg> for TransformKind {
    fn from(t: TransformArg) -> Self {
        match t {
            TransformArg::Linear => TransformKind::Linear,
            TransformArg::Log => TransformKind::Logarithmic,
            TransformArg::Percent => TransformKind::PercentOfConfirmed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ChangeArg {
    Diff,
    DiffPct,
}

impl From<ChangeArg> for ChangeKind {
    fn from(c: ChangeArg) -> Self {
        match c {
            ChangeArg::Diff => ChangeKind::AbsoluteDelta,
            ChangeArg::DiffPct => ChangeKind::PercentDelta,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casecurve_core=info,casecurve_demo=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config '{}'", path.display()))?,
        None => Config::default(),
    }
    .with_env()
    .context("applying environment overrides")?;

    match cli.command {
        Command::Render { location, compare, from, threshold, transform, change, out, strict } => {
            let mut dashboard = Dashboard::from_config(config).context("building dashboard")?;
            let req = RenderRequest {
                location,
                comparison: compare,
                start_date: from,
                threshold,
                transform: transform.into(),
                change: change.into(),
            };
            let view = if strict {
                dashboard.render(&req).context("rendering view")?
            } else {
                dashboard.render_or_fallback(&req)
            };
            let json = serde_json::to_string_pretty(&view)?;
            match out {
                Some(path) => {
                    ensure_parent(&path)?;
                    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "wrote view");
                }
                None => println!("{json}"),
            }
        }
        Command::Export { out } => {
            let registry = LocationRegistry::load(&config.registry_path)
                .with_context(|| format!("loading registry '{}'", config.registry_path.display()))?;
            let source = JsonDirSource::new(config.data_dir.clone());
            let (rows, failed) = growth_rows(&source, &registry, config.duplicate_policy);
            for (location, err) in &failed {
                eprintln!("skipped {location}: {err}");
            }
            ensure_parent(&out)?;
            let file = std::fs::File::create(&out).with_context(|| format!("creating {}", out.display()))?;
            write_growth_csv(file, &rows)?;
            println!("Wrote {} rows to {}", rows.len(), out.display());
        }
    }
    Ok(())
}

fn ensure_parent(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
