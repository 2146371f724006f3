use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, builder::PossibleValuesParser};

use crate::template::NavEntry;
use crate::updater::WriteMode;

/// Dashboard pages whose sidebar is kept in sync, relative to the root.
const DEFAULT_TARGETS: &[(&str, &str)] = &[
    ("web/projects/teklif.html", "teklif"),
    ("web/projects/sozlesme.html", "sozlesme"),
    ("web/projects/odeme-takibi.html", "odeme"),
];

#[derive(Debug, Parser)]
#[command(
    name = "sidebar-sync",
    version,
    about = "Rewrite the shared navigation sidebar of the project dashboard pages."
)]
pub struct Cli {
    /// Directory the dashboard page paths are resolved against.
    #[arg(long, env = "SIDEBAR_SYNC_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Report which pages would change without writing them.
    #[arg(long, env = "SIDEBAR_SYNC_CHECK")]
    pub check: bool,

    /// Only update pages whose active entry is one of these ids.
    #[arg(long = "only", value_name = "ID", value_parser = PossibleValuesParser::new(NavEntry::ALL.map(NavEntry::id)))]
    pub only: Vec<String>,
}

/// One page to rewrite and the navigation entry flagged active on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub active_page: String,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, active_page: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            active_page: active_page.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub mode: WriteMode,
    pub targets: Vec<Target>,
}

impl Config {
    pub fn from_cli() -> Result<Self> {
        Config::from_parts(Cli::parse())
    }

    fn from_parts(cli: Cli) -> Result<Self> {
        let metadata = std::fs::metadata(&cli.root)
            .with_context(|| format!("cannot access root directory {}", cli.root.display()))?;
        if !metadata.is_dir() {
            return Err(anyhow!("root {} is not a directory", cli.root.display()));
        }

        let targets = default_targets()
            .into_iter()
            .filter(|target| cli.only.is_empty() || cli.only.contains(&target.active_page))
            .map(|target| Target::new(cli.root.join(&target.path), target.active_page))
            .collect::<Vec<_>>();

        if targets.is_empty() {
            return Err(anyhow!(
                "no dashboard page matches --only {}",
                cli.only.join(", ")
            ));
        }

        let mode = if cli.check {
            WriteMode::Check
        } else {
            WriteMode::Apply
        };

        Ok(Self {
            root: cli.root,
            mode,
            targets,
        })
    }
}

pub fn default_targets() -> Vec<Target> {
    DEFAULT_TARGETS
        .iter()
        .map(|(path, active)| Target::new(*path, *active))
        .collect()
}
