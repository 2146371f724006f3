use std::process::ExitCode;

use anyhow::{Context, Result};
use log::info;
use sidebar_sync::Config;
use sidebar_sync::Updater;
use sidebar_sync::pipeline::sync_all;

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_default_env().init();

    let config = Config::from_cli()?;
    let updater = Updater::builtin(config.mode).context("failed to load sidebar template")?;
    info!(
        "syncing {} page(s) under {}",
        config.targets.len(),
        config.root.display()
    );

    let summary = sync_all(&updater, &config.targets);
    println!("{summary}");

    if summary.is_success(config.mode) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
