//! framelog - ordered multi-sink log delivery demo host
//!
//! Usage:
//!   framelog                 Run demo jobs in the terminal UI
//!   framelog run             Run demo jobs headless (stderr mirror)
//!   framelog snapshot        Dump the effective config to the config channel

mod app;
mod cli;
mod input;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use framelog::config::{self, Config, DeliveryMode};
use framelog::constants::CONFIG_SNAPSHOT_CHANNEL;
use framelog::logging::{self, LogPipeline};
use tracing::warn;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut cfg = config::load(&config::config_path(cli.config.as_deref()));
    if let Some(dir) = &cli.logs_dir {
        cfg.logs.dir = dir.clone();
    }
    if cli.inline {
        cfg.logs.delivery = DeliveryMode::Inline;
    }

    let command = cli.command.clone().unwrap_or(Command::Watch);
    if let Command::Run { jobs, frames } = &command {
        if let Some(jobs) = jobs {
            cfg.demo.jobs = *jobs;
        }
        if let Some(frames) = frames {
            cfg.demo.frames = *frames;
        }
    }
    cfg.validate()?;

    let rt = tokio::runtime::Runtime::new()?;

    match command {
        Command::Watch => rt.block_on(run_tui(cfg)),
        Command::Run { .. } => rt.block_on(run_headless(cfg)),
        Command::Snapshot { append } => run_snapshot(&cfg, append),
    }
}

async fn run_tui(mut cfg: Config) -> Result<()> {
    // stderr would scribble over the alternate screen
    cfg.logs.console_mirror = false;
    let pipeline = LogPipeline::start(&cfg.logs)?;

    let mut app = app::App::new(cfg, pipeline.handle());
    app.start_jobs();
    let result = ui::run(&mut app).await;

    drop(app);
    pipeline.shutdown();
    Ok(result?)
}

async fn run_headless(cfg: Config) -> Result<()> {
    let pipeline = LogPipeline::start(&cfg.logs)?;
    let log = pipeline.handle();

    tokio::select! {
        summary = framelog::jobs::run_jobs(log.clone(), &cfg.demo) => {
            tracing::debug!("Jobs finished: {:?}", summary);
        }
        _ = tokio::signal::ctrl_c() => {
            log.log("Interrupted, flushing logs");
        }
    }

    pipeline.shutdown();
    Ok(())
}

fn run_snapshot(cfg: &Config, append: bool) -> Result<()> {
    let pipeline = LogPipeline::start(&cfg.logs)?;
    let dump = config::snapshot(cfg)?;

    if let Err(e) = pipeline.write_to_file(&dump, append, CONFIG_SNAPSHOT_CHANNEL) {
        warn!("Config snapshot not written: {}", e);
    }
    pipeline.log_entry(
        framelog::LogEntry::new(format!(
            "Config snapshot written to {} channel",
            CONFIG_SNAPSHOT_CHANNEL
        ))
        .hidden(),
    );

    pipeline.shutdown();
    Ok(())
}
