use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

mod config;
mod discovery;
mod flags;
mod report;
mod runner;

use config::TintConfig;
use flags::Mode;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "tint")]
#[command(about = "Replace hardcoded colors with design tokens", long_about = None)]
#[command(version)]
struct Cli {
    /// What the run may write
    #[arg(long, value_enum, default_value_t = Mode::Report)]
    mode: Mode,

    /// Project root; every configured path is relative to it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to <root>/tint.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the color map as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = TintConfig::load(&cli.root, cli.config.as_deref())?;
    let execution = runner::execute(&cli.root, &config, cli.mode).await?;

    if cli.json {
        let json = execution
            .color_map
            .to_json_pretty()
            .context("Failed to serialize color map")?;
        print_stdout(json.trim_end())?;
    } else {
        print_stdout(&execution.summary_lines().join("\n"))?;
    }

    log::debug!(
        "{} files changed in {} mode",
        execution.outcome.changed.len(),
        execution.mode.as_str()
    );
    Ok(())
}
