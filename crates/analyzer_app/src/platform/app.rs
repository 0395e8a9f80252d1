use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use analyzer_core::Phase;
use analyzer_engine::{Orchestrator, ReqwestBackend};
use analyzer_logging::{analyzer_info, analyzer_warn};
use anyhow::Context;
use clap::Parser;

use super::config::{load_config, ApiVariantSetting, AppConfig, ConfigError};
use super::logging::{self, LogDestination};
use super::terminal::TerminalSink;
use super::ui::layout;

/// Analyze web pages through the page-analysis backend.
#[derive(Debug, Parser)]
#[command(name = "analyzer", version)]
pub struct Args {
    /// URL to analyze once. Without it, URLs are read from stdin line by line.
    pub url: Option<String>,

    /// Path to the RON configuration file.
    #[arg(long, default_value = "analyzer.ron")]
    pub config: PathBuf,

    /// Backend base URL (overrides config file and environment).
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Backend endpoint shape.
    #[arg(long, value_enum)]
    pub variant: Option<ApiVariantSetting>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

pub fn run_app(args: Args) -> anyhow::Result<ExitCode> {
    let loaded = load_config(&args.config);
    let mut config = loaded
        .as_ref()
        .ok()
        .cloned()
        .flatten()
        .unwrap_or_default();
    config.apply_env_overrides(|key| std::env::var(key).ok());
    if let Some(url) = args.backend_url {
        config.backend_url = url;
    }
    if let Some(variant) = args.variant {
        config.api_variant = variant;
    }
    if let Some(destination) = args.log {
        config.log_destination = destination;
    }

    if let Err(err) = logging::initialize(&config.log_settings()) {
        analyzer_warn!("{}; logging to the terminal instead", err);
    }
    report_config(&args.config, &loaded);
    analyzer_info!(
        "Backend {} variant {:?}",
        config.backend_url,
        config.api_variant
    );

    let backend = ReqwestBackend::new(config.client_settings())
        .with_context(|| format!("cannot use backend {:?}", config.backend_url))?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let mut orchestrator = Orchestrator::new(Arc::new(backend));
    orchestrator.subscribe(Box::new(TerminalSink));

    if let Some(url) = args.url {
        runtime.block_on(orchestrator.submit(&url));
        let code = match orchestrator.ui().phase() {
            Phase::Success => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        };
        return Ok(code);
    }

    let mut out = std::io::stdout();
    for line in layout::banner(&config.backend_url) {
        writeln!(out, "{line}")?;
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        write!(out, "{}", layout::PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            writeln!(out)?;
            break;
        }
        runtime.block_on(orchestrator.submit(&line));
    }

    Ok(ExitCode::SUCCESS)
}

fn report_config(path: &Path, loaded: &Result<Option<AppConfig>, ConfigError>) {
    match loaded {
        Ok(Some(_)) => analyzer_info!("Loaded config from {:?}", path),
        Ok(None) => analyzer_info!("No config at {:?}, using defaults", path),
        Err(err) => analyzer_warn!("{}; using defaults", err),
    }
}
