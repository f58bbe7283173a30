//! keystroke-engine - control surface keystroke engine
//!
//! Entry point for the replay binary: loads a template and feeds an event
//! script through the engine, logging every keystroke it would inject.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keystroke_engine::config::{Config, DispatchMode};
use keystroke_engine::input::{Actions, KeystrokeDispatcher, TracingEmitter};
use keystroke_engine::replay;

/// Command-line arguments for keystroke-engine
#[derive(Parser, Debug)]
#[command(name = "keystroke-engine")]
#[command(version, about = "Control surface keystroke engine", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "KEYSTROKE_ENGINE_CONFIG")]
    pub config: Option<String>,

    /// Action template (TOML)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Event script to replay (stdin if omitted)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Inject through the dispatch queue instead of inline
    #[arg(long)]
    pub queued: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path),
        None => Config::default_config(),
    };
    let config = match config {
        Ok(config) => config.with_overrides(args.template.clone(), args.queued),
        Err(e) => {
            eprintln!("{}", keystroke_engine::utils::format_user_error(&e));
            return Err(e);
        }
    };

    init_logging(&args, &config)?;

    info!("keystroke-engine v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = run(&args, &config) {
        eprintln!("{}", keystroke_engine::utils::format_user_error(&e));
        return Err(e);
    }

    Ok(())
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let (actions, dispatcher) = match config.dispatch_mode() {
        DispatchMode::Inline => (Actions::new(TracingEmitter), None),
        DispatchMode::Queued { capacity } => {
            let dispatcher = Arc::new(
                KeystrokeDispatcher::spawn(TracingEmitter, capacity)
                    .context("Failed to start keystroke dispatcher")?,
            );
            let actions = Actions::with_shared_emitter(dispatcher.clone());
            (actions, Some(dispatcher))
        }
    };

    if let Some(path) = &config.engine.template {
        let template = replay::load_template_file(path)
            .with_context(|| format!("Failed to load template: {}", path.display()))?;
        actions.load_template(template);
    } else {
        tracing::warn!("No template configured, every event resolves to no keystroke");
    }

    let applied = match &args.script {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            replay::replay(BufReader::new(file), &actions)
        }
        None => replay::replay(std::io::stdin().lock(), &actions),
    }
    .context("Replay failed")?;

    let stats = actions.stats();
    drop(actions);

    if let Some(dispatcher) = dispatcher {
        match Arc::try_unwrap(dispatcher) {
            Ok(dispatcher) => {
                debug!(
                    "Closing keystroke queue (capacity: {}, pending: {}, dropped: {})",
                    dispatcher.capacity(),
                    dispatcher.pending(),
                    dispatcher.dropped()
                );
                dispatcher
                    .shutdown()
                    .context("Keystroke dispatcher did not shut down cleanly")?;
            }
            Err(shared) => drop(shared),
        }
    }

    info!(
        "Replayed {} events: {} keystroke events emitted, {} suppressed",
        applied, stats.keystrokes_emitted, stats.events_suppressed
    );
    debug!("Engine stats: {}", serde_json::to_string(&stats)?);
    Ok(())
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    use std::fs::File;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::writer::BoxMakeWriter;

    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "keystroke_engine={level},keystroke={level},warn",
            level = log_level
        ))
    });

    // File sink: explicit --log-file wins over the configured log directory
    let file_writer = match (&args.log_file, &config.logging.log_dir) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path))?;
            Some((BoxMakeWriter::new(Mutex::new(file)), path.clone()))
        }
        (None, Some(dir)) => Some((
            BoxMakeWriter::new(tracing_appender::rolling::daily(dir, "keystroke-engine.log")),
            dir.join("keystroke-engine.log.*").display().to_string(),
        )),
        (None, None) => None,
    };

    // If a file sink is configured, write to both stdout and file
    if let Some((file, log_file_path)) = file_writer {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path);
    } else {
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact())
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .init();
            }
        }
    }

    Ok(())
}
