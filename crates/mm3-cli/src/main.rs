//! mm3sum: print MurmurHash3 digests of files or stdin
//!
//! Usage:
//!   mm3sum [OPTIONS] [FILES...]   - hash each file (`-` or nothing = stdin)
//!   mm3sum config show            - display the effective configuration
//!
//! Files are hashed in parallel, one hasher per file; output keeps the
//! argument order.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use mm3_core::config::HashConfig;
use mm3_core::{HexOrder, Mm3Config, OutputFormat, Variant};
use mm3_hash::{AnyHasher, HashedFile};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "mm3sum",
    version,
    about = "MurmurHash3 digests of files",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Path to mm3.toml configuration file
    #[arg(long, short = 'c', env = "MM3_CONFIG", default_value = "mm3.toml")]
    config: PathBuf,

    /// Hash variant: x86_32, x86_128 or x64_128 (overrides config)
    #[arg(long, short = 'a')]
    variant: Option<Variant>,

    /// Seed for every accumulator word (overrides config)
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Hex byte direction (overrides config)
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Print one JSON object per input
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MM3_LOG", default_value = "warn")]
    log: String,

    /// Log format (json, text)
    #[arg(long, env = "MM3_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Files to hash (`-` reads stdin)
    files: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (defaults + config file + flags)
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    /// First digest byte first
    Increasing,
    /// Last digest byte first
    Decreasing,
}

impl From<OrderArg> for HexOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Increasing => HexOrder::Increasing,
            OrderArg::Decreasing => HexOrder::Decreasing,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log, &cli.log_format);

    let config = effective_config(&cli)?;
    debug!(
        variant = %config.hash.variant,
        seed = config.hash.seed,
        config = %cli.config.display(),
        "mm3sum starting"
    );

    match cli.command {
        Some(Commands::Config { action: ConfigAction::Show }) => {
            cmd_config_show(&config, &cli.config)
        }
        None => cmd_hash(&config, &cli.files),
    }
}

/// Config file values with command-line overrides applied, validated.
fn effective_config(cli: &Cli) -> Result<Mm3Config> {
    let mut config = Mm3Config::load(&cli.config)
        .with_context(|| format!("loading config: {}", cli.config.display()))?;

    if let Some(variant) = cli.variant {
        config.hash.variant = variant;
    }
    if let Some(seed) = cli.seed {
        config.hash.seed = seed;
    }
    if let Some(order) = cli.order {
        config.output.hex_order = order.into();
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── `mm3sum [FILES...]` ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Record<'a> {
    path: &'a str,
    variant: Variant,
    seed: u64,
    bytes: u64,
    digest: String,
}

fn cmd_hash(config: &Mm3Config, files: &[PathBuf]) -> Result<()> {
    let stdin_only = [PathBuf::from("-")];
    let inputs = if files.is_empty() { &stdin_only[..] } else { files };

    let results: Vec<Result<HashedFile>> = inputs
        .par_iter()
        .map(|path| hash_input(config, path))
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    for (path, result) in inputs.iter().zip(results) {
        match result {
            Ok(hashed) => print_record(&mut out, config, path, &hashed)?,
            Err(e) => {
                failed += 1;
                eprintln!("mm3sum: {}: {e:#}", path.display());
            }
        }
    }
    out.flush().context("flushing stdout")?;

    info!(inputs = inputs.len(), failed, "hashing complete");
    if failed > 0 {
        anyhow::bail!("{failed} of {} inputs could not be hashed", inputs.len());
    }
    Ok(())
}

fn hash_input(config: &Mm3Config, path: &Path) -> Result<HashedFile> {
    let HashConfig {
        variant,
        seed,
        read_buffer_bytes,
    } = config.hash;

    if path != Path::new("-") {
        return Ok(mm3_hash::hash_file_with_buffer(path, variant, seed, read_buffer_bytes)?);
    }

    let mut hasher = AnyHasher::new(variant, seed)?;
    let stdin = std::io::stdin();
    let bytes = mm3_hash::hash_reader(&mut hasher, &mut stdin.lock(), read_buffer_bytes)
        .context("reading stdin")?;
    let digest = hasher.finish();
    debug!(bytes, %digest, "hashed stdin");
    Ok(HashedFile { digest, bytes })
}

fn print_record(
    out: &mut impl Write,
    config: &Mm3Config,
    path: &Path,
    hashed: &HashedFile,
) -> Result<()> {
    let hex = hashed.digest.to_hex_ordered(config.output.hex_order);
    let shown = path.display().to_string();

    match config.output.format {
        OutputFormat::Text => writeln!(out, "{hex}  {shown}")?,
        OutputFormat::Json => {
            let record = Record {
                path: &shown,
                variant: config.hash.variant,
                seed: config.hash.seed,
                bytes: hashed.bytes,
                digest: hex,
            };
            let line = serde_json::to_string(&record).context("serializing record")?;
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

// ── `mm3sum config show` ──────────────────────────────────────────────────────

fn cmd_config_show(config: &Mm3Config, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!("# Configuration: defaults (no file at {})", config_path.display());
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}
