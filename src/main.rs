//! laserbox CLI - finger-jointed box generator
//!
//! Writes the panels of a laser-cuttable box as SVG.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use laserbox::{
    dimensions_report, init_logging, load_config, render_box, write_document, Config, LogFormat,
    BUILD_DATE, VERSION,
};
use laserbox_settings::SETTING_KEYS;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "laserbox")]
#[command(about = "Generate finger-jointed boxes for laser cutting", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Configuration file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a setting, e.g. --set thickness=4 --set include_lid=no
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the box outlines as SVG
    Generate {
        #[command(flatten)]
        config: ConfigArgs,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the derived box measurements
    Dimensions {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Destination (.json or .toml)
        file: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if !SETTING_KEYS.contains(&key) {
        return Err(format!(
            "unknown setting '{}', expected one of: {}",
            key,
            SETTING_KEYS.join(", ")
        ));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    init_logging(level, cli.log_format)?;
    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "Starting laserbox");

    match cli.command {
        Commands::Generate { config, output } => generate(&config, output)?,
        Commands::Dimensions { config } => {
            let config = load_config(config.config.as_deref(), &config.set)?;
            print!("{}", dimensions_report(&config.box_options)?);
        }
        Commands::InitConfig { file, force } => init_config(&file, force)?,
    }

    Ok(())
}

fn generate(args: &ConfigArgs, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.set)?;
    // corrected tooth counts are already reported through `warn!`
    let rendered = render_box(&config)?;

    let destination = output.or_else(|| config.output.path.clone());
    write_document(&rendered.document, destination.as_deref())
}

fn init_config(file: &Path, force: bool) -> Result<()> {
    if file.exists() && !force {
        anyhow::bail!("{} already exists, use --force to replace it", file.display());
    }
    Config::new()
        .save_to_file(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    println!("Wrote default configuration to {}", file.display());
    Ok(())
}
