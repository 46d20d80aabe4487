//! # LaserBox
//!
//! Generates the outlines of finger-jointed boxes for laser cutting and writes
//! them as SVG.
//!
//! ## Architecture
//!
//! LaserBox is organized as a workspace with multiple crates:
//!
//! 1. **laserbox-core** - Units and unit conversion, shared error types
//! 2. **laserbox-joinery** - Edge synthesis, panel assembly, SVG document
//! 3. **laserbox-settings** - Configuration files and `key=value` overrides
//! 4. **laserbox** - Command line binary that ties the crates together

use anyhow::Context;
use std::io::Write;
use std::path::Path;

pub use laserbox_core::{format_length, from_drawing_units, parse_length, to_drawing_units, Unit};
pub use laserbox_joinery::{
    BoxOptions, DerivedDimensions, DimensionWarning, Dimensions, DocumentSink, FingerBoxMaker,
    JoineryError, Panel, PanelStyle, SvgDocument,
};
pub use laserbox_settings::{default_config_path, Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Inkscape layer that receives the generated panels
pub const LAYER_LABEL: &str = "LaserBox";

/// Log line layout written to stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Initialize logging with the default configuration
///
/// Logs go to stderr so that an SVG written to stdout stays clean.
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn init_logging(default_level: tracing::Level, format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    }
    .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Build the effective configuration.
///
/// Starts from `path`, else from the default config file when one exists,
/// else from built-in defaults, then applies `overrides` with
/// [`load_config_from`].
pub fn load_config(path: Option<&Path>, overrides: &[(String, String)]) -> anyhow::Result<Config> {
    let base = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match default_config_path() {
            Ok(default) if default.exists() => {
                tracing::debug!(path = %default.display(), "Using default config file");
                Config::load_from_file(&default)?
            }
            _ => Config::new(),
        },
    };
    load_config_from(base, overrides)
}

/// Apply overrides to `base` and validate the result.
///
/// A `unit` override is applied first, so lengths given alongside it are read
/// in the new unit.
pub fn load_config_from(
    mut config: Config,
    overrides: &[(String, String)],
) -> anyhow::Result<Config> {
    let (unit, rest): (Vec<_>, Vec<_>) = overrides.iter().partition(|(key, _)| key == "unit");
    for (key, value) in unit.into_iter().chain(rest) {
        config.set_setting(key, value)?;
    }

    config.validate()?;
    Ok(config)
}

/// A rendered box ready to be written
#[derive(Debug)]
pub struct RenderedBox {
    pub document: SvgDocument,
    pub warnings: Vec<DimensionWarning>,
}

/// Generate every panel described by `config` into a fresh SVG document
pub fn render_box(config: &Config) -> anyhow::Result<RenderedBox> {
    let maker = FingerBoxMaker::new(config.box_options.clone())?;

    let mut document = SvgDocument::new().with_layer(LAYER_LABEL);
    if let Some((width, height)) = config.page_size() {
        document = document.with_page_size(width, height);
    }
    maker.generate(&mut document)?;

    Ok(RenderedBox {
        document,
        warnings: maker.warnings().to_vec(),
    })
}

/// Write the document to `path`, or to stdout when no path is given
pub fn write_document(document: &SvgDocument, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            document.write_to(std::io::BufWriter::new(file))?;
            tracing::info!(path = %path.display(), "Wrote SVG");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            document.write_to(&mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

/// Human-readable table of the derived measurements in the box unit
pub fn dimensions_report(options: &BoxOptions) -> anyhow::Result<String> {
    let maker = FingerBoxMaker::new(options.clone())?;
    let d = maker.dimensions();
    let unit = options.unit;
    let length = |value: f64| format_length(from_drawing_units(value, unit), unit);

    let mut report = String::new();
    for (name, value) in [
        ("thickness", d.thickness),
        ("inside width", d.inside_width),
        ("inside height", d.inside_height),
        ("inside depth", d.inside_depth),
        ("outside width", d.outside_width),
        ("outside height", d.outside_height),
        ("outside depth", d.outside_depth),
    ] {
        report.push_str(&format!("{:<16}{}\n", name, length(value)));
    }
    for (name, count, tooth) in [
        ("side teeth", d.side_indent_count, d.side_indent_length),
        ("width teeth", d.top_width_indent_count, d.top_width_indent_length),
        ("depth teeth", d.top_depth_indent_count, d.top_depth_indent_length),
    ] {
        report.push_str(&format!("{:<16}{} x {}\n", name, count, length(tooth)));
    }
    for warning in maker.warnings() {
        report.push_str(&format!("warning: {}\n", warning));
    }
    Ok(report)
}
