//! Opacity inspection tool.
//!
//! Lists the molecules available under an opacity root, loads selected
//! tables and optionally queries them at one (pressure, temperature) point.

mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use opacity_common::FormulaWeights;
use opacity_table::{
    load_species, InterpolationMode, MoleculeCatalog, OpacityConfig, OpacityFormat,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use report::{catalog_lines, QueryReport, Report};

#[derive(Parser, Debug)]
#[command(name = "opacity-inspect")]
#[command(about = "Inspect petitRADTRANS-style molecular opacity tables")]
struct Args {
    /// YAML configuration file (default: read from environment)
    #[arg(short, long)]
    config: Option<String>,

    /// Opacity root containing lines/line_by_line and lines/corr_k
    #[arg(long, env = "OPACITY_ROOT")]
    root: Option<String>,

    /// Opacity method: lbl or ktables
    #[arg(short, long)]
    method: Option<String>,

    /// Temperature interpolation: linear or exp
    #[arg(long)]
    interpolation: Option<String>,

    /// Molecule to load (repeatable; default: configured species)
    #[arg(long = "molecule")]
    molecules: Vec<String>,

    /// Query pressure in Pa
    #[arg(short, long, requires = "temperature")]
    pressure: Option<f64>,

    /// Query temperature in K
    #[arg(short, long, requires = "pressure")]
    temperature: Option<f64>,

    /// Lower wavenumber bound of the printed band (cm-1)
    #[arg(long, requires = "wn_max")]
    wn_min: Option<f64>,

    /// Upper wavenumber bound of the printed band (cm-1)
    #[arg(long, requires = "wn_min")]
    wn_max: Option<f64>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = build_config(&args)?;
    config.validate()?;
    info!(
        root = %config.opacity_root.display(),
        method = %config.method,
        species = ?config.species,
        "Loaded configuration"
    );

    let catalog = MoleculeCatalog::discover(&config)?;
    let mut report = Report {
        format: config.method.to_string(),
        directory: catalog.directory().display().to_string(),
        molecules: catalog_lines(&catalog),
        ..Report::default()
    };

    let weights = FormulaWeights::new();
    let tables = load_species(&config, &weights)
        .with_context(|| format!("loading {:?}", config.species))?;

    let window = args.wn_min.zip(args.wn_max);
    for table in tables.values() {
        report.tables.push(table.summary());
        if let (Some(p), Some(t)) = (args.pressure, args.temperature) {
            report.queries.push(QueryReport::new(table, p, t, window));
        }
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(())
}

/// YAML file or environment, then command-line overrides.
fn build_config(args: &Args) -> Result<OpacityConfig> {
    let mut config = match &args.config {
        Some(path) => OpacityConfig::from_yaml_file(path)
            .with_context(|| format!("reading configuration {}", path))?,
        None => OpacityConfig::from_env(),
    };

    if let Some(root) = &args.root {
        config.opacity_root = root.into();
    }
    if let Some(method) = &args.method {
        config.method = OpacityFormat::from_method_name(method);
    }
    if let Some(mode) = &args.interpolation {
        config.interpolation = InterpolationMode::from_str(mode);
    }
    if !args.molecules.is_empty() {
        config.species = args.molecules.clone();
    }

    if args.pressure.is_some() && config.species.is_empty() {
        bail!("a query needs at least one --molecule or configured species");
    }

    Ok(config)
}
