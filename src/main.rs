//! GDP Forecaster - command line front end
//!
//! Serves historical GDP series, fits per-country log-linear trends and prints
//! forecasts and chart series built from a country selection.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gdp_forecaster::app::AppState;
use gdp_forecaster::{Config, Forecaster, LOG_TARGET};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Parser)]
#[clap(author, version, about)]
pub struct Opt {
    /// JSON configuration file. Flags below override its fields.
    #[clap(long, short, env = "GDP_FORECASTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Historical dataset (CSV with country, year and GDP columns).
    #[clap(long, env = "GDP_DATA_FILE")]
    pub data: Option<PathBuf>,

    /// Directory holding cached models.
    #[clap(long, env = "GDP_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Sets a custom logging filter. Syntax is `<target>=<level>`, e.g.
    /// -lgdp-forecaster=debug.
    #[clap(long, short, default_value = "info")]
    pub log: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List selectable countries and whether the dataset covers them.
    Countries,
    /// Print the historical series of a country.
    History { country: String },
    /// Refit and cache the model of a country.
    Fit { country: String },
    /// Forecast the years following the last observation.
    Forecast {
        country: String,
        /// Number of years to project.
        #[clap(long, short = 'n', allow_negative_numbers = true)]
        horizon: Option<i64>,
    },
    /// Score the model on a held-out share of the history.
    Evaluate { country: String },
    /// Select countries (comma separated) and print their chart series.
    Chart {
        names: String,
        #[clap(long, short = 'n', allow_negative_numbers = true)]
        horizon: Option<i64>,
    },
    /// Delete every cached model.
    ClearCache,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    let filter = EnvFilter::from_default_env().add_directive(
        opt.log
            .parse()
            .with_context(|| format!("invalid log filter `{}`", opt.log))?,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&opt)?;
    log::debug!(target: LOG_TARGET, "Using {:?}", config);
    let forecaster = Forecaster::new(&config);

    match opt.command {
        Command::Countries => {
            let known: BTreeSet<String> = forecaster
                .entities()
                .context("listing dataset countries")?
                .into_iter()
                .collect();
            for country in AppState::default().catalog().iter() {
                let coverage = if known.contains(country.name) {
                    "in dataset"
                } else {
                    "no data"
                };
                println!("{}\t{}\t{}", country.code, country.name, coverage);
            }
        }
        Command::History { country } => {
            let history = forecaster
                .historical(&country)
                .with_context(|| format!("history of `{country}`"))?;
            for obs in history {
                println!("{}\t{:.0}\t{}", obs.period, obs.value, trillions(obs.value));
            }
        }
        Command::Fit { country } => {
            let model = forecaster
                .fit(&country)
                .with_context(|| format!("fitting `{country}`"))?;
            let regression = &model.regression;
            println!("entity:       {}", model.entity);
            println!("observations: {}", regression.n_observations());
            println!("last period:  {}", model.last_period);
            println!("slope:        {:.6}", regression.slope());
            println!("intercept:    {:.6}", regression.intercept());
            println!("growth:       {:.2}%", regression.growth_rate() * 100.0);
            println!("R² (log):     {:.4}", regression.r_squared());
            println!("cached at:    {}", forecaster.cache().path_for(&country).display());
        }
        Command::Forecast { country, horizon } => {
            let forecast = forecaster
                .predict(&country, horizon.unwrap_or(config.horizon))
                .with_context(|| format!("forecasting `{country}`"))?;
            for (period, value) in forecast {
                println!("{}\t{:.0}\t{}", period, value, trillions(value));
            }
        }
        Command::Evaluate { country } => {
            let metrics = forecaster
                .evaluate(&country)
                .with_context(|| format!("evaluating `{country}`"))?;
            println!("Log-Linear Regression Accuracy ({country}):");
            println!(" MAE : {:.2e}", metrics.mae);
            println!(" RMSE: {:.2e}", metrics.rmse);
            println!(" R²  : {:.2}", metrics.r2);
            println!(" train/test: {}/{}", metrics.train_size, metrics.test_size);
        }
        Command::Chart { names, horizon } => {
            let mut state = AppState::default();
            let report = state.select(&names);
            for name in &report.rejected {
                eprintln!("Country '{name}' is not valid.");
            }
            anyhow::ensure!(
                !state.selected().is_empty(),
                "please select at least one valid country"
            );

            state
                .refresh(&forecaster, horizon.unwrap_or(config.horizon))
                .context("building chart series")?;
            for series in state.series() {
                println!("{} ({})", series.country, series.code);
                if series.is_blank() {
                    println!("  no data");
                    continue;
                }
                let (years, values) = series.actual();
                for (year, value) in years.iter().zip(values) {
                    println!("  {}\tactual\t{}", year, trillions(*value));
                }
                let (years, values) = series.predicted();
                for (year, value) in years.iter().zip(values) {
                    println!("  {}\tpredicted\t{}", year, trillions(*value));
                }
                if let Some((from, to)) = series.forecast_zone() {
                    println!("  forecast zone: {from}-{to}");
                }
            }
        }
        Command::ClearCache => {
            let removed = forecaster.clear_cache()?;
            println!(
                "Removed {} cached model(s) from {}",
                removed,
                forecaster.cache().dir().display()
            );
        }
    }

    Ok(())
}

fn resolve_config(opt: &Opt) -> anyhow::Result<Config> {
    let mut config = match &opt.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(data) = &opt.data {
        config.data_file = data.clone();
    }
    if let Some(dir) = &opt.models_dir {
        config.models_dir = dir.clone();
    }
    Ok(config)
}

/// GDP in USD formatted as trillions, e.g. `$3.55T`.
fn trillions(value: f64) -> String {
    format!("${:.2}T", value / 1e12)
}
