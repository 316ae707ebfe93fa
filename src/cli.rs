//! Command-line parsing for the metamodel driver.
//!
//! Argument parsing is kept separate from the model code: options resolve
//! into an `aviation_core::RunConfig`, starting from a TOML file when one
//! is given and overriding individual fields from the command line.

use std::path::PathBuf;

use clap::Parser;

use aviation_core::scenario::SyntheticPrices;
use aviation_core::{AviationResult, RunConfig};

/// NAVIGATE aviation metamodel driver.
///
/// Interpolates pre-computed AIM grid outputs for one scenario pair and
/// writes per-region aviation metrics for the modelled period as CSV.
#[derive(Debug, Parser)]
#[command(name = "navigate-aviation", version, about)]
pub struct Cli {
    /// Run configuration TOML file; command-line options override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Socioeconomic scenario (SSP1..SSP5).
    #[arg(long)]
    pub ssp: Option<String>,

    /// Technology scenario (e.g. t1, t2).
    #[arg(long)]
    pub tech: Option<String>,

    /// Run mode: 'basic' (fuel only, faster) or 'full' (all metrics).
    #[arg(long)]
    pub mode: Option<String>,

    /// Directory holding the processed AIM grid outputs.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output CSV path (default: output_byregion_{ssp}_{tech}.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First year to model.
    #[arg(long)]
    pub start: Option<i32>,

    /// Last year to model (inclusive).
    #[arg(long)]
    pub end: Option<i32>,

    /// Generate synthetic price trends instead of reading Prices_KerCO2.csv.
    #[arg(long)]
    pub synthetic_prices: bool,

    /// Yearly kerosene price growth rate after 2017 (synthetic prices).
    #[arg(long)]
    pub kerosene_growth: Option<f64>,

    /// Carbon price in 2020, year-2005 USD/tCO2 (synthetic prices).
    #[arg(long)]
    pub carbon_base: Option<f64>,

    /// Yearly carbon price growth rate after 2020 (synthetic prices).
    #[arg(long)]
    pub carbon_growth: Option<f64>,
}

impl Cli {
    /// Resolve the options into a validated run configuration.
    pub fn into_config(self) -> AviationResult<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_toml_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(ssp) = &self.ssp {
            config.ssp = ssp.parse()?;
        }
        if let Some(tech) = &self.tech {
            config.tech = tech.parse()?;
        }
        if let Some(mode) = &self.mode {
            config.mode = mode.parse()?;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if let Some(start) = self.start {
            config.year_start = start;
        }
        if let Some(end) = self.end {
            config.year_end = end;
        }

        if self.synthetic_prices || config.synthetic_prices.is_some() {
            let mut params = config.synthetic_prices.unwrap_or_default();
            if let Some(rate) = self.kerosene_growth {
                params.kerosene_growth = rate;
            }
            if let Some(base) = self.carbon_base {
                params.carbon_base = base;
            }
            if let Some(rate) = self.carbon_growth {
                params.carbon_growth = rate;
            }
            config.synthetic_prices = Some(params);
        }

        config.validate()?;
        Ok(config)
    }
}
