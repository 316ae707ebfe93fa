//! Driver for the NAVIGATE aviation interpolation metamodel.
//!
//! Selects a scenario pair, reads the grid data once (this is the slow
//! part), then loops over the 16 TIAM-UCL regions and all modelled years
//! working out total fuel use (and, in full mode, the wider metric set),
//! and writes a CSV of outputs by world region to support the soft-link of
//! the aviation model with wider energy and emissions models.

use std::time::Instant;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::info;

use aviation_core::{
    BaseGrid, CountryLookup, Metamodel, PriceTable, RegionalResults, ResultRow, TiamRegion,
};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config()?;
    info!(
        "run: {} {} ({:?} mode), {}-{}",
        config.ssp, config.tech, config.mode, config.year_start, config.year_end
    );

    // Data to interpolate between - this is slow so do it only once.
    let load_start = Instant::now();
    let grid_path = config.grid_path();
    let grid = BaseGrid::from_csv(config.mode, &grid_path)
        .wrap_err_with(|| format!("loading grid data from {}", grid_path.display()))?;
    let lookup = CountryLookup::from_csv(&config.country_lookup_path())
        .wrap_err("loading country/region lookup")?;
    let prices = match &config.synthetic_prices {
        Some(params) => {
            info!("using synthetic price trends: {params:?}");
            PriceTable::synthetic(params)
        }
        None => PriceTable::from_csv(&config.prices_path()).wrap_err("loading price table")?,
    };
    info!("read-in time: {:.2?}", load_start.elapsed());

    let model = Metamodel::new(grid, lookup);
    let mut results = RegionalResults::new(config.mode);

    let interp_start = Instant::now();
    for year in config.year_start..=config.year_end {
        let (kerosene_price, carbon_price) = prices.prices_for(year)?;
        for region in TiamRegion::ALL {
            let values = model.interpolate_outcomes(year, region, kerosene_price, carbon_price)?;
            results.push(ResultRow {
                year,
                region,
                kerosene_price,
                carbon_price,
                values,
            })?;
        }
    }
    info!(
        "interpolation time to {}: {:.2?}",
        config.year_end,
        interp_start.elapsed()
    );

    let output_path = config.output_path();
    results
        .write_csv(&output_path)
        .wrap_err_with(|| format!("writing results to {}", output_path.display()))?;
    info!(
        "wrote {} rows to {}",
        results.rows().len(),
        output_path.display()
    );

    Ok(())
}
