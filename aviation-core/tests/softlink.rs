//! End-to-end test of the soft-link pipeline: write a small grid data set
//! to disk, load it, interpolate regional totals and write the output file.

use std::fmt::Write as _;
use std::fs;

use approx::assert_relative_eq;

use aviation_core::axes::{carbon_grid_points, oil_grid_points};
use aviation_core::prices::{carbon_to_grid_price, kerosene_to_oil_price};
use aviation_core::scenario::RunMode;
use aviation_core::{
    BaseGrid, CountryLookup, Metamodel, PriceTable, RegionalResults, ResultRow, TiamRegion,
};

const YEAR: i32 = 2050;

/// Per-country variable surfaces linear in the axis values, so bilinear
/// interpolation recovers them exactly at any evaluation point.
fn surface_value(var: usize, oil: f64, carbon: f64) -> f64 {
    (var + 1) as f64 * (0.01 * oil + 0.002 * carbon)
}

fn write_fixtures(dir: &std::path::Path) {
    let oil = oil_grid_points(YEAR);
    let carbon = carbon_grid_points(YEAR);

    let mut grid = String::from("Year,ISO,CountryIndex,OilPrice,CarbonPrice,V0,V1\n");
    for country in 0..3 {
        for o in oil {
            for c in carbon {
                write!(
                    grid,
                    "{YEAR},XX,{country},{o},{c},{},{}\n",
                    surface_value(0, o, c),
                    surface_value(1, o, c)
                )
                .unwrap();
            }
        }
    }
    fs::write(dir.join("grid_output_by_country_SSP2_t2.csv"), grid).unwrap();

    fs::write(
        dir.join("country_region_lookup.csv"),
        "Country,Index,Region,FuelScale\n\
         United Kingdom,0,UK,1.0\n\
         Jersey,1,UK,1.0\n\
         France,2,WEU,1.0\n",
    )
    .unwrap();

    fs::write(
        dir.join("Prices_KerCO2.csv"),
        format!("Year,KerosenePrice,CarbonPrice\n{YEAR},0.8,0.1\n"),
    )
    .unwrap();
}

#[test]
fn regional_totals_match_the_grid_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let grid = BaseGrid::from_csv(
        RunMode::Basic,
        &dir.path().join("grid_output_by_country_SSP2_t2.csv"),
    )
    .unwrap();
    let lookup = CountryLookup::from_csv(&dir.path().join("country_region_lookup.csv")).unwrap();
    let prices = PriceTable::from_csv(&dir.path().join("Prices_KerCO2.csv")).unwrap();

    let model = Metamodel::new(grid, lookup);
    let (kerosene, carbon) = prices.prices_for(YEAR).unwrap();

    let oil_eval = kerosene_to_oil_price(kerosene);
    let carbon_eval = carbon_to_grid_price(carbon);

    // UK holds two countries with identical surfaces, WEU one.
    let uk = model
        .interpolate_outcomes(YEAR, TiamRegion::Uk, kerosene, carbon)
        .unwrap();
    assert_eq!(uk.len(), 2);
    assert_relative_eq!(
        uk[0],
        2.0 * surface_value(0, oil_eval, carbon_eval),
        max_relative = 1e-9
    );
    assert_relative_eq!(
        uk[1],
        2.0 * surface_value(1, oil_eval, carbon_eval),
        max_relative = 1e-9
    );

    let weu = model
        .interpolate_outcomes(YEAR, TiamRegion::Weu, kerosene, carbon)
        .unwrap();
    assert_relative_eq!(
        weu[0],
        surface_value(0, oil_eval, carbon_eval),
        max_relative = 1e-9
    );

    // Regions with no countries in the lookup contribute nothing.
    let usa = model
        .interpolate_outcomes(YEAR, TiamRegion::Usa, kerosene, carbon)
        .unwrap();
    assert_eq!(usa, vec![0.0, 0.0]);
}

#[test]
fn run_results_round_trip_through_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let grid = BaseGrid::from_csv(
        RunMode::Basic,
        &dir.path().join("grid_output_by_country_SSP2_t2.csv"),
    )
    .unwrap();
    let lookup = CountryLookup::from_csv(&dir.path().join("country_region_lookup.csv")).unwrap();
    let prices = PriceTable::from_csv(&dir.path().join("Prices_KerCO2.csv")).unwrap();
    let model = Metamodel::new(grid, lookup);

    let mut results = RegionalResults::new(RunMode::Basic);
    let (kerosene, carbon) = prices.prices_for(YEAR).unwrap();
    for region in [TiamRegion::Uk, TiamRegion::Weu] {
        let values = model
            .interpolate_outcomes(YEAR, region, kerosene, carbon)
            .unwrap();
        results
            .push(ResultRow {
                year: YEAR,
                region,
                kerosene_price: kerosene,
                carbon_price: carbon,
                values,
            })
            .unwrap();
    }

    let out_path = dir.path().join("output_byregion_SSP2_t2.csv");
    results.write_csv(&out_path).unwrap();

    let text = fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Year,Region,"));
    assert!(lines[1].starts_with("2050,UK,0.8,0.1,"));
    assert!(lines[2].starts_with("2050,WEU,"));
}
