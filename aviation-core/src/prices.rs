//! Kerosene and carbon price inputs and unit conversions.
//!
//! TIAM-UCL exchanges prices in year-2005 USD: kerosene per kg and carbon
//! per kgCO2. The AIM grid runs use oil price in year-2015 USD/bbl and
//! carbon price in year-2015 USD/tCO2 internally, so every model call first
//! converts the TIAM prices onto the grid axes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::axes::{YEAR_COUNT, YEAR_START};
use crate::errors::{AviationError, AviationResult};

/// Year-2005 USD per year-2015 USD deflator used for both price series.
pub const USD2005_PER_USD2015: f64 = 0.824;

/// AIM base-year oil price (year-2015 USD/bbl), the normalisation point of
/// the kerosene price fit below.
const AIM_BASE_OIL_PRICE: f64 = 68.74;

/// kgCO2 emitted per kg of Jet A1 burnt.
pub const CO2_PER_KG_JET_A: f64 = 3.15;

/// Estimate the oil price AIM would expect for a given kerosene price.
///
/// TIAM estimates kerosene price internally, but the AIM grid runs take oil
/// price as input and derive kerosene price themselves, partly from lagged
/// prices due to hedging. A given oil price can therefore correspond to
/// several kerosene prices and the mapping cannot be inverted exactly; this
/// non-lagged fit against AIM's internal fuel price routines (calibrated on
/// historical EIA data) is used instead. Without hedging the modelled system
/// is slightly more sensitive to rapid fuel price changes than reality.
///
/// Input is year-2005 USD/kg kerosene, output year-2015 USD/bbl oil.
pub fn kerosene_to_oil_price(kerosene_price: f64) -> f64 {
    let price_2015 = kerosene_price / USD2005_PER_USD2015;
    AIM_BASE_OIL_PRICE * ((price_2015 / 0.783) - 0.1062) / 0.7930
}

/// Convert a carbon price in year-2005 USD/kgCO2 to the grid axis unit,
/// year-2015 USD/tCO2.
pub fn carbon_to_grid_price(carbon_price: f64) -> f64 {
    1000.0 * carbon_price / USD2005_PER_USD2015
}

/// Carbon cost per kg of Jet A1 for a carbon price per kgCO2.
///
/// Only used for the effective-kerosene-price output column; the
/// interpolation itself takes fuel and carbon price separately.
pub fn carbon_price_per_kg_jet_a(carbon_price: f64) -> f64 {
    CO2_PER_KG_JET_A * carbon_price
}

/// Historical kerosene price 2005-2017, year-2015 USD per US gallon (EIA).
const KEROSENE_HISTORICAL_PER_GALLON: [f64; 13] = [
    2.11, 2.35, 2.47, 3.36, 1.88, 2.39, 3.22, 3.20, 3.03, 2.77, 1.63, 1.30, 1.56,
];

/// Jet A1 kg per US gallon at typical density.
const JET_A1_KG_PER_GALLON: f64 = 3.044;

/// Kerosene price trend for model testing: the historical EIA series to
/// 2016, then a yearly growth rate. Returns year-2005 USD/kg, the unit the
/// model expects as input.
pub fn synthetic_kerosene_price(year: i32, growth_rate: f64) -> f64 {
    let last = KEROSENE_HISTORICAL_PER_GALLON[KEROSENE_HISTORICAL_PER_GALLON.len() - 1];
    let per_gallon = if year < 2017 {
        KEROSENE_HISTORICAL_PER_GALLON[(year - YEAR_START).max(0) as usize]
    } else {
        last * growth_rate.powi(year - 2017)
    };
    USD2005_PER_USD2015 * per_gallon / JET_A1_KG_PER_GALLON
}

/// Carbon price trend for model testing: zero before 2020 (ignoring the EU
/// ETS), then `base * rate^(year - 2020)`. `base` is per tCO2; the return
/// value is per kgCO2, both in year-2005 USD. This is the effective price
/// applied across all carbon on a route group, i.e. no baseline is assumed.
pub fn synthetic_carbon_price(year: i32, base: f64, growth_rate: f64) -> f64 {
    if year < 2020 {
        0.0
    } else {
        base * growth_rate.powi(year - 2020) / 1000.0
    }
}

/// Per-year kerosene and carbon prices driving a run.
///
/// Read from `Prices_KerCO2.csv` (header, then year, kerosene price in
/// year-2005 USD/kg, carbon price in year-2005 USD/kgCO2). The table holds
/// one global price pair per year, applied to every TIAM region.
#[derive(Debug, Clone)]
pub struct PriceTable {
    /// `(kerosene, carbon)` indexed by `year - YEAR_START`; `None` where the
    /// input file had no row.
    prices: Vec<Option<(f64, f64)>>,
}

impl PriceTable {
    /// Read the price table from a CSV file.
    pub fn from_csv(path: &Path) -> AviationResult<Self> {
        let file = File::open(path).map_err(|source| AviationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Read the price table from any reader; `source` is used for error context.
    pub fn from_reader(reader: impl Read, source: &Path) -> AviationResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut prices = vec![None; YEAR_COUNT];
        for (idx, record) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = record.map_err(|e| AviationError::Csv {
                path: source.to_path_buf(),
                source: e,
            })?;

            let year: i32 = parse_field(&record, 0, "year", source, line)?;
            let slot = year - YEAR_START;
            if slot < 0 || slot as usize >= YEAR_COUNT {
                return Err(AviationError::table(
                    source,
                    line,
                    format!("year {year} outside the modelled range"),
                ));
            }
            let kerosene: f64 = parse_field(&record, 1, "kerosene price", source, line)?;
            let carbon: f64 = parse_field(&record, 2, "carbon price", source, line)?;
            prices[slot as usize] = Some((kerosene, carbon));
        }

        Ok(Self { prices })
    }

    /// Generate a synthetic table across the full modelled period.
    pub fn synthetic(params: &crate::scenario::SyntheticPrices) -> Self {
        let prices = (0..YEAR_COUNT)
            .map(|i| {
                let year = YEAR_START + i as i32;
                Some((
                    synthetic_kerosene_price(year, params.kerosene_growth),
                    synthetic_carbon_price(year, params.carbon_base, params.carbon_growth),
                ))
            })
            .collect();
        Self { prices }
    }

    /// `(kerosene, carbon)` prices for a year, in year-2005 USD/kg and
    /// year-2005 USD/kgCO2.
    pub fn prices_for(&self, year: i32) -> AviationResult<(f64, f64)> {
        let slot = year - YEAR_START;
        if slot < 0 || slot as usize >= self.prices.len() {
            return Err(AviationError::YearOutOfRange {
                year,
                start: YEAR_START,
                end: crate::axes::YEAR_END,
            });
        }
        self.prices[slot as usize].ok_or(AviationError::MissingPrice(year))
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    source: &Path,
    line: usize,
) -> AviationResult<T> {
    record
        .get(index)
        .ok_or_else(|| AviationError::table(source, line, format!("missing {name} column")))?
        .parse()
        .map_err(|_| {
            AviationError::table(
                source,
                line,
                format!("invalid {name} '{}'", record.get(index).unwrap_or("")),
            )
        })
}
