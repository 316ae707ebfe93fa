//! Read-in of the processed AIM grid outputs.
//!
//! One grid file holds, for a single (socioeconomic, technology) scenario
//! pair, the AIM run outputs by year, country, output variable and
//! oil/carbon price grid point. Read-in is the slow part of a run, so it is
//! done once and the grid kept in memory for the whole year/region loop.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::{s, Array5, ArrayView2};

use crate::axes::{CARBON_GRID_POINTS, OIL_GRID_POINTS, YEAR_COUNT, YEAR_END, YEAR_START};
use crate::errors::{AviationError, AviationResult};
use crate::scenario::RunMode;

/// Number of countries in the AIM output set.
pub const COUNTRY_COUNT: usize = 140;

/// The grid of AIM outputs to interpolate between.
///
/// Dimensions are `[year][country][variable][oil grid point][carbon grid
/// point]`; countries are the AIM country set by alphabetical order of
/// 2-letter ISO code. The dimensions are fixed across all sets of model
/// runs and are not expected to change.
#[derive(Debug, Clone)]
pub struct BaseGrid {
    data: Array5<f64>,
    run_mode: RunMode,
}

impl BaseGrid {
    /// Read a grid file for the given run mode.
    pub fn from_csv(run_mode: RunMode, path: &Path) -> AviationResult<Self> {
        let file = File::open(path).map_err(|source| AviationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(run_mode, file, path)
    }

    /// Read a grid from any reader; `source` is used for error context.
    ///
    /// After the header, each row holds one (year, country, oil grid point,
    /// carbon grid point) data point: year, 2-letter ISO code, country
    /// index, the oil and carbon price values used for the run, then the
    /// output variables from column 5. Rows cycle the carbon price index
    /// fastest (period 5) and the oil price index next (period 9); the
    /// embedded price columns are informational and not re-derived here.
    /// Grid cells with no corresponding row are left at zero.
    pub fn from_reader(run_mode: RunMode, reader: impl Read, source: &Path) -> AviationResult<Self> {
        let nvar = run_mode.var_count();
        let mut data = Array5::zeros((
            YEAR_COUNT,
            COUNTRY_COUNT,
            nvar,
            OIL_GRID_POINTS,
            CARBON_GRID_POINTS,
        ));

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        for (idx, record) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = record.map_err(|e| AviationError::Csv {
                path: source.to_path_buf(),
                source: e,
            })?;

            let carbon_idx = idx % CARBON_GRID_POINTS;
            let oil_idx = (idx / CARBON_GRID_POINTS) % OIL_GRID_POINTS;

            let year: i32 = parse_field(&record, 0, "year", source, line)?;
            if !(YEAR_START..=YEAR_END).contains(&year) {
                return Err(AviationError::table(
                    source,
                    line,
                    format!("year {year} outside the modelled range"),
                ));
            }
            let country: usize = parse_field(&record, 2, "country index", source, line)?;
            if country >= COUNTRY_COUNT {
                return Err(AviationError::table(
                    source,
                    line,
                    format!("country index {country} out of range (0..{COUNTRY_COUNT})"),
                ));
            }

            let year_idx = (year - YEAR_START) as usize;
            for var in 0..nvar {
                let value: f64 =
                    parse_field(&record, 5 + var, "output variable", source, line)?;
                data[(year_idx, country, var, oil_idx, carbon_idx)] = value;
            }
        }

        log::debug!(
            "grid read from {}: {} variables per country",
            source.display(),
            nvar
        );

        Ok(Self { data, run_mode })
    }

    /// The run mode the grid was read for.
    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// Number of output variables per country.
    pub fn var_count(&self) -> usize {
        self.run_mode.var_count()
    }

    /// The oil-by-carbon price surface for one (year, country, variable).
    pub fn price_surface(
        &self,
        year: i32,
        country: usize,
        var: usize,
    ) -> AviationResult<ArrayView2<'_, f64>> {
        if !(YEAR_START..=YEAR_END).contains(&year) {
            return Err(AviationError::YearOutOfRange {
                year,
                start: YEAR_START,
                end: YEAR_END,
            });
        }
        if country >= COUNTRY_COUNT {
            return Err(AviationError::IndexOutOfRange {
                name: "country",
                index: country,
                bound: COUNTRY_COUNT,
            });
        }
        let nvar = self.var_count();
        if var >= nvar {
            return Err(AviationError::IndexOutOfRange {
                name: "variable",
                index: var,
                bound: nvar,
            });
        }
        let year_idx = (year - YEAR_START) as usize;
        Ok(self.data.slice(s![year_idx, country, var, .., ..]))
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
