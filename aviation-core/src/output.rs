//! Soft-link output file for the wider energy and emissions models.
//!
//! One row per (year, region): the assumed kerosene and carbon prices, the
//! effective kerosene price including carbon costs, then the run mode's
//! output variables. The effective price column is informational only; the
//! interpolation model takes carbon and fuel price separately.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::{AviationError, AviationResult};
use crate::prices::carbon_price_per_kg_jet_a;
use crate::regions::TiamRegion;
use crate::scenario::RunMode;

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub year: i32,
    pub region: TiamRegion,
    /// Assumed kerosene price, year-2005 USD/kg.
    pub kerosene_price: f64,
    /// Assumed carbon price, year-2005 USD/kgCO2.
    pub carbon_price: f64,
    /// Interpolated variable totals, in run-mode order.
    pub values: Vec<f64>,
}

impl ResultRow {
    /// Kerosene price including carbon costs, year-2005 USD/kg.
    pub fn effective_kerosene_price(&self) -> f64 {
        self.kerosene_price + carbon_price_per_kg_jet_a(self.carbon_price)
    }
}

/// Accumulated results of a run, written out as CSV for comparison with
/// full model runs and for consumption by the external energy-system model.
#[derive(Debug, Clone)]
pub struct RegionalResults {
    run_mode: RunMode,
    rows: Vec<ResultRow>,
}

impl RegionalResults {
    pub fn new(run_mode: RunMode) -> Self {
        Self {
            run_mode,
            rows: Vec::new(),
        }
    }

    /// Append a row, checking it carries the run mode's variable count.
    pub fn push(&mut self, row: ResultRow) -> AviationResult<()> {
        if row.values.len() != self.run_mode.var_count() {
            return Err(AviationError::Config(format!(
                "result row for {} {} has {} variables, run mode expects {}",
                row.year,
                row.region,
                row.values.len(),
                self.run_mode.var_count()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Write the results to a CSV file.
    pub fn write_csv(&self, path: &Path) -> AviationResult<()> {
        let file = File::create(path).map_err(|source| AviationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(file).map_err(|source| AviationError::Csv {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the results to any writer.
    pub fn write(&self, writer: impl Write) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.run_mode.output_headers())?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(5 + row.values.len());
            record.push(row.year.to_string());
            record.push(row.region.as_str().to_string());
            record.push(row.kerosene_price.to_string());
            record.push(row.carbon_price.to_string());
            record.push(row.effective_kerosene_price().to_string());
            record.extend(row.values.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_row() -> ResultRow {
        ResultRow {
            year: 2050,
            region: TiamRegion::Uk,
            kerosene_price: 0.5,
            carbon_price: 0.1,
            values: vec![1.25, 3.5],
        }
    }

    #[test]
    fn effective_price_includes_carbon_cost_per_kg_fuel() {
        let row = sample_row();
        assert_relative_eq!(row.effective_kerosene_price(), 0.5 + 3.15 * 0.1);
    }

    #[test]
    fn push_rejects_wrong_variable_counts() {
        let mut results = RegionalResults::new(RunMode::Full);
        assert!(results.push(sample_row()).is_err());

        let mut results = RegionalResults::new(RunMode::Basic);
        assert!(results.push(sample_row()).is_ok());
    }

    #[test]
    fn writes_headers_and_rows() {
        let mut results = RegionalResults::new(RunMode::Basic);
        results.push(sample_row()).unwrap();

        let mut buf = Vec::new();
        results.write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Year,Region,KerosenePrice_Assumed_Year2005USDPerkg"));
        assert!(header.ends_with("Domestic_Fuel_Mt,International_Fuel_Mt"));

        let row = lines.next().unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields[0], "2050");
        assert_eq!(fields[1], "UK");
        assert_eq!(fields[2], "0.5");
        assert_eq!(fields[5], "1.25");
        assert_eq!(fields[6], "3.5");
        assert!(lines.next().is_none());
    }
}
