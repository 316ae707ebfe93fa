//! Scenario selection and run configuration.
//!
//! A run is pinned to one socioeconomic scenario (SSP) and one technology
//! scenario; together they select which pre-computed AIM grid file is read.
//! The run mode controls how many output variables are carried: basic mode
//! reads and writes fuel use only, full mode adds flights, RPK, RTK, NOx and
//! distance flown, at the cost of a larger read-in.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AviationError, AviationResult};

/// Shared Socioeconomic Pathway used to select the grid data set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SspScenario {
    #[serde(rename = "SSP1")]
    Ssp1,
    #[serde(rename = "SSP2")]
    Ssp2,
    #[serde(rename = "SSP3")]
    Ssp3,
    #[serde(rename = "SSP4")]
    Ssp4,
    #[serde(rename = "SSP5")]
    Ssp5,
}

impl SspScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            SspScenario::Ssp1 => "SSP1",
            SspScenario::Ssp2 => "SSP2",
            SspScenario::Ssp3 => "SSP3",
            SspScenario::Ssp4 => "SSP4",
            SspScenario::Ssp5 => "SSP5",
        }
    }
}

impl fmt::Display for SspScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SspScenario {
    type Err = AviationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SSP1" => Ok(SspScenario::Ssp1),
            "SSP2" => Ok(SspScenario::Ssp2),
            "SSP3" => Ok(SspScenario::Ssp3),
            "SSP4" => Ok(SspScenario::Ssp4),
            "SSP5" => Ok(SspScenario::Ssp5),
            other => Err(AviationError::Config(format!(
                "unknown socioeconomic scenario '{other}' (expected SSP1..SSP5)"
            ))),
        }
    }
}

/// Technology scenario identifier (e.g. `t1`, `t2`).
///
/// The set of valid identifiers is open-ended: each corresponds to a set of
/// AIM grid runs with its own technology assumptions, so validation is
/// limited to what can be safely embedded in a file name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TechScenario(String);

impl TechScenario {
    pub fn new(id: impl Into<String>) -> AviationResult<Self> {
        let id = id.into();
        let ok = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if ok {
            Ok(Self(id))
        } else {
            Err(AviationError::Config(format!(
                "invalid technology scenario '{id}' (alphanumeric, '-' and '_' only)"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TechScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TechScenario {
    type Err = AviationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TechScenario::new(s.trim())
    }
}

impl TryFrom<String> for TechScenario {
    type Error = AviationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TechScenario::new(value)
    }
}

impl From<TechScenario> for String {
    fn from(value: TechScenario) -> Self {
        value.0
    }
}

/// How many metrics the model reads and writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Fuel use only. Faster read-in and run times.
    Basic,
    /// The full variable set: fuel, RPK, RTK, flights, NOx and distance
    /// flown, each split into domestic and international. Allows a larger
    /// range of policy interactions and non-CO2 impacts to be calculated.
    Full,
}

impl RunMode {
    /// Number of variables interpolated per country.
    pub fn var_count(&self) -> usize {
        match self {
            RunMode::Basic => 2,
            RunMode::Full => 16,
        }
    }

    /// Column headers of the soft-link output file, including the leading
    /// year/region/price columns.
    pub fn output_headers(&self) -> &'static [&'static str] {
        const COMMON: [&str; 5] = [
            "Year",
            "Region",
            "KerosenePrice_Assumed_Year2005USDPerkg",
            "CarbonPrice_Assumed_Year2005USDPerkg",
            "EffectiveKerosenePrice_WithCarbon_Year2005USDPerkg",
        ];
        const BASIC: [&str; 7] = [
            COMMON[0],
            COMMON[1],
            COMMON[2],
            COMMON[3],
            COMMON[4],
            "Domestic_Fuel_Mt",
            "International_Fuel_Mt",
        ];
        const FULL: [&str; 21] = [
            COMMON[0],
            COMMON[1],
            COMMON[2],
            COMMON[3],
            COMMON[4],
            "Domestic_Fuel_Mt",
            "International_Fuel_Mt",
            "Domestic_RPK",
            "International_RPK",
            "Domestic_Hold_Freight_RTK",
            "International_Hold_Freight_RTK",
            "Domestic_Freighter_RTK",
            "International_Freighter_RTK",
            "Domestic_Passenger_Flights",
            "International_Passenger_Flights",
            "Domestic_Freighter_Flights",
            "International_Freighter_Flights",
            "Domestic_NOx_kt",
            "International_NOx_kt",
            "Domestic_AKM",
            "International_AKM",
        ];
        match self {
            RunMode::Basic => &BASIC,
            RunMode::Full => &FULL,
        }
    }
}

impl FromStr for RunMode {
    type Err = AviationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(RunMode::Basic),
            "full" => Ok(RunMode::Full),
            other => Err(AviationError::Config(format!(
                "unknown run mode '{other}' (expected 'basic' or 'full')"
            ))),
        }
    }
}

/// Synthetic price-trend parameters, used when no TIAM price file is
/// available (model testing and soft-link dry runs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticPrices {
    /// Yearly kerosene price growth rate applied after 2017.
    pub kerosene_growth: f64,
    /// Carbon price in 2020 (year-2005 USD/tCO2).
    pub carbon_base: f64,
    /// Yearly carbon price growth rate applied after 2020.
    pub carbon_growth: f64,
}

impl Default for SyntheticPrices {
    fn default() -> Self {
        Self {
            kerosene_growth: 1.01,
            carbon_base: 50.0,
            carbon_growth: 1.03,
        }
    }
}

/// Configuration for one whole model run.
///
/// Values are fixed for the duration of a run: they select which data files
/// are read and which years and variables are covered. A configuration can
/// be loaded from a TOML file and individual fields overridden from the
/// command line by the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Socioeconomic scenario selecting the grid data set.
    pub ssp: SspScenario,
    /// Technology scenario selecting the grid data set.
    pub tech: TechScenario,
    /// Basic (fuel only) or full variable set.
    pub mode: RunMode,
    /// Directory holding the processed AIM grid outputs.
    pub data_dir: PathBuf,
    /// Output file path. Defaults to `output_byregion_{ssp}_{tech}.csv`
    /// in the working directory.
    pub output: Option<PathBuf>,
    /// First modelled year.
    pub year_start: i32,
    /// Last modelled year (inclusive).
    pub year_end: i32,
    /// When set, generate prices instead of reading `Prices_KerCO2.csv`.
    pub synthetic_prices: Option<SyntheticPrices>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ssp: SspScenario::Ssp2,
            tech: TechScenario("t2".to_string()),
            mode: RunMode::Basic,
            data_dir: PathBuf::from("aviation_grid_data"),
            output: None,
            year_start: crate::axes::YEAR_START,
            year_end: crate::axes::YEAR_END,
            synthetic_prices: None,
        }
    }
}

impl RunConfig {
    /// File name of the per-country price table.
    pub const PRICES_FILE: &'static str = "Prices_KerCO2.csv";
    /// File name of the country/region lookup.
    pub const COUNTRY_LOOKUP_FILE: &'static str = "country_region_lookup.csv";

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> AviationResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AviationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&text)
            .map_err(|e| AviationError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check year-range consistency against the modelled period.
    pub fn validate(&self) -> AviationResult<()> {
        if self.year_start > self.year_end {
            return Err(AviationError::Config(format!(
                "year_start {} is after year_end {}",
                self.year_start, self.year_end
            )));
        }
        for year in [self.year_start, self.year_end] {
            if !(crate::axes::YEAR_START..=crate::axes::YEAR_END).contains(&year) {
                return Err(AviationError::YearOutOfRange {
                    year,
                    start: crate::axes::YEAR_START,
                    end: crate::axes::YEAR_END,
                });
            }
        }
        Ok(())
    }

    /// Path of the grid file selected by the scenario pair.
    pub fn grid_path(&self) -> PathBuf {
        self.data_dir.join(format!(
            "grid_output_by_country_{}_{}.csv",
            self.ssp, self.tech
        ))
    }

    /// Path of the price table.
    pub fn prices_path(&self) -> PathBuf {
        self.data_dir.join(Self::PRICES_FILE)
    }

    /// Path of the country/region lookup.
    pub fn country_lookup_path(&self) -> PathBuf {
        self.data_dir.join(Self::COUNTRY_LOOKUP_FILE)
    }

    /// Output path, defaulting to the scenario-stamped file name.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("output_byregion_{}_{}.csv", self.ssp, self.tech))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssp_parse_and_display() {
        assert_eq!("ssp3".parse::<SspScenario>().unwrap(), SspScenario::Ssp3);
        assert_eq!(SspScenario::Ssp3.to_string(), "SSP3");
        assert!("SSP9".parse::<SspScenario>().is_err());
    }

    #[test]
    fn tech_scenario_rejects_path_characters() {
        assert!(TechScenario::new("t2").is_ok());
        assert!(TechScenario::new("t2_high").is_ok());
        assert!(TechScenario::new("../t2").is_err());
        assert!(TechScenario::new("").is_err());
    }

    #[test]
    fn run_mode_variable_counts_match_headers() {
        assert_eq!(RunMode::Basic.var_count(), 2);
        assert_eq!(RunMode::Full.var_count(), 16);
        // year, region, three price columns, then one header per variable
        assert_eq!(RunMode::Basic.output_headers().len(), 5 + 2);
        assert_eq!(RunMode::Full.output_headers().len(), 5 + 16);
    }

    #[test]
    fn default_config_builds_scenario_paths() {
        let config = RunConfig::default();
        assert_eq!(
            config.grid_path(),
            PathBuf::from("aviation_grid_data/grid_output_by_country_SSP2_t2.csv")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("output_byregion_SSP2_t2.csv")
        );
    }

    #[test]
    fn config_from_toml() {
        let text = r#"
            ssp = "SSP5"
            tech = "t1"
            mode = "full"
            data_dir = "data"
            year_start = 2020
            year_end = 2050

            [synthetic_prices]
            kerosene_growth = 1.02
            carbon_base = 100.0
            carbon_growth = 1.05
        "#;
        let config: RunConfig = toml::from_str(text).unwrap();
        assert_eq!(config.ssp, SspScenario::Ssp5);
        assert_eq!(config.tech.as_str(), "t1");
        assert_eq!(config.mode, RunMode::Full);
        assert_eq!(config.year_start, 2020);
        let synthetic = config.synthetic_prices.unwrap();
        assert_eq!(synthetic.carbon_base, 100.0);
    }

    #[test]
    fn validate_rejects_inverted_and_out_of_range_years() {
        let mut config = RunConfig {
            year_start: 2050,
            year_end: 2020,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());

        config.year_start = 1990;
        config.year_end = 2050;
        assert!(matches!(
            config.validate(),
            Err(AviationError::YearOutOfRange { year: 1990, .. })
        ));
    }
}
