//! TIAM-UCL regions and the country-to-region lookup.
//!
//! The base grid is resolved by country (the AIM country set, indexed by
//! alphabetical order of 2-letter ISO code) while prices and outputs are
//! exchanged with TIAM-UCL at the level of its 16 world regions. The lookup
//! table read here maps every country index to the region whose totals it
//! contributes to.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AviationError, AviationResult};
use crate::grid::COUNTRY_COUNT;

/// The 16 TIAM-UCL world regions.
///
/// The ordering matches the region loop of the driver routine and the row
/// ordering of the soft-link output file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TiamRegion {
    /// Africa
    Afr,
    /// Australia and New Zealand
    Aus,
    /// Canada
    Can,
    /// Central and South America
    Csa,
    /// China
    Chi,
    /// Eastern Europe
    Eeu,
    /// Former Soviet Union
    Fsu,
    /// India
    Ind,
    /// Japan
    Jpn,
    /// Mexico
    Mex,
    /// Middle East
    Mea,
    /// Other Developing Asia
    Oda,
    /// South Korea
    Sko,
    /// United Kingdom
    Uk,
    /// United States
    Usa,
    /// Western Europe
    Weu,
}

impl TiamRegion {
    /// All regions, in driver loop order.
    pub const ALL: [TiamRegion; 16] = [
        TiamRegion::Afr,
        TiamRegion::Aus,
        TiamRegion::Can,
        TiamRegion::Csa,
        TiamRegion::Chi,
        TiamRegion::Eeu,
        TiamRegion::Fsu,
        TiamRegion::Ind,
        TiamRegion::Jpn,
        TiamRegion::Mex,
        TiamRegion::Mea,
        TiamRegion::Oda,
        TiamRegion::Sko,
        TiamRegion::Uk,
        TiamRegion::Usa,
        TiamRegion::Weu,
    ];

    /// The 3-letter code used in the lookup table and output files.
    pub fn as_str(&self) -> &'static str {
        match self {
            TiamRegion::Afr => "AFR",
            TiamRegion::Aus => "AUS",
            TiamRegion::Can => "CAN",
            TiamRegion::Csa => "CSA",
            TiamRegion::Chi => "CHI",
            TiamRegion::Eeu => "EEU",
            TiamRegion::Fsu => "FSU",
            TiamRegion::Ind => "IND",
            TiamRegion::Jpn => "JPN",
            TiamRegion::Mex => "MEX",
            TiamRegion::Mea => "MEA",
            TiamRegion::Oda => "ODA",
            TiamRegion::Sko => "SKO",
            TiamRegion::Uk => "UK",
            TiamRegion::Usa => "USA",
            TiamRegion::Weu => "WEU",
        }
    }
}

impl fmt::Display for TiamRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TiamRegion {
    type Err = AviationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        TiamRegion::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| AviationError::UnknownRegion(code.to_string()))
    }
}

/// Lookup between AIM country index and TIAM region.
///
/// Built from `country_region_lookup.csv`. After the header, each row holds
/// the country name, its array position, the 3-letter region code, and a
/// fuel-scaling factor that is not used by the interpolation itself. Row
/// order gives the country index used throughout the base grid.
#[derive(Debug, Clone)]
pub struct CountryLookup {
    regions: Vec<TiamRegion>,
}

impl CountryLookup {
    /// Build a lookup directly from per-country region assignments.
    pub fn from_regions(regions: Vec<TiamRegion>) -> Self {
        Self { regions }
    }

    /// Read the lookup table from a CSV file.
    pub fn from_csv(path: &Path) -> AviationResult<Self> {
        let file = File::open(path).map_err(|source| AviationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Read the lookup table from any reader; `source` is used for error context.
    pub fn from_reader(reader: impl Read, source: &Path) -> AviationResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut regions = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            // +2: records() starts after the header row and CSV lines are 1-based.
            let line = idx + 2;
            // Country indices beyond the grid's country dimension would walk
            // off the base grid during interpolation.
            if idx >= COUNTRY_COUNT {
                return Err(AviationError::table(
                    source,
                    line,
                    format!("more than {COUNTRY_COUNT} countries in the lookup table"),
                ));
            }
            let record = record.map_err(|e| AviationError::Csv {
                path: source.to_path_buf(),
                source: e,
            })?;
            let code = record
                .get(2)
                .ok_or_else(|| AviationError::table(source, line, "missing region code column"))?;
            regions.push(code.parse::<TiamRegion>()?);
        }

        Ok(Self { regions })
    }

    /// Number of countries covered by the lookup.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region a country index belongs to, if the index is known.
    pub fn region_of(&self, country: usize) -> Option<TiamRegion> {
        self.regions.get(country).copied()
    }

    /// Country indices contributing to a region's totals.
    pub fn countries_in(&self, region: TiamRegion) -> impl Iterator<Item = usize> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == region)
            .map(|(i, _)| i)
    }
}
