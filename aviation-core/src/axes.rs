//! Time-dependent oil and carbon price grid points.
//!
//! The AIM grid runs cover oil and carbon price ranges that widen over time,
//! so the interpolation axes depend on the year being evaluated. The grid
//! point values themselves are consistent between all sets of model runs.
//! Axes are in AIM's internal units: year-2015 USD/bbl for oil and
//! year-2015 USD/tCO2 for carbon.

/// First modelled year.
pub const YEAR_START: i32 = 2005;
/// Last modelled year (inclusive).
pub const YEAR_END: i32 = 2100;
/// Number of modelled years.
pub const YEAR_COUNT: usize = (YEAR_END - YEAR_START + 1) as usize;

/// Number of oil price grid points.
pub const OIL_GRID_POINTS: usize = 9;
/// Number of carbon price grid points.
pub const CARBON_GRID_POINTS: usize = 5;

/// Baseline oil price grid, applying from 2020 onwards (year-2015 USD/bbl).
const OIL_BASE_GRID: [f64; OIL_GRID_POINTS] =
    [30.0, 50.0, 70.0, 90.0, 110.0, 130.0, 150.0, 170.0, 190.0];

/// Historical oil price per year, 2005-2016 (year-2015 USD/bbl). These are
/// the model base-year values used by every grid run.
const OIL_HISTORICAL: [f64; 12] = [
    68.74, 77.61, 82.67, 109.77, 68.45, 86.39, 99.98, 97.06, 99.67, 93.26, 48.66, 42.77,
];

/// Baseline carbon price grid, applying from 2050 onwards with a linear ramp
/// up from 2015 (year-2015 USD/tCO2).
const CARBON_BASE_GRID: [f64; CARBON_GRID_POINTS] = [0.0, 10.0, 100.0, 500.0, 1000.0];

/// Spacing applied when an axis would otherwise collapse to a single value,
/// keeping it strictly ascending for the interpolator.
const ASCENDING_DELTA: f64 = 1e-4;

/// Oil price grid points for a given year.
///
/// Before 2017 the grid collapses to the single historical value for that
/// year (the model is price-insensitive over the calibration period); from
/// 2017 to 2019 the baseline grid is blended linearly toward the 2016
/// historical value; from 2020 the baseline grid applies unchanged.
pub fn oil_grid_points(year: i32) -> [f64; OIL_GRID_POINTS] {
    let mut vals = OIL_BASE_GRID;
    if year < 2017 {
        let base = OIL_HISTORICAL[(year - YEAR_START).clamp(0, 11) as usize];
        for (i, v) in vals.iter_mut().enumerate() {
            *v = base + ASCENDING_DELTA * i as f64;
        }
    } else if year < 2020 {
        let anchor = OIL_HISTORICAL[OIL_HISTORICAL.len() - 1];
        for v in vals.iter_mut() {
            *v -= (2020 - year) as f64 * (*v - anchor) / (2020 - 2016) as f64;
        }
    }
    vals
}

/// Carbon price grid points for a given year.
///
/// Near zero before 2016, then ramping linearly up to the baseline grid at
/// 2050, which applies unchanged from there on.
pub fn carbon_grid_points(year: i32) -> [f64; CARBON_GRID_POINTS] {
    let mut vals = CARBON_BASE_GRID;
    if year < 2016 {
        for (i, v) in vals.iter_mut().enumerate() {
            *v = ASCENDING_DELTA * i as f64;
        }
    } else if year < 2050 {
        for v in vals.iter_mut() {
            *v -= (2050 - year) as f64 * *v / (2050 - 2015) as f64;
        }
    }
    vals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn oil_axis_is_baseline_from_2020() {
        assert_eq!(oil_grid_points(2020), OIL_BASE_GRID);
        assert_eq!(oil_grid_points(2100), OIL_BASE_GRID);
    }

    #[test]
    fn oil_axis_collapses_to_historical_value_before_2017() {
        let vals = oil_grid_points(2005);
        for (i, v) in vals.iter().enumerate() {
            assert_relative_eq!(*v, 68.74 + 1e-4 * i as f64);
        }
        let vals = oil_grid_points(2016);
        assert_relative_eq!(vals[0], 42.77);
    }

    #[test]
    fn oil_axis_blends_linearly_2017_to_2019() {
        // 2018 is halfway between the 2016 value and the 2020 grid.
        let vals = oil_grid_points(2018);
        for (v, base) in vals.iter().zip(OIL_BASE_GRID) {
            assert_relative_eq!(*v, (base + 42.77) / 2.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn oil_axis_stays_strictly_ascending() {
        for year in YEAR_START..=YEAR_END {
            let vals = oil_grid_points(year);
            assert!(
                vals.windows(2).all(|w| w[0] < w[1]),
                "axis not ascending in {year}: {vals:?}"
            );
        }
    }

    #[test]
    fn carbon_axis_ramps_to_baseline_at_2050() {
        assert_eq!(carbon_grid_points(2050), CARBON_BASE_GRID);

        let vals = carbon_grid_points(2030);
        for (v, base) in vals.iter().zip(CARBON_BASE_GRID) {
            assert_relative_eq!(*v, base * (1.0 - 20.0 / 35.0), max_relative = 1e-12);
        }
    }

    #[test]
    fn carbon_axis_is_near_zero_before_2016() {
        let vals = carbon_grid_points(2010);
        for (i, v) in vals.iter().enumerate() {
            assert_relative_eq!(*v, 1e-4 * i as f64);
        }
    }

    #[test]
    fn carbon_axis_stays_strictly_ascending() {
        for year in YEAR_START..=YEAR_END {
            let vals = carbon_grid_points(year);
            assert!(
                vals.windows(2).all(|w| w[0] < w[1]),
                "axis not ascending in {year}: {vals:?}"
            );
        }
    }
}
