//! The interpolation metamodel itself.
//!
//! For one (year, region, kerosene price, carbon price) call, converts the
//! prices onto the AIM grid axes, bilinearly interpolates every output
//! variable for every country in the region and accumulates regional
//! totals. Extrapolation far outside the modelled price domain can drive
//! totals negative (e.g. oil or carbon prices at which flying is
//! inaccessible apart from to the very rich); those are cleaned up by
//! zeroing the activity groups the negative anchors imply.

use crate::axes::{carbon_grid_points, oil_grid_points};
use crate::errors::AviationResult;
use crate::grid::BaseGrid;
use crate::interpolate::GridInterpolator;
use crate::prices::{carbon_to_grid_price, kerosene_to_oil_price};
use crate::regions::{CountryLookup, TiamRegion};
use crate::scenario::RunMode;

/// Full-mode output variable indices.
///
/// Basic mode carries only the first two; all group logic bounds-checks
/// against the actual variable count.
pub mod var {
    pub const DOM_FUEL: usize = 0;
    pub const INT_FUEL: usize = 1;
    pub const DOM_RPK: usize = 2;
    pub const INT_RPK: usize = 3;
    pub const DOM_HOLD_FREIGHT_RTK: usize = 4;
    pub const INT_HOLD_FREIGHT_RTK: usize = 5;
    pub const DOM_FREIGHTER_RTK: usize = 6;
    pub const INT_FREIGHTER_RTK: usize = 7;
    pub const DOM_PAX_FLIGHTS: usize = 8;
    pub const INT_PAX_FLIGHTS: usize = 9;
    pub const DOM_FREIGHTER_FLIGHTS: usize = 10;
    pub const INT_FREIGHTER_FLIGHTS: usize = 11;
    pub const DOM_NOX: usize = 12;
    pub const INT_NOX: usize = 13;
    pub const DOM_AKM: usize = 14;
    pub const INT_AKM: usize = 15;
}

/// The interpolation model over one loaded grid.
#[derive(Debug, Clone)]
pub struct Metamodel {
    grid: BaseGrid,
    lookup: CountryLookup,
}

impl Metamodel {
    pub fn new(grid: BaseGrid, lookup: CountryLookup) -> Self {
        Self { grid, lookup }
    }

    pub fn run_mode(&self) -> RunMode {
        self.grid.run_mode()
    }

    /// Regional totals of all output variables for one year and price pair.
    ///
    /// `kerosene_price` is in year-2005 USD/kg and `carbon_price` in
    /// year-2005 USD/kgCO2, the units expected from TIAM.
    pub fn interpolate_outcomes(
        &self,
        year: i32,
        region: TiamRegion,
        kerosene_price: f64,
        carbon_price: f64,
    ) -> AviationResult<Vec<f64>> {
        // The grid runs are over oil price, so estimate the oil price AIM
        // would associate with this kerosene price (exclusive of carbon).
        let oil = kerosene_to_oil_price(kerosene_price);
        let carbon = carbon_to_grid_price(carbon_price);

        // The grid points cover a smaller range of values for earlier years.
        let oil_axis = oil_grid_points(year);
        let carbon_axis = carbon_grid_points(year);
        let interpolator = GridInterpolator::new(&oil_axis, &carbon_axis)?;

        let nvar = self.grid.var_count();
        let mut totals = vec![0.0; nvar];
        for country in self.lookup.countries_in(region) {
            for (n, total) in totals.iter_mut().enumerate() {
                let surface = self.grid.price_surface(year, country, n)?;
                *total += interpolator.at(surface, oil, carbon);
            }
        }

        zero_negative_groups(&mut totals);

        log::debug!(
            "{year} {region}: kerosene {kerosene_price:.4} USD/kg, carbon {carbon_price:.4} USD/kgCO2, fuel {:.3} Mt",
            totals.first().copied().unwrap_or_default()
        );

        Ok(totals)
    }
}

/// Zero out activity groups implied by negative interpolation results.
///
/// Not all variables behave smoothly at the extrapolation point (there are
/// complex interactions around capacity for freight in passenger aircraft
/// vs. freighters), so a negative anchor variable zeroes every variable
/// that only exists when that activity does:
/// - domestic fuel/NOx/distance negative: no domestic flights at all;
/// - international fuel/NOx/distance negative: no international flights;
/// - RPK or passenger flights negative: no passenger activity (including
///   hold freight) on that market;
/// - freighter RTK or flights negative: no freighter activity there;
/// - hold-freight RTK is zeroed individually and affects nothing else.
fn zero_negative_groups(vars: &mut [f64]) {
    use var::*;

    let mut dom_all = false;
    let mut int_all = false;
    let mut dom_pax = false;
    let mut int_pax = false;
    let mut dom_freight = false;
    let mut int_freight = false;

    for (n, value) in vars.iter_mut().enumerate() {
        if *value >= 0.0 {
            continue;
        }
        match n {
            DOM_FUEL | DOM_NOX | DOM_AKM => dom_all = true,
            INT_FUEL | INT_NOX | INT_AKM => int_all = true,
            DOM_RPK | DOM_PAX_FLIGHTS => dom_pax = true,
            INT_RPK | INT_PAX_FLIGHTS => int_pax = true,
            DOM_FREIGHTER_RTK | DOM_FREIGHTER_FLIGHTS => dom_freight = true,
            INT_FREIGHTER_RTK | INT_FREIGHTER_FLIGHTS => int_freight = true,
            DOM_HOLD_FREIGHT_RTK | INT_HOLD_FREIGHT_RTK => *value = 0.0,
            _ => {}
        }
    }

    let mut zero = |indices: &[usize]| {
        for &n in indices {
            if n < vars.len() {
                vars[n] = 0.0;
            }
        }
    };

    if dom_all {
        zero(&[
            DOM_FUEL,
            DOM_RPK,
            DOM_HOLD_FREIGHT_RTK,
            DOM_FREIGHTER_RTK,
            DOM_PAX_FLIGHTS,
            DOM_FREIGHTER_FLIGHTS,
            DOM_NOX,
            DOM_AKM,
        ]);
    }
    if int_all {
        zero(&[
            INT_FUEL,
            INT_RPK,
            INT_HOLD_FREIGHT_RTK,
            INT_FREIGHTER_RTK,
            INT_PAX_FLIGHTS,
            INT_FREIGHTER_FLIGHTS,
            INT_NOX,
            INT_AKM,
        ]);
    }
    if dom_pax {
        zero(&[DOM_RPK, DOM_HOLD_FREIGHT_RTK, DOM_PAX_FLIGHTS]);
    }
    if int_pax {
        zero(&[INT_RPK, INT_HOLD_FREIGHT_RTK, INT_PAX_FLIGHTS]);
    }
    if dom_freight {
        zero(&[DOM_FREIGHTER_RTK, DOM_FREIGHTER_FLIGHTS]);
    }
    if int_freight {
        zero(&[INT_FREIGHTER_RTK, INT_FREIGHTER_FLIGHTS]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_vars(value: f64) -> Vec<f64> {
        vec![value; RunMode::Full.var_count()]
    }

    #[test]
    fn negative_domestic_fuel_zeroes_all_domestic_variables() {
        let mut vars = full_vars(1.0);
        vars[var::DOM_FUEL] = -0.5;
        zero_negative_groups(&mut vars);

        for n in [0, 2, 4, 6, 8, 10, 12, 14] {
            assert_eq!(vars[n], 0.0, "domestic variable {n} not zeroed");
        }
        for n in [1, 3, 5, 7, 9, 11, 13, 15] {
            assert_eq!(vars[n], 1.0, "international variable {n} touched");
        }
    }

    #[test]
    fn negative_international_nox_zeroes_all_international_variables() {
        let mut vars = full_vars(1.0);
        vars[var::INT_NOX] = -0.1;
        zero_negative_groups(&mut vars);

        for n in [1, 3, 5, 7, 9, 11, 13, 15] {
            assert_eq!(vars[n], 0.0);
        }
        assert_eq!(vars[var::DOM_FUEL], 1.0);
    }

    #[test]
    fn negative_rpk_zeroes_the_passenger_group_only() {
        let mut vars = full_vars(1.0);
        vars[var::DOM_RPK] = -1.0;
        zero_negative_groups(&mut vars);

        assert_eq!(vars[var::DOM_RPK], 0.0);
        assert_eq!(vars[var::DOM_HOLD_FREIGHT_RTK], 0.0);
        assert_eq!(vars[var::DOM_PAX_FLIGHTS], 0.0);
        assert_eq!(vars[var::DOM_FUEL], 1.0);
        assert_eq!(vars[var::DOM_FREIGHTER_RTK], 1.0);
    }

    #[test]
    fn negative_freighter_flights_zero_the_freighter_group_only() {
        let mut vars = full_vars(1.0);
        vars[var::INT_FREIGHTER_FLIGHTS] = -2.0;
        zero_negative_groups(&mut vars);

        assert_eq!(vars[var::INT_FREIGHTER_RTK], 0.0);
        assert_eq!(vars[var::INT_FREIGHTER_FLIGHTS], 0.0);
        assert_eq!(vars[var::INT_RPK], 1.0);
    }

    #[test]
    fn negative_hold_freight_is_zeroed_individually() {
        let mut vars = full_vars(1.0);
        vars[var::DOM_HOLD_FREIGHT_RTK] = -0.3;
        zero_negative_groups(&mut vars);

        assert_eq!(vars[var::DOM_HOLD_FREIGHT_RTK], 0.0);
        let untouched: Vec<usize> = (0..16).filter(|n| *n != 4).collect();
        for n in untouched {
            assert_eq!(vars[n], 1.0);
        }
    }

    #[test]
    fn basic_mode_only_touches_fuel_variables() {
        let mut vars = vec![-1.0, 2.0];
        zero_negative_groups(&mut vars);
        assert_eq!(vars, vec![0.0, 2.0]);

        let mut vars = vec![3.0, -2.0];
        zero_negative_groups(&mut vars);
        assert_eq!(vars, vec![3.0, 0.0]);
    }

    #[test]
    fn non_negative_variables_pass_through() {
        let mut vars = full_vars(0.5);
        zero_negative_groups(&mut vars);
        assert_eq!(vars, full_vars(0.5));
    }
}
