//! Core routines for the NAVIGATE aviation interpolation metamodel.
//!
//! A simple interpolation-based model taking socioeconomic scenario,
//! technology scenario, kerosene price and carbon cost for the period to
//! 2100 and interpolating across a grid of outputs of the Aviation
//! Integrated Model (AIM, www.atslab.org) to generate rapid estimates of
//! aviation fuel use by TIAM-UCL world region.
//!
//! The main assumption inherent in the model is that large-scale reductions
//! in aviation emissions will largely be achieved by drop-in fuel use
//! (biofuels or PTL) rather than fully electric or hydrogen aircraft, due
//! to the long lifespan of aircraft models: fuel changes requiring fully
//! redesigned aircraft are likely to be significantly slower than those
//! that can apply to existing aircraft. Biofuel blend uptake is assumed
//! calculated outside the metamodel in the calling IAM, which adjusts the
//! input kerosene and carbon prices for the blend before calling in; fuel
//! lifecycle emissions factors are likewise applied downstream.
//!
//! Before 2017 the model returns a single value across kerosene and carbon
//! price assumptions, based on actual historical trends. From 2017 onwards
//! it responds to the given prices.
//!
//! # Module Organisation
//!
//! - [`grid`]: read-in of the pre-computed AIM grid outputs by country
//! - [`regions`]: TIAM-UCL regions and the country-to-region lookup
//! - [`prices`]: price table read-in, unit conversions, synthetic trends
//! - [`axes`]: time-dependent oil/carbon price grid points
//! - [`interpolate`]: bilinear interpolation with linear extrapolation
//! - [`metamodel`]: regional interpolation and negative-value cleanup
//! - [`output`]: the per-region soft-link output file
//! - [`scenario`]: scenario identifiers and run configuration

pub mod axes;
pub mod errors;
pub mod grid;
pub mod interpolate;
pub mod metamodel;
pub mod output;
pub mod prices;
pub mod regions;
pub mod scenario;

pub use errors::{AviationError, AviationResult};
pub use grid::BaseGrid;
pub use metamodel::Metamodel;
pub use output::{RegionalResults, ResultRow};
pub use prices::PriceTable;
pub use regions::{CountryLookup, TiamRegion};
pub use scenario::{RunConfig, RunMode, SspScenario, TechScenario};
