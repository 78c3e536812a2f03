//! Valuation arithmetic for conveyance deeds.
//!
//! Area conversion, the fixed policy rates, and the worksheet that turns
//! property facts into stamp duty and registration charges.

pub mod age;
pub mod area;
pub mod common;
pub mod rates;
pub mod valuation;

pub use age::age_in_years;
pub use area::{length_to_meters, sq_meters_to_sq_ft, sq_ft_to_sq_meters, to_sq_meters, from_sq_meters};
pub use valuation::{ValuationError, ValuationWorksheet, plot_area_sq_meters};
