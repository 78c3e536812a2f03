//! Jurisdiction policy constants.
//!
//! Every rate the valuation uses lives here so that a notified revision is a
//! one-line change. Rupee amounts are per unit stated in the constant name.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{CommercialBuildupKind, TreeSpecies};

// --- Area and length conversion ---

pub const SQ_FT_PER_SQ_METER: Decimal = dec!(10.7639);
pub const METERS_PER_FOOT: Decimal = dec!(0.3048);

pub const SQ_METERS_PER_SQ_FOOT: Decimal = dec!(0.092903);
pub const SQ_METERS_PER_SQ_YARD: Decimal = dec!(0.836127);
pub const SQ_METERS_PER_ACRE: Decimal = dec!(4046.86);
pub const SQ_METERS_PER_HECTARE: Decimal = dec!(10000);
/// Pucca bigha of 3025 square yards.
pub const SQ_METERS_PER_BIGHA: Decimal = dec!(2529.29);
pub const SQ_METERS_PER_KANAL: Decimal = dec!(505.857);
pub const SQ_METERS_PER_MARLA: Decimal = dec!(25.2929);

// --- Duty and fees ---

pub const STAMP_DUTY_RATE: Decimal = dec!(0.07);
pub const REGISTRATION_RATE: Decimal = dec!(0.01);
pub const DOUBLE_SIDE_ROAD_PREMIUM: Decimal = dec!(0.10);

// --- Concessions ---

pub const FEMALE_BUYER_REBATE_RATE: Decimal = dec!(0.01);
pub const EX_SERVICEMAN_FLAT_STAMP_DUTY: Decimal = dec!(100);
pub const HANDICAPPED_REBATE_RATE: Decimal = dec!(0.25);
pub const HANDICAPPED_REBATE_VALUE_CAP: Decimal = dec!(500000);

// --- Construction, ₹ per square foot ---

pub const RESIDENTIAL_CONSTRUCTION_RATE: Decimal = dec!(1200);
pub const SINGLE_SHOP_CONSTRUCTION_RATE: Decimal = dec!(1500);
pub const MULTIPLE_SHOPS_CONSTRUCTION_RATE: Decimal = dec!(1800);
pub const MALL_CONSTRUCTION_RATE: Decimal = dec!(2500);

// --- Agricultural additions, ₹ each ---

pub const WELL_RATE: Decimal = dec!(50000);
pub const BOREWELL_RATE: Decimal = dec!(30000);

pub const MANGO_TREE_RATE: Decimal = dec!(5000);
pub const NEEM_TREE_RATE: Decimal = dec!(3000);
pub const SHEESHAM_TREE_RATE: Decimal = dec!(4000);
pub const TEAK_TREE_RATE: Decimal = dec!(6000);
pub const EUCALYPTUS_TREE_RATE: Decimal = dec!(1000);
pub const OTHER_TREE_RATE: Decimal = dec!(2000);

pub fn commercial_construction_rate(kind: CommercialBuildupKind) -> Decimal {
    match kind {
        CommercialBuildupKind::SingleShop => SINGLE_SHOP_CONSTRUCTION_RATE,
        CommercialBuildupKind::MultipleShops => MULTIPLE_SHOPS_CONSTRUCTION_RATE,
        CommercialBuildupKind::Mall => MALL_CONSTRUCTION_RATE,
    }
}

pub fn tree_rate(species: TreeSpecies) -> Decimal {
    match species {
        TreeSpecies::Mango => MANGO_TREE_RATE,
        TreeSpecies::Neem => NEEM_TREE_RATE,
        TreeSpecies::Sheesham => SHEESHAM_TREE_RATE,
        TreeSpecies::Teak => TEAK_TREE_RATE,
        TreeSpecies::Eucalyptus => EUCALYPTUS_TREE_RATE,
        TreeSpecies::Other => OTHER_TREE_RATE,
    }
}
