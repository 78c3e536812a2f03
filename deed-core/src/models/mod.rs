mod additions;
mod financial;
mod person;
mod property;
mod valuation;

pub use additions::{FloorArea, Room, StructureAdditions, TreeCount, TreeSpecies};
pub use financial::{CircleRateBasis, Deduction, FinancialInputs};
pub use person::{IdType, PersonRecord};
pub use property::{
    AreaInputMode, AreaUnit, CommercialBuildupKind, LengthUnit, PlotType, PropertyFacts,
    PropertyType,
};
pub use valuation::{ValuationResult, ValuationWarning};
