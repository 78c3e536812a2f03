use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A room of a flat, measured in feet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub room_type: String,
    pub length_ft: Decimal,
    pub width_ft: Decimal,
}

impl Room {
    /// `None` when the product does not fit in a [`Decimal`].
    pub fn area_sq_ft(&self) -> Option<Decimal> {
        self.length_ft.checked_mul(self.width_ft)
    }
}

/// A shop or mall floor, in square feet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorArea {
    #[serde(default)]
    pub label: String,
    pub area_sq_ft: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeSpecies {
    Mango,
    Neem,
    Sheesham,
    Teak,
    Eucalyptus,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeCount {
    pub species: TreeSpecies,
    pub count: u32,
}

/// Structures and fixtures on the plot that add to its value.
///
/// Which lists are read depends on the property and plot type; the rest are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructureAdditions {
    pub rooms: Vec<Room>,
    pub shops: Vec<FloorArea>,
    pub floors: Vec<FloorArea>,
    pub wells: u32,
    pub borewells: u32,
    pub trees: Vec<TreeCount>,
}

fn checked_total(mut areas: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    areas.try_fold(Decimal::ZERO, |total, area| total.checked_add(area?))
}

/// The area totals return `None` on overflow.
impl StructureAdditions {
    pub fn rooms_area_sq_ft(&self) -> Option<Decimal> {
        checked_total(self.rooms.iter().map(Room::area_sq_ft))
    }

    pub fn shops_area_sq_ft(&self) -> Option<Decimal> {
        checked_total(self.shops.iter().map(|s| Some(s.area_sq_ft)))
    }

    pub fn floors_area_sq_ft(&self) -> Option<Decimal> {
        checked_total(self.floors.iter().map(|f| Some(f.area_sq_ft)))
    }
}
