//! Boolean predicates over a [`Creature`].
//!
//! These are the single source of truth for the filter views *and* the
//! statistics counts. Nothing else in the workspace re-implements them.

use crate::Creature;
use derive_more::Display;

/// Exclusive lower bound of the weight-range predicate (raw remote units).
pub const WEIGHT_ABOVE: u32 = 30;
/// Exclusive upper bound of the weight-range predicate (raw remote units).
pub const WEIGHT_BELOW: u32 = 80;
/// Exclusive lower bound on height for the compound predicate.
pub const TALL_ABOVE: u32 = 10;
pub const GRASS: &str = "grass";
pub const FLYING: &str = "flying";

/// `30 < weight < 80`, both bounds strict.
pub fn matches_weight_filter(creature: &Creature) -> bool {
    creature.weight > WEIGHT_ABOVE && creature.weight < WEIGHT_BELOW
}

/// The literal label `"grass"` is present in the type list.
pub fn is_grass_type(creature: &Creature) -> bool {
    creature.has_type(GRASS)
}

/// The literal label `"flying"` is present and `height > 10`.
pub fn is_flying_and_tall(creature: &Creature) -> bool {
    creature.has_type(FLYING) && creature.height > TALL_ABOVE
}

/// The three filter views exposed over the record store.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    #[display("weight above 30 and below 80")]
    Weight,
    #[display("type: grass")]
    Grass,
    #[display("type flying and height above 10")]
    FlyingTall,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::Weight, Filter::Grass, Filter::FlyingTall];

    pub fn matches(self, creature: &Creature) -> bool {
        match self {
            Self::Weight => matches_weight_filter(creature),
            Self::Grass => is_grass_type(creature),
            Self::FlyingTall => is_flying_and_tall(creature),
        }
    }
}
