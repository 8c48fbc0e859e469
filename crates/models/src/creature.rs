use crate::display;
use time::UtcDateTime;

/// Creature data as published by the remote source.
///
/// Heights and weights are kept in the raw units of the remote source; no
/// conversion to metres or kilograms ever happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    /// Stable identifier assigned by the remote source.
    pub external_id: u32,
    pub name: String,
    /// Type labels in the order the remote source lists them.
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub sprite_url: Option<String>,
}

impl Creature {
    /// Case-sensitive, exact membership test against the stored type labels.
    pub fn has_type(&self, label: &str) -> bool {
        self.types.iter().any(|t| t == label)
    }

    pub fn reversed_name(&self) -> String {
        display::reversed_name(&self.name)
    }

    pub fn types_display(&self) -> String {
        display::types_display(&self.types)
    }
}

/// A [`Creature`] as persisted in the local record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureRecord {
    /// Local row identifier; unrelated to [`Creature::external_id`].
    pub id: i64,
    pub creature: Creature,
    pub created_at: UtcDateTime,
    pub updated_at: UtcDateTime,
}
