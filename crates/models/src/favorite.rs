use crate::CreatureRecord;
use time::UtcDateTime;

/// Marks a single [`CreatureRecord`] as a favorite.
///
/// The relationship is one-to-one: the store rejects a second mark for the
/// same record, and deleting the record deletes its mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteMark {
    /// Local identifier of the mark itself (not of the creature).
    pub id: i64,
    pub creature: CreatureRecord,
    pub created_at: UtcDateTime,
}
