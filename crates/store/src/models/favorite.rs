use crate::error::{Error, ErrorKind};
use crate::models::CreatureRow;
use exn::ResultExt;
use pokedex_models::{CreatureRecord, FavoriteMark};
use time::UtcDateTime;

/// A favorite joined with the creature it references.
///
/// Both tables have `id` and `created_at` columns, so the favorite's own
/// columns are aliased to `favorite_id` and `favorited_at` in every query.
#[derive(sqlx::FromRow)]
pub(crate) struct FavoriteRow {
    pub(crate) favorite_id: i64,
    pub(crate) favorited_at: i64,
    #[sqlx(flatten)]
    pub(crate) creature: CreatureRow,
}
impl TryFrom<FavoriteRow> for FavoriteMark {
    type Error = Error;
    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let creature = CreatureRecord::try_from(row.creature)?;
        MarkRow { id: row.favorite_id, created_at: row.favorited_at }.into_mark(creature)
    }
}

/// The favorite's own columns, as returned by `INSERT`/`DELETE ... RETURNING`.
#[derive(sqlx::FromRow)]
pub(crate) struct MarkRow {
    pub(crate) id: i64,
    pub(crate) created_at: i64,
}
impl MarkRow {
    pub(crate) fn into_mark(self, creature: CreatureRecord) -> Result<FavoriteMark, Error> {
        Ok(FavoriteMark {
            id: self.id,
            creature,
            created_at: UtcDateTime::from_unix_timestamp(self.created_at)
                .or_raise(|| ErrorKind::InvalidData("favorite date"))?,
        })
    }
}
