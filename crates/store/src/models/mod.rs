mod creature;
mod favorite;

pub(crate) use self::creature::{CreatureParams, CreatureRow};
pub(crate) use self::favorite::{FavoriteRow, MarkRow};
