use crate::error::{Error, ErrorKind};
use exn::ResultExt;
use facet_json::{from_str as from_json, to_string as to_json};
use pokedex_models::{Creature, CreatureRecord};
use time::UtcDateTime;

/// A full row of the `creatures` table.
#[derive(sqlx::FromRow)]
pub(crate) struct CreatureRow {
    pub(crate) id: i64,
    pub(crate) external_id: i64,
    pub(crate) name: String,
    pub(crate) types: String,
    pub(crate) height: i64,
    pub(crate) weight: i64,
    pub(crate) sprite_url: Option<String>,
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}
impl TryFrom<CreatureRow> for CreatureRecord {
    type Error = Error;
    fn try_from(row: CreatureRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            creature: Creature {
                external_id: u32::try_from(row.external_id).or_raise(|| ErrorKind::InvalidData("external id"))?,
                name: row.name,
                types: from_json::<Vec<String>>(&row.types).or_raise(|| ErrorKind::InvalidData("types"))?,
                height: u32::try_from(row.height).or_raise(|| ErrorKind::InvalidData("height"))?,
                weight: u32::try_from(row.weight).or_raise(|| ErrorKind::InvalidData("weight"))?,
                sprite_url: row.sprite_url,
            },
            created_at: UtcDateTime::from_unix_timestamp(row.created_at)
                .or_raise(|| ErrorKind::InvalidData("creation date"))?,
            updated_at: UtcDateTime::from_unix_timestamp(row.updated_at)
                .or_raise(|| ErrorKind::InvalidData("update date"))?,
        })
    }
}

/// Column values written by an upsert; the row id and timestamps are
/// assigned by the store.
pub(crate) struct CreatureParams {
    pub(crate) external_id: i64,
    pub(crate) name: String,
    pub(crate) types: String,
    pub(crate) height: i64,
    pub(crate) weight: i64,
    pub(crate) sprite_url: Option<String>,
}
impl TryFrom<&Creature> for CreatureParams {
    type Error = Error;
    fn try_from(creature: &Creature) -> Result<Self, Self::Error> {
        Ok(Self {
            external_id: i64::from(creature.external_id),
            name: creature.name.clone(),
            types: to_json(&creature.types).or_raise(|| ErrorKind::InvalidData("types"))?,
            height: i64::from(creature.height),
            weight: i64::from(creature.weight),
            sprite_url: creature.sprite_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CreatureRow {
        CreatureRow {
            id: 7,
            external_id: 1,
            name: "bulbasaur".to_string(),
            types: r#"["grass","poison"]"#.to_string(),
            height: 7,
            weight: 69,
            sprite_url: Some("https://example.test/1.png".to_string()),
            created_at: 1_700_000_000,
            updated_at: 1_700_000_500,
        }
    }

    #[test]
    fn test_row_to_model() {
        let record = CreatureRecord::try_from(row()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.creature.external_id, 1);
        assert_eq!(record.creature.types, vec!["grass".to_string(), "poison".to_string()]);
        assert_eq!(record.updated_at.unix_timestamp(), 1_700_000_500);
    }

    #[test]
    fn test_row_with_negative_weight_is_invalid() {
        let row = CreatureRow { weight: -1, ..row() };
        assert!(CreatureRecord::try_from(row).is_err());
    }

    #[test]
    fn test_row_with_malformed_types_is_invalid() {
        let row = CreatureRow {
            types: "grass, poison".to_string(),
            ..row()
        };
        assert!(CreatureRecord::try_from(row).is_err());
    }

    #[test]
    fn test_model_to_params() {
        let creature = Creature {
            external_id: 16,
            name: "pidgey".to_string(),
            types: vec!["normal".to_string(), "flying".to_string()],
            height: 3,
            weight: 18,
            sprite_url: None,
        };
        let params = CreatureParams::try_from(&creature).unwrap();
        assert_eq!(params.external_id, 16);
        assert_eq!(params.types, r#"["normal","flying"]"#);
        assert!(params.sprite_url.is_none());
    }
}
