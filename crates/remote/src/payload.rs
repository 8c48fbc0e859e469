//! Wire format of the remote creature endpoint.
//!
//! Only the fields the catalogue stores are declared; everything else in the
//! (rather large) response body is ignored by serde.

use pokedex_models::Creature;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CreaturePayload {
    id: u32,
    name: String,
    #[serde(default)]
    types: Vec<TypeSlot>,
    height: u32,
    weight: u32,
    #[serde(default)]
    sprites: Sprites,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    #[serde(default)]
    front_default: Option<String>,
}

impl From<CreaturePayload> for Creature {
    fn from(payload: CreaturePayload) -> Self {
        Self {
            external_id: payload.id,
            name: payload.name,
            types: payload.types.into_iter().map(|slot| slot.kind.name).collect(),
            height: payload.height,
            weight: payload.weight,
            sprite_url: payload.sprites.front_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_to_creature() {
        let json = r#"{
            "id": 1,
            "name": "bulbasaur",
            "base_experience": 64,
            "height": 7,
            "weight": 69,
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ],
            "sprites": {"front_default": "https://example.test/1.png", "back_default": null}
        }"#;
        let payload: CreaturePayload = serde_json::from_str(json).unwrap();
        let creature = Creature::from(payload);
        assert_eq!(creature.external_id, 1);
        assert_eq!(creature.name, "bulbasaur");
        assert_eq!(creature.types, vec!["grass".to_string(), "poison".to_string()]);
        assert_eq!(creature.height, 7);
        assert_eq!(creature.weight, 69);
        assert_eq!(creature.sprite_url.as_deref(), Some("https://example.test/1.png"));
    }

    #[test]
    fn test_missing_sprite_is_none() {
        let json = r#"{"id": 10, "name": "caterpie", "height": 3, "weight": 29,
            "types": [{"slot": 1, "type": {"name": "bug"}}], "sprites": {"front_default": null}}"#;
        let creature = Creature::from(serde_json::from_str::<CreaturePayload>(json).unwrap());
        assert!(creature.sprite_url.is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"id": 10, "name": "caterpie", "height": 3}"#;
        assert!(serde_json::from_str::<CreaturePayload>(json).is_err());
    }
}
