use serde::{Deserialize, Deserializer, Serialize};

/// One record of `GET /cards`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Card {
  pub id: i64,
  pub name: String,
  #[serde(rename = "type")]
  pub card_type: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub desc: String,
  #[serde(default)]
  pub atk: Option<i64>,
  #[serde(rename = "def_", alias = "def", default)]
  pub def: Option<i64>,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub owned: i64,
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `PUT /cards/{id}`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct OwnedUpdate {
  pub owned: i64,
}

/// Next owned count for a `+`/`-` click. Never goes below zero.
pub fn next_owned(current: i64, delta: i64) -> i64 {
  current.saturating_add(delta).max(0)
}

impl Card {
  pub fn with_owned(&self, owned: i64) -> Card {
    Card {
      owned: owned.max(0),
      ..self.clone()
    }
  }

  pub fn stats_line(&self) -> Option<String> {
    match (self.atk, self.def) {
      (None, None) => None,
      (atk, def) => Some(format!(
        "ATK: {} | DEF: {}",
        atk.map(|value| value.to_string()).unwrap_or_else(|| "?".to_string()),
        def.map(|value| value.to_string()).unwrap_or_else(|| "?".to_string())
      )),
    }
  }
}

/// Decodes a `GET /cards` payload, clamping any negative owned count to zero.
pub fn parse_cards(body: &str) -> Result<Vec<Card>, String> {
  let mut cards: Vec<Card> =
    serde_json::from_str(body).map_err(|e| format!("Unable to parse card list: {}", e))?;
  for card in cards.iter_mut() {
    card.owned = card.owned.max(0);
  }
  Ok(cards)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_backend_payload_with_def_underscore() {
    let body = r#"[
      {"id": 89631139, "name": "Blue-Eyes White Dragon", "type": "Normal Monster",
       "desc": "This legendary dragon...", "atk": 3000, "def_": 2500,
       "image_url": "https://images.example/89631139.jpg", "owned": 2}
    ]"#;
    let cards = parse_cards(body).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].card_type, "Normal Monster");
    assert_eq!(cards[0].def, Some(2500));
    assert_eq!(cards[0].owned, 2);
  }

  #[test]
  fn accepts_plain_def_and_missing_optionals() {
    let body = r#"[{"id": 1, "name": "Pot of Greed", "type": "Spell Card", "def": null}]"#;
    let cards = parse_cards(body).unwrap();
    assert_eq!(cards[0].atk, None);
    assert_eq!(cards[0].def, None);
    assert_eq!(cards[0].owned, 0);
    assert_eq!(cards[0].desc, "");
    assert_eq!(cards[0].stats_line(), None);
  }

  #[test]
  fn clamps_negative_owned_from_server() {
    let body = r#"[{"id": 1, "name": "Kuriboh", "type": "Effect Monster", "owned": -3}]"#;
    let cards = parse_cards(body).unwrap();
    assert_eq!(cards[0].owned, 0);
  }

  #[test]
  fn null_desc_and_owned_do_not_reject_the_payload() {
    let body = r#"[
      {"id": 1, "name": "Kuriboh", "type": "Effect Monster", "desc": null, "owned": null},
      {"id": 2, "name": "Dark Magician", "type": "Normal Monster", "desc": "Wizard.", "owned": 1}
    ]"#;
    let cards = parse_cards(body).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].desc, "");
    assert_eq!(cards[0].owned, 0);
    assert_eq!(cards[1].owned, 1);
    assert_eq!(next_owned(cards[0].owned, 1), 1);
  }

  #[test]
  fn rejects_non_array_payload() {
    assert!(parse_cards(r#"{"error": "down"}"#).is_err());
  }

  #[test]
  fn next_owned_clamps_at_zero() {
    assert_eq!(next_owned(0, -1), 0);
    assert_eq!(next_owned(3, -1), 2);
    assert_eq!(next_owned(3, 1), 4);
    assert_eq!(next_owned(1, -5), 0);
  }

  #[test]
  fn update_body_is_owned_only() {
    let body = serde_json::to_string(&OwnedUpdate { owned: 0 }).unwrap();
    assert_eq!(body, r#"{"owned":0}"#);
  }
}
