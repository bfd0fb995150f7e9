use crate::card::Card;

const MONSTER_MARKER: &str = "Monster";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OwnershipFilter {
  #[default]
  All,
  Owned,
  /// `owned == 0`. Also reachable as `wishlist`.
  Missing,
}

impl OwnershipFilter {
  pub fn parse(value: &str) -> Result<Self, String> {
    match value.trim().to_lowercase().as_str() {
      "" | "all" => Ok(OwnershipFilter::All),
      "owned" => Ok(OwnershipFilter::Owned),
      "missing" | "wishlist" => Ok(OwnershipFilter::Missing),
      other => Err(format!(
        "Unsupported ownership filter '{}'. Use all, owned or missing.",
        other
      )),
    }
  }

  fn keeps(self, card: &Card) -> bool {
    match self {
      OwnershipFilter::All => true,
      OwnershipFilter::Owned => card.owned > 0,
      OwnershipFilter::Missing => card.owned == 0,
    }
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
  #[default]
  All,
  /// Any type containing "Monster".
  Monster,
  /// Whole type, e.g. "Spell Card", ignoring ASCII case.
  Category(String),
}

impl TypeFilter {
  pub fn parse(value: &str) -> Self {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
      TypeFilter::All
    } else if trimmed.eq_ignore_ascii_case(MONSTER_MARKER) {
      TypeFilter::Monster
    } else {
      TypeFilter::Category(trimmed.to_string())
    }
  }

  fn keeps(&self, card: &Card) -> bool {
    match self {
      TypeFilter::All => true,
      TypeFilter::Monster => card.card_type.contains(MONSTER_MARKER),
      TypeFilter::Category(category) => card.card_type.eq_ignore_ascii_case(category),
    }
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
  pub search: String,
  pub ownership: OwnershipFilter,
  pub card_type: TypeFilter,
}

impl FilterCriteria {
  fn matches_search(&self, card: &Card) -> bool {
    let needle = self.search.trim().to_lowercase();
    needle.is_empty() || card.name.to_lowercase().contains(&needle)
  }

  pub fn matches(&self, card: &Card) -> bool {
    self.matches_search(card) && self.ownership.keeps(card) && self.card_type.keeps(card)
  }
}

/// Cards matching `criteria`, in server order.
pub fn derive_filtered(all_cards: &[Card], criteria: &FilterCriteria) -> Vec<Card> {
  all_cards
    .iter()
    .filter(|card| criteria.matches(card))
    .cloned()
    .collect()
}

/// Distinct card types in first-seen order, for the type selector.
pub fn type_categories(all_cards: &[Card]) -> Vec<String> {
  let mut categories: Vec<String> = Vec::new();
  for card in all_cards {
    let card_type = card.card_type.trim();
    if card_type.is_empty() || categories.iter().any(|known| known == card_type) {
      continue;
    }
    categories.push(card_type.to_string());
  }
  categories
}
