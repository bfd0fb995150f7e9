use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::api::CardSource;
use crate::card::{next_owned, Card};
use crate::filter::{derive_filtered, type_categories, FilterCriteria, OwnershipFilter, TypeFilter};
use crate::pager::{derive_page, Pager};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
  pub shown: usize,
  pub filtered: usize,
  pub total: usize,
}

/// Owns the session state: the cached card list, the filter criteria and the
/// infinite-scroll window. Derived data is rebuilt by `recompute` after every
/// change; nothing is patched incrementally.
pub struct CollectionController<S: CardSource> {
  source: S,
  all_cards: Vec<Card>,
  criteria: FilterCriteria,
  filtered: Vec<Card>,
  pager: Pager,
  loaded_at: Option<DateTime<Utc>>,
}

impl<S: CardSource> CollectionController<S> {
  pub fn new(source: S, page_size: usize) -> Self {
    CollectionController {
      source,
      all_cards: Vec::new(),
      criteria: FilterCriteria::default(),
      filtered: Vec::new(),
      pager: Pager::new(page_size),
      loaded_at: None,
    }
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  /// Fetches the whole collection. On failure the cached list is left as it
  /// was (empty on first load) and the error is logged.
  pub fn load(&mut self) -> Result<usize, String> {
    match self.source.fetch_cards() {
      Ok(cards) => {
        info!("Loaded {} cards", cards.len());
        self.all_cards = cards;
        self.loaded_at = Some(Utc::now());
        self.criteria_changed();
        Ok(self.all_cards.len())
      }
      Err(err) => {
        error!("Loading cards failed: {}", err);
        self.recompute();
        Err(err)
      }
    }
  }

  pub fn set_search(&mut self, search: &str) {
    let search = search.trim();
    if self.criteria.search.to_lowercase() == search.to_lowercase() {
      return;
    }
    self.criteria.search = search.to_string();
    self.criteria_changed();
  }

  pub fn set_ownership(&mut self, ownership: OwnershipFilter) {
    if self.criteria.ownership == ownership {
      return;
    }
    self.criteria.ownership = ownership;
    self.criteria_changed();
  }

  pub fn set_type(&mut self, card_type: TypeFilter) {
    if self.criteria.card_type == card_type {
      return;
    }
    self.criteria.card_type = card_type;
    self.criteria_changed();
  }

  /// Reveals the next page. Returns false when everything is already shown.
  pub fn load_more(&mut self) -> bool {
    let grew = self.pager.load_more(self.filtered.len());
    if grew {
      debug!(
        "Window grown to {} of {} filtered cards",
        self.pager.shown(self.filtered.len()),
        self.filtered.len()
      );
    }
    grew
  }

  pub fn increment(&mut self, card_id: i64) -> Result<i64, String> {
    self.update_owned(card_id, 1)
  }

  pub fn decrement(&mut self, card_id: i64) -> Result<i64, String> {
    self.update_owned(card_id, -1)
  }

  /// Writes `max(0, owned + delta)` to the server and only then replaces the
  /// cached card. A failed write leaves local state untouched.
  ///
  /// The current owned count is read from the local cache, so two writes
  /// issued before either is reflected here would both start from the same
  /// value.
  pub fn update_owned(&mut self, card_id: i64, delta: i64) -> Result<i64, String> {
    let Some(index) = self.all_cards.iter().position(|card| card.id == card_id) else {
      warn!("Owned update for unknown card {}", card_id);
      return Err(format!("Card not found: {}", card_id));
    };

    let current = self.all_cards[index].owned;
    let owned = next_owned(current, delta);

    if let Err(err) = self.source.update_owned(card_id, owned) {
      error!("Updating owned count for card {} failed: {}", card_id, err);
      return Err(err);
    }

    let updated = self.all_cards[index].with_owned(owned);
    info!(
      "Card {} ({}) owned {} -> {}",
      card_id, updated.name, current, owned
    );
    self.all_cards[index] = updated;
    self.recompute();
    Ok(owned)
  }

  pub fn current_page(&self) -> &[Card] {
    derive_page(&self.filtered, &self.pager)
  }

  pub fn has_more(&self) -> bool {
    self.pager.has_more()
  }

  pub fn summary(&self) -> Summary {
    Summary {
      shown: self.current_page().len(),
      filtered: self.filtered.len(),
      total: self.all_cards.len(),
    }
  }

  pub fn criteria(&self) -> &FilterCriteria {
    &self.criteria
  }

  pub fn all_cards(&self) -> &[Card] {
    &self.all_cards
  }

  pub fn filtered_cards(&self) -> &[Card] {
    &self.filtered
  }

  pub fn card(&self, card_id: i64) -> Option<&Card> {
    self.all_cards.iter().find(|card| card.id == card_id)
  }

  pub fn type_categories(&self) -> Vec<String> {
    type_categories(&self.all_cards)
  }

  pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
    self.loaded_at
  }

  fn criteria_changed(&mut self) {
    self.recompute();
    self.pager.reset(self.filtered.len());
  }

  fn recompute(&mut self) {
    self.filtered = derive_filtered(&self.all_cards, &self.criteria);
    self.pager.sync(self.filtered.len());
    debug!(
      "Recomputed view: {} of {} cards match, {} visible",
      self.filtered.len(),
      self.all_cards.len(),
      self.pager.shown(self.filtered.len())
    );
  }
}
