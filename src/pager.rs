//! Infinite-scroll window over the filtered cards.

pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
  page_size: usize,
  visible_count: usize,
  has_more: bool,
}

impl Default for Pager {
  fn default() -> Self {
    Pager::new(PAGE_SIZE)
  }
}

impl Pager {
  /// `page_size` of zero is bumped to one.
  pub fn new(page_size: usize) -> Self {
    let page_size = page_size.max(1);
    Pager {
      page_size,
      visible_count: page_size,
      has_more: false,
    }
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  pub fn visible_count(&self) -> usize {
    self.visible_count
  }

  pub fn has_more(&self) -> bool {
    self.has_more
  }

  /// Back to the first page, sized against a new filtered length.
  pub fn reset(&mut self, filtered_len: usize) {
    self.visible_count = self.page_size;
    self.sync(filtered_len);
  }

  /// Recomputes `has_more` without moving the window.
  pub fn sync(&mut self, filtered_len: usize) {
    self.has_more = self.visible_count < filtered_len;
  }

  /// Grows the window by one page. Returns false (and changes nothing) when
  /// every filtered card is already visible.
  pub fn load_more(&mut self, filtered_len: usize) -> bool {
    if self.visible_count >= filtered_len {
      self.has_more = false;
      return false;
    }
    self.visible_count = self.visible_count.saturating_add(self.page_size);
    self.sync(filtered_len);
    true
  }

  pub fn shown(&self, filtered_len: usize) -> usize {
    self.visible_count.min(filtered_len)
  }
}

/// The visible prefix of `filtered`, clamped to its length.
pub fn derive_page<'a, T>(filtered: &'a [T], pager: &Pager) -> &'a [T] {
  &filtered[..pager.shown(filtered.len())]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn twenty_five_cards_take_two_pages() {
    let cards: Vec<u32> = (0..25).collect();
    let mut pager = Pager::default();
    pager.reset(cards.len());
    assert_eq!(derive_page(&cards, &pager).len(), 20);
    assert!(pager.has_more());

    assert!(pager.load_more(cards.len()));
    assert_eq!(derive_page(&cards, &pager).len(), 25);
    assert!(!pager.has_more());
  }

  #[test]
  fn load_more_when_exhausted_is_a_no_op() {
    let cards: Vec<u32> = (0..7).collect();
    let mut pager = Pager::default();
    pager.reset(cards.len());
    assert!(!pager.has_more());

    let before = pager;
    assert!(!pager.load_more(cards.len()));
    assert!(!pager.load_more(cards.len()));
    assert_eq!(pager, before);
    assert_eq!(derive_page(&cards, &pager), &cards[..]);
  }

  #[test]
  fn shrinking_filter_does_not_index_past_end() {
    let mut pager = Pager::default();
    pager.reset(100);
    pager.load_more(100);
    pager.load_more(100);
    assert_eq!(pager.visible_count(), 60);

    let narrowed: Vec<u32> = (0..12).collect();
    pager.sync(narrowed.len());
    assert_eq!(derive_page(&narrowed, &pager).len(), 12);
    assert!(!pager.has_more());
  }

  #[test]
  fn reset_returns_to_first_page() {
    let mut pager = Pager::default();
    pager.reset(50);
    pager.load_more(50);
    assert_eq!(pager.visible_count(), 40);
    pager.reset(50);
    assert_eq!(pager.visible_count(), 20);
    assert!(pager.has_more());
  }

  #[test]
  fn custom_page_size() {
    let mut pager = Pager::new(5);
    pager.reset(12);
    assert_eq!(pager.shown(12), 5);
    pager.load_more(12);
    pager.load_more(12);
    assert_eq!(pager.shown(12), 12);
    assert!(!pager.has_more());
    assert_eq!(Pager::new(0).page_size(), 1);
  }

  #[test]
  fn empty_collection_has_no_more() {
    let mut pager = Pager::default();
    pager.reset(0);
    assert!(!pager.has_more());
    let empty: Vec<u32> = Vec::new();
    assert!(derive_page(&empty, &pager).is_empty());
  }
}
