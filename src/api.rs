use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};

use crate::card::{parse_cards, Card, OwnedUpdate};
use crate::config::Config;

const CLIENT_USER_AGENT: &str = concat!("ygo-binder/", env!("CARGO_PKG_VERSION"));

/// Remote side of the collection: one full read, one single-field write.
pub trait CardSource {
  fn fetch_cards(&self) -> Result<Vec<Card>, String>;
  fn update_owned(&self, card_id: i64, owned: i64) -> Result<(), String>;
}

pub struct HttpCardSource {
  client: Client,
  base_url: String,
}

impl HttpCardSource {
  pub fn new(config: &Config) -> Result<Self, String> {
    let client = Client::builder()
      .timeout(config.request_timeout)
      .build()
      .map_err(|e| e.to_string())?;

    Ok(HttpCardSource {
      client,
      base_url: config.api_base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn cards_url(&self) -> String {
    format!("{}/cards", self.base_url)
  }

  fn card_url(&self, card_id: i64) -> String {
    format!("{}/cards/{}", self.base_url, card_id)
  }
}

impl CardSource for HttpCardSource {
  fn fetch_cards(&self) -> Result<Vec<Card>, String> {
    let response = self
      .client
      .get(self.cards_url())
      .header(USER_AGENT, CLIENT_USER_AGENT)
      .header(ACCEPT, "application/json")
      .send()
      .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
      return Err(format!(
        "Card list request failed with status {}",
        response.status()
      ));
    }

    let body = response.text().map_err(|e| e.to_string())?;
    parse_cards(&body)
  }

  fn update_owned(&self, card_id: i64, owned: i64) -> Result<(), String> {
    let response = self
      .client
      .put(self.card_url(card_id))
      .header(USER_AGENT, CLIENT_USER_AGENT)
      .json(&OwnedUpdate { owned })
      .send()
      .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
      return Err(format!(
        "Owned update for card {} failed with status {}",
        card_id,
        response.status()
      ));
    }

    Ok(())
  }
}
