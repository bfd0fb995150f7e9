use std::time::Duration;

use crate::pager::PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "https://yugioh-backend-hhhx.onrender.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

const ENV_API_URL: &str = "YGO_BINDER_API_URL";
const ENV_PAGE_SIZE: &str = "YGO_BINDER_PAGE_SIZE";
const ENV_TIMEOUT_SECS: &str = "YGO_BINDER_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
  pub api_base_url: String,
  pub page_size: usize,
  pub request_timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      api_base_url: DEFAULT_API_BASE_URL.to_string(),
      page_size: PAGE_SIZE,
      request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, String> {
    Config::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Config, String>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Config::default();

    if let Some(url) = lookup(ENV_API_URL) {
      config.api_base_url = normalize_base_url(&url)?;
    }

    if let Some(raw) = lookup(ENV_PAGE_SIZE) {
      let page_size = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("{} must be a positive integer: {}", ENV_PAGE_SIZE, e))?;
      if page_size == 0 {
        return Err(format!("{} must be greater than zero.", ENV_PAGE_SIZE));
      }
      config.page_size = page_size;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
      let seconds = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("{} must be a whole number of seconds: {}", ENV_TIMEOUT_SECS, e))?;
      config.request_timeout = Duration::from_secs(seconds);
    }

    Ok(config)
  }
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
  let trimmed = raw.trim().trim_end_matches('/');
  if trimmed.is_empty() {
    return Err(format!("{} is set but empty.", ENV_API_URL));
  }
  if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
    return Err(format!(
      "{} must start with http:// or https://, got '{}'",
      ENV_API_URL, trimmed
    ));
  }
  Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key| map.get(key).cloned()
  }

  #[test]
  fn defaults_without_environment() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.page_size, 20);
    assert_eq!(config.request_timeout, Duration::from_secs(60));
  }

  #[test]
  fn overrides_are_applied_and_trimmed() {
    let config = Config::from_lookup(lookup_from(&[
      (ENV_API_URL, " http://localhost:8000/ "),
      (ENV_PAGE_SIZE, "10"),
      (ENV_TIMEOUT_SECS, "5"),
    ]))
    .unwrap();
    assert_eq!(config.api_base_url, "http://localhost:8000");
    assert_eq!(config.page_size, 10);
    assert_eq!(config.request_timeout, Duration::from_secs(5));
  }

  #[test]
  fn rejects_bad_values() {
    assert!(Config::from_lookup(lookup_from(&[(ENV_PAGE_SIZE, "0")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[(ENV_PAGE_SIZE, "many")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "-1")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[(ENV_API_URL, "ftp://cards")])).is_err());
    assert!(Config::from_lookup(lookup_from(&[(ENV_API_URL, "  ")])).is_err());
  }
}
