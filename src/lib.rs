use std::io;

use env_logger::Env;
use log::info;

pub mod api;
pub mod card;
pub mod config;
pub mod console;
pub mod controller;
pub mod filter;
pub mod pager;

use api::HttpCardSource;
use config::Config;
use controller::CollectionController;

pub fn run() -> Result<(), String> {
  env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

  let config = Config::from_env()?;
  let source = HttpCardSource::new(&config)?;
  info!("Using card backend at {}", source.base_url());

  let mut controller = CollectionController::new(source, config.page_size);
  // A failed first load is logged by the controller; the session starts empty.
  let _ = controller.load();

  let stdin = io::stdin();
  let mut stdout = io::stdout();
  console::run_session(&mut controller, stdin.lock(), &mut stdout)
}
