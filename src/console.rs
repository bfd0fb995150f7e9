use std::io::{BufRead, Write};

use log::warn;

use crate::api::CardSource;
use crate::card::Card;
use crate::controller::CollectionController;
use crate::filter::{OwnershipFilter, TypeFilter};

const HELP: &str = "Commands:
  list                         show the current page
  more                         load the next page
  search [text]                filter by name (no text clears the search)
  owned <all|owned|missing>    filter by ownership (wishlist = missing)
  type <all|Monster|category>  filter by card type
  types                        list the card types in the collection
  + <id>                       add one copy
  - <id>                       remove one copy
  reload                       fetch the collection again
  help                         show this text
  quit                         leave";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
  List,
  More,
  Search(String),
  Ownership(OwnershipFilter),
  Type(TypeFilter),
  Types,
  Increment(i64),
  Decrement(i64),
  Reload,
  Help,
  Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
  let line = line.trim();
  let (word, rest) = match line.split_once(char::is_whitespace) {
    Some((word, rest)) => (word, rest.trim()),
    None => (line, ""),
  };

  match word.to_lowercase().as_str() {
    "" | "list" | "ls" => Ok(Command::List),
    "more" | "next" => Ok(Command::More),
    "search" | "find" => Ok(Command::Search(rest.to_string())),
    "owned" | "filter" => OwnershipFilter::parse(rest).map(Command::Ownership),
    "type" => Ok(Command::Type(TypeFilter::parse(rest))),
    "types" => Ok(Command::Types),
    "+" | "add" => parse_card_id(rest).map(Command::Increment),
    "-" | "remove" => parse_card_id(rest).map(Command::Decrement),
    "reload" => Ok(Command::Reload),
    "help" | "?" => Ok(Command::Help),
    "quit" | "exit" | "q" => Ok(Command::Quit),
    other => Err(format!("Unknown command '{}'.", other)),
  }
}

fn parse_card_id(raw: &str) -> Result<i64, String> {
  if raw.is_empty() {
    return Err("A card id is required.".to_string());
  }
  raw
    .parse::<i64>()
    .map_err(|_| format!("'{}' is not a card id.", raw))
}

pub fn render_card(card: &Card) -> String {
  let mut lines = vec![format!("[{}] {}", card.id, card.name)];
  lines.push(format!("    Type: {}", card.card_type));
  if let Some(stats) = card.stats_line() {
    lines.push(format!("    {}", stats));
  }
  let desc = card.desc.trim();
  if !desc.is_empty() {
    lines.push(format!("    {}", desc));
  }
  lines.push(format!("    Owned: {}", card.owned));
  if let Some(image_url) = card.image_url.as_deref().filter(|url| !url.trim().is_empty()) {
    lines.push(format!("    Image: {}", image_url.trim()));
  }
  lines.join("\n")
}

fn render_view<S: CardSource>(controller: &CollectionController<S>) -> String {
  let mut out = String::new();
  for card in controller.current_page() {
    out.push_str(&render_card(card));
    out.push('\n');
  }

  let summary = controller.summary();
  out.push_str(&format!(
    "Showing {} of {} cards ({} in collection)",
    summary.shown, summary.filtered, summary.total
  ));
  if let Some(loaded_at) = controller.loaded_at() {
    out.push_str(&format!(", fetched {}", loaded_at.format("%Y-%m-%d %H:%M:%S UTC")));
  }
  out.push('\n');
  if controller.has_more() {
    out.push_str("Type 'more' to load more cards.\n");
  }
  out
}

/// Feeds commands from `input` into the controller until `quit` or EOF.
pub fn run_session<S, R, W>(
  controller: &mut CollectionController<S>,
  input: R,
  output: &mut W,
) -> Result<(), String>
where
  S: CardSource,
  R: BufRead,
  W: Write,
{
  write!(output, "{}", render_view(controller)).map_err(|e| e.to_string())?;

  for line in input.lines() {
    let line = line.map_err(|e| e.to_string())?;
    let command = match parse_command(&line) {
      Ok(command) => command,
      Err(message) => {
        warn!("Rejected command '{}': {}", line.trim(), message);
        writeln!(output, "{}\n{}", message, HELP).map_err(|e| e.to_string())?;
        continue;
      }
    };

    let text = match command {
      Command::Quit => break,
      Command::Help => format!("{}\n", HELP),
      Command::List => render_view(controller),
      Command::Types => {
        let mut text = String::from("Monster (any monster type)\n");
        for category in controller.type_categories() {
          text.push_str(&category);
          text.push('\n');
        }
        text
      }
      Command::More => {
        if controller.load_more() {
          render_view(controller)
        } else {
          "No more cards.\n".to_string()
        }
      }
      Command::Search(text) => {
        controller.set_search(&text);
        render_view(controller)
      }
      Command::Ownership(ownership) => {
        controller.set_ownership(ownership);
        render_view(controller)
      }
      Command::Type(card_type) => {
        controller.set_type(card_type);
        render_view(controller)
      }
      Command::Reload => match controller.load() {
        Ok(_) => render_view(controller),
        Err(err) => format!("Could not load cards: {}\n", err),
      },
      Command::Increment(card_id) => owned_result(controller.increment(card_id), card_id),
      Command::Decrement(card_id) => owned_result(controller.decrement(card_id), card_id),
    };

    write!(output, "{}", text).map_err(|e| e.to_string())?;
    output.flush().map_err(|e| e.to_string())?;
  }

  Ok(())
}

fn owned_result(result: Result<i64, String>, card_id: i64) -> String {
  match result {
    Ok(owned) => format!("Card {} owned: {}\n", card_id, owned),
    Err(err) => format!("Update failed: {}\n", err),
  }
}
