//! # Console Front End
//!
//! A line-oriented stand-in for the touch screen. Each line is parsed into a
//! [`Command`], dispatched to the matching command function, and answered
//! with one JSON document.
//!
//! ```text
//! stdin ──► "add cola 2" ──► Command::Add ──► commands::cart::add_to_cart
//!                                                   │
//! stdout ◄── {"ok":true,"data":{...}} ◄─────────────┘
//! ```

use std::str::FromStr;
use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tokio::time;
use tracing::{debug, warn};

use crate::commands::{cart, catalog, checkout};
use crate::error::HostError;
use crate::hold::HoldRepeat;
use crate::state::{HostConfig, OrderSession};

pub const HELP: &str = "\
commands:
  menu                 categories and the visible menu
  category <name>      all | burger | chicken | vegan | side | drink
  add <id> [qty]       add an item (default 1)
  inc <id>             + on a cart line
  dec <id>             - on a cart line
  rm <id>              delete a cart line
  hold <id> <ms>       keep + pressed for <ms> milliseconds
  cart                 show the cart
  cancel | pay         open a confirmation
  confirm | dismiss    answer the confirmation
  help | quit";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    Category(String),
    Add { item_id: String, quantity: Option<u32> },
    Increase(String),
    Decrease(String),
    Remove(String),
    Hold { item_id: String, duration: Duration },
    Cart,
    Cancel,
    Pay,
    Confirm,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: '{value}' is not a valid number")]
    InvalidNumber { command: &'static str, value: String },

    #[error("{command}: unexpected argument '{value}'")]
    UnexpectedArgument { command: &'static str, value: String },
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?;
        let mut args = Args {
            command: static_name(head),
            words,
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "menu" => Command::Menu,
            "category" | "cat" => Command::Category(args.required("name")?),
            "add" => Command::Add {
                item_id: args.required("id")?,
                quantity: args.optional_number()?,
            },
            "inc" | "+" => Command::Increase(args.required("id")?),
            "dec" | "-" => Command::Decrease(args.required("id")?),
            "rm" | "remove" => Command::Remove(args.required("id")?),
            "hold" => {
                let item_id = args.required("id")?;
                let ms = args.required_number("ms")?;
                Command::Hold {
                    item_id,
                    duration: Duration::from_millis(u64::from(ms)),
                }
            }
            "cart" => Command::Cart,
            "cancel" => Command::Cancel,
            "pay" => Command::Pay,
            "confirm" | "yes" => Command::Confirm,
            "dismiss" | "no" => Command::Dismiss,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        args.finish()?;
        Ok(command)
    }
}

/// Maps the command word to a `'static` name for error messages.
fn static_name(head: &str) -> &'static str {
    match head.to_ascii_lowercase().as_str() {
        "category" | "cat" => "category",
        "add" => "add",
        "inc" | "+" => "inc",
        "dec" | "-" => "dec",
        "rm" | "remove" => "rm",
        "hold" => "hold",
        _ => "command",
    }
}

struct Args<'a> {
    command: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn required(&mut self, argument: &'static str) -> Result<String, ParseError> {
        self.words
            .next()
            .map(str::to_string)
            .ok_or(ParseError::MissingArgument {
                command: self.command,
                argument,
            })
    }

    fn required_number(&mut self, argument: &'static str) -> Result<u32, ParseError> {
        let raw = self.required(argument)?;
        self.number(raw)
    }

    fn optional_number(&mut self) -> Result<Option<u32>, ParseError> {
        match self.words.next() {
            Some(raw) => self.number(raw.to_string()).map(Some),
            None => Ok(None),
        }
    }

    fn number(&self, raw: String) -> Result<u32, ParseError> {
        raw.parse().map_err(|_| ParseError::InvalidNumber {
            command: self.command,
            value: raw,
        })
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.words.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument {
                command: self.command,
                value: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// What the caller should do after a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Print this and keep reading
    Output(String),
    /// Stop the loop
    Quit,
}

/// Console bound to one order session.
#[derive(Debug, Clone)]
pub struct Console {
    session: OrderSession,
    config: HostConfig,
}

impl Console {
    pub fn new(session: OrderSession, config: HostConfig) -> Self {
        Console { session, config }
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    /// Parses and runs one input line.
    pub async fn handle_line(&self, line: &str) -> Reply {
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => return Reply::Quit,
            Ok(command) => command,
            Err(ParseError::Empty) => return Reply::Output(String::new()),
            Err(e) => {
                warn!(line = %line, error = %e, "unparseable console line");
                return Reply::Output(render(Err(HostError::validation(e.to_string()))));
            }
        };

        debug!(?command, "console command");
        Reply::Output(render(self.execute(command).await))
    }

    /// Runs a parsed command and returns its JSON payload.
    pub async fn execute(&self, command: Command) -> Result<Value, HostError> {
        let session = &self.session;

        match command {
            Command::Menu => Ok(json!({
                "categories": catalog::list_categories(session),
                "menu": catalog::visible_menu(session),
            })),
            Command::Category(name) => to_value(catalog::select_category(session, &name)?),
            Command::Add { item_id, quantity } => {
                self.cart_value(cart::add_to_cart(session, &item_id, quantity)?)
            }
            Command::Increase(item_id) => self.cart_value(cart::increase_item(session, &item_id)?),
            Command::Decrease(item_id) => self.cart_value(cart::decrease_item(session, &item_id)?),
            Command::Remove(item_id) => self.cart_value(cart::remove_item(session, &item_id)),
            Command::Hold { item_id, duration } => {
                let hold = HoldRepeat::start(session.clone(), item_id, self.config.hold_interval);
                time::sleep(duration).await;
                let summary = hold.release().await?;
                Ok(json!({
                    "hold": summary,
                    "cart": self.cart_value(cart::get_cart(session))?,
                }))
            }
            Command::Cart => self.cart_value(cart::get_cart(session)),
            Command::Cancel => to_value(checkout::request_cancel(session)?),
            Command::Pay => to_value(checkout::request_payment(session)?),
            Command::Confirm => to_value(checkout::confirm(session)?),
            Command::Dismiss => to_value(checkout::dismiss(session)?),
            Command::Help => Ok(Value::String(HELP.to_string())),
            Command::Quit => Ok(Value::Null),
        }
    }

    /// Cart response plus the formatted total the footer shows.
    fn cart_value(&self, response: cart::CartResponse) -> Result<Value, HostError> {
        let total_label = self.config.format_currency(response.totals.total_price);
        let mut value = to_value(response)?;
        if let Value::Object(map) = &mut value {
            map.insert("totalLabel".to_string(), Value::String(total_label));
        }
        Ok(value)
    }
}

fn to_value<T: serde::Serialize>(data: T) -> Result<Value, HostError> {
    serde_json::to_value(data).map_err(|e| HostError::internal(e.to_string()))
}

fn render(result: Result<Value, HostError>) -> String {
    let envelope = match result {
        Ok(data) => json!({ "ok": true, "data": data }),
        Err(error) => json!({ "ok": false, "error": error }),
    };
    envelope.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::seed;

    fn console() -> Console {
        let config = HostConfig::default();
        let session = OrderSession::new(seed::default_catalog().unwrap(), &config).unwrap();
        Console::new(session, config)
    }

    fn output(reply: Reply) -> Value {
        match reply {
            Reply::Output(text) => serde_json::from_str(&text).unwrap(),
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("menu".parse::<Command>().unwrap(), Command::Menu);
        assert_eq!(
            "add cola 3".parse::<Command>().unwrap(),
            Command::Add {
                item_id: "cola".to_string(),
                quantity: Some(3)
            }
        );
        assert_eq!(
            "ADD  wing".parse::<Command>().unwrap(),
            Command::Add {
                item_id: "wing".to_string(),
                quantity: None
            }
        );
        assert_eq!(
            "hold potato 250".parse::<Command>().unwrap(),
            Command::Hold {
                item_id: "potato".to_string(),
                duration: Duration::from_millis(250)
            }
        );
        assert_eq!("no".parse::<Command>().unwrap(), Command::Dismiss);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("   ".parse::<Command>().unwrap_err(), ParseError::Empty);
        assert_eq!(
            "order cola".parse::<Command>().unwrap_err(),
            ParseError::UnknownCommand("order".to_string())
        );
        assert_eq!(
            "add".parse::<Command>().unwrap_err(),
            ParseError::MissingArgument {
                command: "add",
                argument: "id"
            }
        );
        assert_eq!(
            "add cola many".parse::<Command>().unwrap_err(),
            ParseError::InvalidNumber {
                command: "add",
                value: "many".to_string()
            }
        );
        assert!(matches!(
            "cart now".parse::<Command>().unwrap_err(),
            ParseError::UnexpectedArgument { .. }
        ));
    }

    #[tokio::test]
    async fn test_add_then_cart() {
        let console = console();

        let json = output(console.handle_line("add cheeseburger 2").await);
        assert_eq!(json["ok"], true);
        assert_eq!(json["data"]["totalLabel"], "8,000원");

        let json = output(console.handle_line("cart").await);
        assert_eq!(json["data"]["totals"]["totalQuantity"], 2);
    }

    #[tokio::test]
    async fn test_errors_are_reported_not_fatal() {
        let console = console();

        let json = output(console.handle_line("add pizza").await);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");

        let json = output(console.handle_line("bogus").await);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_checkout_round() {
        let console = console();
        console.handle_line("add icetea").await;

        let json = output(console.handle_line("pay").await);
        assert_eq!(json["data"]["flow"], "confirming_payment");

        let json = output(console.handle_line("confirm").await);
        assert_eq!(json["data"]["outcome"], "paid");
        assert_eq!(json["data"]["receipt"]["totalPrice"], 5000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_command() {
        let console = console();
        console.handle_line("add wing").await;

        let json = output(console.handle_line("hold wing 250").await);
        assert_eq!(json["data"]["hold"]["increments"], 2);
        assert_eq!(json["data"]["cart"]["totals"]["totalQuantity"], 3);
    }

    #[tokio::test]
    async fn test_quit_and_blank() {
        let console = console();
        assert_eq!(console.handle_line("quit").await, Reply::Quit);
        assert_eq!(console.handle_line("").await, Reply::Output(String::new()));
    }
}
