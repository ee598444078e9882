//! gameflow: flow control for turn-based console games
//!
//! Goals:
//! - Keep game rules ([`gameplay`]) apart from presentation ([`ui`]) and from
//!   the Ready/Set/Go session loop ([`flow`])
//! - Input that blocks until it is valid, with Escape as a cancel signal
//!   that unwinds the whole session ([`ux`])
//! - Everything testable without a terminal ([`console::ScriptedConsole`])
//!
//! ## Quick start: play a scripted round of 3 Guesses
//! ```
//! use crossterm::event::KeyCode;
//! use gameflow::console::ScriptedConsole;
//! use gameflow::flow::{GameConsole, GameFlow, ReadyMode};
//! use gameflow::games::guesses::{self, GuessesGameplay, GuessesView};
//! use gameflow::ui::Stage;
//!
//! let console = ScriptedConsole::new().key(KeyCode::Enter).line("7");
//! let mut game = GameConsole::new(guesses::identity(), ReadyMode::IfReady, console, || {
//!     Stage::new(GuessesGameplay::with_secret(7), GuessesView::default())
//! });
//! game.play().unwrap();
//! assert!(game.console().output().contains("You got it!!!"));
//! ```
//!
//! ## Terminal
//! Play the example games with:
//! ```sh
//! cargo run --bin gameflow -- --game seconds
//! ```

pub mod action;
#[cfg(feature = "async")]
pub mod async_flow;
pub mod console;
pub mod flow;
pub mod gameplay;
pub mod games;
pub mod random;
pub mod ui;
pub mod ux;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
