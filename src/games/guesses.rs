//! Guess a secret number from 1 to 10 in three tries.
//!
//! Drives its gameplay through the boxed [`ActionInfo`] surface.

use crate::action::{ActionInfo, ActionKind};
use crate::console::{write_colored_line, Console, ConsoleResult};
use crate::flow::{GameConsole, GameIdentity, ReadyMode};
use crate::gameplay::Gameplay;
use crate::random::Randomizer;
use crate::ui::{Stage, View};
use crate::ux::ConsoleUx;
use crossterm::event::KeyCode;
use crossterm::style::Color;
use tracing::warn;

pub const MAX_TRIES: u32 = 3;
pub const LOWEST: i32 = 1;
pub const HIGHEST: i32 = 10;

#[derive(Debug, Clone)]
pub struct GuessesGameplay {
    rng: Randomizer,
    fixed: Option<i32>,
    secret: i32,
    is_won: bool,
    tries: u32,
}

impl GuessesGameplay {
    pub fn new(rng: Randomizer) -> Self {
        Self { rng, fixed: None, secret: 0, is_won: false, tries: 0 }
    }

    /// Every `start` picks `secret` instead of a random number.
    pub fn with_secret(secret: i32) -> Self {
        Self { fixed: Some(secret), ..Self::new(Randomizer::seeded(0)) }
    }

    /// The secret, or 0 outside a round.
    pub fn secret(&self) -> i32 {
        self.secret
    }

    pub fn is_won(&self) -> bool {
        self.is_won
    }

    pub fn tries(&self) -> u32 {
        self.tries
    }
}

impl Gameplay for GuessesGameplay {
    type Input = ActionInfo;
    type Output = bool;

    fn start(&mut self) -> bool {
        self.secret = match self.fixed {
            Some(secret) => secret,
            None => self.rng.between(LOWEST, HIGHEST + 1),
        };
        self.is_won = false;
        self.tries = 0;
        true
    }

    fn action(&mut self, info: ActionInfo) -> bool {
        let guess = match info.input_as::<i32>() {
            Ok(guess) => *guess,
            Err(err) => {
                warn!(%err, "guess ignored");
                return false;
            }
        };
        if guess == self.secret {
            self.is_won = true;
        }
        self.tries += 1;
        true
    }

    fn proceed(&mut self) -> bool {
        !self.is_won && self.tries < MAX_TRIES
    }

    fn game_over(&self) -> bool {
        self.is_won || self.tries >= MAX_TRIES
    }

    fn end(&mut self) {
        self.secret = 0;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GuessesView {
    ux: ConsoleUx,
}

impl GuessesView {
    pub fn new(ux: ConsoleUx) -> Self {
        Self { ux }
    }
}

impl View for GuessesView {
    type Gameplay = GuessesGameplay;

    fn render(&mut self, _gameplay: &GuessesGameplay, console: &mut dyn Console) -> ConsoleResult<()> {
        console.clear()?;
        console.write_line(&format!("Guess the secret number between {LOWEST} to {HIGHEST}."))?;
        Ok(())
    }

    fn action(
        &mut self,
        gameplay: &mut GuessesGameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool> {
        console.write_line("")?;
        console.write(&format!("Guess #{}: ", gameplay.tries() + 1))?;
        console.set_cursor_visible(true)?;
        let guess: i32 = self.ux.get_parsable_entry(console)?;
        console.set_cursor_visible(false)?;
        let info = ActionInfo::new().with_kind(ActionKind::Response).with_input(guess);
        Ok(gameplay.action(info))
    }

    fn proceed(
        &mut self,
        gameplay: &mut GuessesGameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool> {
        if !gameplay.proceed() {
            return Ok(false);
        }
        console.write_line("")?;
        console.write_line("Try again? (Y/N): ")?;
        Ok(self.ux.get_yn(console)? == KeyCode::Char('y'))
    }

    fn finish(&mut self, gameplay: &GuessesGameplay, console: &mut dyn Console) -> ConsoleResult<()> {
        console.write_line("")?;
        console.write_line(&format!("The secret number was {}.", gameplay.secret()))?;
        console.write_line("")?;
        if gameplay.is_won() {
            write_colored_line(console, Color::Green, "You got it!!!")?;
        } else {
            write_colored_line(console, Color::Red, "You failed!")?;
        }
        Ok(())
    }
}

pub type GuessesUi = Stage<GuessesView>;

pub fn identity() -> GameIdentity {
    GameIdentity::new("3 Guesses", "The gameflow-rs authors.", "Guess the secret number.")
        .with_splash_text("You'll have 3 chances to guess it right.")
        .with_set_text("Press [Enter] to play, or [Esc] to exit.")
}

/// The full game. Every round gets its own generator forked from `rng`.
pub fn game<C: Console>(console: C, rng: Randomizer, ux: ConsoleUx) -> GameConsole<C, GuessesUi> {
    let mut rng = rng;
    GameConsole::new(identity(), ReadyMode::WhileReady, console, move || {
        Stage::new(GuessesGameplay::new(rng.fork()), GuessesView::new(ux))
    })
    .with_esc_exit(ux.esc_exit())
}
