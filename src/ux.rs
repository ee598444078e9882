//! Input validation over a [`Console`]: block until an acceptable key or
//! value arrives, silently discarding everything else.
//!
//! Escape is the cancel key. When cancel-checking is on for a read and the
//! instance has `esc_exit` set, pressing it returns
//! [`ConsoleError::Cancelled`]. Callers propagate that with `?` and do no
//! cleanup, so the read is effectively the last thing the round does.

use crate::console::{Console, ConsoleError, ConsoleResult, KeyInfo};
use crossterm::event::KeyCode;
use std::str::FromStr;
use tracing::trace;

/// The cancel key.
pub const CANCEL_KEY: KeyCode = KeyCode::Esc;

const YES_NO: [KeyCode; 2] = [KeyCode::Char('y'), KeyCode::Char('n')];
const MOVES: [KeyCode; 4] = [KeyCode::Up, KeyCode::Right, KeyCode::Left, KeyCode::Down];

/// Compares after folding `codes` the way pressed keys are folded, so `Y`
/// and `y` name the same key.
fn matches_any(codes: &[KeyCode], pressed: KeyCode) -> bool {
    codes.iter().any(|c| KeyInfo::plain(*c).code == pressed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleUx {
    esc_exit: bool,
}

impl Default for ConsoleUx {
    fn default() -> Self {
        Self { esc_exit: true }
    }
}

impl ConsoleUx {
    pub fn new(esc_exit: bool) -> Self {
        Self { esc_exit }
    }

    pub fn esc_exit(&self) -> bool {
        self.esc_exit
    }

    pub fn set_esc_exit(&mut self, esc_exit: bool) {
        self.esc_exit = esc_exit;
    }

    fn check_cancel(&self, key: &KeyInfo, eval_cancel: bool) -> ConsoleResult<()> {
        if eval_cancel && self.esc_exit && key.code == CANCEL_KEY {
            trace!("cancel key pressed");
            return Err(ConsoleError::Cancelled);
        }
        Ok(())
    }

    /// Blocks until one of `valid` is pressed and returns it.
    pub fn get_key(
        &self,
        console: &mut dyn Console,
        valid: &[KeyCode],
        eval_cancel: bool,
    ) -> ConsoleResult<KeyCode> {
        loop {
            let key = console.read_key(false)?;
            self.check_cancel(&key, eval_cancel)?;
            if matches_any(valid, key.code) {
                return Ok(key.code);
            }
            trace!(key = ?key.code, "discarded key");
        }
    }

    /// Blocks until a key not in `invalid` is pressed and returns it.
    pub fn get_key_except(
        &self,
        console: &mut dyn Console,
        invalid: &[KeyCode],
        eval_cancel: bool,
    ) -> ConsoleResult<KeyCode> {
        loop {
            let key = console.read_key(false)?;
            self.check_cancel(&key, eval_cancel)?;
            if !matches_any(invalid, key.code) {
                return Ok(key.code);
            }
            trace!(key = ?key.code, "discarded key");
        }
    }

    /// Checks once for a pending key press without blocking.
    ///
    /// Returns `None` when nothing is pending or when the pending key (with
    /// its modifiers) is not in `valid`. Callers poll this in a loop,
    /// refreshing the display between polls.
    pub fn get_key_info(
        &self,
        console: &mut dyn Console,
        valid: &[KeyInfo],
        eval_cancel: bool,
    ) -> ConsoleResult<Option<KeyInfo>> {
        let Some(key) = console.poll_key()? else {
            return Ok(None);
        };
        self.check_cancel(&key, eval_cancel)?;
        if valid.iter().any(|v| KeyInfo::new(v.code, v.modifiers) == key) {
            return Ok(Some(key));
        }
        trace!(key = ?key, "discarded key");
        Ok(None)
    }

    /// Blocks reading lines until one parses as `T`. Unparsable lines are
    /// dropped without any prompt.
    pub fn get_parsable_entry<T: FromStr>(&self, console: &mut dyn Console) -> ConsoleResult<T> {
        loop {
            let line = console.read_line()?;
            if let Ok(value) = line.trim().parse::<T>() {
                return Ok(value);
            }
            trace!(line = %line, "discarded entry");
        }
    }

    pub fn get_enter(&self, console: &mut dyn Console) -> ConsoleResult<KeyCode> {
        self.get_key(console, &[KeyCode::Enter], true)
    }

    /// Waits for Escape itself, so it never cancels.
    pub fn get_esc(&self, console: &mut dyn Console) -> ConsoleResult<KeyCode> {
        self.get_key(console, &[CANCEL_KEY], false)
    }

    /// `KeyCode::Char('y')` or `KeyCode::Char('n')`, either case.
    pub fn get_yn(&self, console: &mut dyn Console) -> ConsoleResult<KeyCode> {
        self.get_key(console, &YES_NO, true)
    }

    /// One of the four arrow keys.
    pub fn get_move(&self, console: &mut dyn Console) -> ConsoleResult<KeyCode> {
        self.get_key(console, &MOVES, true)
    }
}
