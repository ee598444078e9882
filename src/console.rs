//! Console collaborator: the terminal capabilities the flow, UIs and input
//! validator are written against.
//!
//! `TerminalConsole` drives a real terminal through crossterm.
//! `ScriptedConsole` replays a fixed feed of key presses and lines and keeps a
//! transcript of everything written, so whole game sessions can run in tests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use std::io;

mod scripted;
mod terminal;

pub use scripted::{Feed, ScriptedConsole};
pub use terminal::TerminalConsole;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConsoleError {
    /// The cancel key was pressed while cancel-checking was on.
    #[error("cancelled from the keyboard")]
    Cancelled,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConsoleError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConsoleError::Cancelled)
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// A key press with its modifiers.
///
/// Letter keys are stored lower-case; an upper-case letter keeps its Shift in
/// `modifiers`. That makes `KeyCode::Char('y')` match both `y` and `Y`.
///
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use gameflow::console::KeyInfo;
///
/// let key = KeyInfo::from(KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::NONE));
/// assert_eq!(key.code, KeyCode::Char('y'));
/// assert!(key.shift());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInfo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyInfo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let (code, extra) = match code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                (KeyCode::Char(c.to_ascii_lowercase()), KeyModifiers::SHIFT)
            }
            other => (other, KeyModifiers::NONE),
        };
        Self { code, modifiers: modifiers | extra }
    }

    /// A key with no modifiers held.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// The character this key types, honoring Shift for letters.
    pub fn to_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.shift() => Some(c.to_ascii_uppercase()),
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl From<KeyEvent> for KeyInfo {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl From<KeyCode> for KeyInfo {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

/// The process-wide display and input stream.
///
/// Reads block unless noted. There is a single logical thread of control, so
/// implementations need no locking.
pub trait Console {
    fn clear(&mut self) -> io::Result<()>;
    fn write(&mut self, text: &str) -> io::Result<()>;
    fn write_line(&mut self, text: &str) -> io::Result<()>;
    /// (column, row), zero-based.
    fn cursor_position(&mut self) -> io::Result<(u16, u16)>;
    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()>;
    fn cursor_visible(&self) -> bool;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn foreground(&self) -> Color;
    fn set_foreground(&mut self, color: Color) -> io::Result<()>;
    /// Blocks for one key press, writing its character when `echo` is set.
    fn read_key(&mut self, echo: bool) -> io::Result<KeyInfo>;
    /// Blocks for one line of text, without the line terminator.
    fn read_line(&mut self) -> io::Result<String>;
    /// Returns a pending key press if there is one. Waits at most a short
    /// tick, never for a key.
    fn poll_key(&mut self) -> io::Result<Option<KeyInfo>>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        (**self).write_line(text)
    }
    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        (**self).cursor_position()
    }
    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()> {
        (**self).set_cursor_position(column, row)
    }
    fn cursor_visible(&self) -> bool {
        (**self).cursor_visible()
    }
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        (**self).set_cursor_visible(visible)
    }
    fn foreground(&self) -> Color {
        (**self).foreground()
    }
    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        (**self).set_foreground(color)
    }
    fn read_key(&mut self, echo: bool) -> io::Result<KeyInfo> {
        (**self).read_key(echo)
    }
    fn read_line(&mut self) -> io::Result<String> {
        (**self).read_line()
    }
    fn poll_key(&mut self) -> io::Result<Option<KeyInfo>> {
        (**self).poll_key()
    }
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        (**self).write_line(text)
    }
    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        (**self).cursor_position()
    }
    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()> {
        (**self).set_cursor_position(column, row)
    }
    fn cursor_visible(&self) -> bool {
        (**self).cursor_visible()
    }
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        (**self).set_cursor_visible(visible)
    }
    fn foreground(&self) -> Color {
        (**self).foreground()
    }
    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        (**self).set_foreground(color)
    }
    fn read_key(&mut self, echo: bool) -> io::Result<KeyInfo> {
        (**self).read_key(echo)
    }
    fn read_line(&mut self) -> io::Result<String> {
        (**self).read_line()
    }
    fn poll_key(&mut self) -> io::Result<Option<KeyInfo>> {
        (**self).poll_key()
    }
}

/// Writes one line in `color`, then puts the previous foreground color back.
pub fn write_colored_line(console: &mut dyn Console, color: Color, text: &str) -> io::Result<()> {
    let previous = console.foreground();
    console.set_foreground(color)?;
    let written = console.write_line(text);
    console.set_foreground(previous)?;
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_case_letters_fold_to_shifted_lower_case() {
        let key = KeyInfo::plain(KeyCode::Char('N'));
        assert_eq!(key, KeyInfo::new(KeyCode::Char('n'), KeyModifiers::SHIFT));
        assert_eq!(key.to_char(), Some('N'));
    }

    #[test]
    fn non_letters_keep_their_modifiers() {
        let key = KeyInfo::new(KeyCode::Char(' '), KeyModifiers::CONTROL);
        assert!(key.ctrl());
        assert!(!key.shift() && !key.alt());
        assert_eq!(KeyInfo::plain(KeyCode::Enter).to_char(), None);
    }

    #[test]
    fn colored_line_restores_foreground() {
        let mut console = ScriptedConsole::new();
        console.set_foreground(Color::Yellow).unwrap();
        write_colored_line(&mut console, Color::Green, "ok").unwrap();
        assert_eq!(console.foreground(), Color::Yellow);
        assert_eq!(console.output(), "ok\n");
    }
}
