use super::{Console, KeyInfo};
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::collections::VecDeque;
use std::io;

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Key(KeyInfo),
    Line(String),
    /// A poll that finds nothing pending. Blocking reads skip it.
    Idle,
}

/// Console that replays a fixed feed and records a transcript.
///
/// Blocking reads past the end of the feed fail with `UnexpectedEof` instead
/// of hanging, as does reading a line where a key was scripted (and the
/// reverse). The transcript is append-only: cursor moves are tracked but
/// never overwrite earlier text.
///
/// ```
/// use crossterm::event::KeyCode;
/// use gameflow::console::{Console, ScriptedConsole};
///
/// let mut console = ScriptedConsole::new().line("42").key(KeyCode::Enter);
/// assert_eq!(console.read_line().unwrap(), "42");
/// assert_eq!(console.read_key(false).unwrap().code, KeyCode::Enter);
/// assert!(console.read_key(false).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedConsole {
    feed: VecDeque<Feed>,
    output: String,
    clears: usize,
    column: u16,
    row: u16,
    cursor_visible: bool,
    foreground: Color,
}

impl Default for ScriptedConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self {
            feed: VecDeque::new(),
            output: String::new(),
            clears: 0,
            column: 0,
            row: 0,
            cursor_visible: true,
            foreground: Color::Reset,
        }
    }

    pub fn key(mut self, code: KeyCode) -> Self {
        self.feed.push_back(Feed::Key(KeyInfo::plain(code)));
        self
    }

    pub fn key_info(mut self, key: KeyInfo) -> Self {
        self.feed.push_back(Feed::Key(key));
        self
    }

    pub fn keys(mut self, codes: impl IntoIterator<Item = KeyCode>) -> Self {
        self.feed.extend(codes.into_iter().map(|c| Feed::Key(KeyInfo::plain(c))));
        self
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.feed.push_back(Feed::Line(text.into()));
        self
    }

    pub fn idle(mut self) -> Self {
        self.feed.push_back(Feed::Idle);
        self
    }

    pub fn push(&mut self, feed: Feed) {
        self.feed.push_back(feed);
    }

    /// Everything written so far, with `\n` line breaks.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Feed events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.feed.len()
    }

    fn exhausted() -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
    }

    fn mismatch(expected: &str) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, format!("scripted input is not a {expected}"))
    }

    fn record(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.row = self.row.saturating_add(1);
                self.column = 0;
            } else {
                self.column = self.column.saturating_add(1);
            }
        }
        self.output.push_str(text);
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        self.column = 0;
        self.row = 0;
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.record(text);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.record(text);
        self.record("\n");
        Ok(())
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        Ok((self.column, self.row))
    }

    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.column = column;
        self.row = row;
        Ok(())
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.foreground = color;
        Ok(())
    }

    fn read_key(&mut self, echo: bool) -> io::Result<KeyInfo> {
        loop {
            match self.feed.pop_front() {
                Some(Feed::Idle) => continue,
                Some(Feed::Key(key)) => {
                    if echo {
                        if let Some(c) = key.to_char() {
                            self.record(&c.to_string());
                        }
                    }
                    return Ok(key);
                }
                Some(Feed::Line(_)) => return Err(Self::mismatch("key press")),
                None => return Err(Self::exhausted()),
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        loop {
            match self.feed.pop_front() {
                Some(Feed::Idle) => continue,
                Some(Feed::Line(text)) => {
                    self.record(&text);
                    self.record("\n");
                    return Ok(text);
                }
                Some(Feed::Key(_)) => return Err(Self::mismatch("line")),
                None => return Err(Self::exhausted()),
            }
        }
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyInfo>> {
        match self.feed.front() {
            None => Err(Self::exhausted()),
            Some(Feed::Line(_)) => Ok(None),
            Some(Feed::Idle) => {
                self.feed.pop_front();
                Ok(None)
            }
            Some(Feed::Key(_)) => match self.feed.pop_front() {
                Some(Feed::Key(key)) => Ok(Some(key)),
                _ => Ok(None),
            },
        }
    }
}
