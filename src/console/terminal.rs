use super::{Console, KeyInfo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use std::io::{self, Stdout};
use std::time::Duration;

/// Longest a poll waits for a key, which also paces callers that redraw between polls.
const POLL_TICK: Duration = Duration::from_millis(10);

/// Console over the process terminal, in raw mode for its whole lifetime.
///
/// Raw mode gives unbuffered, unechoed key presses. Dropping the console
/// leaves raw mode and shows the cursor again.
pub struct TerminalConsole {
    out: Stdout,
    cursor_visible: bool,
    foreground: Color,
}

impl TerminalConsole {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { out: io::stdout(), cursor_visible: true, foreground: Color::Reset })
    }

    fn next_press(&mut self) -> io::Result<KeyInfo> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return pressed(key);
            }
        }
    }
}

/// Raw mode swallows SIGINT, so Ctrl+C surfaces as an interrupted read.
fn pressed(key: KeyEvent) -> io::Result<KeyInfo> {
    let key = KeyInfo::from(key);
    if key.code == KeyCode::Char('c') && key.ctrl() {
        return Err(io::Error::new(io::ErrorKind::Interrupted, "ctrl+c"));
    }
    Ok(key)
}

impl Console for TerminalConsole {
    fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        execute!(self.out, Print(text.replace('\n', "\r\n")))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        execute!(self.out, Print("\r\n"))
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        cursor::position()
    }

    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()> {
        execute!(self.out, cursor::MoveTo(column, row))
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.out, cursor::Show)?;
        } else {
            execute!(self.out, cursor::Hide)?;
        }
        self.cursor_visible = visible;
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        execute!(self.out, SetForegroundColor(color))?;
        self.foreground = color;
        Ok(())
    }

    fn read_key(&mut self, echo: bool) -> io::Result<KeyInfo> {
        let key = self.next_press()?;
        if echo {
            if let Some(c) = key.to_char() {
                execute!(self.out, Print(c))?;
            }
        }
        Ok(key)
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        loop {
            let key = self.next_press()?;
            match key.code {
                KeyCode::Enter => {
                    execute!(self.out, Print("\r\n"))?;
                    return Ok(line);
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        execute!(self.out, Print("\u{8} \u{8}"))?;
                    }
                }
                _ => {
                    if let Some(c) = key.to_char() {
                        line.push(c);
                        execute!(self.out, Print(c))?;
                    }
                }
            }
        }
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyInfo>> {
        if !event::poll(POLL_TICK)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => pressed(key).map(Some),
            _ => Ok(None),
        }
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
