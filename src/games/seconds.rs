//! Stop the clock at exactly three seconds.
//!
//! Uses the typed surface (`KeyCode` in, `bool` out) and the non-blocking key
//! poll, redrawing the running clock between polls.

use crate::console::{write_colored_line, Console, ConsoleResult, KeyInfo};
use crate::flow::{GameConsole, GameIdentity, ReadyMode};
use crate::gameplay::Gameplay;
use crate::ui::{Stage, View};
use crate::ux::ConsoleUx;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use std::time::{Duration, Instant};

/// Winning window for the stopped clock, in milliseconds, inclusive.
pub const WINDOW_MS: (u128, u128) = (3000, 3009);

/// Whether `elapsed` lands in the winning window.
pub fn on_the_dot(elapsed: Duration) -> bool {
    let ms = elapsed.as_millis();
    (WINDOW_MS.0..=WINDOW_MS.1).contains(&ms)
}

/// `mm:ss.ff`, truncated to hundredths.
pub fn format_elapsed(elapsed: Duration) -> String {
    let centis = elapsed.as_millis() / 10;
    let minutes = centis / 6000;
    let seconds = (centis / 100) % 60;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis % 100)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    elapsed: Duration,
}

impl Stopwatch {
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }

    /// Zeroes the clock and starts it again.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SecondsGameplay {
    stopwatch: Stopwatch,
    is_won: bool,
    quit: bool,
}

impl SecondsGameplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn is_won(&self) -> bool {
        self.is_won
    }

    pub fn quit(&self) -> bool {
        self.quit
    }
}

impl Gameplay for SecondsGameplay {
    type Input = KeyCode;
    type Output = bool;

    fn start(&mut self) -> bool {
        self.stopwatch.start();
        self.stopwatch.is_running()
    }

    fn action(&mut self, _key: KeyCode) -> bool {
        self.stopwatch.stop();
        self.is_won = on_the_dot(self.stopwatch.elapsed());
        !self.stopwatch.is_running()
    }

    fn proceed(&mut self) -> bool {
        self.is_won = false;
        self.stopwatch.restart();
        self.stopwatch.is_running()
    }

    fn game_over(&self) -> bool {
        self.is_won || self.quit
    }

    fn end(&mut self) {
        self.quit = true;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SecondsView {
    ux: ConsoleUx,
    drawn: bool,
}

impl SecondsView {
    pub fn new(ux: ConsoleUx) -> Self {
        Self { ux, drawn: false }
    }
}

impl View for SecondsView {
    type Gameplay = SecondsGameplay;

    fn render(&mut self, gameplay: &SecondsGameplay, console: &mut dyn Console) -> ConsoleResult<()> {
        if !self.drawn {
            console.clear()?;
            console.write_line("Press the [Spacebar] to stop the clock at 3 seconds on the dot.")?;
            console.write_line("")?;
            self.drawn = true;
        }
        let (column, row) = console.cursor_position()?;
        console.write_line(&format_elapsed(gameplay.stopwatch().elapsed()))?;
        console.set_cursor_position(column, row)?;
        Ok(())
    }

    fn action(
        &mut self,
        gameplay: &mut SecondsGameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool> {
        let valid = [KeyInfo::new(KeyCode::Char(' '), KeyModifiers::NONE)];
        let key = loop {
            self.refresh(gameplay, console)?;
            if let Some(key) = self.ux.get_key_info(console, &valid, true)? {
                break key;
            }
        };
        console.write_line("")?;
        Ok(gameplay.action(key.code))
    }

    fn proceed(
        &mut self,
        gameplay: &mut SecondsGameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool> {
        console.write_line("")?;
        if gameplay.is_won() {
            write_colored_line(console, Color::Green, "You win!!!")?;
        } else {
            write_colored_line(console, Color::Red, "You lose!")?;
        }
        console.write_line("")?;
        console.write_line("Try again? (Y/N): ")?;
        if self.ux.get_yn(console)? == KeyCode::Char('y') {
            self.drawn = false;
            gameplay.proceed();
            self.refresh(gameplay, console)?;
        } else {
            gameplay.end();
        }
        Ok(!gameplay.quit())
    }
}

pub type SecondsUi = Stage<SecondsView>;

pub fn identity() -> GameIdentity {
    GameIdentity::new("3 Seconds", "The gameflow-rs authors.", "Stop the clock at 3 seconds flat.")
        .with_splash_text("Press [Esc] anytime to exit the app.")
}

pub fn game<C: Console>(console: C, ux: ConsoleUx) -> GameConsole<C, SecondsUi> {
    GameConsole::new(identity(), ReadyMode::IfReady, console, move || {
        Stage::new(SecondsGameplay::new(), SecondsView::new(ux))
    })
    .with_esc_exit(ux.esc_exit())
}
