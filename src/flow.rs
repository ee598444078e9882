//! Ready/Set/Go flow control.
//!
//! [`GameConsole`] shows the splash (Ready), waits for Enter (Set), then runs
//! one round through a fresh [`GameUi`] (Go). [`ReadyMode`] decides whether
//! that happens once or repeats.
//!
//! Cancellation: a cancel key press inside any checked read surfaces as
//! [`ConsoleError::Cancelled`](crate::console::ConsoleError::Cancelled) and
//! is propagated straight out of [`GameFlow::play`]. The round's `end` does
//! not run on that path. `play` only puts the cursor back before returning.

use crate::console::{Console, ConsoleResult};
use crate::ui::GameUi;
use crate::ux::ConsoleUx;
use chrono::Datelike;
use tracing::{debug, trace};

pub const DEFAULT_SET_TEXT: &str = "Press [Enter] to start playing...";

/// How many rounds one `play` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ReadyMode {
    /// One round per launch.
    #[default]
    IfReady,
    /// Rounds repeat while the ready check passes.
    WhileReady,
}

/// Name, banner and prompt texts of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameIdentity {
    pub name: String,
    pub version: String,
    pub copyright: String,
    pub description: String,
    pub splash_text: Option<String>,
    pub ready_text: Option<String>,
    pub set_text: String,
    pub go_text: Option<String>,
}

impl GameIdentity {
    pub fn new(
        name: impl Into<String>,
        copyright: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: crate::VERSION.to_string(),
            copyright: copyright.into(),
            description: description.into(),
            splash_text: None,
            ready_text: None,
            set_text: DEFAULT_SET_TEXT.to_string(),
            go_text: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_splash_text(mut self, text: impl Into<String>) -> Self {
        self.splash_text = Some(text.into());
        self
    }

    pub fn with_ready_text(mut self, text: impl Into<String>) -> Self {
        self.ready_text = Some(text.into());
        self
    }

    pub fn with_set_text(mut self, text: impl Into<String>) -> Self {
        self.set_text = text.into();
        self
    }

    pub fn with_go_text(mut self, text: impl Into<String>) -> Self {
        self.go_text = Some(text.into());
        self
    }

    /// `"{name} {version} (c) {year} {copyright}"` for the current year.
    pub fn banner(&self) -> String {
        self.banner_for_year(chrono::Local::now().year())
    }

    /// ```
    /// use gameflow::flow::GameIdentity;
    ///
    /// let id = GameIdentity::new("Dice", "Acme.", "Roll it.").with_version("1.2.0");
    /// assert_eq!(id.banner_for_year(2024), "Dice 1.2.0 (c) 2024 Acme.");
    /// ```
    pub fn banner_for_year(&self, year: i32) -> String {
        format!("{} {} (c) {} {}", self.name, self.version, year, self.copyright)
    }
}

/// The four phases of a game session.
pub trait GameFlow {
    /// Runs the session: Ready, Set and Go, once or repeatedly.
    fn play(&mut self) -> ConsoleResult<()>;
    fn ready(&mut self) -> ConsoleResult<bool>;
    fn set(&mut self) -> ConsoleResult<()>;
    fn go(&mut self) -> ConsoleResult<()>;
}

/// Runs one round: start, then action/proceed until the round stops, then end.
///
/// A failed action is retried without asking `proceed` or `game_over`. After
/// an executed action the round stops when `proceed` says so, otherwise when
/// `game_over` is true. `end` runs exactly once on every path that returns
/// `Ok`, including when `start` fails.
pub fn drive<U: GameUi + ?Sized>(ui: &mut U, console: &mut dyn Console) -> ConsoleResult<()> {
    if ui.start(console)? {
        let mut actions = 0_u32;
        loop {
            if !ui.action(console)? {
                trace!("action not executed");
                continue;
            }
            actions += 1;
            if !ui.proceed(console)? || ui.game_over() {
                break;
            }
        }
        debug!(actions, "round finished");
    } else {
        debug!("round did not start");
    }
    ui.end(console)
}

type UiFactory<U> = Box<dyn FnMut() -> U>;
type ReadyCheck = Box<dyn FnMut(&mut dyn Console) -> ConsoleResult<bool>>;

/// Flow controller for console games.
///
/// Builds a fresh UI for every round through its factory, so no state is
/// shared between rounds.
///
/// ```
/// use crossterm::event::KeyCode;
/// use gameflow::console::{ConsoleResult, Console, ScriptedConsole};
/// use gameflow::flow::{GameConsole, GameFlow, GameIdentity, ReadyMode};
/// use gameflow::ui::GameUi;
///
/// struct OneShot;
/// impl GameUi for OneShot {
///     fn start(&mut self, _: &mut dyn Console) -> ConsoleResult<bool> { Ok(true) }
///     fn render(&mut self, _: &mut dyn Console) -> ConsoleResult<()> { Ok(()) }
///     fn refresh(&mut self, _: &mut dyn Console) -> ConsoleResult<()> { Ok(()) }
///     fn action(&mut self, _: &mut dyn Console) -> ConsoleResult<bool> { Ok(true) }
///     fn proceed(&mut self, _: &mut dyn Console) -> ConsoleResult<bool> { Ok(false) }
///     fn game_over(&self) -> bool { true }
///     fn end(&mut self, c: &mut dyn Console) -> ConsoleResult<()> {
///         c.write_line("bye")?;
///         Ok(())
///     }
/// }
///
/// let console = ScriptedConsole::new().key(KeyCode::Enter);
/// let id = GameIdentity::new("Demo", "Acme.", "A demo.");
/// let mut game = GameConsole::new(id, ReadyMode::IfReady, console, || OneShot);
/// game.play().unwrap();
/// assert!(game.console().output().ends_with("bye\n"));
/// ```
pub struct GameConsole<C, U> {
    identity: GameIdentity,
    ready_mode: ReadyMode,
    is_ready: bool,
    rounds: u32,
    console: C,
    ux: ConsoleUx,
    new_ui: UiFactory<U>,
    ready_check: ReadyCheck,
}

impl<C: Console, U> GameConsole<C, U> {
    pub fn new(
        identity: GameIdentity,
        ready_mode: ReadyMode,
        console: C,
        new_ui: impl FnMut() -> U + 'static,
    ) -> Self {
        Self {
            identity,
            ready_mode,
            is_ready: false,
            rounds: 0,
            console,
            ux: ConsoleUx::default(),
            new_ui: Box::new(new_ui),
            ready_check: Box::new(|_| Ok(true)),
        }
    }

    /// Decides whether another round follows, consulted by every Ready
    /// after the first. The default always answers yes, which leaves the
    /// cancel key as the way out of a [`ReadyMode::WhileReady`] session.
    pub fn with_ready_check(
        mut self,
        check: impl FnMut(&mut dyn Console) -> ConsoleResult<bool> + 'static,
    ) -> Self {
        self.ready_check = Box::new(check);
        self
    }

    /// Whether Escape cancels at the Set prompt.
    pub fn with_esc_exit(mut self, esc_exit: bool) -> Self {
        self.ux.set_esc_exit(esc_exit);
        self
    }

    pub fn identity(&self) -> &GameIdentity {
        &self.identity
    }

    pub fn ready_mode(&self) -> ReadyMode {
        self.ready_mode
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Rounds started so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Makes the next Ready show the splash again.
    pub fn reset(&mut self) {
        self.is_ready = false;
    }

    /// Banner, description, then the splash and ready texts when set.
    pub fn splash(&mut self) -> ConsoleResult<()> {
        self.console.write_line(&self.identity.banner())?;
        self.console.write_line(&self.identity.description)?;
        if let Some(text) = self.identity.splash_text.as_deref().filter(|t| !t.is_empty()) {
            self.console.write_line("")?;
            self.console.write_line(text)?;
        }
        if let Some(text) = self.identity.ready_text.as_deref() {
            self.console.write_line(text)?;
        }
        Ok(())
    }

    pub(crate) fn ready_step(&mut self) -> ConsoleResult<bool> {
        if !self.is_ready {
            debug!(game = %self.identity.name, "ready");
            self.splash()?;
            self.is_ready = true;
            return Ok(true);
        }
        let console: &mut dyn Console = &mut self.console;
        let again = (self.ready_check)(console)?;
        debug!(again, "ready check");
        Ok(again)
    }

    pub(crate) fn set_step(&mut self) -> ConsoleResult<()> {
        self.console.write_line("")?;
        self.console.write_line(&self.identity.set_text)?;
        self.ux.get_enter(&mut self.console)?;
        Ok(())
    }

    /// Shows the go text and builds the round's UI.
    pub(crate) fn begin_round(&mut self) -> ConsoleResult<U> {
        self.rounds += 1;
        debug!(round = self.rounds, "go");
        if let Some(text) = self.identity.go_text.as_deref() {
            self.console.write_line(text)?;
        }
        Ok((self.new_ui)())
    }
}

impl<C: Console, U: GameUi> GameConsole<C, U> {
    fn play_rounds(&mut self) -> ConsoleResult<()> {
        match self.ready_mode {
            ReadyMode::IfReady => {
                if self.ready()? {
                    self.set()?;
                    self.go()?;
                }
            }
            ReadyMode::WhileReady => {
                while self.ready()? {
                    self.set()?;
                    self.go()?;
                }
            }
        }
        Ok(())
    }
}

impl<C: Console, U: GameUi> GameFlow for GameConsole<C, U> {
    fn play(&mut self) -> ConsoleResult<()> {
        self.console.set_cursor_visible(false)?;
        let played = self.play_rounds();
        if let Err(err) = &played {
            debug!(%err, "play interrupted");
        }
        // A restore failure must not mask how the round ended.
        let restored = self.console.set_cursor_visible(true);
        played?;
        Ok(restored?)
    }

    fn ready(&mut self) -> ConsoleResult<bool> {
        self.ready_step()
    }

    fn set(&mut self) -> ConsoleResult<()> {
        self.set_step()
    }

    fn go(&mut self) -> ConsoleResult<()> {
        let mut ui = self.begin_round()?;
        drive(&mut ui, &mut self.console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Feed, ScriptedConsole};
    use crossterm::event::KeyCode;

    struct Idle;

    impl GameUi for Idle {
        fn start(&mut self, _: &mut dyn Console) -> ConsoleResult<bool> {
            Ok(false)
        }
        fn render(&mut self, _: &mut dyn Console) -> ConsoleResult<()> {
            Ok(())
        }
        fn refresh(&mut self, _: &mut dyn Console) -> ConsoleResult<()> {
            Ok(())
        }
        fn action(&mut self, _: &mut dyn Console) -> ConsoleResult<bool> {
            Ok(false)
        }
        fn proceed(&mut self, _: &mut dyn Console) -> ConsoleResult<bool> {
            Ok(false)
        }
        fn game_over(&self) -> bool {
            true
        }
        fn end(&mut self, _: &mut dyn Console) -> ConsoleResult<()> {
            Ok(())
        }
    }

    fn game(identity: GameIdentity) -> GameConsole<ScriptedConsole, Idle> {
        GameConsole::new(identity, ReadyMode::IfReady, ScriptedConsole::new(), || Idle)
    }

    #[test]
    fn splash_layout() {
        let id = GameIdentity::new("G", "Me.", "Desc.")
            .with_version("0.0.1")
            .with_splash_text("Splash!")
            .with_ready_text("Ready?");
        let mut g = game(id);
        assert!(g.ready().unwrap());
        let lines = g.console().lines();
        assert!(lines[0].starts_with("G 0.0.1 (c) "));
        assert!(lines[0].ends_with(" Me."));
        assert_eq!(&lines[1..], &["Desc.", "", "Splash!", "Ready?"]);
    }

    #[test]
    fn empty_splash_text_is_skipped() {
        let mut g = game(GameIdentity::new("G", "Me.", "Desc.").with_splash_text(""));
        g.ready().unwrap();
        assert_eq!(g.console().lines().len(), 2);
    }

    #[test]
    fn ready_shows_splash_once() {
        let mut g = game(GameIdentity::new("G", "Me.", "Desc."));
        assert!(!g.is_ready());
        assert!(g.ready().unwrap());
        assert!(g.ready().unwrap());
        assert!(g.is_ready());
        assert_eq!(g.console().lines().len(), 2);

        g.reset();
        g.ready().unwrap();
        assert_eq!(g.console().lines().len(), 4);
    }

    #[test]
    fn set_prints_prompt_and_waits_for_enter() {
        let mut g = game(GameIdentity::new("G", "Me.", "Desc."));
        g.console_mut().push(Feed::Key(KeyCode::Char('x').into()));
        g.console_mut().push(Feed::Key(KeyCode::Enter.into()));
        g.set().unwrap();
        assert_eq!(g.console().lines(), vec!["", DEFAULT_SET_TEXT]);
        assert_eq!(g.console().remaining(), 0);
    }
}
