use crossterm::event::KeyCode;
use gameflow::console::{KeyInfo, ScriptedConsole};
use gameflow::flow::GameFlow;
use gameflow::games::seconds::{self, SecondsGameplay, SecondsView};
use gameflow::ui::{GameUi, Stage};
use gameflow::ux::ConsoleUx;

const HEADER: &str = "Press the [Spacebar] to stop the clock at 3 seconds on the dot.";

fn headers(console: &ScriptedConsole) -> usize {
    console.lines().iter().filter(|l| **l == HEADER).count()
}

#[test]
fn quick_stop_loses_and_quits() {
    let console = ScriptedConsole::new()
        .key(KeyCode::Enter)
        .idle()
        .idle()
        .key(KeyCode::Char(' '))
        .key(KeyCode::Char('n'));
    let mut game = seconds::game(console, ConsoleUx::default());
    game.play().unwrap();

    let console = game.console();
    assert_eq!(console.remaining(), 0);
    assert_eq!(headers(console), 1);
    assert_eq!(console.clears(), 1);
    assert!(console.output().contains("You lose!"));
    assert!(console.output().contains("Try again? (Y/N): "));
    assert!(console.lines().iter().any(|l| l.starts_with("00:00.")));
}

#[test]
fn idle_polls_redraw_the_clock() {
    let mut console = ScriptedConsole::new()
        .idle()
        .idle()
        .idle()
        .key(KeyCode::Char(' '))
        .key(KeyCode::Char('n'));
    let mut ui = Stage::new(SecondsGameplay::new(), SecondsView::new(ConsoleUx::default()));
    gameflow::flow::drive(&mut ui, &mut console).unwrap();
    let clocks = console.lines().iter().filter(|l| l.starts_with("00:")).count();
    assert_eq!(clocks, 5, "one render at start and one per poll");
}

#[test]
fn other_keys_do_not_stop_the_clock() {
    let mut console = ScriptedConsole::new()
        .key(KeyCode::Char('x'))
        .key_info(KeyInfo::new(KeyCode::Char(' '), crossterm::event::KeyModifiers::CONTROL))
        .key(KeyCode::Char(' '))
        .key(KeyCode::Char('n'));
    let mut ui = Stage::new(SecondsGameplay::new(), SecondsView::default());
    gameflow::flow::drive(&mut ui, &mut console).unwrap();
    assert_eq!(console.remaining(), 0);
    assert!(ui.gameplay().quit());
}

#[test]
fn try_again_redraws_the_header() {
    let mut console = ScriptedConsole::new()
        .key(KeyCode::Char(' '))
        .key(KeyCode::Char('Y'))
        .key(KeyCode::Char(' '))
        .key(KeyCode::Char('n'));
    let mut ui = Stage::new(SecondsGameplay::new(), SecondsView::default());
    gameflow::flow::drive(&mut ui, &mut console).unwrap();
    assert_eq!(headers(&console), 2);
    assert_eq!(console.clears(), 2);
    let losses = console.lines().iter().filter(|l| **l == "You lose!").count();
    assert_eq!(losses, 2);
    assert!(ui.game_over());
}

#[test]
fn escape_while_timing_cancels() {
    let console = ScriptedConsole::new().key(KeyCode::Enter).idle().key(KeyCode::Esc);
    let mut game = seconds::game(console, ConsoleUx::default());
    assert!(game.play().unwrap_err().is_cancelled());
    assert!(!game.console().output().contains("You lose!"));
}

#[test]
fn escape_is_ignored_when_esc_exit_is_off() {
    let console = ScriptedConsole::new()
        .key(KeyCode::Esc)
        .key(KeyCode::Enter)
        .key(KeyCode::Esc)
        .key(KeyCode::Char(' '))
        .key(KeyCode::Esc)
        .key(KeyCode::Char('n'));
    let mut game = seconds::game(console, ConsoleUx::new(false));
    game.play().unwrap();
    assert_eq!(game.console().remaining(), 0);
}
