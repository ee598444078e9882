use crossterm::event::{KeyCode, KeyModifiers};
use gameflow::console::{KeyInfo, ScriptedConsole};
use gameflow::ux::ConsoleUx;

#[test]
fn get_key_discards_until_allowed() {
    let mut console =
        ScriptedConsole::new().keys([KeyCode::Char('x'), KeyCode::Char('x'), KeyCode::Char('y')]);
    let ux = ConsoleUx::default();
    let key = ux.get_key(&mut console, &[KeyCode::Char('y'), KeyCode::Char('n')], true).unwrap();
    assert_eq!(key, KeyCode::Char('y'));
    assert_eq!(console.remaining(), 0);
}

#[test]
fn get_yn_accepts_upper_case() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Char('Q'), KeyCode::Char('N')]);
    assert_eq!(ConsoleUx::default().get_yn(&mut console).unwrap(), KeyCode::Char('n'));
}

#[test]
fn get_key_except_skips_denied_keys() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Tab, KeyCode::Tab, KeyCode::Char('k')]);
    let key = ConsoleUx::default().get_key_except(&mut console, &[KeyCode::Tab], true).unwrap();
    assert_eq!(key, KeyCode::Char('k'));
}

#[test]
fn escape_cancels_when_enabled() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Char('a'), KeyCode::Esc]);
    let err = ConsoleUx::default().get_key(&mut console, &[KeyCode::Enter], true).unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn escape_is_ignored_without_cancel_check() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Esc, KeyCode::Enter]);
    let key = ConsoleUx::default().get_key(&mut console, &[KeyCode::Enter], false).unwrap();
    assert_eq!(key, KeyCode::Enter);
}

#[test]
fn escape_is_ignored_when_esc_exit_is_off() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Esc, KeyCode::Esc, KeyCode::Enter]);
    let ux = ConsoleUx::new(false);
    assert_eq!(ux.get_enter(&mut console).unwrap(), KeyCode::Enter);
}

#[test]
fn escape_is_a_valid_key_for_get_except_without_cancel() {
    let mut console = ScriptedConsole::new().key(KeyCode::Esc);
    let key = ConsoleUx::default().get_key_except(&mut console, &[KeyCode::Enter], false).unwrap();
    assert_eq!(key, KeyCode::Esc);
}

#[test]
fn get_esc_returns_escape_instead_of_cancelling() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Enter, KeyCode::Esc]);
    assert_eq!(ConsoleUx::default().get_esc(&mut console).unwrap(), KeyCode::Esc);
}

#[test]
fn get_move_wants_arrows() {
    let mut console = ScriptedConsole::new().keys([KeyCode::Char('w'), KeyCode::Left]);
    assert_eq!(ConsoleUx::default().get_move(&mut console).unwrap(), KeyCode::Left);
}

#[test]
fn get_key_info_does_not_block() {
    let space = KeyInfo::plain(KeyCode::Char(' '));
    let mut console = ScriptedConsole::new().idle().key(KeyCode::Char(' '));
    let ux = ConsoleUx::default();
    assert_eq!(ux.get_key_info(&mut console, &[space], true).unwrap(), None);
    assert_eq!(ux.get_key_info(&mut console, &[space], true).unwrap(), Some(space));
}

#[test]
fn get_key_info_matches_modifiers() {
    let space = KeyInfo::plain(KeyCode::Char(' '));
    let ctrl_space = KeyInfo::new(KeyCode::Char(' '), KeyModifiers::CONTROL);
    let mut console = ScriptedConsole::new().key_info(ctrl_space).key(KeyCode::Char(' '));
    let ux = ConsoleUx::default();
    assert_eq!(ux.get_key_info(&mut console, &[space], true).unwrap(), None);
    assert_eq!(console.remaining(), 1, "a disallowed key is consumed");
    assert_eq!(ux.get_key_info(&mut console, &[space], true).unwrap(), Some(space));
}

#[test]
fn get_key_info_cancels_on_escape() {
    let mut console = ScriptedConsole::new().key(KeyCode::Esc);
    let err = ConsoleUx::default()
        .get_key_info(&mut console, &[KeyInfo::plain(KeyCode::Char(' '))], true)
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn parsable_entry_skips_bad_lines() {
    let mut console = ScriptedConsole::new().line("seven").line("").line(" 7 ");
    let value: i32 = ConsoleUx::default().get_parsable_entry(&mut console).unwrap();
    assert_eq!(value, 7);
    assert_eq!(console.remaining(), 0);
    assert!(!console.output().contains("again"), "no re-prompt is written");
}

#[test]
fn parsable_entry_for_other_types() {
    let mut console = ScriptedConsole::new().line("-1").line("3.5");
    let value: f64 = ConsoleUx::default().get_parsable_entry(&mut console).unwrap();
    assert_eq!(value, -1.0);
    let value: u8 = ConsoleUx::default().get_parsable_entry(&mut console).unwrap_or(0);
    assert_eq!(value, 0, "3.5 is not a u8 and the feed then runs dry");
}

#[test]
fn upper_case_allow_list_accepts_either_case() {
    let mut console =
        ScriptedConsole::new().keys([KeyCode::Char('X'), KeyCode::Char('x'), KeyCode::Char('Y')]);
    let ux = ConsoleUx::default();
    let key = ux.get_key(&mut console, &[KeyCode::Char('Y'), KeyCode::Char('N')], true).unwrap();
    assert_eq!(key, KeyCode::Char('y'));

    let mut console = ScriptedConsole::new().key(KeyCode::Char('n'));
    let key = ux.get_key(&mut console, &[KeyCode::Char('Y'), KeyCode::Char('N')], true).unwrap();
    assert_eq!(key, KeyCode::Char('n'));
}

#[test]
fn upper_case_deny_list_rejects_either_case() {
    let mut console =
        ScriptedConsole::new().keys([KeyCode::Char('Q'), KeyCode::Char('q'), KeyCode::Char('k')]);
    let key = ConsoleUx::default().get_key_except(&mut console, &[KeyCode::Char('Q')], true).unwrap();
    assert_eq!(key, KeyCode::Char('k'));
}

#[test]
fn get_key_info_folds_hand_built_entries() {
    let shifted_y = KeyInfo { code: KeyCode::Char('Y'), modifiers: KeyModifiers::NONE };
    let mut console = ScriptedConsole::new().key(KeyCode::Char('Y'));
    let key = ConsoleUx::default().get_key_info(&mut console, &[shifted_y], true).unwrap();
    assert_eq!(key, Some(KeyInfo::new(KeyCode::Char('y'), KeyModifiers::SHIFT)));
}
