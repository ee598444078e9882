//! The action envelope: one unit of player input, output and result carried
//! from a UI into a gameplay.

use std::any::{type_name, Any};
use std::fmt;

/// Which state of play an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ActionMode {
    /// In-gameplay actions.
    #[default]
    GamePlay,
    /// Actions while the game is paused, e.g. resuming.
    GamePause,
    /// Actions while the game is stopped, e.g. undoing the move that ended it.
    GameStop,
}

/// What kind of input an action carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ActionKind {
    /// Moves, attacks, selections.
    #[default]
    Control,
    /// Answers or data entered at a gameplay prompt.
    Response,
    /// Menus, settings and other non-gameplay elements.
    Navigation,
    Other,
}

/// The envelope slot an accessor reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Input,
    Output,
    Result,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Slot::Input => "input",
            Slot::Output => "output",
            Slot::Result => "result",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no {slot} value is set")]
    Empty { slot: Slot },
    #[error("{slot} value is not a {expected}")]
    TypeMismatch { slot: Slot, expected: &'static str },
}

/// Dynamically typed action envelope.
///
/// Each slot holds any `'static` value; the typed accessors succeed only for
/// the exact type that was stored.
///
/// ```
/// use gameflow::action::{ActionError, ActionInfo};
///
/// let info = ActionInfo::new().with_input(7_i32);
/// assert_eq!(info.input_as::<i32>(), Ok(&7));
/// assert!(matches!(info.input_as::<u8>(), Err(ActionError::TypeMismatch { .. })));
/// ```
#[derive(Default)]
pub struct ActionInfo {
    pub mode: ActionMode,
    pub kind: ActionKind,
    input: Option<Box<dyn Any>>,
    output: Option<Box<dyn Any>>,
    result: Option<Box<dyn Any>>,
}

impl ActionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ActionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_input<T: Any>(mut self, value: T) -> Self {
        self.set_input(value);
        self
    }

    pub fn set_input<T: Any>(&mut self, value: T) {
        self.input = Some(Box::new(value));
    }

    pub fn set_output<T: Any>(&mut self, value: T) {
        self.output = Some(Box::new(value));
    }

    pub fn set_result<T: Any>(&mut self, value: T) {
        self.result = Some(Box::new(value));
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn input_as<T: Any>(&self) -> Result<&T, ActionError> {
        value_as(self.input.as_deref(), Slot::Input)
    }

    pub fn output_as<T: Any>(&self) -> Result<&T, ActionError> {
        value_as(self.output.as_deref(), Slot::Output)
    }

    pub fn result_as<T: Any>(&self) -> Result<&T, ActionError> {
        value_as(self.result.as_deref(), Slot::Result)
    }

    /// Removes the input, returning it as `T`. On a mismatch the value stays in place.
    pub fn take_input_as<T: Any>(&mut self) -> Result<T, ActionError> {
        take_as(&mut self.input, Slot::Input)
    }
}

impl fmt::Debug for ActionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInfo")
            .field("mode", &self.mode)
            .field("kind", &self.kind)
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .field("result", &self.result.is_some())
            .finish()
    }
}

fn value_as<T: Any>(value: Option<&dyn Any>, slot: Slot) -> Result<&T, ActionError> {
    let value = value.ok_or(ActionError::Empty { slot })?;
    value.downcast_ref::<T>().ok_or(ActionError::TypeMismatch { slot, expected: type_name::<T>() })
}

fn take_as<T: Any>(value: &mut Option<Box<dyn Any>>, slot: Slot) -> Result<T, ActionError> {
    let boxed = value.take().ok_or(ActionError::Empty { slot })?;
    match boxed.downcast::<T>() {
        Ok(v) => Ok(*v),
        Err(boxed) => {
            *value = Some(boxed);
            Err(ActionError::TypeMismatch { slot, expected: type_name::<T>() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_gameplay_control() {
        let info = ActionInfo::new();
        assert_eq!(info.mode, ActionMode::GamePlay);
        assert_eq!(info.kind, ActionKind::Control);
        assert!(!info.has_input() && !info.has_output() && !info.has_result());
    }

    #[test]
    fn empty_slot_is_reported() {
        let info = ActionInfo::new();
        assert_eq!(info.output_as::<bool>(), Err(ActionError::Empty { slot: Slot::Output }));
    }

    #[test]
    fn slots_are_independent() {
        let mut info = ActionInfo::new().with_input(String::from("go"));
        info.set_output(3_u64);
        info.set_result(true);
        assert_eq!(info.input_as::<String>().map(String::as_str), Ok("go"));
        assert_eq!(info.output_as::<u64>(), Ok(&3));
        assert_eq!(info.result_as::<bool>(), Ok(&true));
    }

    #[test]
    fn take_keeps_value_on_mismatch() {
        let mut info = ActionInfo::new().with_input(5_i32);
        let err = info.take_input_as::<i64>().unwrap_err();
        assert!(matches!(err, ActionError::TypeMismatch { slot: Slot::Input, .. }));
        assert_eq!(info.take_input_as::<i32>(), Ok(5));
        assert!(!info.has_input());
    }
}
