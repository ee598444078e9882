// Gameplay contract. A gameplay owns one round's authoritative state and knows
// nothing about presentation, so the same rules can sit behind any UI.

use crate::action::ActionInfo;

/// The rules of one round.
///
/// `Input` and `Output` are the action types a UI feeds in and gets back.
/// Gameplays that take an [`ActionInfo`] and answer with a `bool` form the
/// boxed surface, see [`BoxedGameplay`].
pub trait Gameplay {
    type Input;
    type Output;

    /// Initializes round state. Returns whether play may proceed.
    fn start(&mut self) -> bool;

    /// Applies one unit of input to the round.
    fn action(&mut self, input: Self::Input) -> Self::Output;

    /// Whether another action is permitted. May reset state for a replay,
    /// so unlike `game_over` it can have side effects. Must be false once
    /// any terminal outcome holds.
    fn proceed(&mut self) -> bool;

    /// True for every terminal outcome. Never mutates.
    fn game_over(&self) -> bool;

    /// Tears down round state, e.g. clearing a secret.
    fn end(&mut self);
}

/// A gameplay driven through the dynamically typed envelope.
pub trait BoxedGameplay: Gameplay<Input = ActionInfo, Output = bool> {}

impl<G: Gameplay<Input = ActionInfo, Output = bool>> BoxedGameplay for G {}
