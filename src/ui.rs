//! Game UI contract and the adapter that gives a gameplay a presentation.
//!
//! [`GameUi`] is what the flow controller drives. It carries no logic of its
//! own. [`Stage`] implements it for a gameplay plus a [`View`], supplying the
//! usual delegation: `start` starts the gameplay and renders once, `game_over`
//! asks the gameplay, `end` lets the view show final feedback and then ends
//! the gameplay.

use crate::console::{Console, ConsoleResult};
use crate::gameplay::Gameplay;

/// One round's presentation, as seen by the flow controller.
pub trait GameUi {
    /// Starts the round. Returns false if it cannot be played.
    fn start(&mut self, console: &mut dyn Console) -> ConsoleResult<bool>;
    /// Full redraw of static and dynamic content.
    fn render(&mut self, console: &mut dyn Console) -> ConsoleResult<()>;
    /// Redraw during play.
    fn refresh(&mut self, console: &mut dyn Console) -> ConsoleResult<()>;
    /// Acquires one input and applies it. Returns whether it was executed.
    fn action(&mut self, console: &mut dyn Console) -> ConsoleResult<bool>;
    /// Feedback after an executed action. Returns whether to keep going.
    fn proceed(&mut self, console: &mut dyn Console) -> ConsoleResult<bool>;
    fn game_over(&self) -> bool;
    fn end(&mut self, console: &mut dyn Console) -> ConsoleResult<()>;
}

/// Presentation of a specific gameplay, composed into a [`Stage`].
pub trait View {
    type Gameplay: Gameplay;

    fn render(&mut self, gameplay: &Self::Gameplay, console: &mut dyn Console)
        -> ConsoleResult<()>;

    /// Views with a static header should draw it once in `render` and keep
    /// a flag so this only redraws the dynamic part.
    fn refresh(
        &mut self,
        gameplay: &Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<()> {
        self.render(gameplay, console)
    }

    fn action(
        &mut self,
        gameplay: &mut Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool>;

    fn proceed(
        &mut self,
        gameplay: &mut Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool>;

    /// Final feedback, shown before the gameplay is ended.
    fn finish(
        &mut self,
        _gameplay: &Self::Gameplay,
        _console: &mut dyn Console,
    ) -> ConsoleResult<()> {
        Ok(())
    }
}

/// A gameplay and its view. Owns exactly one gameplay for one round.
pub struct Stage<V: View> {
    gameplay: V::Gameplay,
    view: V,
}

impl<V: View> Stage<V> {
    pub fn new(gameplay: V::Gameplay, view: V) -> Self {
        Self { gameplay, view }
    }

    pub fn gameplay(&self) -> &V::Gameplay {
        &self.gameplay
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

impl<V: View> GameUi for Stage<V> {
    fn start(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        let started = self.gameplay.start();
        if started {
            self.view.render(&self.gameplay, console)?;
        }
        Ok(started)
    }

    fn render(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.view.render(&self.gameplay, console)
    }

    fn refresh(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.view.refresh(&self.gameplay, console)
    }

    fn action(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.view.action(&mut self.gameplay, console)
    }

    fn proceed(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.view.proceed(&mut self.gameplay, console)
    }

    fn game_over(&self) -> bool {
        self.gameplay.game_over()
    }

    fn end(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.view.finish(&self.gameplay, console)?;
        self.gameplay.end();
        Ok(())
    }
}
