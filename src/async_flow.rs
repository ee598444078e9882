//! Async surface over the same Ready/Set/Go state machine.
//!
//! Every operation returns a future. Futures are not required to be `Send`:
//! the console is a single-threaded resource. [`AsyncStage`] pairs an
//! [`AsyncGameplay`] with an [`AsyncView`] and supplies the usual delegation.
//! [`Blocking`] lifts a sync [`GameUi`] or boxed
//! [`Gameplay`](crate::gameplay::Gameplay) into the async traits, and
//! [`GameConsole`] drives any [`AsyncGameUi`] through [`AsyncGameFlow`].

use crate::action::ActionInfo;
use crate::console::{Console, ConsoleError, ConsoleResult};
use crate::flow::{GameConsole, ReadyMode};
use crate::gameplay::{BoxedGameplay, Gameplay};
use crate::ui::GameUi;
use async_trait::async_trait;
use tracing::{debug, trace};

#[async_trait(?Send)]
pub trait AsyncGameplay {
    async fn start(&mut self) -> bool;
    async fn action(&mut self, info: ActionInfo) -> bool;
    async fn proceed(&mut self) -> bool;
    async fn game_over(&self) -> bool;
    async fn end(&mut self);
}

#[async_trait(?Send)]
pub trait AsyncGameUi {
    async fn start(&mut self, console: &mut dyn Console) -> ConsoleResult<bool>;
    async fn render(&mut self, console: &mut dyn Console) -> ConsoleResult<()>;
    async fn refresh(&mut self, console: &mut dyn Console) -> ConsoleResult<()>;
    async fn action(&mut self, console: &mut dyn Console) -> ConsoleResult<bool>;
    async fn proceed(&mut self, console: &mut dyn Console) -> ConsoleResult<bool>;
    async fn game_over(&self) -> bool;
    async fn end(&mut self, console: &mut dyn Console) -> ConsoleResult<()>;
}

#[async_trait(?Send)]
pub trait AsyncGameFlow {
    async fn play(&mut self) -> ConsoleResult<()>;
    async fn ready(&mut self) -> ConsoleResult<bool>;
    async fn set(&mut self) -> ConsoleResult<()>;
    async fn go(&mut self) -> ConsoleResult<()>;
}

/// Async twin of [`drive`](crate::flow::drive), with the same ordering.
pub async fn drive_async<U: AsyncGameUi + ?Sized>(
    ui: &mut U,
    console: &mut dyn Console,
) -> ConsoleResult<()> {
    if ui.start(console).await? {
        loop {
            if !ui.action(console).await? {
                trace!("action not executed");
                continue;
            }
            if !ui.proceed(console).await? || ui.game_over().await {
                break;
            }
        }
    }
    ui.end(console).await
}

/// Async presentation of a specific gameplay, composed into an [`AsyncStage`].
#[async_trait(?Send)]
pub trait AsyncView {
    type Gameplay: AsyncGameplay;

    async fn render(
        &mut self,
        gameplay: &Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<()>;

    async fn refresh(
        &mut self,
        gameplay: &Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<()> {
        self.render(gameplay, console).await
    }

    async fn action(
        &mut self,
        gameplay: &mut Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool>;

    async fn proceed(
        &mut self,
        gameplay: &mut Self::Gameplay,
        console: &mut dyn Console,
    ) -> ConsoleResult<bool>;

    /// Final feedback, shown before the gameplay is ended.
    async fn finish(
        &mut self,
        _gameplay: &Self::Gameplay,
        _console: &mut dyn Console,
    ) -> ConsoleResult<()> {
        Ok(())
    }
}

/// An async gameplay and its view, delegating the way [`Stage`](crate::ui::Stage) does.
pub struct AsyncStage<V: AsyncView> {
    gameplay: V::Gameplay,
    view: V,
}

impl<V: AsyncView> AsyncStage<V> {
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

#[async_trait(?Send)]
impl<V: AsyncView> AsyncGameUi for AsyncStage<V> {
    async fn start(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        let started = self.gameplay.start().await;
        if started {
            self.view.render(&self.gameplay, console).await?;
        }
        Ok(started)
    }

    async fn render(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.view.render(&self.gameplay, console).await
    }

    async fn refresh(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.view.refresh(&self.gameplay, console).await
    }

    async fn action(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.view.action(&mut self.gameplay, console).await
    }

    async fn proceed(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.view.proceed(&mut self.gameplay, console).await
    }

    async fn game_over(&self) -> bool {
        self.gameplay.game_over().await
    }

    async fn end(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.view.finish(&self.gameplay, console).await?;
        self.gameplay.end().await;
        Ok(())
    }
}

/// Runs a sync UI or gameplay behind the async traits.
#[derive(Debug, Clone, Default)]
pub struct Blocking<T>(pub T);

#[async_trait(?Send)]
impl<U: GameUi> AsyncGameUi for Blocking<U> {
    async fn start(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.0.start(console)
    }
    async fn render(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.0.render(console)
    }
    async fn refresh(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.0.refresh(console)
    }
    async fn action(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.0.action(console)
    }
    async fn proceed(&mut self, console: &mut dyn Console) -> ConsoleResult<bool> {
        self.0.proceed(console)
    }
    async fn game_over(&self) -> bool {
        self.0.game_over()
    }
    async fn end(&mut self, console: &mut dyn Console) -> ConsoleResult<()> {
        self.0.end(console)
    }
}

#[async_trait(?Send)]
impl<G: BoxedGameplay> AsyncGameplay for Blocking<G> {
    async fn start(&mut self) -> bool {
        self.0.start()
    }
    async fn action(&mut self, info: ActionInfo) -> bool {
        self.0.action(info)
    }
    async fn proceed(&mut self) -> bool {
        self.0.proceed()
    }
    async fn game_over(&self) -> bool {
        self.0.game_over()
    }
    async fn end(&mut self) {
        self.0.end()
    }
}

#[async_trait(?Send)]
impl<C: Console, U: AsyncGameUi> AsyncGameFlow for GameConsole<C, U> {
    async fn play(&mut self) -> ConsoleResult<()> {
        self.console_mut().set_cursor_visible(false)?;
        let played = async {
            match self.ready_mode() {
                ReadyMode::IfReady => {
                    if self.ready().await? {
                        self.set().await?;
                        self.go().await?;
                    }
                }
                ReadyMode::WhileReady => {
                    while self.ready().await? {
                        self.set().await?;
                        self.go().await?;
                    }
                }
            }
            Ok::<(), ConsoleError>(())
        }
        .await;
        if let Err(err) = &played {
            debug!(%err, "play interrupted");
        }
        let restored = self.console_mut().set_cursor_visible(true);
        played?;
        Ok(restored?)
    }

    async fn ready(&mut self) -> ConsoleResult<bool> {
        self.ready_step()
    }

    async fn set(&mut self) -> ConsoleResult<()> {
        self.set_step()
    }

    async fn go(&mut self) -> ConsoleResult<()> {
        let mut ui = self.begin_round()?;
        drive_async(&mut ui, self.console_mut()).await
    }
}
