//! Application loop driving the screens from the session phase.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use derive_getters::Getters;
use ratatui::{Terminal, backend::Backend};
use strictly_impostor::{Phase, SessionController};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::screen::{Screen, ScreenTransition};
use crate::screens::{
    CategoriesScreen, ConfigScreen, ImpostorCountScreen, PlayerCountScreen, PlayersScreen,
    ResultsScreen, RevealScreen, VotingScreen, confirm,
};

/// Active screen of the shell.
#[derive(Debug)]
enum ActiveScreen {
    Config(ConfigScreen),
    PlayerCount(PlayerCountScreen),
    ImpostorCount(ImpostorCountScreen),
    Categories(CategoriesScreen),
    Players(PlayersScreen),
    Reveal(RevealScreen),
    Voting(VotingScreen),
    Results(ResultsScreen),
}

impl ActiveScreen {
    /// Fresh screen for a phase.
    fn for_phase(phase: Phase, controller: &SessionController) -> Self {
        match phase {
            Phase::Config => Self::Config(ConfigScreen::new()),
            Phase::Players => Self::Players(PlayersScreen::new(controller)),
            Phase::Reveal => Self::Reveal(RevealScreen::new()),
            Phase::Voting => Self::Voting(VotingScreen::new()),
            Phase::Results => Self::Results(ResultsScreen::new()),
        }
    }

    /// Phase this screen belongs to.
    fn phase(&self) -> Phase {
        match self {
            Self::Config(_) | Self::PlayerCount(_) | Self::ImpostorCount(_) | Self::Categories(_) => {
                Phase::Config
            }
            Self::Players(_) => Phase::Players,
            Self::Reveal(_) => Phase::Reveal,
            Self::Voting(_) => Phase::Voting,
            Self::Results(_) => Phase::Results,
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Config(s) => s,
            Self::PlayerCount(s) => s,
            Self::ImpostorCount(s) => s,
            Self::Categories(s) => s,
            Self::Players(s) => s,
            Self::Reveal(s) => s,
            Self::Voting(s) => s,
            Self::Results(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Config(s) => s,
            Self::PlayerCount(s) => s,
            Self::ImpostorCount(s) => s,
            Self::Categories(s) => s,
            Self::Players(s) => s,
            Self::Reveal(s) => s,
            Self::Voting(s) => s,
            Self::Results(s) => s,
        }
    }
}

/// The terminal application.
///
/// Call [`App::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct App {
    controller: SessionController,
}

impl App {
    /// Creates the application around a session controller.
    #[instrument(skip(controller))]
    pub fn new(controller: SessionController) -> Self {
        info!("Creating App");
        Self { controller }
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");

        let mut screen = ActiveScreen::for_phase(self.controller.phase(), &self.controller);

        loop {
            terminal.draw(|f| {
                screen.as_screen().render(f, &self.controller);
                if self.controller.confirm_pending() {
                    confirm::render(f);
                }
            })?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = self.dispatch_key(key, &mut screen);
                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("Quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Routes a key to the confirmation overlay or the active screen.
    #[instrument(skip(self, screen))]
    fn dispatch_key(&mut self, key: KeyEvent, screen: &mut ActiveScreen) -> ScreenTransition {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenTransition::Quit;
        }
        if self.controller.confirm_pending() {
            confirm::handle_key(key, &mut self.controller);
            return ScreenTransition::Stay;
        }
        screen.as_screen_mut().handle_key(key, &mut self.controller)
    }

    /// Applies a transition, returning the next screen or `None` to quit.
    ///
    /// A phase change always wins over the screen's own transition.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        let phase = self.controller.phase();
        if transition == ScreenTransition::Quit {
            return None;
        }
        if current.phase() != phase {
            debug!(from = %current.phase(), to = %phase, "Following phase change");
            return Some(ActiveScreen::for_phase(phase, &self.controller));
        }

        let next = match transition {
            ScreenTransition::Stay => current,
            ScreenTransition::GoToConfig => ActiveScreen::Config(ConfigScreen::new()),
            ScreenTransition::GoToPlayerCount => ActiveScreen::PlayerCount(PlayerCountScreen),
            ScreenTransition::GoToImpostorCount => {
                ActiveScreen::ImpostorCount(ImpostorCountScreen)
            }
            ScreenTransition::GoToCategories => {
                ActiveScreen::Categories(CategoriesScreen::new(&self.controller))
            }
            ScreenTransition::Quit => return None,
        };
        if next.phase() != phase {
            // Config sub-screens are unreachable outside the config phase.
            return Some(ActiveScreen::for_phase(phase, &self.controller));
        }
        Some(next)
    }
}
