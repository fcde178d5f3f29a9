//! Screen trait and transition type for the terminal shell.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use strictly_impostor::SessionController;

/// The result of handling an input event on a screen.
///
/// Game phases are owned by the [`SessionController`]; transitions here only
/// cover navigation inside the configuration phase. Whenever the phase
/// changes, the [`App`](crate::app::App) swaps in the matching screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen, or follow a phase change.
    Stay,
    /// Navigate to the configuration menu.
    GoToConfig,
    /// Navigate to the player count picker.
    GoToPlayerCount,
    /// Navigate to the impostor count picker.
    GoToImpostorCount,
    /// Navigate to category selection.
    GoToCategories,
    /// Exit the application.
    Quit,
}

/// Trait implemented by each screen of the shell.
///
/// Screens render controller views only and drive the game by calling
/// controller actions.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, controller: &SessionController);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, controller: &mut SessionController)
    -> ScreenTransition;
}
