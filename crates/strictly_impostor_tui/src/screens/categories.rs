//! Category selection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use strictly_impostor::SessionController;
use tracing::{debug, info, instrument};

use super::{frame_chunks, render_help, render_title, wrap_step};
use crate::screen::{Screen, ScreenTransition};

/// State for the category selection screen.
#[derive(Debug)]
pub struct CategoriesScreen {
    categories: Vec<String>,
    list_state: ListState,
}

impl CategoriesScreen {
    /// Lists the categories of the controller's word bank.
    #[instrument(skip(controller))]
    pub fn new(controller: &SessionController) -> Self {
        let categories = controller.bank().categories();
        debug!(count = categories.len(), "Initializing CategoriesScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            categories,
            list_state,
        }
    }

    fn selected(&self) -> Option<&str> {
        self.categories
            .get(self.list_state.selected().unwrap_or(0))
            .map(String::as_str)
    }
}

impl Screen for CategoriesScreen {
    #[instrument(skip(self, frame, controller))]
    fn render(&self, frame: &mut Frame, controller: &SessionController) {
        let (title, body, help) = frame_chunks(frame);
        render_title(frame, title, "Categories");

        let enabled = controller.settings().enabled_categories();
        let items: Vec<ListItem> = self
            .categories
            .iter()
            .map(|key| {
                let mark = if enabled.contains(key) { "x" } else { " " };
                ListItem::new(format!(
                    "[{}] {} ({})",
                    mark,
                    controller.bank().display_name(key),
                    controller.bank().count_for(key)
                ))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} enabled", enabled.len())),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, body, &mut list_state);

        render_help(frame, help, "↑↓: Navigate | Space/Enter: Toggle | Esc: Done");
    }

    #[instrument(skip(self, key, controller))]
    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut SessionController,
    ) -> ScreenTransition {
        let count = self.categories.len();
        match key.code {
            KeyCode::Up => {
                let i = wrap_step(self.list_state.selected(), count, false);
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                let i = wrap_step(self.list_state.selected(), count, true);
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(category) = self.selected().map(str::to_string) {
                    controller.toggle_category(&category);
                }
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                if controller.finish_category_selection().is_applied() {
                    info!("Empty selection restored to all categories");
                }
                ScreenTransition::GoToConfig
            }
            _ => ScreenTransition::Stay,
        }
    }
}
