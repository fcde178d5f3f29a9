//! Reveal gate for one player's private turn at the shared device.
//!
//! A gate starts [`RevealState::Hidden`] every time a player is picked.
//! Only an explicit tap moves it to `Showing`, and only `Showing` can be
//! acknowledged. The view produced while hidden carries no secret data,
//! so re-rendering a hidden gate can never leak anything.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{Role, Round};

/// Local state of the reveal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RevealState {
    /// Placeholder only; nothing sensitive is bound.
    Hidden,
    /// Role content is visible to the bound player.
    Showing,
    /// The player confirmed; terminal for this visit.
    Acknowledged,
}

/// Reveal gate bound to one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealGate {
    player: usize,
    state: RevealState,
}

impl RevealGate {
    /// Opens a hidden gate for the player at zero-based `player`.
    #[instrument]
    pub fn new(player: usize) -> Self {
        Self {
            player,
            state: RevealState::Hidden,
        }
    }

    /// Zero-based index of the bound player.
    pub fn player(&self) -> usize {
        self.player
    }

    /// Current gate state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Explicit reveal. Returns true if the gate moved to `Showing`.
    #[instrument(skip(self), fields(player = self.player, state = %self.state))]
    pub fn tap(&mut self) -> bool {
        match self.state {
            RevealState::Hidden => {
                self.state = RevealState::Showing;
                info!("Reveal shown");
                true
            }
            RevealState::Showing | RevealState::Acknowledged => {
                debug!("Tap ignored");
                false
            }
        }
    }

    /// "Got it". Returns true if the gate moved to `Acknowledged`.
    ///
    /// Inert while hidden.
    #[instrument(skip(self), fields(player = self.player, state = %self.state))]
    pub fn acknowledge(&mut self) -> bool {
        match self.state {
            RevealState::Showing => {
                self.state = RevealState::Acknowledged;
                info!("Reveal acknowledged");
                true
            }
            RevealState::Hidden | RevealState::Acknowledged => {
                debug!("Acknowledge ignored");
                false
            }
        }
    }

    /// Renders the gate against `round`.
    ///
    /// Returns `None` only if the gate is bound to a seat the round lacks.
    #[instrument(skip(self, round, options), fields(player = self.player, state = %self.state))]
    pub fn view(&self, round: &Round, options: RevealOptions) -> Option<RevealView> {
        let seat = round.player(self.player)?;
        let ordinal = seat.index();

        let view = match self.state {
            RevealState::Hidden => RevealView::Hidden { ordinal },
            RevealState::Showing | RevealState::Acknowledged => {
                let content = match seat.role() {
                    Role::Civilian => RevealContent::Civilian {
                        secret_word: round.secret_word().to_string(),
                    },
                    Role::Impostor => RevealContent::Impostor {
                        hint: options
                            .display_impostor_hint
                            .then(|| round.impostor_hint().to_string()),
                    },
                };
                RevealView::Showing {
                    ordinal,
                    content,
                    category: options
                        .display_category
                        .then(|| round.category().to_string()),
                }
            }
        };
        Some(view)
    }
}

/// Display preferences that shape the revealed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealOptions {
    /// Also show the category name.
    pub display_category: bool,
    /// Show impostors their hint.
    pub display_impostor_hint: bool,
}

/// Role-appropriate content shown once the gate is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealContent {
    /// Civilians see the secret word.
    Civilian {
        /// The shared secret.
        secret_word: String,
    },
    /// Impostors see the indicator and, if enabled, the hint.
    Impostor {
        /// Hint, when impostor hints are enabled.
        hint: Option<String>,
    },
}

/// What the reveal screen may render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealView {
    /// Inert placeholder; the acknowledge control is disabled.
    Hidden {
        /// 1-based display ordinal of the bound player.
        ordinal: usize,
    },
    /// Content visible; the acknowledge control is enabled.
    Showing {
        /// 1-based display ordinal of the bound player.
        ordinal: usize,
        /// Role content.
        content: RevealContent,
        /// Category name, when enabled.
        category: Option<String>,
    },
}

impl RevealView {
    /// 1-based display ordinal of the bound player.
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Hidden { ordinal } | Self::Showing { ordinal, .. } => *ordinal,
        }
    }

    /// Whether "Got it" is enabled.
    pub fn can_acknowledge(&self) -> bool {
        matches!(self, Self::Showing { .. })
    }
}
