//! Session controller: owns the round and every phase transition.
//!
//! ```text
//! Config ──start_game──▶ Players ──pick_player──▶ Reveal
//!                          ▲  │                      │
//!                          │  └──(all revealed)──▶ Voting ──reveal_results──▶ Results
//!                          └────acknowledge──────────┘
//! any phase ──request_new_game + confirm_new_game──▶ Config
//! ```
//!
//! Each phase carries exactly the data it needs: `Voting` and `Results`
//! always hold a starting player, `Reveal` always holds a gate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::invariants::{assert_invariants, reveal_is_monotonic};
use crate::{
    GameConfig, MAX_PLAYERS, MIN_PLAYERS, PlayerSlot, RevealGate, RevealOptions, RevealView,
    Round, SettingKey, Settings, SettingsStore, ValidationError, WordBank,
};

/// Phase of the session as seen by the presentation layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Phase {
    /// Choosing players, impostors and categories.
    Config,
    /// Picking the next player to reveal.
    Players,
    /// One player's private reveal.
    Reveal,
    /// Discussion and voting, outside the app.
    Voting,
    /// Impostors disclosed.
    Results,
}

/// Whether an action changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The action was applied.
    Applied,
    /// The action has no meaning in the current state and was dropped.
    Ignored,
}

impl ActionOutcome {
    /// Returns true for [`ActionOutcome::Applied`].
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    fn from_bool(applied: bool) -> Self {
        if applied { Self::Applied } else { Self::Ignored }
    }
}

/// A player-driven action on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Deal a round from the current settings.
    StartGame,
    /// Open the reveal for the seat at this zero-based index.
    PickPlayer(usize),
    /// Uncover the reveal placeholder.
    TapReveal,
    /// "Got it".
    Acknowledge,
    /// Leave voting for the results.
    RevealResults,
    /// Ask to discard the session.
    RequestNewGame,
    /// Discard the session after a request.
    ConfirmNewGame,
    /// Keep the session after a request.
    CancelNewGame,
}

#[derive(Debug)]
enum Stage {
    Config,
    Players(Round),
    Reveal { round: Round, gate: RevealGate },
    Voting { round: Round, starting_player: usize },
    Results { round: Round, starting_player: usize },
}

impl Stage {
    fn phase(&self) -> Phase {
        match self {
            Stage::Config => Phase::Config,
            Stage::Players(_) => Phase::Players,
            Stage::Reveal { .. } => Phase::Reveal,
            Stage::Voting { .. } => Phase::Voting,
            Stage::Results { .. } => Phase::Results,
        }
    }

    fn round(&self) -> Option<&Round> {
        match self {
            Stage::Config => None,
            Stage::Players(round)
            | Stage::Reveal { round, .. }
            | Stage::Voting { round, .. }
            | Stage::Results { round, .. } => Some(round),
        }
    }
}

/// Owns all session state for one shared device.
#[derive(Debug)]
pub struct SessionController {
    bank: WordBank,
    store: Box<dyn SettingsStore>,
    settings: Settings,
    stage: Stage,
    confirm_pending: bool,
    rng: StdRng,
}

impl SessionController {
    /// Creates a controller seeded from the operating system.
    ///
    /// Settings are read from `store` once, here.
    #[instrument(skip(bank, store))]
    pub fn new(bank: WordBank, store: impl SettingsStore + 'static) -> Self {
        Self::with_rng(bank, Box::new(store), StdRng::from_os_rng())
    }

    /// Creates a controller with a deterministic random stream.
    #[instrument(skip(bank, store))]
    pub fn with_seed(bank: WordBank, store: impl SettingsStore + 'static, seed: u64) -> Self {
        Self::with_rng(bank, Box::new(store), StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: WordBank, store: Box<dyn SettingsStore>, rng: StdRng) -> Self {
        let settings = Settings::load(store.as_ref(), &bank);
        info!("Creating SessionController");
        Self {
            bank,
            store,
            settings,
            stage: Stage::Config,
            confirm_pending: false,
            rng,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Views
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The word bank rounds are dealt from.
    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    /// The settings store.
    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    /// The dealt round, if any.
    ///
    /// This exposes roles and the word; presentation code should use the
    /// phase-specific views instead.
    pub fn round(&self) -> Option<&Round> {
        self.stage.round()
    }

    /// Role-free seat list; empty in `Config`.
    pub fn players(&self) -> Vec<PlayerSlot> {
        self.stage.round().map(Round::slots).unwrap_or_default()
    }

    /// Number of seats that acknowledged their reveal.
    pub fn revealed_count(&self) -> usize {
        self.stage.round().map(Round::revealed_count).unwrap_or(0)
    }

    /// Reveal screen content, gated by the reveal state. `Reveal` only.
    #[instrument(skip(self))]
    pub fn reveal_view(&self) -> Option<RevealView> {
        match &self.stage {
            Stage::Reveal { round, gate } => gate.view(round, self.reveal_options()),
            _ => None,
        }
    }

    /// 1-based ordinal of the player who speaks first. `Voting` and `Results` only.
    pub fn starting_player(&self) -> Option<usize> {
        match &self.stage {
            Stage::Voting {
                starting_player, ..
            }
            | Stage::Results {
                starting_player, ..
            } => Some(starting_player + 1),
            _ => None,
        }
    }

    /// 1-based ordinals of the impostors. `Results` only.
    pub fn impostor_ordinals(&self) -> Option<Vec<usize>> {
        match &self.stage {
            Stage::Results { round, .. } => Some(round.impostor_ordinals()),
            _ => None,
        }
    }

    /// True while a new-game request awaits confirmation.
    pub fn confirm_pending(&self) -> bool {
        self.confirm_pending
    }

    fn reveal_options(&self) -> RevealOptions {
        RevealOptions {
            display_category: self.settings.display_category,
            display_impostor_hint: self.settings.display_impostor_hint,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Dispatches a first-class action.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, ValidationError> {
        let outcome = match action {
            Action::StartGame => return self.start_game(),
            Action::PickPlayer(index) => self.pick_player(index),
            Action::TapReveal => self.tap_reveal(),
            Action::Acknowledge => self.acknowledge(),
            Action::RevealResults => self.reveal_results(),
            Action::RequestNewGame => self.request_new_game(),
            Action::ConfirmNewGame => self.confirm_new_game(),
            Action::CancelNewGame => self.cancel_new_game(),
        };
        Ok(outcome)
    }

    /// Deals a round from the current settings and moves to `Players`.
    ///
    /// On a validation error the controller stays in `Config` and no round
    /// exists.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn start_game(&mut self) -> Result<ActionOutcome, ValidationError> {
        if self.confirm_pending || !matches!(self.stage, Stage::Config) {
            debug!("start_game ignored");
            return Ok(ActionOutcome::Ignored);
        }

        let config = GameConfig::from(&self.settings);
        let round = Round::deal(&config, &self.bank, &mut self.rng)?;
        assert_invariants(&round);

        info!(
            players = round.player_count(),
            impostors = round.impostor_count(),
            "Game started"
        );
        self.stage = Stage::Players(round);
        Ok(ActionOutcome::Applied)
    }

    /// Opens the reveal for an unrevealed seat; a no-op otherwise.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn pick_player(&mut self, index: usize) -> ActionOutcome {
        if self.confirm_pending {
            return ActionOutcome::Ignored;
        }
        match self.take_stage() {
            Stage::Players(round) => {
                let pickable = round.player(index).is_some_and(|p| !p.revealed());
                if pickable {
                    info!(player = index + 1, "Player picked");
                    self.stage = Stage::Reveal {
                        round,
                        gate: RevealGate::new(index),
                    };
                    ActionOutcome::Applied
                } else {
                    debug!(index, "Seat missing or already revealed");
                    self.stage = Stage::Players(round);
                    ActionOutcome::Ignored
                }
            }
            other => {
                self.stage = other;
                ActionOutcome::Ignored
            }
        }
    }

    /// Uncovers the placeholder for the bound player.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn tap_reveal(&mut self) -> ActionOutcome {
        if self.confirm_pending {
            return ActionOutcome::Ignored;
        }
        match &mut self.stage {
            Stage::Reveal { gate, .. } => ActionOutcome::from_bool(gate.tap()),
            _ => ActionOutcome::Ignored,
        }
    }

    /// Commits the reveal and returns to `Players`, advancing to `Voting`
    /// when this was the last seat.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn acknowledge(&mut self) -> ActionOutcome {
        if self.confirm_pending {
            return ActionOutcome::Ignored;
        }
        match self.take_stage() {
            Stage::Reveal {
                mut round,
                mut gate,
            } => {
                if !gate.acknowledge() {
                    self.stage = Stage::Reveal { round, gate };
                    return ActionOutcome::Ignored;
                }

                let before = round.clone();
                round.mark_revealed(gate.player());
                debug_assert!(
                    reveal_is_monotonic(&before, &round),
                    "Acknowledge must reveal exactly one new seat"
                );
                assert_invariants(&round);

                info!(
                    revealed = round.revealed_count(),
                    total = round.player_count(),
                    "Reveal committed"
                );
                self.stage = Stage::Players(round);
                self.advance_if_complete();
                ActionOutcome::Applied
            }
            other => {
                self.stage = other;
                ActionOutcome::Ignored
            }
        }
    }

    /// Moves `Players` to `Voting` once every seat is revealed.
    ///
    /// Only the `Players` stage can cross this edge, so it fires once per
    /// round.
    #[instrument(skip(self))]
    fn advance_if_complete(&mut self) -> bool {
        match self.take_stage() {
            Stage::Players(round) if round.all_revealed() => {
                let starting_player = self.rng.random_range(0..round.player_count());
                info!(starting_player = starting_player + 1, "All revealed, voting");
                self.stage = Stage::Voting {
                    round,
                    starting_player,
                };
                true
            }
            other => {
                self.stage = other;
                false
            }
        }
    }

    /// Moves `Voting` to `Results`.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn reveal_results(&mut self) -> ActionOutcome {
        if self.confirm_pending {
            return ActionOutcome::Ignored;
        }
        match self.take_stage() {
            Stage::Voting {
                round,
                starting_player,
            } => {
                info!("Results revealed");
                self.stage = Stage::Results {
                    round,
                    starting_player,
                };
                ActionOutcome::Applied
            }
            other => {
                self.stage = other;
                ActionOutcome::Ignored
            }
        }
    }

    /// First step of the destructive reset.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn request_new_game(&mut self) -> ActionOutcome {
        if self.confirm_pending {
            return ActionOutcome::Ignored;
        }
        debug!("New game requested");
        self.confirm_pending = true;
        ActionOutcome::Applied
    }

    /// Discards the session and returns to `Config`.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn confirm_new_game(&mut self) -> ActionOutcome {
        if !self.confirm_pending {
            debug!("confirm_new_game without a request");
            return ActionOutcome::Ignored;
        }
        self.confirm_pending = false;
        self.stage = Stage::Config;
        info!("Session discarded");
        ActionOutcome::Applied
    }

    /// Keeps the session.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn cancel_new_game(&mut self) -> ActionOutcome {
        if !self.confirm_pending {
            return ActionOutcome::Ignored;
        }
        self.confirm_pending = false;
        debug!("New game cancelled");
        ActionOutcome::Applied
    }

    fn take_stage(&mut self) -> Stage {
        std::mem::replace(&mut self.stage, Stage::Config)
    }

    // ─────────────────────────────────────────────────────────────
    //  Configuration setters (Config phase only)
    // ─────────────────────────────────────────────────────────────

    /// Stores a raw player count; bounds are checked by `start_game`.
    #[instrument(skip(self))]
    pub fn set_player_count(&mut self, count: usize) -> ActionOutcome {
        if !self.configurable() || self.settings.player_count == count {
            return ActionOutcome::Ignored;
        }
        self.settings.player_count = count;
        self.persist(SettingKey::PlayerCount);
        ActionOutcome::Applied
    }

    /// Stores a raw impostor count; bounds are checked by `start_game`.
    #[instrument(skip(self))]
    pub fn set_impostor_count(&mut self, count: usize) -> ActionOutcome {
        if !self.configurable() || self.settings.impostor_count == count {
            return ActionOutcome::Ignored;
        }
        self.settings.impostor_count = count;
        self.persist(SettingKey::ImpostorCount);
        ActionOutcome::Applied
    }

    /// Steps the player count within bounds, lowering the impostor count
    /// when it would leave no civilian.
    #[instrument(skip(self))]
    pub fn step_player_count(&mut self, delta: i32) -> ActionOutcome {
        if !self.configurable() {
            return ActionOutcome::Ignored;
        }
        let current = self.settings.player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        let next = current
            .saturating_add_signed(delta as isize)
            .clamp(MIN_PLAYERS, MAX_PLAYERS);
        if next == self.settings.player_count {
            return ActionOutcome::Ignored;
        }

        self.settings.player_count = next;
        self.persist(SettingKey::PlayerCount);

        if self.settings.impostor_count >= next {
            self.settings.impostor_count = next - 1;
            debug!(impostors = next - 1, "Impostor count lowered");
            self.persist(SettingKey::ImpostorCount);
        }
        ActionOutcome::Applied
    }

    /// Steps the impostor count when the result stays in `[1, players - 1]`.
    #[instrument(skip(self))]
    pub fn step_impostor_count(&mut self, delta: i32) -> ActionOutcome {
        if !self.configurable() {
            return ActionOutcome::Ignored;
        }
        let Some(next) = self
            .settings
            .impostor_count
            .checked_add_signed(delta as isize)
        else {
            return ActionOutcome::Ignored;
        };
        if delta == 0 || next < 1 || next >= self.settings.player_count {
            return ActionOutcome::Ignored;
        }
        self.settings.impostor_count = next;
        self.persist(SettingKey::ImpostorCount);
        ActionOutcome::Applied
    }

    /// Enables or disables one category of the bank.
    #[instrument(skip(self))]
    pub fn toggle_category(&mut self, category: &str) -> ActionOutcome {
        if !self.configurable() || !self.bank.has_category(category) {
            return ActionOutcome::Ignored;
        }
        let enabled = &mut self.settings.enabled_categories;
        if !enabled.remove(category) {
            enabled.insert(category.to_string());
        }
        self.persist(SettingKey::EnabledCategories);
        ActionOutcome::Applied
    }

    /// Leaving category selection with nothing enabled re-enables everything.
    #[instrument(skip(self))]
    pub fn finish_category_selection(&mut self) -> ActionOutcome {
        if !self.configurable() || !self.settings.enabled_categories.is_empty() {
            return ActionOutcome::Ignored;
        }
        info!("No category enabled, restoring all");
        self.settings.enabled_categories = self.bank.categories().into_iter().collect();
        self.persist(SettingKey::EnabledCategories);
        ActionOutcome::Applied
    }

    /// Shows or hides the category on the reveal screen.
    #[instrument(skip(self))]
    pub fn set_display_category(&mut self, shown: bool) -> ActionOutcome {
        if !self.configurable() || self.settings.display_category == shown {
            return ActionOutcome::Ignored;
        }
        self.settings.display_category = shown;
        self.persist(SettingKey::DisplayCategory);
        ActionOutcome::Applied
    }

    /// Shows or hides the hint for impostors.
    #[instrument(skip(self))]
    pub fn set_display_impostor_hint(&mut self, shown: bool) -> ActionOutcome {
        if !self.configurable() || self.settings.display_impostor_hint == shown {
            return ActionOutcome::Ignored;
        }
        self.settings.display_impostor_hint = shown;
        self.persist(SettingKey::DisplayImpostorHint);
        ActionOutcome::Applied
    }

    fn configurable(&self) -> bool {
        !self.confirm_pending && matches!(self.stage, Stage::Config)
    }

    /// Fire-and-forget write of one setting.
    fn persist(&mut self, key: SettingKey) {
        if let Err(e) = self.settings.save(key, self.store.as_mut()) {
            warn!(%key, error = %e, "Failed to persist setting");
        }
    }
}
