//! The dealt round: seats, roles and the word, fixed until a new game.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{info, instrument};

use crate::{GameConfig, Player, PlayerSlot, ValidationError, WordBank, WordPair, assign_roles};

/// Everything decided at "start game".
///
/// Only reveal acknowledgments mutate a round, and only by flipping a
/// player's `revealed` flag to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    players: Vec<Player>,
    impostor_indices: BTreeSet<usize>,
    impostor_count: usize,
    word: WordPair,
}

impl Round {
    /// Validates `config`, assigns roles and draws the word.
    ///
    /// Nothing is created when validation fails.
    #[instrument(skip(config, bank, rng), fields(players = config.player_count(), impostors = config.impostor_count()))]
    pub fn deal<R: Rng + ?Sized>(
        config: &GameConfig,
        bank: &WordBank,
        rng: &mut R,
    ) -> Result<Self, ValidationError> {
        config.validate(bank)?;

        let word = bank
            .select(config.enabled_categories(), rng)
            .ok_or(ValidationError::NoCategoriesEnabled)?;
        let (players, impostor_indices) =
            assign_roles(*config.player_count(), *config.impostor_count(), rng);

        info!(category = %word.category(), "Round dealt");
        Ok(Self {
            players,
            impostor_indices,
            impostor_count: *config.impostor_count(),
            word,
        })
    }

    /// Seats in ordinal order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Zero-based indices of the impostors.
    pub fn impostor_indices(&self) -> &BTreeSet<usize> {
        &self.impostor_indices
    }

    /// Requested number of impostors.
    pub fn impostor_count(&self) -> usize {
        self.impostor_count
    }

    /// The civilians' word.
    pub fn secret_word(&self) -> &str {
        self.word.secret()
    }

    /// The impostors' hint.
    pub fn impostor_hint(&self) -> &str {
        self.word.hint()
    }

    /// Category the word was drawn from.
    pub fn category(&self) -> &str {
        self.word.category()
    }

    /// Number of seats.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of seats that have acknowledged their reveal.
    pub fn revealed_count(&self) -> usize {
        self.players.iter().filter(|p| p.revealed()).count()
    }

    /// True once every seat has acknowledged.
    pub fn all_revealed(&self) -> bool {
        self.revealed_count() == self.players.len()
    }

    /// Role-free view of the seats.
    pub fn slots(&self) -> Vec<PlayerSlot> {
        self.players.iter().map(PlayerSlot::from).collect()
    }

    /// Display ordinals of the impostors, ascending.
    pub fn impostor_ordinals(&self) -> Vec<usize> {
        self.impostor_indices.iter().map(|i| i + 1).collect()
    }

    pub(crate) fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub(crate) fn mark_revealed(&mut self, index: usize) {
        if let Some(player) = self.players.get_mut(index) {
            player.mark_revealed();
        }
    }

    #[cfg(test)]
    pub(crate) fn players_mut(&mut self) -> &mut Vec<Player> {
        &mut self.players
    }

    #[cfg(test)]
    pub(crate) fn impostor_indices_mut(&mut self) -> &mut BTreeSet<usize> {
        &mut self.impostor_indices
    }
}
