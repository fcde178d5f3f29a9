//! Session configuration and the checks run before a round may start.

use std::collections::BTreeSet;

use derive_getters::Getters;
use derive_new::new;
use tracing::{instrument, warn};

use crate::{MAX_PLAYERS, MIN_PLAYERS, Settings, ValidationError, WordBank};

/// What `start_game` needs to deal a round.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameConfig {
    player_count: usize,
    impostor_count: usize,
    enabled_categories: BTreeSet<String>,
}

impl GameConfig {
    /// Checks bounds and that the enabled categories select at least one pair.
    ///
    /// Checks run in order: player count, impostor count, category pool.
    #[instrument(skip(self, bank), fields(players = self.player_count, impostors = self.impostor_count))]
    pub fn validate(&self, bank: &WordBank) -> Result<(), ValidationError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            warn!("Rejected player count");
            return Err(ValidationError::PlayerCountOutOfRange);
        }
        if self.impostor_count == 0 {
            warn!("Rejected impostor count of zero");
            return Err(ValidationError::ImpostorCountTooLow);
        }
        if self.impostor_count >= self.player_count {
            warn!("Rejected impostor count leaving no civilian");
            return Err(ValidationError::ImpostorCountTooHigh);
        }
        if bank.pool(&self.enabled_categories).is_empty() {
            warn!(categories = self.enabled_categories.len(), "Rejected empty word pool");
            return Err(ValidationError::NoCategoriesEnabled);
        }
        Ok(())
    }
}

impl From<&Settings> for GameConfig {
    fn from(settings: &Settings) -> Self {
        Self::new(
            *settings.player_count(),
            *settings.impostor_count(),
            settings.enabled_categories().clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food() -> BTreeSet<String> {
        ["food".to_string()].into_iter().collect()
    }

    #[test]
    fn test_valid_bounds_accepted() {
        let bank = WordBank::builtin();
        for players in MIN_PLAYERS..=MAX_PLAYERS {
            for impostors in 1..players {
                let config = GameConfig::new(players, impostors, food());
                assert!(config.validate(&bank).is_ok(), "{players}/{impostors}");
            }
        }
    }

    #[test]
    fn test_player_count_bounds() {
        let bank = WordBank::builtin();
        for players in [0, 2, 13, 40] {
            let config = GameConfig::new(players, 1, food());
            assert_eq!(
                config.validate(&bank),
                Err(ValidationError::PlayerCountOutOfRange)
            );
        }
    }

    #[test]
    fn test_impostor_count_bounds() {
        let bank = WordBank::builtin();
        assert_eq!(
            GameConfig::new(5, 5, food()).validate(&bank),
            Err(ValidationError::ImpostorCountTooHigh)
        );
        assert_eq!(
            GameConfig::new(5, 0, food()).validate(&bank),
            Err(ValidationError::ImpostorCountTooLow)
        );
    }

    #[test]
    fn test_empty_pool_rejected() {
        let bank = WordBank::builtin();
        assert_eq!(
            GameConfig::new(4, 1, BTreeSet::new()).validate(&bank),
            Err(ValidationError::NoCategoriesEnabled)
        );
        let unknown = ["trains".to_string()].into_iter().collect();
        assert_eq!(
            GameConfig::new(4, 1, unknown).validate(&bank),
            Err(ValidationError::NoCategoriesEnabled)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::PlayerCountOutOfRange.to_string(),
            "player count out of range"
        );
        assert_eq!(
            ValidationError::ImpostorCountTooHigh.to_string(),
            "impostor count too high"
        );
        assert_eq!(
            ValidationError::NoCategoriesEnabled.to_string(),
            "no categories enabled"
        );
    }
}
