//! Role assignment: pick the impostors among the seats.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, instrument};

use crate::Player;

/// Creates `player_count` players and makes `impostor_count` of them impostors.
///
/// Draws uniform indices in `[0, player_count)` and keeps each one not seen
/// before until the impostor set is full (rejection sampling). Callers must
/// guarantee `impostor_count < player_count`; [`GameConfig::validate`]
/// does.
///
/// [`GameConfig::validate`]: crate::GameConfig::validate
#[instrument(skip(rng))]
pub fn assign_roles<R: Rng + ?Sized>(
    player_count: usize,
    impostor_count: usize,
    rng: &mut R,
) -> (Vec<Player>, BTreeSet<usize>) {
    debug_assert!(impostor_count < player_count, "no civilian would remain");

    let mut players: Vec<Player> = (1..=player_count).map(Player::new).collect();
    let mut impostors = BTreeSet::new();
    let mut draws = 0usize;

    while impostors.len() < impostor_count {
        let candidate = rng.random_range(0..player_count);
        draws += 1;
        if impostors.insert(candidate) {
            players[candidate].make_impostor();
        }
    }

    debug!(draws, "Roles assigned");
    (players, impostors)
}
