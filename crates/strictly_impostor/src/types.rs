//! Core domain types for the impostor word game.

use serde::{Deserialize, Serialize};

/// Fewest players a session accepts.
pub const MIN_PLAYERS: usize = 3;

/// Most players a session accepts.
pub const MAX_PLAYERS: usize = 12;

/// Secret role handed to each player at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Role {
    /// Receives the shared secret word.
    Civilian,
    /// Receives only the category hint and has to blend in.
    Impostor,
}

impl Role {
    /// Returns true for [`Role::Impostor`].
    pub fn is_impostor(self) -> bool {
        matches!(self, Role::Impostor)
    }
}

/// A seat at the shared device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// 1-based display ordinal.
    index: usize,
    role: Role,
    revealed: bool,
}

impl Player {
    /// Creates an unrevealed civilian with the given display ordinal.
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            role: Role::Civilian,
            revealed: false,
        }
    }

    /// Returns the 1-based display ordinal.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the player's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns true once the player has acknowledged their reveal.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn make_impostor(&mut self) {
        self.role = Role::Impostor;
    }

    /// Flags the player as revealed. There is no way back.
    pub(crate) fn mark_revealed(&mut self) {
        self.revealed = true;
    }
}

/// Public, role-free view of a player for the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// 1-based display ordinal.
    pub ordinal: usize,
    /// Whether this seat has already seen its role.
    pub revealed: bool,
}

impl From<&Player> for PlayerSlot {
    fn from(player: &Player) -> Self {
        Self {
            ordinal: player.index(),
            revealed: player.revealed(),
        }
    }
}
