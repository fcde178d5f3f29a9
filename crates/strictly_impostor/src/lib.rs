//! Strictly Impostor - pass-and-play impostor word game logic
//!
//! A group shares one device. Each player privately views either the
//! secret word or, as an impostor, a category hint; the group then
//! discusses and votes out loud to find the impostors.
//!
//! # Architecture
//!
//! - **Controller**: [`SessionController`] owns the phase machine and the dealt round
//! - **Roles**: collision-free random choice of impostors
//! - **Reveal**: [`RevealGate`] keeps content hidden until an explicit tap
//! - **Settings**: [`Settings`] persisted through a [`SettingsStore`]
//! - **Words**: [`WordBank`] of secret/hint pairs partitioned by category
//!
//! # Example
//!
//! ```
//! use strictly_impostor::{MemoryStore, Phase, SessionController, WordBank};
//!
//! let mut session = SessionController::new(WordBank::builtin(), MemoryStore::new());
//! session.start_game().expect("default settings are valid");
//! assert_eq!(session.phase(), Phase::Players);
//!
//! session.pick_player(0);
//! session.tap_reveal();
//! session.acknowledge();
//! assert_eq!(session.revealed_count(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod error;
mod reveal;
mod roles;
mod round;
mod settings;
mod types;
mod words;

pub mod invariants;

// Crate-level exports - Errors
pub use error::{StoreError, ValidationError, WordBankError};

// Crate-level exports - Domain types
pub use types::{MAX_PLAYERS, MIN_PLAYERS, Player, PlayerSlot, Role};

// Crate-level exports - Word bank
pub use words::{WordBank, WordPair};

// Crate-level exports - Settings
pub use settings::{
    DEFAULT_IMPOSTOR_COUNT, DEFAULT_PLAYER_COUNT, FileStore, MemoryStore, SettingKey, Settings,
    SettingsStore,
};

// Crate-level exports - Setup
pub use config::GameConfig;
pub use roles::assign_roles;
pub use round::Round;

// Crate-level exports - Reveal gating
pub use reveal::{RevealContent, RevealGate, RevealOptions, RevealState, RevealView};

// Crate-level exports - Session controller
pub use controller::{Action, ActionOutcome, Phase, SessionController};
