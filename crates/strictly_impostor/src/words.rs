//! Word bank: the read-only dataset of secret words and impostor hints.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use derive_getters::Getters;
use derive_new::new;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::WordBankError;

/// One dataset row: the civilians' word, the impostors' hint, and the
/// category that partitions the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct WordPair {
    secret: String,
    hint: String,
    category: String,
}

/// Built-in rows as `(category, secret, hint)`.
const BUILTIN_PAIRS: &[(&str, &str, &str)] = &[
    ("food", "Pizza", "Italian"),
    ("food", "Sushi", "Rice"),
    ("food", "Pancake", "Breakfast"),
    ("food", "Chocolate", "Sweet"),
    ("food", "Popcorn", "Cinema"),
    ("food", "Taco", "Shell"),
    ("animals", "Elephant", "Trunk"),
    ("animals", "Penguin", "Ice"),
    ("animals", "Kangaroo", "Pouch"),
    ("animals", "Octopus", "Tentacles"),
    ("animals", "Owl", "Night"),
    ("places", "Airport", "Travel"),
    ("places", "Library", "Quiet"),
    ("places", "Hospital", "Doctor"),
    ("places", "Beach", "Sand"),
    ("places", "Museum", "Exhibit"),
    ("sports", "Basketball", "Hoop"),
    ("sports", "Tennis", "Racket"),
    ("sports", "Surfing", "Wave"),
    ("sports", "Chess", "Board"),
    ("objects", "Umbrella", "Rain"),
    ("objects", "Laptop", "Keyboard"),
    ("objects", "Candle", "Wax"),
    ("objects", "Mirror", "Reflection"),
    ("objects", "Backpack", "School"),
    ("nature", "Volcano", "Lava"),
    ("nature", "Rainbow", "Colors"),
    ("nature", "Desert", "Cactus"),
    ("nature", "Waterfall", "Cliff"),
];

const BUILTIN_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("food", "Food"),
    ("animals", "Animals"),
    ("places", "Places"),
    ("sports", "Sports & Games"),
    ("objects", "Everyday Objects"),
    ("nature", "Nature"),
];

/// On-disk layout accepted by [`WordBank::from_file`].
#[derive(Debug, Deserialize)]
struct WordBankFile {
    pairs: Vec<WordPair>,
    #[serde(default)]
    display_names: BTreeMap<String, String>,
}

/// Ordered, read-only collection of [`WordPair`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    pairs: Vec<WordPair>,
    display_names: BTreeMap<String, String>,
}

impl WordBank {
    /// Creates a bank from rows, without display names.
    #[instrument(skip(pairs), fields(len = pairs.len()))]
    pub fn new(pairs: Vec<WordPair>) -> Self {
        Self {
            pairs,
            display_names: BTreeMap::new(),
        }
    }

    /// The dataset shipped with the game.
    #[instrument]
    pub fn builtin() -> Self {
        let pairs = BUILTIN_PAIRS
            .iter()
            .map(|(category, secret, hint)| {
                WordPair::new(secret.to_string(), hint.to_string(), category.to_string())
            })
            .collect();
        let display_names = BUILTIN_DISPLAY_NAMES
            .iter()
            .map(|(key, name)| (key.to_string(), name.to_string()))
            .collect();
        Self {
            pairs,
            display_names,
        }
    }

    /// Loads a bank from a TOML file of `[[pairs]]` tables.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WordBankError> {
        debug!("Loading word bank from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WordBankError::new(format!("Failed to read word bank: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses a bank from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, WordBankError> {
        let file: WordBankFile = toml::from_str(content)
            .map_err(|e| WordBankError::new(format!("Failed to parse word bank: {}", e)))?;

        if file.pairs.is_empty() {
            warn!("Word bank file contains no pairs");
            return Err(WordBankError::new("Word bank contains no pairs"));
        }

        info!(pairs = file.pairs.len(), "Word bank loaded");
        Ok(Self {
            pairs: file.pairs,
            display_names: file.display_names,
        })
    }

    /// All rows in dataset order.
    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    /// Distinct category keys in first-seen order.
    #[instrument(skip(self))]
    pub fn categories(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.pairs
            .iter()
            .filter(|pair| seen.insert(pair.category.as_str()))
            .map(|pair| pair.category.clone())
            .collect()
    }

    /// Returns true if any row belongs to `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.pairs.iter().any(|pair| pair.category == category)
    }

    /// Number of rows in `category`.
    #[instrument(skip(self))]
    pub fn count_for(&self, category: &str) -> usize {
        self.pairs
            .iter()
            .filter(|pair| pair.category == category)
            .count()
    }

    /// All rows whose category is enabled.
    #[instrument(skip(self, enabled))]
    pub fn pool(&self, enabled: &BTreeSet<String>) -> Vec<&WordPair> {
        self.pairs
            .iter()
            .filter(|pair| enabled.contains(&pair.category))
            .collect()
    }

    /// Human-readable category name; falls back to the key itself.
    pub fn display_name<'a>(&'a self, category: &'a str) -> &'a str {
        self.display_names
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }

    /// Picks one row uniformly from the enabled pool.
    ///
    /// Returns `None` when the pool is empty.
    #[instrument(skip(self, enabled, rng))]
    pub fn select<R: Rng + ?Sized>(
        &self,
        enabled: &BTreeSet<String>,
        rng: &mut R,
    ) -> Option<WordPair> {
        let pool = self.pool(enabled);
        debug!(pool_size = pool.len(), "Selecting word pair");
        pool.choose(rng).map(|pair| (*pair).clone())
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::builtin()
    }
}
