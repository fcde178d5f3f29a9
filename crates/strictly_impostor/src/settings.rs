//! Persisted user preferences and the key-value stores that hold them.
//!
//! Every setting lives under its own key as a JSON-encoded string. The
//! stores know nothing about the values; [`Settings::load`] owns decoding
//! and the recovery policy for absent, malformed or out-of-bounds entries.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use derive_getters::Getters;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::{MAX_PLAYERS, MIN_PLAYERS, StoreError, WordBank};

/// Default number of players.
pub const DEFAULT_PLAYER_COUNT: usize = 3;

/// Default number of impostors.
pub const DEFAULT_IMPOSTOR_COUNT: usize = 1;

/// Key of a persisted setting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum SettingKey {
    /// Number of players.
    PlayerCount,
    /// Number of impostors.
    ImpostorCount,
    /// Show the category name on the reveal screen.
    DisplayCategory,
    /// Show the hint to impostors.
    DisplayImpostorHint,
    /// Category keys the word is drawn from.
    EnabledCategories,
}

/// Key-value capability the controller persists preferences through.
pub trait SettingsStore: std::fmt::Debug {
    /// Returns the raw stored value, if any.
    fn get(&self, key: SettingKey) -> Option<String>;

    /// Stores a raw value under `key`.
    fn set(&mut self, key: SettingKey, value: String) -> Result<(), StoreError>;
}

/// In-process store; forgets everything on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<SettingKey, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for seeding tests.
    pub fn with(mut self, key: SettingKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: SettingKey, value: String) -> Result<(), StoreError> {
        self.values.insert(key, value);
        Ok(())
    }
}

/// Store backed by a TOML file of `key = "json"` entries.
///
/// The file is rewritten on every [`SettingsStore::set`].
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file is an empty store.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<BTreeMap<String, String>>(&content) {
                Ok(mut values) => {
                    values.retain(|key, _| {
                        let known = key.parse::<SettingKey>().is_ok();
                        if !known {
                            warn!(%key, "Dropping unknown setting");
                        }
                        known
                    });
                    info!(entries = values.len(), "Settings file loaded");
                    values
                }
                Err(e) => {
                    warn!(error = %e, "Settings file is malformed, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) => {
                debug!(error = %e, "No readable settings file, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: SettingKey) -> Option<String> {
        self.values.get(key.as_ref()).cloned()
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&mut self, key: SettingKey, value: String) -> Result<(), StoreError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value);
        let content = toml::to_string(&values)?;
        std::fs::write(&self.path, content)?;
        self.values = values;
        debug!(%key, "Setting written");
        Ok(())
    }
}

/// User preferences read at startup and written on change.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Settings {
    pub(crate) player_count: usize,
    pub(crate) impostor_count: usize,
    pub(crate) display_category: bool,
    pub(crate) display_impostor_hint: bool,
    pub(crate) enabled_categories: BTreeSet<String>,
}

impl Settings {
    /// Default preferences for `bank`: every category enabled.
    #[instrument(skip(bank))]
    pub fn defaults(bank: &WordBank) -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            impostor_count: DEFAULT_IMPOSTOR_COUNT,
            display_category: false,
            display_impostor_hint: true,
            enabled_categories: bank.categories().into_iter().collect(),
        }
    }

    /// Reads every setting from `store`, substituting defaults for values
    /// that are absent, malformed or out of bounds.
    #[instrument(skip(store, bank))]
    pub fn load(store: &dyn SettingsStore, bank: &WordBank) -> Self {
        let defaults = Self::defaults(bank);

        let player_count = read::<i64>(store, SettingKey::PlayerCount)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| (MIN_PLAYERS..=MAX_PLAYERS).contains(n))
            .unwrap_or(defaults.player_count);

        let impostor_count = read::<i64>(store, SettingKey::ImpostorCount)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n >= 1 && *n < player_count)
            .unwrap_or(defaults.impostor_count);

        let display_category =
            read::<bool>(store, SettingKey::DisplayCategory).unwrap_or(defaults.display_category);

        let display_impostor_hint = read::<bool>(store, SettingKey::DisplayImpostorHint)
            .unwrap_or(defaults.display_impostor_hint);

        let enabled_categories = read::<Vec<String>>(store, SettingKey::EnabledCategories)
            .map(|keys| {
                keys.into_iter()
                    .filter(|key| bank.has_category(key))
                    .collect::<BTreeSet<_>>()
            })
            .unwrap_or(defaults.enabled_categories);

        let settings = Self {
            player_count,
            impostor_count,
            display_category,
            display_impostor_hint,
            enabled_categories,
        };
        info!(
            player_count,
            impostor_count,
            categories = settings.enabled_categories.len(),
            "Settings loaded"
        );
        settings
    }

    /// JSON encoding of the value stored under `key`.
    #[instrument(skip(self))]
    pub fn encode(&self, key: SettingKey) -> Result<String, StoreError> {
        let encoded = match key {
            SettingKey::PlayerCount => serde_json::to_string(&self.player_count)?,
            SettingKey::ImpostorCount => serde_json::to_string(&self.impostor_count)?,
            SettingKey::DisplayCategory => serde_json::to_string(&self.display_category)?,
            SettingKey::DisplayImpostorHint => {
                serde_json::to_string(&self.display_impostor_hint)?
            }
            SettingKey::EnabledCategories => serde_json::to_string(&self.enabled_categories)?,
        };
        Ok(encoded)
    }

    /// Writes the value under `key` to `store`.
    #[instrument(skip(self, store))]
    pub fn save(&self, key: SettingKey, store: &mut dyn SettingsStore) -> Result<(), StoreError> {
        store.set(key, self.encode(key)?)
    }
}

/// Decodes one stored value, treating malformed JSON as absent.
#[instrument(skip(store))]
fn read<T: DeserializeOwned>(store: &dyn SettingsStore, key: SettingKey) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(%key, error = %e, "Discarding malformed setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_empty_store_yields_defaults() {
        let bank = WordBank::builtin();
        let settings = Settings::load(&MemoryStore::new(), &bank);
        assert_eq!(settings, Settings::defaults(&bank));
        assert_eq!(*settings.player_count(), 3);
        assert_eq!(*settings.impostor_count(), 1);
        assert!(!*settings.display_category());
        assert!(*settings.display_impostor_hint());
        assert_eq!(settings.enabled_categories().len(), bank.categories().len());
    }

    #[test]
    fn test_out_of_bounds_player_count_replaced() {
        let bank = WordBank::builtin();
        for raw in ["2", "13", "-4", "\"seven\"", "{"] {
            let store = MemoryStore::new().with(SettingKey::PlayerCount, raw);
            let settings = Settings::load(&store, &bank);
            assert_eq!(*settings.player_count(), DEFAULT_PLAYER_COUNT, "raw = {raw}");
        }
    }

    #[test]
    fn test_impostor_count_checked_against_loaded_player_count() {
        let bank = WordBank::builtin();
        let store = MemoryStore::new()
            .with(SettingKey::PlayerCount, "6")
            .with(SettingKey::ImpostorCount, "5");
        let settings = Settings::load(&store, &bank);
        assert_eq!(*settings.impostor_count(), 5);

        let store = MemoryStore::new()
            .with(SettingKey::PlayerCount, "6")
            .with(SettingKey::ImpostorCount, "6");
        assert_eq!(*Settings::load(&store, &bank).impostor_count(), 1);

        let store = MemoryStore::new().with(SettingKey::ImpostorCount, "0");
        assert_eq!(*Settings::load(&store, &bank).impostor_count(), 1);
    }

    #[test]
    fn test_unknown_categories_dropped() {
        let bank = WordBank::builtin();
        let store = MemoryStore::new().with(
            SettingKey::EnabledCategories,
            r#"["food", "dinosaurs"]"#,
        );
        let settings = Settings::load(&store, &bank);
        let expected: BTreeSet<String> = ["food".to_string()].into_iter().collect();
        assert_eq!(settings.enabled_categories(), &expected);
    }

    #[test]
    fn test_empty_category_set_is_kept() {
        let bank = WordBank::builtin();
        let store = MemoryStore::new().with(SettingKey::EnabledCategories, "[]");
        assert!(Settings::load(&store, &bank).enabled_categories().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let bank = WordBank::builtin();
        let mut settings = Settings::defaults(&bank);
        settings.player_count = 8;
        settings.impostor_count = 3;
        settings.display_category = true;

        let mut store = MemoryStore::new();
        for key in SettingKey::iter() {
            settings.save(key, &mut store).expect("memory store never fails");
        }
        assert_eq!(Settings::load(&store, &bank), settings);
    }

    #[test]
    fn test_setting_key_names() {
        assert_eq!(SettingKey::PlayerCount.to_string(), "playerCount");
        assert_eq!(SettingKey::DisplayImpostorHint.as_ref(), "displayImpostorHint");
        assert_eq!(
            "enabledCategories".parse::<SettingKey>(),
            Ok(SettingKey::EnabledCategories)
        );
        assert!("EnabledCategories".parse::<SettingKey>().is_err());
    }
}
