//! Tests for settings persistence through the controller.

use std::collections::BTreeSet;

use tempfile::TempDir;

use strictly_impostor::{
    ActionOutcome, FileStore, MemoryStore, SessionController, SettingKey, Settings,
    SettingsStore, WordBank,
};

#[test]
fn test_corrupted_impostor_count_corrected() {
    let store = MemoryStore::new()
        .with(SettingKey::PlayerCount, "5")
        .with(SettingKey::ImpostorCount, "99");
    let ctl = SessionController::with_seed(WordBank::builtin(), store, 1);

    assert_eq!(*ctl.settings().player_count(), 5);
    assert_eq!(*ctl.settings().impostor_count(), 1);
}

#[test]
fn test_setters_persist_only_their_key() {
    let mut ctl = SessionController::with_seed(WordBank::builtin(), MemoryStore::new(), 2);

    ctl.set_display_category(true);
    assert_eq!(
        ctl.store().get(SettingKey::DisplayCategory).as_deref(),
        Some("true")
    );
    assert!(ctl.store().get(SettingKey::PlayerCount).is_none());

    ctl.step_player_count(2);
    assert_eq!(ctl.store().get(SettingKey::PlayerCount).as_deref(), Some("5"));
    assert!(ctl.store().get(SettingKey::ImpostorCount).is_none());

    ctl.set_display_impostor_hint(false);
    assert_eq!(
        ctl.store().get(SettingKey::DisplayImpostorHint).as_deref(),
        Some("false")
    );
}

#[test]
fn test_unchanged_setting_not_written() {
    let mut ctl = SessionController::with_seed(WordBank::builtin(), MemoryStore::new(), 3);
    assert_eq!(ctl.set_display_impostor_hint(true), ActionOutcome::Ignored);
    assert!(ctl.store().get(SettingKey::DisplayImpostorHint).is_none());
}

#[test]
fn test_category_toggle_round_trips_through_store() {
    let mut ctl = SessionController::with_seed(WordBank::builtin(), MemoryStore::new(), 4);
    ctl.toggle_category("food");
    ctl.toggle_category("animals");

    let raw = ctl
        .store()
        .get(SettingKey::EnabledCategories)
        .expect("Categories persisted");
    let stored: BTreeSet<String> = serde_json::from_str(&raw).expect("JSON array");
    assert!(!stored.contains("food"));
    assert!(!stored.contains("animals"));
    assert_eq!(&stored, ctl.settings().enabled_categories());

    ctl.toggle_category("food");
    assert!(ctl.settings().enabled_categories().contains("food"));
}

#[test]
fn test_file_store_survives_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("settings.toml");
    let bank = WordBank::builtin();

    {
        let mut ctl = SessionController::with_seed(bank.clone(), FileStore::open(&path), 5);
        ctl.step_player_count(4);
        ctl.step_impostor_count(2);
        ctl.set_display_category(true);
    }

    let reopened = FileStore::open(&path);
    let settings = Settings::load(&reopened, &bank);
    assert_eq!(*settings.player_count(), 7);
    assert_eq!(*settings.impostor_count(), 3);
    assert!(*settings.display_category());
}

#[test]
fn test_file_store_ignores_malformed_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "this is = = not toml").expect("Write failed");

    let store = FileStore::open(&path);
    assert!(store.get(SettingKey::PlayerCount).is_none());

    let bank = WordBank::builtin();
    assert_eq!(Settings::load(&store, &bank), Settings::defaults(&bank));
}

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path().join("absent.toml"));
    assert!(store.get(SettingKey::EnabledCategories).is_none());
}

#[test]
fn test_failed_write_leaves_store_unchanged() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::open(dir.path().join("missing_dir").join("settings.toml"));

    assert!(store.set(SettingKey::PlayerCount, "6".to_string()).is_err());
    assert!(store.get(SettingKey::PlayerCount).is_none());
}

#[test]
fn test_file_store_drops_unknown_keys() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "playerCount = \"7\"\nfavouriteColour = \"\\\"blue\\\"\"\n")
        .expect("Write failed");

    let mut store = FileStore::open(&path);
    assert_eq!(store.get(SettingKey::PlayerCount).as_deref(), Some("7"));

    store
        .set(SettingKey::DisplayCategory, "true".to_string())
        .expect("Write succeeds");
    let written = std::fs::read_to_string(&path).expect("Read failed");
    assert!(written.contains("playerCount"));
    assert!(written.contains("displayCategory"));
    assert!(!written.contains("favouriteColour"));
}
