//! Tests for the session phase machine.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use strictly_impostor::{
    Action, ActionOutcome, MemoryStore, Phase, RevealContent, RevealView, Role,
    SessionController, SettingKey, ValidationError, WordBank,
};

fn session(store: MemoryStore, seed: u64) -> SessionController {
    SessionController::with_seed(WordBank::builtin(), store, seed)
}

/// Picks, taps and acknowledges one seat.
fn reveal_seat(ctl: &mut SessionController, index: usize) {
    assert_eq!(ctl.pick_player(index), ActionOutcome::Applied);
    assert_eq!(ctl.tap_reveal(), ActionOutcome::Applied);
    assert_eq!(ctl.acknowledge(), ActionOutcome::Applied);
}

#[test]
fn test_food_scenario_initial_state() {
    let store = MemoryStore::new()
        .with(SettingKey::PlayerCount, "4")
        .with(SettingKey::ImpostorCount, "1")
        .with(SettingKey::EnabledCategories, r#"["food"]"#);
    let mut ctl = session(store, 1);

    ctl.start_game().expect("Valid configuration");

    assert_eq!(ctl.phase(), Phase::Players);
    let round = ctl.round().expect("Round dealt");
    assert_eq!(round.category(), "food");
    let pair = ctl
        .bank()
        .pool(ctl.settings().enabled_categories())
        .into_iter()
        .find(|p| p.secret() == round.secret_word())
        .expect("Secret comes from a food entry");
    assert_eq!(pair.hint(), round.impostor_hint());

    assert_eq!(round.impostor_indices().len(), 1);
    assert!(round.impostor_indices().iter().all(|i| *i < 4));
    let players = ctl.players();
    assert_eq!(players.len(), 4);
    assert!(players.iter().all(|p| !p.revealed));
    assert_eq!(
        players.iter().map(|p| p.ordinal).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn test_start_game_rejections_leave_no_session() {
    // Player count below range.
    let mut ctl = session(MemoryStore::new(), 2);
    ctl.set_player_count(2);
    assert_eq!(ctl.start_game(), Err(ValidationError::PlayerCountOutOfRange));
    assert_eq!(ctl.phase(), Phase::Config);
    assert!(ctl.round().is_none());

    // Player count above range.
    ctl.set_player_count(13);
    assert_eq!(ctl.start_game(), Err(ValidationError::PlayerCountOutOfRange));
    assert!(ctl.round().is_none());

    // Impostors equal to players.
    ctl.set_player_count(5);
    ctl.set_impostor_count(5);
    assert_eq!(ctl.start_game(), Err(ValidationError::ImpostorCountTooHigh));
    assert!(ctl.round().is_none());

    // No categories.
    ctl.set_impostor_count(1);
    for category in ctl.bank().categories() {
        ctl.toggle_category(&category);
    }
    assert!(ctl.settings().enabled_categories().is_empty());
    assert_eq!(ctl.start_game(), Err(ValidationError::NoCategoriesEnabled));
    assert_eq!(ctl.phase(), Phase::Config);
    assert!(ctl.round().is_none());

    // Fixing the configuration makes it start.
    ctl.finish_category_selection();
    assert_eq!(ctl.start_game(), Ok(ActionOutcome::Applied));
}

#[test]
fn test_reveal_gating_before_tap() {
    let mut ctl = session(MemoryStore::new().with(SettingKey::DisplayCategory, "true"), 3);
    ctl.start_game().expect("Valid configuration");
    let secret = ctl.round().expect("Round").secret_word().to_string();
    let hint = ctl.round().expect("Round").impostor_hint().to_string();

    ctl.pick_player(1);
    assert_eq!(ctl.phase(), Phase::Reveal);
    for _ in 0..5 {
        let view = ctl.reveal_view().expect("Reveal view");
        assert_eq!(view, RevealView::Hidden { ordinal: 2 });
        let rendered = format!("{:?}", view);
        assert!(!rendered.contains(&secret));
        assert!(!rendered.contains(&hint));
    }

    // "Got it" is inert while hidden.
    assert_eq!(ctl.acknowledge(), ActionOutcome::Ignored);
    assert_eq!(ctl.phase(), Phase::Reveal);
    assert_eq!(ctl.revealed_count(), 0);

    ctl.tap_reveal();
    match ctl.reveal_view().expect("Reveal view") {
        RevealView::Showing {
            ordinal, category, ..
        } => {
            assert_eq!(ordinal, 2);
            assert!(category.is_some());
        }
        RevealView::Hidden { .. } => panic!("Tap should show content"),
    }
}

#[test]
fn test_revealed_content_matches_role() {
    let store = MemoryStore::new()
        .with(SettingKey::PlayerCount, "6")
        .with(SettingKey::ImpostorCount, "2");
    let mut ctl = session(store, 8);
    ctl.start_game().expect("Valid configuration");

    for index in 0..6 {
        let role = ctl.round().expect("Round").players()[index].role();
        ctl.pick_player(index);
        ctl.tap_reveal();
        let view = ctl.reveal_view().expect("Reveal view");
        let round = ctl.round().expect("Round");
        match (role, view) {
            (
                Role::Civilian,
                RevealView::Showing {
                    content: RevealContent::Civilian { secret_word },
                    ..
                },
            ) => assert_eq!(secret_word, round.secret_word()),
            (
                Role::Impostor,
                RevealView::Showing {
                    content: RevealContent::Impostor { hint },
                    ..
                },
            ) => assert_eq!(hint.as_deref(), Some(round.impostor_hint())),
            (role, view) => panic!("Unexpected view {:?} for {}", view, role),
        }
        ctl.acknowledge();
    }
}

#[test]
fn test_new_pick_resets_gate_to_hidden() {
    let mut ctl = session(MemoryStore::new(), 4);
    ctl.start_game().expect("Valid configuration");

    reveal_seat(&mut ctl, 0);
    ctl.pick_player(1);
    assert_eq!(ctl.reveal_view(), Some(RevealView::Hidden { ordinal: 2 }));
}

#[test]
fn test_revealed_flag_is_monotonic() {
    let mut ctl = session(MemoryStore::new().with(SettingKey::PlayerCount, "4"), 5);
    ctl.start_game().expect("Valid configuration");

    reveal_seat(&mut ctl, 2);
    assert!(ctl.players()[2].revealed);

    // Picking a revealed seat is a silent no-op.
    assert_eq!(ctl.pick_player(2), ActionOutcome::Ignored);
    assert_eq!(ctl.phase(), Phase::Players);

    reveal_seat(&mut ctl, 0);
    reveal_seat(&mut ctl, 3);
    assert!(ctl.players()[2].revealed);
    assert_eq!(ctl.revealed_count(), 3);
}

#[test]
fn test_auto_advance_to_voting_in_any_order() {
    let orders = [[0, 1, 2], [2, 0, 1], [1, 2, 0]];
    for (seed, order) in orders.iter().enumerate() {
        let mut ctl = session(MemoryStore::new(), seed as u64);
        ctl.start_game().expect("Valid configuration");

        for (step, index) in order.iter().enumerate() {
            assert_eq!(ctl.phase(), Phase::Players);
            assert!(ctl.starting_player().is_none());
            reveal_seat(&mut ctl, *index);
            if step < 2 {
                assert_eq!(ctl.phase(), Phase::Players);
            }
        }

        assert_eq!(ctl.phase(), Phase::Voting);
        let starter = ctl.starting_player().expect("Starting player chosen");
        assert!((1..=3).contains(&starter));

        // Nothing re-fires the transition or redraws the starter.
        assert_eq!(ctl.acknowledge(), ActionOutcome::Ignored);
        assert_eq!(ctl.pick_player(0), ActionOutcome::Ignored);
        assert_eq!(ctl.phase(), Phase::Voting);
        assert_eq!(ctl.starting_player(), Some(starter));
    }
}

#[test]
fn test_every_seat_can_start_the_discussion() {
    let mut starters = BTreeSet::new();
    for seed in 0..60 {
        let mut ctl = session(MemoryStore::new(), seed);
        ctl.start_game().expect("Valid configuration");
        for index in 0..3 {
            reveal_seat(&mut ctl, index);
        }
        starters.insert(ctl.starting_player().expect("Starting player chosen"));
    }
    assert_eq!(starters, (1..=3).collect());
}

#[test]
fn test_results_disclose_impostors() {
    let store = MemoryStore::new()
        .with(SettingKey::PlayerCount, "5")
        .with(SettingKey::ImpostorCount, "2");
    let mut ctl = session(store, 6);
    ctl.start_game().expect("Valid configuration");
    for index in 0..5 {
        reveal_seat(&mut ctl, index);
    }
    assert!(ctl.impostor_ordinals().is_none());

    assert_eq!(ctl.reveal_results(), ActionOutcome::Applied);
    assert_eq!(ctl.phase(), Phase::Results);

    let expected: Vec<usize> = ctl
        .round()
        .expect("Round")
        .impostor_indices()
        .iter()
        .map(|i| i + 1)
        .collect();
    assert_eq!(ctl.impostor_ordinals(), Some(expected));
    assert_eq!(ctl.reveal_results(), ActionOutcome::Ignored);
}

#[test]
fn test_confirmed_reset_from_every_phase() {
    for target in Phase::iter() {
        let mut ctl = session(MemoryStore::new(), 10);
        if target != Phase::Config {
            ctl.start_game().expect("Valid configuration");
        }
        if matches!(target, Phase::Voting | Phase::Results) {
            for index in 0..3 {
                reveal_seat(&mut ctl, index);
            }
        }
        if target == Phase::Results {
            ctl.reveal_results();
        }
        if target == Phase::Reveal {
            ctl.pick_player(0);
            ctl.tap_reveal();
        }
        assert_eq!(ctl.phase(), target);

        // Confirm without request does nothing.
        assert_eq!(ctl.confirm_new_game(), ActionOutcome::Ignored);
        assert_eq!(ctl.phase(), target);

        // Cancel keeps everything.
        ctl.request_new_game();
        assert!(ctl.confirm_pending());
        ctl.cancel_new_game();
        assert_eq!(ctl.phase(), target);

        ctl.request_new_game();
        assert_eq!(ctl.confirm_new_game(), ActionOutcome::Applied);
        assert_eq!(ctl.phase(), Phase::Config);
        assert!(ctl.round().is_none());
        assert!(ctl.players().is_empty());
        assert!(ctl.reveal_view().is_none());
        assert!(ctl.starting_player().is_none());
        assert!(ctl.impostor_ordinals().is_none());
        assert!(!ctl.confirm_pending());
    }
}

#[test]
fn test_new_game_deals_fresh_round() {
    let mut ctl = session(MemoryStore::new(), 12);
    ctl.start_game().expect("Valid configuration");
    reveal_seat(&mut ctl, 0);

    ctl.apply(Action::RequestNewGame).expect("No validation");
    ctl.apply(Action::ConfirmNewGame).expect("No validation");
    ctl.apply(Action::StartGame).expect("Valid configuration");

    assert_eq!(ctl.phase(), Phase::Players);
    assert_eq!(ctl.revealed_count(), 0);
}

#[test]
fn test_apply_dispatches_full_round() {
    let mut ctl = session(MemoryStore::new(), 13);
    assert_eq!(ctl.apply(Action::StartGame), Ok(ActionOutcome::Applied));
    for index in 0..3 {
        for action in [Action::PickPlayer(index), Action::TapReveal, Action::Acknowledge] {
            assert_eq!(ctl.apply(action), Ok(ActionOutcome::Applied));
        }
    }
    assert_eq!(ctl.apply(Action::RevealResults), Ok(ActionOutcome::Applied));
    assert_eq!(ctl.phase(), Phase::Results);
}

#[test]
fn test_role_distribution_over_many_games() {
    let store = MemoryStore::new()
        .with(SettingKey::PlayerCount, "12")
        .with(SettingKey::ImpostorCount, "11");
    let mut ctl = session(store, 14);
    for _ in 0..20 {
        ctl.start_game().expect("Valid configuration");
        let round = ctl.round().expect("Round");
        let impostors: BTreeSet<usize> = round
            .players()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.role() == Role::Impostor)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(impostors.len(), 11);
        assert_eq!(&impostors, round.impostor_indices());

        ctl.request_new_game();
        ctl.confirm_new_game();
    }
}
