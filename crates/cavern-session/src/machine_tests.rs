//! Unit tests for the session state machine.

use super::*;
use cavern_audio::NullSink;
use cavern_biome::{BiomeRegistry, HeadlessEffects};
use cavern_config::AudioConfig;
use cavern_input::Signal;
use cavern_level::{EnemyKind, EnemyPlacement, LegacyOverrides, PlatformSegment};
use cavern_storage::MemoryStorage;

const EXIT: Vec2 = Vec2::new(700.0, 550.0);

fn sample_level(name: &str, collectibles: usize, biome: Option<BiomeId>) -> LevelDefinition {
    LevelDefinition {
        name: name.to_string(),
        biome,
        platforms: vec![PlatformSegment {
            x: 0.0,
            y: 584.0,
            width: 800.0,
        }],
        collectibles: (0..collectibles)
            .map(|i| Vec2::new(100.0 + 50.0 * i as f32, 500.0))
            .collect(),
        air_capsules: vec![Vec2::new(400.0, 300.0)],
        enemies: vec![EnemyPlacement {
            position: Vec2::new(300.0, 550.0),
            kind: EnemyKind::EnemyOne,
            velocity: 60.0,
            tint: None,
        }],
        player_start: Vec2::new(50.0, 550.0),
        exit: EXIT,
        legacy: LegacyOverrides::default(),
    }
}

fn services() -> SessionServices {
    SessionServices {
        stage: BiomeStage::new(BiomeRegistry::builtin(), Box::new(HeadlessEffects::new())),
        audio: AudioDirector::new(
            Box::new(NullSink),
            Box::new(MemoryStorage::new()),
            AudioConfig::default(),
        ),
        high_scores: HighScoreTable::new(Box::new(MemoryStorage::new())),
    }
}

fn session_with(config: &Config, levels: Vec<LevelDefinition>) -> SessionStateMachine {
    let catalog = LevelCatalog::from_levels(levels).unwrap();
    SessionStateMachine::new(config, catalog, services()).unwrap()
}

/// Three one-collectible levels, default config. The start notice is drained.
fn session() -> SessionStateMachine {
    let mut session = session_with(
        &Config::default(),
        vec![
            sample_level("One", 1, None),
            sample_level("Two", 1, Some(BiomeId::Toxic)),
            sample_level("Three", 1, Some(BiomeId::Arctic)),
        ],
    );
    session.tick(&TickInput::idle(0.0), &SignalState::new());
    session
}

fn idle() -> SignalState {
    SignalState::new()
}

fn pressed(signal: Signal) -> SignalState {
    let mut signals = SignalState::new();
    signals.press(signal);
    signals
}

/// Held since an earlier tick, so no press edge.
fn held(signal: Signal) -> SignalState {
    let mut signals = pressed(signal);
    signals.clear_transients();
    signals
}

/// Collect the level's only item while standing on the exit.
fn win_level(session: &mut SessionStateMachine) -> Vec<SessionNotice> {
    let input = TickInput::idle(0.016)
        .at(EXIT)
        .with_event(GameplayEvent::CollectiblePicked(0));
    session.tick(&input, &idle())
}

fn enemy_hit(session: &mut SessionStateMachine) -> Vec<SessionNotice> {
    let input = TickInput::idle(0.016).with_event(GameplayEvent::EnemyContact);
    session.tick(&input, &idle())
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_first_tick_reports_level_loaded() {
    let mut session = session_with(&Config::default(), vec![sample_level("One", 1, None)]);
    let notices = session.tick(&TickInput::idle(0.0), &idle());
    assert_eq!(
        notices[0],
        SessionNotice::LevelLoaded {
            index: 0,
            name: "One".to_string(),
            biome: BiomeId::Cavern,
        }
    );
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.air(), 100.0);
    assert_eq!(session.lives().current(), 3);
    assert!(session.audio().is_music_playing());
    assert_eq!(session.stage().current().map(|b| &b.id), Some(&BiomeId::Cavern));
}

#[test]
fn test_invalid_start_level_rejected() {
    let mut config = Config::default();
    config.session.start_level = 5;
    let catalog = LevelCatalog::from_levels(vec![sample_level("One", 1, None)]).unwrap();
    let result = SessionStateMachine::new(&config, catalog, services());
    assert!(matches!(
        result,
        Err(SessionError::InvalidLevelIndex { index: 5, count: 1 })
    ));
}

#[test]
fn test_builtin_catalog_session_starts() {
    let session =
        SessionStateMachine::new(&Config::default(), LevelCatalog::builtin(), services()).unwrap();
    assert_eq!(session.current_level().map(|l| l.name.as_str()), Some("Central Cavern"));
    assert_eq!(session.entities().remaining_collectibles(), 20);
}

#[test]
fn test_construction_loads_start_level_once() {
    let mut config = Config::default();
    config.session.start_level = 1;
    let session = session_with(
        &config,
        vec![
            sample_level("One", 1, None),
            sample_level("Two", 3, Some(BiomeId::Toxic)),
        ],
    );
    assert_eq!(session.entities().generation(), 1);
    assert_eq!(session.entities().remaining_collectibles(), 3);
    assert_eq!(session.biome().id, BiomeId::Toxic);
    assert_eq!(session.level_index(), 1);
}

// ---------------------------------------------------------------------------
// Winning
// ---------------------------------------------------------------------------

#[test]
fn test_single_collectible_transitions_exactly_once() {
    let mut session = session();
    let notices = win_level(&mut session);
    assert!(notices.contains(&SessionNotice::ItemCollected {
        score: 100,
        remaining: 0
    }));
    assert!(notices.contains(&SessionNotice::ExitRevealed));
    assert!(notices.contains(&SessionNotice::LevelComplete { index: 0 }));
    assert!(session.entities().are_all_collected());
    assert!(session.is_transitioning());

    let again = win_level(&mut session);
    assert!(again.is_empty());
    assert_eq!(session.phase(), Phase::LevelTransition);
    assert_eq!(session.score(), 100);
}

#[test]
fn test_exit_hidden_until_all_collected() {
    let mut session = session_with(&Config::default(), vec![sample_level("Two", 2, None)]);
    let input = TickInput::idle(0.016)
        .at(EXIT)
        .with_event(GameplayEvent::CollectiblePicked(0));
    let notices = session.tick(&input, &idle());
    assert!(!notices.contains(&SessionNotice::ExitRevealed));
    assert_eq!(session.phase(), Phase::Playing);
    assert!(!session.entities().exit.visible);
}

#[test]
fn test_exit_revealed_once_per_load() {
    let mut session = session_with(&Config::default(), vec![sample_level("Solo", 1, None)]);
    let away = Vec2::new(50.0, 550.0);
    let first = session.tick(
        &TickInput::idle(0.016)
            .at(away)
            .with_event(GameplayEvent::CollectiblePicked(0)),
        &idle(),
    );
    assert!(first.contains(&SessionNotice::ExitRevealed));
    let second = session.tick(&TickInput::idle(0.016).at(away), &idle());
    assert!(!second.contains(&SessionNotice::ExitRevealed));
}

#[test]
fn test_transition_delay_then_next_level() {
    let mut session = session();
    let generation = session.entities().generation();
    win_level(&mut session);

    assert!(session.tick(&TickInput::idle(1.0), &idle()).is_empty());
    assert!(session.is_transitioning());

    let notices = session.tick(&TickInput::idle(1.0), &idle());
    assert_eq!(
        notices,
        vec![SessionNotice::LevelLoaded {
            index: 1,
            name: "Two".to_string(),
            biome: BiomeId::Toxic,
        }]
    );
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.level_index(), 1);
    assert_eq!(session.score(), 100);
    assert_eq!(session.lives().current(), 3);
    assert_eq!(session.air(), 100.0);
    assert!(session.entities().generation() > generation);
    assert!(!session.entities().exit.visible);
    assert_eq!(session.biome().id, BiomeId::Toxic);
}

#[test]
fn test_lives_carry_into_next_level() {
    let mut session = session();
    enemy_hit(&mut session);
    session.tick(&TickInput::idle(0.5), &pressed(Signal::Acknowledge));
    assert_eq!(session.lives().current(), 2);

    win_level(&mut session);
    session.tick(&TickInput::idle(2.0), &idle());
    assert_eq!(session.level_index(), 1);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.lives().current(), 2);
    assert_eq!(session.air(), 100.0);
}

#[test]
fn test_acknowledge_ignored_during_transition() {
    let mut session = session();
    win_level(&mut session);
    let notices = session.tick(&TickInput::idle(0.1), &pressed(Signal::Acknowledge));
    assert!(notices.is_empty());
    assert_eq!(session.phase(), Phase::LevelTransition);
    assert_eq!(session.level_index(), 0);
}

#[test]
fn test_drain_stops_outside_playing() {
    let mut session = session();
    win_level(&mut session);
    let air = session.air();
    session.tick(&TickInput::idle(1.5), &idle());
    assert_eq!(session.air(), air);
}

// ---------------------------------------------------------------------------
// Losing
// ---------------------------------------------------------------------------

#[test]
fn test_last_life_enemy_contact_is_game_over() {
    let mut config = Config::default();
    config.session.max_lives = 1;
    let mut session = session_with(&config, vec![sample_level("One", 1, None)]);
    let notices = enemy_hit(&mut session);

    assert_eq!(session.phase(), Phase::GameOverPending);
    assert_eq!(session.lives().current(), 0);
    assert!(!session.lives().has_lives_remaining());
    assert!(session.is_game_ended());
    assert!(notices.contains(&SessionNotice::GameOver {
        reason: LossReason::Enemy,
        score: 0
    }));
    assert!(!session.audio().is_music_playing());
}

#[test]
fn test_life_lost_continue_preserves_score() {
    let mut session = session_with(&Config::default(), vec![sample_level("Pair", 2, None)]);
    session.tick(
        &TickInput::idle(0.016).with_event(GameplayEvent::CollectiblePicked(0)),
        &idle(),
    );
    let generation = session.entities().generation();
    let notices = session.tick(
        &TickInput::idle(0.016).with_event(GameplayEvent::HazardContact),
        &idle(),
    );
    assert!(notices.contains(&SessionNotice::LifeLost {
        lives: 2,
        reason: LossReason::Hazard
    }));
    assert_eq!(session.phase(), Phase::LifeLostPending);

    let notices = session.tick(&TickInput::idle(0.5), &pressed(Signal::Acknowledge));
    assert!(matches!(notices[0], SessionNotice::LevelLoaded { index: 0, .. }));
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.score(), 100);
    assert_eq!(session.lives().current(), 2);
    assert_eq!(session.air(), 100.0);
    assert_eq!(session.entities().remaining_collectibles(), 2);
    assert!(session.entities().generation() > generation);
    assert_eq!(session.player().position, Vec2::new(50.0, 550.0));
}

#[test]
fn test_acknowledge_suppressed_right_after_loss() {
    let mut session = session();
    enemy_hit(&mut session);

    let notices = session.tick(&TickInput::idle(0.1), &pressed(Signal::Acknowledge));
    assert!(notices.is_empty());
    assert_eq!(session.phase(), Phase::LifeLostPending);

    // window elapses but nothing was pressed on this tick
    session.tick(&TickInput::idle(0.5), &held(Signal::Acknowledge));
    assert_eq!(session.phase(), Phase::LifeLostPending);

    session.tick(&TickInput::idle(0.0), &pressed(Signal::Acknowledge));
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn test_events_after_loss_ignored() {
    let mut session = session();
    let input = TickInput::idle(0.016)
        .at(EXIT)
        .with_event(GameplayEvent::EnemyContact)
        .with_event(GameplayEvent::CollectiblePicked(0))
        .with_event(GameplayEvent::EnemyContact);
    session.tick(&input, &idle());
    assert_eq!(session.lives().current(), 2);
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase(), Phase::LifeLostPending);
}

#[test]
fn test_running_out_of_air_loses_a_life() {
    let mut session = session();
    session.tick(&TickInput::idle(49.0), &idle());
    assert_eq!(session.air(), 2.0);
    assert_eq!(session.phase(), Phase::Playing);

    let notices = session.tick(&TickInput::idle(1.0), &idle());
    assert_eq!(session.air(), 0.0);
    assert!(notices.contains(&SessionNotice::LifeLost {
        lives: 2,
        reason: LossReason::OutOfAir
    }));
}

#[test]
fn test_non_finite_frame_time_is_a_no_op() {
    let mut session = session();
    for dt in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
        assert!(session.tick(&TickInput::idle(dt), &idle()).is_empty());
    }
    assert_eq!(session.air(), 100.0);
    assert_eq!(session.phase(), Phase::Playing);

    win_level(&mut session);
    session.tick(&TickInput::idle(f32::INFINITY), &idle());
    assert!(session.is_transitioning());
}

#[test]
fn test_huge_frame_time_drains_without_hanging() {
    let mut session = session();
    let notices = session.tick(&TickInput::idle(1.0e8), &idle());
    assert_eq!(session.air(), 0.0);
    assert!(notices.contains(&SessionNotice::LifeLost {
        lives: 2,
        reason: LossReason::OutOfAir
    }));
}

#[test]
fn test_biome_scales_air_drain() {
    let mut session = session();
    session.skip_to_level(1).unwrap();
    assert_eq!(session.biome().id, BiomeId::Toxic);
    session.tick(&TickInput::idle(0.5), &idle());
    assert_eq!(session.air(), 100.0);
    session.tick(&TickInput::idle(0.5), &idle());
    assert_eq!(session.air(), 96.0);
}

#[test]
fn test_capsule_restores_air_without_score() {
    let mut session = session();
    session.tick(&TickInput::idle(10.0), &idle());
    assert_eq!(session.air(), 80.0);
    let notices = session.tick(
        &TickInput::idle(0.0).with_event(GameplayEvent::CapsulePicked(0)),
        &idle(),
    );
    assert_eq!(notices, vec![SessionNotice::AirRestored { air: 100.0 }]);
    assert_eq!(session.score(), 0);

    let repeat = session.tick(
        &TickInput::idle(0.0).with_event(GameplayEvent::CapsulePicked(0)),
        &idle(),
    );
    assert!(repeat.is_empty());
}

// ---------------------------------------------------------------------------
// Debug overrides
// ---------------------------------------------------------------------------

#[test]
fn test_collision_disabled_ignores_losses() {
    let mut config = Config::default();
    config.debug.collision_enabled = false;
    let mut session = session_with(&config, vec![sample_level("One", 1, None)]);

    enemy_hit(&mut session);
    session.tick(
        &TickInput::idle(0.016).with_event(GameplayEvent::HazardContact),
        &idle(),
    );
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.lives().current(), 3);

    // air still drains and stays at zero
    session.tick(&TickInput::idle(60.0), &idle());
    session.tick(&TickInput::idle(1.0), &idle());
    assert_eq!(session.air(), 0.0);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn test_unlimited_lives_keeps_counter() {
    let mut config = Config::default();
    config.debug.unlimited_lives = true;
    config.session.max_lives = 1;
    let mut session = session_with(&config, vec![sample_level("One", 1, None)]);

    let notices = enemy_hit(&mut session);
    assert_eq!(session.lives().current(), 1);
    assert_eq!(session.phase(), Phase::LifeLostPending);
    assert!(notices.contains(&SessionNotice::LifeLost {
        lives: 1,
        reason: LossReason::Enemy
    }));
}

#[test]
fn test_overrides_switch_at_runtime() {
    let mut session = session();
    session.set_debug_overrides(DebugOverrides {
        collision_enabled: false,
        ..DebugOverrides::default()
    });
    enemy_hit(&mut session);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn test_debug_menu_skips_levels() {
    let mut config = Config::default();
    config.debug.debug_menu = true;
    let mut session = session_with(
        &config,
        vec![sample_level("One", 1, None), sample_level("Two", 1, None)],
    );
    session.tick(&TickInput::idle(0.0), &idle());

    let notices = session.tick(&TickInput::idle(0.016), &pressed(Signal::MenuToggle));
    assert_eq!(notices, vec![SessionNotice::DebugMenuToggled(true)]);
    assert!(session.is_menu_open());

    let notices = session.tick(&TickInput::idle(0.016), &pressed(Signal::Digit(2)));
    assert!(matches!(notices[0], SessionNotice::LevelLoaded { index: 1, .. }));
    assert_eq!(session.level_index(), 1);
    assert!(!session.is_menu_open());

    // out of range digit keeps the level
    session.tick(&TickInput::idle(0.016), &pressed(Signal::MenuToggle));
    session.tick(&TickInput::idle(0.016), &pressed(Signal::Digit(9)));
    assert_eq!(session.level_index(), 1);
}

#[test]
fn test_debug_menu_disabled_by_default() {
    let mut session = session();
    let notices = session.tick(&TickInput::idle(0.016), &pressed(Signal::MenuToggle));
    assert!(notices.is_empty());
    assert!(!session.is_menu_open());
}

// ---------------------------------------------------------------------------
// Skip / restart
// ---------------------------------------------------------------------------

#[test]
fn test_skip_out_of_range_changes_nothing() {
    let mut session = session();
    session.tick(
        &TickInput::idle(3.0).with_event(GameplayEvent::CollectiblePicked(0)),
        &idle(),
    );
    let generation = session.entities().generation();
    let air = session.air();

    let result = session.skip_to_level(3);
    assert_eq!(
        result,
        Err(SessionError::InvalidLevelIndex { index: 3, count: 3 })
    );
    assert_eq!(session.level_index(), 0);
    assert_eq!(session.entities().generation(), generation);
    assert_eq!(session.air(), air);
    assert_eq!(session.score(), 100);
}

#[test]
fn test_skip_preserves_score_and_lives() {
    let mut session = session();
    session.tick(
        &TickInput::idle(0.0).with_event(GameplayEvent::CollectiblePicked(0)),
        &idle(),
    );
    enemy_hit(&mut session);
    let loaded = session.skip_to_level(2).unwrap();
    assert!(matches!(loaded, SessionNotice::LevelLoaded { index: 2, .. }));
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.score(), 100);
    assert_eq!(session.lives().current(), 2);
}

#[test]
fn test_restart_resets_score_and_lives() {
    let mut session = session();
    win_level(&mut session);
    session.tick(&TickInput::idle(2.0), &idle());
    enemy_hit(&mut session);
    assert_eq!(session.score(), 100);
    assert_eq!(session.lives().current(), 2);

    let loaded = session.restart().unwrap();
    assert!(matches!(loaded, SessionNotice::LevelLoaded { index: 0, .. }));
    assert_eq!(session.score(), 0);
    assert_eq!(session.lives().current(), 3);
    assert_eq!(session.level_index(), 0);
    assert_eq!(session.phase(), Phase::Playing);
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

#[test]
fn test_final_level_completes_game() {
    let mut session = session();
    session.skip_to_level(2).unwrap();
    let notices = win_level(&mut session);
    assert!(notices.contains(&SessionNotice::GameComplete { score: 100 }));
    assert!(session.is_game_won());
    assert!(!session.audio().is_music_playing());

    // not a high score against the default table
    session.tick(&TickInput::idle(0.5), &idle());
    let notices = session.tick(&TickInput::idle(0.0), &pressed(Signal::Acknowledge));
    assert_eq!(
        notices,
        vec![SessionNotice::Terminal(TerminalOutcome::Title)]
    );
    assert_eq!(session.phase(), Phase::Terminal(TerminalOutcome::Title));
    assert!(session.stage().current().is_none());
    assert_eq!(session.stage().live_effects(), 0);
}

#[test]
fn test_qualifying_score_goes_to_name_entry() {
    let mut config = Config::default();
    config.session.collectible_score = 20000;
    let mut session = session_with(&config, vec![sample_level("Only", 1, None)]);
    win_level(&mut session);
    assert_eq!(session.phase(), Phase::GameComplete);

    session.tick(&TickInput::idle(0.6), &pressed(Signal::Acknowledge));
    assert_eq!(
        session.phase(),
        Phase::Terminal(TerminalOutcome::NameEntry { score: 20000 })
    );

    assert_eq!(session.submit_high_score("ab"), Ok(true));
    assert_eq!(session.phase(), Phase::Terminal(TerminalOutcome::Title));
    let top = &session.high_scores().high_scores()[0];
    assert_eq!((top.name.as_str(), top.score), ("AB__", 20000));

    assert_eq!(
        session.submit_high_score("again"),
        Err(SessionError::NoPendingHighScore)
    );
}

#[test]
fn test_game_over_acknowledged_to_title() {
    let mut config = Config::default();
    config.session.max_lives = 1;
    let mut session = session_with(&config, vec![sample_level("One", 1, None)]);
    enemy_hit(&mut session);
    session.tick(&TickInput::idle(1.0), &pressed(Signal::Acknowledge));
    assert_eq!(session.phase(), Phase::Terminal(TerminalOutcome::Title));

    // terminal ignores further input
    assert!(session.tick(&TickInput::idle(1.0), &pressed(Signal::Acknowledge)).is_empty());
    assert_eq!(session.submit_high_score("x"), Err(SessionError::NoPendingHighScore));
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

#[test]
fn test_tick_applies_surface_movement() {
    let mut session = session();
    let input = TickInput::idle(0.016).on(SurfaceKind::Ice);
    session.tick(&input, &pressed(Signal::Right));
    assert_eq!(session.player().velocity.x, 12.0);

    session.tick(&TickInput::idle(0.016).on(SurfaceKind::Brick), &pressed(Signal::Right));
    assert_eq!(session.player().velocity.x, 200.0);
}

#[test]
fn test_biome_speed_multiplier_reaches_player() {
    let mut session = session();
    session.skip_to_level(2).unwrap();
    let expected = 200.0 * session.biome().physics.player_speed_multiplier;
    session.tick(&TickInput::idle(0.016).on(SurfaceKind::Brick), &pressed(Signal::Left));
    assert!((session.player().velocity.x + expected).abs() < 1e-3);
}
