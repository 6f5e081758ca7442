//! Integration tests for a full round sequence through the public API

use std::time::Duration;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tapreflex::app::{summary_text, AppState, StateManager};
use tapreflex::config::GameConfig;
use tapreflex::game::{AreaSize, GameEngine, GamePhase};
use tokio::time::sleep;

fn engine(config: GameConfig) -> GameEngine {
    GameEngine::with_rng(config, SmallRng::seed_from_u64(1))
}

#[tokio::test(start_paused = true)]
async fn test_full_sequence_then_reset() {
    let engine = engine(GameConfig::default());
    let mut screens = StateManager::new();
    let area = AreaSize::new(200.0, 200.0);

    screens.sync_with(engine.snapshot().phase);
    assert_eq!(screens.current_state(), AppState::Start);

    engine.start().await;
    screens.sync_with(engine.snapshot().phase);
    assert_eq!(screens.current_state(), AppState::Playing);

    for gap in [100, 150, 150, 300, 50] {
        sleep(Duration::from_millis(gap)).await;
        engine.record_tap(area).await;
    }

    let snapshot = engine.snapshot();
    screens.sync_with(snapshot.phase);
    assert_eq!(screens.current_state(), AppState::Results);
    assert_eq!(snapshot.min_latency(), Some(Duration::from_millis(50)));
    assert_eq!(snapshot.average_latency(), Duration::from_millis(150));
    assert!(summary_text(&snapshot).contains("Tap 5     Time: 50 ms *"));

    engine.reset().await;
    screens.sync_with(engine.snapshot().phase);
    assert_eq!(screens.current_state(), AppState::Start);
    assert!(!engine.has_pending_relocate().await);
}

#[tokio::test(start_paused = true)]
async fn test_configured_rounds_and_delay() {
    let config = GameConfig::new()
        .with_total_rounds(2)
        .with_auto_relocate_delay(Duration::from_millis(500));
    let engine = engine(config);
    engine.resize(AreaSize::new(800.0, 800.0)).await;
    engine.start().await;

    // Two auto-relocations happen without any tap being recorded
    let first = engine.snapshot().target;
    sleep(Duration::from_millis(501)).await;
    let second = engine.snapshot().target;
    assert_ne!(first, second);
    sleep(Duration::from_millis(500)).await;
    assert_ne!(engine.snapshot().target, second);
    assert_eq!(engine.snapshot().round_index, 0);

    // The last relocation at 1000ms opened the round
    sleep(Duration::from_millis(39)).await;
    assert_eq!(engine.record_tap(AreaSize::new(800.0, 800.0)).await, Some(Duration::from_millis(40)));
    engine.record_tap(AreaSize::new(800.0, 800.0)).await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, GamePhase::Complete);
    assert_eq!(snapshot.latencies.len(), 2);
    assert!(!snapshot.relocate_pending);
}

#[tokio::test(start_paused = true)]
async fn test_start_mid_sequence_keeps_progress() {
    let engine = engine(GameConfig::default());
    let area = AreaSize::new(400.0, 400.0);

    engine.start().await;
    sleep(Duration::from_millis(100)).await;
    engine.record_tap(area).await;

    sleep(Duration::from_millis(400)).await;
    engine.start().await;
    sleep(Duration::from_millis(60)).await;
    engine.record_tap(area).await;

    let latencies: Vec<u128> = engine.snapshot().latencies.iter().map(|d| d.as_millis()).collect();
    assert_eq!(latencies, vec![100, 60]);
}
