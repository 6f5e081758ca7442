//! Game engine
//!
//! Owns the game state and the single auto-relocate countdown. Every
//! mutation, including countdown expiry, goes through one async mutex so
//! operations run to completion one at a time. Observers receive immutable
//! snapshots through a watch channel.

use std::sync::{Arc, Weak};
use std::time::Duration;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace};
use crate::config::GameConfig;
use crate::game::state::{
    average_latency, min_latency, AreaSize, GamePhase, GameState, Offset,
};

/// Immutable view of the game published after every change
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub round_index: usize,
    pub total_rounds: usize,
    pub latencies: Vec<Duration>,
    pub target: Offset,
    pub target_diameter: f64,
    pub relocate_pending: bool,
}

impl GameSnapshot {
    pub fn is_complete(&self) -> bool {
        self.round_index >= self.total_rounds
    }

    pub fn min_latency(&self) -> Option<Duration> {
        min_latency(&self.latencies)
    }

    pub fn average_latency(&self) -> Duration {
        average_latency(&self.latencies)
    }
}

/// Handle to a spawned countdown; dropping it cancels the countdown
#[derive(Debug)]
struct ScheduledRelocate {
    generation: u64,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledRelocate {
    fn cancel(self) {
        trace!(generation = self.generation, "auto-relocate cancelled");
    }

    /// Release the handle from inside the task that has already fired
    fn finish(mut self) {
        self.cancel_tx = None;
        self.handle = None;
    }
}

impl Drop for ScheduledRelocate {
    fn drop(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(()); // Task may already be gone
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[derive(Debug)]
struct EngineInner {
    state: GameState,
    playable_area: AreaSize,
    rng: SmallRng,
    pending: Option<ScheduledRelocate>,
    generation: u64,
}

#[derive(Debug)]
struct Shared {
    config: GameConfig,
    inner: Mutex<EngineInner>,
    snapshot_tx: watch::Sender<GameSnapshot>,
}

/// Reaction game engine
///
/// Cheap to clone; clones share the same game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    shared: Arc<Shared>,
}

impl GameEngine {
    /// Create an idle engine with an entropy-seeded generator
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create an idle engine with the given generator
    pub fn with_rng(config: GameConfig, rng: SmallRng) -> Self {
        let state = GameState::new(config.total_rounds, config.target_diameter);
        let inner = EngineInner {
            state,
            playable_area: AreaSize::default(),
            rng,
            pending: None,
            generation: 0,
        };
        let (snapshot_tx, _) = watch::channel(Self::build_snapshot(&config, &inner));

        Self {
            shared: Arc::new(Shared {
                config,
                inner: Mutex::new(inner),
                snapshot_tx,
            }),
        }
    }

    /// Start (or restart the measurement window of) a round sequence
    pub async fn start(&self) {
        let mut inner = self.shared.inner.lock().await;
        let now = Instant::now();
        if inner.state.start(now) {
            self.arm_auto_relocate(&mut inner);
        }
        info!(round = inner.state.round_index(), "game started");
        self.publish(&inner);
    }

    /// Record a tap on the target within `area`.
    ///
    /// Returns the measured latency, or `None` when the tap was ignored.
    pub async fn record_tap(&self, area: AreaSize) -> Option<Duration> {
        let mut inner = self.shared.inner.lock().await;
        let now = Instant::now();

        let EngineInner { state, rng, .. } = &mut *inner;
        let latency = match state.record_tap(now, area, rng) {
            Some(latency) => latency,
            None => {
                debug!(phase = ?inner.state.phase(), "tap ignored");
                return None;
            }
        };
        inner.playable_area = area;

        info!(
            round = inner.state.round_index(),
            latency_ms = latency.as_millis() as u64,
            "tap recorded"
        );

        if inner.state.is_complete() {
            if let Some(task) = inner.pending.take() {
                task.cancel();
            }
            info!(
                average_ms = inner.state.average_latency().as_millis() as u64,
                "round sequence complete"
            );
        } else {
            self.arm_auto_relocate(&mut inner);
        }

        self.publish(&inner);
        Some(latency)
    }

    /// Cancel the countdown and return to idle
    pub async fn reset(&self) {
        let mut inner = self.shared.inner.lock().await;
        if let Some(task) = inner.pending.take() {
            task.cancel();
        }
        inner.state.reset();
        info!("game reset");
        self.publish(&inner);
    }

    /// Remember the playable area measured by the presentation layer.
    ///
    /// The next countdown expiry relocates within the new bounds.
    pub async fn resize(&self, area: AreaSize) {
        let mut inner = self.shared.inner.lock().await;
        if inner.playable_area != area {
            trace!(width = area.width, height = area.height, "playable area changed");
            inner.playable_area = area;
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Whether an auto-relocate countdown is outstanding
    pub async fn has_pending_relocate(&self) -> bool {
        self.shared.inner.lock().await.pending.is_some()
    }

    /// Cancel-then-schedule the single countdown.
    fn arm_auto_relocate(&self, inner: &mut EngineInner) {
        if let Some(task) = inner.pending.take() {
            task.cancel();
        }

        inner.generation += 1;
        let generation = inner.generation;
        let delay = self.shared.config.auto_relocate_delay;
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let weak = Arc::downgrade(&self.shared);

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    Self::fire_auto_relocate(weak, generation).await;
                }
                _ = &mut cancel_rx => {}
            }
        });

        trace!(generation, delay_ms = delay.as_millis() as u64, "auto-relocate armed");
        inner.pending = Some(ScheduledRelocate {
            generation,
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        });
    }

    /// Countdown expiry. Stale generations (cancelled after waking) and
    /// dropped engines are ignored. The target moves within the playable
    /// area current at expiry, not the one seen when the countdown was armed.
    async fn fire_auto_relocate(shared: Weak<Shared>, generation: u64) {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let engine = GameEngine { shared };

        let mut inner = engine.shared.inner.lock().await;
        match &inner.pending {
            Some(task) if task.generation == generation => {}
            _ => {
                trace!(generation, "stale auto-relocate ignored");
                return;
            }
        }

        if let Some(task) = inner.pending.take() {
            task.finish();
        }

        let now = Instant::now();
        let EngineInner { state, playable_area, rng, .. } = &mut *inner;
        if state.auto_relocate(now, *playable_area, rng) {
            debug!(round = inner.state.round_index(), "target relocated automatically");
            engine.arm_auto_relocate(&mut inner);
        }
        engine.publish(&inner);
    }

    fn publish(&self, inner: &EngineInner) {
        let snapshot = Self::build_snapshot(&self.shared.config, inner);
        self.shared.snapshot_tx.send_replace(snapshot);
    }

    fn build_snapshot(config: &GameConfig, inner: &EngineInner) -> GameSnapshot {
        GameSnapshot {
            phase: inner.state.phase(),
            round_index: inner.state.round_index(),
            total_rounds: inner.state.total_rounds(),
            latencies: inner.state.latencies().to_vec(),
            target: inner.state.target(),
            target_diameter: config.target_diameter,
            relocate_pending: inner.pending.is_some(),
        }
    }
}
