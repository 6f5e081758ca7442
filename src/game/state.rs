//! Round-sequence state machine
//!
//! Pure game state driven by explicit instants. The engine owns one
//! `GameState` and is the only caller of its mutating methods.

use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// Size of the region the target may be placed in, in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaSize {
    pub width: f64,
    pub height: f64,
}

impl AreaSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Offset of the target's top-left corner inside the playable area
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Logical phase derived from the state, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to press start
    Idle,
    /// Rounds in progress
    Active,
    /// All rounds recorded; terminal until reset
    Complete,
}

/// Mutable game state owned by the engine
#[derive(Debug, Clone)]
pub struct GameState {
    total_rounds: usize,
    target_diameter: f64,
    started: bool,
    latencies: Vec<Duration>,
    round_index: usize,
    target: Offset,
    round_started_at: Option<Instant>,
}

impl GameState {
    /// Create an idle state for a sequence of `total_rounds` taps
    pub fn new(total_rounds: usize, target_diameter: f64) -> Self {
        Self {
            total_rounds,
            target_diameter,
            started: false,
            latencies: Vec::with_capacity(total_rounds),
            round_index: 0,
            target: Offset::default(),
            round_started_at: None,
        }
    }

    /// Begin a measurement window at `now`.
    ///
    /// Progress is kept; only the round start is moved. Returns true when
    /// a round is open afterwards and the countdown should be armed.
    pub fn start(&mut self, now: Instant) -> bool {
        self.started = true;
        if self.is_complete() {
            return false;
        }
        self.round_started_at = Some(now);
        true
    }

    /// Record a tap at `now` and move the target somewhere new.
    ///
    /// Returns the measured latency, or `None` when no round is open.
    pub fn record_tap<R: Rng + ?Sized>(
        &mut self,
        now: Instant,
        area: AreaSize,
        rng: &mut R,
    ) -> Option<Duration> {
        if !self.started || self.is_complete() {
            return None;
        }
        let round_start = self.round_started_at?;

        let latency = now.saturating_duration_since(round_start);
        self.latencies.push(latency);
        self.round_index += 1;
        self.round_started_at = if self.is_complete() { None } else { Some(now) };
        self.target = random_offset(area, self.target_diameter, rng);

        Some(latency)
    }

    /// Countdown expiry: relocate the target and restart the round window.
    ///
    /// Returns false (and changes nothing) once the sequence is over or
    /// before it has started.
    pub fn auto_relocate<R: Rng + ?Sized>(
        &mut self,
        now: Instant,
        area: AreaSize,
        rng: &mut R,
    ) -> bool {
        if !self.started || self.is_complete() {
            return false;
        }
        self.target = random_offset(area, self.target_diameter, rng);
        self.round_started_at = Some(now);
        true
    }

    /// Return to the idle state
    pub fn reset(&mut self) {
        self.started = false;
        self.latencies.clear();
        self.round_index = 0;
        self.round_started_at = None;
        self.target = Offset::default();
    }

    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::Idle
        } else if self.is_complete() {
            GamePhase::Complete
        } else {
            GamePhase::Active
        }
    }

    pub fn is_complete(&self) -> bool {
        self.round_index >= self.total_rounds
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    pub fn latencies(&self) -> &[Duration] {
        &self.latencies
    }

    pub fn target(&self) -> Offset {
        self.target
    }

    pub fn round_started_at(&self) -> Option<Instant> {
        self.round_started_at
    }

    pub fn min_latency(&self) -> Option<Duration> {
        min_latency(&self.latencies)
    }

    pub fn average_latency(&self) -> Duration {
        average_latency(&self.latencies)
    }
}

/// Fastest recorded tap
pub fn min_latency(latencies: &[Duration]) -> Option<Duration> {
    latencies.iter().min().copied()
}

/// Mean of the recorded taps, zero when nothing was recorded
pub fn average_latency(latencies: &[Duration]) -> Duration {
    if latencies.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = latencies.iter().sum();
    total / latencies.len() as u32
}

/// Uniform position in `[0, width - diameter] x [0, height - diameter]`.
///
/// Axes too small for the target (or not finite) collapse to 0.
pub fn random_offset<R: Rng + ?Sized>(area: AreaSize, diameter: f64, rng: &mut R) -> Offset {
    Offset {
        x: random_axis(area.width - diameter, rng),
        y: random_axis(area.height - diameter, rng),
    }
}

fn random_axis<R: Rng + ?Sized>(max: f64, rng: &mut R) -> f64 {
    if max.is_finite() && max > 0.0 {
        rng.gen_range(0.0..=max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(5, 96.0);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.round_index(), 0);
        assert!(state.latencies().is_empty());
        assert!(state.round_started_at().is_none());
        assert_eq!(state.target(), Offset::default());
    }

    #[test]
    fn test_five_taps_scenario() {
        let mut state = GameState::new(5, 96.0);
        let mut rng = rng();
        let area = AreaSize::new(200.0, 200.0);
        let t0 = Instant::now();

        assert!(state.start(t0));
        for at in [100, 250, 400, 700, 750] {
            assert!(state.record_tap(t0 + ms(at), area, &mut rng).is_some());
            assert_eq!(state.latencies().len(), state.round_index());
        }

        assert_eq!(state.latencies(), &[ms(100), ms(150), ms(150), ms(300), ms(50)]);
        assert_eq!(state.round_index(), 5);
        assert!(state.is_complete());
        assert_eq!(state.phase(), GamePhase::Complete);
        assert!(state.round_started_at().is_none());
    }

    #[test]
    fn test_tap_while_idle_is_ignored() {
        let mut state = GameState::new(5, 96.0);
        let mut rng = rng();

        assert!(state.record_tap(Instant::now(), AreaSize::new(400.0, 400.0), &mut rng).is_none());
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.round_index(), 0);
        assert_eq!(state.target(), Offset::default());
    }

    #[test]
    fn test_tap_after_complete_is_ignored() {
        let mut state = GameState::new(2, 96.0);
        let mut rng = rng();
        let area = AreaSize::new(400.0, 400.0);
        let t0 = Instant::now();

        state.start(t0);
        state.record_tap(t0 + ms(10), area, &mut rng);
        state.record_tap(t0 + ms(20), area, &mut rng);
        let target = state.target();

        assert!(state.record_tap(t0 + ms(30), area, &mut rng).is_none());
        assert_eq!(state.round_index(), 2);
        assert_eq!(state.latencies().len(), 2);
        assert_eq!(state.target(), target);
    }

    #[test]
    fn test_start_keeps_progress_and_moves_window() {
        let mut state = GameState::new(5, 96.0);
        let mut rng = rng();
        let area = AreaSize::new(400.0, 400.0);
        let t0 = Instant::now();

        state.start(t0);
        state.record_tap(t0 + ms(100), area, &mut rng);
        state.start(t0 + ms(500));
        let latency = state.record_tap(t0 + ms(520), area, &mut rng);

        assert_eq!(latency, Some(ms(20)));
        assert_eq!(state.round_index(), 2);
    }

    #[test]
    fn test_start_when_complete_opens_no_round() {
        let mut state = GameState::new(1, 96.0);
        let mut rng = rng();
        let t0 = Instant::now();

        state.start(t0);
        state.record_tap(t0 + ms(5), AreaSize::new(300.0, 300.0), &mut rng);
        assert!(!state.start(t0 + ms(10)));
        assert!(state.round_started_at().is_none());
        assert_eq!(state.phase(), GamePhase::Complete);
    }

    #[test]
    fn test_clock_going_backwards_clamps_to_zero() {
        let mut state = GameState::new(5, 96.0);
        let mut rng = rng();
        let t0 = Instant::now() + ms(1_000);

        state.start(t0);
        let latency = state.record_tap(t0 - ms(200), AreaSize::new(300.0, 300.0), &mut rng);
        assert_eq!(latency, Some(Duration::ZERO));
    }

    #[test]
    fn test_auto_relocate_restarts_window() {
        let mut state = GameState::new(5, 96.0);
        let mut rng = rng();
        let area = AreaSize::new(1_000.0, 1_000.0);
        let t0 = Instant::now();

        assert!(!state.auto_relocate(t0, area, &mut rng));

        state.start(t0);
        assert!(state.auto_relocate(t0 + ms(3_000), area, &mut rng));
        assert_eq!(state.round_started_at(), Some(t0 + ms(3_000)));
        assert_eq!(state.round_index(), 0);

        let latency = state.record_tap(t0 + ms(3_120), area, &mut rng);
        assert_eq!(latency, Some(ms(120)));
    }

    #[test]
    fn test_auto_relocate_after_complete_does_nothing() {
        let mut state = GameState::new(1, 96.0);
        let mut rng = rng();
        let area = AreaSize::new(1_000.0, 1_000.0);
        let t0 = Instant::now();

        state.start(t0);
        state.record_tap(t0 + ms(50), area, &mut rng);
        let target = state.target();

        assert!(!state.auto_relocate(t0 + ms(3_050), area, &mut rng));
        assert_eq!(state.target(), target);
        assert!(state.round_started_at().is_none());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut state = GameState::new(5, 96.0);
        let mut rng = rng();
        let t0 = Instant::now();

        state.start(t0);
        state.record_tap(t0 + ms(80), AreaSize::new(500.0, 500.0), &mut rng);
        state.reset();

        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.round_index(), 0);
        assert!(state.latencies().is_empty());
        assert!(state.round_started_at().is_none());
        assert_eq!(state.target(), Offset::default());
    }

    #[test]
    fn test_latency_statistics() {
        let latencies = [ms(120), ms(80), ms(200), ms(80), ms(150)];
        assert_eq!(min_latency(&latencies), Some(ms(80)));
        assert_eq!(average_latency(&latencies), ms(126));

        assert_eq!(min_latency(&[]), None);
        assert_eq!(average_latency(&[]), Duration::ZERO);
    }

    #[test]
    fn test_random_offset_stays_in_bounds() {
        let mut rng = rng();
        let area = AreaSize::new(320.0, 200.0);
        for _ in 0..1_000 {
            let offset = random_offset(area, 96.0, &mut rng);
            assert!((0.0..=224.0).contains(&offset.x));
            assert!((0.0..=104.0).contains(&offset.y));
        }
    }

    #[test]
    fn test_degenerate_area_collapses_to_origin() {
        let mut rng = rng();
        assert_eq!(random_offset(AreaSize::new(50.0, 50.0), 96.0, &mut rng), Offset::default());
        assert_eq!(random_offset(AreaSize::new(-10.0, 0.0), 96.0, &mut rng), Offset::default());
        assert_eq!(random_offset(AreaSize::new(96.0, 96.0), 96.0, &mut rng), Offset::default());
        assert_eq!(
            random_offset(AreaSize::new(f64::INFINITY, f64::NAN), 96.0, &mut rng),
            Offset::default()
        );

        let offset = random_offset(AreaSize::new(500.0, 10.0), 96.0, &mut rng);
        assert!(offset.x >= 0.0 && offset.x <= 404.0);
        assert_eq!(offset.y, 0.0);
    }
}
