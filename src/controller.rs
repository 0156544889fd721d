//! Game controller: session lifecycle and frame scheduling
//!
//! The controller owns the world state and drives it one tick per animation frame.
//! Each frame schedules the next one while the session runs; stopping cancels the
//! pending frame. Hosts plug in a [`FrameScheduler`] (e.g. `requestAnimationFrame`)
//! and an [`Overlay`] for the few UI toggles the game needs.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Arena;
use crate::input::{self, Key};
use crate::renderer::{Frame, compose};
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::GameTuning;

/// Schedules a callback for the next animation frame
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Request one callback; the host calls [`GameController::on_frame`] when it fires
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancel a pending request. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// UI elements around the canvas
pub trait Overlay {
    fn set_game_over_visible(&mut self, visible: bool);
    fn set_start_visible(&mut self, visible: bool);
    fn set_rules_open(&mut self, open: bool);
}

/// Overlay that only records what would be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessOverlay {
    pub game_over_visible: bool,
    pub start_visible: bool,
    pub rules_open: bool,
}

impl Default for HeadlessOverlay {
    fn default() -> Self {
        Self {
            game_over_visible: false,
            start_visible: true,
            rules_open: false,
        }
    }
}

impl Overlay for HeadlessOverlay {
    fn set_game_over_visible(&mut self, visible: bool) {
        self.game_over_visible = visible;
    }

    fn set_start_visible(&mut self, visible: bool) {
        self.start_visible = visible;
    }

    fn set_rules_open(&mut self, open: bool) {
        self.rules_open = open;
    }
}

/// Scheduler that queues requests until they are fired explicitly
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending: Vec<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that have not fired or been cancelled, oldest first
    pub fn pending(&self) -> &[u32] {
        &self.pending
    }

    /// Fire the oldest pending request
    pub fn fire(&mut self) -> Option<u32> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> u32 {
        self.next_id += 1;
        self.pending.push(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.pending.retain(|&id| id != handle);
    }
}

/// Session flag plus the frame request that will run the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session<H> {
    pub phase: GamePhase,
    pub pending: Option<H>,
}

impl<H> Default for Session<H> {
    fn default() -> Self {
        Self {
            phase: GamePhase::Idle,
            pending: None,
        }
    }
}

/// Owns the game and drives it frame by frame
pub struct GameController<S: FrameScheduler, O: Overlay> {
    state: GameState,
    tuning: GameTuning,
    session: Session<S::Handle>,
    scheduler: S,
    overlay: O,
    rng: Pcg32,
}

impl<S: FrameScheduler, O: Overlay> GameController<S, O> {
    /// Create the controller in its load-time state (Idle, nothing scheduled)
    pub fn new(arena: Arena, tuning: GameTuning, seed: u64, scheduler: S, overlay: O) -> Self {
        log::info!(
            "Game created: {}x{} canvas, seed {}",
            arena.width,
            arena.height,
            seed
        );
        Self {
            state: GameState::new(arena, &tuning),
            tuning,
            session: Session::default(),
            scheduler,
            overlay,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    pub fn session(&self) -> &Session<S::Handle> {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.phase == GamePhase::Running
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Start (or restart) a session. Safe to call while running: the pending
    /// frame is replaced, so only one tick loop ever exists.
    pub fn start_game(&mut self) {
        self.overlay.set_game_over_visible(false);
        self.overlay.set_start_visible(false);
        self.overlay.set_rules_open(false);

        self.state.reset(&self.tuning, &mut self.rng);
        self.session.phase = GamePhase::Running;

        self.cancel_pending();
        self.session.pending = Some(self.scheduler.request_frame());

        log::info!(
            "Game started: ball at ({:.1}, {:.1}) heading {}",
            self.state.ball.pos.x,
            self.state.ball.pos.y,
            if self.state.ball.vel.x < 0.0 { "left" } else { "right" }
        );
    }

    /// End the session after the ball is lost. Only restart leads back in.
    pub fn end_game(&mut self) {
        self.session.phase = GamePhase::Idle;
        self.cancel_pending();
        self.overlay.set_game_over_visible(true);
        self.overlay.set_start_visible(false);

        log::info!("Game over: score {}", self.state.score);
    }

    /// Frame callback: tick, compose, and schedule the next frame.
    /// Returns the frame to paint, or `None` when no session is running.
    pub fn on_frame(&mut self) -> Option<Frame> {
        self.session.pending = None;
        if !self.is_running() {
            return None;
        }

        let events = tick(&mut self.state, &self.tuning);
        for event in &events {
            log::debug!("{:?}", event);
        }
        let frame = compose(&self.state, &self.tuning);

        if events.contains(&GameEvent::BallLost) {
            self.end_game();
        } else {
            self.session.pending = Some(self.scheduler.request_frame());
        }

        Some(frame)
    }

    /// Handle a key press by `KeyboardEvent.key` name; returns whether it was used
    pub fn key_down(&mut self, name: &str) -> bool {
        match Key::from_key_name(name) {
            Some(key) => {
                input::key_down(&mut self.state.paddle, key);
                true
            }
            None => false,
        }
    }

    /// Handle a key release by `KeyboardEvent.key` name; returns whether it was used
    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_key_name(name) {
            Some(key) => {
                input::key_up(&mut self.state.paddle, key);
                true
            }
            None => false,
        }
    }

    pub fn show_rules(&mut self) {
        self.overlay.set_rules_open(true);
    }

    pub fn hide_rules(&mut self) {
        self.overlay.set_rules_open(false);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.session.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl<O: Overlay> GameController<ManualScheduler, O> {
    /// Fire the pending frame, if any, and run it
    pub fn pump(&mut self) -> Option<Frame> {
        self.scheduler.fire()?;
        self.on_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    type TestController = GameController<ManualScheduler, HeadlessOverlay>;

    fn controller(seed: u64) -> TestController {
        GameController::new(
            Arena::new(800.0, 600.0),
            GameTuning::default(),
            seed,
            ManualScheduler::new(),
            HeadlessOverlay::default(),
        )
    }

    #[test]
    fn test_starts_idle() {
        let mut c = controller(1);

        assert!(!c.is_running());
        assert!(c.scheduler().pending().is_empty());
        assert!(c.overlay().start_visible);

        // Frames are ignored while idle
        assert!(c.on_frame().is_none());
        assert!(c.scheduler().pending().is_empty());
    }

    #[test]
    fn test_start_schedules_one_frame() {
        let mut c = controller(1);
        c.show_rules();
        c.start_game();

        assert!(c.is_running());
        assert_eq!(c.scheduler().pending().len(), 1);
        assert_eq!(c.session().pending, Some(c.scheduler().pending()[0]));
        assert_eq!(
            *c.overlay(),
            HeadlessOverlay {
                game_over_visible: false,
                start_visible: false,
                rules_open: false,
            }
        );
    }

    #[test]
    fn test_start_twice_keeps_one_loop() {
        let mut c = controller(3);

        c.start_game();
        let first = c.state().clone();
        c.pump();
        c.start_game();
        let second = c.state().clone();

        assert_eq!(c.scheduler().pending().len(), 1);
        for state in [&first, &second] {
            assert_eq!(state.score, 0);
            assert_eq!(state.paddle.pos.x, 360.0);
            assert_eq!(state.bricks.visible_count(), 35);
        }
        assert_eq!(first.bricks, second.bricks);
        assert_eq!(first.paddle, second.paddle);

        // Exactly one tick per fired frame
        let y = c.state().ball.pos.y;
        assert!(c.pump().is_some());
        assert_eq!(c.state().ball.pos.y, y - 2.0);
        assert_eq!(c.scheduler().pending().len(), 1);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = controller(42);
        let mut b = controller(42);
        a.start_game();
        b.start_game();

        for _ in 0..200 {
            a.pump();
            b.pump();
        }
        assert_eq!(a.state(), b.state());
        assert_eq!(a.is_running(), b.is_running());
    }

    #[test]
    fn test_ball_start_randomized_within_canvas() {
        for seed in 0..50 {
            let mut c = controller(seed);
            c.start_game();
            let ball = &c.state().ball;
            assert!(ball.pos.x >= 10.0 && ball.pos.x < 790.0);
            assert_eq!(ball.pos.y, 300.0);
            assert_eq!(ball.vel.y, -2.0);
            assert_eq!(ball.vel.x.abs(), 2.0);
        }
    }

    #[test]
    fn test_session_ends_when_ball_drops() {
        let mut c = controller(9);
        c.start_game();
        // Deterministic path down and to the left, away from the paddle
        c.state_mut().ball.pos = Vec2::new(300.0, 300.0);
        c.state_mut().ball.vel = Vec2::new(-2.0, 2.0);

        for _ in 0..145 {
            assert!(c.pump().is_some());
            assert!(c.is_running());
        }
        assert_eq!(c.state().ball.pos, Vec2::new(10.0, 590.0));
        assert_eq!(c.state().paddle.pos.x, 360.0);

        // The losing tick still produces a final frame
        assert!(c.pump().is_some());
        assert!(!c.is_running());
        assert!(c.scheduler().pending().is_empty());
        assert_eq!(c.session().pending, None);
        assert!(c.overlay().game_over_visible);
        assert!(!c.overlay().start_visible);

        // Nothing left to run
        assert!(c.pump().is_none());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut c = controller(9);
        c.start_game();
        c.state_mut().ball.pos = Vec2::new(300.0, 589.0);
        c.state_mut().ball.vel = Vec2::new(-2.0, 2.0);
        c.pump();
        assert!(!c.is_running());

        c.start_game();
        assert!(c.is_running());
        assert!(!c.overlay().game_over_visible);
        assert_eq!(c.state().score, 0);
        assert_eq!(c.scheduler().pending().len(), 1);
    }

    #[test]
    fn test_keys_drive_paddle() {
        let mut c = controller(5);
        c.start_game();

        assert!(c.key_down("ArrowLeft"));
        c.pump();
        assert_eq!(c.state().paddle.pos.x, 352.0);

        assert!(c.key_up("ArrowLeft"));
        c.pump();
        assert_eq!(c.state().paddle.pos.x, 352.0);

        assert!(c.key_down("Right"));
        c.pump();
        assert_eq!(c.state().paddle.pos.x, 360.0);

        assert!(!c.key_down("a"));
        assert_eq!(c.state().paddle.dx, 8.0);
    }

    #[test]
    fn test_start_clears_held_key() {
        let mut c = controller(5);
        c.key_down("ArrowRight");
        assert_eq!(c.state().paddle.dx, 8.0);

        c.start_game();
        assert_eq!(c.state().paddle.dx, 0.0);
    }

    #[test]
    fn test_rules_toggle() {
        let mut c = controller(5);
        c.show_rules();
        assert!(c.overlay().rules_open);
        c.hide_rules();
        assert!(!c.overlay().rules_open);
    }

    #[test]
    fn test_stale_cancel_is_noop() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();

        s.cancel_frame(a);
        s.cancel_frame(a);
        s.cancel_frame(99);
        assert_eq!(s.pending(), &[b]);

        assert_eq!(s.fire(), Some(b));
        s.cancel_frame(b);
        assert_eq!(s.fire(), None);
    }
}
