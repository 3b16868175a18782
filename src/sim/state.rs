//! Game state and session lifecycle
//!
//! A session owns the player car, the pool of oncoming cars and the score.
//! Everything random draws from one seeded PCG stream, so a seed plus an
//! input sequence replays exactly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, random_lane};
use crate::platform::{canvas_size, obstacle_count};
use crate::settings::Tuning;
use crate::share::share_link;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Cars are moving, score is counting
    Running,
    /// Crashed; waiting for restart
    Ended,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) rng: Pcg32,
    pub tuning: Tuning,
    /// Window size; decides the oncoming car count at session start
    pub viewport: Vec2,
    /// Drawing area; all positions are in canvas pixels
    pub canvas: Vec2,
    /// Frames survived this session, frozen once ended
    pub score: u64,
    /// Frames ticked since construction, across restarts
    pub frames: u64,
    pub phase: GamePhase,
    /// Present exactly while running
    pub player: Option<Entity>,
    pub obstacles: Vec<Entity>,
    /// Built when the session ends
    pub share_link: Option<String>,
}

impl GameState {
    /// Create a state with a running session
    pub fn new(seed: u64, viewport: Vec2, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            canvas: canvas_size(viewport, tuning.canvas_fraction),
            score: 0,
            frames: 0,
            phase: GamePhase::Running,
            player: None,
            obstacles: Vec::new(),
            share_link: None,
        };
        state.start_session();
        log::info!(
            "Session started: seed {}, canvas {}x{}, {} oncoming cars",
            seed,
            state.canvas.x,
            state.canvas.y,
            state.obstacles.len()
        );
        state
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Oncoming cars a session started now would get
    pub fn target_obstacle_count(&self) -> usize {
        obstacle_count(self.viewport.x, self.tuning.spawn_spacing)
    }

    /// Start over with a fresh player and a recomputed pool of oncoming cars
    pub fn restart(&mut self) {
        self.start_session();
        log::info!("Session restarted with {} oncoming cars", self.obstacles.len());
    }

    /// Track a window resize. The oncoming car count stays as it was for the
    /// running session; the next restart picks up the new width.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.canvas = canvas_size(viewport, self.tuning.canvas_fraction);
        log::info!("Canvas resized to {}x{}", self.canvas.x, self.canvas.y);
    }

    /// End the session with `final_score`
    pub fn game_over(&mut self, final_score: u64) {
        self.player = None;
        self.obstacles.clear();
        self.score = final_score;
        self.share_link = Some(share_link(final_score));
        self.phase = GamePhase::Ended;
        log::info!("Game over, final score {}", final_score);
    }

    fn start_session(&mut self) {
        let base = self.tuning.car_size;
        let speed = self.tuning.speed;

        self.score = 0;
        self.share_link = None;
        self.phase = GamePhase::Running;

        let y = random_lane(&mut self.rng, self.canvas.y, base);
        self.player = Some(Entity::player(Vec2::new(self.tuning.player_start_x, y), base));

        let count = self.target_obstacle_count();
        self.obstacles.clear();
        self.obstacles.reserve(count);
        for _ in 0..count {
            let y = random_lane(&mut self.rng, self.canvas.y, base);
            let vx = self.rng.random_range(-2.0 * speed..-speed);
            self.obstacles.push(Entity::obstacle(Vec2::new(self.canvas.x, y), vx, base));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Role;

    fn new_state(width: f32) -> GameState {
        GameState::new(12345, Vec2::new(width, 600.0), Tuning::default())
    }

    #[test]
    fn test_new_session_layout() {
        let state = new_state(800.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.canvas, Vec2::new(600.0, 450.0));
        assert_eq!(state.obstacles.len(), 10);

        let player = state.player.as_ref().expect("player spawned");
        assert_eq!(player.role, Role::Player);
        assert_eq!(player.pos.x, 20.0);
        assert!(player.pos.y >= 0.0 && player.pos.y < 450.0 - 60.0);
        assert_eq!(player.vel, Vec2::ZERO);

        for car in &state.obstacles {
            assert_eq!(car.role, Role::Obstacle);
            assert_eq!(car.pos.x, 600.0);
            assert!(car.pos.y >= 0.0 && car.pos.y < 450.0 - 60.0);
            assert!(car.vel.x >= -10.0 && car.vel.x <= -5.0);
            assert_eq!(car.vel.y, 0.0);
        }
    }

    #[test]
    fn test_narrow_viewport_has_empty_road() {
        let state = new_state(79.0);
        assert!(state.obstacles.is_empty());
        assert!(state.player.is_some());
    }

    #[test]
    fn test_game_over_clears_session() {
        let mut state = new_state(800.0);
        state.game_over(321);
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.player.is_none());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 321);
        let link = state.share_link.as_deref().expect("share link");
        assert!(link.contains("I%20scored%20321%20points"));
    }

    #[test]
    fn test_restart_uses_current_viewport() {
        let mut state = new_state(800.0);
        state.resize(Vec2::new(1200.0, 900.0));
        // Running session keeps its density
        assert_eq!(state.obstacles.len(), 10);
        assert_eq!(state.canvas, Vec2::new(900.0, 675.0));

        state.game_over(50);
        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.share_link.is_none());
        assert_eq!(state.obstacles.len(), 15);
        assert!(state.obstacles.iter().all(|c| c.pos.x == 900.0));
        assert!(state.obstacles.iter().all(|c| (-10.0..=-5.0).contains(&c.vel.x)));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = new_state(800.0);
        let b = new_state(800.0);
        assert_eq!(a.player, b.player);
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_extreme_saved_tuning_still_starts() {
        use crate::consts::{MAX_OBSTACLES, MAX_SPEED};
        use crate::settings::Settings;

        let fast = Settings::from_json(r#"{"tuning": {"speed": 3e38}}"#).tuning;
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0), fast);
        assert_eq!(state.obstacles.len(), 10);
        assert!(state.obstacles.iter().all(|c| c.vel.x.is_finite()));
        assert!(state.obstacles.iter().all(|c| c.vel.x >= -2.0 * MAX_SPEED));
        state.game_over(0);
        state.restart();
        assert!(state.is_running());

        let dense = Tuning {
            spawn_spacing: 1e-30,
            ..Tuning::default()
        };
        let state = GameState::new(1, Vec2::new(800.0, 600.0), dense);
        assert_eq!(state.obstacles.len(), 800.min(MAX_OBSTACLES));
    }
}
