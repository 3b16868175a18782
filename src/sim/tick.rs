//! Per-frame simulation tick
//!
//! One call per animation frame. There is no fixed timestep: cars move a
//! fixed number of pixels per frame, so game speed follows the display rate.

use super::collision::first_hit;
use super::input::InputState;
use super::state::GameState;

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &InputState) {
    if !state.is_running() {
        return;
    }

    // Score shown this frame; it is what gets frozen on a crash
    let frame_score = state.score;
    state.score += 1;
    state.frames += 1;

    let canvas = state.canvas;

    let mut crashed = false;
    if let Some(player) = state.player.as_mut() {
        player.vel = input.velocity;
        player.clamp_to_bounds(canvas);
        player.update();

        if let Some(index) = first_hit(player, &state.obstacles) {
            log::debug!("Player hit oncoming car {} at {:?}", index, player.pos);
            crashed = true;
        }
    }

    // Oncoming cars keep moving on the crash frame too
    for car in &mut state.obstacles {
        if car.recycle_if_off_left(canvas, &mut state.rng) {
            log::trace!("Recycled car to y={}", car.pos.y);
        }
        car.update();
    }

    if crashed {
        state.game_over(frame_score);
    }
}
