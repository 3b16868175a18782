//! Shape generation for 2D primitives
//!
//! Everything is built in canvas pixels (origin top-left, y down); the
//! pipeline maps to NDC at upload time.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Aabb, Entity, GameState, Sprite};

/// Vertices per quad (two triangles)
pub const QUAD_VERTICES: usize = 6;
/// Quads per car: body, cabin, four wheels
pub const CAR_QUADS: usize = 6;

/// Append a filled rectangle
pub fn rect(out: &mut Vec<Vertex>, r: &Aabb, color: [f32; 4]) {
    let (min, max) = (r.min, r.max());

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// The dashed lane markings: a 7x6 grid scaled to the canvas
pub fn road_markings(canvas: Vec2) -> Vec<Aabb> {
    let w = canvas.x / ROAD_COLUMNS as f32;
    let space_y = canvas.y / ROAD_ROWS as f32;

    let mut marks = Vec::with_capacity((ROAD_COLUMNS * ROAD_ROWS) as usize);
    for i in 0..ROAD_COLUMNS {
        for j in 0..ROAD_ROWS {
            let (i, j) = (i as f32, j as f32);
            marks.push(Aabb::new(
                i * w + ROAD_SPACE_X * i - ROAD_OFFSET,
                j * ROAD_MARK_HEIGHT + space_y * j + ROAD_OFFSET,
                w,
                ROAD_MARK_HEIGHT,
            ));
        }
    }
    marks
}

/// Append a car filling its bounding box
pub fn car(out: &mut Vec<Vertex>, entity: &Entity) {
    let Aabb { min, size } = entity.bounds();
    let (body, cabin, cabin_x) = match entity.sprite {
        // Windscreen toward the direction of travel
        Sprite::Player => (colors::PLAYER_BODY, colors::PLAYER_CABIN, 0.45),
        Sprite::Oncoming => (colors::ONCOMING_BODY, colors::ONCOMING_CABIN, 0.2),
    };

    rect(out, &Aabb { min, size }, body);
    rect(
        out,
        &Aabb::new(
            min.x + size.x * cabin_x,
            min.y + size.y * 0.15,
            size.x * 0.35,
            size.y * 0.7,
        ),
        cabin,
    );

    let wheel = Vec2::new(size.x * 0.18, size.y * 0.15);
    for fx in [0.12, 0.70] {
        for fy in [0.05, 0.8] {
            let at = min + Vec2::new(size.x * fx, size.y * fy);
            rect(out, &Aabb { min: at, size: wheel }, colors::WHEEL);
        }
    }
}

/// Build the whole frame: markings first, then cars on top
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let marks = road_markings(state.canvas);
    let cars = state.obstacles.len() + usize::from(state.player.is_some());

    let mut out = Vec::with_capacity((marks.len() + cars * CAR_QUADS) * QUAD_VERTICES);
    for mark in &marks {
        rect(&mut out, mark, colors::ROAD_MARKING);
    }
    if let Some(player) = &state.player {
        car(&mut out, player);
    }
    for oncoming in &state.obstacles {
        car(&mut out, oncoming);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    #[test]
    fn test_road_marking_grid() {
        let marks = road_markings(Vec2::new(700.0, 600.0));
        assert_eq!(marks.len(), 42);

        // Column 0, row 0
        assert_eq!(marks[0], Aabb::new(-40.0, 40.0, 100.0, 10.0));
        // Column 0, row 1: 10 + 100 + 40
        assert_eq!(marks[1], Aabb::new(-40.0, 150.0, 100.0, 10.0));
        // Column 1, row 0: 100 + 15 - 40
        assert_eq!(marks[6], Aabb::new(75.0, 40.0, 100.0, 10.0));
    }

    #[test]
    fn test_rect_covers_corners() {
        let mut out = Vec::new();
        rect(&mut out, &Aabb::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        assert_eq!(out.len(), QUAD_VERTICES);
        assert!(out.contains(&Vertex::new(10.0, 20.0, [1.0; 4])));
        assert!(out.contains(&Vertex::new(40.0, 60.0, [1.0; 4])));
    }

    #[test]
    fn test_car_stays_inside_bounds() {
        let entity = Entity::obstacle(Vec2::new(100.0, 50.0), -5.0, 60.0);
        let mut out = Vec::new();
        car(&mut out, &entity);
        assert_eq!(out.len(), CAR_QUADS * QUAD_VERTICES);
        for v in &out {
            assert!(v.position[0] >= 100.0 && v.position[0] <= 160.0);
            assert!(v.position[1] >= 50.0 && v.position[1] <= 80.0);
        }
    }

    #[test]
    fn test_scene_vertex_count() {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0), Tuning::default());
        let cars = 1 + state.obstacles.len();
        assert_eq!(scene(&state).len(), (42 + cars * CAR_QUADS) * QUAD_VERTICES);

        state.game_over(0);
        assert_eq!(scene(&state).len(), 42 * QUAD_VERTICES);
    }
}
