//! Platform abstraction layer
//!
//! Pure helpers shared by the browser host and the native demo:
//! - Canvas sizing from the viewport
//! - Oncoming car count from viewport width
//! - Seed selection from the page query string

use glam::Vec2;

use crate::consts::MAX_OBSTACLES;

/// Canvas size for a viewport, scaled by `fraction`
pub fn canvas_size(viewport: Vec2, fraction: f32) -> Vec2 {
    (viewport * fraction).max(Vec2::ZERO)
}

/// Number of oncoming cars for a viewport width.
///
/// Zero, negative or non-finite widths give an empty road rather than an error.
/// The count never exceeds `MAX_OBSTACLES`.
pub fn obstacle_count(viewport_width: f32, spacing: f32) -> usize {
    if !viewport_width.is_finite() || viewport_width <= 0.0 || spacing.is_nan() || spacing <= 0.0 {
        return 0;
    }
    ((viewport_width / spacing).floor() as usize).min(MAX_OBSTACLES)
}

/// Extract `seed=<u64>` from a `?a=b&c=d` query string
pub fn parse_seed(query: &str) -> Option<u64> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "seed")
        .and_then(|(_, value)| value.parse().ok())
}

/// Current window inner size in CSS pixels (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn viewport_size(window: &web_sys::Window) -> Vec2 {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    Vec2::new(dim(window.inner_width()), dim(window.inner_height()))
}
