//! Car Avoidance entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use car_avoidance::SetupError;
    use car_avoidance::platform::{parse_seed, viewport_size};
    use car_avoidance::renderer::{RenderState, scene};
    use car_avoidance::settings::Settings;
    use car_avoidance::sim::{ArrowKey, GamePhase, GameState, InputState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        /// Written by key handlers, read by the tick
        input: InputState,
        canvas: HtmlCanvasElement,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// An animation frame callback is pending
        scheduled: bool,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(state: GameState, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            Self {
                last_phase: state.phase,
                state,
                settings,
                render_state: None,
                input: InputState::default(),
                canvas,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                scheduled: false,
            }
        }

        /// Advance one frame
        fn update(&mut self, time: f64) {
            tick(&mut self.state, &self.input);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene(&self.state)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let canvas = render_state.canvas;
                        render_state.resize(render_state.size.0, render_state.size.1, canvas);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and game-over overlay in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }
            if self.settings.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            if self.state.phase == self.last_phase {
                return;
            }
            self.last_phase = self.state.phase;

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::Ended {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let (Some(link_el), Some(link)) =
                        (document.get_element_by_id("share-link"), &self.state.share_link)
                    {
                        let _ = link_el.set_attribute("href", link);
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Track a window resize: canvas and surface only
        fn resize(&mut self, viewport: Vec2) {
            self.state.resize(viewport);
            let Some(window) = web_sys::window() else {
                return;
            };
            match apply_canvas_size(&window, &self.canvas, self.state.canvas) {
                Ok((w, h)) => {
                    if let Some(ref mut render_state) = self.render_state {
                        render_state.resize(w, h, self.state.canvas);
                    }
                }
                Err(e) => log::warn!("Canvas resize failed: {}", e),
            }
        }

        /// Start a new session after a crash
        fn restart(&mut self) {
            self.state.restart();
            self.input.reset();
        }
    }

    fn js_err(value: JsValue) -> SetupError {
        SetupError::Dom(format!("{:?}", value))
    }

    /// Size the canvas backing store for the device pixel ratio
    fn apply_canvas_size(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        css: Vec2,
    ) -> Result<(u32, u32), SetupError> {
        let dpr = window.device_pixel_ratio();
        let width = ((css.x as f64 * dpr) as u32).max(1);
        let height = ((css.y as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        canvas
            .set_attribute("style", &format!("width: {}px; height: {}px", css.x, css.y))
            .map_err(js_err)?;
        Ok((width, height))
    }

    pub async fn run() -> Result<(), SetupError> {
        let settings = Settings::load();
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(settings.log_level());
        // Write back the sanitised values so the storage key exists to edit
        settings.save();

        log::info!("Car Avoidance starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(SetupError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| SetupError::Dom("#canvas is not a <canvas>".to_string()))?;

        // ?seed=N replays a run
        let seed = window
            .location()
            .search()
            .ok()
            .as_deref()
            .and_then(parse_seed)
            .unwrap_or_else(|| js_sys::Date::now() as u64);

        let state = GameState::new(seed, viewport_size(&window), settings.tuning);
        let (width, height) = apply_canvas_size(&window, &canvas, state.canvas)?;
        let canvas_css = state.canvas;

        let game = Rc::new(RefCell::new(Game::new(state, settings, canvas.clone())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, canvas_css).await?;
        game.borrow_mut().render_state = Some(render_state);

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(game.clone())?;
        setup_resize_handler(game.clone())?;
        setup_restart_button(game.clone())?;

        // Start game loop
        game.borrow_mut().scheduled = true;
        request_animation_frame(game);

        log::info!("Car Avoidance running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;

        // Key down: steer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = ArrowKey::from_key_name(&event.key()) {
                    // Arrow keys would scroll the page
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    let speed = g.state.tuning.speed;
                    g.input.press(key, speed);
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Key up: stop that axis
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = ArrowKey::from_key_name(&event.key()) {
                    game.borrow_mut().input.release(key);
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().resize(viewport_size(&window));
            }
        });
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) -> Result<(), SetupError> {
        let document = web_sys::window()
            .ok_or(SetupError::NoWindow)?
            .document()
            .ok_or(SetupError::NoDocument)?;
        let btn = document
            .get_element_by_id("restart-btn")
            .ok_or(SetupError::MissingElement("restart-btn"))?;

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let resume = {
                let mut g = game.borrow_mut();
                g.restart();
                let resume = !g.scheduled;
                g.scheduled = true;
                resume
            };
            if resume {
                request_animation_frame(game.clone());
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();

            // Stop scheduling once crashed; restart resumes
            g.scheduled = g.state.is_running();
            g.scheduled
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Car Avoidance failed to start: {}", e);
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading"))
        {
            el.set_text_content(Some(&format!("Failed to start: {}", e)));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use car_avoidance::Settings;

    let settings = Settings::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .init();
    settings.save();
    log::info!("Car Avoidance (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let (score, frames) = headless_run(seed, &settings, 20_000);
    println!("Seed {}: score {} after {} frames", seed, score, frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a session with a scripted weave until the first crash or `max_frames`
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, settings: &car_avoidance::Settings, max_frames: u64) -> (u64, u64) {
    use car_avoidance::sim::{ArrowKey, GameState, InputState, tick};
    use glam::Vec2;

    let mut state = GameState::new(seed, Vec2::new(800.0, 600.0), settings.tuning);
    let mut input = InputState::default();
    let speed = state.tuning.speed;

    while state.is_running() && state.frames < max_frames {
        match state.frames % 90 {
            0 => input.press(ArrowKey::Down, speed),
            40 => input.release(ArrowKey::Down),
            45 => input.press(ArrowKey::Up, speed),
            85 => input.release(ArrowKey::Up),
            _ => {}
        }
        tick(&mut state, &input);
    }

    if state.is_running() {
        log::info!("Survived {} frames", state.frames);
    } else if let Some(link) = &state.share_link {
        log::info!("Share: {}", link);
    }
    (state.score, state.frames)
}
