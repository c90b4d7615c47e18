//! Block Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use block_dodge::Tuning;
    use block_dodge::consts::*;
    use block_dodge::platform::input::{
        BUTTON_PRESS_EVENTS, BUTTON_RELEASE_EVENTS, DIRECTION_BUTTONS,
    };
    use block_dodge::platform::{InputState, LogicalKey};
    use block_dodge::renderer::shapes::scene_vertices;
    use block_dodge::renderer::scene::css_rgba;
    use block_dodge::renderer::{DrawCommand, RenderState, TextSlot, build_scene};
    use block_dodge::sim::{GameEvent, GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: InputState,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: InputState::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.tick_input();
                for event in tick(&mut self.state, &input, SIM_DT) {
                    if let GameEvent::GameOver { score } = event {
                        log::info!("Final score: {} (seed {})", score, self.state.seed);
                    }
                }
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }
        }

        /// Render the current frame
        fn render(&mut self, commands: &[DrawCommand]) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(commands);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD text elements and restart button in DOM
        fn update_hud(&self, commands: &[DrawCommand]) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let slots = [
                (TextSlot::Score, "hud-score"),
                (TextSlot::Ability, "hud-ability"),
                (TextSlot::GameOverTitle, "game-over-title"),
                (TextSlot::FinalScore, "final-score"),
            ];
            for (slot, id) in slots {
                let Some(el) = document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                let line = commands.iter().find_map(|c| match c {
                    DrawCommand::Text {
                        slot: s,
                        text,
                        pos,
                        font_px,
                        color,
                    } if *s == slot => Some((text.as_str(), *pos, *font_px, *color)),
                    _ => None,
                });
                let Some((text, pos, font_px, color)) = line else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                    continue;
                };

                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
                // Field coordinates scaled to the stage the canvas fills
                let scale = el
                    .parent_element()
                    .map(|p| p.client_width() as f32 / FIELD_WIDTH)
                    .filter(|s| *s > 0.0)
                    .unwrap_or(1.0);
                let style = el.style();
                let _ = style.set_property("left", &format!("{:.2}%", pos.x / FIELD_WIDTH * 100.0));
                let _ = style.set_property("top", &format!("{:.2}%", pos.y / FIELD_HEIGHT * 100.0));
                let _ = style.set_property("font-size", &format!("{:.1}px", font_px * scale));
                let _ = style.set_property("color", &css_rgba(color));
                let _ = el.set_attribute("class", "hud-item");
            }

            // Restart button is only reachable once the run is over
            if let Some(btn) = document
                .get_element_by_id("restart-btn")
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            {
                let display = if self.state.phase == GamePhase::GameOver {
                    "inline-block"
                } else {
                    "none"
                };
                let _ = btn.style().set_property("display", display);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.accumulator = 0.0;
            self.input.reset();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Block Dodge starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        // Backing store at device resolution; field coordinates are scaled in the renderer
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Tuning::load())));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_keyboard(game.clone());
        setup_direction_buttons(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Block Dodge running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_direction_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, key) in DIRECTION_BUTTONS {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Missing on-screen button #{}", id);
                continue;
            };
            bind_button(&button, &game, key, &BUTTON_PRESS_EVENTS, true);
            bind_button(&button, &game, key, &BUTTON_RELEASE_EVENTS, false);
        }
    }

    fn bind_button(
        button: &web_sys::Element,
        game: &Rc<RefCell<Game>>,
        key: LogicalKey,
        events: &[&str],
        pressed: bool,
    ) {
        for name in events {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if pressed {
                    g.input.press(key);
                } else {
                    g.input.release(key);
                }
                event.prevent_default();
            });
            let _ = button.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            let commands = build_scene(&g.state);
            g.render(&commands);
            g.update_hud(&commands);
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let tuning = block_dodge::Tuning::load();
    let (ticks, score) = headless::run(seed, tuning, 60 * 60 * 5);
    println!("Seed {}: survived {} ticks, score {}", seed, ticks, score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use block_dodge::Tuning;
    use block_dodge::consts::SIM_DT;
    use block_dodge::sim::{AbilityKind, GameState, TickInput, tick};

    /// Simple dodging bot: sidestep the nearest hazard above, grab nothing,
    /// fire whenever the gun is armed
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.rect();
        let center = player.center();

        let threat = state
            .hazards
            .iter()
            .filter(|h| h.pos.y < player.bottom())
            .filter(|h| h.pos.x < player.right() + 20.0 && h.pos.x + h.size > player.pos.x - 20.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let mut input = TickInput {
            fire: state.active_ability_kind() == Some(AbilityKind::Gun),
            ..Default::default()
        };
        if let Some(hazard) = threat {
            if hazard.center().x > center.x {
                input.left = true;
            } else {
                input.right = true;
            }
        }
        input
    }

    /// Play until game over or `max_ticks`; returns (ticks, score)
    pub fn run(seed: u64, tuning: Tuning, max_ticks: u64) -> (u64, u64) {
        let mut state = GameState::with_tuning(seed, tuning);
        while !state.is_game_over() && state.time_ticks < max_ticks {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT);
        }
        log::info!("Headless session ended at tick {}", state.time_ticks);
        (state.time_ticks, state.score)
    }
}
