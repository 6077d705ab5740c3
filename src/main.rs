//! SnackLotl entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use snacklotl::audio::{AudioManager, SoundEffect};
    use snacklotl::consts::*;
    use snacklotl::platform::input::{HeldKeys, KeyAction};
    use snacklotl::renderer::{RenderState, build_scene};
    use snacklotl::sim::{GameEvent, TickInput};
    use snacklotl::ui::{self, Hud, Screen};
    use snacklotl::{Session, Settings, StoredHighScore, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<StoredHighScore>,
        render_state: Option<RenderState>,
        screen: Screen,
        held: HeldKeys,
        /// One-shot requests kept until the simulation acknowledges them
        restart: bool,
        quit: bool,
        settings: Settings,
        audio: AudioManager,
        last_time: f64,
        stopped: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let audio = AudioManager::new(&settings);
            Self {
                session: Session::new(Tuning::load(), seed, StoredHighScore::default()),
                render_state: None,
                screen: Screen::default(),
                held: HeldKeys::default(),
                restart: false,
                quit: false,
                settings,
                audio,
                last_time: 0.0,
                stopped: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }

            if !self.screen.is_playing() {
                return;
            }

            let input = TickInput {
                movement: self.held.movement(),
                restart: self.restart,
                quit: self.quit,
                autopilot: self.settings.autopilot,
                ..Default::default()
            };
            let events = self.session.advance(dt, &input);
            for event in &events {
                self.on_event(event);
            }
        }

        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Restarted => self.restart = false,
                GameEvent::QuitRequested => {
                    self.quit = false;
                    self.stopped = true;
                    log::info!("Quit requested, stopping game loop");
                }
                _ => {}
            }
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
        }

        fn on_key(&mut self, key: &str, down: bool) -> bool {
            let action = KeyAction::from_key(key);
            if self.held.set(action, down) {
                return true;
            }
            if !down {
                return false;
            }
            match action {
                KeyAction::Confirm => {
                    if !self.screen.is_playing() {
                        self.screen = self.screen.confirm();
                        // First user gesture unlocks audio
                        self.audio.resume();
                    }
                    true
                }
                // Only meaningful on the game-over screen; ignored otherwise
                KeyAction::Restart if self.session.state.is_game_over() => {
                    self.restart = true;
                    true
                }
                KeyAction::Quit if self.session.state.is_game_over() => {
                    self.quit = true;
                    true
                }
                KeyAction::Autopilot => {
                    self.settings.autopilot = !self.settings.autopilot;
                    self.settings.save();
                    log::info!("Autopilot: {}", self.settings.autopilot);
                    true
                }
                _ => false,
            }
        }

        /// Tab hidden or window blurred
        fn set_background(&mut self, background: bool) {
            if background {
                self.held.clear();
            }
            if self.settings.mute_on_blur {
                self.audio.set_suspended(background);
            }
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.session.state);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn update_hud(&self, document: &Document) {
            let state = &self.session.state;
            let playing = self.screen.is_playing();

            if let Some(el) = document.get_element_by_id("menu") {
                if playing {
                    let _ = el.set_attribute("class", "overlay hidden");
                } else {
                    let _ = el.set_attribute("class", "overlay");
                    el.set_inner_html(&paragraphs(&self.screen.lines()));
                }
            }

            if let Some(el) = document.get_element_by_id("hud") {
                let _ = el.set_attribute("class", if playing { "" } else { "hidden" });
            }
            let hud = Hud::from_state(state);
            set_text(document, "hud-score", &hud.score);
            set_text(document, "hud-lives", &hud.lives);
            set_text(document, "hud-high", &hud.high_score);
            if self.settings.show_fps {
                set_text(document, "hud-fps", &format!("FPS: {}", self.fps));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match ui::game_over_lines(state).filter(|_| playing && !self.stopped) {
                    Some(lines) => {
                        let _ = el.set_attribute("class", "overlay");
                        el.set_inner_html(&paragraphs(&lines));
                    }
                    None => {
                        let _ = el.set_attribute("class", "overlay hidden");
                    }
                }
            }

            if self.stopped {
                if let Some(el) = document.get_element_by_id("goodbye") {
                    let _ = el.set_attribute("class", "overlay");
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn paragraphs(lines: &[String]) -> String {
        lines.iter().map(|l| format!("<p>{}</p>", l)).collect()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("SnackLotl starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match create_render_state(canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_input_handlers(&window, game.clone());
        setup_focus_handlers(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("SnackLotl running!");
    }

    async fn create_render_state(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| format!("failed to create surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("failed to get adapter: {}", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (SCREEN_WIDTH, SCREEN_HEIGHT),
        )
        .await
        .map_err(|e| format!("failed to create device: {}", e))
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().on_key(&event.key(), true) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().on_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                game.borrow_mut().set_background(hidden);
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_background(true);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_background(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
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
        let stopped = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
            g.stopped
        };

        if !stopped {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless autopilot run: `snacklotl [seed] [max_ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use snacklotl::consts::SIM_DT;
    use snacklotl::sim::{GameEvent, TickInput};
    use snacklotl::{Session, StoredHighScore, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("SnackLotl (native) starting headless autopilot run...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    // Five simulated minutes unless told otherwise
    let max_ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5 * 60 * 60);

    let mut session = Session::new(Tuning::load(), seed, StoredHighScore::default());
    log::info!(
        "Seed {}, high score {}, up to {} ticks",
        seed,
        session.high_score(),
        max_ticks
    );

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    for _ in 0..max_ticks {
        for event in session.step(&input) {
            if let GameEvent::FoodEaten { .. } | GameEvent::ToxinHit { .. } = event {
                log::debug!("tick {}: {:?}", session.state.time_ticks, event);
            }
        }
        if session.state.is_game_over() {
            break;
        }
    }

    let state = &session.state;
    let seconds = state.time_ticks as f32 * SIM_DT;
    println!(
        "score {} | lives {} | fall speed {:.1} | {:.1}s simulated | high score {}",
        state.score, state.lives, state.fall_speed, seconds, state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}
