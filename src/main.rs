//! Nightmare Escape entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use nightmare_escape::Settings;
    use nightmare_escape::consts::*;
    use nightmare_escape::settings::looks_mobile;
    use nightmare_escape::sim::{self, Actors, FrameInput, GameEvent, KinematicWorld, frame, level};
    use nightmare_escape::view::{CameraRig, HudView, SceneSnapshot, capture_message};

    /// How long the capture toast stays up (ms)
    const TOAST_DURATION_MS: f64 = 4000.0;

    /// Game instance holding everything except the store
    struct Game {
        world: KinematicWorld,
        actors: Actors,
        input: FrameInput,
        camera: CameraRig,
        settings: Settings,
        /// Seconds since the round started
        elapsed: f32,
        last_time: f64,
        toast_until: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Last frame's snapshot, pulled by the host renderer
        scene_json: String,
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let mut world = KinematicWorld::new(level::restaurant());
            let actors = Actors::spawn(&mut world);
            Self {
                world,
                actors,
                input: FrameInput::default(),
                camera: CameraRig::default(),
                settings,
                elapsed: 0.0,
                last_time: 0.0,
                toast_until: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                scene_json: String::new(),
            }
        }

        /// Run the frame rules and refresh the scene snapshot
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            let result = sim::with_store_mut(|store| {
                let events = frame(store, &mut self.world, &mut self.actors, &self.input, self.elapsed, dt);
                if store.state().started() {
                    self.elapsed += dt;
                    self.camera
                        .follow(store.state().player_position(), dt, self.settings.camera_smoothing);
                }
                let snapshot = SceneSnapshot::capture(store.state(), &self.camera, &self.actors, &self.world);
                (events, snapshot)
            });

            match result {
                Ok((events, snapshot)) => {
                    self.input.end_frame();
                    for event in events {
                        if let GameEvent::Captured { by } = event {
                            self.show_toast(&capture_message(by), time);
                        }
                    }
                    match snapshot.to_json() {
                        Ok(json) => self.scene_json = json,
                        Err(e) => log::warn!("Scene snapshot failed: {}", e),
                    }
                }
                Err(e) => log::error!("{}", e),
            }

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

        fn show_toast(&mut self, text: &str, time: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("toast") {
                el.set_text_content(Some(text));
                let _ = el.set_attribute("class", "");
            }
            self.toast_until = time + TOAST_DURATION_MS;
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, time: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = match sim::with_store(|store| store.snapshot()) {
                Ok(state) => state,
                Err(e) => {
                    log::error!("{}", e);
                    return;
                }
            };
            let hud = HudView::from_state(&state);

            show(&document, "start-screen", !state.started());
            show(&document, "hud", state.started());

            set_text(&document, "#hud-score .hud-value", &hud.score.to_string());
            set_text(&document, "#hud-lives .hud-value", &hud.lives.to_string());
            set_text(&document, "#hud-survived .hud-value", &hud.survived.to_string());
            set_text(&document, "#hud-level", &hud.difficulty_label());
            set_text(&document, "#hud-stamina .hud-value", &format!("{}%", hud.stamina_pct));
            set_text(&document, "#hud-fear .hud-value", &format!("{}%", hud.fear_pct));
            set_bar(&document, "#hud-stamina .bar-fill", hud.stamina_pct);
            set_bar(&document, "#hud-fear .bar-fill", hud.fear_pct);
            set_text(&document, "#hud-action", hud.action.map(|a| a.text()).unwrap_or(""));

            show(&document, "badge-cursed", hud.cursed);
            show(&document, "badge-terrified", hud.terrified);

            show(&document, "hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            }

            if let Some(el) = document.get_element_by_id("vignette") {
                let style = if self.settings.effective_vignette() {
                    format!(
                        "background: radial-gradient(circle, transparent {}%, rgba(139, 0, 0, {:.1}) 100%)",
                        hud.vignette_clear_pct, hud.vignette_alpha
                    )
                } else {
                    String::from("display: none")
                };
                let _ = el.set_attribute("style", &style);
            }

            if time > self.toast_until {
                show(&document, "toast", false);
            }
        }

        /// New round: store restart plus actors back on their spawns
        fn restart(&mut self) {
            if let Err(e) = sim::with_store_mut(|store| store.restart()) {
                log::error!("{}", e);
                return;
            }
            self.actors.reset(&mut self.world);
            self.input = FrameInput {
                mobile: self.input.mobile,
                ..Default::default()
            };
            self.camera = CameraRig::default();
            self.elapsed = 0.0;
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_bar(document: &Document, selector: &str, pct: u32) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            let _ = el.set_attribute("style", &format!("width: {}%", pct.min(100)));
        }
    }

    /// Latest scene snapshot as JSON, for the page's 3D renderer
    #[wasm_bindgen]
    pub fn scene_snapshot() -> String {
        GAME.with(|slot| {
            slot.borrow()
                .as_ref()
                .map(|game| game.borrow().scene_json.clone())
                .unwrap_or_default()
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }
        log::info!("Nightmare Escape starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        sim::install();

        let settings = Settings::load();
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(1024.0);
        let mobile = settings.mobile_controls.enabled(looks_mobile(&user_agent, width));
        show(&document, "mobile-controls", mobile);

        let game = Rc::new(RefCell::new(Game::new(settings)));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        if mobile {
            setup_mobile_controls(&document, game.clone());
        }

        request_animation_frame(game);
        log::info!("Nightmare Escape running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.input.keyboard.set_key(&code, pressed) {
                    event.prevent_default();
                } else if pressed && code == "KeyF" {
                    g.settings.show_fps = !g.settings.show_fps;
                    g.settings.save();
                } else if pressed && code == "Enter" {
                    if let Err(e) = sim::with_store_mut(|store| store.start()) {
                        log::error!("{}", e);
                    }
                }
            });
            let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drop held keys when the window loses focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.keyboard = Default::default();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Err(e) = sim::with_store_mut(|store| store.start()) {
                    log::error!("{}", e);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mobile_controls(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(pad) = document.get_element_by_id("joystick") {
            // Drag relative to the pad center
            let on_drag = {
                let game = game.clone();
                let pad = pad.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if let Some(touch) = event.touches().get(0) {
                        let rect = pad.get_bounding_client_rect();
                        let center = Vec2::new(
                            (rect.left() + rect.width() / 2.0) as f32,
                            (rect.top() + rect.height() / 2.0) as f32,
                        );
                        let drag = Vec2::new(touch.client_x() as f32, touch.client_y() as f32) - center;
                        game.borrow_mut()
                            .input
                            .mobile
                            .move_joystick(drag, (rect.width() / 2.0) as f32);
                    }
                })
            };
            for event_name in ["touchstart", "touchmove"] {
                let _ = pad.add_event_listener_with_callback(event_name, on_drag.as_ref().unchecked_ref());
            }
            on_drag.forget();

            let on_release = {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.mobile.release_joystick();
                })
            };
            for event_name in ["touchend", "touchcancel"] {
                let _ = pad.add_event_listener_with_callback(event_name, on_release.as_ref().unchecked_ref());
            }
            on_release.forget();
        }

        if let Some(btn) = document.get_element_by_id("jump-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.mobile.request_jump();
            });
            let _ = btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("run-btn") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let running = game.borrow_mut().input.mobile.toggle_run();
                btn_clone.set_text_content(Some(if running { "🏃" } else { "🚶" }));
            });
            let _ = btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
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
                PHYSICS_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.update_hud(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Nightmare Escape (native) starting...");
    log::info!("Native mode runs a scripted headless session - serve the wasm build for the playable version");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use nightmare_escape::sim::{
        self, Actors, FrameInput, GameEvent, KeyboardState, KinematicWorld, StoreError, frame, level,
    };
    use nightmare_escape::view::{CameraRig, HudView, SceneSnapshot, capture_message};

    const FPS: f32 = 60.0;

    /// One scripted stretch of input
    struct Leg {
        seconds: f32,
        keys: KeyboardState,
    }

    /// Two rounds: wander into Ronald, then restart and sprint away
    pub fn run() -> Result<(), StoreError> {
        sim::install();

        let mut world = KinematicWorld::new(level::restaurant());
        let mut actors = Actors::spawn(&mut world);
        let mut camera = CameraRig::default();

        let rounds = [
            vec![
                Leg {
                    seconds: 1.0,
                    keys: KeyboardState::default(),
                },
                Leg {
                    seconds: 3.0,
                    keys: KeyboardState {
                        right: true,
                        back: true,
                        ..Default::default()
                    },
                },
            ],
            vec![Leg {
                seconds: 3.0,
                keys: KeyboardState {
                    forward: true,
                    left: true,
                    run: true,
                    ..Default::default()
                },
            }],
        ];

        for (round, legs) in rounds.iter().enumerate() {
            if round > 0 {
                sim::with_store_mut(|store| store.restart())?;
                actors.reset(&mut world);
                camera = CameraRig::default();
            }
            sim::with_store_mut(|store| store.start())?;

            let dt = 1.0 / FPS;
            let mut elapsed = 0.0;
            for leg in legs {
                let input = FrameInput {
                    keyboard: leg.keys,
                    ..Default::default()
                };
                for _ in 0..(leg.seconds * FPS) as u32 {
                    let events = sim::with_store_mut(|store| {
                        let events = frame(store, &mut world, &mut actors, &input, elapsed, dt);
                        camera.follow(store.state().player_position(), dt, true);
                        events
                    })?;
                    elapsed += dt;

                    for event in events {
                        match event {
                            GameEvent::Captured { by } => log::info!("{}", capture_message(by)),
                            other => log::debug!("{:?}", other),
                        }
                    }
                }
            }

            let state = sim::with_store(|store| store.snapshot())?;
            let hud = HudView::from_state(&state);
            log::info!(
                "Round {} done: {} | stamina {}% | fear {}% | cursed {} | survived {}",
                round + 1,
                hud.difficulty_label(),
                hud.stamina_pct,
                hud.fear_pct,
                hud.cursed,
                hud.survived
            );
        }

        let snapshot = sim::with_store(|store| SceneSnapshot::capture(store.state(), &camera, &actors, &world))?;
        match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize scene: {}", e),
        }

        sim::uninstall();
        Ok(())
    }
}
