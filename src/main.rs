//! Stress Buster entry point
//!
//! Handles platform-specific initialization and runs the render loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PointerEvent};

    use stress_buster::audio::WebFeedback;
    use stress_buster::{Game, Settings};
    use stress_buster::consts::{FRAME, SATISFACTION_MAX};
    use stress_buster::draw::{Color, DrawCommand};
    use stress_buster::persistence::LocalStorageStore;
    use stress_buster::renderer::RenderState;
    use stress_buster::sim::SplashBehavior;

    /// How long the unlock toast stays up
    const TOAST_MS: i32 = 2500;

    type WebGame = Game<LocalStorageStore, WebFeedback>;

    /// App instance holding the game and its view
    struct App {
        game: WebGame,
        render_state: Option<RenderState>,
        document: Document,
        dpr: f64,
        /// Last overlay contents, to skip DOM rebuilds on static frames
        overlay_key: String,
    }

    impl App {
        /// One animation frame: advance, render, refresh overlay
        fn frame(&mut self) {
            let commands = self.game.frame(FRAME);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&commands) {
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
            self.update_overlay(&commands);
        }

        /// Mirror text commands into the DOM overlay
        fn update_overlay(&mut self, commands: &[DrawCommand]) {
            let texts: Vec<_> = commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Text { .. }))
                .collect();
            let key = format!("{texts:?}");
            if key == self.overlay_key {
                return;
            }
            self.overlay_key = key;

            let Some(overlay) = self.document.get_element_by_id("overlay") else {
                return;
            };
            overlay.set_inner_html("");
            for cmd in texts {
                let DrawCommand::Text {
                    anchor,
                    text,
                    size,
                    color,
                } = cmd
                else {
                    continue;
                };
                let Ok(el) = self.document.create_element("div") else {
                    continue;
                };
                let style = format!(
                    "position:absolute;left:{}px;top:{}px;font-size:{}px;color:{};transform:translateX(-50%);white-space:nowrap;",
                    anchor.x as f64 / self.dpr,
                    anchor.y as f64 / self.dpr,
                    *size as f64 / self.dpr,
                    css_color(*color),
                );
                let _ = el.set_attribute("style", &style);
                el.set_text_content(Some(text));
                let _ = overlay.append_child(&el);
            }
        }

        /// Canvas size changed; resize surface and game together
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let window = web_sys::window();
            self.dpr = window.map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let width = (canvas.client_width() as f64 * self.dpr) as u32;
            let height = (canvas.client_height() as f64 * self.dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            self.game.resize(width as f32, height as f32);
        }
    }

    fn css_color(c: Color) -> String {
        format!("rgba({},{},{},{:.3})", c.r, c.g, c.b, c.a as f32 / 255.0)
    }

    /// Local calendar date as YYYY-MM-DD
    fn today() -> String {
        let now = js_sys::Date::new_0();
        format!(
            "{:04}-{:02}-{:02}",
            now.get_full_year(),
            now.get_month() + 1,
            now.get_date()
        )
    }

    /// Query parameter from the page URL (`?mode=SAND_CUT&burst=8&toggle=off`)
    fn query_param(window: &web_sys::Window, name: &str) -> Option<String> {
        let search = window.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        params.get(name)
    }

    /// Host variants: burst size and whether the mode toggle is shown
    fn page_settings(window: &web_sys::Window, store: &LocalStorageStore) -> Settings {
        let mut settings = Settings::load(store);
        if let Some(burst) = query_param(window, "burst") {
            match burst.parse::<usize>() {
                Ok(n) => settings = settings.with_burst_size(n),
                Err(_) => log::warn!("Ignoring burst={burst:?}"),
            }
        }
        let toggle = query_param(window, "toggle").is_none_or(|v| v != "off");
        settings.with_mode_toggle(toggle)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Stress Buster starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let store = LocalStorageStore::default();
        let settings = page_settings(&window, &store);
        let mut game = Game::with_settings(store, WebFeedback::new(), seed, settings);
        let mode = game.attach(query_param(&window, "mode").as_deref(), &today());
        log::info!("Game initialized in {} with seed: {}", mode.as_str(), seed);

        let doc = document.clone();
        game.set_satisfaction_listener(move |value| update_meter(&doc, value));
        let doc = document.clone();
        game.set_unlock_listener(move |unlock| show_toast(&doc, unlock.message()));
        update_meter(&document, game.satisfaction());

        let app = Rc::new(RefCell::new(App {
            game,
            render_state: None,
            document: document.clone(),
            dpr: window.device_pixel_ratio(),
            overlay_key: String::new(),
        }));
        app.borrow_mut().resize(&canvas);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = (canvas.width(), canvas.height());
        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Renderer setup failed: {e}")))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());
        setup_controls(&document, app.clone());
        setup_lifecycle(&canvas, app.clone());

        // Start render loop
        request_animation_frame(app);

        log::info!("Stress Buster running!");
        Ok(())
    }

    fn update_meter(document: &Document, value: u8) {
        if let Some(el) = document.get_element_by_id("satisfaction-fill") {
            let pct = value as f32 / SATISFACTION_MAX as f32 * 100.0;
            let _ = el.set_attribute("style", &format!("width:{pct}%"));
        }
        if let Some(el) = document.get_element_by_id("satisfaction-value") {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn show_toast(document: &Document, message: &str) {
        let Some(toast) = document.get_element_by_id("unlock-toast") else {
            log::info!("{message}");
            return;
        };
        toast.set_text_content(Some(message));
        let _ = toast.set_attribute("class", "");

        let hide = Closure::once_into_js(move || {
            let _ = toast.set_attribute("class", "hidden");
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                TOAST_MS,
            );
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Press-down only; moves and releases are ignored
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let mut a = app.borrow_mut();
            let x = (event.offset_x() as f64 * a.dpr) as f32;
            let y = (event.offset_y() as f64 * a.dpr) as f32;
            let outcome = a.game.press(x, y);
            log::debug!("Press at ({x}, {y}): {outcome:?}");
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Wire a click handler to a button by id, if the page has it
    fn on_click(document: &Document, id: &str, app: Rc<RefCell<App>>, action: fn(&mut WebGame)) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut a = app.borrow_mut();
            action(&mut a.game);
            sync_controls(&doc, &a.game);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Mark the active splash behavior and feedback toggles
    fn sync_controls(document: &Document, game: &WebGame) {
        let behavior = game.splash_behavior();
        let settings = game.settings();
        let states = [
            ("btn-vanish", behavior == SplashBehavior::Vanish),
            ("btn-permanent", behavior == SplashBehavior::Permanent),
            ("btn-sound", settings.sound_enabled),
            ("btn-vibration", settings.vibration_enabled),
        ];
        for (id, active) in states {
            if let Some(btn) = document.get_element_by_id(id) {
                let _ = btn.set_attribute("class", if active { "active" } else { "" });
            }
        }
    }

    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) {
        sync_controls(document, &app.borrow().game);
        on_click(document, "btn-vanish", app.clone(), |g| {
            g.set_splash_behavior(SplashBehavior::Vanish)
        });
        on_click(document, "btn-permanent", app.clone(), |g| {
            g.set_splash_behavior(SplashBehavior::Permanent)
        });
        on_click(document, "btn-clear", app.clone(), |g| g.clear_splashes());
        on_click(document, "btn-sound", app.clone(), |g| {
            let enabled = !g.settings().sound_enabled;
            g.set_sound_enabled(enabled);
        });
        on_click(document, "btn-vibration", app, |g| {
            let enabled = !g.settings().vibration_enabled;
            g.set_vibration_enabled(enabled);
        });
    }

    fn setup_lifecycle(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Resize
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize(&canvas);
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.detach();
            });
            let _ =
                window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            render_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Scheduled every frame whether or not anything is animating
    fn render_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = web_app::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use stress_buster::Game;
    use stress_buster::audio::LogFeedback;
    use stress_buster::consts::FRAME;
    use stress_buster::persistence::JsonFileStore;
    use stress_buster::progress::DailyChallenge;

    env_logger::init();
    log::info!("Stress Buster (native) starting...");
    log::info!("Native mode runs a scripted session - run with `trunk serve` for the web version");

    let mode_name = std::env::args().nth(1);
    let prefs = std::env::var("STRESS_BUSTER_PREFS")
        .unwrap_or_else(|_| "stress_buster_prefs.json".to_string());
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let mut game = Game::new(JsonFileStore::new(prefs), LogFeedback::default(), 0x5eed);
    game.set_satisfaction_listener(|v| log::info!("Satisfaction: {v}"));
    game.set_unlock_listener(|unlock| println!("{}", unlock.message()));
    let mode = game.attach(mode_name.as_deref(), &today);
    game.resize(1080.0, 1920.0);

    // Sweep taps down the middle of the screen
    for i in 0..12 {
        let y = 155.0 + i as f32 * 150.0;
        let outcome = game.press(540.0 - 62.5, y);
        log::info!("Tap {i}: {outcome:?}");
        for _ in 0..10 {
            game.frame(FRAME);
        }
    }

    println!(
        "{}: satisfaction {}, daily progress {}/{}",
        mode.label(),
        game.satisfaction(),
        DailyChallenge::progress(game.store()),
        DailyChallenge::goal(game.store())
    );
    game.detach();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
