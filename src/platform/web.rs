//! Browser entry point
//!
//! Owns the canvas, the wgpu surface and the `requestAnimationFrame` loop.
//! Keyboard, focus and resize events feed the frame driver; the HUD is
//! written into the page's DOM after each frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

use super::FrameClock;
use crate::audio::WebAudio;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::highscores::HighScores;
use crate::input::SessionCommand;
use crate::persistence::{KeyValueStore, LocalStorage, MemoryStore};
use crate::renderer::{RenderState, SceneOptions, build_scene};
use crate::settings::{QualityPreset, Settings};
use crate::sim::{Bounds, GamePhase};
use crate::tuning::Tuning;

type Store = Box<dyn KeyValueStore>;

/// Frames slower than this get a debug line
const LONG_FRAME_MS: f64 = 50.0;

/// Keys whose default action would scroll the page
const SCROLL_KEYS: [&str; 5] = [" ", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

/// Initialize logging, then build and start the game on `#canvas`
pub async fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Asteroid Drift starting...");

    match App::create().await {
        Ok(app) => {
            let app = Rc::new(RefCell::new(app));
            setup_input_handlers(app.clone());
            request_animation_frame(app);
            log::info!("Asteroid Drift running!");
        }
        Err(e) => log::error!("Startup failed: {}", e),
    }
}

/// Storage for scores and settings, memory-only when LocalStorage is blocked
fn open_store() -> Store {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{}; scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn graphics(message: &str) -> Error {
    Error::Graphics(message.to_owned())
}

/// Match the canvas backing store to its CSS size
///
/// Returns the playfield in CSS pixels and the surface size in device pixels.
fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (Bounds, u32, u32) {
    let dpr = window.device_pixel_ratio();
    let client_w = canvas.client_width().max(1);
    let client_h = canvas.client_height().max(1);
    let width = (f64::from(client_w) * dpr) as u32;
    let height = (f64::from(client_h) * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (Bounds::new(client_w as f32, client_h as f32), width, height)
}

fn set_text(document: &Document, selector: &str, text: &str) {
    if let Some(el) = document.query_selector(selector).ok().flatten() {
        el.set_text_content(Some(text));
    }
}

fn set_visible(document: &Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
    }
}

struct App {
    game: Game<HighScores<Store>, WebAudio>,
    render_state: RenderState,
    clock: FrameClock,
    options: SceneOptions,
    settings_store: Store,
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
}

impl App {
    async fn create() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| graphics("no window"))?;
        let document = window.document().ok_or_else(|| graphics("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| graphics("no #canvas element"))?
            .dyn_into()
            .map_err(|_| graphics("#canvas is not a canvas"))?;
        let (bounds, width, height) = fit_canvas(&window, &canvas);

        let settings_store = open_store();
        let mut settings = Settings::load(&settings_store);
        if let Some(preset) = window
            .location()
            .search()
            .ok()
            .and_then(|query| QualityPreset::from_query(&query))
        {
            log::info!("Quality override from URL: {}", preset.as_str());
            settings.quality = preset;
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| Error::Graphics(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Graphics(e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, bounds).await?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(
            seed,
            bounds,
            Tuning::default(),
            HighScores::new(open_store()),
            WebAudio::new(&settings),
        );
        game.apply_settings(&settings);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
        set_visible(&document, "hud", true);

        Ok(Self {
            game,
            render_state,
            clock: FrameClock::new(),
            options: SceneOptions::from_settings(&settings),
            settings_store,
            window,
            document,
            canvas,
        })
    }

    fn key_down(&mut self, key: &str) {
        // A key press is the user gesture that unlocks audio
        self.game.audio().resume();
        if self.game.key_down(key, js_sys::Date::now()) == Some(SessionCommand::ToggleMute) {
            if let Err(e) = self.game.settings().save(&mut self.settings_store) {
                log::warn!("Settings not saved: {}", e);
            }
        }
    }

    fn resize(&mut self) {
        let (bounds, width, height) = fit_canvas(&self.window, &self.canvas);
        self.game.resize(bounds.width, bounds.height);
        self.render_state.resize(width, height, self.game.state().bounds);
    }

    fn frame(&mut self) {
        let now = js_sys::Date::now();
        // Motion is per frame; elapsed time only flags stalls
        let dt = self.clock.tick(now);
        if dt > LONG_FRAME_MS {
            log::debug!("Long frame: {:.1} ms", dt);
        }

        self.game.frame(now);

        let vertices = build_scene(self.game.state(), now, &self.options);
        match self.render_state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        self.update_hud(now);
    }

    /// Update HUD elements in DOM
    fn update_hud(&self, now: f64) {
        let hud = self.game.hud(now);
        let document = &self.document;

        set_text(document, "#hud-score .hud-value", &hud.score.to_string());
        set_text(document, "#hud-level .hud-value", &hud.level.to_string());
        set_text(document, "#hud-lives .hud-value", &hud.lives.to_string());
        set_text(document, "#hud-best .hud-value", &hud.high_score.to_string());
        set_text(document, "#hud-fps .hud-value", &self.clock.fps().to_string());

        let power = match hud.power_up_label {
            Some(label) => format!("{} {:.0}s", label, (hud.power_up_remaining / 1000.0).ceil()),
            None => String::new(),
        };
        set_text(document, "#hud-power .hud-value", &power);
        set_visible(document, "hud-power", hud.power_up.is_some());
        set_visible(document, "hud-muted", self.game.settings().muted);

        set_visible(document, "title-screen", hud.phase == GamePhase::NotStarted);
        let over = self.game.state().session.is_game_over();
        set_visible(document, "game-over", over);
        if over {
            set_text(document, "#final-score", &hud.score.to_string());
            set_text(document, "#final-best", &hud.high_score.to_string());
        }
    }
}

fn setup_input_handlers(app: Rc<RefCell<App>>) {
    let window = app.borrow().window.clone();

    // Keyboard
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if SCROLL_KEYS.contains(&key.as_str()) {
                event.prevent_default();
            }
            if event.repeat() {
                return;
            }
            app.borrow_mut().key_down(&key);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            app.borrow_mut().game.key_up(&event.key());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Window blur (click outside): nothing stays held
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().game.blur();
            log::debug!("Controls released (window blur)");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Window resize
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        app.borrow_mut().frame();
        request_animation_frame(app);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}
