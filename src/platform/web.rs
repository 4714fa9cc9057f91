//! Browser shell: requestAnimationFrame loop, input listeners, JS API

use std::cell::RefCell;
use std::rc::Rc;

use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

use crate::game::{FrameRequest, FrameTicket, Game};
use crate::persistence::LocalStorageStore;
use crate::sim::{GameMode, RngSource};

type BrowserGame = Game<RngSource<Pcg32>, LocalStorageStore>;

/// Shared shell state: the game plus the presentation callback
struct Shell {
    game: BrowserGame,
    /// Called with the frame report JSON after every frame
    on_frame: Option<js_sys::Function>,
}

impl Shell {
    fn snapshot_json(&self) -> String {
        to_json(&self.game.snapshot())
    }

    /// Drain the frame's events. JSON is built only when someone listens.
    fn end_frame(&mut self) -> Option<(js_sys::Function, String)> {
        let report = self.game.frame_report();
        let callback = self.on_frame.clone()?;
        Some((callback, to_json(&report)))
    }
}

fn to_json(value: &impl serde::Serialize) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Snapshot serialization failed: {}", e);
            String::new()
        }
    }
}

/// JS handle to a running game
#[wasm_bindgen]
pub struct WebGame {
    shell: Rc<RefCell<Shell>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let shell = Rc::new(RefCell::new(Shell {
            game: Game::with_seed(seed, LocalStorageStore),
            on_frame: None,
        }));
        setup_input_handlers(shell.clone());
        log::info!("Game initialized with seed: {}", seed);
        WebGame { shell }
    }

    /// Start a run: "standard", "playful" or "zen"
    pub fn start(&self, mode: &str) -> Result<(), JsValue> {
        let mode = mode
            .parse::<GameMode>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.shell.borrow_mut().game.start(mode);
        start_loop(self.shell.clone());
        Ok(())
    }

    /// Retry after a crash; false if no run has ended
    pub fn retry(&self) -> bool {
        let restarted = self.shell.borrow_mut().game.retry();
        if restarted {
            start_loop(self.shell.clone());
        }
        restarted
    }

    /// Abandon or leave the current run
    pub fn menu(&self) {
        self.shell.borrow_mut().game.return_to_menu();
    }

    pub fn flap(&self) {
        self.shell.borrow_mut().game.trigger_impulse();
    }

    /// Register a presentation callback receiving the frame report JSON
    /// (snapshot fields plus an `events` array) each frame
    pub fn on_frame(&self, callback: js_sys::Function) {
        self.shell.borrow_mut().on_frame = Some(callback);
    }

    pub fn snapshot_json(&self) -> String {
        self.shell.borrow().snapshot_json()
    }

    pub fn best_score(&self) -> u32 {
        self.shell.borrow().game.best_score()
    }

    /// Game-over message, once the run has ended
    pub fn outcome_message(&self) -> Option<String> {
        self.shell
            .borrow()
            .game
            .outcome()
            .map(|o| o.message().to_string())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

fn start_loop(shell: Rc<RefCell<Shell>>) {
    let ticket = shell.borrow().game.begin_frames();
    if let Some(ticket) = ticket {
        request_animation_frame(shell, ticket);
    }
}

fn request_animation_frame(shell: Rc<RefCell<Shell>>, ticket: FrameTicket) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, cannot schedule frames");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(shell, ticket, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(shell: Rc<RefCell<Shell>>, ticket: FrameTicket, _time: f64) {
    // Bubbles age on wall-clock time, same clock as their timestamps
    let now = js_sys::Date::now();
    let (request, notify) = {
        let mut s = shell.borrow_mut();
        let request = s.game.frame(ticket, now);
        (request, s.end_frame())
    };

    if let Some((callback, json)) = notify {
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::warn!("on_frame callback failed: {:?}", e);
        }
    }

    if let FrameRequest::Continue(ticket) = request {
        request_animation_frame(shell, ticket);
    }
}

fn setup_input_handlers(shell: Rc<RefCell<Shell>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    // Space bar
    {
        let shell = shell.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.code() == "Space" || event.key() == " " {
                event.prevent_default();
                shell.borrow_mut().game.trigger_impulse();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse click
    {
        let shell = shell.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            shell.borrow_mut().game.trigger_impulse();
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            shell.borrow_mut().game.trigger_impulse();
        });
        let _ =
            window.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Install the panic hook and console logger. Safe to call more than once.
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Astro Doge starting...");
    }
}
