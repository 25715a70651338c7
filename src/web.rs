//! Browser host
//!
//! Canvas 2D drawing, keyboard and touch input, HUD, upgrade menu and
//! visibility pause. Only reads simulation state and drains its events.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    TouchEvent,
};

use crate::audio::AudioManager;
use crate::sim::{
    FrameClock, GameState, PauseReason, PlayerFrame, TickInput, UpgradeKind,
    joystick_vector, tick,
};
use crate::{Settings, Tuning};

/// Knob travel in pixels for a full-speed joystick push
const JOYSTICK_MAX_DIST: f32 = 40.0;
/// Resting knob position inside the pad
const JOYSTICK_REST: f32 = 35.0;

/// Game instance holding all state
struct Game {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    settings: Settings,
    audio: AudioManager,
    ctx: CanvasRenderingContext2d,
    document: Document,
    running: bool,
}

impl Game {
    /// One animation frame: simulate, play cues, draw, update HUD
    fn frame(&mut self, time_ms: f64) {
        let ticks = self.clock.advance(time_ms / 1000.0);
        for _ in 0..ticks {
            tick(&mut self.state, &self.input);
        }

        for event in self.state.drain_events() {
            if let Some(cue) = event.cue() {
                self.audio.play(cue);
            }
        }

        self.render();
        self.update_hud();
    }

    /// Draw the world (read-only)
    fn render(&self) {
        let ctx = &self.ctx;
        let state = &self.state;
        let w = state.tuning.canvas_width as f64;
        let h = state.tuning.canvas_height as f64;

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#1d2b1f");
        ctx.fill_rect(0.0, 0.0, w, h);

        self.circle(state.coin.pos, state.coin.radius, "#f5c542");
        if state.money_bag.active {
            self.circle(state.money_bag.pos, state.money_bag.radius, "#3fa34d");
        }

        let player = &state.player;
        let color = if state.upgrades.invincibility.active {
            "#e0e0e0"
        } else {
            match player.sprite.frame {
                PlayerFrame::Idle => "#f2a97e",
                PlayerFrame::Bloodshot => "#e86a5a",
                PlayerFrame::EyesClosed => "#c98a6b",
                PlayerFrame::Hurt => "#b3261e",
            }
        };
        let scale = self.settings.draw_scale(player.spring.scale);
        self.circle(player.pos, player.radius * scale, color);

        if state.enemy.active {
            self.circle(state.enemy.pos, state.enemy.radius, "#8e44ad");
        }
    }

    fn circle(&self, pos: glam::Vec2, radius: f32, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        if self
            .ctx
            .arc(pos.x as f64, pos.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(&self) {
        if let Some(el) = self.document.get_element_by_id("scoreDisplay") {
            el.set_text_content(Some(&self.state.score_label()));
        }
        if let Some(el) = self.document.get_element_by_id("moneyDisplay") {
            el.set_text_content(Some(&self.state.currency_label()));
        }
    }

    fn set_menu_open(&mut self, open: bool) {
        self.state.set_paused(PauseReason::UpgradeMenu, open);
        show_elem(&self.document, "upgradeMenu", open);
        show_elem(&self.document, "upgradesBtn", !open);
        if !open {
            set_status(&self.document, UpgradeKind::Vacuum, "");
            set_status(&self.document, UpgradeKind::Invincibility, "");
        }
    }

    /// Shop button: close on success, keep the menu open on decline
    fn try_purchase(&mut self, kind: UpgradeKind) {
        match self.state.purchase(kind) {
            Ok(()) => self.set_menu_open(false),
            Err(e) => {
                log::info!("{e}");
                set_status(&self.document, kind, "Not enough money!");
            }
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.state.set_paused(PauseReason::Hidden, hidden);
        if hidden {
            self.audio.pause_music();
        } else if self.running {
            self.audio.resume_music();
        }
        self.clock.reset();
    }

    fn toggle_mute(&mut self) {
        self.settings.muted = !self.settings.muted;
        self.audio.apply_settings(&self.settings);
        if self.settings.muted {
            self.audio.pause_music();
        } else if self.running {
            self.audio.resume_music();
        }
        self.settings.save();
        if let Some(el) = self.document.get_element_by_id("muteBtn") {
            el.set_text_content(Some(if self.settings.muted { "Unmute" } else { "Mute" }));
        }
    }

    fn set_joystick(&mut self, dx: f32, dy: f32) {
        self.input.joystick = joystick_vector(dx, dy, JOYSTICK_MAX_DIST);
        let knob = self.input.joystick * JOYSTICK_MAX_DIST;
        if let Some(el) = self
            .document
            .get_element_by_id("joystickKnob")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", JOYSTICK_REST + knob.x));
            let _ = style.set_property("top", &format!("{}px", JOYSTICK_REST + knob.y));
        }
    }
}

fn show_elem(document: &Document, id: &str, show: bool) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = el
            .style()
            .set_property("display", if show { "block" } else { "none" });
    }
}

fn set_status(document: &Document, kind: UpgradeKind, text: &str) {
    let id = match kind {
        UpgradeKind::Vacuum => "vacuumStatus",
        UpgradeKind::Invincibility => "invincibleStatus",
    };
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(f.as_ref().unchecked_ref());
    }
}

/// Register a click handler on an element by id
fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
    let Some(el) = document.get_element_by_id(id) else {
        log::warn!("Missing #{id}");
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
    let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Browser entry point, runs when the wasm module is instantiated
#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Coin Rush starting...");

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("gameCanvas")
        .ok_or("missing #gameCanvas")?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d context unavailable")?
        .dyn_into()?;

    let tuning = Tuning::for_canvas(canvas.width() as f32, canvas.height() as f32).map_err(|e| {
        log::error!("Cannot start: {e}");
        JsValue::from_str(&e.to_string())
    })?;

    let settings = Settings::load();
    let seed = js_sys::Date::now() as u64;
    let game = Rc::new(RefCell::new(Game {
        state: GameState::new(seed, tuning),
        clock: FrameClock::new(),
        input: TickInput::default(),
        audio: AudioManager::new(&settings),
        settings,
        ctx,
        document: document.clone(),
        running: false,
    }));

    show_elem(&document, "upgradeMenu", false);
    setup_keyboard(&window, game.clone())?;
    setup_joystick(&document, game.clone())?;
    setup_menu(&document, game.clone());
    setup_auto_pause(&document, game.clone())?;

    // Start button kicks off the loop (audio needs a user gesture)
    {
        let game = game.clone();
        let document = document.clone();
        on_click(&document.clone(), "startBtn", move || {
            {
                let mut g = game.borrow_mut();
                if g.running {
                    return;
                }
                g.running = true;
                g.audio.resume();
            }
            show_elem(&document, "startBtn", false);
            show_elem(&document, "gameCanvas", true);
            show_elem(&document, "upgradesBtn", true);
            show_elem(&document, "joystickArea", true);
            start_loop(game.clone());
            log::info!("Game started");
        });
    }

    Ok(())
}

fn start_loop(game: Rc<RefCell<Game>>) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::new(move |time: f64| {
        game.borrow_mut().frame(time);
        if let Some(cb) = f.borrow().as_ref() {
            request_animation_frame(cb);
        }
    }));

    if let Some(cb) = g.borrow().as_ref() {
        request_animation_frame(cb);
    }
}

fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().input.keys.set_key(&event.key(), pressed) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn setup_joystick(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let Some(area) = document.get_element_by_id("joystickArea") else {
        log::info!("No joystick area, touch input disabled");
        return Ok(());
    };

    for event in ["touchstart", "touchmove"] {
        let game = game.clone();
        let area_clone = area.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            event.prevent_default();
            let rect = area_clone.get_bounding_client_rect();
            let cx = rect.left() + rect.width() / 2.0;
            let cy = rect.top() + rect.height() / 2.0;
            let dx = touch.client_x() as f64 - cx;
            let dy = touch.client_y() as f64 - cy;
            game.borrow_mut().set_joystick(dx as f32, dy as f32);
        });
        area.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
        game.borrow_mut().set_joystick(0.0, 0.0);
    });
    area.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn setup_menu(document: &Document, game: Rc<RefCell<Game>>) {
    {
        let game = game.clone();
        on_click(document, "muteBtn", move || game.borrow_mut().toggle_mute());
    }
    {
        let game = game.clone();
        on_click(document, "upgradesBtn", move || game.borrow_mut().set_menu_open(true));
    }
    {
        let game = game.clone();
        on_click(document, "closeUpgradesBtn", move || {
            game.borrow_mut().set_menu_open(false)
        });
    }
    {
        let game = game.clone();
        on_click(document, "vacuumUpgrade", move || {
            game.borrow_mut().try_purchase(UpgradeKind::Vacuum)
        });
    }
    on_click(document, "invincibleUpgrade", move || {
        game.borrow_mut().try_purchase(UpgradeKind::Invincibility)
    });
}

fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let document_clone = document.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
        game.borrow_mut().set_hidden(hidden);
        log::info!("Tab {}", if hidden { "hidden, paused" } else { "visible" });
    });
    document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
