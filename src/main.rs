//! Pixel Wars entry point
//!
//! On the web this hosts the game on a canvas and pumps it from
//! `requestAnimationFrame`. Natively it runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, MouseEvent};

    use pixel_wars::platform::canvas::CanvasSink;
    use pixel_wars::platform::{
        START_LEVEL_ATTRIBUTE, pointer_to_playfield, settings_from_attribute, upgrade_control_id,
    };
    use pixel_wars::sim::UpgradeKind;
    use pixel_wars::{Game, InputEvent, Phase};

    /// Game plus the browser pieces it talks to
    struct Host {
        game: Game,
        sink: CanvasSink,
        speed_button: Option<HtmlButtonElement>,
    }

    impl Host {
        fn handle(&mut self, event: InputEvent) {
            let now = now_ms();
            self.game.handle(event, now, &mut self.sink);
            self.after_update();
        }

        fn pump(&mut self, now: f64) {
            self.game.advance(now, &mut self.sink);
            self.after_update();
        }

        fn after_update(&mut self) {
            if let Some(button) = &self.speed_button {
                button.set_disabled(self.game.speed_upgrade_disabled());
            }
            for event in self.game.drain_events() {
                log::trace!("{:?}", event);
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Pixel Wars starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = settings_from_attribute(canvas.get_attribute(START_LEVEL_ATTRIBUTE).as_deref());
        let mut sink = CanvasSink::new(&canvas, window.device_pixel_ratio())?;
        let seed = js_sys::Date::now() as u64;
        let game = Game::attach(settings, seed, &mut sink);

        let speed_button = document
            .get_element_by_id(upgrade_control_id(UpgradeKind::Speed))
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

        let host = Rc::new(RefCell::new(Host {
            game,
            sink,
            speed_button,
        }));

        setup_pointer_handlers(&canvas, host.clone())?;
        setup_upgrade_buttons(&document, host.clone())?;
        setup_teardown(&window, host.clone())?;

        request_animation_frame(host);

        log::info!("Pixel Wars ready");
        Ok(())
    }

    fn pointer_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let offset = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
        let client = Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32);
        pointer_to_playfield(offset, client)
    }

    fn setup_pointer_handlers(
        canvas: &HtmlCanvasElement,
        host: Rc<RefCell<Host>>,
    ) -> Result<(), JsValue> {
        // Enter also refreshes the aim so the first shot has a target
        for (name, event) in [
            ("mousedown", InputEvent::PointerDown),
            ("mouseup", InputEvent::PointerUp),
            ("mouseenter", InputEvent::PointerEnter),
            ("mouseleave", InputEvent::PointerLeave),
        ] {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |mouse: MouseEvent| {
                let mut h = host.borrow_mut();
                if event == InputEvent::PointerEnter {
                    let pos = pointer_position(&canvas_clone, &mouse);
                    h.handle(InputEvent::PointerMove { x: pos.x, y: pos.y });
                }
                h.handle(event);
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |mouse: MouseEvent| {
                let pos = pointer_position(&canvas_clone, &mouse);
                host.borrow_mut()
                    .handle(InputEvent::PointerMove { x: pos.x, y: pos.y });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_upgrade_buttons(
        document: &web_sys::Document,
        host: Rc<RefCell<Host>>,
    ) -> Result<(), JsValue> {
        for kind in UpgradeKind::ALL {
            let id = upgrade_control_id(kind);
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Upgrade control #{} not found", id);
                continue;
            };
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().handle(InputEvent::Upgrade(kind));
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_teardown(window: &web_sys::Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().game.detach();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        let finished = {
            let mut h = host.borrow_mut();
            h.pump(time);
            h.game.phase() == Phase::GameOver
        };

        if finished {
            log::info!("Frame loop stopped");
            return;
        }
        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_host::run() {
        log::error!("Pixel Wars failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use pixel_wars::autopilot::{Autopilot, SessionSummary, run_session};
    use pixel_wars::renderer::DrawLog;
    use pixel_wars::sim::{UpgradeKind, World};
    use pixel_wars::{Game, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "pixel-wars")]
    #[command(about = "Run a headless Pixel Wars session driven by the autopilot")]
    struct Args {
        /// Settings file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Level to start at (overrides the settings file)
        #[arg(long)]
        start_level: Option<u32>,

        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated time to run, in milliseconds
        #[arg(long, default_value_t = 60_000.0)]
        duration_ms: f64,

        /// Clock step between frames, in milliseconds
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,

        /// Upgrade priority for the autopilot
        #[arg(long, value_delimiter = ',', default_value = "speed,bullet")]
        upgrades: Vec<UpgradeKind>,

        /// Print the summary and final world as JSON
        #[arg(long)]
        json: bool,
    }

    #[derive(Serialize)]
    struct Report<'a> {
        seed: u64,
        summary: &'a SessionSummary,
        world: &'a World,
    }

    fn load_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Settings::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Settings::default(),
        };
        if let Some(level) = args.start_level {
            settings.start_level = level;
        }
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let settings = load_settings(&args)?;
        let clock_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let seed = settings.seed_or(clock_seed);

        let mut sink = DrawLog::last_frame();
        let mut game = Game::attach(settings, seed, &mut sink);
        let autopilot = Autopilot::with_priorities(args.upgrades.clone());

        log::info!("Running headless session for {} ms", args.duration_ms);
        let summary = run_session(&mut game, &autopilot, args.duration_ms, args.frame_ms, &mut sink);

        if args.json {
            let report = Report {
                seed,
                summary: &summary,
                world: game.world(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("=== PIXEL WARS ===");
        println!("  Seed:       {}", seed);
        println!("  Elapsed:    {:.0} ms ({} ticks)", summary.elapsed_ms, summary.ticks);
        println!("  Level:      {}", summary.level);
        println!("  Score:      {}", summary.score);
        println!("  Destroyed:  {}", summary.enemies_destroyed);
        println!("  Shots:      {}", summary.shots_fired);
        println!("  Upgrades:   {}", summary.upgrades.len());
        println!(
            "  Outcome:    {}",
            if summary.game_over { "tower destroyed" } else { "still standing" }
        );
        println!();
        for line in sink.texts() {
            println!("  | {}", line);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
