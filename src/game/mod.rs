//! Game loop driver
//!
//! Owns the world, the RNG and two independent repeating tasks: the fixed
//! 10 ms simulation tick and the fire action (one shot per `fire_delay`).
//! Hosts feed it input events and call `advance` with the current time;
//! every due task runs in time order.
//!
//! Phases:
//! - `Idle`: before the pointer first enters, and after it leaves (paused)
//! - `Running`: tick schedule active, firing allowed
//! - `GameOver`: terminal; a new `Game` is needed to play again

pub mod schedule;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_CATCH_UP_TICKS, TICK_MS};
use crate::renderer::{DrawSink, render_game_over, render_world, scene::render_tower};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, UpgradeKind, World};
use schedule::{RepeatingTask, due_at};

/// Driver phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// Input delivered by the host between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button pressed: start firing
    PointerDown,
    /// Button released: stop firing
    PointerUp,
    /// Pointer moved to playfield coordinates (aim)
    PointerMove { x: f32, y: f32 },
    /// Pointer entered the playfield: resume
    PointerEnter,
    /// Pointer left the playfield: pause
    PointerLeave,
    /// Upgrade control pressed
    Upgrade(UpgradeKind),
}

/// Game instance holding all state
pub struct Game {
    world: World,
    settings: Settings,
    rng: Pcg32,
    phase: Phase,
    /// Last known pointer position
    aim: Option<Vec2>,
    tick_task: Option<RepeatingTask>,
    fire_task: Option<RepeatingTask>,
    /// Events not yet collected by the host
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game. `fallback_seed` is used when the settings carry none.
    pub fn new(settings: Settings, fallback_seed: u64) -> Self {
        let seed = settings.seed_or(fallback_seed);
        log::info!(
            "New game: start level {}, seed {}",
            settings.start_level,
            seed
        );
        Self {
            world: World::new(settings.start_level),
            rng: Pcg32::seed_from_u64(seed),
            settings,
            phase: Phase::Idle,
            aim: None,
            tick_task: None,
            fire_task: None,
            events: Vec::new(),
        }
    }

    /// Create a game and draw the initial tower
    pub fn attach<S: DrawSink + ?Sized>(settings: Settings, fallback_seed: u64, sink: &mut S) -> Self {
        let game = Self::new(settings, fallback_seed);
        render_tower(&game.world, &game.settings.palette, sink);
        game
    }

    /// Cancel both repeating tasks (component torn down)
    pub fn detach(&mut self) {
        self.cancel_all();
        if self.phase == Phase::Running {
            self.phase = Phase::Idle;
        }
        log::info!("Game detached");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn aim(&self) -> Option<Vec2> {
        self.aim
    }

    pub fn is_firing(&self) -> bool {
        self.fire_task.is_some()
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_task.is_some()
    }

    /// Whether the speed upgrade control should be disabled
    pub fn speed_upgrade_disabled(&self) -> bool {
        sim::fire_delay_at_minimum(&self.world)
    }

    /// Whether an upgrade could be bought right now
    pub fn upgrade_available(&self, kind: UpgradeKind) -> bool {
        self.phase != Phase::GameOver && sim::can_buy(&self.world, kind)
    }

    /// Take all gameplay events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one input event at time `now_ms`
    pub fn handle<S: DrawSink + ?Sized>(&mut self, event: InputEvent, now_ms: f64, sink: &mut S) {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.aim = Some(Vec2::new(x, y));
            }
            InputEvent::PointerEnter => {
                if self.phase != Phase::Idle {
                    return;
                }
                self.phase = Phase::Running;
                self.tick_task = Some(RepeatingTask::immediately(now_ms));
                log::info!("Running (level {})", self.world.level);
                self.advance(now_ms, sink);
            }
            InputEvent::PointerLeave => {
                if self.phase != Phase::Running {
                    return;
                }
                self.cancel_all();
                self.phase = Phase::Idle;
                log::info!("Paused at tick {}", self.world.tick_number);
            }
            InputEvent::PointerDown => {
                if self.phase != Phase::Running || self.fire_task.is_some() {
                    return;
                }
                let delay = f64::from(self.world.tower.fire_delay);
                self.fire_task = Some(RepeatingTask::after(now_ms, delay));
            }
            InputEvent::PointerUp => {
                self.fire_task = None;
            }
            InputEvent::Upgrade(kind) => {
                if self.phase == Phase::GameOver {
                    return;
                }
                sim::buy_upgrade(&mut self.world, kind);
                self.collect_events();
                render_world(&self.world, &self.settings.palette, sink);
            }
        }
    }

    /// Run every task due by `now_ms`, in time order. Returns ticks run.
    pub fn advance<S: DrawSink + ?Sized>(&mut self, now_ms: f64, sink: &mut S) -> u32 {
        let mut ticks = 0;

        while self.phase == Phase::Running {
            let next_tick = due_at(self.tick_task, now_ms);
            let next_fire = due_at(self.fire_task, now_ms);

            match (next_tick, next_fire) {
                (None, None) => break,
                (Some(t), Some(f)) if f < t => self.run_fire(),
                (None, Some(_)) => self.run_fire(),
                (Some(_), _) => {
                    if ticks >= MAX_CATCH_UP_TICKS {
                        self.drop_backlog(now_ms);
                        break;
                    }
                    self.run_tick(sink);
                    ticks += 1;
                }
            }
        }

        ticks
    }

    fn run_tick<S: DrawSink + ?Sized>(&mut self, sink: &mut S) {
        let palette = &self.settings.palette;
        let outcome = sim::tick(&mut self.world, &mut self.rng, |world| {
            render_world(world, palette, sink)
        });
        if let Some(task) = self.tick_task.as_mut() {
            task.reschedule(TICK_MS);
        }
        self.collect_events();

        if outcome.game_over() {
            self.enter_game_over(sink);
        }
    }

    fn run_fire(&mut self) {
        match self.aim {
            Some(aim) => {
                sim::fire(&mut self.world, aim);
                self.collect_events();
            }
            None => log::debug!("Fire skipped: no aim yet"),
        }
        // Read the delay now so upgrades apply from the next shot on
        let delay = f64::from(self.world.tower.fire_delay);
        if let Some(task) = self.fire_task.as_mut() {
            task.reschedule(delay);
        }
    }

    fn drop_backlog(&mut self, now_ms: f64) {
        log::warn!("Tick backlog dropped at {:.0} ms", now_ms);
        if let Some(task) = self.tick_task.as_mut() {
            task.resync(now_ms, TICK_MS);
        }
        let delay = f64::from(self.world.tower.fire_delay);
        if let Some(task) = self.fire_task.as_mut().filter(|t| t.is_due(now_ms)) {
            task.resync(now_ms, delay);
        }
    }

    fn enter_game_over<S: DrawSink + ?Sized>(&mut self, sink: &mut S) {
        self.cancel_all();
        self.phase = Phase::GameOver;
        log::info!(
            "Game over: score {}, level {}",
            self.world.tower.score,
            self.world.level
        );
        render_game_over(&self.world, &self.settings.palette, sink);
    }

    fn cancel_all(&mut self) {
        self.tick_task = None;
        self.fire_task = None;
    }

    fn collect_events(&mut self) {
        for event in &self.world.events {
            log::debug!("{:?}", event);
        }
        self.events.append(&mut self.world.events);
    }

    #[cfg(test)]
    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
