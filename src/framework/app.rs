use std::time::Duration;
use anyhow::anyhow;
use vecmap::VecSet;
use crate::{Game, HashMap};

/**
 * Adds logic to a [`Game`] by executing [`System`]s across it.
 * This happens when invoking run_tick() and run_frame().
 */
pub struct App {
    pub game: Game,                                     // Game to update state via systems.
    tick: u64,                                          // Current tick.
    tick_accum: Duration,                               // Time accumulated for current tick.
    tick_duration: Duration,                            // Length of time for a single game tick.
    systems: HashMap<Stage, VecSet<System>>,            // Systems that manipulate the state of the Game.
    quit_requested: bool,
}

impl App {

    pub fn builder() -> AppBuilder {
        AppBuilder {
            app: Self {
                game: Game::new(),
                tick: 1,
                tick_accum: Duration::ZERO,
                tick_duration: Duration::from_secs_f64(1.0/60.0),
                systems: HashMap::default(),
                quit_requested: false,
            },
            runner: None,
        }
    }

    pub fn tick_duration(&self) -> Duration { self.tick_duration }

    /// Number of ticks that have finished.
    pub fn ticks_elapsed(&self) -> u64 { self.tick - 1 }

    /// True if a system asked the app to stop.
    pub fn quit_requested(&self) -> bool { self.quit_requested }

    /**
     * Runs all per-frame [`Stage`]s.
     * If enough time has accumulated, each per-tick [`Stage`]s as well.
     * The first frame runs exactly one tick so that the scene is updated before it is drawn.
     * Time beyond that first tick is discarded.
     */
    pub fn run_frame(&mut self, delta: Duration) {
        log::trace!("----- FRAME: {}, DELTA: {}ms -----", self.tick, delta.as_millis());
        if self.tick == 1 {
            self.tick_accum = self.tick_duration;
        }
        else {
            self.tick_accum += delta;
        }
        self.run_stage(Stage::Input, delta, 1.0);

        while self.tick_accum >= self.tick_duration {
            log::trace!("--- TICK ---");
            self.run_stage(Stage::PreUpdate, self.tick_duration, 1.0);
            self.run_stage(Stage::Update, self.tick_duration, 1.0);
            self.run_stage(Stage::PostUpdate, self.tick_duration, 1.0);
            self.tick_accum -= self.tick_duration;
            self.tick += 1;
        }

        let partial_ticks = self.tick_accum.as_secs_f32() / self.tick_duration.as_secs_f32();
        self.run_stage(Stage::Render, delta, partial_ticks);
        self.run_stage(Stage::Cleanup, delta, partial_ticks);
    }

    /**
     * Runs all per-frame [`Stage`]s and exactly one pass of the per-tick [`Stage`]s.
     */
    pub fn run_tick(&mut self) {
        self.run_frame(self.tick_duration)
    }

    /**
     * Runs all [`System`]s within a [`Stage`].
     */
    fn run_stage(&mut self, stage: Stage, delta: Duration, partial_ticks: f32) {
        let Some(systems) = self.systems.get(&stage) else { return };
        for system in systems.iter().copied() {
            let ctx = RunContext {
                quit_requested: &mut self.quit_requested,
                delta,
                partial_ticks,
            };
            system(&mut self.game, ctx);
        }
    }
}


pub struct AppBuilder {
    app: App,
    runner: Option<Box<dyn AppRunner>>,
}

impl AppBuilder {

    /**
     * Reference to underlying [`Game`].
     */
    pub fn game(&mut self) -> &mut Game { &mut self.app.game }

    /// Adds a system to the stage specified.
    pub fn system(&mut self, stage: Stage, system: System) -> &mut Self {
        let systems = self.app.systems.entry(stage).or_default();
        if !systems.insert(system) {
            panic!("Duplicate system {system:?}");
        }
        self
    }

    pub fn plugin(&mut self, mut plugin: impl Plugin) -> anyhow::Result<&mut Self> {
        plugin.install(self)?;
        Ok(self)
    }

    /// Panics if the duration is zero, since no amount of time would ever drain a tick.
    pub fn tick_duration(&mut self, tick_duration: Duration) -> &mut Self {
        assert!(!tick_duration.is_zero(), "Tick duration must be non-zero");
        self.app.tick_duration = tick_duration;
        self
    }

    pub fn runner(&mut self, runner: impl AppRunner + 'static) -> &mut Self {
        self.runner = Some(Box::new(runner));
        self
    }

    /// Finishes building [`App`] without running it.
    pub fn build(self) -> App {
        self.app
    }

    /// Finishes building [`App`] and immediately runs it.
    pub fn run(mut self) -> anyhow::Result<()> {
        let mut runner = self.runner
            .take()
            .ok_or_else(|| anyhow!("Runner not configured"))?;
        runner.run(self.app)
    }
}

/// Responsible for running an [`App`].
pub trait AppRunner {
    fn run(&mut self, app: App) -> anyhow::Result<()>;
}

/**
 * Some function or object that adds functionality to an [`App`].
 */
pub trait Plugin {
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()>;
}

impl<F> Plugin for F
where F: FnMut(&mut AppBuilder) -> anyhow::Result<()>
{
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()> {
        self(builder)
    }
}

pub struct RunContext<'a> {
    quit_requested: &'a mut bool,
    delta: Duration,
    partial_ticks: f32,
}

impl<'a> RunContext<'a> {

    /**
     * Time since the last frame or tick, depending on the [`Stage`].
     */
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /**
     * Time since the last frame or tick, depending on the [`Stage`].
     */
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Fraction of a tick accumulated but not yet run.
    pub fn partial_ticks(&self) -> f32 {
        self.partial_ticks
    }

    /**
     * Requests that the [`App`] quit once the current frame finishes.
     */
    pub fn quit(&mut self) {
        *self.quit_requested = true;
    }
}

/// Function that runs over a [`Game`] and updates its state.
pub type System = fn(&mut Game, ctx: RunContext);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Stage {
    /// Per frame.
    /// Reacts to input devices before any tick runs.
    Input,
    /// Per tick.
    /// Decision-making stage.
    PreUpdate,
    /// Per tick.
    /// Main logic.
    Update,
    /// Per tick.
    /// Reacts to the outcome of Update.
    PostUpdate,
    /// Per frame.
    /// Renders.
    Render,
    /// Per frame.
    /// Any code that needs to clear data structures every frame.
    Cleanup,
}
