//! Scene state that changes over time.
//! The only animated value is the clear color, which bounces each channel between 0 and 1.

use crate::{AppBuilder, Color, Game, Plugin, RunContext, Stage};

/// Speed multiplier every channel starts with.
pub const INITIAL_RATE: i32 = 7;

/// Adds a [`ColorCycle`] and advances it once per tick.
pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()> {
        builder.game().init(|_| ColorCycle::default());
        builder.system(Stage::Update, update_scene);
        Ok(())
    }
}

/// A single color channel that ping-pongs between 0 and 1.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorChannel {
    pub value: f32,
    /// Signed multiplier of `step`. Its sign is the direction of travel.
    pub rate: i32,
    pub step: f32,
}

impl ColorChannel {

    pub const fn new(step: f32) -> Self {
        Self { value: 0.0, rate: INITIAL_RATE, step }
    }

    /**
     * Moves the value by `rate * step`.
     * Reverses direction once the value reaches or passes either bound.
     * The value is not clamped, so it may overshoot a bound by up to one increment.
     */
    pub fn advance(&mut self) {
        self.value += self.rate as f32 * self.step;
        if self.value >= 1.0 || self.value <= 0.0 {
            self.rate = -self.rate;
        }
    }
}

/// Animated clear color.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorCycle {
    pub red: ColorChannel,
    pub green: ColorChannel,
    pub blue: ColorChannel,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self {
            red: ColorChannel::new(0.00005),
            green: ColorChannel::new(0.00002),
            blue: ColorChannel::new(0.00001),
        }
    }
}

impl ColorCycle {

    pub fn advance(&mut self) {
        self.red.advance();
        self.green.advance();
        self.blue.advance();
    }

    /// Current color, opaque.
    pub fn color(&self) -> Color {
        Color::rgb(self.red.value, self.green.value, self.blue.value)
    }
}

fn update_scene(game: &mut Game, _ctx: RunContext) {
    game.get::<&mut ColorCycle>().advance();
}
