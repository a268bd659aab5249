use crate::{AppBuilder, DemoConfig, GraphicsPlugin, InputPlugin, Plugin, ScenePlugin, WindowPlugin};

/**
 * Main demo plugin.
 * Opens the window, brings up the GPU, and installs the animated scene and its renderer.
 */
pub struct EnginePlugin {
    pub config: DemoConfig,
}

impl EnginePlugin {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }
}

impl Plugin for EnginePlugin {
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()> {
        self.config.validate()?;
        let tick_duration = self.config.scene.tick_duration()?;
        builder
            .plugin(InputPlugin)?
            .plugin(WindowPlugin {
                window: self.config.window.clone(),
                graphics: self.config.graphics,
            })?
            .plugin(ScenePlugin)?
            .plugin(GraphicsPlugin)?
            .tick_duration(tick_duration);
        Ok(())
    }
}
