use anyhow::Context;
use triangle_demo::{App, DemoConfig, EnginePlugin};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    #[cfg(feature = "profile")]
    let _profile_guard = {
        use tracing_subscriber::prelude::*;
        let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
        tracing_subscriber::registry().with(chrome_layer).init();
        guard
    };

    let config = DemoConfig::discover().context("Failed to load config")?;
    log::debug!("{config:?}");

    let mut builder = App::builder();
    builder.plugin(EnginePlugin::new(config))?;
    builder.run()
}
