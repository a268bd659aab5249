mod framework;
mod config;
mod window;
mod input;
mod graphics;
mod scene;
mod client;

pub use framework::*;
pub use config::*;
pub use window::*;
pub use input::*;
pub use graphics::*;
pub use scene::*;
pub use client::*;
