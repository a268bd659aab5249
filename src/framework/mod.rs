mod game;
mod app;
mod util;

pub use game::*;
pub use app::*;
pub use util::*;
