use std::hash::Hash;
use winit::keyboard::KeyCode;
use crate::{AppBuilder, Game, HashSet, Plugin, RunContext, Stage};

/// Key that closes the demo.
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Adds a [`Keyboard`] fed by the window, and quits when [`QUIT_KEY`] is pressed.
pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn install(&mut self, builder: &mut AppBuilder) -> anyhow::Result<()> {
        builder.game().init(|_| Keyboard::default());
        builder
            .system(Stage::Input, quit_on_key)
            .system(Stage::Cleanup, sync_inputs);
        Ok(())
    }
}

#[derive(Default)]
pub struct Keyboard {
    keys: ButtonState<KeyCode>,
}

impl Keyboard {

    /**
     * True if a key is pressed.
    */
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.is_pressed(key)
    }

    /**
     * True if a key is pressed, but wasn't in the previous frame.
    */
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.keys.is_just_pressed(key)
    }

    /**
     * True if a key is not pressed, but was in the previous frame.
    */
    pub fn is_just_released(&self, key: KeyCode) -> bool {
        self.keys.is_just_released(key)
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys.press(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    /**
     * Sync previous key state with current key state.
    */
    pub fn sync_previous_state(&mut self) {
        self.keys.sync_previous_state()
    }
}

/**
 * The state of a collection of buttons coming from some device.
 * For example, the keys on a keyboard.
 */
pub struct ButtonState<B> {
    previous_state: HashSet<B>,
    current_state: HashSet<B>,
}

impl<B> Default for ButtonState<B> {
    fn default() -> Self {
        Self {
            previous_state: HashSet::default(),
            current_state: HashSet::default(),
        }
    }
}

impl<B> ButtonState<B>
where
    B: Copy + Eq + Hash
{
    pub fn press(&mut self, button: B) {
        self.current_state.insert(button);
    }

    pub fn release(&mut self, button: B) {
        self.current_state.remove(&button);
    }

    pub fn is_pressed(&self, button: B) -> bool {
        self.current_state.contains(&button)
    }

    pub fn is_just_pressed(&self, button: B) -> bool {
        self.current_state.contains(&button) && !self.previous_state.contains(&button)
    }

    pub fn is_just_released(&self, button: B) -> bool {
        !self.current_state.contains(&button) && self.previous_state.contains(&button)
    }

    pub fn sync_previous_state(&mut self) {
        self.previous_state.clone_from(&self.current_state);
    }
}


fn quit_on_key(game: &mut Game, mut ctx: RunContext) {
    let keyboard = game.get::<&Keyboard>();
    if keyboard.is_just_pressed(QUIT_KEY) {
        log::info!("{QUIT_KEY:?} pressed, quitting");
        ctx.quit();
    }
}

fn sync_inputs(game: &mut Game, _ctx: RunContext) {
    game.get::<&mut Keyboard>().sync_previous_state();
}


#[cfg(test)]
mod test {
    use std::time::Duration;
    use winit::keyboard::KeyCode;
    use crate::{App, InputPlugin, Keyboard, QUIT_KEY};

    #[test]
    fn just_pressed_lasts_one_sync() {
        let mut keyboard = Keyboard::default();
        keyboard.press(KeyCode::KeyA);
        assert!(keyboard.is_pressed(KeyCode::KeyA));
        assert!(keyboard.is_just_pressed(KeyCode::KeyA));
        keyboard.sync_previous_state();
        assert!(keyboard.is_pressed(KeyCode::KeyA));
        assert!(!keyboard.is_just_pressed(KeyCode::KeyA));
        keyboard.release(KeyCode::KeyA);
        assert!(keyboard.is_just_released(KeyCode::KeyA));
        keyboard.sync_previous_state();
        assert!(!keyboard.is_just_released(KeyCode::KeyA));
    }

    #[test]
    fn quit_key_requests_quit() {
        let mut builder = App::builder();
        builder.plugin(InputPlugin).unwrap();
        let mut app = builder.build();

        app.run_frame(Duration::ZERO);
        assert!(!app.quit_requested());

        app.game.get::<&mut Keyboard>().press(QUIT_KEY);
        app.run_frame(Duration::ZERO);
        assert!(app.quit_requested());
    }
}
