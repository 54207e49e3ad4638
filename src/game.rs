use std::{thread::sleep, time::Duration};

use anyhow::Result;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::TermInt;
use crate::config::GameConfig;
use crate::input::Command;
use crate::render::Renderer;
use crate::state::GameState;
use crate::term::TermManager;

pub struct SnakeGame {
    config: GameConfig,
    term: TermManager,
    renderer: Renderer,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let term = TermManager::new(config.colors);

        SnakeGame { config, term, renderer: Renderer::new(), rng }
    }

    /// Plays one session and returns the final score. The terminal is
    /// restored whether or not the session failed.
    pub fn run(&mut self) -> Result<u32> {
        self.term.setup()?;
        let result = self.play();
        self.term.restore()?;
        result
    }

    fn play(&mut self) -> Result<u32> {
        // Field plus border, then the status and help lines
        let cols = (self.config.width + 2) as TermInt;
        let rows = (self.config.height + 4) as TermInt;
        self.term.check_size(cols, rows)?;

        let mut state = GameState::new(&self.config, &mut self.rng);
        info!("starting {}x{} game, seed {:?}, first food at {:?}",
              self.config.width, self.config.height, self.config.seed, state.food());

        while !state.is_game_over() {
            if let Some(key) = self.term.poll_key()? {
                match Command::from_key_event(key) {
                    Some(Command::Turn(dir)) => state.set_direction(dir),
                    Some(Command::Quit) => state.quit(),
                    None => {}
                }
            }

            state = state.update(&mut self.rng);
            self.renderer.draw(&state.frame(), &mut self.term)?;

            sleep(Duration::from_millis(state.speed_ms()));
        }

        info!("session ended by {:?} at tick {}, length {} heading {:?}",
              state.ending(), state.ticks(), state.snake().len(), state.direction());
        self.term.read_key_blocking()?;

        Ok(state.score())
    }
}
