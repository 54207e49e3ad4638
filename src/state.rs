use std::collections::VecDeque;

use log::{debug, info};
use rand::Rng;

use crate::Cell;
use crate::config::{GameConfig, SpeedCurve};
use crate::snake::{Direction, Snake};

const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameEnd {
    Wall,
    SelfCollision,
    Quit,
}

/// Full state of one session. `update` consumes the state and returns the
/// next one; nothing here touches the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    width: i32,
    height: i32,
    snake: Snake,
    food: Cell,
    score: u32,
    speed_ms: u64,
    curve: SpeedCurve,
    ticks: u64,
    ending: Option<GameEnd>,
}

/// Read-only view of a `GameState`, all a renderer gets to see.
#[derive(Debug, Copy, Clone)]
pub struct Frame<'a> {
    pub width: i32,
    pub height: i32,
    pub snake: &'a VecDeque<Cell>,
    pub food: Cell,
    pub score: u32,
    pub speed_ms: u64,
    pub game_over: bool,
}

impl GameState {
    /// Three segments centered on the board heading right. The board must be
    /// at least 4 wide so the tail at `width / 2 - 2` stays on it.
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let (width, height) = (config.width, config.height);
        let snake = Snake::new((width / 2, height / 2), INITIAL_SNAKE_LENGTH, Direction::Right);

        let mut state = GameState {
            width,
            height,
            snake,
            food: (0, 0),
            score: 0,
            speed_ms: config.speed.base_ms,
            curve: config.speed,
            ticks: 0,
            ending: None,
        };
        state.food = state.generate_food(rng);
        state
    }

    /// Rejection-samples a cell not covered by the snake. Loops forever if the
    /// snake fills the board.
    pub fn generate_food<R: Rng>(&self, rng: &mut R) -> Cell {
        loop {
            let x = rng.gen_range(0..self.width);
            let y = rng.gen_range(0..self.height);

            if !self.is_occupied(x, y) {
                return (x, y);
            }
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.snake.contains((x, y))
    }

    pub fn in_bounds(&self, (x, y): Cell) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.ending.is_none() {
            self.snake.set_direction(direction);
        }
    }

    pub fn quit(&mut self) {
        self.end(GameEnd::Quit);
    }

    /// Advances one tick.
    ///
    /// The whole pre-move body, tail included, counts as an obstacle: moving
    /// into the cell the tail is about to leave is a collision.
    pub fn update<R: Rng>(mut self, rng: &mut R) -> GameState {
        if self.ending.is_some() {
            return self;
        }

        self.ticks += 1;
        self.snake.commit_turn();
        let new_head = self.snake.next_head();

        if !self.in_bounds(new_head) {
            self.end(GameEnd::Wall);
            return self;
        }
        if self.is_occupied(new_head.0, new_head.1) {
            self.end(GameEnd::SelfCollision);
            return self;
        }

        self.snake.push_head(new_head);

        if new_head == self.food {
            self.score += 1;
            self.food = self.generate_food(rng);
            self.speed_ms = self.curve.interval_for(self.score);
            debug!("ate food, score {} speed {}ms next food at {:?}", self.score, self.speed_ms, self.food);
        } else {
            self.snake.pop_tail();
        }

        self
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            width: self.width,
            height: self.height,
            snake: self.snake.body(),
            food: self.food,
            score: self.score,
            speed_ms: self.speed_ms,
            game_over: self.is_game_over(),
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn ending(&self) -> Option<GameEnd> {
        self.ending
    }

    pub fn is_game_over(&self) -> bool {
        self.ending.is_some()
    }

    fn end(&mut self, reason: GameEnd) {
        if self.ending.is_none() {
            info!("game over ({:?}) after {} ticks, score {}", reason, self.ticks, self.score);
            self.ending = Some(reason);
        }
    }
}
