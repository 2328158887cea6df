use std::time::Duration;

use log::{debug, info};
use rand::rngs::ThreadRng;

use super::board::{BoardState, CellPatch, Coord};
use super::config::GameConfig;
use super::error::GameError;
use super::events::GameEvent;
use super::food;
use super::heading::Heading;
use super::snake::Snake;

/// Lifecycle phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initialized but the clock has not been started yet
    Ready,
    /// Advancing one step per clock tick
    Running,
    /// Terminated by self-collision; a reset starts a new game
    GameOver,
}

/// The simulation engine: owns every piece of mutable game state and
/// advances it one atomic step at a time
///
/// The engine knows nothing about timers or rendering. The adapter drives
/// it (one `step` per clock tick) and reacts to the [`GameEvent`]s each
/// mutating call returns.
pub struct SimulationEngine {
    config: GameConfig,
    board: BoardState,
    snake: Snake,
    heading: Heading,
    /// Buffered direction input, applied at the start of the next step.
    /// Last write between ticks wins.
    pending_heading: Option<Heading>,
    phase: Phase,
    score: u32,
    high_score: u32,
    speed: f64,
    /// The single active food cell, kept in lockstep with the board flag
    food: Coord,
    rng: ThreadRng,
}

impl SimulationEngine {
    /// Build a fresh game; `high_score` is injected by the adapter from
    /// whatever persistence it uses
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, GameError> {
        config.validate()?;

        let mut engine = Self {
            board: BoardState::new(config.grid_width, config.grid_height),
            snake: Snake::new(Coord::new(0, 0)),
            heading: Heading::Right,
            pending_heading: None,
            phase: Phase::Ready,
            score: 0,
            high_score,
            speed: 1.0,
            food: Coord::new(0, 0),
            rng: rand::thread_rng(),
            config,
        };
        engine.food = food::spawn(&mut engine.rng, &mut engine.board, &engine.snake)?;
        Ok(engine)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Clock period at the current speed: base interval / speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.config.base_tick_ms as f64 / 1000.0 / self.speed)
    }

    /// Begin play from the start overlay
    pub fn start(&mut self) {
        if self.phase == Phase::Ready {
            info!("starting game on {}x{} grid", self.config.grid_width, self.config.grid_height);
            self.phase = Phase::Running;
        }
    }

    /// Throw away the finished game and begin a new one immediately
    ///
    /// The high score survives; everything else is rebuilt from scratch.
    pub fn reset(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.reinitialize()?;
        self.phase = Phase::Running;
        info!("game reset");
        Ok(self.full_refresh_events())
    }

    /// Rebuild the board for new grid dimensions (viewport change)
    ///
    /// Returns to the start overlay: the old game cannot continue on a
    /// board it was not played on.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<Vec<GameEvent>, GameError> {
        let config = GameConfig {
            grid_width: width,
            grid_height: height,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;

        self.reinitialize()?;
        self.phase = Phase::Ready;
        info!("board resized to {}x{}", width, height);
        Ok(self.full_refresh_events())
    }

    /// Direction input from the adapter; anything but a unit vector is
    /// ignored. Takes effect at the start of the next step.
    pub fn set_heading(&mut self, dx: i32, dy: i32) {
        if let Some(heading) = Heading::from_delta(dx, dy) {
            self.pending_heading = Some(heading);
        }
    }

    /// Execute one simulation step
    ///
    /// All board mutations for the step are applied before this returns;
    /// outside `Running` it is a no-op. A full board on food respawn is the
    /// only error path.
    pub fn step(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != Phase::Running {
            return Ok(Vec::new());
        }

        if let Some(heading) = self.pending_heading.take() {
            self.heading = heading;
        }

        let (dx, dy) = self.heading.delta();
        let new_head = self
            .snake
            .head()
            .stepped(dx, dy, self.config.grid_width, self.config.grid_height);

        // Self-collision is terminal; the board keeps its last live state.
        if self.snake.hits_on_entry(new_head) {
            self.phase = Phase::GameOver;
            info!(
                "game over at ({}, {}) with score {}",
                new_head.x, new_head.y, self.score
            );
            return Ok(vec![GameEvent::GameOver]);
        }

        let ate = new_head == self.food;

        if let Some(freed) = self.snake.advance(new_head, ate) {
            self.board.set(freed, CellPatch::vacated());
        }

        let mut events = Vec::with_capacity(3);

        if ate {
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.speed += self.config.speed_increment;
            self.board.set(new_head, CellPatch::food_eaten());
            self.food = food::spawn(&mut self.rng, &mut self.board, &self.snake)?;
            debug!(
                "ate food: score={} length={} speed={:.1}",
                self.score,
                self.snake.len(),
                self.speed
            );
            events.push(GameEvent::ScoreChanged {
                score: self.score,
                high_score: self.high_score,
            });
            events.push(GameEvent::SpeedChanged { speed: self.speed });
        }

        self.board.set(new_head, CellPatch::snake());
        events.push(GameEvent::BoardChanged);
        Ok(events)
    }

    fn reinitialize(&mut self) -> Result<(), GameError> {
        self.board = BoardState::new(self.config.grid_width, self.config.grid_height);
        self.snake = Snake::new(Coord::new(0, 0));
        self.heading = Heading::Right;
        self.pending_heading = None;
        self.score = 0;
        self.speed = 1.0;
        self.food = food::spawn(&mut self.rng, &mut self.board, &self.snake)?;
        Ok(())
    }

    fn full_refresh_events(&self) -> Vec<GameEvent> {
        vec![
            GameEvent::BoardChanged,
            GameEvent::ScoreChanged {
                score: self.score,
                high_score: self.high_score,
            },
            GameEvent::SpeedChanged { speed: self.speed },
        ]
    }

    /// Move the single food cell to a known coordinate (tests only)
    #[cfg(test)]
    fn place_food_at(&mut self, coord: Coord) {
        use super::board::CellTag;
        self.board.set(
            self.food,
            CellPatch {
                food: Some(false),
                tag: Some(CellTag::Empty),
                ..Default::default()
            },
        );
        self.board.set(coord, CellPatch::food());
        self.food = coord;
    }
}
