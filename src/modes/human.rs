use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameClock, GameConfig, GameEvent, Phase, SimulationEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{GameMetrics, HighScoreStore};
use crate::render::Renderer;

/// Terminal columns per grid cell (each cell renders as a glyph + space)
const CELL_COLS: usize = 2;
/// Rows taken by header, footer, and the board border
const CHROME_ROWS: usize = 8;

/// Grid dimensions for a terminal of `cols` x `rows`
///
/// The board gets the middle 80% of the width (the layout centers it) and
/// everything below the header and above the footer.
pub fn grid_dims(cols: u16, rows: u16) -> (usize, usize) {
    let usable_cols = cols as usize * 8 / 10;
    let width = usable_cols.saturating_sub(2) / CELL_COLS;
    let height = (rows as usize).saturating_sub(CHROME_ROWS);
    (width, height)
}

/// Outcome of one pass through the event loop, resolved outside the
/// `select!` so state mutation never races the pending timer futures
enum LoopAction {
    Input(Event),
    Tick,
    Render,
    Quit,
    Idle,
}

pub struct HumanMode {
    engine: SimulationEngine,
    clock: GameClock,
    store: HighScoreStore,
    persisted_high: u32,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Result<Self> {
        let high_score = store.load()?;
        let clock = GameClock::new(Duration::from_millis(config.base_tick_ms));
        let engine = SimulationEngine::new(config, high_score)?;

        Ok(Self {
            engine,
            clock,
            store,
            persisted_high: high_score,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let action = tokio::select! {
                // Terminal events (keys, resize)
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => LoopAction::Input(event),
                    _ => LoopAction::Idle,
                },

                // Simulation tick; a stopped clock never resolves
                _ = self.clock.tick() => LoopAction::Tick,

                // Render frame
                _ = render_timer.tick() => LoopAction::Render,

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => LoopAction::Quit,
            };

            match action {
                LoopAction::Input(event) => self.handle_event(event)?,
                LoopAction::Tick => {
                    let events = self.engine.step()?;
                    self.apply_events(events)?;
                }
                LoopAction::Render => {
                    self.metrics.update();
                    terminal
                        .draw(|frame| {
                            self.renderer.render(frame, &self.engine, &self.metrics);
                        })
                        .context("Failed to draw frame")?;
                }
                LoopAction::Quit => self.should_quit = true,
                LoopAction::Idle => {}
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(heading) => {
                        let (dx, dy) = heading.delta();
                        self.engine.set_heading(dx, dy);
                    }
                    KeyAction::Start => self.start_game(),
                    KeyAction::Restart => self.restart_game()?,
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(cols, rows) => self.handle_resize(cols, rows)?,
            _ => {}
        }

        Ok(())
    }

    fn start_game(&mut self) {
        if self.engine.phase() != Phase::Ready {
            return;
        }
        self.engine.start();
        self.clock.start(self.engine.speed());
        self.metrics.on_game_start();
    }

    fn restart_game(&mut self) -> Result<()> {
        if self.engine.phase() == Phase::Ready {
            return Ok(());
        }
        let events = self.engine.reset()?;
        self.apply_events(events)?;
        self.clock.start(self.engine.speed());
        self.metrics.on_game_start();
        Ok(())
    }

    /// A viewport change invalidates the whole board: stop the clock before
    /// reinitializing so no stale tick touches the fresh state
    fn handle_resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        self.clock.stop();
        let (width, height) = grid_dims(cols, rows);
        let events = self.engine.resize(width, height)?;
        self.apply_events(events)?;
        Ok(())
    }

    fn apply_events(&mut self, events: Vec<GameEvent>) -> Result<()> {
        for event in events {
            match event {
                GameEvent::BoardChanged => {
                    // The render timer picks up the new snapshot
                }
                GameEvent::ScoreChanged { high_score, .. } => {
                    if high_score > self.persisted_high {
                        if let Err(err) = self.store.save(high_score) {
                            warn!("could not persist high score: {err:#}");
                        }
                        self.persisted_high = high_score;
                    }
                }
                GameEvent::SpeedChanged { speed } => {
                    if self.clock.is_running() {
                        self.clock.reschedule(speed);
                    }
                }
                GameEvent::GameOver => {
                    self.clock.stop();
                    self.metrics.on_game_over();
                }
            }
        }
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::path::PathBuf;

    fn temp_store(name: &str) -> HighScoreStore {
        let path: PathBuf = std::env::temp_dir().join(format!(
            "torus-snake-mode-test-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_grid_dims() {
        // 100 cols -> 80 usable, minus border, two cols per cell.
        assert_eq!(grid_dims(100, 30), (39, 22));
        // Tiny terminals produce degenerate grids the engine then rejects.
        assert_eq!(grid_dims(2, 5), (0, 0));
    }

    #[test]
    fn test_mode_initialization() {
        let mode = HumanMode::new(GameConfig::small(), temp_store("init")).unwrap();
        assert_eq!(mode.engine.phase(), Phase::Ready);
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.clock.is_running());
    }

    #[tokio::test]
    async fn test_start_key_begins_play() {
        let mut mode = HumanMode::new(GameConfig::small(), temp_store("start")).unwrap();

        mode.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(mode.engine.phase(), Phase::Running);
        assert!(mode.clock.is_running());

        // A second start is a no-op, not a reset.
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(mode.engine.phase(), Phase::Running);
    }

    #[tokio::test]
    async fn test_restart_rebuilds_running_game() {
        let mut mode = HumanMode::new(GameConfig::small(), temp_store("restart")).unwrap();
        mode.handle_event(key(KeyCode::Enter)).unwrap();
        mode.engine.step().unwrap();

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();

        assert_eq!(mode.engine.phase(), Phase::Running);
        assert_eq!(mode.engine.score(), 0);
        assert_eq!(mode.engine.snake().len(), 1);
        assert!(mode.clock.is_running());
    }

    #[tokio::test]
    async fn test_resize_stops_clock_and_reinitializes() {
        let mut mode = HumanMode::new(GameConfig::small(), temp_store("resize")).unwrap();
        mode.handle_event(key(KeyCode::Enter)).unwrap();

        mode.handle_event(Event::Resize(100, 30)).unwrap();

        assert_eq!(mode.engine.phase(), Phase::Ready);
        assert!(!mode.clock.is_running());
        assert_eq!(mode.engine.board().width(), 39);
        assert_eq!(mode.engine.board().height(), 22);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::small(), temp_store("quit")).unwrap();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let store = temp_store("persist");
        let mut mode = HumanMode::new(GameConfig::small(), store).unwrap();

        mode.apply_events(vec![GameEvent::ScoreChanged {
            score: 3,
            high_score: 3,
        }])
        .unwrap();

        assert_eq!(mode.persisted_high, 3);
        assert_eq!(mode.store.load().unwrap(), 3);

        // An equal high score does not trigger another write.
        mode.apply_events(vec![GameEvent::ScoreChanged {
            score: 1,
            high_score: 3,
        }])
        .unwrap();
        assert_eq!(mode.persisted_high, 3);
    }
}
