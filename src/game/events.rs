/// Notifications emitted by the engine after a mutating operation
///
/// The UI adapter drains these after every call that can change state: it
/// redraws on `BoardChanged`, persists the high score on `ScoreChanged`,
/// reschedules its timer on `SpeedChanged`, and stops it on `GameOver`.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Board State mutated; fetch a fresh snapshot to redraw
    BoardChanged,
    /// Score changed, with the (possibly updated) high score
    ScoreChanged { score: u32, high_score: u32 },
    /// Speed factor changed; the clock interval must be recomputed
    SpeedChanged { speed: f64 },
    /// Self-collision: the game has ended
    GameOver,
}
