use std::fmt::Display;

/// Notifications a session emits while advancing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A ring was collected; carries the new score.
    Score(u32),
    /// The airplane left the world. Emitted exactly once per session.
    GameOver { final_score: u32 },
}

impl Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Score(score) => write!(f, "Score: {}", score),
            GameEvent::GameOver { final_score } => {
                write!(f, "Game Over! Final Score: {}", final_score)
            }
        }
    }
}
