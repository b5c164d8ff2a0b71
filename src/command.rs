//! Command-based control for players.

/// Actions for controlling a [`Player`](crate::Player).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Start playing from the first step.
    Start,
    /// Stop and reset the clock.
    Stop,
    /// Jump back to the first step while playing.
    Restart,
    /// Advance the clock by this many seconds.
    Tick(f32),
}
