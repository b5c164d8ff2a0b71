//! Playback of a sequence against an externally driven clock.
//!
//! Provides [`Player`], which tracks the elapsed time of the sequence being
//! played and resolves the current step on every tick. The clock is advanced by
//! the caller (typically once per rendered frame) and reset to zero on stop, on
//! restart and when playback wraps past the end of the sequence.

use crate::command::PlayerAction;
use crate::sequence::Sequence;
use crate::types::{SequenceError, SequenceStep};

/// The current state of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    /// Nothing playing. Elapsed time is zero.
    Stopped,
    /// Stepping through a sequence, looping indefinitely.
    Playing,
}

/// What to show after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackFrame {
    /// Index of the step being shown.
    pub step_index: usize,

    /// Copy of the step being shown.
    pub step: SequenceStep,

    /// Elapsed time within the sequence, in seconds.
    pub elapsed: f32,

    /// Playback ran past the end and restarted from the first step.
    pub looped: bool,
}

/// Errors that can occur during player operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of the expected state
        expected: &'static str,
        /// The actual current state
        actual: PlayerState,
    },
    /// The sequence failed to load or was never built.
    InvalidSequence,
    /// All steps have zero duration, so no step can ever be resolved.
    ZeroDuration,
    /// The sequence cannot be played.
    Sequence(SequenceError),
}

impl core::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlayerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but player is {:?}",
                    expected, actual
                )
            }
            PlayerError::InvalidSequence => {
                write!(f, "sequence is not valid")
            }
            PlayerError::ZeroDuration => {
                write!(f, "sequence has zero total duration")
            }
            PlayerError::Sequence(err) => {
                write!(f, "sequence error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}

impl From<SequenceError> for PlayerError {
    fn from(err: SequenceError) -> Self {
        PlayerError::Sequence(err)
    }
}

/// Steps through a sequence as time is fed in.
///
/// The player does not own the sequence; it marks the sequence `running` while
/// playing so a [`SequenceList`](crate::SequenceList) can stop it when the
/// selection changes. A tick on a sequence that has been stopped that way
/// resets the player.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    state: PlayerState,
    elapsed: f32,
}

impl Player {
    /// Creates a stopped player.
    pub fn new() -> Self {
        Self {
            state: PlayerState::Stopped,
            elapsed: 0.0,
        }
    }

    /// Handles a player action by dispatching to the appropriate method.
    ///
    /// # Returns
    /// * `Ok(Some(frame))` - For actions that start or advance playback
    /// * `Ok(None)` - For `Stop`
    /// * `Err` - Operation failed (invalid state, unplayable sequence)
    pub fn handle_action<const N: usize>(
        &mut self,
        sequence: &mut Sequence<N>,
        action: PlayerAction,
    ) -> Result<Option<PlaybackFrame>, PlayerError> {
        match action {
            PlayerAction::Start => self.start(sequence).map(Some),
            PlayerAction::Stop => {
                self.stop(sequence);
                Ok(None)
            }
            PlayerAction::Restart => self.restart(sequence).map(Some),
            PlayerAction::Tick(delta) => self.tick(sequence, delta).map(Some),
        }
    }

    /// Starts playing `sequence` from its first step.
    ///
    /// Must be called from `Stopped` state.
    pub fn start<const N: usize>(&mut self, sequence: &mut Sequence<N>) -> Result<PlaybackFrame, PlayerError> {
        if self.state != PlayerState::Stopped {
            return Err(PlayerError::InvalidState {
                expected: "Stopped",
                actual: self.state,
            });
        }

        let frame = Self::frame_at(sequence, 0.0, false)?.ok_or(PlayerError::ZeroDuration)?;
        tracing::info!(name = sequence.short_name(), "playback started");
        sequence.set_running(true);
        self.state = PlayerState::Playing;
        self.elapsed = 0.0;
        Ok(frame)
    }

    /// Restarts playback from the first step.
    ///
    /// Must be called from `Playing` state.
    pub fn restart<const N: usize>(&mut self, sequence: &mut Sequence<N>) -> Result<PlaybackFrame, PlayerError> {
        if self.state != PlayerState::Playing {
            return Err(PlayerError::InvalidState {
                expected: "Playing",
                actual: self.state,
            });
        }

        self.elapsed = 0.0;
        let frame = Self::frame_at(sequence, 0.0, false)?.ok_or(PlayerError::ZeroDuration)?;
        sequence.set_running(true);
        Ok(frame)
    }

    /// Stops playback and resets the clock. Can be called from any state.
    pub fn stop<const N: usize>(&mut self, sequence: &mut Sequence<N>) {
        if self.state == PlayerState::Playing {
            tracing::info!(name = sequence.short_name(), "playback stopped");
        }
        sequence.set_running(false);
        self.reset();
    }

    /// Forgets the current playback without touching any sequence.
    ///
    /// Use after the sequence being played was stopped elsewhere.
    pub fn reset(&mut self) {
        self.state = PlayerState::Stopped;
        self.elapsed = 0.0;
    }

    /// Advances the clock by `delta` seconds and resolves the current step.
    ///
    /// Reaching the end of the sequence wraps the clock to zero. Must be called
    /// from `Playing` state, with the sequence still marked running.
    pub fn tick<const N: usize>(&mut self, sequence: &Sequence<N>, delta: f32) -> Result<PlaybackFrame, PlayerError> {
        if self.state != PlayerState::Playing {
            return Err(PlayerError::InvalidState {
                expected: "Playing",
                actual: self.state,
            });
        }
        if !sequence.is_running() {
            self.reset();
            return Err(PlayerError::InvalidState {
                expected: "Playing",
                actual: self.state,
            });
        }

        self.elapsed += delta.max(0.0);
        if let Some(frame) = Self::frame_at(sequence, self.elapsed, false)? {
            return Ok(frame);
        }

        tracing::debug!(name = sequence.short_name(), "playback looped");
        self.elapsed = 0.0;
        Self::frame_at(sequence, 0.0, true)?.ok_or(PlayerError::ZeroDuration)
    }

    /// Resolves the frame at `elapsed`, or `None` once past the end.
    fn frame_at<const N: usize>(
        sequence: &Sequence<N>,
        elapsed: f32,
        looped: bool,
    ) -> Result<Option<PlaybackFrame>, PlayerError> {
        if !sequence.is_valid() {
            return Err(PlayerError::InvalidSequence);
        }
        let Some(position) = sequence.position_at(elapsed)? else {
            return Ok(None);
        };
        Ok(Some(PlaybackFrame {
            step_index: position.step_index,
            step: *sequence.step(position.step_index)?,
            elapsed,
            looped,
        }))
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Elapsed time within the sequence, in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
