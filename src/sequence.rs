use crate::types::{SequenceError, SequenceStep};
use heapless::{String, Vec};

/// Maximum number of characters kept in a short name or file name.
pub const NAME_CAPACITY: usize = 31;

/// Maximum number of characters kept in a description.
pub const DESCRIPTION_CAPACITY: usize = 255;

/// Bounded short name or file name.
pub type Name = String<NAME_CAPACITY>;

/// Bounded free-text description.
pub type Description = String<DESCRIPTION_CAPACITY>;

/// Where playback is within a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPosition {
    /// Index of the current step.
    pub step_index: usize,

    /// Time spent in the current step, in seconds.
    pub time_in_step: f32,

    /// Time left in the current step, in seconds.
    pub remaining: f32,
}

/// An ordered list of timed two-panel steps plus descriptive metadata.
///
/// The total duration is cached. Structural edits (`add_step`, `remove_step`, ...)
/// and in-place step edits do not refresh it, so batch edits stay linear; call
/// [`recompute_duration`](Self::recompute_duration) once the edits are done.
///
/// A default-constructed sequence is invalid and stands for "nothing loaded".
///
/// # Type Parameters
/// * `N` - Maximum number of steps this sequence can hold
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<const N: usize> {
    steps: Vec<SequenceStep, N>,
    short_name: Name,
    file_name: Name,
    description: Description,
    duration: f32,
    valid: bool,
    running: bool,
}

impl<const N: usize> Sequence<N> {
    /// Creates an empty, invalid sequence.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            short_name: Name::new(),
            file_name: Name::new(),
            description: Description::new(),
            duration: 0.0,
            valid: false,
            running: false,
        }
    }

    /// Creates an empty sequence backed by `file_name`.
    ///
    /// The short name starts out as the file name; a name comment in the file
    /// replaces it.
    pub fn with_file_name(file_name: &str) -> Self {
        let mut sequence = Self::new();
        push_truncated(&mut sequence.file_name, file_name);
        push_comment_text(&mut sequence.short_name, file_name);
        sequence
    }

    /// Creates a sequence builder.
    pub fn builder() -> SequenceBuilder<N> {
        SequenceBuilder::new()
    }

    /// Appends a step. Does not refresh the cached duration.
    pub fn add_step(&mut self, step: SequenceStep) -> Result<(), SequenceError> {
        self.steps
            .push(step)
            .map_err(|_| SequenceError::CapacityExceeded)
    }

    /// Inserts a step before `index`; `index == len` appends.
    pub fn insert_step(&mut self, index: usize, step: SequenceStep) -> Result<(), SequenceError> {
        let len = self.steps.len();
        if index > len {
            return Err(SequenceError::OutOfRange { index, len });
        }
        self.steps
            .insert(index, step)
            .map_err(|_| SequenceError::CapacityExceeded)
    }

    /// Removes and returns the step at `index`, shifting later steps down.
    ///
    /// On error the sequence is left untouched. Does not refresh the cached duration.
    pub fn remove_step(&mut self, index: usize) -> Result<SequenceStep, SequenceError> {
        let len = self.steps.len();
        if index >= len {
            return Err(SequenceError::OutOfRange { index, len });
        }
        Ok(self.steps.remove(index))
    }

    /// Removes all steps. Does not refresh the cached duration.
    pub fn clear_steps(&mut self) {
        self.steps.clear();
    }

    /// Recalculates the cached total duration from the steps.
    pub fn recompute_duration(&mut self) {
        self.duration = self.steps.iter().map(SequenceStep::duration).sum();
    }

    /// Cached total duration in seconds, as of the last
    /// [`recompute_duration`](Self::recompute_duration).
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Resolves the step playing `elapsed` seconds into the sequence.
    ///
    /// The current step is the first one whose cumulative end time is past
    /// `elapsed`. Negative times are treated as zero.
    ///
    /// # Returns
    /// * `Ok(Some(position))` - The step playing at this time
    /// * `Ok(None)` - `elapsed` is at or past the end; the caller should wrap to zero
    /// * `Err(EmptySequence)` - There are no steps to play
    pub fn position_at(&self, elapsed: f32) -> Result<Option<StepPosition>, SequenceError> {
        if self.steps.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        let elapsed = elapsed.max(0.0);
        let mut step_start = 0.0;
        for (step_index, step) in self.steps.iter().enumerate() {
            let step_end = step_start + step.duration();
            if elapsed < step_end {
                return Ok(Some(StepPosition {
                    step_index,
                    time_in_step: elapsed - step_start,
                    remaining: step_end - elapsed,
                }));
            }
            step_start = step_end;
        }

        Ok(None)
    }

    /// Returns the step at `index`.
    pub fn step(&self, index: usize) -> Result<&SequenceStep, SequenceError> {
        let len = self.steps.len();
        self.steps
            .get(index)
            .ok_or(SequenceError::OutOfRange { index, len })
    }

    /// Returns the step at `index` for in-place editing.
    pub fn step_mut(&mut self, index: usize) -> Result<&mut SequenceStep, SequenceError> {
        let len = self.steps.len();
        self.steps
            .get_mut(index)
            .ok_or(SequenceError::OutOfRange { index, len })
    }

    #[inline]
    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Replaces the short name, keeping at most [`NAME_CAPACITY`] characters.
    ///
    /// Control characters become spaces and surrounding whitespace is trimmed,
    /// so the name always fits on a single comment line.
    pub fn set_short_name(&mut self, name: &str) {
        self.short_name.clear();
        push_comment_text(&mut self.short_name, name);
    }

    /// Name of the backing file, empty for generated sequences.
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Appends a fragment to the description.
    ///
    /// Fragments are joined with a single space and cleaned like
    /// [`Sequence::set_short_name`]. Blank fragments are ignored and anything
    /// past [`DESCRIPTION_CAPACITY`] characters is dropped.
    pub fn append_description_line(&mut self, text: &str) {
        let text = text.trim_matches(is_comment_space);
        let Some(first) = text.chars().next() else {
            return;
        };
        if !self.description.is_empty() {
            // the separator only goes in if some of the fragment follows it
            if self.description.len() + 1 + first.len_utf8() > DESCRIPTION_CAPACITY
                || self.description.push(' ').is_err()
            {
                return;
            }
        }
        push_comment_text(&mut self.description, text);
    }

    /// Whether the sequence was completely parsed or built.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Whether a player is currently stepping through this sequence.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }
}

impl<const N: usize> Default for Sequence<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies characters from `text` into `dst` until it is full.
///
/// Never splits a multi-byte character.
pub(crate) fn push_truncated<const C: usize>(dst: &mut String<C>, text: &str) {
    for c in text.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

fn is_comment_space(c: char) -> bool {
    c.is_whitespace() || c.is_control()
}

/// Appends `text` as single-line comment content: control characters become
/// spaces, and nothing starts or ends with whitespace.
fn push_comment_text<const C: usize>(dst: &mut String<C>, text: &str) {
    let text = text.trim_matches(is_comment_space);
    for c in text.chars() {
        let c = if c.is_control() { ' ' } else { c };
        if dst.push(c).is_err() {
            break;
        }
    }
    while dst.ends_with(is_comment_space) {
        dst.pop();
    }
}

/// Builder for complete, valid sequences.
#[derive(Debug)]
pub struct SequenceBuilder<const N: usize> {
    sequence: Sequence<N>,
}

impl<const N: usize> SequenceBuilder<N> {
    /// Creates a new empty sequence builder.
    pub fn new() -> Self {
        Self {
            sequence: Sequence::new(),
        }
    }

    /// Sets the short name.
    pub fn short_name(mut self, name: &str) -> Self {
        self.sequence.set_short_name(name);
        self
    }

    /// Appends a description fragment.
    pub fn description_line(mut self, text: &str) -> Self {
        self.sequence.append_description_line(text);
        self
    }

    /// Adds a step to the sequence.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` steps
    pub fn step(mut self, step: SequenceStep) -> Result<Self, SequenceError> {
        self.sequence.add_step(step)?;
        Ok(self)
    }

    /// Finishes the sequence: computes its duration and marks it valid.
    pub fn build(mut self) -> Sequence<N> {
        self.sequence.recompute_duration();
        self.sequence.valid = true;
        self.sequence
    }
}

impl<const N: usize> Default for SequenceBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
