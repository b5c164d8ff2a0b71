use crate::sequence::Sequence;
use heapless::Vec;

/// Errors that can occur during list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListError {
    /// The index is not in `0..len`.
    OutOfRange { index: usize, len: usize },

    /// The list is full and cannot accept more sequences.
    ListFull,
}

impl core::fmt::Display for ListError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ListError::OutOfRange { index, len } => {
                write!(f, "sequence index {} out of range for list of {}", index, len)
            }
            ListError::ListFull => {
                write!(f, "sequence list is full")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ListError {}

/// An ordered registry of sequences with at most one selected.
///
/// Display ids are 1-based (`index + 1`). Names are not required to be unique;
/// callers that want unique names check [`exists`](Self::exists) before adding.
///
/// # Type Parameters
/// * `N` - Maximum number of steps in each sequence
/// * `M` - Maximum number of sequences in the list
#[derive(Debug, Clone)]
pub struct SequenceList<const N: usize, const M: usize> {
    sequences: Vec<Sequence<N>, M>,
    selected: Option<usize>,
}

impl<const N: usize, const M: usize> SequenceList<N, M> {
    /// Creates an empty list with nothing selected.
    pub fn new() -> Self {
        Self {
            sequences: Vec::new(),
            selected: None,
        }
    }

    /// Appends a sequence and returns its index.
    ///
    /// # Errors
    /// * `ListFull` - The list already holds `M` sequences
    pub fn add(&mut self, sequence: Sequence<N>) -> Result<usize, ListError> {
        let index = self.sequences.len();
        self.sequences.push(sequence).map_err(|_| ListError::ListFull)?;
        tracing::debug!(index, "sequence added");
        Ok(index)
    }

    /// Removes and returns the sequence at `index`.
    ///
    /// A selection on the removed sequence is cleared; a selection after it
    /// moves down with its sequence.
    pub fn remove(&mut self, index: usize) -> Result<Sequence<N>, ListError> {
        let len = self.sequences.len();
        if index >= len {
            return Err(ListError::OutOfRange { index, len });
        }
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Ok(self.sequences.remove(index))
    }

    /// Changes the selection. `None` clears it.
    ///
    /// Every sequence is stopped first, so at most one can be playing at a time.
    /// On error the selection and running flags are left untouched.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), ListError> {
        let len = self.sequences.len();
        if let Some(index) = index {
            if index >= len {
                return Err(ListError::OutOfRange { index, len });
            }
        }

        for sequence in self.sequences.iter_mut() {
            sequence.set_running(false);
        }
        self.selected = index;

        if let Some(sequence) = self.selected() {
            tracing::info!(
                name = sequence.short_name(),
                steps = sequence.step_count(),
                "sequence selected"
            );
        }
        Ok(())
    }

    #[inline]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Sequence<N>> {
        self.selected.and_then(|index| self.sequences.get(index))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Sequence<N>> {
        self.selected.and_then(|index| self.sequences.get_mut(index))
    }

    /// Whether a sequence's short name starts with `name`.
    ///
    /// This is the check callers run before adding a sequence under a new name.
    pub fn exists(&self, name: &str) -> bool {
        self.sequences
            .iter()
            .any(|sequence| sequence.short_name().starts_with(name))
    }

    pub fn get(&self, index: usize) -> Result<&Sequence<N>, ListError> {
        let len = self.sequences.len();
        self.sequences
            .get(index)
            .ok_or(ListError::OutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Sequence<N>, ListError> {
        let len = self.sequences.len();
        self.sequences
            .get_mut(index)
            .ok_or(ListError::OutOfRange { index, len })
    }

    /// Iterates over `(display id, sequence)` pairs in list order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Sequence<N>)> {
        self.sequences
            .iter()
            .enumerate()
            .map(|(index, sequence)| (index + 1, sequence))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl<const N: usize, const M: usize> Default for SequenceList<N, M> {
    fn default() -> Self {
        Self::new()
    }
}
