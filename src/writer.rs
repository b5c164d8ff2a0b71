//! Writes sequences back out in the file format read by [`crate::parser`].

use crate::sequence::Sequence;
use crate::types::{Panel, SequenceStep};
use core::fmt::{self, Write};

/// Writes `sequence` as a sequence file.
///
/// Emits the short name as the first comment, the description as a second
/// comment when present, then one data line per step.
pub fn write_sequence<const N: usize, W: Write>(sequence: &Sequence<N>, out: &mut W) -> fmt::Result {
    writeln!(out, "# {}", sequence.short_name())?;
    if !sequence.description().is_empty() {
        writeln!(out, "# {}", sequence.description())?;
    }
    for step in sequence.steps() {
        write_step(step, out)?;
        out.write_char('\n')?;
    }
    Ok(())
}

/// Writes one step as a data line, without a line terminator.
pub fn write_step<W: Write>(step: &SequenceStep, out: &mut W) -> fmt::Result {
    let first = step.panel(Panel::First);
    let second = step.panel(Panel::Second);
    write!(
        out,
        "{:02X} {:06X} {:02X} {:06X} {:02}",
        first.mode,
        first.packed_color(),
        second.mode,
        second.packed_color(),
        step.raw_duration()
    )
}
