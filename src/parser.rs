//! Line-oriented parser for sequence files.
//!
//! ```text
//! # short name
//! # description, any number of lines
//! 01 FF0000 00 00FF00 10
//! ```
//!
//! Data lines hold five whitespace-separated fields: panel 1 mode (hex byte),
//! panel 1 color (up to six hex digits), panel 2 mode, panel 2 color and the
//! duration in tenths of a second (decimal byte). A malformed data line fails
//! the whole file.

use crate::sequence::Sequence;
use crate::types::{Panel, SequenceStep};

/// Field of a data line, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataField {
    Mode1,
    Color1,
    Mode2,
    Color2,
    Duration,
}

impl DataField {
    const ALL: [DataField; 5] = [
        DataField::Mode1,
        DataField::Color1,
        DataField::Mode2,
        DataField::Color2,
        DataField::Duration,
    ];

    fn name(self) -> &'static str {
        match self {
            DataField::Mode1 => "mode 1",
            DataField::Color1 => "color 1",
            DataField::Mode2 => "mode 2",
            DataField::Color2 => "color 2",
            DataField::Duration => "duration",
        }
    }
}

/// Why a data line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MalformedReason {
    /// The line did not split into exactly five fields.
    FieldCount(usize),

    /// A field was not a number of the expected base and width.
    InvalidField(DataField),
}

/// What went wrong on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// A data line does not match the five-field grammar.
    MalformedLine(MalformedReason),

    /// The file holds more steps than the sequence can store.
    CapacityExceeded,
}

/// A parse failure, tagged with the 1-based line number it occurred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Whether the failure was a data line that does not match the grammar.
    pub fn is_malformed_line(&self) -> bool {
        matches!(self.kind, ParseErrorKind::MalformedLine(_))
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ParseErrorKind::MalformedLine(MalformedReason::FieldCount(found)) => {
                write!(f, "line {}: expected 5 fields, found {}", self.line, found)
            }
            ParseErrorKind::MalformedLine(MalformedReason::InvalidField(field)) => {
                write!(f, "line {}: invalid {} field", self.line, field.name())
            }
            ParseErrorKind::CapacityExceeded => {
                write!(f, "line {}: sequence capacity exceeded", self.line)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Parses the full text of a sequence file.
///
/// `file_name` is recorded on the sequence and used as the short name unless
/// the file provides one.
pub fn parse_sequence<const N: usize>(file_name: &str, text: &str) -> Result<Sequence<N>, ParseError> {
    let mut parser = SequenceParser::new(file_name);
    for line in text.lines() {
        parser.feed_line(line)?;
    }
    Ok(parser.finish())
}

/// Parses a single data line into a step.
pub fn parse_data_line(line: &str) -> Result<SequenceStep, MalformedReason> {
    let mut fields: [&str; 5] = [""; 5];
    let mut found = 0;
    for field in line.split_whitespace() {
        if found < fields.len() {
            fields[found] = field;
        }
        found += 1;
    }
    if found != fields.len() {
        return Err(MalformedReason::FieldCount(found));
    }

    let mut values = [0u32; 5];
    for ((value, text), field) in values.iter_mut().zip(fields).zip(DataField::ALL) {
        *value = parse_field(field, text).ok_or(MalformedReason::InvalidField(field))?;
    }

    // Widths are checked by parse_field, so the narrowing casts are lossless.
    Ok(SequenceStep::new(
        values[0] as u8,
        values[1],
        values[2] as u8,
        values[3],
        values[4] as u8,
    ))
}

fn parse_field(field: DataField, text: &str) -> Option<u32> {
    let (radix, max_digits, max_value) = match field {
        DataField::Mode1 | DataField::Mode2 => (16, 2, 0xFF),
        DataField::Color1 | DataField::Color2 => (16, 6, 0xFF_FFFF),
        DataField::Duration => (10, 3, 0xFF),
    };
    if text.is_empty() || text.len() > max_digits || !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(text, radix)
        .ok()
        .filter(|value| *value <= max_value)
}

/// Incremental parser fed one line at a time.
///
/// The first `#` line names the sequence, later ones extend the description,
/// blank lines are skipped and every other line must be a data line.
#[derive(Debug)]
pub struct SequenceParser<const N: usize> {
    sequence: Sequence<N>,
    line: usize,
    name_seen: bool,
}

impl<const N: usize> SequenceParser<N> {
    pub fn new(file_name: &str) -> Self {
        Self {
            sequence: Sequence::with_file_name(file_name),
            line: 0,
            name_seen: false,
        }
    }

    /// Consumes one line; trailing `\r` and `\n` are ignored.
    ///
    /// On error the parser should be dropped; the file is rejected as a whole.
    pub fn feed_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.line += 1;
        let line = line.trim_end_matches(['\n', '\r']);

        if line.trim().is_empty() {
            return Ok(());
        }

        if let Some(comment) = line.strip_prefix('#') {
            let text = comment.trim();
            if !self.name_seen {
                self.name_seen = true;
                if !text.is_empty() {
                    tracing::debug!(line = self.line, name = text, "sequence name");
                    self.sequence.set_short_name(text);
                }
            } else {
                self.sequence.append_description_line(text);
            }
            return Ok(());
        }

        let step = parse_data_line(line).map_err(|reason| ParseError {
            line: self.line,
            kind: ParseErrorKind::MalformedLine(reason),
        })?;
        tracing::debug!(
            line = self.line,
            mode1 = step.mode1(),
            color1 = step.panel(Panel::First).packed_color(),
            mode2 = step.mode2(),
            color2 = step.panel(Panel::Second).packed_color(),
            duration = step.duration(),
            "step"
        );
        self.sequence.add_step(step).map_err(|_| ParseError {
            line: self.line,
            kind: ParseErrorKind::CapacityExceeded,
        })
    }

    /// Number of lines consumed so far.
    #[inline]
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Completes parsing: computes the duration and marks the sequence valid.
    pub fn finish(mut self) -> Sequence<N> {
        self.sequence.recompute_duration();
        self.sequence.set_valid(true);
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_line_accepts_short_hex_fields() {
        let step = parse_data_line("1 F 0 0 5").unwrap();
        assert_eq!(step.mode1(), 1);
        assert_eq!(step.panel(Panel::First).packed_color(), 0x00000F);
        assert_eq!(step.raw_duration(), 5);
    }

    #[test]
    fn data_line_rejects_wide_fields() {
        assert_eq!(
            parse_data_line("100 FF0000 00 00FF00 10"),
            Err(MalformedReason::InvalidField(DataField::Mode1))
        );
        assert_eq!(
            parse_data_line("01 1FF0000 00 00FF00 10"),
            Err(MalformedReason::InvalidField(DataField::Color1))
        );
        assert_eq!(
            parse_data_line("01 FF0000 00 00FF00 256"),
            Err(MalformedReason::InvalidField(DataField::Duration))
        );
    }

    #[test]
    fn data_line_rejects_signs_and_hex_durations() {
        assert_eq!(
            parse_data_line("+1 FF0000 00 00FF00 10"),
            Err(MalformedReason::InvalidField(DataField::Mode1))
        );
        assert_eq!(
            parse_data_line("01 FF0000 00 00FF00 0A"),
            Err(MalformedReason::InvalidField(DataField::Duration))
        );
    }

    #[test]
    fn data_line_counts_fields() {
        assert_eq!(parse_data_line("01 FF0000 00"), Err(MalformedReason::FieldCount(3)));
        assert_eq!(
            parse_data_line("01 FF0000 00 00FF00 10 99"),
            Err(MalformedReason::FieldCount(6))
        );
    }

    #[test]
    fn parser_tracks_line_numbers() {
        let mut parser = SequenceParser::<4>::new("x");
        parser.feed_line("# name\r\n").unwrap();
        parser.feed_line("\r\n").unwrap();
        let err = parser.feed_line("zz").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.is_malformed_line());
    }
}
