#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SequenceStep`**: Mode and color for each of two panels plus a duration
//! - **`Sequence`**: Ordered steps with short name, description and cached total duration
//! - **`SequenceParser`** / **`parse_sequence`**: Reads the line-oriented sequence file format
//! - **`write_sequence`**: Writes a sequence back out in the same format
//! - **`generate`**: Builds a sequence procedurally from a color palette
//! - **`SequenceList`**: Registry of sequences with single selection
//! - **`Player`**: Resolves the current step as an external clock advances
//! - **`files`** (`std`): Directory listing, loading and saving
//!
//! Colors are `Srgb<f32>` (0.0-1.0 range) in memory and packed `0xRRGGBB` on disk.
//! Durations are seconds in memory and tenths of a second on disk.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod collection;
pub mod colors;
pub mod command;
#[cfg(feature = "std")]
pub mod files;
pub mod generator;
pub mod parser;
pub mod player;
pub mod sequence;
pub mod types;
pub mod writer;

pub use collection::{ListError, SequenceList};
pub use command::PlayerAction;
#[cfg(feature = "std")]
pub use files::{FileList, FileName, LoadError, list_directory, load_sequence, save_sequence};
pub use generator::{GeneratorConfig, GeneratorError, generate};
pub use parser::{ParseError, ParseErrorKind, SequenceParser, parse_sequence};
pub use player::{PlaybackFrame, Player, PlayerError, PlayerState};
pub use sequence::{Sequence, SequenceBuilder, StepPosition};
pub use types::{Panel, PanelSetting, SequenceError, SequenceStep};
pub use writer::write_sequence;

pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);
