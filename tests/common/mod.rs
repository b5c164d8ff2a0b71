//! Shared test infrastructure for seqtool integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use seqtool::{Sequence, SequenceStep};

// ============================================================================
// Fixtures
// ============================================================================

/// Step capacity used by most tests.
pub const STEPS: usize = 32;

pub type TestSequence = Sequence<STEPS>;

/// The two-step demo file: named, described, one random panel per step.
pub const DEMO_FILE: &str = "\
# demo
# a short test
01 FF0000 00 00FF00 10
00 0000FF 01 FFFFFF 05
";

/// Builds a valid sequence from raw step tuples `(mode1, color1, mode2, color2, raw)`.
pub fn sequence_of(name: &str, steps: &[(u8, u32, u8, u32, u8)]) -> TestSequence {
    let mut builder = TestSequence::builder().short_name(name);
    for &(mode1, color1, mode2, color2, raw) in steps {
        builder = builder
            .step(SequenceStep::new(mode1, color1, mode2, color2, raw))
            .unwrap();
    }
    builder.build()
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use seqtool::{BLACK, BLUE, GREEN, RED, WHITE};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

/// Compare two durations in seconds with floating-point tolerance
pub fn seconds_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
