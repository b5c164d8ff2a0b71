//! Core types for sequence construction.

use crate::colors::{pack_rgb, unpack_rgb};
use palette::Srgb;

/// Bit in a panel mode byte that requests a random color instead of the stored one.
pub const RANDOM_COLOR_BIT: u8 = 0x01;

/// Largest raw duration a step can store, in tenths of a second.
pub const MAX_RAW_DURATION: u8 = u8::MAX;

/// One of the two panels driven by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Panel {
    First,
    Second,
}

/// Mode and color for one panel.
///
/// The random flag is read from bit 0 of `mode`, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSetting {
    /// Display mode byte.
    pub mode: u8,

    /// Color shown when the random flag is clear.
    pub color: Srgb,
}

impl PanelSetting {
    /// Creates a panel setting from a mode byte and a packed `0xRRGGBB` color.
    #[inline]
    pub fn new(mode: u8, packed_color: u32) -> Self {
        Self {
            mode,
            color: unpack_rgb(packed_color),
        }
    }

    /// Whether this panel shows a random color.
    #[inline]
    pub fn is_random(&self) -> bool {
        self.mode & RANDOM_COLOR_BIT != 0
    }

    /// Sets or clears the random bit, leaving the other mode bits untouched.
    #[inline]
    pub fn set_random(&mut self, random: bool) {
        if random {
            self.mode |= RANDOM_COLOR_BIT;
        } else {
            self.mode &= !RANDOM_COLOR_BIT;
        }
    }

    /// The color as packed `0xRRGGBB`.
    #[inline]
    pub fn packed_color(&self) -> u32 {
        pack_rgb(self.color)
    }
}

/// A single timed step: a setting for each panel plus a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceStep {
    panels: [PanelSetting; 2],
    duration: f32,
}

impl SequenceStep {
    /// Creates a step from the five fields of a data line.
    ///
    /// Colors are packed `0xRRGGBB` (bits above 24 are dropped) and
    /// `raw_duration` is in tenths of a second.
    pub fn new(mode1: u8, color1: u32, mode2: u8, color2: u32, raw_duration: u8) -> Self {
        Self {
            panels: [PanelSetting::new(mode1, color1), PanelSetting::new(mode2, color2)],
            duration: raw_to_seconds(raw_duration),
        }
    }

    /// Creates a step from already decoded panel settings.
    ///
    /// Negative durations are clamped to zero, as with [`SequenceStep::set_duration`].
    pub fn from_panels(first: PanelSetting, second: PanelSetting, duration: f32) -> Self {
        let mut step = Self {
            panels: [first, second],
            duration: 0.0,
        };
        step.set_duration(duration);
        step
    }

    #[inline]
    pub fn panel(&self, panel: Panel) -> &PanelSetting {
        &self.panels[panel.index()]
    }

    #[inline]
    pub fn panel_mut(&mut self, panel: Panel) -> &mut PanelSetting {
        &mut self.panels[panel.index()]
    }

    #[inline]
    pub fn mode1(&self) -> u8 {
        self.panels[0].mode
    }

    #[inline]
    pub fn mode2(&self) -> u8 {
        self.panels[1].mode
    }

    #[inline]
    pub fn color1(&self) -> Srgb {
        self.panels[0].color
    }

    #[inline]
    pub fn color2(&self) -> Srgb {
        self.panels[1].color
    }

    #[inline]
    pub fn random1(&self) -> bool {
        self.panels[0].is_random()
    }

    #[inline]
    pub fn random2(&self) -> bool {
        self.panels[1].is_random()
    }

    /// Step duration in seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Duration in file units (tenths of a second), rounded and saturated to a byte.
    pub fn raw_duration(&self) -> u8 {
        seconds_to_raw(self.duration)
    }

    pub fn set_mode(&mut self, panel: Panel, mode: u8) {
        self.panel_mut(panel).mode = mode;
    }

    pub fn set_color(&mut self, panel: Panel, color: Srgb) {
        self.panel_mut(panel).color = color;
    }

    pub fn set_random(&mut self, panel: Panel, random: bool) {
        self.panel_mut(panel).set_random(random);
    }

    /// Sets the duration in seconds. Negative values are stored as zero.
    ///
    /// The owning sequence's total is not updated; call
    /// [`Sequence::recompute_duration`](crate::Sequence::recompute_duration).
    pub fn set_duration(&mut self, seconds: f32) {
        self.duration = seconds.max(0.0);
    }
}

impl Default for SequenceStep {
    /// Both panels black, mode 0, one second.
    fn default() -> Self {
        Self::new(0, 0x000000, 0, 0x000000, 10)
    }
}

impl Panel {
    #[inline]
    const fn index(self) -> usize {
        match self {
            Panel::First => 0,
            Panel::Second => 1,
        }
    }
}

/// Converts file units to seconds. The file stores tenths of a second.
#[inline]
pub fn raw_to_seconds(raw: u8) -> f32 {
    (raw as f32 * 100.0) / 1000.0
}

/// Converts seconds to file units, rounding to the nearest tenth.
#[inline]
pub fn seconds_to_raw(seconds: f32) -> u8 {
    let tenths = seconds * 10.0 + 0.5;
    if tenths <= 0.0 {
        0
    } else if tenths >= MAX_RAW_DURATION as f32 {
        MAX_RAW_DURATION
    } else {
        tenths as u8
    }
}

/// Sequence errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Step index is not in `0..len`.
    OutOfRange { index: usize, len: usize },

    /// The operation needs at least one step.
    EmptySequence,

    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::OutOfRange { index, len } => {
                write!(f, "step index {} out of range for sequence of {} steps", index, len)
            }
            SequenceError::EmptySequence => {
                write!(f, "sequence has no steps")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
