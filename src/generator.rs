//! Procedural sequence generation from a color palette.

use crate::colors::pack_rgb;
use crate::sequence::Sequence;
use crate::types::{MAX_RAW_DURATION, SequenceStep};
use palette::Srgb;

/// Settings for [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig<'a> {
    /// Short name of the generated sequence.
    pub name: &'a str,

    /// Number of lit steps to generate.
    pub step_count: usize,

    /// Duration of each lit step, in seconds.
    pub step_duration: f32,

    /// Follow every lit step with a dark wait step.
    pub wait_steps: bool,

    /// Duration of each wait step, in seconds. Ignored unless `wait_steps` is set.
    pub wait_duration: f32,
}

impl Default for GeneratorConfig<'_> {
    fn default() -> Self {
        Self {
            name: "",
            step_count: 1,
            step_duration: 1.0,
            wait_steps: true,
            wait_duration: 1.0,
        }
    }
}

/// Generator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeneratorError {
    /// The settings cannot produce a sequence; the message names the offending setting.
    InvalidConfiguration(&'static str),

    /// The generated steps do not fit in the sequence.
    CapacityExceeded,
}

impl core::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GeneratorError::InvalidConfiguration(reason) => {
                write!(f, "invalid generator configuration: {}", reason)
            }
            GeneratorError::CapacityExceeded => {
                write!(f, "generated steps exceed sequence capacity")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GeneratorError {}

/// Builds a sequence cycling through `palette`.
///
/// Step `i` shows `palette[i % palette.len()]` on both panels with no random
/// modes. With wait steps enabled each lit step is followed by a black one.
/// Durations are truncated to tenths of a second. The result is valid and has
/// its duration computed.
///
/// # Errors
/// * `InvalidConfiguration` - Empty palette, zero steps, or a duration that
///   truncates to zero tenths or exceeds 25.5 s
/// * `CapacityExceeded` - More steps than `N`
pub fn generate<const N: usize>(
    config: &GeneratorConfig<'_>,
    palette: &[Srgb],
) -> Result<Sequence<N>, GeneratorError> {
    if palette.is_empty() {
        return Err(GeneratorError::InvalidConfiguration("palette is empty"));
    }
    if config.step_count == 0 {
        return Err(GeneratorError::InvalidConfiguration("step count must be positive"));
    }
    let step_raw = quantize(config.step_duration)
        .ok_or(GeneratorError::InvalidConfiguration("step duration out of range"))?;
    let wait_raw = if config.wait_steps {
        Some(
            quantize(config.wait_duration)
                .ok_or(GeneratorError::InvalidConfiguration("wait duration out of range"))?,
        )
    } else {
        None
    };

    let steps_per_entry = if wait_raw.is_some() { 2 } else { 1 };
    if config.step_count.saturating_mul(steps_per_entry) > N {
        return Err(GeneratorError::CapacityExceeded);
    }

    tracing::info!(
        name = config.name,
        steps = config.step_count,
        wait = config.wait_steps,
        "generating sequence"
    );

    let mut builder = Sequence::<N>::builder().short_name(config.name);
    for color in palette.iter().cycle().take(config.step_count) {
        let packed = pack_rgb(*color);
        builder = builder
            .step(SequenceStep::new(0, packed, 0, packed, step_raw))
            .map_err(|_| GeneratorError::CapacityExceeded)?;
        if let Some(raw) = wait_raw {
            builder = builder
                .step(SequenceStep::new(0, 0x000000, 0, 0x000000, raw))
                .map_err(|_| GeneratorError::CapacityExceeded)?;
        }
    }

    Ok(builder.build())
}

/// Truncates seconds to whole tenths; `None` if that is zero or does not fit a byte.
fn quantize(seconds: f32) -> Option<u8> {
    let tenths = seconds * 10.0;
    if !(tenths >= 1.0 && tenths < MAX_RAW_DURATION as f32 + 1.0) {
        return None;
    }
    Some(tenths as u8)
}
