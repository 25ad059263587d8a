//! Calibration slope extraction.
//!
//! The probe answers `Slope,?` with `?Slope,<acid>,<base>,<offset>\r`:
//! how closely the calibrated acid and base slopes match an ideal probe
//! (percent), and the zero-point offset in millivolts.

use super::parser::SLOPE_PREFIX;

/// Fewer characters than this means no usable answer has been seen.
pub const MIN_SLOPE_RESPONSE_LEN: usize = 10;

/// Strip the `?Slope,` prefix and the trailing terminator from a stored
/// answer.  Returns `""` for anything shorter than
/// [`MIN_SLOPE_RESPONSE_LEN`].
pub fn extract_slope(response: &str) -> &str {
    if response.len() < MIN_SLOPE_RESPONSE_LEN {
        return "";
    }
    response
        .get(SLOPE_PREFIX.len()..response.len() - 1)
        .unwrap_or("")
}

/// Typed view of a slope fragment such as `99.7,100.3,-0.89`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeReport {
    /// Acid-side slope as a percentage of ideal.
    pub acid_percent: f32,
    /// Base-side slope as a percentage of ideal.
    pub base_percent: f32,
    /// Zero-point offset (mV).
    pub zero_offset_mv: f32,
}

impl SlopeReport {
    /// Parse `a,b,c`; whitespace around fields is tolerated.
    pub fn parse(fragment: &str) -> Option<Self> {
        let mut fields = fragment.split(',').map(|f| f.trim().parse::<f32>());
        let acid_percent = fields.next()?.ok()?;
        let base_percent = fields.next()?.ok()?;
        let zero_offset_mv = fields.next()?.ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            acid_percent,
            base_percent,
            zero_offset_mv,
        })
    }
}
