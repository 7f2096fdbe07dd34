//! Model: MinerConfig and its validation.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Tuning knobs for template matching.
///
/// The defaults are the classic SPELL heuristic: a candidate template must be
/// within a factor of two of the sequence length and match at least half of
/// its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Templates shorter than `len / length_ratio` or longer than
    /// `len * length_ratio` are never scored.
    pub length_ratio: f64,
    /// Minimum share of the sequence's tokens the greedy score must reach.
    pub match_threshold: f64,
    /// Keep the first symbol of a template literal when it stops matching.
    pub preserve_leading_token: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            length_ratio: 2.0,
            match_threshold: 0.5,
            preserve_leading_token: true,
        }
    }
}

impl MinerConfig {
    /// Validate ratio and threshold ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.length_ratio.is_finite() || self.length_ratio < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "length_ratio must be a finite value >= 1.0 (got {})",
                self.length_ratio
            )));
        }
        if !(self.match_threshold > 0.0 && self.match_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "match_threshold must be in (0.0, 1.0] (got {})",
                self.match_threshold
            )));
        }
        Ok(())
    }

    /// True when a template of `template_len` symbols is worth scoring
    /// against a sequence of `sequence_len` tokens.
    #[inline]
    pub(crate) fn length_compatible(&self, template_len: usize, sequence_len: usize) -> bool {
        let t = template_len as f64;
        let s = sequence_len as f64;
        !(t < s / self.length_ratio || t > s * self.length_ratio)
    }

    #[inline]
    pub(crate) fn meets_threshold(&self, score: usize, sequence_len: usize) -> bool {
        score as f64 >= sequence_len as f64 * self.match_threshold
    }
}
