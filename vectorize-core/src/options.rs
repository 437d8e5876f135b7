//! Fitting options: the immutable configuration bundle passed to every fit
//! invocation. The core never mutates it and keeps no process-wide state of
//! its own (see spec.md §9, "Options-as-configuration-object").

use crate::bitmap::Rgb;
use crate::error::{VectorizeError, VectorizeResult};
use serde::{Deserialize, Serialize};

/// Recognized fitting options, with the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingOptions {
    /// Region matching this color is skipped during tracing.
    pub background_color: Option<Rgb>,
    /// Palette size for pre-quantization; 0 disables.
    pub color_count: u32,
    /// Angle (degrees) below which a point is always a corner.
    pub corner_always_threshold: f64,
    /// Neighbor count for corner angle measurement.
    pub corner_surround: usize,
    /// Angle (degrees) below which a point is a candidate corner.
    pub corner_threshold: f64,
    /// Pixel error above which a cubic is subdivided.
    pub error_threshold: f64,
    /// Alternate neighbor count for smoothing.
    pub filter_alternative_surround: usize,
    /// Degrees of smoothed-tangent disagreement before using the alternate surround.
    pub filter_epsilon: f64,
    /// Smoothing passes before fitting.
    pub filter_iteration_count: u32,
    /// Weight of neighbors in smoothing, in `[0, 1]`.
    pub filter_percent: f64,
    /// Default neighbor count for smoothing.
    pub filter_surround: usize,
    /// Below this, a cubic becomes a line (a posteriori reversion).
    pub line_reversion_threshold: f64,
    /// Max deviation from endpoint-chord to output a line (a priori check).
    pub line_threshold: f64,
    /// Stop reparameterizing if relative error gain falls below this, in `[0, 1]`.
    pub reparameterize_improvement: f64,
    /// Skip reparameterization if initial error is above this.
    pub reparameterize_threshold: f64,
    /// Window (fraction of the arc) searched around the initial split guess, in `[0, 1]`.
    pub subdivide_search: f64,
    /// Neighbor count in subdivision point search.
    pub subdivide_surround: usize,
    /// Split where this-line distance is at or below this threshold.
    pub subdivide_threshold: f64,
    /// Neighbor count for tangent estimation.
    pub tangent_surround: usize,
    /// Drop a corner if its neighbor is also a corner.
    pub remove_adj_corners: bool,
    /// Run morphological thinning before tracing.
    pub thin: bool,
}

impl Default for FittingOptions {
    fn default() -> Self {
        Self {
            background_color: None,
            color_count: 0,
            corner_always_threshold: 60.0,
            corner_surround: 4,
            corner_threshold: 100.0,
            error_threshold: 2.0,
            filter_alternative_surround: 1,
            filter_epsilon: 10.0,
            filter_iteration_count: 4,
            filter_percent: 0.33,
            filter_surround: 2,
            line_reversion_threshold: 0.01,
            line_threshold: 1.0,
            reparameterize_improvement: 0.10,
            reparameterize_threshold: 30.0,
            subdivide_search: 0.10,
            subdivide_surround: 4,
            subdivide_threshold: 0.03,
            tangent_surround: 3,
            remove_adj_corners: false,
            thin: false,
        }
    }
}

impl FittingOptions {
    /// Reject out-of-range percentages and negative thresholds. Invalid
    /// options are a fatal, configuration-time error (spec.md §7) — the
    /// core never tries to clamp or guess a caller's intent.
    pub fn validate(&self) -> VectorizeResult<()> {
        let percent_fields: [(&str, f64); 2] = [
            ("filter_percent", self.filter_percent),
            ("reparameterize_improvement", self.reparameterize_improvement),
        ];
        for (name, value) in percent_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(VectorizeError::invalid_options(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.subdivide_search) {
            return Err(VectorizeError::invalid_options(format!(
                "subdivide_search must be in [0, 1], got {}",
                self.subdivide_search
            )));
        }

        let non_negative_fields: [(&str, f64); 8] = [
            ("corner_always_threshold", self.corner_always_threshold),
            ("corner_threshold", self.corner_threshold),
            ("error_threshold", self.error_threshold),
            ("filter_epsilon", self.filter_epsilon),
            ("line_reversion_threshold", self.line_reversion_threshold),
            ("line_threshold", self.line_threshold),
            ("reparameterize_threshold", self.reparameterize_threshold),
            ("subdivide_threshold", self.subdivide_threshold),
        ];
        for (name, value) in non_negative_fields {
            if value < 0.0 {
                return Err(VectorizeError::invalid_options(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.corner_always_threshold > self.corner_threshold {
            return Err(VectorizeError::invalid_options(
                "corner_always_threshold must not exceed corner_threshold",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let opts = FittingOptions::default();
        assert_eq!(opts.corner_always_threshold, 60.0);
        assert_eq!(opts.corner_surround, 4);
        assert_eq!(opts.corner_threshold, 100.0);
        assert_eq!(opts.error_threshold, 2.0);
        assert_eq!(opts.filter_alternative_surround, 1);
        assert_eq!(opts.filter_epsilon, 10.0);
        assert_eq!(opts.filter_iteration_count, 4);
        assert_eq!(opts.filter_percent, 0.33);
        assert_eq!(opts.filter_surround, 2);
        assert_eq!(opts.line_reversion_threshold, 0.01);
        assert_eq!(opts.line_threshold, 1.0);
        assert_eq!(opts.reparameterize_improvement, 0.10);
        assert_eq!(opts.reparameterize_threshold, 30.0);
        assert_eq!(opts.subdivide_search, 0.10);
        assert_eq!(opts.subdivide_surround, 4);
        assert_eq!(opts.subdivide_threshold, 0.03);
        assert_eq!(opts.tangent_surround, 3);
        assert!(!opts.remove_adj_corners);
        assert!(!opts.thin);
        assert_eq!(opts.color_count, 0);
        assert!(opts.background_color.is_none());
        opts.validate().expect("defaults must validate");
    }

    #[test]
    fn rejects_out_of_range_percent() {
        let mut opts = FittingOptions::default();
        opts.filter_percent = 1.5;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_negative_threshold() {
        let mut opts = FittingOptions::default();
        opts.error_threshold = -1.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_inverted_corner_thresholds() {
        let mut opts = FittingOptions::default();
        opts.corner_always_threshold = 120.0;
        opts.corner_threshold = 100.0;
        assert!(opts.validate().is_err());
    }
}
