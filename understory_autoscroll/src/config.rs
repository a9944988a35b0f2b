// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoscroll tuning.

use core::fmt;

/// Shape of the velocity ramp inside the activation band.
///
/// The ramp maps the normalized penetration `t` into the band (`0.0` at the
/// inner boundary, `1.0` at the container edge) onto a fraction of
/// [`AutoscrollConfig::max_speed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ramp {
    /// Speed grows proportionally to `t`.
    Linear,
    /// Speed grows with `t * t`: slow near the inner boundary, fast at the edge.
    #[default]
    Quadratic,
}

impl Ramp {
    /// Applies the ramp to `t`, clamped into `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Quadratic => t * t,
        }
    }
}

/// Error returned when autoscroll tuning values are out of range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The edge fraction must be finite and within `(0, 0.5]`.
    EdgeFraction(f64),
    /// The minimum edge margin must be finite and non-negative.
    MinEdgeMargin(f64),
    /// The maximum speed must be finite and strictly positive.
    MaxSpeed(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeFraction(v) => {
                write!(f, "edge fraction {v} is outside (0, 0.5]")
            }
            Self::MinEdgeMargin(v) => {
                write!(f, "minimum edge margin {v} must be finite and non-negative")
            }
            Self::MaxSpeed(v) => {
                write!(f, "max speed {v} must be finite and positive")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Tuning for the edge autoscroll controller.
///
/// The activation margin is `edge_fraction * viewport_extent`, raised to at
/// least `min_edge_margin` and capped at half the viewport extent so the two
/// bands never overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoscrollConfig {
    edge_fraction: f64,
    min_edge_margin: f64,
    max_speed: f64,
    ramp: Ramp,
}

impl Default for AutoscrollConfig {
    fn default() -> Self {
        Self {
            edge_fraction: 0.1,
            min_edge_margin: 24.0,
            max_speed: 900.0,
            ramp: Ramp::Quadratic,
        }
    }
}

impl AutoscrollConfig {
    /// Creates a validated configuration.
    ///
    /// - `edge_fraction`: activation margin as a fraction of the viewport extent.
    /// - `max_speed`: logical units per second at (or beyond) the edge.
    ///
    /// The minimum margin and ramp keep their defaults; see
    /// [`AutoscrollConfig::with_min_edge_margin`] and [`AutoscrollConfig::with_ramp`].
    pub fn new(edge_fraction: f64, max_speed: f64) -> Result<Self, ConfigError> {
        if !edge_fraction.is_finite() || edge_fraction <= 0.0 || edge_fraction > 0.5 {
            return Err(ConfigError::EdgeFraction(edge_fraction));
        }
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return Err(ConfigError::MaxSpeed(max_speed));
        }
        Ok(Self {
            edge_fraction,
            max_speed,
            ..Self::default()
        })
    }

    /// Sets the lower bound of the activation margin, in logical units.
    pub fn with_min_edge_margin(mut self, margin: f64) -> Result<Self, ConfigError> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ConfigError::MinEdgeMargin(margin));
        }
        self.min_edge_margin = margin;
        Ok(self)
    }

    /// Sets the velocity ramp.
    #[must_use]
    pub fn with_ramp(mut self, ramp: Ramp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Returns the edge fraction.
    #[must_use]
    pub fn edge_fraction(&self) -> f64 {
        self.edge_fraction
    }

    /// Returns the minimum activation margin.
    #[must_use]
    pub fn min_edge_margin(&self) -> f64 {
        self.min_edge_margin
    }

    /// Returns the maximum speed in logical units per second.
    #[must_use]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Returns the velocity ramp.
    #[must_use]
    pub fn ramp(&self) -> Ramp {
        self.ramp
    }

    /// Returns the activation margin for a viewport of the given extent.
    ///
    /// Degenerate (non-positive or non-finite) extents yield `0.0`.
    #[must_use]
    pub fn edge_margin(&self, viewport_extent: f64) -> f64 {
        if !viewport_extent.is_finite() || viewport_extent <= 0.0 {
            return 0.0;
        }
        (self.edge_fraction * viewport_extent)
            .max(self.min_edge_margin)
            .min(viewport_extent * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            AutoscrollConfig::new(0.0, 100.0),
            Err(ConfigError::EdgeFraction(0.0))
        );
        assert_eq!(
            AutoscrollConfig::new(0.6, 100.0),
            Err(ConfigError::EdgeFraction(0.6))
        );
        assert!(matches!(
            AutoscrollConfig::new(0.1, f64::NAN),
            Err(ConfigError::MaxSpeed(_))
        ));
        assert_eq!(
            AutoscrollConfig::default().with_min_edge_margin(-1.0),
            Err(ConfigError::MinEdgeMargin(-1.0))
        );
    }

    #[test]
    fn margin_respects_floor_and_half_viewport_cap() {
        let config = AutoscrollConfig::new(0.1, 100.0)
            .unwrap()
            .with_min_edge_margin(24.0)
            .unwrap();
        // Fraction wins on large viewports.
        assert_eq!(config.edge_margin(1000.0), 100.0);
        // Floor wins on small viewports.
        assert_eq!(config.edge_margin(100.0), 24.0);
        // Never more than half the viewport.
        assert_eq!(config.edge_margin(30.0), 15.0);
        // Degenerate extents have no band at all.
        assert_eq!(config.edge_margin(0.0), 0.0);
        assert_eq!(config.edge_margin(f64::INFINITY), 0.0);
    }

    #[test]
    fn ramps_clamp_and_shape() {
        assert_eq!(Ramp::Linear.apply(0.5), 0.5);
        assert_eq!(Ramp::Quadratic.apply(0.5), 0.25);
        assert_eq!(Ramp::Linear.apply(2.0), 1.0);
        assert_eq!(Ramp::Quadratic.apply(-1.0), 0.0);
    }
}
