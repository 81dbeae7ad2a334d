//! Gradient types for fill and stroke styles.

use crate::color::Rgba32;
use crate::error::{ContextError, ContextResult};
use crate::style::ExtendMode;

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f64,
    /// Color at this stop.
    pub color: Rgba32,
}

/// Type of gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientKind {
    /// Linear gradient from (x0, y0) to (x1, y1).
    Linear { x0: f64, y0: f64, x1: f64, y1: f64 },
    /// Radial gradient centered at (cx, cy) with focal point (fx, fy).
    Radial {
        cx: f64,
        cy: f64,
        fx: f64,
        fy: f64,
        r: f64,
    },
}

/// Linear or radial gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    kind: GradientKind,
    extend_mode: ExtendMode,
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Create a new linear gradient.
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::with_kind(GradientKind::Linear { x0, y0, x1, y1 })
    }

    /// Create a new radial gradient.
    pub fn radial(cx: f64, cy: f64, fx: f64, fy: f64, r: f64) -> Self {
        Self::with_kind(GradientKind::Radial { cx, cy, fx, fy, r })
    }

    fn with_kind(kind: GradientKind) -> Self {
        Self {
            kind,
            extend_mode: ExtendMode::default(),
            stops: Vec::new(),
        }
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn extend_mode(&self) -> ExtendMode {
        self.extend_mode
    }

    pub fn set_extend_mode(&mut self, mode: ExtendMode) {
        self.extend_mode = mode;
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Add a color stop. Stops are kept sorted by offset; equal offsets keep insertion order.
    pub fn add_stop(&mut self, offset: f64, color: Rgba32) -> ContextResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(ContextError::InvalidValue(format!(
                "gradient stop offset {} is outside 0..=1",
                offset
            )));
        }
        let index = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(index, GradientStop { offset, color });
        Ok(())
    }

    pub fn reset_stops(&mut self) {
        self.stops.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_stay_sorted() {
        let mut g = Gradient::linear(0.0, 0.0, 10.0, 0.0);
        g.add_stop(1.0, Rgba32::WHITE).unwrap();
        g.add_stop(0.0, Rgba32::BLACK).unwrap();
        g.add_stop(0.5, Rgba32::TRANSPARENT).unwrap();
        let offsets: Vec<f64> = g.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_rejects_out_of_range_offset() {
        let mut g = Gradient::radial(5.0, 5.0, 5.0, 5.0, 5.0);
        assert!(g.add_stop(1.5, Rgba32::WHITE).is_err());
        assert!(g.add_stop(f64::NAN, Rgba32::WHITE).is_err());
        assert!(g.stops().is_empty());
    }
}
