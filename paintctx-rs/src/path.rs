//! Reusable path objects for fill, stroke and text outline operations.

use crate::error::{ContextError, ContextResult};
use crate::geometry::{Point, Rect};
use tiny_skia::PathBuilder;

/// A reusable vector path.
#[derive(Debug, Clone)]
pub struct Path {
    /// The underlying path builder for constructing the path.
    builder: PathBuilder,
    /// Cleared once any non-finite coordinate is added.
    finite: bool,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
            finite: true,
        }
    }

    /// Create a Path from SVG path data string.
    ///
    /// Supports all SVG path commands (M, L, H, V, Q, T, C, S, A, Z).
    /// Arc commands are converted to cubic Bezier curves.
    ///
    /// # Example
    /// ```
    /// use paintctx_rs::Path;
    ///
    /// let path = Path::from_svg_path_data("M10,10 L50,50 A10,10 0 0 1 100,100 Z").unwrap();
    /// assert!(!path.is_empty());
    /// ```
    pub fn from_svg_path_data(path_data: &str) -> ContextResult<Self> {
        let mut path = Path::new();

        for segment in svgtypes::SimplifyingPathParser::from(path_data) {
            let segment = segment
                .map_err(|e| ContextError::PathError(format!("Invalid SVG path data: {:?}", e)))?;

            match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => path.move_to(x, y),
                svgtypes::SimplePathSegment::LineTo { x, y } => path.line_to(x, y),
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    path.quad_to(x1, y1, x, y)
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => path.cubic_to(x1, y1, x2, y2, x, y),
                svgtypes::SimplePathSegment::ClosePath => path.close(),
            }
        }

        Ok(path)
    }

    fn track(&mut self, values: &[f64]) {
        self.finite &= values.iter().all(|v| v.is_finite());
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.track(&[x, y]);
        self.builder.move_to(x as f32, y as f32);
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.track(&[x, y]);
        self.builder.line_to(x as f32, y as f32);
    }

    /// Add a quadratic curve.
    pub fn quad_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.track(&[x1, y1, x2, y2]);
        self.builder
            .quad_to(x1 as f32, y1 as f32, x2 as f32, y2 as f32);
    }

    /// Add a cubic curve.
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.track(&[x1, y1, x2, y2, x3, y3]);
        self.builder.cubic_to(
            x1 as f32, y1 as f32, x2 as f32, y2 as f32, x3 as f32, y3 as f32,
        );
    }

    /// Close the current subpath.
    pub fn close(&mut self) {
        self.builder.close();
    }

    /// Add a closed rectangle. Empty rectangles add nothing.
    pub fn add_rect(&mut self, rect: Rect) {
        self.track(&[rect.x, rect.y, rect.w, rect.h]);
        if let Some(r) = rect.to_skia() {
            self.builder.push_rect(r);
        }
    }

    /// Add a closed circle. Non-positive radii add nothing.
    pub fn add_circle(&mut self, center: Point, r: f64) {
        self.track(&[center.x, center.y, r]);
        if r > 0.0 {
            self.builder
                .push_circle(center.x as f32, center.y as f32, r as f32);
        }
    }

    /// Add a closed ellipse. Non-positive radii add nothing.
    pub fn add_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        self.track(&[center.x, center.y, rx, ry]);
        let bounds = Rect::new(center.x - rx, center.y - ry, rx * 2.0, ry * 2.0);
        if let Some(r) = bounds.to_skia() {
            self.builder.push_oval(r);
        }
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.finite
    }

    /// Reject paths with non-finite coordinates.
    pub(crate) fn ensure_finite(&self) -> ContextResult<()> {
        if self.finite {
            Ok(())
        } else {
            Err(ContextError::InvalidGeometry(
                "path has non-finite coordinates".to_string(),
            ))
        }
    }

    /// Get the finished path for rendering.
    /// Returns None if the path is empty or degenerate.
    pub(crate) fn to_skia(&self) -> Option<tiny_skia::Path> {
        // Clone the builder to finish it without consuming it
        self.builder.clone().finish()
    }
}
