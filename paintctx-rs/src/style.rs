//! Style types and enums for drawing operations.

use crate::color::Rgba32;
use crate::gradient::Gradient;
use crate::pattern::Pattern;

/// Paint source for fill and stroke operations.
#[derive(Debug, Clone)]
pub enum Style {
    /// Solid color.
    Color(Rgba32),
    /// Linear or radial gradient.
    Gradient(Gradient),
    /// Image pattern.
    Pattern(Pattern),
}

impl Default for Style {
    fn default() -> Self {
        Style::Color(Rgba32::BLACK)
    }
}

impl From<Rgba32> for Style {
    fn from(color: Rgba32) -> Self {
        Style::Color(color)
    }
}

impl From<Gradient> for Style {
    fn from(gradient: Gradient) -> Self {
        Style::Gradient(gradient)
    }
}

impl From<Pattern> for Style {
    fn from(pattern: Pattern) -> Self {
        Style::Pattern(pattern)
    }
}

/// Composition operator used when painting onto the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompOp {
    #[default]
    SrcOver,
    SrcCopy,
    SrcIn,
    SrcOut,
    SrcAtop,
    DstOver,
    DstCopy,
    DstIn,
    DstOut,
    DstAtop,
    Xor,
    Clear,
    Plus,
    Modulate,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

impl From<CompOp> for tiny_skia::BlendMode {
    fn from(op: CompOp) -> Self {
        use tiny_skia::BlendMode;
        match op {
            CompOp::SrcOver => BlendMode::SourceOver,
            CompOp::SrcCopy => BlendMode::Source,
            CompOp::SrcIn => BlendMode::SourceIn,
            CompOp::SrcOut => BlendMode::SourceOut,
            CompOp::SrcAtop => BlendMode::SourceAtop,
            CompOp::DstOver => BlendMode::DestinationOver,
            CompOp::DstCopy => BlendMode::Destination,
            CompOp::DstIn => BlendMode::DestinationIn,
            CompOp::DstOut => BlendMode::DestinationOut,
            CompOp::DstAtop => BlendMode::DestinationAtop,
            CompOp::Xor => BlendMode::Xor,
            CompOp::Clear => BlendMode::Clear,
            CompOp::Plus => BlendMode::Plus,
            CompOp::Modulate => BlendMode::Modulate,
            CompOp::Multiply => BlendMode::Multiply,
            CompOp::Screen => BlendMode::Screen,
            CompOp::Overlay => BlendMode::Overlay,
            CompOp::Darken => BlendMode::Darken,
            CompOp::Lighten => BlendMode::Lighten,
            CompOp::ColorDodge => BlendMode::ColorDodge,
            CompOp::ColorBurn => BlendMode::ColorBurn,
            CompOp::HardLight => BlendMode::HardLight,
            CompOp::SoftLight => BlendMode::SoftLight,
            CompOp::Difference => BlendMode::Difference,
            CompOp::Exclusion => BlendMode::Exclusion,
        }
    }
}

/// Fill rule for path operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Non-zero winding rule (default).
    #[default]
    NonZero,
    /// Even-odd rule.
    EvenOdd,
}

impl From<FillRule> for tiny_skia::FillRule {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }
}

/// Cap drawn at the start or end of an open stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeCap {
    #[default]
    Butt,
    Square,
    Round,
    RoundRev,
    Triangle,
    TriangleRev,
}

impl From<StrokeCap> for tiny_skia::LineCap {
    fn from(cap: StrokeCap) -> Self {
        match cap {
            StrokeCap::Butt => tiny_skia::LineCap::Butt,
            StrokeCap::Round | StrokeCap::RoundRev => tiny_skia::LineCap::Round,
            // Triangle caps fall back to the closest cap the rasterizer has
            StrokeCap::Square | StrokeCap::Triangle | StrokeCap::TriangleRev => {
                tiny_skia::LineCap::Square
            }
        }
    }
}

/// Which end of a stroke a cap applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeCapPosition {
    Start,
    End,
}

/// Join drawn where two stroke segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeJoin {
    #[default]
    MiterClip,
    MiterBevel,
    MiterRound,
    Bevel,
    Round,
}

impl From<StrokeJoin> for tiny_skia::LineJoin {
    fn from(join: StrokeJoin) -> Self {
        match join {
            StrokeJoin::MiterClip => tiny_skia::LineJoin::MiterClip,
            StrokeJoin::MiterBevel | StrokeJoin::MiterRound => tiny_skia::LineJoin::Miter,
            StrokeJoin::Bevel => tiny_skia::LineJoin::Bevel,
            StrokeJoin::Round => tiny_skia::LineJoin::Round,
        }
    }
}

/// How gradients and patterns extend outside their defined area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtendMode {
    #[default]
    Pad,
    Repeat,
    Reflect,
}

impl From<ExtendMode> for tiny_skia::SpreadMode {
    fn from(mode: ExtendMode) -> Self {
        match mode {
            ExtendMode::Pad => tiny_skia::SpreadMode::Pad,
            ExtendMode::Repeat => tiny_skia::SpreadMode::Repeat,
            ExtendMode::Reflect => tiny_skia::SpreadMode::Reflect,
        }
    }
}
