//! Packed 32-bit colors.

use crate::error::{ContextError, ContextResult};

/// A non-premultiplied color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba32(pub u32);

/// One component of a color tuple as received from a host environment.
///
/// Integer components are in `0..=255`; float components are in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorComponent {
    Int(i64),
    Float(f64),
}

impl Rgba32 {
    pub const TRANSPARENT: Rgba32 = Rgba32(0x0000_0000);
    pub const BLACK: Rgba32 = Rgba32(0xFF00_0000);
    pub const WHITE: Rgba32 = Rgba32(0xFFFF_FFFF);

    /// Pack 8-bit components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Pack floating-point components (each clamped to 0.0..=1.0).
    pub fn from_rgba_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    /// Pack a 3- or 4-component color tuple. A missing alpha is opaque.
    pub fn from_components(components: &[ColorComponent]) -> ContextResult<Self> {
        if components.len() != 3 && components.len() != 4 {
            return Err(ContextError::InvalidValue(format!(
                "color must have 3 or 4 components, got {}",
                components.len()
            )));
        }

        let mut channels = [255u8; 4];
        for (channel, component) in channels.iter_mut().zip(components) {
            *channel = match *component {
                ColorComponent::Int(v) => u8::try_from(v).map_err(|_| {
                    ContextError::InvalidValue(format!(
                        "integer color component {} is outside 0..=255",
                        v
                    ))
                })?,
                ColorComponent::Float(v) if v.is_nan() => {
                    return Err(ContextError::InvalidValue(
                        "color component is NaN".to_string(),
                    ))
                }
                ColorComponent::Float(v) => unit_to_u8(v),
            };
        }

        let [r, g, b, a] = channels;
        Ok(Self::new(r, g, b, a))
    }

    /// Parse a CSS color string such as `#ff8000` or `rgba(0, 0, 255, 0.5)`.
    pub fn parse_css(s: &str) -> ContextResult<Self> {
        let parsed = csscolorparser::parse(s)
            .map_err(|e| ContextError::ColorParseError(format!("{}: {}", s, e)))?;

        let [r, g, b, a] = parsed.to_array();
        Ok(Self::from_rgba_f64(r as f64, g as f64, b as f64, a as f64))
    }

    /// The packed `0xAARRGGBB` value.
    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl Default for Rgba32 {
    fn default() -> Self {
        Rgba32::BLACK
    }
}

impl From<u32> for Rgba32 {
    fn from(value: u32) -> Self {
        Rgba32(value)
    }
}

impl From<Rgba32> for tiny_skia::Color {
    fn from(c: Rgba32) -> Self {
        tiny_skia::Color::from_rgba8(c.r(), c.g(), c.b(), c.a())
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use super::ColorComponent::{Float, Int};

    #[test]
    fn test_channel_accessors() {
        let c = Rgba32::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.value(), 0x7812_3456);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x12, 0x34, 0x56, 0x78));
    }

    #[rstest]
    #[case(&[Int(0), Int(0), Int(0), Int(0)], 0x0000_0000)]
    #[case(&[Int(255), Int(255), Int(255), Int(255)], 0xFFFF_FFFF)]
    #[case(&[Float(0.0), Float(0.0), Float(0.0), Float(0.0)], 0x0000_0000)]
    #[case(&[Float(1.0), Float(1.0), Float(1.0), Float(1.0)], 0xFFFF_FFFF)]
    #[case(&[Int(255), Int(0), Int(0)], 0xFFFF_0000)]
    #[case(&[Float(0.0), Float(0.0), Float(1.0)], 0xFF00_00FF)]
    #[case(&[Float(0.5), Int(128), Float(2.0), Float(-1.0)], 0x0080_80FF)]
    fn test_pack_components(#[case] components: &[ColorComponent], #[case] expected: u32) {
        assert_eq!(Rgba32::from_components(components).unwrap().value(), expected);
    }

    #[rstest]
    #[case(&[Int(1), Int(2)])]
    #[case(&[Int(1), Int(2), Int(3), Int(4), Int(5)])]
    #[case(&[Int(256), Int(0), Int(0)])]
    #[case(&[Int(-1), Int(0), Int(0)])]
    #[case(&[Float(f64::NAN), Int(0), Int(0)])]
    fn test_pack_components_rejects(#[case] components: &[ColorComponent]) {
        assert!(matches!(
            Rgba32::from_components(components),
            Err(ContextError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_parse_css() {
        assert_eq!(Rgba32::parse_css("#ff8000").unwrap(), Rgba32::new(255, 128, 0, 255));
        assert_eq!(Rgba32::parse_css("transparent").unwrap().a(), 0);
        assert!(matches!(
            Rgba32::parse_css("not-a-color"),
            Err(ContextError::ColorParseError(_))
        ));
    }
}
