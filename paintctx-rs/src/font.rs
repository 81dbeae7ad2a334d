//! Font faces and sized fonts for text rendering.

use crate::error::{ContextError, ContextResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

/// A loaded font file (the first face it contains).
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Hash of the font bytes; equal for faces loaded from the same file.
    key: u64,
    data: Arc<Vec<u8>>,
    family: String,
    weight: fontdb::Weight,
    style: fontdb::Style,
    stretch: fontdb::Stretch,
}

impl FontFace {
    /// Load a face from a TTF/OTF file.
    pub fn from_file(path: impl AsRef<Path>) -> ContextResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!(target: "canvas", "loading font face {}", path.as_ref().display());
        Self::from_data(data)
    }

    /// Load a face from font file bytes.
    pub fn from_data(data: Vec<u8>) -> ContextResult<Self> {
        let data = Arc::new(data);
        let mut db = fontdb::Database::new();
        db.load_font_source(fontdb::Source::Binary(data.clone()));

        let info = db
            .faces()
            .next()
            .ok_or_else(|| ContextError::FontError("no font face found in data".to_string()))?;
        let family = info
            .families
            .first()
            .map(|(name, _lang)| name.clone())
            .ok_or_else(|| ContextError::FontError("font face has no family name".to_string()))?;

        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);

        Ok(Self {
            key: hasher.finish(),
            family,
            weight: info.weight,
            style: info.style,
            stretch: info.stretch,
            data,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn weight(&self) -> u16 {
        self.weight.0
    }

    pub fn is_italic(&self) -> bool {
        self.style != fontdb::Style::Normal
    }

    pub(crate) fn key(&self) -> u64 {
        self.key
    }

    pub(crate) fn data(&self) -> Arc<Vec<u8>> {
        self.data.clone()
    }

    pub(crate) fn attrs(&self) -> cosmic_text::Attrs<'_> {
        cosmic_text::Attrs::new()
            .family(cosmic_text::Family::Name(&self.family))
            .weight(self.weight)
            .style(self.style)
            .stretch(self.stretch)
    }
}

/// A font face at a given size in pixels.
#[derive(Debug, Clone)]
pub struct Font {
    face: FontFace,
    size: f32,
}

impl Font {
    pub fn new(face: &FontFace, size: f32) -> ContextResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ContextError::InvalidValue(format!(
                "font size must be positive, got {}",
                size
            )));
        }
        Ok(Self {
            face: face.clone(),
            size,
        })
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}
