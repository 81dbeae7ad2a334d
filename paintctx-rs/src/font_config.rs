//! Font database configuration for text rendering.

use std::path::PathBuf;
use std::sync::Arc;

/// Font configuration used when a context first renders text.
///
/// Text is always drawn with an explicit [`FontFace`](crate::FontFace); the
/// database built from this configuration only supplies fallback faces for
/// characters the requested face does not cover.
#[derive(Clone, Debug, Default)]
pub struct FontConfig {
    /// Whether to load system fonts (default: false).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Raw font file data to register. Arc-wrapped for cheap cloning.
    pub custom_fonts: Vec<Arc<Vec<u8>>>,
    /// Whether font hinting is applied to glyph outlines (default: false).
    pub hinting_enabled: bool,
}

impl FontConfig {
    /// Configuration that also loads the system fonts.
    pub fn with_system_fonts() -> Self {
        Self {
            load_system_fonts: true,
            ..Self::default()
        }
    }

    /// Build a [`fontdb::Database`] from this configuration.
    pub fn to_fontdb(&self) -> fontdb::Database {
        let mut db = fontdb::Database::new();

        if self.load_system_fonts {
            db.load_system_fonts();
        }

        for dir in &self.font_dirs {
            db.load_fonts_dir(dir);
        }

        for data in &self.custom_fonts {
            db.load_font_data(Vec::from(data.as_slice()));
        }

        log::debug!(target: "canvas", "font database has {} faces", db.len());
        db
    }
}
