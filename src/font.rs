use crate::{common::Lib, glyph::GlyphList, MergeError};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Kerning pairs, keyed by (left, right) glyph or group name
pub type Kerning = IndexMap<(String, String), i32>;
/// Glyph groups, keyed by group name
pub type Groups = IndexMap<String, Vec<String>>;

/// Scalar font metadata
///
/// Only the fields the merge reads or writes are typed here; the UFO
/// convertor carries the rest of the source fontinfo through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    pub family_name: Option<String>,
    pub style_name: Option<String>,
    pub version_major: Option<i32>,
    pub version_minor: Option<u32>,
    pub copyright: Option<String>,
    pub ascender: Option<f64>,
    pub descender: Option<f64>,
    pub x_height: Option<f64>,
    pub cap_height: Option<f64>,
    pub(crate) stash: Lib,
}

#[derive(Debug, Clone, Default)]
pub struct Font {
    /// Glyphs, in glyph order
    pub glyphs: GlyphList,
    pub kerning: Kerning,
    pub groups: Groups,
    pub info: Info,
    /// Glyph name to production (PostScript) name
    pub production_names: IndexMap<String, String>,
    /// Any other font-level auxiliary data
    pub lib: Lib,
    /// Raw feature code
    pub features: String,
    /// Where the font was loaded from
    pub source: Option<PathBuf>,
}

impl Font {
    pub fn new() -> Self {
        Font::default()
    }

    /// The glyph order, as a list of names
    pub fn glyph_order(&self) -> Vec<String> {
        self.glyphs.names().map(|n| n.to_string()).collect()
    }

    /// Path to the feature file, used to label diagnostics
    pub fn features_path(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.join("features.fea").display().to_string())
            .unwrap_or_else(|| "features.fea".to_string())
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), MergeError> {
        let path = path.into();
        match path.extension() {
            Some(ext) if ext == "ufo" => crate::convertors::ufo::save(self, path),
            _ => Err(MergeError::UnknownFileType { path }),
        }
    }
}
