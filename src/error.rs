use std::io;
use std::path::PathBuf;
use thiserror::Error;

fn hex_list(codepoints: &[u32]) -> String {
    codepoints
        .iter()
        .map(|cp| format!("{:04X}", cp))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Unknown file type for file {path:?}")]
    UnknownFileType { path: PathBuf },

    #[error("IO Error: {0}")]
    IO(#[from] io::Error),

    #[error("Error loading UFO: {0}")]
    UfoLoad(#[from] norad::error::FontLoadError),

    #[error("Error writing UFO: {0}")]
    UfoWrite(#[from] norad::error::FontWriteError),

    #[error("Error in UFO naming: {0}")]
    UfoName(#[from] norad::error::NamingError),

    #[error("Error converting lib data: {0}")]
    Lib(#[from] serde_json::Error),

    #[error("Error loading feature source: {0}")]
    SourceLoad(#[from] fea_rs_ast::fea_rs::parse::SourceLoadError),

    /// Malformed feature code, or a feature file referencing unknown glyphs
    #[error("Error parsing feature file {file}:\n{message}")]
    FeatureParse { file: String, message: String },

    /// A version string which is not `MAJOR.MINOR`
    #[error("Version string '{version}' is not of the form MAJOR.MINOR")]
    Format { version: String },

    #[error("Glyph {glyph} exists in both fonts")]
    DuplicateGlyph { glyph: String },

    #[error("Duplicate unicodes: {}", hex_list(.codepoints))]
    DuplicateUnicode { codepoints: Vec<u32> },

    #[error("Glyph {glyph} not found")]
    MissingGlyph { glyph: String },

    #[error("Glyph {glyph} has no outline to measure")]
    EmptyGlyph { glyph: String },

    #[error("Ill-constructed path")]
    BadPath,
}
