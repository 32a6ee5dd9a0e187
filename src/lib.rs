#![deny(clippy::unwrap_used, clippy::expect_used)]
//! Merge a Latin font into an Arabic one
//!
//! The secondary font's glyphs, kerning, groups and feature code are folded
//! into the primary font, the merged font's version and copyright are set,
//! and any mirrored components are decomposed so that the result compiles
//! cleanly.

mod anchor;
mod common;
pub mod convertors;
mod error;
pub mod features;
pub mod filters;
mod font;
mod glyph;
pub mod info;
pub mod merge;
mod options;
mod prepare;
mod shape;

pub use crate::{
    anchor::Anchor,
    common::{Lib, Node, NodeType},
    error::MergeError,
    font::{Font, Groups, Info, Kerning},
    glyph::{Glyph, GlyphList},
    merge::FontMerger,
    options::{
        AnchorRule, CopyrightNotice, MarkPlaceholder, MergeOptions, PrepareOptions,
        StylisticSetAdjustment, WidthFix,
    },
    prepare::prepare,
    shape::{Component, Path, Shape},
};
use std::path::PathBuf;

pub fn load(filename: impl Into<PathBuf>) -> Result<Font, MergeError> {
    let pb = filename.into();
    let mut font = match pb.extension() {
        Some(ext) if ext == "ufo" => crate::convertors::ufo::load(&pb)?,
        _ => return Err(MergeError::UnknownFileType { path: pb }),
    };
    font.source = Some(pb);
    Ok(font)
}
