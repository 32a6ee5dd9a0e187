//! Combining two fonts into one
pub mod anchors;
pub mod features;

use crate::{
    features::{self as fea, sanity_check},
    merge::{
        anchors::AnchorAdjuster,
        features::{merge_features, stylistic_set_adjustment},
    },
    Font, MergeError, MergeOptions,
};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Builds a merged font from a primary and a secondary font
///
/// Neither input is modified; the result starts life as a copy of the
/// primary font and has the secondary font's glyphs, kerning, groups and
/// feature code added to it.
pub struct FontMerger<'a> {
    primary: &'a Font,
    secondary: &'a Font,
    options: &'a MergeOptions,
}

impl<'a> FontMerger<'a> {
    pub fn new(primary: &'a Font, secondary: &'a Font, options: &'a MergeOptions) -> Self {
        FontMerger {
            primary,
            secondary,
            options,
        }
    }

    pub fn merge(&self) -> Result<Font, MergeError> {
        log::info!(
            "Merging {} glyphs into {} glyphs",
            self.secondary.glyphs.len(),
            self.primary.glyphs.len()
        );
        let mut merged = self.primary.clone();
        let original_order: Vec<String> = self
            .primary
            .glyphs
            .names()
            .chain(self.secondary.glyphs.names())
            .map(|n| n.to_string())
            .collect();

        self.merge_glyphs(&mut merged)?;
        self.merge_tables(&mut merged);
        self.fix_widths(&mut merged)?;
        check_unique_codepoints(&merged)?;
        sort_glyphs(&mut merged, &original_order);
        merged.features = self.merge_features(&merged)?;
        Ok(merged)
    }

    fn merge_glyphs(&self, merged: &mut Font) -> Result<(), MergeError> {
        let adjuster = AnchorAdjuster::new(self.options.mark_placeholder.as_ref());
        for glyph in self.secondary.glyphs.iter() {
            if merged.glyphs.contains(&glyph.name) {
                return Err(MergeError::DuplicateGlyph {
                    glyph: glyph.name.clone(),
                });
            }
            let mut glyph = glyph.clone();
            adjuster.adjust(&mut glyph);
            merged.glyphs.push(glyph);
        }
        Ok(())
    }

    fn merge_tables(&self, merged: &mut Font) {
        log::info!("Merging kerning, groups and production names");
        merged.kerning.extend(
            self.secondary
                .kerning
                .iter()
                .map(|(pair, value)| (pair.clone(), *value)),
        );
        merged.groups.extend(
            self.secondary
                .groups
                .iter()
                .map(|(name, members)| (name.clone(), members.clone())),
        );
        merged.production_names.extend(
            self.secondary
                .production_names
                .iter()
                .map(|(glyph, name)| (glyph.clone(), name.clone())),
        );
        if let Some(x_height) = self.secondary.info.x_height {
            merged.info.x_height = Some(x_height);
        }
        if let Some(cap_height) = self.secondary.info.cap_height {
            merged.info.cap_height = Some(cap_height);
        }
    }

    fn fix_widths(&self, merged: &mut Font) -> Result<(), MergeError> {
        let Some(fix) = &self.options.width_fix else {
            return Ok(());
        };
        let width = merged
            .glyphs
            .get(&fix.source)
            .ok_or_else(|| MergeError::MissingGlyph {
                glyph: fix.source.clone(),
            })?
            .width;
        let glyph = merged
            .glyphs
            .get_mut(&fix.glyph)
            .ok_or_else(|| MergeError::MissingGlyph {
                glyph: fix.glyph.clone(),
            })?;
        log::debug!("Setting width of {} to {}", glyph.name, width);
        glyph.width = width;
        Ok(())
    }

    fn merge_features(&self, merged: &Font) -> Result<String, MergeError> {
        log::info!("Merging feature code");
        let parse = |font: &Font| {
            fea::parse(
                &font.features,
                font.glyphs.names(),
                &font.features_path(),
                font.source.as_deref(),
            )
        };
        let primary = parse(self.primary)?;
        let secondary = parse(self.secondary)?;
        let mut text = fea::to_fea(&merge_features(
            primary,
            secondary,
            &self.options.dropped_features,
        ));
        // Measured before the secondary font's glyphs arrive
        if let Some(adjustment) = &self.options.stylistic_set {
            text.push_str(&stylistic_set_adjustment(&self.primary.glyphs, adjustment)?);
        }
        sanity_check(&text, merged.glyphs.names(), &merged.features_path())?;
        Ok(text)
    }
}

/// Fail if any codepoint is mapped more than once across the font
pub fn check_unique_codepoints(font: &Font) -> Result<(), MergeError> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for codepoint in font.glyphs.iter().flat_map(|g| g.codepoints.iter()) {
        *counts.entry(*codepoint).or_default() += 1;
    }
    let mut duplicates: Vec<u32> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(codepoint, _)| codepoint)
        .collect();
    if duplicates.is_empty() {
        return Ok(());
    }
    duplicates.sort_unstable();
    Err(MergeError::DuplicateUnicode {
        codepoints: duplicates,
    })
}

/// Put glyphs back into the order they had in their source fonts
fn sort_glyphs(font: &mut Font, original_order: &[String]) {
    let position: IndexMap<&str, usize> = original_order
        .iter()
        .enumerate()
        .map(|(ix, name)| (name.as_str(), ix))
        .collect();
    font.glyphs
        .sort_by_key(|g| position.get(g.name.as_str()).copied().unwrap_or(usize::MAX));
}
