use crate::{options::MarkPlaceholder, Anchor, Glyph};
use icu_properties::{props::GeneralCategory, CodePointMapData};

/// Whether a codepoint is a spacing modifier (general category Sk or Lm)
pub fn is_spacing_modifier(codepoint: u32) -> bool {
    matches!(
        CodePointMapData::<GeneralCategory>::new().get32(codepoint),
        GeneralCategory::ModifierSymbol | GeneralCategory::ModifierLetter
    )
}

/// Fixes up the anchors of glyphs moving from the secondary font into the
/// primary one
#[derive(Debug, Clone, Default)]
pub struct AnchorAdjuster<'a> {
    placeholder: Option<&'a MarkPlaceholder>,
}

impl<'a> AnchorAdjuster<'a> {
    pub fn new(placeholder: Option<&'a MarkPlaceholder>) -> Self {
        AnchorAdjuster { placeholder }
    }

    pub fn adjust(&self, glyph: &mut Glyph) {
        let Some(unicode) = glyph.unicode() else {
            return;
        };
        // An anchored spacing modifier would be classed as a mark and lose
        // its advance width when shaped
        if is_spacing_modifier(unicode) && !glyph.anchors.is_empty() {
            log::debug!("Removing anchors from spacing modifier {}", glyph.name);
            glyph.anchors.clear();
        }
        if let Some(placeholder) = self.placeholder.filter(|p| p.codepoint == unicode) {
            let mut synthesized = vec![];
            for anchor in &glyph.anchors {
                for rule in placeholder.rules.iter().filter(|r| r.anchor == anchor.name) {
                    for name in &rule.synthesized {
                        synthesized.push(Anchor::new(name, anchor.x, anchor.y + rule.offset));
                    }
                }
            }
            log::debug!(
                "Adding {} anchors to mark placeholder {}",
                synthesized.len(),
                glyph.name
            );
            glyph.anchors.extend(synthesized);
        }
    }
}
