use crate::{
    features::{is_table, stylistic_set, FeatureFile, ToplevelItem},
    options::StylisticSetAdjustment,
    GlyphList, MergeError,
};
use fea_rs_ast::LanguageSystemStatement;
use indexmap::IndexSet;

/// The highest stylistic set the OpenType registry defines
const MAX_STYLISTIC_SET: u32 = 20;

/// Combine the feature code of two fonts
///
/// Language systems from both files come first, sorted by script. Blocks
/// for `dropped_features`, mark class definitions and tables are removed.
/// The secondary font's stylistic sets are renumbered to follow on from the
/// primary's.
pub fn merge_features(
    primary: FeatureFile,
    secondary: FeatureFile,
    dropped_features: &[String],
) -> FeatureFile {
    let mut languagesystems = IndexSet::new();
    let mut statements = vec![];
    let mut max_stylistic_set = 0;
    for (is_primary, file) in [(true, primary), (false, secondary)] {
        for item in file.statements {
            if is_table(&item) {
                log::debug!("Dropping table");
                continue;
            }
            match item {
                ToplevelItem::LanguageSystem(ls) => {
                    languagesystems.insert((ls.script, ls.language.trim_ascii_end().to_string()));
                }
                ToplevelItem::Feature(ref block)
                    if dropped_features.iter().any(|f| f == block.name.as_str()) =>
                {
                    log::debug!("Dropping feature {}", block.name);
                }
                ToplevelItem::MarkClassDefinition(_) => {
                    log::debug!("Dropping mark class definition");
                }
                ToplevelItem::Feature(mut block) => {
                    if let Some(index) = stylistic_set(&block) {
                        if is_primary {
                            max_stylistic_set = max_stylistic_set.max(index);
                        } else {
                            let renumbered = index + max_stylistic_set;
                            if renumbered > MAX_STYLISTIC_SET {
                                log::warn!(
                                    "Stylistic set {} renumbered beyond ss{}",
                                    block.name,
                                    MAX_STYLISTIC_SET
                                );
                            }
                            let name = format!("ss{:02}", renumbered);
                            log::debug!("Renaming {} to {}", block.name, name);
                            block.name = name.into();
                        }
                    }
                    statements.push(ToplevelItem::Feature(block));
                }
                other => statements.push(other),
            }
        }
    }

    // Stable, so ties keep their first-seen order
    languagesystems.sort_by(|a, b| a.0.cmp(&b.0));
    FeatureFile::new(
        languagesystems
            .into_iter()
            .map(|(script, language)| {
                ToplevelItem::LanguageSystem(LanguageSystemStatement::new(script, language))
            })
            .chain(statements)
            .collect(),
    )
}

/// Feature code moving the target glyph so that its top lines up with the
/// top of the reference glyph
pub fn stylistic_set_adjustment(
    glyphs: &GlyphList,
    adjustment: &StylisticSetAdjustment,
) -> Result<String, MergeError> {
    let top = |name: &str| -> Result<f64, MergeError> {
        let glyph = glyphs.get(name).ok_or_else(|| MergeError::MissingGlyph {
            glyph: name.to_string(),
        })?;
        glyph
            .bounds(glyphs)?
            .map(|bounds| bounds.max_y())
            .ok_or_else(|| MergeError::EmptyGlyph {
                glyph: name.to_string(),
            })
    };
    let delta = (top(&adjustment.reference)? - top(&adjustment.target)?).trunc() as i64;
    log::info!(
        "Moving {} by {} units in {}",
        adjustment.target,
        delta,
        adjustment.feature
    );
    Ok(format!(
        "\nfeature {tag} {{\n    pos {target} <0 {delta} 0 0>;\n}} {tag};\n",
        tag = adjustment.feature,
        target = adjustment.target,
        delta = delta,
    ))
}
