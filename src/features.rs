//! Reading and writing feature code
//!
//! Parsing and glyph-reference validation are done by `fea-rs`; the parse
//! tree is then lifted into `fea-rs-ast`'s [`FeatureFile`], whose top-level
//! [`ToplevelItem`]s are what the merge works on.
use crate::MergeError;
use fea_rs_ast::{
    fea_rs::{
        self,
        parse::{FileSystemResolver, ParseTree, SourceResolver},
        GlyphMap,
    },
    AsFea as _, FeatureBlock,
};
pub use fea_rs_ast::{FeatureFile, ToplevelItem};
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

#[allow(clippy::unwrap_used)] // literal pattern
static STYLISTIC_SET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ss(\d\d)$").unwrap());

/// The index of a stylistic set feature (`ss01` to `ss99`)
pub fn stylistic_set(block: &FeatureBlock) -> Option<u32> {
    STYLISTIC_SET
        .captures(block.name.as_str())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether a top-level item is a `table` block
pub fn is_table(item: &ToplevelItem) -> bool {
    matches!(
        item,
        ToplevelItem::Base(_)
            | ToplevelItem::Gdef(_)
            | ToplevelItem::Head(_)
            | ToplevelItem::Hhea(_)
            | ToplevelItem::Name(_)
            | ToplevelItem::Os2(_)
            | ToplevelItem::Stat(_)
            | ToplevelItem::Vhea(_)
    )
}

/// Parse feature code, checking every glyph it mentions against
/// `glyph_names`
///
/// `file` names the code in diagnostics; `include` statements are resolved
/// relative to `include_dir`.
pub fn parse<'a>(
    text: &str,
    glyph_names: impl IntoIterator<Item = &'a str>,
    file: &str,
    include_dir: Option<&Path>,
) -> Result<FeatureFile, MergeError> {
    let glyph_map = GlyphMap::from_iter(glyph_names);
    let parse_tree = parse_tree(text, &glyph_map, file, include_dir)?;
    let diagnostics = fea_rs::compile::validate(
        &parse_tree,
        &glyph_map,
        Some(&fea_rs::compile::NopVariationInfo),
    );
    if diagnostics.has_errors() {
        return Err(MergeError::FeatureParse {
            file: file.to_string(),
            message: diagnostics.display().to_string(),
        });
    }
    if !diagnostics.is_empty() {
        log::warn!("Warnings while validating {}:", file);
        log::warn!("{}", diagnostics.display());
    }
    Ok(parse_tree.into())
}

/// Serialize feature code, one top-level item per line
pub fn to_fea(features: &FeatureFile) -> String {
    features
        .statements
        .iter()
        .map(|item| match item {
            // not written out by fea-rs-ast
            ToplevelItem::Feature(block) if block.use_extension => {
                block.as_fea("").replacen(" {", " useExtension {", 1)
            }
            _ => item.as_fea(""),
        })
        .map(|s| s + "\n")
        .collect()
}

fn parse_tree(
    text: &str,
    glyph_map: &GlyphMap,
    file: &str,
    include_dir: Option<&Path>,
) -> Result<ParseTree, MergeError> {
    let features_text: Arc<str> = Arc::from(text);
    let root = PathBuf::from(file);
    let resolver: Box<dyn SourceResolver> = Box::new(FileSystemResolver::new(
        include_dir.map(Path::to_path_buf).unwrap_or_default(),
    ));
    let (parse_tree, diagnostics) = fea_rs::parse::parse_root(
        file.into(),
        Some(glyph_map),
        Box::new(move |s: &Path| {
            if s == root {
                Ok(features_text.clone())
            } else {
                let path = resolver.resolve_raw_path(s.as_ref(), None);
                let canonical = resolver.canonicalize(&path)?;
                resolver.get_contents(&canonical)
            }
        }),
    )?;
    if diagnostics.has_errors() {
        return Err(MergeError::FeatureParse {
            file: file.to_string(),
            message: diagnostics.display().to_string(),
        });
    }
    Ok(parse_tree)
}

/// Re-parse merged feature code against the merged glyph set
///
/// Syntax errors are fatal. Validation problems are only logged, since
/// features which are dropped during a merge are regenerated downstream.
pub fn sanity_check<'a>(
    text: &str,
    glyph_names: impl IntoIterator<Item = &'a str>,
    file: &str,
) -> Result<(), MergeError> {
    let glyph_map = GlyphMap::from_iter(glyph_names);
    let parse_tree = parse_tree(text, &glyph_map, file, None)?;
    let diagnostics = fea_rs::compile::validate(
        &parse_tree,
        &glyph_map,
        Some(&fea_rs::compile::NopVariationInfo),
    );
    if !diagnostics.is_empty() {
        log::warn!("Problems found while validating merged feature code:");
        log::warn!("{}", diagnostics.display());
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const GLYPHS: [&str; 4] = ["a", "b", "a.alt", "acutecomb"];

    fn fea(text: &str) -> Result<FeatureFile, MergeError> {
        parse(text, GLYPHS, "test.fea", None)
    }

    #[test]
    fn test_statement_kinds() -> Result<(), MergeError> {
        let features = fea("languagesystem DFLT dflt;
languagesystem latn dflt;
# a comment
@letters = [a b];
markClass [acutecomb] <anchor 0 500> @TOP;
feature ss02 useExtension {
    sub a by a.alt;
} ss02;
table GDEF {
    GlyphClassDef [a b], , [acutecomb], ;
} GDEF;
table OS/2 {
    FSType 0;
} OS/2;
")?;
        let items = &features.statements;
        assert_eq!(items.len(), 8);
        assert!(matches!(
            items.first(),
            Some(ToplevelItem::LanguageSystem(ls)) if ls.script == "DFLT" && ls.language == "dflt"
        ));
        assert!(matches!(items.get(2), Some(ToplevelItem::Comment(c)) if c.text == "# a comment"));
        assert!(matches!(items.get(3), Some(ToplevelItem::GlyphClassDefinition(_))));
        assert!(matches!(items.get(4), Some(ToplevelItem::MarkClassDefinition(_))));
        assert!(matches!(
            items.get(5),
            Some(ToplevelItem::Feature(block)) if block.name == "ss02" && block.use_extension
        ));
        assert!(matches!(items.get(6), Some(ToplevelItem::Gdef(_))));
        assert!(matches!(items.get(7), Some(ToplevelItem::Os2(_))));
        assert_eq!(items.iter().filter(|item| is_table(item)).count(), 2);
        Ok(())
    }

    #[test]
    fn test_to_fea() -> Result<(), MergeError> {
        let text = "languagesystem DFLT dflt;
feature liga useExtension {
    sub a b by a.alt;
} liga;
";
        let features = fea(text)?;
        assert_eq!(squash(&to_fea(&features)), squash(text));
        let reparsed = fea(&to_fea(&features))?;
        assert!(matches!(
            reparsed.statements.get(1),
            Some(ToplevelItem::Feature(block)) if block.use_extension
        ));
        Ok(())
    }

    #[rstest]
    #[case("ss01", Some(1))]
    #[case("ss20", Some(20))]
    #[case("ssty", None)]
    #[case("ss1", None)]
    #[case("liga", None)]
    fn test_stylistic_set_index(#[case] tag: &str, #[case] expected: Option<u32>) {
        let block = FeatureBlock::new(tag.into(), vec![], false, 0..0);
        assert_eq!(stylistic_set(&block), expected);
    }

    #[test]
    fn test_unknown_glyph_is_an_error() {
        let result = fea("feature liga {\n    sub a b by missing;\n} liga;\n");
        assert!(matches!(
            result,
            Err(MergeError::FeatureParse { file, .. }) if file == "test.fea"
        ));
    }

    #[test]
    fn test_syntax_error() {
        let result = fea("feature liga {\n    sub a b by\n");
        assert!(matches!(result, Err(MergeError::FeatureParse { .. })));
    }

    #[test]
    fn test_sanity_check() {
        // Unknown glyphs only warn
        assert!(sanity_check(
            "feature liga {\n    sub a b by missing;\n} liga;\n",
            GLYPHS,
            "merged.fea"
        )
        .is_ok());
        assert!(matches!(
            sanity_check("feature liga {\n    sub a b by\n", GLYPHS, "merged.fea"),
            Err(MergeError::FeatureParse { file, .. }) if file == "merged.fea"
        ));
    }
}
