//! Knobs for a merge
//!
//! The defaults reproduce the Mada build: an Arabic primary font and a
//! Source Sans-derived Latin secondary.

/// Vertical repositioning of one glyph, switched on by a stylistic set
#[derive(Debug, Clone, PartialEq)]
pub struct StylisticSetAdjustment {
    /// Tag of the synthesized feature
    pub feature: String,
    /// Glyph whose top edge the target should line up with
    pub reference: String,
    /// Glyph which is moved
    pub target: String,
}

impl Default for StylisticSetAdjustment {
    fn default() -> Self {
        StylisticSetAdjustment {
            feature: "ss01".to_string(),
            reference: "kashida-ar".to_string(),
            target: "alefMaksura-ar.fina".to_string(),
        }
    }
}

/// For every anchor called `anchor`, add anchors called `synthesized` at
/// the same position moved up by `offset`
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRule {
    pub anchor: String,
    pub synthesized: Vec<String>,
    pub offset: f64,
}

/// The combining-mark placeholder glyph and the anchors to add to it
#[derive(Debug, Clone, PartialEq)]
pub struct MarkPlaceholder {
    pub codepoint: u32,
    pub rules: Vec<AnchorRule>,
}

impl Default for MarkPlaceholder {
    fn default() -> Self {
        MarkPlaceholder {
            codepoint: 0x25CC,
            rules: vec![
                AnchorRule {
                    anchor: "aboveLC".to_string(),
                    synthesized: vec!["markAbove".to_string(), "hamzaAbove".to_string()],
                    offset: 100.0,
                },
                AnchorRule {
                    anchor: "belowLC".to_string(),
                    synthesized: vec!["markBelow".to_string(), "hamzaBelow".to_string()],
                    offset: -100.0,
                },
            ],
        }
    }
}

/// Give `glyph` the advance width of `source`
#[derive(Debug, Clone, PartialEq)]
pub struct WidthFix {
    pub glyph: String,
    pub source: String,
}

impl Default for WidthFix {
    fn default() -> Self {
        WidthFix {
            glyph: "nbspace".to_string(),
            source: "space".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOptions {
    /// Features which are regenerated downstream and so never merged
    pub dropped_features: Vec<String>,
    pub stylistic_set: Option<StylisticSetAdjustment>,
    pub mark_placeholder: Option<MarkPlaceholder>,
    pub width_fix: Option<WidthFix>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            dropped_features: ["aalt", "kern", "mark", "mkmk"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            stylistic_set: Some(StylisticSetAdjustment::default()),
            mark_placeholder: Some(MarkPlaceholder::default()),
            width_fix: Some(WidthFix::default()),
        }
    }
}

/// The parts of the copyright string which do not change between builds
#[derive(Debug, Clone, PartialEq)]
pub struct CopyrightNotice {
    pub first_year: i32,
    pub holder: String,
    pub reserved_name: String,
}

impl Default for CopyrightNotice {
    fn default() -> Self {
        CopyrightNotice {
            first_year: 2015,
            holder: "The Mada Project Authors".to_string(),
            reserved_name: "Source".to_string(),
        }
    }
}

/// Everything a full build needs besides the two fonts
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareOptions {
    /// `MAJOR.MINOR`
    pub version: String,
    /// Year for the copyright string; the current year if unset
    pub year: Option<i32>,
    pub merge: MergeOptions,
    pub copyright: CopyrightNotice,
}

impl PrepareOptions {
    pub fn new(version: impl Into<String>) -> Self {
        PrepareOptions {
            version: version.into(),
            year: None,
            merge: MergeOptions::default(),
            copyright: CopyrightNotice::default(),
        }
    }
}
