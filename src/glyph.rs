use crate::{
    common::Lib,
    shape::{Component, Path, Shape},
    Anchor, MergeError,
};
use kurbo::Shape as _;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default)]
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    pub fn get(&self, g: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == g)
    }
    pub fn get_mut(&mut self, g: &str) -> Option<&mut Glyph> {
        self.0.iter_mut().find(|glyph| glyph.name == g)
    }

    pub fn contains(&self, g: &str) -> bool {
        self.get(g).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|g| g.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Glyph> for GlyphList {
    fn from_iter<T: IntoIterator<Item = Glyph>>(iter: T) -> Self {
        GlyphList(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Glyph {
    pub name: String,
    pub codepoints: Vec<u32>,
    pub width: f64,
    /// Components and contours, in source order
    pub shapes: Vec<Shape>,
    pub anchors: Vec<Anchor>,
    pub lib: Lib,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Self {
        Glyph {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The primary codepoint of the glyph, if it is encoded
    pub fn unicode(&self) -> Option<u32> {
        self.codepoints.first().copied()
    }

    pub fn components(&self) -> impl DoubleEndedIterator<Item = &Component> {
        self.shapes.iter().filter_map(|x| match x {
            Shape::Component(c) => Some(c),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl DoubleEndedIterator<Item = &Path> {
        self.shapes.iter().filter_map(|x| match x {
            Shape::Path(p) => Some(p),
            _ => None,
        })
    }

    /// Number of points in the glyph's own contours
    pub fn point_count(&self) -> usize {
        self.paths().map(|p| p.nodes.len()).sum()
    }

    /// The contours of a single component, flattened through every level of
    /// nesting and moved through the accumulated transforms
    pub fn decompose_component(
        component: &Component,
        glyphs: &GlyphList,
    ) -> Result<Vec<Path>, MergeError> {
        let mut contours = Vec::new();
        let mut stack: Vec<(&Component, kurbo::Affine)> = vec![(component, component.transform)];
        while let Some((component, transform)) = stack.pop() {
            let referenced_glyph =
                glyphs
                    .get(&component.reference)
                    .ok_or_else(|| MergeError::MissingGlyph {
                        glyph: component.reference.to_string(),
                    })?;
            contours.extend(referenced_glyph.paths().map(|p| p.transformed(transform)));

            // Depth-first decomposition means we need to extend the stack reversed, so
            // the first component is taken out next.
            for new_component in referenced_glyph.components().rev() {
                stack.push((new_component, transform * new_component.transform));
            }
        }
        Ok(contours)
    }

    /// Every contour the glyph draws, with components decomposed
    pub fn decomposed_paths(&self, glyphs: &GlyphList) -> Result<Vec<Path>, MergeError> {
        let mut contours = Vec::new();
        for shape in &self.shapes {
            match shape {
                Shape::Path(p) => contours.push(p.clone()),
                Shape::Component(c) => contours.extend(Self::decompose_component(c, glyphs)?),
            }
        }
        Ok(contours)
    }

    /// The control-point-exact bounding box of the glyph's decomposed
    /// outline, or `None` if it draws nothing
    pub fn bounds(&self, glyphs: &GlyphList) -> Result<Option<kurbo::Rect>, MergeError> {
        let paths = self
            .decomposed_paths(glyphs)?
            .iter()
            .filter(|p| !p.nodes.is_empty())
            .map(|p| p.to_kurbo())
            .collect::<Result<Vec<kurbo::BezPath>, MergeError>>()?;
        Ok(paths
            .iter()
            .map(|p| p.bounding_box())
            .reduce(|accum, item| accum.union(item)))
    }
}
