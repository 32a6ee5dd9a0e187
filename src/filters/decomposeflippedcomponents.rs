use crate::{filters::FontFilter, Glyph, Shape};

/// Replaces mirrored components with the outlines they draw
///
/// Any component whose transform has a negative determinant is decomposed
/// into contours in the containing glyph. Base glyphs are read from the
/// font as it was before the filter ran.
#[derive(Default)]
pub struct DecomposeFlippedComponents;

impl DecomposeFlippedComponents {
    pub fn new() -> Self {
        DecomposeFlippedComponents
    }
}

impl FontFilter for DecomposeFlippedComponents {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::MergeError> {
        log::info!("Decomposing flipped components");
        let mut replacements = vec![];
        for (index, glyph) in font.glyphs.iter().enumerate() {
            if !glyph.components().any(|c| c.is_flipped()) {
                continue;
            }
            let mut shapes = Vec::with_capacity(glyph.shapes.len());
            let mut decomposed = vec![];
            for shape in &glyph.shapes {
                match shape {
                    Shape::Component(c) if c.is_flipped() => {
                        log::debug!("Decomposing {} in {}", c.reference, glyph.name);
                        decomposed.extend(
                            Glyph::decompose_component(c, &font.glyphs)?
                                .into_iter()
                                .map(Shape::Path),
                        );
                    }
                    _ => shapes.push(shape.clone()),
                }
            }
            // Drawn contours land after the glyph's own shapes
            shapes.extend(decomposed);
            replacements.push((index, shapes));
        }
        for (index, shapes) in replacements {
            if let Some(glyph) = font.glyphs.0.get_mut(index) {
                glyph.shapes = shapes;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, Font, MergeError, Node, NodeType, Path};
    use pretty_assertions::assert_eq;

    fn triangle() -> Shape {
        Shape::Path(Path {
            nodes: vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(100.0, 0.0, NodeType::Line),
                Node::new(0.0, 100.0, NodeType::Line),
            ],
            closed: true,
        })
    }

    fn component(reference: &str, coeffs: [f64; 6]) -> Shape {
        Shape::Component(Component::new(reference, kurbo::Affine::new(coeffs)))
    }

    fn font() -> Font {
        let mut base = Glyph::new("base");
        base.shapes.push(triangle());
        let mut mirrored = Glyph::new("mirrored");
        mirrored.shapes.push(triangle());
        mirrored
            .shapes
            .push(component("base", [-1.0, 0.0, 0.0, 1.0, 300.0, 0.0]));
        let mut plain = Glyph::new("plain");
        plain
            .shapes
            .push(component("base", [1.0, 0.0, 0.0, 1.0, 10.0, 0.0]));
        let mut nested = Glyph::new("nested");
        nested
            .shapes
            .push(component("mirrored", [1.0, 0.0, 0.0, -1.0, 0.0, 0.0]));
        let mut font = Font::new();
        font.glyphs.extend([nested, base, mirrored, plain]);
        font
    }

    #[test]
    fn test_flipped_component_is_decomposed() -> Result<(), MergeError> {
        let mut font = font();
        let before = font.glyphs.get("mirrored").map(|g| g.point_count());
        DecomposeFlippedComponents::new().apply(&mut font)?;
        let mirrored = font.glyphs.get("mirrored").cloned().unwrap_or_default();
        assert_eq!(mirrored.components().count(), 0);
        assert_eq!(Some(mirrored.point_count()), before.map(|n| n + 3));
        assert_eq!(
            mirrored.paths().last().map(|p| p.nodes.clone()),
            Some(vec![
                Node::new(300.0, 0.0, NodeType::Line),
                Node::new(200.0, 0.0, NodeType::Line),
                Node::new(300.0, 100.0, NodeType::Line),
            ])
        );
        Ok(())
    }

    #[test]
    fn test_unflipped_component_is_kept() -> Result<(), MergeError> {
        let mut font = font();
        DecomposeFlippedComponents::new().apply(&mut font)?;
        let plain = font.glyphs.get("plain").cloned().unwrap_or_default();
        assert_eq!(plain.components().count(), 1);
        assert_eq!(plain.point_count(), 0);
        Ok(())
    }

    #[test]
    fn test_nested_uses_original_base() -> Result<(), MergeError> {
        let mut font = font();
        DecomposeFlippedComponents::new().apply(&mut font)?;
        // "nested" is processed before "mirrored" is normalized, and draws
        // both of its contours either way
        let nested = font.glyphs.get("nested").cloned().unwrap_or_default();
        assert_eq!(nested.components().count(), 0);
        assert_eq!(nested.point_count(), 6);
        Ok(())
    }

    #[test]
    fn test_missing_base() {
        let mut font = Font::new();
        let mut orphan = Glyph::new("orphan");
        orphan
            .shapes
            .push(component("nowhere", [-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]));
        font.glyphs.push(orphan);
        let result = DecomposeFlippedComponents::new().apply(&mut font);
        assert!(matches!(result, Err(MergeError::MissingGlyph { glyph }) if glyph == "nowhere"));
    }
}
