use crate::{
    common::{Node, NodeType},
    MergeError,
};
use smol_str::SmolStr;
use std::collections::VecDeque;

/// A component in a glyph
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// The referenced glyph name
    pub reference: SmolStr,
    /// The transformation applied to the component
    pub transform: kurbo::Affine,
}

impl Component {
    pub fn new(reference: impl Into<SmolStr>, transform: kurbo::Affine) -> Self {
        Component {
            reference: reference.into(),
            transform,
        }
    }

    /// Whether the transform mirrors the referenced outline
    pub fn is_flipped(&self) -> bool {
        self.transform.determinant() < 0.0
    }
}

/// A path in a glyph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    /// A list of nodes in the path
    pub nodes: Vec<Node>,
    /// Whether the path is closed
    pub closed: bool,
}

impl Path {
    /// Move every node of the path through a transform
    pub fn transformed(&self, transform: kurbo::Affine) -> Path {
        Path {
            nodes: self.nodes.iter().map(|n| n.transformed(transform)).collect(),
            closed: self.closed,
        }
    }

    /// Converts the `Path` to a [`kurbo::BezPath`].
    pub fn to_kurbo(&self) -> Result<kurbo::BezPath, MergeError> {
        let mut path = kurbo::BezPath::new();
        let mut offs = VecDeque::new();
        let rotate = if self.closed {
            self.nodes
                .iter()
                .rev()
                .position(|pt| pt.nodetype != NodeType::OffCurve)
                .map(|idx| self.nodes.len() - 1 - idx)
                .unwrap_or(0)
        } else {
            0
        };
        let mut nodes = self
            .nodes
            .iter()
            .cycle()
            .skip(rotate)
            .take(self.nodes.len());
        // All kurbo paths, even closed ones, must start with a move_to
        let Some(start) = nodes.next() else {
            return Ok(path);
        };
        path.move_to(start.to_kurbo());
        for pt in nodes {
            let kurbo_point = pt.to_kurbo();
            match pt.nodetype {
                NodeType::Move => path.move_to(kurbo_point),
                NodeType::Line => path.line_to(kurbo_point),
                NodeType::OffCurve => offs.push_back(kurbo_point),
                NodeType::Curve | NodeType::QCurve => {
                    segment_to(&mut path, &mut offs, pt.nodetype, kurbo_point)?
                }
            }
        }
        if self.closed {
            // Off-curve points trailing the last on-curve point belong to
            // the segment which closes back onto the start point
            if !offs.is_empty() {
                segment_to(&mut path, &mut offs, start.nodetype, start.to_kurbo())?;
            }
            path.close_path()
        }
        Ok(path)
    }
}

fn segment_to(
    path: &mut kurbo::BezPath,
    offs: &mut VecDeque<kurbo::Point>,
    nodetype: NodeType,
    end: kurbo::Point,
) -> Result<(), MergeError> {
    match nodetype {
        NodeType::QCurve => {
            if offs.is_empty() {
                path.line_to(end);
            }
            while let Some(pt) = offs.pop_front() {
                if let Some(next) = offs.front() {
                    path.quad_to(pt, pt.midpoint(*next));
                } else {
                    path.quad_to(pt, end);
                }
            }
        }
        _ => {
            match offs.make_contiguous() {
                [] => path.line_to(end),
                [p1] => path.quad_to(*p1, end),
                [p1, p2] => path.curve_to(*p1, *p2, end),
                _ => return Err(MergeError::BadPath),
            };
            offs.clear();
        }
    }
    Ok(())
}

/// A shape in a glyph, either a component or a path
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A component in a glyph
    Component(Component),
    /// A path in a glyph
    Path(Path),
}
