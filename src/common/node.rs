/// The role of a point in a contour, following the UFO point types
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeType {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub nodetype: NodeType,
    pub smooth: bool,
}

impl Node {
    pub fn new(x: f64, y: f64, nodetype: NodeType) -> Self {
        Node {
            x,
            y,
            nodetype,
            smooth: false,
        }
    }

    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// The same node, moved through an affine transform
    pub fn transformed(&self, transform: kurbo::Affine) -> Node {
        let point = transform * self.to_kurbo();
        Node {
            x: point.x,
            y: point.y,
            ..self.clone()
        }
    }
}

mod ufo {
    use super::*;

    impl From<&norad::PointType> for NodeType {
        fn from(p: &norad::PointType) -> Self {
            match p {
                norad::PointType::Move => NodeType::Move,
                norad::PointType::Line => NodeType::Line,
                norad::PointType::OffCurve => NodeType::OffCurve,
                norad::PointType::QCurve => NodeType::QCurve,
                _ => NodeType::Curve,
            }
        }
    }

    impl From<NodeType> for norad::PointType {
        fn from(p: NodeType) -> Self {
            match p {
                NodeType::Move => norad::PointType::Move,
                NodeType::Line => norad::PointType::Line,
                NodeType::OffCurve => norad::PointType::OffCurve,
                NodeType::QCurve => norad::PointType::QCurve,
                NodeType::Curve => norad::PointType::Curve,
            }
        }
    }

    impl From<&norad::ContourPoint> for Node {
        fn from(p: &norad::ContourPoint) -> Self {
            Node {
                x: p.x,
                y: p.y,
                nodetype: (&p.typ).into(),
                smooth: p.smooth,
            }
        }
    }

    impl From<&Node> for norad::ContourPoint {
        fn from(p: &Node) -> Self {
            norad::ContourPoint::new(p.x, p.y, p.nodetype.into(), p.smooth, None, None)
        }
    }
}
