#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl Anchor {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Anchor {
            x,
            y,
            name: name.into(),
        }
    }
}

mod ufo {
    use crate::MergeError;

    use super::*;
    impl From<&norad::Anchor> for Anchor {
        fn from(a: &norad::Anchor) -> Self {
            Anchor {
                x: a.x,
                y: a.y,
                name: a.name.as_ref().map(|x| x.to_string()).unwrap_or_default(),
            }
        }
    }

    impl TryFrom<&Anchor> for norad::Anchor {
        type Error = MergeError;

        fn try_from(a: &Anchor) -> Result<Self, MergeError> {
            let name = if a.name.is_empty() {
                None
            } else {
                Some(norad::Name::new(&a.name)?)
            };
            Ok(norad::Anchor::new(a.x, a.y, name, None, None))
        }
    }
}
