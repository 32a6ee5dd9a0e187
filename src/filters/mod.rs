mod decomposeflippedcomponents;

pub use decomposeflippedcomponents::DecomposeFlippedComponents;

/// An in-place transformation of a whole font
pub trait FontFilter {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::MergeError>;
}
