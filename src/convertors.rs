/// Bare UFO convertor
pub mod ufo;
