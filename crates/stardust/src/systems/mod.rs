pub mod glyph;
pub mod particle;
pub mod field;
pub mod narrative;
pub mod tone;
