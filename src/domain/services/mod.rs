pub mod columns;
pub mod normalize;
pub mod records;
pub mod render;
