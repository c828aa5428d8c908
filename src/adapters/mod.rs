// Adapters layer: concrete readers for external file formats.

pub mod xlsx;
