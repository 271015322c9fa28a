pub mod color;
pub mod drawing_surface;
pub mod feature_table;
pub mod shape_renderer;
