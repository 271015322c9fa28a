pub mod raster_canvas;
pub mod side_by_side;
