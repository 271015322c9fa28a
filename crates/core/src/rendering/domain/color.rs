/// RGB stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub rgb: [u8; 3],
}

impl Color {
    pub const BLACK: Color = Color { rgb: [0, 0, 0] };
    pub const PINK: Color = Color { rgb: [255, 192, 203] };
    pub const RED: Color = Color { rgb: [255, 0, 0] };
}
