/// An encoded bitmap produced by a rasterizer.
///
/// `data` holds PNG bytes; `width` and `height` are in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}
