//! An in-process [`crate::SurfaceHost`]: visual trees are plain data,
//! detached clones live in an arena, and the rasterizer paints block boxes
//! with the `image` crate.

mod host;
mod node;
mod pixmap;
mod tree;

pub use host::{MemoryHost, TargetId};
pub use node::VisualNode;
pub use pixmap::PixmapRasterizer;
pub use tree::{DetachedTree, NodeId};

/// Average glyph advance used by the in-memory box layout, in CSS px.
pub const CHAR_WIDTH_PX: f32 = 7.0;
/// Height of one text line in CSS px.
pub const LINE_HEIGHT_PX: f32 = 18.0;
