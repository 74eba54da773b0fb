pub mod color;
pub mod renderer;
pub mod surface;

pub use renderer::draw;
pub use surface::{FrameSurface, PixelSurface};
