pub mod color;
pub mod frame;
pub mod traits;

pub use color::Rgba;
pub use frame::{CircleInstance, FrameBuffer, Surface};
pub use traits::Renderer;
