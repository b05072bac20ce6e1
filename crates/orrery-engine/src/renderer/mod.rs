pub mod camera;
pub mod instance;
pub mod surface;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{FrameData, Renderer};
