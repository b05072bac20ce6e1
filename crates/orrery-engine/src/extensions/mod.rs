// extensions/mod.rs
//
// Optional extension modules, decoupled from core Entity/Scene.
// Games opt in by creating these systems.

pub mod easing;
pub mod transform;

pub use easing::{damp, damped_after, lerp};
pub use transform::{LocalTransform, TransformGraph};
