//! Prism Core - scene description for the ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Surface`, `Shape`, `Material`, `Light`,
//!   `CameraSetup`, `Projection`
//! - **Scene files**: JSON loading with validation
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} surfaces", scene.surface_count());
//! ```

pub mod error;
pub mod loader;
pub mod material;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use loader::{compose, load_scene, load_scene_from_str, TransformOp};
pub use material::{Light, Material};
pub use scene::{demo_scene, CameraSetup, Projection, Scene};
pub use surface::{Shape, Surface};
