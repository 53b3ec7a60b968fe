pub mod camera;
pub mod constants;
pub mod error;
pub mod heatmap;
pub mod params;
pub mod particles;
pub mod picking;
pub mod picture;
pub mod render;
pub mod session;
pub mod shading;
pub mod viewport;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static OVERLAY_WGSL: &str = include_str!("../shaders/overlay.wgsl");

pub use camera::*;
pub use error::MeltError;
pub use heatmap::*;
pub use params::MeltParams;
pub use particles::*;
pub use picking::*;
pub use picture::*;
pub use render::{ParticleRenderer, ParticleUniforms};
pub use session::*;
pub use viewport::*;
