//! Rendering
//!
//! A frame is composed from the game state first (`frame`), then tessellated into
//! colored triangles (`shapes`) and drawn through a WebGPU pipeline (`pipeline`).
//! The score label is text, which the host paints into the HUD.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{Frame, ScoreLabel, Shape, compose, score_text};
pub use pipeline::RenderState;
pub use vertex::Vertex;

/// Failures while bringing up the GPU surface
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
