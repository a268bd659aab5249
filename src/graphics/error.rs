use derive_more::{Display, Error};

/// Failure while bringing up the GPU.
/// Each variant names the step that failed.
#[derive(Error, Display, Debug)]
pub enum GraphicsError {
    #[display(fmt="Failed to create surface: {}", _0)]
    CreateSurface(wgpu::CreateSurfaceError),
    #[display(fmt="No compatible adapter found for backends {:?}", _0)]
    RequestAdapter(#[error(not(source))] wgpu::Backends),
    #[display(fmt="Failed to request device: {}", _0)]
    RequestDevice(wgpu::RequestDeviceError),
    #[display(fmt="Surface reports no supported formats")]
    NoSurfaceFormat,
}
