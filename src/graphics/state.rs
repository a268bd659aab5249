use std::sync::Arc;
use winit::window::Window;
use wgpu::*;
use crate::{GraphicsConfig, GraphicsError};

/// Surface formats tried in order. Non-sRGB, like the swap chain of a classic D3D11 app.
const PREFERRED_FORMATS: [TextureFormat; 2] = [TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm];

/**
 * Stores WGPU primitives needed to do any and all graphics operations.
 * Dropping it releases the surface, queue and device.
 */
pub struct GraphicsState {
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    surface: Surface,
    surface_config: SurfaceConfiguration,
}

impl GraphicsState {

    /// Creates a device, a queue and a surface presenting to the window.
    /// The window must outlive the state.
    pub fn new(window: &Window, config: &GraphicsConfig) -> Result<Self, GraphicsError> {
        let backends = config.backend.to_wgpu();
        let instance = wgpu::Instance::new(InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface = unsafe {
            instance.create_surface(window).map_err(GraphicsError::CreateSurface)?
        };
        let adapter = instance.request_adapter(&RequestAdapterOptions {
            power_preference: config.power_preference.to_wgpu(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        });
        let adapter = pollster::block_on(adapter).ok_or(GraphicsError::RequestAdapter(backends))?;
        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let device_queue = adapter.request_device(&DeviceDescriptor {
            label: Some("triangle_device"),
            ..Default::default()
        }, None);
        let (device, queue) = pollster::block_on(device_queue).map_err(GraphicsError::RequestDevice)?;

        let capabilities = surface.get_capabilities(&adapter);
        let format = select_format(&capabilities.formats).ok_or(GraphicsError::NoSurfaceFormat)?;
        let alpha_mode = capabilities.alpha_modes
            .first()
            .copied()
            .unwrap_or(CompositeAlphaMode::Auto);
        let window_size = window.inner_size();
        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: window_size.width.max(1),
            height: window_size.height.max(1),
            present_mode: present_mode(config.vsync),
            alpha_mode,
            view_formats: vec![],
        };
        log::debug!("Configuring surface {surface_config:?}");
        surface.configure(&device, &surface_config);
        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            surface,
            surface_config,
        })
    }

    /// Current texture to render on.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Convenience method for getting the surface's size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Format of the surface's texture.
    pub fn surface_format(&self) -> TextureFormat {
        self.surface_config.format
    }

    /// Viewport covering the whole surface.
    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.surface_size();
        Viewport::full(width, height)
    }

    /// Resizes pixel size of surface.
    /// Commonly invoked when window size changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.reconfigure();
    }

    /// Reconfigures the surface with its current size.
    /// Used to recover a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }
}

/// Region of the render target triangles are rasterized to.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

fn select_format(supported: &[TextureFormat]) -> Option<TextureFormat> {
    PREFERRED_FORMATS
        .iter()
        .find(|format| supported.contains(*format))
        .or_else(|| supported.first())
        .copied()
}

fn present_mode(vsync: bool) -> PresentMode {
    match vsync {
        true => PresentMode::AutoVsync,
        false => PresentMode::AutoNoVsync,
    }
}


#[cfg(test)]
mod test {
    use wgpu::{PresentMode, TextureFormat};
    use super::{present_mode, select_format, Viewport};

    #[test]
    fn prefers_unorm_formats() {
        let supported = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(Some(TextureFormat::Bgra8Unorm), select_format(&supported));
        let supported = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm];
        assert_eq!(Some(TextureFormat::Rgba8Unorm), select_format(&supported));
    }

    #[test]
    fn falls_back_to_first_format() {
        let supported = [TextureFormat::Rgba16Float, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(Some(TextureFormat::Rgba16Float), select_format(&supported));
        assert_eq!(None, select_format(&[]));
    }

    #[test]
    fn vsync_selects_present_mode() {
        assert_eq!(PresentMode::AutoVsync, present_mode(true));
        assert_eq!(PresentMode::AutoNoVsync, present_mode(false));
    }

    #[test]
    fn full_viewport() {
        let viewport = Viewport::full(800, 600);
        assert_eq!((0.0, 0.0), (viewport.x, viewport.y));
        assert_eq!((800.0, 600.0), (viewport.width, viewport.height));
        assert_eq!((0.0, 1.0), (viewport.min_depth, viewport.max_depth));
    }
}
