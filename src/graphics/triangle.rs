use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::{BlendState, Buffer, BufferUsages, ColorTargetState, ColorWrites, Device, FragmentState, FrontFace, MultisampleState, PolygonMode, PrimitiveState, PrimitiveTopology, RenderPass, RenderPipeline, RenderPipelineDescriptor, ShaderModuleDescriptor, ShaderSource, TextureFormat, VertexState};
use crate::{Vertex, Viewport, TRIANGLE};

const VERTEX_SLOT: u32 = 0;
const SHADER: &str = include_str!("triangle.wgsl");

/// Pipeline and vertex buffer for the single triangle.
/// Created once against the surface format, released on drop.
pub struct TriangleRenderer {
    pipeline: RenderPipeline,
    vertices: Buffer,
    vertex_count: u32,
}

impl TriangleRenderer {

    pub fn new(device: &Device, texture_format: TextureFormat) -> Self {
        log::debug!("Creating triangle pipeline for {texture_format:?}");
        let pipeline = create_pipeline(device, texture_format);
        let vertices = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("triangle_vertices"),
            contents: bytemuck::cast_slice(&TRIANGLE),
            usage: BufferUsages::VERTEX,
        });
        Self {
            pipeline,
            vertices,
            vertex_count: TRIANGLE.len() as u32,
        }
    }

    /// Encodes the triangle into a render pass.
    pub fn render<'r>(&'r self, pass: &mut RenderPass<'r>, viewport: Viewport) {
        pass.set_pipeline(&self.pipeline);
        pass.set_viewport(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height,
            viewport.min_depth,
            viewport.max_depth,
        );
        pass.set_vertex_buffer(VERTEX_SLOT, self.vertices.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

fn create_pipeline(device: &Device, texture_format: TextureFormat) -> RenderPipeline {
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("triangle_module"),
        source: ShaderSource::Wgsl(SHADER.into()),
    });
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("triangle_pipeline"),
        layout: None,
        vertex: VertexState {
            module: &module,
            entry_point: "vertex_main",
            buffers: &[Vertex::LAYOUT],
        },
        fragment: Some(FragmentState {
            module: &module,
            entry_point: "fragment_main",
            targets: &[Some(ColorTargetState {
                format: texture_format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Cw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
    })
}
