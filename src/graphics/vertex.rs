use std::mem::size_of;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Vertex with a single position attribute.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Default, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
}

impl Vertex {

    pub const POSITION_LOCATION: u32 = 0;

    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &[
            VertexAttribute {
                format: VertexFormat::Float32x3,
                offset: 0,
                shader_location: Self::POSITION_LOCATION,
            },
        ],
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: Vec3::new(x, y, z) }
    }
}

/// The triangle drawn every frame, in clip space.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(0.0, 0.5, 0.5),
    Vertex::new(0.5, -0.5, 0.5),
    Vertex::new(-0.5, -0.5, 0.5),
];


#[cfg(test)]
mod test {
    use std::mem::size_of;
    use wgpu::VertexFormat;
    use crate::{Vertex, TRIANGLE};

    #[test]
    fn layout_matches_vertex() {
        assert_eq!(12, size_of::<Vertex>());
        assert_eq!(size_of::<Vertex>() as u64, Vertex::LAYOUT.array_stride);
        let attribute = Vertex::LAYOUT.attributes[0];
        assert_eq!(VertexFormat::Float32x3, attribute.format);
        assert_eq!(VertexFormat::Float32x3.size(), size_of::<Vertex>() as u64);
    }

    #[test]
    fn triangle_bytes() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(36, bytes.len());
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&[0.0, 0.5, 0.5, 0.5, -0.5, 0.5, -0.5, -0.5, 0.5], floats);
    }

    #[test]
    fn triangle_is_clockwise() {
        // Signed area is negative for clockwise winding in a y-up space.
        let [a, b, c] = TRIANGLE.map(|vertex| vertex.position);
        let signed_area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
        assert!(signed_area < 0.0);
    }
}
