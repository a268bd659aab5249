#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {

    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with every channel clamped to [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }
}

impl From<Color> for wgpu::Color {
    fn from(color: Color) -> Self {
        let color = color.clamped();
        wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        }
    }
}


#[cfg(test)]
mod test {
    use crate::Color;

    #[test]
    fn conversion_clamps_channels() {
        let color = Color::new(1.00035, -0.00014, 0.5, 1.0);
        let wgpu_color = wgpu::Color::from(color);
        assert_eq!(1.0, wgpu_color.r);
        assert_eq!(0.0, wgpu_color.g);
        assert_eq!(0.5, wgpu_color.b);
        assert_eq!(1.0, wgpu_color.a);
    }

    #[test]
    fn default_is_opaque_black() {
        assert_eq!(Color::rgb(0.0, 0.0, 0.0), Color::default());
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::new(0.1, 0.2, 0.3, 1.0), Color::rgb(0.1, 0.2, 0.3));
    }
}
