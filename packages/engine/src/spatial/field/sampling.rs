use glam::{Vec2, Vec4};

use super::{Field, FilterMode};

impl Field {
    /// Sample at a normalized coordinate using the field's own filter.
    /// Out-of-range coordinates clamp to the edge texels.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        match self.filter {
            FilterMode::Linear => self.sample_linear(uv),
            FilterMode::Nearest => self.sample_nearest(uv),
        }
    }

    #[inline]
    pub fn sample_nearest(&self, uv: Vec2) -> Vec4 {
        let x = (uv.x * self.width as f32).floor() as i64;
        let y = (uv.y * self.height as f32).floor() as i64;
        self.fetch(x, y)
    }

    /// Bilinear filtering between the four surrounding texel centres.
    #[inline]
    pub fn sample_linear(&self, uv: Vec2) -> Vec4 {
        let px = uv.x * self.width as f32 - 0.5;
        let py = uv.y * self.height as f32 - 0.5;
        let x0 = px.floor();
        let y0 = py.floor();
        let fx = px - x0;
        let fy = py - y0;
        let (xi, yi) = (x0 as i64, y0 as i64);

        let v00 = self.fetch(xi, yi);
        let v10 = self.fetch(xi + 1, yi);
        let v01 = self.fetch(xi, yi + 1);
        let v11 = self.fetch(xi + 1, yi + 1);

        let bottom = v00.lerp(v10, fx);
        let top = v01.lerp(v11, fx);
        bottom.lerp(top, fy)
    }

    /// Normalized coordinate of the centre of texel (x, y).
    #[inline]
    pub fn texel_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.texel_size.x,
            (y as f32 + 0.5) * self.texel_size.y,
        )
    }
}
