use glam::Vec4;

use super::Field;

/// Four-neighbourhood of one cell plus its centre.
///
/// Left/right step along x, bottom/top along y (top = +y, towards uv.y = 1).
#[derive(Clone, Copy, Debug)]
pub struct Neighbors {
    pub l: Vec4,
    pub r: Vec4,
    pub t: Vec4,
    pub b: Vec4,
    pub c: Vec4,
}

impl Field {
    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx as u32) % self.width;
        let y = (idx as u32) / self.width;
        (x, y)
    }

    // === Clamp-to-edge fetch ===
    /// Fetch the texel at (x, y); coordinates outside the grid reuse the
    /// nearest edge texel.
    #[inline]
    pub fn fetch(&self, x: i64, y: i64) -> Vec4 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        *fast!(self.texels, [cy * self.width as usize + cx])
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.fetch(x as i64, y as i64)
    }

    /// Neighbour taps one texel away in each cardinal direction.
    #[inline]
    pub fn neighbors(&self, x: u32, y: u32) -> Neighbors {
        let (xi, yi) = (x as i64, y as i64);
        Neighbors {
            l: self.fetch(xi - 1, yi),
            r: self.fetch(xi + 1, yi),
            t: self.fetch(xi, yi + 1),
            b: self.fetch(xi, yi - 1),
            c: self.fetch(xi, yi),
        }
    }
}
