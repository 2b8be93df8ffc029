//! Display pass: dye field -> packed ABGR pixels for a canvas `ImageData`.
//!
//! Output rows run top to bottom, so row 0 of the frame is the top row of the
//! field. Alpha is the brightest channel; unless the config is transparent
//! the background color is blended underneath and alpha ends at 1.

use glam::{Vec3, Vec4Swizzles};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::{normalize_rgb, pack_abgr};
use crate::spatial::Field;

use super::FluidCore;

const DIFFUSE_FLOOR: f32 = 0.7;

#[derive(Clone, Copy)]
struct DisplayParams {
    shading: bool,
    transparent: bool,
    back: Vec3,
}

#[inline]
fn shade_texel(dye: &Field, x: u32, y: u32, params: DisplayParams) -> u32 {
    let mut c = dye.get(x, y).xyz();

    if params.shading {
        let n = dye.neighbors(x, y);
        let dx = n.r.xyz().length() - n.l.xyz().length();
        let dy = n.t.xyz().length() - n.b.xyz().length();
        let normal = Vec3::new(dx, dy, dye.texel_size().length()).normalize_or_zero();
        let diffuse = (normal.z + DIFFUSE_FLOOR).clamp(DIFFUSE_FLOOR, 1.0);
        c *= diffuse;
    }

    let a = c.max_element().clamp(0.0, 1.0);
    if params.transparent {
        pack_abgr(c.x, c.y, c.z, a)
    } else {
        let out = c + params.back * (1.0 - a);
        pack_abgr(out.x, out.y, out.z, 1.0)
    }
}

/// Write the current dye image into the frame buffer.
pub(super) fn render_display(core: &mut FluidCore) {
    let dye = core.fields.dye.read();
    let params = DisplayParams {
        shading: core.config.shading,
        transparent: core.config.transparent,
        back: normalize_rgb(core.config.back_color),
    };
    let width = dye.width() as usize;
    let height = dye.height();

    let fill_row = |(row, out): (usize, &mut [u32])| {
        let y = height - 1 - row as u32;
        for (x, px) in out.iter_mut().enumerate() {
            *px = shade_texel(dye, x as u32, y, params);
        }
    };

    #[cfg(feature = "parallel")]
    {
        core.pixels.par_chunks_mut(width).enumerate().for_each(fill_row);
    }

    #[cfg(not(feature = "parallel"))]
    {
        core.pixels.chunks_mut(width).enumerate().for_each(fill_row);
    }
}
