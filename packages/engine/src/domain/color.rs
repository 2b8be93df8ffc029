use glam::Vec3;
use rand::Rng;

/// HSV (all components in [0, 1]) to linear RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match (i as i32) % 6 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

/// Random fully saturated hue, dimmed so repeated splats don't saturate.
pub fn generate_color<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    hsv_to_rgb(rng.random::<f32>(), 1.0, 1.0) * 0.15
}

/// 8-bit sRGB triple to [0, 1] floats.
pub fn normalize_rgb(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0
}

/// Pack a [0, 1] color into ABGR (little-endian bytes RR, GG, BB, AA) for a
/// direct canvas `ImageData` copy.
#[inline]
pub fn pack_abgr(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    (to_byte(a) << 24) | (to_byte(b) << 16) | (to_byte(g) << 8) | to_byte(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!((green - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn generated_colors_are_dim() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..32 {
            let c = generate_color(&mut rng);
            assert!(c.max_element() <= 0.15 + 1e-6);
            assert!(c.min_element() >= 0.0);
        }
    }

    #[test]
    fn abgr_packs_red_in_low_byte() {
        assert_eq!(pack_abgr(1.0, 0.0, 0.0, 1.0), 0xFF0000FF);
        // RGB(10,10,10) with alpha=255, the canvas background used elsewhere.
        let c = 10.0 / 255.0;
        assert_eq!(pack_abgr(c, c, c, 1.0), 0xFF0A0A0A);
    }
}
