use crate::spatial::Resolution;

/// Grid resolution for a canvas of `width x height` pixels: the short side
/// gets `base` texels, the long side is stretched by the aspect ratio.
pub fn resolution_for(base: u32, width: u32, height: u32) -> Resolution {
    let width = width.max(1);
    let height = height.max(1);
    let mut aspect = width as f32 / height as f32;
    if aspect < 1.0 {
        aspect = 1.0 / aspect;
    }

    let min = base.max(1);
    let max = ((base as f32 * aspect).round() as u32).max(1);

    if width > height {
        Resolution::new(max, min)
    } else {
        Resolution::new(min, max)
    }
}
