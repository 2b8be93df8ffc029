use crate::spatial::Resolution;

/// Level sizes below `base`, halving each step. Stops before either edge
/// would drop under two texels.
pub fn level_sizes(base: Resolution, iterations: u32) -> Vec<Resolution> {
    let mut sizes = Vec::with_capacity(iterations as usize);
    for i in 1..=iterations.min(31) {
        let width = base.width >> i;
        let height = base.height >> i;
        if width < 2 || height < 2 {
            break;
        }
        sizes.push(Resolution::new(width, height));
    }
    sizes
}
