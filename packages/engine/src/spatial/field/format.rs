use glam::Vec4;

/// Channel layout of a field.
///
/// Stores behave like GPU texture formats: channels a format lacks read back
/// as 0 and alpha reads back as 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelFormat {
    R,
    RG,
    RGBA,
}

impl ChannelFormat {
    #[inline]
    pub fn store(self, v: Vec4) -> Vec4 {
        match self {
            ChannelFormat::R => Vec4::new(v.x, 0.0, 0.0, 1.0),
            ChannelFormat::RG => Vec4::new(v.x, v.y, 0.0, 1.0),
            ChannelFormat::RGBA => v,
        }
    }

    /// Value a freshly allocated texel holds.
    #[inline]
    pub fn cleared(self) -> Vec4 {
        match self {
            ChannelFormat::RGBA => Vec4::ZERO,
            _ => Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn channels(self) -> usize {
        match self {
            ChannelFormat::R => 1,
            ChannelFormat::RG => 2,
            ChannelFormat::RGBA => 4,
        }
    }
}

/// Sampling filter used by [`super::Field::sample`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Linear,
    Nearest,
}
