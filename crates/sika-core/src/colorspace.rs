//! Image colorspace information

/// All colorspaces the codec understands.
///
/// `BGR` is the channel order the codec expects for interleaved color
/// input; `YCrCb` is the transform colorspace components travel in.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ColorSpace {
    /// A single plane of grey samples
    Luma,
    /// Interleaved blue, green, red samples
    BGR,
    /// Luma plus red-difference and blue-difference chroma
    YCrCb
}

impl ColorSpace {
    /// Number of color channels in this colorspace
    pub const fn num_components(&self) -> usize {
        match self {
            Self::BGR | Self::YCrCb => 3,
            Self::Luma => 1
        }
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Luma)
    }
}

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 3] =
    [ColorSpace::Luma, ColorSpace::BGR, ColorSpace::YCrCb];
