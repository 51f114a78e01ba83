//! Image bit depth information

/// The bit depth of a decoded or to-be-encoded image.
///
/// The depth drives the level shift (`2^(precision - 1)`) and the
/// clamping range applied when samples are reconstructed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bits per sample, the baseline profile
    #[default]
    Eight,
    /// Sixteen bits per sample
    Sixteen
}

impl BitDepth {
    /// Number of bits carried by one sample at this depth
    pub const fn bit_size(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16
        }
    }

    /// The largest value a sample can take at this depth
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => u8::MAX as u16,
            Self::Sixteen => u16::MAX
        }
    }
}
