//! Suggested quantization and Huffman tables, ITU T.81 Annex K, and
//! quality scaling of quantization tables.

use crate::errors::CodecErrors;

/// Luminance quantization defaults, table K.1.
#[rustfmt::skip]
pub const LUMA_QUANTIZATION: [u16; 64] = [
    16,  11,  10,  16,  24,  40,  51,  61,
    12,  12,  14,  19,  26,  58,  60,  55,
    14,  13,  16,  24,  40,  57,  69,  56,
    14,  17,  22,  29,  51,  87,  80,  62,
    18,  22,  37,  56,  68, 109, 103,  77,
    24,  35,  55,  64,  81, 104, 113,  92,
    49,  64,  78,  87, 103, 121, 120, 101,
    72,  92,  95,  98, 112, 100, 103,  99
];

/// Chrominance quantization defaults, table K.2.
#[rustfmt::skip]
pub const CHROMA_QUANTIZATION: [u16; 64] = [
    17,  18,  24,  47,  99,  99,  99,  99,
    18,  21,  26,  66,  99,  99,  99,  99,
    24,  26,  56,  99,  99,  99,  99,  99,
    47,  66,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99
];

// Code lengths and values for table K.3, element 0 of the lengths unused
const LUMA_DC_BITS: [u8; 17] = [0, 0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];

const LUMA_DC_VALUES: [u8; 12] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B
];

// Code lengths and values for table K.4
const CHROMA_DC_BITS: [u8; 17] = [0, 0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0];

const CHROMA_DC_VALUES: [u8; 12] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B
];

// Code lengths and values for table K.5
const LUMA_AC_BITS: [u8; 17] = [0, 0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 0x7D];

const LUMA_AC_VALUES: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61,
    0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08, 0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52,
    0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x25,
    0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45,
    0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64,
    0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x83,
    0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99,
    0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6,
    0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3,
    0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8,
    0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA
];

// Code lengths and values for table K.6
const CHROMA_AC_BITS: [u8; 17] = [0, 0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 0x77];

const CHROMA_AC_VALUES: [u8; 162] = [
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61,
    0x71, 0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xA1, 0xB1, 0xC1, 0x09, 0x23, 0x33,
    0x52, 0xF0, 0x15, 0x62, 0x72, 0xD1, 0x0A, 0x16, 0x24, 0x34, 0xE1, 0x25, 0xF1, 0x17, 0x18,
    0x19, 0x1A, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44,
    0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63,
    0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A,
    0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97,
    0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4,
    0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA,
    0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7,
    0xE8, 0xE9, 0xEA, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA
];

/// The `BITS`/`HUFFVALS` description of one Huffman table.
///
/// Validation happens when the table is built for a scan; an
/// inconsistent spec surfaces as [`CodecErrors::InvalidTable`] there.
#[derive(Clone)]
pub struct HuffmanSpec {
    /// Count of codes of length `k`, element 0 unused
    pub bits: [u8; 17],
    /// Symbol values in canonical code order
    pub values: Vec<u8>
}

impl HuffmanSpec {
    #[must_use]
    pub fn new(bits: [u8; 17], values: Vec<u8>) -> HuffmanSpec {
        HuffmanSpec { bits, values }
    }
}

/// The suggested DC table for luminance, K.3.
#[must_use]
pub fn luma_dc_spec() -> HuffmanSpec {
    HuffmanSpec::new(LUMA_DC_BITS, LUMA_DC_VALUES.to_vec())
}

/// The suggested AC table for luminance, K.5.
#[must_use]
pub fn luma_ac_spec() -> HuffmanSpec {
    HuffmanSpec::new(LUMA_AC_BITS, LUMA_AC_VALUES.to_vec())
}

/// The suggested DC table for chrominance, K.4.
#[must_use]
pub fn chroma_dc_spec() -> HuffmanSpec {
    HuffmanSpec::new(CHROMA_DC_BITS, CHROMA_DC_VALUES.to_vec())
}

/// The suggested AC table for chrominance, K.6.
#[must_use]
pub fn chroma_ac_spec() -> HuffmanSpec {
    HuffmanSpec::new(CHROMA_AC_BITS, CHROMA_AC_VALUES.to_vec())
}

/// An 8x8 base quantization table.
///
/// The base is what `quality == 50` uses; encoding scales it by the
/// quality factor and clamps every entry into `1..=255`.
#[derive(Clone)]
pub struct QuantTable {
    table: [u16; 64]
}

impl QuantTable {
    /// Construct from a caller-provided base; every entry must be positive.
    pub fn new(table: [u16; 64]) -> Result<QuantTable, CodecErrors> {
        if let Some(position) = table.iter().position(|v| *v == 0) {
            return Err(CodecErrors::InvalidTable(format!(
                "quantization entry {position} is zero"
            )));
        }
        Ok(QuantTable { table })
    }

    /// The suggested luminance base, K.1.
    #[must_use]
    pub fn luma() -> QuantTable {
        QuantTable { table: LUMA_QUANTIZATION }
    }

    /// The suggested chrominance base, K.2.
    #[must_use]
    pub fn chroma() -> QuantTable {
        QuantTable { table: CHROMA_QUANTIZATION }
    }

    /// Scale the base by `quality`, rounding and clamping every entry
    /// into `1..=255`.
    pub fn scaled(&self, quality: u8) -> Result<[u16; 64], CodecErrors> {
        let factor = scale_factor(quality)?;

        Ok(self
            .table
            .map(|entry| (f32::from(entry) * factor).round().clamp(1.0, 255.0) as u16))
    }
}

/// The quality scaling factor applied to quantization tables.
///
/// `quality == 100` would scale every entry to zero, so the whole range
/// outside `1..=99` is rejected.
pub(crate) fn scale_factor(quality: u8) -> Result<f32, CodecErrors> {
    if !(1..=99).contains(&quality) {
        return Err(CodecErrors::InvalidQuality(i64::from(quality)));
    }

    if quality <= 50 {
        Ok(50.0 / f32::from(quality))
    } else {
        Ok(2.0 - 0.02 * f32::from(quality))
    }
}
