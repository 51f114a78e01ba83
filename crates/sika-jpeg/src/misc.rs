//! Miscellaneous stuff
//!
//! Zig-zag serialization and the shared scan geometry helpers.

use crate::options::CodingMode;

/// Position of each natural-order coefficient in the zig-zag vector
#[rustfmt::skip]
pub const ZIGZAG: [usize; 64] = [
     0,  1,  5,  6, 14, 15, 27, 28,
     2,  4,  7, 13, 16, 26, 29, 42,
     3,  8, 12, 17, 25, 30, 41, 43,
     9, 11, 18, 24, 31, 40, 44, 53,
    10, 19, 23, 32, 39, 45, 52, 54,
    20, 22, 33, 38, 46, 51, 55, 60,
    21, 34, 37, 47, 50, 56, 59, 61,
    35, 36, 48, 49, 57, 58, 62, 63
];

/// Undo run length encoding of coefficients by placing them in natural order
#[rustfmt::skip]
pub const UN_ZIGZAG: [usize; 64] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63
];

/// Serialize a row-major 8x8 block into zig-zag order, DC first.
pub fn to_zigzag(block: &[i32; 64]) -> [i32; 64] {
    let mut out = [0_i32; 64];

    for (position, coef) in block.iter().enumerate() {
        out[ZIGZAG[position]] = *coef;
    }
    out
}

/// Restore a zig-zag vector back to a row-major 8x8 block.
pub fn from_zigzag(vec: &[i32; 64]) -> [i32; 64] {
    let mut out = [0_i32; 64];

    for (position, coef) in vec.iter().enumerate() {
        out[UN_ZIGZAG[position]] = *coef;
    }
    out
}

/// Round `value` to the nearest larger multiple of `divisor`.
pub fn round_up(value: usize, divisor: usize) -> usize {
    if value % divisor == 0 {
        value
    } else {
        (value / divisor + 1) * divisor
    }
}

/// Dimensions `(height, width)` of one component's plane after
/// subsampling relative to the frame's maximum sampling factors.
pub fn sampling_size(
    shape: (usize, usize), sfactor: (u8, u8), max_sfactor: (u8, u8)
) -> (usize, usize) {
    let (height, width) = shape;
    let (sx, sy) = (usize::from(sfactor.0), usize::from(sfactor.1));
    let (x_max, y_max) = (usize::from(max_sfactor.0), usize::from(max_sfactor.1));

    (
        (height * sy + y_max - 1) / y_max,
        (width * sx + x_max - 1) / x_max
    )
}

/// Block-aligned dimensions `(height, width)` of the padded plane.
///
/// Interleaved scans group `sx * sy` blocks into one MCU, so the plane
/// must tile evenly into super-tiles of `8*sx` by `8*sy` pixels.
pub fn padded_size(sampling: (usize, usize), sfactor: (u8, u8), mode: CodingMode) -> (usize, usize) {
    let (height, width) = sampling;

    match mode {
        CodingMode::NonInterleaved => (round_up(height, 8), round_up(width, 8)),
        CodingMode::Interleaved => (
            round_up(height, 8 * usize::from(sfactor.1)),
            round_up(width, 8 * usize::from(sfactor.0))
        )
    }
}

/// Broadcast a per-component setting: repeat the last element until the
/// list covers `len` components, truncate if it is longer.
pub fn broadcast<T: Clone>(values: &[T], len: usize) -> Vec<T> {
    let mut out: Vec<T> = values.iter().take(len).cloned().collect();

    while out.len() < len {
        match out.last() {
            Some(last) => out.push(last.clone()),
            None => break
        }
    }
    out
}
