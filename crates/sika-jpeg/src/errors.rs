/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during encoding and decoding

use core::fmt::{Debug, Display, Formatter};

use sika_core::bit_depth::BitDepth;
use sika_core::colorspace::ColorSpace;

/// Errors that may arise during encoding or decoding
pub enum CodecErrors {
    /// Plane dimensions that do not fit the required block grid,
    /// or a component geometry that cannot be tiled
    InvalidShape(String),
    /// Quality outside the supported `1..=99` range
    InvalidQuality(i64),
    /// The bit reader ran past the end of the payload
    UnexpectedEndOfStream,
    /// The entropy-coded stream could not be decoded
    CorruptStream(&'static str),
    /// A Huffman or quantization table failed validation
    InvalidTable(String),
    /// Components disagree on the number of MCUs in an interleaved scan
    InterleaveMismatch { expected: usize, found: usize },
    /// The colorspace of the image isn't supported by the codec
    UnsupportedColorspace(ColorSpace),
    /// Image depth isn't supported by the codec
    UnsupportedDepth(BitDepth),
    /// Mismatch in length expected vs what was found
    LengthMismatch(usize, usize),
    /// An underlying I/O error while reading a payload file
    IoErrors(std::io::Error)
}

/// Colorspaces the codec accepts as encode input and decode output.
pub const SUPPORTED_COLORSPACES: [ColorSpace; 2] = [ColorSpace::Luma, ColorSpace::BGR];

/// Bit depths the baseline profile supports.
pub const SUPPORTED_DEPTHS: [BitDepth; 1] = [BitDepth::Eight];

impl Debug for CodecErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CodecErrors::InvalidShape(reason) => {
                writeln!(f, "Invalid shape: {reason}")
            }
            CodecErrors::InvalidQuality(quality) => {
                writeln!(f, "Quality {quality} is outside the supported range 1..=99")
            }
            CodecErrors::UnexpectedEndOfStream => {
                writeln!(f, "Unexpected end of the entropy-coded stream")
            }
            CodecErrors::CorruptStream(reason) => {
                writeln!(f, "Corrupt entropy-coded stream: {reason}")
            }
            CodecErrors::InvalidTable(reason) => {
                writeln!(f, "Invalid table: {reason}")
            }
            CodecErrors::InterleaveMismatch { expected, found } => {
                writeln!(
                    f,
                    "Interleaved components disagree on MCU count, expected {expected} but found {found}"
                )
            }
            CodecErrors::UnsupportedColorspace(color) => {
                writeln!(
                    f,
                    "The codec cannot process images in colorspace {color:?}, supported ones are {SUPPORTED_COLORSPACES:?}"
                )
            }
            CodecErrors::UnsupportedDepth(depth) => {
                writeln!(
                    f,
                    "The codec cannot process images in depth {depth:?}, supported ones are {SUPPORTED_DEPTHS:?}"
                )
            }
            CodecErrors::LengthMismatch(expected, found) => {
                writeln!(f, "Expected a buffer of length {expected} but found {found}")
            }
            CodecErrors::IoErrors(err) => {
                writeln!(f, "I/O error: {err:?}")
            }
        }
    }
}

impl Display for CodecErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for CodecErrors {}

impl From<std::io::Error> for CodecErrors {
    fn from(err: std::io::Error) -> CodecErrors {
        CodecErrors::IoErrors(err)
    }
}
