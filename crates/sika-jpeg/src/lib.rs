//! This crate provides a baseline JPEG-style lossy codec for 8-bit
//! raster images.
//!
//! Given a grey or BGR image it produces a Huffman-coded payload, and
//! from that payload it reconstructs an approximation of the original
//! raster. The payload is a raw concatenation of entropy-coded bits with
//! no container markers; the decoder is driven by the image shape, which
//! travels out of band.
//!
//! # Features
//!  - Chroma subsampling (4:4:4, 4:2:2, 4:2:0, 4:4:0, 4:1:1, 4:1:0)
//!  - Interleaved (MCU order) and non-interleaved block emission
//!  - Quality-scaled quantization against the suggested tables
//!  - Custom Huffman and quantization tables per component
//!
//! # Usage
//! Add sika-jpeg to the dependencies in the project Cargo.toml
//!
//! ```toml
//! [dependencies]
//! sika_jpeg = "0.1.0"
//! ```
//! # Examples
//!
//! ## Round-trip a grey image
//! ```
//! use sika_core::bit_depth::BitDepth;
//! use sika_core::colorspace::ColorSpace;
//! use sika_jpeg::{CodingMode, Frame, Image};
//!
//! let pixels = vec![128_u8; 16 * 16];
//! let image = Image::new(pixels, 16, 16, ColorSpace::Luma).unwrap();
//!
//! let mut frame = Frame::new(BitDepth::Eight).unwrap();
//! frame.set_quality(&[75]).unwrap();
//!
//! let payload = frame.encode(&image, CodingMode::NonInterleaved).unwrap();
//! let restored = frame
//!     .decode(&payload, 16, 16, ColorSpace::Luma, CodingMode::NonInterleaved)
//!     .unwrap();
//! assert_eq!(restored.dimensions(), (16, 16));
//! ```
//!
//! ## Encode color with 4:2:0 subsampling, interleaved
//! ```
//! use sika_core::bit_depth::BitDepth;
//! use sika_core::colorspace::ColorSpace;
//! use sika_jpeg::{CodingMode, Frame, Image, SamplingSpec};
//!
//! let pixels = vec![200_u8; 16 * 16 * 3];
//! let image = Image::new(pixels, 16, 16, ColorSpace::BGR).unwrap();
//!
//! let mut frame = Frame::new(BitDepth::Eight).unwrap();
//! frame.set_sampling_factor(&SamplingSpec::Packed(420)).unwrap();
//!
//! let payload = frame.encode(&image, CodingMode::Interleaved).unwrap();
//! assert!(!payload.is_empty());
//! ```

#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub use crate::errors::CodecErrors;
pub use crate::frame::Frame;
pub use crate::image::Image;
pub use crate::options::{CodingMode, SamplingSpec};
pub use crate::resize::ResizeMethod;
pub use crate::tables::{HuffmanSpec, QuantTable};

pub mod bitstream;
mod block;
mod color_convert;
mod components;
mod dct;
mod entropy;
pub mod errors;
mod frame;
mod huffman;
mod image;
mod magnitude;
mod mcu;
mod misc;
mod options;
mod plane;
mod resize;
mod tables;

#[must_use]
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
