/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per-component configuration and scan state
//!
//! A [`Component`] holds one channel's lifecycle configuration: sampling
//! factor, resampling filter, tables and quality. Scans get their own
//! state objects, [`ScanEncoder`] and [`ScanDecoder`], which carry the
//! DC predictor and the quality-scaled codec for the duration of one
//! encode or decode call; nothing on the component mutates mid-call.

use crate::bitstream::{BitReader, BitWriter};
use crate::block::BlockCodec;
use crate::dct::BLOCK_SIZE;
use crate::errors::CodecErrors;
use crate::mcu::{BlockSink, BlockSource};
use crate::misc::{padded_size, sampling_size};
use crate::options::CodingMode;
use crate::plane::Plane;
use crate::resize::{pad_replicate, resize, ResizeMethod};
use crate::tables::{self, HuffmanSpec, QuantTable};

/// One channel's configuration.
#[derive(Clone)]
pub(crate) struct Component {
    /// Relative `(sx, sy)` sampling density within an MCU
    pub sampling_factor: (u8, u8),
    /// Filter used for both down- and upsampling
    pub interpolation: ResizeMethod,
    /// Base quantization table, scaled by quality per scan
    pub quant_table: QuantTable,
    /// DC Huffman table spec
    pub dc_spec: HuffmanSpec,
    /// AC Huffman table spec
    pub ac_spec: HuffmanSpec,
    pub quality: u8
}

impl Component {
    /// A luma-flavoured default; the frame broadcasts real settings over
    /// its components before use.
    pub fn new() -> Component {
        Component {
            sampling_factor: (1, 1),
            interpolation:   ResizeMethod::Bilinear,
            quant_table:     QuantTable::luma(),
            dc_spec:         tables::luma_dc_spec(),
            ac_spec:         tables::luma_ac_spec(),
            quality:         50
        }
    }

    /// The block-walk step for this component under `mode`.
    ///
    /// Non-interleaved scans always walk in plain raster order; only the
    /// interleaved MCU walk groups blocks by sampling factor.
    fn step(&self, mode: CodingMode) -> (u8, u8) {
        match mode {
            CodingMode::NonInterleaved => (1, 1),
            CodingMode::Interleaved => self.sampling_factor
        }
    }

    /// Downsample and pad one channel ahead of the transform.
    pub fn preencode(
        &self, plane: &Plane<u8>, max_sfactor: (u8, u8), mode: CodingMode
    ) -> Plane<u8> {
        let shape = (plane.height(), plane.width());
        let (sampled_h, sampled_w) = sampling_size(shape, self.sampling_factor, max_sfactor);

        let sampled = resize(plane, sampled_w, sampled_h, self.interpolation);

        let (padded_h, padded_w) = padded_size((sampled_h, sampled_w), self.sampling_factor, mode);

        pad_replicate(&sampled, padded_h - sampled_h, padded_w - sampled_w)
    }

    /// Crop the padding away and upsample back to the original shape.
    pub fn postdecode(
        &self, plane: &Plane<u8>, max_sfactor: (u8, u8), original_shape: (usize, usize)
    ) -> Plane<u8> {
        let (sampled_h, sampled_w) = sampling_size(original_shape, self.sampling_factor, max_sfactor);

        let cropped = plane.crop(sampled_h, sampled_w);

        resize(&cropped, original_shape.1, original_shape.0, self.interpolation)
    }

    fn block_codec(&self) -> Result<BlockCodec, CodecErrors> {
        let scaled = self.quant_table.scaled(self.quality)?;

        BlockCodec::new(&self.dc_spec, &self.ac_spec, &scaled)
    }

    /// Set up the encode-side scan over a level-shifted plane.
    pub fn begin_encode<'a>(
        &self, plane: &'a Plane<i32>, mode: CodingMode
    ) -> Result<ScanEncoder<'a>, CodecErrors> {
        Ok(ScanEncoder {
            source: BlockSource::new(plane, self.step(mode))?,
            codec:  self.block_codec()?,
            pred:   0
        })
    }

    /// Set up the decode-side scan state.
    ///
    /// The decoder has no view of the payload's extent; the caller stops
    /// it once the accumulator from [`Component::create_block_container`]
    /// is full.
    pub fn begin_decode(&self) -> Result<ScanDecoder, CodecErrors> {
        Ok(ScanDecoder { codec: self.block_codec()?, pred: 0 })
    }

    /// The zero-filled accumulator a decode scan fills, sized from the
    /// original image shape.
    pub fn create_block_container(
        &self, shape: (usize, usize), max_sfactor: (u8, u8), mode: CodingMode
    ) -> Result<BlockSink, CodecErrors> {
        let sampled = sampling_size(shape, self.sampling_factor, max_sfactor);
        let (padded_h, padded_w) = padded_size(sampled, self.sampling_factor, mode);

        BlockSink::new(padded_w, padded_h, self.step(mode))
    }
}

/// Encode-side scan state for one component.
pub(crate) struct ScanEncoder<'a> {
    source: BlockSource<'a>,
    codec:  BlockCodec,
    pred:   i32
}

impl ScanEncoder<'_> {
    pub fn block_count(&self) -> usize {
        self.source.block_count()
    }

    /// Entropy-code the next block into its own bit group, or `None`
    /// once every block has been emitted.
    pub fn next_block(&mut self) -> Option<Result<BitWriter, CodecErrors>> {
        let spatial = self.source.next_block()?;

        let mut bits = BitWriter::new();

        Some(match self.codec.encode(&spatial, self.pred, &mut bits) {
            Ok(pred) => {
                self.pred = pred;
                Ok(bits)
            }
            Err(error) => Err(error)
        })
    }
}

/// Decode-side scan state for one component.
pub(crate) struct ScanDecoder {
    codec: BlockCodec,
    pred:  i32
}

impl ScanDecoder {
    /// Decode the next block off the shared stream.
    pub fn next_block(&mut self, stream: &mut BitReader) -> Result<[f32; BLOCK_SIZE], CodecErrors> {
        let (block, pred) = self.codec.decode(stream, self.pred)?;
        self.pred = pred;

        Ok(block)
    }
}
