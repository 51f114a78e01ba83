/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Forward and inverse paths for a single 8x8 block
//!
//! Encode: FDCT, divide by the scaled quantization table, zig-zag,
//! entropy code. Decode is the strict inverse. The float quotient is
//! converted with a plain `as` cast, truncating toward zero; round-trip
//! parity with payloads produced elsewhere depends on that exact
//! rounding rule.

use crate::bitstream::{BitReader, BitWriter};
use crate::dct::{Dct8x8, BLOCK_SIZE};
use crate::entropy::HuffmanCodec;
use crate::errors::CodecErrors;
use crate::huffman::HuffmanTable;
use crate::misc::{from_zigzag, to_zigzag};
use crate::tables::HuffmanSpec;

/// Transform, quantization and entropy coding for one component's
/// blocks, built once per scan from the quality-scaled table.
pub(crate) struct BlockCodec {
    dct:     Dct8x8,
    quant:   [f32; BLOCK_SIZE],
    entropy: HuffmanCodec
}

impl BlockCodec {
    pub fn new(
        dc_spec: &HuffmanSpec, ac_spec: &HuffmanSpec, scaled_quant: &[u16; BLOCK_SIZE]
    ) -> Result<BlockCodec, CodecErrors> {
        let dc_table = HuffmanTable::new(&dc_spec.bits, &dc_spec.values)?;
        let ac_table = HuffmanTable::new(&ac_spec.bits, &ac_spec.values)?;

        Ok(BlockCodec {
            dct:     Dct8x8::new(),
            quant:   scaled_quant.map(f32::from),
            entropy: HuffmanCodec::new(dc_table, ac_table)
        })
    }

    /// Forward path for one level-shifted spatial block.
    ///
    /// Returns the quantized DC coefficient, the caller's next predictor.
    pub fn encode(
        &self, spatial: &[i32; BLOCK_SIZE], pred: i32, sink: &mut BitWriter
    ) -> Result<i32, CodecErrors> {
        let mut coefs: [f32; BLOCK_SIZE] = core::array::from_fn(|i| spatial[i] as f32);
        self.dct.forward(&mut coefs);

        let mut quantized = [0_i32; BLOCK_SIZE];
        for ((out, coef), quant) in quantized.iter_mut().zip(coefs).zip(self.quant) {
            // truncation toward zero, not round-to-nearest
            *out = (coef / quant) as i32;
        }

        self.entropy.encode(&to_zigzag(&quantized), pred, sink)
    }

    /// Inverse path for one block read off the stream.
    ///
    /// Returns the spatial block, still level-shifted, and the decoded
    /// DC coefficient.
    pub fn decode(
        &self, stream: &mut BitReader, pred: i32
    ) -> Result<([f32; BLOCK_SIZE], i32), CodecErrors> {
        let (vec, dc) = self.entropy.decode(stream, pred)?;
        let quantized = from_zigzag(&vec);

        let mut block = [0_f32; BLOCK_SIZE];
        for ((out, coef), quant) in block.iter_mut().zip(quantized).zip(self.quant) {
            *out = coef as f32 * quant;
        }
        self.dct.inverse(&mut block);

        Ok((block, dc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{self, QuantTable};

    fn codec(quality: u8) -> BlockCodec {
        let scaled = QuantTable::luma().scaled(quality).unwrap();

        BlockCodec::new(&tables::luma_dc_spec(), &tables::luma_ac_spec(), &scaled).unwrap()
    }

    fn round_trip(codec: &BlockCodec, spatial: &[i32; BLOCK_SIZE]) -> [f32; BLOCK_SIZE] {
        let mut sink = BitWriter::new();
        let pred = codec.encode(spatial, 0, &mut sink).unwrap();

        let mut stream = BitReader::new();
        stream.feed(&sink.to_bytes());

        let (block, dc) = codec.decode(&mut stream, 0).unwrap();
        assert_eq!(dc, pred);

        block
    }

    #[test]
    fn uniform_block_survives_exactly() {
        let codec = codec(99);
        let spatial = [72_i32; BLOCK_SIZE];

        let block = round_trip(&codec, &spatial);

        for sample in block {
            assert!((sample - 72.0).abs() < 0.5);
        }
    }

    #[test]
    fn zero_block_costs_six_bits() {
        // DC category 0 plus EOB in the suggested tables
        let codec = codec(75);

        let mut sink = BitWriter::new();
        codec.encode(&[0_i32; BLOCK_SIZE], 0, &mut sink).unwrap();

        assert_eq!(sink.bit_len(), 6);
    }

    #[test]
    fn high_quality_bounds_the_error() {
        let codec = codec(99);

        let spatial: [i32; BLOCK_SIZE] = core::array::from_fn(|i| (i as i32 % 16) * 8 - 64);
        let block = round_trip(&codec, &spatial);

        for (restored, original) in block.iter().zip(spatial) {
            assert!(
                (restored - original as f32).abs() <= 4.0,
                "{restored} vs {original}"
            );
        }
    }

    #[test]
    fn quantization_truncates_toward_zero() {
        // a uniform 9 has DC 72; against the base DC step of 16 the
        // quotient 4.5 must truncate to 4, reconstructing 8, where
        // round-to-nearest would give 5 and reconstruct 10
        let codec = codec(50);

        for (value, expected) in [(9_i32, 8.0_f32), (-9, -8.0)] {
            let spatial = [value; BLOCK_SIZE];
            let block = round_trip(&codec, &spatial);

            for sample in block {
                assert!((sample - expected).abs() < 0.1, "{sample} vs {expected}");
            }
        }
    }
}
