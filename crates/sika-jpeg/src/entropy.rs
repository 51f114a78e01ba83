/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entropy coding of zig-zag coefficient vectors
//!
//! The DC coefficient is coded as a category symbol for the difference
//! against the previous block's DC, followed by that difference's
//! magnitude bits. AC coefficients are run-length coded: each nonzero
//! value becomes a `(run << 4) | size` symbol plus magnitude bits, runs
//! longer than 15 spill into ZRL escapes, and a trailing all-zero tail
//! collapses into a single EOB.

use crate::bitstream::{BitReader, BitWriter};
use crate::errors::CodecErrors;
use crate::huffman::HuffmanTable;
use crate::magnitude;

/// Zero run length escape, 16 consecutive zero AC coefficients.
pub const ZRL: u8 = 0xF0;

/// End of block escape, all remaining AC coefficients are zero.
pub const EOB: u8 = 0x00;

/// Entropy codec for one component's blocks, holding its DC and AC
/// tables. The DC predictor is the caller's to thread between blocks.
pub(crate) struct HuffmanCodec {
    dc_table: HuffmanTable,
    ac_table: HuffmanTable
}

impl HuffmanCodec {
    pub fn new(dc_table: HuffmanTable, ac_table: HuffmanTable) -> HuffmanCodec {
        HuffmanCodec { dc_table, ac_table }
    }

    /// Encode one zig-zag vector against `pred`, appending the bits to
    /// `sink`. Returns the block's DC coefficient, the next predictor.
    pub fn encode(
        &self, coefs: &[i32; 64], pred: i32, sink: &mut BitWriter
    ) -> Result<i32, CodecErrors> {
        let diff = coefs[0] - pred;
        let (bits, size) = magnitude::encode(diff);

        let (code, length) = self.dc_table.code_for_symbol(size)?;
        sink.put_bits(length, u32::from(code));
        sink.put_bits(size, bits);

        let mut run: u8 = 0;

        for &coef in &coefs[1..] {
            if coef == 0 {
                run += 1;
                continue;
            }

            while run > 15 {
                let (code, length) = self.ac_table.code_for_symbol(ZRL)?;
                sink.put_bits(length, u32::from(code));
                run -= 16;
            }

            let (bits, size) = magnitude::encode(coef);
            let (code, length) = self.ac_table.code_for_symbol((run << 4) | size)?;

            sink.put_bits(length, u32::from(code));
            sink.put_bits(size, bits);
            run = 0;
        }

        // any zero tail, even one the ZRL escapes already walked into,
        // ends with a single EOB; a nonzero coefficient at index 63
        // leaves nothing to mark
        if run > 0 {
            let (code, length) = self.ac_table.code_for_symbol(EOB)?;
            sink.put_bits(length, u32::from(code));
        }

        Ok(coefs[0])
    }

    /// Decode one block into a zig-zag vector. Returns the vector and
    /// the block's DC coefficient, the next predictor.
    pub fn decode(
        &self, stream: &mut BitReader, pred: i32
    ) -> Result<([i32; 64], i32), CodecErrors> {
        let mut coefs = [0_i32; 64];

        let size = self.dc_table.decode_symbol(stream)?;
        let diff = if size == 0 {
            0
        } else {
            magnitude::decode(stream.next_bits(size)?, size)
        };
        coefs[0] = pred + diff;

        let mut k = 1_usize;

        while k < 64 {
            let rs = self.ac_table.decode_symbol(stream)?;
            let run = usize::from(rs >> 4);
            let size = rs & 0x0F;

            k += run;

            if size > 0 {
                if k > 63 {
                    return Err(CodecErrors::CorruptStream(
                        "AC coefficient index past the end of the block"
                    ));
                }
                coefs[k] = magnitude::decode(stream.next_bits(size)?, size);
            } else if run == 15 {
                // ZRL, the skipped sixteenth index stays zero
                if k > 63 {
                    return Err(CodecErrors::CorruptStream(
                        "zero run past the end of the block"
                    ));
                }
            } else {
                // EOB, the remaining coefficients stay zero
                break;
            }
            k += 1;
        }

        Ok((coefs, coefs[0]))
    }
}
