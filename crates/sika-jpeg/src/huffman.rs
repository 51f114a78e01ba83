#![allow(clippy::similar_names)]

//! Canonical Huffman tables in the JPEG `BITS`/`HUFFVALS` representation
//!
//! A table is described by the count of codes of each length 1..=16 and
//! the symbol values in canonical code order. Codes are assigned by
//! walking the lengths: the next `bits[l]` symbols take consecutive
//! integer codes at length `l`, then the running code shifts left by one.

use crate::bitstream::BitReader;
use crate::errors::CodecErrors;

/// Longest code length a table may use.
pub const MAX_CODE_LENGTH: usize = 16;

/// A Huffman table together with the derived arrays used for encoding
/// and decoding.
#[derive(Clone)]
pub struct HuffmanTable {
    /// \# number of symbols with codes of length `k` bits,
    /// element 0 is unused
    bits: [u8; 17],
    /// Symbols in order of increasing code length
    values: Vec<u8>,
    /// smallest code of length `k`, -1 when the length has no codes
    mincode: [i32; 17],
    /// largest code of length `k`, -1 when the length has no codes
    maxcode: [i32; 17],
    /// index into `values` of the first code of length `k`
    val_ptr: [i32; 17],
    /// symbol -> `(code, length)` mapping for the encoder
    codes: [Option<(u16, u8)>; 256]
}

impl HuffmanTable {
    /// Build a table from its spec, validating that the counts and the
    /// symbol list agree and that the counts describe a legal code tree.
    pub fn new(bits: &[u8; 17], values: &[u8]) -> Result<HuffmanTable, CodecErrors> {
        let declared: usize = bits[1..].iter().map(|count| usize::from(*count)).sum();

        if declared != values.len() {
            return Err(CodecErrors::InvalidTable(format!(
                "table declares {declared} codes but carries {} symbols",
                values.len()
            )));
        }

        let mut table = HuffmanTable {
            bits:    *bits,
            values:  values.to_vec(),
            mincode: [-1; 17],
            maxcode: [-1; 17],
            val_ptr: [-1; 17],
            codes:   [None; 256]
        };
        table.make_derived_table()?;

        Ok(table)
    }

    /// Compute derived values for a Huffman table
    ///
    /// Walks figure C.1/C.2 of the standard: consecutive codes within a
    /// length, shift left between lengths.
    fn make_derived_table(&mut self) -> Result<(), CodecErrors> {
        let mut code: i32 = 0;
        let mut p: usize = 0;

        for length in 1..=MAX_CODE_LENGTH {
            let count = usize::from(self.bits[length]);

            if count > 0 {
                self.mincode[length] = code;
                self.val_ptr[length] = p as i32;

                for _ in 0..count {
                    self.codes[usize::from(self.values[p])] = Some((code as u16, length as u8));
                    code += 1;
                    p += 1;
                }
                self.maxcode[length] = code - 1;

                // code is now 1 more than the last code used for this
                // length; it must still fit in `length` bits, since no
                // code is allowed to be all ones.
                if code >= (1 << length) {
                    return Err(CodecErrors::InvalidTable(format!(
                        "canonical codes overflow {length} bits"
                    )));
                }
            }
            code <<= 1;
        }
        Ok(())
    }

    /// The `(code, length)` pair assigned to `symbol`.
    pub(crate) fn code_for_symbol(&self, symbol: u8) -> Result<(u16, u8), CodecErrors> {
        self.codes[usize::from(symbol)].ok_or_else(|| {
            CodecErrors::InvalidTable(format!("no code for symbol {symbol:#04x}"))
        })
    }

    /// Prefix-decode the next symbol from the stream.
    ///
    /// Reads bit by bit, extending the candidate code until it falls at
    /// or below the largest code of its length.
    pub(crate) fn decode_symbol(&self, stream: &mut BitReader) -> Result<u8, CodecErrors> {
        let mut length = 1_usize;
        let mut code = i32::from(stream.next_bit()?);

        while self.maxcode[length] < 0 || code > self.maxcode[length] {
            length += 1;

            if length > MAX_CODE_LENGTH {
                return Err(CodecErrors::CorruptStream("Huffman code longer than 16 bits"));
            }
            code = (code << 1) | i32::from(stream.next_bit()?);
        }
        let index = self.val_ptr[length] + (code - self.mincode[length]);

        Ok(self.values[index as usize])
    }

    #[cfg(test)]
    pub(crate) fn code_lengths(&self) -> &[u8; 17] {
        &self.bits
    }

    #[cfg(test)]
    pub(crate) fn code_range(&self, length: usize) -> (i32, i32) {
        (self.mincode[length], self.maxcode[length])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitWriter;
    use crate::tables;

    fn tiny_table() -> HuffmanTable {
        // lengths: a:2, b:2, c:3, d:3 -> codes 00, 01, 100, 101
        let mut bits = [0_u8; 17];
        bits[2] = 2;
        bits[3] = 2;

        HuffmanTable::new(&bits, &[b'a', b'b', b'c', b'd']).unwrap()
    }

    #[test]
    fn canonical_codes_are_consecutive() {
        let table = tiny_table();

        assert_eq!(table.code_for_symbol(b'a').unwrap(), (0b00, 2));
        assert_eq!(table.code_for_symbol(b'b').unwrap(), (0b01, 2));
        assert_eq!(table.code_for_symbol(b'c').unwrap(), (0b100, 3));
        assert_eq!(table.code_for_symbol(b'd').unwrap(), (0b101, 3));
    }

    #[test]
    fn count_and_symbol_mismatch_is_rejected() {
        let mut bits = [0_u8; 17];
        bits[2] = 3;

        assert!(matches!(
            HuffmanTable::new(&bits, &[1, 2]),
            Err(CodecErrors::InvalidTable(_))
        ));
    }

    #[test]
    fn overflowing_counts_are_rejected() {
        // five codes cannot fit in two bits
        let mut bits = [0_u8; 17];
        bits[2] = 5;

        assert!(matches!(
            HuffmanTable::new(&bits, &[1, 2, 3, 4, 5]),
            Err(CodecErrors::InvalidTable(_))
        ));
    }

    #[test]
    fn decode_walks_prefixes() {
        let table = tiny_table();

        let mut writer = BitWriter::new();
        for symbol in [b'd', b'a', b'c', b'b'] {
            let (code, length) = table.code_for_symbol(symbol).unwrap();
            writer.put_bits(length, u32::from(code));
        }

        let mut reader = BitReader::new();
        reader.feed(&writer.to_bytes());

        for expected in [b'd', b'a', b'c', b'b'] {
            assert_eq!(table.decode_symbol(&mut reader).unwrap(), expected);
        }
    }

    #[test]
    fn unresolvable_prefix_is_corrupt() {
        let table = tiny_table();

        // all-ones never resolves in this table
        let mut reader = BitReader::new();
        reader.feed(&[0xFF; 4]);

        assert!(matches!(
            table.decode_symbol(&mut reader),
            Err(CodecErrors::CorruptStream(_))
        ));
    }

    #[test]
    fn suggested_tables_cover_their_lengths() {
        for spec in [
            tables::luma_dc_spec(),
            tables::luma_ac_spec(),
            tables::chroma_dc_spec(),
            tables::chroma_ac_spec()
        ] {
            let table = HuffmanTable::new(&spec.bits, &spec.values).unwrap();

            // maxcode - mincode + 1 == bits[l] for every populated length
            for length in 1..=MAX_CODE_LENGTH {
                let count = i32::from(table.code_lengths()[length]);
                let (mincode, maxcode) = table.code_range(length);

                if count == 0 {
                    assert_eq!((mincode, maxcode), (-1, -1));
                } else {
                    assert_eq!(maxcode - mincode + 1, count);
                }
            }
        }
    }

    #[test]
    fn suggested_tables_are_prefix_free() {
        let spec = tables::luma_ac_spec();
        let table = HuffmanTable::new(&spec.bits, &spec.values).unwrap();

        let mut codes: Vec<(u16, u8)> = spec
            .values
            .iter()
            .map(|symbol| table.code_for_symbol(*symbol).unwrap())
            .collect();
        codes.sort_unstable();

        for pair in codes.windows(2) {
            let (code_a, len_a) = pair[0];
            let (code_b, len_b) = pair[1];

            assert!(len_a <= len_b);
            // a shorter code may never be a prefix of a longer one
            assert_ne!(code_a, code_b >> (len_b - len_a), "{code_a:b} prefixes {code_b:b}");
        }
    }
}
