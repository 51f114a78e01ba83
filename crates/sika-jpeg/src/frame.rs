/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Top-level frame orchestration
//!
//! A [`Frame`] owns the per-component configuration and drives whole
//! images through the pipeline: colorspace split, subsampling, level
//! shift, block scans, and the reverse on decode. Interleaved scans
//! never terminate by running out of bits; every component's block
//! count is known up front and the MCU loop runs exactly that often.

use sika_core::bit_depth::BitDepth;
use sika_core::colorspace::ColorSpace;
use sika_core::log::{trace, warn};

use crate::bitstream::{BitReader, BitWriter};
use crate::color_convert::{bgr_to_ycrcb, ycrcb_to_bgr};
use crate::components::Component;
use crate::errors::CodecErrors;
use crate::image::Image;
use crate::misc::broadcast;
use crate::options::{CodingMode, SamplingSpec};
use crate::plane::Plane;
use crate::resize::ResizeMethod;
use crate::tables::{self, HuffmanSpec, QuantTable};

/// Maximum components a frame carries.
pub(crate) const MAX_COMPONENTS: usize = 3;

/// The top-level codec object.
///
/// A frame is long-lived: configure it once, then reuse it across
/// encode and decode calls. All per-call state (predictors, bit
/// buffers, iterators) lives on the call stack, so sequential reuse is
/// safe.
pub struct Frame {
    components: Vec<Component>,
    depth:      BitDepth
}

impl Frame {
    /// Create a frame with the suggested tables, 4:2:0 sampling,
    /// bilinear resampling and quality 50.
    pub fn new(depth: BitDepth) -> Result<Frame, CodecErrors> {
        if depth != BitDepth::Eight {
            return Err(CodecErrors::UnsupportedDepth(depth));
        }

        let mut frame = Frame {
            components: vec![Component::new(); MAX_COMPONENTS],
            depth
        };

        frame.set_quantization_tables(&[QuantTable::luma(), QuantTable::chroma()]);
        frame.set_huffman_tables(&[
            (tables::luma_dc_spec(), tables::luma_ac_spec()),
            (tables::chroma_dc_spec(), tables::chroma_ac_spec())
        ]);
        frame.set_interpolation(&[ResizeMethod::Bilinear]);
        frame.set_sampling_factor(&SamplingSpec::Packed(420))?;

        Ok(frame)
    }

    /// Set per-component quality, broadcasting the last value.
    pub fn set_quality(&mut self, quality: &[u8]) -> Result<(), CodecErrors> {
        for q in quality {
            if !(1..=99).contains(q) {
                return Err(CodecErrors::InvalidQuality(i64::from(*q)));
            }
        }

        for (component, q) in self
            .components
            .iter_mut()
            .zip(broadcast(quality, MAX_COMPONENTS))
        {
            component.quality = q;
        }
        Ok(())
    }

    /// Set the sampling factors from a packed code or explicit pairs.
    pub fn set_sampling_factor(&mut self, spec: &SamplingSpec) -> Result<(), CodecErrors> {
        for (component, factor) in self
            .components
            .iter_mut()
            .zip(spec.normalize(MAX_COMPONENTS)?)
        {
            component.sampling_factor = factor;
        }
        Ok(())
    }

    /// Set per-component resampling filters, broadcasting the last one.
    pub fn set_interpolation(&mut self, methods: &[ResizeMethod]) {
        for (component, method) in self
            .components
            .iter_mut()
            .zip(broadcast(methods, MAX_COMPONENTS))
        {
            component.interpolation = method;
        }
    }

    /// Set per-component base quantization tables, broadcasting the
    /// last one.
    pub fn set_quantization_tables(&mut self, tables: &[QuantTable]) {
        for (component, table) in self
            .components
            .iter_mut()
            .zip(broadcast(tables, MAX_COMPONENTS))
        {
            component.quant_table = table;
        }
    }

    /// Set per-component `(DC, AC)` Huffman specs, broadcasting the
    /// last pair.
    pub fn set_huffman_tables(&mut self, tables: &[(HuffmanSpec, HuffmanSpec)]) {
        for (component, (dc, ac)) in self
            .components
            .iter_mut()
            .zip(broadcast(tables, MAX_COMPONENTS))
        {
            component.dc_spec = dc;
            component.ac_spec = ac;
        }
    }

    /// Encode an image into an entropy-coded payload.
    ///
    /// The payload carries no shape information; keep the dimensions
    /// and colorspace around for [`Frame::decode`].
    pub fn encode(&self, image: &Image, mode: CodingMode) -> Result<Vec<u8>, CodecErrors> {
        let (width, height) = image.dimensions();

        let planes: Vec<Plane<u8>> = match image.colorspace() {
            ColorSpace::BGR => bgr_to_ycrcb(image.data(), width, height).into(),
            ColorSpace::Luma => {
                vec![Plane::from_vec(image.data().to_vec(), width, height)?]
            }
            colorspace => return Err(CodecErrors::UnsupportedColorspace(colorspace))
        };

        let mode = effective_mode(planes.len(), mode);
        let components = &self.components[..planes.len()];
        let max_sfactor = max_sampling_factor(components);

        trace!(
            "Encoding {}x{} image, {} components, {:?}",
            width,
            height,
            planes.len(),
            mode
        );

        // downsample, pad, level shift
        let shift = 1_i32 << (self.depth.bit_size() - 1);
        let mut shifted = Vec::with_capacity(planes.len());

        for (component, plane) in components.iter().zip(&planes) {
            let padded = component.preencode(plane, max_sfactor, mode);
            shifted.push(level_shift(&padded, shift));
        }

        let mut encoders = Vec::with_capacity(components.len());
        for (component, plane) in components.iter().zip(&shifted) {
            encoders.push(component.begin_encode(plane, mode)?);
        }

        let mut payload = BitWriter::new();

        match mode {
            CodingMode::NonInterleaved => {
                for encoder in &mut encoders {
                    while let Some(bits) = encoder.next_block() {
                        payload.extend(&bits?);
                    }
                }
            }
            CodingMode::Interleaved => {
                let order = scan_order(components);
                let counts: Vec<usize> =
                    encoders.iter().map(|encoder| encoder.block_count()).collect();
                let mcu_count = interleaved_mcu_count(components, &counts)?;

                for _ in 0..mcu_count {
                    for &index in &order {
                        let bits = encoders[index].next_block().ok_or(
                            CodecErrors::CorruptStream("component scan exhausted mid-MCU")
                        )??;
                        payload.extend(&bits);
                    }
                }
            }
        }

        trace!("Encoded payload of {} bits", payload.bit_len());

        Ok(payload.to_bytes())
    }

    /// Decode a payload produced by [`Frame::encode`].
    ///
    /// The image shape and colorspace travel out of band and must match
    /// the encode call, as must the frame configuration and `mode`.
    pub fn decode(
        &self, payload: &[u8], width: usize, height: usize, colorspace: ColorSpace,
        mode: CodingMode
    ) -> Result<Image, CodecErrors> {
        if !matches!(colorspace, ColorSpace::BGR | ColorSpace::Luma) {
            return Err(CodecErrors::UnsupportedColorspace(colorspace));
        }

        let n_components = colorspace.num_components();
        let mode = effective_mode(n_components, mode);
        let components = &self.components[..n_components];
        let max_sfactor = max_sampling_factor(components);
        let shape = (height, width);

        trace!(
            "Decoding {}x{} image, {} components, {:?}",
            width,
            height,
            n_components,
            mode
        );

        let mut stream = BitReader::new();
        stream.feed(payload);

        let mut sinks = Vec::with_capacity(n_components);
        let mut decoders = Vec::with_capacity(n_components);

        for component in components {
            sinks.push(component.create_block_container(shape, max_sfactor, mode)?);
            decoders.push(component.begin_decode()?);
        }

        match mode {
            CodingMode::NonInterleaved => {
                for (sink, decoder) in sinks.iter_mut().zip(&mut decoders) {
                    while !sink.end() {
                        sink.put_next(&decoder.next_block(&mut stream)?);
                    }
                }
            }
            CodingMode::Interleaved => {
                let order = scan_order(components);
                let counts: Vec<usize> = sinks.iter().map(|sink| sink.block_count()).collect();
                let mcu_count = interleaved_mcu_count(components, &counts)?;

                for _ in 0..mcu_count {
                    for &index in &order {
                        let block = decoders[index].next_block(&mut stream)?;
                        sinks[index].put_next(&block);
                    }
                }
            }
        }

        // level shift back, crop and upsample
        let shift = 1_i32 << (self.depth.bit_size() - 1);
        let max_value = i32::from(self.depth.max_value());

        let mut restored = Vec::with_capacity(n_components);
        for (component, sink) in components.iter().zip(sinks) {
            let plane = level_unshift(&sink.into_plane(), shift, max_value);
            restored.push(component.postdecode(&plane, max_sfactor, shape));
        }

        match colorspace {
            ColorSpace::Luma => {
                let plane = restored.pop().ok_or(CodecErrors::CorruptStream(
                    "no component decoded"
                ))?;
                Image::new(plane.into_vec(), width, height, colorspace)
            }
            _ => {
                let planes: [Plane<u8>; 3] = match restored.try_into() {
                    Ok(planes) => planes,
                    Err(_) => {
                        return Err(CodecErrors::CorruptStream("expected three components"))
                    }
                };
                Image::new(ycrcb_to_bgr(&planes), width, height, colorspace)
            }
        }
    }

}

/// Grayscale images always serialize non-interleaved.
fn effective_mode(n_components: usize, mode: CodingMode) -> CodingMode {
    if n_components == 1 && mode == CodingMode::Interleaved {
        warn!("Grayscale image, downgrading to non-interleaved emission");
        return CodingMode::NonInterleaved;
    }
    mode
}

/// Componentwise maximum of the sampling factors.
fn max_sampling_factor(components: &[Component]) -> (u8, u8) {
    components
        .iter()
        .fold((1, 1), |(max_x, max_y), component| {
            let (sx, sy) = component.sampling_factor;
            (max_x.max(sx), max_y.max(sy))
        })
}

/// The flat MCU emission order: component `i` appears `sx_i * sy_i`
/// times, components in order.
fn scan_order(components: &[Component]) -> Vec<usize> {
    let mut order = vec![];

    for (index, component) in components.iter().enumerate() {
        let (sx, sy) = component.sampling_factor;
        order.extend(std::iter::repeat(index).take(usize::from(sx) * usize::from(sy)));
    }
    order
}

/// Number of MCUs in an interleaved scan, validated to agree across
/// components.
fn interleaved_mcu_count(
    components: &[Component], block_counts: &[usize]
) -> Result<usize, CodecErrors> {
    let mut mcu_count: Option<usize> = None;

    for (component, blocks) in components.iter().zip(block_counts) {
        let (sx, sy) = component.sampling_factor;
        let group = usize::from(sx) * usize::from(sy);
        let count = *blocks / group;

        match mcu_count {
            None => mcu_count = Some(count),
            Some(expected) if expected != count => {
                return Err(CodecErrors::InterleaveMismatch {
                    expected,
                    found: count
                });
            }
            Some(_) => {}
        }
    }

    Ok(mcu_count.unwrap_or(0))
}

/// Subtract the level shift, producing the signed plane the transform
/// operates on.
fn level_shift(plane: &Plane<u8>, shift: i32) -> Plane<i32> {
    let mut out = Plane::new(plane.width(), plane.height());

    for (sample, value) in out.data_mut().iter_mut().zip(plane.data()) {
        *sample = i32::from(*value) - shift;
    }
    out
}

/// Add the level shift back, clamping into the sample range.
fn level_unshift(plane: &Plane<i32>, shift: i32, max_value: i32) -> Plane<u8> {
    let mut out = Plane::new(plane.width(), plane.height());

    for (sample, value) in out.data_mut().iter_mut().zip(plane.data()) {
        *sample = (value + shift).clamp(0, max_value) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(BitDepth::Eight).unwrap()
    }

    #[test]
    fn sixteen_bit_frames_are_rejected() {
        assert!(matches!(
            Frame::new(BitDepth::Sixteen),
            Err(CodecErrors::UnsupportedDepth(BitDepth::Sixteen))
        ));
    }

    #[test]
    fn quality_is_validated_up_front() {
        let mut frame = frame();

        assert!(frame.set_quality(&[1]).is_ok());
        assert!(frame.set_quality(&[99]).is_ok());
        assert!(matches!(
            frame.set_quality(&[100]),
            Err(CodecErrors::InvalidQuality(100))
        ));
        assert!(matches!(
            frame.set_quality(&[0]),
            Err(CodecErrors::InvalidQuality(0))
        ));
    }

    #[test]
    fn scan_order_repeats_by_sampling_area() {
        let mut frame = frame();
        frame
            .set_sampling_factor(&SamplingSpec::Packed(420))
            .unwrap();

        assert_eq!(scan_order(&frame.components), vec![0, 0, 0, 0, 1, 2]);

        frame
            .set_sampling_factor(&SamplingSpec::Packed(444))
            .unwrap();
        assert_eq!(scan_order(&frame.components), vec![0, 1, 2]);

        frame
            .set_sampling_factor(&SamplingSpec::Packed(422))
            .unwrap();
        assert_eq!(scan_order(&frame.components), vec![0, 0, 1, 2]);
    }

    #[test]
    fn mcu_counts_must_agree() {
        let frame = frame();
        let components = &frame.components;

        // 4 luma blocks in (2, 2) groups, one block per chroma
        assert_eq!(
            interleaved_mcu_count(components, &[4, 1, 1]).unwrap(),
            1
        );
        assert!(matches!(
            interleaved_mcu_count(components, &[8, 1, 1]),
            Err(CodecErrors::InterleaveMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn level_shift_round_trips() {
        let plane = Plane::from_vec(vec![0_u8, 1, 127, 128, 255], 5, 1).unwrap();

        let shifted = level_shift(&plane, 128);
        assert_eq!(shifted.data(), &[-128, -127, -1, 0, 127]);

        let restored = level_unshift(&shifted, 128, 255);
        assert_eq!(restored.data(), plane.data());
    }

    #[test]
    fn unshift_clamps_out_of_range_samples() {
        let plane = Plane::from_vec(vec![-200_i32, 200], 2, 1).unwrap();

        let restored = level_unshift(&plane, 128, 255);
        assert_eq!(restored.data(), &[0, 255]);
    }
}
