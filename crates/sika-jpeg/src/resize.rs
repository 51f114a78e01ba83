/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Plane resampling and replication padding
//!
//! Chroma planes are downsampled before encoding and upsampled back to
//! the image shape after decoding; the same filter is used both ways.

use crate::plane::Plane;

/// The resampling filter used for chroma down- and upsampling.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResizeMethod {
    /// Nearest neighbour, blocky but exact on flat regions
    Nearest,
    /// Bilinear interpolation
    Bilinear
}

/// Resample `src` to `out_width` by `out_height`.
///
/// Matching dimensions return a plain copy, so a `(1, 1)` sampled
/// component passes through untouched.
pub(crate) fn resize(
    src: &Plane<u8>, out_width: usize, out_height: usize, method: ResizeMethod
) -> Plane<u8> {
    if (src.width(), src.height()) == (out_width, out_height) {
        return src.clone();
    }

    match method {
        ResizeMethod::Nearest => nearest(src, out_width, out_height),
        ResizeMethod::Bilinear => bilinear(src, out_width, out_height)
    }
}

fn nearest(src: &Plane<u8>, out_width: usize, out_height: usize) -> Plane<u8> {
    let mut out = Plane::new(out_width, out_height);

    for y in 0..out_height {
        let src_row = src.row(y * src.height() / out_height);
        let offset = y * out_width;
        let dest = &mut out.data_mut()[offset..offset + out_width];

        for (x, sample) in dest.iter_mut().enumerate() {
            *sample = src_row[x * src.width() / out_width];
        }
    }
    out
}

fn bilinear(src: &Plane<u8>, out_width: usize, out_height: usize) -> Plane<u8> {
    // the edge-ratio form needs two samples per axis on both sides
    if out_width < 2 || out_height < 2 || src.width() < 2 || src.height() < 2 {
        return nearest(src, out_width, out_height);
    }

    let mut out = Plane::new(out_width, out_height);

    let x_ratio = (src.width() - 1) as f64 / (out_width - 1) as f64;
    let y_ratio = (src.height() - 1) as f64 / (out_height - 1) as f64;

    for y in 0..out_height {
        let y_pos = y_ratio * y as f64;
        let y_low = y_pos.floor();
        let y_weight = y_pos - y_low;

        let top = src.row(y_low as usize);
        let bottom = src.row((y_pos.ceil() as usize).min(src.height() - 1));

        let offset = y * out_width;
        let dest = &mut out.data_mut()[offset..offset + out_width];

        let mut x_pos: f64 = 0.0;

        for sample in dest.iter_mut() {
            let x_low = x_pos.floor();
            let x_weight = x_pos - x_low;

            // the incremental x position can drift one ulp past the
            // last column
            let x_floor = (x_low as usize).min(src.width() - 1);
            let x_ceil = (x_pos.ceil() as usize).min(src.width() - 1);

            let a = f64::from(top[x_floor]);
            let b = f64::from(top[x_ceil]);
            let c = f64::from(bottom[x_floor]);
            let d = f64::from(bottom[x_ceil]);

            let pixel = a * (1.0 - x_weight) * (1.0 - y_weight)
                + b * x_weight * (1.0 - y_weight)
                + c * (1.0 - x_weight) * y_weight
                + d * x_weight * y_weight;

            *sample = pixel.round().clamp(0.0, 255.0) as u8;

            x_pos += x_ratio;
        }
    }
    out
}

/// Grow a plane by `bottom` rows and `right` columns, replicating the
/// edge samples outward.
pub(crate) fn pad_replicate(src: &Plane<u8>, bottom: usize, right: usize) -> Plane<u8> {
    if bottom == 0 && right == 0 {
        return src.clone();
    }

    let out_width = src.width() + right;
    let out_height = src.height() + bottom;
    let mut out = Plane::new(out_width, out_height);

    for y in 0..out_height {
        let src_row = src.row(y.min(src.height() - 1));
        let offset = y * out_width;
        let dest = &mut out.data_mut()[offset..offset + out_width];

        dest[..src.width()].copy_from_slice(src_row);
        dest[src.width()..].fill(src_row[src.width() - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_resize_is_a_copy() {
        let plane = Plane::from_vec((0_u8..16).collect(), 4, 4).unwrap();

        for method in [ResizeMethod::Nearest, ResizeMethod::Bilinear] {
            let out = resize(&plane, 4, 4, method);
            assert_eq!(out.data(), plane.data());
        }
    }

    #[test]
    fn nearest_halves_by_dropping() {
        let plane = Plane::from_vec((0_u8..16).collect(), 4, 4).unwrap();

        let out = resize(&plane, 2, 2, ResizeMethod::Nearest);
        assert_eq!(out.data(), &[0, 2, 8, 10]);
    }

    #[test]
    fn bilinear_is_exact_on_flat_planes() {
        let plane = Plane::from_vec(vec![90_u8; 64], 8, 8).unwrap();

        let down = resize(&plane, 4, 4, ResizeMethod::Bilinear);
        assert!(down.data().iter().all(|v| *v == 90));

        let up = resize(&down, 8, 8, ResizeMethod::Bilinear);
        assert!(up.data().iter().all(|v| *v == 90));
    }

    #[test]
    fn bilinear_interpolates_between_corners() {
        let plane = Plane::from_vec(vec![0, 100, 0, 100], 2, 2).unwrap();

        let out = resize(&plane, 3, 2, ResizeMethod::Bilinear);
        assert_eq!(out.row(0), &[0, 50, 100]);
    }

    #[test]
    fn pad_replicates_the_edges() {
        let plane = Plane::from_vec(vec![1, 2, 3, 4], 2, 2).unwrap();

        let out = pad_replicate(&plane, 1, 2);
        assert_eq!(out.row(0), &[1, 2, 2, 2]);
        assert_eq!(out.row(1), &[3, 4, 4, 4]);
        assert_eq!(out.row(2), &[3, 4, 4, 4]);
    }
}
