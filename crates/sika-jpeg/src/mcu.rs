/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tiling of component planes into 8x8 blocks in MCU-group order
//!
//! A plane divides into super-tiles of `sx * sy` blocks. Super-tiles are
//! visited in raster order; within one super-tile blocks go left to
//! right, then top to bottom, so for step `(1, 1)` the walk degenerates
//! to plain raster order over the block grid.

use crate::dct::{BLOCK_DIM, BLOCK_SIZE};
use crate::errors::CodecErrors;
use crate::plane::Plane;

/// Geometry of an MCU-group walk over a plane.
pub(crate) struct BlockGrid {
    step:        (u8, u8),
    tile_width:  usize,
    tile_height: usize,
    groups_x:    usize,
    group_size:  usize,
    block_count: usize,
    index:       usize
}

impl BlockGrid {
    pub fn new(width: usize, height: usize, step: (u8, u8)) -> Result<BlockGrid, CodecErrors> {
        let (sx, sy) = step;
        let tile_width = BLOCK_DIM * usize::from(sx);
        let tile_height = BLOCK_DIM * usize::from(sy);

        if width % tile_width != 0 || height % tile_height != 0 {
            return Err(CodecErrors::InvalidShape(format!(
                "{width}x{height} plane cannot tile into {tile_width}x{tile_height} groups"
            )));
        }

        let groups_x = width / tile_width;
        let groups_y = height / tile_height;
        let group_size = usize::from(sx) * usize::from(sy);

        Ok(BlockGrid {
            step,
            tile_width,
            tile_height,
            groups_x,
            group_size,
            block_count: groups_x * groups_y * group_size,
            index: 0
        })
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn end(&self) -> bool {
        self.index >= self.block_count
    }

    /// Pixel origin `(x, y)` of the block at `index`.
    fn origin(&self, index: usize) -> (usize, usize) {
        let group = index / self.group_size;
        let within = index % self.group_size;

        let group_y = group / self.groups_x;
        let group_x = group % self.groups_x;

        let row = within / usize::from(self.step.0);
        let col = within % usize::from(self.step.0);

        (
            group_x * self.tile_width + col * BLOCK_DIM,
            group_y * self.tile_height + row * BLOCK_DIM
        )
    }

    /// Advance the walk, returning the origin of the block just passed.
    fn advance(&mut self) -> Option<(usize, usize)> {
        if self.end() {
            return None;
        }
        let origin = self.origin(self.index);
        self.index += 1;

        Some(origin)
    }
}

/// Encode-side walk: copies 8x8 blocks out of a borrowed plane.
pub(crate) struct BlockSource<'a> {
    grid:  BlockGrid,
    plane: &'a Plane<i32>
}

impl<'a> BlockSource<'a> {
    pub fn new(plane: &'a Plane<i32>, step: (u8, u8)) -> Result<BlockSource<'a>, CodecErrors> {
        Ok(BlockSource {
            grid: BlockGrid::new(plane.width(), plane.height(), step)?,
            plane
        })
    }

    pub fn block_count(&self) -> usize {
        self.grid.block_count()
    }

    /// Copy out the next block, or `None` once the walk is complete.
    pub fn next_block(&mut self) -> Option<[i32; BLOCK_SIZE]> {
        let (x, y) = self.grid.advance()?;
        let mut block = [0_i32; BLOCK_SIZE];

        for (row_index, row) in block.chunks_exact_mut(BLOCK_DIM).enumerate() {
            let src = &self.plane.row(y + row_index)[x..x + BLOCK_DIM];
            row.copy_from_slice(src);
        }
        Some(block)
    }
}

/// Decode-side walk: accumulates reconstructed blocks into an owned
/// zero-filled plane.
pub(crate) struct BlockSink {
    grid:  BlockGrid,
    plane: Plane<i32>
}

impl BlockSink {
    pub fn new(width: usize, height: usize, step: (u8, u8)) -> Result<BlockSink, CodecErrors> {
        Ok(BlockSink {
            grid: BlockGrid::new(width, height, step)?,
            plane: Plane::new(width, height)
        })
    }

    pub fn block_count(&self) -> usize {
        self.grid.block_count()
    }

    pub fn end(&self) -> bool {
        self.grid.end()
    }

    /// Store the next spatial block, rounding the samples to integers.
    pub fn put_next(&mut self, block: &[f32; BLOCK_SIZE]) {
        let Some((x, y)) = self.grid.advance() else {
            debug_assert!(false, "put_next past the end of the grid");
            return;
        };

        let width = self.plane.width();

        for (row_index, row) in block.chunks_exact(BLOCK_DIM).enumerate() {
            let offset = (y + row_index) * width + x;
            let dest = &mut self.plane.data_mut()[offset..offset + BLOCK_DIM];

            for (out, sample) in dest.iter_mut().zip(row) {
                *out = sample.round() as i32;
            }
        }
    }

    pub fn into_plane(self) -> Plane<i32> {
        self.plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(width: usize, height: usize, step: (u8, u8)) -> Vec<(usize, usize)> {
        let mut grid = BlockGrid::new(width, height, step).unwrap();
        let mut out = vec![];

        while let Some(origin) = grid.advance() {
            out.push(origin);
        }
        out
    }

    #[test]
    fn unit_step_is_raster_order() {
        assert_eq!(
            origins(24, 16, (1, 1)),
            vec![(0, 0), (8, 0), (16, 0), (0, 8), (8, 8), (16, 8)]
        );
    }

    #[test]
    fn grouped_step_walks_groups_in_raster_order() {
        // two 16x16 super-tiles side by side, horizontal index fastest
        // within each
        assert_eq!(
            origins(32, 16, (2, 2)),
            vec![
                (0, 0),
                (8, 0),
                (0, 8),
                (8, 8),
                (16, 0),
                (24, 0),
                (16, 8),
                (24, 8)
            ]
        );
    }

    #[test]
    fn wide_step_fills_rows_first() {
        assert_eq!(
            origins(32, 16, (4, 2)),
            vec![
                (0, 0),
                (8, 0),
                (16, 0),
                (24, 0),
                (0, 8),
                (8, 8),
                (16, 8),
                (24, 8)
            ]
        );
    }

    #[test]
    fn every_tile_is_visited_once() {
        let visited = origins(32, 32, (2, 2));
        assert_eq!(visited.len(), 16);

        let mut sorted = visited.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 16);
    }

    #[test]
    fn misaligned_planes_are_rejected() {
        assert!(matches!(
            BlockGrid::new(24, 16, (2, 2)),
            Err(CodecErrors::InvalidShape(_))
        ));
        assert!(matches!(
            BlockGrid::new(15, 8, (1, 1)),
            Err(CodecErrors::InvalidShape(_))
        ));
    }

    #[test]
    fn source_and_sink_mirror_each_other() {
        let width = 16;
        let height = 16;
        let data: Vec<i32> = (0..width * height).map(|v| v as i32).collect();
        let plane = Plane::from_vec(data, width, height).unwrap();

        let mut source = BlockSource::new(&plane, (2, 2)).unwrap();
        let mut sink = BlockSink::new(width, height, (2, 2)).unwrap();

        while let Some(block) = source.next_block() {
            let spatial: [f32; BLOCK_SIZE] = core::array::from_fn(|i| block[i] as f32);
            sink.put_next(&spatial);
        }
        assert!(sink.end());

        assert_eq!(sink.into_plane().data(), plane.data());
    }
}
