//! The block matrix and the pass/slice/segment filling loop.
//!
//! The matrix is stored as one segment (`segment_len` blocks) per
//! (slice, lane) pair. While slice `s` is being filled, every lane gets
//! exclusive access to its own segment of slice `s` and shared access to
//! all segments of the other slices. The reference selection rules never
//! point into another lane's current segment, so no locking is needed:
//! the end of each slice is the synchronization barrier.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use zeroize::Zeroizing;

use super::block::{BLOCK_SIZE, Block};
use super::params::{Layout, Params, SYNC_POINTS, Version};
use super::reference::{AddressBlocks, Addressing, Position, reference_position};
use crate::error::Error;

/// Blocks of one lane within one slice.
type Segment = Vec<Block>;

/// Arena of blocks addressed by (lane, index within lane).
///
/// Every block is wiped when the matrix is dropped.
pub(crate) struct Matrix {
    layout: Layout,
    /// `slices[slice][lane]`
    slices: Vec<Vec<Segment>>,
}

/// A buffer of `bytes` bytes could not be reserved.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AllocationError {
    pub bytes: u64,
}

impl From<AllocationError> for Error {
    fn from(err: AllocationError) -> Self {
        tracing::warn!(bytes = err.bytes, "argon2 allocation failed");
        Error::AllocationFailure { bytes: err.bytes }
    }
}

/// A zero-filled buffer of `len` bytes, wiped on drop.
///
/// Reserves fallibly, like [`Matrix::allocate`], so salt and tag lengths
/// near the 2^32 - 1 limit fail with an error instead of aborting.
pub(crate) fn zeroed_bytes(len: usize) -> Result<Zeroizing<Vec<u8>>, AllocationError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| AllocationError {
        bytes: len as u64,
    })?;
    buf.resize(len, 0);
    Ok(Zeroizing::new(buf))
}

impl Matrix {
    /// Allocates a zeroed matrix for `layout`.
    ///
    /// Uses fallible reservations so an oversized request is reported
    /// instead of aborting the process.
    pub(crate) fn allocate(layout: Layout) -> Result<Self, AllocationError> {
        let failed = |_| AllocationError {
            bytes: u64::from(layout.block_count) * BLOCK_SIZE as u64,
        };

        let mut slices = Vec::new();
        slices
            .try_reserve_exact(SYNC_POINTS as usize)
            .map_err(failed)?;

        for _ in 0..SYNC_POINTS {
            let mut lanes = Vec::new();
            lanes
                .try_reserve_exact(layout.lanes as usize)
                .map_err(failed)?;

            for _ in 0..layout.lanes {
                let mut segment = Segment::new();
                segment
                    .try_reserve_exact(layout.segment_len as usize)
                    .map_err(failed)?;
                segment.resize(layout.segment_len as usize, Block::ZERO);
                lanes.push(segment);
            }

            slices.push(lanes);
        }

        Ok(Self { layout, slices })
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    pub(crate) fn block(&self, lane: u32, index: u32) -> &Block {
        let (slice, offset) = self.locate(index);
        &self.slices[slice][lane as usize][offset]
    }

    pub(crate) fn block_mut(&mut self, lane: u32, index: u32) -> &mut Block {
        let (slice, offset) = self.locate(index);
        &mut self.slices[slice][lane as usize][offset]
    }

    fn locate(&self, index: u32) -> (usize, usize) {
        let segment_len = self.layout.segment_len;
        ((index / segment_len) as usize, (index % segment_len) as usize)
    }

    /// Runs `params.time_cost` passes over the seeded matrix.
    ///
    /// Slices are processed in order. The lanes of one slice run
    /// concurrently under the `parallel` feature when there is more than
    /// one, and the next slice starts only after all of them return.
    pub(crate) fn fill(&mut self, params: &Params) {
        let layout = self.layout;

        for pass in 0..params.time_cost {
            for slice in 0..SYNC_POINTS {
                let (earlier, rest) = self.slices.split_at_mut(slice as usize);
                let (current, later) = rest.split_at_mut(1);
                let earlier: &[Vec<Segment>] = earlier;
                let later: &[Vec<Segment>] = later;

                let fill_lane = |(lane, segment): (usize, &mut Segment)| {
                    let mut view = SliceView {
                        slice,
                        lane: lane as u32,
                        segment_len: layout.segment_len,
                        current: segment,
                        earlier,
                        later,
                    };
                    fill_segment(&mut view, &layout, params, pass);
                };

                #[cfg(feature = "parallel")]
                if layout.lanes > 1 {
                    current[0].par_iter_mut().enumerate().for_each(fill_lane);
                    continue;
                }

                current[0].iter_mut().enumerate().for_each(fill_lane);
            }

            tracing::trace!(pass, "argon2 pass complete");
        }
    }
}

/// What one lane may touch while a slice is being filled.
struct SliceView<'a> {
    slice: u32,
    lane: u32,
    segment_len: u32,
    current: &'a mut Segment,
    earlier: &'a [Vec<Segment>],
    later: &'a [Vec<Segment>],
}

impl SliceView<'_> {
    fn block(&self, lane: u32, index: u32) -> &Block {
        let slice = index / self.segment_len;
        let offset = (index % self.segment_len) as usize;

        if slice < self.slice {
            &self.earlier[slice as usize][lane as usize][offset]
        } else if slice > self.slice {
            &self.later[(slice - self.slice - 1) as usize][lane as usize][offset]
        } else {
            debug_assert_eq!(lane, self.lane, "read from another lane's open segment");
            &self.current[offset]
        }
    }
}

/// Writes the blocks of one lane's segment: `G(previous, reference)`,
/// XOR-ed into the old contents on later passes of version 0x13 and
/// stored as-is otherwise.
fn fill_segment(view: &mut SliceView<'_>, layout: &Layout, params: &Params, pass: u32) {
    let addressing = Addressing::for_segment(params.variant, pass, view.slice);
    let mut address_blocks = match addressing {
        Addressing::DataIndependent => Some(AddressBlocks::new(
            pass,
            view.lane,
            view.slice,
            layout,
            params.time_cost,
            params.variant,
        )),
        Addressing::DataDependent => None,
    };

    // The first two blocks of every lane are seeded from H0.
    let start = if pass == 0 && view.slice == 0 { 2 } else { 0 };
    let overwrite = pass == 0 || params.version == Version::V0x10;

    for index in start..view.segment_len {
        let index_in_lane = view.slice * view.segment_len + index;
        let prev_index = if index_in_lane == 0 {
            layout.lane_len - 1
        } else {
            index_in_lane - 1
        };

        let next = {
            let prev = view.block(view.lane, prev_index);
            let pseudo_rand = match address_blocks.as_mut() {
                Some(blocks) => blocks.pseudo_rand(index),
                None => prev.0[0],
            };

            let pos = Position {
                pass,
                lane: view.lane,
                slice: view.slice,
                index,
            };
            let (ref_lane, ref_index) = reference_position(layout, pos, pseudo_rand);

            Block::compress(prev, view.block(ref_lane, ref_index))
        };

        let slot = &mut view.current[index as usize];
        if overwrite {
            *slot = next;
        } else {
            slot.xor_in_place(&next);
        }
    }
}
