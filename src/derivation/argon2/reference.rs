//! Reference block selection.
//!
//! Every new block mixes its predecessor with one earlier block picked by
//! a 64-bit pseudo-random value: the high half (J2) picks the lane, the
//! low half (J1) a block inside the allowed window.
//!
//! Where that pseudo-random value comes from is the only difference
//! between the variants:
//! - data-independent addressing reads it from address blocks generated
//!   from the position alone (Argon2i, and Argon2id during the first half
//!   of the first pass);
//! - data-dependent addressing reads the first word of the previous block
//!   (Argon2d, and Argon2id everywhere else).

use super::block::{BLOCK_WORDS, Block};
use super::params::{Layout, Variant};

/// Coordinates of the segment being filled, plus the index inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub pass: u32,
    pub lane: u32,
    pub slice: u32,
    pub index: u32,
}

/// Source of the pseudo-random value used to pick reference blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Addressing {
    DataIndependent,
    DataDependent,
}

impl Addressing {
    pub(crate) fn for_segment(variant: Variant, pass: u32, slice: u32) -> Self {
        match variant {
            Variant::Argon2i => Addressing::DataIndependent,
            Variant::Argon2d => Addressing::DataDependent,
            Variant::Argon2id if pass == 0 && slice < 2 => Addressing::DataIndependent,
            Variant::Argon2id => Addressing::DataDependent,
        }
    }
}

/// Generator for data-independent address blocks.
///
/// Each address block is G(0, G(0, Z)) where Z holds the segment position,
/// the matrix size, the pass count, the variant and a counter that is
/// bumped before every generation. One address block supplies 128
/// pseudo-random values.
pub(crate) struct AddressBlocks {
    input: Block,
    addresses: Block,
}

impl AddressBlocks {
    pub(crate) fn new(
        pass: u32,
        lane: u32,
        slice: u32,
        layout: &Layout,
        time_cost: u32,
        variant: Variant,
    ) -> Self {
        let mut input = Block::ZERO;
        let header = [
            pass,
            lane,
            slice,
            layout.block_count,
            time_cost,
            variant.type_id(),
        ];
        for (word, value) in input.0.iter_mut().zip(header) {
            *word = u64::from(value);
        }

        Self {
            input,
            addresses: Block::ZERO,
        }
    }

    /// Pseudo-random value for block `index` of the segment.
    ///
    /// A fresh address block is generated whenever `index` crosses a
    /// multiple of 128, and once up front for the first segment of the
    /// matrix, which starts filling at index 2.
    pub(crate) fn pseudo_rand(&mut self, index: u32) -> u64 {
        let index = index as usize;
        if index % BLOCK_WORDS == 0 || self.input.0[6] == 0 {
            self.refill();
        }
        self.addresses.0[index % BLOCK_WORDS]
    }

    fn refill(&mut self) {
        self.input.0[6] += 1;
        let tmp = Block::compress(&Block::ZERO, &self.input);
        self.addresses = Block::compress(&Block::ZERO, &tmp);
    }
}

/// Maps `pseudo_rand` to the `(lane, index)` of the block mixed into the
/// block at `pos` (RFC 9106 §3.4.1.3).
///
/// During the first slice of the first pass only the own lane is used.
/// Other lanes are read only outside their current segment, which may
/// still be in flight. Within the allowed window, the squared J1 skews the
/// choice toward recently written blocks.
pub(crate) fn reference_position(layout: &Layout, pos: Position, pseudo_rand: u64) -> (u32, u32) {
    let j1 = pseudo_rand & 0xFFFF_FFFF;
    let j2 = pseudo_rand >> 32;

    let ref_lane = if pos.pass == 0 && pos.slice == 0 {
        pos.lane
    } else {
        (j2 % layout.lanes as u64) as u32
    };
    let same_lane = ref_lane == pos.lane;

    let segment_len = layout.segment_len as u64;
    let lane_len = layout.lane_len as u64;
    let index = pos.index as u64;

    // Blocks finished before the current segment that may be referenced,
    // plus the already-written part of the current segment when the
    // reference lane is our own. The block right before the one being
    // written is always excluded.
    let finished = if pos.pass == 0 {
        pos.slice as u64 * segment_len
    } else {
        lane_len - segment_len
    };
    let reference_area = if same_lane {
        finished + index - 1
    } else if index == 0 {
        finished - 1
    } else {
        finished
    };

    // phi: offset back from the newest allowed block, x = J1^2 / 2^32
    let x = (j1 * j1) >> 32;
    let relative_position = reference_area - 1 - ((reference_area * x) >> 32);

    let start_position = if pos.pass == 0 || pos.slice == 3 {
        0
    } else {
        (pos.slice as u64 + 1) * segment_len
    };

    (ref_lane, ((start_position + relative_position) % lane_len) as u32)
}
