//! The 1 KiB memory block and the compression function G.
//!
//! G is built from the BLAKE2b round, with every addition replaced by
//! `fbla`, which also adds twice the product of the low 32-bit halves.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a block in bytes.
pub const BLOCK_SIZE: usize = 1024;

/// Number of 64-bit words in a block.
pub const BLOCK_WORDS: usize = BLOCK_SIZE / 8;

/// 128 little-endian 64-bit words. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    pub(crate) fn xor_in_place(&mut self, other: &Block) {
        for (word, other) in self.0.iter_mut().zip(&other.0) {
            *word ^= other;
        }
    }

    /// Loads a block from its little-endian byte representation.
    pub(crate) fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        let mut block = Self::ZERO;
        for (word, chunk) in block.0.iter_mut().zip(bytes.chunks_exact(8)) {
            *word = u64::from_le_bytes(core::array::from_fn(|j| chunk[j]));
        }
        block
    }

    pub(crate) fn write_bytes(&self, out: &mut [u8; BLOCK_SIZE]) {
        out.chunks_exact_mut(8)
            .zip(self.0.iter())
            .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));
    }

    /// G(X, Y) = P(R) ⊕ R with R = X ⊕ Y (RFC 9106 §3.5).
    ///
    /// P runs over the eight rows of the 8×8 matrix of 16-byte registers,
    /// then over its eight columns. No branch or index depends on block
    /// contents.
    pub(crate) fn compress(x: &Self, y: &Self) -> Self {
        let mut r = x.clone();
        r.xor_in_place(y);

        let mut out = r.clone();

        // Rows: 8 groups of 16 consecutive words
        for row in out.0.chunks_exact_mut(16) {
            let mut v: [u64; 16] = core::array::from_fn(|k| row[k]);
            permute_p(&mut v);
            row.copy_from_slice(&v);
        }

        // Columns: word pairs (2i, 2i+1) taken from every row
        for col in 0..8 {
            let mut v: [u64; 16] = core::array::from_fn(|k| out.0[column_index(col, k)]);
            permute_p(&mut v);
            for (k, word) in v.into_iter().enumerate() {
                out.0[column_index(col, k)] = word;
            }
        }

        out.xor_in_place(&r);
        out
    }
}

/// Word index of the `k`-th element of column `i` in the 8×8 register
/// matrix (each register being two consecutive words).
#[inline(always)]
const fn column_index(i: usize, k: usize) -> usize {
    2 * i + (k / 2) * 16 + (k % 2)
}

/// Word quadruples the round touches, in order: the four columns of the
/// 4×4 state, then its four diagonals.
const ROUND_SCHEDULE: [[usize; 4]; 8] = [
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [1, 6, 11, 12],
    [2, 7, 8, 13],
    [3, 4, 9, 14],
];

/// One BLAKE2b-style round over 16 words, with `fbla` in place of plain
/// addition.
#[inline(always)]
fn permute_p(v: &mut [u64; 16]) {
    for [a, b, c, d] in ROUND_SCHEDULE {
        gb(v, a, b, c, d);
    }
}

/// Argon2's quarter-round on words `a`, `b`, `c`, `d` of `v`.
///
/// Rotation amounts are those of BLAKE2b: 32, 24, 16, 63.
#[inline(always)]
fn gb(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize) {
    v[a] = fbla(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = fbla(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = fbla(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = fbla(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// `x + y + 2 × lo32(x) × lo32(y)`, all modulo 2^64.
#[inline(always)]
fn fbla(x: u64, y: u64) -> u64 {
    let m = (x & 0xFFFF_FFFF).wrapping_mul(y & 0xFFFF_FFFF);
    x.wrapping_add(y).wrapping_add(m.wrapping_mul(2))
}
