//! BLAKE2b digests and the H' extended-output construction.

use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};
use zeroize::Zeroizing;

/// Largest digest a single BLAKE2b invocation can produce.
pub const BLAKE2B_OUTBYTES: usize = 64;

/// Half a BLAKE2b digest; the amount of each chained digest H' emits.
const HALF_OUTBYTES: usize = BLAKE2B_OUTBYTES / 2;

/// Computes BLAKE2b over the concatenation of `inputs`, writing
/// `out.len()` bytes of digest into `out`.
///
/// # Panics
/// Panics if `out` is empty or longer than [`BLAKE2B_OUTBYTES`]. Every
/// caller in this crate passes a length inside that range.
pub fn blake2b(out: &mut [u8], inputs: &[&[u8]]) {
    let mut hasher =
        Blake2bVar::new(out.len()).expect("blake2b output length must be within 1..=64");

    for input in inputs {
        hasher.update(input);
    }

    hasher
        .finalize_variable(out)
        .expect("output buffer length matches the requested digest size");
}

/// Variable-length hash function H' (RFC 9106 §3.3).
///
/// Fills `out` with `out.len()` bytes derived from `LE32(out.len()) || inputs`.
///
/// For outputs of at most 64 bytes this is a single BLAKE2b call. Longer
/// outputs chain 64-byte digests `V1, V2, ...` where `V(i+1) = BLAKE2b(Vi)`,
/// emit the first 32 bytes of each, and finish with one digest sized to
/// the remaining length.
///
/// # Panics
/// Panics if `out` is empty or longer than `u32::MAX` bytes.
pub fn blake2b_long(out: &mut [u8], inputs: &[&[u8]]) {
    let out_len = u32::try_from(out.len()).expect("H' output length must fit in 32 bits");
    let prefix = out_len.to_le_bytes();

    if out.len() <= BLAKE2B_OUTBYTES {
        let mut hasher =
            Blake2bVar::new(out.len()).expect("blake2b output length must be within 1..=64");
        hasher.update(&prefix);
        for input in inputs {
            hasher.update(input);
        }
        hasher
            .finalize_variable(out)
            .expect("output buffer length matches the requested digest size");
        return;
    }

    let mut v = Zeroizing::new([0u8; BLAKE2B_OUTBYTES]);
    let mut first: Vec<&[u8]> = Vec::with_capacity(inputs.len() + 1);
    first.push(&prefix);
    first.extend_from_slice(inputs);
    blake2b(&mut v[..], &first);

    out[..HALF_OUTBYTES].copy_from_slice(&v[..HALF_OUTBYTES]);
    let mut written = HALF_OUTBYTES;

    while out.len() - written > BLAKE2B_OUTBYTES {
        let mut next = Zeroizing::new([0u8; BLAKE2B_OUTBYTES]);
        blake2b(&mut next[..], &[&v[..]]);
        v = next;

        out[written..written + HALF_OUTBYTES].copy_from_slice(&v[..HALF_OUTBYTES]);
        written += HALF_OUTBYTES;
    }

    blake2b(&mut out[written..], &[&v[..]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_512_abc_vector() {
        let mut out = [0u8; 64];
        blake2b(&mut out, &[b"abc".as_slice()]);

        let expected = hex::decode(
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
             7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923",
        )
        .unwrap();
        assert_eq!(out.as_slice(), expected.as_slice());
    }

    #[test]
    fn split_inputs_hash_like_concatenation() {
        let mut split = [0u8; 48];
        let mut joined = [0u8; 48];
        blake2b(&mut split, &[b"pass".as_slice(), b"".as_slice(), b"word".as_slice()]);
        blake2b(&mut joined, &[b"password".as_slice()]);
        assert_eq!(split, joined);
    }

    #[test]
    fn short_output_is_prefixed_digest() {
        let mut long = [0u8; 32];
        blake2b_long(&mut long, &[b"somesalt".as_slice()]);

        let mut direct = [0u8; 32];
        blake2b(&mut direct, &[32u32.to_le_bytes().as_slice(), b"somesalt".as_slice()]);

        assert_eq!(long, direct);
    }

    #[test]
    fn long_output_starts_with_first_chained_half() {
        let mut out = vec![0u8; 1024];
        blake2b_long(&mut out, &[b"seed".as_slice()]);

        let mut v1 = [0u8; 64];
        blake2b(&mut v1, &[1024u32.to_le_bytes().as_slice(), b"seed".as_slice()]);
        assert_eq!(&out[..32], &v1[..32]);

        let mut v2 = [0u8; 64];
        blake2b(&mut v2, &[v1.as_slice()]);
        assert_eq!(&out[32..64], &v2[..32]);
    }

    #[test]
    fn long_output_tail_is_sized_to_remainder() {
        // 65 bytes: one 32-byte half, then a 33-byte digest of V1.
        let mut out = [0u8; 65];
        blake2b_long(&mut out, &[b"x".as_slice()]);

        let mut v1 = [0u8; 64];
        blake2b(&mut v1, &[65u32.to_le_bytes().as_slice(), b"x".as_slice()]);
        let mut tail = [0u8; 33];
        blake2b(&mut tail, &[v1.as_slice()]);

        assert_eq!(&out[..32], &v1[..32]);
        assert_eq!(&out[32..], &tail);
    }

    #[test]
    fn output_length_is_bound_into_the_digest() {
        let mut a = [0u8; 64];
        let mut b = [0u8; 72];
        blake2b_long(&mut a, &[b"input".as_slice()]);
        blake2b_long(&mut b, &[b"input".as_slice()]);
        assert_ne!(&a[..32], &b[..32]);
    }
}
