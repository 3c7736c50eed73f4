//! What happens before and after filling: H0, the two seed blocks of
//! every lane, and the tag taken from the last column.

use zeroize::Zeroizing;

use super::block::{BLOCK_SIZE, Block};
use super::memory::Matrix;
use super::params::Params;
use super::secret::SecretMaterial;
use crate::hash::{BLAKE2B_OUTBYTES, blake2b, blake2b_long};

/// `H0 = BLAKE2b-512(p, T, m, t, v, y, |P|, P, |S|, S, |K|, K, |X|, X)`,
/// every number as LE32 (RFC 9106 §3.2). The inputs are fed in place, so
/// no concatenated copy of the password is made.
///
/// The lengths were checked by the validator, so the `as u32` casts are
/// lossless.
pub(crate) fn initial_hash(
    params: &Params,
    material: &SecretMaterial,
) -> Zeroizing<[u8; BLAKE2B_OUTBYTES]> {
    let lanes = params.parallelism.to_le_bytes();
    let tag_len = (params.output_len as u32).to_le_bytes();
    let memory = params.memory_kib.to_le_bytes();
    let time = params.time_cost.to_le_bytes();
    let version = params.version.as_u32().to_le_bytes();
    let variant = params.variant.type_id().to_le_bytes();

    let password_len = (material.password().len() as u32).to_le_bytes();
    let salt_len = (material.salt().len() as u32).to_le_bytes();
    let secret_len = (material.secret().len() as u32).to_le_bytes();
    let ad_len = (material.associated_data().len() as u32).to_le_bytes();

    let mut h0 = Zeroizing::new([0u8; BLAKE2B_OUTBYTES]);
    blake2b(
        &mut h0[..],
        &[
            &lanes,
            &tag_len,
            &memory,
            &time,
            &version,
            &variant,
            &password_len,
            material.password(),
            &salt_len,
            material.salt(),
            &secret_len,
            material.secret(),
            &ad_len,
            material.associated_data(),
        ],
    );
    h0
}

/// Seeds the first two blocks of every lane:
/// `B[i][j] = H'^(1024)(H0 || LE32(j) || LE32(i))` for `j` in {0, 1}.
pub(crate) fn seed_lanes(matrix: &mut Matrix, h0: &[u8; BLAKE2B_OUTBYTES]) {
    let mut bytes = Zeroizing::new([0u8; BLOCK_SIZE]);

    for lane in 0..matrix.layout().lanes {
        for index in 0..2u32 {
            blake2b_long(
                &mut bytes[..],
                &[h0, &index.to_le_bytes(), &lane.to_le_bytes()],
            );
            *matrix.block_mut(lane, index) = Block::from_bytes(&bytes);
        }
    }
}

/// Fills `tag` with H'^(tag.len()) of the XOR of every lane's last block.
pub(crate) fn finalize(matrix: &Matrix, tag: &mut [u8]) {
    let layout = matrix.layout();
    let last = layout.lane_len - 1;

    let mut final_block = matrix.block(0, last).clone();
    for lane in 1..layout.lanes {
        final_block.xor_in_place(matrix.block(lane, last));
    }

    let mut bytes = Zeroizing::new([0u8; BLOCK_SIZE]);
    final_block.write_bytes(&mut bytes);

    blake2b_long(tag, &[&bytes[..]]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::argon2::params::{InputLengths, Variant, Version};

    fn params() -> Params {
        Params {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            time_cost: 1,
            memory_kib: 16,
            parallelism: 2,
            output_len: 32,
        }
    }

    #[test]
    fn initial_hash_binds_every_input() {
        let base = SecretMaterial::new(b"password", b"somesalt");
        let h0 = initial_hash(&params(), &base);

        let variants = [
            initial_hash(&params(), &SecretMaterial::new(b"passwore", b"somesalt")),
            initial_hash(&params(), &SecretMaterial::new(b"password", b"somesalu")),
            initial_hash(
                &params(),
                &SecretMaterial::new(b"password", b"somesalt").with_secret(b"k"),
            ),
            initial_hash(
                &params(),
                &SecretMaterial::new(b"password", b"somesalt").with_associated_data(b"x"),
            ),
            initial_hash(
                &Params {
                    version: Version::V0x10,
                    ..params()
                },
                &base,
            ),
            initial_hash(
                &Params {
                    output_len: 33,
                    ..params()
                },
                &base,
            ),
        ];

        for other in variants.iter() {
            assert_ne!(&h0[..], &other[..]);
        }
    }

    #[test]
    fn length_prefixes_separate_adjacent_fields() {
        // Moving a byte from the password into the salt must change H0.
        let a = initial_hash(&params(), &SecretMaterial::new(b"ab", b"c"));
        let b = initial_hash(&params(), &SecretMaterial::new(b"a", b"bc"));
        assert_ne!(&a[..], &b[..]);
    }

    #[test]
    fn lanes_get_distinct_seed_blocks() {
        let p = params();
        let layout = p
            .validate(InputLengths {
                salt: 8,
                ..InputLengths::default()
            })
            .unwrap();
        let mut matrix = Matrix::allocate(layout).unwrap();
        let h0 = initial_hash(&p, &SecretMaterial::new(b"password", b"somesalt"));
        seed_lanes(&mut matrix, &h0);

        let seeds = [
            matrix.block(0, 0).0,
            matrix.block(0, 1).0,
            matrix.block(1, 0).0,
            matrix.block(1, 1).0,
        ];
        for i in 0..seeds.len() {
            for j in i + 1..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
        // the rest of the lane is untouched until filling
        assert!(matrix.block(1, 2).0.iter().all(|&w| w == 0));
    }

    #[test]
    fn finalize_respects_output_length() {
        let p = params();
        let layout = p
            .validate(InputLengths {
                salt: 8,
                ..InputLengths::default()
            })
            .unwrap();
        let matrix = Matrix::allocate(layout).unwrap();

        let mut short = [0u8; 4];
        finalize(&matrix, &mut short);
        let mut long = [0u8; 100];
        finalize(&matrix, &mut long);

        assert!(long.iter().any(|&b| b != 0));
        assert_ne!(&short[..], &long[..4]);
    }
}
