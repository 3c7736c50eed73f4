use zeroize::Zeroizing;

use super::boundary::{finalize, initial_hash, seed_lanes};
use super::memory::{Matrix, zeroed_bytes};
use super::params::Params;
use super::secret::SecretMaterial;
use crate::error::Error;

/// Computes the raw Argon2 tag for `material` under `params`.
///
/// Returns the tag, wiped on drop, or:
/// - [`Error::InvalidParameters`] when a cost or length constraint is
///   violated. Nothing is allocated in that case.
/// - [`Error::AllocationFailure`] when the tag buffer or the memory matrix
///   cannot be allocated at the requested size.
///
/// The matrix lives only for the duration of this call and every block is
/// wiped before it is released, on success and on failure.
///
/// # Example
///
/// ```rust
/// use passhash::derivation::argon2::{Params, SecretMaterial, Variant, Version, derive_key};
///
/// let params = Params {
///     variant: Variant::Argon2id,
///     version: Version::V0x13,
///     time_cost: 1,
///     memory_kib: 64,
///     parallelism: 1,
///     output_len: 32,
/// };
/// let material = SecretMaterial::new(b"my_password", b"random_salt_16b!");
///
/// let tag = derive_key(&params, &material).unwrap();
/// assert_eq!(tag.len(), 32);
/// ```
pub fn derive_key(params: &Params, material: &SecretMaterial) -> Result<Zeroizing<Vec<u8>>, Error> {
    let layout = params.validate(material.lengths())?;

    tracing::debug!(
        variant = %params.variant,
        version = params.version.as_u32(),
        m_cost = params.memory_kib,
        t_cost = params.time_cost,
        lanes = layout.lanes,
        blocks = layout.block_count,
        "deriving argon2 key"
    );

    let mut tag = zeroed_bytes(params.output_len)?;
    let mut matrix = Matrix::allocate(layout)?;

    let h0 = initial_hash(params, material);
    seed_lanes(&mut matrix, &h0);
    drop(h0);

    matrix.fill(params);

    finalize(&matrix, &mut tag);
    drop(matrix);

    tracing::debug!("argon2 derivation complete");

    Ok(tag)
}
