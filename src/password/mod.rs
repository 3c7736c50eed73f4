//! Password hashing built on Argon2.
//!
//! The three operations callers need:
//!
//! - [`hash`]: derive a tag from a password and a fresh random salt and
//!   return the encoded string to store.
//! - [`verify`]: recompute the tag for a candidate password with the
//!   stored parameters and compare in constant time.
//! - [`needs_rehash`]: tell whether a stored hash was made with different
//!   cost parameters than the current [`Policy`], so it can be upgraded
//!   after the next successful login.
//!
//! The encoded string is the only thing that needs to be persisted; it
//! carries the variant, version, costs, salt and digest.

pub mod encoding;
pub mod policy;

use constant_time_eq::constant_time_eq;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::derivation::argon2::memory::zeroed_bytes;
use crate::derivation::argon2::{InputLengths, SecretMaterial, derive_key};
use crate::error::Error;

pub use encoding::EncodedHash;
pub use policy::{
    DEFAULT_MEMORY_KIB, DEFAULT_OUTPUT_LEN, DEFAULT_PARALLELISM, DEFAULT_SALT_LEN,
    DEFAULT_TIME_COST, DEFAULT_VARIANT, DEFAULT_VERSION, Policy,
};

/// Hashes `password` under `policy` with a random salt of
/// `policy.salt_len()` bytes.
///
/// Parameters are validated before the salt is generated or any memory is
/// allocated.
///
/// # Example
///
/// ```rust
/// use passhash::password::{Policy, hash, verify};
///
/// let policy = Policy::default().memory_kib(256).time_cost(1);
/// let stored = hash(b"correct horse", &policy).unwrap();
///
/// assert!(verify(&stored, b"correct horse").unwrap());
/// assert!(!verify(&stored, b"battery staple").unwrap());
/// ```
pub fn hash(password: &[u8], policy: &Policy) -> Result<String, Error> {
    // derive_key validates again; this call keeps an invalid policy from
    // drawing a salt first.
    policy.params().validate(InputLengths {
        password: password.len(),
        salt: policy.salt_len(),
        ..InputLengths::default()
    })?;

    let mut salt = zeroed_bytes(policy.salt_len())?;
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| Error::EntropyUnavailable(e.to_string()))?;

    hash_with_salt(password, &salt, policy)
}

/// Hashes `password` under `policy` with a caller-supplied salt.
///
/// `policy.salt_len()` is ignored. Salts should still be random and
/// unique per password; this exists for callers with their own salt
/// source and for reproducible tests.
pub fn hash_with_salt(password: &[u8], salt: &[u8], policy: &Policy) -> Result<String, Error> {
    let params = *policy.params();
    let material = SecretMaterial::new(password, salt);
    let mut digest = derive_key(&params, &material)?;

    let encoded = EncodedHash {
        params,
        salt: salt.to_vec(),
        digest: std::mem::take(&mut *digest),
    };
    Ok(encoded.encode())
}

/// Checks `password` against a stored encoded hash.
///
/// Returns `Ok(false)` for a well-formed hash and a wrong password, and
/// [`Error::MalformedHash`] (or [`Error::UnsupportedVariantOrVersion`])
/// when `encoded` cannot be decoded.
pub fn verify(encoded: &str, password: &[u8]) -> Result<bool, Error> {
    let stored = EncodedHash::decode(encoded)?;

    let material = SecretMaterial::new(password, &stored.salt);
    let computed = derive_key(&stored.params, &material)?;

    // Same length by construction: output_len was taken from the digest.
    let matches = constant_time_eq(&computed, &stored.digest);
    if !matches {
        tracing::debug!("password does not match stored argon2 hash");
    }

    Ok(matches)
}

/// Whether `encoded` was made with different parameters than `policy`.
///
/// See [`Policy::is_outdated`] for the fields compared.
pub fn needs_rehash(encoded: &str, policy: &Policy) -> Result<bool, Error> {
    policy.needs_rehash(encoded)
}
