//! Key derivation functions.
//!
//! Currently provides the Argon2 family (Argon2d, Argon2i, Argon2id).

pub mod argon2;

pub use argon2::{Params, SecretMaterial, Variant, Version, derive_key};
