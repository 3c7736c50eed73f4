//! Argon2 memory-hard key derivation (RFC 9106).
//!
//! Argon2 fills a large matrix of 1024-byte blocks, mixing each new block
//! from its predecessor and a pseudo-randomly chosen reference block, so
//! that computing the tag requires both the configured amount of memory
//! and the configured number of passes over it.
//!
//! # Variants
//!
//! - **Argon2d**: reference blocks depend on previously computed data.
//!   Best resistance to time-memory trade-offs, but leaks access patterns.
//! - **Argon2i**: reference blocks depend only on the position, which
//!   makes the access pattern independent of the password.
//! - **Argon2id**: Argon2i addressing for the first half of the first
//!   pass, Argon2d addressing afterwards. The recommended default.
//!
//! # Algorithm Overview
//!
//! 1. **Validation**: cost parameters and input lengths are checked before
//!    anything is allocated.
//! 2. **Initialization**: H0 = BLAKE2b(params || password || salt || ...)
//! 3. **Lane initialization**: the first two blocks of each lane are
//!    H'(H0 || j || lane).
//! 4. **Memory filling**: the remaining blocks are filled with the
//!    compression function G, for `time_cost` passes.
//! 5. **Finalization**: the last block of each lane is XOR-ed together
//!    and H' produces the tag.
//!
//! # Memory Organization
//!
//! - **Lanes**: independent rows that can be processed in parallel.
//! - **Slices**: each lane is divided into 4 slices (sync points).
//! - **Segments**: blocks of one lane within one slice.

pub(crate) mod block;
pub(crate) mod boundary;
pub mod core;
pub(crate) mod memory;
pub mod params;
pub(crate) mod reference;
pub mod secret;

pub use self::core::derive_key;
pub use params::{InputLengths, Layout, ParamError, Params, Variant, Version};
pub use secret::SecretMaterial;
