//! Argon2 password hashing.
//!
//! This crate implements the Argon2 family of memory-hard key derivation
//! functions (Argon2d, Argon2i, Argon2id, RFC 9106) and the password
//! hashing operations built on top of them.
//!
//! The focus is on **clarity, predictability, and auditability**: the
//! memory matrix is a plain arena of blocks indexed by lane and position,
//! every piece of secret material is wiped when it is released, and the
//! only persisted artifact is the standard encoded hash string.
//!
//! # Module overview
//!
//! - `hash`
//!   BLAKE2b and the variable-length H' construction Argon2 is built on.
//!
//! - `derivation`
//!   The Argon2 key derivation function itself: parameter validation,
//!   the block compression function, reference addressing, memory filling
//!   (optionally lane-parallel), initialization and finalization.
//!
//! - `password`
//!   The caller-facing operations `hash`, `verify` and `needs_rehash`,
//!   the encoded hash string format, and the immutable hashing `Policy`.
//!
//! # Example
//!
//! ```rust
//! use passhash::password::{Policy, hash, needs_rehash, verify};
//!
//! let policy = Policy::default().memory_kib(1024).time_cost(1);
//! let stored = hash(b"hunter2", &policy).unwrap();
//!
//! assert!(verify(&stored, b"hunter2").unwrap());
//! assert!(!needs_rehash(&stored, &policy).unwrap());
//! assert!(needs_rehash(&stored, &Policy::default()).unwrap());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): fill lanes concurrently with `rayon`. Output is
//!   identical with and without it.

pub mod derivation;
pub mod error;
pub mod hash;
pub mod password;

pub use error::{DecodeError, Error};
pub use password::{EncodedHash, Policy, hash, needs_rehash, verify};
