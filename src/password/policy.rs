//! Hashing policy: the cost parameters new hashes are created with.
//!
//! A [`Policy`] is an immutable value built by the application and passed
//! to every call. There is no process-wide default that can be changed at
//! runtime; `Policy::default()` always returns the constants below.

use crate::derivation::argon2::{Params, Variant, Version};
use crate::error::Error;

use super::encoding::EncodedHash;

pub const DEFAULT_VARIANT: Variant = Variant::Argon2id;
pub const DEFAULT_VERSION: Version = Version::V0x13;
pub const DEFAULT_TIME_COST: u32 = 3;
/// 64 MiB.
pub const DEFAULT_MEMORY_KIB: u32 = 1 << 16;
pub const DEFAULT_PARALLELISM: u32 = 1;
pub const DEFAULT_OUTPUT_LEN: usize = 32;
pub const DEFAULT_SALT_LEN: usize = 16;

/// Cost parameters for new hashes plus the length of generated salts.
///
/// The defaults are a reasonable interactive-login profile, not a
/// universal recommendation; tune `memory_kib` and `time_cost` to the
/// deployment hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Policy {
    params: Params,
    salt_len: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            params: Params {
                variant: DEFAULT_VARIANT,
                version: DEFAULT_VERSION,
                time_cost: DEFAULT_TIME_COST,
                memory_kib: DEFAULT_MEMORY_KIB,
                parallelism: DEFAULT_PARALLELISM,
                output_len: DEFAULT_OUTPUT_LEN,
            },
            salt_len: DEFAULT_SALT_LEN,
        }
    }
}

impl Policy {
    pub const fn new(params: Params, salt_len: usize) -> Self {
        Self { params, salt_len }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.params.variant = variant;
        self
    }

    pub fn time_cost(mut self, time_cost: u32) -> Self {
        self.params.time_cost = time_cost;
        self
    }

    pub fn memory_kib(mut self, memory_kib: u32) -> Self {
        self.params.memory_kib = memory_kib;
        self
    }

    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.params.parallelism = parallelism;
        self
    }

    pub fn output_len(mut self, output_len: usize) -> Self {
        self.params.output_len = output_len;
        self
    }

    pub fn with_salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// Whether a hash with these stored parameters should be recomputed
    /// under this policy.
    ///
    /// Compares variant, version, time cost, memory cost and parallelism.
    /// Output and salt length are not considered.
    pub fn is_outdated(&self, stored: &Params) -> bool {
        let current = &self.params;

        let outdated_field = if stored.variant != current.variant {
            Some("variant")
        } else if stored.version != current.version {
            Some("version")
        } else if stored.time_cost != current.time_cost {
            Some("time_cost")
        } else if stored.memory_kib != current.memory_kib {
            Some("memory_kib")
        } else if stored.parallelism != current.parallelism {
            Some("parallelism")
        } else {
            None
        };

        if let Some(field) = outdated_field {
            tracing::debug!(field, "stored argon2 hash differs from policy");
        }

        outdated_field.is_some()
    }

    /// Decodes `encoded` and checks it with [`Policy::is_outdated`].
    pub fn needs_rehash(&self, encoded: &str) -> Result<bool, Error> {
        let stored = EncodedHash::decode(encoded)?;
        Ok(self.is_outdated(&stored.params))
    }
}
