//! Canonical string form of an Argon2 hash.
//!
//! ```text
//! $argon2<variant>$v=<version>$m=<memory KiB>,t=<passes>,p=<lanes>$<salt>$<digest>
//! ```
//!
//! Salt and digest use standard base64 without padding. Numbers are plain
//! decimal without sign or leading zeros, so decoding and re-encoding a
//! string produced here gives back the same bytes. A missing `v=` field
//! means version 0x10, as older encoders omitted it.

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD_NO_PAD};

use crate::derivation::argon2::params::{MIN_OUTPUT_LEN, MIN_SALT_LEN, UnknownVariant};
use crate::derivation::argon2::{InputLengths, Params, Variant, Version};
use crate::error::{DecodeError, Error};

/// A decoded (or about to be encoded) hash: parameters, salt and digest.
///
/// `params.output_len` always equals `digest.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedHash {
    pub params: Params,
    pub salt: Vec<u8>,
    pub digest: Vec<u8>,
}

impl EncodedHash {
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses `s`, rejecting anything that does not follow the grammar
    /// exactly.
    ///
    /// Fails with [`Error::MalformedHash`] for grammar, base64 and length
    /// problems (including cost parameters outside the valid range) and
    /// with [`Error::UnsupportedVariantOrVersion`] for a well-formed but
    /// unknown version number.
    pub fn decode(s: &str) -> Result<Self, Error> {
        let rest = s.strip_prefix('$').ok_or(DecodeError::MissingPrefix)?;
        let mut fields = rest.split('$');

        let tag = fields.next().ok_or(DecodeError::MissingField("variant"))?;
        let variant: Variant = tag
            .parse()
            .map_err(|UnknownVariant(tag)| DecodeError::UnknownVariant(tag))?;

        let mut field = fields
            .next()
            .ok_or(DecodeError::MissingField("parameters"))?;

        let version = match field.strip_prefix("v=") {
            Some(number) => {
                let number = parse_decimal(number).ok_or(DecodeError::MalformedVersion)?;
                let version =
                    Version::try_from(number).map_err(Error::UnsupportedVariantOrVersion)?;
                field = fields
                    .next()
                    .ok_or(DecodeError::MissingField("parameters"))?;
                version
            }
            None => Version::V0x10,
        };

        let (memory_kib, time_cost, parallelism) =
            parse_costs(field).ok_or(DecodeError::MalformedParameters)?;

        let salt_b64 = fields.next().ok_or(DecodeError::MissingField("salt"))?;
        let digest_b64 = fields.next().ok_or(DecodeError::MissingField("digest"))?;
        if fields.next().is_some() {
            return Err(DecodeError::UnexpectedField.into());
        }

        let salt = STANDARD_NO_PAD
            .decode(salt_b64)
            .map_err(|_| DecodeError::InvalidBase64 { field: "salt" })?;
        if salt.len() < MIN_SALT_LEN {
            return Err(DecodeError::SaltTooShort.into());
        }

        let digest = STANDARD_NO_PAD
            .decode(digest_b64)
            .map_err(|_| DecodeError::InvalidBase64 { field: "digest" })?;
        if digest.len() < MIN_OUTPUT_LEN {
            return Err(DecodeError::DigestTooShort.into());
        }

        let params = Params {
            variant,
            version,
            time_cost,
            memory_kib,
            parallelism,
            output_len: digest.len(),
        };
        params
            .validate(InputLengths {
                salt: salt.len(),
                ..InputLengths::default()
            })
            .map_err(DecodeError::InvalidParameters)?;

        Ok(Self {
            params,
            salt,
            digest,
        })
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.params.variant,
            self.params.version.as_u32(),
            self.params.memory_kib,
            self.params.time_cost,
            self.params.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.digest),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// Parses `m=<u32>,t=<u32>,p=<u32>`, in that order.
fn parse_costs(field: &str) -> Option<(u32, u32, u32)> {
    let mut parts = field.split(',');

    let m = parse_decimal(parts.next()?.strip_prefix("m=")?)?;
    let t = parse_decimal(parts.next()?.strip_prefix("t=")?)?;
    let p = parse_decimal(parts.next()?.strip_prefix("p=")?)?;

    match parts.next() {
        Some(_) => None,
        None => Some((m, t, p)),
    }
}

/// Canonical unsigned decimal: digits only, no leading zeros, fits a u32.
fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}
