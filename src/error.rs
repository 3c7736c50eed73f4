//! Error taxonomy shared by the derivation and password APIs.
//!
//! Every failure is reported to the immediate caller as a distinct variant.
//! A password that simply does not match a stored hash is not an error:
//! `verify` returns `Ok(false)` for it.

use thiserror::Error;

use crate::derivation::argon2::ParamError;

#[derive(Debug, Error)]
pub enum Error {
    /// A cost parameter or input length is out of range. Detected before
    /// any memory is allocated.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParamError),

    /// The memory matrix, or the salt or tag buffer, could not be
    /// allocated. Retrying with the same parameters will not help.
    #[error("could not allocate {bytes} bytes for argon2")]
    AllocationFailure { bytes: u64 },

    /// The encoded hash string does not follow the expected grammar.
    #[error("malformed hash: {0}")]
    MalformedHash(#[from] DecodeError),

    /// The encoded hash names an algorithm version this crate cannot compute.
    #[error("unsupported argon2 version {0}")]
    UnsupportedVariantOrVersion(u32),

    /// The operating system random source failed while generating a salt.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Ways an encoded hash string can fail to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected a string starting with `$`")]
    MissingPrefix,
    #[error("unknown variant tag `{0}`")]
    UnknownVariant(String),
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("malformed version field")]
    MalformedVersion,
    #[error("malformed parameter list")]
    MalformedParameters,
    #[error("invalid base64 in {field}")]
    InvalidBase64 { field: &'static str },
    #[error("salt is too short")]
    SaltTooShort,
    #[error("digest is too short")]
    DigestTooShort,
    #[error("encoded parameters are invalid: {0}")]
    InvalidParameters(ParamError),
    #[error("unexpected field in hash string")]
    UnexpectedField,
}
