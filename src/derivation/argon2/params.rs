//! Cost parameters, their validation and the derived matrix layout.
//!
//! Validation looks only at the parameters and the input lengths, and
//! always runs before any memory is allocated.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of slices (synchronization points) per pass.
pub const SYNC_POINTS: u32 = 4;

/// Largest supported degree of parallelism (2^24 - 1).
pub const MAX_PARALLELISM: u32 = 0x00FF_FFFF;

/// Shortest accepted output tag, in bytes.
pub const MIN_OUTPUT_LEN: usize = 4;

/// Shortest accepted salt, in bytes.
pub const MIN_SALT_LEN: usize = 1;

/// Upper bound for every variable-length input (2^32 - 1 bytes).
const MAX_INPUT_LEN: usize = u32::MAX as usize;

/// Argon2 flavour, selecting how reference blocks are addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Data-dependent addressing. Fastest, but leaks access patterns.
    Argon2d,
    /// Data-independent addressing. Resistant to cache-timing attacks.
    Argon2i,
    /// Argon2i addressing for the first half of the first pass, Argon2d after.
    Argon2id,
}

impl Variant {
    /// Numeric type identifier mixed into H0 and address blocks.
    pub const fn type_id(self) -> u32 {
        match self {
            Variant::Argon2d => 0,
            Variant::Argon2i => 1,
            Variant::Argon2id => 2,
        }
    }

    /// Tag used in the encoded hash string (`argon2id`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Argon2d => "argon2d",
            Variant::Argon2i => "argon2i",
            Variant::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known variant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown argon2 variant `{0}`")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2d" => Ok(Variant::Argon2d),
            "argon2i" => Ok(Variant::Argon2i),
            "argon2id" => Ok(Variant::Argon2id),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// Algorithm revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// Revision 1.0 (`v=16`): later passes overwrite blocks.
    V0x10,
    /// Revision 1.3 (`v=19`): later passes XOR into the existing blocks.
    V0x13,
}

impl Version {
    pub const fn as_u32(self) -> u32 {
        match self {
            Version::V0x10 => 0x10,
            Version::V0x13 => 0x13,
        }
    }
}

impl TryFrom<u32> for Version {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(Version::V0x10),
            0x13 => Ok(Version::V0x13),
            other => Err(other),
        }
    }
}

/// Cost parameters for one Argon2 computation.
///
/// `memory_kib` is kept exactly as requested: it is what gets mixed into
/// H0 and written into encoded hashes. The usable block count is derived
/// from it by [`Params::validate`], rounding down to a multiple of
/// `4 × parallelism`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    pub variant: Variant,
    pub version: Version,
    /// Number of passes over memory (minimum 1).
    pub time_cost: u32,
    /// Memory size in KiB (minimum 8 × parallelism).
    pub memory_kib: u32,
    /// Number of lanes (1 ..= 2^24 - 1).
    pub parallelism: u32,
    /// Length of the derived tag in bytes (minimum 4).
    pub output_len: usize,
}

/// Lengths of the secret inputs, checked alongside the cost parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputLengths {
    pub password: usize,
    pub salt: usize,
    pub secret: usize,
    pub associated_data: usize,
}

/// The first constraint a parameter set violates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("parallelism must be at least 1")]
    TooFewLanes,
    #[error("parallelism must not exceed 16777215")]
    TooManyLanes,
    #[error("memory cost must be at least 8 KiB per lane")]
    MemoryTooSmall,
    #[error("time cost must be at least 1")]
    TooFewPasses,
    #[error("output length must be at least 4 bytes")]
    OutputTooShort,
    #[error("output length must not exceed 2^32 - 1 bytes")]
    OutputTooLong,
    #[error("password must not exceed 2^32 - 1 bytes")]
    PasswordTooLong,
    #[error("salt must be at least 1 byte")]
    SaltTooShort,
    #[error("salt must not exceed 2^32 - 1 bytes")]
    SaltTooLong,
    #[error("secret key must not exceed 2^32 - 1 bytes")]
    SecretTooLong,
    #[error("associated data must not exceed 2^32 - 1 bytes")]
    AssociatedDataTooLong,
}

/// Derived matrix geometry for a validated parameter set.
///
/// - `lanes` rows, each `lane_len` blocks long.
/// - Each lane is cut into [`SYNC_POINTS`] segments of `segment_len` blocks.
/// - `block_count = lanes × lane_len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub lanes: u32,
    pub lane_len: u32,
    pub segment_len: u32,
    pub block_count: u32,
}

impl Params {
    /// Checks every constraint in a fixed order and derives the layout.
    ///
    /// The order is stable so that a given bad input always reports the
    /// same error: lanes, memory, passes, output length, then the input
    /// lengths.
    pub fn validate(&self, lengths: InputLengths) -> Result<Layout, ParamError> {
        if self.parallelism < 1 {
            return Err(ParamError::TooFewLanes);
        }

        if self.parallelism > MAX_PARALLELISM {
            return Err(ParamError::TooManyLanes);
        }

        // parallelism <= 2^24 - 1, so 8 * parallelism fits in a u32
        if self.memory_kib < 8 * self.parallelism {
            return Err(ParamError::MemoryTooSmall);
        }

        if self.time_cost < 1 {
            return Err(ParamError::TooFewPasses);
        }

        if self.output_len < MIN_OUTPUT_LEN {
            return Err(ParamError::OutputTooShort);
        }

        if self.output_len > MAX_INPUT_LEN {
            return Err(ParamError::OutputTooLong);
        }

        if lengths.password > MAX_INPUT_LEN {
            return Err(ParamError::PasswordTooLong);
        }

        if lengths.salt < MIN_SALT_LEN {
            return Err(ParamError::SaltTooShort);
        }

        if lengths.salt > MAX_INPUT_LEN {
            return Err(ParamError::SaltTooLong);
        }

        if lengths.secret > MAX_INPUT_LEN {
            return Err(ParamError::SecretTooLong);
        }

        if lengths.associated_data > MAX_INPUT_LEN {
            return Err(ParamError::AssociatedDataTooLong);
        }

        Ok(Layout::new(self.memory_kib, self.parallelism))
    }
}

impl Layout {
    fn new(memory_kib: u32, lanes: u32) -> Self {
        let segment_len = memory_kib / (SYNC_POINTS * lanes);
        let lane_len = segment_len * SYNC_POINTS;

        Self {
            lanes,
            lane_len,
            segment_len,
            block_count: lane_len * lanes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(memory_kib: u32, time_cost: u32, parallelism: u32) -> Params {
        Params {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            time_cost,
            memory_kib,
            parallelism,
            output_len: 32,
        }
    }

    fn lengths() -> InputLengths {
        InputLengths {
            password: 8,
            salt: 16,
            ..InputLengths::default()
        }
    }

    #[test]
    fn layout_rounds_memory_down_to_lane_multiple() {
        let layout = params(37, 1, 2).validate(lengths()).unwrap();
        assert_eq!(layout.lanes, 2);
        assert_eq!(layout.segment_len, 4);
        assert_eq!(layout.lane_len, 16);
        assert_eq!(layout.block_count, 32);
    }

    #[test]
    fn minimum_memory_gives_two_block_segments() {
        let layout = params(8, 1, 1).validate(lengths()).unwrap();
        assert_eq!(layout.segment_len, 2);
        assert_eq!(layout.block_count, 8);
    }

    #[test]
    fn rejects_zero_parallelism_first() {
        // memory and passes are also invalid, lanes are reported first
        assert_eq!(
            params(0, 0, 0).validate(lengths()),
            Err(ParamError::TooFewLanes)
        );
    }

    #[test]
    fn rejects_excessive_parallelism() {
        assert_eq!(
            params(u32::MAX, 1, MAX_PARALLELISM + 1).validate(lengths()),
            Err(ParamError::TooManyLanes)
        );
    }

    #[test]
    fn rejects_memory_below_eight_blocks_per_lane() {
        assert_eq!(
            params(31, 1, 4).validate(lengths()),
            Err(ParamError::MemoryTooSmall)
        );
        assert!(params(32, 1, 4).validate(lengths()).is_ok());
    }

    #[test]
    fn rejects_zero_passes() {
        assert_eq!(
            params(64, 0, 1).validate(lengths()),
            Err(ParamError::TooFewPasses)
        );
    }

    #[test]
    fn rejects_short_output() {
        let mut p = params(64, 1, 1);
        p.output_len = 3;
        assert_eq!(p.validate(lengths()), Err(ParamError::OutputTooShort));
    }

    #[test]
    fn rejects_empty_salt() {
        let lengths = InputLengths {
            salt: 0,
            ..lengths()
        };
        assert_eq!(
            params(64, 1, 1).validate(lengths),
            Err(ParamError::SaltTooShort)
        );
    }

    #[test]
    fn variant_tags_round_trip() {
        for variant in [Variant::Argon2d, Variant::Argon2i, Variant::Argon2id] {
            assert_eq!(variant.as_str().parse::<Variant>(), Ok(variant));
        }
        assert!("argon2x".parse::<Variant>().is_err());
    }

    #[test]
    fn only_known_versions_convert() {
        assert_eq!(Version::try_from(19), Ok(Version::V0x13));
        assert_eq!(Version::try_from(16), Ok(Version::V0x10));
        assert_eq!(Version::try_from(18), Err(18));
    }
}
