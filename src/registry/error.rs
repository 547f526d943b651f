/// Error taxonomy for registry operations.
///
/// Every variant is terminal: nothing is retried internally and a failed
/// operation leaves the registry exactly as it was.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Caller is not the registry admin")]
    NotAdmin,

    #[error("Target is already an active member")]
    AlreadyMember,

    #[error("Target is not an active member")]
    NotMember,

    #[error("Member limit reached")]
    MemberLimitReached,

    #[error("Invalid target principal")]
    InvalidUser,

    #[error("Invalid member limit")]
    InvalidLimit,

    #[error("Registry is paused")]
    Paused,

    #[error("Batch too large ({size} > {max})")]
    BatchTooLarge { size: usize, max: usize },

    #[error("No member at index {0}")]
    EmptySlot(u64),

    #[error("Index slot {ordinal} does not reference an active member")]
    IndexCorrupted { ordinal: u64 },

    #[error("Registry lock poisoned")]
    LockPoisoned,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
