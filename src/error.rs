use core::fmt::{self, Display, Formatter};
use core::panic::Location;
use thiserror::Error;

/// An unrecoverable condition: the filesystem is corrupt or a caller broke a contract.
///
/// Nothing can be retried once one of these is raised. The boot sequence hands it to
/// [`crate::halt()`], tests match on it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort {
    reason: AbortReason,
    location: &'static Location<'static>,
}

impl Abort {
    #[track_caller]
    pub fn new(reason: AbortReason) -> Self {
        Self {
            reason,
            location: Location::caller(),
        }
    }

    pub fn reason(&self) -> &AbortReason {
        &self.reason
    }

    /// Where in the loader the condition was detected.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl From<AbortReason> for Abort {
    #[track_caller]
    fn from(reason: AbortReason) -> Self {
        Self::new(reason)
    }
}

impl Display for Abort {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.location.file(),
            self.location.line(),
            self.reason
        )
    }
}

impl core::error::Error for Abort {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AbortReason {
    #[error("Invalid filesystem signature {found:02X?} at offset {offset:#x}")]
    InvalidSignature { offset: usize, found: [u8; 2] },

    #[error("Invalid cluster index {0}")]
    InvalidClusterIndex(u32),

    #[error("Bad cluster {0}")]
    BadCluster(u32),

    #[error("Access of {len} bytes at offset {offset:#x} is outside the image")]
    OutOfBounds { offset: u64, len: u64 },

    #[error("Cluster size is zero")]
    InvalidGeometry,

    #[error("Destination holds {available} bytes but {needed} are required")]
    DestinationTooSmall { needed: usize, available: usize },

    #[error("No partition found in the master boot record")]
    NoPartition,

    #[error("Cannot load {0}")]
    FileNotLoaded(&'static str),
}

/// Why a file could not be loaded.
///
/// Everything except [`LoadError::Abort`] is an expected absence that the caller may
/// decide to tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Abort(#[from] Abort),

    #[error("path is not representable as an 8.3 name")]
    UnsupportedPath,

    #[error("file not found in the root directory")]
    NotFound,

    #[error("read {read} bytes but the file has {expected}")]
    Truncated { expected: u32, read: u32 },
}
