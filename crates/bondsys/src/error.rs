//! Error types for bonding control operations.

use std::io;
use std::path::PathBuf;

/// Result type for bonding control operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the bonding control files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A control file could not be opened for the required mode.
    ///
    /// Covers permission problems, a missing `bonding` kernel module, and
    /// bond or interface names the kernel has no device for.
    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        /// The control file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A control file opened but the command write failed.
    #[error("cannot write {}: {}", .path.display(), .source)]
    Write {
        /// The control file that rejected the write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The slave is not a member of the bond.
    ///
    /// Also returned when the bond's proc status file cannot be read; the
    /// membership check folds an unreadable report into "not a member",
    /// so the two cases are indistinguishable here.
    #[error("interface {slave} is not a member of bond {bond}")]
    NotAMember {
        /// The bond that was queried.
        bond: String,
        /// The slave that was not found.
        slave: String,
    },
}

impl Error {
    /// Check if this is a "not found" error (ENOENT/ENODEV on a control
    /// file, or a failed membership check).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Open { source, .. } | Self::Write { source, .. } => {
                matches!(source.kind(), io::ErrorKind::NotFound)
                    || source.raw_os_error() == Some(19) // ENODEV
            }
            Self::NotAMember { .. } => true,
        }
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Open { source, .. } | Self::Write { source, .. } => {
                matches!(source.kind(), io::ErrorKind::PermissionDenied)
            }
            Self::NotAMember { .. } => false,
        }
    }
}
