//! Bond device management through the kernel's control files.
//!
//! The bonding driver is driven entirely through pseudo-files: writing
//! `+<name>` or `-<name>` to `/sys/class/net/bonding_masters` creates or
//! destroys a bond device, the same protocol against a bond's
//! `bonding/slaves` file enslaves or releases member interfaces, and
//! `/proc/net/bonding/<bond>` reports current membership. [`Bonding`]
//! wraps those four control points.
//!
//! # Example
//!
//! ```ignore
//! use bondsys::Bonding;
//!
//! let bonding = Bonding::new();
//! bonding.create("bond0")?;
//! bonding.add_slave("bond0", "eth0")?;
//! assert!(bonding.is_slave("bond0", "eth0"));
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::mode::BondMode;

/// The sysfs directory holding per-interface control trees.
pub const SYSFS_NET_DIR: &str = "/sys/class/net";

/// The procfs directory holding per-bond status reports.
pub const PROC_BONDING_DIR: &str = "/proc/net/bonding";

/// Marker prefixing each member line in a bond's proc status report.
///
/// The kernel writes the line as `Slave Interface: <name>` with nothing
/// after the name, so membership checks compare the remainder of the
/// line exactly rather than by substring.
const SLAVE_IF_MARKER: &str = "Slave Interface: ";

/// Handle for the kernel's bonding control files.
///
/// Holds no state about bonds or slaves; every operation opens, acts on,
/// and closes the relevant control file, so the kernel stays the single
/// source of truth. Concurrent callers (in this process or others) are
/// serialized only by the kernel's own handling of sysfs writes.
///
/// Names are interpolated into fixed path templates without validation;
/// the kernel enforces interface-name syntax and length (IFNAMSIZ), and
/// callers must keep names short enough that the formatted control path
/// stays within ordinary path limits.
#[derive(Debug, Clone)]
pub struct Bonding {
    sysfs: PathBuf,
    procfs: PathBuf,
}

impl Default for Bonding {
    fn default() -> Self {
        Self::new()
    }
}

impl Bonding {
    /// Create a handle over the real kernel control files.
    pub fn new() -> Self {
        Self::with_roots(SYSFS_NET_DIR, PROC_BONDING_DIR)
    }

    /// Create a handle over alternate control roots.
    ///
    /// `sysfs` stands in for `/sys/class/net` and `procfs` for
    /// `/proc/net/bonding`. Intended for tests driving a fake control
    /// tree; the operations are oblivious to where the files live.
    pub fn with_roots<P: AsRef<Path>, Q: AsRef<Path>>(sysfs: P, procfs: Q) -> Self {
        Self {
            sysfs: sysfs.as_ref().to_path_buf(),
            procfs: procfs.as_ref().to_path_buf(),
        }
    }

    /// Create a bond device with the default XOR-balance mode.
    ///
    /// Equivalent to [`create_with_mode`](Self::create_with_mode) with
    /// [`BondMode::BalanceXor`].
    pub fn create(&self, bond: &str) -> Result<()> {
        self.create_with_mode(bond, BondMode::default())
    }

    /// Create a bond device and set its mode.
    ///
    /// Two separate kernel writes: `+<bond>` to the masters file, then
    /// the mode code to the new bond's mode file. If the second write
    /// fails the bond is left behind with the driver's default mode and
    /// the error is returned; there is no rollback, so callers seeing an
    /// error after a partial create must delete and retry or accept the
    /// default-mode bond.
    pub fn create_with_mode(&self, bond: &str, mode: BondMode) -> Result<()> {
        info!("creating bond {} with mode {}", bond, mode);

        self.write_control(&self.masters_path(), &format!("+{}", bond))?;
        self.write_control(&self.mode_path(bond), mode.sysfs_code())
    }

    /// Destroy a bond device.
    ///
    /// Writes `-<bond>` to the masters file. Member interfaces are
    /// released by the kernel as part of teardown. The kernel decides
    /// whether the request means anything; deleting an unknown bond is
    /// typically accepted and ignored, and no post-condition is checked
    /// here.
    pub fn delete(&self, bond: &str) -> Result<()> {
        info!("deleting bond {}", bond);

        self.write_control(&self.masters_path(), &format!("-{}", bond))
    }

    /// Enslave an interface to a bond.
    ///
    /// Writes `+<slave>` to the bond's slaves file. Whether the slave is
    /// already a member, enslaved elsewhere, or otherwise unsuitable is
    /// the kernel's call; such conditions surface as a rejected write or
    /// a silently accepted no-op, not as checks performed here.
    pub fn add_slave(&self, bond: &str, slave: &str) -> Result<()> {
        info!("adding slave {} to bond {}", slave, bond);

        self.write_control(&self.slaves_path(bond), &format!("+{}", slave))
    }

    /// Release an interface from a bond.
    ///
    /// Checks membership first via the bond's proc status report and
    /// returns [`Error::NotAMember`] without touching the slaves file
    /// when the slave is not listed, so a no-op removal never reaches
    /// the kernel. An unreadable status report takes the same path.
    pub fn remove_slave(&self, bond: &str, slave: &str) -> Result<()> {
        info!("removing slave {} from bond {}", slave, bond);

        if !self.is_slave(bond, slave) {
            warn!("slave {} is not in bond {}", slave, bond);
            return Err(Error::NotAMember {
                bond: bond.to_string(),
                slave: slave.to_string(),
            });
        }

        self.write_control(&self.slaves_path(bond), &format!("-{}", slave))
    }

    /// Check whether an interface is currently a member of a bond.
    ///
    /// Scans the bond's proc status report for a `Slave Interface:` line
    /// naming the slave, stopping at the first match. The remainder of
    /// the line must equal the slave name exactly, so `eth1` does not
    /// match a report line for `eth1-extra`. A missing or unreadable
    /// report yields `false`, the same answer as a genuine non-member.
    pub fn is_slave(&self, bond: &str, slave: &str) -> bool {
        let path = self.status_path(bond);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!("unable to open {}: {}", path.display(), e);
                return false;
            }
        };

        BufReader::new(file)
            .lines()
            .map_while(|line| line.ok())
            .any(|line| line.trim().strip_prefix(SLAVE_IF_MARKER) == Some(slave))
    }

    /// List the bond devices the kernel currently knows about.
    ///
    /// Reads the masters file, whose content is a whitespace-separated
    /// list of bond names. A missing masters file usually means the
    /// bonding module is not loaded, which is surfaced as an error
    /// rather than an empty list.
    pub fn list(&self) -> Result<Vec<String>> {
        let path = self.masters_path();
        let content = std::fs::read_to_string(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        let mut names: Vec<String> = content.split_whitespace().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    /// List a bond's current member interfaces, in report order.
    pub fn slaves(&self, bond: &str) -> Result<Vec<String>> {
        let path = self.status_path(bond);
        let file = File::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        Ok(BufReader::new(file)
            .lines()
            .map_while(|line| line.ok())
            .filter_map(|line| {
                line.trim()
                    .strip_prefix(SLAVE_IF_MARKER)
                    .map(str::to_string)
            })
            .collect())
    }

    /// Open a control file for writing and issue one command.
    fn write_control(&self, path: &Path, payload: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?;

        file.write_all(payload.as_bytes())
            .map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    fn masters_path(&self) -> PathBuf {
        self.sysfs.join("bonding_masters")
    }

    fn mode_path(&self, bond: &str) -> PathBuf {
        self.sysfs.join(bond).join("bonding").join("mode")
    }

    fn slaves_path(&self, bond: &str) -> PathBuf {
        self.sysfs.join(bond).join("bonding").join("slaves")
    }

    fn status_path(&self, bond: &str) -> PathBuf {
        self.procfs.join(bond)
    }
}
