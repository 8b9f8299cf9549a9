//! Bonding mode selection.

use std::fmt;
use std::str::FromStr;

/// Bonding mode, as understood by the kernel bonding driver.
///
/// Each mode maps to the numeric code accepted by a bond's
/// `bonding/mode` sysfs file. The default is [`BondMode::BalanceXor`],
/// which hashes source/destination addresses to pick a slave per flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BondMode {
    /// Round-robin (balance-rr).
    BalanceRr,
    /// Active-backup.
    ActiveBackup,
    /// XOR (balance-xor).
    #[default]
    BalanceXor,
    /// Broadcast.
    Broadcast,
    /// 802.3ad (LACP).
    Ieee802_3ad,
    /// Transmit load balancing.
    BalanceTlb,
    /// Adaptive load balancing.
    BalanceAlb,
}

impl BondMode {
    /// The numeric code written to the `bonding/mode` sysfs file.
    pub fn sysfs_code(self) -> &'static str {
        match self {
            Self::BalanceRr => "0",
            Self::ActiveBackup => "1",
            Self::BalanceXor => "2",
            Self::Broadcast => "3",
            Self::Ieee802_3ad => "4",
            Self::BalanceTlb => "5",
            Self::BalanceAlb => "6",
        }
    }

    /// The kernel's name for this mode, as reported in
    /// `/proc/net/bonding/<bond>`.
    pub fn kernel_name(self) -> &'static str {
        match self {
            Self::BalanceRr => "balance-rr",
            Self::ActiveBackup => "active-backup",
            Self::BalanceXor => "balance-xor",
            Self::Broadcast => "broadcast",
            Self::Ieee802_3ad => "802.3ad",
            Self::BalanceTlb => "balance-tlb",
            Self::BalanceAlb => "balance-alb",
        }
    }
}

impl fmt::Display for BondMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kernel_name())
    }
}

impl FromStr for BondMode {
    type Err = ParseBondModeError;

    /// Accepts the kernel mode names and their numeric codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balance-rr" | "0" => Ok(Self::BalanceRr),
            "active-backup" | "1" => Ok(Self::ActiveBackup),
            "balance-xor" | "2" => Ok(Self::BalanceXor),
            "broadcast" | "3" => Ok(Self::Broadcast),
            "802.3ad" | "4" => Ok(Self::Ieee802_3ad),
            "balance-tlb" | "5" => Ok(Self::BalanceTlb),
            "balance-alb" | "6" => Ok(Self::BalanceAlb),
            other => Err(ParseBondModeError(other.to_string())),
        }
    }
}

/// Error for an unrecognized bonding mode string.
#[derive(Debug, thiserror::Error)]
#[error("unknown bonding mode: {0}")]
pub struct ParseBondModeError(String);
