//! Linux bonding interface management via sysfs and procfs.
//!
//! This crate drives the kernel bonding driver through its pseudo-file
//! control points: `/sys/class/net/bonding_masters` to create and destroy
//! bond devices, the per-bond `bonding/mode` and `bonding/slaves` files to
//! configure them, and `/proc/net/bonding/<bond>` to observe membership.
//! All durable state lives in the kernel; this crate issues requests and
//! reads back the kernel's current truth, caching nothing between calls.
//!
//! # Example
//!
//! ```ignore
//! use bondsys::{BondMode, Bonding};
//!
//! fn main() -> bondsys::Result<()> {
//!     let bonding = Bonding::new();
//!
//!     bonding.create("bond0")?;
//!     bonding.add_slave("bond0", "eth0")?;
//!     bonding.add_slave("bond0", "eth1")?;
//!
//!     for slave in bonding.slaves("bond0")? {
//!         println!("bond0 member: {}", slave);
//!     }
//!
//!     bonding.remove_slave("bond0", "eth1")?;
//!     bonding.delete("bond0")?;
//!     Ok(())
//! }
//! ```

pub mod bonding;
pub mod error;
pub mod mode;

// Re-export common types at crate root for convenience
pub use bonding::Bonding;
pub use error::{Error, Result};
pub use mode::BondMode;
