//! Behavior tests for [`Bonding`] against a fake control tree.
//!
//! A tempdir stands in for `/sys/class/net` and `/proc/net/bonding`.
//! The fake files do not interpret the `+`/`-` command protocol the way
//! the kernel does, so tests assert the exact payloads written; where a
//! scenario spans a kernel reaction (a bond's status report growing a
//! member line), the test plays the kernel and updates the report
//! itself. Unopenable-file scenarios use missing files rather than
//! permission bits so the suite also passes when run as root.

use std::fs;
use std::path::{Path, PathBuf};

use bondsys::{BondMode, Bonding, Error};
use tempfile::TempDir;

/// Fake sysfs/procfs roots with an empty bonding_masters file.
struct FakeKernel {
    _tmp: TempDir,
    sysfs: PathBuf,
    procfs: PathBuf,
}

impl FakeKernel {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let sysfs = tmp.path().join("class/net");
        let procfs = tmp.path().join("net/bonding");
        fs::create_dir_all(&sysfs).unwrap();
        fs::create_dir_all(&procfs).unwrap();
        fs::write(sysfs.join("bonding_masters"), "").unwrap();
        Self {
            _tmp: tmp,
            sysfs,
            procfs,
        }
    }

    fn bonding(&self) -> Bonding {
        Bonding::with_roots(&self.sysfs, &self.procfs)
    }

    /// Materialize the control tree the kernel would create for a bond.
    fn add_bond_tree(&self, bond: &str) {
        let dir = self.sysfs.join(bond).join("bonding");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("mode"), "").unwrap();
        fs::write(dir.join("slaves"), "").unwrap();
    }

    /// Write a proc-style status report listing the given members.
    fn write_status(&self, bond: &str, slaves: &[&str]) {
        let mut report = String::from(
            "Ethernet Channel Bonding Driver: v5.15\n\
             \n\
             Bonding Mode: load balancing (xor)\n\
             MII Status: up\n",
        );
        for slave in slaves {
            report.push_str(&format!(
                "\nSlave Interface: {}\nMII Status: up\nLink Failure Count: 0\n",
                slave
            ));
        }
        fs::write(self.procfs.join(bond), report).unwrap();
    }

    fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(self.sysfs.join(path.as_ref())).unwrap()
    }
}

#[test]
fn create_writes_master_and_xor_mode() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond0");

    fake.bonding().create("bond0").unwrap();

    assert_eq!(fake.read("bonding_masters"), "+bond0");
    assert_eq!(fake.read("bond0/bonding/mode"), "2");
}

#[test]
fn create_with_mode_writes_requested_code() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond2");

    fake.bonding()
        .create_with_mode("bond2", BondMode::ActiveBackup)
        .unwrap();

    assert_eq!(fake.read("bond2/bonding/mode"), "1");
}

#[test]
fn create_reports_failure_when_mode_file_missing() {
    let fake = FakeKernel::new();
    // No bond tree: the masters write lands but the mode write cannot.

    let err = fake.bonding().create("bond0").unwrap_err();

    assert!(matches!(err, Error::Open { .. }));
    assert!(err.is_not_found());
    // Partial state is visible: the masters write already happened.
    assert_eq!(fake.read("bonding_masters"), "+bond0");
}

#[test]
fn create_with_unopenable_masters_never_touches_mode_file() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond5");
    fs::remove_file(fake.sysfs.join("bonding_masters")).unwrap();

    let err = fake.bonding().create("bond5").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(fake.read("bond5/bonding/mode"), "");
}

#[test]
fn delete_writes_removal_command() {
    let fake = FakeKernel::new();

    fake.bonding().delete("bond0").unwrap();

    assert_eq!(fake.read("bonding_masters"), "-bond0");
}

#[test]
fn add_slave_writes_to_slaves_file() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond5");

    fake.bonding().add_slave("bond5", "eth2").unwrap();

    assert_eq!(fake.read("bond5/bonding/slaves"), "+eth2");
}

#[test]
fn add_slave_fails_for_missing_bond() {
    let fake = FakeKernel::new();

    let err = fake.bonding().add_slave("bond9", "eth2").unwrap_err();

    assert!(matches!(err, Error::Open { .. }));
    assert!(err.is_not_found());
}

#[test]
fn remove_slave_writes_removal_for_member() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond0");
    fake.write_status("bond0", &["eth2"]);

    fake.bonding().remove_slave("bond0", "eth2").unwrap();

    assert_eq!(fake.read("bond0/bonding/slaves"), "-eth2");
}

#[test]
fn remove_slave_of_non_member_leaves_slaves_file_untouched() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond5");
    fake.write_status("bond5", &["eth2"]);
    let slaves_file = fake.sysfs.join("bond5/bonding/slaves");
    fs::write(&slaves_file, "sentinel").unwrap();

    let err = fake.bonding().remove_slave("bond5", "eth9").unwrap_err();

    assert!(matches!(err, Error::NotAMember { .. }));
    assert_eq!(fs::read_to_string(&slaves_file).unwrap(), "sentinel");
}

#[test]
fn remove_slave_with_missing_status_reports_non_member() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond0");
    // Status report never written: unreadable report folds into
    // "not a member".

    let err = fake.bonding().remove_slave("bond0", "eth2").unwrap_err();

    assert!(matches!(err, Error::NotAMember { .. }));
    assert_eq!(fake.read("bond0/bonding/slaves"), "");
}

#[test]
fn membership_requires_exact_name_after_marker() {
    let fake = FakeKernel::new();
    fake.write_status("bond0", &["eth1-extra"]);
    let bonding = fake.bonding();

    assert!(bonding.is_slave("bond0", "eth1-extra"));
    // A shared prefix must not count as membership.
    assert!(!bonding.is_slave("bond0", "eth1"));
}

#[test]
fn membership_reflects_status_report() {
    let fake = FakeKernel::new();
    fake.write_status("bond0", &["eth0", "eth2"]);
    let bonding = fake.bonding();

    assert!(bonding.is_slave("bond0", "eth0"));
    assert!(bonding.is_slave("bond0", "eth2"));
    assert!(!bonding.is_slave("bond0", "eth1"));
    assert!(!bonding.is_slave("bond1", "eth0"));
}

#[test]
fn enslave_release_cycle() {
    let fake = FakeKernel::new();
    fake.add_bond_tree("bond0");
    let bonding = fake.bonding();

    bonding.add_slave("bond0", "eth2").unwrap();
    assert_eq!(fake.read("bond0/bonding/slaves"), "+eth2");

    // The kernel would now list the member in the status report.
    fake.write_status("bond0", &["eth2"]);
    assert!(bonding.is_slave("bond0", "eth2"));

    bonding.remove_slave("bond0", "eth2").unwrap();
    assert_eq!(fake.read("bond0/bonding/slaves"), "-eth2");

    fake.write_status("bond0", &[]);
    assert!(!bonding.is_slave("bond0", "eth2"));
}

#[test]
fn list_parses_masters_file() {
    let fake = FakeKernel::new();
    fs::write(fake.sysfs.join("bonding_masters"), "bond1 bond0\n").unwrap();

    let bonds = fake.bonding().list().unwrap();

    assert_eq!(bonds, vec!["bond0".to_string(), "bond1".to_string()]);
}

#[test]
fn list_fails_without_masters_file() {
    let fake = FakeKernel::new();
    fs::remove_file(fake.sysfs.join("bonding_masters")).unwrap();

    let err = fake.bonding().list().unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn slaves_returns_members_in_report_order() {
    let fake = FakeKernel::new();
    fake.write_status("bond0", &["eth2", "eth0"]);

    let slaves = fake.bonding().slaves("bond0").unwrap();

    assert_eq!(slaves, vec!["eth2".to_string(), "eth0".to_string()]);
}

#[test]
fn slaves_fails_for_missing_bond() {
    let fake = FakeKernel::new();

    let err = fake.bonding().slaves("bond7").unwrap_err();
    assert!(err.is_not_found());
}
