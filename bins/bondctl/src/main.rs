//! bondctl - Linux bonding interface control.

use anyhow::Context;
use clap::{Parser, Subcommand};

use bondsys::{BondMode, Bonding};

#[derive(Parser)]
#[command(name = "bondctl", version, about = "Linux bonding interface control")]
struct Cli {
    /// Output JSON.
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a bond interface.
    Create {
        /// Bond name.
        name: String,

        /// Bonding mode (kernel name or numeric code).
        #[arg(long, default_value_t = BondMode::BalanceXor)]
        mode: BondMode,
    },

    /// Delete a bond interface.
    #[command(visible_alias = "del")]
    Delete {
        /// Bond name.
        name: String,
    },

    /// Enslave an interface to a bond.
    #[command(visible_alias = "enslave")]
    AddSlave {
        /// Bond name.
        bond: String,

        /// Interface to enslave.
        slave: String,
    },

    /// Release an interface from a bond.
    #[command(visible_alias = "release")]
    RemoveSlave {
        /// Bond name.
        bond: String,

        /// Interface to release.
        slave: String,
    },

    /// Show bonds and their member interfaces.
    #[command(visible_alias = "ls")]
    Show {
        /// Bond name (default: all bonds).
        bond: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let bonding = Bonding::new();

    let result = match cli.command {
        Command::Create { name, mode } => bonding
            .create_with_mode(&name, mode)
            .with_context(|| format!("could not create bond {}", name)),
        Command::Delete { name } => bonding
            .delete(&name)
            .with_context(|| format!("could not delete bond {}", name)),
        Command::AddSlave { bond, slave } => bonding
            .add_slave(&bond, &slave)
            .with_context(|| format!("could not add {} to bond {}", slave, bond)),
        Command::RemoveSlave { bond, slave } => bonding
            .remove_slave(&bond, &slave)
            .with_context(|| format!("could not remove {} from bond {}", slave, bond)),
        Command::Show { bond } => show(&bonding, bond.as_deref(), cli.json, cli.pretty),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Bond listing for display.
#[derive(Debug)]
struct BondInfo {
    name: String,
    slaves: Vec<String>,
}

impl BondInfo {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "slaves": self.slaves,
        })
    }
}

fn show(bonding: &Bonding, bond: Option<&str>, json: bool, pretty: bool) -> anyhow::Result<()> {
    let names = match bond {
        Some(name) => vec![name.to_string()],
        None => bonding.list().context("could not list bonds")?,
    };

    let mut bonds = Vec::new();
    for name in names {
        let slaves = bonding
            .slaves(&name)
            .with_context(|| format!("could not read status of bond {}", name))?;
        bonds.push(BondInfo { name, slaves });
    }

    if json {
        let value = serde_json::Value::Array(bonds.iter().map(BondInfo::to_json).collect());
        if pretty {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", value);
        }
    } else {
        for info in &bonds {
            if info.slaves.is_empty() {
                println!("{}", info.name);
            } else {
                println!("{}: {}", info.name, info.slaves.join(" "));
            }
        }
    }

    Ok(())
}
