use clap::{Parser, Subcommand};
use roller_common::config::{init_global_config, GlobalConfig};
use roller_common::error::log_error;
use xshell::Shell;

use crate::commands::precompile::PrecompileCommands;
use crate::commands::preinstall::PreinstallCommands;
use crate::commands::setup::SetupCommands;

mod commands;
mod patcher;

#[derive(Parser, Debug)]
#[command(
    name = "roller",
    version,
    about = "Scaffolds and wires precompiles and preinstalls into an OP Stack devnet"
)]
struct Roller {
    #[command(subcommand)]
    command: RollerSubcommands,
    /// Print every external command before running it
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum RollerSubcommands {
    /// Set up or tear down a working space
    #[command(subcommand)]
    Setup(SetupCommands),
    /// Scaffold and build precompiled contracts for op-geth
    #[command(subcommand)]
    Precompile(PrecompileCommands),
    /// Scaffold, build and register preinstall contracts
    #[command(subcommand)]
    Preinstall(PreinstallCommands),
    /// Print version and build information
    Version,
}

fn main() {
    human_panic::setup_panic!();

    let args = Roller::parse();
    init_global_config(GlobalConfig {
        verbose: args.verbose,
    });

    if let Err(e) = run_subcommand(args.command) {
        log_error(e);
        std::process::exit(1);
    }
}

fn run_subcommand(command: RollerSubcommands) -> anyhow::Result<()> {
    let shell = Shell::new()?;
    match command {
        RollerSubcommands::Setup(args) => commands::setup::run(&shell, args),
        RollerSubcommands::Precompile(args) => commands::precompile::run(&shell, args),
        RollerSubcommands::Preinstall(args) => commands::preinstall::run(&shell, args),
        RollerSubcommands::Version => commands::version::run(),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;

    use super::*;

    fn parse_precompile_new(address: &str) -> Result<Address, clap::Error> {
        let roller = Roller::try_parse_from(["roller", "precompile", "new", "counter", address])?;
        match roller.command {
            RollerSubcommands::Precompile(PrecompileCommands::New(args)) => Ok(args.address),
            other => panic!("parsed into unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_addresses_case_insensitively_with_optional_prefix() {
        let mixed = parse_precompile_new("0xDeaDbeefdEAdbeefdEadbEEFdeadbeEFdEaDbeeF").unwrap();
        let bare = parse_precompile_new("deadbeefdeadbeefdeadbeefdeadbeefdeadbeef").unwrap();
        assert_eq!(mixed, bare);
    }

    #[test]
    fn rejects_a_short_address() {
        assert!(parse_precompile_new("0x1234").is_err());
    }

    #[test]
    fn rejects_an_overlong_address() {
        assert!(parse_precompile_new("0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef00").is_err());
    }

    #[test]
    fn rejects_a_non_hex_address() {
        assert!(parse_precompile_new("0xzz00000000000000000000000000000000000100").is_err());
    }
}
