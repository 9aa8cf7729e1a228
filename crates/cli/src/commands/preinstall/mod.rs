use clap::Subcommand;
use xshell::Shell;

pub mod build;
pub mod create;
pub mod devnet;
pub mod register;

#[derive(Subcommand, Debug)]
pub enum PreinstallCommands {
    /// Create a foundry project for a preinstall contract
    Create(create::PreinstallCreateArgs),
    /// Build the contracts in the current foundry project
    Build,
    /// Generate the extension library and register it in the optimism monorepo
    Register(register::PreinstallRegisterArgs),
    /// Manage the bedrock devnet
    Devnet(devnet::DevnetArgs),
}

pub fn run(shell: &Shell, args: PreinstallCommands) -> anyhow::Result<()> {
    match args {
        PreinstallCommands::Create(args) => create::run(shell, args),
        PreinstallCommands::Build => build::run(shell),
        PreinstallCommands::Register(args) => register::run(shell, args),
        PreinstallCommands::Devnet(args) => devnet::run(shell, args),
    }
}
