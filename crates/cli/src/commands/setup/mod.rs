use clap::Subcommand;
use xshell::Shell;

pub mod clear;
pub mod init;

#[derive(Subcommand, Debug)]
pub enum SetupCommands {
    /// Create a working space and clone the upstream sources into it
    #[command(subcommand)]
    Init(init::InitCommands),
    /// Remove a working space
    Clear(clear::ClearArgs),
}

pub fn run(shell: &Shell, args: SetupCommands) -> anyhow::Result<()> {
    match args {
        SetupCommands::Init(command) => init::run(shell, command),
        SetupCommands::Clear(args) => clear::run(shell, args),
    }
}
