use clap::Subcommand;
use xshell::Shell;

pub mod build;
pub mod new;

#[derive(Subcommand, Debug)]
pub enum PrecompileCommands {
    /// Scaffold a precompile package and register it in op-geth
    New(new::PrecompileNewArgs),
    /// Build op-geth with the registered precompiles
    Build,
}

pub fn run(shell: &Shell, args: PrecompileCommands) -> anyhow::Result<()> {
    match args {
        PrecompileCommands::New(args) => new::run(shell, args),
        PrecompileCommands::Build => build::run(shell),
    }
}
