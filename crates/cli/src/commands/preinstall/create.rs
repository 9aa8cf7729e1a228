use anyhow::Context;
use clap::Parser;
use roller_common::cmd::Cmd;
use roller_common::logger;
use xshell::{cmd, Shell};

#[derive(Parser, Debug)]
pub struct PreinstallCreateArgs {
    /// Name of the foundry project
    pub name: String,
}

pub fn run(shell: &Shell, args: PreinstallCreateArgs) -> anyhow::Result<()> {
    logger::intro("Creating preinstall project");

    let name = args.name.trim();
    shell
        .create_dir(name)
        .with_context(|| format!("failed to create {name}"))?;
    Cmd::new(cmd!(shell, "forge init {name}")).run()?;

    logger::outro(format!("Project {name} ready"));
    Ok(())
}
