use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use roller_common::cmd::Cmd;
use roller_common::{git, logger};
use roller_config::consts::{
    OPTIMISM_BRANCH, OPTIMISM_DIR, OPTIMISM_REPO, OP_GETH_DIR, OP_GETH_REPO,
    PRECOMPILE_WORKSPACE_DIR, PREINSTALL_WORKSPACE_DIR,
};
use xshell::{cmd, Shell};

#[derive(Subcommand, Debug)]
pub enum InitCommands {
    /// Working space for precompile development, with an op-geth checkout
    Precompile(WorkspaceArgs),
    /// Working space for preinstall development, with an optimism checkout
    Preinstall(WorkspaceArgs),
}

#[derive(Parser, Debug)]
pub struct WorkspaceArgs {
    /// Directory the working space is created under
    pub working_space: String,
}

pub fn run(shell: &Shell, command: InitCommands) -> anyhow::Result<()> {
    match command {
        InitCommands::Precompile(args) => init_precompile(shell, &args),
        InitCommands::Preinstall(args) => init_preinstall(shell, &args),
    }
}

fn init_precompile(shell: &Shell, args: &WorkspaceArgs) -> anyhow::Result<()> {
    logger::intro("Setting up precompile working space");

    let space = Path::new(args.working_space.trim()).join(PRECOMPILE_WORKSPACE_DIR);
    shell
        .create_dir(&space)
        .with_context(|| format!("failed to create {}", space.display()))?;

    logger::step(format!("Cloning {OP_GETH_REPO}"));
    git::clone(shell, OP_GETH_REPO, &space.join(OP_GETH_DIR))?;

    logger::step("Initializing go workspace");
    let _dir = shell.push_dir(&space);
    Cmd::new(cmd!(shell, "go work init {OP_GETH_DIR}")).run()?;

    logger::outro(format!("Working space ready at {}", space.display()));
    Ok(())
}

fn init_preinstall(shell: &Shell, args: &WorkspaceArgs) -> anyhow::Result<()> {
    logger::intro("Setting up preinstall working space");

    let space = Path::new(args.working_space.trim()).join(PREINSTALL_WORKSPACE_DIR);
    shell
        .create_dir(&space)
        .with_context(|| format!("failed to create {}", space.display()))?;

    logger::step(format!("Cloning {OPTIMISM_REPO} ({OPTIMISM_BRANCH})"));
    git::clone_shallow(
        shell,
        OPTIMISM_REPO,
        OPTIMISM_BRANCH,
        &space.join(OPTIMISM_DIR),
    )?;

    logger::outro(format!("Working space ready at {}", space.display()));
    Ok(())
}
