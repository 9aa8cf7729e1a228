use anyhow::Context;
use clap::Parser;
use roller_common::logger;
use xshell::Shell;

#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Working space directory to remove
    pub working_space: String,
}

pub fn run(shell: &Shell, args: ClearArgs) -> anyhow::Result<()> {
    let space = args.working_space.trim();
    if !shell.path_exists(space) {
        logger::info(format!("Nothing to clear, {space} does not exist"));
        return Ok(());
    }
    shell
        .remove_path(space)
        .with_context(|| format!("failed to remove {space}"))?;
    logger::outro(format!("Removed {space}"));
    Ok(())
}
