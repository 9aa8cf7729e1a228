use roller_common::cmd::Cmd;
use roller_common::logger;
use xshell::{cmd, Shell};

pub fn run(shell: &Shell) -> anyhow::Result<()> {
    logger::intro("Building preinstall contracts");
    Cmd::new(cmd!(shell, "forge build")).run()?;
    logger::outro("Build finished");
    Ok(())
}
