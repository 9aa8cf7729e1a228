use std::path::Path;

use anyhow::Context;
use roller_common::cmd::Cmd;
use roller_common::{files, logger};
use roller_config::consts::{BIN_DIR, GETH_BUILD_PATH, MAKE_GETH_TARGET, OP_GETH_DIR};
use xshell::{cmd, Shell};

pub fn run(shell: &Shell) -> anyhow::Result<()> {
    logger::intro("Building op-geth");

    shell
        .create_dir(BIN_DIR)
        .with_context(|| format!("failed to create {BIN_DIR}"))?;

    {
        let _dir = shell.push_dir(OP_GETH_DIR);
        Cmd::new(cmd!(shell, "make {MAKE_GETH_TARGET}")).run()?;
    }

    logger::step("Collecting geth binary");
    let built = Path::new(OP_GETH_DIR).join(GETH_BUILD_PATH);
    files::copy_file(built, Path::new(BIN_DIR).join("geth"))?;

    logger::outro("geth built");
    Ok(())
}
