use std::path::Path;

use alloy_primitives::Address;
use anyhow::{bail, Context};
use clap::Parser;
use roller_common::{files, logger};
use roller_config::artifacts::ForgeArtifact;
use roller_config::consts::{
    FORGE_OUT_DIR, L2_GENESIS_SCRIPT_PATH, OPTIMISM_DIR, PREINSTALLS_EXTENSION_FILE,
    PREINSTALL_LIBRARIES_PATH,
};
use roller_config::templates::{self, PreinstallsExtensionData};
use roller_types::ContractRef;
use xshell::Shell;

use crate::patcher::genesis;

#[derive(Parser, Debug)]
pub struct PreinstallRegisterArgs {
    /// Address the preinstall is etched at
    pub address: Address,
    /// Contract to register, as `<File.sol>:<Contract>`
    pub contract: ContractRef,
}

pub fn run(shell: &Shell, args: PreinstallRegisterArgs) -> anyhow::Result<()> {
    logger::intro("Registering preinstall");

    let artifact_path = args.contract.artifact_path(FORGE_OUT_DIR);
    let artifact = ForgeArtifact::read(shell, &artifact_path)?;
    let deployed_code = artifact.deployed_code_hex()?;

    logger::step("Rendering extension library");
    let data = PreinstallsExtensionData {
        name: args.contract.name.clone(),
        address: args.address.to_string(),
        deployed_code,
    };
    let rendered = templates::render_preinstalls_extension(&data)?;
    shell
        .write_file(PREINSTALLS_EXTENSION_FILE, &rendered)
        .with_context(|| format!("failed to write {PREINSTALLS_EXTENSION_FILE}"))?;

    let optimism = Path::new("..").join(OPTIMISM_DIR);
    let genesis_script = optimism.join(L2_GENESIS_SCRIPT_PATH);
    if !shell.path_exists(&genesis_script) {
        bail!(
            "{} not found, expected an optimism checkout next to this project",
            genesis_script.display()
        );
    }

    logger::step("Installing extension library");
    let library_dst = optimism
        .join(PREINSTALL_LIBRARIES_PATH)
        .join(PREINSTALLS_EXTENSION_FILE);
    files::copy_file(PREINSTALLS_EXTENSION_FILE, library_dst)?;

    logger::step("Patching L2 genesis script");
    genesis::patch_l2_genesis_file(shell, &genesis_script)?;

    logger::outro(format!(
        "Preinstall {} registered at {}",
        args.contract.name, args.address
    ));
    Ok(())
}
