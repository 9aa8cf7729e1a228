use std::path::Path;

use alloy_primitives::Address;
use anyhow::Context;
use clap::Parser;
use roller_common::cmd::Cmd;
use roller_common::logger;
use roller_config::consts::{CONTRACTS_REGISTRY_PATH, OP_GETH_DIR};
use roller_config::templates;
use roller_types::ContractIdentifiers;
use xshell::{cmd, Shell};

use crate::patcher::gosrc;

#[derive(Parser, Debug)]
pub struct PrecompileNewArgs {
    /// Name of the precompile package, e.g. `my-contract`
    pub name: String,
    /// Address the precompile is registered at
    pub address: Address,
}

pub fn run(shell: &Shell, args: PrecompileNewArgs) -> anyhow::Result<()> {
    logger::intro("Scaffolding precompile package");

    let name = args.name.trim();
    let identifiers = ContractIdentifiers::derive(name).map_err(anyhow::Error::msg)?;

    shell
        .create_dir(name)
        .with_context(|| format!("failed to create {name}"))?;

    if !shell.path_exists(Path::new(name).join("go.mod")) {
        logger::step("Initializing go module");
        let _dir = shell.push_dir(name);
        let package = identifiers.package_name.as_str();
        Cmd::new(cmd!(shell, "go mod init {package}")).run()?;
    }

    logger::step("Adding package to go workspace");
    Cmd::new(cmd!(shell, "go work use {name}")).run()?;

    logger::step("Writing package stub");
    let stub = templates::render_precompile_stub(&identifiers)?;
    let stub_path = Path::new(name).join(format!("{name}.go"));
    shell
        .write_file(&stub_path, stub)
        .with_context(|| format!("failed to write {}", stub_path.display()))?;

    logger::step("Registering precompile in op-geth");
    let registry = Path::new(OP_GETH_DIR).join(CONTRACTS_REGISTRY_PATH);
    gosrc::register_precompile(shell, &registry, args.address, &identifiers)?;

    logger::outro(format!(
        "Precompile {} registered at {}",
        identifiers.struct_name, args.address
    ));
    Ok(())
}
