use anyhow::Context;
use handlebars::{no_escape, Handlebars};
use roller_types::ContractIdentifiers;
use serde::Serialize;

/// Go stub generated for a fresh precompile package. The user fills in the
/// gas accounting and the contract logic.
pub const PRECOMPILE_STUB_TEMPLATE: &str = r#"package {{package_name}}

type {{struct_name}} struct{}

func (c *{{struct_name}}) RequiredGas(input []byte) uint64 {
	// TODO: implement RequiredGas
	panic("implement me")
}

func (c *{{struct_name}}) Run(input []byte) ([]byte, error) {
	// TODO: implement Run
	panic("implement me")
}
"#;

/// Solidity library generated for a registered preinstall. The genesis script
/// etches every address this library reports.
pub const PREINSTALLS_EXTENSION_TEMPLATE: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.0;

library PreinstallsExtension {
    address internal constant {{name}} = {{address}};
    bytes internal constant {{name}}Code = hex"{{deployed_code}}";

    function getDeployedCode(address _addr, uint256 _chainID) internal pure returns (bytes memory out_) {
        if (_addr == {{name}}) return {{name}}Code;

        revert("PreinstallsExtension: unknown preinstall");
    }

    /// @notice Returns the name of the preinstall at the given address.
    function getName(address _addr) internal pure returns (string memory out_) {
        if (_addr == {{name}}) return "{{name}}";

        revert("PreinstallsExtension: unnamed preinstall");
    }

    function getPreinstallAddresses() internal pure returns (address[] memory out_) {
        out_ = new address[](1);
        out_[0] = {{name}};
    }
}
"#;

/// Template data for [`PREINSTALLS_EXTENSION_TEMPLATE`].
#[derive(Debug, Serialize)]
pub struct PreinstallsExtensionData {
    /// Contract name, used for the constants and the reported name.
    pub name: String,
    /// Checksummed address the preinstall is etched at.
    pub address: String,
    /// Runtime bytecode as bare hex, without the `0x` prefix.
    pub deployed_code: String,
}

fn renderer() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(no_escape);
    handlebars
}

/// Renders the Go stub for a new precompile package.
pub fn render_precompile_stub(identifiers: &ContractIdentifiers) -> anyhow::Result<String> {
    renderer()
        .render_template(PRECOMPILE_STUB_TEMPLATE, identifiers)
        .context("failed to render precompile stub")
}

/// Renders the preinstall extension library.
pub fn render_preinstalls_extension(data: &PreinstallsExtensionData) -> anyhow::Result<String> {
    renderer()
        .render_template(PREINSTALLS_EXTENSION_TEMPLATE, data)
        .context("failed to render preinstall extension library")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_precompile_stub() {
        let identifiers = ContractIdentifiers::derive("my-contract").unwrap();
        let stub = render_precompile_stub(&identifiers).unwrap();
        assert!(stub.starts_with("package mycontract\n"));
        assert!(stub.contains("type MyContract struct{}"));
        assert!(stub.contains("func (c *MyContract) RequiredGas(input []byte) uint64 {"));
        assert!(stub.contains("func (c *MyContract) Run(input []byte) ([]byte, error) {"));
    }

    #[test]
    fn renders_preinstall_extension_library() {
        let data = PreinstallsExtensionData {
            name: "MyToken".to_string(),
            address: "0x4200000000000000000000000000000000000800".to_string(),
            deployed_code: "60806040".to_string(),
        };
        let rendered = render_preinstalls_extension(&data).unwrap();
        assert!(rendered.contains(
            "address internal constant MyToken = 0x4200000000000000000000000000000000000800;"
        ));
        assert!(rendered.contains("bytes internal constant MyTokenCode = hex\"60806040\";"));
        assert!(rendered.contains("return \"MyToken\";"));
        assert!(rendered.contains("out_[0] = MyToken;"));
    }
}
