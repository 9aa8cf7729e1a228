use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use xshell::Shell;

/// Forge build artifact, reduced to the fields the register flow consumes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgeArtifact {
    pub deployed_bytecode: DeployedBytecode,
}

#[derive(Debug, Deserialize)]
pub struct DeployedBytecode {
    pub object: String,
}

impl ForgeArtifact {
    /// Reads and decodes an artifact produced by `forge build`.
    pub fn read(shell: &Shell, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = shell
            .read_file(path)
            .with_context(|| format!("failed to read build artifact {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to decode build artifact {}", path.display()))
    }

    /// Runtime bytecode as bare lowercase hex, without the `0x` prefix.
    pub fn deployed_code_hex(&self) -> anyhow::Result<String> {
        let object = self.deployed_bytecode.object.trim();
        let stripped = object.strip_prefix("0x").unwrap_or(object);
        let bytes = hex::decode(stripped).context("deployed bytecode is not valid hex")?;
        if bytes.is_empty() {
            bail!("artifact has no deployed bytecode");
        }
        Ok(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(object: &str) -> ForgeArtifact {
        let raw = format!(r#"{{"abi": [], "deployedBytecode": {{"object": "{object}"}}}}"#);
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn strips_prefix_and_lowercases() {
        assert_eq!(artifact("0x60806040").deployed_code_hex().unwrap(), "60806040");
        assert_eq!(artifact("60AB").deployed_code_hex().unwrap(), "60ab");
    }

    #[test]
    fn rejects_invalid_hex() {
        assert!(artifact("0xzz").deployed_code_hex().is_err());
        assert!(artifact("0x123").deployed_code_hex().is_err());
    }

    #[test]
    fn rejects_empty_bytecode() {
        assert!(artifact("0x").deployed_code_hex().is_err());
        assert!(artifact("").deployed_code_hex().is_err());
    }

    #[test]
    fn decodes_forge_output_shape() {
        let raw = r#"{
            "abi": [{"type": "function", "name": "f"}],
            "bytecode": {"object": "0x6080"},
            "deployedBytecode": {"object": "0x6001600101", "sourceMap": ""}
        }"#;
        let artifact: ForgeArtifact = serde_json::from_str(raw).unwrap();
        assert_eq!(artifact.deployed_code_hex().unwrap(), "6001600101");
    }
}
