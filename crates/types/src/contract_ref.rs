use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A contract reference of the form `<File.sol>:<Contract>`, as printed by
/// `forge build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRef {
    pub file: String,
    pub name: String,
}

impl ContractRef {
    /// Path of the contract's build artifact under the forge output
    /// directory: `<out>/<File.sol>/<Contract>.json`.
    pub fn artifact_path(&self, out_dir: &str) -> PathBuf {
        PathBuf::from(out_dir)
            .join(&self.file)
            .join(format!("{}.json", self.name))
    }
}

impl FromStr for ContractRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((file, name)) if !file.is_empty() && !name.is_empty() && !name.contains(':') => {
                Ok(Self {
                    file: file.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!(
                "invalid contract reference {s:?}, expected <File.sol>:<Contract>"
            )),
        }
    }
}

impl fmt::Display for ContractRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_and_name() {
        let reference: ContractRef = "MyToken.sol:MyToken".parse().unwrap();
        assert_eq!(reference.file, "MyToken.sol");
        assert_eq!(reference.name, "MyToken");
    }

    #[test]
    fn rejects_malformed_references() {
        assert!("MyToken.sol".parse::<ContractRef>().is_err());
        assert!(":MyToken".parse::<ContractRef>().is_err());
        assert!("MyToken.sol:".parse::<ContractRef>().is_err());
        assert!("a.sol:B:C".parse::<ContractRef>().is_err());
    }

    #[test]
    fn artifact_path_follows_forge_layout() {
        let reference: ContractRef = "MyToken.sol:MyToken".parse().unwrap();
        assert_eq!(
            reference.artifact_path("out"),
            PathBuf::from("out/MyToken.sol/MyToken.json")
        );
    }
}
