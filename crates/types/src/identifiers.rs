use serde::Serialize;

/// Go identifiers derived from a user-supplied contract name.
///
/// `struct_name` is the exported type of the generated package and the value
/// side of the registry entry; `package_name` doubles as the Go module and
/// package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractIdentifiers {
    pub struct_name: String,
    pub package_name: String,
}

impl ContractIdentifiers {
    /// Derives Go identifiers from a raw contract name.
    ///
    /// The name is trimmed and split on `-`, `_` and whitespace; each segment
    /// keeps its own casing except for the first character, which is
    /// upper-cased. `my-contract` becomes struct `MyContract` in package
    /// `mycontract`.
    pub fn derive(raw: &str) -> Result<Self, String> {
        let mut struct_name = String::new();
        let segments = raw
            .trim()
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|segment| !segment.is_empty());
        for segment in segments {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                struct_name.extend(first.to_uppercase());
                struct_name.push_str(chars.as_str());
            }
        }
        if struct_name.is_empty() {
            return Err(format!("invalid contract name {raw:?}"));
        }
        Ok(Self {
            package_name: struct_name.to_lowercase(),
            struct_name,
        })
    }
}
