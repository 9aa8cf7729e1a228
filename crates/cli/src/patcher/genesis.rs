//! Textual patching of the L2 genesis script.
//!
//! Three edits, each guarded by a marker substring so the patch converges:
//! the extension import after the version pragma, the etch helper before the
//! closing brace of the script contract, and the etch loop after the stock
//! preinstall call. Re-running on a patched file finds every marker present
//! and leaves the bytes untouched.

use std::path::Path;

use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use xshell::Shell;

use super::PatchError;

lazy_static! {
    static ref PRAGMA_RE: Regex =
        Regex::new(r"(?m)^pragma solidity \d+\.\d+\.\d+;").expect("valid regex");
}

const IMPORT_MARKER: &str = "PreinstallsExtension.sol";
const IMPORT_STATEMENT: &str =
    r#"import { PreinstallsExtension } from "src/libraries/PreinstallsExtension.sol";"#;

const ETCH_FUNCTION_MARKER: &str = "_setPreinstallExtensionCode";
const ETCH_FUNCTION: &str = r#"    /// @notice Sets the bytecode in state
    function _setPreinstallExtensionCode(address _addr) internal {
        string memory cname = PreinstallsExtension.getName(_addr);
        console.log("Setting %s preinstall extension code at: %s", cname, _addr);
        vm.etch(_addr, PreinstallsExtension.getDeployedCode(_addr, cfg.l2ChainID()));
        // during testing in a shared L1/L2 account namespace some preinstalls may already have been inserted and used.
        if (vm.getNonce(_addr) == 0) {
            vm.setNonce(_addr, 1);
        }
    }"#;

const CALL_ANCHOR: &str = "_setPreinstallCode(Preinstalls.BeaconBlockRoots);";
const LOOP_MARKER: &str = "PreinstallsExtension.getPreinstallAddresses";
const ETCH_LOOP: &str = r#"        for (uint256 i; i < PreinstallsExtension.getPreinstallAddresses().length; i++) {
            _setPreinstallExtensionCode(PreinstallsExtension.getPreinstallAddresses()[i]);
        }"#;

/// Patches the genesis script in place. Writes back only when something
/// changed.
pub fn patch_l2_genesis_file(shell: &Shell, path: &Path) -> anyhow::Result<()> {
    let source = shell
        .read_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let patched = patch_l2_genesis(&source)
        .with_context(|| format!("failed to patch {}", path.display()))?;
    if patched != source {
        shell
            .write_file(path, patched)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Applies the three marker-guarded edits and returns the patched text.
pub fn patch_l2_genesis(source: &str) -> Result<String, PatchError> {
    let mut content = source.to_string();

    if !content.contains(IMPORT_MARKER) {
        let matches: Vec<_> = PRAGMA_RE.find_iter(&content).collect();
        let pragma = match matches.as_slice() {
            [] => return Err(PatchError::AnchorNotFound("pragma solidity version line")),
            [pragma] => pragma,
            _ => return Err(PatchError::AmbiguousAnchor("pragma solidity version line")),
        };
        let insert_at = pragma.end();
        content.insert_str(insert_at, &format!("\n\n{IMPORT_STATEMENT}"));
    }

    if !content.contains(ETCH_FUNCTION_MARKER) {
        let end = content.trim_end().len();
        if end == 0 || !content[..end].ends_with('}') {
            return Err(PatchError::AnchorNotFound(
                "closing brace of the script contract",
            ));
        }
        content.insert_str(end - 1, &format!("\n{ETCH_FUNCTION}\n"));
    }

    if !content.contains(LOOP_MARKER) {
        match content.matches(CALL_ANCHOR).count() {
            0 => return Err(PatchError::AnchorNotFound(CALL_ANCHOR)),
            1 => {}
            _ => return Err(PatchError::AmbiguousAnchor(CALL_ANCHOR)),
        }
        content = content.replacen(CALL_ANCHOR, &format!("{CALL_ANCHOR}\n{ETCH_LOOP}"), 1);
    }

    Ok(content)
}
