/// Upstream repository of the execution client that hosts precompiles.
pub const OP_GETH_REPO: &str = "https://github.com/ethereum-optimism/op-geth.git";
/// Upstream monorepo holding the bedrock contracts and devnet tooling.
pub const OPTIMISM_REPO: &str = "https://github.com/ethereum-optimism/optimism.git";
/// Branch of the optimism monorepo the preinstall flow tracks.
pub const OPTIMISM_BRANCH: &str = "develop";

/// Checkout directory of the execution client inside a working space.
pub const OP_GETH_DIR: &str = "op-geth";
/// Checkout directory of the monorepo inside a working space.
pub const OPTIMISM_DIR: &str = "optimism";
/// Subdirectory of a working space that hosts precompile development.
pub const PRECOMPILE_WORKSPACE_DIR: &str = "precompile";
/// Subdirectory of a working space that hosts preinstall development.
pub const PREINSTALL_WORKSPACE_DIR: &str = "preinstall";

/// Go source file holding the precompiled contract registries, relative to
/// the op-geth checkout.
pub const CONTRACTS_REGISTRY_PATH: &str = "core/vm/contracts.go";
/// Registry map that activates a precompile on the Cancun fork.
pub const PRECOMPILED_MAP_VAR: &str = "PrecompiledContractsCancun";

/// Genesis script that etches preinstalls, relative to the monorepo root.
pub const L2_GENESIS_SCRIPT_PATH: &str = "packages/contracts-bedrock/scripts/L2Genesis.s.sol";
/// Library directory the extension is installed into, relative to the
/// monorepo root.
pub const PREINSTALL_LIBRARIES_PATH: &str = "packages/contracts-bedrock/src/libraries";
/// File name of the generated preinstall library.
pub const PREINSTALLS_EXTENSION_FILE: &str = "PreinstallsExtension.sol";

/// Forge build output directory.
pub const FORGE_OUT_DIR: &str = "out";
/// Directory collecting built binaries at the working space root.
pub const BIN_DIR: &str = "bin";
/// Path of the geth binary inside an op-geth checkout after `make geth`.
pub const GETH_BUILD_PATH: &str = "build/bin/geth";
/// Make target that builds geth inside op-geth.
pub const MAKE_GETH_TARGET: &str = "geth";
