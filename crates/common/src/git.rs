use std::path::Path;

use xshell::{cmd, Shell};

use crate::cmd::Cmd;

/// Clones a repository into `target_dir`.
pub fn clone(shell: &Shell, repo_url: &str, target_dir: &Path) -> anyhow::Result<()> {
    Cmd::new(cmd!(shell, "git clone {repo_url} {target_dir}")).run()
}

/// Shallow-clones a single branch of a repository into `target_dir`.
pub fn clone_shallow(
    shell: &Shell,
    repo_url: &str,
    branch: &str,
    target_dir: &Path,
) -> anyhow::Result<()> {
    Cmd::new(cmd!(
        shell,
        "git clone --branch {branch} --single-branch --depth 1 {repo_url} {target_dir}"
    ))
    .run()
}
