use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

/// Copies a regular file, refusing directories and other special files.
pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> anyhow::Result<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    let metadata = fs::metadata(src).with_context(|| format!("failed to stat {}", src.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", src.display());
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, "payload").unwrap();

        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    }

    #[test]
    fn refuses_directories() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("dst");
        assert!(copy_file(dir.path(), &dst).is_err());
    }

    #[test]
    fn fails_on_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let dst = dir.path().join("dst.txt");
        assert!(copy_file(&missing, &dst).is_err());
    }
}
