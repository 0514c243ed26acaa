use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub mod tasks;

/// The workspace root, ie the parent of the xtask directory.
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn check_nextest_exists() -> Result<(), anyhow::Error> {
    let status = Command::new("cargo")
        .args(["nextest", "--version"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    anyhow::ensure!(status.success(), "cargo-nextest is not installed");
    Ok(())
}
