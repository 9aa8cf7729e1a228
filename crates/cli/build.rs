use std::process::Command;

fn main() {
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|commit| commit.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=ROLLER_GIT_COMMIT={commit}");
    println!(
        "cargo:rustc-env=ROLLER_BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339()
    );
    println!("cargo:rerun-if-changed=build.rs");
}
