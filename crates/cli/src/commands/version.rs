use roller_common::logger;

pub fn run() -> anyhow::Result<()> {
    logger::info(format!("roller {}", env!("CARGO_PKG_VERSION")));
    logger::info(format!("build timestamp: {}", env!("ROLLER_BUILD_TIMESTAMP")));
    logger::info(format!("git commit: {}", env!("ROLLER_GIT_COMMIT")));
    Ok(())
}
