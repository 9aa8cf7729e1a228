use once_cell::sync::OnceCell;

static GLOBAL_CONFIG: OnceCell<GlobalConfig> = OnceCell::new();

/// Process-wide flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalConfig {
    pub verbose: bool,
}

/// Stores the global config. Later calls are ignored.
pub fn init_global_config(config: GlobalConfig) {
    GLOBAL_CONFIG.set(config).ok();
}

pub fn global_config() -> GlobalConfig {
    GLOBAL_CONFIG.get().copied().unwrap_or_default()
}
