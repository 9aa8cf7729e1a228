use clap::ValueEnum;

/// Lifecycle actions for the bedrock devnet, each backed by a make target in
/// the optimism monorepo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DevnetAction {
    Up,
    Down,
    Clean,
}

impl DevnetAction {
    pub fn make_target(&self) -> &'static str {
        match self {
            Self::Up => "devnet-up",
            Self::Down => "devnet-down",
            Self::Clean => "devnet-clean",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_actions_to_make_targets() {
        assert_eq!(DevnetAction::Up.make_target(), "devnet-up");
        assert_eq!(DevnetAction::Down.make_target(), "devnet-down");
        assert_eq!(DevnetAction::Clean.make_target(), "devnet-clean");
    }
}
