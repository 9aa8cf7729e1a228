use clap::Parser;
use roller_common::cmd::Cmd;
use roller_types::DevnetAction;
use xshell::{cmd, Shell};

#[derive(Parser, Debug)]
pub struct DevnetArgs {
    /// Lifecycle action to run
    #[arg(value_enum)]
    pub action: DevnetAction,
}

pub fn run(shell: &Shell, args: DevnetArgs) -> anyhow::Result<()> {
    let target = args.action.make_target();
    Cmd::new(cmd!(shell, "make {target}")).run()
}
