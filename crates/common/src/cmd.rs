use anyhow::Context;

use crate::config::global_config;
use crate::logger;

/// Wrapper around [`xshell::Cmd`] that logs the invocation in verbose mode
/// and attaches the command line to any failure. Stdout and stderr of the
/// child are inherited.
pub struct Cmd<'a> {
    inner: xshell::Cmd<'a>,
}

impl<'a> Cmd<'a> {
    pub fn new(cmd: xshell::Cmd<'a>) -> Self {
        Self { inner: cmd }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let command_line = self.inner.to_string();
        let cmd = if global_config().verbose {
            logger::step(format!("Running: {command_line}"));
            self.inner
        } else {
            self.inner.quiet()
        };
        cmd.run()
            .with_context(|| format!("failed to run `{command_line}`"))?;
        Ok(())
    }
}
