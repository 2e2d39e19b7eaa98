//! Standalone `validate-agents-md` hook.

use rh_hooks_ai::cli;
use rh_hooks_ai::Hook;
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run_standalone(Hook::ValidateAgentsMd)
}
