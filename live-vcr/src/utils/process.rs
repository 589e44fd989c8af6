//! Helpers for running external tools.

use std::ffi::OsStr;
use std::process::Stdio;

/// Tracing target for raw output of external tools.
///
/// Disabled by the default log filter; enable with e.g.
/// `RUST_LOG=live_vcr=info,live_vcr::tool=debug`.
pub const TOOL_LOG_TARGET: &str = "live_vcr::tool";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Create a `tokio::process::Command` for an external tool.
///
/// Stdin is closed and the child survives the drop of its handle. On Windows
/// no console window is opened for the child.
pub fn tool_command(program: impl AsRef<OsStr>) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(program);
    cmd.stdin(Stdio::null()).kill_on_drop(false);
    #[cfg(windows)]
    {
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    cmd
}

/// Forward captured tool output line by line to the tool log target.
pub fn log_tool_output(tool: &str, output: &[u8]) {
    for line in String::from_utf8_lossy(output).lines() {
        let line = line.trim_end();
        if !line.is_empty() {
            tracing::debug!(target: TOOL_LOG_TARGET, tool, "{line}");
        }
    }
}
