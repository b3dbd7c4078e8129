//! Command construction
//!
//! Deterministic mapping from session options to the argument vector used to
//! invoke the CLI, plus executable path resolution. Both are independently
//! testable by inspecting the returned values.

use std::path::PathBuf;

use crate::options::KiroAgentOptions;

/// Name of the CLI executable when no explicit path is configured
pub const CLI_NAME: &str = "kiro-cli";

/// Resolve the CLI executable path
///
/// Priority, first match wins (a documented contract, not an implementation
/// detail):
/// 1. Explicit `cli_path` from the options
/// 2. A bundled executable shipped alongside the current executable
/// 3. The bare `kiro-cli` name, resolved via the caller's `PATH`
pub fn resolve_cli_path(options: &KiroAgentOptions) -> PathBuf {
    if let Some(path) = &options.cli_path {
        return path.clone();
    }

    if let Some(bundled) = bundled_cli() {
        return bundled;
    }

    PathBuf::from(CLI_NAME)
}

fn bundled_cli() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe.parent()?.join(CLI_NAME);
    candidate.is_file().then_some(candidate)
}

/// Build the argument vector for invoking the CLI
///
/// The first element is the resolved executable path, followed by the `chat`
/// subcommand and the non-interactive flag. Optional flags follow in a fixed
/// order; tool names are joined into a single comma-separated token in the
/// order given, and the verbosity level emits one `-v` per unit.
pub fn build_command(options: &KiroAgentOptions) -> Vec<String> {
    let mut cmd = vec![
        resolve_cli_path(options).to_string_lossy().into_owned(),
        "chat".to_string(),
        "--no-interactive".to_string(),
    ];

    if !options.allowed_tools.is_empty() {
        cmd.push("--trust-tools".to_string());
        cmd.push(options.allowed_tools.join(","));
    }

    // Not mutually exclusive with --trust-tools; last-wins semantics are the
    // CLI's call.
    if options.trust_all_tools {
        cmd.push("--trust-all-tools".to_string());
    }

    if let Some(session_id) = &options.resume_session {
        cmd.push("--resume".to_string());
        cmd.push(session_id.clone());
    }

    for _ in 0..options.verbose {
        cmd.push("-v".to_string());
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_base_invocation_order() {
        let cmd = build_command(&KiroAgentOptions::new());
        assert_eq!(cmd[1], "chat");
        assert_eq!(cmd[2], "--no-interactive");
    }

    #[test]
    fn test_default_command_is_bare_invocation() {
        let cmd = build_command(&KiroAgentOptions::new());
        assert_eq!(cmd, vec!["kiro-cli", "chat", "--no-interactive"]);
    }

    #[test]
    fn test_explicit_cli_path_wins() {
        let options = KiroAgentOptions::new().with_cli_path("/custom/path/kiro");
        assert_eq!(resolve_cli_path(&options), PathBuf::from("/custom/path/kiro"));
        assert_eq!(build_command(&options)[0], "/custom/path/kiro");
    }

    #[test]
    fn test_trust_tools_single_comma_joined_token() {
        let options = KiroAgentOptions::new().with_allowed_tools(["Bash", "Read", "Write"]);
        let cmd = build_command(&options);

        let idx = cmd.iter().position(|a| a == "--trust-tools").unwrap();
        assert_eq!(cmd[idx + 1], "Bash,Read,Write");
    }

    #[test]
    fn test_trust_tools_absent_when_empty() {
        let cmd = build_command(&KiroAgentOptions::new());
        assert!(!cmd.iter().any(|a| a == "--trust-tools"));
    }

    #[rstest]
    #[case(Vec::new())]
    #[case(vec!["Bash".to_string(), "Read".to_string()])]
    fn test_trust_all_independent_of_allowed_tools(#[case] tools: Vec<String>) {
        let options = KiroAgentOptions::new()
            .with_allowed_tools(tools.clone())
            .with_trust_all_tools(true);
        let cmd = build_command(&options);

        assert!(cmd.iter().any(|a| a == "--trust-all-tools"));
        assert_eq!(
            cmd.iter().any(|a| a == "--trust-tools"),
            !tools.is_empty()
        );
    }

    #[test]
    fn test_resume_flag_followed_by_id() {
        let options = KiroAgentOptions::new().with_resume_session("sess_42");
        let cmd = build_command(&options);

        let idx = cmd.iter().position(|a| a == "--resume").unwrap();
        assert_eq!(cmd[idx + 1], "sess_42");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(5, 5)]
    fn test_one_verbosity_flag_per_unit(#[case] level: u8, #[case] expected: usize) {
        let options = KiroAgentOptions::new().with_verbose(level);
        let cmd = build_command(&options);
        assert_eq!(cmd.iter().filter(|a| *a == "-v").count(), expected);
    }

    #[test]
    fn test_builder_is_deterministic() {
        let options = KiroAgentOptions::new()
            .with_allowed_tools(["Bash"])
            .with_trust_all_tools(true)
            .with_resume_session("sess_1")
            .with_verbose(1);
        assert_eq!(build_command(&options), build_command(&options));
    }
}
